use crate::db::notifications::{list_recent, mark_read};
use crate::errors::ResultResp;
use crate::handlers::{nav_context, RequestCtx};
use crate::responses::{html_response, redirect};
use crate::router::AppState;
use crate::templates::pages::notifications_page;

const NOTIFICATIONS_PAGE_LIMIT: i64 = 50;

pub fn get_notifications(state: &AppState, ctx: &RequestCtx) -> ResultResp {
    let user = ctx.user()?;

    let markup = state.db.with_conn(|conn| {
        let nav = nav_context(conn, user)?;
        let notifications = list_recent(conn, user.id, NOTIFICATIONS_PAGE_LIMIT)?;
        Ok(notifications_page(&nav, &notifications))
    })?;

    html_response(markup)
}

pub fn post_notification_read(state: &AppState, ctx: &RequestCtx) -> ResultResp {
    let user = ctx.user()?;
    let id = ctx.form_i64("id")?;

    state.db.with_conn(|conn| mark_read(conn, id, user.id))?;
    redirect("/notifications")
}
