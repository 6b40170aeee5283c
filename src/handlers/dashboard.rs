use crate::db::reports::list_reports;
use crate::domain::kpi::summarize;
use crate::domain::machine::MachineCategory;
use crate::errors::ResultResp;
use crate::handlers::{nav_context, RequestCtx};
use crate::responses::html_response;
use crate::router::AppState;
use crate::templates::pages::{dashboard_page, DashboardVm};

pub fn get_dashboard(state: &AppState, ctx: &RequestCtx) -> ResultResp {
    let user = ctx.user()?;
    let category_filter = ctx.query_param("category").and_then(MachineCategory::parse);

    let markup = state.db.with_conn(|conn| {
        let nav = nav_context(conn, user)?;
        let reports = list_reports(conn, None)?;
        let kpi = summarize(&reports, category_filter);
        Ok(dashboard_page(
            &nav,
            &DashboardVm {
                kpi: &kpi,
                category_filter,
            },
        ))
    })?;

    html_response(markup)
}
