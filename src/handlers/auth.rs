use astra::Response;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::sessions::{create_session, revoke_session};
use crate::db::users::{create_user, find_by_email};
use crate::domain::now_unix;
use crate::errors::{ResultResp, ServerError};
use crate::handlers::RequestCtx;
use crate::responses::{html_response, redirect, redirect_with_cookie};
use crate::router::AppState;
use crate::templates::pages::{login_page, register_page};

const SESSION_COOKIE: &str = "session";

fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax")
}

fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; Max-Age=0")
}

pub fn login_form(_state: &AppState, ctx: &RequestCtx) -> ResultResp {
    if ctx.user.is_some() {
        return redirect("/dashboard");
    }
    html_response(login_page(None))
}

pub fn login_submit(state: &AppState, ctx: &RequestCtx) -> ResultResp {
    let email = ctx.form_field_or_default("email").trim().to_lowercase();
    let password = ctx.form_field_or_default("password");

    if email.is_empty() || password.is_empty() {
        return html_response(login_page(Some("Email and password are required.")));
    }

    let outcome: Result<Response, ServerError> = state.db.with_conn(|conn| {
        let user = match find_by_email(conn, &email)? {
            Some(user) => user,
            None => return Err(ServerError::Unauthorized),
        };
        if !verify_password(&user.password_hash, password) {
            return Err(ServerError::Unauthorized);
        }
        let token = create_session(conn, user.id, now_unix())?;
        redirect_with_cookie("/dashboard", &session_cookie(&token))
    });

    match outcome {
        Ok(resp) => Ok(resp),
        Err(ServerError::Unauthorized) => {
            html_response(login_page(Some("Incorrect email or password.")))
        }
        Err(other) => Err(other),
    }
}

pub fn register_form(_state: &AppState, ctx: &RequestCtx) -> ResultResp {
    if ctx.user.is_some() {
        return redirect("/dashboard");
    }
    html_response(register_page(None))
}

pub fn register_submit(state: &AppState, ctx: &RequestCtx) -> ResultResp {
    let email = ctx.form_field_or_default("email").trim().to_lowercase();
    let display_name = ctx.form_field_or_default("display_name").trim().to_string();
    let password = ctx.form_field_or_default("password");

    if email.is_empty() || !email.contains('@') {
        return html_response(register_page(Some("Please enter a valid email address.")));
    }
    if display_name.is_empty() {
        return html_response(register_page(Some("Please enter your name.")));
    }

    let password_hash = match hash_password(password) {
        Ok(hash) => hash,
        Err(ServerError::BadRequest(msg)) => {
            return html_response(register_page(Some(&msg)));
        }
        Err(other) => return Err(other),
    };

    let outcome: Result<Response, ServerError> = state.db.with_conn(|conn| {
        let now = now_unix();
        let user_id = create_user(conn, &email, &display_name, &password_hash, now)?;
        let token = create_session(conn, user_id, now)?;
        redirect_with_cookie("/dashboard", &session_cookie(&token))
    });

    match outcome {
        Ok(resp) => Ok(resp),
        Err(ServerError::BadRequest(msg)) => html_response(register_page(Some(&msg))),
        Err(other) => Err(other),
    }
}

pub fn logout(state: &AppState, ctx: &RequestCtx) -> ResultResp {
    if let Some(token) = &ctx.session_token {
        state
            .db
            .with_conn(|conn| revoke_session(conn, token, now_unix()))?;
    }
    redirect_with_cookie("/login", &clear_session_cookie())
}
