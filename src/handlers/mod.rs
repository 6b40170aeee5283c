pub mod auth;
pub mod dashboard;
pub mod export;
pub mod machines;
pub mod notifications;
pub mod reports;

use std::collections::HashMap;

use rusqlite::Connection;

use crate::auth::CurrentUser;
use crate::db::notifications::unread_count;
use crate::errors::ServerError;
use crate::templates::NavContext;

/// Everything a handler needs from the request, parsed up front by the
/// router: the signed-in user (if any), query parameters, and form fields
/// for POSTs.
pub struct RequestCtx {
    pub user: Option<CurrentUser>,
    pub session_token: Option<String>,
    pub query: HashMap<String, String>,
    pub form: HashMap<String, String>,
}

impl RequestCtx {
    /// The signed-in user. Gated routes are guaranteed one by the router
    /// guard; this is the belt-and-suspenders accessor handlers use.
    pub fn user(&self) -> Result<&CurrentUser, ServerError> {
        self.user.as_ref().ok_or(ServerError::Unauthorized)
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    /// Required form field; missing or empty means the form was tampered
    /// with or mis-rendered.
    pub fn form_field(&self, name: &str) -> Result<&str, ServerError> {
        match self.form.get(name).map(String::as_str) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(ServerError::BadRequest(format!("Missing field: {name}"))),
        }
    }

    pub fn form_field_or_default(&self, name: &str) -> &str {
        self.form.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn form_f64(&self, name: &str) -> f64 {
        self.form
            .get(name)
            .and_then(|v| v.parse().ok())
            .unwrap_or(0.0)
    }

    pub fn form_i64(&self, name: &str) -> Result<i64, ServerError> {
        self.form_field(name)?
            .parse()
            .map_err(|_| ServerError::BadRequest(format!("Field {name} must be a number")))
    }
}

/// Navbar context (user + unread badge) for a signed-in page render.
pub fn nav_context<'a>(
    conn: &Connection,
    user: &'a CurrentUser,
) -> Result<NavContext<'a>, ServerError> {
    Ok(NavContext {
        user,
        unread_notifications: unread_count(conn, user.id)?,
    })
}
