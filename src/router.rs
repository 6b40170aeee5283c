use std::collections::HashMap;
use std::io::Read;

use astra::Request;
use url::form_urlencoded;

use crate::auth::sessions::load_user_from_session;
use crate::auth::Role;
use crate::config::AppConfig;
use crate::db::Database;
use crate::domain::now_unix;
use crate::errors::{ResultResp, ServerError};
use crate::handlers::{self, RequestCtx};
use crate::responses::redirect;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: AppConfig,
}

type Handler = fn(&AppState, &RequestCtx) -> ResultResp;

/// Who may reach a route. The guard runs before the handler, so handlers
/// on gated routes can assume a signed-in user with an allowed role.
#[derive(Clone, Copy)]
enum Access {
    Public,
    Roles(&'static [Role]),
}

struct Route {
    method: &'static str,
    path: &'static str,
    access: Access,
    handler: Handler,
}

const STAFF: &[Role] = &[Role::Admin, Role::Technician];
const ADMIN: &[Role] = &[Role::Admin];

const ROUTES: &[Route] = &[
    Route {
        method: "GET",
        path: "/login",
        access: Access::Public,
        handler: handlers::auth::login_form,
    },
    Route {
        method: "POST",
        path: "/login",
        access: Access::Public,
        handler: handlers::auth::login_submit,
    },
    Route {
        method: "GET",
        path: "/register",
        access: Access::Public,
        handler: handlers::auth::register_form,
    },
    Route {
        method: "POST",
        path: "/register",
        access: Access::Public,
        handler: handlers::auth::register_submit,
    },
    Route {
        method: "POST",
        path: "/logout",
        access: Access::Roles(STAFF),
        handler: handlers::auth::logout,
    },
    Route {
        method: "GET",
        path: "/dashboard",
        access: Access::Roles(STAFF),
        handler: handlers::dashboard::get_dashboard,
    },
    Route {
        method: "GET",
        path: "/reports",
        access: Access::Roles(STAFF),
        handler: handlers::reports::get_reports,
    },
    Route {
        method: "POST",
        path: "/reports",
        access: Access::Roles(STAFF),
        handler: handlers::reports::post_report,
    },
    Route {
        method: "POST",
        path: "/reports/update",
        access: Access::Roles(STAFF),
        handler: handlers::reports::post_report_update,
    },
    Route {
        method: "POST",
        path: "/reports/delete",
        access: Access::Roles(STAFF),
        handler: handlers::reports::post_report_delete,
    },
    Route {
        method: "GET",
        path: "/machines",
        access: Access::Roles(STAFF),
        handler: handlers::machines::get_machines,
    },
    Route {
        method: "GET",
        path: "/machines/detail",
        access: Access::Roles(STAFF),
        handler: handlers::machines::get_machine_detail,
    },
    Route {
        method: "POST",
        path: "/machines",
        access: Access::Roles(ADMIN),
        handler: handlers::machines::post_machine,
    },
    Route {
        method: "POST",
        path: "/machines/update",
        access: Access::Roles(ADMIN),
        handler: handlers::machines::post_machine_update,
    },
    Route {
        method: "POST",
        path: "/machines/delete",
        access: Access::Roles(ADMIN),
        handler: handlers::machines::post_machine_delete,
    },
    Route {
        method: "POST",
        path: "/machines/status",
        access: Access::Roles(STAFF),
        handler: handlers::machines::post_machine_status,
    },
    Route {
        method: "GET",
        path: "/material-handling-reports",
        access: Access::Roles(STAFF),
        handler: handlers::machines::get_material_handling,
    },
    Route {
        method: "GET",
        path: "/cooling-tower-dashboard",
        access: Access::Roles(STAFF),
        handler: handlers::machines::get_cooling_tower_board,
    },
    Route {
        method: "GET",
        path: "/compressor-unit-dashboard",
        access: Access::Roles(STAFF),
        handler: handlers::machines::get_compressor_board,
    },
    Route {
        method: "GET",
        path: "/notifications",
        access: Access::Roles(STAFF),
        handler: handlers::notifications::get_notifications,
    },
    Route {
        method: "POST",
        path: "/notifications/read",
        access: Access::Roles(STAFF),
        handler: handlers::notifications::post_notification_read,
    },
    Route {
        method: "GET",
        path: "/export/reports.xlsx",
        access: Access::Roles(STAFF),
        handler: handlers::export::get_reports_xlsx,
    },
    Route {
        method: "GET",
        path: "/export/machines.xlsx",
        access: Access::Roles(STAFF),
        handler: handlers::export::get_machines_xlsx,
    },
];

pub fn handle(req: Request, state: &AppState) -> ResultResp {
    let (parts, body) = req.into_parts();
    let method = parts.method.as_str();
    let path = parts.uri.path().to_string();

    let query = parse_pairs(parts.uri.query().unwrap_or(""));
    let session_token = parts
        .headers
        .get("Cookie")
        .and_then(|v| v.to_str().ok())
        .and_then(session_token_from_cookies);

    let form = if method == "POST" {
        parse_form_body(body)?
    } else {
        HashMap::new()
    };

    let user = match &session_token {
        Some(token) => state
            .db
            .with_conn(|conn| load_user_from_session(conn, token, now_unix()))?,
        None => None,
    };

    let ctx = RequestCtx {
        user,
        session_token,
        query,
        form,
    };

    match ROUTES.iter().find(|r| r.method == method && r.path == path) {
        Some(route) => {
            if let Access::Roles(allowed) = route.access {
                let user = ctx.user.as_ref().ok_or(ServerError::Unauthorized)?;
                if !allowed.contains(&user.role) {
                    return Err(ServerError::Forbidden);
                }
            }
            (route.handler)(state, &ctx)
        }
        // Unknown paths land on the dashboard when signed in, the login
        // page otherwise. Asset paths stay honest 404s.
        None if path.starts_with("/static/") => Err(ServerError::NotFound),
        None if ctx.user.is_some() => redirect("/dashboard"),
        None => redirect("/login"),
    }
}

fn parse_pairs(raw: &str) -> HashMap<String, String> {
    form_urlencoded::parse(raw.as_bytes())
        .into_owned()
        .collect()
}

fn parse_form_body(mut body: astra::Body) -> Result<HashMap<String, String>, ServerError> {
    let mut raw = Vec::new();
    body.reader()
        .read_to_end(&mut raw)
        .map_err(|e| ServerError::BadRequest(format!("unreadable request body: {e}")))?;

    Ok(form_urlencoded::parse(&raw).into_owned().collect())
}

fn session_token_from_cookies(cookies: &str) -> Option<String> {
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == "session").then(|| value.to_string())
    })
}
