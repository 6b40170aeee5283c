use crate::errors::ServerError;
use astra::{Body, Response, ResponseBuilder};

/// Convert a ServerError into a proper HTML response. Unauthorized turns
/// into a login redirect; everything else renders an error page.
pub fn error_to_response(err: ServerError) -> Response {
    match err {
        ServerError::NotFound => html_error_response(404, "Not Found"),
        ServerError::BadRequest(msg) => html_error_response(400, &msg),
        ServerError::Unauthorized => redirect_to_login(),
        ServerError::Forbidden => {
            html_error_response(403, "You do not have permission to access this page.")
        }
        ServerError::DbError(msg) => html_error_response(500, &msg),
        ServerError::XlsxError(msg) => html_error_response(500, &msg),
        ServerError::InternalError => html_error_response(500, "Internal Server Error"),
    }
}

fn redirect_to_login() -> Response {
    ResponseBuilder::new()
        .status(303)
        .header("Location", "/login")
        .body(Body::from(String::new()))
        .unwrap_or_else(|_| html_error_response(500, "Internal Server Error"))
}

/// Build an HTML error page
pub fn html_error_response(status: u16, message: &str) -> Response {
    let html = format!(
        "<!DOCTYPE html>
        <html lang=\"en\">
        <head><meta charset=\"utf-8\"><title>Error {status}</title></head>
        <body>
            <h1>Error {status}</h1>
            <p>{message}</p>
        </body>
        </html>"
    );

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "text/html; charset=utf-8")
        .body(Body::from(html))
        .expect("static error response is always buildable")
}
