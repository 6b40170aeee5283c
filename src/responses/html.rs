use crate::errors::{ResultResp, ServerError};
use astra::{Body, ResponseBuilder};
use maud::Markup;

pub fn html_response(markup: Markup) -> ResultResp {
    let body = markup.into_string();

    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", mime::TEXT_HTML_UTF_8.as_ref())
        .body(Body::from(body))
        .map_err(|_| ServerError::InternalError)
}

/// 303 See Other, optionally setting a cookie alongside (login/logout).
pub fn redirect(location: &str) -> ResultResp {
    ResponseBuilder::new()
        .status(303)
        .header("Location", location)
        .body(Body::from(String::new()))
        .map_err(|_| ServerError::InternalError)
}

pub fn redirect_with_cookie(location: &str, cookie: &str) -> ResultResp {
    ResponseBuilder::new()
        .status(303)
        .header("Location", location)
        .header("Set-Cookie", cookie)
        .body(Body::from(String::new()))
        .map_err(|_| ServerError::InternalError)
}
