use astra::Response;
use std::fmt;

/// Errors originating from either the server logic
/// (routing, access control, missing resources) or downstream layers (DB, xlsx).
#[derive(Debug)]
pub enum ServerError {
    NotFound,
    BadRequest(String),
    /// No valid session; the router guard turns these into a /login redirect.
    Unauthorized,
    /// Valid session but insufficient role.
    Forbidden,
    DbError(String),
    XlsxError(String),
    InternalError,
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::NotFound => write!(f, "Not Found"),
            ServerError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            ServerError::Unauthorized => write!(f, "Sign-in required"),
            ServerError::Forbidden => write!(f, "You do not have permission to access this page"),
            ServerError::DbError(msg) => write!(f, "Database Error: {msg}"),
            ServerError::XlsxError(msg) => write!(f, "Spreadsheet Error: {msg}"),
            ServerError::InternalError => write!(f, "Internal Server Error"),
        }
    }
}

impl std::error::Error for ServerError {}
