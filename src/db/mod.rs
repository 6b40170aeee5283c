pub mod connection;
pub mod machines;
pub mod notifications;
pub mod reports;
pub mod users;

pub use connection::{init_db, Database};
