pub mod machines_xlsx;
pub mod reports_xlsx;

pub use machines_xlsx::export_machines_xlsx;
pub use reports_xlsx::export_reports_xlsx;
