mod category_board;
mod dashboard;
mod login;
mod machine_detail;
mod machines;
mod material_handling;
mod notifications;
mod register;
mod reports;

pub use category_board::category_board_page;
pub use dashboard::{dashboard_page, DashboardVm};
pub use login::login_page;
pub use machine_detail::machine_detail_page;
pub use machines::{machines_page, MachinesVm};
pub use material_handling::{material_handling_page, MaterialHandlingVm};
pub use notifications::notifications_page;
pub use register::register_page;
pub use reports::{reports_page, ReportsVm};
