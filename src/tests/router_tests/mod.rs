mod auth_tests;
mod dashboard_tests;
mod machines_tests;
mod notifications_tests;
mod reports_tests;
