use crate::db::machines::{list_all, list_by_category};
use crate::db::reports::list_reports;
use crate::domain::machine::MachineCategory;
use crate::errors::ResultResp;
use crate::handlers::RequestCtx;
use crate::router::AppState;
use crate::spreadsheets::{export_machines_xlsx, export_reports_xlsx};

pub fn get_reports_xlsx(state: &AppState, ctx: &RequestCtx) -> ResultResp {
    let category = ctx.query_param("category").and_then(MachineCategory::parse);
    let reports = state.db.with_conn(|conn| list_reports(conn, category))?;
    export_reports_xlsx(&reports)
}

pub fn get_machines_xlsx(state: &AppState, ctx: &RequestCtx) -> ResultResp {
    let category = ctx.query_param("category").and_then(MachineCategory::parse);
    let machines = state.db.with_conn(|conn| match category {
        Some(cat) => list_by_category(conn, cat),
        None => list_all(conn),
    })?;
    export_machines_xlsx(&machines)
}
