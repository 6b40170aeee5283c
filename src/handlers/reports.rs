use rusqlite::Connection;

use crate::db::machines::list_all;
use crate::db::reports::{
    create_report, delete_report, get_report, list_reports, update_report, ReportInput,
};
use crate::domain::report::ReportType;
use crate::domain::{now_unix, parse_datetime_local};
use crate::errors::{ResultResp, ServerError};
use crate::handlers::{nav_context, RequestCtx};
use crate::responses::{html_response, redirect};
use crate::router::AppState;
use crate::templates::pages::{reports_page, ReportsVm};

pub fn get_reports(state: &AppState, ctx: &RequestCtx) -> ResultResp {
    let user = ctx.user()?;
    let edit_id: Option<i64> = ctx.query_param("edit").and_then(|v| v.parse().ok());

    let markup = state.db.with_conn(|conn| {
        let nav = nav_context(conn, user)?;
        let machines = list_all(conn)?;
        let reports = list_reports(conn, None)?;

        let editing = match edit_id {
            Some(id) => {
                let report = get_report(conn, id)?.ok_or(ServerError::NotFound)?;
                if !report.editable_by(user.id, user.is_admin()) {
                    return Err(ServerError::Forbidden);
                }
                Some(report)
            }
            None => None,
        };

        Ok(reports_page(
            &nav,
            &ReportsVm {
                machines: &machines,
                reports: &reports,
                editing: editing.as_ref(),
            },
        ))
    })?;

    html_response(markup)
}

/// Parse and validate the submitted report form into a `ReportInput`,
/// denormalizing machine name/category from the selected machine.
fn input_from_form(
    conn: &Connection,
    ctx: &RequestCtx,
    technician_id: i64,
    technician_name: &str,
) -> Result<ReportInput, ServerError> {
    let machine_id = ctx.form_field("machine_id")?;
    let machine = crate::db::machines::get_by_machine_id(conn, machine_id)?
        .ok_or_else(|| ServerError::BadRequest("Selected machine does not exist.".into()))?;

    let start_time = parse_datetime_local(ctx.form_field("start_time")?)
        .ok_or_else(|| ServerError::BadRequest("Invalid start time.".into()))?;
    let end_time = parse_datetime_local(ctx.form_field("end_time")?)
        .ok_or_else(|| ServerError::BadRequest("Invalid end time.".into()))?;
    if end_time < start_time {
        return Err(ServerError::BadRequest(
            "End time must not precede the start time.".into(),
        ));
    }

    let downtime_minutes = ctx.form_i64("downtime_minutes")?;
    if downtime_minutes < 0 {
        return Err(ServerError::BadRequest(
            "Downtime cannot be negative.".into(),
        ));
    }

    let report_type = ctx.form_field("report_type")?;
    if ReportType::parse(report_type).is_none() {
        return Err(ServerError::BadRequest("Unknown report type.".into()));
    }

    Ok(ReportInput {
        machine_id: machine.machine_id,
        machine_name: machine.name,
        machine_category: machine.category,
        technician_id,
        technician_name: technician_name.to_string(),
        start_time,
        end_time,
        downtime_minutes,
        report_type: report_type.to_string(),
        description: ctx.form_field("description")?.to_string(),
        status_after: ctx.form_field_or_default("status_after").to_string(),
    })
}

pub fn post_report(state: &AppState, ctx: &RequestCtx) -> ResultResp {
    let user = ctx.user()?;

    state.db.with_conn(|conn| {
        let input = input_from_form(conn, ctx, user.id, &user.display_name)?;
        create_report(conn, &input, user.id, now_unix())?;
        Ok(())
    })?;

    redirect("/reports")
}

pub fn post_report_update(state: &AppState, ctx: &RequestCtx) -> ResultResp {
    let user = ctx.user()?;
    let id = ctx.form_i64("id")?;

    state.db.with_conn(|conn| {
        let existing = get_report(conn, id)?.ok_or(ServerError::NotFound)?;
        if !existing.editable_by(user.id, user.is_admin()) {
            return Err(ServerError::Forbidden);
        }
        // Edits keep the original author attribution.
        let input = input_from_form(conn, ctx, existing.technician_id, &existing.technician_name)?;
        update_report(conn, id, &input)
    })?;

    redirect("/reports")
}

pub fn post_report_delete(state: &AppState, ctx: &RequestCtx) -> ResultResp {
    let user = ctx.user()?;
    let id = ctx.form_i64("id")?;

    state.db.with_conn(|conn| {
        let existing = get_report(conn, id)?.ok_or(ServerError::NotFound)?;
        if !existing.editable_by(user.id, user.is_admin()) {
            return Err(ServerError::Forbidden);
        }
        delete_report(conn, id)
    })?;

    redirect("/reports")
}
