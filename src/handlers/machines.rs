use crate::alerts::{check_all_machines, check_machine};
use crate::db::machines::{
    create_machine, delete_machine, get_by_machine_id, list_all, list_by_category, set_status,
    update_machine, MachineInput,
};
use crate::db::reports::list_reports;
use crate::domain::machine::{MachineCategory, MachineDetails, MachineStatus};
use crate::domain::now_unix;
use crate::errors::{ResultResp, ServerError};
use crate::handlers::{nav_context, RequestCtx};
use crate::responses::{html_response, redirect};
use crate::router::AppState;
use crate::templates::pages::{
    category_board_page, machine_detail_page, machines_page, material_handling_page, MachinesVm,
    MaterialHandlingVm,
};

pub fn get_machines(state: &AppState, ctx: &RequestCtx) -> ResultResp {
    let user = ctx.user()?;
    let edit_id = ctx.query_param("edit");
    let now = now_unix();

    let markup = state.db.with_conn(|conn| {
        // Rendering the fleet doubles as a monitor pass; the check is
        // idempotent, so running it on every view is safe.
        check_all_machines(conn, user.id, &state.config.thresholds, now)?;

        let nav = nav_context(conn, user)?;
        let machines = list_all(conn)?;

        let editing = match edit_id {
            Some(id) if user.is_admin() => {
                Some(get_by_machine_id(conn, id)?.ok_or(ServerError::NotFound)?)
            }
            Some(_) => return Err(ServerError::Forbidden),
            None => None,
        };

        Ok(machines_page(
            &nav,
            &MachinesVm {
                machines: &machines,
                editing: editing.as_ref(),
                now,
            },
        ))
    })?;

    html_response(markup)
}

pub fn get_machine_detail(state: &AppState, ctx: &RequestCtx) -> ResultResp {
    let user = ctx.user()?;
    let machine_id = ctx
        .query_param("id")
        .ok_or_else(|| ServerError::BadRequest("Missing machine id.".into()))?;
    let now = now_unix();

    let markup = state.db.with_conn(|conn| {
        let nav = nav_context(conn, user)?;
        let machine = get_by_machine_id(conn, machine_id)?.ok_or(ServerError::NotFound)?;
        let history: Vec<_> = list_reports(conn, None)?
            .into_iter()
            .filter(|r| r.machine_id == machine.machine_id)
            .collect();
        Ok(machine_detail_page(&nav, &machine, &history, now))
    })?;

    html_response(markup)
}

/// Category-specific detail fields from the flat machine form.
fn details_from_form(category: MachineCategory, ctx: &RequestCtx) -> MachineDetails {
    match category {
        MachineCategory::CoolingTower => MachineDetails::CoolingTower {
            water_capacity_liters: ctx.form_f64("water_capacity_liters"),
            pump_type: ctx.form_field_or_default("pump_type").to_string(),
        },
        MachineCategory::KompresorUnit => MachineDetails::Compressor {
            pressure_bar: ctx.form_f64("pressure_bar"),
            temperature_celsius: ctx.form_f64("temperature_celsius"),
        },
        MachineCategory::MaterialHandling => MachineDetails::MaterialHandling {
            odometer_km: ctx.form_f64("odometer_km"),
            drive_type: ctx.form_field_or_default("drive_type").to_string(),
            service_interval_km: ctx.form_f64("service_interval_km"),
        },
        MachineCategory::General => MachineDetails::None,
    }
}

fn input_from_form(ctx: &RequestCtx) -> Result<MachineInput, ServerError> {
    let category = MachineCategory::parse(ctx.form_field("category")?)
        .ok_or_else(|| ServerError::BadRequest("Unknown machine category.".into()))?;

    Ok(MachineInput {
        machine_id: ctx.form_field("machine_id")?.trim().to_string(),
        name: ctx.form_field("name")?.trim().to_string(),
        category,
        location: ctx.form_field_or_default("location").trim().to_string(),
        current_runtime_hours: ctx.form_f64("current_runtime_hours").max(0.0),
        service_interval_hours: ctx.form_f64("service_interval_hours").max(0.0),
        details: details_from_form(category, ctx),
    })
}

pub fn post_machine(state: &AppState, ctx: &RequestCtx) -> ResultResp {
    let user = ctx.user()?;
    let input = input_from_form(ctx)?;
    let now = now_unix();

    state.db.with_conn(|conn| {
        create_machine(conn, &input, now)?;
        let machine = get_by_machine_id(conn, &input.machine_id)?.ok_or(ServerError::NotFound)?;
        check_machine(conn, &machine, user.id, &state.config.thresholds, now)?;
        Ok(())
    })?;

    redirect("/machines")
}

pub fn post_machine_update(state: &AppState, ctx: &RequestCtx) -> ResultResp {
    let user = ctx.user()?;
    let input = input_from_form(ctx)?;
    let now = now_unix();

    state.db.with_conn(|conn| {
        update_machine(conn, &input.machine_id, &input, now)?;
        let machine = get_by_machine_id(conn, &input.machine_id)?.ok_or(ServerError::NotFound)?;
        check_machine(conn, &machine, user.id, &state.config.thresholds, now)?;
        Ok(())
    })?;

    redirect("/machines")
}

pub fn post_machine_delete(state: &AppState, ctx: &RequestCtx) -> ResultResp {
    let machine_id = ctx.form_field("machine_id")?;
    state.db.with_conn(|conn| delete_machine(conn, machine_id))?;
    redirect("/machines")
}

pub fn post_machine_status(state: &AppState, ctx: &RequestCtx) -> ResultResp {
    let user = ctx.user()?;
    let machine_id = ctx.form_field("machine_id")?;
    let next = MachineStatus::parse(ctx.form_field("status")?)
        .ok_or_else(|| ServerError::BadRequest("Unknown machine status.".into()))?;
    let now = now_unix();

    state.db.with_conn(|conn| {
        let machine = set_status(conn, machine_id, next, now)?;
        check_machine(conn, &machine, user.id, &state.config.thresholds, now)?;
        Ok(())
    })?;

    redirect("/machines")
}

pub fn get_material_handling(state: &AppState, ctx: &RequestCtx) -> ResultResp {
    let user = ctx.user()?;

    let markup = state.db.with_conn(|conn| {
        let nav = nav_context(conn, user)?;
        let machines = list_by_category(conn, MachineCategory::MaterialHandling)?;
        let reports = list_reports(conn, Some(MachineCategory::MaterialHandling))?;
        Ok(material_handling_page(
            &nav,
            &MaterialHandlingVm {
                machines: &machines,
                reports: &reports,
            },
        ))
    })?;

    html_response(markup)
}

fn category_board(state: &AppState, ctx: &RequestCtx, category: MachineCategory) -> ResultResp {
    let user = ctx.user()?;
    let now = now_unix();

    let markup = state.db.with_conn(|conn| {
        let nav = nav_context(conn, user)?;
        let machines = list_by_category(conn, category)?;
        Ok(category_board_page(&nav, category, &machines, now))
    })?;

    html_response(markup)
}

pub fn get_cooling_tower_board(state: &AppState, ctx: &RequestCtx) -> ResultResp {
    category_board(state, ctx, MachineCategory::CoolingTower)
}

pub fn get_compressor_board(state: &AppState, ctx: &RequestCtx) -> ResultResp {
    category_board(state, ctx, MachineCategory::KompresorUnit)
}
