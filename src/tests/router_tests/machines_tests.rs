use crate::db::notifications::unread_count;
use crate::db::users::find_by_email;
use crate::router::AppState;
use crate::tests::utils::{body_string, get, location_header, make_state, post, signup, signup_admin};

fn create_cooling_tower(state: &AppState, cookie: &str, runtime: &str) {
    let resp = post(
        state,
        "/machines",
        Some(cookie),
        &[
            ("machine_id", "CT-01"),
            ("name", "Cooling Tower 1"),
            ("category", "cooling_tower"),
            ("location", "Plant A"),
            ("current_runtime_hours", runtime),
            ("service_interval_hours", "100"),
            ("water_capacity_liters", "500"),
            ("pump_type", "Centrifugal"),
        ],
    );
    assert_eq!(resp.status(), 303);
}

fn unread_for(state: &AppState, email: &str) -> i64 {
    state
        .db
        .with_conn(|conn| {
            let user = find_by_email(conn, email)?.expect("user exists");
            unread_count(conn, user.id)
        })
        .unwrap()
}

#[test]
fn technician_cannot_create_machines() {
    let state = make_state("machines_technician_forbidden");
    let cookie = signup(&state, "tech@example.com", "Tech One", "secret123");

    let resp = post(
        &state,
        "/machines",
        Some(&cookie),
        &[
            ("machine_id", "CT-01"),
            ("name", "Cooling Tower 1"),
            ("category", "cooling_tower"),
        ],
    );

    assert_eq!(resp.status(), 403);
}

#[test]
fn admin_creates_machine_and_it_appears_in_the_list() {
    let state = make_state("machines_admin_creates");
    let cookie = signup_admin(&state, "admin@example.com", "Admin");

    create_cooling_tower(&state, &cookie, "10");

    let body = body_string(get(&state, "/machines", Some(&cookie)));
    assert!(body.contains("Cooling Tower 1"));
    assert!(body.contains("CT-01"));
}

#[test]
fn duplicate_machine_id_is_rejected() {
    let state = make_state("machines_duplicate_id");
    let cookie = signup_admin(&state, "admin@example.com", "Admin");
    create_cooling_tower(&state, &cookie, "10");

    let resp = post(
        &state,
        "/machines",
        Some(&cookie),
        &[
            ("machine_id", "CT-01"),
            ("name", "Another Tower"),
            ("category", "cooling_tower"),
            ("current_runtime_hours", "0"),
            ("service_interval_hours", "100"),
        ],
    );

    assert_eq!(resp.status(), 400);
    assert!(body_string(resp).contains("already exists"));
}

#[test]
fn status_transition_is_persisted() {
    let state = make_state("machines_status_persisted");
    let cookie = signup_admin(&state, "admin@example.com", "Admin");
    create_cooling_tower(&state, &cookie, "10");

    let resp = post(
        &state,
        "/machines/status",
        Some(&cookie),
        &[("machine_id", "CT-01"), ("status", "RUN")],
    );
    assert_eq!(resp.status(), 303);
    assert_eq!(location_header(&resp), "/machines");

    let body = body_string(get(&state, "/machines", Some(&cookie)));
    assert!(body.contains("RUN"));
}

#[test]
fn runtime_near_interval_emits_warning_once() {
    let state = make_state("machines_warning_once");
    let cookie = signup_admin(&state, "admin@example.com", "Admin");

    // 95 of 100 hours crosses the warning band on creation.
    create_cooling_tower(&state, &cookie, "95");
    assert_eq!(unread_for(&state, "admin@example.com"), 1);

    // Nudging within the same band while the first alert is unread stays quiet.
    let resp = post(
        &state,
        "/machines/update",
        Some(&cookie),
        &[
            ("machine_id", "CT-01"),
            ("name", "Cooling Tower 1"),
            ("category", "cooling_tower"),
            ("location", "Plant A"),
            ("current_runtime_hours", "96"),
            ("service_interval_hours", "100"),
            ("water_capacity_liters", "500"),
            ("pump_type", "Centrifugal"),
        ],
    );
    assert_eq!(resp.status(), 303);
    assert_eq!(unread_for(&state, "admin@example.com"), 1);

    let body = body_string(get(&state, "/notifications", Some(&cookie)));
    assert!(body.contains("will need servicing soon"));
}

#[test]
fn crossing_the_overdue_band_escalates() {
    let state = make_state("machines_overdue_escalates");
    let cookie = signup_admin(&state, "admin@example.com", "Admin");
    create_cooling_tower(&state, &cookie, "95");
    assert_eq!(unread_for(&state, "admin@example.com"), 1);

    let resp = post(
        &state,
        "/machines/update",
        Some(&cookie),
        &[
            ("machine_id", "CT-01"),
            ("name", "Cooling Tower 1"),
            ("category", "cooling_tower"),
            ("location", "Plant A"),
            ("current_runtime_hours", "105"),
            ("service_interval_hours", "100"),
            ("water_capacity_liters", "500"),
            ("pump_type", "Centrifugal"),
        ],
    );
    assert_eq!(resp.status(), 303);
    assert_eq!(unread_for(&state, "admin@example.com"), 2);

    let body = body_string(get(&state, "/notifications", Some(&cookie)));
    assert!(body.contains("past its service limit"));
}

#[test]
fn material_handling_machines_alert_on_odometer() {
    let state = make_state("machines_odometer_gauge");
    let cookie = signup_admin(&state, "admin@example.com", "Admin");

    let resp = post(
        &state,
        "/machines",
        Some(&cookie),
        &[
            ("machine_id", "FL-01"),
            ("name", "Forklift 1"),
            ("category", "material_handling"),
            ("location", "Warehouse"),
            ("current_runtime_hours", "0"),
            ("service_interval_hours", "0"),
            ("odometer_km", "950"),
            ("drive_type", "Electric"),
            ("service_interval_km", "1000"),
        ],
    );
    assert_eq!(resp.status(), 303);

    assert_eq!(unread_for(&state, "admin@example.com"), 1);
    let body = body_string(get(&state, "/notifications", Some(&cookie)));
    assert!(body.contains("Forklift 1"));
}

#[test]
fn machine_detail_shows_report_history() {
    let state = make_state("machines_detail_history");
    let cookie = signup_admin(&state, "admin@example.com", "Admin");
    create_cooling_tower(&state, &cookie, "10");

    let resp = post(
        &state,
        "/reports",
        Some(&cookie),
        &[
            ("machine_id", "CT-01"),
            ("start_time", "2025-06-01T08:00"),
            ("end_time", "2025-06-01T09:30"),
            ("downtime_minutes", "90"),
            ("report_type", "Corrective"),
            ("description", "Replaced the fan belt"),
            ("status_after", "RUN"),
        ],
    );
    assert_eq!(resp.status(), 303);

    let body = body_string(get(&state, "/machines/detail?id=CT-01", Some(&cookie)));
    assert!(body.contains("Replaced the fan belt"));
    assert!(body.contains("Cooling Tower 1"));
}

#[test]
fn technician_cannot_delete_machines() {
    let state = make_state("machines_delete_forbidden");
    let admin = signup_admin(&state, "admin@example.com", "Admin");
    create_cooling_tower(&state, &admin, "10");
    let tech = signup(&state, "tech@example.com", "Tech One", "secret123");

    let resp = post(
        &state,
        "/machines/delete",
        Some(&tech),
        &[("machine_id", "CT-01")],
    );

    assert_eq!(resp.status(), 403);
}
