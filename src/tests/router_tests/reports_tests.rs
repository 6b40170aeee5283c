use crate::router::AppState;
use crate::tests::utils::{body_string, get, make_state, post, signup, signup_admin};

fn seed_machine(state: &AppState, admin_cookie: &str) {
    let resp = post(
        state,
        "/machines",
        Some(admin_cookie),
        &[
            ("machine_id", "CT-01"),
            ("name", "Cooling Tower 1"),
            ("category", "cooling_tower"),
            ("location", "Plant A"),
            ("current_runtime_hours", "10"),
            ("service_interval_hours", "1000"),
            ("water_capacity_liters", "500"),
            ("pump_type", "Centrifugal"),
        ],
    );
    assert_eq!(resp.status(), 303);
}

fn submit_report(state: &AppState, cookie: &str, description: &str) {
    let resp = post(
        state,
        "/reports",
        Some(cookie),
        &[
            ("machine_id", "CT-01"),
            ("start_time", "2025-06-01T08:00"),
            ("end_time", "2025-06-01T08:45"),
            ("downtime_minutes", "45"),
            ("report_type", "Corrective"),
            ("description", description),
            ("status_after", "RUN"),
        ],
    );
    assert_eq!(resp.status(), 303);
}

fn first_report_id(state: &AppState) -> i64 {
    state
        .db
        .with_conn(|conn| {
            let reports = crate::db::reports::list_reports(conn, None)?;
            Ok(reports.first().expect("expected a report").id)
        })
        .unwrap()
}

#[test]
fn technician_submits_a_report_and_sees_it_listed() {
    let state = make_state("reports_submit_listed");
    let admin = signup_admin(&state, "admin@example.com", "Admin");
    seed_machine(&state, &admin);
    let tech = signup(&state, "tech@example.com", "Tech One", "secret123");

    submit_report(&state, &tech, "Replaced the fan belt");

    let body = body_string(get(&state, "/reports", Some(&tech)));
    assert!(body.contains("Replaced the fan belt"));
    assert!(body.contains("Tech One"));
    assert!(body.contains("Corrective"));
}

#[test]
fn report_denormalizes_machine_name_and_category() {
    let state = make_state("reports_denormalized");
    let admin = signup_admin(&state, "admin@example.com", "Admin");
    seed_machine(&state, &admin);
    submit_report(&state, &admin, "Pump inspection");

    let report = state
        .db
        .with_conn(|conn| {
            let reports = crate::db::reports::list_reports(conn, None)?;
            Ok(reports.into_iter().next().expect("expected a report"))
        })
        .unwrap();

    assert_eq!(report.machine_name, "Cooling Tower 1");
    assert_eq!(report.machine_category.as_str(), "cooling_tower");
}

#[test]
fn technician_cannot_edit_another_technicians_report() {
    let state = make_state("reports_foreign_edit");
    let admin = signup_admin(&state, "admin@example.com", "Admin");
    seed_machine(&state, &admin);

    let tech_a = signup(&state, "a@example.com", "Tech A", "secret123");
    submit_report(&state, &tech_a, "Replaced the fan belt");
    let id = first_report_id(&state);

    let tech_b = signup(&state, "b@example.com", "Tech B", "secret123");
    let resp = post(
        &state,
        "/reports/update",
        Some(&tech_b),
        &[
            ("id", &id.to_string()),
            ("machine_id", "CT-01"),
            ("start_time", "2025-06-01T08:00"),
            ("end_time", "2025-06-01T08:45"),
            ("downtime_minutes", "45"),
            ("report_type", "Corrective"),
            ("description", "Tampered"),
            ("status_after", "RUN"),
        ],
    );

    assert_eq!(resp.status(), 403);
}

#[test]
fn admin_can_delete_any_report() {
    let state = make_state("reports_admin_delete");
    let admin = signup_admin(&state, "admin@example.com", "Admin");
    seed_machine(&state, &admin);

    let tech = signup(&state, "tech@example.com", "Tech One", "secret123");
    submit_report(&state, &tech, "Replaced the fan belt");
    let id = first_report_id(&state);

    let resp = post(
        &state,
        "/reports/delete",
        Some(&admin),
        &[("id", &id.to_string())],
    );
    assert_eq!(resp.status(), 303);

    let body = body_string(get(&state, "/reports", Some(&admin)));
    assert!(!body.contains("Replaced the fan belt"));
}

#[test]
fn edit_preserves_original_author() {
    let state = make_state("reports_edit_author");
    let admin = signup_admin(&state, "admin@example.com", "Admin");
    seed_machine(&state, &admin);

    let tech = signup(&state, "tech@example.com", "Tech One", "secret123");
    submit_report(&state, &tech, "Replaced the fan belt");
    let id = first_report_id(&state);

    let resp = post(
        &state,
        "/reports/update",
        Some(&admin),
        &[
            ("id", &id.to_string()),
            ("machine_id", "CT-01"),
            ("start_time", "2025-06-01T08:00"),
            ("end_time", "2025-06-01T09:00"),
            ("downtime_minutes", "60"),
            ("report_type", "Corrective"),
            ("description", "Replaced the fan belt and pulley"),
            ("status_after", "RUN"),
        ],
    );
    assert_eq!(resp.status(), 303);

    let body = body_string(get(&state, "/reports", Some(&admin)));
    assert!(body.contains("Tech One"));
    assert!(body.contains("Replaced the fan belt and pulley"));
}

#[test]
fn end_time_before_start_time_is_rejected() {
    let state = make_state("reports_bad_times");
    let admin = signup_admin(&state, "admin@example.com", "Admin");
    seed_machine(&state, &admin);

    let resp = post(
        &state,
        "/reports",
        Some(&admin),
        &[
            ("machine_id", "CT-01"),
            ("start_time", "2025-06-01T09:00"),
            ("end_time", "2025-06-01T08:00"),
            ("downtime_minutes", "45"),
            ("report_type", "Corrective"),
            ("description", "Time travel"),
            ("status_after", "RUN"),
        ],
    );

    assert_eq!(resp.status(), 400);
}

#[test]
fn unknown_report_type_is_rejected() {
    let state = make_state("reports_bad_type");
    let admin = signup_admin(&state, "admin@example.com", "Admin");
    seed_machine(&state, &admin);

    let resp = post(
        &state,
        "/reports",
        Some(&admin),
        &[
            ("machine_id", "CT-01"),
            ("start_time", "2025-06-01T08:00"),
            ("end_time", "2025-06-01T08:45"),
            ("downtime_minutes", "45"),
            ("report_type", "Speculative"),
            ("description", "Unknown type"),
            ("status_after", "RUN"),
        ],
    );

    assert_eq!(resp.status(), 400);
}

#[test]
fn report_against_missing_machine_is_rejected() {
    let state = make_state("reports_missing_machine");
    let admin = signup_admin(&state, "admin@example.com", "Admin");

    let resp = post(
        &state,
        "/reports",
        Some(&admin),
        &[
            ("machine_id", "GHOST-99"),
            ("start_time", "2025-06-01T08:00"),
            ("end_time", "2025-06-01T08:45"),
            ("downtime_minutes", "45"),
            ("report_type", "Preventive"),
            ("description", "No such machine"),
            ("status_after", "RUN"),
        ],
    );

    assert_eq!(resp.status(), 400);
}
