use crate::router::AppState;
use crate::tests::utils::{body_string, get, make_state, post, signup_admin};

fn seed_machine(state: &AppState, cookie: &str, machine_id: &str, category: &str) {
    let resp = post(
        state,
        "/machines",
        Some(cookie),
        &[
            ("machine_id", machine_id),
            ("name", "Machine"),
            ("category", category),
            ("location", "Plant A"),
            ("current_runtime_hours", "0"),
            ("service_interval_hours", "1000"),
        ],
    );
    assert_eq!(resp.status(), 303);
}

fn seed_report(
    state: &AppState,
    cookie: &str,
    machine_id: &str,
    start: &str,
    end: &str,
    downtime: &str,
    kind: &str,
) {
    let resp = post(
        state,
        "/reports",
        Some(cookie),
        &[
            ("machine_id", machine_id),
            ("start_time", start),
            ("end_time", end),
            ("downtime_minutes", downtime),
            ("report_type", kind),
            ("description", "Scheduled work"),
            ("status_after", "RUN"),
        ],
    );
    assert_eq!(resp.status(), 303);
}

#[test]
fn empty_dashboard_renders_zeroed_kpis() {
    let state = make_state("dashboard_empty");
    let cookie = signup_admin(&state, "admin@example.com", "Admin");

    let body = body_string(get(&state, "/dashboard", Some(&cookie)));

    assert!(body.contains("MTTR (minutes)"));
    assert!(body.contains("MTBF (hours)"));
    assert!(body.contains("0.00"));
}

#[test]
fn mttr_averages_corrective_downtime() {
    let state = make_state("dashboard_mttr");
    let cookie = signup_admin(&state, "admin@example.com", "Admin");
    seed_machine(&state, &cookie, "CT-01", "cooling_tower");

    // Two corrective jobs at 30 and 90 minutes average to 60.
    seed_report(
        &state,
        &cookie,
        "CT-01",
        "2025-06-01T08:00",
        "2025-06-01T08:30",
        "30",
        "Corrective",
    );
    seed_report(
        &state,
        &cookie,
        "CT-01",
        "2025-06-02T08:00",
        "2025-06-02T09:30",
        "90",
        "Corrective",
    );

    let body = body_string(get(&state, "/dashboard", Some(&cookie)));
    assert!(body.contains("60.00"));
}

#[test]
fn preventive_jobs_do_not_drive_mttr() {
    let state = make_state("dashboard_preventive");
    let cookie = signup_admin(&state, "admin@example.com", "Admin");
    seed_machine(&state, &cookie, "CT-01", "cooling_tower");

    seed_report(
        &state,
        &cookie,
        "CT-01",
        "2025-06-01T08:00",
        "2025-06-01T08:30",
        "30",
        "Preventive",
    );

    let body = body_string(get(&state, "/dashboard", Some(&cookie)));
    // MTTR stays zero with no corrective work on record.
    assert!(body.contains("0.00"));
    assert!(body.contains("Preventive"));
}

#[test]
fn category_filter_narrows_the_numbers() {
    let state = make_state("dashboard_category_filter");
    let cookie = signup_admin(&state, "admin@example.com", "Admin");
    seed_machine(&state, &cookie, "CT-01", "cooling_tower");
    seed_machine(&state, &cookie, "FL-01", "material_handling");

    seed_report(
        &state,
        &cookie,
        "CT-01",
        "2025-06-01T08:00",
        "2025-06-01T08:30",
        "30",
        "Corrective",
    );
    seed_report(
        &state,
        &cookie,
        "FL-01",
        "2025-06-01T10:00",
        "2025-06-01T11:30",
        "90",
        "Corrective",
    );

    // Only the material handling job counts under the filter, so its 90
    // minute repair is the average.
    let body = body_string(get(
        &state,
        "/dashboard?category=material_handling",
        Some(&cookie),
    ));
    assert!(body.contains("90.00"));
    assert!(!body.contains("60.00"));
}

#[test]
fn monthly_breakdown_buckets_by_submission_month() {
    let state = make_state("dashboard_monthly");
    let cookie = signup_admin(&state, "admin@example.com", "Admin");
    seed_machine(&state, &cookie, "CT-01", "cooling_tower");

    // Submission timestamps pin the rows to known months.
    state
        .db
        .with_conn(|conn| {
            let base = crate::db::reports::ReportInput {
                machine_id: "CT-01".into(),
                machine_name: "Machine".into(),
                machine_category: crate::domain::machine::MachineCategory::CoolingTower,
                technician_id: 1,
                technician_name: "Admin".into(),
                start_time: 1747728000,
                end_time: 1747729800,
                downtime_minutes: 30,
                report_type: "Corrective".into(),
                description: "Scheduled work".into(),
                status_after: "RUN".into(),
            };
            // 2025-05-20 and 2025-06-03.
            crate::db::reports::create_report(conn, &base, 1, 1747728000)?;
            crate::db::reports::create_report(conn, &base, 1, 1748937600)?;
            Ok(())
        })
        .unwrap();

    let body = body_string(get(&state, "/dashboard", Some(&cookie)));
    assert!(body.contains("2025-05"));
    assert!(body.contains("2025-06"));
}
