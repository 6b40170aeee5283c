use crate::db::notifications::{list_recent, unread_count};
use crate::db::users::find_by_email;
use crate::router::AppState;
use crate::tests::utils::{body_string, get, make_state, post, signup, signup_admin};

fn seed_due_machine(state: &AppState, cookie: &str) {
    let resp = post(
        state,
        "/machines",
        Some(cookie),
        &[
            ("machine_id", "CT-01"),
            ("name", "Cooling Tower 1"),
            ("category", "cooling_tower"),
            ("location", "Plant A"),
            ("current_runtime_hours", "95"),
            ("service_interval_hours", "100"),
            ("water_capacity_liters", "500"),
            ("pump_type", "Centrifugal"),
        ],
    );
    assert_eq!(resp.status(), 303);
}

fn user_id_of(state: &AppState, email: &str) -> i64 {
    state
        .db
        .with_conn(|conn| Ok(find_by_email(conn, email)?.expect("user exists").id))
        .unwrap()
}

#[test]
fn notifications_page_lists_alerts_newest_first() {
    let state = make_state("notifications_listed");
    let cookie = signup_admin(&state, "admin@example.com", "Admin");
    seed_due_machine(&state, &cookie);

    let body = body_string(get(&state, "/notifications", Some(&cookie)));
    assert!(body.contains("Cooling Tower 1"));
    assert!(body.contains("will need servicing soon"));
}

#[test]
fn marking_read_clears_the_badge() {
    let state = make_state("notifications_mark_read");
    let cookie = signup_admin(&state, "admin@example.com", "Admin");
    seed_due_machine(&state, &cookie);

    let admin_id = user_id_of(&state, "admin@example.com");
    let notification_id = state
        .db
        .with_conn(|conn| {
            Ok(list_recent(conn, admin_id, 10)?
                .first()
                .expect("expected a notification")
                .id)
        })
        .unwrap();

    let resp = post(
        &state,
        "/notifications/read",
        Some(&cookie),
        &[("id", &notification_id.to_string())],
    );
    assert_eq!(resp.status(), 303);

    let unread = state
        .db
        .with_conn(|conn| unread_count(conn, admin_id))
        .unwrap();
    assert_eq!(unread, 0);
}

#[test]
fn only_the_recipient_can_mark_read() {
    let state = make_state("notifications_wrong_user");
    let cookie = signup_admin(&state, "admin@example.com", "Admin");
    seed_due_machine(&state, &cookie);

    let admin_id = user_id_of(&state, "admin@example.com");
    let notification_id = state
        .db
        .with_conn(|conn| {
            Ok(list_recent(conn, admin_id, 10)?
                .first()
                .expect("expected a notification")
                .id)
        })
        .unwrap();

    let other = signup(&state, "tech@example.com", "Tech One", "secret123");
    let resp = post(
        &state,
        "/notifications/read",
        Some(&other),
        &[("id", &notification_id.to_string())],
    );

    assert_eq!(resp.status(), 404);
}

#[test]
fn reading_the_alert_allows_a_drifted_repeat() {
    let state = make_state("notifications_drift_repeat");
    let cookie = signup_admin(&state, "admin@example.com", "Admin");

    // First alert lands right at the warning band, 90 of 100 hours.
    let resp = post(
        &state,
        "/machines",
        Some(&cookie),
        &[
            ("machine_id", "CT-01"),
            ("name", "Cooling Tower 1"),
            ("category", "cooling_tower"),
            ("location", "Plant A"),
            ("current_runtime_hours", "90"),
            ("service_interval_hours", "100"),
            ("water_capacity_liters", "500"),
            ("pump_type", "Centrifugal"),
        ],
    );
    assert_eq!(resp.status(), 303);

    let admin_id = user_id_of(&state, "admin@example.com");
    let notification_id = state
        .db
        .with_conn(|conn| {
            Ok(list_recent(conn, admin_id, 10)?
                .first()
                .expect("expected a notification")
                .id)
        })
        .unwrap();
    post(
        &state,
        "/notifications/read",
        Some(&cookie),
        &[("id", &notification_id.to_string())],
    );

    // Drifting past the checkpoint value by more than 5% of the interval
    // warrants a reminder even though the band is unchanged.
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

    let unread = state
        .db
        .with_conn(|conn| unread_count(conn, admin_id))
        .unwrap();
    assert_eq!(unread, 1);
}
