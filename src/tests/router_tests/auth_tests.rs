use crate::tests::utils::{
    body_string, get, location_header, login, make_state, post, session_cookie_from, signup,
};

#[test]
fn register_creates_session_and_redirects_to_dashboard() {
    let state = make_state("register_redirect");

    let resp = post(
        &state,
        "/register",
        None,
        &[
            ("email", "tech@example.com"),
            ("display_name", "Tech One"),
            ("password", "secret123"),
        ],
    );

    assert_eq!(resp.status(), 303);
    assert_eq!(location_header(&resp), "/dashboard");
    assert!(session_cookie_from(&resp).starts_with("session="));
}

#[test]
fn register_rejects_duplicate_email() {
    let state = make_state("register_duplicate");
    signup(&state, "tech@example.com", "Tech One", "secret123");

    let resp = post(
        &state,
        "/register",
        None,
        &[
            ("email", "tech@example.com"),
            ("display_name", "Someone Else"),
            ("password", "secret456"),
        ],
    );

    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("This email is already registered."));
}

#[test]
fn register_rejects_short_password() {
    let state = make_state("register_short_password");

    let resp = post(
        &state,
        "/register",
        None,
        &[
            ("email", "tech@example.com"),
            ("display_name", "Tech One"),
            ("password", "abc"),
        ],
    );

    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("Password is too weak"));
}

#[test]
fn login_rejects_wrong_password() {
    let state = make_state("login_wrong_password");
    signup(&state, "tech@example.com", "Tech One", "secret123");

    let resp = login(&state, "tech@example.com", "wrong-password");

    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("Incorrect email or password."));
}

#[test]
fn login_normalizes_email_case() {
    let state = make_state("login_email_case");
    signup(&state, "tech@example.com", "Tech One", "secret123");

    let resp = login(&state, "  Tech@Example.COM ", "secret123");

    assert_eq!(resp.status(), 303);
    assert_eq!(location_header(&resp), "/dashboard");
}

#[test]
fn dashboard_greets_signed_in_user() {
    let state = make_state("dashboard_greets_user");
    let cookie = signup(&state, "tech@example.com", "Tech One", "secret123");

    let resp = get(&state, "/dashboard", Some(&cookie));

    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("Tech One"));
}

#[test]
fn gated_path_redirects_anonymous_to_login() {
    let state = make_state("gated_redirects_anonymous");

    let resp = get(&state, "/reports", None);

    assert_eq!(resp.status(), 303);
    assert_eq!(location_header(&resp), "/login");
}

#[test]
fn unknown_path_redirects_by_sign_in_state() {
    let state = make_state("unknown_path_redirects");
    let cookie = signup(&state, "tech@example.com", "Tech One", "secret123");

    let signed_in = get(&state, "/no-such-page", Some(&cookie));
    assert_eq!(signed_in.status(), 303);
    assert_eq!(location_header(&signed_in), "/dashboard");

    let anonymous = get(&state, "/no-such-page", None);
    assert_eq!(anonymous.status(), 303);
    assert_eq!(location_header(&anonymous), "/login");
}

#[test]
fn logout_revokes_the_session() {
    let state = make_state("logout_revokes_session");
    let cookie = signup(&state, "tech@example.com", "Tech One", "secret123");

    let resp = post(&state, "/logout", Some(&cookie), &[]);
    assert_eq!(resp.status(), 303);
    assert_eq!(location_header(&resp), "/login");

    // The old cookie no longer resolves to a user.
    let after = get(&state, "/dashboard", Some(&cookie));
    assert_eq!(after.status(), 303);
    assert_eq!(location_header(&after), "/login");
}

#[test]
fn login_page_redirects_when_already_signed_in() {
    let state = make_state("login_already_signed_in");
    let cookie = signup(&state, "tech@example.com", "Tech One", "secret123");

    let resp = get(&state, "/login", Some(&cookie));

    assert_eq!(resp.status(), 303);
    assert_eq!(location_header(&resp), "/dashboard");
}
