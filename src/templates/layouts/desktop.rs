use maud::{html, Markup, DOCTYPE};

use crate::auth::CurrentUser;

/// Navbar state for a signed-in user.
pub struct NavContext<'a> {
    pub user: &'a CurrentUser,
    pub unread_notifications: i64,
}

pub fn desktop_layout(title: &str, nav: Option<&NavContext<'_>>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " | PlantOps" }
                link rel="stylesheet" href="/static/main.css";
            }
            body {
                header class="navbar" {
                    h3 class="navbar-brand" { a href="/" { "PlantOps" } }
                    @match nav {
                        Some(ctx) => {
                            nav class="nav-links" {
                                ul {
                                    li { a href="/dashboard" { "Dashboard" } }
                                    li { a href="/reports" { "Reports" } }
                                    li { a href="/machines" { "Machines" } }
                                    li { a href="/material-handling-reports" { "M. Handling" } }
                                    li { a href="/cooling-tower-dashboard" { "Cooling Towers" } }
                                    li { a href="/compressor-unit-dashboard" { "Compressors" } }
                                    li {
                                        a href="/notifications" {
                                            "Notifications"
                                            @if ctx.unread_notifications > 0 {
                                                span class="badge" { (ctx.unread_notifications) }
                                            }
                                        }
                                    }
                                }
                            }
                            div class="auth-buttons" {
                                span class="navbar-item" {
                                    "Hi, " (ctx.user.display_name)
                                    " (" (ctx.user.role.as_str()) ")"
                                }
                                form action="/logout" method="post" class="inline" {
                                    button type="submit" class="button is-light" { "Log Out" }
                                }
                            }
                        }
                        None => {
                            div class="auth-buttons" {
                                a class="button is-primary" href="/register" { strong { "Sign up" } }
                                a class="button is-light" href="/login" { "Log in" }
                            }
                        }
                    }
                }
                (content)
            }
        }
    }
}
