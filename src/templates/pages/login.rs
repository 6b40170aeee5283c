use maud::{html, Markup};

use crate::templates::{desktop_layout, error_banner};

pub fn login_page(error: Option<&str>) -> Markup {
    desktop_layout(
        "Log In",
        None,
        html! {
            main class="container narrow" {
                h1 class="title" { "Log In" }
                @if let Some(message) = error {
                    (error_banner(message))
                }
                div class="box" {
                    form action="/login" method="post" {
                        div class="field" {
                            label class="label" for="email" { "Email" }
                            input class="input" type="email" name="email" id="email"
                                placeholder="e.g. alex@example.com" required;
                        }
                        div class="field" {
                            label class="label" for="password" { "Password" }
                            input class="input" type="password" name="password" id="password"
                                placeholder="********" required;
                        }
                        button class="button is-primary is-fullwidth" type="submit" { "Log In" }
                    }
                    p class="has-text-centered" {
                        "No account yet? " a href="/register" { "Register here" }
                    }
                }
            }
        },
    )
}
