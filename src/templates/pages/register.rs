use maud::{html, Markup};

use crate::templates::{desktop_layout, error_banner};

pub fn register_page(error: Option<&str>) -> Markup {
    desktop_layout(
        "Register",
        None,
        html! {
            main class="container narrow" {
                h1 class="title" { "Create Account" }
                @if let Some(message) = error {
                    (error_banner(message))
                }
                div class="box" {
                    form action="/register" method="post" {
                        div class="field" {
                            label class="label" for="email" { "Email" }
                            input class="input" type="email" name="email" id="email" required;
                        }
                        div class="field" {
                            label class="label" for="display_name" { "Full Name" }
                            input class="input" type="text" name="display_name" id="display_name" required;
                        }
                        div class="field" {
                            label class="label" for="password" { "Password" }
                            input class="input" type="password" name="password" id="password"
                                minlength="6" required;
                        }
                        button class="button is-primary is-fullwidth" type="submit" { "Register" }
                    }
                    p class="has-text-centered" {
                        "Already registered? " a href="/login" { "Log in here" }
                    }
                }
            }
        },
    )
}
