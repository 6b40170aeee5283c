use maud::{html, Markup};

use crate::domain::machine::{Machine, MachineStatus};

/// Inline error banner used when a page loads but its data fetch failed.
pub fn error_banner(message: &str) -> Markup {
    html! {
        div class="notification is-danger" {
            p { (message) }
        }
    }
}

pub fn notice(message: &str) -> Markup {
    html! {
        div class="notification is-warning" {
            p { (message) }
        }
    }
}

/// Status card for the category dashboards (cooling tower / compressor).
pub fn machine_status_card(machine: &Machine, now: i64) -> Markup {
    let status_class = match machine.status {
        MachineStatus::Run => "is-success",
        MachineStatus::Idle => "is-warning",
        MachineStatus::Stop => "is-danger",
    };

    html! {
        div class="column is-one-quarter" {
            div class={ "box notification " (status_class) " is-light" } {
                p class="title is-5" { (machine.machine_id) }
                p class="subtitle is-6" { (machine.name) }
                hr;
                div class="content" {
                    p class="has-text-weight-bold" { (machine.status.as_str()) }
                    p class="is-size-7" {
                        "Location: "
                        @if machine.location.is_empty() { "N/A" } @else { (machine.location) }
                    }
                    p class="is-size-7" {
                        "Runtime: " (format!("{:.1}", machine.displayed_runtime_hours(now))) " h"
                    }
                    a class="button is-small is-info is-outlined"
                        href={ "/machines/detail?id=" (machine.machine_id) } { "Details" }
                }
            }
        }
    }
}
