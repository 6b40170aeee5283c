use maud::{html, Markup};

use crate::db::notifications::NotificationRow;
use crate::domain::format_timestamp;
use crate::domain::monitor::AlertLevel;
use crate::templates::{desktop_layout, NavContext};

pub fn notifications_page(nav: &NavContext<'_>, notifications: &[NotificationRow]) -> Markup {
    desktop_layout(
        "Notifications",
        Some(nav),
        html! {
            main class="container narrow" {
                h1 class="title" { "Notifications" }
                @if notifications.is_empty() {
                    p class="has-text-centered" { "No notifications." }
                } @else {
                    @for notification in notifications {
                        (notification_item(notification))
                    }
                }
            }
        },
    )
}

fn notification_item(notification: &NotificationRow) -> Markup {
    let level_class = match notification.level {
        AlertLevel::Critical => "is-danger",
        AlertLevel::Warning => "is-warning",
    };
    let weight = if notification.is_read {
        "has-text-grey-light"
    } else {
        "has-text-weight-bold"
    };

    html! {
        div class={ "box notification is-light " (level_class) " " (weight) } {
            p class="is-size-7 has-text-grey" { (format_timestamp(notification.created_at)) }
            p { (notification.message) }
            @if !notification.is_read {
                form action="/notifications/read" method="post" {
                    input type="hidden" name="id" value=(notification.id);
                    button class="button is-small is-primary is-light" type="submit" {
                        "Mark Read"
                    }
                }
            }
        }
    }
}
