use maud::{html, Markup};

use crate::domain::machine::{Machine, MachineCategory};
use crate::templates::components::machine_status_card;
use crate::templates::{desktop_layout, notice, NavContext};

/// RUN/IDLE/STOP status board for one machine category (cooling towers,
/// compressor units).
pub fn category_board_page(
    nav: &NavContext<'_>,
    category: MachineCategory,
    machines: &[Machine],
    now: i64,
) -> Markup {
    let title = format!("{} Status", category.label());
    desktop_layout(
        &title,
        Some(nav),
        html! {
            main class="container" {
                h1 class="title" { (title) }
                @if machines.is_empty() {
                    (notice(&format!("No {} machines.", category.label())))
                } @else {
                    div class="columns is-multiline" {
                        @for machine in machines {
                            (machine_status_card(machine, now))
                        }
                    }
                }
            }
        },
    )
}
