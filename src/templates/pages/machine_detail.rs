use maud::{html, Markup};

use crate::domain::machine::{Machine, MachineDetails};
use crate::domain::report::MaintenanceReport;
use crate::domain::format_timestamp;
use crate::templates::{desktop_layout, NavContext};

pub fn machine_detail_page(
    nav: &NavContext<'_>,
    machine: &Machine,
    history: &[MaintenanceReport],
    now: i64,
) -> Markup {
    desktop_layout(
        "Machine Detail",
        Some(nav),
        html! {
            main class="container" {
                h1 class="title" { "Machine: " (machine.name) " (" (machine.machine_id) ")" }

                div class="box" {
                    table class="table is-fullwidth" {
                        tbody {
                            tr { th { "Category" } td { (machine.category.label()) } }
                            tr { th { "Location" } td { (machine.location) } }
                            tr { th { "Status" } td { (machine.status.as_str()) } }
                            tr {
                                th { "Runtime" }
                                td { (format!("{:.1} h", machine.displayed_runtime_hours(now))) }
                            }
                            tr {
                                th { "Service Interval" }
                                td { (format!("{:.1} h", machine.service_interval_hours)) }
                            }
                            (details_rows(&machine.details))
                        }
                    }
                }

                div class="box" {
                    h2 class="subtitle" { "Maintenance History" }
                    @if history.is_empty() {
                        p class="has-text-centered" { "No reports for this machine yet." }
                    } @else {
                        table class="table is-striped is-fullwidth" {
                            thead {
                                tr {
                                    th { "Reported" }
                                    th { "Technician" }
                                    th { "Type" }
                                    th { "Downtime (min)" }
                                    th { "Description" }
                                }
                            }
                            tbody {
                                @for report in history {
                                    tr {
                                        td { (format_timestamp(report.created_at)) }
                                        td { (report.technician_name) }
                                        td { (report.report_type) }
                                        td { (report.downtime_minutes) }
                                        td { (report.description) }
                                    }
                                }
                            }
                        }
                    }
                }

                a class="button" href="/machines" { "Back to Machines" }
            }
        },
    )
}

fn details_rows(details: &MachineDetails) -> Markup {
    html! {
        @match details {
            MachineDetails::CoolingTower { water_capacity_liters, pump_type } => {
                tr { th { "Water Capacity" } td { (water_capacity_liters) " L" } }
                tr { th { "Pump Type" } td { (pump_type) } }
            }
            MachineDetails::Compressor { pressure_bar, temperature_celsius } => {
                tr { th { "Pressure" } td { (pressure_bar) " bar" } }
                tr { th { "Temperature" } td { (temperature_celsius) " °C" } }
            }
            MachineDetails::MaterialHandling { odometer_km, drive_type, service_interval_km } => {
                tr { th { "Odometer" } td { (odometer_km) " km" } }
                tr { th { "Drive Type" } td { (drive_type) } }
                tr { th { "Service Interval" } td { (service_interval_km) " km" } }
            }
            MachineDetails::None => {}
        }
    }
}
