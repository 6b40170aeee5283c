use maud::{html, Markup};

use crate::domain::format_timestamp;
use crate::domain::machine::{Machine, MachineDetails};
use crate::domain::report::MaintenanceReport;
use crate::templates::{desktop_layout, NavContext};

pub struct MaterialHandlingVm<'a> {
    pub machines: &'a [Machine],
    pub reports: &'a [MaintenanceReport],
}

pub fn material_handling_page(nav: &NavContext<'_>, vm: &MaterialHandlingVm<'_>) -> Markup {
    desktop_layout(
        "Material Handling",
        Some(nav),
        html! {
            main class="container" {
                h1 class="title" { "Material Handling Reports" }

                div class="box" {
                    h2 class="subtitle" { "Material Handling Machines" }
                    div class="buttons" {
                        a class="button is-success"
                            href="/export/machines.xlsx?category=material_handling" {
                            "Export Machines to XLSX"
                        }
                    }
                    @if vm.machines.is_empty() {
                        p class="has-text-centered" { "No material handling machines." }
                    } @else {
                        table class="table is-striped is-fullwidth" {
                            thead {
                                tr {
                                    th { "ID" }
                                    th { "Name" }
                                    th { "Location" }
                                    th { "Drive Type" }
                                    th { "Odometer (km)" }
                                    th { "Service Interval (km)" }
                                    th { "Status" }
                                }
                            }
                            tbody {
                                @for machine in vm.machines {
                                    (machine_row(machine))
                                }
                            }
                        }
                    }
                }

                div class="box" {
                    h2 class="subtitle" { "Work History" }
                    @if vm.reports.is_empty() {
                        p class="has-text-centered" { "No reports for material handling machines." }
                    } @else {
                        table class="table is-striped is-fullwidth" {
                            thead {
                                tr {
                                    th { "Reported" }
                                    th { "Machine" }
                                    th { "Technician" }
                                    th { "Type" }
                                    th { "Downtime (min)" }
                                    th { "Description" }
                                }
                            }
                            tbody {
                                @for report in vm.reports {
                                    tr {
                                        td { (format_timestamp(report.created_at)) }
                                        td { (report.machine_name) " (" (report.machine_id) ")" }
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
            }
        },
    )
}

fn machine_row(machine: &Machine) -> Markup {
    let (drive_type, odometer, interval) = match &machine.details {
        MachineDetails::MaterialHandling {
            odometer_km,
            drive_type,
            service_interval_km,
        } => (
            drive_type.clone(),
            format!("{odometer_km:.1}"),
            format!("{service_interval_km:.1}"),
        ),
        _ => ("-".into(), "0".into(), "0".into()),
    };

    html! {
        tr {
            td { (machine.machine_id) }
            td { (machine.name) }
            td { (machine.location) }
            td { (drive_type) }
            td { (odometer) }
            td { (interval) }
            td { (machine.status.as_str()) }
        }
    }
}
