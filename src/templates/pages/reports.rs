use maud::{html, Markup};

use crate::domain::machine::Machine;
use crate::domain::report::MaintenanceReport;
use crate::domain::{format_timestamp, to_datetime_local};
use crate::templates::{desktop_layout, NavContext};

pub struct ReportsVm<'a> {
    pub machines: &'a [Machine],
    pub reports: &'a [MaintenanceReport],
    /// Report being edited, when the form is in edit mode.
    pub editing: Option<&'a MaintenanceReport>,
}

pub fn reports_page(nav: &NavContext<'_>, vm: &ReportsVm<'_>) -> Markup {
    desktop_layout(
        "Reports",
        Some(nav),
        html! {
            main class="container" {
                h1 class="title" { "Maintenance Reports" }
                (report_form(nav, vm))
                (report_table(nav, vm))
            }
        },
    )
}

fn report_form(nav: &NavContext<'_>, vm: &ReportsVm<'_>) -> Markup {
    let editing = vm.editing;
    let action = match editing {
        Some(_) => "/reports/update",
        None => "/reports",
    };

    html! {
        div class="box" {
            h2 class="subtitle" {
                @if editing.is_some() { "Edit Report" } @else { "New Report" }
            }
            form action=(action) method="post" {
                @if let Some(report) = editing {
                    input type="hidden" name="id" value=(report.id);
                }

                div class="field" {
                    label class="label" for="machine_id" { "Machine" }
                    div class="select is-fullwidth" {
                        select name="machine_id" id="machine_id" required {
                            option value="" disabled selected[editing.is_none()] { "Select a machine" }
                            @for machine in vm.machines {
                                option value=(machine.machine_id)
                                    selected[editing.map(|r| r.machine_id == machine.machine_id).unwrap_or(false)] {
                                    (machine.name) " (" (machine.machine_id) ")"
                                }
                            }
                        }
                    }
                }

                div class="field" {
                    label class="label" { "Technician" }
                    input class="input" type="text" value=(nav.user.display_name) readonly;
                }

                div class="field" {
                    label class="label" for="start_time" { "Start Time" }
                    input class="input" type="datetime-local" name="start_time" id="start_time"
                        value=(editing.map(|r| to_datetime_local(r.start_time)).unwrap_or_default())
                        required;
                }

                div class="field" {
                    label class="label" for="end_time" { "End Time" }
                    input class="input" type="datetime-local" name="end_time" id="end_time"
                        value=(editing.map(|r| to_datetime_local(r.end_time)).unwrap_or_default())
                        required;
                }

                div class="field" {
                    label class="label" for="downtime_minutes" { "Downtime (minutes)" }
                    input class="input" type="number" name="downtime_minutes" id="downtime_minutes"
                        min="0"
                        value=(editing.map(|r| r.downtime_minutes.to_string()).unwrap_or_default())
                        required;
                }

                div class="field" {
                    label class="label" for="report_type" { "Job Type" }
                    div class="select is-fullwidth" {
                        select name="report_type" id="report_type" required {
                            option value="" disabled selected[editing.is_none()] { "Select a type" }
                            option value="Preventive"
                                selected[editing.map(|r| r.report_type == "Preventive").unwrap_or(false)] {
                                "Preventive"
                            }
                            option value="Corrective"
                                selected[editing.map(|r| r.report_type == "Corrective").unwrap_or(false)] {
                                "Corrective"
                            }
                        }
                    }
                }

                div class="field" {
                    label class="label" for="description" { "Work Description" }
                    textarea class="textarea" name="description" id="description" required {
                        (editing.map(|r| r.description.as_str()).unwrap_or(""))
                    }
                }

                div class="field" {
                    label class="label" for="status_after" { "Status After Completion" }
                    div class="select is-fullwidth" {
                        select name="status_after" id="status_after" required {
                            @for status in ["RUN", "IDLE", "STOP"] {
                                option value=(status)
                                    selected[editing.map(|r| r.status_after == status).unwrap_or(false)] {
                                    (status)
                                }
                            }
                        }
                    }
                }

                div class="field" {
                    button class="button is-primary" type="submit" {
                        @if editing.is_some() { "Update Report" } @else { "Save Report" }
                    }
                    @if editing.is_some() {
                        a class="button is-link is-light" href="/reports" { "Cancel Edit" }
                    }
                }
            }
        }
    }
}

fn report_table(nav: &NavContext<'_>, vm: &ReportsVm<'_>) -> Markup {
    html! {
        div class="box" {
            h2 class="subtitle" { "Report Log" }
            div class="buttons" {
                a class="button is-success" href="/export/reports.xlsx" { "Export to XLSX" }
            }
            table class="table is-striped is-fullwidth" {
                thead {
                    tr {
                        th { "Reported" }
                        th { "Machine" }
                        th { "Technician" }
                        th { "Type" }
                        th { "Downtime (min)" }
                        th { "Status After" }
                        th { "Description" }
                        th { "Actions" }
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
                            td { (report.status_after) }
                            td { (preview(&report.description)) }
                            td {
                                @if report.editable_by(nav.user.id, nav.user.is_admin()) {
                                    a class="button is-small is-info"
                                        href={ "/reports?edit=" (report.id) } { "Edit" }
                                    form action="/reports/delete" method="post" class="inline" {
                                        input type="hidden" name="id" value=(report.id);
                                        button class="button is-small is-danger" type="submit" { "Delete" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn preview(description: &str) -> String {
    let mut out: String = description.chars().take(50).collect();
    if description.chars().count() > 50 {
        out.push_str("...");
    }
    out
}
