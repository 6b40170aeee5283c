use maud::{html, Markup};

use crate::domain::machine::{Machine, MachineCategory, MachineDetails};
use crate::templates::{desktop_layout, NavContext};

pub struct MachinesVm<'a> {
    pub machines: &'a [Machine],
    /// Machine being edited, when the admin form is in edit mode.
    pub editing: Option<&'a Machine>,
    pub now: i64,
}

pub fn machines_page(nav: &NavContext<'_>, vm: &MachinesVm<'_>) -> Markup {
    desktop_layout(
        "Machines",
        Some(nav),
        html! {
            main class="container" {
                h1 class="title" { "Machine Master" }
                @if nav.user.is_admin() {
                    (machine_form(vm))
                }
                (machine_table(nav, vm))
            }
        },
    )
}

fn detail_field(details: &MachineDetails) -> (String, String, String, String, String, String, String) {
    // flat form values for every category; the handler keeps only the ones
    // matching the selected category
    match details {
        MachineDetails::CoolingTower {
            water_capacity_liters,
            pump_type,
        } => (
            water_capacity_liters.to_string(),
            pump_type.clone(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
        ),
        MachineDetails::Compressor {
            pressure_bar,
            temperature_celsius,
        } => (
            String::new(),
            String::new(),
            pressure_bar.to_string(),
            temperature_celsius.to_string(),
            String::new(),
            String::new(),
            String::new(),
        ),
        MachineDetails::MaterialHandling {
            odometer_km,
            drive_type,
            service_interval_km,
        } => (
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            odometer_km.to_string(),
            drive_type.clone(),
            service_interval_km.to_string(),
        ),
        MachineDetails::None => Default::default(),
    }
}

fn machine_form(vm: &MachinesVm<'_>) -> Markup {
    let editing = vm.editing;
    let action = match editing {
        Some(_) => "/machines/update",
        None => "/machines",
    };
    let details = editing.map(|m| m.details.clone()).unwrap_or_default();
    let (water, pump, pressure, temperature, odometer, drive, interval_km) =
        detail_field(&details);

    html! {
        div class="box" {
            h2 class="subtitle" {
                @if editing.is_some() { "Edit Machine" } @else { "New Machine" }
            }
            form action=(action) method="post" {
                div class="field" {
                    label class="label" for="machine_id" { "Machine ID" }
                    @match editing {
                        Some(machine) => {
                            input class="input" type="text" value=(machine.machine_id) readonly;
                            input type="hidden" name="machine_id" value=(machine.machine_id);
                        }
                        None => {
                            input class="input" type="text" name="machine_id" id="machine_id" required;
                        }
                    }
                }
                div class="field" {
                    label class="label" for="name" { "Name" }
                    input class="input" type="text" name="name" id="name"
                        value=(editing.map(|m| m.name.as_str()).unwrap_or("")) required;
                }
                div class="field" {
                    label class="label" for="category" { "Category" }
                    div class="select is-fullwidth" {
                        select name="category" id="category" required {
                            @for cat in MachineCategory::ALL {
                                option value=(cat.as_str())
                                    selected[editing.map(|m| m.category == cat).unwrap_or(false)] {
                                    (cat.label())
                                }
                            }
                        }
                    }
                }
                div class="field" {
                    label class="label" for="location" { "Location" }
                    input class="input" type="text" name="location" id="location"
                        value=(editing.map(|m| m.location.as_str()).unwrap_or(""));
                }
                div class="field" {
                    label class="label" for="current_runtime_hours" { "Current Runtime (hours)" }
                    input class="input" type="number" step="any" min="0"
                        name="current_runtime_hours" id="current_runtime_hours"
                        value=(editing.map(|m| m.current_runtime_hours.to_string()).unwrap_or_else(|| "0".into()));
                }
                div class="field" {
                    label class="label" for="service_interval_hours" { "Service Interval (hours)" }
                    input class="input" type="number" step="any" min="0"
                        name="service_interval_hours" id="service_interval_hours"
                        value=(editing.map(|m| m.service_interval_hours.to_string()).unwrap_or_else(|| "0".into()));
                }

                fieldset class="box" {
                    legend { "Category details" }
                    div class="field" {
                        label class="label" { "Water Capacity in liters (cooling tower)" }
                        input class="input" type="number" step="any" name="water_capacity_liters"
                            value=(water);
                    }
                    div class="field" {
                        label class="label" { "Pump Type (cooling tower)" }
                        input class="input" type="text" name="pump_type" value=(pump);
                    }
                    div class="field" {
                        label class="label" { "Pressure in bar (compressor)" }
                        input class="input" type="number" step="any" name="pressure_bar"
                            value=(pressure);
                    }
                    div class="field" {
                        label class="label" { "Temperature in °C (compressor)" }
                        input class="input" type="number" step="any" name="temperature_celsius"
                            value=(temperature);
                    }
                    div class="field" {
                        label class="label" { "Odometer in km (material handling)" }
                        input class="input" type="number" step="any" name="odometer_km"
                            value=(odometer);
                    }
                    div class="field" {
                        label class="label" { "Drive Type (material handling)" }
                        input class="input" type="text" name="drive_type" value=(drive);
                    }
                    div class="field" {
                        label class="label" { "Service Interval in km (material handling)" }
                        input class="input" type="number" step="any" name="service_interval_km"
                            value=(interval_km);
                    }
                }

                div class="field" {
                    button class="button is-primary" type="submit" {
                        @if editing.is_some() { "Update Machine" } @else { "Save Machine" }
                    }
                    @if editing.is_some() {
                        a class="button is-link is-light" href="/machines" { "Cancel Edit" }
                    }
                }
            }
        }
    }
}

fn machine_table(nav: &NavContext<'_>, vm: &MachinesVm<'_>) -> Markup {
    html! {
        div class="box" {
            h2 class="subtitle" { "Machines" }
            div class="buttons" {
                a class="button is-success" href="/export/machines.xlsx" { "Export to XLSX" }
            }
            table class="table is-striped is-fullwidth" {
                thead {
                    tr {
                        th { "ID" }
                        th { "Name" }
                        th { "Category" }
                        th { "Location" }
                        th { "Status" }
                        th { "Runtime (h)" }
                        th { "Interval (h)" }
                        th { "Actions" }
                    }
                }
                tbody {
                    @for machine in vm.machines {
                        tr {
                            td { a href={ "/machines/detail?id=" (machine.machine_id) } { (machine.machine_id) } }
                            td { (machine.name) }
                            td { (machine.category.label()) }
                            td { (machine.location) }
                            td { (machine.status.as_str()) }
                            td { (format!("{:.1}", machine.displayed_runtime_hours(vm.now))) }
                            td { (format!("{:.1}", machine.service_interval_hours)) }
                            td {
                                form action="/machines/status" method="post" class="inline" {
                                    input type="hidden" name="machine_id" value=(machine.machine_id);
                                    select name="status" {
                                        @for status in ["RUN", "IDLE", "STOP"] {
                                            option value=(status)
                                                selected[machine.status.as_str() == status] { (status) }
                                        }
                                    }
                                    button class="button is-small" type="submit" { "Set" }
                                }
                                @if nav.user.is_admin() {
                                    a class="button is-small is-info"
                                        href={ "/machines?edit=" (machine.machine_id) } { "Edit" }
                                    form action="/machines/delete" method="post" class="inline" {
                                        input type="hidden" name="machine_id" value=(machine.machine_id);
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
