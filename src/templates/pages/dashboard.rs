use maud::{html, Markup};

use crate::domain::kpi::KpiSummary;
use crate::domain::machine::MachineCategory;
use crate::templates::{desktop_layout, NavContext};

pub struct DashboardVm<'a> {
    pub kpi: &'a KpiSummary,
    pub category_filter: Option<MachineCategory>,
}

pub fn dashboard_page(nav: &NavContext<'_>, vm: &DashboardVm<'_>) -> Markup {
    desktop_layout(
        "Dashboard",
        Some(nav),
        html! {
            main class="container" {
                h1 class="title" { "KPI Dashboard" }

                form action="/dashboard" method="get" class="field is-inline" {
                    label class="label" for="category" { "Category" }
                    select name="category" id="category" onchange="this.form.submit()" {
                        option value="" selected[vm.category_filter.is_none()] { "All categories" }
                        @for cat in MachineCategory::ALL {
                            option value=(cat.as_str())
                                selected[vm.category_filter == Some(cat)] { (cat.label()) }
                        }
                    }
                    noscript { button type="submit" { "Apply" } }
                }

                div class="columns is-multiline" {
                    (kpi_card(&format!("{:.2}", vm.kpi.mttr_minutes), "MTTR (minutes)"))
                    (kpi_card(&format!("{:.2}", vm.kpi.mtbf_hours), "MTBF (hours)"))
                    (kpi_card(&format!("{:.2}", vm.kpi.total_downtime_hours), "Total Downtime (hours)"))
                    (kpi_card(&vm.kpi.total_jobs.to_string(), "Total Jobs"))
                }

                div class="columns" {
                    div class="column is-half" {
                        div class="box" {
                            h2 class="subtitle" { "Preventive vs Corrective" }
                            table class="table is-fullwidth" {
                                thead { tr { th { "Type" } th { "Jobs" } } }
                                tbody {
                                    tr { td { "Preventive" } td { (vm.kpi.preventive_count) } }
                                    tr { td { "Corrective" } td { (vm.kpi.corrective_count) } }
                                }
                            }
                        }
                    }
                    div class="column is-half" {
                        div class="box" {
                            h2 class="subtitle" { "Monthly Summary" }
                            @if vm.kpi.monthly.is_empty() {
                                p class="has-text-centered" { "No monthly summary data to display." }
                            } @else {
                                table class="table is-striped is-fullwidth" {
                                    thead {
                                        tr {
                                            th { "Month" }
                                            th { "Preventive" }
                                            th { "Corrective" }
                                            th { "Downtime (hours)" }
                                        }
                                    }
                                    tbody {
                                        @for bucket in &vm.kpi.monthly {
                                            tr {
                                                td { (bucket.year_month) }
                                                td { (bucket.preventive_count) }
                                                td { (bucket.corrective_count) }
                                                td { (format!("{:.2}", bucket.downtime_hours())) }
                                            }
                                        }
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

fn kpi_card(value: &str, caption: &str) -> Markup {
    html! {
        div class="column is-one-quarter" {
            div class="box kpi-card" {
                p class="title is-4 has-text-centered" { (value) }
                p class="subtitle is-6 has-text-centered" { (caption) }
            }
        }
    }
}
