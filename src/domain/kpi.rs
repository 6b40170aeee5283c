use std::collections::BTreeMap;
use std::collections::HashMap;

use crate::domain::machine::MachineCategory;
use crate::domain::report::{MaintenanceReport, ReportType};
use crate::domain::year_month;

const SECONDS_PER_HOUR: f64 = 3600.0;
const MINUTES_PER_HOUR: f64 = 60.0;

/// One `YYYY-MM` row of the monthly summary table.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyBucket {
    pub year_month: String,
    pub preventive_count: u32,
    pub corrective_count: u32,
    pub downtime_minutes: i64,
}

impl MonthlyBucket {
    pub fn downtime_hours(&self) -> f64 {
        self.downtime_minutes as f64 / MINUTES_PER_HOUR
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KpiSummary {
    pub mttr_minutes: f64,
    pub mtbf_hours: f64,
    pub total_downtime_hours: f64,
    pub total_jobs: u32,
    pub preventive_count: u32,
    pub corrective_count: u32,
    pub monthly: Vec<MonthlyBucket>,
}

/// Aggregate an unordered collection of reports into the KPI summary shown
/// on the dashboard. Pure function of its input; malformed fields default to
/// 0/empty instead of erroring, so the dashboard stays available over
/// partially-corrupt data.
pub fn summarize(reports: &[MaintenanceReport], category: Option<MachineCategory>) -> KpiSummary {
    let mut preventive_count: u32 = 0;
    let mut corrective_count: u32 = 0;
    let mut total_corrective_downtime: i64 = 0;
    // machine id -> corrective end-time samples, unix seconds
    let mut failure_times: HashMap<&str, Vec<i64>> = HashMap::new();
    let mut monthly: BTreeMap<String, MonthlyBucket> = BTreeMap::new();

    for report in reports {
        if let Some(filter) = category {
            if report.machine_category != filter {
                continue;
            }
        }

        let downtime = report.downtime_minutes.max(0);
        let report_type = ReportType::parse(&report.report_type);

        match report_type {
            Some(ReportType::Corrective) => {
                corrective_count += 1;
                total_corrective_downtime += downtime;
                if !report.machine_id.is_empty() && report.end_time > 0 {
                    failure_times
                        .entry(report.machine_id.as_str())
                        .or_default()
                        .push(report.end_time);
                }
            }
            Some(ReportType::Preventive) => preventive_count += 1,
            // unknown type labels are kept out of every counter
            None => {}
        }

        if let Some(key) = year_month(report.created_at) {
            let bucket = monthly.entry(key.clone()).or_insert(MonthlyBucket {
                year_month: key,
                preventive_count: 0,
                corrective_count: 0,
                downtime_minutes: 0,
            });
            match report_type {
                Some(ReportType::Preventive) => bucket.preventive_count += 1,
                Some(ReportType::Corrective) => {
                    bucket.corrective_count += 1;
                    bucket.downtime_minutes += downtime;
                }
                None => {}
            }
        }
    }

    let mttr_minutes = if corrective_count > 0 {
        total_corrective_downtime as f64 / corrective_count as f64
    } else {
        0.0
    };

    KpiSummary {
        mttr_minutes,
        mtbf_hours: overall_mtbf_hours(&failure_times),
        total_downtime_hours: total_corrective_downtime as f64 / MINUTES_PER_HOUR,
        total_jobs: preventive_count + corrective_count,
        preventive_count,
        corrective_count,
        // BTreeMap iteration order gives chronological YYYY-MM order
        monthly: monthly.into_values().collect(),
    }
}

/// Mean of the per-machine mean inter-failure gaps, in hours. A machine needs
/// at least two recorded failures to contribute a sample; one failure yields
/// no gap and the machine is excluded entirely rather than counted as zero.
fn overall_mtbf_hours(failure_times: &HashMap<&str, Vec<i64>>) -> f64 {
    let mut per_machine_sum_secs = 0.0;
    let mut machine_count = 0u32;

    for times in failure_times.values() {
        if times.len() < 2 {
            continue;
        }
        let mut sorted = times.clone();
        sorted.sort_unstable();
        let total_gap: i64 = sorted.windows(2).map(|w| w[1] - w[0]).sum();
        per_machine_sum_secs += total_gap as f64 / (sorted.len() - 1) as f64;
        machine_count += 1;
    }

    if machine_count == 0 {
        return 0.0;
    }
    per_machine_sum_secs / machine_count as f64 / SECONDS_PER_HOUR
}
