use crate::domain::machine::MachineCategory;

/// Job types that count toward KPI totals. Reports can carry other type
/// strings (historical drift); those are kept but ignored by the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportType {
    Preventive,
    Corrective,
}

impl ReportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::Preventive => "Preventive",
            ReportType::Corrective => "Corrective",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Preventive" => Some(ReportType::Preventive),
            "Corrective" => Some(ReportType::Corrective),
            _ => None,
        }
    }
}

/// A submitted maintenance report. Immutable once created except through the
/// explicit edit flow; owned by the submitting user for edit/delete purposes.
#[derive(Debug, Clone)]
pub struct MaintenanceReport {
    pub id: i64,
    pub machine_id: String,
    pub machine_name: String,
    pub machine_category: MachineCategory,
    pub technician_id: i64,
    pub technician_name: String,
    pub start_time: i64,
    pub end_time: i64,
    pub downtime_minutes: i64,
    /// Raw stored label; parse with `ReportType::parse` when counting.
    pub report_type: String,
    pub description: String,
    pub status_after: String,
    pub submitted_by: i64,
    pub created_at: i64,
}

impl MaintenanceReport {
    pub fn is_corrective(&self) -> bool {
        ReportType::parse(&self.report_type) == Some(ReportType::Corrective)
    }

    /// Whether `user_id` may edit or delete this report. Admins may touch
    /// everything, technicians only their own submissions.
    pub fn editable_by(&self, user_id: i64, is_admin: bool) -> bool {
        is_admin || self.submitted_by == user_id
    }
}
