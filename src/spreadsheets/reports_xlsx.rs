use rust_xlsxwriter::Workbook;

use crate::domain::format_timestamp;
use crate::domain::report::MaintenanceReport;
use crate::errors::{ResultResp, ServerError};
use crate::responses::xlsx_response;

pub const REPORT_HEADERS: [&str; 11] = [
    "Report ID",
    "Reported At",
    "Machine ID",
    "Machine Name",
    "Category",
    "Technician",
    "Start Time",
    "End Time",
    "Downtime (minutes)",
    "Job Type",
    "Description",
];

/// Textual cells for one report row. Shared by the workbook writer and its
/// tests so the export's textual representation has exactly one source;
/// timestamps go through the same formatter the HTML tables use.
pub fn report_row(report: &MaintenanceReport) -> [String; 11] {
    [
        report.id.to_string(),
        format_timestamp(report.created_at),
        report.machine_id.clone(),
        report.machine_name.clone(),
        report.machine_category.label().to_string(),
        report.technician_name.clone(),
        format_timestamp(report.start_time),
        format_timestamp(report.end_time),
        report.downtime_minutes.to_string(),
        report.report_type.clone(),
        report.description.clone(),
    ]
}

pub fn export_reports_xlsx(reports: &[MaintenanceReport]) -> ResultResp {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name("Maintenance Reports")
        .map_err(|e| ServerError::XlsxError(format!("Failed to name sheet: {e}")))?;

    for (col, header) in REPORT_HEADERS.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *header)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write header '{header}': {e}")))?;
    }

    for (i, report) in reports.iter().enumerate() {
        let r = (i + 1) as u32;
        for (col, cell) in report_row(report).iter().enumerate() {
            worksheet
                .write_string(r, col as u16, cell)
                .map_err(|e| ServerError::XlsxError(format!("Failed to write row {r}: {e}")))?;
        }
    }

    let buffer = workbook
        .save_to_buffer()
        .map_err(|e| ServerError::XlsxError(format!("Failed to save workbook: {e}")))?;

    xlsx_response(buffer, "maintenance_reports.xlsx")
}
