use rust_xlsxwriter::Workbook;

use crate::domain::format_timestamp;
use crate::domain::machine::{Machine, MachineDetails};
use crate::errors::{ResultResp, ServerError};
use crate::responses::xlsx_response;

pub const MACHINE_HEADERS: [&str; 11] = [
    "Machine ID",
    "Name",
    "Category",
    "Location",
    "Status",
    "Runtime (hours)",
    "Service Interval (hours)",
    "Drive Type",
    "Odometer (km)",
    "Service Interval (km)",
    "Created At",
];

pub fn machine_row(machine: &Machine) -> [String; 11] {
    let (drive_type, odometer_km, interval_km) = match &machine.details {
        MachineDetails::MaterialHandling {
            odometer_km,
            drive_type,
            service_interval_km,
        } => (
            drive_type.clone(),
            odometer_km.to_string(),
            service_interval_km.to_string(),
        ),
        _ => ("-".to_string(), "0".to_string(), "0".to_string()),
    };

    [
        machine.machine_id.clone(),
        machine.name.clone(),
        machine.category.label().to_string(),
        machine.location.clone(),
        machine.status.as_str().to_string(),
        machine.current_runtime_hours.to_string(),
        machine.service_interval_hours.to_string(),
        drive_type,
        odometer_km,
        interval_km,
        format_timestamp(machine.created_at),
    ]
}

pub fn export_machines_xlsx(machines: &[Machine]) -> ResultResp {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name("Machines")
        .map_err(|e| ServerError::XlsxError(format!("Failed to name sheet: {e}")))?;

    for (col, header) in MACHINE_HEADERS.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *header)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write header '{header}': {e}")))?;
    }

    for (i, machine) in machines.iter().enumerate() {
        let r = (i + 1) as u32;
        for (col, cell) in machine_row(machine).iter().enumerate() {
            worksheet
                .write_string(r, col as u16, cell)
                .map_err(|e| ServerError::XlsxError(format!("Failed to write row {r}: {e}")))?;
        }
    }

    let buffer = workbook
        .save_to_buffer()
        .map_err(|e| ServerError::XlsxError(format!("Failed to save workbook: {e}")))?;

    xlsx_response(buffer, "machines.xlsx")
}
