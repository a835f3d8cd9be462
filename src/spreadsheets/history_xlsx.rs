use crate::errors::ServerError;
use crate::reports::ReportContext;
use crate::responses::{xlsx_response, ResultResp};
use rust_xlsxwriter::{Format, Workbook};

/// Renders the report rows into an in-memory workbook.
pub fn build_history_workbook(report: &ReportContext) -> Result<Vec<u8>, ServerError> {
    let category = report.category();
    let (old_heading, new_heading) = category
        .map(|c| c.change_headings())
        .unwrap_or(("Old Value", "New Value"));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let bold = Format::new().set_bold();

    let headers = [
        "Vehicle ID",
        "Vehicle Type",
        "Color",
        "VIN",
        "License Plate",
        old_heading,
        new_heading,
        "Change Date",
        "Work Order",
        "WO Close Date",
        "Remarks",
    ];

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &bold)
            .map_err(|e| {
                ServerError::XlsxError(format!("Failed to write header '{}': {}", header, e))
            })?;
    }

    for (i, row) in report.rows.iter().enumerate() {
        let r = (i + 1) as u32;
        let (old, new) = category
            .map(|c| row.change_values(c))
            .unwrap_or(("", ""));

        let cells = [
            row.description.as_str(),
            row.vehicle_type.as_str(),
            row.color_id.as_str(),
            row.vin.as_str(),
            row.plate.as_str(),
            old,
            new,
            row.change_date.as_deref().unwrap_or_default(),
            row.work_order.as_str(),
            row.wo_close_date.as_deref().unwrap_or_default(),
            row.remarks.as_str(),
        ];

        for (col, value) in cells.iter().enumerate() {
            worksheet
                .write_string(r, col as u16, *value)
                .map_err(|e| {
                    ServerError::XlsxError(format!("Failed to write {} at row {}: {}", headers[col], r, e))
                })?;
        }
    }

    worksheet.autofit();

    workbook
        .save_to_buffer()
        .map_err(|e| ServerError::XlsxError(format!("Failed to save workbook: {}", e)))
}

pub fn export_history_xlsx(report: &ReportContext) -> ResultResp {
    let buffer = build_history_workbook(report)?;
    let tag = report
        .category()
        .map(|c| c.tag())
        .unwrap_or("vehicle_history");

    tracing::debug!(rows = report.rows.len(), bytes = buffer.len(), "history workbook built");
    xlsx_response(buffer, &format!("{tag}_{}.xlsx", report.printed_at.format("%Y%m%d")))
}
