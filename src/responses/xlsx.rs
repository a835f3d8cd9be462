// responses/xlsx.rs
use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};

const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Spreadsheet download. Quotes and path separators are dropped from the
/// file name so it stays a single header token.
pub fn xlsx_response(buffer: Vec<u8>, filename: &str) -> ResultResp {
    let filename: String = filename
        .chars()
        .filter(|c| !matches!(c, '"' | '/' | '\\'))
        .collect();

    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", XLSX_CONTENT_TYPE)
        .header(
            "Content-Disposition",
            format!("attachment; filename=\"{filename}\""),
        )
        .body(Body::from(buffer))
        .map_err(|_| ServerError::InternalError)
}
