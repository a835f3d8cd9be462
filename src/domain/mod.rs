pub mod dates;
pub mod history;
pub mod report_row;

pub use history::{ActiveDocument, HistoryCategory, HistoryFilter, HistoryRecord, NamedRef, Vehicle, WorkOrder};
pub use report_row::ReportRow;
