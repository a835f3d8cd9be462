pub mod history_xlsx;

pub use history_xlsx::{build_history_workbook, export_history_xlsx};
