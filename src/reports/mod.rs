pub mod vehicle_history;

pub use vehicle_history::{
    get_report_values, get_vehicle_history, ReportContext, ReportData, RequestContext,
};
