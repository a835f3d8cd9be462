// src/domain/report_row.rs

use crate::domain::history::HistoryCategory;
use serde::Serialize;

/// A ViewModel for one line of the vehicle change history report.
/// Every history category is flattened into this one shape; only the
/// before/after columns of the row's own category are filled in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    // === Vehicle ===
    /// Vehicle name, or empty when the record has no vehicle.
    pub description: String,
    pub vehicle_type: String,
    pub color_id: String,
    pub vin: String,
    pub plate: String,

    // === Category-specific before/after ===
    pub new_engine: String,
    pub old_engine: String,
    pub new_color: String,
    pub old_color: String,
    pub new_tire: String,
    pub old_tire: String,
    pub new_battery: String,
    pub old_battery: String,
    pub old_vin: String,
    pub new_vin: String,

    // === Event ===
    /// Locale-formatted change date.
    pub change_date: Option<String>,
    pub work_order: String,
    /// Locale-formatted close date of the work order.
    pub wo_close_date: Option<String>,
    pub remarks: String,

    /// Sort key: `description` followed by `"a"`.
    pub seq: String,
}

impl ReportRow {
    /// The (old, new) columns a category writes into.
    ///
    /// VIN history has no columns here: `old_vin`/`new_vin` always stay empty.
    pub fn change_slots_mut(
        &mut self,
        category: HistoryCategory,
    ) -> Option<(&mut String, &mut String)> {
        match category {
            HistoryCategory::Engine => Some((&mut self.old_engine, &mut self.new_engine)),
            HistoryCategory::Color => Some((&mut self.old_color, &mut self.new_color)),
            HistoryCategory::Tire => Some((&mut self.old_tire, &mut self.new_tire)),
            HistoryCategory::Battery => Some((&mut self.old_battery, &mut self.new_battery)),
            HistoryCategory::Vin => None,
        }
    }

    /// The (old, new) values shown for a category.
    pub fn change_values(&self, category: HistoryCategory) -> (&str, &str) {
        match category {
            HistoryCategory::Engine => (self.old_engine.as_str(), self.new_engine.as_str()),
            HistoryCategory::Color => (self.old_color.as_str(), self.new_color.as_str()),
            HistoryCategory::Tire => (self.old_tire.as_str(), self.new_tire.as_str()),
            HistoryCategory::Battery => (self.old_battery.as_str(), self.new_battery.as_str()),
            HistoryCategory::Vin => (self.old_vin.as_str(), self.new_vin.as_str()),
        }
    }
}
