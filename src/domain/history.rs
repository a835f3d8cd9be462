// src/domain/history.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The five kinds of change the fleet tracks per vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HistoryCategory {
    #[serde(rename = "engine_history")]
    Engine,
    #[serde(rename = "color_history")]
    Color,
    #[serde(rename = "tire_history")]
    Tire,
    #[serde(rename = "battery_history")]
    Battery,
    #[serde(rename = "vin_history")]
    Vin,
}

impl HistoryCategory {
    pub const ALL: [HistoryCategory; 5] = [
        HistoryCategory::Engine,
        HistoryCategory::Color,
        HistoryCategory::Tire,
        HistoryCategory::Battery,
        HistoryCategory::Vin,
    ];

    /// The `report` tag used by the wizard form.
    pub fn tag(self) -> &'static str {
        match self {
            HistoryCategory::Engine => "engine_history",
            HistoryCategory::Color => "color_history",
            HistoryCategory::Tire => "tire_history",
            HistoryCategory::Battery => "battery_history",
            HistoryCategory::Vin => "vin_history",
        }
    }

    /// Unknown tags select nothing.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.tag() == tag)
    }

    pub fn label(self) -> &'static str {
        match self {
            HistoryCategory::Engine => "Engine History",
            HistoryCategory::Color => "Color History",
            HistoryCategory::Tire => "Tire History",
            HistoryCategory::Battery => "Battery History",
            HistoryCategory::Vin => "VIN History",
        }
    }

    /// Column headings for the before/after pair, as (old, new).
    pub fn change_headings(self) -> (&'static str, &'static str) {
        match self {
            HistoryCategory::Engine => ("Old Engine No", "New Engine No"),
            HistoryCategory::Color => ("Old Color", "New Color"),
            HistoryCategory::Tire => ("Old Tire Size", "New Tire Size"),
            HistoryCategory::Battery => ("Old Battery Size", "New Battery Size"),
            HistoryCategory::Vin => ("Old VIN No", "New VIN No"),
        }
    }
}

/// A related record that is only ever shown by name (vehicle type, color).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedRef {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vehicle {
    pub id: i64,
    pub name: String,
    pub vehicle_type: Option<NamedRef>,
    pub color: Option<NamedRef>,
    pub vin_sn: Option<String>,
    pub license_plate: Option<String>,
}

impl Vehicle {
    pub fn type_name(&self) -> Option<&str> {
        self.vehicle_type.as_ref().map(|t| t.name.as_str())
    }

    pub fn color_name(&self) -> Option<&str> {
        self.color.as_ref().map(|c| c.name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkOrder {
    pub id: i64,
    pub name: String,
    pub date_close: Option<NaiveDate>,
}

/// One row of any of the five history tables.
///
/// `previous_value` / `new_value` hold the category's own pair: engine
/// numbers, color names, tire sizes, battery sizes or VIN numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRecord {
    pub id: i64,
    pub category: HistoryCategory,
    pub vehicle: Option<Vehicle>,
    pub changed_date: Option<NaiveDate>,
    pub work_order: Option<WorkOrder>,
    pub note: Option<String>,
    pub previous_value: Option<String>,
    pub new_value: Option<String>,
}

impl HistoryRecord {
    pub fn vehicle_name(&self) -> Option<&str> {
        self.vehicle.as_ref().map(|v| v.name.as_str())
    }

    pub fn vehicle_type_name(&self) -> Option<&str> {
        self.vehicle.as_ref().and_then(Vehicle::type_name)
    }

    pub fn vehicle_color_name(&self) -> Option<&str> {
        self.vehicle.as_ref().and_then(Vehicle::color_name)
    }

    pub fn vin_sn(&self) -> Option<&str> {
        self.vehicle.as_ref().and_then(|v| v.vin_sn.as_deref())
    }

    pub fn license_plate(&self) -> Option<&str> {
        self.vehicle.as_ref().and_then(|v| v.license_plate.as_deref())
    }

    pub fn work_order_name(&self) -> Option<&str> {
        self.work_order.as_ref().map(|w| w.name.as_str())
    }

    pub fn work_order_close_date(&self) -> Option<NaiveDate> {
        self.work_order.as_ref().and_then(|w| w.date_close)
    }
}

/// The wizard form. Every bound is optional and only present ones filter;
/// `report` picks the history category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryFilter {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub fleet_id: Option<i64>,
    /// Raw category tag; kept as text so an unknown value can be echoed back.
    pub report: Option<String>,
}

impl HistoryFilter {
    pub fn category(&self) -> Option<HistoryCategory> {
        self.report.as_deref().and_then(HistoryCategory::from_tag)
    }
}

/// The record a report was launched from (the wizard's active model/id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveDocument {
    pub model: String,
    pub id: i64,
    /// Display name when the model is one the store knows.
    pub name: Option<String>,
}
