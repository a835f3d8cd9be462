use crate::db::connection::{init_db, Database};
use crate::domain::HistoryCategory;
use crate::errors::ServerError;
use chrono::NaiveDate;
use rusqlite::params;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static DB_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Returns a fresh test database using the production schema
pub fn make_db() -> Database {
    let path = std::env::temp_dir().join(format!(
        "fleet_history_test_{}_{}.sqlite",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos(),
        DB_COUNTER.fetch_add(1, Ordering::SeqCst)
    ));
    let db = Database::new(path.to_string_lossy().into_owned());
    init_db(&db, "sql/schema.sql").expect("Failed to initialize DB");
    db
}

pub fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
}

fn named(db: &Database, table: &str, name: &str) -> i64 {
    db.with_conn(|conn| {
        let existing: Option<i64> = conn
            .query_row(
                &format!("SELECT id FROM {table} WHERE name = ?"),
                params![name],
                |r| r.get(0),
            )
            .ok();
        if let Some(id) = existing {
            return Ok(id);
        }
        conn.execute(&format!("INSERT INTO {table} (name) VALUES (?)"), params![name])?;
        Ok::<_, ServerError>(conn.last_insert_rowid())
    })
    .unwrap()
}

pub struct NewVehicle<'a> {
    pub name: &'a str,
    pub vehicle_type: Option<&'a str>,
    pub color: Option<&'a str>,
    pub vin_sn: Option<&'a str>,
    pub license_plate: Option<&'a str>,
}

impl<'a> NewVehicle<'a> {
    pub fn named(name: &'a str) -> Self {
        Self {
            name,
            vehicle_type: None,
            color: None,
            vin_sn: None,
            license_plate: None,
        }
    }
}

pub fn insert_vehicle(db: &Database, v: NewVehicle<'_>) -> i64 {
    let type_id = v.vehicle_type.map(|t| named(db, "vehicle_type", t));
    let color_id = v.color.map(|c| named(db, "vehicle_color", c));
    db.with_conn(|conn| {
        conn.execute(
            "INSERT INTO fleet_vehicle (name, vehicle_type_id, vehicle_color_id, vin_sn, license_plate) VALUES (?, ?, ?, ?, ?)",
            params![v.name, type_id, color_id, v.vin_sn, v.license_plate],
        )?;
        Ok::<_, ServerError>(conn.last_insert_rowid())
    })
    .unwrap()
}

pub fn insert_work_order(db: &Database, name: &str, date_close: Option<&str>) -> i64 {
    let date_close = date_close.map(date);
    db.with_conn(|conn| {
        conn.execute(
            "INSERT INTO work_order (name, date_close) VALUES (?, ?)",
            params![name, date_close],
        )?;
        Ok::<_, ServerError>(conn.last_insert_rowid())
    })
    .unwrap()
}

#[derive(Default)]
pub struct NewHistory<'a> {
    pub vehicle_id: Option<i64>,
    pub changed_date: Option<&'a str>,
    pub workorder_id: Option<i64>,
    pub note: Option<&'a str>,
    pub previous: Option<&'a str>,
    pub new: Option<&'a str>,
}

/// Inserts one history row. For color history `previous`/`new` are color
/// names and get their own `vehicle_color` rows.
pub fn insert_history(db: &Database, category: HistoryCategory, h: NewHistory<'_>) -> i64 {
    let (table, prev_col, new_col) = match category {
        HistoryCategory::Engine => ("engine_history", "previous_engine_no", "new_engine_no"),
        HistoryCategory::Color => ("color_history", "previous_color_id", "current_color_id"),
        HistoryCategory::Tire => ("tire_history", "previous_tire_size", "new_tire_size"),
        HistoryCategory::Battery => ("battery_history", "previous_battery_size", "new_battery_size"),
        HistoryCategory::Vin => ("vin_history", "previous_vin_no", "new_vin_no"),
    };

    let (previous, new): (Option<rusqlite::types::Value>, Option<rusqlite::types::Value>) =
        if category == HistoryCategory::Color {
            (
                h.previous.map(|c| named(db, "vehicle_color", c).into()),
                h.new.map(|c| named(db, "vehicle_color", c).into()),
            )
        } else {
            (
                h.previous.map(|s| s.to_string().into()),
                h.new.map(|s| s.to_string().into()),
            )
        };
    let changed_date = h.changed_date.map(date);

    db.with_conn(|conn| {
        conn.execute(
            &format!(
                "INSERT INTO {table} (vehicle_id, changed_date, workorder_id, note, {prev_col}, {new_col}) VALUES (?, ?, ?, ?, ?, ?)"
            ),
            params![h.vehicle_id, changed_date, h.workorder_id, h.note, previous, new],
        )?;
        Ok::<_, ServerError>(conn.last_insert_rowid())
    })
    .unwrap()
}
