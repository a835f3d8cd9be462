// src/db/history.rs
use crate::db::connection::Database;
use crate::domain::{
    ActiveDocument, HistoryCategory, HistoryFilter, HistoryRecord, NamedRef, Vehicle, WorkOrder,
};
use crate::errors::ServerError;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

pub const VEHICLE_MODEL: &str = "fleet.vehicle";

/// Read-only access to the history tables.
pub trait HistoryStore {
    /// All records of one category matching the filter's bounds, in id order.
    /// The filter's `report` key is not consulted here.
    fn search(
        &self,
        category: HistoryCategory,
        filter: &HistoryFilter,
    ) -> Result<Vec<HistoryRecord>, ServerError>;

    /// Resolves the document a report was launched from.
    fn browse(&self, model: &str, id: i64) -> Result<ActiveDocument, ServerError>;
}

/// Where a category's rows live and how its before/after pair is selected.
struct CategorySource {
    table: &'static str,
    previous: &'static str,
    new: &'static str,
    joins: &'static str,
}

fn category_source(category: HistoryCategory) -> CategorySource {
    match category {
        HistoryCategory::Engine => CategorySource {
            table: "engine_history",
            previous: "h.previous_engine_no",
            new: "h.new_engine_no",
            joins: "",
        },
        HistoryCategory::Color => CategorySource {
            table: "color_history",
            previous: "pc.name",
            new: "cc.name",
            joins: "LEFT JOIN vehicle_color pc ON pc.id = h.previous_color_id \
                    LEFT JOIN vehicle_color cc ON cc.id = h.current_color_id",
        },
        HistoryCategory::Tire => CategorySource {
            table: "tire_history",
            previous: "h.previous_tire_size",
            new: "h.new_tire_size",
            joins: "",
        },
        HistoryCategory::Battery => CategorySource {
            table: "battery_history",
            previous: "h.previous_battery_size",
            new: "h.new_battery_size",
            joins: "",
        },
        HistoryCategory::Vin => CategorySource {
            table: "vin_history",
            previous: "h.previous_vin_no",
            new: "h.new_vin_no",
            joins: "",
        },
    }
}

/// WHERE clause and its parameters; absent bounds add nothing.
fn build_predicate(filter: &HistoryFilter) -> (String, Vec<Value>) {
    let mut clauses = Vec::new();
    let mut values = Vec::new();

    if let Some(from) = filter.date_from {
        clauses.push("h.changed_date >= ?");
        values.push(Value::Text(from.to_string()));
    }
    if let Some(to) = filter.date_to {
        clauses.push("h.changed_date <= ?");
        values.push(Value::Text(to.to_string()));
    }
    if let Some(fleet_id) = filter.fleet_id {
        clauses.push("h.vehicle_id = ?");
        values.push(Value::Integer(fleet_id));
    }

    if clauses.is_empty() {
        (String::new(), values)
    } else {
        (format!("WHERE {}", clauses.join(" AND ")), values)
    }
}

pub fn search_history(
    conn: &Connection,
    category: HistoryCategory,
    filter: &HistoryFilter,
) -> Result<Vec<HistoryRecord>, ServerError> {
    let source = category_source(category);
    let (predicate, values) = build_predicate(filter);

    let sql = format!(
        r#"
        SELECT
            h.id, h.changed_date, h.note, {previous}, {new},
            v.id, v.name, v.vin_sn, v.license_plate,
            vt.id, vt.name,
            vc.id, vc.name,
            wo.id, wo.name, wo.date_close
        FROM {table} h
        LEFT JOIN fleet_vehicle v ON v.id = h.vehicle_id
        LEFT JOIN vehicle_type vt ON vt.id = v.vehicle_type_id
        LEFT JOIN vehicle_color vc ON vc.id = v.vehicle_color_id
        LEFT JOIN work_order wo ON wo.id = h.workorder_id
        {joins}
        {predicate}
        ORDER BY h.id
        "#,
        previous = source.previous,
        new = source.new,
        table = source.table,
        joins = source.joins,
    );

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| ServerError::DbError(format!("prepare {} search failed: {e}", source.table)))?;

    let rows = stmt
        .query_map(params_from_iter(values.iter()), |row| history_from_row(category, row))
        .map_err(|e| ServerError::DbError(format!("{} search failed: {e}", source.table)))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn history_from_row(category: HistoryCategory, row: &Row<'_>) -> rusqlite::Result<HistoryRecord> {
    let vehicle = match row.get::<_, Option<i64>>(5)? {
        Some(id) => Some(Vehicle {
            id,
            name: row.get(6)?,
            vin_sn: row.get(7)?,
            license_plate: row.get(8)?,
            vehicle_type: named_ref(row, 9)?,
            color: named_ref(row, 11)?,
        }),
        None => None,
    };

    let work_order = match row.get::<_, Option<i64>>(13)? {
        Some(id) => Some(WorkOrder {
            id,
            name: row.get(14)?,
            date_close: row.get(15)?,
        }),
        None => None,
    };

    Ok(HistoryRecord {
        id: row.get(0)?,
        category,
        vehicle,
        changed_date: row.get(1)?,
        work_order,
        note: row.get(2)?,
        previous_value: row.get(3)?,
        new_value: row.get(4)?,
    })
}

/// Reads an optional (id, name) pair starting at `idx`.
fn named_ref(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<NamedRef>> {
    match row.get::<_, Option<i64>>(idx)? {
        Some(id) => Ok(Some(NamedRef {
            id,
            name: row.get(idx + 1)?,
        })),
        None => Ok(None),
    }
}

/// Only `fleet.vehicle` documents get a name; other models are passed
/// through by model and id.
pub fn browse_document(
    conn: &Connection,
    model: &str,
    id: i64,
) -> Result<ActiveDocument, ServerError> {
    let name = if model == VEHICLE_MODEL {
        conn.query_row(
            "SELECT name FROM fleet_vehicle WHERE id = ?",
            params![id],
            |row| row.get::<_, String>(0),
        )
        .optional()?
    } else {
        None
    };

    Ok(ActiveDocument {
        model: model.to_string(),
        id,
        name,
    })
}

impl HistoryStore for Database {
    fn search(
        &self,
        category: HistoryCategory,
        filter: &HistoryFilter,
    ) -> Result<Vec<HistoryRecord>, ServerError> {
        self.with_conn(|conn| search_history(conn, category, filter))
    }

    fn browse(&self, model: &str, id: i64) -> Result<ActiveDocument, ServerError> {
        self.with_conn(|conn| browse_document(conn, model, id))
    }
}
