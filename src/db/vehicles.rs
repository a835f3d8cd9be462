// src/db/vehicles.rs
use crate::db::connection::Database;
use crate::domain::{NamedRef, Vehicle};
use crate::errors::ServerError;

/// All vehicles, by name, for the report wizard's vehicle picker.
pub fn list_vehicles(db: &Database) -> Result<Vec<Vehicle>, ServerError> {
    db.with_conn(|conn| {
        let mut stmt = conn
            .prepare(
                r#"
                SELECT v.id, v.name, v.vin_sn, v.license_plate, vt.id, vt.name, vc.id, vc.name
                FROM fleet_vehicle v
                LEFT JOIN vehicle_type vt ON vt.id = v.vehicle_type_id
                LEFT JOIN vehicle_color vc ON vc.id = v.vehicle_color_id
                ORDER BY v.name, v.id
                "#,
            )
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        let rows = stmt
            .query_map([], |row| {
                let vehicle_type = row
                    .get::<_, Option<i64>>(4)?
                    .map(|id| row.get(5).map(|name| NamedRef { id, name }))
                    .transpose()?;
                let color = row
                    .get::<_, Option<i64>>(6)?
                    .map(|id| row.get(7).map(|name| NamedRef { id, name }))
                    .transpose()?;
                Ok(Vehicle {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    vin_sn: row.get(2)?,
                    license_plate: row.get(3)?,
                    vehicle_type,
                    color,
                })
            })
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
        }
        Ok(out)
    })
}
