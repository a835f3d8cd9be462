// src/tests/history_tests.rs

use super::utils::{
    date, insert_history, insert_vehicle, insert_work_order, make_db, NewHistory, NewVehicle,
};
use crate::db::HistoryStore;
use crate::domain::{
    ActiveDocument, HistoryCategory, HistoryFilter, HistoryRecord, ReportRow,
};
use crate::errors::ServerError;
use crate::reports::{get_vehicle_history, RequestContext};
use std::cell::Cell;

fn ctx() -> RequestContext {
    RequestContext {
        lang: Some("en_US".into()),
        ..Default::default()
    }
}

fn filter(report: &str) -> HistoryFilter {
    HistoryFilter {
        report: Some(report.into()),
        ..Default::default()
    }
}

/// Every before/after column except the ones named.
fn other_change_columns<'a>(row: &'a ReportRow, keep: &[&str]) -> Vec<(&'static str, &'a str)> {
    let all = [
        ("new_engine", row.new_engine.as_str()),
        ("old_engine", row.old_engine.as_str()),
        ("new_color", row.new_color.as_str()),
        ("old_color", row.old_color.as_str()),
        ("new_tire", row.new_tire.as_str()),
        ("old_tire", row.old_tire.as_str()),
        ("new_battery", row.new_battery.as_str()),
        ("old_battery", row.old_battery.as_str()),
        ("old_vin", row.old_vin.as_str()),
        ("new_vin", row.new_vin.as_str()),
    ];
    all.into_iter().filter(|(k, _)| !keep.contains(k)).collect()
}

/// Store that counts searches, for checking that nothing is queried.
struct CountingStore {
    searches: Cell<usize>,
}

impl HistoryStore for CountingStore {
    fn search(
        &self,
        _category: HistoryCategory,
        _filter: &HistoryFilter,
    ) -> Result<Vec<HistoryRecord>, ServerError> {
        self.searches.set(self.searches.get() + 1);
        Ok(Vec::new())
    }

    fn browse(&self, model: &str, id: i64) -> Result<ActiveDocument, ServerError> {
        Ok(ActiveDocument {
            model: model.into(),
            id,
            name: None,
        })
    }
}

#[test]
fn missing_or_unknown_report_returns_nothing_without_querying() {
    let store = CountingStore {
        searches: Cell::new(0),
    };

    let rows = get_vehicle_history(&store, &ctx(), &HistoryFilter::default()).unwrap();
    assert!(rows.is_empty());

    let rows = get_vehicle_history(&store, &ctx(), &filter("odometer_history")).unwrap();
    assert!(rows.is_empty());

    assert_eq!(store.searches.get(), 0);
}

#[test]
fn engine_history_for_one_vehicle() {
    let db = make_db();
    let v1 = insert_vehicle(
        &db,
        NewVehicle {
            name: "Truck 7",
            vehicle_type: Some("Truck"),
            color: Some("Red"),
            vin_sn: Some("1HGCM82633A004352"),
            license_plate: Some("ABC-123"),
        },
    );
    let v2 = insert_vehicle(&db, NewVehicle::named("Van 2"));

    insert_history(
        &db,
        HistoryCategory::Engine,
        NewHistory {
            vehicle_id: Some(v1),
            changed_date: Some("2024-02-01"),
            previous: Some("E1"),
            new: Some("E2"),
            ..Default::default()
        },
    );
    insert_history(
        &db,
        HistoryCategory::Engine,
        NewHistory {
            vehicle_id: Some(v2),
            changed_date: Some("2024-02-02"),
            previous: Some("X1"),
            new: Some("X2"),
            ..Default::default()
        },
    );
    insert_history(
        &db,
        HistoryCategory::Engine,
        NewHistory {
            vehicle_id: Some(v1),
            changed_date: Some("2024-05-01"),
            previous: Some("E2"),
            new: Some("E3"),
            ..Default::default()
        },
    );

    let f = HistoryFilter {
        report: Some("engine_history".into()),
        fleet_id: Some(v1),
        ..Default::default()
    };
    let rows = get_vehicle_history(&db, &ctx(), &f).unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!((rows[0].old_engine.as_str(), rows[0].new_engine.as_str()), ("E1", "E2"));
    assert_eq!((rows[1].old_engine.as_str(), rows[1].new_engine.as_str()), ("E2", "E3"));

    for row in &rows {
        assert_eq!(row.description, "Truck 7");
        assert_eq!(row.seq, "Truck 7a");
        assert_eq!(row.vehicle_type, "Truck");
        assert_eq!(row.color_id, "Red");
        assert_eq!(row.vin, "1HGCM82633A004352");
        assert_eq!(row.plate, "ABC-123");
        for (column, value) in other_change_columns(row, &["old_engine", "new_engine"]) {
            assert_eq!(value, "", "{column} should be empty");
        }
    }
}

#[test]
fn date_from_is_inclusive() {
    let db = make_db();
    let v = insert_vehicle(&db, NewVehicle::named("Bus 1"));
    for d in ["2023-12-31", "2024-01-01", "2024-06-01"] {
        insert_history(
            &db,
            HistoryCategory::Tire,
            NewHistory {
                vehicle_id: Some(v),
                changed_date: Some(d),
                previous: Some("195/65R15"),
                new: Some("205/55R16"),
                ..Default::default()
            },
        );
    }

    let f = HistoryFilter {
        report: Some("tire_history".into()),
        date_from: Some(date("2024-01-01")),
        ..Default::default()
    };
    let rows = get_vehicle_history(&db, &ctx(), &f).unwrap();

    let dates: Vec<_> = rows.iter().filter_map(|r| r.change_date.clone()).collect();
    assert_eq!(dates, vec!["01/01/2024".to_string(), "06/01/2024".to_string()]);
}

#[test]
fn date_to_is_inclusive_and_undated_records_drop_out_of_bounded_reports() {
    let db = make_db();
    let v = insert_vehicle(&db, NewVehicle::named("Bus 1"));
    for d in [Some("2024-03-01"), Some("2024-03-02"), None] {
        insert_history(
            &db,
            HistoryCategory::Battery,
            NewHistory {
                vehicle_id: Some(v),
                changed_date: d,
                previous: Some("60Ah"),
                new: Some("70Ah"),
                ..Default::default()
            },
        );
    }

    let bounded = HistoryFilter {
        report: Some("battery_history".into()),
        date_to: Some(date("2024-03-01")),
        ..Default::default()
    };
    assert_eq!(get_vehicle_history(&db, &ctx(), &bounded).unwrap().len(), 1);

    let unbounded = filter("battery_history");
    let rows = get_vehicle_history(&db, &ctx(), &unbounded).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows.iter().filter(|r| r.change_date.is_none()).count(), 1);
    assert!(rows.iter().all(|r| r.old_battery == "60Ah" && r.new_battery == "70Ah"));
}

#[test]
fn record_without_vehicle_yields_empty_vehicle_fields() {
    let db = make_db();
    insert_history(
        &db,
        HistoryCategory::Engine,
        NewHistory {
            changed_date: Some("2024-01-05"),
            previous: Some("E9"),
            new: Some("E10"),
            ..Default::default()
        },
    );

    let rows = get_vehicle_history(&db, &ctx(), &filter("engine_history")).unwrap();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.description, "");
    assert_eq!(row.vehicle_type, "");
    assert_eq!(row.color_id, "");
    assert_eq!(row.vin, "");
    assert_eq!(row.plate, "");
    assert_eq!(row.seq, "a");
}

#[test]
fn vehicle_without_type_or_color_defaults_to_empty() {
    let db = make_db();
    let v = insert_vehicle(&db, NewVehicle::named("Car 3"));
    insert_history(
        &db,
        HistoryCategory::Tire,
        NewHistory {
            vehicle_id: Some(v),
            ..Default::default()
        },
    );

    let rows = get_vehicle_history(&db, &ctx(), &filter("tire_history")).unwrap();
    assert_eq!(rows[0].description, "Car 3");
    assert_eq!(rows[0].vehicle_type, "");
    assert_eq!(rows[0].color_id, "");
    assert_eq!(rows[0].old_tire, "");
    assert_eq!(rows[0].change_date, None);
}

#[test]
fn color_history_uses_color_names() {
    let db = make_db();
    let v = insert_vehicle(
        &db,
        NewVehicle {
            color: Some("Blue"),
            ..NewVehicle::named("Sedan 4")
        },
    );
    insert_history(
        &db,
        HistoryCategory::Color,
        NewHistory {
            vehicle_id: Some(v),
            previous: Some("White"),
            new: Some("Blue"),
            ..Default::default()
        },
    );

    let rows = get_vehicle_history(&db, &ctx(), &filter("color_history")).unwrap();
    assert_eq!(rows[0].old_color, "White");
    assert_eq!(rows[0].new_color, "Blue");
    assert_eq!(rows[0].color_id, "Blue");
    for (column, value) in other_change_columns(&rows[0], &["old_color", "new_color"]) {
        assert_eq!(value, "", "{column} should be empty");
    }
}

#[test]
fn vin_history_rows_leave_vin_columns_empty() {
    let db = make_db();
    let v = insert_vehicle(
        &db,
        NewVehicle {
            vin_sn: Some("VIN-NEW"),
            ..NewVehicle::named("Pickup 5")
        },
    );
    insert_history(
        &db,
        HistoryCategory::Vin,
        NewHistory {
            vehicle_id: Some(v),
            previous: Some("VIN-OLD"),
            new: Some("VIN-NEW"),
            ..Default::default()
        },
    );

    let rows = get_vehicle_history(&db, &ctx(), &filter("vin_history")).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].vin, "VIN-NEW");
    for (column, value) in other_change_columns(&rows[0], &[]) {
        assert_eq!(value, "", "{column} should be empty");
    }
}

#[test]
fn rows_sort_by_seq_bytes_and_ties_keep_store_order() {
    let db = make_db();
    let zed = insert_vehicle(&db, NewVehicle::named("Zed"));
    let alpha_1 = insert_vehicle(&db, NewVehicle::named("Alpha"));
    let alpha_2 = insert_vehicle(&db, NewVehicle::named("Alpha"));

    for (vehicle, note) in [(zed, "z"), (alpha_2, "second alpha"), (alpha_1, "first alpha")] {
        insert_history(
            &db,
            HistoryCategory::Engine,
            NewHistory {
                vehicle_id: Some(vehicle),
                note: Some(note),
                ..Default::default()
            },
        );
    }
    insert_history(&db, HistoryCategory::Engine, NewHistory::default());

    let rows = get_vehicle_history(&db, &ctx(), &filter("engine_history")).unwrap();
    let order: Vec<(&str, &str)> = rows
        .iter()
        .map(|r| (r.description.as_str(), r.remarks.as_str()))
        .collect();
    assert_eq!(
        order,
        vec![
            ("Alpha", "second alpha"),
            ("Alpha", "first alpha"),
            ("Zed", "z"),
            ("", ""),
        ]
    );
    assert!(rows.windows(2).all(|w| w[0].seq <= w[1].seq));
}

#[test]
fn work_order_fields_are_formatted_with_locale() {
    let db = make_db();
    let v = insert_vehicle(&db, NewVehicle::named("Truck 9"));
    let closed = insert_work_order(&db, "WO/0042", Some("2024-04-15"));
    let open = insert_work_order(&db, "WO/0043", None);

    insert_history(
        &db,
        HistoryCategory::Engine,
        NewHistory {
            vehicle_id: Some(v),
            changed_date: Some("2024-04-10"),
            workorder_id: Some(closed),
            note: Some("engine swap"),
            ..Default::default()
        },
    );
    insert_history(
        &db,
        HistoryCategory::Engine,
        NewHistory {
            vehicle_id: Some(v),
            workorder_id: Some(open),
            ..Default::default()
        },
    );

    let german = RequestContext {
        lang: Some("de_DE".into()),
        ..Default::default()
    };
    let rows = get_vehicle_history(&db, &german, &filter("engine_history")).unwrap();

    assert_eq!(rows[0].change_date.as_deref(), Some("10.04.2024"));
    assert_eq!(rows[0].work_order, "WO/0042");
    assert_eq!(rows[0].wo_close_date.as_deref(), Some("15.04.2024"));
    assert_eq!(rows[0].remarks, "engine swap");

    assert_eq!(rows[1].work_order, "WO/0043");
    assert_eq!(rows[1].wo_close_date, None);
    assert_eq!(rows[1].remarks, "");
}

#[test]
fn only_the_selected_category_is_read() {
    let db = make_db();
    let v = insert_vehicle(&db, NewVehicle::named("Truck 1"));
    insert_history(
        &db,
        HistoryCategory::Engine,
        NewHistory {
            vehicle_id: Some(v),
            ..Default::default()
        },
    );
    insert_history(
        &db,
        HistoryCategory::Battery,
        NewHistory {
            vehicle_id: Some(v),
            ..Default::default()
        },
    );

    assert_eq!(get_vehicle_history(&db, &ctx(), &filter("battery_history")).unwrap().len(), 1);
    assert!(get_vehicle_history(&db, &ctx(), &filter("tire_history")).unwrap().is_empty());
}
