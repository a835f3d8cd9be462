// src/reports/vehicle_history.rs

use crate::db::HistoryStore;
use crate::domain::dates::format_date;
use crate::domain::{ActiveDocument, HistoryCategory, HistoryFilter, HistoryRecord, ReportRow};
use crate::errors::ServerError;
use chrono::NaiveDateTime;
use serde::Serialize;

/// Request-scoped settings a report runs under.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub lang: Option<String>,
    pub active_model: Option<String>,
    pub active_id: Option<i64>,
    /// Stamped on the report as its print time.
    pub now: NaiveDateTime,
}

/// Report payload as submitted by the wizard.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReportData {
    pub form: Option<HistoryFilter>,
}

/// Everything the report template needs.
#[derive(Debug, Clone, Serialize)]
pub struct ReportContext {
    pub doc_ids: Vec<i64>,
    pub doc_model: String,
    pub data: HistoryFilter,
    pub docs: Vec<ActiveDocument>,
    pub printed_at: NaiveDateTime,
    pub rows: Vec<ReportRow>,
}

impl ReportContext {
    pub fn category(&self) -> Option<HistoryCategory> {
        self.data.category()
    }
}

/// Collects the history rows of the category named by `filter.report`,
/// sorted by vehicle name. No category, no query, no rows.
pub fn get_vehicle_history<S: HistoryStore + ?Sized>(
    store: &S,
    ctx: &RequestContext,
    filter: &HistoryFilter,
) -> Result<Vec<ReportRow>, ServerError> {
    let Some(category) = filter.category() else {
        tracing::debug!(report = ?filter.report, "no history category selected");
        return Ok(Vec::new());
    };

    let records = store.search(category, filter)?;
    let lang = ctx.lang.as_deref();

    let mut rows: Vec<ReportRow> = records
        .iter()
        .map(|rec| build_row(rec, category, lang))
        .collect();

    // Stable: equal names keep store order.
    rows.sort_by(|a, b| a.seq.cmp(&b.seq));

    tracing::debug!(
        category = category.tag(),
        rows = rows.len(),
        "vehicle history collected"
    );
    Ok(rows)
}

fn build_row(rec: &HistoryRecord, category: HistoryCategory, lang: Option<&str>) -> ReportRow {
    let description = rec.vehicle_name().unwrap_or_default().to_string();
    let seq = format!("{description}a");

    let mut row = ReportRow {
        vehicle_type: rec.vehicle_type_name().unwrap_or_default().to_string(),
        color_id: rec.vehicle_color_name().unwrap_or_default().to_string(),
        vin: rec.vin_sn().unwrap_or_default().to_string(),
        plate: rec.license_plate().unwrap_or_default().to_string(),
        change_date: rec.changed_date.map(|d| format_date(d, lang)),
        work_order: rec.work_order_name().unwrap_or_default().to_string(),
        wo_close_date: rec.work_order_close_date().map(|d| format_date(d, lang)),
        remarks: rec.note.clone().unwrap_or_default(),
        description,
        seq,
        ..ReportRow::default()
    };

    if let Some((old, new)) = row.change_slots_mut(category) {
        *old = rec.previous_value.clone().unwrap_or_default();
        *new = rec.new_value.clone().unwrap_or_default();
    }

    row
}

/// Entry point used by the report routes: checks the launch context, resolves
/// the active document and bundles the rows for rendering.
pub fn get_report_values<S: HistoryStore + ?Sized>(
    store: &S,
    ctx: &RequestContext,
    doc_ids: &[i64],
    data: &ReportData,
) -> Result<ReportContext, ServerError> {
    let (Some(form), Some(model), Some(active_id)) =
        (data.form.as_ref(), ctx.active_model.as_deref(), ctx.active_id)
    else {
        tracing::warn!(
            has_form = data.form.is_some(),
            active_model = ?ctx.active_model,
            active_id = ?ctx.active_id,
            "vehicle history report rejected"
        );
        return Err(ServerError::MissingContext);
    };

    let doc = store.browse(model, active_id)?;
    let rows = get_vehicle_history(store, ctx, form)?;

    Ok(ReportContext {
        doc_ids: doc_ids.to_vec(),
        doc_model: model.to_string(),
        data: form.clone(),
        docs: vec![doc],
        printed_at: ctx.now,
        rows,
    })
}
