use crate::db::{list_vehicles, Database};
use crate::domain::HistoryFilter;
use crate::errors::ServerError;
use crate::reports::{get_report_values, ReportContext, ReportData, RequestContext};
use crate::responses::{html_response, json_response, ResultResp};
use crate::spreadsheets::export_history_xlsx;
use crate::templates::pages::{history_wizard_page, vehicle_history_page, WizardVm, WIZARD_MODEL};
use astra::Request;
use chrono::{NaiveDate, Utc};
use std::collections::HashMap;

/// Keys that belong to the wizard form; any of them present means the
/// request carries form data.
const FORM_KEYS: [&str; 4] = ["date_from", "date_to", "fleet_id", "report"];

/// Shared, read-only state handed to every request.
#[derive(Clone, Debug)]
pub struct App {
    pub db: Database,
    pub default_lang: String,
}

pub fn handle(req: Request, app: &App) -> ResultResp {
    let method = req.method().as_str();
    let path = req.uri().path();
    tracing::debug!(method, path, "request");

    match (method, path) {
        ("GET", "/") => wizard(&req, app),
        ("GET", "/reports/vehicle-history") => {
            let (report, ctx) = build_report(&req, app)?;
            html_response(vehicle_history_page(&report, ctx.lang.as_deref()))
        }
        ("GET", "/reports/vehicle-history.xlsx") => {
            let (report, _) = build_report(&req, app)?;
            export_history_xlsx(&report)
        }
        ("GET", "/reports/vehicle-history.json") => {
            let (report, _) = build_report(&req, app)?;
            json_response(&report)
        }
        _ => Err(ServerError::NotFound),
    }
}

fn wizard(req: &Request, app: &App) -> ResultResp {
    let params = parse_query(req);
    let filter = parse_filter(&params)?.unwrap_or_default();

    let vm = WizardVm {
        vehicles: list_vehicles(&app.db)?,
        filter,
        active_model: params
            .get("active_model")
            .filter(|m| !m.is_empty())
            .cloned()
            .unwrap_or_else(|| WIZARD_MODEL.to_string()),
        active_id: parse_id(&params, "active_id")?.unwrap_or(1),
        lang: params.get("lang").filter(|l| !l.is_empty()).cloned(),
    };

    html_response(history_wizard_page(&vm))
}

fn build_report(req: &Request, app: &App) -> Result<(ReportContext, RequestContext), ServerError> {
    let params = parse_query(req);
    let ctx = request_context(req, &params, &app.default_lang)?;
    let data = ReportData {
        form: parse_filter(&params)?,
    };
    let doc_ids = parse_doc_ids(&params)?;

    let report = get_report_values(&app.db, &ctx, &doc_ids, &data)?;
    Ok((report, ctx))
}

fn request_context(
    req: &Request,
    params: &HashMap<String, String>,
    default_lang: &str,
) -> Result<RequestContext, ServerError> {
    let lang = params
        .get("lang")
        .filter(|l| !l.is_empty())
        .cloned()
        .or_else(|| accept_language(req))
        .unwrap_or_else(|| default_lang.to_string());

    Ok(RequestContext {
        lang: Some(lang),
        active_model: params.get("active_model").filter(|m| !m.is_empty()).cloned(),
        active_id: parse_id(params, "active_id")?,
        now: Utc::now().naive_utc(),
    })
}

/// First tag of `Accept-Language`, as `xx_YY`.
fn accept_language(req: &Request) -> Option<String> {
    let header = req.headers().get("Accept-Language")?.to_str().ok()?;
    header
        .split(',')
        .next()
        .map(|tag| tag.split(';').next().unwrap_or_default().trim())
        .filter(|tag| !tag.is_empty() && *tag != "*")
        .map(|tag| tag.replace('-', "_"))
}

/// `None` when no form key is present at all; empty values count as absent
/// bounds.
pub fn parse_filter(params: &HashMap<String, String>) -> Result<Option<HistoryFilter>, ServerError> {
    if !FORM_KEYS.iter().any(|k| params.contains_key(*k)) {
        return Ok(None);
    }

    Ok(Some(HistoryFilter {
        date_from: parse_date(params, "date_from")?,
        date_to: parse_date(params, "date_to")?,
        fleet_id: parse_id(params, "fleet_id")?,
        report: params.get("report").filter(|r| !r.is_empty()).cloned(),
    }))
}

fn parse_date(params: &HashMap<String, String>, key: &str) -> Result<Option<NaiveDate>, ServerError> {
    match params.get(key).map(|v| v.trim()).filter(|v| !v.is_empty()) {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|e| ServerError::BadRequest(format!("{key} '{raw}' is not a date: {e}"))),
        None => Ok(None),
    }
}

fn parse_id(params: &HashMap<String, String>, key: &str) -> Result<Option<i64>, ServerError> {
    match params.get(key).map(|v| v.trim()).filter(|v| !v.is_empty()) {
        Some(raw) => raw
            .parse::<i64>()
            .map(Some)
            .map_err(|_| ServerError::BadRequest(format!("{key} '{raw}' is not an id"))),
        None => Ok(None),
    }
}

fn parse_doc_ids(params: &HashMap<String, String>) -> Result<Vec<i64>, ServerError> {
    let Some(raw) = params.get("doc_ids") else {
        return Ok(Vec::new());
    };
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .map_err(|_| ServerError::BadRequest(format!("doc_ids '{raw}' is not a list of ids")))
        })
        .collect()
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .into_owned()
                .collect()
        })
        .unwrap_or_default()
}
