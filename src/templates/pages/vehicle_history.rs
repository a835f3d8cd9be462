use crate::domain::dates::format_date;
use crate::reports::ReportContext;
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub fn vehicle_history_page(report: &ReportContext, lang: Option<&str>) -> Markup {
    let category = report.category();
    let title = category
        .map(|c| c.label())
        .unwrap_or("Vehicle Change History");
    let (old_heading, new_heading) = category
        .map(|c| c.change_headings())
        .unwrap_or(("Old Value", "New Value"));

    desktop_layout(
        title,
        html! {
            main class="report" {
                h2 { (title) }
                p class="muted" {
                    "Printed on " (format_date(report.printed_at.date(), lang))
                    " " (report.printed_at.format("%H:%M"))
                }
                p {
                    @if let Some(from) = report.data.date_from {
                        "From " strong { (format_date(from, lang)) } " "
                    }
                    @if let Some(to) = report.data.date_to {
                        "To " strong { (format_date(to, lang)) }
                    }
                }

                @if category.is_none() {
                    p class="muted" { "No history category selected." }
                }

                table class="report" {
                    thead {
                        tr {
                            th { "Vehicle ID" }
                            th { "Vehicle Type" }
                            th { "Color" }
                            th { "VIN" }
                            th { "License Plate" }
                            th { (old_heading) }
                            th { (new_heading) }
                            th { "Change Date" }
                            th { "Work Order" }
                            th { "WO Close Date" }
                            th { "Remarks" }
                        }
                    }
                    tbody {
                        @for row in &report.rows {
                            @let change = category.map(|c| row.change_values(c)).unwrap_or(("", ""));
                            tr {
                                td { (row.description) }
                                td { (row.vehicle_type) }
                                td { (row.color_id) }
                                td { (row.vin) }
                                td { (row.plate) }
                                td { (change.0) }
                                td { (change.1) }
                                td { (row.change_date.as_deref().unwrap_or_default()) }
                                td { (row.work_order) }
                                td { (row.wo_close_date.as_deref().unwrap_or_default()) }
                                td { (row.remarks) }
                            }
                        }
                        @if report.rows.is_empty() {
                            tr { td colspan="11" class="muted" { "No records found." } }
                        }
                    }
                }
            }
        },
    )
}
