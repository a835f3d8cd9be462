use crate::domain::{HistoryCategory, HistoryFilter, Vehicle};
use crate::templates::{components::card, desktop_layout};
use maud::{html, Markup};

/// Model name the wizard reports itself as when it launches a report.
pub const WIZARD_MODEL: &str = "fleet.vehicle.change.history";

pub struct WizardVm {
    pub vehicles: Vec<Vehicle>,
    /// Previous form values, so the wizard can be reopened pre-filled.
    pub filter: HistoryFilter,
    pub active_model: String,
    pub active_id: i64,
    pub lang: Option<String>,
}

pub fn history_wizard_page(vm: &WizardVm) -> Markup {
    let selected = vm.filter.category();

    desktop_layout(
        "Vehicle Change History",
        html! {
            main class="container" {
                (card("Vehicle Change History", html! {
                    form action="/reports/vehicle-history" method="get" {
                        input type="hidden" name="active_model" value=(vm.active_model);
                        input type="hidden" name="active_id" value=(vm.active_id);
                        @if let Some(lang) = &vm.lang {
                            input type="hidden" name="lang" value=(lang);
                        }

                        label for="report" { "Report" }
                        select name="report" id="report" required {
                            option value="" disabled selected[selected.is_none()] { "Select a history..." }
                            @for category in HistoryCategory::ALL {
                                option value=(category.tag()) selected[selected == Some(category)] { (category.label()) }
                            }
                        }

                        label for="fleet_id" { "Vehicle" }
                        select name="fleet_id" id="fleet_id" {
                            option value="" selected[vm.filter.fleet_id.is_none()] { "All vehicles" }
                            @for vehicle in &vm.vehicles {
                                option value=(vehicle.id) selected[vm.filter.fleet_id == Some(vehicle.id)] {
                                    (vehicle.name)
                                    @if let Some(plate) = &vehicle.license_plate {
                                        " (" (plate) ")"
                                    }
                                }
                            }
                        }

                        label for="date_from" { "Date From" }
                        input type="date" name="date_from" id="date_from"
                            value=[vm.filter.date_from.map(|d| d.to_string())];

                        label for="date_to" { "Date To" }
                        input type="date" name="date_to" id="date_to"
                            value=[vm.filter.date_to.map(|d| d.to_string())];

                        p {
                            button type="submit" { "Print" }
                            " "
                            button type="submit" formaction="/reports/vehicle-history.xlsx" { "Export XLSX" }
                        }
                    }
                }))
            }
        },
    )
}
