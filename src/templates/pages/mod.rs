pub mod history_wizard;
pub mod vehicle_history;

pub use history_wizard::{history_wizard_page, WizardVm, WIZARD_MODEL};
pub use vehicle_history::vehicle_history_page;
