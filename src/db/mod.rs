pub mod connection;
pub mod history;
pub mod vehicles;

pub use connection::{init_db, Database};
pub use history::{HistoryStore, VEHICLE_MODEL};
pub use vehicles::list_vehicles;
