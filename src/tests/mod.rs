mod history_tests;
mod utils;
