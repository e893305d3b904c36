pub mod holdings;
pub mod returns;
pub mod setup;
pub mod ui;
