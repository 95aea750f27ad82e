pub mod report;
pub mod setup;
pub mod snapshot;
pub mod ui;
