pub mod add;
pub mod dashboard;
pub mod edit;
pub mod export;
pub mod list;
pub mod remove;
pub mod report;
