pub mod analytics;
pub mod charts;
pub mod common;
pub mod dashboard;
pub mod export_menu;
pub mod layout;
pub mod search_palette;
pub mod transactions;
