pub mod api;
pub mod browser;
pub mod charts;
pub mod controller;
pub mod ui;
