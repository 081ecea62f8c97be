pub mod brand_table;
pub mod dashboard;
pub mod filter_bar;

pub use dashboard::B2cOverviewDashboard;
