pub mod d100_b2c_overview;

pub use d100_b2c_overview::ui::B2cOverviewDashboard;
