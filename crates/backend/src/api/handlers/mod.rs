pub mod d100_b2c_overview;
