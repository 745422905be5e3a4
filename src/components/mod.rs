pub mod season_background;
