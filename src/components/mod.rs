pub mod results;
pub mod standings_table;
