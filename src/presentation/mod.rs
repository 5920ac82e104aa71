pub mod detail;
pub mod style;
