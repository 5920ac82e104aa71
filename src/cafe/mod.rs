pub mod cafe;
pub mod directory;
pub mod region;
