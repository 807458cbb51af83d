pub mod app;
pub mod config;
pub mod credits;
pub mod error;
pub mod exercises;
pub mod generation;
pub mod images;
pub mod nutrition;
pub mod plans;
pub mod preferences;
pub mod state;
pub mod storage;
pub mod upstream;

#[cfg(test)]
pub mod testing;
