pub mod classifiers;
pub mod config;
pub mod core;
pub mod evaluation;
pub mod sources;
pub mod ui;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;
