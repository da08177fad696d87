pub mod delimited;

pub use delimited::{DelimitedSource, load_dataset};
