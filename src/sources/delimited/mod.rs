mod delimited_source;
mod parser;

pub use delimited_source::{DelimitedSource, load_dataset};
