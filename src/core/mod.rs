pub mod dataset;
pub mod error;
pub mod record;

pub use dataset::{Dataset, partition_by};
pub use error::Id3Error;
pub use record::Record;
