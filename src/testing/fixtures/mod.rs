mod play_tennis;

pub use play_tennis::{PLAY_TENNIS_CSV, play_tennis};

use crate::core::Record;

pub fn record(pairs: &[(&str, &str)]) -> Record {
    Record::from_pairs(pairs.iter().copied())
}
