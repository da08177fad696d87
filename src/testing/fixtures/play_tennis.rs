use crate::core::{Dataset, Record};

/// Quinlan's 14-day "play tennis" table, label in the first column.
pub const PLAY_TENNIS_CSV: &str = "\
play-tennis,outlook,temperature,humidity,wind
no,sunny,hot,high,weak
no,sunny,hot,high,strong
yes,overcast,hot,high,weak
yes,rain,mild,high,weak
yes,rain,cool,normal,weak
no,rain,cool,normal,strong
yes,overcast,cool,normal,strong
no,sunny,mild,high,weak
yes,sunny,cool,normal,weak
yes,rain,mild,normal,weak
yes,sunny,mild,normal,strong
yes,overcast,mild,high,strong
yes,overcast,hot,normal,weak
no,rain,mild,high,strong
";

pub fn play_tennis() -> Dataset {
    let mut lines = PLAY_TENNIS_CSV.lines();
    let header: Vec<&str> = lines
        .next()
        .map(|h| h.split(',').collect())
        .unwrap_or_default();

    let records = lines
        .filter(|l| !l.trim().is_empty())
        .map(|l| Record::from_pairs(header.iter().copied().zip(l.split(','))))
        .collect();

    Dataset::new(records, "play-tennis").expect("fixture is well formed")
}
