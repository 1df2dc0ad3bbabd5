use std::num::NonZeroUsize;

use rand::{Rng, distr::Alphanumeric};

pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Parses the `--limit` flag: a positive number of songs.
pub fn parse_song_limit(value: &str) -> Result<NonZeroUsize, String> {
    let limit: usize = value
        .trim()
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    NonZeroUsize::new(limit).ok_or_else(|| "song limit must be greater than zero".to_string())
}

/// Number of append requests needed for `count` tracks.
pub fn batch_count(count: usize, batch_size: usize) -> usize {
    count.div_ceil(batch_size)
}
