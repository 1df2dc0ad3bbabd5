use std::num::NonZeroUsize;

use syncliked::utils::*;

#[test]
fn test_generate_state() {
    let state = generate_state();

    // Should be exactly 32 characters
    assert_eq!(state.len(), 32);

    // Should contain only alphanumeric characters
    assert!(state.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated values should be different
    assert_ne!(state, generate_state());
}

#[test]
fn test_parse_song_limit() {
    assert_eq!(parse_song_limit("10"), Ok(NonZeroUsize::new(10).unwrap()));
    assert_eq!(parse_song_limit(" 250 "), Ok(NonZeroUsize::new(250).unwrap()));

    // Zero and negative values are not a usable limit
    assert!(parse_song_limit("0").is_err());
    assert!(parse_song_limit("-5").is_err());
    assert!(parse_song_limit("ten").is_err());
    assert!(parse_song_limit("").is_err());
}

#[test]
fn test_batch_count() {
    assert_eq!(batch_count(0, 100), 0);
    assert_eq!(batch_count(1, 100), 1);
    assert_eq!(batch_count(100, 100), 1);
    assert_eq!(batch_count(250, 100), 3);
}
