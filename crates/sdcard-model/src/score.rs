//! Difficulty/weirdness heuristic used to interleave review stacks.
//!
//! The weights are empirical; changing them changes review order.

use crate::Sequence;

const NOTES: [&str; 3] = ["hard", "very hard", "weird"];

/// Scores a sequence. Higher means harder or stranger.
///
/// A sequence without calls scores 0.
pub fn score(sequence: &Sequence) -> f64 {
    let calls = &sequence.calls;
    if calls.is_empty() {
        return 0.0;
    }
    let count = calls.len() as f64;

    let mut score = 2.0 * count;

    let commented = calls.iter().filter(|call| !call.comment.is_empty()).count();
    score += 3.0 * commented as f64 / count;

    let longest_comment = calls
        .iter()
        .map(|call| call.comment.chars().count())
        .max()
        .unwrap_or(0);
    score += longest_comment as f64 / 10.0;

    let shouted = calls
        .iter()
        .filter(|call| call.call.to_lowercase() != call.call)
        .count();
    score += 5.0 * shouted as f64 / count;

    if sequence.has_rotated_formation() {
        score += 5.0;
    }

    score += 2.0 * sequence.warning_count() as f64;

    let comment = sequence.comment.to_lowercase();
    for note in NOTES {
        if comment.contains(note) {
            score *= 1.5;
        }
    }
    score
}
