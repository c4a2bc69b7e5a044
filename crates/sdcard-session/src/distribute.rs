//! Balanced distribution of one corpus over several stacks.

use sdcard_model::{Sequence, SequenceId, score};

use crate::stack::Stack;

/// Assigns every sequence to one matching stack and orders each stack so
/// harder and easier sequences alternate.
///
/// A sequence goes to the matching stack that currently holds the fewest
/// sequences; ties go to the stack declared first. Sequences no stack
/// matches are dropped.
pub fn distribute<'a>(
    sequences: impl IntoIterator<Item = &'a Sequence>,
    stacks: &[&Stack],
) -> Vec<Vec<SequenceId>> {
    let mut buckets: Vec<Vec<(SequenceId, f64)>> = vec![Vec::new(); stacks.len()];
    for sequence in sequences {
        let target = stacks
            .iter()
            .enumerate()
            .filter(|(_, stack)| stack.query.pass(sequence))
            .min_by_key(|(position, _)| (buckets[*position].len(), *position))
            .map(|(position, _)| position);
        if let Some(position) = target {
            buckets[position].push((sequence.id.clone(), score(sequence)));
        }
    }
    buckets.into_iter().map(interleave).collect()
}

/// Orders scored items so consecutive items alternate between the lower and
/// upper half of the scores.
///
/// Items are sorted by descending score and split in two. The tail of each
/// half is taken in turn, lower half first, so each half is walked from its
/// lowest score upwards.
pub fn interleave<T>(mut items: Vec<(T, f64)>) -> Vec<T> {
    items.sort_by(|(_, left), (_, right)| right.total_cmp(left));
    let mut items: Vec<T> = items.into_iter().map(|(item, _)| item).collect();
    let mut lower = items.split_off(items.len() / 2);
    let mut upper = items;

    let mut ordered = Vec::with_capacity(lower.len() + upper.len());
    while !lower.is_empty() || !upper.is_empty() {
        ordered.extend(lower.pop());
        ordered.extend(upper.pop());
    }
    ordered
}
