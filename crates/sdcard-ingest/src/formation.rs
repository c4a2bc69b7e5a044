//! Formation diagram decoding.
//!
//! A diagram looks like
//!
//! ```text
//!       2B>
//! 1B<   4G<   1G>
//! 3G<   2G>   3B<
//!       4B<
//! ```
//!
//! Every facing glyph is preceded by the two-character label of the dancer
//! standing there.

use std::collections::BTreeMap;

use sdcard_model::{Dancer, Facing, Formation, Position};
use tracing::warn;

/// Decodes a diagram into a formation.
///
/// Returns `None` if the lines contain no dancers, or if only some of the
/// eight dancers could be located.
pub fn decode_formation<S: AsRef<str>>(lines: &[S]) -> Option<Formation> {
    let mut positions = BTreeMap::new();
    for (row, line) in lines.iter().enumerate() {
        let chars: Vec<char> = line.as_ref().chars().collect();
        for (col, glyph) in chars.iter().enumerate() {
            let Some(facing) = Facing::from_glyph(*glyph) else {
                continue;
            };
            if col < 2 {
                continue;
            }
            let label: String = chars[col - 2..col].iter().collect();
            let Some(dancer) = Dancer::from_label(&label) else {
                continue;
            };
            positions.insert(dancer, Position { facing, row, col });
        }
    }

    if positions.is_empty() {
        return None;
    }
    let formation = Formation::from_positions(&positions);
    if formation.is_none() {
        warn!(
            found = positions.len(),
            missing = %missing_dancers(&positions),
            "discarding partial formation diagram"
        );
    }
    formation
}

fn missing_dancers(positions: &BTreeMap<Dancer, Position>) -> String {
    Dancer::ALL
        .iter()
        .filter(|dancer| !positions.contains_key(*dancer))
        .map(Dancer::as_str)
        .collect::<Vec<_>>()
        .join(",")
}
