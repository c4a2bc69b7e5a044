//! Plain text rendering of a single sequence.

use std::fmt::Write;

use sdcard_model::{Formation, MetadataCatalog, Sequence, score};

/// Redraws a formation the way the transcript printed it.
pub fn render_formation(formation: &Formation) -> Vec<String> {
    let mut rows: Vec<Vec<char>> = vec![Vec::new(); formation.height()];
    for (dancer, position) in formation.iter() {
        let row = &mut rows[position.row];
        if row.len() <= position.col {
            row.resize(position.col + 1, ' ');
        }
        let start = position.col.saturating_sub(2);
        for (offset, ch) in dancer.as_str().chars().enumerate() {
            if let Some(cell) = row.get_mut(start + offset) {
                *cell = ch;
            }
        }
        row[position.col] = position.facing.glyph();
    }
    rows.into_iter()
        .map(|row| row.into_iter().collect::<String>().trim_end().to_string())
        .collect()
}

/// Header, metadata and every call with its comment, warnings and diagram.
pub fn describe_sequence(sequence: &Sequence, catalog: &MetadataCatalog) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}  {}  {}  score {:.1}",
        sequence.date.format("%Y-%m-%d %H:%M:%S"),
        sequence.level,
        sequence.version,
        score(sequence)
    );
    if !sequence.comment.is_empty() {
        let _ = writeln!(out, "comment: {}", sequence.comment);
    }
    for (category, option) in &sequence.metadata.categories {
        let name = catalog
            .category(category)
            .map_or(category.as_str(), |category| category.name.as_str());
        let _ = writeln!(out, "{name}: {option}");
    }
    if !sequence.metadata.tags.is_empty() {
        let names: Vec<&str> = sequence
            .metadata
            .tags
            .iter()
            .map(|tag| catalog.tag(tag).map_or(tag.as_str(), |tag| tag.name.as_str()))
            .collect();
        let _ = writeln!(out, "tags: {}", names.join(", "));
    }

    for (number, call) in sequence.calls.iter().enumerate() {
        out.push('\n');
        if call.comment.is_empty() {
            let _ = writeln!(out, "{:>3}. {}", number + 1, call.call);
        } else {
            let _ = writeln!(out, "{:>3}. {{ {} }} {}", number + 1, call.comment, call.call);
        }
        for warning in &call.warnings {
            let _ = writeln!(out, "     {warning}");
        }
        if let Some(formation) = &call.formation {
            for line in render_formation(formation) {
                let _ = writeln!(out, "     {line}");
            }
        }
        if call.rotated45 {
            let _ = writeln!(out, "     (rotated 45 degrees)");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdcard_ingest::decode_formation;

    #[test]
    fn formation_redraws_its_diagram() {
        let lines = [
            "       2B^   2G^",
            "    1B>         3G<",
            "    1G>         3B<",
            "       4GV   4BV",
        ];
        let formation = decode_formation(&lines).unwrap();
        assert_eq!(render_formation(&formation), lines.map(String::from).to_vec());
    }

    #[test]
    fn describes_a_parsed_sequence() {
        let text = include_str!("../../sdcard-ingest/tests/data/two_sequences.txt");
        let sequences = sdcard_ingest::parse_transcript(text);
        let catalog = MetadataCatalog::with_defaults();
        let mut sequence = sequences[1].clone();
        sequence
            .metadata
            .add_tag(catalog.tag_by_name("weird").unwrap().id.clone());
        let text = describe_sequence(&sequence, &catalog);
        insta::assert_snapshot!(text.trim_end(), @r#"
        2023-05-14 11:05:09  A1  Sd 39.45:db39.45  score 31.3
        comment: very hard one
        tags: weird

          1. heads pass the ocean

          2. { watch the ends } extend
             Warning:  Do not use "extend" from this setup, the ends may be confused.
                    2B^   2G^
                 1B>         3G<
                 1G>         3B<
                    4GV   4BV
             (rotated 45 degrees)
        "#);
    }
}
