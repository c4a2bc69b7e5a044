//! Integration tests for transcript parsing.

use chrono::NaiveDate;
use sdcard_ingest::{FORM_FEED, decode_formation, parse_sequence, parse_transcript};
use sdcard_model::{Dancer, Facing, Level};

const TWO_SEQUENCES: &str = include_str!("data/two_sequences.txt");

#[test]
fn parses_both_sequences() {
    let sequences = parse_transcript(TWO_SEQUENCES);
    assert_eq!(sequences.len(), 2);

    let (a, b) = (&sequences[0], &sequences[1]);
    assert_eq!(a.calls.len(), 3);
    assert_eq!(b.calls.len(), 2);
    assert_eq!(a.level, Level::Plus);
    assert_eq!(b.level, Level::A1);
    assert_eq!(
        b.date,
        NaiveDate::from_ymd_opt(2023, 5, 14)
            .unwrap()
            .and_hms_opt(11, 5, 9)
            .unwrap()
    );
    assert_ne!(a.id, b.id);
}

#[test]
fn sequence_without_diagrams_or_warnings() {
    let sequences = parse_transcript(TWO_SEQUENCES);
    let a = &sequences[0];
    assert_eq!(a.comment, "");
    assert_eq!(a.calls[2].call, "first couple go left, next go right");
    for call in &a.calls {
        assert!(call.warnings.is_empty());
        assert!(call.formation.is_none());
        assert!(!call.rotated45);
        assert_eq!(call.comment, "");
    }
}

#[test]
fn warning_comment_and_rotated_diagram() {
    let sequences = parse_transcript(TWO_SEQUENCES);
    let b = &sequences[1];
    assert_eq!(b.comment, "very hard one");

    let extend = &b.calls[1];
    assert_eq!(extend.call, "extend");
    assert_eq!(extend.comment, "watch the ends");
    assert_eq!(extend.warnings.len(), 1);
    assert_eq!(
        extend.warnings[0],
        "Warning:  Do not use \"extend\" from this setup, the ends may be confused."
    );
    assert!(extend.rotated45);

    let formation = extend.formation.as_ref().expect("complete diagram");
    assert_eq!(formation.get(Dancer::B2).facing, Facing::Back);
    assert_eq!(formation.get(Dancer::G3).facing, Facing::Left);
    assert_eq!(formation.get(Dancer::B4).facing, Facing::Front);
    assert_eq!(formation.get(Dancer::G4).row, 3);
}

#[test]
fn parsing_is_deterministic_apart_from_ids() {
    let first = parse_transcript(TWO_SEQUENCES);
    let second = parse_transcript(TWO_SEQUENCES);
    for (left, right) in first.iter().zip(&second) {
        assert_ne!(left.id, right.id);
        assert_eq!(left.calls, right.calls);
        assert_eq!(left.comment, right.comment);
        assert_eq!(left.level, right.level);
        assert_eq!(left.date, right.date);
    }
}

#[test]
fn fragment_without_form_feed_is_one_sequence() {
    let single = TWO_SEQUENCES.split(FORM_FEED).next().unwrap();
    let sequences = parse_transcript(single);
    assert_eq!(sequences.len(), 1);
    assert_eq!(sequences[0].calls.len(), 3);
}

#[test]
fn trailing_form_feed_adds_nothing() {
    let text = format!("{TWO_SEQUENCES}{FORM_FEED}\n");
    assert_eq!(parse_transcript(&text).len(), 2);
}

#[test]
fn headerless_fragment_still_produces_a_sequence() {
    let sequence = parse_sequence("garbage header\nheads star thru\n");
    assert_eq!(sequence.level, Level::All);
    assert_eq!(sequence.version, "");
    assert_eq!(sequence.calls.len(), 1);
}

#[test]
fn seven_dancers_decode_to_nothing() {
    let lines = [
        "       2B^   2G^",
        "    1B>         3G<",
        "    1G>         3B<",
        "       4GV",
    ];
    assert!(decode_formation(&lines).is_none());
}

#[test]
fn partial_diagram_degrades_call_not_sequence() {
    let text = "Sat May  6 02:22:24 2023     Sd 39.45     C1\n\nswing thru\n\n       2B^   2G^\n";
    let sequences = parse_transcript(text);
    assert_eq!(sequences.len(), 1);
    assert_eq!(sequences[0].level, Level::C1);
    assert_eq!(sequences[0].calls[0].call, "swing thru");
    assert!(sequences[0].calls[0].formation.is_none());
}

#[test]
fn header_snapshot() {
    let sequences = parse_transcript(TWO_SEQUENCES);
    let b = &sequences[1];
    let summary = serde_json::json!({
        "calls": b.calls.len(),
        "comment": b.comment,
        "date": b.date,
        "level": b.level,
        "version": b.version,
    });
    insta::assert_json_snapshot!(summary, @r#"
    {
      "calls": 2,
      "comment": "very hard one",
      "date": "2023-05-14T11:05:09",
      "level": "A1",
      "version": "Sd 39.45:db39.45"
    }
    "#);
}
