//! Matching behaviour of full queries against sequences.

use chrono::NaiveDateTime;
use proptest::prelude::*;
use sdcard_model::{Call, CategoryId, Level, Metadata, MetadataCatalog, Sequence, SequenceId, TagId};
use sdcard_query::{CategoryRef, OptionValue, PartialKind, Query, SearchOption, parse_query};

fn sequence(level: Level, calls: usize, metadata: Metadata) -> Sequence {
    Sequence {
        id: SequenceId::generate(),
        date: NaiveDateTime::default(),
        version: "Sd 39.45".to_string(),
        level,
        comment: String::new(),
        calls: (0..calls).map(|_| Call::new("swing thru")).collect(),
        metadata,
    }
}

fn difficulty() -> CategoryRef {
    CategoryRef {
        id: CategoryId::new("difficulty").unwrap(),
        name: "difficulty".to_string(),
    }
}

fn hard_and_weird() -> Metadata {
    let mut metadata = Metadata::default();
    metadata.set_option(CategoryId::new("difficulty").unwrap(), "hard");
    metadata.add_tag(TagId::new("weird").unwrap());
    metadata
}

#[test]
fn each_kind_matches() {
    let s = sequence(Level::Plus, 3, hard_and_weird());
    let catalog = MetadataCatalog::with_defaults();

    for (text, expected) in [
        ("difficulty: hard", true),
        ("difficulty: easy", false),
        ("tag: weird", true),
        ("tag: @1", false),
        ("level: plus", true),
        ("level: a1", false),
        // three plain calls score 6
        ("maxscore: 10", true),
        ("maxscore: 5", false),
        ("-tag: @1", true),
    ] {
        let query = parse_query(text, &catalog).unwrap();
        assert_eq!(query.pass(&s), expected, "{text}");
    }
}

#[test]
fn unassigned_category_fails_unless_negated() {
    let s = sequence(Level::Plus, 1, Metadata::default());
    let option = OptionValue::Category {
        negated: false,
        category: difficulty(),
        option: "hard".to_string(),
    };
    assert!(!SearchOption::make(option.clone()).pass(&s));
    assert!(SearchOption::make(option.with_negated(true)).pass(&s));
}

#[test]
fn queries_are_conjunctions() {
    let catalog = MetadataCatalog::with_defaults();
    let s = sequence(Level::Plus, 3, hard_and_weird());
    assert!(parse_query("tag: weird, level: plus", &catalog).unwrap().pass(&s));
    assert!(!parse_query("tag: weird, level: a2", &catalog).unwrap().pass(&s));
    assert!(Query::default().pass(&s));
}

#[test]
fn partial_only_query_passes_everything() {
    let query = Query::new(vec![
        SearchOption::partial(PartialKind::Tag, true),
        SearchOption::partial(PartialKind::Negation, true),
        SearchOption::partial(PartialKind::Category(difficulty()), false),
    ]);
    assert!(query.pass(&sequence(Level::C4, 0, Metadata::default())));
    assert!(query.pass(&sequence(Level::Plus, 2, hard_and_weird())));
}

#[test]
fn filter_keeps_source_order() {
    let catalog = MetadataCatalog::with_defaults();
    let sequences = vec![
        sequence(Level::Plus, 1, Metadata::default()),
        sequence(Level::A1, 1, Metadata::default()),
        sequence(Level::Plus, 2, Metadata::default()),
    ];
    let query = parse_query("level: plus", &catalog).unwrap();
    let kept: Vec<_> = query.filter(&sequences).map(|s| s.id.clone()).collect();
    assert_eq!(kept, vec![sequences[0].id.clone(), sequences[2].id.clone()]);
}

#[test]
fn stored_query_round_trips_through_json() {
    let catalog = MetadataCatalog::with_defaults();
    let query = parse_query("-difficulty: easy, tag: weird, maxscore: 35", &catalog).unwrap();
    let json = serde_json::to_string(&query).unwrap();
    let back: Query = serde_json::from_str(&json).unwrap();
    assert_eq!(back, query);
    assert_eq!(back.options()[0].label, "-difficulty: easy");
}

fn full_option() -> impl Strategy<Value = OptionValue> {
    let level = prop::sample::select(Level::ALL.to_vec())
        .prop_map(|level| OptionValue::Level { negated: false, level });
    let tag = prop::sample::select(vec!["weird", "@1"]).prop_map(|name| OptionValue::Tag {
        negated: false,
        tag: TagId::new(name).unwrap(),
        name: name.to_string(),
    });
    let category = prop::sample::select(vec!["easy", "medium", "hard"]).prop_map(|option| {
        OptionValue::Category {
            negated: false,
            category: difficulty(),
            option: option.to_string(),
        }
    });
    let max_score = (0u32..40).prop_map(|threshold| OptionValue::MaxScore {
        negated: false,
        threshold,
    });
    prop_oneof![level, tag, category, max_score]
}

fn any_sequence() -> impl Strategy<Value = Sequence> {
    (
        prop::sample::select(Level::ALL.to_vec()),
        0usize..12,
        any::<bool>(),
        prop::option::of(prop::sample::select(vec!["easy", "medium", "hard"])),
    )
        .prop_map(|(level, calls, weird, difficulty)| {
            let mut metadata = Metadata::default();
            if weird {
                metadata.add_tag(TagId::new("weird").unwrap());
            }
            if let Some(option) = difficulty {
                metadata.set_option(CategoryId::new("difficulty").unwrap(), option);
            }
            sequence(level, calls, metadata)
        })
}

proptest! {
    #[test]
    fn negation_inverts_exactly_one_option(value in full_option(), s in any_sequence()) {
        let plain = SearchOption::make(value.clone().with_negated(false));
        let negated = SearchOption::make(value.with_negated(true));
        prop_assert_eq!(negated.pass(&s), !plain.pass(&s));
    }

    #[test]
    fn query_is_and_of_full_options(
        values in prop::collection::vec(full_option(), 0..5),
        negations in prop::collection::vec(any::<bool>(), 5),
        with_partial in any::<bool>(),
        s in any_sequence(),
    ) {
        let mut options: Vec<SearchOption> = values
            .into_iter()
            .zip(negations)
            .map(|(value, negated)| SearchOption::make(value.with_negated(negated)))
            .collect();
        let expected = options.iter().all(|option| option.pass(&s));
        if with_partial {
            options.push(SearchOption::partial(PartialKind::Level, true));
        }
        prop_assert_eq!(Query::new(options).pass(&s), expected);
    }
}
