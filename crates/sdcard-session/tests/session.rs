//! Scheduler behaviour over a small library.

use chrono::NaiveDateTime;
use proptest::prelude::*;
use sdcard_model::{Call, Level, Metadata, MetadataCatalog, Sequence, SequenceId, StackId, TagId, score};
use sdcard_query::{Query, parse_query};
use sdcard_session::{Distribution, Session};

const TWO_SEQUENCES: &str = include_str!("../../sdcard-ingest/tests/data/two_sequences.txt");

fn sequence(level: Level, calls: usize) -> Sequence {
    Sequence {
        id: SequenceId::generate(),
        date: NaiveDateTime::default(),
        version: String::new(),
        level,
        comment: String::new(),
        calls: (0..calls).map(|_| Call::new("swing thru")).collect(),
        metadata: Metadata::default(),
    }
}

fn library() -> Vec<Sequence> {
    vec![
        sequence(Level::Plus, 1),
        sequence(Level::A1, 2),
        sequence(Level::Plus, 3),
        sequence(Level::Plus, 4),
        sequence(Level::A1, 5),
    ]
}

fn query(text: &str) -> Query {
    parse_query(text, &MetadataCatalog::with_defaults()).unwrap()
}

#[test]
fn filter_init_keeps_library_order() {
    let sequences = library();
    let mut session = Session::new();
    let plus = session.add_stack("plus", query("level: plus"));
    let everything = session.add_stack("everything", Query::default());

    assert!(!session.ongoing());
    session.init(&sequences);
    assert!(session.ongoing());

    let ids = |indices: &[usize]| -> Vec<SequenceId> {
        indices.iter().map(|i| sequences[*i].id.clone()).collect()
    };
    assert_eq!(session.stack(&plus).unwrap().sequences, ids(&[0, 2, 3]));
    assert_eq!(
        session.stack(&everything).unwrap().sequences,
        ids(&[0, 1, 2, 3, 4])
    );
}

#[test]
fn pull_and_push_walk_the_cursor() {
    let sequences = library();
    let mut session = Session::new();
    let plus = session.add_stack("plus", query("level: plus"));
    let other = session.add_stack("a1", query("level: a1"));
    session.init(&sequences);

    assert_eq!(session.top_of(&other), Some(&sequences[1].id));
    assert_eq!(session.pull_from(&other), Some(sequences[1].id.clone()));
    assert_eq!(session.active().unwrap().id, other);
    assert_eq!(session.current(), Some(&sequences[1].id));

    assert_eq!(session.pull_from(&plus), Some(sequences[0].id.clone()));
    assert_eq!(session.active().unwrap().id, plus);
    assert_eq!(session.push_to(&plus), Some(sequences[0].id.clone()));
    assert_eq!(session.stack(&plus).unwrap().index, 0);
    assert_eq!(session.push_to(&plus), None);

    session.pull_from(&other);
    assert_eq!(session.pull_from(&other), None);
    assert_eq!(session.stack(&other).unwrap().index, 2);

    let unknown = StackId::new("nope").unwrap();
    assert_eq!(session.pull_from(&unknown), None);
    assert_eq!(session.push_to(&unknown), None);
}

#[test]
fn stop_empties_stacks_but_keeps_definitions() {
    let sequences = library();
    let mut session = Session::new();
    let id = session.add_stack("plus", query("level: plus"));
    session.init(&sequences);
    session.pull_from(&id);
    session.stop();
    assert!(!session.ongoing());
    let stack = session.stack(&id).unwrap();
    assert_eq!(stack.index, 0);
    assert_eq!(stack.query, query("level: plus"));
}

#[test]
fn balanced_distribution_assigns_each_sequence_once() {
    let sequences = library();
    let mut session = Session::new();
    session.distribution = Distribution::Balanced;
    let first = session.add_stack("first", Query::default());
    let second = session.add_stack("second", Query::default());
    let a1 = session.add_stack("a1 only", query("level: a1"));
    session.init(&sequences);

    let first = &session.stack(&first).unwrap().sequences;
    let second = &session.stack(&second).unwrap().sequences;
    let a1 = &session.stack(&a1).unwrap().sequences;

    // 0 -> first, 1 -> second (tied with the a1 stack, declared earlier),
    // 2 -> first, 3 -> second, 4 -> a1.
    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 2);
    assert_eq!(a1, &vec![sequences[4].id.clone()]);

    let mut all: Vec<_> = first.iter().chain(second).chain(a1).cloned().collect();
    all.sort();
    let mut expected: Vec<_> = sequences.iter().map(|s| s.id.clone()).collect();
    expected.sort();
    assert_eq!(all, expected);
}

#[test]
fn balanced_stack_alternates_scores() {
    let sequences: Vec<Sequence> = (1..=4).map(|calls| sequence(Level::Plus, calls)).collect();
    let mut session = Session::new();
    session.distribution = Distribution::Balanced;
    let id = session.add_stack("all", Query::default());
    session.init(&sequences);

    // Scores 2, 4, 6, 8: lower half walked upwards, then upper half.
    let expected: Vec<_> = [0, 2, 1, 3].iter().map(|i| sequences[*i].id.clone()).collect();
    assert_eq!(session.stack(&id).unwrap().sequences, expected);
}

#[test]
fn advancing_applies_auto_tag_to_the_sequence_left() {
    let sequences = library();
    let mut session = Session::new();
    session.auto_tag = Some(TagId::new("@1").unwrap());
    let id = session.add_stack("plus", query("level: plus"));
    session.init(&sequences);

    let mut tagged = Vec::new();
    session.advance(&id, |sequence, tag| tagged.push((sequence.clone(), tag.clone())));
    assert!(tagged.is_empty());
    session.advance(&id, |sequence, tag| tagged.push((sequence.clone(), tag.clone())));
    assert_eq!(
        tagged,
        vec![(sequences[0].id.clone(), TagId::new("@1").unwrap())]
    );
}

#[test]
fn retain_drops_deleted_sequences() {
    let sequences = library();
    let mut session = Session::new();
    let id = session.add_stack("plus", query("level: plus"));
    session.init(&sequences);
    session.pull_from(&id);
    session.pull_from(&id);

    let deleted = sequences[0].id.clone();
    session.retain_sequences(|sequence| *sequence != deleted);
    let stack = session.stack(&id).unwrap();
    assert_eq!(stack.sequences.len(), 2);
    assert_eq!(stack.index, 1);
    assert_eq!(stack.top(), Some(&sequences[3].id));
}

#[test]
fn session_survives_json() {
    let sequences = library();
    let mut session = Session::new();
    let id = session.add_stack("plus", query("-level: a1"));
    session.init(&sequences);
    session.pull_from(&id);

    let json = serde_json::to_string(&session).unwrap();
    let back: Session = serde_json::from_str(&json).unwrap();
    assert_eq!(back, session);
}

#[test]
fn parsed_transcript_scores_and_schedules() {
    let sequences = sdcard_ingest::parse_transcript(TWO_SEQUENCES);
    assert_eq!(sequences.len(), 2);
    let (a, b) = (&sequences[0], &sequences[1]);
    assert_eq!(a.calls.len(), 3);
    assert_eq!(b.calls.len(), 2);
    assert_eq!(b.calls[1].warnings.len(), 1);
    assert!(b.calls[1].rotated45);
    assert!(score(a) < score(b));

    let mut session = Session::new();
    let id = session.add_stack("all", Query::default());
    session.init(&sequences);
    assert_eq!(session.pull_from(&id), Some(a.id.clone()));
    assert_eq!(session.pull_from(&id), Some(b.id.clone()));
    assert_eq!(session.pull_from(&id), None);
}

#[derive(Debug, Clone)]
enum Step {
    Pull(usize),
    Push(usize),
    Init,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0usize..3).prop_map(Step::Pull),
        (0usize..3).prop_map(Step::Push),
        Just(Step::Init),
    ]
}

proptest! {
    #[test]
    fn cursor_stays_in_bounds(
        steps in prop::collection::vec(step(), 0..60),
        balanced in any::<bool>(),
    ) {
        let sequences = library();
        let mut session = Session::new();
        if balanced {
            session.distribution = Distribution::Balanced;
        }
        let ids = [
            session.add_stack("plus", query("level: plus")),
            session.add_stack("a1", query("level: a1")),
            session.add_stack("all", Query::default()),
        ];
        session.init(&sequences);

        for step in steps {
            match step {
                Step::Pull(stack) => {
                    session.pull_from(&ids[stack]);
                }
                Step::Push(stack) => {
                    session.push_to(&ids[stack]);
                }
                Step::Init => session.init(&sequences),
            }
            for stack in session.stacks() {
                prop_assert!(stack.index <= stack.sequences.len());
            }
        }
    }

    #[test]
    fn pull_then_push_is_identity(pulls in 0usize..6) {
        let sequences = library();
        let mut session = Session::new();
        let id = session.add_stack("all", Query::default());
        session.init(&sequences);
        for _ in 0..pulls {
            session.pull_from(&id);
        }
        let index = session.stack(&id).unwrap().index;
        let top = session.top_of(&id).cloned();
        if session.pull_from(&id).is_some() {
            session.push_to(&id);
        }
        prop_assert_eq!(session.stack(&id).unwrap().index, index);
        prop_assert_eq!(session.top_of(&id).cloned(), top);
    }
}
