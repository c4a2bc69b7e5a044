//! Search options.
//!
//! There are two kinds of options. Partial ones are incomplete, like `tag:`,
//! and only drive autocomplete. Full ones, like `tag: weird`, narrow a
//! search. Every option carries its own negation flag.

use serde::{Deserialize, Serialize};

use sdcard_model::{CategoryId, Level, Sequence, TagId, score};

pub const LEVEL_TOKEN: &str = "level:";
pub const TAG_TOKEN: &str = "tag:";
pub const MAX_SCORE_TOKEN: &str = "maxscore:";
pub const NEGATION_TOKEN: &str = "-";

/// A category together with the name used in labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: CategoryId,
    pub name: String,
}

/// What an incomplete option is waiting for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PartialKind {
    /// The bare `-` that negates whatever is chosen next.
    Negation,
    Category(CategoryRef),
    Level,
    Tag,
    MaxScore,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum OptionValue {
    Partial {
        negated: bool,
        #[serde(flatten)]
        kind: PartialKind,
    },
    Category {
        negated: bool,
        category: CategoryRef,
        option: String,
    },
    Tag {
        negated: bool,
        tag: TagId,
        name: String,
    },
    Level {
        negated: bool,
        level: Level,
    },
    MaxScore {
        negated: bool,
        threshold: u32,
    },
}

impl OptionValue {
    pub fn negated(&self) -> bool {
        match self {
            OptionValue::Partial { negated, .. }
            | OptionValue::Category { negated, .. }
            | OptionValue::Tag { negated, .. }
            | OptionValue::Level { negated, .. }
            | OptionValue::MaxScore { negated, .. } => *negated,
        }
    }

    /// The same option with the negation flag replaced.
    pub fn with_negated(mut self, value: bool) -> Self {
        match &mut self {
            OptionValue::Partial { negated, .. }
            | OptionValue::Category { negated, .. }
            | OptionValue::Tag { negated, .. }
            | OptionValue::Level { negated, .. }
            | OptionValue::MaxScore { negated, .. } => *negated = value,
        }
        self
    }

    /// Renders the lowercase label that identifies this option.
    pub fn label(&self) -> String {
        let mut label = String::new();
        if self.negated() {
            label.push_str(NEGATION_TOKEN);
        }
        match self {
            OptionValue::Partial { kind, .. } => match kind {
                PartialKind::Negation => {}
                PartialKind::Category(category) => {
                    label.push_str(&category.name);
                    label.push(':');
                }
                PartialKind::Level => label.push_str(LEVEL_TOKEN),
                PartialKind::Tag => label.push_str(TAG_TOKEN),
                PartialKind::MaxScore => label.push_str(MAX_SCORE_TOKEN),
            },
            OptionValue::Category {
                category, option, ..
            } => {
                label.push_str(&format!("{}: {option}", category.name));
            }
            OptionValue::Tag { name, .. } => label.push_str(&format!("{TAG_TOKEN} {name}")),
            OptionValue::Level { level, .. } => {
                label.push_str(&format!("{LEVEL_TOKEN} {level}"));
            }
            OptionValue::MaxScore { threshold, .. } => {
                label.push_str(&format!("{MAX_SCORE_TOKEN} {threshold:02}"));
            }
        }
        label.to_lowercase()
    }
}

/// An option and its label.
///
/// The label is derived from the value and is what keyboard input is
/// matched against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "OptionValue", into = "OptionValue")]
pub struct SearchOption {
    pub label: String,
    pub value: OptionValue,
}

impl From<OptionValue> for SearchOption {
    fn from(value: OptionValue) -> Self {
        Self::make(value)
    }
}

impl From<SearchOption> for OptionValue {
    fn from(option: SearchOption) -> Self {
        option.value
    }
}

impl SearchOption {
    pub fn make(value: OptionValue) -> Self {
        Self {
            label: value.label(),
            value,
        }
    }

    pub fn partial(kind: PartialKind, negated: bool) -> Self {
        Self::make(OptionValue::Partial { negated, kind })
    }

    pub fn is_partial(&self) -> bool {
        matches!(self.value, OptionValue::Partial { .. })
    }

    pub fn is_full(&self) -> bool {
        !self.is_partial()
    }

    pub fn negated(&self) -> bool {
        self.value.negated()
    }

    /// Does the sequence satisfy this option?
    ///
    /// Partial options always pass, negated or not. A category option for a
    /// category the sequence has no choice for fails.
    pub fn pass(&self, sequence: &Sequence) -> bool {
        let result = match &self.value {
            OptionValue::Partial { .. } => return true,
            OptionValue::Category {
                category, option, ..
            } => sequence.metadata.categories.get(&category.id) == Some(option),
            OptionValue::Tag { tag, .. } => sequence.metadata.tags.contains(tag),
            OptionValue::Level { level, .. } => sequence.level == *level,
            OptionValue::MaxScore { threshold, .. } => score(sequence) < f64::from(*threshold),
        };
        result != self.negated()
    }
}
