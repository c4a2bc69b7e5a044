use serde::{Deserialize, Serialize};

use sdcard_model::Sequence;

use crate::option::SearchOption;

/// An ordered list of options evaluated as a conjunction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Query {
    options: Vec<SearchOption>,
}

impl Query {
    pub fn new(options: Vec<SearchOption>) -> Self {
        Self { options }
    }

    /// Builds a query that can be stored, dropping editor-only partials.
    pub fn stored(options: impl IntoIterator<Item = SearchOption>) -> Self {
        Self {
            options: options.into_iter().filter(SearchOption::is_full).collect(),
        }
    }

    /// True when every full option passes. Partial options are ignored, so a
    /// query made only of partials passes everything.
    pub fn pass(&self, sequence: &Sequence) -> bool {
        self.options
            .iter()
            .filter(|option| option.is_full())
            .all(|option| option.pass(sequence))
    }

    /// Keeps the sequences this query passes, in their original order.
    pub fn filter<'s, I>(&self, sequences: I) -> impl Iterator<Item = &'s Sequence>
    where
        I: IntoIterator<Item = &'s Sequence>,
    {
        sequences
            .into_iter()
            .filter(move |sequence| self.pass(sequence))
    }

    pub fn options(&self) -> &[SearchOption] {
        &self.options
    }

    pub fn into_options(self) -> Vec<SearchOption> {
        self.options
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Labels joined the way `parse_query` reads them back.
    pub fn render(&self) -> String {
        self.options
            .iter()
            .map(|option| option.label.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.options.is_empty() {
            f.write_str("(everything)")
        } else {
            f.write_str(&self.render())
        }
    }
}
