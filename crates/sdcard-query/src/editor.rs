//! Autocomplete state for building queries.
//!
//! The editor keeps the options chosen so far and the options it currently
//! offers. At most one partial option sits in the selection at a time; it
//! decides what is offered next.

use tracing::debug;

use sdcard_model::{Level, MetadataCatalog};

use crate::error::{QueryError, Result};
use crate::option::{CategoryRef, NEGATION_TOKEN, OptionValue, PartialKind, SearchOption};
use crate::query::Query;

const MAX_SCORE_STEP: u32 = 5;
const MAX_SCORE_LIMIT: u32 = 95;

/// What is offered when no partial is selected.
///
/// The negation partial is only offered while not already building a
/// negated clause.
pub fn default_options(catalog: &MetadataCatalog, negated: bool) -> Vec<SearchOption> {
    let mut options = vec![
        SearchOption::partial(PartialKind::Level, negated),
        SearchOption::partial(PartialKind::Tag, negated),
        SearchOption::partial(PartialKind::MaxScore, negated),
    ];
    options.extend(catalog.categories.values().map(|category| {
        SearchOption::partial(
            PartialKind::Category(CategoryRef {
                id: category.id.clone(),
                name: category.name.clone(),
            }),
            negated,
        )
    }));
    if !negated {
        options.push(SearchOption::partial(PartialKind::Negation, true));
    }
    options
}

/// What is offered once a partial of `kind` has been selected.
pub fn next_options(
    catalog: &MetadataCatalog,
    kind: &PartialKind,
    negated: bool,
) -> Vec<SearchOption> {
    match kind {
        PartialKind::Negation => default_options(catalog, true),
        PartialKind::Category(category) => catalog
            .category(&category.id)
            .map(|definition| {
                definition
                    .options
                    .iter()
                    .map(|option| {
                        SearchOption::make(OptionValue::Category {
                            negated,
                            category: category.clone(),
                            option: option.clone(),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default(),
        PartialKind::Level => Level::ALL
            .iter()
            .map(|level| {
                SearchOption::make(OptionValue::Level {
                    negated,
                    level: *level,
                })
            })
            .collect(),
        PartialKind::Tag => catalog
            .tags
            .values()
            .map(|tag| {
                SearchOption::make(OptionValue::Tag {
                    negated,
                    tag: tag.id.clone(),
                    name: tag.name.clone(),
                })
            })
            .collect(),
        PartialKind::MaxScore => (1..)
            .map(|step| step * MAX_SCORE_STEP)
            .take_while(|threshold| *threshold <= MAX_SCORE_LIMIT)
            .map(|threshold| SearchOption::make(OptionValue::MaxScore { negated, threshold }))
            .collect(),
    }
}

#[derive(Debug, Clone)]
pub struct QueryEditor<'a> {
    catalog: &'a MetadataCatalog,
    selection: Vec<SearchOption>,
    offered: Vec<SearchOption>,
}

impl<'a> QueryEditor<'a> {
    pub fn new(catalog: &'a MetadataCatalog) -> Self {
        Self {
            catalog,
            selection: Vec::new(),
            offered: default_options(catalog, false),
        }
    }

    /// Starts editing an existing query.
    pub fn from_query(catalog: &'a MetadataCatalog, query: &Query) -> Self {
        let mut editor = Self::new(catalog);
        editor.selection = query.options().to_vec();
        editor
    }

    pub fn selection(&self) -> &[SearchOption] {
        &self.selection
    }

    pub fn offered(&self) -> &[SearchOption] {
        &self.offered
    }

    /// The partial option currently being completed, if any.
    pub fn partial(&self) -> Option<&SearchOption> {
        self.selection.iter().find(|option| option.is_partial())
    }

    /// Adds an option to the selection and recomputes what is offered.
    ///
    /// Any partial already in the selection is replaced. A full option whose
    /// label is already selected is not added twice.
    pub fn select(&mut self, option: SearchOption) {
        self.selection.retain(SearchOption::is_full);
        self.offered = match &option.value {
            OptionValue::Partial { negated, kind } => next_options(self.catalog, kind, *negated),
            _ => default_options(self.catalog, false),
        };
        if !self
            .selection
            .iter()
            .any(|selected| selected.label == option.label)
        {
            debug!(label = %option.label, "selected search option");
            self.selection.push(option);
        }
    }

    /// Removes the option at `index`.
    pub fn remove(&mut self, index: usize) -> Option<SearchOption> {
        if index >= self.selection.len() {
            return None;
        }
        let removed = self.selection.remove(index);
        if removed.is_partial() {
            self.offered = default_options(self.catalog, false);
        }
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.selection.clear();
        self.offered = default_options(self.catalog, false);
    }

    /// Completes typed text against the offered options.
    ///
    /// The text is prefixed with the current partial's label (`-` joins
    /// directly, anything else with a space) and selected when it equals an
    /// offered label. After `maxscore:` any integer is accepted.
    pub fn input(&mut self, text: &str) -> Option<SearchOption> {
        let text = text.trim();
        let composed = match self.partial() {
            Some(partial) if partial.label == NEGATION_TOKEN => format!("{NEGATION_TOKEN}{text}"),
            Some(partial) => format!("{} {text}", partial.label),
            None => text.to_string(),
        }
        .to_lowercase();

        let found = self
            .offered
            .iter()
            .find(|option| option.label == composed)
            .cloned()
            .or_else(|| self.typed_max_score(text));

        if let Some(option) = &found {
            self.select(option.clone());
        }
        found
    }

    fn typed_max_score(&self, text: &str) -> Option<SearchOption> {
        let Some(OptionValue::Partial {
            negated,
            kind: PartialKind::MaxScore,
        }) = self.partial().map(|partial| &partial.value)
        else {
            return None;
        };
        let threshold = text.parse::<u32>().ok()?;
        Some(SearchOption::make(OptionValue::MaxScore {
            negated: *negated,
            threshold,
        }))
    }

    /// The selection as a storable query.
    pub fn query(&self) -> Query {
        Query::stored(self.selection.iter().cloned())
    }
}

/// Parses comma separated clauses such as `-tag: weird, level: plus`.
///
/// Every clause is typed into a [`QueryEditor`], so only options the editor
/// would offer can be produced.
pub fn parse_query(text: &str, catalog: &MetadataCatalog) -> Result<Query> {
    let mut editor = QueryEditor::new(catalog);
    for clause in text.split(',').map(str::trim).filter(|clause| !clause.is_empty()) {
        if parse_clause(&mut editor, clause).is_none() {
            debug!(clause, "query clause selects nothing");
            return Err(QueryError::Unrecognized {
                clause: clause.to_string(),
            });
        }
    }
    Ok(editor.query())
}

fn parse_clause(editor: &mut QueryEditor<'_>, clause: &str) -> Option<()> {
    let mut rest = clause;
    if let Some(stripped) = rest.strip_prefix(NEGATION_TOKEN) {
        editor.input(NEGATION_TOKEN)?;
        rest = stripped.trim_start();
    }
    let (head, value) = rest.split_once(':')?;
    editor.input(&format!("{}:", head.trim()))?;
    let option = editor.input(value)?;
    option.is_full().then_some(())
}
