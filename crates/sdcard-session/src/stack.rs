use serde::{Deserialize, Serialize};

use sdcard_model::{SequenceId, StackId};
use sdcard_query::Query;

/// A named query plus the sequences it matched and a cursor into them.
///
/// `index` points at the next sequence to show, so while this stack is
/// active the sequence on screen is `sequences[index - 1]`.
/// `index <= sequences.len()` always holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stack {
    pub id: StackId,
    pub name: String,
    pub query: Query,
    #[serde(default)]
    pub sequences: Vec<SequenceId>,
    #[serde(default)]
    pub index: usize,
}

impl Stack {
    pub fn new(name: impl Into<String>, query: Query) -> Self {
        Self {
            id: StackId::generate(),
            name: name.into(),
            query,
            sequences: Vec::new(),
            index: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Sequences not yet shown.
    pub fn remaining(&self) -> usize {
        self.sequences.len().saturating_sub(self.index)
    }

    /// The next sequence, without moving the cursor.
    pub fn top(&self) -> Option<&SequenceId> {
        self.sequences.get(self.index)
    }

    /// The sequence most recently handed out.
    pub fn current(&self) -> Option<&SequenceId> {
        self.index
            .checked_sub(1)
            .and_then(|index| self.sequences.get(index))
    }

    /// Replaces the contents and rewinds the cursor.
    pub fn fill(&mut self, sequences: Vec<SequenceId>) {
        self.sequences = sequences;
        self.index = 0;
    }

    pub fn pull(&mut self) -> Option<SequenceId> {
        let next = self.sequences.get(self.index).cloned()?;
        self.index += 1;
        Some(next)
    }

    pub fn push(&mut self) -> Option<SequenceId> {
        let previous = self.index.checked_sub(1)?;
        self.index = previous;
        self.sequences.get(previous).cloned()
    }
}
