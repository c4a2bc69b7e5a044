//! The review session scheduler.
//!
//! A session owns a set of stacks. Starting a session fills every stack
//! from the library; pulling and pushing walk a stack's cursor forwards and
//! backwards. The stack touched last becomes the active one.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use sdcard_model::{Sequence, SequenceId, StackId, TagId};
use sdcard_query::Query;

use crate::distribute::distribute;
use crate::stack::Stack;

/// How a session fills its stacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Distribution {
    /// Every stack gets every sequence its query matches, in library order.
    #[default]
    Filter,
    /// Each sequence goes to exactly one matching stack, and every stack is
    /// ordered to alternate harder and easier sequences.
    Balanced,
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Distribution::Filter => "filter",
            Distribution::Balanced => "balanced",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    stacks: IndexMap<StackId, Stack>,
    /// Front is the active stack.
    stack_order: Vec<StackId>,
    pub distribution: Distribution,
    /// Added to every sequence the user advances past.
    pub auto_tag: Option<TagId>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_stack(&mut self, name: impl Into<String>, query: Query) -> StackId {
        let stack = Stack::new(name, query);
        let id = stack.id.clone();
        debug!(stack = %id, name = %stack.name, "added stack");
        self.stacks.insert(id.clone(), stack);
        self.stack_order.push(id.clone());
        id
    }

    pub fn remove_stack(&mut self, id: &StackId) -> Option<Stack> {
        let removed = self.stacks.shift_remove(id)?;
        self.stack_order.retain(|candidate| candidate != id);
        Some(removed)
    }

    pub fn rename_stack(&mut self, id: &StackId, name: impl Into<String>) -> bool {
        match self.stacks.get_mut(id) {
            Some(stack) => {
                stack.name = name.into();
                true
            }
            None => false,
        }
    }

    /// Replaces a stack's query. The new query applies from the next
    /// [`Session::init`].
    pub fn set_query(&mut self, id: &StackId, query: Query) -> bool {
        match self.stacks.get_mut(id) {
            Some(stack) => {
                stack.query = query;
                true
            }
            None => false,
        }
    }

    /// Moves a stack to the front of the order.
    pub fn activate(&mut self, id: &StackId) -> bool {
        let Some(position) = self.stack_order.iter().position(|candidate| candidate == id) else {
            return false;
        };
        let id = self.stack_order.remove(position);
        self.stack_order.insert(0, id);
        true
    }

    /// Stacks in declaration order.
    pub fn stacks(&self) -> impl Iterator<Item = &Stack> {
        self.stacks.values()
    }

    pub fn stack(&self, id: &StackId) -> Option<&Stack> {
        self.stacks.get(id)
    }

    /// Case-insensitive lookup by stack name.
    pub fn stack_by_name(&self, name: &str) -> Option<&Stack> {
        let name = name.trim();
        self.stacks
            .values()
            .find(|stack| stack.name.eq_ignore_ascii_case(name))
    }

    /// Stack ids, active stack first.
    pub fn stack_order(&self) -> &[StackId] {
        &self.stack_order
    }

    pub fn active(&self) -> Option<&Stack> {
        self.stack_order.first().and_then(|id| self.stacks.get(id))
    }

    /// Rebuilds every stack from `sequences` and rewinds all cursors.
    pub fn init<'a>(&mut self, sequences: impl IntoIterator<Item = &'a Sequence>) {
        match self.distribution {
            Distribution::Filter => {
                let sequences: Vec<&Sequence> = sequences.into_iter().collect();
                for stack in self.stacks.values_mut() {
                    let matched = stack
                        .query
                        .filter(sequences.iter().copied())
                        .map(|sequence| sequence.id.clone())
                        .collect();
                    stack.fill(matched);
                }
            }
            Distribution::Balanced => {
                let stacks: Vec<&Stack> = self.stacks.values().collect();
                let buckets = distribute(sequences, &stacks);
                for (stack, bucket) in self.stacks.values_mut().zip(buckets) {
                    stack.fill(bucket);
                }
            }
        }
        info!(
            distribution = %self.distribution,
            stacks = self.stacks.len(),
            sequences = self.stacks.values().map(Stack::len).sum::<usize>(),
            "session started"
        );
    }

    /// Hands out the next sequence of a stack and makes it active.
    ///
    /// At the end of the stack, or for an unknown stack, nothing happens.
    pub fn pull_from(&mut self, id: &StackId) -> Option<SequenceId> {
        let next = self.stacks.get_mut(id)?.pull()?;
        self.activate(id);
        debug!(stack = %id, sequence = %next, "pulled sequence");
        Some(next)
    }

    /// Steps a stack back by one and makes it active, returning the
    /// sequence stepped over.
    ///
    /// At the start of the stack, or for an unknown stack, nothing happens.
    pub fn push_to(&mut self, id: &StackId) -> Option<SequenceId> {
        let previous = self.stacks.get_mut(id)?.push()?;
        self.activate(id);
        debug!(stack = %id, sequence = %previous, "pushed sequence back");
        Some(previous)
    }

    /// Advances a stack, first tagging the sequence being left with the
    /// session's auto tag.
    pub fn advance(
        &mut self,
        id: &StackId,
        tag_leaving: impl FnOnce(&SequenceId, &TagId),
    ) -> Option<SequenceId> {
        if let Some(tag) = &self.auto_tag
            && let Some(leaving) = self.current()
        {
            tag_leaving(leaving, tag);
        }
        self.pull_from(id)
    }

    /// The next sequence of a stack, without moving its cursor.
    pub fn top_of(&self, id: &StackId) -> Option<&SequenceId> {
        self.stacks.get(id).and_then(Stack::top)
    }

    /// The sequence most recently handed out by the active stack.
    pub fn current(&self) -> Option<&SequenceId> {
        self.active().and_then(Stack::current)
    }

    /// True while any stack holds sequences.
    pub fn ongoing(&self) -> bool {
        self.stacks.values().any(|stack| !stack.is_empty())
    }

    /// Empties every stack. Stack definitions are kept.
    pub fn stop(&mut self) {
        for stack in self.stacks.values_mut() {
            stack.fill(Vec::new());
        }
        info!("session stopped");
    }

    /// Drops ids that no longer resolve, for example after a sequence was
    /// deleted from the library. Cursors are clamped.
    pub fn retain_sequences(&mut self, mut keep: impl FnMut(&SequenceId) -> bool) {
        for stack in self.stacks.values_mut() {
            let before = stack.sequences[..stack.index.min(stack.len())]
                .iter()
                .filter(|id| keep(*id))
                .count();
            stack.sequences.retain(|id| keep(id));
            stack.index = before;
        }
    }
}
