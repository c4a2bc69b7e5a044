//! The sequence library: every imported sequence plus the category and tag
//! definitions that metadata refers to.

use std::collections::HashSet;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use sdcard_ingest::read_transcript;
use sdcard_model::{
    Category, CategoryId, Metadata, MetadataCatalog, Sequence, SequenceId, Tag, TagId,
};
use sdcard_query::Query;

use crate::error::{Result, StoreError};

/// Current library file schema version.
pub const LIBRARY_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Library {
    pub schema_version: u32,
    #[serde(flatten)]
    catalog: MetadataCatalog,
    #[serde(default)]
    sequences: IndexMap<SequenceId, Sequence>,
}

impl Default for Library {
    fn default() -> Self {
        Self::new()
    }
}

impl Library {
    /// An empty library seeded with the default categories and tags.
    pub fn new() -> Self {
        Self {
            schema_version: LIBRARY_SCHEMA_VERSION,
            catalog: MetadataCatalog::with_defaults(),
            sequences: IndexMap::new(),
        }
    }

    pub fn catalog(&self) -> &MetadataCatalog {
        &self.catalog
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Sequences in import order.
    pub fn sequences(&self) -> impl Iterator<Item = &Sequence> {
        self.sequences.values()
    }

    pub fn sequence(&self, id: &SequenceId) -> Option<&Sequence> {
        self.sequences.get(id)
    }

    /// Sequences the query passes, in import order.
    pub fn search<'a>(&'a self, query: &'a Query) -> impl Iterator<Item = &'a Sequence> {
        query.filter(self.sequences.values())
    }

    /// Finds a sequence by its id or an unambiguous prefix of it.
    pub fn resolve(&self, prefix: &str) -> Result<&Sequence> {
        let prefix = prefix.trim();
        if let Ok(id) = SequenceId::new(prefix)
            && let Some(sequence) = self.sequences.get(&id)
        {
            return Ok(sequence);
        }
        let mut matches = self
            .sequences
            .values()
            .filter(|sequence| !prefix.is_empty() && sequence.id.as_str().starts_with(prefix));
        match (matches.next(), matches.count()) {
            (Some(sequence), 0) => Ok(sequence),
            (Some(_), more) => Err(StoreError::AmbiguousSequence {
                prefix: prefix.to_string(),
                count: more + 1,
            }),
            (None, _) => Err(StoreError::UnknownSequence(prefix.to_string())),
        }
    }

    /// Adds sequences whose date is not in the library yet and returns how
    /// many were added. Repeated dates within `sequences` collapse to the
    /// first one.
    ///
    /// Sequences without a readable header date are always added.
    pub fn import(&mut self, sequences: impl IntoIterator<Item = Sequence>) -> usize {
        let mut dates: HashSet<_> = self
            .sequences
            .values()
            .filter(|sequence| sequence.has_known_date())
            .map(|sequence| sequence.date)
            .collect();
        let mut added = 0;
        let mut skipped = 0;
        for sequence in sequences {
            if !sequence.has_known_date() || dates.insert(sequence.date) {
                self.sequences.insert(sequence.id.clone(), sequence);
                added += 1;
            } else {
                skipped += 1;
            }
        }
        info!(added, skipped, "imported sequences");
        added
    }

    /// Reads a transcript file and imports it.
    pub fn import_file(&mut self, path: &Path) -> Result<usize> {
        let sequences = read_transcript(path)?;
        Ok(self.import(sequences))
    }

    /// Runs `edit` on a sequence's metadata. Nothing else of the sequence
    /// can change.
    pub fn edit_sequence(
        &mut self,
        id: &SequenceId,
        edit: impl FnOnce(&mut Metadata),
    ) -> Result<()> {
        let sequence = self
            .sequences
            .get_mut(id)
            .ok_or_else(|| StoreError::unknown_sequence(id))?;
        edit(&mut sequence.metadata);
        Ok(())
    }

    pub fn remove_sequence(&mut self, id: &SequenceId) -> Option<Sequence> {
        let removed = self.sequences.shift_remove(id);
        if removed.is_some() {
            debug!(sequence = %id, "removed sequence");
        }
        removed
    }

    /// Chooses `option` of `category` for a sequence, replacing any earlier
    /// choice.
    pub fn set_option(
        &mut self,
        id: &SequenceId,
        category: &CategoryId,
        option: &str,
    ) -> Result<()> {
        let definition = self
            .catalog
            .category(category)
            .ok_or_else(|| StoreError::UnknownCategory(category.to_string()))?;
        let option = definition
            .option(option)
            .map(str::to_string)
            .ok_or_else(|| StoreError::UnknownOption {
                category: definition.name.clone(),
                option: option.to_string(),
            })?;
        let category = category.clone();
        self.edit_sequence(id, |metadata| metadata.set_option(category, option))
    }

    pub fn clear_option(&mut self, id: &SequenceId, category: &CategoryId) -> Result<()> {
        self.edit_sequence(id, |metadata| metadata.clear_option(category))
    }

    pub fn add_tag(&mut self, id: &SequenceId, tag: &TagId) -> Result<()> {
        if self.catalog.tag(tag).is_none() {
            return Err(StoreError::UnknownTag(tag.to_string()));
        }
        self.edit_sequence(id, |metadata| metadata.add_tag(tag.clone()))
    }

    pub fn remove_tag(&mut self, id: &SequenceId, tag: &TagId) -> Result<()> {
        self.edit_sequence(id, |metadata| metadata.remove_tag(tag))
    }

    /// Metadata shared by all of the given sequences. Unknown ids are
    /// ignored.
    pub fn shared_metadata<'a>(&self, ids: impl IntoIterator<Item = &'a SequenceId>) -> Metadata {
        Metadata::intersect(ids.into_iter().filter_map(|id| self.sequences.get(id)))
    }

    pub fn define_category(
        &mut self,
        name: &str,
        options: Vec<String>,
        comment: &str,
    ) -> Result<CategoryId> {
        let name = name.trim();
        if self.catalog.category_by_name(name).is_some() {
            return Err(StoreError::DuplicateName(name.to_string()));
        }
        let id = CategoryId::new(name)?;
        self.catalog.insert_category(Category {
            id: id.clone(),
            name: name.to_string(),
            comment: comment.to_string(),
            options,
        });
        debug!(category = %id, "defined category");
        Ok(id)
    }

    pub fn define_tag(&mut self, name: &str, comment: &str) -> Result<TagId> {
        let name = name.trim();
        if self.catalog.tag_by_name(name).is_some() {
            return Err(StoreError::DuplicateName(name.to_string()));
        }
        let id = TagId::new(name)?;
        self.catalog.insert_tag(Tag {
            id: id.clone(),
            name: name.to_string(),
            comment: comment.to_string(),
        });
        debug!(tag = %id, "defined tag");
        Ok(id)
    }

    /// Removes a category and every choice made for it.
    pub fn remove_category(&mut self, id: &CategoryId) -> Option<Category> {
        let removed = self.catalog.categories.shift_remove(id)?;
        for sequence in self.sequences.values_mut() {
            sequence.metadata.clear_option(id);
        }
        Some(removed)
    }

    /// Removes a tag and takes it off every sequence.
    pub fn remove_tag_definition(&mut self, id: &TagId) -> Option<Tag> {
        let removed = self.catalog.tags.shift_remove(id)?;
        for sequence in self.sequences.values_mut() {
            sequence.metadata.remove_tag(id);
        }
        Some(removed)
    }

    pub fn category_by_name(&self, name: &str) -> Result<&Category> {
        self.catalog
            .category_by_name(name)
            .ok_or_else(|| StoreError::UnknownCategory(name.trim().to_string()))
    }

    pub fn tag_by_name(&self, name: &str) -> Result<&Tag> {
        self.catalog
            .tag_by_name(name)
            .ok_or_else(|| StoreError::UnknownTag(name.trim().to_string()))
    }
}
