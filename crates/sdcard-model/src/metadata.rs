//! Categories, tags and the metadata attached to every sequence.
//!
//! A category is a set of mutually exclusive options (difficulty: easy,
//! medium, hard). A tag is a free label (a tag for every sequence called at
//! a certain dance).

use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{CategoryId, Sequence, TagId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub comment: String,
    pub options: Vec<String>,
}

impl Category {
    /// The option as defined, matched case-insensitively.
    pub fn option(&self, option: &str) -> Option<&str> {
        let option = option.trim();
        self.options
            .iter()
            .find(|candidate| candidate.eq_ignore_ascii_case(option))
            .map(String::as_str)
    }

    pub fn has_option(&self, option: &str) -> bool {
        self.option(option).is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    #[serde(default)]
    pub comment: String,
}

/// User-assigned metadata: at most one chosen option per category, and a set of tags.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub categories: BTreeMap<CategoryId, String>,
    #[serde(default)]
    pub tags: BTreeSet<TagId>,
}

impl Metadata {
    /// Adds every entry of `delta` when `add` is true, removes them otherwise.
    ///
    /// Removal of a category ignores the option value in `delta`.
    pub fn edit(&mut self, delta: &Metadata, add: bool) {
        for (category, option) in &delta.categories {
            if add {
                self.categories.insert(category.clone(), option.clone());
            } else {
                self.categories.remove(category);
            }
        }
        for tag in &delta.tags {
            if add {
                self.tags.insert(tag.clone());
            } else {
                self.tags.remove(tag);
            }
        }
    }

    pub fn set_option(&mut self, category: CategoryId, option: impl Into<String>) {
        self.categories.insert(category, option.into());
    }

    pub fn clear_option(&mut self, category: &CategoryId) {
        self.categories.remove(category);
    }

    pub fn add_tag(&mut self, tag: TagId) {
        self.tags.insert(tag);
    }

    pub fn remove_tag(&mut self, tag: &TagId) {
        self.tags.remove(tag);
    }

    /// Metadata shared by every sequence: category choices that agree across
    /// all of them, and tags present on all of them.
    pub fn intersect<'a>(sequences: impl IntoIterator<Item = &'a Sequence>) -> Metadata {
        let mut sequences = sequences.into_iter();
        let Some(first) = sequences.next() else {
            return Metadata::default();
        };
        let mut shared = first.metadata.clone();
        for sequence in sequences {
            shared.categories.retain(|category, option| {
                sequence.metadata.categories.get(category) == Some(&*option)
            });
            shared.tags.retain(|tag| sequence.metadata.tags.contains(tag));
        }
        shared
    }
}

/// Category and tag definitions known to the library.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MetadataCatalog {
    #[serde(default)]
    pub categories: IndexMap<CategoryId, Category>,
    #[serde(default)]
    pub tags: IndexMap<TagId, Tag>,
}

impl MetadataCatalog {
    /// The definitions a fresh library starts with.
    pub fn with_defaults() -> Self {
        let mut catalog = Self::default();
        catalog.insert_category(Category {
            id: CategoryId::from_trusted("difficulty"),
            name: "difficulty".to_string(),
            comment: String::new(),
            options: ["easy", "medium", "hard"].map(String::from).to_vec(),
        });
        catalog.insert_tag(Tag {
            id: TagId::from_trusted("@1"),
            name: "@1".to_string(),
            comment: "called during chamateur night, april 24".to_string(),
        });
        catalog.insert_tag(Tag {
            id: TagId::from_trusted("weird"),
            name: "weird".to_string(),
            comment: String::new(),
        });
        catalog
    }

    pub fn insert_category(&mut self, category: Category) {
        self.categories.insert(category.id.clone(), category);
    }

    pub fn insert_tag(&mut self, tag: Tag) {
        self.tags.insert(tag.id.clone(), tag);
    }

    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.get(id)
    }

    pub fn tag(&self, id: &TagId) -> Option<&Tag> {
        self.tags.get(id)
    }

    /// Case-insensitive lookup by display name.
    pub fn category_by_name(&self, name: &str) -> Option<&Category> {
        let name = name.trim();
        self.categories
            .values()
            .find(|category| category.name.eq_ignore_ascii_case(name))
    }

    /// Case-insensitive lookup by display name.
    pub fn tag_by_name(&self, name: &str) -> Option<&Tag> {
        let name = name.trim();
        self.tags.values().find(|tag| tag.name.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Level, SequenceId};

    fn sequence(metadata: Metadata) -> Sequence {
        Sequence {
            id: SequenceId::generate(),
            date: chrono::NaiveDateTime::default(),
            version: String::new(),
            level: Level::Plus,
            comment: String::new(),
            calls: Vec::new(),
            metadata,
        }
    }

    fn tag(id: &str) -> TagId {
        TagId::new(id).unwrap()
    }

    fn category(id: &str) -> CategoryId {
        CategoryId::new(id).unwrap()
    }

    #[test]
    fn edit_adds_and_removes() {
        let mut meta = Metadata::default();
        let mut delta = Metadata::default();
        delta.set_option(category("difficulty"), "hard");
        delta.add_tag(tag("weird"));

        meta.edit(&delta, true);
        assert_eq!(meta.categories.get(&category("difficulty")).unwrap(), "hard");
        assert!(meta.tags.contains(&tag("weird")));

        let mut removal = Metadata::default();
        removal.set_option(category("difficulty"), "");
        meta.edit(&removal, false);
        assert!(meta.categories.is_empty());
        assert!(meta.tags.contains(&tag("weird")));
    }

    #[test]
    fn single_option_per_category() {
        let mut meta = Metadata::default();
        meta.set_option(category("difficulty"), "easy");
        meta.set_option(category("difficulty"), "hard");
        assert_eq!(meta.categories.len(), 1);
        assert_eq!(meta.categories.get(&category("difficulty")).unwrap(), "hard");
        meta.clear_option(&category("difficulty"));
        assert!(meta.categories.is_empty());
    }

    #[test]
    fn intersect_keeps_only_shared_entries() {
        let mut a = Metadata::default();
        a.set_option(category("difficulty"), "hard");
        a.set_option(category("flow"), "smooth");
        a.add_tag(tag("weird"));
        a.add_tag(tag("@1"));
        let mut b = Metadata::default();
        b.set_option(category("difficulty"), "hard");
        b.set_option(category("flow"), "jerky");
        b.add_tag(tag("weird"));

        let sequences = [sequence(a), sequence(b.clone())];
        let shared = Metadata::intersect(&sequences);
        assert_eq!(shared.categories.len(), 1);
        assert_eq!(shared.tags.len(), 1);
        assert!(shared.tags.contains(&tag("weird")));

        // Inputs are untouched.
        assert_eq!(sequences[1].metadata, b);
        assert_eq!(
            Metadata::intersect(std::iter::empty::<&Sequence>()),
            Metadata::default()
        );
    }

    #[test]
    fn catalog_lookup_by_name() {
        let catalog = MetadataCatalog::with_defaults();
        assert!(catalog.category_by_name("Difficulty").is_some());
        assert!(catalog.tag_by_name("WEIRD").is_some());
        assert!(catalog.tag_by_name("boring").is_none());
        let difficulty = catalog.category(&category("difficulty")).unwrap();
        assert!(difficulty.has_option("medium"));
        assert!(difficulty.has_option(" MEDIUM "));
        assert!(!difficulty.has_option("extreme"));
        assert_eq!(difficulty.option("Hard"), Some("hard"));
    }
}
