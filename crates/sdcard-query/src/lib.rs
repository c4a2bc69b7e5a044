//! Search over the sequence library.
//!
//! A [`Query`] is a conjunction of [`SearchOption`]s. The [`QueryEditor`]
//! drives autocomplete and decides which options can be reached at all.

pub mod editor;
pub mod error;
pub mod option;
pub mod query;

pub use editor::{QueryEditor, default_options, next_options, parse_query};
pub use error::{QueryError, Result};
pub use option::{CategoryRef, OptionValue, PartialKind, SearchOption};
pub use query::Query;
