//! Durable storage: the sequence library, the review session and user
//! settings.

pub mod error;
pub mod file;
pub mod library;
pub mod settings;

pub use error::{Result, StoreError};
pub use file::{load_library, load_session, save_library, save_session};
pub use library::{LIBRARY_SCHEMA_VERSION, Library};
pub use settings::{Settings, load_settings, load_settings_from, save_settings, settings_path};
