//! The library and session a command works on.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use sdcard_session::Session;
use sdcard_store::{Library, Settings, load_library, load_session, save_library, save_session};

#[derive(Debug)]
pub struct Workspace {
    pub library: Library,
    pub session: Session,
    pub settings: Settings,
    library_path: PathBuf,
    session_path: PathBuf,
}

impl Workspace {
    /// Loads the files named by `settings`. Missing files start empty.
    pub fn open(settings: Settings) -> Result<Self> {
        let library_path = settings.library_path();
        let session_path = settings.session_path();
        let library = load_library(&library_path)
            .with_context(|| format!("load library {}", library_path.display()))?;
        let session = load_session(&session_path)
            .with_context(|| format!("load session {}", session_path.display()))?;
        Ok(Self {
            library,
            session,
            settings,
            library_path,
            session_path,
        })
    }

    pub fn library_path(&self) -> &Path {
        &self.library_path
    }

    pub fn session_path(&self) -> &Path {
        &self.session_path
    }

    pub fn save(&self) -> Result<()> {
        save_library(&self.library, &self.library_path)
            .with_context(|| format!("save library {}", self.library_path.display()))?;
        save_session(&self.session, &self.session_path)
            .with_context(|| format!("save session {}", self.session_path.display()))?;
        Ok(())
    }
}
