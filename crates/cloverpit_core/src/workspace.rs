use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreErrorCode};
use crate::session::Session;

const BACKUP_SUFFIX: &str = ".backup";

/// The editor's context: the selected save file and, once loaded, its
/// decoded session. Load, save, and the backup pair all run synchronously
/// and exclusively; no cross-instance coordination is attempted.
#[derive(Debug, Default)]
pub struct Workspace {
    path: Option<PathBuf>,
    session: Option<Session>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the workspace at a save file without reading it yet.
    pub fn select(&mut self, path: impl Into<PathBuf>) {
        self.path = Some(path.into());
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_loaded(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Result<&Session, CoreError> {
        self.session.as_ref().ok_or_else(not_loaded)
    }

    pub fn session_mut(&mut self) -> Result<&mut Session, CoreError> {
        self.session.as_mut().ok_or_else(not_loaded)
    }

    /// Read and decode the selected file. On failure the workspace keeps
    /// its prior state: a fresh workspace stays unloaded, a previously
    /// loaded session stays live.
    pub fn load(&mut self) -> Result<(), CoreError> {
        let path = self.selected_path()?;
        let bytes = fs::read(path).map_err(|e| {
            CoreError::new(
                CoreErrorCode::Io,
                format!("failed to read {}: {e}", path.display()),
            )
        })?;
        self.session = Some(Session::open_bytes(&bytes)?);
        Ok(())
    }

    /// Encode the live session and overwrite the selected file.
    pub fn save(&self) -> Result<(), CoreError> {
        let path = self.selected_path()?;
        let bytes = self.session()?.to_bytes()?;
        write_bytes(path, &bytes)
    }

    /// Encode the live session to another path, leaving the selection as is.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), CoreError> {
        let bytes = self.session()?.to_bytes()?;
        write_bytes(path.as_ref(), &bytes)
    }

    /// `<save path>.backup`.
    pub fn backup_path(&self) -> Result<PathBuf, CoreError> {
        let path = self.selected_path()?;
        let mut name = OsString::from(path.as_os_str());
        name.push(BACKUP_SUFFIX);
        Ok(PathBuf::from(name))
    }

    /// Plain byte copy of the raw save next to it. Does not require a
    /// loaded session, only a selected file.
    pub fn create_backup(&self) -> Result<PathBuf, CoreError> {
        let path = self.selected_path()?;
        let backup = self.backup_path()?;
        fs::copy(path, &backup).map_err(|e| {
            CoreError::new(
                CoreErrorCode::Io,
                format!("failed to create backup {}: {e}", backup.display()),
            )
        })?;
        Ok(backup)
    }

    /// Copy the backup over the live file and reload. The caller is
    /// responsible for confirming this destructive step with the user.
    pub fn restore_backup(&mut self) -> Result<(), CoreError> {
        let path = self.selected_path()?.to_path_buf();
        let backup = self.backup_path()?;
        fs::copy(&backup, &path).map_err(|e| {
            CoreError::new(
                CoreErrorCode::Io,
                format!("failed to restore backup {}: {e}", backup.display()),
            )
        })?;
        self.load()
    }

    fn selected_path(&self) -> Result<&Path, CoreError> {
        self.path.as_deref().ok_or_else(|| {
            CoreError::new(CoreErrorCode::NotLoaded, "no save file selected")
        })
    }
}

fn write_bytes(path: &Path, bytes: &[u8]) -> Result<(), CoreError> {
    fs::write(path, bytes).map_err(|e| {
        CoreError::new(
            CoreErrorCode::Io,
            format!("failed to write {}: {e}", path.display()),
        )
    })
}

fn not_loaded() -> CoreError {
    CoreError::new(CoreErrorCode::NotLoaded, "no save document loaded")
}
