//! Preferences and session kept between runs of the authoring client.
//!
//! Stored as a small JSON file with no schema version. A missing file means
//! defaults; an unreadable one is replaced by defaults on the next save.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AdminResult;

/// Display theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// A signed-in identity and its session token.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedAuth {
    pub identifier: String,
    pub token: String,
}

impl std::fmt::Debug for SavedAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SavedAuth")
            .field("identifier", &self.identifier)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientState {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub auth: Option<SavedAuth>,
}

impl ClientState {
    /// Read state from `path`, falling back to defaults if the file is
    /// absent or malformed.
    pub fn load(path: &Path) -> AdminResult<Self> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&raw) {
            Ok(state) => Ok(state),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring malformed client state");
                Ok(Self::default())
            }
        }
    }

    /// Write state to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> AdminResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn remember(&mut self, auth: SavedAuth) {
        self.auth = Some(auth);
    }

    pub fn forget(&mut self) {
        self.auth = None;
    }
}
