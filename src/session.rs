use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::api::User;
use crate::SleepError;

/// Who is using the client right now.
///
/// Passed explicitly to whatever needs an identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "currentUser")]
    pub user: Option<User>,
}

impl Session {
    pub fn logged_in(user: User) -> Self {
        Self { user: Some(user) }
    }

    pub fn require_user(&self) -> Result<&User, SleepError> {
        self.user.as_ref().ok_or(SleepError::NotLoggedIn)
    }
}

/// JSON file that remembers the session between runs.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored session, or an empty one if nothing was saved yet.
    pub async fn load(&self) -> Result<Session, SleepError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("no session at {}", self.path.display());
                Ok(Session::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn save(&self, session: &Session) -> Result<(), SleepError> {
        let contents = serde_json::to_string_pretty(session)?;
        tokio::fs::write(&self.path, contents).await?;
        info!("session saved to {}", self.path.display());
        Ok(())
    }

    /// Forget the session. Clearing an absent session is not an error.
    pub async fn clear(&self) -> Result<(), SleepError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
