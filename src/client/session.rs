use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// The user-info blob stored alongside the token after login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(rename = "_id")]
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub user_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: UserInfo,
}

/// Redirect to the login view, carrying the location that was asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRedirect {
    pub from: String,
}

/// File-backed stand-in for the browser's local storage: holds the bearer
/// token and user info between runs. All reads go through `load`, which
/// treats a corrupt blob as logged out and clears it.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SessionStore { path: path.into() }
    }

    /// Store at `SESSION_FILE`, or a dotfile in the working directory.
    pub fn from_env() -> Self {
        let path = std::env::var("SESSION_FILE")
            .unwrap_or_else(|_| ".solarconnect-session.json".to_string());
        SessionStore::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Option<Session> {
        let raw = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(err) => {
                // force logout if the stored blob is bad
                log::error!("Failed to parse stored session: {err}");
                self.clear();
                None
            }
        }
    }

    pub fn save(&self, session: &Session) -> io::Result<()> {
        let raw = serde_json::to_string(session)
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
        fs::write(&self.path, raw)
    }

    /// Logout. A missing file already means logged out.
    pub fn clear(&self) {
        let _ = fs::remove_file(&self.path);
    }

    pub fn is_logged_in(&self) -> bool {
        self.load().is_some()
    }

    /// Gate for views that need a login; the redirect remembers where the
    /// caller wanted to go.
    pub fn guard(&self, target: &str) -> Result<Session, LoginRedirect> {
        self.load().ok_or(LoginRedirect {
            from: target.to_string(),
        })
    }
}
