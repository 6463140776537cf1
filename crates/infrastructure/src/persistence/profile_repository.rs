//! Server profile persistence.
//!
//! A profile names the remote server and the API key to authenticate
//! with. Environment variables win over the stored profile, which
//! lives in the platform-specific config directory:
//! - Linux/macOS: ~/.config/capstan/profile.json
//! - Windows: %APPDATA%/capstan/profile.json

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs;

/// Environment variable naming the server URL.
pub const SERVER_URL_VAR: &str = "CAPSTAN_SERVER_URL";
/// Environment variable carrying the API key.
pub const API_KEY_VAR: &str = "CAPSTAN_API_KEY";

/// Error type for profile operations.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("profile file is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Could not determine config directory.
    #[error("could not determine config directory")]
    NoConfigDir,
}

/// Connection settings for one deployment server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerProfile {
    /// Base URL of the server, e.g. `https://deploy.example.com`.
    pub server_url: String,
    /// API key presented on every request.
    pub api_key: String,
}

/// Repository for server profile persistence.
#[derive(Debug, Clone, Default)]
pub struct ProfileRepository;

impl ProfileRepository {
    /// Creates a new profile repository.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Returns the path to the Capstan config directory.
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("capstan"))
    }

    /// Returns the path to the profile file.
    #[must_use]
    pub fn profile_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("profile.json"))
    }

    /// Reads the profile from the environment, when both variables are
    /// set.
    #[must_use]
    pub fn from_env() -> Option<ServerProfile> {
        let server_url = std::env::var(SERVER_URL_VAR).ok()?;
        let api_key = std::env::var(API_KEY_VAR).ok()?;
        Some(ServerProfile {
            server_url,
            api_key,
        })
    }

    /// Resolves the effective profile: environment first, stored file
    /// second. `None` means no session can be established.
    ///
    /// # Errors
    /// Returns an error when the stored file exists but cannot be read
    /// or parsed.
    pub async fn resolve(&self) -> Result<Option<ServerProfile>, ProfileError> {
        if let Some(profile) = Self::from_env() {
            return Ok(Some(profile));
        }
        let Some(path) = Self::profile_path() else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }
        self.load_from(&path).await.map(Some)
    }

    /// Loads a profile from an explicit path.
    ///
    /// # Errors
    /// Returns an error when the file cannot be read or parsed.
    pub async fn load_from(&self, path: &Path) -> Result<ServerProfile, ProfileError> {
        let content = fs::read(path).await?;
        Ok(serde_json::from_slice(&content)?)
    }

    /// Saves the profile to the default location.
    ///
    /// # Errors
    /// Returns an error when no config directory exists or the file
    /// cannot be written.
    pub async fn save(&self, profile: &ServerProfile) -> Result<(), ProfileError> {
        let dir = Self::config_dir().ok_or(ProfileError::NoConfigDir)?;
        fs::create_dir_all(&dir).await?;
        let path = dir.join("profile.json");
        self.save_to(&path, profile).await
    }

    /// Saves the profile to an explicit path.
    ///
    /// # Errors
    /// Returns an error when the file cannot be written.
    pub async fn save_to(&self, path: &Path, profile: &ServerProfile) -> Result<(), ProfileError> {
        let content = serde_json::to_vec_pretty(profile)?;
        fs::write(path, content).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn profile_round_trips_through_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");

        let repository = ProfileRepository::new();
        let profile = ServerProfile {
            server_url: "https://deploy.example.com".to_string(),
            api_key: "API-1234567890".to_string(),
        };

        repository.save_to(&path, &profile).await.unwrap();
        let loaded = repository.load_from(&path).await.unwrap();
        assert_eq!(loaded, profile);
    }

    #[tokio::test]
    async fn malformed_profile_file_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        tokio::fs::write(&path, b"{not json").await.unwrap();

        let result = ProfileRepository::new().load_from(&path).await;
        assert!(matches!(result, Err(ProfileError::Serialization(_))));
    }

    #[test]
    fn profile_path_ends_with_the_app_folder() {
        if let Some(path) = ProfileRepository::profile_path() {
            assert!(path.ends_with("capstan/profile.json"));
        }
    }
}
