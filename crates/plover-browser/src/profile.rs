use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Chrome user-data directory for a crawl session
pub struct ProfileManager {
    path: PathBuf,
    is_temporary: bool,
}

impl ProfileManager {
    /// A throwaway profile, removed when the manager is dropped
    pub fn temporary() -> Result<Self> {
        let path = tempfile::Builder::new()
            .prefix("plover-profile-")
            .tempdir()?
            .keep();

        tracing::debug!("Created temporary profile at {}", path.display());

        Ok(Self {
            path,
            is_temporary: true,
        })
    }

    /// A named profile kept under `~/.plover/profiles`, so cookies and
    /// consent banners survive between runs
    pub fn named(name: &str) -> Result<Self> {
        if name.is_empty() || name.contains(['/', '\\']) || name == ".." {
            return Err(Error::Browser(format!("Invalid profile name: '{}'", name)));
        }
        Self::persistent(Self::profiles_dir()?.join(name))
    }

    /// Use (and create if needed) a profile at an explicit path
    pub fn persistent(path: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&path)?;

        Ok(Self {
            path,
            is_temporary: false,
        })
    }

    pub fn profiles_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Browser("Could not determine home directory".to_string()))?;
        Ok(home.join(".plover").join("profiles"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_temporary(&self) -> bool {
        self.is_temporary
    }
}

impl Drop for ProfileManager {
    fn drop(&mut self) {
        if self.is_temporary && self.path.exists() {
            let _ = std::fs::remove_dir_all(&self.path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temporary_profile_is_removed_on_drop() {
        let profile = ProfileManager::temporary().unwrap();
        let path = profile.path().to_path_buf();
        assert!(path.is_dir());
        assert!(profile.is_temporary());

        drop(profile);

        assert!(!path.exists());
    }

    #[test]
    fn test_persistent_profile_is_created_and_kept() {
        let temp_dir = tempfile::tempdir().unwrap();
        let profile_path = temp_dir.path().join("plover");

        let profile = ProfileManager::persistent(profile_path.clone()).unwrap();
        assert!(profile_path.is_dir());

        drop(profile);

        assert!(profile_path.exists());
    }

    #[test]
    fn test_named_profile_rejects_path_separators() {
        assert!(ProfileManager::named("../escape").is_err());
        assert!(ProfileManager::named("").is_err());
    }
}
