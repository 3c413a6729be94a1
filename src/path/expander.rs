use crate::core::env::EnvError;
use std::path::{Path, PathBuf};

#[derive(Clone)]
pub struct PathExpander;

impl Default for PathExpander {
    fn default() -> Self {
        Self::new()
    }
}

impl PathExpander {
    pub fn new() -> Self {
        Self
    }

    /// Expands a leading `~` or `~/`. `home` is the interpreter's `$HOME`;
    /// when unset the platform home directory is used.
    pub fn expand(&self, path: &str, home: Option<&str>) -> Result<PathBuf, EnvError> {
        if path.starts_with('~') {
            self.expand_tilde(path, home)
        } else {
            Ok(Path::new(path).to_path_buf())
        }
    }

    fn expand_tilde(&self, path: &str, home: Option<&str>) -> Result<PathBuf, EnvError> {
        if path.len() == 1 {
            self.home_dir(home)
        } else {
            let without_tilde = &path[1..];
            if let Some(stripped) = without_tilde.strip_prefix('/') {
                let mut home_path = self.home_dir(home)?;
                for part in stripped.split('/') {
                    if !part.is_empty() {
                        home_path.push(part);
                    }
                }
                Ok(home_path)
            } else {
                // "~user" is left alone
                Ok(Path::new(path).to_path_buf())
            }
        }
    }

    fn home_dir(&self, home: Option<&str>) -> Result<PathBuf, EnvError> {
        match home {
            Some(home) if !home.is_empty() => Ok(PathBuf::from(home)),
            _ => dirs::home_dir().ok_or(EnvError::HomeDirNotFound),
        }
    }
}
