use crate::core::env::EnvVarManager;
use crate::error::{os_description, ShellError};
use std::env;
use std::path::{Path, PathBuf};

/// Working directory and environment of one interpreter. Builtins mutate
/// this instead of process-wide state, so independent states can coexist.
#[derive(Debug, Clone)]
pub struct ShellState {
    current_dir: PathBuf,
    environment: EnvVarManager,
}

impl ShellState {
    pub fn new(current_dir: PathBuf, environment: EnvVarManager) -> Self {
        Self {
            current_dir,
            environment,
        }
    }

    /// Captures the working directory and environment of the running process.
    pub fn capture() -> Result<Self, ShellError> {
        let current_dir =
            env::current_dir().map_err(|e| ShellError::WorkingDir(os_description(&e)))?;
        Ok(Self::new(current_dir, EnvVarManager::from_process()))
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    pub fn set_current_dir(&mut self, dir: PathBuf) {
        self.current_dir = dir;
    }

    pub fn env(&self) -> &EnvVarManager {
        &self.environment
    }

    pub fn env_mut(&mut self) -> &mut EnvVarManager {
        &mut self.environment
    }

    /// Resolves `path` against the working directory.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        self.current_dir.join(path)
    }

    pub fn prompt(&self) -> String {
        format!("{}> ", self.current_dir.display())
    }
}
