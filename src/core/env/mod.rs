mod vars;

pub use vars::EnvVarManager;

#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    #[error("Home directory not found")]
    HomeDirNotFound,
    /// Empty name, a name containing `=`, or an embedded NUL. Reported in
    /// the `perror` style, without the offending name.
    #[error("Invalid argument")]
    InvalidName,
}
