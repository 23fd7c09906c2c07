//! Error types for role application.
//!
//! Install failures and bad extras are fatal and abort the run. A playbook
//! run that exits non-zero is *not* an error: it comes back as an
//! [`Invocation`](crate::Invocation) so the caller can still report on it.

use thiserror::Error;

/// Exit code used when the run is abandoned before the runner finishes.
pub const FAILURE_EXIT_CODE: i32 = 1;

/// Errors that can occur while applying a role.
#[derive(Debug, Error)]
pub enum Error {
    /// The role was missing and the package manager failed to install it
    #[error("missing role {role} could not be installed")]
    RoleInstall {
        /// Name of the role that could not be installed
        role: String,
        /// Exit code reported by the package manager. Kept for diagnostics
        /// (shown in the `Debug` form); the process still exits with
        /// [`FAILURE_EXIT_CODE`].
        code: i32,
    },

    /// An extra variable had a type that cannot be passed to a role
    #[error(
        "ansible-role apply only supports passing simple environment variables \
         (strings, bools or lists of strings). Found type '{found}' at name '{name}'"
    )]
    UnsupportedExtraType {
        /// Variable name
        name: String,
        /// JSON type that was found
        found: &'static str,
    },

    /// The extras document was not a JSON object
    #[error("invalid extras: {0}")]
    InvalidExtras(String),

    /// Role name is empty or cannot be used as a directory name
    #[error("invalid role name: {0:?}")]
    InvalidRoleName(String),

    /// Playbook template failed to render
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    /// External command could not be started
    #[error("command failed: {message}")]
    CommandFailed {
        /// Description of what command failed
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns true if this error comes from user input rather than the
    /// environment (bad role name, bad extras).
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedExtraType { .. } | Self::InvalidExtras(_) | Self::InvalidRoleName(_)
        )
    }

    /// Process exit code for a run aborted by this error.
    ///
    /// Every abort maps to [`FAILURE_EXIT_CODE`]: the runner never finished,
    /// so there is no runner exit code to pass on.
    pub fn exit_code(&self) -> i32 {
        FAILURE_EXIT_CODE
    }
}

/// Result type for role operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_install_message_names_role() {
        let err = Error::RoleInstall {
            role: "rolename.doesntexist".to_string(),
            code: 1,
        };
        assert_eq!(
            err.to_string(),
            "missing role rolename.doesntexist could not be installed"
        );
        assert_eq!(err.exit_code(), 1);
        assert!(!err.is_input_error());
    }

    #[test]
    fn test_role_install_debug_keeps_installer_code() {
        let err = Error::RoleInstall {
            role: "a.b".to_string(),
            code: 7,
        };
        assert!(format!("{err:?}").contains("code: 7"));
        assert_eq!(err.exit_code(), FAILURE_EXIT_CODE);
    }

    #[test]
    fn test_unsupported_extra_type_message() {
        let err = Error::UnsupportedExtraType {
            name: "n".to_string(),
            found: "number",
        };
        let msg = err.to_string();
        assert!(msg.contains("Found type 'number' at name 'n'"));
        assert!(err.is_input_error());
    }
}
