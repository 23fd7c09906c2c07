//! Backend abstraction for the external Ansible tools.
//!
//! The [`Backend`] trait is the seam between role application and the
//! `ansible-galaxy` / `ansible-playbook` executables, so the pipeline can
//! run against the real CLI or a test double.

pub mod ansible;

use crate::error::Result;
use crate::types::Invocation;
use std::path::Path;

/// Backend trait for the role package manager and the playbook runner.
///
/// Both methods return an [`Invocation`] for a command that ran, whatever
/// its exit code. `Err` means the command could not be started at all.
pub trait Backend: Send + Sync {
    /// Run the role package manager with `args` (e.g. `install -p <dir> <role>`).
    fn run_galaxy(&self, args: &[String]) -> Result<Invocation>;

    /// Run the playbook runner on `playbook`, followed by `args`.
    ///
    /// `args` are already shell-escaped.
    fn run_playbook(&self, playbook: &Path, args: &[String]) -> Result<Invocation>;
}

/// Get the default backend (real `ansible-*` CLI on `PATH`).
pub fn default_backend() -> ansible::AnsibleBackend {
    ansible::AnsibleBackend::default()
}
