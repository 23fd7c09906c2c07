//! # rolekit
//!
//! Apply a single Ansible role to a host without writing a playbook.
//!
//! Ansible has no way to run a bare role, so this crate:
//! - makes sure a `roles/` directory exists under a module path
//! - installs the role with `ansible-galaxy` if it is not there yet
//! - renders a one-role playbook into a temporary file
//! - runs `ansible-playbook` on it, forwarding any extra arguments
//!
//! When no module path is given, a temporary one is created for the run and
//! removed afterwards, along with the downloaded role.
//!
//! ## Example
//!
//! ```no_run
//! use rolekit::{Client, Extras, RoleName};
//!
//! let client = Client::new();
//! let role = RoleName::new("geerlingguy.git").expect("valid role name");
//! let args = vec!["-i".to_string(), "web1,".to_string()];
//!
//! let outcome = client
//!     .apply(&role, None, &args, &Extras::new())
//!     .expect("role could not be applied");
//! std::process::exit(outcome.code);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod apply;
pub mod backend;
pub mod error;
pub mod playbook;
pub mod report;
pub mod roles;
pub mod runner;
pub mod shell;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use apply::ModulePath;
pub use error::{Error, FAILURE_EXIT_CODE, Result};
pub use report::{ConsoleReporter, Reporter, Status};
pub use types::{ExtraValue, Extras, Invocation, PlaybookOptions, RoleName};

use apply::Pipeline;
use backend::Backend;
use std::path::{Path, PathBuf};

/// Tag used on status lines by default.
pub const DEFAULT_COMPONENT: &str = "ansible-role";

/// High-level client for applying roles.
///
/// The client wraps a backend, a reporter and playbook options.
pub struct Client {
    backend: Box<dyn Backend>,
    reporter: Box<dyn Reporter>,
    options: PlaybookOptions,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Create a client that runs the real Ansible CLI and reports to stderr.
    pub fn new() -> Self {
        Self::with_backend(Box::new(backend::default_backend()))
    }

    /// Create a client with a custom backend (useful for testing).
    pub fn with_backend(backend: Box<dyn Backend>) -> Self {
        Self {
            backend,
            reporter: Box::new(ConsoleReporter::new(DEFAULT_COMPONENT)),
            options: PlaybookOptions::default(),
        }
    }

    /// Replace the reporter.
    pub fn with_reporter(mut self, reporter: Box<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Replace the playbook options.
    pub fn with_options(mut self, options: PlaybookOptions) -> Self {
        self.options = options;
        self
    }

    /// The reporter status lines go to.
    pub fn reporter(&self) -> &dyn Reporter {
        self.reporter.as_ref()
    }

    /// Playbook options in use.
    pub fn options(&self) -> &PlaybookOptions {
        &self.options
    }

    // =========================================================================
    // Pipeline steps
    // =========================================================================

    /// Ensure `<module_path>/roles` exists.
    pub fn ensure_role_dir(&self, module_path: &Path) -> Result<PathBuf> {
        roles::ensure_role_dir(module_path, self.reporter.as_ref())
    }

    /// Install `role` into `role_dir` if it is not already there.
    pub fn ensure_role_installed(&self, role: &RoleName, role_dir: &Path) -> Result<()> {
        roles::ensure_role_installed(self.backend.as_ref(), role, role_dir, self.reporter.as_ref())
    }

    /// Render the one-role playbook.
    pub fn render_playbook(&self, role: &RoleName, role_dir: &Path, extras: &Extras) -> Result<String> {
        playbook::render_playbook(role, role_dir, extras, &self.options)
    }

    /// Run a playbook file with already-escaped arguments.
    pub fn run_playbook(&self, role: &RoleName, playbook: &Path, args: &[String]) -> Result<Invocation> {
        runner::run_playbook(self.backend.as_ref(), role, playbook, args, self.reporter.as_ref())
    }

    // =========================================================================
    // Apply
    // =========================================================================

    /// Apply `role` end to end and return the runner's outcome.
    ///
    /// - `module_path`: reuse this module root; `None` uses a temporary one
    ///   that is deleted before returning, on every path
    /// - `extra_args`: forwarded to `ansible-playbook`
    /// - `extras`: inline role parameters
    ///
    /// # Errors
    ///
    /// - `RoleInstall`: the role was missing and could not be installed
    /// - `Template`, `Io`, `CommandFailed`: environment failures
    ///
    /// A playbook that runs and fails is `Ok` with `success == false`.
    pub fn apply(
        &self,
        role: &RoleName,
        module_path: Option<&Path>,
        extra_args: &[String],
        extras: &Extras,
    ) -> Result<Invocation> {
        let pipeline = Pipeline {
            backend: self.backend.as_ref(),
            reporter: self.reporter.as_ref(),
            options: &self.options,
        };
        pipeline.apply(role, module_path, extra_args, extras)
    }
}
