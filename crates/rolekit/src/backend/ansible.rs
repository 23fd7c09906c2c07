//! Real backend that executes `ansible-galaxy` and `ansible-playbook`.

use crate::backend::Backend;
use crate::error::{Error, Result};
use crate::shell;
use crate::types::Invocation;
use std::path::Path;
use std::process::{Command, Stdio};

/// Default role package manager executable.
pub const DEFAULT_GALAXY: &str = "ansible-galaxy";

/// Default playbook runner executable.
pub const DEFAULT_PLAYBOOK: &str = "ansible-playbook";

/// Backend that executes the real Ansible CLI.
///
/// Both commands inherit stdio so their output streams to the terminal.
/// There is no timeout: a hung command blocks the caller.
#[derive(Debug, Clone)]
pub struct AnsibleBackend {
    galaxy: String,
    playbook: String,
}

impl Default for AnsibleBackend {
    fn default() -> Self {
        Self::new(DEFAULT_GALAXY, DEFAULT_PLAYBOOK)
    }
}

impl AnsibleBackend {
    /// Create a backend using the given executables (names on `PATH` or paths).
    pub fn new(galaxy: impl Into<String>, playbook: impl Into<String>) -> Self {
        Self {
            galaxy: galaxy.into(),
            playbook: playbook.into(),
        }
    }

    /// Package manager executable.
    pub fn galaxy(&self) -> &str {
        &self.galaxy
    }

    /// Playbook runner executable.
    pub fn playbook(&self) -> &str {
        &self.playbook
    }
}

impl Backend for AnsibleBackend {
    fn run_galaxy(&self, args: &[String]) -> Result<Invocation> {
        log::debug!("running: {} {}", self.galaxy, args.join(" "));

        let status = Command::new(&self.galaxy)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| Error::CommandFailed {
                message: format!("failed to execute {}: {}", self.galaxy, e),
            })?;

        let invocation = Invocation::from(status);
        log::debug!("{} exited with {}", self.galaxy, invocation.code);
        Ok(invocation)
    }

    fn run_playbook(&self, playbook: &Path, args: &[String]) -> Result<Invocation> {
        let line = shell::command_line(&self.playbook, playbook, args);
        log::debug!("running: sh -c {}", line);

        let status = Command::new("sh")
            .arg("-c")
            .arg(&line)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| Error::CommandFailed {
                message: format!("failed to execute {}: {}", line, e),
            })?;

        let invocation = Invocation::from(status);
        log::debug!("{} exited with {}", self.playbook, invocation.code);
        Ok(invocation)
    }
}
