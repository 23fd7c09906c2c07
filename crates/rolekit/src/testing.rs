//! Test doubles for the backend and reporter.

use crate::backend::Backend;
use crate::error::Result;
use crate::report::{Reporter, Status};
use crate::types::Invocation;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// A call made against [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Galaxy(Vec<String>),
    Playbook {
        path: PathBuf,
        args: Vec<String>,
        /// Playbook file content at the time of the call
        content: String,
    },
}

/// Backend that records calls and returns canned exit codes.
///
/// On a successful `install -p <dir> <role>` it creates `<dir>/<role>` the
/// way the real package manager would.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    calls: Arc<Mutex<Vec<Call>>>,
    galaxy_code: i32,
    playbook_code: i32,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn galaxy_exit(mut self, code: i32) -> Self {
        self.galaxy_code = code;
        self
    }

    pub fn playbook_exit(mut self, code: i32) -> Self {
        self.playbook_code = code;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn galaxy_calls(&self) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Galaxy(args) => Some(args),
                Call::Playbook { .. } => None,
            })
            .collect()
    }

    pub fn playbook_calls(&self) -> Vec<(PathBuf, Vec<String>, String)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Playbook {
                    path,
                    args,
                    content,
                } => Some((path, args, content)),
                Call::Galaxy(_) => None,
            })
            .collect()
    }

    fn invocation(code: i32) -> Invocation {
        if code == 0 {
            Invocation::succeeded()
        } else {
            Invocation::failed(code)
        }
    }
}

impl Backend for RecordingBackend {
    fn run_galaxy(&self, args: &[String]) -> Result<Invocation> {
        self.calls.lock().unwrap().push(Call::Galaxy(args.to_vec()));

        if self.galaxy_code == 0 {
            if let [cmd, flag, dir, role] = args {
                if cmd == "install" && flag == "-p" {
                    fs::create_dir_all(Path::new(dir).join(role))?;
                }
            }
        }
        Ok(Self::invocation(self.galaxy_code))
    }

    fn run_playbook(&self, playbook: &Path, args: &[String]) -> Result<Invocation> {
        let content = fs::read_to_string(playbook)?;
        self.calls.lock().unwrap().push(Call::Playbook {
            path: playbook.to_path_buf(),
            args: args.to_vec(),
            content,
        });
        Ok(Self::invocation(self.playbook_code))
    }
}

/// Reporter that keeps every line in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingReporter {
    lines: Arc<Mutex<Vec<(Status, String)>>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<(Status, String)> {
        self.lines.lock().unwrap().clone()
    }

    pub fn contains(&self, status: Status, needle: &str) -> bool {
        self.lines()
            .iter()
            .any(|(s, line)| *s == status && line.contains(needle))
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, status: Status, message: &str) {
        self.lines.lock().unwrap().push((status, message.to_string()));
    }

    fn echo(&self, text: &str) {
        self.lines.lock().unwrap().push((Status::Info, text.to_string()));
    }
}
