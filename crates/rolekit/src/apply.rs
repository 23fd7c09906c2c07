//! The apply pipeline: module path → role directory → install → playbook → run.

use crate::backend::Backend;
use crate::error::Result;
use crate::playbook;
use crate::report::Reporter;
use crate::roles;
use crate::runner;
use crate::shell;
use crate::types::{Extras, Invocation, PlaybookOptions, RoleName};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Root directory for roles for one run.
///
/// An ephemeral module path is a temporary directory owned by the run; it
/// is deleted (with any roles installed into it) when this value is closed
/// or dropped, so early returns clean up too.
#[derive(Debug)]
pub enum ModulePath {
    /// Temporary directory created for this run
    Ephemeral(TempDir),
    /// Directory supplied by the caller, never deleted
    Supplied(PathBuf),
}

impl ModulePath {
    /// Use `supplied` if given, otherwise create a temporary directory.
    pub fn resolve(supplied: Option<&Path>) -> Result<Self> {
        match supplied {
            Some(path) => Ok(Self::Supplied(path.to_path_buf())),
            None => {
                let dir = tempfile::Builder::new().prefix("ansible-role-").tempdir()?;
                Ok(Self::Ephemeral(dir))
            }
        }
    }

    /// The module path on disk.
    pub fn path(&self) -> &Path {
        match self {
            Self::Ephemeral(dir) => dir.path(),
            Self::Supplied(path) => path,
        }
    }

    /// Whether the directory was created by this run.
    pub fn is_ephemeral(&self) -> bool {
        matches!(self, Self::Ephemeral(_))
    }

    /// Delete an ephemeral module path. Supplied paths are left alone.
    pub fn close(self) {
        if let Self::Ephemeral(dir) = self {
            let path = dir.path().to_path_buf();
            if let Err(e) = dir.close() {
                log::warn!("failed to remove {}: {}", path.display(), e);
            } else {
                log::debug!("removed temporary module path {}", path.display());
            }
        }
    }
}

/// Everything one run needs besides the role itself.
pub(crate) struct Pipeline<'a> {
    pub(crate) backend: &'a dyn Backend,
    pub(crate) reporter: &'a dyn Reporter,
    pub(crate) options: &'a PlaybookOptions,
}

impl Pipeline<'_> {
    /// Apply `role`, returning the runner's outcome.
    ///
    /// Without a module path, a temporary one is used and removed afterwards.
    /// With one, `--module-path <path>` is forwarded to the runner as well.
    pub fn apply(
        &self,
        role: &RoleName,
        module_path: Option<&Path>,
        extra_args: &[String],
        extras: &Extras,
    ) -> Result<Invocation> {
        let module_path = ModulePath::resolve(module_path)?;

        let mut args = extra_args.to_vec();
        match &module_path {
            ModulePath::Ephemeral(dir) => self.reporter.info(&format!(
                "ansible module-path not given, using {}",
                dir.path().display()
            )),
            ModulePath::Supplied(path) => {
                args.push("--module-path".to_string());
                args.push(path.display().to_string());
            }
        }
        let args = shell::escape_args(&args);

        let result = roles::ensure_role_dir(module_path.path(), self.reporter)
            .and_then(|role_dir| self.apply_in(role, &role_dir, &args, extras));

        let succeeded = matches!(&result, Ok(invocation) if invocation.success);
        if !succeeded && module_path.is_ephemeral() {
            self.reporter.info(
                "next time pass --module-path if you want to avoid redownloading the role",
            );
        }

        module_path.close();
        result
    }

    fn apply_in(
        &self,
        role: &RoleName,
        role_dir: &Path,
        args: &[String],
        extras: &Extras,
    ) -> Result<Invocation> {
        roles::ensure_role_installed(self.backend, role, role_dir, self.reporter)?;

        let content = playbook::render_playbook(role, role_dir, extras, self.options)?;
        let file = playbook::write_playbook(&content)?;
        self.reporter.success(&format!(
            "created playbook {} for applying role: {}",
            file.path().display(),
            role
        ));
        if !extras.is_empty() {
            self.reporter.info("dynamic playbook content:");
            self.reporter.echo(&content);
        }

        runner::run_playbook(self.backend, role, file.path(), args, self.reporter)
    }
}
