//! Role directory resolution and role installation.

use crate::backend::Backend;
use crate::error::{Error, Result};
use crate::report::Reporter;
use crate::types::RoleName;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the role directory under a module path.
pub const ROLES_DIR: &str = "roles";

/// Ensure `<module_path>/roles` exists, creating it (and any missing
/// parents) if needed. Returns the role directory.
pub fn ensure_role_dir(module_path: &Path, reporter: &dyn Reporter) -> Result<PathBuf> {
    let role_dir = module_path.join(ROLES_DIR);
    if !role_dir.exists() {
        reporter.info(&format!(
            "ansible role-dir does not exist at '{}', creating it",
            role_dir.display()
        ));
        fs::create_dir_all(&role_dir)?;
    }
    Ok(role_dir)
}

/// Whether `role` has a top-level entry in `role_dir`.
///
/// Only the entry name is checked. A half-downloaded role directory counts
/// as installed.
pub fn is_role_present(role: &RoleName, role_dir: &Path) -> Result<bool> {
    for entry in fs::read_dir(role_dir)? {
        if entry?.file_name() == role.as_str() {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Package manager arguments that install `role` into `role_dir`.
pub fn install_args(role: &RoleName, role_dir: &Path) -> Vec<String> {
    vec![
        "install".to_string(),
        "-p".to_string(),
        role_dir.display().to_string(),
        role.to_string(),
    ]
}

/// Make sure `role` is present in `role_dir`, installing it with the
/// package manager if it is missing.
///
/// A failed install is fatal; there is no retry.
pub fn ensure_role_installed(
    backend: &dyn Backend,
    role: &RoleName,
    role_dir: &Path,
    reporter: &dyn Reporter,
) -> Result<()> {
    if !is_role_present(role, role_dir)? {
        reporter.failure(&format!(
            "role '{}' not found in {}",
            role,
            role_dir.display()
        ));
        let invocation = backend.run_galaxy(&install_args(role, role_dir))?;
        if !invocation.success {
            return Err(Error::RoleInstall {
                role: role.to_string(),
                code: invocation.code,
            });
        }
    } else {
        log::debug!("role {} already present in {}", role, role_dir.display());
    }

    reporter.success(&format!(
        "ansible role '{}' installed to '{}'",
        role,
        role_dir.display()
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Status;
    use crate::testing::{RecordingBackend, RecordingReporter};
    use tempfile::TempDir;

    fn role(name: &str) -> RoleName {
        RoleName::new(name).unwrap()
    }

    #[test]
    fn test_ensure_role_dir_creates_and_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let reporter = RecordingReporter::new();

        let role_dir = ensure_role_dir(dir.path(), &reporter).unwrap();
        assert_eq!(role_dir, dir.path().join("roles"));
        assert!(role_dir.is_dir());
        assert_eq!(reporter.lines().len(), 1);
        assert!(reporter.contains(Status::Info, "creating it"));

        let again = ensure_role_dir(dir.path(), &reporter).unwrap();
        assert_eq!(again, role_dir);
        assert_eq!(reporter.lines().len(), 1);

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_ensure_role_dir_creates_missing_parents() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("a").join("b");
        let role_dir = ensure_role_dir(&base, &RecordingReporter::new()).unwrap();
        assert!(role_dir.is_dir());
    }

    #[test]
    fn test_present_role_skips_install() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("known.role")).unwrap();
        let backend = RecordingBackend::new();
        let reporter = RecordingReporter::new();

        ensure_role_installed(&backend, &role("known.role"), dir.path(), &reporter).unwrap();

        assert!(backend.calls().is_empty());
        assert!(reporter.contains(Status::Success, "ansible role 'known.role' installed to"));
    }

    #[test]
    fn test_missing_role_runs_install_with_exact_args() {
        let dir = TempDir::new().unwrap();
        let backend = RecordingBackend::new();
        let reporter = RecordingReporter::new();

        ensure_role_installed(&backend, &role("site.role"), dir.path(), &reporter).unwrap();

        assert_eq!(
            backend.galaxy_calls(),
            vec![vec![
                "install".to_string(),
                "-p".to_string(),
                dir.path().display().to_string(),
                "site.role".to_string(),
            ]]
        );
        assert!(reporter.contains(Status::Failure, "role 'site.role' not found in"));
        assert!(reporter.contains(Status::Success, "installed to"));
    }

    #[test]
    fn test_failed_install_is_role_install_error() {
        let dir = TempDir::new().unwrap();
        let backend = RecordingBackend::new().galaxy_exit(1);
        let reporter = RecordingReporter::new();

        let err = ensure_role_installed(&backend, &role("rolename.doesntexist"), dir.path(), &reporter)
            .unwrap_err();

        assert!(matches!(
            err,
            Error::RoleInstall { ref role, code: 1 } if role == "rolename.doesntexist"
        ));
        assert!(!reporter.contains(Status::Success, "installed to"));
    }

    #[test]
    fn test_partial_role_directory_counts_as_installed() {
        // Name match only: an empty directory is treated as a full install.
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("half.done")).unwrap();
        let backend = RecordingBackend::new();

        ensure_role_installed(&backend, &role("half.done"), dir.path(), &RecordingReporter::new())
            .unwrap();

        assert!(backend.galaxy_calls().is_empty());
    }

    #[test]
    fn test_is_role_present_requires_exact_name() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("geerlingguy.git")).unwrap();

        assert!(is_role_present(&role("geerlingguy.git"), dir.path()).unwrap());
        assert!(!is_role_present(&role("geerlingguy"), dir.path()).unwrap());
        assert!(!is_role_present(&role("geerlingguy.git2"), dir.path()).unwrap());
    }

    #[test]
    fn test_is_role_present_missing_dir_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = is_role_present(&role("x.y"), &dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
