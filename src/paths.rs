//! Path resolution for ansible-role
//!
//! # Environment Variables
//!
//! - `ANSIBLE_ROLE_CONFIG_DIR` - Override config directory
//!
//! # Path Resolution Priority
//!
//! For config_dir():
//! 1. `ANSIBLE_ROLE_CONFIG_DIR` environment variable
//! 2. `XDG_CONFIG_HOME/ansible-role` (if set)
//! 3. `~/.config/ansible-role`

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Environment variable for config directory override
pub const ENV_CONFIG_DIR: &str = "ANSIBLE_ROLE_CONFIG_DIR";

/// Name of the config file inside the config directory
pub const CONFIG_FILE: &str = "config.toml";

const APP_DIR: &str = "ansible-role";

/// Get the ansible-role config directory path
pub fn config_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(ENV_CONFIG_DIR) {
        let path = expand(&dir);
        log::debug!(
            "Using config dir from {}: {}",
            ENV_CONFIG_DIR,
            path.display()
        );
        return Ok(path);
    }

    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        let path = PathBuf::from(xdg_config).join(APP_DIR);
        log::debug!("Using XDG_CONFIG_HOME: {}", path.display());
        return Ok(path);
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    let path = home.join(".config").join(APP_DIR);
    log::debug!("Using default config dir: {}", path.display());
    Ok(path)
}

/// Get the config file path
pub fn config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE))
}

/// Expand ~ and environment variables in a path string.
///
/// Unknown variables are left as written.
pub fn expand(path: &str) -> PathBuf {
    let expanded = shellexpand::full(path).unwrap_or(std::borrow::Cow::Borrowed(path));
    PathBuf::from(expanded.as_ref())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    /// Run `f` with `key` set to `value`, restoring the old value afterwards.
    ///
    /// # Safety
    /// Uses unsafe env::set_var/remove_var; only call from tests that do
    /// not read the same variable concurrently.
    fn with_env_var<F, R>(key: &str, value: &str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let original = env::var(key).ok();
        // SAFETY: Only this module's tests touch ANSIBLE_ROLE_CONFIG_DIR
        unsafe { env::set_var(key, value) };
        let result = f();
        match original {
            // SAFETY: As above
            Some(v) => unsafe { env::set_var(key, v) },
            None => unsafe { env::remove_var(key) },
        }
        result
    }

    #[test]
    fn test_config_dir_and_file_env_override() {
        with_env_var(ENV_CONFIG_DIR, "/custom/ansible-role", || {
            assert_eq!(config_dir().unwrap(), PathBuf::from("/custom/ansible-role"));
            assert_eq!(
                config_file().unwrap(),
                PathBuf::from("/custom/ansible-role/config.toml")
            );
        });
    }

    #[test]
    fn test_expand_tilde() {
        let home = dirs::home_dir().unwrap();
        assert_eq!(expand("~/roles"), home.join("roles"));
    }

    #[test]
    fn test_expand_absolute_unchanged() {
        assert_eq!(expand("/tmp/fixed"), PathBuf::from("/tmp/fixed"));
    }

    #[test]
    fn test_expand_unknown_variable_left_alone() {
        assert_eq!(
            expand("$ANSIBLE_ROLE_SURELY_UNSET_VAR/x"),
            PathBuf::from("$ANSIBLE_ROLE_SURELY_UNSET_VAR/x")
        );
    }
}
