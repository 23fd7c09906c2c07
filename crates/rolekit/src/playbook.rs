//! Playbook synthesis.
//!
//! Applying a single role needs a playbook, so a throwaway one is rendered
//! from a fixed template: one play against all hosts whose role list has
//! exactly one entry. Extras become inline role parameters:
//!
//! ```yaml
//! - hosts: all
//!   become: yes
//!   become_method: sudo
//!   roles:
//!   - {role: /tmp/x/roles/site.role, flag: true}
//! ```

use crate::error::Result;
use crate::types::{Extras, PlaybookOptions, RoleName, validate_extra_name};
use minijinja::{Environment, UndefinedBehavior, Value, context};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

const PLAYBOOK_TEMPLATE: &str = "\
- hosts: all
  become: {{ escalate }}
  become_method: {{ become_method }}
  roles:
  - {role: {{ role_path }}{{ extras }}}
";

/// Serialize extras into the `, key: json` suffix placed after the role path.
///
/// Keys are written bare, so each must be a plain identifier.
pub fn extras_suffix(extras: &Extras) -> Result<String> {
    let mut suffix = String::new();
    for (name, value) in extras.iter() {
        validate_extra_name(name)?;
        suffix.push_str(&format!(", {}: {}", name, value.to_json()?));
    }
    Ok(suffix)
}

/// Render a template with strict undefined handling: a placeholder with no
/// value is an error instead of an empty string.
fn render(template: &str, ctx: Value) -> Result<String> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    Ok(env.render_str(template, ctx)?)
}

/// Render the playbook that applies `role` from `role_dir` to all hosts.
pub fn render_playbook(
    role: &RoleName,
    role_dir: &Path,
    extras: &Extras,
    options: &PlaybookOptions,
) -> Result<String> {
    let role_path = role_dir.join(role.as_str());
    let ctx = context! {
        escalate => if options.escalate { "yes" } else { "no" },
        become_method => options.become_method.as_str(),
        role_path => role_path.display().to_string(),
        extras => extras_suffix(extras)?,
    };
    render(PLAYBOOK_TEMPLATE, ctx)
}

/// Write playbook content to a named temporary file.
///
/// The file is removed when the returned handle is dropped.
pub fn write_playbook(content: &str) -> Result<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .prefix("ansible-role-")
        .suffix(".yml")
        .tempfile()?;
    file.write_all(content.as_bytes())?;
    file.flush()?;
    log::debug!("wrote playbook to {}", file.path().display());
    Ok(file)
}
