//! Shell quoting for the runner command line.
//!
//! The runner is launched through `sh -c`, so forwarded arguments are
//! joined into one line. Arguments containing whitespace get POSIX single
//! quotes; everything else is passed to the shell untouched.

use std::path::Path;

/// Characters that never need quoting.
fn is_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '@' | '%' | '+' | '=' | ':' | ',' | '.' | '/' | '-')
}

/// Quote a string for a POSIX shell.
///
/// Strings made only of safe characters are returned unchanged. Otherwise
/// the string is wrapped in single quotes, with embedded single quotes
/// written as `'"'"'`.
pub fn quote(s: &str) -> String {
    if s.is_empty() {
        return "''".to_string();
    }
    if s.chars().all(is_safe) {
        return s.to_string();
    }
    format!("'{}'", s.replace('\'', "'\"'\"'"))
}

/// Quote every argument that contains whitespace.
pub fn escape_args(args: &[String]) -> Vec<String> {
    args.iter()
        .map(|arg| {
            if arg.chars().any(char::is_whitespace) {
                quote(arg)
            } else {
                arg.clone()
            }
        })
        .collect()
}

/// Build `<program> <playbook> <args...>` for `sh -c`.
///
/// `args` must already be escaped with [`escape_args`].
pub fn command_line(program: &str, playbook: &Path, args: &[String]) -> String {
    let mut parts = vec![quote(program), quote(&playbook.to_string_lossy())];
    parts.extend(args.iter().cloned());
    parts.join(" ")
}
