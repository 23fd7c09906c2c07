use clap::Parser;
use clap_complete::Shell;
use std::ffi::OsString;
use std::path::PathBuf;

/// Own options that take a value, recognized anywhere on the command line.
const VALUE_FLAGS: [&str; 4] = ["-M", "--module-path", "--env", "--completions"];

/// Own options without a value, recognized anywhere on the command line.
const SWITCHES: [&str; 4] = ["-h", "--help", "-V", "--version"];

#[derive(Parser, Debug)]
#[command(name = "ansible-role")]
#[command(author = "Alberto Cavalcante")]
#[command(version)]
#[command(about = "The missing ansible-role command: apply a single role without editing a playbook", long_about = None)]
#[command(after_help = "Options above may appear anywhere. The first bare word is the role; \
any other argument is passed to ansible-playbook, e.g.\n  ansible-role geerlingguy.git -i web1, --check")]
pub struct Cli {
    /// Role to apply (e.g. geerlingguy.git)
    #[arg(value_name = "ROLE_NAME", required_unless_present = "completions")]
    pub role_name: Option<String>,

    /// Module path to reuse/populate; a temporary one is used when omitted
    #[arg(short = 'M', long, value_name = "DIR", env = "ANSIBLE_ROLE_MODULE_PATH")]
    pub module_path: Option<String>,

    /// JSON object of variables passed to the role
    #[arg(long, value_name = "JSON")]
    pub env: Option<String>,

    /// Generate shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,

    /// Arguments forwarded verbatim to ansible-playbook
    #[arg(value_name = "ANSIBLE_ARGS", last = true, allow_hyphen_values = true)]
    pub ansible_args: Vec<String>,
}

impl Cli {
    /// Parse the process arguments, exiting on usage errors.
    pub fn parse_args() -> Self {
        Self::parse_from(split_args(std::env::args_os()))
    }

    /// Parse `args` (program name first) after splitting out forwarded ones.
    pub fn try_parse_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(split_args(args))
    }

    /// Module path given on the command line, with ~ expanded
    pub fn module_path(&self) -> Option<PathBuf> {
        self.module_path.as_deref().map(crate::paths::expand)
    }
}

/// Reorder a raw argv so clap sees our own options and the role first and
/// every other argument after `--`, in its original order.
///
/// Our options (`-M`, `--module-path`, `--env`, `--completions` with their
/// values, including `--opt=value` and `-Mvalue`, plus help/version) are
/// picked out wherever they occur. The first remaining word that does not
/// start with `-` is the role. Everything after a literal `--` is forwarded
/// untouched. Unknown options that take a value must come after the role,
/// otherwise their value is taken as the role name.
pub fn split_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args = args.into_iter().map(Into::into);
    let mut own: Vec<OsString> = args.next().into_iter().collect();
    let mut role = None;
    let mut forwarded = Vec::new();

    while let Some(arg) = args.next() {
        let Some(text) = arg.to_str() else {
            forwarded.push(arg);
            continue;
        };

        if text == "--" {
            forwarded.extend(args.by_ref());
            break;
        }

        if VALUE_FLAGS.contains(&text) {
            own.push(arg);
            own.extend(args.next());
        } else if SWITCHES.contains(&text) || has_inline_value(text) {
            own.push(arg);
        } else if role.is_none() && !text.starts_with('-') {
            role = Some(arg);
        } else {
            forwarded.push(arg);
        }
    }

    if let Some(role) = role {
        own.push(role);
        if !forwarded.is_empty() {
            own.push("--".into());
            own.extend(forwarded);
        }
    }
    own
}

/// `--module-path=x`, `--env=x`, `--completions=x` or `-Mx`.
fn has_inline_value(arg: &str) -> bool {
    let long = VALUE_FLAGS
        .iter()
        .filter(|flag| flag.starts_with("--"))
        .any(|flag| arg.strip_prefix(flag).is_some_and(|rest| rest.starts_with('=')));
    long || (arg.starts_with("-M") && arg.len() > 2)
}

// ============================================================================
// Tests
// ============================================================================
