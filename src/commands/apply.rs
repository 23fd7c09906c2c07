//! `ansible-role <role>`: apply a single role.

use anyhow::{Context, Result};
use rolekit::backend::ansible::AnsibleBackend;
use rolekit::{
    Client, ConsoleReporter, DEFAULT_COMPONENT, Extras, FAILURE_EXIT_CODE, Invocation, Reporter,
    RoleName,
};

use crate::cli::Cli;
use crate::config::Config;

/// Run the command and return the process exit code.
///
/// The exit code is the runner's own exit code, or 1 if the run was
/// abandoned before the runner finished (e.g. the role could not be
/// installed).
pub fn run(cli: &Cli) -> i32 {
    let reporter = ConsoleReporter::new(DEFAULT_COMPONENT);
    reporter.info(&format!("version {}", env!("CARGO_PKG_VERSION")));

    match execute(cli, &reporter) {
        Ok(invocation) => invocation.code,
        Err(err) => {
            reporter.failure(&format!("{err:#}"));
            log::debug!("run aborted: {err:?}");
            match err.downcast_ref::<rolekit::Error>() {
                Some(e) => Invocation::from_error(e).code,
                None => FAILURE_EXIT_CODE,
            }
        }
    }
}

fn execute(cli: &Cli, reporter: &ConsoleReporter) -> Result<Invocation> {
    let role_name = cli.role_name.as_deref().context("missing role name")?;
    let role = RoleName::new(role_name)?;

    let extras = match cli.env.as_deref() {
        Some(json) => Extras::from_json_str(json).context("Invalid --env")?,
        None => Extras::new(),
    };

    let config = Config::load()?;
    let module_path = cli.module_path().or_else(|| config.module_path());
    log::debug!("module path: {:?}", module_path);

    let client = Client::with_backend(Box::new(AnsibleBackend::new(
        config.galaxy.as_str(),
        config.playbook.as_str(),
    )))
    .with_reporter(Box::new(reporter.clone()))
    .with_options(config.playbook_options.clone());

    Ok(client.apply(&role, module_path.as_deref(), &cli.ansible_args, &extras)?)
}
