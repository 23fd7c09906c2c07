mod cli;
mod commands;
mod config;
mod paths;

use clap::CommandFactory;
use clap_complete::generate;
use cli::Cli;
use std::io;

/// Environment variable holding the log filter (e.g. `debug`)
const ENV_LOG: &str = "ANSIBLE_ROLE_LOG";

fn main() {
    let cli = Cli::parse_args();

    // -v and friends belong to ansible-playbook, so the level comes from the env
    env_logger::Builder::from_env(env_logger::Env::default().filter_or(ENV_LOG, "warn"))
        .format_timestamp(None)
        .init();

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "ansible-role", &mut io::stdout());
        return;
    }

    std::process::exit(commands::apply::run(&cli));
}
