//! Runs the synthesized playbook.

use crate::backend::Backend;
use crate::error::Result;
use crate::report::{Reporter, Status};
use crate::types::{Invocation, RoleName};
use std::path::Path;

/// Run `playbook` through the backend and report the outcome.
///
/// A non-zero exit is returned as a failed [`Invocation`], not an error.
pub fn run_playbook(
    backend: &dyn Backend,
    role: &RoleName,
    playbook: &Path,
    args: &[String],
    reporter: &dyn Reporter,
) -> Result<Invocation> {
    reporter.info(&format!("applying ansible role '{role}'"));

    let invocation = backend.run_playbook(playbook, args)?;

    let (status, word) = if invocation.success {
        (Status::Success, "succeeded")
    } else {
        (Status::Failure, "failed")
    };
    reporter.report(status, &format!("{word} applying ansible role: {role}"));
    Ok(invocation)
}
