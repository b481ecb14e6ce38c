use std::{ffi::OsStr, process::Command};

use crate::{
    context::Context,
    error::{Error, Result},
};

/// Runs `program` to completion, blocking the caller. A non-zero exit is
/// reported as [`Error::ExternalProcess`] so its status reaches the shell.
pub fn run<I, S>(program: &str, args: I, ctx: &Context) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    ctx.check_cancelled()?;
    tracing::debug!("Running {program}");
    let status = Command::new(program)
        .args(args)
        .status()
        .map_err(|err| Error::io(program, err))?;
    if status.success() {
        return Ok(());
    }
    tracing::debug!("{program} finished with {status}");
    Err(Error::ExternalProcess {
        program: program.to_string(),
        code: status.code(),
    })
}
