use std::{
    fs::OpenOptions,
    io::{self, Write},
};

use crate::{
    config,
    context::Context,
    error::{Error, Result},
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(clap::Args, Debug, Clone)]
#[command(long_about = None)]
pub struct Version {}

impl Version {
    pub fn run(self, _ctx: &Context, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "{VERSION}").map_err(Error::Output)
    }
}

#[derive(clap::Args, Debug, Clone)]
#[command(long_about = None, name = "init")]
pub struct Initialize {}

impl Initialize {
    pub fn run(self, ctx: &Context, out: &mut dyn Write) -> Result<()> {
        let location = config::resolve(ctx.options.file.as_deref())?;
        let path = location.config_path();
        ctx.check_cancelled()?;

        let file = OpenOptions::new().write(true).create_new(true).open(&path);
        match file {
            Ok(file) => drop(file),
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                return Err(Error::ConfigExists { path });
            }
            Err(err) => return Err(Error::io(&path, err)),
        }
        tracing::info!("Created {}", path.display());
        writeln!(out, "Written config to {}", path.display()).map_err(Error::Output)
    }
}

#[derive(clap::Args, Debug, Clone)]
#[command(long_about = None)]
pub struct Generate {}

impl Generate {
    pub fn run(self, ctx: &Context, out: &mut dyn Write) -> Result<()> {
        let location = config::resolve(ctx.options.file.as_deref())?;
        tracing::debug!(
            "Config directory {}, file {}",
            location.directory.display(),
            location.file_name.as_deref().unwrap_or(config::DEFAULT_CONFIG_FILE)
        );
        let path = location.config_path();
        let document = config::load(&path, ctx)?;
        if document.is_null() {
            tracing::info!("{} is empty", path.display());
        }
        ctx.check_cancelled()?;

        // SQL parsing and code emission are not wired in yet.
        writeln!(
            out,
            "Loaded {}, no code generators are available yet",
            path.display()
        )
        .map_err(Error::Output)
    }
}
