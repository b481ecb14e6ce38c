use std::{
    ffi::OsString,
    io::{self, Write},
};

use clap::{
    CommandFactory, Parser, Subcommand,
    error::{ContextKind, ContextValue, ErrorKind},
};

use crate::{
    commands::{Generate, Initialize, Version},
    context::{Cancellation, Context, GlobalOptions},
    error::{Error, Result},
    logging,
};

#[derive(Parser, Debug)]
#[command(name = "pgql", bin_name = "pgql", version, arg_required_else_help = true)]
pub struct Cli {
    /// specify an alternate config file (default: pgql.yaml)
    #[arg(short, long, global = true, value_name = "FILE")]
    file: Option<String>,

    /// Show debug information
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the pgql version number
    Version(Version),
    /// Create an empty pgql.yaml settings file
    Init(Initialize),
    /// Generate source code from SQL
    Generate(Generate),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Version(_) => "version",
            Command::Init(_) => "init",
            Command::Generate(_) => "generate",
        }
    }

    fn run(self, ctx: &Context, out: &mut dyn Write) -> Result<()> {
        match self {
            Command::Version(args) => args.run(ctx, out),
            Command::Init(args) => args.run(ctx, out),
            Command::Generate(args) => args.run(ctx, out),
        }
    }
}

/// Parses `args`, runs the selected command against the real stdout and
/// stderr, and returns the process exit code.
pub fn run<I, T>(args: I, cancellation: Cancellation) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    run_with(args, cancellation, &mut io::stdout(), &mut io::stderr())
}

pub fn run_with<I, T>(
    args: I,
    cancellation: Cancellation,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => return report_parse_error(error, out, err),
    };
    logging::init(cli.debug);

    let Cli {
        file,
        debug,
        command,
    } = cli;
    let ctx = Context::new(GlobalOptions { file, debug }, cancellation);
    let name = command.name();
    let _span = tracing::debug_span!("command", name).entered();

    match command.run(&ctx, out) {
        Ok(()) => 0,
        Err(error) => {
            tracing::debug!("{name} failed: {error:?}");
            let _ = writeln!(err, "error: {error}");
            error.exit_code()
        }
    }
}

fn report_parse_error(error: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    match error.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            let _ = write!(out, "{}", error.render());
            0
        }
        ErrorKind::InvalidSubcommand => {
            let name = match error.get(ContextKind::InvalidSubcommand) {
                Some(ContextValue::String(name)) => name.clone(),
                _ => String::new(),
            };
            let unknown = Error::UnknownCommand(name);
            let _ = writeln!(err, "error: {unknown}\n\n{}", Cli::command().render_usage());
            unknown.exit_code()
        }
        _ => {
            let _ = write!(err, "{}", error.render());
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, run_with};
    use crate::context::Cancellation;

    fn run(args: &[&str]) -> (i32, String, String) {
        let mut out = Vec::<u8>::new();
        let mut err = Vec::<u8>::new();
        let code = run_with(
            args.iter().copied(),
            Cancellation::default(),
            &mut out,
            &mut err,
        );
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn every_registered_name_dispatches_to_itself() {
        let command = Cli::command();
        let names: Vec<_> = command
            .get_subcommands()
            .map(|sub| sub.get_name().to_string())
            .filter(|name| name != "help")
            .collect();
        assert_eq!(names, ["version", "init", "generate"]);
        for name in names {
            let cli = Cli::try_parse_from(["pgql", name.as_str()]).unwrap();
            assert_eq!(cli.command.name(), name);
        }
    }

    #[test]
    fn file_flag_is_global() {
        for args in [
            ["pgql", "-f", "a.yaml", "generate"],
            ["pgql", "generate", "--file", "a.yaml"],
        ] {
            let cli = Cli::try_parse_from(args).unwrap();
            assert_eq!(cli.file.as_deref(), Some("a.yaml"));
        }
        let cli = Cli::try_parse_from(["pgql", "init"]).unwrap();
        assert_eq!(cli.file, None);
    }

    #[test]
    fn empty_file_flag_still_parses() {
        let cli = Cli::try_parse_from(["pgql", "-f", "", "generate"]).unwrap();
        assert_eq!(cli.file.as_deref(), Some(""));
    }

    #[test]
    fn unknown_command_prints_usage() {
        let (code, out, err) = run(&["pgql", "deploy"]);
        assert_eq!(code, 1);
        assert!(out.is_empty());
        assert!(err.starts_with("error: unknown command \"deploy\" for \"pgql\""), "{err}");
        assert!(err.contains("Usage: pgql"), "{err}");
    }

    #[test]
    fn runtime_errors_skip_usage() {
        let (code, out, err) = run(&["pgql", "-f", "", "generate"]);
        assert_eq!(code, 1);
        assert!(out.is_empty());
        assert_eq!(err, "error: error parsing config: file argument is empty\n");
    }

    #[test]
    fn version_ignores_file_flag() {
        let (code, out, err) = run(&["pgql", "-f", "config/custom.yaml", "version"]);
        assert_eq!(code, 0);
        assert_eq!(out, format!("{}\n", env!("CARGO_PKG_VERSION")));
        assert!(err.is_empty());
    }

    #[test]
    fn help_goes_to_stdout() {
        let (code, out, _) = run(&["pgql", "--help"]);
        assert_eq!(code, 0);
        assert!(out.contains("generate"), "{out}");
    }
}
