//! obsgen - regenerate the OBS Advanced Chataigne module from the obs-websocket protocol

use std::path::PathBuf;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::parser::ValueSource;
use clap::{ArgMatches, Command, CommandFactory, FromArgMatches, Parser};
use tracing_subscriber::EnvFilter;

use obsgen_commands::manifest::DescriptionStyle;
use obsgen_commands::regenerate::{self, ProtocolSource, RegenerateArgs};
use obsgen_runtime::config::{
    DEFAULT_MANIFEST_PATH, DEFAULT_PROTOCOL_URL, DEFAULT_SCRIPT_PATH, PROTOCOL_URL_ENV_VAR,
};

/// Fetch the obs-websocket protocol description and regenerate the embedded
/// API copy in the module script and the commands of module.json.
#[derive(Debug, Parser)]
#[command(name = "obsgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// URL of the protocol description (defaults to the obs-websocket protocol.json on GitHub)
    #[arg(long, env = PROTOCOL_URL_ENV_VAR)]
    protocol_url: Option<String>,

    /// Read the protocol description from a local file instead of downloading it
    #[arg(long, value_name = "PATH")]
    protocol_file: Option<PathBuf>,

    /// Module script containing the generated API region
    #[arg(long, value_name = "PATH", default_value = DEFAULT_SCRIPT_PATH)]
    script: PathBuf,

    /// Module manifest whose commands are regenerated
    #[arg(long, value_name = "PATH", default_value = DEFAULT_MANIFEST_PATH)]
    manifest: PathBuf,

    /// Include the protocol description for optional fields too
    #[arg(long)]
    full_descriptions: bool,

    /// Embed the protocol copy without doubling backslashes, so quoted text stays valid script
    #[arg(long)]
    no_escape_backslashes: bool,

    /// Show what would change without writing any file
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl From<Cli> for RegenerateArgs {
    fn from(cli: Cli) -> Self {
        let source = match (cli.protocol_file, cli.protocol_url) {
            (Some(path), _) => ProtocolSource::File(path),
            (None, Some(url)) => ProtocolSource::Url(url),
            (None, None) => ProtocolSource::Url(DEFAULT_PROTOCOL_URL.to_string()),
        };
        Self {
            source,
            script_path: cli.script,
            manifest_path: cli.manifest,
            description_style: if cli.full_descriptions {
                DescriptionStyle::Full
            } else {
                DescriptionStyle::Legacy
            },
            escape_backslashes: !cli.no_escape_backslashes,
            dry_run: cli.dry_run,
        }
    }
}

/// Parse arguments with `command`.
///
/// A protocol file wins over a URL taken from the environment; only a URL
/// given on the command line conflicts with it.
fn parse_cli<I, T>(mut command: Command, args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let matches = command.try_get_matches_from_mut(args)?;
    if url_on_command_line(&matches) && matches.value_source("protocol_file").is_some() {
        return Err(command.error(
            ErrorKind::ArgumentConflict,
            "the argument '--protocol-file <PATH>' cannot be used with '--protocol-url <PROTOCOL_URL>'",
        ));
    }
    Cli::from_arg_matches(&matches)
}

fn url_on_command_line(matches: &ArgMatches) -> bool {
    matches.value_source("protocol_url") == Some(ValueSource::CommandLine)
}

const fn default_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = parse_cli(Cli::command(), std::env::args_os()).unwrap_or_else(|e| e.exit());

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_level(cli.verbose))),
        )
        .with_writer(std::io::stderr)
        .init();

    regenerate::execute(cli.into()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    // Parse as if the protocol URL variable were unset, whatever the test
    // environment holds.
    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        parse_cli(without_env(), args)
    }

    fn without_env() -> Command {
        Cli::command().mut_arg("protocol_url", |arg| arg.env(None::<&'static str>))
    }

    #[test]
    fn test_defaults_run_full_pipeline() {
        let cli = parse(&["obsgen"]).unwrap();
        let args = RegenerateArgs::from(cli);

        assert_eq!(args.source, ProtocolSource::Url(DEFAULT_PROTOCOL_URL.to_string()));
        assert_eq!(args.script_path, PathBuf::from("OBSAdvanced.js"));
        assert_eq!(args.manifest_path, PathBuf::from("module.json"));
        assert_eq!(args.description_style, DescriptionStyle::Legacy);
        assert!(args.escape_backslashes);
        assert!(!args.dry_run);
    }

    #[test]
    fn test_protocol_file_selects_local_source() {
        let cli = parse(&["obsgen", "--protocol-file", "protocol.json"]).unwrap();
        let args = RegenerateArgs::from(cli);
        assert_eq!(args.source, ProtocolSource::File(PathBuf::from("protocol.json")));
    }

    #[test]
    fn test_protocol_url_flag_selects_url() {
        let cli = parse(&["obsgen", "--protocol-url", "http://localhost/protocol.json"]).unwrap();
        let args = RegenerateArgs::from(cli);
        assert_eq!(
            args.source,
            ProtocolSource::Url("http://localhost/protocol.json".to_string())
        );
    }

    #[test]
    fn test_protocol_file_wins_over_url_from_env() {
        let cli = Cli {
            protocol_url: Some("http://localhost/protocol.json".to_string()),
            ..parse(&["obsgen", "--protocol-file", "protocol.json"]).unwrap()
        };
        let args = RegenerateArgs::from(cli);
        assert_eq!(args.source, ProtocolSource::File(PathBuf::from("protocol.json")));
    }

    #[test]
    fn test_flags_map_to_args() {
        let cli = parse(&[
            "obsgen",
            "--script",
            "module/OBSAdvanced.js",
            "--manifest",
            "module/module.json",
            "--full-descriptions",
            "--no-escape-backslashes",
            "--dry-run",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);

        let args = RegenerateArgs::from(cli);
        assert_eq!(args.script_path, PathBuf::from("module/OBSAdvanced.js"));
        assert_eq!(args.manifest_path, PathBuf::from("module/module.json"));
        assert_eq!(args.description_style, DescriptionStyle::Full);
        assert!(!args.escape_backslashes);
        assert!(args.dry_run);
    }

    #[test]
    fn test_url_and_file_conflict() {
        let err = parse(&[
            "obsgen",
            "--protocol-url",
            "http://localhost/protocol.json",
            "--protocol-file",
            "protocol.json",
        ])
        .err()
        .unwrap();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_default_level() {
        assert_eq!(default_level(0), "warn");
        assert_eq!(default_level(1), "info");
        assert_eq!(default_level(5), "trace");
    }
}
