//! CLI argument parsing module
//!
//! This module handles command-line argument parsing and application entry point.

use crate::codec;
use crate::config::{Action, Config, InputSource, OutputConfig};
use crate::error::{RcookieError, Result};
use crate::exit_code::{exit_code_for_error, EXIT_NOTHING_INSERTED};
use crate::i18n::localize_error;
use crate::inserter::CookieInserter;
use crate::output::{render_records, with_trailing_newline, OutputWriter};
use crate::session::Session;
use crate::store::JarStore;
use crate::utils::{FileUtils, UrlUtils};
use clap::{Arg, ArgAction, ArgMatches, Command};

/// Main entry point for the CLI application
pub fn run() {
    let matches = create_app().get_matches();
    crate::logging::init(matches.get_flag("verbose"));

    let code = match run_with_args(&matches) {
        Ok(code) => code,
        Err(e) => {
            let writer = OutputWriter::new(OutputConfig {
                silent: matches.get_flag("silent"),
                ..OutputConfig::default()
            });
            let _ = writer.write_error(&localize_error(&e));
            exit_code_for_error(&e)
        }
    };
    std::process::exit(code);
}

/// Run rcookie with parsed command line arguments, returning the exit status
fn run_with_args(matches: &ArgMatches) -> Result<i32> {
    let config = build_config_from_args(matches)?;
    let writer = OutputWriter::new(config.output.clone());
    writer.write_verbose(&format!("cookie jar: {:?}", config.jar))?;

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| RcookieError::Config(format!("Failed to create async runtime: {}", e)))?;

    rt.block_on(async {
        let store = JarStore::new(&config.jar);
        match &config.action {
            Action::Export { url } => {
                let url = UrlUtils::validate_url(url)?;
                let session = Session::capture(&store, &url).await?;
                writer.write_verbose(&format!(
                    "{} cookies for {}",
                    session.count(),
                    session.domain()
                ))?;
                let payload = if config.output.format_json {
                    session.export_json()?
                } else {
                    session.export_text()?
                };
                writer.write(&with_trailing_newline(payload))?;
                Ok(0)
            }
            Action::Import { url, input } => {
                let url = UrlUtils::validate_url(url)?;
                let records = codec::parse(&input.read()?);
                writer.write_verbose(&format!("{} cookies parsed", records.len()))?;
                let result = CookieInserter::new(&store).insert(&records, &url).await;
                writer.write_status(result.message())?;
                Ok(if result.is_success() {
                    0
                } else {
                    EXIT_NOTHING_INSERTED
                })
            }
            Action::Parse { input } => {
                let records = codec::parse(&input.read()?);
                writer.write(&render_records(&records, config.output.format_json)?)?;
                Ok(0)
            }
        }
    })
}

/// Create the CLI application structure
fn create_app() -> Command {
    Command::new("rcookie")
        .version(crate::VERSION)
        .about("Capture site cookies as text and restore them into a cookie jar")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("jar")
                .short('j')
                .long("jar")
                .value_name("FILE")
                .env("RCOOKIE_JAR")
                .global(true)
                .help("Netscape cookie jar used as the cookie store"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .help("Verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("silent")
                .short('s')
                .long("silent")
                .global(true)
                .help("Silent mode")
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("export")
                .about("Print the cookies stored for a site as name=value pairs")
                .arg(url_arg())
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("FILE")
                        .help("Write output to file"),
                )
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("import")
                .about("Apply name=value pairs to the cookie jar for a site")
                .arg(url_arg())
                .arg(cookies_arg(2))
                .arg(file_arg()),
        )
        .subcommand(
            Command::new("parse")
                .about("Show the cookies a payload contains")
                .arg(cookies_arg(1))
                .arg(file_arg())
                .arg(json_arg()),
        )
}

fn url_arg() -> Arg {
    Arg::new("url")
        .help("URL of the site the cookies belong to")
        .required(true)
        .index(1)
}

fn cookies_arg(index: usize) -> Arg {
    Arg::new("cookies")
        .value_name("COOKIES")
        .help("Cookie payload such as 'a=1; b=2' (read from stdin when omitted)")
        .index(index)
}

fn file_arg() -> Arg {
    Arg::new("file")
        .short('f')
        .long("file")
        .value_name("FILE")
        .help("Read the cookie payload from a file")
        .conflicts_with("cookies")
}

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .help("Print JSON instead of text")
        .action(ArgAction::SetTrue)
}

/// Build configuration from command line arguments
fn build_config_from_args(matches: &ArgMatches) -> Result<Config> {
    let mut config = Config::default();

    if let Some(jar) = matches.get_one::<String>("jar") {
        config.jar = FileUtils::expand_path(jar)?;
    }

    config.output.verbose = matches.get_flag("verbose");
    config.output.silent = matches.get_flag("silent");

    config.action = match matches.subcommand() {
        Some(("export", sub)) => {
            if let Some(output_file) = sub.get_one::<String>("output") {
                config.output.file = Some(FileUtils::expand_path(output_file)?);
            }
            config.output.format_json = sub.get_flag("json");
            Action::Export {
                url: required_url(sub)?,
            }
        }
        Some(("import", sub)) => Action::Import {
            url: required_url(sub)?,
            input: input_source(sub)?,
        },
        Some(("parse", sub)) => {
            config.output.format_json = sub.get_flag("json");
            Action::Parse {
                input: input_source(sub)?,
            }
        }
        _ => return Err(RcookieError::Config("No command given".to_string())),
    };

    Ok(config)
}

fn required_url(matches: &ArgMatches) -> Result<String> {
    matches
        .get_one::<String>("url")
        .cloned()
        .ok_or_else(|| RcookieError::Config("A URL is required".to_string()))
}

fn input_source(matches: &ArgMatches) -> Result<InputSource> {
    if let Some(file) = matches.get_one::<String>("file") {
        return Ok(InputSource::File(FileUtils::expand_path(file)?));
    }
    Ok(match matches.get_one::<String>("cookies") {
        Some(text) => InputSource::Inline(text.clone()),
        None => InputSource::Stdin,
    })
}
