//! Command-line interface for zencode
//! Expands abbreviations given on the command line and prints the result.
//!
//! Usage:
//!   zencode markup `<abbr>` [--dialect `<d>`] [--ext `<ext>`]   - Expand a markup abbreviation
//!   zencode css `<abbr>` [--syntax `<s>`]                       - Expand a CSS abbreviation
//!   zencode ast `<abbr>`                                        - Print the parsed tree as JSON
//!   zencode lorem `<count>`                                     - Print placeholder text
//!
//! Every subcommand accepts `--config <file>` layered over the built-in defaults.
//! Set `ZENCODE_LOG=debug` to see cache and fallback decisions on stderr.

use clap::{Arg, ArgMatches, Command};
use tracing_subscriber::EnvFilter;
use zencode::settings::{load_defaults, Loader, Settings};
use zencode::{expand_css, expand_markup, lorem, markup};

fn config_arg() -> Arg {
    Arg::new("config")
        .long("config")
        .short('c')
        .help("Settings file layered over the defaults")
}

fn seed_arg() -> Arg {
    Arg::new("seed")
        .long("seed")
        .help("Seed for generated text")
        .value_parser(clap::value_parser!(u64))
}

fn abbreviation_arg() -> Arg {
    Arg::new("abbreviation")
        .help("The abbreviation to expand")
        .required(true)
        .index(1)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("ZENCODE_LOG"))
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("zencode")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Expands abbreviations into markup and CSS")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("markup")
                .about("Expand a markup abbreviation")
                .arg(abbreviation_arg())
                .arg(
                    Arg::new("dialect")
                        .long("dialect")
                        .short('d')
                        .help("Output dialect when the abbreviation names no filter")
                        .value_parser(["html", "commented-html", "haml", "hiccup"]),
                )
                .arg(
                    Arg::new("ext")
                        .long("ext")
                        .help("Extension of the target document (e.g. 'haml', 'cljs')"),
                )
                .arg(
                    Arg::new("class-attr")
                        .long("class-attr")
                        .help("Attribute name used for classes (e.g. 'className')"),
                )
                .arg(config_arg())
                .arg(seed_arg()),
        )
        .subcommand(
            Command::new("css")
                .about("Expand a CSS abbreviation")
                .arg(abbreviation_arg())
                .arg(
                    Arg::new("syntax")
                        .long("syntax")
                        .short('s')
                        .help("CSS syntax")
                        .value_parser(["standard", "indented"]),
                )
                .arg(config_arg()),
        )
        .subcommand(
            Command::new("ast")
                .about("Print the parsed markup tree as JSON")
                .arg(abbreviation_arg())
                .arg(config_arg()),
        )
        .subcommand(
            Command::new("lorem")
                .about("Print placeholder text")
                .arg(
                    Arg::new("count")
                        .help("Number of words")
                        .required(true)
                        .index(1)
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(seed_arg()),
        )
        .get_matches();

    let result = match matches.subcommand() {
        Some(("markup", sub)) => handle_markup_command(sub),
        Some(("css", sub)) => handle_css_command(sub),
        Some(("ast", sub)) => handle_ast_command(sub),
        Some(("lorem", sub)) => handle_lorem_command(sub),
        _ => unreachable!(),
    };

    match result {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

type CliResult = Result<String, Box<dyn std::error::Error>>;

/// Load settings, applying the overrides named by `overrides` (flag, settings key).
fn load_settings(matches: &ArgMatches, overrides: &[(&str, &str)]) -> Result<Settings, zencode::ConfigError> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    for (flag, key) in overrides {
        if let Some(value) = matches.get_one::<String>(flag) {
            loader = loader.set_override(key, value.as_str())?;
        }
    }
    loader.build()
}

fn handle_markup_command(matches: &ArgMatches) -> CliResult {
    let abbreviation = matches.get_one::<String>("abbreviation").unwrap();
    let settings = load_settings(
        matches,
        &[
            ("dialect", "render.output_dialect"),
            ("ext", "render.document_extension"),
            ("class-attr", "render.class_attribute_name"),
        ],
    )?;
    let mut ctx = settings.context(matches.get_one::<u64>("seed").copied())?;
    Ok(expand_markup(&mut ctx, abbreviation, &settings.render)?)
}

fn handle_css_command(matches: &ArgMatches) -> CliResult {
    let abbreviation = matches.get_one::<String>("abbreviation").unwrap();
    let settings = load_settings(matches, &[("syntax", "render.css_syntax")])?;
    let mut ctx = settings.context(None)?;
    Ok(expand_css(&mut ctx, abbreviation, &settings.render)?)
}

fn handle_ast_command(matches: &ArgMatches) -> CliResult {
    let abbreviation = matches.get_one::<String>("abbreviation").unwrap();
    let settings = load_settings(matches, &[])?;
    let mut ctx = settings.context(None)?;
    let tree = markup::parse(&mut ctx, abbreviation.trim())?;
    Ok(serde_json::to_string_pretty(&tree)?)
}

fn handle_lorem_command(matches: &ArgMatches) -> CliResult {
    let count = *matches.get_one::<usize>("count").unwrap();
    let mut ctx = load_defaults()?.context(matches.get_one::<u64>("seed").copied())?;
    Ok(lorem::generate(count, ctx.rng()))
}
