//! Command-line interface for ticha
//! Converts TEI transcriptions into the paginated, glossed HTML shown on the Ticha site.
//!
//! Usage:
//!   ticha convert `<tei>` [-o `<out>`] [--text `<id>`] [--flex `<export>` | --no-flex]
//!   ticha outline `<tei>` [-o `<out>`] [--text `<id>`] [--first-page `<n>`]
//!   ticha preprocess `<tei>` [-o `<out>`]
//!   ticha flex-to-json `<flex.xml>` [-o `<out.json>`]
//!
//! Settings come from the built-in defaults, then `ticha.toml` in the working directory, then
//! `--config <file>`, then the command line.

mod error;

use clap::builder::PossibleValuesParser;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use error::CliError;
use log::{info, warn};
use std::path::{Path, PathBuf};
use ticha_config::{Loader, TichaConfig, PROJECT_FILE};
use ticha_magic::flex::convert_flex_file;
use ticha_magic::stylesheet::STYLESHEET_NAMES;
use ticha_magic::{
    generate_html, generate_outline, preprocess_xml, publish, stylesheet_by_name, AbbrChoice,
    ConvertOptions, GlossDictionary, PublishArtifact, PublishResult, PublishSpec, SpellChoice,
};
use ticha_parser::xml::parse_str;

type CliResult<T> = Result<T, CliError>;

fn main() {
    let matches = build_cli().get_matches();
    init_logging(matches.get_count("verbose"));
    if let Err(err) = run(&matches) {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn build_cli() -> Command {
    let input = Arg::new("input")
        .help("Input file")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .index(1);
    let output = Arg::new("output")
        .long("output")
        .short('o')
        .help("Write to this file instead of stdout")
        .value_parser(value_parser!(PathBuf));
    let text = Arg::new("text")
        .long("text")
        .short('t')
        .help("Text id, e.g. levanto_arte (default: inferred from the file name)");

    Command::new("ticha")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Converts Ticha TEI transcriptions into paginated, glossed HTML")
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Configuration file layered over the defaults and ticha.toml")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .help("Log progress (-v) or everything (-vv)")
                .action(ArgAction::Count),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a TEI document to paginated HTML")
                .arg(input.clone())
                .arg(output.clone())
                .arg(text.clone())
                .arg(
                    Arg::new("spellchoice")
                        .long("spellchoice")
                        .help("Spelling to show for <choice> elements")
                        .value_parser(PossibleValuesParser::new(
                            SpellChoice::ALL.map(|choice| choice.as_str()),
                        )),
                )
                .arg(
                    Arg::new("abbrchoice")
                        .long("abbrchoice")
                        .help("Show abbreviations as written or expanded")
                        .value_parser(PossibleValuesParser::new(
                            AbbrChoice::ALL.map(|choice| choice.as_str()),
                        )),
                )
                .arg(
                    Arg::new("flex")
                        .long("flex")
                        .help("FLEx export to take glosses from (.json or interlinear .xml)")
                        .value_parser(value_parser!(PathBuf))
                        .conflicts_with("no-flex"),
                )
                .arg(
                    Arg::new("no-flex")
                        .long("no-flex")
                        .help("Do not insert glosses")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format: xml, html or preview"),
                )
                .arg(
                    Arg::new("stylesheet")
                        .long("stylesheet")
                        .help("How to read the input: tei, or none for pseudo-HTML")
                        .value_parser(PossibleValuesParser::new(STYLESHEET_NAMES)),
                ),
        )
        .subcommand(
            Command::new("outline")
                .about("Build the table of contents of a TEI document")
                .arg(input.clone())
                .arg(output.clone())
                .arg(text)
                .arg(
                    Arg::new("first-page")
                        .long("first-page")
                        .help("Page number before the first page break")
                        .value_parser(value_parser!(u32)),
                )
                .arg(
                    Arg::new("url-template")
                        .long("url-template")
                        .help("Section link, with {text} and {page} placeholders"),
                ),
        )
        .subcommand(
            Command::new("preprocess")
                .about("Condense whitespace inside <choice> elements")
                .arg(input.clone())
                .arg(output.clone()),
        )
        .subcommand(
            Command::new("flex-to-json")
                .about("Convert a FLEx interlinear XML export to the compact JSON export")
                .arg(input)
                .arg(output),
        )
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(matches: &ArgMatches) -> CliResult<()> {
    match matches.subcommand() {
        Some(("convert", sub)) => handle_convert_command(sub, &load_config(matches, sub)?),
        Some(("outline", sub)) => handle_outline_command(sub, &load_config(matches, sub)?),
        Some(("preprocess", sub)) => handle_preprocess_command(sub),
        Some(("flex-to-json", sub)) => handle_flex_to_json_command(sub),
        _ => Err(CliError::MissingCommand),
    }
}

/// Defaults, then ticha.toml, then --config, then command-line overrides.
fn load_config(matches: &ArgMatches, sub: &ArgMatches) -> CliResult<TichaConfig> {
    let mut loader = Loader::new().with_optional_file(PROJECT_FILE);
    if let Some(path) = matches.get_one::<PathBuf>("config") {
        loader = loader.with_file(path);
    }
    for key in ["spellchoice", "abbrchoice", "format", "stylesheet", "url-template"] {
        if let Some(value) = sub.try_get_one::<String>(key).ok().flatten() {
            let section = if key == "url-template" { "outline" } else { "convert" };
            loader = loader.set_override(
                &format!("{}.{}", section, key.replace('-', "_")),
                value.as_str(),
            )?;
        }
    }
    if let Some(first_page) = sub.try_get_one::<u32>("first-page").ok().flatten() {
        loader = loader.set_override("outline.first_page", i64::from(*first_page))?;
    }
    if sub.try_get_one::<bool>("no-flex").ok().flatten() == Some(&true) {
        loader = loader.set_override("convert.flex", false)?;
    }
    Ok(loader.build()?)
}

fn input_path(matches: &ArgMatches) -> CliResult<&PathBuf> {
    matches
        .get_one::<PathBuf>("input")
        .ok_or(CliError::MissingArgument("input"))
}

fn read_input(path: &Path) -> CliResult<String> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// The --text value, else the longest configured text id in the file name, else the file name.
fn text_id(matches: &ArgMatches, config: &TichaConfig, input: &Path) -> String {
    if let Some(text) = matches.get_one::<String>("text") {
        return text.clone();
    }
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    match config.infer_text(&stem) {
        Some(text) => text.to_string(),
        None => {
            warn!(
                "no configured text id in '{}'; using the file name as the text id",
                stem
            );
            stem
        }
    }
}

fn load_dictionary(
    matches: &ArgMatches,
    config: &TichaConfig,
    text: &str,
) -> CliResult<Option<GlossDictionary>> {
    if let Some(path) = matches.get_one::<PathBuf>("flex") {
        return Ok(Some(GlossDictionary::load(path)?));
    }
    if !config.convert.flex {
        return Ok(None);
    }
    let Some(path) = config.text(text).and_then(|text| text.flex_path()) else {
        return Ok(None);
    };
    if !path.exists() {
        warn!(
            "FLEx export {} for {} not found; converting without glosses",
            path.display(),
            text
        );
        return Ok(None);
    }
    Ok(Some(GlossDictionary::load(path)?))
}

fn output_spec<'a>(spec: PublishSpec<'a>, matches: &ArgMatches) -> PublishSpec<'a> {
    match matches.get_one::<PathBuf>("output") {
        Some(path) => spec.with_output_path(path),
        None => spec,
    }
}

fn report(result: PublishResult) {
    match result.artifact {
        PublishArtifact::InMemory(text) => print!("{}", text),
        PublishArtifact::File(path) => info!("wrote {}", path.display()),
    }
}

fn handle_convert_command(matches: &ArgMatches, config: &TichaConfig) -> CliResult<()> {
    let input = input_path(matches)?;
    let text = text_id(matches, config, input);
    let dictionary = load_dictionary(matches, config, &text)?;
    let stylesheet = stylesheet_by_name(&config.convert.stylesheet)?;
    let options = ConvertOptions::new(text.as_str())
        .with_params(config.convert.stylesheet_params())
        .with_format(config.convert.format.as_str());

    let tei = parse_str(&preprocess_xml(&read_input(input)?))?;
    let conversion = generate_html(&tei, stylesheet.as_ref(), &options, dictionary.as_ref())?;
    if let Some(stats) = conversion.gloss_stats {
        info!(
            "{}: {} word(s), {} without glosses",
            text, stats.total_words, stats.missed_words
        );
    }
    let spec = PublishSpec::new(&conversion.html, &options.format);
    report(publish(output_spec(spec, matches))?);
    Ok(())
}

fn handle_outline_command(matches: &ArgMatches, config: &TichaConfig) -> CliResult<()> {
    let input = input_path(matches)?;
    let text = text_id(matches, config, input);
    let tei = parse_str(&read_input(input)?)?;
    let outline = generate_outline(&tei, config.outline.options(&text))?;
    let spec = PublishSpec::new(&outline, "html");
    report(publish(output_spec(spec, matches))?);
    Ok(())
}

fn handle_preprocess_command(matches: &ArgMatches) -> CliResult<()> {
    let input = input_path(matches)?;
    let processed = preprocess_xml(&read_input(input)?);
    match matches.get_one::<PathBuf>("output") {
        Some(path) => std::fs::write(path, processed).map_err(|source| CliError::Write {
            path: path.clone(),
            source,
        }),
        None => {
            print!("{}", processed);
            Ok(())
        }
    }
}

fn handle_flex_to_json_command(matches: &ArgMatches) -> CliResult<()> {
    let input = input_path(matches)?;
    let output = matches
        .get_one::<PathBuf>("output")
        .cloned()
        .unwrap_or_else(|| input.with_extension("json"));
    let words = convert_flex_file(input, &output)?;
    println!("Wrote {} words to {}", words, output.display());
    Ok(())
}
