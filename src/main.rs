use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand};

use wikilist::config::CatalogConfig;
use wikilist::core::{create_catalog, print_error_message, print_info_message, CatalogOptions};
use wikilist::env::{core::LogLevel, core::NoColor, EnvVar};
use wikilist::languages::{join, load_iso639_locales, load_polish_names, write_joined};
use wikilist::network::Session;
use wikilist::translation::{HttpTranslator, Translator};
use wikilist::{CatalogError, CatalogResult};

#[derive(Parser, Debug)]
#[command(
    name = "wikilist",
    version,
    about = "Turn a categorised list page into a translated JSON catalog"
)]
struct Cli {
    /// Suppress progress output
    #[arg(short, long, global = true)]
    silent: bool,

    /// Log at debug level (twice for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file, searched in the default locations when omitted
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract the catalog from a URL or local HTML file and translate it
    Scrape(ScrapeArgs),
    /// Build the joined language reference file
    JoinLanguages(JoinArgs),
    /// Write a configuration file filled with the default values
    InitConfig(InitConfigArgs),
}

#[derive(Args, Debug)]
struct ScrapeArgs {
    /// URL or path of the list page; defaults to the configured source
    target: Option<String>,

    /// Write the catalog to this file (supports %timestamp%)
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,

    /// Cache file for the downloaded page
    #[arg(short, long, value_name = "FILE")]
    cache: Option<String>,

    /// Joined language reference file
    #[arg(short, long, value_name = "FILE")]
    languages: Option<String>,

    /// Target language code, may be repeated
    #[arg(short, long = "target-lang", value_name = "CODE")]
    target_lang: Vec<String>,

    /// Item names per translation request
    #[arg(short, long, value_name = "N", value_parser = parse_batch_size)]
    batch_size: Option<usize>,

    /// Also write the raw category map to this file
    #[arg(long, value_name = "FILE")]
    categories: Option<String>,

    /// Skip translation entirely
    #[arg(long)]
    no_translate: bool,
}

#[derive(Args, Debug)]
struct JoinArgs {
    /// ISO 639-1 locale names (JSON)
    #[arg(long, value_name = "FILE", default_value = "data/iso639-1_loc.json")]
    iso: PathBuf,

    /// Polish language names (CSV)
    #[arg(long, value_name = "FILE", default_value = "data/polish_lang.csv")]
    polish: PathBuf,

    #[arg(short, long, value_name = "FILE", default_value = "joined.json")]
    output: PathBuf,
}

#[derive(Args, Debug)]
struct InitConfigArgs {
    #[arg(short, long, value_name = "FILE", default_value = "wikilist.toml")]
    output: PathBuf,

    /// Replace an existing file
    #[arg(long)]
    force: bool,
}

fn parse_batch_size(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("batch size must be at least 1".to_string()),
        Ok(size) => Ok(size),
        Err(e) => Err(e.to_string()),
    }
}

fn init_logging(cli: &Cli) {
    let level = match (cli.silent, cli.verbose) {
        (true, _) => tracing::Level::ERROR,
        (false, 0) => match LogLevel::get().as_deref() {
            Ok("trace") => tracing::Level::TRACE,
            Ok("debug") => tracing::Level::DEBUG,
            Ok("warn") => tracing::Level::WARN,
            Ok("error") => tracing::Level::ERROR,
            _ => tracing::Level::INFO,
        },
        (false, 1) => tracing::Level::DEBUG,
        (false, _) => tracing::Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_scrape(cli: &Cli, args: &ScrapeArgs) -> CatalogResult<()> {
    let mut config = CatalogConfig::load(cli.config.as_deref())?;

    if let Some(batch_size) = args.batch_size {
        config.translation.batch_size = batch_size;
    }
    if !args.target_lang.is_empty() {
        config.translation.target_languages = args.target_lang.clone();
    }
    if args.no_translate {
        config.translation.enabled = false;
    }

    let mut options = CatalogOptions::from_config(&config, args.target.as_deref());
    if let Some(output) = &args.output {
        options.output_path = output.clone();
    }
    if let Some(cache) = &args.cache {
        options.cache_path = Some(cache.clone());
    }
    if let Some(languages) = &args.languages {
        options.languages_path = Some(languages.clone());
    }
    if let Some(categories) = &args.categories {
        options.category_map_output = Some(categories.clone());
    }
    options.silent = cli.silent;

    let session = Session::new(config.source.user_agent.as_deref(), config.source.timeout_secs)?;

    let translator = if options.no_translate {
        None
    } else {
        let translator = HttpTranslator::new(
            session.client().clone(),
            &config.translation.api_url,
            config.translation.auth_token.clone(),
        )?;
        Some(translator)
    };

    let outcome = create_catalog(
        &session,
        &options,
        translator.as_ref().map(|t| t as &dyn Translator),
        &config,
    )?;

    if !options.silent {
        print_info_message(&format!(
            "{} categories, {} items written to {}",
            outcome.category_map.len(),
            outcome.records.len(),
            outcome
                .output_path
                .as_deref()
                .unwrap_or(Path::new(&options.output_path))
                .display()
        ));
        for language in outcome.report.aborted() {
            print_info_message(&language.summary());
        }
    }

    Ok(())
}

fn run_join(cli: &Cli, args: &JoinArgs) -> CatalogResult<()> {
    let locales = load_iso639_locales(&args.iso)?;
    let polish = load_polish_names(&args.polish)?;

    let joined = join(&locales, &[&polish]);
    write_joined(&args.output, &joined)?;

    if !cli.silent {
        print_info_message(&format!(
            "{} languages written to {}",
            joined.len(),
            args.output.display()
        ));
    }

    Ok(())
}

fn run_init_config(cli: &Cli, args: &InitConfigArgs) -> CatalogResult<()> {
    if args.output.exists() && !args.force {
        return Err(CatalogError::Config(format!(
            "{} already exists, pass --force to replace it",
            args.output.display()
        )));
    }

    CatalogConfig::write_example(&args.output)?;

    if !cli.silent {
        print_info_message(&format!("Configuration written to {}", args.output.display()));
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    let result = match &cli.command {
        Command::Scrape(args) => run_scrape(&cli, args),
        Command::JoinLanguages(args) => run_join(&cli, args),
        Command::InitConfig(args) => run_init_config(&cli, args),
    };

    if let Err(error) = result {
        let use_color = atty::is(atty::Stream::Stderr) && !NoColor::get().unwrap_or(false);
        print_error_message(&format!("Error: {error}"), use_color);
        process::exit(1);
    }
}
