use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use apidesk_core::Session;
use apidesk_core::config::{self, ApideskConfig, CONFIG_FILE_NAME};
use apidesk_core::parse::parameter::ParameterLocation;
use apidesk_core::parse::spec::ApiDocument;
use apidesk_core::render::{self, Translate};
use apidesk_core::request::{BodyMode, FormInput};
use apidesk_http::loader::load_file;
use apidesk_http::{Catalog, Console, Dispatcher, DocumentLoader, LocaleSwitcher, SwitchOutcome};

#[derive(Parser)]
#[command(name = "apidesk", about = "Browse and call Swagger 2.0 APIs", version)]
struct Cli {
    /// Config file to read instead of ./.apidesk.yaml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Read the API document from a local file instead of the server
    #[arg(short, long, global = true)]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List operations grouped by tag
    Nav,

    /// Show the parameters and models of one operation
    Show {
        /// Operation id
        #[arg(required_unless_present = "route")]
        operation_id: Option<String>,

        /// Quick-select key, e.g. `GET::/pets/{id}`
        #[arg(long, conflicts_with = "operation_id")]
        route: Option<String>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: ShowFormat,
    },

    /// Assemble and send a request for one operation
    Call {
        /// Operation id
        operation_id: String,

        /// Field value as `location:name=value`; prefix a formData value with @ to upload a file
        #[arg(short = 'p', long = "param", value_parser = parse_field)]
        params: Vec<FieldArg>,

        /// How query values are supplied
        #[arg(long, default_value = "form")]
        mode: BodyMode,

        /// JSON text used in json mode
        #[arg(long)]
        json: Option<String>,

        /// File whose content becomes the body parameter
        #[arg(long)]
        body_file: Option<PathBuf>,
    },

    /// Switch the server-side language and print the page to reload
    Locale {
        /// Language code, e.g. `zh_CN`
        language: String,

        /// Page the server should send the user back to
        #[arg(long)]
        page_url: Option<String>,
    },

    /// Initialize a new apidesk configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum ShowFormat {
    Text,
    Yaml,
    Json,
}

#[derive(Clone, Debug)]
struct FieldArg {
    location: ParameterLocation,
    name: String,
    value: String,
}

fn parse_field(raw: &str) -> Result<FieldArg, String> {
    let (location, rest) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected location:name=value, got `{raw}`"))?;
    let (name, value) = rest
        .split_once('=')
        .ok_or_else(|| format!("expected location:name=value, got `{raw}`"))?;
    Ok(FieldArg {
        location: location.parse()?,
        name: name.to_string(),
        value: value.to_string(),
    })
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let cfg = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Nav => cmd_nav(&cfg, cli.input),

        Commands::Show {
            operation_id,
            route,
            format,
        } => cmd_show(&cfg, cli.input, operation_id, route, format),

        Commands::Call {
            operation_id,
            params,
            mode,
            json,
            body_file,
        } => cmd_call(&cfg, cli.input, &operation_id, params, mode, json, body_file),

        Commands::Locale { language, page_url } => cmd_locale(&cfg, &language, page_url),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "apidesk", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<ApideskConfig> {
    let path = path.cloned().unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
    let cfg = config::load_config(&path).map_err(|e| anyhow::anyhow!(e))?;
    if cfg.is_none() {
        log::debug!("{} not found, using defaults", path.display());
    }
    Ok(cfg.unwrap_or_default())
}

/// Catalog for `language`, read from the configured catalog directory.
fn load_catalog(cfg: &ApideskConfig, language: &str) -> Result<Catalog> {
    let catalog = Catalog::load(Path::new(&cfg.locale.catalog_dir), language)?;
    log::debug!("{} translations for {language}", catalog.len());
    Ok(catalog)
}

fn timeout(cfg: &ApideskConfig) -> Option<Duration> {
    cfg.timeout_secs.map(Duration::from_secs)
}

fn load_document(cfg: &ApideskConfig, input: Option<PathBuf>) -> Result<ApiDocument> {
    if let Some(path) = input {
        return load_file(&path).with_context(|| format!("failed to load {}", path.display()));
    }
    let loader = DocumentLoader::new(timeout(cfg)).context("failed to build HTTP client")?;
    Ok(loader.load(cfg)?)
}

fn cmd_nav(cfg: &ApideskConfig, input: Option<PathBuf>) -> Result<()> {
    let catalog = load_catalog(cfg, &cfg.locale.language)?;
    let session = Session::new(load_document(cfg, input)?, cfg.request_base());
    print!("{}", render::render_navigation(&session.navigation(), &catalog)?);
    Ok(())
}

fn cmd_show(
    cfg: &ApideskConfig,
    input: Option<PathBuf>,
    operation_id: Option<String>,
    route: Option<String>,
    format: ShowFormat,
) -> Result<()> {
    let catalog = load_catalog(cfg, &cfg.locale.language)?;
    let mut session = Session::new(load_document(cfg, input)?, cfg.request_base());
    let pane = match (&operation_id, &route) {
        (_, Some(key)) => session
            .select_route(key)
            .with_context(|| format!("no operation matches {key}"))?,
        (Some(id), None) => session
            .select(id)
            .with_context(|| format!("unknown operation {id}"))?,
        (None, None) => anyhow::bail!("pass an operation id or --route"),
    };

    match format {
        ShowFormat::Text => print!("{}", render::render_detail(pane, &catalog)?),
        ShowFormat::Yaml => print!("{}", serde_yaml_ng::to_string(pane)?),
        ShowFormat::Json => println!("{}", serde_json::to_string_pretty(pane)?),
    }
    Ok(())
}

fn cmd_call(
    cfg: &ApideskConfig,
    input: Option<PathBuf>,
    operation_id: &str,
    params: Vec<FieldArg>,
    mode: BodyMode,
    json: Option<String>,
    body_file: Option<PathBuf>,
) -> Result<()> {
    let catalog = load_catalog(cfg, &cfg.locale.language)?;
    let document = load_document(cfg, input)?;

    let mut form = FormInput::new(mode);
    form.json_text = json.unwrap_or_default();
    for field in params {
        form.set(field.location, field.name, field.value);
    }
    if let Some(path) = body_file {
        let op = document
            .find_operation(operation_id)
            .with_context(|| format!("unknown operation {operation_id}"))?;
        let body = op
            .parameters
            .iter()
            .find(|p| p.location == ParameterLocation::Body)
            .with_context(|| format!("{operation_id} has no body parameter"))?;
        let text = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        form.set(ParameterLocation::Body, body.name.clone(), text);
    }

    let dispatcher = Dispatcher::new(timeout(cfg)).context("failed to build HTTP client")?;
    let console = RefCell::new(Console::new());
    let outcome = RefCell::new(None);

    let mut session = Session::new(document, cfg.request_base());
    session.on_submit(operation_id, |request| {
        let result = dispatcher.dispatch(request, &mut console.borrow_mut());
        *outcome.borrow_mut() = Some(result);
    });
    session.select(operation_id);
    session.submit(operation_id, &form)?;
    drop(session);

    for line in console.into_inner().take() {
        eprintln!("{line}");
    }
    match outcome.into_inner() {
        Some(Ok(value)) => {
            print!("{}", render::render_json_tree(&value));
            Ok(())
        }
        Some(Err(e)) => {
            eprintln!("{}: {}", catalog.translate("Request failed"), e.notification());
            Err(e.into())
        }
        None => anyhow::bail!("request for {operation_id} was not sent"),
    }
}

fn cmd_locale(cfg: &ApideskConfig, language: &str, page_url: Option<String>) -> Result<()> {
    let page_url = page_url.unwrap_or_else(|| cfg.base_url.clone());
    let switcher = LocaleSwitcher::new(&cfg.base_url, &cfg.locale);
    let SwitchOutcome::Reload(url) = switcher.switch(language, &page_url);

    let catalog = load_catalog(cfg, language)?;
    eprintln!(
        "{} ({} {})",
        catalog.translate("Language switched"),
        catalog.len(),
        catalog.translate("translations")
    );
    println!("{url}");
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
