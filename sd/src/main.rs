//! Surat Desa - letter template engine
//!
//! CLI entry point for inspecting, rendering and printing letters.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::Parser;
use colored::*;
use eyre::{Context, Result, eyre};
use serde_json::Value;
use tracing::{debug, info};

use suratdesa::cli::{Cli, Command, get_log_path};
use suratdesa::clock::{Clock, FixedClock, SystemClock};
use suratdesa::config::Config;
use suratdesa::domain::{DocumentKind, DocumentTypeTag, LetterRecord, SettingsSnapshot};
use suratdesa::mapping::{
    PEMOHON, VariableCategory, VariableDefinition, common_definitions, definitions_for, document_spec, drift,
    person_definitions,
};
use suratdesa::print::PrintMaterializer;
use suratdesa::render::{RenderMode, RenderedDocument, Renderer};
use suratdesa::service::DocumentService;
use suratdesa::store::TemplateLoader;

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Note: Can't log params here since logging isn't initialized yet
    let log_path = get_log_path();
    let log_dir = log_path.parent().map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."));

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Determine log level with priority: CLI --log-level > config file > default (INFO)
    let level_str = cli_log_level.or(config_log_level);
    let level = match level_str.map(|s| s.to_uppercase()) {
        Some(s) => match s.as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(&log_path).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());

    // Setup logging with priority: CLI > config > INFO default
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    let settings = match &cli.settings {
        Some(path) => SettingsSnapshot::load_yaml(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => config.settings.clone(),
    };
    let today = letter_date(cli.date.as_deref())?;
    info!(%today, settings = settings.len(), "Surat Desa ready");

    let app = App {
        config,
        settings,
        clock: FixedClock(today),
    };

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Command::Tags => cmd_tags(),
        Command::Vars { tag, category } => cmd_vars(tag.as_deref(), category.as_deref()),
        Command::Map { tag, record } => cmd_map(&app, &tag, &record),
        Command::Render {
            tag,
            record,
            mode,
            template,
            output,
        } => cmd_render(&app, &tag, &record, mode, template.as_deref(), output.as_deref()),
        Command::Print {
            tag,
            record,
            template,
            allow_unresolved,
        } => cmd_print(&app, &tag, &record, template.as_deref(), allow_unresolved).await,
        Command::Templates => cmd_templates(&app),
        Command::Check => cmd_check(),
    }
}

/// Everything a command needs besides its own arguments
struct App {
    config: Config,
    settings: SettingsSnapshot,
    clock: FixedClock,
}

impl App {
    fn loader(&self) -> TemplateLoader {
        TemplateLoader::new(".", Some(self.config.templates.dir.clone()))
    }

    fn service(&self) -> Result<DocumentService<TemplateLoader>> {
        let renderer = Renderer::new()?.with_escape_values(self.config.render.escape_values);
        Ok(DocumentService::new(self.loader())?
            .with_settings(self.settings.clone())
            .with_clock(self.clock)
            .with_renderer(renderer))
    }
}

fn letter_date(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .with_context(|| format!("Invalid --date '{}', expected YYYY-MM-DD", s)),
        None => Ok(SystemClock.today()),
    }
}

fn load_record(tag: &DocumentTypeTag, path: &Path) -> Result<LetterRecord> {
    debug!(%tag, ?path, "load_record: called");
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read record {}", path.display()))?;
    let value: Value =
        serde_json::from_str(&content).with_context(|| format!("Failed to parse record {}", path.display()))?;
    Ok(LetterRecord::from_json(tag, value)?)
}

/// List document types
fn cmd_tags() -> Result<()> {
    debug!("cmd_tags: called");
    for kind in DocumentKind::ALL {
        let mapping = if document_spec(kind).typed {
            "typed".green()
        } else {
            "fallback".yellow()
        };
        println!("{:<38} {:<9} {}", kind.tag().cyan(), mapping, kind.title());
    }
    Ok(())
}

/// List variable definitions
fn cmd_vars(tag: Option<&str>, category: Option<&str>) -> Result<()> {
    debug!(?tag, ?category, "cmd_vars: called");
    let category = category
        .map(|c| {
            VariableCategory::parse(c)
                .ok_or_else(|| eyre!("Unknown category: {}. Use: identity, applicant or document", c))
        })
        .transpose()?;

    let defs: Vec<VariableDefinition> = match tag {
        Some(tag) => definitions_for(&DocumentTypeTag::parse(tag)),
        None => {
            let mut defs = common_definitions();
            defs.extend(person_definitions(PEMOHON));
            defs
        }
    };

    for def in defs.iter().filter(|d| category.is_none_or(|c| d.category == c)) {
        println!(
            "{:<34} {:<10} {}",
            def.token().cyan(),
            def.category.to_string().dimmed(),
            def.label
        );
    }
    Ok(())
}

/// Print the dictionary for a record
fn cmd_map(app: &App, tag: &str, record: &Path) -> Result<()> {
    debug!(%tag, ?record, "cmd_map: called");
    let tag = DocumentTypeTag::parse(tag);
    let record = load_record(&tag, record)?;
    let dict = app.service()?.dictionary(&tag, &record);
    println!("{}", serde_json::to_string_pretty(&dict)?);
    Ok(())
}

fn render_document(
    app: &App,
    tag: &DocumentTypeTag,
    record: &Path,
    mode: RenderMode,
    template: Option<&Path>,
) -> Result<(DocumentService<TemplateLoader>, RenderedDocument)> {
    let service = app.service()?;
    let record = load_record(tag, record)?;
    let doc = match template {
        Some(path) => {
            let markup =
                fs::read_to_string(path).with_context(|| format!("Failed to read template {}", path.display()))?;
            service.render_markup(&markup, tag, &record, mode)
        }
        None => service.render(tag, &record, mode)?,
    };
    Ok((service, doc))
}

fn report_unresolved(doc: &RenderedDocument) {
    if doc.unresolved.is_empty() {
        return;
    }
    eprintln!(
        "{} {} unresolved variable(s): {}",
        "!".yellow(),
        doc.unresolved.len(),
        doc.unresolved.join(", ")
    );
}

/// Render a record
fn cmd_render(
    app: &App,
    tag: &str,
    record: &Path,
    mode: RenderMode,
    template: Option<&Path>,
    output: Option<&Path>,
) -> Result<()> {
    debug!(%tag, ?record, %mode, "cmd_render: called");
    let tag = DocumentTypeTag::parse(tag);
    let (_, doc) = render_document(app, &tag, record, mode, template)?;

    if mode == RenderMode::Final {
        report_unresolved(&doc);
    }

    match output {
        Some(path) => {
            fs::write(path, &doc.markup).with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("{} Rendered {} to {}", "✓".green(), tag, path.display());
        }
        None => println!("{}", doc.markup),
    }
    Ok(())
}

/// Render in final mode and print
async fn cmd_print(
    app: &App,
    tag: &str,
    record: &Path,
    template: Option<&Path>,
    allow_unresolved: bool,
) -> Result<()> {
    debug!(%tag, ?record, allow_unresolved, "cmd_print: called");
    let tag = DocumentTypeTag::parse(tag);
    let (service, doc) = render_document(app, &tag, record, RenderMode::Final, template)?;
    report_unresolved(&doc);

    let materializer = PrintMaterializer::with_layout(app.config.print.opener(), app.config.print.layout());
    service.print_document(doc, &materializer, allow_unresolved).await?;

    println!("{} Sent {} to the printer", "✓".green(), tag);
    Ok(())
}

/// List templates reachable through the loader chain
fn cmd_templates(app: &App) -> Result<()> {
    debug!("cmd_templates: called");
    for source in app.loader().sources()? {
        println!("{:<38} {}", source.tag.to_string().cyan(), source.origin.to_string().dimmed());
    }
    Ok(())
}

/// Report registry vs dispatcher drift
fn cmd_check() -> Result<()> {
    debug!("cmd_check: called");
    let mut drifted = 0;

    for kind in DocumentKind::ALL {
        if !document_spec(kind).typed {
            println!("{} {:<38} {}", "-".dimmed(), kind.tag(), "fallback".dimmed());
            continue;
        }

        let report = drift(kind)?;
        if report.is_clean() {
            println!("{} {}", "✓".green(), kind.tag());
            continue;
        }

        drifted += 1;
        println!("{} {}", "✗".red(), kind.tag());
        for key in &report.missing {
            println!("    documented but not emitted: {}", key.yellow());
        }
        for key in &report.undocumented {
            println!("    emitted but not documented: {}", key.yellow());
        }
    }

    if drifted > 0 {
        return Err(eyre!("Registry drift in {} document type(s)", drifted));
    }
    Ok(())
}
