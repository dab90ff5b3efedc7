mod config;
mod logging;
mod prompt;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use config::{ConfigError, load_config};
use logging::{LoggingError, init_logging};
use modelforge_core::{DateFormat, Error as CoreError, ExplicitOptions, ReturnType};
use modelforge_generate::{
    GenerationError, GenerationRequest, Generator, RenderError, TemplateRenderer,
};
use modelforge_introspect::{
    IntrospectOptions, PostgresAdapter, SchemaSource, StaticSchemaSource,
};
use prompt::TerminalPrompt;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
enum CliError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("logging error: {0}")]
    Logging(#[from] LoggingError),
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("{0}")]
    Generation(#[from] GenerationError),
    #[error("renderer error: {0}")]
    Renderer(#[from] RenderError),
    #[error("unsupported database url scheme: {0}")]
    UnsupportedEngine(String),
}

#[derive(Parser, Debug)]
#[command(
    name = "modelforge",
    version,
    about = "Generate a model class from an existing database table"
)]
struct Cli {
    /// Model name; `_model` is appended when missing.
    #[arg(value_name = "NAME")]
    name: Option<String>,
    /// Table name (positional form); derived from the model name when omitted.
    #[arg(value_name = "TABLE")]
    table_pos: Option<String>,
    /// Table name (flag form).
    #[arg(long)]
    table: Option<String>,
    /// Primary key column; wins over the key found in the schema.
    #[arg(long)]
    primary_key: Option<String>,
    /// Maintain a created timestamp.
    #[arg(long, value_name = "BOOL")]
    set_created: Option<bool>,
    /// Maintain a modified timestamp.
    #[arg(long, value_name = "BOOL")]
    set_modified: Option<bool>,
    /// Timestamp storage format: datetime, date or int.
    #[arg(long)]
    date_format: Option<DateFormat>,
    /// Record the acting user on create/update/delete.
    #[arg(long, value_name = "BOOL")]
    log_user: Option<bool>,
    /// Use a soft-delete flag instead of removing rows.
    #[arg(long, value_name = "BOOL")]
    soft_delete: Option<bool>,
    /// Row shape returned by the model: object or array.
    #[arg(long)]
    return_type: Option<ReturnType>,
    /// Return the insert id from inserts.
    #[arg(long, value_name = "BOOL")]
    return_insert_id: Option<bool>,
    /// Do not prompt; use supplied, schema-derived and default values.
    #[arg(short, long, default_value_t = false)]
    quiet: bool,
    /// Config file (defaults to ./modelforge.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Database connection string; falls back to the config file and DATABASE_URL.
    #[arg(long, value_name = "CONNECTION_STRING")]
    database_url: Option<String>,
    /// Read table definitions from a JSON or TOML schema file instead of a database.
    #[arg(long, conflicts_with = "database_url")]
    schema_file: Option<PathBuf>,
    /// Database schema (namespace) holding the table.
    #[arg(long)]
    db_schema: Option<String>,
    /// Directory the model is written to.
    #[arg(long)]
    out_dir: Option<PathBuf>,
    /// Directory with `<template>.jinja` overrides.
    #[arg(long)]
    template_dir: Option<PathBuf>,
    /// Replace an existing model file.
    #[arg(long, default_value_t = false)]
    overwrite: bool,
    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_failure(&err, &mut io::stderr().lock());
            ExitCode::FAILURE
        }
    }
}

/// Print the single terminal error line. The `run_finished` event stays at
/// info so the default stderr filter does not repeat it.
fn report_failure(err: &CliError, out: &mut impl Write) {
    tracing::info!(event = "run_finished", status = "failure", error = %err);
    let _ = writeln!(out, "error: {err}");
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let Cli {
        name,
        table_pos,
        table,
        primary_key,
        set_created,
        set_modified,
        date_format,
        log_user,
        soft_delete,
        return_type,
        return_insert_id,
        quiet,
        config,
        database_url,
        schema_file,
        db_schema,
        out_dir,
        template_dir,
        overwrite,
        verbose,
    } = cli;

    let config = load_config(config.as_deref())?;
    init_logging(&config.log, verbose)?;

    let run_id = Uuid::new_v4().to_string();
    tracing::info!(event = "run_started", run_id = %run_id, quiet = quiet);
    let timer = Instant::now();

    let database_url = database_url
        .or(config.database_url)
        .or_else(|| std::env::var("DATABASE_URL").ok());
    let source = open_schema_source(
        schema_file.or(config.schema_file),
        database_url,
        db_schema.or(config.db_schema),
    )
    .await?;

    let renderer = match template_dir.or(config.template_dir) {
        Some(dir) => TemplateRenderer::with_template_dir(dir)?,
        None => TemplateRenderer::new()?,
    };

    let generator = Generator::new(&*source, &renderer).with_defaults(config.defaults);

    let mut request = GenerationRequest::new(name);
    request.table_name = table_pos;
    request.explicit = ExplicitOptions {
        table,
        primary_key,
        set_created,
        set_modified,
        date_format,
        log_user,
        soft_delete,
        return_type,
        return_insert_id,
    };
    request.interactive = !quiet;
    request.output_dir = out_dir.unwrap_or(config.output_dir);
    request.extension = config.extension;
    request.overwrite = overwrite;

    let mut prompt = TerminalPrompt::stdio();
    let outcome = generator.run(request, &mut prompt).await?;

    tracing::info!(
        event = "run_finished",
        status = "success",
        path = %outcome.destination.display(),
        schema_found = outcome.schema_found,
        duration_ms = timer.elapsed().as_millis() as u64
    );

    Ok(())
}

async fn open_schema_source(
    schema_file: Option<PathBuf>,
    database_url: Option<String>,
    db_schema: Option<String>,
) -> Result<Box<dyn SchemaSource>, CliError> {
    if let Some(path) = schema_file {
        tracing::info!(event = "schema_source", engine = "static", path = %path.display());
        return Ok(Box::new(StaticSchemaSource::from_path(&path)?));
    }

    let Some(url) = database_url else {
        tracing::warn!(
            event = "schema_source",
            engine = "none",
            "no database or schema file configured"
        );
        return Ok(Box::new(StaticSchemaSource::empty()));
    };

    let engine = detect_engine(&url)?;
    tracing::info!(event = "schema_source", engine = engine);

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(&url)
        .await?;

    let mut opts = IntrospectOptions::default();
    if let Some(schema) = db_schema {
        opts.schema = schema;
    }
    Ok(Box::new(PostgresAdapter::with_options(pool, opts)))
}

fn detect_engine(conn: &str) -> Result<&'static str, CliError> {
    if conn.starts_with("postgres://") || conn.starts_with("postgresql://") {
        Ok("postgres")
    } else {
        let scheme = conn.split("://").next().unwrap_or_default();
        Err(CliError::UnsupportedEngine(scheme.to_string()))
    }
}
