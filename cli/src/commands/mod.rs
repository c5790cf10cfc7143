mod options;
mod schema;
mod search;

use crate::argparse::{Cli, Commands, ScreenArgs};
use anyhow::{bail, Context, Result};
use erp_client::{ClientConfig, HttpTransport, ListScreen};
use erp_common::{screens, FieldSchema, SchemaFormat};
use std::path::Path;
use std::sync::Arc;

pub async fn handle_command(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Screens => {
            schema::handle_screens_command();
            Ok(())
        }
        Commands::Fields(args) => {
            let screen = open_screen(&args, config.as_ref())?;
            schema::handle_fields_command(&screen);
            Ok(())
        }
        Commands::Query(args) => {
            let mut screen = open_screen(&args.screen, config.as_ref())?;
            search::handle_query_command(&mut screen, &args.filters)
        }
        Commands::Options(args) => {
            let mut screen = open_screen(&args, config.as_ref())?;
            let transport = connect(config.as_ref(), &cli.config)?;
            options::handle_options_command(&mut screen, &transport).await;
            Ok(())
        }
        Commands::Search(args) => {
            let mut screen = open_screen(&args.filter.screen, config.as_ref())?;
            let transport = connect(config.as_ref(), &cli.config)?;
            search::handle_search_command(&mut screen, &transport, &args.filter.filters, args.json)
                .await
        }
    }
}

/// `--base-url` wins over the config file; a missing default config file is
/// not an error since offline commands do not need one.
fn load_config(cli: &Cli) -> Result<Option<ClientConfig>> {
    if let Some(base_url) = &cli.base_url {
        let mut config = if cli.config.exists() {
            ClientConfig::load(&cli.config)?
        } else {
            ClientConfig::for_base_url(base_url)
        };
        config.api.base_url = base_url.clone();
        return Ok(Some(config));
    }
    if cli.config.exists() {
        return ClientConfig::load(&cli.config).map(Some);
    }
    tracing::debug!(path = %cli.config.display(), "No client configuration file");
    Ok(None)
}

fn connect(config: Option<&ClientConfig>, config_path: &Path) -> Result<HttpTransport> {
    let Some(config) = config else {
        bail!(
            "No configuration found at {}. Pass --config <file> or --base-url <url>",
            config_path.display()
        );
    };
    HttpTransport::new(&config.api)
}

pub fn load_schema_file(path: &Path) -> Result<FieldSchema> {
    let format = SchemaFormat::from_path(path)?;
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema file: {}", path.display()))?;
    FieldSchema::parse(&contents, format)
        .with_context(|| format!("Failed to parse schema file: {}", path.display()))
}

/// Builds the screen from `--schema`, the configured schema file or the
/// built-in definition, in that order of precedence.
fn open_screen(args: &ScreenArgs, config: Option<&ClientConfig>) -> Result<ListScreen> {
    let name = args.screen.as_str();
    let builtin = screens::builtin(name);
    let schema_path = args
        .schema
        .as_deref()
        .or_else(|| config.and_then(|c| c.schema_path(name)));

    let schema = match (schema_path, &builtin) {
        (Some(path), _) => load_schema_file(path)?,
        (None, Some(definition)) => definition.schema.clone(),
        (None, None) => bail!(
            "Unknown screen '{}'. Built-in screens: {}. Use --schema to load a custom one",
            name,
            screens::names().collect::<Vec<_>>().join(", ")
        ),
    };
    schema
        .validate()
        .with_context(|| format!("Invalid filter schema for screen '{}'", name))?;

    let default_path = match &builtin {
        Some(definition) => definition.list_path.to_string(),
        None => format!("/api/{}", name),
    };
    let list_path = match config {
        Some(config) => config.list_path(name, &default_path).to_string(),
        None => default_path,
    };

    Ok(ListScreen::new(name, list_path, Arc::new(schema)))
}
