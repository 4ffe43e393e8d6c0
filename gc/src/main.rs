use clap::Parser;
use colored::*;
use eyre::{Context, Result, eyre};
use serde::Serialize;
use tracing::info;

use globalcoords::cli::{Cli, Command, OutputFormat, parse_physical_type_arg};
use globalcoords::config::Config;
use globalcoords::{CoordEntry, CoordValue, CubeDocument, GlobalCoords, Unit};

fn setup_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context(format!("Invalid log level: {}", level))?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
    Ok(())
}

#[derive(Serialize)]
struct EntryView<'a> {
    name: &'a str,
    physical_type: Option<&'a str>,
    value: &'a CoordValue,
}

fn print_entries(coords: &GlobalCoords, format: OutputFormat) -> Result<()> {
    let entries = coords.entries();
    match format {
        OutputFormat::Json => {
            let views: Vec<EntryView> = entries.iter().map(|(name, entry)| view(name, entry)).collect();
            println!("{}", serde_json::to_string_pretty(&views)?);
        }
        OutputFormat::Text => {
            println!("{}", coords);
            for (name, entry) in &entries {
                println!(
                    "  {}  {}  {}",
                    name.cyan(),
                    entry.physical_type.as_deref().unwrap_or("-").yellow(),
                    entry.value
                );
            }
        }
    }
    Ok(())
}

fn view<'a>(name: &'a str, entry: &'a CoordEntry) -> EntryView<'a> {
    EntryView {
        name,
        physical_type: entry.physical_type.as_deref(),
        value: &entry.value,
    }
}

/// Express a scalar quantity coordinate in another unit
fn convert(name: &str, value: &CoordValue, unit: &str) -> Result<CoordValue> {
    let quantity = value
        .as_quantity()
        .ok_or_else(|| eyre!("Coordinate '{}' is not a scalar quantity: {}", name, value))?;
    let target = Unit::parse(unit).context(format!("Invalid target unit: {}", unit))?;
    Ok(quantity.to(&target)?.into())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    let level = cli.log_level.clone().unwrap_or_else(|| config.log_level.clone());
    setup_logging(&level).context("Failed to setup logging")?;

    if !config.output.color {
        colored::control::set_override(false);
    }
    let format = cli.format.unwrap_or(config.output.format);

    info!(%format, "gc starting");

    match cli.command {
        Command::Show { file } => {
            let cube = CubeDocument::load(&file)?.into_cube()?;
            print_entries(&cube.global_coords(), format)?;
        }
        Command::Get { file, name, unit } => {
            let cube = CubeDocument::load(&file)?.into_cube()?;
            let coords = cube.global_coords();
            let value = coords.get(&name).map_err(|e| {
                if e.is_not_found() {
                    let available: Vec<String> = coords.keys().collect();
                    eyre!("{} (available: {})", e, available.join(", "))
                } else {
                    e.into()
                }
            })?;
            let value = match unit {
                Some(unit) => convert(&name, &value, &unit)?,
                None => value,
            };
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&value)?),
                OutputFormat::Text => println!("{}", value),
            }
        }
        Command::Types { file } => {
            let cube = CubeDocument::load(&file)?.into_cube()?;
            let coords = cube.global_coords();
            let types = coords.physical_types();
            let ordered: Vec<(String, Option<&str>)> = coords
                .keys()
                .map(|name| {
                    let physical_type = types.get(&name).and_then(|t| t.as_deref());
                    (name, physical_type)
                })
                .collect();

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&ordered)?),
                OutputFormat::Text => {
                    for (name, physical_type) in ordered {
                        println!("{}: {}", name.cyan(), physical_type.unwrap_or("-"));
                    }
                }
            }
        }
        Command::Filter { file, physical_type } => {
            let cube = CubeDocument::load(&file)?.into_cube()?;
            let filtered = cube
                .global_coords()
                .filter_by_physical_type(parse_physical_type_arg(&physical_type));
            print_entries(&filtered, format)?;
        }
        Command::Validate { physical_types } => {
            for physical_type in &physical_types {
                if globalcoords::is_valid_physical_type(Some(physical_type)) {
                    println!("{} {}", "✓".green(), physical_type);
                } else {
                    println!("{} {}", "✗".red(), physical_type);
                }
            }
            globalcoords::validate_physical_types(physical_types.iter().map(|t| Some(t.as_str())))?;
        }
        Command::Vocabulary { prefix } => {
            let prefix = prefix.unwrap_or_default();
            let words: Vec<&str> = globalcoords::ucd1p_words().filter(|w| w.starts_with(&prefix)).collect();
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&words)?),
                OutputFormat::Text => {
                    for word in words {
                        println!("{}", word);
                    }
                }
            }
        }
    }

    Ok(())
}
