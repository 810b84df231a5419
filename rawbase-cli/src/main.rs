//! RawBase CLI Application
//!
//! Command-line front end for the rawbase component library:
//! - Initialise a component or model from a TOML configuration
//! - Dump configuration tables in print_r / var_dump layout
//! - Check index validity against JSON values

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rawbase::{Component, FacadeLog, HookValue, Lifecycle, Model};
use std::path::{Path, PathBuf};

mod config;

/// Log target used by the log object handed to components
const COMPONENT_LOG_TARGET: &str = "rawbase_cli::component";

/// RawBase - Inspect components, models and their configuration
#[derive(Parser, Debug)]
#[command(name = "rawbase-cli")]
#[command(about = "Initialise and inspect rawbase components", long_about = None)]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialise a component from a configuration file and report its state
    Init {
        /// Path to the component configuration (TOML)
        #[arg(short, long, value_name = "FILE")]
        config: PathBuf,

        /// Initialise a model (reads `id`) instead of a plain component
        #[arg(long)]
        model: bool,
    },

    /// Print a configuration file as a nested table
    Dump {
        /// Path to the configuration (TOML)
        #[arg(short, long, value_name = "FILE")]
        config: PathBuf,

        /// Include types and lengths
        #[arg(long)]
        types: bool,
    },

    /// Check whether an index is valid for a value
    ValidIndex {
        /// Position to check (may be negative)
        #[arg(allow_negative_numbers = true)]
        index: i64,

        /// JSON value; anything that is not valid JSON is taken as a string
        value: String,
    },
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("RawBase CLI v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Using component library v{}", rawbase::VERSION);

    match &args.command {
        Command::Init { config, model } => init_mode(config, *model),
        Command::Dump { config, types } => dump_mode(config, *types),
        Command::ValidIndex { index, value } => valid_index_mode(*index, value),
    }
}

/// Init mode - build a component or model from config and report the result
fn init_mode(config_path: &Path, as_model: bool) -> Result<()> {
    println!("═══════════════════════════════════════════════");
    println!("  RawBase - Init");
    println!("═══════════════════════════════════════════════\n");

    log::info!("Loading configuration from: {:?}", config_path);
    let config = config::load_config(config_path)?;
    log::debug!("Configuration loaded successfully");

    if as_model {
        let model = Model::new();
        initialise(&model, config)?;
        report(model.component(), "Model");
        println!("  Id:       {}", model.id());
    } else {
        let component = Component::new();
        initialise(&component, config)?;
        report(&component, "Component");
    }

    Ok(())
}

/// Install the CLI's hooks on `target` and run its `init`
fn initialise(target: &dyn Lifecycle, config: rawbase::Config) -> Result<()> {
    let component = target.component();

    component.add_filter(Component::ON_SET_LOG_FILTER, |_, _| {
        Ok(HookValue::from(FacadeLog::shared(COMPONENT_LOG_TARGET)))
    });
    component.add_action(Component::ON_COMPONENT_INIT_ACTION, |_| {
        log::info!("Component init action fired");
        Ok(())
    });
    component.add_action(Model::ON_MODEL_INIT_ACTION, |_| {
        log::info!("Model init action fired");
        Ok(())
    });

    target.init(config).context("Initialisation failed")?;

    if let Some(log) = component.log() {
        log.info("Log resolved through the set-log filter");
    }
    Ok(())
}

/// Print the state of an initialised component
fn report(component: &Component, kind: &str) {
    println!("✓ {} initialised\n", kind);
    println!("📊 State:");
    println!("  Debug:    {}", component.debug());
    println!("  Log:      {}", if component.log().is_some() { "resolved" } else { "none" });
    println!("  Actions:  {}", component.actions().total());
    println!("  Filters:  {}", component.filters().total());

    for name in component.actions().names() {
        log::debug!(
            "  action {} priorities {:?}",
            name,
            component.actions().priorities(&name).unwrap_or_default()
        );
    }

    println!("\n📄 Configuration:");
    println!("{}", rawbase::array_dump(&component.config().to_value()));
}

/// Dump mode - print a configuration file
fn dump_mode(config_path: &Path, types: bool) -> Result<()> {
    let config = config::load_config(config_path)?;
    let value = config.to_value();

    if types {
        print!("{}", rawbase::object_dump(&value));
    } else {
        print!("{}", rawbase::array_dump(&value));
    }
    Ok(())
}

/// Valid-index mode - print whether `index` is a valid position in `value`
fn valid_index_mode(index: i64, value: &str) -> Result<()> {
    let parsed = serde_json::from_str(value).unwrap_or_else(|_| {
        log::debug!("Value is not JSON, treating it as a string");
        serde_json::Value::String(value.to_string())
    });

    println!("{}", rawbase::valid_index(index, &parsed));
    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_valid_index_negative() {
        let args = Args::try_parse_from(["rawbase-cli", "valid-index", "-1", "[1,2]"]).unwrap();
        match args.command {
            Command::ValidIndex { index, value } => {
                assert_eq!(index, -1);
                assert_eq!(value, "[1,2]");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_initialise_model_resolves_log() {
        let model = Model::new();
        let config = config::parse_config("id = 4\ndebug = true").unwrap();
        initialise(&model, config).unwrap();

        assert_eq!(model.id(), 4);
        assert!(model.debug());
        assert!(model.log().is_some());
        assert_eq!(model.actions().total(), 2);
        assert_eq!(model.filters().total(), 1);
    }

    #[test]
    fn test_initialise_component() {
        let component = Component::new();
        initialise(&component, rawbase::Config::new()).unwrap();
        assert!(!component.debug());
        assert!(component.log().is_some());
    }
}
