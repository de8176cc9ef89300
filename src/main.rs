//! Driver loop for the life engine

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use life_engine::{
    build_engine,
    config::{CliOverrides, OutputFormat, Settings},
    utils::{ColorOutput, GridFormatter},
};
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "life_engine")]
#[command(about = "Asynchronous Game of Life simulator")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the simulation and print every generation
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Grid dimension (overrides config)
        #[arg(short, long, allow_negative_numbers = true)]
        size: Option<i64>,

        /// Number of generations to advance (overrides config)
        #[arg(short, long)]
        generations: Option<u64>,

        /// Seed pattern file (overrides config cells)
        #[arg(short, long)]
        pattern: Option<PathBuf>,

        /// Worker thread count (overrides config)
        #[arg(short, long)]
        threads: Option<usize>,

        /// Start each generation explicitly instead of chaining
        #[arg(long)]
        single_step: bool,

        /// Output format (overrides config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Write the default configuration file
    Init {
        /// Where to write the configuration
        #[arg(short, long, default_value = "config/default.yaml")]
        output: PathBuf,

        /// Force overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let verbose = matches!(cli.command, Commands::Run { verbose: true, .. });
    let directive = if verbose { "life_engine=debug" } else { "life_engine=info" };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(directive.parse()?))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run {
            config,
            size,
            generations,
            pattern,
            threads,
            single_step,
            format,
            verbose,
        } => {
            let overrides = CliOverrides {
                size,
                generations,
                threads,
                single_step,
                pattern_file: pattern,
                format,
            };
            run_command(config, overrides, verbose)
        }
        Commands::Init { output, force } => init_command(output, force),
    }
}

fn load_settings(config_path: &PathBuf, overrides: &CliOverrides) -> Result<Settings> {
    let mut settings = if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        eprintln!(
            "{}",
            ColorOutput::warning(&format!("Config file {} not found, using defaults", config_path.display()))
        );
        Settings::default()
    };

    settings.merge_with_cli(overrides);
    settings.validate().context("Configuration validation failed")?;
    Ok(settings)
}

fn run_command(config_path: PathBuf, overrides: CliOverrides, verbose: bool) -> Result<()> {
    let settings = load_settings(&config_path, &overrides)?;
    let format = settings.output.format;
    let target = settings.simulation.generations;

    if verbose {
        eprintln!("{}", ColorOutput::info("Configuration:"));
        eprintln!("  Size: {}", settings.simulation.size);
        eprintln!("  Generations: {}", target);
        eprintln!("  Auto advance: {}", settings.simulation.auto_advance);
        eprintln!("  Threads: {:?}", settings.simulation.threads);
        eprintln!();
    }

    let mut engine = build_engine(&settings).context("Failed to build engine")?;
    info!(
        size = engine.size(),
        living = engine.current().living_count(),
        "seeded engine"
    );

    print!("{}", GridFormatter::format_generation(0, engine.current(), format)?);

    let mut rendered = 0u64;
    engine.on_generation(move |grid| {
        rendered += 1;
        match GridFormatter::format_generation(rendered, grid, format) {
            Ok(output) => {
                print!("{}", output);
                if let Err(e) = std::io::stdout().flush() {
                    eprintln!("{}", ColorOutput::error(&format!("Failed to flush output: {e}")));
                }
            }
            Err(e) => eprintln!("{}", ColorOutput::error(&format!("Failed to render generation: {e}"))),
        }
    });

    let start_time = Instant::now();
    while engine.generation() < target {
        engine.begin_generation()?;
        engine.wait_for_completion()?;
        if engine.poll()? {
            debug!(generation = engine.generation(), "rendered generation");
        }
    }
    engine.clear_on_generation();

    eprintln!(
        "{}",
        ColorOutput::success(&format!(
            "Advanced {} generation(s) in {:.3}s, {} living cell(s)",
            engine.generation(),
            start_time.elapsed().as_secs_f64(),
            engine.current().living_count()
        ))
    );

    Ok(())
}

fn init_command(output: PathBuf, force: bool) -> Result<()> {
    if output.exists() && !force {
        println!("Skipped: {} (already exists)", output.display());
        return Ok(());
    }

    Settings::default()
        .to_file(&output)
        .context("Failed to create default configuration")?;
    println!("{}", ColorOutput::success(&format!("Created: {}", output.display())));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "life_engine",
            "run",
            "--config",
            "test.yaml",
            "--generations",
            "5",
            "--format",
            "json",
            "--single-step",
        ]);

        assert!(cli.is_ok());
        match cli.unwrap().command {
            Commands::Run {
                generations,
                format,
                single_step,
                ..
            } => {
                assert_eq!(generations, Some(5));
                assert_eq!(format, Some(OutputFormat::Json));
                assert!(single_step);
            }
            Commands::Init { .. } => panic!("expected run command"),
        }
    }

    #[test]
    fn test_negative_size_parses_then_fails_validation() {
        let cli = Cli::try_parse_from(["life_engine", "run", "--size", "-4"]).unwrap();
        let Commands::Run { size, .. } = cli.command else {
            panic!("expected run command");
        };
        assert_eq!(size, Some(-4));

        let overrides = CliOverrides {
            size,
            ..Default::default()
        };
        assert!(load_settings(&PathBuf::from("missing.yaml"), &overrides).is_err());
    }

    #[test]
    fn test_init_command() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config/default.yaml");

        init_command(path.clone(), false).unwrap();
        assert!(path.exists());

        let settings = Settings::from_file(&path).unwrap();
        assert_eq!(settings.simulation.size, 10);
    }

    #[test]
    fn test_run_command_verbose_json() {
        let overrides = CliOverrides {
            generations: Some(2),
            format: Some(OutputFormat::Json),
            ..Default::default()
        };
        assert!(run_command(PathBuf::from("missing.yaml"), overrides, true).is_ok());
    }

    #[test]
    fn test_run_command_single_step() {
        let overrides = CliOverrides {
            generations: Some(3),
            single_step: true,
            ..Default::default()
        };
        assert!(run_command(PathBuf::from("missing.yaml"), overrides, false).is_ok());
    }
}
