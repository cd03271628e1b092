use analytics::{EntityIndicatorReport, IndicatorEngine, IndicatorSummary};
use analyzer::{VolatilityComparator, VolatilityOutcome};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use configuration::{Config, OutputFormat};
use core_types::{DispersionTable, EntitySeries};
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

mod render;

/// The main entry point for the econ-pulse command-line tool.
fn main() -> ExitCode {
    // A missing .env file is fine; it only supplies optional overrides.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = configuration::load_config(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;
    // Held until the end of the run so buffered file logs are flushed.
    let _log_guard = configuration::init_tracing(&config.logging)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Report(args) => handle_report(args, &config),
        Commands::Compare(args) => handle_compare(args, &config),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Year-over-year growth indicators and volatility comparison for national economies.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the settings file. Missing files fall back to built-in defaults.
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive growth indicators for each entity and identify the most stable one.
    Report(ReportArgs),
    /// Compare precomputed dispersion values without deriving indicators.
    Compare(CompareArgs),
}

#[derive(Parser)]
struct ReportArgs {
    /// A TOML or JSON dataset holding an `entities` array.
    #[arg(long)]
    input: Option<PathBuf>,

    /// An inline entity, e.g. "Aurelia=100,150,200,150" (baseline first). Repeatable.
    #[arg(long = "entity", value_parser = EntitySeries::from_str)]
    entities: Vec<EntitySeries>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Parser)]
struct CompareArgs {
    /// An entity's dispersion, e.g. "Aurelia=12.5". Repeatable.
    #[arg(long = "dispersion", value_parser = parse_dispersion)]
    dispersions: Vec<(String, Decimal)>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

fn parse_dispersion(s: &str) -> Result<(String, Decimal), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing entity name in '{s}'"));
    }
    let value = Decimal::from_str(value.trim()).map_err(|e| format!("'{value}': {e}"))?;
    Ok((name.to_string(), value))
}

// ==============================================================================
// Analysis Pipeline
// ==============================================================================

/// An entity whose indicators could not be derived.
#[derive(Debug, Clone, Serialize)]
struct EntityFailure {
    entity_name: String,
    error: String,
}

/// Everything a report run produced, ready for rendering.
#[derive(Debug)]
struct AnalysisRun {
    reports: Vec<EntityIndicatorReport>,
    failures: Vec<EntityFailure>,
    volatility: VolatilityOutcome,
}

#[derive(Serialize)]
struct RunOutput<'a> {
    reports: Vec<IndicatorSummary>,
    failures: &'a [EntityFailure],
    volatility: &'a VolatilityOutcome,
}

impl AnalysisRun {
    fn to_output(&self) -> RunOutput<'_> {
        RunOutput {
            reports: self.reports.iter().map(EntityIndicatorReport::summary).collect(),
            failures: &self.failures,
            volatility: &self.volatility,
        }
    }
}

/// Evaluates every entity independently, then compares the dispersions of
/// those that succeeded. A failing entity is recorded and skipped; it never
/// aborts the others.
fn analyze(
    engine: &IndicatorEngine,
    comparator: &VolatilityComparator,
    default_name: &str,
    series: Vec<EntitySeries>,
) -> AnalysisRun {
    let mut reports = Vec::with_capacity(series.len());
    let mut failures = Vec::new();
    let mut dispersion_by_entity = DispersionTable::new();

    for entity in series {
        let entity_name = entity
            .name
            .clone()
            .unwrap_or_else(|| default_name.to_string());
        match engine.evaluate(entity) {
            Ok(report) => {
                dispersion_by_entity.insert(report.entity_name(), report.std_dev_growth_rate());
                reports.push(report);
            }
            Err(e) => {
                tracing::warn!(entity = %entity_name, error = %e, "Skipping entity.");
                failures.push(EntityFailure {
                    entity_name,
                    error: e.to_string(),
                });
            }
        }
    }

    let volatility = comparator.compare(&dispersion_by_entity);
    AnalysisRun {
        reports,
        failures,
        volatility,
    }
}

// ==============================================================================
// Command Handlers
// ==============================================================================

fn handle_report(args: ReportArgs, config: &Config) -> Result<()> {
    let mut series = Vec::new();
    if let Some(path) = &args.input {
        let dataset = configuration::load_dataset(path)
            .with_context(|| format!("loading dataset from {}", path.display()))?;
        series.extend(dataset.entities);
    }
    series.extend(args.entities);

    if series.is_empty() {
        anyhow::bail!("no entities supplied; pass --input FILE or --entity NAME=BASELINE,...");
    }

    let engine = IndicatorEngine::new(&config.indicators)?;
    let comparator = VolatilityComparator::new(&config.volatility);

    tracing::info!(entities = series.len(), "Starting indicator run.");
    let run = analyze(
        &engine,
        &comparator,
        &config.indicators.default_entity_name,
        series,
    );
    tracing::info!(
        succeeded = run.reports.len(),
        failed = run.failures.len(),
        "Indicator run complete."
    );

    match args.format {
        OutputFormat::Table => print!("{}", render::render_run(&run)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&run.to_output())?),
    }
    Ok(())
}

fn handle_compare(args: CompareArgs, config: &Config) -> Result<()> {
    let table: DispersionTable = args.dispersions.into_iter().collect();
    let outcome = VolatilityComparator::new(&config.volatility).compare(&table);

    match args.format {
        OutputFormat::Table => print!("{}", render::render_outcome(&outcome)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rust_decimal_macros::dec;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_report_arguments() {
        let cli = Cli::try_parse_from([
            "econ-pulse",
            "report",
            "--entity",
            "Aurelia=100,150,200,150",
            "--entity",
            "90,99,108",
            "--format",
            "json",
        ])
        .unwrap();
        let Commands::Report(args) = cli.command else {
            panic!("expected report command");
        };
        assert_eq!(args.entities.len(), 2);
        assert_eq!(args.entities[0].name.as_deref(), Some("Aurelia"));
        assert_eq!(args.entities[1].name, None);
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(cli.config, PathBuf::from("config.toml"));
    }

    #[test]
    fn rejects_malformed_entity_argument() {
        assert!(Cli::try_parse_from(["econ-pulse", "report", "--entity", "X=1,two"]).is_err());
    }

    #[test]
    fn parses_dispersion_pairs() {
        assert_eq!(
            parse_dispersion("Aurelia = 12.5").unwrap(),
            ("Aurelia".to_string(), dec!(12.5))
        );
        assert!(parse_dispersion("12.5").is_err());
        assert!(parse_dispersion("=12.5").is_err());
        assert!(parse_dispersion("A=abc").is_err());
    }

    #[test]
    fn analyze_skips_failures_and_compares_the_rest() {
        let series = vec![
            EntitySeries::new("Aurelia", dec!(100), vec![dec!(150), dec!(200), dec!(150)]),
            EntitySeries::new("Solo", dec!(100), vec![dec!(120)]),
            EntitySeries::unnamed(dec!(100), vec![dec!(110), dec!(121)]),
        ];
        let run = analyze(
            &IndicatorEngine::default(),
            &VolatilityComparator::default(),
            "A",
            series,
        );

        assert_eq!(run.reports.len(), 2);
        assert_eq!(run.failures.len(), 1);
        assert_eq!(run.failures[0].entity_name, "Solo");

        let verdicts = run.volatility.verdicts();
        assert_eq!(verdicts.len(), 1);
        assert_eq!(verdicts[0].entity_name, "A");
        assert_eq!(verdicts[0].dispersion, dec!(0));
    }

    #[test]
    fn analyze_with_only_failures_reports_no_data() {
        let series = vec![EntitySeries::new("Empty", dec!(100), Vec::new())];
        let run = analyze(
            &IndicatorEngine::default(),
            &VolatilityComparator::default(),
            "A",
            series,
        );
        assert!(run.reports.is_empty());
        assert_eq!(run.volatility, VolatilityOutcome::NoData);
    }

    #[test]
    fn json_output_contains_every_section() {
        let series = vec![EntitySeries::new(
            "Aurelia",
            dec!(100),
            vec![dec!(150), dec!(200), dec!(150)],
        )];
        let run = analyze(
            &IndicatorEngine::default(),
            &VolatilityComparator::default(),
            "A",
            series,
        );
        let json = serde_json::to_value(run.to_output()).unwrap();
        assert_eq!(json["reports"][0]["entity_name"], "Aurelia");
        assert_eq!(json["reports"][0]["rankings"][2], "Poor");
        assert_eq!(json["volatility"]["status"], "ranked");
        assert_eq!(json["volatility"]["verdicts"][0]["stability"], "least_risky");
        assert!(json["failures"].as_array().unwrap().is_empty());
    }
}
