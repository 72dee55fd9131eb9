use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use omnichannel_roi::config::{parse_parameter_file, Config, ConfigOverrides};
use omnichannel_roi::engine::tiers::{compare_tiers, TierOutcome};
use omnichannel_roi::engine::whatif::{simulate_whatif, WhatIfResult};
use omnichannel_roi::output::chart::render_bar_chart;
use omnichannel_roi::output::csv::{estimate_to_csv, fields_to_csv, tiers_to_csv, whatif_to_csv};
use omnichannel_roi::output::json::render_json;
use omnichannel_roi::output::print::render_print_report;
use omnichannel_roi::output::table::{
    render_benefits_table, render_cost_table, render_fields_table, render_impact_table,
    render_interaction_table, render_presets_table, render_summary_table, render_tiers_table,
    render_whatif_table,
};
use omnichannel_roi::params::{parse_assignment, IndustryPreset, ParamKey, ParameterSet, ParameterStore};
use omnichannel_roi::types::EstimateReport;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Debug, Parser)]
#[command(
    name = "omnichannel-roi",
    about = "Estimate the ROI of automating voice and text customer interactions"
)]
struct Cli {
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long)]
    industry: Option<String>,
    #[arg(short, long)]
    tier: Option<String>,
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,
    /// JSON parameter file; replaces the preset values entirely
    #[arg(short = 'p', long)]
    params: Option<PathBuf>,
    /// key=value, clamped to the field's input range
    #[arg(short = 's', long = "set", value_name = "KEY=VALUE")]
    set: Vec<String>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Estimate {
        #[arg(long)]
        print: bool,
        #[arg(long)]
        no_chart: bool,
    },
    Presets,
    Fields,
    Tiers,
    Whatif {
        #[arg(long = "change", value_name = "KEY=VALUE", required = true)]
        changes: Vec<String>,
    },
    Config {
        #[arg(long)]
        init: bool,
        #[arg(long)]
        show: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load(Some(&config_path))?;
    config.apply_overrides(ConfigOverrides {
        industry: cli.industry.clone(),
        tier: cli.tier.clone(),
        format: cli
            .output
            .and_then(|f| f.to_possible_value())
            .map(|v| v.get_name().to_string()),
    });

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.output.log_level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let default_command = Commands::Estimate {
        print: false,
        no_chart: false,
    };
    let command = cli.command.as_ref().unwrap_or(&default_command);
    if matches!(command, Commands::Config { .. }) {
        return handle_config_command(command, &config, &config_path);
    }

    let format = resolve_format(&config)?;
    let store = build_store(&cli, &config)?;
    info!(
        "estimating for {} ({} tier)",
        store.source(),
        store.snapshot().ai_tier
    );

    match command {
        Commands::Estimate { print, no_chart } => {
            let report = EstimateReport::from_store(&store);
            let chart_width = (!*no_chart).then_some(config.output.chart_width);
            if *print {
                println!("{}", render_print_report(&report, chart_width));
            } else {
                print_estimate(&report, format, chart_width)?;
            }
        }
        Commands::Presets => print_presets(&IndustryPreset::all(), format)?,
        Commands::Fields => print_fields(store.snapshot(), format)?,
        Commands::Tiers => {
            let outcomes = compare_tiers(store.snapshot());
            print_tiers(&outcomes, store.snapshot().operating_days_per_month, format)?;
        }
        Commands::Whatif { changes } => {
            let changes = parse_assignments(changes)?;
            let result = simulate_whatif(store.snapshot(), &changes);
            print_whatif(&result, format)?;
        }
        Commands::Config { .. } => {}
    }

    Ok(())
}

fn handle_config_command(command: &Commands, config: &Config, config_path: &PathBuf) -> Result<()> {
    let Commands::Config { init, show } = command else {
        return Ok(());
    };
    if *init {
        Config::write_template(config_path)?;
        println!("Wrote config template to {}", config_path.display());
    }
    if *show || !*init {
        println!("{}", render_json(config)?);
    }
    Ok(())
}

fn resolve_format(config: &Config) -> Result<OutputFormat> {
    OutputFormat::from_str(&config.output.format, true)
        .map_err(|e| anyhow!("invalid output format {}: {e}", config.output.format))
}

fn build_store(cli: &Cli, config: &Config) -> Result<ParameterStore> {
    let mut store = config.initial_store()?;

    if let Some(path) = &cli.params {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed reading parameter file: {}", path.display()))?;
        let params = parse_parameter_file(&data, config.tier()?)
            .with_context(|| format!("failed parsing parameter file: {}", path.display()))?;
        debug!("loaded parameters from {}", path.display());
        store = store.replace(params);
        if cli.tier.is_some() {
            store = store.select_tier(config.tier()?);
        }
    }

    for (key, value) in parse_assignments(&cli.set)? {
        store = store.enter_field(key, value);
    }
    Ok(store)
}

fn parse_assignments(raw: &[String]) -> Result<Vec<(ParamKey, f64)>> {
    raw.iter()
        .map(|entry| parse_assignment(entry).map_err(anyhow::Error::from))
        .collect()
}

fn print_estimate(
    report: &EstimateReport,
    format: OutputFormat,
    chart_width: Option<usize>,
) -> Result<()> {
    match format {
        OutputFormat::Table => {
            println!("{}", render_impact_table(&report.results));
            println!("{}", render_cost_table(&report.results));
            println!("{}", render_interaction_table(&report.results));
            println!("{}", render_summary_table(report));
            println!("{}", report.scenario_interpretation);
            if let Some(narrative) = &report.payback_narrative {
                println!("{narrative}");
            }
            if let Some(width) = chart_width {
                println!();
                print!("{}", render_bar_chart(&report.chart, width));
            }
            println!("{}", render_benefits_table(report.qualitative_benefits));
        }
        OutputFormat::Json => println!("{}", render_json(report)?),
        OutputFormat::Csv => print!("{}", estimate_to_csv(report)?),
    }
    Ok(())
}

fn print_presets(presets: &[&IndustryPreset], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_presets_table(presets)),
        OutputFormat::Json => println!("{}", render_json(presets)?),
        OutputFormat::Csv => {
            warn!("CSV output for presets not implemented, using JSON");
            println!("{}", render_json(presets)?);
        }
    }
    Ok(())
}

fn print_fields(params: &ParameterSet, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_fields_table(params)),
        OutputFormat::Json => {
            let fields: Vec<_> = ParamKey::ALL
                .iter()
                .map(|key| {
                    serde_json::json!({
                        "field": key.as_slug(),
                        "label": key.label(),
                        "value": params.get(*key),
                        "range": key.range(),
                    })
                })
                .collect();
            println!("{}", render_json(&fields)?);
        }
        OutputFormat::Csv => print!("{}", fields_to_csv(params)?),
    }
    Ok(())
}

fn print_tiers(outcomes: &[TierOutcome], operating_days: f64, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_tiers_table(outcomes, operating_days)),
        OutputFormat::Json => println!("{}", render_json(outcomes)?),
        OutputFormat::Csv => print!("{}", tiers_to_csv(outcomes)?),
    }
    Ok(())
}

fn print_whatif(result: &WhatIfResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_whatif_table(result)),
        OutputFormat::Json => println!("{}", render_json(result)?),
        OutputFormat::Csv => print!("{}", whatif_to_csv(result)?),
    }
    Ok(())
}
