use crate::bench::{MeasurementSeries, build_harness};
use crate::cli::Output;
use crate::config::overrides::{OutputOverrides, ParallelOverrides};
use crate::config::{BenchConfig, ConfigOverrides};
use crate::count::StrategyKind;
use crate::reports::{ChartRenderer, CsvReportGenerator, JsonReportGenerator, ReportGenerator};
use crate::text::normalize_bytes;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Text file to analyse
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Token to count (case-insensitive)
    #[arg(short = 'w', long)]
    pub query: Option<String>,

    /// Rounds over every strategy
    #[arg(short = 'n', long)]
    pub repetitions: Option<usize>,

    /// Strategy to run, repeat to select several (execution order is kept)
    #[arg(short, long = "strategy", value_enum)]
    pub strategies: Vec<StrategyKind>,

    /// Worker threads for the parallel CPU strategy (0 = one per core)
    #[arg(long)]
    pub workers: Option<usize>,

    /// Seconds to wait for CPU workers before giving up
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Write measurements as CSV
    #[arg(long, value_name = "FILE")]
    pub csv: Option<PathBuf>,

    /// Write measurements and summaries as JSON
    #[arg(long, value_name = "FILE")]
    pub json: Option<PathBuf>,

    /// Skip the terminal chart
    #[arg(long)]
    pub no_chart: bool,
}

impl RunArgs {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            input: self.input.clone(),
            query: self.query.clone(),
            repetitions: self.repetitions,
            strategies: self.strategies.clone(),
            parallel: ParallelOverrides {
                workers: self.workers,
                timeout_secs: self.timeout_secs,
            },
            output: OutputOverrides {
                csv: self.csv.clone(),
                json: self.json.clone(),
                chart: self.no_chart.then_some(false),
            },
        }
    }
}

pub async fn execute(args: RunArgs, config_path: Option<&str>, output: &Output) -> Result<()> {
    let config = BenchConfig::load_with(config_path, &args.overrides())?;

    let input = config
        .input
        .clone()
        .context("No input file given (use --input or set `input` in the config)")?;
    let raw = tokio::fs::read(&input)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let normalized = normalize_bytes(&raw)
        .with_context(|| format!("Failed to normalize {}", input.display()))?;

    output.header("Benchmark");
    output.key_value("Input", &input.display().to_string(), false);
    output.key_value("Query", &config.query, true);
    output.key_value("Repetitions", &config.repetitions.to_string(), false);
    output.key_value("CPU workers", &config.parallel.resolve_workers().to_string(), false);
    output.verbose(&format!(
        "Strategies: {}",
        config
            .strategies
            .iter()
            .map(|s| s.label())
            .collect::<Vec<_>>()
            .join(", ")
    ));
    output.blank_line();

    let bench_config = config.clone();
    let series = tokio::task::spawn_blocking(move || -> Result<MeasurementSeries> {
        let tokens = normalized.tokens();
        tracing::debug!("Normalized input into {} tokens", tokens.len());
        let harness = build_harness(&bench_config.strategies, &bench_config.parallel, &bench_config.gpu);
        Ok(harness.run(&tokens, &bench_config.query, bench_config.repetitions)?)
    })
    .await
    .context("Benchmark task panicked")??;

    for measurement in &series {
        output.measurement(measurement);
    }

    output.header("Summary");
    for summary in series.summaries() {
        output.summary(&summary);
    }
    output.blank_line();

    if series.agreement() {
        output.success("All successful strategies agree on the occurrence count");
    } else {
        output.error("Strategies disagree on the occurrence count");
    }

    if let Some(path) = &config.output.csv {
        CsvReportGenerator::new().write_to(&series, path)?;
        output.success(&format!("CSV file generated: {}", path.display()));
    }
    if let Some(path) = &config.output.json {
        JsonReportGenerator.write_to(&series, path)?;
        output.success(&format!("JSON file generated: {}", path.display()));
    }

    if config.output.chart && !output.is_quiet() {
        output.blank_line();
        let chart = ChartRenderer::new(40, console::colors_enabled()).generate(&series)?;
        output.block(&chart);
    }

    if !series.agreement() {
        anyhow::bail!("Occurrence counts differ between strategies");
    }
    Ok(())
}
