//! cf-ols: fit the treatment-effect model to a CSV file and write the results.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use counterfactual_ols::io::{load_observations, render_json, render_summary};
use counterfactual_ols::{FitOptions, InferenceEngine, RegressionFitter, RssFormula, SolverType};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cf-ols")]
#[command(about = "OLS treatment-effect regression with counterfactual outcome means")]
#[command(version)]
struct Cli {
    /// Input CSV with columns id, treatment, outcome, covariate
    #[arg(short, long, default_value = "data.csv")]
    input: PathBuf,

    /// Results file
    #[arg(short, long, default_value = "results.txt")]
    output: PathBuf,

    /// Results format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Normal-equations solver
    #[arg(long, value_enum, default_value_t = SolverArg::Inverse)]
    solver: SolverArg,

    /// Residual sum of squares formula
    #[arg(long, value_enum, default_value_t = RssArg::ScaledVariance)]
    rss_formula: RssArg,

    /// Relative pivot tolerance for declaring X'X singular
    #[arg(long, default_value_t = 1e-10)]
    rank_tolerance: f64,

    /// Log file (appended)
    #[arg(long, default_value = "app.log")]
    log_file: PathBuf,

    /// Log verbosity (trace, debug, info, warn, error). Defaults to RUST_LOG, then info.
    #[arg(long)]
    log_level: Option<tracing::Level>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum SolverArg {
    Inverse,
    Qr,
}

impl From<SolverArg> for SolverType {
    fn from(arg: SolverArg) -> Self {
        match arg {
            SolverArg::Inverse => SolverType::Inverse,
            SolverArg::Qr => SolverType::Qr,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum RssArg {
    ScaledVariance,
    SumOfSquares,
}

impl From<RssArg> for RssFormula {
    fn from(arg: RssArg) -> Self {
        match arg {
            RssArg::ScaledVariance => RssFormula::ScaledSquaredResidualVariance,
            RssArg::SumOfSquares => RssFormula::SumOfSquares,
        }
    }
}

fn init_logging(path: &Path, level: Option<tracing::Level>) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let filter = match level {
        Some(level) => EnvFilter::default().add_directive(LevelFilter::from_level(level).into()),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();

    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let options = FitOptions::builder()
        .solver(cli.solver.into())
        .rss_formula(cli.rss_formula.into())
        .rank_tolerance(cli.rank_tolerance)
        .build()
        .context("invalid fit options")?;

    let stage = Instant::now();
    tracing::info!(path = %cli.input.display(), "loading observations");
    let data = load_observations(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    tracing::info!(rows = data.len(), elapsed = ?stage.elapsed(), "observations loaded");

    let stage = Instant::now();
    let engine = InferenceEngine::from_options(&options);
    let fitted = RegressionFitter::new(options)
        .fit_observations(&data)
        .context("failed to fit model")?;
    tracing::info!(
        intercept = fitted.coefficients()[0],
        treatment = fitted.coefficients()[1],
        covariate = fitted.coefficients()[2],
        elapsed = ?stage.elapsed(),
        "model fitted"
    );

    let report = engine.analyze_fit(&fitted).context("failed to compute statistics")?;
    tracing::info!(
        r_squared = report.r_squared,
        f_pvalue = report.f_pvalue,
        ate = report.average_treatment_effect(),
        "statistics computed"
    );

    let rendered = match cli.format {
        Format::Text => render_summary(&report),
        Format::Json => render_json(&report).context("failed to serialize report")?,
    };
    std::fs::write(&cli.output, rendered)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    tracing::info!(path = %cli.output.display(), "results written");

    Ok(())
}

fn main() -> Result<()> {
    let start = Instant::now();
    let cli = Cli::parse();

    init_logging(&cli.log_file, cli.log_level)?;
    tracing::info!("starting application");

    if let Err(err) = run(&cli) {
        tracing::error!("run failed: {err:#}");
        return Err(err);
    }

    tracing::info!("application finished");
    println!("Execution time: {:?}", start.elapsed());
    Ok(())
}
