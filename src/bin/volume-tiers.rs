//! volume-tiers CLI
//!
//! Reads one JSON dataset (an array of flat numeric objects), runs the
//! volume-tier pipeline and writes the `clusteredData` /
//! `standardizedClusterBoundaries` response.
//!
//! # Usage
//!
//! ```text
//! volume-tiers records.json -o response.json --clusters 4 --summary
//! cat records.json | volume-tiers --method regression --threshold 2.5
//! ```

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use volume_tiers::prelude::*;

/// Volume tiering with per-tier outlier detection.
#[derive(Parser, Debug)]
#[command(name = "volume-tiers")]
#[command(version)]
#[command(about = "Cluster records into volume tiers and flag outliers within each tier")]
struct Cli {
    /// Input JSON file (reads stdin when omitted or "-")
    input: Option<PathBuf>,

    /// Output file for the response (writes stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write chart data (boundaries, buffer zones, mean prices) to this file
    #[arg(long)]
    chart: Option<PathBuf>,

    /// Number of volume tiers
    #[arg(short = 'k', long, default_value_t = KMeans::DEFAULT_K)]
    clusters: usize,

    /// Seed for centroid initialization
    #[arg(long, default_value_t = KMeans::DEFAULT_SEED)]
    seed: u64,

    /// Centroid initialization strategy
    #[arg(long, value_enum, default_value_t = SeedingArg::Uniform)]
    seeding: SeedingArg,

    /// Column partitioned into tiers
    #[arg(long, default_value = "Quantity")]
    feature_column: String,

    /// Column receiving the cluster id
    #[arg(long, default_value = "VolumeCluster")]
    cluster_column: String,

    /// Column receiving the outlier flag
    #[arg(long, default_value = "MahalanobisOutlier")]
    outlier_column: String,

    /// Column summarized into buffer zones
    #[arg(long, default_value = "Price")]
    price_column: String,

    /// Comma-separated columns scored by the outlier detector
    #[arg(long, value_delimiter = ',', default_values = ["Quantity", "Price"])]
    features: Vec<String>,

    /// Outlier detection strategy
    #[arg(long, value_enum, default_value_t = MethodArg::Mahalanobis)]
    method: MethodArg,

    /// Outlier threshold (defaults to the strategy's own)
    #[arg(long)]
    threshold: Option<f64>,

    /// Neighbours averaged by the nearest-neighbors strategy
    #[arg(long)]
    neighbors: Option<usize>,

    /// Mean of the raw feature column, to report raw-unit boundaries
    #[arg(long, requires = "quantity_std")]
    quantity_mean: Option<f64>,

    /// Standard deviation of the raw feature column
    #[arg(long, requires = "quantity_mean")]
    quantity_std: Option<f64>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Print a human-readable summary to stderr
    #[arg(long)]
    summary: bool,

    /// Verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum SeedingArg {
    Uniform,
    PlusPlus,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum MethodArg {
    Mahalanobis,
    Regression,
    NearestNeighbors,
}

impl Cli {
    fn outlier_method(&self) -> Result<OutlierMethod<f64>> {
        let method = match self.method {
            MethodArg::Mahalanobis => OutlierMethod::mahalanobis(),
            MethodArg::Regression => OutlierMethod::regression(),
            MethodArg::NearestNeighbors => match OutlierMethod::nearest_neighbors() {
                OutlierMethod::NearestNeighbors { neighbors, threshold } => {
                    OutlierMethod::NearestNeighbors {
                        neighbors: self.neighbors.unwrap_or(neighbors),
                        threshold,
                    }
                }
                other => other,
            },
        };
        if self.neighbors.is_some() && self.method != MethodArg::NearestNeighbors {
            bail!("--neighbors only applies to --method nearest-neighbors");
        }
        Ok(method)
    }

    fn tiers(&self) -> Result<VolumeTiers<f64>> {
        let features: Vec<&str> = self.features.iter().map(String::as_str).collect();
        let seeding = match self.seeding {
            SeedingArg::Uniform => Seeding::Uniform,
            SeedingArg::PlusPlus => Seeding::PlusPlus,
        };

        let mut builder = VolumeTiers::new()
            .clusters(self.clusters)
            .seed(self.seed)
            .seeding(seeding)
            .feature_column(&self.feature_column)
            .cluster_column(&self.cluster_column)
            .outlier_column(&self.outlier_column)
            .price_column(&self.price_column)
            .outlier_features(&features)
            .outlier_method(self.outlier_method()?);

        if let Some(threshold) = self.threshold {
            builder = builder.threshold(threshold);
        }
        if let (Some(mean), Some(std)) = (self.quantity_mean, self.quantity_std) {
            builder = builder.standardization(mean, std);
        }

        builder.build().context("invalid configuration")
    }
}

/// Read the dataset from `path`, or from `stdin` when `path` is absent or "-".
fn read_input<R: Read>(path: Option<&PathBuf>, mut stdin: R) -> Result<String> {
    match path {
        Some(p) if p.as_os_str() != "-" => {
            fs::read_to_string(p).with_context(|| format!("failed to read {}", p.display()))
        }
        _ => {
            let mut buf = String::new();
            stdin
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&PathBuf>, body: &str) -> Result<()> {
    match path {
        Some(p) => fs::write(p, body).with_context(|| format!("failed to write {}", p.display())),
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{body}").context("failed to write stdout")
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let tiers = cli.tiers()?;
    debug!(config = ?tiers.config(), "configuration resolved");

    // Load
    let started = Instant::now();
    let raw = read_input(cli.input.as_ref(), io::stdin().lock())?;
    let dataset = parse_dataset(&raw).context("failed to parse input dataset")?;
    info!(
        records = dataset.len(),
        columns = dataset.columns().len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "dataset loaded"
    );

    // Run
    let started = Instant::now();
    let result = tiers.run(&dataset).context("tiering failed")?;
    info!(
        clusters = result.k(),
        iterations = result.iterations,
        outliers = result.total_outliers(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "pipeline finished"
    );
    for (cluster, (&size, &outliers)) in result
        .cluster_sizes
        .iter()
        .zip(&result.outlier_counts)
        .enumerate()
    {
        debug!(cluster, size, outliers, "tier");
    }
    if tiers.config().scale.is_some_and(|s| s.is_degenerate()) {
        warn!("quantity standard deviation is zero; boundaries use a unit scale");
    }

    if cli.summary {
        eprintln!("{result}");
    }

    // Write
    let started = Instant::now();
    let body = to_json(&TierResponse::from_result(&result), cli.pretty)?;
    write_output(cli.output.as_ref(), &body)?;

    if let Some(chart_path) = cli.chart.as_ref() {
        let chart = to_json(&ChartData::from_result(&result), cli.pretty)?;
        write_output(Some(chart_path), &chart)?;
    }
    info!(
        bytes = body.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "response written"
    );

    Ok(())
}
