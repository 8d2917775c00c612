use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod error;
mod log;
mod model;
mod render;
mod style;
mod table;

pub type Result<T> = anyhow::Result<T>;

/// Labels used by the original-vs-segment comparison plots.
const COMPARE_LABELS: [&str; 2] = ["Leanstore_4th_YCSB_ORG", "Using_Segment"];

#[derive(Parser)]
#[command(name = "epoch-plot")]
#[command(about = "Benchmark epoch log throughput plots", long_about = None)]
struct Cli {
    /// Debug-level diagnostics (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare the throughput of two epoch logs in one line chart.
    Compare {
        /// First epoch log.
        logfile: PathBuf,
        /// Second epoch log.
        logfile2: PathBuf,
        /// Output image (.png or .svg).
        outfile: PathBuf,

        #[command(flatten)]
        opts: ThroughputOpts,
    },

    /// Plot the throughput of one or more epoch logs.
    Throughput {
        #[arg(required = true)]
        logs: Vec<PathBuf>,

        #[arg(short = 'o', long)]
        out: PathBuf,

        #[command(flatten)]
        opts: ThroughputOpts,
    },

    /// Print the aggregated throughput series of an epoch log as JSON.
    Aggregate {
        log: PathBuf,

        #[arg(long, default_value_t = 20)]
        max_threads: usize,

        #[arg(long, default_value_t = 1.0)]
        time_epoch: f64,

        /// Apply the windowed downsampling used for plotting.
        #[arg(long)]
        windowed: bool,

        #[arg(long, default_value_t = 80)]
        time_strip: usize,

        #[arg(long, default_value_t = 1)]
        gap: usize,
    },

    /// Line chart of CSV columns against an x column.
    Series {
        csv: PathBuf,

        #[arg(short = 'o', long)]
        out: PathBuf,

        #[arg(short = 'x', long, default_value = "t")]
        x: String,

        #[arg(short = 'y', long, required = true)]
        y: Vec<String>,

        #[arg(long = "label")]
        labels: Vec<String>,

        #[arg(long)]
        title: Option<String>,

        #[arg(long, default_value = "time in seconds")]
        x_desc: String,

        #[arg(long, default_value = "value")]
        y_desc: String,

        #[arg(long)]
        style: Option<PathBuf>,
    },

    /// Bar chart with one bar per CSV row.
    Bar {
        csv: PathBuf,

        #[arg(short = 'o', long)]
        out: PathBuf,

        /// Category column (defaults to the first column).
        #[arg(long)]
        label_column: Option<String>,

        #[arg(long, default_value = "improvement")]
        value_column: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long, default_value = "Dataset")]
        x_desc: String,

        #[arg(long, default_value = "Improvement (%)")]
        y_desc: String,

        #[arg(long)]
        style: Option<PathBuf>,
    },
}

#[derive(Args)]
struct ThroughputOpts {
    /// Thread ids at or above this bound are ignored.
    #[arg(long, default_value_t = 20)]
    max_threads: usize,

    /// Seconds covered by one epoch record.
    #[arg(long, default_value_t = 1.0)]
    time_epoch: f64,

    /// Samples kept from the start of each series.
    #[arg(long, default_value_t = 80)]
    time_strip: usize,

    /// Samples averaged into one plotted point.
    #[arg(long, default_value_t = 1)]
    gap: usize,

    /// Series label, in log order (repeatable).
    #[arg(long = "label")]
    labels: Vec<String>,

    #[arg(long)]
    title: Option<String>,

    /// Chart style JSON file.
    #[arg(long)]
    style: Option<PathBuf>,
}

impl ThroughputOpts {
    fn aggregate_config(&self) -> model::AggregateConfig {
        model::AggregateConfig {
            max_threads: self.max_threads,
            time_epoch: self.time_epoch,
        }
    }

    fn window_config(&self) -> model::WindowConfig {
        model::WindowConfig {
            gap: self.gap,
            time_strip: self.time_strip,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    match cli.cmd {
        Commands::Compare {
            logfile,
            logfile2,
            outfile,
            opts,
        } => {
            let style = load_style(style::ChartStyle::throughput(), opts.style.as_deref())?
                .with_labels(&opts.labels)
                .with_title(opts.title.clone());
            plot_throughput(
                &[logfile, logfile2],
                &COMPARE_LABELS,
                &outfile,
                &opts,
                &style,
            )?;
        }
        Commands::Throughput { logs, out, opts } => {
            let style = load_style(style::ChartStyle::throughput(), opts.style.as_deref())?
                .with_labels(&opts.labels)
                .with_title(opts.title.clone());
            plot_throughput(&logs, &[], &out, &opts, &style)?;
        }
        Commands::Aggregate {
            log,
            max_threads,
            time_epoch,
            windowed,
            time_strip,
            gap,
        } => {
            let config = model::AggregateConfig {
                max_threads,
                time_epoch,
            };
            let mut series = model::aggregate(&log, &config)
                .with_context(|| format!("aggregate epoch log {}", log.display()))?;
            if windowed {
                series = series.windowed(&model::WindowConfig { gap, time_strip }, time_epoch)?;
            }
            println!("{}", serde_json::to_string(&series)?);
        }
        Commands::Series {
            csv,
            out,
            x,
            y,
            labels,
            title,
            x_desc,
            y_desc,
            style: style_path,
        } => {
            let base = style::ChartStyle::new(&x_desc, &y_desc);
            let style = load_style(base, style_path.as_deref())?
                .with_labels(&labels)
                .with_title(title);
            let table = table::Table::from_path(&csv)
                .with_context(|| format!("read CSV {}", csv.display()))?;
            let xs = table.numeric_column(&x)?;
            let mut series = Vec::with_capacity(y.len());
            for column in &y {
                let ys = table.numeric_column(column)?;
                series.push(render::PlotSeries {
                    name: column.clone(),
                    points: xs.iter().copied().zip(ys).collect(),
                });
            }
            info!("{}: {} rows, {} series", csv.display(), xs.len(), series.len());
            render::render_line_chart(&out, &series, &style)
                .with_context(|| format!("render {}", out.display()))?;
            println!("Wrote {}", out.display());
        }
        Commands::Bar {
            csv,
            out,
            label_column,
            value_column,
            title,
            x_desc,
            y_desc,
            style: style_path,
        } => {
            let base = style::ChartStyle::new(&x_desc, &y_desc);
            let style = load_style(base, style_path.as_deref())?.with_title(title);
            let table = table::Table::from_path(&csv)
                .with_context(|| format!("read CSV {}", csv.display()))?;
            let label_column = match label_column {
                Some(c) => c,
                None => match table.first_header() {
                    Some(h) => h.to_string(),
                    None => bail!("{} has no columns", csv.display()),
                },
            };
            let labels = table.text_column(&label_column)?;
            let values = table.numeric_column(&value_column)?;
            let bars: Vec<render::Bar> = labels
                .into_iter()
                .zip(values)
                .map(|(label, value)| render::Bar { label, value })
                .collect();
            render::render_bar_chart(&out, &bars, &style)
                .with_context(|| format!("render {}", out.display()))?;
            println!("Wrote {}", out.display());
        }
    }

    Ok(())
}

fn load_style(base: style::ChartStyle, path: Option<&Path>) -> Result<style::ChartStyle> {
    match path {
        Some(p) => base
            .load(p)
            .with_context(|| format!("load chart style {}", p.display())),
        None => Ok(base),
    }
}

/// Aggregate every log, downsample, and draw them in one chart.
///
/// Series without a style label are named from `names`, then from the log file stem.
fn plot_throughput(
    logs: &[PathBuf],
    names: &[&str],
    out: &Path,
    opts: &ThroughputOpts,
    style: &style::ChartStyle,
) -> Result<()> {
    let aggregate = opts.aggregate_config();
    let window = opts.window_config();

    let mut series = Vec::with_capacity(logs.len());
    for (i, log) in logs.iter().enumerate() {
        let full = model::aggregate(log, &aggregate)
            .with_context(|| format!("aggregate epoch log {}", log.display()))?;
        let windowed = full.windowed(&window, aggregate.time_epoch)?;
        info!(
            "{}: {} epochs, {} plotted points",
            log.display(),
            full.len(),
            windowed.len()
        );
        if windowed.is_empty() {
            bail!(
                "{}: {} epochs is shorter than one window of {}",
                log.display(),
                full.len(),
                window.gap
            );
        }
        let name = match names.get(i) {
            Some(n) => n.to_string(),
            None => log
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| log.display().to_string()),
        };
        series.push(render::PlotSeries {
            name,
            points: windowed.points(),
        });
    }

    render::render_line_chart(out, &series, style)
        .with_context(|| format!("render {}", out.display()))?;
    println!("Wrote {}", out.display());
    Ok(())
}
