use anyhow::{Context, Result, bail};
use clap::builder::{PossibleValue, PossibleValuesParser, TypedValueParser};
use clap::{Args, Parser, Subcommand, ValueEnum};
use mordor::config::{self, HistogramParams, PlotConfig, SplitConfig};
use mordor::mordor::KeyOrder;
use mordor::records::{read_json_stream, read_list_file};
use mordor::render::TableStyle;
use mordor::stats::OutlierPolicy;
use mordor::tasks::{PlotTask, SplitTask};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::str::FromStr;
use strum::{EnumMessage, IntoEnumIterator};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Aligned histograms of keyed measurements")]
struct Cli {
    /// Log per-line and per-rebuild details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Histogram `label value` lines read from a delimited text file
    Plot(PlotArgs),
    /// Split resource summaries by category and field, one table per output field
    Split(SplitArgs),
    /// Print the JSON schema of a task configuration
    Schema {
        #[arg(value_enum)]
        task: SchemaTask,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SchemaTask {
    Plot,
    Split,
}

#[derive(Args)]
struct HistogramArgs {
    /// Table layout
    #[arg(long, value_parser = choice_parser::<TableStyle>())]
    style: Option<TableStyle>,

    /// Series column order
    #[arg(long, value_parser = choice_parser::<KeyOrder>())]
    order: Option<KeyOrder>,

    /// Outlier handling for per-key histograms
    #[arg(long, value_parser = choice_parser::<OutlierPolicy>())]
    outliers: Option<OutlierPolicy>,

    /// Fixed bucket width instead of the data-derived one
    #[arg(short = 'w', long)]
    bucket_width: Option<f64>,
}

/// Possible values come from the enum's kebab-case names, with its strum
/// messages as their help.
fn choice_parser<K>() -> impl TypedValueParser<Value = K>
where
    K: IntoEnumIterator
        + Into<&'static str>
        + EnumMessage
        + FromStr<Err = strum::ParseError>
        + Copy
        + Send
        + Sync
        + 'static,
{
    let values = K::iter().map(|k| {
        let help = k.get_detailed_message().or_else(|| k.get_message()).unwrap_or("");
        let name: &'static str = k.into();
        PossibleValue::new(name).help(help)
    });
    PossibleValuesParser::new(values).try_map(|s| s.parse::<K>())
}

impl HistogramArgs {
    fn apply(&self, params: &mut HistogramParams) {
        if let Some(s) = self.style {
            params.style = s;
        }
        if let Some(o) = self.order {
            params.order = o;
        }
        if let Some(o) = self.outliers {
            params.outliers = o;
        }
        if self.bucket_width.is_some() {
            params.bucket_width = self.bucket_width;
        }
    }
}

#[derive(Args)]
struct PlotArgs {
    /// 1-based column holding the series key
    label_column: Option<usize>,

    /// 1-based column holding the value
    value_column: Option<usize>,

    /// JSON configuration; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Input file (default: stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Histogram table destination (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Field delimiter characters
    #[arg(short = 'F', long)]
    delimiters: Option<String>,

    #[command(flatten)]
    histogram: HistogramArgs,
}

#[derive(Args)]
struct SplitArgs {
    /// Concatenated JSON summaries
    #[arg(short, long, conflicts_with = "list")]
    json: Option<PathBuf>,

    /// File listing one summary path per line
    #[arg(short, long)]
    list: Option<PathBuf>,

    /// JSON configuration; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Field whose values become the series keys
    #[arg(short, long)]
    split_field: Option<String>,

    /// Minimum records per split value
    #[arg(short, long)]
    threshold: Option<usize>,

    /// Comma-separated numeric fields to histogram
    #[arg(short = 'f', long, value_delimiter = ',')]
    fields: Option<Vec<String>>,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    #[command(flatten)]
    histogram: HistogramArgs,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "mordor=debug" } else { "mordor=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn plot(args: PlotArgs) -> Result<()> {
    let mut cfg: PlotConfig = match &args.config {
        Some(path) => config::from_file(path)
            .with_context(|| format!("reading plot config {}", path.display()))?,
        None => PlotConfig::default(),
    };
    if let Some(c) = args.label_column {
        cfg.label_column = c;
    }
    if let Some(c) = args.value_column {
        cfg.value_column = c;
    }
    if let Some(d) = args.delimiters {
        cfg.delimiters = d;
    }
    args.histogram.apply(&mut cfg.histogram);

    let mut task = PlotTask::new(cfg).context("invalid plot configuration")?;

    let input: Box<dyn io::BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("opening input {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };
    let mut output: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating output {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let report = task.run(input, &mut output)?;
    output.flush()?;
    info!(
        lines = report.lines,
        inserted = report.inserted,
        skipped = report.skipped,
        "plot done"
    );
    Ok(())
}

fn split(args: SplitArgs) -> Result<()> {
    let mut cfg: SplitConfig = match (&args.config, &args.split_field) {
        (Some(path), _) => config::from_file(path)
            .with_context(|| format!("reading split config {}", path.display()))?,
        (None, Some(field)) => SplitConfig::new(field.clone()),
        (None, None) => bail!("a split field is required (--split-field or --config)"),
    };
    if let Some(f) = args.split_field {
        cfg.split_field = f;
    }
    if let Some(t) = args.threshold {
        cfg.threshold = t;
    }
    if let Some(f) = args.fields {
        cfg.output_fields = f;
    }
    if let Some(d) = args.output_dir {
        cfg.output_dir = d;
    }
    args.histogram.apply(&mut cfg.histogram);

    let task = SplitTask::new(cfg).context("invalid split configuration")?;

    let records = match (&args.json, &args.list) {
        (Some(path), None) => {
            let f = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            read_json_stream(BufReader::new(f))
                .with_context(|| format!("parsing summaries in {}", path.display()))?
        }
        (None, Some(path)) => {
            let loaded = read_list_file(path)
                .with_context(|| format!("reading list file {}", path.display()))?;
            if !loaded.skipped.is_empty() {
                warn!(skipped = loaded.skipped.len(), "some summary files were skipped");
            }
            loaded.records
        }
        _ => bail!("input not specified (--json or --list)"),
    };
    info!(records = records.len(), "read summaries");

    let report = task.run(&records)?;
    for m in &report.unit_mismatches {
        warn!(
            field = %m.field,
            expected = m.expected.as_deref().unwrap_or("<none>"),
            found = m.found.as_deref().unwrap_or("<none>"),
            occurrences = m.occurrences,
            "unit mismatch"
        );
    }
    info!(
        categories = report.categories,
        files = report.files_written.len(),
        dropped = report.dropped_records,
        "split done"
    );
    Ok(())
}

fn schema(task: SchemaTask) -> Result<()> {
    let schema = match task {
        SchemaTask::Plot => config::schema::<PlotConfig>(),
        SchemaTask::Split => config::schema::<SplitConfig>(),
    };
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Cmd::Plot(args) => plot(args),
        Cmd::Split(args) => split(args),
        Cmd::Schema { task } => schema(task),
    }
}
