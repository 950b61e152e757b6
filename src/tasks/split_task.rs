use crate::config::SplitConfig;
use crate::error::Result;
use crate::mordor::{BucketSizing, MultiSeriesCollector};
use crate::records::{Grouping, Record, UnitMismatch, UnitTracker, filter_by_threshold, group_by_field};
use crate::render::{TableRenderer, format_general, render_group_summary};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitReport {
    /// Categories that produced output.
    pub categories: usize,
    /// Categories left with no split group after thresholding.
    pub empty_categories: usize,
    pub files_written: Vec<PathBuf>,
    pub dropped_records: usize,
    pub unit_mismatches: Vec<UnitMismatch>,
}

/// Sub-directory of a category holding one raw value file per split key.
pub const VALUES_DIR: &str = "values";

/// Splits resource summaries by category, then by one field, and writes a
/// histogram table plus a summary table for every output field.
///
/// Layout under `<output_dir>/<category>/`:
/// - `<field>.dat`: aligned histogram table
/// - `<field>.summary`: one statistics row per split key
/// - `values/<split_key>.dat`: one line per record with its output field
///   values in configured order, `nan` where a record lacks one
pub struct SplitTask {
    config: SplitConfig,
    sizing: BucketSizing,
    renderer: TableRenderer,
}

impl SplitTask {
    pub fn new(config: SplitConfig) -> Result<Self> {
        config.validate()?;
        let sizing = config.histogram.bucket_sizing()?;
        let renderer = config.histogram.renderer();
        Ok(Self {
            config,
            sizing,
            renderer,
        })
    }

    pub fn config(&self) -> &SplitConfig {
        &self.config
    }

    pub fn run(&self, records: &[Record]) -> Result<SplitReport> {
        let mut report = SplitReport::default();
        let mut units = UnitTracker::new();

        let by_category = group_by_field(records, &self.config.category_field);
        report.dropped_records += by_category.dropped;

        for (category, members) in by_category.iter() {
            if category.is_empty() {
                warn!(records = members.len(), "skipping records with an empty category");
                report.dropped_records += members.len();
                continue;
            }
            info!(category, records = members.len(), "subdividing category");

            let mut split = group_by_field(members.iter().copied(), &self.config.split_field);
            report.dropped_records += split.dropped;
            let filtered = filter_by_threshold(&mut split, self.config.threshold);
            if filtered > 0 {
                info!(
                    category,
                    filtered,
                    threshold = self.config.threshold,
                    "filtered out small groups"
                );
            }
            if split.is_empty() {
                report.empty_categories += 1;
                continue;
            }

            let dir = self.config.output_dir.join(path_component(category));
            fs::create_dir_all(&dir)?;
            report
                .files_written
                .extend(self.write_values(&dir, &split)?);
            for field in &self.config.output_fields {
                let mut collector = self.collect_field(&split, field, &mut units);
                report
                    .files_written
                    .extend(self.write_field(&dir, field, &split, &mut collector)?);
            }
            report.categories += 1;
        }

        report.unit_mismatches = units.into_mismatches();
        info!(
            categories = report.categories,
            files = report.files_written.len(),
            "split finished"
        );
        Ok(report)
    }

    fn collect_field(
        &self,
        split: &Grouping<'_>,
        field: &str,
        units: &mut UnitTracker,
    ) -> MultiSeriesCollector {
        let mut collector = MultiSeriesCollector::new()
            .with_sizing(self.sizing)
            .with_outlier_policy(self.config.histogram.outliers);
        let mut missing = 0usize;
        for (key, members) in split.iter() {
            for r in members {
                match r.numeric_field(field) {
                    Some(v) => {
                        units.observe(field, v.unit.as_deref());
                        collector.insert(key, v.value);
                    }
                    None => missing += 1,
                }
            }
        }
        if missing > 0 {
            debug!(field, missing, "records without a numeric value");
        }
        collector
    }

    fn write_values(&self, dir: &Path, split: &Grouping<'_>) -> Result<Vec<PathBuf>> {
        let values_dir = dir.join(VALUES_DIR);
        fs::create_dir_all(&values_dir)?;

        let mut written = Vec::with_capacity(split.len());
        for (key, members) in split.iter() {
            let path = values_dir.join(format!("{}.dat", path_component(key)));
            let mut w = BufWriter::new(File::create(&path)?);
            for r in members {
                let row: Vec<String> = self
                    .config
                    .output_fields
                    .iter()
                    .map(|f| format_general(r.numeric_field(f).map_or(f64::NAN, |v| v.value)))
                    .collect();
                writeln!(w, "{}", row.join(" "))?;
            }
            w.flush()?;
            written.push(path);
        }
        debug!(dir = %values_dir.display(), files = written.len(), "wrote raw values");
        Ok(written)
    }

    fn write_field(
        &self,
        dir: &Path,
        field: &str,
        split: &Grouping<'_>,
        collector: &mut MultiSeriesCollector,
    ) -> Result<[PathBuf; 2]> {
        let name = path_component(field);
        let table = dir.join(format!("{name}.dat"));
        self.renderer.export(collector, &table)?;

        let summary = dir.join(format!("{name}.summary"));
        let mut w = BufWriter::new(File::create(&summary)?);
        let groups = split.iter().map(|(key, members)| (key, members.len()));
        render_group_summary(collector, groups, &mut w)?;
        w.flush()?;

        debug!(table = %table.display(), summary = %summary.display(), "wrote field");
        Ok([table, summary])
    }
}

/// Makes a record value safe to use as one path component.
fn path_component(raw: &str) -> String {
    match raw {
        "." | ".." => raw.replace('.', "_"),
        _ => raw.replace(['/', '\\'], "_"),
    }
}
