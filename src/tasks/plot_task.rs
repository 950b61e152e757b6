use crate::config::PlotConfig;
use crate::error::Result;
use crate::mordor::MultiSeriesCollector;
use crate::render::TableRenderer;
use crate::utils::file_parsing::{parse_value, split_fields};
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlotReport {
    pub lines: u64,
    pub inserted: u64,
    pub skipped: u64,
}

/// Turns delimited `label value` lines into one aligned histogram table.
pub struct PlotTask {
    config: PlotConfig,
    collector: MultiSeriesCollector,
    renderer: TableRenderer,
    report: PlotReport,
}

impl PlotTask {
    pub fn new(config: PlotConfig) -> Result<Self> {
        config.validate()?;
        let collector = MultiSeriesCollector::new()
            .with_sizing(config.histogram.bucket_sizing()?)
            .with_outlier_policy(config.histogram.outliers);
        let renderer = config.histogram.renderer();
        Ok(Self {
            config,
            collector,
            renderer,
            report: PlotReport::default(),
        })
    }

    /// Reads every line of `input` into the collector.
    pub fn feed<R: BufRead>(&mut self, input: R) -> Result<()> {
        for line in input.lines() {
            let line = line?;
            self.report.lines += 1;
            match self.parse_line(&line) {
                Some((label, value)) => {
                    self.collector.insert(label, value);
                    self.report.inserted += 1;
                }
                None => self.report.skipped += 1,
            }
        }
        Ok(())
    }

    pub fn write_table<W: Write>(&mut self, out: &mut W) -> Result<()> {
        self.renderer.render(&mut self.collector, out)
    }

    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<PlotReport> {
        self.feed(input)?;
        if self.report.skipped > 0 {
            warn!(
                skipped = self.report.skipped,
                lines = self.report.lines,
                "some input lines were skipped"
            );
        }
        self.write_table(out)?;
        info!(
            series = self.collector.len(),
            inserted = self.report.inserted,
            "wrote histogram table"
        );
        Ok(self.report)
    }

    pub fn report(&self) -> PlotReport {
        self.report
    }

    pub fn collector(&self) -> &MultiSeriesCollector {
        &self.collector
    }

    fn parse_line<'l>(&self, line: &'l str) -> Option<(&'l str, f64)> {
        let n = self.report.lines;
        let mut label = None;
        let mut raw = None;
        for (i, field) in split_fields(line, &self.config.delimiters).enumerate() {
            let column = i + 1;
            if column == self.config.label_column {
                label = Some(field);
            } else if column == self.config.value_column {
                raw = Some(field);
            }
            if label.is_some() && raw.is_some() {
                break;
            }
        }

        let Some(label) = label else {
            debug!(line = n, "skipping line without a label");
            return None;
        };
        let Some(raw) = raw else {
            debug!(line = n, "skipping line without a value");
            return None;
        };
        let Some(value) = parse_value(raw) else {
            debug!(line = n, value = raw, "skipping line with invalid value");
            return None;
        };
        Some((label, value))
    }
}
