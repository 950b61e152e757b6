use crate::error::Result;
use crate::histogram::Histogram;
use crate::mordor::{KeyOrder, MultiSeriesCollector};
use crate::render::number_format::{PLACEHOLDER, format_general};
use crate::render::row_positions::RowPositions;
use crate::render::series_track::{Cell, SeriesTrack};
use crate::render::TableStyle;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::warn;

const FIELD_SEPARATOR: &str = " ";

/// Writes a collector's aligned histograms as a space-separated table.
///
/// Header: `bucket_width (all) key1 .. keyN`. Each data row starts with the
/// bucket start, then the cumulative count, then one cell per key in the
/// header's order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableRenderer {
    style: TableStyle,
    order: KeyOrder,
}

impl TableRenderer {
    pub fn new(style: TableStyle, order: KeyOrder) -> Self {
        Self { style, order }
    }

    pub fn style(&self) -> TableStyle {
        self.style
    }

    pub fn order(&self) -> KeyOrder {
        self.order
    }

    /// Rebuilds the collector's histograms if needed, then writes the table.
    pub fn render<W: Write>(&self, collector: &mut MultiSeriesCollector, out: &mut W) -> Result<()> {
        collector.rebuild();
        let series = collector.sorted_series(self.order);

        let width = collector.bucket_width();
        write!(
            out,
            "{}{FIELD_SEPARATOR}(all)",
            format_general(width.map_or(0.0, |w| w.get()))
        )?;
        for s in &series {
            if s.key().chars().any(char::is_whitespace) {
                warn!(key = s.key(), "key contains whitespace, table columns will be ambiguous");
            }
            write!(out, "{FIELD_SEPARATOR}{}", s.key())?;
        }
        writeln!(out)?;

        let Some(cumulative) = collector.cumulative_histogram() else {
            warn!(series = series.len(), "no finite values collected, writing header only");
            return Ok(());
        };

        let histograms: Vec<Option<&Histogram>> = series.iter().map(|s| s.histogram()).collect();
        match self.style {
            TableStyle::Classic => write_classic(out, cumulative, &histograms),
            TableStyle::Clean => write_clean(out, cumulative, &histograms),
        }
    }

    pub fn render_to_string(&self, collector: &mut MultiSeriesCollector) -> Result<String> {
        let mut buf = Vec::new();
        self.render(collector, &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    pub fn export<P: AsRef<Path>>(&self, collector: &mut MultiSeriesCollector, path: P) -> Result<()> {
        let mut w = BufWriter::new(File::create(path)?);
        self.render(collector, &mut w)?;
        w.flush()?;
        Ok(())
    }
}

fn write_classic<W: Write>(
    out: &mut W,
    cumulative: &Histogram,
    histograms: &[Option<&Histogram>],
) -> Result<()> {
    for index in RowPositions::new(cumulative.occupied_indices(), false) {
        write_row_start(out, cumulative, index)?;
        for h in histograms {
            let count = h.map_or(0, |h| h.count_at_index(index));
            write!(out, "{FIELD_SEPARATOR}{count}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn write_clean<W: Write>(
    out: &mut W,
    cumulative: &Histogram,
    histograms: &[Option<&Histogram>],
) -> Result<()> {
    let mut tracks: Vec<SeriesTrack> = histograms.iter().map(|&h| SeriesTrack::new(h)).collect();
    for index in RowPositions::new(cumulative.occupied_indices(), true) {
        write_row_start(out, cumulative, index)?;
        for track in &mut tracks {
            match track.cell(index) {
                Cell::Count(c) => write!(out, "{FIELD_SEPARATOR}{c}")?,
                Cell::Placeholder => write!(out, "{FIELD_SEPARATOR}{PLACEHOLDER}")?,
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

fn write_row_start<W: Write>(out: &mut W, cumulative: &Histogram, index: i64) -> Result<()> {
    write!(
        out,
        "{}{FIELD_SEPARATOR}{}",
        format_general(cumulative.start_of(index)),
        cumulative.count_at_index(index)
    )?;
    Ok(())
}
