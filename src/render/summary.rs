use crate::error::Result;
use crate::mordor::{KeyOrder, MultiSeriesCollector};
use crate::render::number_format::format_general;
use std::io::Write;

/// One summary line per key, in lexicographic key order:
/// `key count mean stddev q1 median q3`. `count` is the number of values
/// the series received.
pub fn render_summary<W: Write>(collector: &mut MultiSeriesCollector, out: &mut W) -> Result<()> {
    let keys: Vec<String> = collector
        .sorted_keys(KeyOrder::Lexicographic)
        .into_iter()
        .map(str::to_string)
        .collect();

    for key in keys {
        let count = collector.series(&key).map_or(0, |s| s.stats().count());
        write_row(collector, &key, count, out)?;
    }
    Ok(())
}

/// Like [`render_summary`], but rows follow `groups` and `count` is the
/// group's record count. A group whose records carried no value for the
/// field still gets a row, with NaN statistics.
pub fn render_group_summary<'k, W, I>(
    collector: &mut MultiSeriesCollector,
    groups: I,
    out: &mut W,
) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = (&'k str, usize)>,
{
    for (key, records) in groups {
        write_row(collector, key, records, out)?;
    }
    Ok(())
}

fn write_row<W: Write>(
    collector: &mut MultiSeriesCollector,
    key: &str,
    count: usize,
    out: &mut W,
) -> Result<()> {
    let stats = match collector.series_mut(key) {
        Some(series) => {
            let stats = series.stats_mut();
            [
                stats.mean(),
                stats.stddev(),
                stats.q1(),
                stats.median(),
                stats.q3(),
            ]
        }
        None => [f64::NAN; 5],
    };
    let row = stats.map(format_general).join(" ");
    writeln!(out, "{key} {count} {row}")?;
    Ok(())
}
