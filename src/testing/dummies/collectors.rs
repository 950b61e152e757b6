use crate::mordor::MultiSeriesCollector;

/// Collector fed with `values` for each key, in the given order.
pub fn collector_from(series: &[(&str, &[f64])]) -> MultiSeriesCollector {
    let mut c = MultiSeriesCollector::new();
    for (key, values) in series {
        for &v in values.iter() {
            c.insert(key, v);
        }
    }
    c
}
