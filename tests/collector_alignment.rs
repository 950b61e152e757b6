use mordor::mordor::{KeyOrder, MultiSeriesCollector};
use mordor::render::{PLACEHOLDER, TableRenderer, TableStyle};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

const KEYS: usize = 12;
const PER_KEY: usize = 40;

fn seeded_collector(seed: u64) -> (MultiSeriesCollector, HashMap<String, u64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut c = MultiSeriesCollector::new();
    let mut counts = HashMap::new();
    for k in 0..KEYS {
        let key = format!("task-{k:02}");
        let base = k as f64 * 25.0;
        for _ in 0..PER_KEY {
            c.insert(&key, base + rng.random_range(0.0..40.0));
        }
        counts.insert(key, PER_KEY as u64);
    }
    (c, counts)
}

struct Table {
    keys: Vec<String>,
    rows: Vec<(f64, u64, Vec<Option<u64>>)>,
}

fn parse(table: &str) -> Table {
    let mut lines = table.lines();
    let header: Vec<&str> = lines.next().unwrap().split(' ').collect();
    assert_eq!(header[1], "(all)");
    let keys: Vec<String> = header[2..].iter().map(|s| s.to_string()).collect();
    let rows = lines
        .map(|l| {
            let f: Vec<&str> = l.split(' ').collect();
            assert_eq!(f.len(), keys.len() + 2, "row {l:?}");
            let cells = f[2..]
                .iter()
                .map(|c| (*c != PLACEHOLDER).then(|| c.parse().unwrap()))
                .collect();
            (f[0].parse().unwrap(), f[1].parse().unwrap(), cells)
        })
        .collect();
    Table { keys, rows }
}

fn check_sums(t: &Table, counts: &HashMap<String, u64>) {
    for w in t.rows.windows(2) {
        assert!(w[0].0 < w[1].0, "bucket starts must increase");
    }
    for (_, all, cells) in &t.rows {
        let sum: u64 = cells.iter().flatten().sum();
        assert_eq!(*all, sum);
    }
    for (i, key) in t.keys.iter().enumerate() {
        let total: u64 = t.rows.iter().filter_map(|r| r.2[i]).sum();
        assert_eq!(total, counts[key], "column {key}");
    }
}

#[test]
fn classic_rows_account_for_every_value() {
    let (mut c, counts) = seeded_collector(11);
    let r = TableRenderer::new(TableStyle::Classic, KeyOrder::Insertion);
    let t = parse(&r.render_to_string(&mut c).unwrap());
    assert_eq!(t.keys.len(), KEYS);
    assert!(t.rows.iter().all(|r| r.2.iter().all(Option::is_some)));
    check_sums(&t, &counts);
}

#[test]
fn clean_placeholders_only_outside_each_series() {
    let (mut c, counts) = seeded_collector(23);
    let r = TableRenderer::new(TableStyle::Clean, KeyOrder::ByMean);
    let t = parse(&r.render_to_string(&mut c).unwrap());
    check_sums(&t, &counts);

    // every column reads placeholders, then numbers, then placeholders
    for i in 0..t.keys.len() {
        let mut phase = 0;
        for row in &t.rows {
            match (phase, row.2[i].is_some()) {
                (0, true) => phase = 1,
                (1, false) => phase = 2,
                (2, true) => panic!("column {} resumes after finishing", t.keys[i]),
                _ => {}
            }
        }
        assert!(phase >= 1, "column {} never started", t.keys[i]);
    }

    // clean tables fill gaps, so starts are evenly spaced
    let width = c.bucket_width().unwrap().get();
    for w in t.rows.windows(2) {
        let step = w[1].0 - w[0].0;
        assert!((step - width).abs() <= width * 1e-3, "step {step} vs {width}");
    }
}

#[test]
fn every_histogram_shares_the_cumulative_width() {
    let (mut c, _) = seeded_collector(5);
    c.rebuild();
    let width = c.bucket_width().unwrap();
    let cumulative = c.cumulative_histogram().unwrap().occupied_buckets();
    for s in c.iter() {
        let h = s.histogram().unwrap();
        assert_eq!(h.bucket_width(), width);
        for start in h.occupied_buckets() {
            assert!(cumulative.contains(&start));
        }
    }
}

#[test]
fn by_mean_header_is_ascending() {
    let (mut c, _) = seeded_collector(99);
    let r = TableRenderer::new(TableStyle::Clean, KeyOrder::ByMean);
    let t = parse(&r.render_to_string(&mut c).unwrap());
    let means: Vec<f64> = t
        .keys
        .iter()
        .map(|k| c.series(k).unwrap().stats().mean())
        .collect();
    assert!(means.windows(2).all(|w| w[0] <= w[1]));
}
