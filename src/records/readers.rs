use crate::error::Result;
use crate::records::Record;
use serde_json::{Deserializer, Map, Value};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Records loaded from a list file, plus the files that could not be used.
#[derive(Debug, Default)]
pub struct LoadedRecords {
    pub records: Vec<Record>,
    pub skipped: Vec<PathBuf>,
}

/// Parses a stream of concatenated JSON objects. Any syntax error, or a
/// top-level value that is not an object, fails the whole stream.
pub fn read_json_stream<R: Read>(reader: R) -> Result<Vec<Record>> {
    let mut out = Vec::new();
    for object in Deserializer::from_reader(reader).into_iter::<Map<String, Value>>() {
        out.push(Record::new(object?));
    }
    Ok(out)
}

/// Reads one summary path per line and loads every object from each file.
///
/// Blank lines are ignored. Files that cannot be opened or parsed are
/// skipped and reported in [`LoadedRecords::skipped`].
pub fn read_list_file<P: AsRef<Path>>(path: P) -> Result<LoadedRecords> {
    let list = BufReader::new(File::open(path.as_ref())?);
    let mut loaded = LoadedRecords::default();

    for line in list.lines() {
        let line = line?;
        let entry = line.trim();
        if entry.is_empty() {
            continue;
        }
        let file = PathBuf::from(entry);
        match read_summary_file(&file) {
            Ok(records) => {
                debug!(file = %file.display(), records = records.len(), "loaded summary file");
                loaded.records.extend(records);
            }
            Err(e) => {
                warn!(file = %file.display(), error = %e, "skipping unreadable summary file");
                loaded.skipped.push(file);
            }
        }
    }

    info!(
        records = loaded.records.len(),
        skipped = loaded.skipped.len(),
        "finished reading list file"
    );
    Ok(loaded)
}

fn read_summary_file(path: &Path) -> Result<Vec<Record>> {
    let reader = BufReader::new(File::open(path)?);
    Ok(read_json_stream(reader)?
        .into_iter()
        .map(|r| r.with_source(path))
        .collect())
}
