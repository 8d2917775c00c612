use crate::error::EpochError;
use crate::log::row::{EPOCH_MARKER, EpochRecord};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Parse an epoch log file into its records, in file order.
///
/// Lines without the `[Epoch] ` marker are skipped. A marked line that does not
/// carry five numeric fields fails the whole parse.
pub fn parse_epoch_file(path: &Path) -> Result<Vec<EpochRecord>, EpochError> {
    let file = File::open(path).map_err(|source| EpochError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_epoch_reader(BufReader::new(file), path)
}

/// Same as [`parse_epoch_file`] over any buffered reader. `origin` names the
/// source in I/O errors.
pub fn parse_epoch_reader<R: BufRead>(
    reader: R,
    origin: &Path,
) -> Result<Vec<EpochRecord>, EpochError> {
    let mut out = Vec::new();
    let mut skipped = 0usize;

    for (lineno, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| EpochError::Io {
            path: origin.to_path_buf(),
            source,
        })?;

        match line.strip_prefix(EPOCH_MARKER) {
            Some(payload) => out.push(parse_payload(payload, lineno + 1)?),
            None => skipped += 1,
        }
    }

    tracing::debug!(
        "{}: {} epoch records, {} other lines",
        origin.display(),
        out.len(),
        skipped
    );

    if out.is_empty() {
        return Err(EpochError::EmptyLog);
    }
    Ok(out)
}

/// Parse "0,5,6,0,1" into an EpochRecord.
fn parse_payload(payload: &str, line: usize) -> Result<EpochRecord, EpochError> {
    let payload = payload.trim_end_matches(['\r', '\n']);
    let fields: Vec<&str> = payload.split(',').collect();
    if fields.len() != 5 {
        return Err(EpochError::MalformedLine {
            line,
            reason: format!("expected 5 fields, found {}: {:?}", fields.len(), payload),
        });
    }

    let mut values = [0.0f64; 5];
    for (slot, (field, name)) in values.iter_mut().zip(fields.iter().zip(FIELD_NAMES)) {
        let field = field.trim();
        *slot = field.parse().map_err(|_| EpochError::MalformedLine {
            line,
            reason: format!("{} is not a number: {:?}", name, field),
        })?;
    }

    let [thread_id, last_done, cur_done, segment_time, timestamp] = values;
    Ok(EpochRecord {
        thread_id,
        last_done,
        cur_done,
        segment_time,
        timestamp,
    })
}

const FIELD_NAMES: [&str; 5] = ["thread", "last_done", "cur_done", "seg_time", "time"];
