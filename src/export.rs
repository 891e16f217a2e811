use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::telemetry::history::HistoryEntry;

/// Builds the CSV document for the given entries: a header row taken from the
/// first entry's field names in declaration order, then one row per entry with
/// values stringified in that same order. Values are numeric or fixed-format
/// timestamps, so nothing is escaped. Returns `None` for an empty buffer.
pub fn csv_document<'a, I>(entries: I) -> Option<String>
where
    I: IntoIterator<Item = &'a HistoryEntry>,
{
    let mut iter = entries.into_iter();
    let first = iter.next()?;

    let mut doc = first.field_names().join(",");
    push_row(&mut doc, first);
    for entry in iter {
        push_row(&mut doc, entry);
    }
    Some(doc)
}

fn push_row(doc: &mut String, entry: &HistoryEntry) {
    doc.push('\n');
    doc.push_str(&entry.field_values().join(","));
}

/// Writes the buffer to `sensor_data_<unixMillis>.csv` under `dir`.
/// An empty buffer declines silently with `Ok(None)`.
pub fn write_csv<'a, I>(entries: I, dir: &Path) -> io::Result<Option<PathBuf>>
where
    I: IntoIterator<Item = &'a HistoryEntry>,
{
    let Some(doc) = csv_document(entries) else {
        return Ok(None);
    };
    let path = dir.join(format!("sensor_data_{}.csv", Utc::now().timestamp_millis()));
    fs::write(&path, doc)?;
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::history::{Capacity, FieldSet, History};
    use crate::telemetry::sample::{Axes, Sample};

    fn filled_history(fields: FieldSet) -> History {
        let mut history = History::new(Capacity::Bounded(20), fields);
        let sample = Sample {
            tds: 12.5,
            rpm: 100.0,
            accel: Axes { x: 1.0, y: 2.0, z: 3.0 },
            gyro: Axes { x: 0.1, y: 0.2, z: 0.3 },
        };
        history.append_at(&sample, "12:00:00".into());
        history.append_at(&sample, "12:00:02".into());
        history
    }

    #[test]
    fn empty_buffer_yields_no_document() {
        let history = History::new(Capacity::Bounded(20), FieldSet::Extended);
        assert_eq!(csv_document(history.entries()), None);
    }

    #[test]
    fn empty_buffer_writes_no_file() {
        let history = History::new(Capacity::Bounded(20), FieldSet::Extended);
        let out = write_csv(history.entries(), Path::new(".")).unwrap();
        assert_eq!(out, None);
    }

    #[test]
    fn rows_follow_header_order() {
        let history = filled_history(FieldSet::Extended);
        let doc = csv_document(history.entries()).unwrap();
        let lines: Vec<&str> = doc.split('\n').collect();

        assert_eq!(lines.len(), 1 + history.len());
        assert_eq!(
            lines[0],
            "time,rpm,tds,accelX,accelY,accelZ,gyroX,gyroY,gyroZ,voltage"
        );
        assert_eq!(lines[1], "12:00:00,100,12.5,1,2,3,0.1,0.2,0.3,6");
        assert_eq!(lines[2], "12:00:02,100,12.5,1,2,3,0.1,0.2,0.3,6");
        assert!(!doc.ends_with('\n'));
    }

    #[test]
    fn base_field_set_has_no_voltage_column() {
        let history = filled_history(FieldSet::Base);
        let doc = csv_document(history.entries()).unwrap();
        let header = doc.split('\n').next().unwrap();
        assert_eq!(header, "time,rpm,tds,accelX,accelY,accelZ,gyroX,gyroY,gyroZ");
        assert!(!doc.contains("voltage"));
    }
}
