use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::DiagramElement;

pub const FORMAT_VERSION: &str = "1.0";

/// Persisted diagram file. Field names match the JSON the original web
/// front-end wrote (`fileName`, `timestamp`, `version`).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiagramFile {
    #[serde(default = "default_file_name")]
    pub file_name: String,
    pub elements: Vec<DiagramElement>,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_file_name() -> String {
    "Untitled Diagram".to_string()
}

fn default_version() -> String {
    FORMAT_VERSION.to_string()
}

impl DiagramFile {
    pub fn snapshot(file_name: &str, elements: &[DiagramElement]) -> Self {
        Self {
            file_name: file_name.to_string(),
            elements: elements.to_vec(),
            timestamp: iso8601_utc_now(),
            version: FORMAT_VERSION.to_string(),
        }
    }
}

/// Parses an import payload. Any JSON object carrying an `elements` array
/// is accepted; everything else is optional. A payload without that array
/// is rejected up front so the caller never partially applies it.
pub fn parse_diagram(json: &str) -> Result<DiagramFile> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if !value.get("elements").is_some_and(|e| e.is_array()) {
        return Err(Error::MissingElements);
    }
    Ok(serde_json::from_value(value)?)
}

pub fn to_json(file: &DiagramFile) -> Result<String> {
    Ok(serde_json::to_string_pretty(file)?)
}

pub fn read_diagram(path: &Path) -> Result<DiagramFile> {
    let json = std::fs::read_to_string(path)?;
    let file = parse_diagram(&json)?;
    log::info!(
        "loaded {} element(s) from {}",
        file.elements.len(),
        path.display()
    );
    Ok(file)
}

pub fn write_diagram(path: &Path, file: &DiagramFile) -> Result<()> {
    std::fs::write(path, to_json(file)?)?;
    log::info!(
        "saved {} element(s) to {}",
        file.elements.len(),
        path.display()
    );
    Ok(())
}

/// Current time as an ISO-8601 UTC string, e.g. `2024-06-01T09:30:00Z`.
pub fn iso8601_utc_now() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format_iso8601(secs)
}

pub fn format_iso8601(secs_since_epoch: u64) -> String {
    let days = (secs_since_epoch / 86_400) as i64;
    let day_secs = secs_since_epoch % 86_400;
    let (year, month, day) = civil_from_days(days);
    format!(
        "{year:04}-{month:02}-{day:02}T{:02}:{:02}:{:02}Z",
        day_secs / 3600,
        (day_secs % 3600) / 60,
        day_secs % 60,
    )
}

// Days-since-epoch to (year, month, day), proleptic Gregorian.
fn civil_from_days(z: i64) -> (i64, u32, u32) {
    let z = z + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let m = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    (if m <= 2 { y + 1 } else { y }, m, d)
}
