//! Publishing
//!
//! Serializes the weather table into the embedded data literal and rewrites
//! the marked region of the destination document. Serialization, region
//! location, and timestamp stamping are pure string functions; file I/O
//! only wraps them at the end, so a mismatch never leaves a partial write.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use shared::{Observation, WaypointEntry, WeatherTable};

use crate::config::DocumentConfig;
use crate::error::{AppError, AppResult};

/// Marker line opening the generated data block
pub const WEATHER_DATA_START: &str = "// WEATHER_DATA_START";

/// Marker line closing the generated data block
pub const WEATHER_DATA_END: &str = "// WEATHER_DATA_END";

/// Render a numeric field: minimal digits, no trailing zeros
fn number(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Render an optional temperature; unknown values become a null token
fn temperature(value: Option<Decimal>) -> String {
    match value {
        Some(v) => number(v),
        None => "null".to_string(),
    }
}

/// Quote a string field for the embedded literal
fn quoted(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| String::from("\"\""))
}

/// Serialize the table as the embedded weatherData literal.
///
/// The indentation matches the block the page was shipped with, so diffs
/// against an already-published page stay minimal.
pub fn render_table(table: &WeatherTable) -> String {
    let mut lines = vec!["        const weatherData = {".to_string()];

    for day in &table.days {
        lines.push(format!("            \"{}\": {{", day.key));
        let entries: Vec<String> = day.entries.iter().map(render_entry).collect();
        lines.push(entries.join(",\n"));
        lines.push("            },".to_string());
    }

    lines.push("        };".to_string());
    lines.join("\n")
}

fn render_entry(entry: &WaypointEntry) -> String {
    let fields = match &entry.observation {
        Observation::Daily(obs) => {
            let mut fields = vec![
                format!("high: {}", temperature(obs.high)),
                format!("low: {}", temperature(obs.low)),
                format!("precip: {}", number(obs.precip)),
                format!("snow: {}", number(obs.snow)),
            ];
            if let Some(risk) = &entry.risk {
                fields.push(format!("risk: {}", quoted(&risk.tier.to_string())));
                fields.push(format!("riskLabel: {}", quoted(&risk.label)));
            }
            fields
        }
        Observation::Hourly(obs) => {
            let temps: Vec<String> = obs.temps.iter().map(|t| temperature(*t)).collect();
            vec![
                format!("high: {}", temperature(obs.high)),
                format!("low: {}", temperature(obs.low)),
                format!("overnightLow: {}", temperature(obs.overnight_low)),
                format!("precip: {}", number(obs.precip)),
                format!("snow: {}", number(obs.snow)),
                format!("temps: [{}]", temps.join(", ")),
            ]
        }
    };
    format!("                {}: {{ {} }}", entry.waypoint, fields.join(", "))
}

/// Replace the text strictly between the marker lines.
///
/// The markers themselves are never touched; the region is rewritten as
/// `{payload}\n        {end marker}`, which keeps re-runs byte-identical.
pub fn splice_region(document: &str, payload: &str) -> AppResult<String> {
    let start = document.find(WEATHER_DATA_START).ok_or_else(|| {
        AppError::TemplateMismatch(format!("missing {} marker", WEATHER_DATA_START))
    })?;
    let after_marker = start + WEATHER_DATA_START.len();
    let region_begin = document[after_marker..]
        .find('\n')
        .map(|i| after_marker + i + 1)
        .ok_or_else(|| {
            AppError::TemplateMismatch("nothing follows the start marker".to_string())
        })?;
    let region_end = document[region_begin..]
        .find(WEATHER_DATA_END)
        .map(|i| region_begin + i)
        .ok_or_else(|| {
            AppError::TemplateMismatch(format!("missing {} marker", WEATHER_DATA_END))
        })?;

    Ok(format!(
        "{}{}\n        {}",
        &document[..region_begin],
        payload,
        &document[region_end..]
    ))
}

/// Rewrite the displayed timestamp: everything from the label through the
/// next pipe becomes `{label}: {time} |`.
pub fn stamp_timestamp(document: &str, label: &str, now: DateTime<Utc>) -> AppResult<String> {
    let at = document
        .find(label)
        .ok_or_else(|| AppError::TemplateMismatch(format!("missing timestamp label {:?}", label)))?;
    let after_label = at + label.len();
    let pipe = document[after_label..]
        .find('|')
        .map(|i| after_label + i)
        .ok_or_else(|| {
            AppError::TemplateMismatch("no pipe after the timestamp label".to_string())
        })?;

    Ok(format!(
        "{}{}: {} |{}",
        &document[..at],
        label,
        now.format("%Y-%m-%d %H:%M UTC"),
        &document[pipe + 1..]
    ))
}

/// Write the rendered table and a fresh timestamp into the document.
///
/// Both substitutions are resolved before anything is written; a mismatch
/// leaves the file untouched.
pub fn publish(document: &DocumentConfig, table: &WeatherTable, now: DateTime<Utc>) -> AppResult<()> {
    let original = std::fs::read_to_string(&document.path)?;
    let spliced = splice_region(&original, &render_table(table))?;
    let stamped = stamp_timestamp(&spliced, &document.timestamp_label, now)?;
    std::fs::write(&document.path, stamped)?;
    Ok(())
}
