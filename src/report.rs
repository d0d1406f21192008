//! CSV report writing.
//!
//! Serializes the extracted tag mapping plus the optional coordinate and
//! address results into a two-column `Tag,Value` CSV next to the source
//! image.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::exif::MetadataMap;
use crate::geocode::AddressResult;
use crate::gps::Coordinate;

/// Suffix appended to the input stem when deriving the output file name.
pub const REPORT_SUFFIX: &str = "Metadata";

/// One CSV line: a tag (or synthesized label) and its textual value.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub tag: String,
    pub value: String,
}

impl ReportRow {
    fn new(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            value: value.into(),
        }
    }
}

/// Derive the report path from the input path: strip the extension, append
/// the fixed suffix, same directory as the source image.
pub fn report_path(image_path: &Path) -> PathBuf {
    let stem = image_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    image_path.with_file_name(format!("{stem}{REPORT_SUFFIX}.csv"))
}

/// Synthesize the report rows, header excluded: one row per metadata entry
/// in iteration order, then latitude/longitude rows only when a coordinate
/// pair is present, then an address row only when a lookup result is present.
pub fn report_rows(
    metadata: &MetadataMap,
    coordinate: Option<&Coordinate>,
    address: Option<&AddressResult>,
) -> Vec<ReportRow> {
    let mut rows: Vec<ReportRow> = metadata
        .iter()
        .map(|(tag, value)| ReportRow::new(tag.clone(), value.to_string()))
        .collect();

    if let Some(coord) = coordinate {
        rows.push(ReportRow::new("GPS Latitude", coord.latitude.to_string()));
        rows.push(ReportRow::new("GPS Longitude", coord.longitude.to_string()));
    }
    if let Some(addr) = address {
        rows.push(ReportRow::new("Address", addr.display_text()));
    }

    rows
}

/// Write the CSV report to `output`.
///
/// A failed write may leave a truncated or missing file; the error carries
/// the path for the caller's diagnostic.
pub fn write_report(
    metadata: &MetadataMap,
    coordinate: Option<&Coordinate>,
    address: Option<&AddressResult>,
    output: &Path,
) -> Result<()> {
    let mut writer = csv::Writer::from_path(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;

    writer
        .write_record(["Tag", "Value"])
        .context("Failed to write CSV header")?;

    for row in report_rows(metadata, coordinate, address) {
        writer
            .write_record([row.tag.as_str(), row.value.as_str()])
            .with_context(|| format!("Failed to write CSV row for {}", row.tag))?;
    }

    writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}
