use anyhow::{Context, Result};
use nom_exif::*;
use std::path::Path;

use super::metadata::{
    GPS_INFO_KEY, GpsBlock, GpsValue, MetadataMap, Rational, TAG_GPS_LATITUDE,
    TAG_GPS_LATITUDE_REF, TAG_GPS_LONGITUDE, TAG_GPS_LONGITUDE_REF, TagValue,
};

// IFD0 pointer to the GPS sub-IFD
const TAG_GPS_IFD_POINTER: u16 = 0x8825;

/// Read the EXIF tag set from an image file.
///
/// Returns `Ok(None)` when the image carries no EXIF block. Decode failures
/// on an otherwise-openable file are reported the same way, with a debug
/// diagnostic: the caller cannot tell "failed to decode" from "has no
/// metadata".
pub fn read_metadata(path: &Path) -> Result<Option<MetadataMap>> {
    let mut parser = MediaParser::new();
    let ms = MediaSource::file_path(path).context("Failed to open image file")?;

    let iter: ExifIter = match parser.parse(ms) {
        Ok(iter) => iter,
        Err(e) => {
            log::debug!("No EXIF data found in {}: {e}", path.display());
            return Ok(None);
        }
    };

    // Parse GPS info before walking the entries (walking consumes the iterator)
    let gps_info = match iter.parse_gps_info() {
        Ok(info) => info,
        Err(e) => {
            log::warn!("Failed to parse GPS sub-IFD in {}: {e}", path.display());
            None
        }
    };

    let mut map = MetadataMap::new();
    let mut gps_slot = None;

    for mut entry in iter {
        let code = entry.tag_code();
        let name = match entry.tag() {
            Some(tag) => tag.to_string(),
            None => format!("0x{code:04x}"),
        };

        // The GPS sub-IFD is folded into a single nested entry at the
        // position of its pointer tag.
        if code == TAG_GPS_IFD_POINTER || name == GPS_INFO_KEY {
            gps_slot = Some(map.len());
            continue;
        }
        if name.starts_with("GPS") {
            continue;
        }

        let value = match entry.take_value() {
            Some(v) => v,
            None => continue,
        };
        map.insert(name, text_to_tag_value(&value.to_string()));
    }

    if let Some(gps) = gps_info {
        let block = gps_block_from_info(&gps);
        match gps_slot {
            Some(index) => map.insert_at(index, GPS_INFO_KEY, TagValue::Gps(block)),
            None => map.insert(GPS_INFO_KEY, TagValue::Gps(block)),
        }
    }

    if map.is_empty() {
        log::debug!("EXIF block in {} holds no entries", path.display());
        return Ok(None);
    }

    Ok(Some(map))
}

/// Classify a decoder-rendered value into a TagValue.
fn text_to_tag_value(text: &str) -> TagValue {
    let text = text.trim().trim_matches('"');
    match text.parse::<i64>() {
        Ok(n) => TagValue::Number(n),
        Err(_) => TagValue::Text(text.to_string()),
    }
}

/// Build the nested GPS block from nom-exif's parsed GPS info.
fn gps_block_from_info(gps: &GPSInfo) -> GpsBlock {
    let mut block = GpsBlock::new();
    block.insert(TAG_GPS_LATITUDE_REF, GpsValue::Reference(gps.latitude_ref));
    block.insert(TAG_GPS_LATITUDE, GpsValue::Dms(latlng_to_dms(&gps.latitude)));
    block.insert(TAG_GPS_LONGITUDE_REF, GpsValue::Reference(gps.longitude_ref));
    block.insert(TAG_GPS_LONGITUDE, GpsValue::Dms(latlng_to_dms(&gps.longitude)));
    block
}

/// Convert a nom-exif LatLng (3 URationals: deg, min, sec) to a DMS triple.
fn latlng_to_dms(latlng: &LatLng) -> Vec<Rational> {
    vec![
        Rational::new(latlng.0.0, latlng.0.1),
        Rational::new(latlng.1.0, latlng.1.1),
        Rational::new(latlng.2.0, latlng.2.1),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn unreadable_path_is_an_error() {
        let result = read_metadata(Path::new("/nonexistent/photo.jpg"));
        assert!(result.is_err());
    }

    #[test]
    fn jpeg_without_exif_yields_no_metadata() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plain.jpg");
        // Smallest well-formed JPEG: SOI + EOI, no APP1 segment
        fs::write(&path, [0xFF, 0xD8, 0xFF, 0xD9]).unwrap();

        assert!(read_metadata(&path).ok().flatten().is_none());
    }

    #[test]
    fn text_is_trimmed_and_unquoted() {
        assert_eq!(
            text_to_tag_value(" \"Canon\" "),
            TagValue::Text("Canon".into())
        );
    }

    #[test]
    fn integer_renderings_become_numbers() {
        assert_eq!(text_to_tag_value("4096"), TagValue::Number(4096));
        assert_eq!(
            text_to_tag_value("175/100 (1.7500)"),
            TagValue::Text("175/100 (1.7500)".into())
        );
    }
}
