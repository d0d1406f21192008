//! GPS coordinate resolution.
//!
//! Converts the DMS values in a metadata map's `"GPSInfo"` block into signed
//! decimal degrees. Latitude and longitude are always produced together or
//! not at all.

use anyhow::{Context, Result, bail};

use crate::exif::{
    GPS_INFO_KEY, MetadataMap, Rational, TAG_GPS_LATITUDE, TAG_GPS_LATITUDE_REF,
    TAG_GPS_LONGITUDE, TAG_GPS_LONGITUDE_REF, TagValue,
};

/// A decimal-degree coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Convert a degrees/minutes/seconds triple plus hemisphere reference into
/// decimal degrees. Southern and western references negate the result.
///
/// No range validation is performed; a triple of the wrong arity or with a
/// zero denominator is an error, never a partial value.
pub fn dms_to_decimal(dms: &[Rational], reference: char) -> Result<f64> {
    let &[degrees, minutes, seconds] = dms else {
        bail!("expected 3 DMS components, got {}", dms.len());
    };

    for part in [degrees, minutes, seconds] {
        if part.den == 0 {
            bail!("zero denominator in DMS component {part}");
        }
    }

    let mut decimal = degrees.to_f64() + minutes.to_f64() / 60.0 + seconds.to_f64() / 3600.0;
    if reference == 'S' || reference == 'W' {
        decimal = -decimal;
    }

    Ok(decimal)
}

/// Extract the coordinate pair from a metadata map.
///
/// A map without a `"GPSInfo"` entry is not an error: the image simply
/// carries no location data, and `Ok(None)` is returned. A GPS block with
/// missing or malformed sub-fields is an error; the caller downgrades it to
/// absence after logging.
pub fn extract_coordinates(metadata: &MetadataMap) -> Result<Option<Coordinate>> {
    let Some(value) = metadata.get(GPS_INFO_KEY) else {
        return Ok(None);
    };
    let TagValue::Gps(block) = value else {
        bail!("GPSInfo entry is not a GPS block");
    };

    let lat_dms = block.dms(TAG_GPS_LATITUDE).context("missing GPS latitude")?;
    let lat_ref = block
        .reference(TAG_GPS_LATITUDE_REF)
        .context("missing GPS latitude reference")?;
    let lon_dms = block
        .dms(TAG_GPS_LONGITUDE)
        .context("missing GPS longitude")?;
    let lon_ref = block
        .reference(TAG_GPS_LONGITUDE_REF)
        .context("missing GPS longitude reference")?;

    let latitude = dms_to_decimal(lat_dms, lat_ref)?;
    let longitude = dms_to_decimal(lon_dms, lon_ref)?;

    Ok(Some(Coordinate {
        latitude,
        longitude,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exif::{GpsBlock, GpsValue};

    fn dms(d: u32, m: u32, s: u32) -> Vec<Rational> {
        vec![
            Rational::new(d, 1),
            Rational::new(m, 1),
            Rational::new(s, 1),
        ]
    }

    fn gps_block(
        lat: Vec<Rational>,
        lat_ref: char,
        lon: Vec<Rational>,
        lon_ref: char,
    ) -> GpsBlock {
        let mut block = GpsBlock::new();
        block.insert(TAG_GPS_LATITUDE_REF, GpsValue::Reference(lat_ref));
        block.insert(TAG_GPS_LATITUDE, GpsValue::Dms(lat));
        block.insert(TAG_GPS_LONGITUDE_REF, GpsValue::Reference(lon_ref));
        block.insert(TAG_GPS_LONGITUDE, GpsValue::Dms(lon));
        block
    }

    // ── dms_to_decimal ───────────────────────────────────────────────

    #[test]
    fn dms_known_value() {
        let decimal = dms_to_decimal(&dms(40, 26, 46), 'N').unwrap();
        assert!((decimal - 40.44611).abs() < 1e-5);
    }

    #[test]
    fn dms_north_east_non_negative() {
        for reference in ['N', 'E'] {
            assert!(dms_to_decimal(&dms(12, 30, 15), reference).unwrap() >= 0.0);
            assert!(dms_to_decimal(&dms(0, 0, 0), reference).unwrap() >= 0.0);
        }
    }

    #[test]
    fn dms_south_west_non_positive() {
        for reference in ['S', 'W'] {
            assert!(dms_to_decimal(&dms(12, 30, 15), reference).unwrap() <= 0.0);
            assert!(dms_to_decimal(&dms(0, 0, 0), reference).unwrap() <= 0.0);
        }
    }

    #[test]
    fn dms_fractional_seconds() {
        // 43° 17' 24.46" — seconds stored as 2446/100
        let triple = vec![
            Rational::new(43, 1),
            Rational::new(17, 1),
            Rational::new(2446, 100),
        ];
        let decimal = dms_to_decimal(&triple, 'N').unwrap();
        assert!((decimal - 43.29013).abs() < 1e-5);
    }

    #[test]
    fn dms_wrong_arity_is_an_error() {
        assert!(dms_to_decimal(&[Rational::new(40, 1)], 'N').is_err());
        assert!(dms_to_decimal(&[], 'N').is_err());
        let four = vec![
            Rational::new(1, 1),
            Rational::new(2, 1),
            Rational::new(3, 1),
            Rational::new(4, 1),
        ];
        assert!(dms_to_decimal(&four, 'N').is_err());
    }

    #[test]
    fn dms_zero_denominator_is_an_error() {
        let triple = vec![
            Rational::new(40, 1),
            Rational::new(26, 0),
            Rational::new(46, 1),
        ];
        assert!(dms_to_decimal(&triple, 'N').is_err());
    }

    // ── extract_coordinates ──────────────────────────────────────────

    #[test]
    fn no_gps_block_is_not_an_error() {
        let mut map = MetadataMap::new();
        map.insert("Make", TagValue::Text("Canon".into()));

        let result = extract_coordinates(&map).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn full_block_yields_signed_pair() {
        let mut map = MetadataMap::new();
        map.insert(
            GPS_INFO_KEY,
            TagValue::Gps(gps_block(dms(40, 26, 46), 'N', dms(79, 58, 56), 'W')),
        );

        let coord = extract_coordinates(&map).unwrap().unwrap();
        assert!((coord.latitude - 40.44611).abs() < 1e-5);
        assert!((coord.longitude + 79.98222).abs() < 1e-5);
    }

    #[test]
    fn missing_subfield_withholds_both() {
        // Longitude ref missing — neither coordinate may be produced
        let mut block = GpsBlock::new();
        block.insert(TAG_GPS_LATITUDE_REF, GpsValue::Reference('N'));
        block.insert(TAG_GPS_LATITUDE, GpsValue::Dms(dms(40, 26, 46)));
        block.insert(TAG_GPS_LONGITUDE, GpsValue::Dms(dms(79, 58, 56)));

        let mut map = MetadataMap::new();
        map.insert(GPS_INFO_KEY, TagValue::Gps(block));

        assert!(extract_coordinates(&map).is_err());
    }

    #[test]
    fn malformed_longitude_withholds_both() {
        // Latitude is fine; the short longitude triple must fail the pair
        let mut map = MetadataMap::new();
        map.insert(
            GPS_INFO_KEY,
            TagValue::Gps(gps_block(
                dms(40, 26, 46),
                'N',
                vec![Rational::new(79, 1)],
                'W',
            )),
        );

        assert!(extract_coordinates(&map).is_err());
    }

    #[test]
    fn non_block_gpsinfo_is_an_error() {
        let mut map = MetadataMap::new();
        map.insert(GPS_INFO_KEY, TagValue::Number(1234));

        assert!(extract_coordinates(&map).is_err());
    }
}
