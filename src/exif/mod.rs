//! EXIF metadata extraction.
//!
//! [`read_metadata`] opens an image and returns its EXIF tag set as an
//! ordered [`MetadataMap`], with the GPS sub-IFD folded into a nested
//! `"GPSInfo"` entry. The binary tag decoding itself is delegated to
//! `nom-exif`.

mod metadata;
mod reader;

pub use metadata::{
    GPS_INFO_KEY, GpsBlock, GpsValue, MetadataMap, Rational, TAG_GPS_LATITUDE,
    TAG_GPS_LATITUDE_REF, TAG_GPS_LONGITUDE, TAG_GPS_LONGITUDE_REF, TagValue,
};
pub use reader::read_metadata;
