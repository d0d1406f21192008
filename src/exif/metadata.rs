use std::collections::BTreeMap;
use std::fmt;

// GPS sub-IFD tag codes
pub const TAG_GPS_LATITUDE_REF: u16 = 0x0001;
pub const TAG_GPS_LATITUDE: u16 = 0x0002;
pub const TAG_GPS_LONGITUDE_REF: u16 = 0x0003;
pub const TAG_GPS_LONGITUDE: u16 = 0x0004;

/// The map key under which the nested GPS sub-block is stored.
pub const GPS_INFO_KEY: &str = "GPSInfo";

/// An unsigned rational as EXIF stores DMS components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rational {
    pub num: u32,
    pub den: u32,
}

impl Rational {
    pub fn new(num: u32, den: u32) -> Self {
        Self { num, den }
    }

    pub fn to_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

/// A single value inside the GPS sub-block: either a hemisphere reference
/// character or a degrees/minutes/seconds triple.
#[derive(Debug, Clone, PartialEq)]
pub enum GpsValue {
    Reference(char),
    Dms(Vec<Rational>),
}

impl fmt::Display for GpsValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpsValue::Reference(c) => write!(f, "{c}"),
            GpsValue::Dms(parts) => {
                write!(f, "[")?;
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{part}")?;
                }
                write!(f, "]")
            }
        }
    }
}

/// The nested GPS sub-block, keyed by the small GPS tag codes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GpsBlock {
    entries: BTreeMap<u16, GpsValue>,
}

impl GpsBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, code: u16, value: GpsValue) {
        self.entries.insert(code, value);
    }

    pub fn get(&self, code: u16) -> Option<&GpsValue> {
        self.entries.get(&code)
    }

    /// The DMS triple stored under `code`, if any.
    pub fn dms(&self, code: u16) -> Option<&[Rational]> {
        match self.entries.get(&code) {
            Some(GpsValue::Dms(parts)) => Some(parts),
            _ => None,
        }
    }

    /// The hemisphere reference stored under `code`, if any.
    pub fn reference(&self, code: u16) -> Option<char> {
        match self.entries.get(&code) {
            Some(GpsValue::Reference(c)) => Some(*c),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for GpsBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (code, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{code}: {value}")?;
        }
        write!(f, "}}")
    }
}

/// A decoded EXIF tag value.
///
/// Values vary in shape; the variants give the report writer a total mapping
/// from each shape to its textual form. Rationals and byte payloads arrive
/// pre-rendered by the decoder and land in `Text`.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    Number(i64),
    Text(String),
    Gps(GpsBlock),
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Number(n) => write!(f, "{n}"),
            TagValue::Text(s) => f.write_str(s),
            TagValue::Gps(block) => write!(f, "{block}"),
        }
    }
}

/// An ordered tag-name → value mapping.
///
/// Keys are unique; insertion order follows the order reported by the decoder
/// and is preserved through to the CSV output. Re-inserting an existing key
/// replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataMap {
    entries: Vec<(String, TagValue)>,
}

impl MetadataMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: TagValue) {
        let name = name.into();
        if let Some(slot) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    /// Insert at a specific position, used to keep the GPS block where the
    /// decoder reported its IFD pointer.
    pub fn insert_at(&mut self, index: usize, name: impl Into<String>, value: TagValue) {
        let name = name.into();
        if let Some(slot) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            let index = index.min(self.entries.len());
            self.entries.insert(index, (name, value));
        }
    }

    pub fn get(&self, name: &str) -> Option<&TagValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (String, TagValue)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a MetadataMap {
    type Item = &'a (String, TagValue);
    type IntoIter = std::slice::Iter<'a, (String, TagValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
