use std::path::{Path, PathBuf};

use crate::exif::{self, MetadataMap};
use crate::geocode::{AddressResolver, AddressResult};
use crate::gps::{self, Coordinate};
use crate::report;

/// The result of running one image through the pipeline.
///
/// Every stage failure is caught inside [`process_image`], logged, and
/// downgraded to an absent field here; callers only ever check presence.
#[derive(Debug)]
pub struct ProcessResult {
    pub path: PathBuf,
    /// The extracted tag set; `None` when the image had no usable EXIF block.
    pub metadata: Option<MetadataMap>,
    /// Decimal coordinates; always both-or-neither.
    pub coordinate: Option<Coordinate>,
    /// Geocoding outcome; `None` when the lookup itself failed or never ran.
    pub address: Option<AddressResult>,
    /// Where the CSV landed, when the write succeeded.
    pub report_path: Option<PathBuf>,
}

impl ProcessResult {
    fn empty(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            metadata: None,
            coordinate: None,
            address: None,
            report_path: None,
        }
    }
}

/// Check if a path has a JPEG extension.
pub fn is_jpeg(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_lowercase();
            ext == "jpg" || ext == "jpeg"
        })
        .unwrap_or(false)
}

/// Run a single JPEG through the full pipeline:
///
/// 1. **Extract** — read the EXIF tag set
/// 2. **Resolve GPS** — convert the DMS block to decimal coordinates
/// 3. **Resolve address** — reverse-geocode the coordinates
/// 4. **Write** — serialize everything to `<input-stem>Metadata.csv`
///
/// When extraction yields nothing, the pipeline stops: no network call is
/// made and no CSV is written.
pub async fn process_image(path: &Path, resolver: &dyn AddressResolver) -> ProcessResult {
    let mut result = ProcessResult::empty(path);

    let metadata = match exif::read_metadata(path) {
        Ok(Some(map)) => map,
        Ok(None) => {
            log::debug!("No metadata found in {}", path.display());
            return result;
        }
        Err(e) => {
            log::error!("Cannot perform EXIF extraction from {}: {e}", path.display());
            return result;
        }
    };

    result.coordinate = match gps::extract_coordinates(&metadata) {
        Ok(coordinate) => coordinate,
        Err(e) => {
            log::error!("Error calculating GPS data: {e}");
            None
        }
    };

    if let Some(ref coordinate) = result.coordinate {
        match resolver.resolve(coordinate).await {
            Ok(address) => result.address = Some(address),
            Err(e) => log::error!("Error retrieving address via {}: {e}", resolver.name()),
        }
    }

    let output = report::report_path(path);
    match report::write_report(
        &metadata,
        result.coordinate.as_ref(),
        result.address.as_ref(),
        &output,
    ) {
        Ok(()) => result.report_path = Some(output),
        Err(e) => log::error!("Error saving metadata to CSV: {e}"),
    }

    result.metadata = Some(metadata);
    result
}
