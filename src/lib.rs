//! # exif-report
//!
//! Extract EXIF metadata from a JPEG image, resolve its GPS coordinates to a
//! human-readable address via reverse geocoding, and export everything to a
//! CSV file next to the source image.
//!
//! ## Quick Start
//!
//! The pipeline module handles the full extract → resolve → write flow:
//!
//! ```rust,no_run
//! use exif_report::geocode::NominatimResolver;
//! use exif_report::pipeline::process_image;
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let resolver = NominatimResolver::new("my-app/1.0");
//!     let result = process_image(Path::new("photo.jpg"), &resolver).await;
//!
//!     if let Some(ref report) = result.report_path {
//!         println!("Metadata saved to {}", report.display());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Lower-Level Usage
//!
//! Each stage can also be called individually:
//!
//! ```rust,no_run
//! use exif_report::exif::read_metadata;
//! use exif_report::geocode::{AddressResolver, NominatimResolver};
//! use exif_report::gps::extract_coordinates;
//! use exif_report::report::{report_path, write_report};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let path = Path::new("photo.jpg");
//!
//!     // 1. Read the EXIF tag set
//!     let Some(metadata) = read_metadata(path)? else {
//!         println!("No metadata found");
//!         return Ok(());
//!     };
//!
//!     // 2. Convert the GPS block to decimal coordinates
//!     let coordinate = extract_coordinates(&metadata)?;
//!
//!     // 3. Reverse-geocode
//!     let mut address = None;
//!     if let Some(ref coord) = coordinate {
//!         let resolver = NominatimResolver::new("my-app/1.0");
//!         address = Some(resolver.resolve(coord).await?);
//!     }
//!
//!     // 4. Write the CSV report
//!     write_report(&metadata, coordinate.as_ref(), address.as_ref(), &report_path(path))?;
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`exif`] — EXIF tag extraction and the metadata value model
//! - [`gps`] — DMS→decimal conversion and coordinate extraction
//! - [`geocode`] — reverse-geocoding trait and the Nominatim implementation
//! - [`report`] — CSV report synthesis and writing
//! - [`pipeline`] — the one-shot extract → resolve → write flow

pub mod exif;
pub mod geocode;
pub mod gps;
pub mod pipeline;
pub mod report;
