//! Library for synthesizing Windows icon (.ico) and Apple icon image (.icns)
//! files from a single RGBA image.
//!
//! The source image is resampled to each size of a fixed ladder, each
//! resampled image is encoded (as PNG, or for small ICO entries as an
//! uncompressed DIB), and the encoded entries are packed into the container.
//!
//! See https://en.wikipedia.org/wiki/ICO_(file_format) and
//! https://en.wikipedia.org/wiki/Apple_Icon_Image_format for more
//! information about the file formats.
//!
//! # Example
//! ```
//! use iconsynth::{convert, ConversionOptions, Raster};
//!
//! let source = Raster::from_pixel(64, 64, [255, 0, 0, 255]).unwrap();
//! let options = ConversionOptions::default().with_icns(true);
//! let result = convert(&source, &options);
//! let output = result.output().expect("conversion failed");
//! assert_eq!(&output.ico.as_ref().unwrap()[0..4], b"\0\0\x01\0");
//! assert_eq!(&output.icns.as_ref().unwrap()[0..4], b"icns");
//! ```

#![warn(missing_docs)]

mod convert;
mod dib;
mod entry;
mod error;
mod icns;
mod ico;
mod icontype;
mod pngio;
mod raster;
mod resample;

pub use convert::{convert, try_convert, ConversionOptions, ConversionResult, Converted};
pub use dib::{and_mask_row_len, encode_dib};
pub use entry::IconEntry;
pub use error::{Error, ErrorKind, Result};
pub use icns::{pack_icns, read_icns, IcnsChunk};
pub use ico::{pack_ico, read_ico_directory, write_ico, IcoDirEntry};
pub use icontype::{ico_ladder, icns_ladder, Container, Encoding, OSType, ResolutionSpec,
                   ICNS_SIZES, ICO_SIZES, MAX_BMP_SIZE};
pub use raster::Raster;
pub use resample::{resample, resample_to, Quality};
