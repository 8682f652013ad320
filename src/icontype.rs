use std::fmt;

use crate::error::{Error, Result};

/// Largest ICO entry size that may be stored as an uncompressed DIB.
pub const MAX_BMP_SIZE: u32 = 48;

/// Pixel sizes of the ICO ladder, smallest first.
pub const ICO_SIZES: [u32; 7] = [16, 24, 32, 48, 64, 128, 256];

/// Pixel sizes of the ICNS ladder, smallest first.
pub const ICNS_SIZES: [u32; 7] = [16, 32, 64, 128, 256, 512, 1024];

/// Kinds of icon container this crate can produce.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Container {
    /// Windows icon (.ico).
    Ico,
    /// Apple icon image (.icns).
    Icns,
}

impl Container {
    /// Returns the conventional file extension for this container.
    pub fn extension(self) -> &'static str {
        match self {
            Container::Ico => "ico",
            Container::Icns => "icns",
        }
    }

    /// Returns the fixed pixel sizes of this container's ladder.
    pub fn sizes(self) -> &'static [u32] {
        match self {
            Container::Ico => &ICO_SIZES,
            Container::Icns => &ICNS_SIZES,
        }
    }
}

impl fmt::Display for Container {
    fn fmt(&self, out: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Container::Ico => out.write_str("ICO"),
            Container::Icns => out.write_str("ICNS"),
        }
    }
}

/// Method of encoding an image within an icon entry.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Encoding {
    /// Uncompressed 32-bit DIB with an AND mask (ICO only).
    Bmp,
    /// A complete PNG file.
    Png,
}

/// A Macintosh OSType (also known as a ResType), used in ICNS files to
/// identify the type of each chunk.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct OSType(pub [u8; 4]);

impl OSType {
    /// Returns the PNG icon OSType for an ICNS ladder size, if any.
    ///
    /// # Examples
    /// ```
    /// use iconsynth::OSType;
    /// assert_eq!(OSType::for_icns_size(16), Some(OSType(*b"icp4")));
    /// assert_eq!(OSType::for_icns_size(1024), Some(OSType(*b"ic10")));
    /// assert_eq!(OSType::for_icns_size(48), None);
    /// ```
    pub fn for_icns_size(size: u32) -> Option<OSType> {
        match size {
            16 => Some(OSType(*b"icp4")),
            32 => Some(OSType(*b"icp5")),
            64 => Some(OSType(*b"icp6")),
            128 => Some(OSType(*b"ic07")),
            256 => Some(OSType(*b"ic08")),
            512 => Some(OSType(*b"ic09")),
            1024 => Some(OSType(*b"ic10")),
            _ => None,
        }
    }

    /// Returns the pixel size stored under this OSType, if it is one of the
    /// ICNS ladder types.
    pub fn icns_size(self) -> Option<u32> {
        ICNS_SIZES.iter().copied().find(|&size| OSType::for_icns_size(size) == Some(self))
    }
}

impl fmt::Display for OSType {
    fn fmt(&self, out: &mut fmt::Formatter) -> fmt::Result {
        let OSType(raw) = *self;
        for &byte in &raw {
            write!(out, "{}", char::from(byte))?;
        }
        Ok(())
    }
}

/// One rung of a container's resolution ladder: a pixel size and the
/// encoding its entry must use.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ResolutionSpec {
    container: Container,
    size: u32,
    encoding: Encoding,
}

impl ResolutionSpec {
    /// Creates a spec, checking that the size belongs to the container's
    /// ladder and that the encoding is allowed at that size.
    pub fn new(container: Container,
               size: u32,
               encoding: Encoding)
               -> Result<ResolutionSpec> {
        if !container.sizes().contains(&size) {
            let msg = format!("{}px is not a {} ladder size", size, container);
            return Err(Error::UnsupportedResolution(msg));
        }
        let bmp_allowed = container == Container::Ico && size <= MAX_BMP_SIZE;
        if encoding == Encoding::Bmp && !bmp_allowed {
            let msg = format!("{}px {} entries must be PNG-encoded", size, container);
            return Err(Error::UnsupportedResolution(msg));
        }
        Ok(ResolutionSpec {
            container,
            size,
            encoding,
        })
    }

    /// Returns the container this spec belongs to.
    pub fn container(&self) -> Container {
        self.container
    }

    /// Returns the width and height of the entry, in pixels.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Returns the encoding of the entry.
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Returns the ICNS chunk type for this spec (`None` for ICO specs).
    pub fn ostype(&self) -> Option<OSType> {
        match self.container {
            Container::Ico => None,
            Container::Icns => OSType::for_icns_size(self.size),
        }
    }
}

/// Builds the ICO ladder.  Entries up to 48px use BMP encoding when
/// `include_bmp` is set; larger entries are always PNG.
///
/// # Examples
/// ```
/// use iconsynth::{ico_ladder, Encoding};
/// let ladder = ico_ladder(true);
/// assert_eq!(ladder.len(), 7);
/// assert_eq!(ladder[3].size(), 48);
/// assert_eq!(ladder[3].encoding(), Encoding::Bmp);
/// assert_eq!(ladder[4].encoding(), Encoding::Png);
/// ```
pub fn ico_ladder(include_bmp: bool) -> Vec<ResolutionSpec> {
    ICO_SIZES.iter()
        .map(|&size| {
            let encoding = if include_bmp && size <= MAX_BMP_SIZE {
                Encoding::Bmp
            } else {
                Encoding::Png
            };
            ResolutionSpec {
                container: Container::Ico,
                size,
                encoding,
            }
        })
        .collect()
}

/// Builds the ICNS ladder; every entry is PNG-encoded.
pub fn icns_ladder() -> Vec<ResolutionSpec> {
    ICNS_SIZES.iter()
        .map(|&size| {
            ResolutionSpec {
                container: Container::Icns,
                size,
                encoding: Encoding::Png,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn ostype_size_round_trip() {
        for &size in &ICNS_SIZES {
            let ostype = OSType::for_icns_size(size).expect("missing ostype");
            assert_eq!(ostype.icns_size(), Some(size));
        }
        assert_eq!(OSType(*b"quux").icns_size(), None);
    }

    #[test]
    fn ostype_displays_as_its_tag() {
        assert_eq!(OSType(*b"ic07").to_string(), "ic07");
    }

    #[test]
    fn ico_ladder_without_bmp_is_all_png() {
        let ladder = ico_ladder(false);
        assert_eq!(ladder.iter().map(|spec| spec.size()).collect::<Vec<_>>(),
                   ICO_SIZES.to_vec());
        assert!(ladder.iter().all(|spec| spec.encoding() == Encoding::Png));
        assert!(ladder.iter().all(|spec| spec.ostype().is_none()));
    }

    #[test]
    fn icns_ladder_is_png_with_tags() {
        let ladder = icns_ladder();
        assert_eq!(ladder.len(), 7);
        for spec in &ladder {
            assert_eq!(spec.encoding(), Encoding::Png);
            assert_eq!(spec.ostype(), OSType::for_icns_size(spec.size()));
        }
    }

    #[test]
    fn spec_validation() {
        assert!(ResolutionSpec::new(Container::Ico, 48, Encoding::Bmp).is_ok());
        let large_bmp = ResolutionSpec::new(Container::Ico, 64, Encoding::Bmp);
        assert_eq!(large_bmp.unwrap_err().kind(), ErrorKind::UnsupportedResolution);
        let icns_bmp = ResolutionSpec::new(Container::Icns, 16, Encoding::Bmp);
        assert_eq!(icns_bmp.unwrap_err().kind(), ErrorKind::UnsupportedResolution);
        let odd_size = ResolutionSpec::new(Container::Ico, 20, Encoding::Png);
        assert_eq!(odd_size.unwrap_err().kind(), ErrorKind::UnsupportedResolution);
        assert!(ResolutionSpec::new(Container::Icns, 1024, Encoding::Png).is_ok());
    }
}
