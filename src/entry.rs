use log::debug;

use crate::dib;
use crate::error::{Error, Result};
use crate::icontype::{Container, Encoding, OSType, ResolutionSpec};
use crate::raster::Raster;

/// Bit depth recorded in ICO directory records, for BMP and PNG entries.
const ICO_BIT_DEPTH: u16 = 32;

/// One encoded image, ready to be packed into a container.
#[derive(Clone, Debug)]
pub struct IconEntry {
    spec: ResolutionSpec,
    data: Vec<u8>,
}

impl IconEntry {
    /// Encodes a raster according to the given spec.  Returns an error if the
    /// raster's dimensions differ from the spec's size, or if the encoder
    /// rejects it.
    pub fn encode(raster: &Raster, spec: ResolutionSpec) -> Result<IconEntry> {
        if raster.width() != spec.size() || raster.height() != spec.size() {
            let msg = format!("{}x{} raster does not fit a {}px {} entry",
                              raster.width(),
                              raster.height(),
                              spec.size(),
                              spec.container());
            return Err(Error::EncodingFailure(msg));
        }
        let data = match spec.encoding() {
            Encoding::Bmp => dib::encode_dib(raster)?,
            Encoding::Png => raster.encode_png()?,
        };
        debug!("encoded {}px {} entry as {:?} ({} bytes)",
               spec.size(),
               spec.container(),
               spec.encoding(),
               data.len());
        Ok(IconEntry { spec, data })
    }

    /// Returns the spec this entry was encoded for.
    pub fn spec(&self) -> ResolutionSpec {
        self.spec
    }

    /// Returns the container this entry belongs to.
    pub fn container(&self) -> Container {
        self.spec.container()
    }

    /// Returns the width and height of the entry, in pixels.
    pub fn size(&self) -> u32 {
        self.spec.size()
    }

    /// Returns how the entry's data is encoded.
    pub fn encoding(&self) -> Encoding {
        self.spec.encoding()
    }

    /// Returns the encoded data block.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the length of the encoded data block, in bytes.
    pub fn data_len(&self) -> usize {
        self.data.len()
    }

    /// Returns the bit depth recorded for this entry in an ICO directory.
    pub fn bit_depth(&self) -> u16 {
        ICO_BIT_DEPTH
    }

    /// Returns the color-plane count recorded in an ICO directory.
    pub fn color_planes(&self) -> u16 {
        1
    }

    /// Returns the ICNS chunk type, or `None` for ICO entries.
    pub fn ostype(&self) -> Option<OSType> {
        self.spec.ostype()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn bmp_entry_holds_dib_block() {
        let raster = Raster::from_pixel(16, 16, [9, 9, 9, 255]).unwrap();
        let spec = ResolutionSpec::new(Container::Ico, 16, Encoding::Bmp).unwrap();
        let entry = IconEntry::encode(&raster, spec).expect("encode failed");
        assert_eq!(entry.encoding(), Encoding::Bmp);
        assert_eq!(&entry.data()[0..4], b"\x28\0\0\0");
        assert_eq!(entry.data_len(), 40 + 16 * 16 * 4 + 16 * 4);
        assert_eq!(entry.bit_depth(), 32);
        assert_eq!(entry.color_planes(), 1);
        assert_eq!(entry.ostype(), None);
    }

    #[test]
    fn png_entry_holds_png_file() {
        let raster = Raster::from_pixel(32, 32, [9, 9, 9, 255]).unwrap();
        let spec = ResolutionSpec::new(Container::Icns, 32, Encoding::Png).unwrap();
        let entry = IconEntry::encode(&raster, spec).unwrap();
        assert_eq!(&entry.data()[1..4], b"PNG");
        assert_eq!(entry.ostype(), Some(OSType(*b"icp5")));
        assert_eq!(entry.container(), Container::Icns);
    }

    #[test]
    fn mismatched_raster_is_rejected() {
        let raster = Raster::from_pixel(17, 16, [0, 0, 0, 255]).unwrap();
        let spec = ResolutionSpec::new(Container::Ico, 16, Encoding::Png).unwrap();
        let error = IconEntry::encode(&raster, spec).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::EncodingFailure);
    }
}
