use crate::error::{Error, Result};

/// Number of bytes per RGBA pixel.
pub(crate) const BYTES_PER_PIXEL: usize = 4;

/// A decoded RGBA image with straight (non-premultiplied) alpha.
///
/// Pixels are stored row-major, top row first, one byte per channel.  A
/// raster is immutable once constructed; operations that change pixels
/// allocate a new one.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Raster {
    width: u32,
    height: u32,
    data: Box<[u8]>,
}

impl Raster {
    /// Creates a raster from RGBA pixel data.  Returns an error if the
    /// buffer length is not exactly `width * height * 4`.
    ///
    /// Zero-sized rasters can be constructed, but every operation that needs
    /// pixels rejects them.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Raster> {
        let expected = buffer_len(width, height)?;
        if data.len() != expected {
            let msg = format!("{}x{} raster needs {} bytes of RGBA data \
                               (got {})",
                              width,
                              height,
                              expected,
                              data.len());
            return Err(Error::InvalidRaster(msg));
        }
        Ok(Raster {
            width,
            height,
            data: data.into_boxed_slice(),
        })
    }

    /// Creates a raster with every pixel set to the given RGBA value.
    pub fn from_pixel(width: u32, height: u32, rgba: [u8; 4]) -> Result<Raster> {
        let len = buffer_len(width, height)?;
        let data: Vec<u8> = rgba.iter().copied().cycle().take(len).collect();
        Raster::new(width, height, data)
    }

    /// Returns the width of the raster, in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the raster, in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the raw RGBA pixel data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns true if either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns the RGBA value at the given position, or `None` if it lies
    /// outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = (y as usize * self.width as usize + x as usize) *
                    BYTES_PER_PIXEL;
        let mut rgba = [0u8; 4];
        rgba.copy_from_slice(&self.data[start..start + BYTES_PER_PIXEL]);
        Some(rgba)
    }

    /// Returns the pixel data of one row.
    pub(crate) fn row(&self, y: u32) -> &[u8] {
        let stride = self.width as usize * BYTES_PER_PIXEL;
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    /// Fails with `InvalidRaster` unless both dimensions are positive.
    pub(crate) fn ensure_not_empty(&self) -> Result<()> {
        if self.is_empty() {
            let msg = format!("source raster is {}x{}", self.width, self.height);
            return Err(Error::InvalidRaster(msg));
        }
        Ok(())
    }
}

fn buffer_len(width: u32, height: u32) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(BYTES_PER_PIXEL))
        .ok_or_else(|| {
            Error::InvalidRaster(format!("{}x{} raster is too large",
                                         width,
                                         height))
        })
}

/// Converts RGB pixel data into RGBA.
pub(crate) fn rgb_to_rgba(rgb: &[u8]) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(rgb.len() / 3 * 4);
    for pixel in rgb.chunks_exact(3) {
        rgba.extend_from_slice(pixel);
        rgba.push(u8::MAX);
    }
    rgba
}

/// Converts grayscale-with-alpha pixel data into RGBA.
pub(crate) fn gray_alpha_to_rgba(gray_alpha: &[u8]) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(gray_alpha.len() * 2);
    for pixel in gray_alpha.chunks_exact(2) {
        rgba.extend_from_slice(&[pixel[0], pixel[0], pixel[0], pixel[1]]);
    }
    rgba
}

/// Converts grayscale pixel data into RGBA.
pub(crate) fn grayscale_to_rgba(gray: &[u8]) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(gray.len() * 4);
    for &value in gray {
        rgba.extend_from_slice(&[value, value, value, u8::MAX]);
    }
    rgba
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn rejects_wrong_buffer_length() {
        let error = Raster::new(2, 2, vec![0u8; 15]).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidRaster);
    }

    #[test]
    fn zero_sized_raster_is_empty() {
        let raster = Raster::new(0, 16, Vec::new()).unwrap();
        assert!(raster.is_empty());
        assert!(raster.ensure_not_empty().is_err());
    }

    #[test]
    fn pixel_lookup() {
        let raster = Raster::new(2, 1, vec![1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        assert_eq!(raster.pixel(1, 0), Some([5, 6, 7, 8]));
        assert_eq!(raster.pixel(2, 0), None);
        assert_eq!(raster.row(0), &[1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn from_pixel_fills_every_pixel() {
        let raster = Raster::from_pixel(3, 2, [255, 0, 0, 255]).unwrap();
        assert_eq!(raster.data().len(), 24);
        assert_eq!(raster.pixel(2, 1), Some([255, 0, 0, 255]));
    }

    #[test]
    fn channel_expansion() {
        assert_eq!(rgb_to_rgba(&[1, 2, 3]), vec![1, 2, 3, 255]);
        assert_eq!(gray_alpha_to_rgba(&[9, 128]), vec![9, 9, 9, 128]);
        assert_eq!(grayscale_to_rgba(&[7]), vec![7, 7, 7, 255]);
    }
}
