//! Separable resampling with windowed-sinc filters, on top of
//! `fast_image_resize`.
//!
//! Every channel, alpha included, is filtered independently.  Alpha is
//! treated as straight alpha, so colors of fully transparent pixels can
//! bleed into the edges of partially transparent ones; sources that need
//! clean edges should carry sensible colors under their transparent pixels.

use std::f64::consts::PI;

use fast_image_resize as fr;
use log::debug;

use crate::error::{Error, Result};
use crate::raster::Raster;

/// Resampling quality.  Higher levels use a wider filter kernel.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Quality {
    /// Level 0: triangle (bilinear) filter, one pixel of support.
    Low,
    /// Level 1: Lanczos filter with two lobes.
    Medium,
    /// Level 2: Lanczos filter with three lobes.
    #[default]
    High,
}

impl Quality {
    /// The highest accepted quality level.
    pub const MAX_LEVEL: u8 = 2;

    /// Maps an integer quality level to a `Quality`.
    ///
    /// # Examples
    /// ```
    /// use iconsynth::Quality;
    /// assert_eq!(Quality::from_level(2).unwrap(), Quality::High);
    /// assert!(Quality::from_level(3).is_err());
    /// ```
    pub fn from_level(level: u8) -> Result<Quality> {
        match level {
            0 => Ok(Quality::Low),
            1 => Ok(Quality::Medium),
            2 => Ok(Quality::High),
            _ => {
                let msg = format!("quality level {} is outside 0..={}",
                                  level,
                                  Quality::MAX_LEVEL);
                Err(Error::InvalidOptions(msg))
            }
        }
    }

    /// Returns the integer level of this quality.
    pub fn level(self) -> u8 {
        match self {
            Quality::Low => 0,
            Quality::Medium => 1,
            Quality::High => 2,
        }
    }

    fn filter(self) -> Result<fr::FilterType> {
        match self {
            Quality::Low => Ok(fr::FilterType::Bilinear),
            Quality::Medium => {
                // The crate ships Lanczos3 only; two lobes need a custom kernel.
                let filter = fr::Filter::new("lanczos2", lanczos2, 2.0)
                    .map_err(|err| Error::EncodingFailure(format!("{:?}", err)))?;
                Ok(fr::FilterType::Custom(filter))
            }
            Quality::High => Ok(fr::FilterType::Lanczos3),
        }
    }
}

fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        let px = PI * x;
        px.sin() / px
    }
}

fn lanczos2(x: f64) -> f64 {
    if x.abs() < 2.0 {
        sinc(x) * sinc(x / 2.0)
    } else {
        0.0
    }
}

/// Resamples the source to a square `target_size` by `target_size` raster.
///
/// Non-square sources are stretched.  Resampling to the source's own size
/// returns an identical copy.
pub fn resample(source: &Raster,
                target_size: u32,
                quality: Quality)
                -> Result<Raster> {
    resample_to(source, target_size, target_size, quality)
}

/// Resamples the source to the given dimensions, horizontal pass first.
pub fn resample_to(source: &Raster,
                   width: u32,
                   height: u32,
                   quality: Quality)
                   -> Result<Raster> {
    source.ensure_not_empty()?;
    if width == 0 || height == 0 {
        let msg = format!("cannot resample to {}x{}", width, height);
        return Err(Error::UnsupportedResolution(msg));
    }
    if width == source.width() && height == source.height() {
        return Ok(source.clone());
    }
    if width > source.width() || height > source.height() {
        debug!("upscaling {}x{} source to {}x{}",
               source.width(),
               source.height(),
               width,
               height);
    }

    let src_image = fr::images::Image::from_vec_u8(source.width(),
                                                   source.height(),
                                                   source.data().to_vec(),
                                                   fr::PixelType::U8x4)
        .map_err(|err| resize_error(source, width, height, err))?;
    let mut dst_image = fr::images::Image::new(width, height, fr::PixelType::U8x4);

    // Straight alpha: no premultiplication before filtering.
    let options = fr::ResizeOptions::new()
        .resize_alg(fr::ResizeAlg::Convolution(quality.filter()?))
        .use_alpha(false);
    let mut resizer = fr::Resizer::new();
    resizer.resize(&src_image, &mut dst_image, Some(&options))
        .map_err(|err| resize_error(source, width, height, err))?;

    Raster::new(width, height, dst_image.into_vec())
}

fn resize_error<E: std::fmt::Debug>(source: &Raster, width: u32, height: u32, err: E) -> Error {
    Error::EncodingFailure(format!("failed to resample {}x{} to {}x{}: {:?}",
                                   source.width(),
                                   source.height(),
                                   width,
                                   height,
                                   err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn gradient(width: u32, height: u32) -> Raster {
        let mut data = Vec::new();
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&[(x * 7) as u8, (y * 5) as u8, 90, 200]);
            }
        }
        Raster::new(width, height, data).unwrap()
    }

    #[test]
    fn produces_requested_size() {
        let source = gradient(37, 20);
        for &size in &[1, 16, 24, 37, 48, 100] {
            for level in 0..=Quality::MAX_LEVEL {
                let quality = Quality::from_level(level).unwrap();
                let output = resample(&source, size, quality).unwrap();
                assert_eq!((output.width(), output.height()), (size, size));
                assert_eq!(output.data().len(), (size * size * 4) as usize);
            }
        }
    }

    #[test]
    fn same_size_is_identity() {
        let source = gradient(32, 32);
        let output = resample(&source, 32, Quality::High).unwrap();
        assert_eq!(output, source);
    }

    #[test]
    fn solid_color_survives_down_and_up_scaling() {
        let source = Raster::from_pixel(40, 40, [12, 200, 99, 128]).unwrap();
        for &size in &[16, 64] {
            let output = resample(&source, size, Quality::High).unwrap();
            assert!(output.data().chunks(4).all(|px| px == [12, 200, 99, 128]));
        }
    }

    #[test]
    fn alpha_is_filtered_like_color() {
        let mut data = Vec::new();
        for x in 0..4 {
            let alpha = if x < 2 { 0 } else { 255 };
            data.extend_from_slice(&[255, 255, 255, alpha]);
        }
        let source = Raster::new(4, 1, data).unwrap();
        let output = resample_to(&source, 2, 1, Quality::Low).unwrap();
        // Straight alpha: color stays put while alpha blends.
        assert_eq!(output.pixel(0, 0), Some([255, 255, 255, 36]));
        assert_eq!(output.pixel(1, 0), Some([255, 255, 255, 219]));
    }

    #[test]
    fn medium_quality_kernel_has_two_lobes() {
        assert_eq!(lanczos2(0.0), 1.0);
        assert!(lanczos2(1.0).abs() < 1e-12);
        assert!(lanczos2(1.5) < 0.0);
        assert_eq!(lanczos2(2.0), 0.0);
        assert_eq!(lanczos2(-2.5), 0.0);
    }

    #[test]
    fn flat_regions_beside_an_edge_keep_their_value() {
        let mut data = Vec::new();
        for x in 0..8 {
            let value = if x < 4 { 0 } else { 255 };
            data.extend_from_slice(&[value, value, value, 255]);
        }
        let source = Raster::new(8, 1, data).unwrap();
        // Lanczos overshoots on both sides of the edge.
        let output = resample_to(&source, 13, 1, Quality::High).unwrap();
        assert_eq!(output.pixel(0, 0), Some([0, 0, 0, 255]));
        assert_eq!(output.pixel(12, 0), Some([255, 255, 255, 255]));
    }

    #[test]
    fn empty_source_is_rejected() {
        let source = Raster::new(0, 4, Vec::new()).unwrap();
        let error = resample(&source, 16, Quality::Low).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidRaster);
    }

    #[test]
    fn zero_target_is_rejected() {
        let source = gradient(4, 4);
        let error = resample(&source, 0, Quality::Low).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::UnsupportedResolution);
    }

    #[test]
    fn default_quality_is_high() {
        assert_eq!(Quality::default(), Quality::High);
        assert_eq!(Quality::default().level(), Quality::MAX_LEVEL);
    }

    #[test]
    fn quality_levels_round_trip() {
        for level in 0..=Quality::MAX_LEVEL {
            assert_eq!(Quality::from_level(level).unwrap().level(), level);
        }
        let error = Quality::from_level(9).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidOptions);
    }
}
