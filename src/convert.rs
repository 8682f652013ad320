//! The conversion entry point: one source raster in, one or two complete
//! icon containers out.

use log::{debug, info, warn};

use crate::entry::IconEntry;
use crate::error::{Error, ErrorKind, Result};
use crate::ico::pack_ico;
use crate::icns::pack_icns;
use crate::icontype::{ico_ladder, icns_ladder, Container, ResolutionSpec};
use crate::raster::Raster;
use crate::resample::{resample, Quality};

/// Options for a single conversion.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ConversionOptions {
    /// Resampling quality level, `0..=Quality::MAX_LEVEL`.
    pub quality: u8,
    /// Store ICO entries of 48px and below as uncompressed DIBs.
    pub include_bmp: bool,
    /// Produce a Windows icon.
    pub produce_ico: bool,
    /// Produce an Apple icon image.
    pub produce_icns: bool,
}

impl Default for ConversionOptions {
    fn default() -> ConversionOptions {
        ConversionOptions {
            quality: 2,
            include_bmp: true,
            produce_ico: true,
            produce_icns: false,
        }
    }
}

impl ConversionOptions {
    /// Sets the resampling quality level.
    pub fn with_quality(mut self, quality: u8) -> ConversionOptions {
        self.quality = quality;
        self
    }

    /// Sets whether small ICO entries are stored as DIBs.
    pub fn with_bmp(mut self, include_bmp: bool) -> ConversionOptions {
        self.include_bmp = include_bmp;
        self
    }

    /// Sets whether an ICO file is produced.
    pub fn with_ico(mut self, produce_ico: bool) -> ConversionOptions {
        self.produce_ico = produce_ico;
        self
    }

    /// Sets whether an ICNS file is produced.
    pub fn with_icns(mut self, produce_icns: bool) -> ConversionOptions {
        self.produce_icns = produce_icns;
        self
    }

    /// Returns the requested containers, ICO first.
    pub fn containers(&self) -> Vec<Container> {
        let mut containers = Vec::with_capacity(2);
        if self.produce_ico {
            containers.push(Container::Ico);
        }
        if self.produce_icns {
            containers.push(Container::Icns);
        }
        containers
    }

    fn validate(&self) -> Result<Quality> {
        let quality = Quality::from_level(self.quality)?;
        if !self.produce_ico && !self.produce_icns {
            let msg = "neither ICO nor ICNS output was requested".to_string();
            return Err(Error::InvalidOptions(msg));
        }
        Ok(quality)
    }
}

/// The containers produced by a successful conversion.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Converted {
    /// The ICO file, if one was requested.
    pub ico: Option<Vec<u8>>,
    /// The ICNS file, if one was requested.
    pub icns: Option<Vec<u8>>,
}

impl Converted {
    /// Returns each produced container with its bytes, ICO first.
    pub fn outputs(&self) -> impl Iterator<Item = (Container, &[u8])> + '_ {
        let ico = self.ico.as_deref().map(|bytes| (Container::Ico, bytes));
        let icns = self.icns.as_deref().map(|bytes| (Container::Icns, bytes));
        ico.into_iter().chain(icns)
    }

    fn log_line(&self, source: &Raster) -> String {
        let formats: Vec<String> = self.outputs()
            .map(|(container, bytes)| format!("{} ({} bytes)", container, bytes.len()))
            .collect();
        format!("converted {}x{} source to {}",
                source.width(),
                source.height(),
                formats.join(" and "))
    }
}

/// Outcome of [`convert`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConversionResult {
    /// Every requested container was produced.
    Success {
        /// The produced containers.
        output: Converted,
        /// A human-readable summary naming the produced formats.
        log: String,
    },
    /// The conversion failed; no container bytes are returned.
    Failure {
        /// Classification of the failure.
        kind: ErrorKind,
        /// Description of the failure.
        message: String,
    },
}

impl ConversionResult {
    /// Returns true for a successful conversion.
    pub fn is_success(&self) -> bool {
        matches!(self, ConversionResult::Success { .. })
    }

    /// Returns the produced containers, if the conversion succeeded.
    pub fn output(&self) -> Option<&Converted> {
        match self {
            ConversionResult::Success { output, .. } => Some(output),
            ConversionResult::Failure { .. } => None,
        }
    }

    /// Returns the failure classification, if the conversion failed.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            ConversionResult::Success { .. } => None,
            ConversionResult::Failure { kind, .. } => Some(*kind),
        }
    }
}

/// Converts a source raster into the containers selected by `options`.
///
/// Every failure is reported in the returned value; when any requested
/// container fails, no container bytes are returned at all.
pub fn convert(source: &Raster, options: &ConversionOptions) -> ConversionResult {
    match try_convert(source, options) {
        Ok(output) => {
            let log = output.log_line(source);
            info!("{}", log);
            ConversionResult::Success { output, log }
        }
        Err(error) => {
            warn!("conversion failed: {}", error);
            ConversionResult::Failure {
                kind: error.kind(),
                message: error.to_string(),
            }
        }
    }
}

/// Like [`convert`], but returns a `Result`.
pub fn try_convert(source: &Raster, options: &ConversionOptions) -> Result<Converted> {
    source.ensure_not_empty()?;
    let quality = options.validate()?;

    let mut converted = Converted::default();
    for container in options.containers() {
        match container {
            Container::Ico => {
                let entries = build_entries(source, &ico_ladder(options.include_bmp), quality)?;
                converted.ico = Some(pack_ico(&entries)?);
            }
            Container::Icns => {
                let entries = build_entries(source, &icns_ladder(), quality)?;
                converted.icns = Some(pack_icns(&entries)?);
            }
        }
    }
    Ok(converted)
}

/// Resamples and encodes one entry per spec, in ladder order.  Each
/// container gets its own resampled rasters, even where sizes coincide.
fn build_entries(source: &Raster,
                 ladder: &[ResolutionSpec],
                 quality: Quality)
                 -> Result<Vec<IconEntry>> {
    ladder.iter()
        .map(|&spec| {
            let raster = resample(source, spec.size(), quality)?;
            debug!("resampled {}x{} source to {}px",
                   source.width(),
                   source.height(),
                   spec.size());
            IconEntry::encode(&raster, spec)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_match_shell_defaults() {
        let options = ConversionOptions::default();
        assert_eq!(options.quality, 2);
        assert!(options.include_bmp);
        assert_eq!(options.containers(), vec![Container::Ico]);
    }

    #[test]
    fn builder_setters() {
        let options = ConversionOptions::default()
            .with_quality(0)
            .with_bmp(false)
            .with_ico(false)
            .with_icns(true);
        assert_eq!(options.quality, 0);
        assert!(!options.include_bmp);
        assert_eq!(options.containers(), vec![Container::Icns]);
    }

    #[test]
    fn no_container_is_invalid() {
        let source = Raster::from_pixel(16, 16, [0, 0, 0, 255]).unwrap();
        let options = ConversionOptions::default().with_ico(false);
        let result = convert(&source, &options);
        assert_eq!(result.error_kind(), Some(ErrorKind::InvalidOptions));
        assert!(result.output().is_none());
    }

    #[test]
    fn out_of_range_quality_is_invalid() {
        let source = Raster::from_pixel(16, 16, [0, 0, 0, 255]).unwrap();
        let options = ConversionOptions::default().with_quality(7);
        let error = try_convert(&source, &options).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidOptions);
    }

    #[test]
    fn raster_is_checked_before_options() {
        let source = Raster::new(0, 0, Vec::new()).unwrap();
        let options = ConversionOptions::default().with_ico(false);
        let error = try_convert(&source, &options).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidRaster);
    }

    #[test]
    fn log_line_names_formats() {
        let source = Raster::from_pixel(64, 64, [0, 0, 0, 255]).unwrap();
        let options = ConversionOptions::default().with_icns(true).with_quality(0);
        match convert(&source, &options) {
            ConversionResult::Success { output, log } => {
                assert!(log.starts_with("converted 64x64 source to ICO ("));
                assert!(log.contains(" and ICNS ("));
                assert_eq!(output.outputs().count(), 2);
            }
            ConversionResult::Failure { message, .. } => panic!("{}", message),
        }
    }
}
