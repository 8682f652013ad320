use std::io::{self, BufRead, Error, ErrorKind, Seek, Write};

use crate::error::Result;
use crate::raster::{self, Raster};

impl Raster {
    /// Reads a raster from a PNG file, converting any PNG color type and bit
    /// depth to 8-bit RGBA.
    pub fn read_png<R: BufRead + Seek>(input: R) -> io::Result<Raster> {
        let mut decoder = png::Decoder::new(input);
        decoder.set_transformations(
            png::Transformations::STRIP_16 | png::Transformations::EXPAND,
        );
        let mut reader = decoder.read_info()?;
        let (width, height) = {
            let info = reader.info();
            (info.width, info.height)
        };

        let (color_type, bit_depth) = reader.output_color_type();
        if bit_depth != png::BitDepth::Eight {
            let msg = format!("unexpected PNG output bit depth {:?}", bit_depth);
            return Err(Error::new(ErrorKind::InvalidData, msg));
        }
        let buffer_size = reader.output_buffer_size().ok_or_else(|| {
            Error::new(ErrorKind::InvalidData, "PNG image is too large")
        })?;
        let mut buffer = vec![0u8; buffer_size];
        let frame = reader.next_frame(&mut buffer)?;
        buffer.truncate(frame.buffer_size());
        reader.finish()?;

        let rgba = match color_type {
            png::ColorType::Rgba => buffer,
            png::ColorType::Rgb => raster::rgb_to_rgba(&buffer),
            png::ColorType::GrayscaleAlpha => raster::gray_alpha_to_rgba(&buffer),
            png::ColorType::Grayscale => raster::grayscale_to_rgba(&buffer),
            png::ColorType::Indexed => {
                // EXPAND turns palettes into RGB(A).
                return Err(Error::new(ErrorKind::InvalidData,
                                      "PNG palette was not expanded"));
            }
        };
        Raster::new(width, height, rgba)
            .map_err(|err| Error::new(ErrorKind::InvalidData, err))
    }

    /// Writes the raster to a PNG file as 8-bit RGBA without interlacing.
    pub fn write_png<W: Write>(&self, output: W) -> Result<()> {
        self.ensure_not_empty()?;
        let mut encoder = png::Encoder::new(output, self.width(), self.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header()?;
        writer.write_image_data(self.data())?;
        writer.finish()?;
        Ok(())
    }

    /// Encodes the raster as a standalone PNG byte stream.  The same raster
    /// always produces the same bytes.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        self.write_png(&mut output)?;
        Ok(output)
    }
}
