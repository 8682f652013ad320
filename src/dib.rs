//! Uncompressed 32-bit DIB blocks, as stored inside legacy ICO entries.
//!
//! A block is a 40-byte BITMAPINFOHEADER, the BGRA color data (the "XOR
//! bitmap") and a 1-bit AND mask, both stored bottom row first.  The header
//! height counts both bitmaps, so it is twice the icon height.

use byteorder::{LittleEndian, WriteBytesExt};

use crate::error::{Error, Result};
use crate::raster::{Raster, BYTES_PER_PIXEL};

/// The length of a BITMAPINFOHEADER, in bytes:
const BITMAPINFOHEADER_LENGTH: u32 = 40;

/// Bits per pixel of the color data.
const BITS_PER_PIXEL: u16 = 32;

/// BI_RGB: no compression.
const BI_RGB: u32 = 0;

/// Returns the length in bytes of one AND-mask row: one bit per pixel,
/// padded to a 4-byte boundary.
///
/// # Examples
/// ```
/// use iconsynth::and_mask_row_len;
/// assert_eq!(and_mask_row_len(16), 4);
/// assert_eq!(and_mask_row_len(33), 8);
/// assert_eq!(and_mask_row_len(48), 8);
/// ```
pub fn and_mask_row_len(width: u32) -> usize {
    (width as usize).div_ceil(32) * 4
}

/// Returns the total length of the DIB block for an icon of the given
/// size, or `None` if it does not fit in 32 bits.
pub(crate) fn block_len(width: u32, height: u32) -> Option<u32> {
    let color = u64::from(width) * u64::from(height) * BYTES_PER_PIXEL as u64;
    let mask = and_mask_row_len(width) as u64 * u64::from(height);
    let total = u64::from(BITMAPINFOHEADER_LENGTH) + color + mask;
    u32::try_from(total).ok()
}

/// Encodes the raster as a DIB block for an ICO entry.
///
/// The AND mask marks a pixel transparent only when its alpha is zero; any
/// other alpha value is opaque in the mask.  The color data keeps the full
/// alpha channel.
pub fn encode_dib(raster: &Raster) -> Result<Vec<u8>> {
    raster.ensure_not_empty()?;
    let (width, height) = (raster.width(), raster.height());
    let total = block_len(width, height).ok_or_else(|| {
        Error::PackingOverflow(format!("{}x{} DIB block exceeds 4 GiB", width, height))
    })?;
    let double_height = height.checked_mul(2)
        .and_then(|h| i32::try_from(h).ok())
        .ok_or_else(|| {
            Error::EncodingFailure(format!("height {} too large for a DIB", height))
        })?;
    let signed_width = i32::try_from(width).map_err(|_| {
        Error::EncodingFailure(format!("width {} too large for a DIB", width))
    })?;
    let image_size = total - BITMAPINFOHEADER_LENGTH;

    let mut block = Vec::with_capacity(total as usize);
    write_header(&mut block, signed_width, double_height, image_size)
        .map_err(|err| Error::EncodingFailure(err.to_string()))?;

    for y in (0..height).rev() {
        for rgba in raster.row(y).chunks_exact(BYTES_PER_PIXEL) {
            block.extend_from_slice(&[rgba[2], rgba[1], rgba[0], rgba[3]]);
        }
    }

    let mask_row_len = and_mask_row_len(width);
    for y in (0..height).rev() {
        let mut mask_row = vec![0u8; mask_row_len];
        for (x, rgba) in raster.row(y).chunks_exact(BYTES_PER_PIXEL).enumerate() {
            if rgba[3] == 0 {
                mask_row[x / 8] |= 0x80 >> (x % 8);
            }
        }
        block.extend_from_slice(&mask_row);
    }

    if block.len() != total as usize {
        let msg = format!("DIB block is {} bytes, expected {}", block.len(), total);
        return Err(Error::EncodingFailure(msg));
    }
    Ok(block)
}

fn write_header(block: &mut Vec<u8>,
                width: i32,
                double_height: i32,
                image_size: u32)
                -> std::io::Result<()> {
    block.write_u32::<LittleEndian>(BITMAPINFOHEADER_LENGTH)?;
    block.write_i32::<LittleEndian>(width)?;
    block.write_i32::<LittleEndian>(double_height)?;
    block.write_u16::<LittleEndian>(1)?; // planes
    block.write_u16::<LittleEndian>(BITS_PER_PIXEL)?;
    block.write_u32::<LittleEndian>(BI_RGB)?;
    block.write_u32::<LittleEndian>(image_size)?;
    block.write_i32::<LittleEndian>(0)?; // horizontal pixels per meter
    block.write_i32::<LittleEndian>(0)?; // vertical pixels per meter
    block.write_u32::<LittleEndian>(0)?; // colors used
    block.write_u32::<LittleEndian>(0)?; // important colors
    Ok(())
}
