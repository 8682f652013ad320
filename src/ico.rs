//! Windows icon (.ico) container: an ICONDIR header, one ICONDIRENTRY per
//! image, then the image blocks in directory order.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Cursor, Write};
use std::ops::Range;

use log::info;

use crate::entry::IconEntry;
use crate::error::{Error, Result};
use crate::icontype::Container;

/// The length of the ICONDIR header, in bytes:
const ICONDIR_LENGTH: u32 = 6;

/// The length of one ICONDIRENTRY record, in bytes:
const ICONDIRENTRY_LENGTH: u32 = 16;

/// ICONDIR resource type for icons (2 would be a cursor).
const RESOURCE_TYPE_ICON: u16 = 1;

/// One ICONDIRENTRY record, as read back from an ICO file.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct IcoDirEntry {
    /// Width in pixels (a stored 0 is read as 256).
    pub width: u32,
    /// Height in pixels (a stored 0 is read as 256).
    pub height: u32,
    /// Palette size; 0 for true-color images.
    pub color_count: u8,
    /// Color planes.
    pub planes: u16,
    /// Bits per pixel.
    pub bit_depth: u16,
    /// Length of the image block, in bytes.
    pub size: u32,
    /// Absolute offset of the image block within the file.
    pub offset: u32,
}

impl IcoDirEntry {
    /// Returns the byte range of this entry's image block.
    pub fn range(&self) -> Range<usize> {
        let start = self.offset as usize;
        start..start + self.size as usize
    }

    /// Returns true if the entry's block in `file` is an embedded PNG rather
    /// than a DIB.
    pub fn is_png(&self, file: &[u8]) -> bool {
        file.get(self.range()).is_some_and(|block| block.starts_with(b"\x89PNG"))
    }
}

/// Packs the entries into a complete ICO file, smallest entry first.
pub fn pack_ico(entries: &[IconEntry]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    write_ico(entries, &mut output)?;
    info!("packed ICO with {} entries ({} bytes)", entries.len(), output.len());
    Ok(output)
}

/// Writes the entries as an ICO file, smallest entry first.  Entries of
/// equal size keep their relative order.
pub fn write_ico<W: Write>(entries: &[IconEntry], mut writer: W) -> Result<()> {
    let mut ordered: Vec<&IconEntry> = entries.iter().collect();
    ordered.sort_by_key(|entry| entry.size());

    let count = u16::try_from(ordered.len()).map_err(|_| {
        Error::PackingOverflow(format!("{} entries exceed the ICO limit",
                                       ordered.len()))
    })?;
    let mut offset = ICONDIR_LENGTH + ICONDIRENTRY_LENGTH * u32::from(count);
    let mut records = Vec::with_capacity(ordered.len());
    for &entry in &ordered {
        if entry.container() != Container::Ico {
            let msg = format!("{}px {} entry cannot go in an ICO file",
                              entry.size(),
                              entry.container());
            return Err(Error::UnsupportedResolution(msg));
        }
        let dimension = dimension_byte(entry.size())?;
        let size = u32::try_from(entry.data_len()).map_err(|_| {
            Error::PackingOverflow(format!("{}px entry is {} bytes",
                                           entry.size(),
                                           entry.data_len()))
        })?;
        records.push((dimension, entry, size, offset));
        offset = offset.checked_add(size).ok_or_else(|| {
            Error::PackingOverflow("ICO file exceeds 4 GiB".to_string())
        })?;
    }

    write_header_and_directory(&mut writer, count, &records).map_err(write_error)?;
    for entry in &ordered {
        writer.write_all(entry.data()).map_err(write_error)?;
    }
    Ok(())
}

fn write_header_and_directory<W: Write>(writer: &mut W,
                                        count: u16,
                                        records: &[(u8, &IconEntry, u32, u32)])
                                        -> io::Result<()> {
    writer.write_u16::<LittleEndian>(0)?;
    writer.write_u16::<LittleEndian>(RESOURCE_TYPE_ICON)?;
    writer.write_u16::<LittleEndian>(count)?;
    for &(dimension, entry, size, offset) in records {
        writer.write_u8(dimension)?;
        writer.write_u8(dimension)?;
        writer.write_u8(0)?; // no palette
        writer.write_u8(0)?; // reserved
        writer.write_u16::<LittleEndian>(entry.color_planes())?;
        writer.write_u16::<LittleEndian>(entry.bit_depth())?;
        writer.write_u32::<LittleEndian>(size)?;
        writer.write_u32::<LittleEndian>(offset)?;
    }
    Ok(())
}

fn write_error(error: io::Error) -> Error {
    Error::EncodingFailure(format!("failed to write ICO data: {}", error))
}

/// ICONDIRENTRY width/height byte: 1..=255 as-is, 256 stored as 0.
fn dimension_byte(size: u32) -> Result<u8> {
    match size {
        256 => Ok(0),
        1..=255 => Ok(size as u8),
        _ => {
            Err(Error::UnsupportedResolution(format!("{}px does not fit an ICO \
                                                      directory entry",
                                                     size)))
        }
    }
}

/// Reads the directory of an ICO file, checking that every image block lies
/// within the file.
pub fn read_ico_directory(file: &[u8]) -> io::Result<Vec<IcoDirEntry>> {
    let mut reader = Cursor::new(file);
    let reserved = reader.read_u16::<LittleEndian>()?;
    let resource_type = reader.read_u16::<LittleEndian>()?;
    if reserved != 0 || resource_type != RESOURCE_TYPE_ICON {
        return Err(io::Error::new(io::ErrorKind::InvalidData,
                                  "not an ico file (bad ICONDIR header)"));
    }
    let count = reader.read_u16::<LittleEndian>()?;
    let mut entries = Vec::with_capacity(usize::from(count));
    for _ in 0..count {
        let width = reader.read_u8()?;
        let height = reader.read_u8()?;
        let color_count = reader.read_u8()?;
        let _reserved = reader.read_u8()?;
        let entry = IcoDirEntry {
            width: if width == 0 { 256 } else { u32::from(width) },
            height: if height == 0 { 256 } else { u32::from(height) },
            color_count,
            planes: reader.read_u16::<LittleEndian>()?,
            bit_depth: reader.read_u16::<LittleEndian>()?,
            size: reader.read_u32::<LittleEndian>()?,
            offset: reader.read_u32::<LittleEndian>()?,
        };
        let end = u64::from(entry.offset) + u64::from(entry.size);
        if end > file.len() as u64 {
            let msg = format!("{}px entry runs past the end of the file",
                              entry.width);
            return Err(io::Error::new(io::ErrorKind::InvalidData, msg));
        }
        entries.push(entry);
    }
    Ok(entries)
}
