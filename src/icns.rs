use byteorder::{BigEndian, ByteOrder, ReadBytesExt, WriteBytesExt};
use std::io::{self, Error as IoError, ErrorKind, Read, Write};

use log::info;

use crate::entry::IconEntry;
use crate::error::{Error, Result};
use crate::icontype::{Container, OSType};

/// The first four bytes of an ICNS file:
const ICNS_MAGIC_LITERAL: &[u8; 4] = b"icns";

/// The length of the ICNS file header, in bytes:
const ICNS_HEADER_LENGTH: u32 = 8;

/// The length of a chunk header (type tag and length), in bytes:
const CHUNK_HEADER_LENGTH: u32 = 8;

/// One chunk of an ICNS file, as read back from the file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IcnsChunk {
    /// The chunk's type tag (e.g. `ic07`).
    pub ostype: OSType,
    /// The chunk's payload.
    pub data: Vec<u8>,
}

impl IcnsChunk {
    /// Returns the encoded length of the chunk, in bytes, including the
    /// length of the header.
    pub fn total_length(&self) -> u64 {
        u64::from(CHUNK_HEADER_LENGTH) + self.data.len() as u64
    }

    fn read<R: Read>(mut reader: R) -> io::Result<IcnsChunk> {
        let mut raw_ostype = [0u8; 4];
        reader.read_exact(&mut raw_ostype)?;
        let chunk_length = reader.read_u32::<BigEndian>()?;
        if chunk_length < CHUNK_HEADER_LENGTH {
            return Err(IoError::new(ErrorKind::InvalidData, "invalid chunk length"));
        }
        let data_length = chunk_length - CHUNK_HEADER_LENGTH;
        let mut data = Vec::new();
        reader.by_ref().take(u64::from(data_length)).read_to_end(&mut data)?;
        if data.len() != data_length as usize {
            return Err(IoError::new(ErrorKind::UnexpectedEof, "truncated chunk"));
        }
        Ok(IcnsChunk {
            ostype: OSType(raw_ostype),
            data,
        })
    }
}

/// Packs the entries into a complete ICNS file, smallest entry first.
///
/// The file length in the header is patched in once every chunk has been
/// written.
pub fn pack_icns(entries: &[IconEntry]) -> Result<Vec<u8>> {
    let mut ordered: Vec<&IconEntry> = entries.iter().collect();
    ordered.sort_by_key(|entry| entry.size());

    let mut output = Vec::new();
    output.extend_from_slice(ICNS_MAGIC_LITERAL);
    output.extend_from_slice(&[0u8; 4]);
    for entry in ordered {
        let ostype = match (entry.container(), entry.ostype()) {
            (Container::Icns, Some(ostype)) => ostype,
            _ => {
                let msg = format!("{}px {} entry cannot go in an ICNS file",
                                  entry.size(),
                                  entry.container());
                return Err(Error::UnsupportedResolution(msg));
            }
        };
        let chunk_length = u32::try_from(entry.data_len())
            .ok()
            .and_then(|len| len.checked_add(CHUNK_HEADER_LENGTH))
            .ok_or_else(|| {
                Error::PackingOverflow(format!("{} chunk is {} bytes",
                                               ostype,
                                               entry.data_len()))
            })?;
        write_chunk(&mut output, ostype, chunk_length, entry.data())
            .map_err(|err| Error::EncodingFailure(err.to_string()))?;
    }

    let total_length = u32::try_from(output.len()).map_err(|_| {
        Error::PackingOverflow(format!("ICNS file is {} bytes", output.len()))
    })?;
    BigEndian::write_u32(&mut output[4..8], total_length);
    info!("packed ICNS with {} chunks ({} bytes)", entries.len(), total_length);
    Ok(output)
}

fn write_chunk<W: Write>(mut writer: W,
                         ostype: OSType,
                         chunk_length: u32,
                         data: &[u8])
                         -> io::Result<()> {
    let OSType(ref raw_ostype) = ostype;
    writer.write_all(raw_ostype)?;
    writer.write_u32::<BigEndian>(chunk_length)?;
    writer.write_all(data)?;
    Ok(())
}

/// Reads the chunks of an ICNS file.
pub fn read_icns<R: Read>(mut reader: R) -> io::Result<Vec<IcnsChunk>> {
    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;
    if magic != *ICNS_MAGIC_LITERAL {
        let msg = "not an icns file (wrong magic literal)";
        return Err(IoError::new(ErrorKind::InvalidData, msg));
    }
    let file_length = u64::from(reader.read_u32::<BigEndian>()?);
    let mut file_position = u64::from(ICNS_HEADER_LENGTH);
    let mut chunks = Vec::new();
    while file_position < file_length {
        let chunk = IcnsChunk::read(reader.by_ref())?;
        file_position += chunk.total_length();
        chunks.push(chunk);
    }
    if file_position != file_length {
        let msg = "chunk lengths disagree with the file length";
        return Err(IoError::new(ErrorKind::InvalidData, msg));
    }
    Ok(chunks)
}
