//! Binary format definitions for Life Board recordings.

use std::io::{self, Read, Write};

/// Magic bytes identifying a Life Board recording.
pub const ANIMATION_MAGIC: &[u8; 4] = b"LIFA";

/// Current format version.
pub const ANIMATION_VERSION: u16 = 1;

/// Compression type for frame data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum CompressionType {
    /// No compression (raw bit-packed cells).
    #[default]
    None = 0,
    /// LZ4 fast compression.
    Lz4 = 1,
}

impl CompressionType {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(CompressionType::None),
            1 => Some(CompressionType::Lz4),
            _ => None,
        }
    }
}

/// Animation file header flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnimationFlags {
    /// Compression type (lower 4 bits).
    pub compression: CompressionType,
}

impl AnimationFlags {
    pub fn to_u16(self) -> u16 {
        self.compression as u16
    }

    pub fn from_u16(v: u16) -> io::Result<Self> {
        let compression = CompressionType::from_u8((v & 0x0F) as u8).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Unknown LIFA compression type: {}", v & 0x0F),
            )
        })?;
        Ok(Self { compression })
    }
}

/// File header for Life Board recordings.
#[derive(Debug, Clone)]
pub struct AnimationHeader {
    /// Board width.
    pub width: u32,
    /// Board height.
    pub height: u32,
    /// Total number of frames.
    pub frame_count: u64,
    /// Animation flags.
    pub flags: AnimationFlags,
}

impl AnimationHeader {
    /// Size of header in bytes.
    /// Magic(4) + Version(2) + Flags(2) + Width(4) + Height(4) +
    /// FrameCount(8) + Reserved(8) = 32
    pub const SIZE: usize = 32;

    /// Number of cells in one frame.
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Size of one uncompressed frame in bytes.
    pub fn frame_size(&self) -> usize {
        packed_len(self.cell_count())
    }

    /// Upper bound on the stored size of one frame, accounting for
    /// compression overhead.
    pub fn max_stored_frame_size(&self) -> usize {
        let raw = self.frame_size();
        match self.flags.compression {
            CompressionType::None => raw,
            // 4-byte size prefix plus worst-case LZ4 expansion
            CompressionType::Lz4 => 4 + 21 + raw + raw / 10,
        }
    }

    /// Write header to output.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(ANIMATION_MAGIC)?;
        w.write_all(&ANIMATION_VERSION.to_le_bytes())?;
        w.write_all(&self.flags.to_u16().to_le_bytes())?;
        w.write_all(&self.width.to_le_bytes())?;
        w.write_all(&self.height.to_le_bytes())?;
        w.write_all(&self.frame_count.to_le_bytes())?;
        // Reserved bytes
        w.write_all(&[0u8; 8])?;
        Ok(())
    }

    /// Read header from input.
    pub fn read_from<R: Read>(r: &mut R) -> io::Result<Self> {
        let mut magic = [0u8; 4];
        r.read_exact(&mut magic)?;
        if &magic != ANIMATION_MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Invalid LIFA magic bytes",
            ));
        }

        let mut buf2 = [0u8; 2];
        let mut buf4 = [0u8; 4];
        let mut buf8 = [0u8; 8];

        r.read_exact(&mut buf2)?;
        let version = u16::from_le_bytes(buf2);
        if version != ANIMATION_VERSION {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Unsupported LIFA version: {}", version),
            ));
        }

        r.read_exact(&mut buf2)?;
        let flags = AnimationFlags::from_u16(u16::from_le_bytes(buf2))?;

        r.read_exact(&mut buf4)?;
        let width = u32::from_le_bytes(buf4);

        r.read_exact(&mut buf4)?;
        let height = u32::from_le_bytes(buf4);

        r.read_exact(&mut buf8)?;
        let frame_count = u64::from_le_bytes(buf8);

        // Skip reserved bytes
        r.read_exact(&mut buf8)?;

        Ok(Self {
            width,
            height,
            frame_count,
            flags,
        })
    }
}

/// Index entry for a single frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameIndex {
    /// Byte offset from start of file.
    pub offset: u64,
    /// Stored size in bytes (equals uncompressed if no compression).
    pub size: u64,
}

impl FrameIndex {
    /// Size of one index entry in bytes.
    pub const SIZE: usize = 16;

    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&self.offset.to_le_bytes())?;
        w.write_all(&self.size.to_le_bytes())?;
        Ok(())
    }

    pub fn read_from<R: Read>(r: &mut R) -> io::Result<Self> {
        let mut buf8 = [0u8; 8];

        r.read_exact(&mut buf8)?;
        let offset = u64::from_le_bytes(buf8);

        r.read_exact(&mut buf8)?;
        let size = u64::from_le_bytes(buf8);

        Ok(Self { offset, size })
    }
}

/// Bytes needed to hold `cells` packed cells.
#[inline]
pub fn packed_len(cells: usize) -> usize {
    cells.div_ceil(8)
}

/// Pack cells into bytes, eight per byte, least significant bit first.
pub fn encode_frame(cells: &[bool]) -> Vec<u8> {
    let mut bytes = vec![0u8; packed_len(cells.len())];
    for (i, _) in cells.iter().enumerate().filter(|(_, alive)| **alive) {
        bytes[i / 8] |= 1 << (i % 8);
    }
    bytes
}

/// Unpack bytes produced by [`encode_frame`] into `output`.
pub fn decode_frame(bytes: &[u8], output: &mut [bool]) -> io::Result<()> {
    if bytes.len() != packed_len(output.len()) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "Frame size mismatch: {} bytes vs {} cells",
                bytes.len(),
                output.len()
            ),
        ));
    }
    for (i, cell) in output.iter_mut().enumerate() {
        *cell = bytes[i / 8] & (1 << (i % 8)) != 0;
    }
    Ok(())
}

/// Compress data using LZ4.
#[cfg(feature = "lz4")]
pub fn compress_lz4(data: &[u8]) -> Vec<u8> {
    lz4_flex::compress_prepend_size(data)
}

/// Decompress LZ4 data.
#[cfg(feature = "lz4")]
pub fn decompress_lz4(data: &[u8]) -> io::Result<Vec<u8>> {
    lz4_flex::decompress_size_prepended(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Fallback when LZ4 is not available.
#[cfg(not(feature = "lz4"))]
pub fn compress_lz4(data: &[u8]) -> Vec<u8> {
    data.to_vec()
}

#[cfg(not(feature = "lz4"))]
pub fn decompress_lz4(_data: &[u8]) -> io::Result<Vec<u8>> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "LZ4-compressed recording requires the `lz4` feature",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_header_roundtrip() {
        let header = AnimationHeader {
            width: 64,
            height: 48,
            frame_count: 1000,
            flags: AnimationFlags {
                compression: CompressionType::Lz4,
            },
        };

        let mut buf = Vec::new();
        header.write_to(&mut buf).unwrap();
        assert_eq!(buf.len(), AnimationHeader::SIZE);

        let mut cursor = Cursor::new(&buf);
        let decoded = AnimationHeader::read_from(&mut cursor).unwrap();

        assert_eq!(decoded.width, 64);
        assert_eq!(decoded.height, 48);
        assert_eq!(decoded.frame_count, 1000);
        assert_eq!(decoded.flags.compression, CompressionType::Lz4);
    }

    #[test]
    fn test_header_bad_magic() {
        let mut buf = vec![0u8; AnimationHeader::SIZE];
        buf[..4].copy_from_slice(b"FLWA");
        let err = AnimationHeader::read_from(&mut Cursor::new(&buf)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_max_stored_frame_size() {
        let mut header = AnimationHeader {
            width: 10,
            height: 10,
            frame_count: 0,
            flags: AnimationFlags::default(),
        };
        assert_eq!(header.max_stored_frame_size(), 13);

        header.flags.compression = CompressionType::Lz4;
        assert!(header.max_stored_frame_size() > 13);
    }

    #[test]
    fn test_frame_packing() {
        let cells = [true, false, false, false, false, false, false, false, true, true];
        let encoded = encode_frame(&cells);
        assert_eq!(encoded, vec![0b0000_0001, 0b0000_0011]);

        let mut decoded = [false; 10];
        decode_frame(&encoded, &mut decoded).unwrap();
        assert_eq!(decoded, cells);
    }

    #[test]
    fn test_frame_size_mismatch() {
        let mut output = [false; 17];
        let err = decode_frame(&[0u8; 2], &mut output).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_frame_index_roundtrip() {
        let index = FrameIndex {
            offset: 12345678,
            size: 8192,
        };

        let mut buf = Vec::new();
        index.write_to(&mut buf).unwrap();
        assert_eq!(buf.len(), FrameIndex::SIZE);

        let decoded = FrameIndex::read_from(&mut Cursor::new(&buf)).unwrap();
        assert_eq!(decoded.offset, 12345678);
        assert_eq!(decoded.size, 8192);
    }
}
