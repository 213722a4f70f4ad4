//! Animation player for reading back recorded generations.

use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use super::format::{AnimationHeader, CompressionType, FrameIndex, decode_frame, decompress_lz4};
use crate::compute::LifeGrid;

/// Animation player for reading recorded generations.
///
/// Usage:
/// ```ignore
/// let mut player = AnimationPlayer::open("run.lifa")?;
/// println!("Recording has {} frames", player.frame_count());
///
/// let grid = player.read_frame(10)?;
///
/// for frame in player.frames() {
///     let grid = frame?;
/// }
/// ```
pub struct AnimationPlayer {
    reader: BufReader<File>,
    header: AnimationHeader,
    frame_indices: Vec<FrameIndex>,
}

impl AnimationPlayer {
    /// Open a recording for playback.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);

        let header = AnimationHeader::read_from(&mut reader)?;

        // Index table sits at the end of the file
        let index_size = header
            .frame_count
            .checked_mul(FrameIndex::SIZE as u64)
            .ok_or_else(|| truncated("frame count overflows"))?;
        let file_len = reader.seek(SeekFrom::End(0))?;
        let index_start = file_len
            .checked_sub(index_size)
            .filter(|&start| start >= AnimationHeader::SIZE as u64)
            .ok_or_else(|| truncated("index table missing"))?;

        reader.seek(SeekFrom::Start(index_start))?;

        let mut frame_indices = Vec::with_capacity(header.frame_count as usize);
        for _ in 0..header.frame_count {
            frame_indices.push(FrameIndex::read_from(&mut reader)?);
        }

        Ok(Self {
            reader,
            header,
            frame_indices,
        })
    }

    /// Get recording header.
    pub fn header(&self) -> &AnimationHeader {
        &self.header
    }

    /// Get total number of frames.
    pub fn frame_count(&self) -> u64 {
        self.header.frame_count
    }

    /// Board dimensions as (width, height).
    pub fn dimensions(&self) -> (usize, usize) {
        (self.header.width as usize, self.header.height as usize)
    }

    /// Read a specific frame by index.
    pub fn read_frame(&mut self, frame_index: u64) -> io::Result<LifeGrid> {
        if frame_index >= self.header.frame_count {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "Frame index {} out of range ({} frames)",
                    frame_index, self.header.frame_count
                ),
            ));
        }

        let index = self.frame_indices[frame_index as usize];
        let max_size = self.header.max_stored_frame_size();
        if index.size > max_size as u64 {
            return Err(truncated(&format!(
                "frame {} claims {} bytes, at most {} expected",
                frame_index, index.size, max_size
            )));
        }

        self.reader.seek(SeekFrom::Start(index.offset))?;
        let mut data = vec![0u8; index.size as usize];
        self.reader.read_exact(&mut data)?;

        let raw = match self.header.flags.compression {
            CompressionType::None => data,
            CompressionType::Lz4 => {
                // The size prefix drives the decompression allocation
                let expected = self.header.frame_size();
                match data.first_chunk::<4>() {
                    Some(prefix) if u32::from_le_bytes(*prefix) as usize == expected => {}
                    _ => return Err(truncated("compressed frame size mismatch")),
                }
                decompress_lz4(&data)?
            }
        };

        let (width, height) = self.dimensions();
        if width == 0 || height == 0 {
            return Ok(LifeGrid::new());
        }

        let mut cells = vec![false; self.header.cell_count()];
        decode_frame(&raw, &mut cells)?;

        let rows: Vec<&[bool]> = cells.chunks(width).collect();
        LifeGrid::from_rows(&rows).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Create an iterator over all frames.
    pub fn frames(&mut self) -> FrameIterator<'_> {
        FrameIterator {
            player: self,
            current: 0,
        }
    }
}

fn truncated(reason: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("Corrupt LIFA recording: {}", reason),
    )
}

/// Iterator over recorded frames.
pub struct FrameIterator<'a> {
    player: &'a mut AnimationPlayer,
    current: u64,
}

impl<'a> Iterator for FrameIterator<'a> {
    type Item = io::Result<LifeGrid>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current >= self.player.frame_count() {
            return None;
        }

        let result = self.player.read_frame(self.current);
        self.current += 1;
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.player.frame_count() - self.current) as usize;
        (remaining, Some(remaining))
    }
}

impl<'a> ExactSizeIterator for FrameIterator<'a> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{AnimationRecorder, RecorderConfig};
    use crate::schema::{Pattern, Seed};
    use tempfile::tempdir;

    fn record(path: &Path, grids: &[LifeGrid], config: RecorderConfig) {
        let (w, h) = (grids[0].width(), grids[0].height());
        let mut recorder = AnimationRecorder::new(path, w, h, config).unwrap();
        for grid in grids {
            recorder.record_frame(grid).unwrap();
        }
        recorder.finalize().unwrap();
    }

    fn generations(count: usize) -> Vec<LifeGrid> {
        let mut grid = Seed {
            pattern: Pattern::Random {
                density: 0.35,
                seed: 42,
            },
        }
        .build(13, 7)
        .unwrap();

        let mut grids = Vec::with_capacity(count);
        for _ in 0..count {
            grids.push(grid.clone());
            grid.step();
        }
        grids
    }

    #[test]
    fn test_player_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("roundtrip.lifa");

        let grids = generations(5);
        record(&path, &grids, RecorderConfig::default());

        let mut player = AnimationPlayer::open(&path).unwrap();
        assert_eq!(player.frame_count(), 5);
        assert_eq!(player.dimensions(), (13, 7));

        for (i, grid) in grids.iter().enumerate() {
            assert_eq!(&player.read_frame(i as u64).unwrap(), grid, "frame {}", i);
        }
    }

    #[test]
    fn test_player_out_of_range() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("range.lifa");
        record(&path, &generations(2), RecorderConfig::default());

        let mut player = AnimationPlayer::open(&path).unwrap();
        let err = player.read_frame(2).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_player_iterator() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("iter.lifa");

        let grids = generations(3);
        record(&path, &grids, RecorderConfig::default());

        let mut player = AnimationPlayer::open(&path).unwrap();
        let frames = player.frames();
        assert_eq!(frames.len(), 3);

        let loaded: Vec<LifeGrid> = frames.collect::<io::Result<_>>().unwrap();
        assert_eq!(loaded, grids);
    }

    #[test]
    fn test_player_rejects_oversized_frame_index() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("index.lifa");
        record(&path, &generations(2), RecorderConfig::default());

        // Corrupt the size field of the last index entry
        let mut bytes = std::fs::read(&path).unwrap();
        let size_at = bytes.len() - 8;
        bytes[size_at..].copy_from_slice(&u64::MAX.to_le_bytes());
        std::fs::write(&path, &bytes).unwrap();

        let mut player = AnimationPlayer::open(&path).unwrap();
        assert!(player.read_frame(0).is_ok());
        let err = player.read_frame(1).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_player_empty_board_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.lifa");

        let empty = LifeGrid::dead(0, 3).unwrap();
        record(&path, &[empty.clone()], RecorderConfig::default());

        let mut player = AnimationPlayer::open(&path).unwrap();
        assert_eq!(player.dimensions(), (0, 0));
        assert_eq!(player.read_frame(0).unwrap(), empty);
    }

    #[test]
    fn test_player_rejects_truncated_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("short.lifa");
        record(&path, &generations(4), RecorderConfig::default());

        let bytes = std::fs::read(&path).unwrap();
        std::fs::write(&path, &bytes[..AnimationHeader::SIZE + 4]).unwrap();

        assert!(AnimationPlayer::open(&path).is_err());
    }

    #[cfg(feature = "lz4")]
    #[test]
    fn test_player_lz4_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lz4.lifa");

        let grids = generations(4);
        let config = RecorderConfig {
            compression: CompressionType::Lz4,
            ..Default::default()
        };
        record(&path, &grids, config);

        let mut player = AnimationPlayer::open(&path).unwrap();
        assert_eq!(player.header().flags.compression, CompressionType::Lz4);
        for (i, grid) in grids.iter().enumerate() {
            assert_eq!(&player.read_frame(i as u64).unwrap(), grid);
        }
    }
}
