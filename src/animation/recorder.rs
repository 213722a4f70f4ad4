//! Animation recorder for capturing generations.

use std::fs::File;
use std::io::{self, BufWriter, Seek, SeekFrom, Write};
use std::path::Path;

use super::format::{
    AnimationFlags, AnimationHeader, CompressionType, FrameIndex, compress_lz4, encode_frame,
};
use crate::compute::LifeGrid;
use crate::schema::RecordingConfig;

/// Configuration for animation recording.
#[derive(Debug, Clone)]
pub struct RecorderConfig {
    /// Compression type to use. Falls back to none without the `lz4` feature.
    pub compression: CompressionType,
    /// Record every Nth frame (1 = every frame).
    pub frame_skip: u32,
    /// Maximum frames to record (0 = unlimited).
    pub max_frames: u64,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            compression: CompressionType::None,
            frame_skip: 1,
            max_frames: 0,
        }
    }
}

impl From<&RecordingConfig> for RecorderConfig {
    fn from(config: &RecordingConfig) -> Self {
        Self {
            compression: if config.compress {
                CompressionType::Lz4
            } else {
                CompressionType::None
            },
            frame_skip: config.frame_skip,
            max_frames: config.max_frames,
        }
    }
}

/// Animation recorder that captures generations to a file.
///
/// Usage:
/// ```ignore
/// let mut recorder = AnimationRecorder::new("run.lifa", 64, 48, Default::default())?;
/// for _ in 0..100 {
///     grid.step();
///     recorder.record_frame(&grid)?;
/// }
/// recorder.finalize()?;
/// ```
pub struct AnimationRecorder {
    writer: BufWriter<File>,
    header: AnimationHeader,
    frame_indices: Vec<FrameIndex>,
    config: RecorderConfig,
    frames_written: u64,
    step_counter: u32,
}

impl AnimationRecorder {
    /// Create a new recorder for boards of `width` x `height`.
    pub fn new<P: AsRef<Path>>(
        path: P,
        width: usize,
        height: usize,
        config: RecorderConfig,
    ) -> io::Result<Self> {
        let too_large =
            || io::Error::new(io::ErrorKind::InvalidInput, "Board too large to record");
        let width = u32::try_from(width).map_err(|_| too_large())?;
        let height = u32::try_from(height).map_err(|_| too_large())?;

        let compression = if cfg!(feature = "lz4") {
            config.compression
        } else {
            CompressionType::None
        };

        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        let header = AnimationHeader {
            width,
            height,
            frame_count: 0, // Updated on finalize
            flags: AnimationFlags { compression },
        };

        // Placeholder header; indices go at the end once the frame count is known
        header.write_to(&mut writer)?;

        Ok(Self {
            writer,
            header,
            frame_indices: Vec::new(),
            config,
            frames_written: 0,
            step_counter: 0,
        })
    }

    /// Record a generation.
    ///
    /// Returns true if the frame was actually recorded (may skip frames based on config).
    pub fn record_frame(&mut self, grid: &LifeGrid) -> io::Result<bool> {
        if grid.width() != self.header.width as usize
            || grid.height() != self.header.height as usize
        {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "Board is {}x{}, recording expects {}x{}",
                    grid.width(),
                    grid.height(),
                    self.header.width,
                    self.header.height
                ),
            ));
        }

        self.step_counter += 1;
        if self.step_counter < self.config.frame_skip {
            return Ok(false);
        }
        self.step_counter = 0;

        if self.config.max_frames > 0 && self.frames_written >= self.config.max_frames {
            return Ok(false);
        }

        let offset = self.writer.stream_position()?;

        let raw = encode_frame(grid.cells());
        let data = match self.header.flags.compression {
            CompressionType::None => raw,
            CompressionType::Lz4 => compress_lz4(&raw),
        };

        self.writer.write_all(&data)?;
        self.frame_indices.push(FrameIndex {
            offset,
            size: data.len() as u64,
        });
        self.frames_written += 1;

        Ok(true)
    }

    /// Finalize the recording.
    ///
    /// Writes frame index table and updates header with final frame count.
    pub fn finalize(mut self) -> io::Result<AnimationStats> {
        let index_offset = self.writer.stream_position()?;
        for index in &self.frame_indices {
            index.write_to(&mut self.writer)?;
        }

        self.header.frame_count = self.frames_written;
        self.writer.seek(SeekFrom::Start(0))?;
        self.header.write_to(&mut self.writer)?;
        self.writer.flush()?;

        let stats = AnimationStats {
            frame_count: self.frames_written,
            total_bytes: index_offset + self.frame_indices.len() as u64 * FrameIndex::SIZE as u64,
            average_frame_size: if self.frames_written > 0 {
                index_offset.saturating_sub(AnimationHeader::SIZE as u64) / self.frames_written
            } else {
                0
            },
            compression: self.header.flags.compression,
        };
        log::debug!("Recording finalized: {}", stats);

        Ok(stats)
    }

    /// Get number of frames recorded so far.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }
}

/// Statistics from recording session.
#[derive(Debug, Clone)]
pub struct AnimationStats {
    /// Total frames recorded.
    pub frame_count: u64,
    /// Total file size in bytes.
    pub total_bytes: u64,
    /// Average stored frame size.
    pub average_frame_size: u64,
    /// Compression used.
    pub compression: CompressionType,
}

impl std::fmt::Display for AnimationStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} frames, {} bytes total, {} bytes/frame avg ({:?} compression)",
            self.frame_count, self.total_bytes, self.average_frame_size, self.compression
        )
    }
}
