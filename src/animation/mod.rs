//! Generation recording and playback for Life Board runs.
//!
//! # File Format
//!
//! The `.lifa` (Life Animation) format stores one frame per recorded
//! generation:
//!
//! ```text
//! Header (32 bytes):
//!   Magic: "LIFA" (4 bytes)
//!   Version: u16
//!   Flags: u16 (compression)
//!   Width: u32
//!   Height: u32
//!   Frame count: u64
//!   Reserved: 8 bytes
//!
//! Frame data (variable):
//!   Cells row-major, 8 per byte, LSB first
//!   Optionally LZ4 compressed
//!
//! Frame index table (frame_count * 16 bytes):
//!   Offset: u64
//!   Stored size: u64
//! ```
//!
//! All integers are little-endian.

mod format;
mod player;
mod recorder;

pub use format::{
    ANIMATION_MAGIC, ANIMATION_VERSION, AnimationFlags, AnimationHeader, CompressionType,
    FrameIndex,
};
pub use player::{AnimationPlayer, FrameIterator};
pub use recorder::{AnimationRecorder, AnimationStats, RecorderConfig};
