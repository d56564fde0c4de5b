//! A simple SACD table of contents codec
//!
//! Encodes and decodes the two fixed-layout structures every SACD image carries:
//!
//! * The Master TOC ([`MasterToc`]), a single 2048 byte sector describing the album and
//!   pointing at the program area.
//! * The Area TOC ([`AreaToc`]), which lists the sector span and duration of every track
//!   in one program area (2-channel or multichannel).
//!
//! All multi-byte integers are big-endian.

mod area;
mod date;
mod error;
mod master;

pub use area::{AreaKind, AreaToc, OverflowPolicy, TrackEntry, TrackSpan};
pub use date::DiscDate;
pub use error::{Result, TocError};
pub use master::{AreaPointer, MasterToc};

/// The size of a single sector
pub const SECTOR_SIZE: usize = 2048;

/// The major version written to both TOC structures
pub const VERSION_MAJOR: u8 = 1;
/// The minor version written to both TOC structures
pub const VERSION_MINOR: u8 = 20;

/// The first sector of the Master TOC
pub const MASTER_TOC_SECTOR: u32 = 510;
/// The number of identical Master TOC copies
pub const MASTER_TOC_COPIES: u32 = 3;
/// The first sector of the primary Area TOC
pub const AREA_TOC_SECTOR: u32 = 540;
/// The number of identical Area TOC copies
pub const AREA_TOC_COPIES: u32 = 2;
/// The distance, in sectors, from the Area TOC to the first track
pub const FIRST_TRACK_OFFSET: u32 = 20;
/// The maximum number of tracks in a single area
pub const MAX_TRACK_COUNT: usize = 20;

/// The Area TOC size historically written into the Master TOC, regardless of the real size
///
/// [`MasterToc`]s built by this crate record the real size instead, see [`AreaPointer::new`].
pub const LEGACY_AREA_TOC_SECTORS: u16 = 10;

/// The number of sectors needed to hold `byte_len` bytes
///
/// This is the only rounding used when laying out an image. Track lengths in an [`AreaToc`]
/// and the padding applied to audio payloads must agree, or the start sectors will drift.
///
/// # Examples
///
/// ```rust
/// use sacd_toc::sectors_for;
///
/// assert_eq!(sectors_for(0), 0);
/// assert_eq!(sectors_for(1), 1);
/// assert_eq!(sectors_for(2048), 1);
/// assert_eq!(sectors_for(2049), 2);
/// ```
pub fn sectors_for(byte_len: u64) -> u64 {
	byte_len.div_ceil(SECTOR_SIZE as u64)
}

/// Zero-pad `buf` up to the next sector boundary
pub fn pad_to_sector(buf: &mut Vec<u8>) {
	let remainder = buf.len() % SECTOR_SIZE;
	if remainder != 0 {
		buf.resize(buf.len() + (SECTOR_SIZE - remainder), 0);
	}
}
