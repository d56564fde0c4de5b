//! DFF (DSDIFF)
//!
//! An IFF-style `FRM8` container. Every chunk is a 4 byte ID, a 64-bit big-endian size, and
//! a payload padded to an even length. The sound properties live in the `SND ` form of a `PROP`
//! chunk, and the audio in a top level `DSD ` (or `DST `) chunk.

pub(crate) mod read;

pub(crate) const FRM8_MAGIC: &[u8; 4] = b"FRM8";
pub(crate) const DSD_FORM_TYPE: &[u8; 4] = b"DSD ";
pub(crate) const FORM_HEADER_SIZE: u64 = 16;
pub(crate) const CHUNK_HEADER_SIZE: u64 = 12;

pub(crate) const DSD_CHUNK: [u8; 4] = *b"DSD ";
pub(crate) const DST_CHUNK: [u8; 4] = *b"DST ";

/// The header allowance subtracted by [`DffSampleCount::FileSizeEstimate`](crate::config::DffSampleCount::FileSizeEstimate)
pub(crate) const ESTIMATE_HEADER_ALLOWANCE: u64 = 1024;
