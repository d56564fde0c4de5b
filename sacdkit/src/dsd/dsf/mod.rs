//! DSF (DSD Stream File)
//!
//! A fixed 28 byte `DSD ` header, a 52 byte `fmt ` chunk, and a `data` chunk, all little-endian.

pub(crate) mod read;

pub(crate) const DSF_MAGIC: &[u8; 4] = b"DSD ";
pub(crate) const FMT_MAGIC: &[u8; 4] = b"fmt ";
pub(crate) const DATA_MAGIC: &[u8; 4] = b"data";

pub(crate) const HEADER_SIZE: u64 = 28;
pub(crate) const FMT_CHUNK_SIZE: u64 = 52;
pub(crate) const DATA_CHUNK_OFFSET: u64 = HEADER_SIZE + FMT_CHUNK_SIZE;
/// The end of the sample count, the last `fmt ` field needed to describe a track
pub(crate) const FMT_FIELDS_END: u64 = HEADER_SIZE + 44;
pub(crate) const DATA_HEADER_SIZE: u64 = 12;
