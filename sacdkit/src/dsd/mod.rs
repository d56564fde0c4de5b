//! DSD (Direct Stream Digital) container support
//!
//! Supports:
//! - DSF (DSD Stream File) - Sony's flat, little-endian format
//! - DFF (DSDIFF) - Philips' IFF-style format with 64-bit big-endian chunk sizes
//!
//! Only the information needed to place a file on a disc is decoded, tags are ignored.

pub(crate) mod dff;
pub(crate) mod dsf;
pub(crate) mod track;

pub use track::{ChannelLayout, DsdTrack};

use crate::config::ParseOptions;
use crate::error::Result;
use crate::macros::err;

use std::ffi::OsStr;
use std::ops::Range;
use std::path::Path;

/// DSD64 through DSD512
pub(crate) const STANDARD_SAMPLE_RATES: [u32; 4] = [2_822_400, 5_644_800, 11_289_600, 22_579_200];

/// The DSD container formats
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum DsdFormat {
	/// DSF (DSD Stream File)
	Dsf,
	/// DFF (DSDIFF)
	Dff,
}

impl DsdFormat {
	/// Attempts to determine a [`DsdFormat`] from an extension
	///
	/// # Examples
	///
	/// ```rust
	/// use sacdkit::dsd::DsdFormat;
	///
	/// let extension = "DFF";
	/// assert_eq!(DsdFormat::from_ext(extension), Some(DsdFormat::Dff));
	/// ```
	pub fn from_ext<E>(ext: E) -> Option<Self>
	where
		E: AsRef<OsStr>,
	{
		let ext = ext.as_ref().to_str()?.to_ascii_lowercase();

		match ext.as_str() {
			"dsf" => Some(Self::Dsf),
			"dff" => Some(Self::Dff),
			_ => None,
		}
	}

	/// Attempts to determine a [`DsdFormat`] from a path
	///
	/// # Examples
	///
	/// ```rust
	/// use sacdkit::dsd::DsdFormat;
	/// use std::path::Path;
	///
	/// let path = Path::new("path/to/my.dsf");
	/// assert_eq!(DsdFormat::from_path(path), Some(DsdFormat::Dsf));
	/// ```
	pub fn from_path<P>(path: P) -> Option<Self>
	where
		P: AsRef<Path>,
	{
		let ext = path.as_ref().extension();
		ext.and_then(Self::from_ext)
	}

	/// Attempts to extract a [`DsdFormat`] from the start of a buffer
	///
	/// # Examples
	///
	/// ```rust
	/// use sacdkit::dsd::DsdFormat;
	///
	/// assert_eq!(DsdFormat::from_buffer(b"FRM8"), Some(DsdFormat::Dff));
	/// assert_eq!(DsdFormat::from_buffer(b"RIFF"), None);
	/// ```
	pub fn from_buffer(buf: &[u8]) -> Option<Self> {
		match buf.get(..4)? {
			magic if magic == dsf::DSF_MAGIC => Some(Self::Dsf),
			magic if magic == dff::FRM8_MAGIC => Some(Self::Dff),
			_ => None,
		}
	}
}

/// Decode the header of a DSD container
///
/// If `format` is `None`, it will be guessed from the content of `data`.
///
/// # Errors
///
/// * The format could not be determined
/// * The container is malformed, see [`ParsingMode`](crate::config::ParsingMode)
/// * A DFF file has no audio chunk
///
/// # Examples
///
/// ```rust,no_run
/// use sacdkit::config::ParseOptions;
/// use sacdkit::dsd;
///
/// # fn main() -> sacdkit::error::Result<()> {
/// let data = std::fs::read("track01.dsf")?;
/// let track = dsd::parse(&data, None, ParseOptions::new())?;
///
/// println!("{} Hz, {:?}", track.sample_rate(), track.duration());
/// # Ok(()) }
/// ```
pub fn parse(data: &[u8], format: Option<DsdFormat>, parse_options: ParseOptions) -> Result<DsdTrack> {
	let Some(format) = format.or_else(|| DsdFormat::from_buffer(data)) else {
		err!(UnknownFormat);
	};

	match format {
		DsdFormat::Dsf => dsf::read::read_properties(data, parse_options),
		DsdFormat::Dff => dff::read::read_properties(data, parse_options),
	}
}

/// Get the raw audio payload of a DSD container
///
/// For DSF, see [`DsfAudioStart`](crate::config::DsfAudioStart). For DFF, this is the content
/// of the `DSD ` chunk, or the `DST ` chunk for DST encoded files.
///
/// # Errors
///
/// * The container is malformed
/// * A DFF file has no audio chunk ([`ErrorKind::ChunkNotFound`](crate::error::ErrorKind::ChunkNotFound))
///
/// # Examples
///
/// ```rust,no_run
/// use sacdkit::config::ParseOptions;
/// use sacdkit::dsd::{self, DsdFormat};
///
/// # fn main() -> sacdkit::error::Result<()> {
/// let data = std::fs::read("track01.dff")?;
/// let audio = dsd::extract_raw_audio(&data, DsdFormat::Dff, ParseOptions::new())?;
/// # Ok(()) }
/// ```
pub fn extract_raw_audio(
	data: &[u8],
	format: DsdFormat,
	parse_options: ParseOptions,
) -> Result<&[u8]> {
	let range = audio_range(data, format, parse_options)?;
	Ok(&data[range])
}

pub(crate) fn audio_range(
	data: &[u8],
	format: DsdFormat,
	parse_options: ParseOptions,
) -> Result<Range<usize>> {
	match format {
		DsdFormat::Dsf => dsf::read::audio_range(data, parse_options),
		DsdFormat::Dff => dff::read::scan(data, parse_options)?.audio_range(),
	}
}
