use std::error::Error;
use std::fmt;

/// Alias for `Result<T, TocError>`
pub type Result<T> = std::result::Result<T, TocError>;

/// Errors that can occur while encoding or decoding TOC sectors
#[derive(Debug)]
pub enum TocError {
	/// The sector does not start with the expected signature
	SignatureMismatch {
		/// The signature that was expected
		expected: [u8; 8],
		/// The bytes that were found in its place
		found: [u8; 8],
	},
	/// The declared track count implies entries beyond the end of the buffer
	TruncatedToc,
	/// The track count is larger than an area can hold
	UnsupportedTrackCount(usize),
	/// A track is too long to express its minutes in a single byte
	DurationOverflow {
		/// The 1-based track number
		track: u8,
		/// The number of whole minutes
		minutes: u64,
	},
	/// A sector address or length does not fit in 32 bits
	SectorOverflow,
	/// A date component is out of range
	BadDate(&'static str),
	/// The buffer is not the size of a whole sector
	BadSectorSize(usize),
	/// Any std::io::Error
	Io(std::io::Error),
}

impl fmt::Display for TocError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			TocError::SignatureMismatch { expected, found } => write!(
				f,
				"Expected signature \"{}\", found \"{}\"",
				String::from_utf8_lossy(expected),
				String::from_utf8_lossy(found)
			),
			TocError::TruncatedToc => {
				write!(f, "The declared track count exceeds the size of the TOC")
			},
			TocError::UnsupportedTrackCount(count) => write!(
				f,
				"Track count {count} is not supported (expected at most {})",
				crate::MAX_TRACK_COUNT
			),
			TocError::DurationOverflow { track, minutes } => write!(
				f,
				"Track {track} is {minutes} minutes long, which does not fit in a byte"
			),
			TocError::SectorOverflow => write!(f, "Sector address does not fit in 32 bits"),
			TocError::BadDate(message) => write!(f, "Invalid disc date: {message}"),
			TocError::BadSectorSize(size) => {
				write!(f, "Expected a whole number of sectors, found {size} bytes")
			},
			TocError::Io(err) => write!(f, "{}", err),
		}
	}
}

impl Error for TocError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		match *self {
			TocError::Io(ref e) => Some(e),
			_ => None,
		}
	}
}

impl From<std::io::Error> for TocError {
	fn from(err: std::io::Error) -> TocError {
		TocError::Io(err)
	}
}
