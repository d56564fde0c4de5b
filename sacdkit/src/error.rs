//! Contains the errors that can arise within sacdkit
//!
//! The primary error is [`SacdError`]. The type of error is determined by [`ErrorKind`],
//! which can be extended at any time.

use crate::dsd::DsdFormat;

use std::collections::TryReserveError;
use std::fmt::{Debug, Display, Formatter};

use sacd_toc::TocError;

/// Alias for `Result<T, SacdError>`
pub type Result<T> = std::result::Result<T, SacdError>;

/// The types of errors that can occur
#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
	// Container related errors
	/// Unable to guess the format
	UnknownFormat,
	/// A container signature or required field is missing, or the file is too short
	MalformedHeader(FileDecodingError),
	/// A required DFF chunk does not exist
	ChunkNotFound([u8; 4]),

	// TOC related errors
	/// Errors that arise while encoding or decoding TOC sectors
	///
	/// This covers signature mismatches, truncated Area TOCs, implausible track counts,
	/// and durations that do not fit the on-disc format.
	Toc(TocError),

	// Build related errors
	/// Attempted to build an image with no tracks
	EmptyTrackList,
	/// A track would produce a non-functional TOC entry (ex. a 0:00 duration)
	///
	/// Contains the 1-based track number and a description.
	DegenerateTrack(usize, &'static str),
	/// The number of audio payloads does not match the number of tracks
	PayloadMismatch {
		/// The number of tracks provided
		tracks: usize,
		/// The number of payloads provided
		payloads: usize,
	},
	/// An audio payload is larger than its track's declared sector length
	SizeMismatch,

	// Inspection related errors
	/// The requested sector lies beyond the end of the image
	SectorOutOfRange(u64),

	// Conversions for external errors
	/// Attempting to allocate an abnormally large amount of data
	TooMuchData,
	/// Represents all cases of [`std::io::Error`].
	Io(std::io::Error),
	/// Failure to allocate enough memory
	Alloc(TryReserveError),
}

/// An error that arises while decoding a DSD container
pub struct FileDecodingError {
	format: Option<DsdFormat>,
	description: &'static str,
}

impl FileDecodingError {
	/// Create a `FileDecodingError` from a [`DsdFormat`] and description
	///
	/// # Examples
	///
	/// ```rust
	/// use sacdkit::dsd::DsdFormat;
	/// use sacdkit::error::FileDecodingError;
	///
	/// let dsf_error = FileDecodingError::new(DsdFormat::Dsf, "Missing fmt chunk");
	/// assert_eq!(dsf_error.format(), Some(DsdFormat::Dsf));
	/// ```
	#[must_use]
	pub const fn new(format: DsdFormat, description: &'static str) -> Self {
		Self {
			format: Some(format),
			description,
		}
	}

	/// Create a `FileDecodingError` without binding it to a [`DsdFormat`]
	pub fn from_description(description: &'static str) -> Self {
		Self {
			format: None,
			description,
		}
	}

	/// Returns the associated [`DsdFormat`], if one exists
	pub fn format(&self) -> Option<DsdFormat> {
		self.format
	}

	/// Returns the error description
	pub fn description(&self) -> &str {
		self.description
	}
}

impl Debug for FileDecodingError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		if let Some(format) = self.format {
			write!(f, "{:?}: {:?}", format, self.description)
		} else {
			write!(f, "{:?}", self.description)
		}
	}
}

impl Display for FileDecodingError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		if let Some(format) = self.format {
			write!(f, "{:?}: {}", format, self.description)
		} else {
			write!(f, "{}", self.description)
		}
	}
}

/// Errors that could occur within sacdkit
pub struct SacdError {
	pub(crate) kind: ErrorKind,
}

impl SacdError {
	/// Create a `SacdError` from an [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use sacdkit::error::{ErrorKind, SacdError};
	///
	/// let unknown_format = SacdError::new(ErrorKind::UnknownFormat);
	/// ```
	#[must_use]
	pub const fn new(kind: ErrorKind) -> Self {
		Self { kind }
	}

	/// Returns the [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use sacdkit::error::{ErrorKind, SacdError};
	///
	/// let empty = SacdError::new(ErrorKind::EmptyTrackList);
	/// if let ErrorKind::EmptyTrackList = empty.kind() {
	/// 	println!("Nothing to build!");
	/// }
	/// ```
	pub fn kind(&self) -> &ErrorKind {
		&self.kind
	}
}

impl std::error::Error for SacdError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self.kind {
			ErrorKind::Toc(ref err) => Some(err),
			ErrorKind::Io(ref err) => Some(err),
			ErrorKind::Alloc(ref err) => Some(err),
			_ => None,
		}
	}
}

impl Debug for SacdError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}", self.kind)
	}
}

impl From<FileDecodingError> for SacdError {
	fn from(input: FileDecodingError) -> Self {
		Self {
			kind: ErrorKind::MalformedHeader(input),
		}
	}
}

impl From<TocError> for SacdError {
	fn from(input: TocError) -> Self {
		Self {
			kind: ErrorKind::Toc(input),
		}
	}
}

impl From<std::io::Error> for SacdError {
	fn from(input: std::io::Error) -> Self {
		Self {
			kind: ErrorKind::Io(input),
		}
	}
}

impl From<std::collections::TryReserveError> for SacdError {
	fn from(input: TryReserveError) -> Self {
		Self {
			kind: ErrorKind::Alloc(input),
		}
	}
}

impl Display for SacdError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self.kind {
			// Conversions
			ErrorKind::Toc(ref err) => write!(f, "TOC: {err}"),
			ErrorKind::Io(ref err) => write!(f, "{err}"),
			ErrorKind::Alloc(ref err) => write!(f, "{err}"),

			ErrorKind::UnknownFormat => {
				write!(f, "No format could be determined from the provided file")
			},
			ErrorKind::MalformedHeader(ref file_decode_err) => {
				write!(f, "Malformed header: {file_decode_err}")
			},
			ErrorKind::ChunkNotFound(id) => write!(
				f,
				"Required chunk \"{}\" was not found",
				String::from_utf8_lossy(&id)
			),

			ErrorKind::EmptyTrackList => write!(f, "Attempted to build an image with no tracks"),
			ErrorKind::DegenerateTrack(track, message) => {
				write!(f, "Track {track} is unusable: {message}")
			},
			ErrorKind::PayloadMismatch { tracks, payloads } => write!(
				f,
				"Expected one audio payload per track ({tracks} tracks, {payloads} payloads)"
			),
			ErrorKind::SizeMismatch => write!(
				f,
				"An audio payload is larger than the sector length declared for its track"
			),
			ErrorKind::SectorOutOfRange(sector) => {
				write!(f, "Sector {sector} lies beyond the end of the image")
			},
			ErrorKind::TooMuchData => write!(
				f,
				"Attempted to allocate an abnormally large amount of data"
			),
		}
	}
}
