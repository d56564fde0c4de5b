/// Options to control how sacdkit parses a DSD container
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct ParseOptions {
	pub(crate) parsing_mode: ParsingMode,
	pub(crate) dff_sample_count: DffSampleCount,
	pub(crate) dsf_audio_start: DsfAudioStart,
}

impl Default for ParseOptions {
	/// The default implementation for `ParseOptions`
	///
	/// The defaults are as follows:
	///
	/// ```rust,ignore
	/// ParseOptions {
	/// 	parsing_mode: ParsingMode::BestAttempt,
	/// 	dff_sample_count: DffSampleCount::AudioChunk,
	/// 	dsf_audio_start: DsfAudioStart::HeaderPointer,
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}

impl ParseOptions {
	/// Default parsing mode
	pub const DEFAULT_PARSING_MODE: ParsingMode = ParsingMode::BestAttempt;

	/// Creates a new `ParseOptions`, alias for `Default` implementation
	///
	/// See also: [`ParseOptions::default`]
	///
	/// # Examples
	///
	/// ```rust
	/// use sacdkit::config::ParseOptions;
	///
	/// let parsing_options = ParseOptions::new();
	/// ```
	#[must_use]
	pub const fn new() -> Self {
		Self {
			parsing_mode: Self::DEFAULT_PARSING_MODE,
			dff_sample_count: DffSampleCount::AudioChunk,
			dsf_audio_start: DsfAudioStart::HeaderPointer,
		}
	}

	/// The parsing mode to use, see [`ParsingMode`] for details
	///
	/// # Examples
	///
	/// ```rust
	/// use sacdkit::config::{ParseOptions, ParsingMode};
	///
	/// // By default, `parsing_mode` is ParsingMode::BestAttempt. Here, we need absolute correctness.
	/// let parsing_options = ParseOptions::new().parsing_mode(ParsingMode::Strict);
	/// ```
	pub fn parsing_mode(&mut self, parsing_mode: ParsingMode) -> Self {
		self.parsing_mode = parsing_mode;
		*self
	}

	/// How to determine the sample count of a DFF file, see [`DffSampleCount`] for details
	///
	/// # Examples
	///
	/// ```rust
	/// use sacdkit::config::{DffSampleCount, ParseOptions};
	///
	/// // Reproduce the durations of images authored with the file size estimate
	/// let parsing_options = ParseOptions::new().dff_sample_count(DffSampleCount::FileSizeEstimate);
	/// ```
	pub fn dff_sample_count(&mut self, dff_sample_count: DffSampleCount) -> Self {
		self.dff_sample_count = dff_sample_count;
		*self
	}

	/// Where the audio payload of a DSF file starts, see [`DsfAudioStart`] for details
	///
	/// # Examples
	///
	/// ```rust
	/// use sacdkit::config::{DsfAudioStart, ParseOptions};
	///
	/// // Only take the sample data, not the headers
	/// let parsing_options = ParseOptions::new().dsf_audio_start(DsfAudioStart::DataChunk);
	/// ```
	pub fn dsf_audio_start(&mut self, dsf_audio_start: DsfAudioStart) -> Self {
		self.dsf_audio_start = dsf_audio_start;
		*self
	}
}

/// The parsing strictness mode
///
/// This can be set with [`ParseOptions::parsing_mode`].
///
/// # Examples
///
/// ```rust,no_run
/// use sacdkit::config::{ParseOptions, ParsingMode};
/// use sacdkit::dsd::DsdTrack;
///
/// # fn main() -> sacdkit::error::Result<()> {
/// // We only want to read well-formed inputs
/// let parse_options = ParseOptions::new().parsing_mode(ParsingMode::Strict);
/// let track = DsdTrack::read_from_path("foo.dsf", parse_options)?;
/// # Ok(()) }
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
#[non_exhaustive]
pub enum ParsingMode {
	/// Will eagerly error on invalid input
	///
	/// This mode will reject sample rates that are not a multiple of DSD64 (up to DSD512),
	/// channel counts outside of `1..=6`, and DSF files with unexpected chunk sizes.
	Strict,
	/// Default mode, less eager to error on recoverably malformed input
	///
	/// Non-standard sample rates are accepted with a warning. A sample rate or channel count
	/// of zero is still an error, as the resulting track would be unusable.
	#[default]
	BestAttempt,
	/// Least eager to error, may produce invalid/partial output
	///
	/// This is the same as [`ParsingMode::BestAttempt`], except that the DFF `FRM8` form type
	/// is not checked.
	Relaxed,
}

/// How the sample count of a DFF file is determined
///
/// DFF headers do not store a sample count, so it must be derived.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
#[non_exhaustive]
pub enum DffSampleCount {
	/// Derive the count from the size of the `DSD ` audio chunk
	///
	/// `samples = (chunk size / channels) * 8`
	#[default]
	AudioChunk,
	/// Estimate the count from the size of the whole file
	///
	/// `samples = (file size - 1024) * 8`
	///
	/// This ignores the channel count and any metadata chunks, and overestimates the duration
	/// of every file with more than one channel. It is kept to reproduce the durations of
	/// images authored with it.
	FileSizeEstimate,
}

/// Where the audio payload of a DSF file is taken from
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
#[non_exhaustive]
pub enum DsfAudioStart {
	/// Start at the 64-bit offset stored at byte 20 of the file, and run to the end of the file
	///
	/// Byte 20 of a DSF header is the pointer to the metadata chunk, which is zero for files
	/// without an ID3v2 tag. For such files the whole file, headers included, becomes the payload.
	#[default]
	HeaderPointer,
	/// Take exactly the sample data of the `data` chunk
	DataChunk,
}
