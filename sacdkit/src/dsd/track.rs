use super::DsdFormat;
use crate::config::ParseOptions;
use crate::error::Result;
use crate::macros::decode_err;
use crate::util::alloc::{VecFallibleCapacity, checked_buffer_len};

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

/// The speaker layout declared by a DSD container
///
/// DSF stores this as a channel type, DFF as an optional loudspeaker configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ChannelLayout {
	/// A single channel
	Mono,
	/// Front left and right
	Stereo,
	/// Front left, right, and center
	ThreeChannel,
	/// Front left and right, back left and right
	Quad,
	/// Front left, right, and center, plus LFE
	FourChannel,
	/// 5-channel setup according to ITU-R BS.775-1
	FiveChannel,
	/// 5-channel setup according to ITU-R BS.775-1, plus LFE
	FivePointOne,
	/// An unknown or reserved value
	Other(u32),
}

impl ChannelLayout {
	pub(crate) fn from_dsf_channel_type(channel_type: u32) -> Self {
		match channel_type {
			1 => Self::Mono,
			2 => Self::Stereo,
			3 => Self::ThreeChannel,
			4 => Self::Quad,
			5 => Self::FourChannel,
			6 => Self::FiveChannel,
			7 => Self::FivePointOne,
			_ => Self::Other(channel_type),
		}
	}

	/// DSDIFF 1.5 § 3.2.5, `65535` (undefined) maps to `None`
	pub(crate) fn from_dff_loudspeaker_config(config: u16) -> Option<Self> {
		match config {
			0 => Some(Self::Stereo),
			3 => Some(Self::FiveChannel),
			4 => Some(Self::FivePointOne),
			u16::MAX => None,
			_ => Some(Self::Other(u32::from(config))),
		}
	}
}

/// A decoded DSD audio file
///
/// This holds everything needed to place the file on a disc. It does not hold the audio itself,
/// see [`extract_raw_audio`](crate::dsd::extract_raw_audio).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DsdTrack {
	pub(crate) format: DsdFormat,
	pub(crate) sample_rate: u32,
	pub(crate) channels: u8,
	pub(crate) sample_count: u64,
	pub(crate) file_size: u64,
	pub(crate) audio_offset: u64,
	pub(crate) audio_size: u64,
	pub(crate) dst: bool,
	pub(crate) channel_layout: Option<ChannelLayout>,
}

impl DsdTrack {
	/// DSD is always 1-bit
	pub const BITS_PER_SAMPLE: u8 = 1;

	/// Create a `DsdTrack` from known values
	///
	/// The whole file is assumed to be the audio payload.
	///
	/// # Examples
	///
	/// ```rust
	/// use sacdkit::dsd::{DsdFormat, DsdTrack};
	/// use std::time::Duration;
	///
	/// let track = DsdTrack::new(DsdFormat::Dsf, 2_822_400, 2, 141_120_000, 17_640_012);
	/// assert_eq!(track.duration(), Duration::from_secs(50));
	/// assert_eq!(track.sector_length(), 8614);
	/// ```
	pub fn new(
		format: DsdFormat,
		sample_rate: u32,
		channels: u8,
		sample_count: u64,
		file_size: u64,
	) -> Self {
		Self {
			format,
			sample_rate,
			channels,
			sample_count,
			file_size,
			audio_offset: 0,
			audio_size: file_size,
			dst: false,
			channel_layout: None,
		}
	}

	/// Read and decode a DSD file
	///
	/// The format is determined from the content of the file, falling back to the extension.
	///
	/// # Errors
	///
	/// * `path` does not exist or cannot be read
	/// * See [`parse`](crate::dsd::parse)
	///
	/// # Examples
	///
	/// ```rust,no_run
	/// use sacdkit::config::ParseOptions;
	/// use sacdkit::dsd::DsdTrack;
	///
	/// # fn main() -> sacdkit::error::Result<()> {
	/// let track = DsdTrack::read_from_path("track01.dff", ParseOptions::new())?;
	/// println!("{} sectors", track.sector_length());
	/// # Ok(()) }
	/// ```
	pub fn read_from_path<P>(path: P, parse_options: ParseOptions) -> Result<Self>
	where
		P: AsRef<Path>,
	{
		let path = path.as_ref();
		let data = read_file(path)?;
		super::parse(&data, guess_format(path, &data), parse_options)
	}

	/// The container format
	pub fn format(&self) -> DsdFormat {
		self.format
	}

	/// Sample rate (Hz)
	pub fn sample_rate(&self) -> u32 {
		self.sample_rate
	}

	/// Channel count
	pub fn channels(&self) -> u8 {
		self.channels
	}

	/// Bits per sample, always [`DsdTrack::BITS_PER_SAMPLE`]
	pub fn bits_per_sample(&self) -> u8 {
		Self::BITS_PER_SAMPLE
	}

	/// Number of samples per channel
	pub fn sample_count(&self) -> u64 {
		self.sample_count
	}

	/// Size of the source file (bytes)
	pub fn file_size(&self) -> u64 {
		self.file_size
	}

	/// Offset of the audio payload within the source file
	pub fn audio_offset(&self) -> u64 {
		self.audio_offset
	}

	/// Size of the audio payload (bytes)
	pub fn audio_size(&self) -> u64 {
		self.audio_size
	}

	/// Whether the audio is DST compressed
	pub fn is_dst(&self) -> bool {
		self.dst
	}

	/// The declared speaker layout, if any
	pub fn channel_layout(&self) -> Option<ChannelLayout> {
		self.channel_layout
	}

	/// Duration of the audio
	///
	/// This is `sample_count / sample_rate`, computed without floating point.
	/// A sample rate of zero yields [`Duration::ZERO`].
	pub fn duration(&self) -> Duration {
		if self.sample_rate == 0 {
			return Duration::ZERO;
		}

		let rate = u64::from(self.sample_rate);
		let secs = self.sample_count / rate;
		let nanos = (self.sample_count % rate) * 1_000_000_000 / rate;

		Duration::new(secs, nanos as u32)
	}

	/// The number of sectors the track occupies on disc
	///
	/// This is derived from the size of the whole source file, see [`sectors_for`](sacd_toc::sectors_for).
	pub fn sector_length(&self) -> u64 {
		sacd_toc::sectors_for(self.file_size)
	}

	/// Why the track would produce a non-functional TOC entry, if it would
	pub(crate) fn degenerate_reason(&self) -> Option<&'static str> {
		if self.sample_rate == 0 {
			return Some("sample rate is zero");
		}

		if self.channels == 0 {
			return Some("channel count is zero");
		}

		// Entries only store whole seconds
		if self.duration().as_secs() == 0 {
			return Some("duration is shorter than one second");
		}

		if self.file_size == 0 {
			return Some("file is empty");
		}

		None
	}
}

pub(crate) fn guess_format(path: &Path, data: &[u8]) -> Option<DsdFormat> {
	DsdFormat::from_buffer(data).or_else(|| DsdFormat::from_path(path))
}

/// Read an entire file, respecting the allocation limit
pub(crate) fn read_file(path: &Path) -> Result<Vec<u8>> {
	let mut file = File::open(path)?;
	let len = checked_buffer_len(file.metadata()?.len())?;

	let mut data = Vec::try_with_capacity_stable(len)?;
	file.read_to_end(&mut data)?;

	if data.is_empty() {
		log::warn!("{} is empty", path.display());
		decode_err!(@BAIL "File is empty");
	}

	Ok(data)
}
