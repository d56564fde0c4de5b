use super::{
	CHUNK_HEADER_SIZE, DSD_CHUNK, DSD_FORM_TYPE, DST_CHUNK, ESTIMATE_HEADER_ALLOWANCE,
	FORM_HEADER_SIZE, FRM8_MAGIC,
};
use crate::config::{DffSampleCount, ParseOptions, ParsingMode};
use crate::dsd::{ChannelLayout, DsdFormat, DsdTrack, STANDARD_SAMPLE_RATES};
use crate::error::Result;
use crate::macros::{decode_err, err, parse_mode_choice};

use std::io::{Cursor, Read};
use std::ops::Range;

use byteorder::{BigEndian, ReadBytesExt};

/// A simple DFF chunk header reader
///
/// DFF uses 64-bit chunk sizes unlike RIFF/AIFF which use 32-bit.
/// This provides a minimal reader for DFF's chunk headers.
struct DffChunks {
	fourcc: [u8; 4],
	size: u64,
}

impl DffChunks {
	fn new() -> Self {
		Self {
			fourcc: [0; 4],
			size: 0,
		}
	}

	/// Read the next chunk header, if a whole one fits before `end`
	fn next(&mut self, reader: &mut Cursor<&[u8]>, end: u64) -> Result<bool> {
		if end.saturating_sub(reader.position()) < CHUNK_HEADER_SIZE {
			return Ok(false);
		}

		reader.read_exact(&mut self.fourcc)?;
		self.size = reader.read_u64::<BigEndian>()?;
		Ok(true)
	}

	/// The size of the chunk's content, limited to what is actually available before `end`
	fn content_size(&self, content_start: u64, end: u64, parsing_mode: ParsingMode) -> Result<u64> {
		let available = end.saturating_sub(content_start);
		if self.size <= available {
			return Ok(self.size);
		}

		parse_mode_choice!(
			parsing_mode,
			STRICT: decode_err!(@BAIL Dff, "Chunk extends past the end of its container"),
			DEFAULT: log::warn!(
				"DFF chunk {:?} is truncated ({} of {} bytes available)",
				String::from_utf8_lossy(&self.fourcc),
				available,
				self.size
			)
		);

		Ok(available)
	}
}

fn skip_to(reader: &mut Cursor<&[u8]>, content_start: u64, content_size: u64) {
	// Chunks are padded to an even length
	let padded = content_size.saturating_add(content_size & 1);
	reader.set_position(content_start.saturating_add(padded));
}

struct AudioChunk {
	id: [u8; 4],
	offset: u64,
	size: u64,
	/// Number of frames and frames per second, DST only
	frame_info: Option<(u32, u16)>,
}

/// Everything of interest found in a DFF file
pub(crate) struct DffLayout {
	version: Option<u32>,
	sample_rate: u32,
	channels: u16,
	compression: Option<[u8; 4]>,
	loudspeaker_config: Option<u16>,
	audio: Option<AudioChunk>,
}

impl DffLayout {
	pub(crate) fn audio_range(&self) -> Result<Range<usize>> {
		match self.audio {
			Some(ref audio) => Ok(audio.offset as usize..(audio.offset + audio.size) as usize),
			None => err!(ChunkNotFound(DSD_CHUNK)),
		}
	}
}

/// Verify the FRM8 container header
fn verify_dff(data: &[u8], parsing_mode: ParsingMode) -> Result<()> {
	if (data.len() as u64) < FORM_HEADER_SIZE || &data[..4] != FRM8_MAGIC {
		decode_err!(@BAIL Dff, "File missing \"FRM8\" header");
	}

	if &data[12..16] != DSD_FORM_TYPE {
		parse_mode_choice!(
			parsing_mode,
			RELAXED: log::warn!("Unexpected FRM8 form type, continuing anyway"),
			DEFAULT: decode_err!(@BAIL Dff, "FRM8 form type is not \"DSD \"")
		);
	}

	log::debug!("File verified to be DFF (DSDIFF)");
	Ok(())
}

/// Walk the top level chunks of a DFF file
///
/// The scan starts after the 16 byte `FRM8` header, so the form type is never mistaken for
/// the `DSD ` audio chunk.
pub(crate) fn scan(data: &[u8], parse_options: ParseOptions) -> Result<DffLayout> {
	let parsing_mode = parse_options.parsing_mode;
	verify_dff(data, parsing_mode)?;

	let file_end = data.len() as u64;

	let mut reader = Cursor::new(data);
	reader.set_position(FORM_HEADER_SIZE);

	let mut layout = DffLayout {
		version: None,
		sample_rate: 0,
		channels: 0,
		compression: None,
		loudspeaker_config: None,
		audio: None,
	};

	let mut chunks = DffChunks::new();
	while chunks.next(&mut reader, file_end)? {
		let content_start = reader.position();
		let content_size = chunks.content_size(content_start, file_end, parsing_mode)?;
		let content_end = content_start + content_size;

		match &chunks.fourcc {
			b"FVER" if content_size >= 4 => {
				layout.version = Some(reader.read_u32::<BigEndian>()?);
			},
			b"PROP" => parse_prop_chunk(&mut reader, content_end, parsing_mode, &mut layout)?,
			id @ (b"DSD " | b"DST ") => {
				if layout.audio.is_some() {
					log::warn!("Found multiple DFF audio chunks, ignoring all but the first");
				} else {
					let frame_info = if *id == DST_CHUNK {
						read_frame_info(&mut reader, content_end, parsing_mode)?
					} else {
						None
					};

					layout.audio = Some(AudioChunk {
						id: *id,
						offset: content_start,
						size: content_size,
						frame_info,
					});
				}
			},
			_ => {
				log::debug!(
					"Skipping DFF chunk: {:?}",
					String::from_utf8_lossy(&chunks.fourcc)
				);
			},
		}

		skip_to(&mut reader, content_start, content_size);
	}

	Ok(layout)
}

fn parse_prop_chunk(
	reader: &mut Cursor<&[u8]>,
	prop_end: u64,
	parsing_mode: ParsingMode,
	layout: &mut DffLayout,
) -> Result<()> {
	if prop_end.saturating_sub(reader.position()) < 4 {
		return Ok(());
	}

	let mut prop_type = [0; 4];
	reader.read_exact(&mut prop_type)?;

	if &prop_type != b"SND " {
		log::debug!("Skipping non-sound PROP chunk");
		return Ok(());
	}

	let mut chunks = DffChunks::new();
	while chunks.next(reader, prop_end)? {
		let content_start = reader.position();
		let content_size = chunks.content_size(content_start, prop_end, parsing_mode)?;

		match &chunks.fourcc {
			b"FS  " if content_size >= 4 => {
				layout.sample_rate = reader.read_u32::<BigEndian>()?;
			},
			// Followed by the channel IDs, which we don't need
			b"CHNL" if content_size >= 2 => {
				layout.channels = reader.read_u16::<BigEndian>()?;
			},
			// Followed by a human readable name
			b"CMPR" if content_size >= 4 => {
				let mut compression = [0; 4];
				reader.read_exact(&mut compression)?;
				layout.compression = Some(compression);
			},
			b"LSCO" if content_size >= 2 => {
				layout.loudspeaker_config = Some(reader.read_u16::<BigEndian>()?);
			},
			_ => {},
		}

		skip_to(reader, content_start, content_size);
	}

	Ok(())
}

/// Read the `FRTE` chunk at the start of a `DST ` chunk
fn read_frame_info(
	reader: &mut Cursor<&[u8]>,
	dst_end: u64,
	parsing_mode: ParsingMode,
) -> Result<Option<(u32, u16)>> {
	let mut chunks = DffChunks::new();
	if !chunks.next(reader, dst_end)? || &chunks.fourcc != b"FRTE" {
		return Ok(None);
	}

	let content_start = reader.position();
	if chunks.content_size(content_start, dst_end, parsing_mode)? < 6 {
		return Ok(None);
	}

	let frame_count = reader.read_u32::<BigEndian>()?;
	let frame_rate = reader.read_u16::<BigEndian>()?;

	Ok(Some((frame_count, frame_rate)))
}

pub(crate) fn read_properties(data: &[u8], parse_options: ParseOptions) -> Result<DsdTrack> {
	let parsing_mode = parse_options.parsing_mode;
	let layout = scan(data, parse_options)?;

	let sample_rate = layout.sample_rate;
	let channels = layout.channels;
	if sample_rate == 0 || channels == 0 {
		decode_err!(@BAIL Dff, "Missing required FS or CHNL chunk");
	}

	if !(1..=6).contains(&channels) {
		parse_mode_choice!(
			parsing_mode,
			STRICT: decode_err!(@BAIL Dff, "Invalid channel count"),
			DEFAULT: {
				if channels > u16::from(u8::MAX) {
					decode_err!(@BAIL Dff, "Invalid channel count");
				}

				log::warn!("Unusual DFF channel count: {channels}");
			}
		);
	}

	if !STANDARD_SAMPLE_RATES.contains(&sample_rate) {
		parse_mode_choice!(
			parsing_mode,
			STRICT: decode_err!(@BAIL Dff, "Invalid sample rate"),
			DEFAULT: log::warn!("Non-standard DFF sample rate: {sample_rate}")
		);
	}

	if let Some(version) = layout.version {
		log::debug!("DFF format version: {version:#010X}");
	}

	let Some(ref audio) = layout.audio else {
		err!(ChunkNotFound(DSD_CHUNK));
	};

	let dst = audio.id == DST_CHUNK || layout.compression == Some(DST_CHUNK);
	if dst {
		log::debug!("DFF audio is DST encoded");
	}

	let file_size = data.len() as u64;
	let sample_count = match parse_options.dff_sample_count {
		DffSampleCount::AudioChunk if dst => match audio.frame_info {
			Some((frame_count, frame_rate)) if frame_rate > 0 => {
				u64::from(frame_count) * u64::from(sample_rate) / u64::from(frame_rate)
			},
			_ => decode_err!(@BAIL Dff, "DST audio is missing its frame information"),
		},
		DffSampleCount::AudioChunk => (audio.size / u64::from(channels)) * 8,
		DffSampleCount::FileSizeEstimate => {
			file_size.saturating_sub(ESTIMATE_HEADER_ALLOWANCE).saturating_mul(8)
		},
	};

	Ok(DsdTrack {
		format: DsdFormat::Dff,
		sample_rate,
		channels: channels as u8,
		sample_count,
		file_size,
		audio_offset: audio.offset,
		audio_size: audio.size,
		dst,
		channel_layout: layout
			.loudspeaker_config
			.and_then(ChannelLayout::from_dff_loudspeaker_config),
	})
}
