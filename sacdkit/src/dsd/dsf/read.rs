use super::{
	DATA_CHUNK_OFFSET, DATA_HEADER_SIZE, DATA_MAGIC, DSF_MAGIC, FMT_CHUNK_SIZE, FMT_FIELDS_END,
	FMT_MAGIC, HEADER_SIZE,
};
use crate::config::{DsfAudioStart, ParseOptions, ParsingMode};
use crate::dsd::{ChannelLayout, DsdFormat, DsdTrack, STANDARD_SAMPLE_RATES};
use crate::error::Result;
use crate::macros::{decode_err, parse_mode_choice};

use std::io::{Cursor, Read};
use std::ops::Range;

use byteorder::{LittleEndian, ReadBytesExt};

/// The pointer to the metadata chunk, reused as the audio start
const METADATA_POINTER_OFFSET: u64 = 20;

struct DsfHeader {
	metadata_pointer: u64,
}

struct DsfFormat {
	channel_type: u32,
	channels: u32,
	sample_rate: u32,
	sample_count: u64,
}

pub(crate) fn read_properties(data: &[u8], parse_options: ParseOptions) -> Result<DsdTrack> {
	// The data chunk is only required by `DsfAudioStart::DataChunk`, which checks for it itself
	if (data.len() as u64) < FMT_FIELDS_END {
		decode_err!(@BAIL Dsf, "File is too short to contain the DSF headers");
	}

	let parsing_mode = parse_options.parsing_mode;

	let mut reader = Cursor::new(data);
	let header = read_header(&mut reader, parsing_mode)?;
	let format = read_format_chunk(&mut reader, parsing_mode)?;

	let audio = audio_range(data, parse_options)?;

	log::debug!(
		"DSF: {} Hz, {} channels, {} samples, metadata at {}",
		format.sample_rate,
		format.channels,
		format.sample_count,
		header.metadata_pointer
	);

	Ok(DsdTrack {
		format: DsdFormat::Dsf,
		sample_rate: format.sample_rate,
		channels: format.channels as u8,
		sample_count: format.sample_count,
		file_size: data.len() as u64,
		audio_offset: audio.start as u64,
		audio_size: audio.len() as u64,
		dst: false,
		channel_layout: Some(ChannelLayout::from_dsf_channel_type(format.channel_type)),
	})
}

pub(crate) fn audio_range(data: &[u8], parse_options: ParseOptions) -> Result<Range<usize>> {
	if data.len() < 4 || &data[..4] != DSF_MAGIC {
		decode_err!(@BAIL Dsf, "File missing \"DSD \" header");
	}

	let mut reader = Cursor::new(data);
	match parse_options.dsf_audio_start {
		DsfAudioStart::HeaderPointer => {
			reader.set_position(METADATA_POINTER_OFFSET);
			let start = reader.read_u64::<LittleEndian>()?;
			if start > data.len() as u64 {
				decode_err!(@BAIL Dsf, "Audio start offset is beyond the end of the file");
			}

			Ok(start as usize..data.len())
		},
		DsfAudioStart::DataChunk => {
			let start = DATA_CHUNK_OFFSET + DATA_HEADER_SIZE;
			if (data.len() as u64) < start {
				decode_err!(@BAIL Dsf, "File is too short to contain a data chunk");
			}

			reader.set_position(DATA_CHUNK_OFFSET);

			let mut magic = [0; 4];
			reader.read_exact(&mut magic)?;
			if &magic != DATA_MAGIC {
				decode_err!(@BAIL Dsf, "Expected data chunk");
			}

			let chunk_size = reader.read_u64::<LittleEndian>()?;
			let available = data.len() as u64 - start;

			let mut audio_size = chunk_size.saturating_sub(DATA_HEADER_SIZE);
			if audio_size > available {
				let parsing_mode = parse_options.parsing_mode;
				parse_mode_choice!(
					parsing_mode,
					STRICT: decode_err!(@BAIL Dsf, "data chunk extends past the end of the file"),
					DEFAULT: {
						log::warn!("DSF data chunk is truncated, using the remaining {available} bytes");
						audio_size = available;
					}
				);
			}

			Ok(start as usize..(start + audio_size) as usize)
		},
	}
}

fn read_header<R>(reader: &mut R, parsing_mode: ParsingMode) -> Result<DsfHeader>
where
	R: Read,
{
	let mut magic = [0; 4];
	reader.read_exact(&mut magic)?;
	if &magic != DSF_MAGIC {
		decode_err!(@BAIL Dsf, "File missing \"DSD \" header");
	}

	let chunk_size = reader.read_u64::<LittleEndian>()?;
	if chunk_size != HEADER_SIZE {
		parse_mode_choice!(
			parsing_mode,
			STRICT: decode_err!(@BAIL Dsf, "Invalid DSF header chunk size"),
			DEFAULT: log::warn!("Unexpected DSF header chunk size: {chunk_size}")
		);
	}

	let _file_size = reader.read_u64::<LittleEndian>()?;
	let metadata_pointer = reader.read_u64::<LittleEndian>()?;

	Ok(DsfHeader { metadata_pointer })
}

fn read_format_chunk<R>(reader: &mut R, parsing_mode: ParsingMode) -> Result<DsfFormat>
where
	R: Read,
{
	let mut magic = [0; 4];
	reader.read_exact(&mut magic)?;
	if &magic != FMT_MAGIC {
		decode_err!(@BAIL Dsf, "Expected fmt chunk");
	}

	let chunk_size = reader.read_u64::<LittleEndian>()?;
	if chunk_size != FMT_CHUNK_SIZE {
		parse_mode_choice!(
			parsing_mode,
			STRICT: decode_err!(@BAIL Dsf, "Invalid fmt chunk size"),
			DEFAULT: log::warn!("Unexpected DSF fmt chunk size: {chunk_size}")
		);
	}

	let format_version = reader.read_u32::<LittleEndian>()?;
	let format_id = reader.read_u32::<LittleEndian>()?;
	let channel_type = reader.read_u32::<LittleEndian>()?;
	let channels = reader.read_u32::<LittleEndian>()?;
	let sample_rate = reader.read_u32::<LittleEndian>()?;
	let bits_per_sample = reader.read_u32::<LittleEndian>()?;
	let sample_count = reader.read_u64::<LittleEndian>()?;

	if format_version != 1 {
		parse_mode_choice!(
			parsing_mode,
			STRICT: decode_err!(@BAIL Dsf, "Unsupported DSF format version"),
			DEFAULT: log::warn!("Unexpected DSF format version: {format_version}")
		);
	}

	// 0 = DSD raw
	if format_id != 0 {
		parse_mode_choice!(
			parsing_mode,
			STRICT: decode_err!(@BAIL Dsf, "Only DSD raw is supported"),
			DEFAULT: log::warn!("Unexpected DSF format ID: {format_id}")
		);
	}

	if channels == 0 || sample_rate == 0 {
		decode_err!(@BAIL Dsf, "Channel count and sample rate must be non-zero");
	}

	if !(1..=6).contains(&channels) {
		parse_mode_choice!(
			parsing_mode,
			STRICT: decode_err!(@BAIL Dsf, "Invalid channel count"),
			DEFAULT: {
				if channels > u32::from(u8::MAX) {
					decode_err!(@BAIL Dsf, "Invalid channel count");
				}

				log::warn!("Unusual DSF channel count: {channels}");
			}
		);
	}

	if !STANDARD_SAMPLE_RATES.contains(&sample_rate) {
		parse_mode_choice!(
			parsing_mode,
			STRICT: decode_err!(@BAIL Dsf, "Invalid sample rate"),
			DEFAULT: log::warn!("Non-standard DSF sample rate: {sample_rate}")
		);
	}

	if bits_per_sample != 1 && bits_per_sample != 8 {
		parse_mode_choice!(
			parsing_mode,
			STRICT: decode_err!(@BAIL Dsf, "Invalid bits per sample"),
			DEFAULT: log::warn!("Unexpected DSF bits per sample: {bits_per_sample}")
		);
	}

	Ok(DsfFormat {
		channel_type,
		channels,
		sample_rate,
		sample_count,
	})
}
