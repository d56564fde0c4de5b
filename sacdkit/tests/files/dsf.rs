use crate::fixtures::{self, DSD64, DSF_HEADERS};

use sacdkit::config::{DsfAudioStart, ParseOptions, ParsingMode};
use sacdkit::dsd::{self, ChannelLayout, DsdFormat, DsdTrack};
use sacdkit::error::ErrorKind;

use std::time::Duration;

#[test_log::test]
fn fifty_seconds() {
	let data = fixtures::dsf(DSD64, 2, 141_120_000, 17_640_012 - DSF_HEADERS);
	assert_eq!(data.len(), 17_640_012);

	let track = dsd::parse(&data, None, ParseOptions::new()).unwrap();
	assert_eq!(track.format(), DsdFormat::Dsf);
	assert_eq!(track.duration(), Duration::from_secs(50));
	assert_eq!(track.sector_length(), 8614);
	assert_eq!(track.bits_per_sample(), 1);
	assert_eq!(track.channel_layout(), Some(ChannelLayout::Stereo));
}

#[test_log::test]
fn read_from_path() {
	let dir = tempfile::tempdir().unwrap();

	let data = fixtures::dsf(DSD64 * 2, 6, u64::from(DSD64) * 2, 1000);
	// The content decides the format, not the extension
	let path = fixtures::write(dir.path(), "track.bin", &data);

	let track = DsdTrack::read_from_path(&path, ParseOptions::new()).unwrap();
	assert_eq!(track.sample_rate(), 5_644_800);
	assert_eq!(track.channels(), 6);
	assert_eq!(track.channel_layout(), Some(ChannelLayout::FivePointOne));
	assert_eq!(track.duration(), Duration::from_secs(1));
	assert_eq!(track.file_size(), data.len() as u64);
}

#[test_log::test]
fn payload_follows_header_pointer() {
	for offset in [0_u64, 28, 92, 500] {
		let mut data = fixtures::dsf(DSD64, 2, 8000, 2000);
		data[20..28].copy_from_slice(&offset.to_le_bytes());

		let track = dsd::parse(&data, Some(DsdFormat::Dsf), ParseOptions::new()).unwrap();
		let payload = dsd::extract_raw_audio(&data, DsdFormat::Dsf, ParseOptions::new()).unwrap();

		assert_eq!(track.audio_offset(), offset);
		assert_eq!(payload.len() as u64, data.len() as u64 - offset);
		assert_eq!(payload, &data[offset as usize..]);
	}
}

#[test_log::test]
fn payload_from_data_chunk() {
	let data = fixtures::dsf(DSD64, 2, 8000, 2000);
	let options = ParseOptions::new().dsf_audio_start(DsfAudioStart::DataChunk);

	let payload = dsd::extract_raw_audio(&data, DsdFormat::Dsf, options).unwrap();
	assert_eq!(payload.len(), 2000);
	assert!(payload.iter().all(|b| *b == 0x69));
}

#[test_log::test]
fn too_short() {
	let data = fixtures::dsf(DSD64, 2, 8000, 0);

	for len in [0, 4, 51, 71] {
		let err = dsd::parse(&data[..len], Some(DsdFormat::Dsf), ParseOptions::new()).unwrap_err();
		assert!(
			matches!(err.kind(), ErrorKind::MalformedHeader(_)),
			"{len}: {err}"
		);
	}
}

#[test_log::test]
fn empty_file() {
	let dir = tempfile::tempdir().unwrap();
	let path = fixtures::write(dir.path(), "empty.dsf", &[]);

	let err = DsdTrack::read_from_path(&path, ParseOptions::new()).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::MalformedHeader(_)));
}

#[test_log::test]
fn unknown_format() {
	let err = dsd::parse(b"RIFF\0\0\0\0WAVE", None, ParseOptions::new()).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::UnknownFormat));
}

#[test_log::test]
fn strict_sample_rates() {
	let strict = ParseOptions::new().parsing_mode(ParsingMode::Strict);

	for rate in [DSD64, DSD64 * 2, DSD64 * 4, DSD64 * 8] {
		let data = fixtures::dsf(rate, 2, u64::from(rate), 100);
		assert!(dsd::parse(&data, None, strict).is_ok(), "{rate}");
	}

	let data = fixtures::dsf(44_100, 2, 44_100, 100);
	assert!(dsd::parse(&data, None, strict).is_err());
	assert!(dsd::parse(&data, None, ParseOptions::new()).is_ok());
}
