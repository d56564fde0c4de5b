use crate::fixtures::{self, DSD64};

use sacdkit::config::{DffSampleCount, ParseOptions};
use sacdkit::dsd::{self, DsdFormat, DsdTrack};
use sacdkit::error::ErrorKind;

use std::time::Duration;

#[test_log::test]
fn read_from_path() {
	let dir = tempfile::tempdir().unwrap();
	let path = fixtures::write(dir.path(), "track.dff", &fixtures::dff_seconds(3));

	let track = DsdTrack::read_from_path(&path, ParseOptions::new()).unwrap();
	assert_eq!(track.format(), DsdFormat::Dff);
	assert_eq!(track.sample_rate(), DSD64);
	assert_eq!(track.channels(), 2);
	assert_eq!(track.duration(), Duration::from_secs(3));
	assert!(!track.is_dst());
}

#[test_log::test]
fn payload_is_exact() {
	for len in [0_usize, 1, 2047, 2048, 10_001] {
		let audio = (0..len).map(|i| i as u8).collect::<Vec<_>>();
		let data = fixtures::dff(DSD64, 1, &audio);

		let payload = dsd::extract_raw_audio(&data, DsdFormat::Dff, ParseOptions::new()).unwrap();
		assert_eq!(payload.len(), len);
		assert_eq!(payload, &audio[..]);
	}
}

#[test_log::test]
fn form_type_is_not_the_audio_chunk() {
	// No "DSD " chunk, only the "DSD " form type
	let mut data = b"FRM8".to_vec();
	data.extend_from_slice(&4_u64.to_be_bytes());
	data.extend_from_slice(b"DSD ");

	let err = dsd::extract_raw_audio(&data, DsdFormat::Dff, ParseOptions::new()).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::ChunkNotFound(id) if id == b"DSD "));
}

#[test_log::test]
fn sample_count_strategies() {
	let data = fixtures::dff_seconds(2);

	let exact = dsd::parse(&data, None, ParseOptions::new()).unwrap();
	assert_eq!(exact.duration(), Duration::from_secs(2));

	let options = ParseOptions::new().dff_sample_count(DffSampleCount::FileSizeEstimate);
	let estimated = dsd::parse(&data, None, options).unwrap();

	// The estimate ignores the channel count, roughly doubling the duration of a stereo file
	assert_eq!(estimated.sample_count(), (data.len() as u64 - 1024) * 8);
	assert!(estimated.duration() > Duration::from_secs(3));

	// Both agree on where the track goes
	assert_eq!(exact.sector_length(), estimated.sector_length());
}

#[test_log::test]
fn tiny_file_estimate() {
	// Smaller than the estimate's header allowance
	let data = fixtures::dff(DSD64, 2, &[0; 16]);
	assert!(data.len() < 1024);

	let options = ParseOptions::new().dff_sample_count(DffSampleCount::FileSizeEstimate);
	let track = dsd::parse(&data, None, options).unwrap();
	assert_eq!(track.sample_count(), 0);
	assert_eq!(track.duration(), Duration::ZERO);
}
