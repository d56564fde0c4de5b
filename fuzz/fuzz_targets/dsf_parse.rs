#![no_main]

use libfuzzer_sys::fuzz_target;
use sacdkit::config::{DsfAudioStart, ParseOptions};
use sacdkit::dsd::{self, DsdFormat};

fuzz_target!(|data: Vec<u8>| {
	let _ = dsd::parse(&data, Some(DsdFormat::Dsf), ParseOptions::new());
	let _ = dsd::extract_raw_audio(
		&data,
		DsdFormat::Dsf,
		ParseOptions::new().dsf_audio_start(DsfAudioStart::DataChunk),
	);
});
