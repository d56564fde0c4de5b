#![no_main]

use libfuzzer_sys::fuzz_target;
use sacdkit::config::{ParseOptions, ParsingMode};
use sacdkit::dsd::{self, DsdFormat};

fuzz_target!(|data: Vec<u8>| {
	let relaxed = ParseOptions::new().parsing_mode(ParsingMode::Relaxed);

	let _ = dsd::parse(&data, Some(DsdFormat::Dff), relaxed);
	let _ = dsd::extract_raw_audio(&data, DsdFormat::Dff, relaxed);
});
