//! Synthesized DSD files
//!
//! Real DSD files are far too large to check in, so every test builds the files it needs.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

pub const DSD64: u32 = 2_822_400;

/// The size of everything before the sample data of a DSF file
pub const DSF_HEADERS: usize = 92;

/// A DSF file with `audio_len` bytes of sample data
pub fn dsf(sample_rate: u32, channels: u32, sample_count: u64, audio_len: usize) -> Vec<u8> {
	let total = DSF_HEADERS + audio_len;

	let mut data = Vec::with_capacity(total);
	data.extend_from_slice(b"DSD ");
	data.extend_from_slice(&28_u64.to_le_bytes());
	data.extend_from_slice(&(total as u64).to_le_bytes());
	// No metadata
	data.extend_from_slice(&0_u64.to_le_bytes());

	data.extend_from_slice(b"fmt ");
	data.extend_from_slice(&52_u64.to_le_bytes());
	data.extend_from_slice(&1_u32.to_le_bytes());
	data.extend_from_slice(&0_u32.to_le_bytes());
	data.extend_from_slice(&(if channels == 6 { 7_u32 } else { 2 }).to_le_bytes());
	data.extend_from_slice(&channels.to_le_bytes());
	data.extend_from_slice(&sample_rate.to_le_bytes());
	data.extend_from_slice(&1_u32.to_le_bytes());
	data.extend_from_slice(&sample_count.to_le_bytes());
	data.extend_from_slice(&4096_u32.to_le_bytes());
	data.extend_from_slice(&0_u32.to_le_bytes());

	data.extend_from_slice(b"data");
	data.extend_from_slice(&(12 + audio_len as u64).to_le_bytes());
	data.resize(total, 0x69);

	data
}

/// A stereo DSD64 DSF file of `seconds` length
pub fn dsf_seconds(seconds: u64) -> Vec<u8> {
	let sample_count = seconds * u64::from(DSD64);
	dsf(DSD64, 2, sample_count, (sample_count / 8 * 2) as usize)
}

fn chunk(id: &[u8; 4], content: &[u8]) -> Vec<u8> {
	let mut chunk = Vec::with_capacity(12 + content.len() + 1);
	chunk.extend_from_slice(id);
	chunk.extend_from_slice(&(content.len() as u64).to_be_bytes());
	chunk.extend_from_slice(content);
	if content.len() % 2 == 1 {
		chunk.push(0);
	}
	chunk
}

/// A DFF file holding `audio` in its `DSD ` chunk, followed by a metadata chunk
pub fn dff(sample_rate: u32, channels: u16, audio: &[u8]) -> Vec<u8> {
	let mut prop = b"SND ".to_vec();
	prop.extend(chunk(b"FS  ", &sample_rate.to_be_bytes()));

	let mut chnl = channels.to_be_bytes().to_vec();
	for _ in 0..channels {
		chnl.extend_from_slice(b"C   ");
	}
	prop.extend(chunk(b"CHNL", &chnl));
	prop.extend(chunk(b"CMPR", b"DSD \x0enot compressed\0"));

	let body = [
		chunk(b"FVER", &0x0105_0000_u32.to_be_bytes()),
		chunk(b"PROP", &prop),
		chunk(b"DSD ", audio),
		chunk(b"DIIN", &chunk(b"DITI", b"\0\0\0\x05Title")),
	]
	.concat();

	let mut data = b"FRM8".to_vec();
	data.extend_from_slice(&(body.len() as u64 + 4).to_be_bytes());
	data.extend_from_slice(b"DSD ");
	data.extend(body);

	data
}

/// A stereo DSD64 DFF file of `seconds` length
pub fn dff_seconds(seconds: u64) -> Vec<u8> {
	let audio_len = seconds * u64::from(DSD64) / 8 * 2;
	dff(DSD64, 2, &vec![0xA5; audio_len as usize])
}

/// Write `data` to `name` in `dir`
pub fn write(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
	let path = dir.join(name);
	std::fs::write(&path, data).unwrap();
	path
}
