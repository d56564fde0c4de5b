use crate::error::Result;
use crate::macros::err;

use std::fmt::Write;

use sacd_toc::SECTOR_SIZE;

const BYTES_PER_LINE: usize = 16;

/// Format a sector of `image` as a hex dump
///
/// Each line holds 16 bytes, prefixed with their absolute offset in the image. Lines
/// identical to the previous one are collapsed into a single `*`.
///
/// # Errors
///
/// * `sector` lies beyond the end of the image
///
/// # Examples
///
/// ```rust
/// use sacdkit::inspect::dump_sector;
///
/// # fn main() -> sacdkit::error::Result<()> {
/// let mut image = vec![0; 2048 * 2];
/// image[2048..2056].copy_from_slice(b"SACDMTOC");
///
/// let dump = dump_sector(&image, 1)?;
/// assert!(dump.starts_with("00000800  53 41 43 44 4D 54 4F 43"));
/// # Ok(()) }
/// ```
pub fn dump_sector(image: &[u8], sector: u64) -> Result<String> {
	let start = sector
		.checked_mul(SECTOR_SIZE as u64)
		.filter(|start| *start < image.len() as u64);
	let Some(start) = start else {
		err!(SectorOutOfRange(sector));
	};

	let start = start as usize;
	let end = (start + SECTOR_SIZE).min(image.len());

	let mut out = String::new();
	let mut previous: Option<&[u8]> = None;
	let mut collapsed = false;

	for (idx, line) in image[start..end].chunks(BYTES_PER_LINE).enumerate() {
		if previous == Some(line) {
			if !collapsed {
				out.push_str("*\n");
				collapsed = true;
			}
			continue;
		}

		previous = Some(line);
		collapsed = false;

		let _ = write!(out, "{:08X} ", start + idx * BYTES_PER_LINE);
		for byte in line {
			let _ = write!(out, " {byte:02X}");
		}

		for _ in line.len()..BYTES_PER_LINE {
			out.push_str("   ");
		}

		out.push_str("  |");
		out.extend(line.iter().map(|&b| {
			if b.is_ascii_graphic() || b == b' ' {
				char::from(b)
			} else {
				'.'
			}
		}));
		out.push_str("|\n");
	}

	Ok(out)
}
