//! Assembling complete SACD images
//!
//! An image is built entirely in memory, and is only written to its final location once
//! it is complete. See [`ImageLayout`] for the sector map.

mod layout;

pub use layout::{ImageLayout, Region};

use crate::config::{BuildOptions, ParseOptions};
use crate::dsd::{self, DsdTrack, track};
use crate::error::{ErrorKind, Result, SacdError};
use crate::macros::{err, try_vec};
use crate::toc;
use crate::util::alloc::checked_buffer_len;

use std::io::Write;
use std::path::Path;

use sacd_toc::{AREA_TOC_SECTOR, AreaToc, MasterToc, SECTOR_SIZE};
use tempfile::NamedTempFile;

/// Build an image from decoded tracks and their raw audio
///
/// `payloads[i]` is the audio of `tracks[i]`, see [`extract_raw_audio`](crate::dsd::extract_raw_audio).
/// Each payload is zero-padded to the [`sector_length`](DsdTrack::sector_length) of its track.
///
/// # Errors
///
/// * `tracks` is empty ([`ErrorKind::EmptyTrackList`])
/// * The number of payloads differs from the number of tracks ([`ErrorKind::PayloadMismatch`])
/// * A track is degenerate ([`ErrorKind::DegenerateTrack`])
/// * A payload is larger than its track's sector length ([`ErrorKind::SizeMismatch`])
/// * The TOCs cannot be encoded, see [`toc::area_toc`]
/// * The image would exceed the allocation limit
///
/// # Examples
///
/// ```rust
/// use sacdkit::config::BuildOptions;
/// use sacdkit::dsd::{DsdFormat, DsdTrack};
/// use sacdkit::image;
///
/// # fn main() -> sacdkit::error::Result<()> {
/// let tracks = [DsdTrack::new(DsdFormat::Dsf, 2_822_400, 2, 2_822_400, 5000)];
/// let payloads = [vec![0x69; 5000]];
///
/// let image = image::build(&tracks, &payloads, &BuildOptions::new().album_title("Demo"))?;
/// // 560 sectors of headers, and 3 sectors of audio
/// assert_eq!(image.len(), 563 * 2048);
/// # Ok(()) }
/// ```
pub fn build<P>(tracks: &[DsdTrack], payloads: &[P], build_options: &BuildOptions) -> Result<Vec<u8>>
where
	P: AsRef<[u8]>,
{
	if tracks.is_empty() {
		err!(EmptyTrackList);
	}

	if payloads.len() != tracks.len() {
		return Err(SacdError::new(ErrorKind::PayloadMismatch {
			tracks: tracks.len(),
			payloads: payloads.len(),
		}));
	}

	let area_toc = toc::area_toc(
		tracks,
		build_options.multichannel,
		AREA_TOC_SECTOR,
		build_options.duration_overflow,
	)?;
	let master_toc = toc::master_toc(
		&area_toc,
		AREA_TOC_SECTOR,
		&build_options.album_title,
		build_options.disc_date,
	)?;

	assemble(&master_toc, &area_toc, payloads)
}

fn assemble<P>(master_toc: &MasterToc, area_toc: &AreaToc, payloads: &[P]) -> Result<Vec<u8>>
where
	P: AsRef<[u8]>,
{
	let Some((_, area_pointer)) = master_toc.area() else {
		err!(EmptyTrackList);
	};

	let layout = ImageLayout::new(area_pointer, area_toc);

	for (entry, payload) in layout.tracks().iter().zip(payloads) {
		let capacity = u64::from(entry.length_sectors) * SECTOR_SIZE as u64;
		let len = payload.as_ref().len() as u64;
		if len > capacity {
			log::error!(
				"Track {} has {len} bytes of audio, but only {capacity} bytes were reserved",
				entry.track_number
			);
			err!(SizeMismatch);
		}
	}

	let image_len = checked_buffer_len(layout.total_sectors() * SECTOR_SIZE as u64)?;
	log::debug!(
		"Assembling a {} sector image with {} tracks",
		layout.total_sectors(),
		layout.tracks().len()
	);

	let mut image = try_vec![0; image_len];

	let master_bytes = master_toc.as_bytes()?;
	for sector in ImageLayout::master_toc_sectors() {
		write_at(&mut image, sector, &master_bytes);
	}

	let area_bytes = area_toc.as_bytes()?;
	write_at(&mut image, layout.area_toc_sectors().start, &area_bytes);
	write_at(&mut image, layout.area_toc_backup_sectors().start, &area_bytes);

	for (entry, payload) in layout.tracks().iter().zip(payloads) {
		write_at(&mut image, u64::from(entry.start_sector), payload.as_ref());
	}

	Ok(image)
}

// The layout is computed from the same values the image was sized with, so this is always in bounds
fn write_at(image: &mut [u8], sector: u64, bytes: &[u8]) {
	let start = sector as usize * SECTOR_SIZE;
	image[start..start + bytes.len()].copy_from_slice(bytes);
}

/// Read, decode, and build an image from DSD files
///
/// The files are processed in order, and become tracks `1..=paths.len()`.
///
/// # Errors
///
/// * A file cannot be read, or its format cannot be determined
/// * See [`dsd::parse`] and [`build`]
///
/// # Examples
///
/// ```rust,no_run
/// use sacdkit::config::{BuildOptions, ParseOptions};
/// use sacdkit::image;
///
/// # fn main() -> sacdkit::error::Result<()> {
/// let image = image::build_image_from_paths(
/// 	&["01.dsf", "02.dsf"],
/// 	ParseOptions::new(),
/// 	&BuildOptions::new().album_title("Album"),
/// )?;
/// # Ok(()) }
/// ```
pub fn build_image_from_paths<P>(
	paths: &[P],
	parse_options: ParseOptions,
	build_options: &BuildOptions,
) -> Result<Vec<u8>>
where
	P: AsRef<Path>,
{
	let mut files = Vec::with_capacity(paths.len());
	for path in paths {
		let path = path.as_ref();
		let data = track::read_file(path)?;

		let Some(format) = track::guess_format(path, &data) else {
			log::error!("Unable to determine the format of {}", path.display());
			err!(UnknownFormat);
		};

		files.push((format, data));
	}

	let mut tracks = Vec::with_capacity(files.len());
	let mut payloads = Vec::with_capacity(files.len());
	for (path, (format, data)) in paths.iter().zip(&files) {
		let track = dsd::parse(data, Some(*format), parse_options)?;
		let payload = dsd::extract_raw_audio(data, *format, parse_options)?;

		log::debug!(
			"{}: {:?}, {} sectors, {} byte payload",
			path.as_ref().display(),
			track.duration(),
			track.sector_length(),
			payload.len()
		);

		tracks.push(track);
		payloads.push(payload);
	}

	build(&tracks, &payloads, build_options)
}

/// Write an image to `path`
///
/// The image is written to a temporary file in the same directory, which is moved into place
/// once it is complete. If anything fails, `path` is left untouched.
///
/// # Errors
///
/// * The temporary file cannot be created or written
/// * The temporary file cannot be moved to `path`
pub fn write_image_to_path<P>(image: &[u8], path: P) -> Result<()>
where
	P: AsRef<Path>,
{
	let path = path.as_ref();
	let dir = match path.parent() {
		Some(parent) if !parent.as_os_str().is_empty() => parent,
		_ => Path::new("."),
	};

	let mut temp = NamedTempFile::new_in(dir)?;
	temp.write_all(image)?;
	temp.as_file().sync_all()?;

	temp.persist(path).map_err(|e| e.error)?;
	log::debug!("Wrote {} bytes to {}", image.len(), path.display());

	Ok(())
}

/// Build an image from DSD files, and write it to `output`
///
/// Nothing is written unless the whole image could be built.
///
/// # Errors
///
/// See [`build_image_from_paths`] and [`write_image_to_path`]
pub fn build_image_to_path<P, O>(
	paths: &[P],
	output: O,
	parse_options: ParseOptions,
	build_options: &BuildOptions,
) -> Result<()>
where
	P: AsRef<Path>,
	O: AsRef<Path>,
{
	let image = build_image_from_paths(paths, parse_options, build_options)?;
	write_image_to_path(&image, output)
}
