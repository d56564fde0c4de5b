//! Reading back and checking SACD images
//!
//! [`inspect_image`] decodes the TOCs of an image and looks for the kinds of damage a broken
//! authoring run leaves behind, such as tracks with a zero start sector or a 0:00 duration.

mod dump;

pub use dump::dump_sector;

use crate::error::Result;
use crate::image::ImageLayout;
use crate::toc;

use std::fmt::{Display, Formatter};

use sacd_toc::{AreaToc, MASTER_TOC_COPIES, MASTER_TOC_SECTOR, MasterToc, SECTOR_SIZE, TocError};

/// A problem found in an image
#[derive(Debug)]
#[non_exhaustive]
pub enum Anomaly {
	/// The image is not a whole number of sectors
	UnalignedLength(usize),
	/// A Master TOC copy differs from the first one (0-based)
	MasterTocCopyMismatch(u32),
	/// Neither area is populated in the Master TOC
	NoArea,
	/// Both areas are populated in the Master TOC
	BothAreas,
	/// The backup Area TOC could not be read, or differs from the primary one
	AreaTocBackupMismatch,
	/// The Area TOC is not where the Master TOC says it is
	AreaTocUnreadable(TocError),
	/// A track starts at sector zero
	ZeroStartSector(u8),
	/// A track has a duration of 0:00
	ZeroDuration(u8),
	/// A track does not start where the previous one ended
	NonContiguous {
		/// The 1-based track number
		track: u8,
		/// The sector the track should have started at
		expected: u64,
		/// The sector the track starts at
		found: u32,
	},
	/// A track extends past the end of the image
	PastEndOfImage(u8),
	/// A track number is out of sequence
	TrackNumber {
		/// The expected track number
		expected: usize,
		/// The track number found
		found: u8,
	},
}

impl Display for Anomaly {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Anomaly::UnalignedLength(len) => {
				write!(f, "Image length {len} is not a multiple of {SECTOR_SIZE}")
			},
			Anomaly::MasterTocCopyMismatch(copy) => {
				write!(f, "Master TOC copy {} differs from copy 1", copy + 1)
			},
			Anomaly::NoArea => write!(f, "The Master TOC does not point to any area"),
			Anomaly::BothAreas => write!(f, "The Master TOC points to both areas"),
			Anomaly::AreaTocBackupMismatch => {
				write!(f, "The backup Area TOC differs from the primary one")
			},
			Anomaly::AreaTocUnreadable(err) => write!(f, "The Area TOC is unreadable: {err}"),
			Anomaly::ZeroStartSector(track) => write!(f, "Track {track} starts at sector 0"),
			Anomaly::ZeroDuration(track) => write!(f, "Track {track} has a duration of 0:00"),
			Anomaly::NonContiguous {
				track,
				expected,
				found,
			} => write!(
				f,
				"Track {track} starts at sector {found}, expected {expected}"
			),
			Anomaly::PastEndOfImage(track) => {
				write!(f, "Track {track} extends past the end of the image")
			},
			Anomaly::TrackNumber { expected, found } => {
				write!(f, "Found track number {found}, expected {expected}")
			},
		}
	}
}

/// The result of [`inspect_image`]
#[derive(Debug)]
pub struct DiscReport {
	/// The first Master TOC copy
	pub master_toc: MasterToc,
	/// The primary Area TOC, if it could be read
	pub area_toc: Option<AreaToc>,
	/// The sector map, if the Area TOC could be read
	pub layout: Option<ImageLayout>,
	/// The number of whole sectors in the image
	pub image_sectors: u64,
	/// Everything that looks wrong
	pub anomalies: Vec<Anomaly>,
}

impl DiscReport {
	/// Whether no anomalies were found
	pub fn is_clean(&self) -> bool {
		self.anomalies.is_empty()
	}
}

/// Decode the TOCs of an image and check them for consistency
///
/// Only an unreadable first Master TOC copy is an error, everything else is reported as an
/// [`Anomaly`].
///
/// # Errors
///
/// * The image is too short to hold a Master TOC
/// * The first Master TOC copy has the wrong signature
///
/// # Examples
///
/// ```rust,no_run
/// use sacdkit::inspect;
///
/// # fn main() -> sacdkit::error::Result<()> {
/// let image = std::fs::read("album.iso")?;
/// let report = inspect::inspect_image(&image)?;
///
/// for anomaly in &report.anomalies {
/// 	println!("{anomaly}");
/// }
/// # Ok(()) }
/// ```
pub fn inspect_image(image: &[u8]) -> Result<DiscReport> {
	let mut anomalies = Vec::new();

	if image.len() % SECTOR_SIZE != 0 {
		anomalies.push(Anomaly::UnalignedLength(image.len()));
	}

	let image_sectors = (image.len() / SECTOR_SIZE) as u64;

	let first_copy = sector_slice(image, u64::from(MASTER_TOC_SECTOR), 1);
	let master_toc = toc::decode_master_toc(first_copy)?;

	for copy in 1..MASTER_TOC_COPIES {
		let sector = u64::from(MASTER_TOC_SECTOR + copy);
		if sector_slice(image, sector, 1) != first_copy {
			anomalies.push(Anomaly::MasterTocCopyMismatch(copy));
		}
	}

	if !master_toc.two_channel.is_empty() && !master_toc.multichannel.is_empty() {
		anomalies.push(Anomaly::BothAreas);
	}

	let Some((kind, pointer)) = master_toc.area() else {
		anomalies.push(Anomaly::NoArea);
		return Ok(DiscReport {
			master_toc,
			area_toc: None,
			layout: None,
			image_sectors,
			anomalies,
		});
	};

	log::debug!(
		"{kind:?} area TOC at sector {}, backup at {}, {} sector(s)",
		pointer.primary_sector,
		pointer.backup_sector,
		pointer.size_sectors
	);

	let size = u64::from(pointer.size_sectors.max(1));
	let primary = sector_slice(image, u64::from(pointer.primary_sector), size);
	let area_toc = match toc::decode_area_toc(primary) {
		Ok(area_toc) => area_toc,
		Err(err) => {
			log::warn!("Unable to read the primary Area TOC: {err}");
			if let crate::error::ErrorKind::Toc(toc_err) = err.kind {
				anomalies.push(Anomaly::AreaTocUnreadable(toc_err));
			}

			return Ok(DiscReport {
				master_toc,
				area_toc: None,
				layout: None,
				image_sectors,
				anomalies,
			});
		},
	};

	let backup = sector_slice(image, u64::from(pointer.backup_sector), size);
	if backup != primary {
		anomalies.push(Anomaly::AreaTocBackupMismatch);
	}

	check_tracks(&area_toc, image_sectors, &mut anomalies);

	Ok(DiscReport {
		master_toc,
		layout: Some(ImageLayout::new(pointer, &area_toc)),
		area_toc: Some(area_toc),
		image_sectors,
		anomalies,
	})
}

fn check_tracks(area_toc: &AreaToc, image_sectors: u64, anomalies: &mut Vec<Anomaly>) {
	let mut expected_start = None;

	for (idx, entry) in area_toc.entries().iter().enumerate() {
		let track = entry.track_number;

		if usize::from(track) != idx + 1 {
			anomalies.push(Anomaly::TrackNumber {
				expected: idx + 1,
				found: track,
			});
		}

		if entry.start_sector == 0 {
			anomalies.push(Anomaly::ZeroStartSector(track));
		}

		if entry.minutes == 0 && entry.seconds == 0 {
			anomalies.push(Anomaly::ZeroDuration(track));
		}

		if let Some(expected) = expected_start {
			if u64::from(entry.start_sector) != expected {
				anomalies.push(Anomaly::NonContiguous {
					track,
					expected,
					found: entry.start_sector,
				});
			}
		}

		if entry.end_sector() > image_sectors {
			anomalies.push(Anomaly::PastEndOfImage(track));
		}

		expected_start = Some(entry.end_sector());
	}
}

/// Get up to `count` sectors starting at `sector`, clamped to the end of the image
fn sector_slice(image: &[u8], sector: u64, count: u64) -> &[u8] {
	let start = (sector.saturating_mul(SECTOR_SIZE as u64)).min(image.len() as u64) as usize;
	let end = (sector.saturating_add(count))
		.saturating_mul(SECTOR_SIZE as u64)
		.min(image.len() as u64) as usize;

	&image[start..end]
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::BuildOptions;
	use crate::dsd::{DsdFormat, DsdTrack};
	use crate::error::ErrorKind;
	use crate::image;

	fn image() -> Vec<u8> {
		let tracks = [
			DsdTrack::new(DsdFormat::Dsf, 2_822_400, 2, 2_822_400 * 61, 4096),
			DsdTrack::new(DsdFormat::Dsf, 2_822_400, 2, 2_822_400 * 5, 6000),
		];
		let payloads = [vec![1; 4096], vec![2; 6000]];

		image::build(&tracks, &payloads, &BuildOptions::new().album_title("Clean")).unwrap()
	}

	fn patch_entry(image: &mut [u8], sector: usize, idx: usize, offset: usize, bytes: &[u8]) {
		let start = sector * SECTOR_SIZE + 20 + idx * 16 + offset;
		image[start..start + bytes.len()].copy_from_slice(bytes);
	}

	#[test_log::test]
	fn clean_image() {
		let report = inspect_image(&image()).unwrap();

		assert!(report.is_clean(), "{:?}", report.anomalies);
		assert_eq!(report.master_toc.album_title(), "Clean");
		assert_eq!(report.image_sectors, 565);

		let area_toc = report.area_toc.unwrap();
		assert_eq!(area_toc.track_count(), 2);
		assert_eq!(area_toc.entries()[0].minutes, 1);
		assert_eq!(area_toc.entries()[0].seconds, 1);
		assert_eq!(report.layout.unwrap().total_sectors(), 565);
	}

	#[test_log::test]
	fn broken_tracks() {
		let mut image = image();

		// Zero the start sector and duration of track 2, in both copies
		for sector in [540, 541] {
			patch_entry(&mut image, sector, 1, 4, &[0; 4]);
			patch_entry(&mut image, sector, 1, 12, &[0; 2]);
		}

		let report = inspect_image(&image).unwrap();
		assert!(
			report
				.anomalies
				.iter()
				.any(|a| matches!(a, Anomaly::ZeroStartSector(2)))
		);
		assert!(
			report
				.anomalies
				.iter()
				.any(|a| matches!(a, Anomaly::ZeroDuration(2)))
		);
		assert!(report.anomalies.iter().any(|a| matches!(
			a,
			Anomaly::NonContiguous {
				track: 2,
				expected: 562,
				found: 0
			}
		)));
		assert!(
			!report
				.anomalies
				.iter()
				.any(|a| matches!(a, Anomaly::AreaTocBackupMismatch))
		);
	}

	#[test_log::test]
	fn damaged_copies() {
		let mut image = image();
		image[511 * SECTOR_SIZE + 0x20] ^= 0xFF;
		image[541 * SECTOR_SIZE + 30] ^= 0xFF;

		let report = inspect_image(&image).unwrap();
		assert!(
			report
				.anomalies
				.iter()
				.any(|a| matches!(a, Anomaly::MasterTocCopyMismatch(1)))
		);
		assert!(
			report
				.anomalies
				.iter()
				.any(|a| matches!(a, Anomaly::AreaTocBackupMismatch))
		);
	}

	#[test_log::test]
	fn truncated_image() {
		let mut image = image();
		image.truncate(563 * SECTOR_SIZE + 100);

		let report = inspect_image(&image).unwrap();
		assert!(
			report
				.anomalies
				.iter()
				.any(|a| matches!(a, Anomaly::UnalignedLength(_)))
		);
		assert!(
			report
				.anomalies
				.iter()
				.any(|a| matches!(a, Anomaly::PastEndOfImage(2)))
		);
	}

	#[test_log::test]
	fn not_an_image() {
		let err = inspect_image(&vec![0; 600 * SECTOR_SIZE]).unwrap_err();
		assert!(matches!(
			err.kind(),
			ErrorKind::Toc(TocError::SignatureMismatch { .. })
		));

		let err = inspect_image(&[0; 100]).unwrap_err();
		assert!(matches!(
			err.kind(),
			ErrorKind::Toc(TocError::BadSectorSize(0))
		));
	}

	#[test_log::test]
	fn missing_area_toc() {
		let mut image = image();
		image[540 * SECTOR_SIZE..541 * SECTOR_SIZE].fill(0);

		let report = inspect_image(&image).unwrap();
		assert!(report.area_toc.is_none());
		assert!(
			report
				.anomalies
				.iter()
				.any(|a| matches!(a, Anomaly::AreaTocUnreadable(_)))
		);
	}
}
