//! Building and reading the TOC sectors of an image
//!
//! This connects decoded [`DsdTrack`]s to the sector codecs of [`sacd_toc`].

use crate::dsd::DsdTrack;
use crate::error::Result;
use crate::macros::err;

use sacd_toc::{
	AreaKind, AreaPointer, AreaToc, DiscDate, MasterToc, OverflowPolicy, SECTOR_SIZE, TocError,
	TrackSpan,
};

/// Convert decoded tracks into the spans an [`AreaToc`] is laid out from
///
/// # Errors
///
/// * A track would produce a non-functional entry ([`ErrorKind::DegenerateTrack`](crate::error::ErrorKind::DegenerateTrack))
/// * A track is longer than `u32::MAX` sectors
pub fn track_spans(tracks: &[DsdTrack]) -> Result<Vec<TrackSpan>> {
	let mut spans = Vec::with_capacity(tracks.len());

	for (idx, track) in tracks.iter().enumerate() {
		if let Some(reason) = track.degenerate_reason() {
			log::error!("Track {} is unusable: {reason}", idx + 1);
			err!(DegenerateTrack(idx + 1, reason));
		}

		let Ok(sector_length) = u32::try_from(track.sector_length()) else {
			return Err(TocError::SectorOverflow.into());
		};

		spans.push(TrackSpan {
			sector_length,
			duration: track.duration(),
			dst: track.is_dst(),
		});
	}

	Ok(spans)
}

/// Lay out an [`AreaToc`] for `tracks`, with the area starting at `base_sector`
///
/// The first track starts [`FIRST_TRACK_OFFSET`](sacd_toc::FIRST_TRACK_OFFSET) sectors after
/// `base_sector`, and every following track starts where the previous one ended.
///
/// # Errors
///
/// * See [`track_spans`]
/// * See [`AreaToc::from_spans`]
///
/// # Examples
///
/// ```rust
/// use sacdkit::config::OverflowPolicy;
/// use sacdkit::dsd::{DsdFormat, DsdTrack};
/// use sacdkit::toc;
///
/// # fn main() -> sacdkit::error::Result<()> {
/// let tracks = [
/// 	DsdTrack::new(DsdFormat::Dsf, 2_822_400, 2, 2_822_400, 100 * 2048),
/// 	DsdTrack::new(DsdFormat::Dsf, 2_822_400, 2, 2_822_400, 50 * 2048),
/// ];
///
/// let area_toc = toc::area_toc(&tracks, false, 540, OverflowPolicy::Error)?;
/// assert_eq!(area_toc.entries()[0].start_sector, 560);
/// assert_eq!(area_toc.entries()[1].start_sector, 660);
/// # Ok(()) }
/// ```
pub fn area_toc(
	tracks: &[DsdTrack],
	multichannel: bool,
	base_sector: u32,
	overflow: OverflowPolicy,
) -> Result<AreaToc> {
	let kind = if multichannel {
		AreaKind::Multichannel
	} else {
		AreaKind::TwoChannel
	};

	let spans = track_spans(tracks)?;
	Ok(AreaToc::from_spans(kind, base_sector, &spans, overflow)?)
}

/// Encode an Area TOC for `tracks`
///
/// The output is zero-padded to a whole number of sectors.
///
/// # Errors
///
/// See [`area_toc`]
pub fn encode_area_toc(
	tracks: &[DsdTrack],
	multichannel: bool,
	base_sector: u32,
	overflow: OverflowPolicy,
) -> Result<Vec<u8>> {
	let area_toc = area_toc(tracks, multichannel, base_sector, overflow)?;
	Ok(area_toc.as_bytes()?)
}

/// Create the [`MasterToc`] pointing at `area_toc`, located at `base_sector`
///
/// The recorded Area TOC size is the real size of `area_toc`, and its backup copy is assumed
/// to immediately follow the primary one.
///
/// # Errors
///
/// * The Area TOC is larger than `u16::MAX` sectors
pub fn master_toc(
	area_toc: &AreaToc,
	base_sector: u32,
	album_title: &str,
	disc_date: DiscDate,
) -> Result<MasterToc> {
	let Ok(size_sectors) = u16::try_from(area_toc.sector_count()) else {
		return Err(TocError::SectorOverflow.into());
	};

	Ok(MasterToc::new(
		album_title,
		area_toc.kind(),
		AreaPointer::new(base_sector, size_sectors),
		disc_date,
	))
}

/// Encode the Master TOC sector pointing at `area_toc`, located at `base_sector`
///
/// # Errors
///
/// See [`master_toc`]
///
/// # Examples
///
/// ```rust
/// use sacdkit::config::OverflowPolicy;
/// use sacdkit::dsd::{DsdFormat, DsdTrack};
/// use sacdkit::toc;
/// use sacd_toc::DiscDate;
///
/// # fn main() -> sacdkit::error::Result<()> {
/// let tracks = [DsdTrack::new(DsdFormat::Dff, 2_822_400, 6, 2_822_400, 4096)];
///
/// let area_toc = toc::area_toc(&tracks, true, 540, OverflowPolicy::Error)?;
/// let sector = toc::encode_master_toc(&area_toc, 540, "Album", DiscDate::UNSPECIFIED)?;
///
/// let master_toc = toc::decode_master_toc(&sector)?;
/// assert!(master_toc.is_multichannel());
/// assert_eq!(master_toc.album_title(), "Album");
/// # Ok(()) }
/// ```
pub fn encode_master_toc(
	area_toc: &AreaToc,
	base_sector: u32,
	album_title: &str,
	disc_date: DiscDate,
) -> Result<[u8; SECTOR_SIZE]> {
	let master_toc = master_toc(area_toc, base_sector, album_title, disc_date)?;
	Ok(master_toc.as_bytes()?)
}

/// Decode a Master TOC sector
///
/// # Errors
///
/// See [`MasterToc::parse`]
pub fn decode_master_toc(sector: &[u8]) -> Result<MasterToc> {
	Ok(MasterToc::parse(sector)?)
}

/// Decode an Area TOC
///
/// # Errors
///
/// See [`AreaToc::parse`]
pub fn decode_area_toc(data: &[u8]) -> Result<AreaToc> {
	Ok(AreaToc::parse(data)?)
}
