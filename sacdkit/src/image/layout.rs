use sacd_toc::{
	AREA_TOC_SECTOR, AreaKind, AreaPointer, AreaToc, FIRST_TRACK_OFFSET, MASTER_TOC_COPIES,
	MASTER_TOC_SECTOR, TrackEntry,
};

use std::fmt::{Display, Formatter};
use std::ops::Range;

/// What a sector of an image holds
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Region {
	/// Reserved for a filesystem, zeroed by this crate
	Reserved,
	/// A copy of the Master TOC (0-based)
	MasterToc(u32),
	/// The primary Area TOC
	AreaToc(AreaKind),
	/// The backup Area TOC
	AreaTocBackup(AreaKind),
	/// Zero padding between the Area TOCs and the first track
	Padding,
	/// The audio of a track (1-based)
	Track(u8),
	/// Past the last track
	Unmapped,
}

impl Display for Region {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Region::Reserved => write!(f, "reserved"),
			Region::MasterToc(copy) => write!(f, "Master TOC (copy {})", copy + 1),
			Region::AreaToc(kind) => write!(f, "{kind:?} Area TOC"),
			Region::AreaTocBackup(kind) => write!(f, "{kind:?} Area TOC (backup)"),
			Region::Padding => write!(f, "padding"),
			Region::Track(number) => write!(f, "track {number}"),
			Region::Unmapped => write!(f, "unmapped"),
		}
	}
}

/// The sector map of an image
///
/// ```text
/// [0, 510)         reserved
/// [510, 513)       Master TOC x3
/// [513, 540)       reserved
/// [540, 540 + n)   Area TOC
/// [540 + n, 540 + 2n) Area TOC backup
/// [.., 560)        padding
/// [560, ..)        tracks, each padded to its sector length
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageLayout {
	area_kind: AreaKind,
	area_pointer: AreaPointer,
	tracks: Vec<TrackEntry>,
}

impl ImageLayout {
	/// Create the layout of an image with the area described by `area_pointer` and `area_toc`
	pub fn new(area_pointer: AreaPointer, area_toc: &AreaToc) -> Self {
		Self {
			area_kind: area_toc.kind(),
			area_pointer,
			tracks: area_toc.entries().to_vec(),
		}
	}

	/// The sectors holding the Master TOC copies
	///
	/// These are the same for every image.
	pub fn master_toc_sectors() -> Range<u64> {
		let start = u64::from(MASTER_TOC_SECTOR);
		start..start + u64::from(MASTER_TOC_COPIES)
	}

	/// The sectors holding the primary Area TOC
	pub fn area_toc_sectors(&self) -> Range<u64> {
		let start = u64::from(self.area_pointer.primary_sector);
		start..start + u64::from(self.area_pointer.size_sectors)
	}

	/// The sectors holding the backup Area TOC
	pub fn area_toc_backup_sectors(&self) -> Range<u64> {
		let start = u64::from(self.area_pointer.backup_sector);
		start..start + u64::from(self.area_pointer.size_sectors)
	}

	/// The sector the first track starts at
	pub fn first_track_sector(&self) -> u64 {
		match self.tracks.first() {
			Some(entry) => u64::from(entry.start_sector),
			None => u64::from(self.area_pointer.primary_sector) + u64::from(FIRST_TRACK_OFFSET),
		}
	}

	/// The track entries, in track order
	pub fn tracks(&self) -> &[TrackEntry] {
		&self.tracks
	}

	/// The number of sectors in the image
	pub fn total_sectors(&self) -> u64 {
		self.tracks
			.iter()
			.map(TrackEntry::end_sector)
			.fold(self.first_track_sector(), u64::max)
	}

	/// What `sector` holds
	///
	/// # Examples
	///
	/// ```rust
	/// use sacdkit::image::{ImageLayout, Region};
	/// use sacd_toc::{AreaKind, AreaPointer, AreaToc, OverflowPolicy, TrackSpan};
	/// use std::time::Duration;
	///
	/// # fn main() -> Result<(), sacd_toc::TocError> {
	/// let span = TrackSpan {
	/// 	sector_length: 100,
	/// 	duration: Duration::from_secs(60),
	/// 	dst: false,
	/// };
	/// let area_toc = AreaToc::from_spans(AreaKind::TwoChannel, 540, &[span], OverflowPolicy::Error)?;
	/// let layout = ImageLayout::new(AreaPointer::new(540, 1), &area_toc);
	///
	/// assert_eq!(layout.region_of(511), Region::MasterToc(1));
	/// assert_eq!(layout.region_of(541), Region::AreaTocBackup(AreaKind::TwoChannel));
	/// assert_eq!(layout.region_of(600), Region::Track(1));
	/// assert_eq!(layout.region_of(660), Region::Unmapped);
	/// # Ok(()) }
	/// ```
	pub fn region_of(&self, sector: u64) -> Region {
		let master = Self::master_toc_sectors();
		if master.contains(&sector) {
			return Region::MasterToc((sector - master.start) as u32);
		}

		if !self.area_pointer.is_empty() {
			if self.area_toc_sectors().contains(&sector) {
				return Region::AreaToc(self.area_kind);
			}

			if self.area_toc_backup_sectors().contains(&sector) {
				return Region::AreaTocBackup(self.area_kind);
			}
		}

		if let Some(entry) = self.tracks.iter().find(|entry| {
			(u64::from(entry.start_sector)..entry.end_sector()).contains(&sector)
		}) {
			return Region::Track(entry.track_number);
		}

		if sector >= self.total_sectors() {
			return Region::Unmapped;
		}

		if sector < u64::from(AREA_TOC_SECTOR) {
			return Region::Reserved;
		}

		Region::Padding
	}
}
