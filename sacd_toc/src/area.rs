use crate::{
	FIRST_TRACK_OFFSET, MAX_TRACK_COUNT, Result, TocError, VERSION_MAJOR, VERSION_MINOR,
	pad_to_sector, sectors_for,
};

use std::io::{Cursor, Read, Write};
use std::time::Duration;

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

const SIGNATURE: &[u8; 8] = b"SACDSTOC";
const HEADER_SIZE: usize = 20;
const ENTRY_SIZE: usize = 16;

/// The program area a TOC describes
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum AreaKind {
	/// The 2-channel stereo area
	#[default]
	TwoChannel,
	/// The multichannel area
	Multichannel,
}

impl AreaKind {
	fn as_u8(self) -> u8 {
		match self {
			AreaKind::TwoChannel => 0,
			AreaKind::Multichannel => 1,
		}
	}

	fn from_u8(value: u8) -> Self {
		if value == 1 {
			AreaKind::Multichannel
		} else {
			AreaKind::TwoChannel
		}
	}
}

/// What to do when a track is longer than 255 minutes
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum OverflowPolicy {
	/// Fail with [`TocError::DurationOverflow`]
	#[default]
	Error,
	/// Clamp the duration to 255:59
	Saturate,
}

/// The input needed to place a single track
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TrackSpan {
	/// The number of sectors the track's audio occupies
	pub sector_length: u32,
	/// The duration of the track
	pub duration: Duration,
	/// Whether the track's audio is DST encoded
	pub dst: bool,
}

/// A single 16 byte track record in an [`AreaToc`]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TrackEntry {
	/// The 1-based track number
	pub track_number: u8,
	/// Format flags, see [`TrackEntry::DST_ENCODED`]
	pub format_flags: u8,
	/// The absolute sector the track starts at
	pub start_sector: u32,
	/// The number of sectors the track occupies
	pub length_sectors: u32,
	/// Whole minutes of the track's duration
	pub minutes: u8,
	/// Remaining whole seconds of the track's duration
	pub seconds: u8,
}

impl TrackEntry {
	/// The track's audio is DST encoded rather than raw DSD
	pub const DST_ENCODED: u8 = 0x01;

	/// Whether the track's audio is DST encoded
	pub fn is_dst(&self) -> bool {
		self.format_flags & Self::DST_ENCODED != 0
	}

	/// The first sector *after* the track
	pub fn end_sector(&self) -> u64 {
		u64::from(self.start_sector) + u64::from(self.length_sectors)
	}

	/// The track's duration, truncated to whole seconds
	pub fn duration(&self) -> Duration {
		Duration::from_secs(u64::from(self.minutes) * 60 + u64::from(self.seconds))
	}

	fn write_to(&self, bytes: &mut Vec<u8>) -> Result<()> {
		bytes.write_u8(self.track_number)?;
		bytes.write_u8(self.format_flags)?;
		bytes.write_all(&[0; 2])?;
		bytes.write_u32::<BigEndian>(self.start_sector)?;
		bytes.write_u32::<BigEndian>(self.length_sectors)?;
		bytes.write_u8(self.minutes)?;
		bytes.write_u8(self.seconds)?;
		bytes.write_all(&[0; 2])?;
		Ok(())
	}

	fn read_from<R>(reader: &mut R) -> Result<Self>
	where
		R: Read,
	{
		let track_number = reader.read_u8()?;
		let format_flags = reader.read_u8()?;
		let _reserved = reader.read_u16::<BigEndian>()?;
		let start_sector = reader.read_u32::<BigEndian>()?;
		let length_sectors = reader.read_u32::<BigEndian>()?;
		let minutes = reader.read_u8()?;
		let seconds = reader.read_u8()?;
		let _reserved = reader.read_u16::<BigEndian>()?;

		Ok(Self {
			track_number,
			format_flags,
			start_sector,
			length_sectors,
			minutes,
			seconds,
		})
	}
}

/// An Area Table of Contents
///
/// Lists every track of a single program area. The encoded form is a 20 byte header followed
/// by one [`TrackEntry`] per track, zero-padded to a whole sector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AreaToc {
	/// The major version
	pub version_major: u8,
	/// The minor version
	pub version_minor: u8,
	kind: AreaKind,
	total_sectors: u32,
	entries: Vec<TrackEntry>,
}

impl AreaToc {
	/// Lay out `spans` contiguously, starting [`FIRST_TRACK_OFFSET`] sectors after `base_sector`
	///
	/// Each track starts where the previous one ended.
	///
	/// # Errors
	///
	/// * More than [`MAX_TRACK_COUNT`] spans
	/// * A duration of 256 minutes or more with [`OverflowPolicy::Error`]
	/// * A sector address that does not fit in 32 bits
	///
	/// # Examples
	///
	/// ```rust
	/// use sacd_toc::{AreaKind, AreaToc, OverflowPolicy, TrackSpan};
	/// use std::time::Duration;
	///
	/// let spans = [
	/// 	TrackSpan { sector_length: 100, duration: Duration::from_secs(60), dst: false },
	/// 	TrackSpan { sector_length: 50, duration: Duration::from_secs(30), dst: false },
	/// ];
	///
	/// let toc = AreaToc::from_spans(AreaKind::TwoChannel, 540, &spans, OverflowPolicy::Error)?;
	/// assert_eq!(toc.entries()[0].start_sector, 560);
	/// assert_eq!(toc.entries()[1].start_sector, 660);
	/// # Ok::<(), sacd_toc::TocError>(())
	/// ```
	pub fn from_spans(
		kind: AreaKind,
		base_sector: u32,
		spans: &[TrackSpan],
		overflow: OverflowPolicy,
	) -> Result<Self> {
		if spans.len() > MAX_TRACK_COUNT {
			return Err(TocError::UnsupportedTrackCount(spans.len()));
		}

		let first_sector = base_sector
			.checked_add(FIRST_TRACK_OFFSET)
			.ok_or(TocError::SectorOverflow)?;

		let mut entries = Vec::with_capacity(spans.len());
		let end_sector = spans
			.iter()
			.enumerate()
			.try_fold(first_sector, |start_sector, (idx, span)| {
				// Bounded by `MAX_TRACK_COUNT`
				let track_number = (idx + 1) as u8;
				let (minutes, seconds) = split_duration(track_number, span.duration, overflow)?;

				entries.push(TrackEntry {
					track_number,
					format_flags: if span.dst { TrackEntry::DST_ENCODED } else { 0 },
					start_sector,
					length_sectors: span.sector_length,
					minutes,
					seconds,
				});

				start_sector
					.checked_add(span.sector_length)
					.ok_or(TocError::SectorOverflow)
			})?;

		Ok(Self {
			version_major: VERSION_MAJOR,
			version_minor: VERSION_MINOR,
			kind,
			total_sectors: end_sector - first_sector,
			entries,
		})
	}

	/// The area this TOC describes
	pub fn kind(&self) -> AreaKind {
		self.kind
	}

	/// The number of tracks
	pub fn track_count(&self) -> usize {
		self.entries.len()
	}

	/// The track entries, in track order
	pub fn entries(&self) -> &[TrackEntry] {
		&self.entries
	}

	/// The total number of audio sectors in the area, as recorded in the header
	pub fn total_sectors(&self) -> u32 {
		self.total_sectors
	}

	/// The number of sectors the encoded TOC occupies
	pub fn sector_count(&self) -> u32 {
		sectors_for((HEADER_SIZE + self.entries.len() * ENTRY_SIZE) as u64) as u32
	}

	/// Convert the `AreaToc` to bytes for writing
	///
	/// The output is zero-padded to a whole number of sectors.
	///
	/// # Errors
	///
	/// This only fails if writing to the underlying `Vec` fails, which it will not in practice.
	pub fn as_bytes(&self) -> Result<Vec<u8>> {
		let mut bytes = Vec::with_capacity(self.sector_count() as usize * crate::SECTOR_SIZE);

		bytes.write_all(SIGNATURE)?;
		bytes.write_u8(self.version_major)?;
		bytes.write_u8(self.version_minor)?;
		bytes.write_u16::<BigEndian>(self.entries.len() as u16)?;
		bytes.write_u8(self.kind.as_u8())?;
		bytes.write_all(&[0; 3])?;
		bytes.write_u32::<BigEndian>(self.total_sectors)?;

		for entry in &self.entries {
			entry.write_to(&mut bytes)?;
		}

		pad_to_sector(&mut bytes);
		Ok(bytes)
	}

	/// Attempts to parse an `AreaToc` from a buffer
	///
	/// Only the header and the declared entries are read, trailing padding is ignored.
	///
	/// # Errors
	///
	/// * [`TocError::TruncatedToc`] if the header or the declared entries do not fit in `data`
	/// * [`TocError::SignatureMismatch`] if the buffer does not start with `SACDSTOC`
	/// * [`TocError::UnsupportedTrackCount`] if more than [`MAX_TRACK_COUNT`] tracks are declared
	pub fn parse(data: &[u8]) -> Result<Self> {
		if data.len() < HEADER_SIZE {
			return Err(TocError::TruncatedToc);
		}

		let mut reader = Cursor::new(data);

		let mut signature = [0; 8];
		reader.read_exact(&mut signature)?;
		if &signature != SIGNATURE {
			return Err(TocError::SignatureMismatch {
				expected: *SIGNATURE,
				found: signature,
			});
		}

		let version_major = reader.read_u8()?;
		let version_minor = reader.read_u8()?;

		let track_count = usize::from(reader.read_u16::<BigEndian>()?);
		if track_count > MAX_TRACK_COUNT {
			return Err(TocError::UnsupportedTrackCount(track_count));
		}

		if HEADER_SIZE + track_count * ENTRY_SIZE > data.len() {
			return Err(TocError::TruncatedToc);
		}

		let kind = AreaKind::from_u8(reader.read_u8()?);
		let mut reserved = [0; 3];
		reader.read_exact(&mut reserved)?;
		let total_sectors = reader.read_u32::<BigEndian>()?;

		let mut entries = Vec::with_capacity(track_count);
		for _ in 0..track_count {
			entries.push(TrackEntry::read_from(&mut reader)?);
		}

		Ok(Self {
			version_major,
			version_minor,
			kind,
			total_sectors,
			entries,
		})
	}
}

fn split_duration(track: u8, duration: Duration, overflow: OverflowPolicy) -> Result<(u8, u8)> {
	let whole_seconds = duration.as_secs();
	let minutes = whole_seconds / 60;
	let seconds = (whole_seconds % 60) as u8;

	match u8::try_from(minutes) {
		Ok(minutes) => Ok((minutes, seconds)),
		Err(_) => match overflow {
			OverflowPolicy::Error => Err(TocError::DurationOverflow { track, minutes }),
			OverflowPolicy::Saturate => Ok((u8::MAX, 59)),
		},
	}
}

#[cfg(test)]
mod tests {
	use crate::{AreaKind, AreaToc, OverflowPolicy, SECTOR_SIZE, TocError, TrackEntry, TrackSpan};
	use std::time::Duration;

	fn span(sector_length: u32, secs: u64) -> TrackSpan {
		TrackSpan {
			sector_length,
			duration: Duration::from_secs(secs),
			dst: false,
		}
	}

	#[test]
	fn contiguous_layout() {
		let toc = AreaToc::from_spans(
			AreaKind::TwoChannel,
			540,
			&[span(100, 61), span(50, 30), span(7, 1)],
			OverflowPolicy::Error,
		)
		.unwrap();

		let entries = toc.entries();
		assert_eq!(entries[0].start_sector, 560);
		assert_eq!(entries[0].length_sectors, 100);
		assert_eq!((entries[0].minutes, entries[0].seconds), (1, 1));
		assert_eq!(entries[1].start_sector, 660);
		assert_eq!(entries[2].start_sector, 710);
		assert_eq!(toc.total_sectors(), 157);

		for pair in entries.windows(2) {
			assert_eq!(pair[1].start_sector, pair[0].start_sector + pair[0].length_sectors);
		}
	}

	#[test]
	fn encoded_layout() {
		let toc = AreaToc::from_spans(
			AreaKind::Multichannel,
			540,
			&[span(0x0102, 125)],
			OverflowPolicy::Error,
		)
		.unwrap();

		let bytes = toc.as_bytes().unwrap();
		assert_eq!(bytes.len(), SECTOR_SIZE);
		assert_eq!(&bytes[..8], b"SACDSTOC");
		assert_eq!(&bytes[8..10], &[1, 20]);
		assert_eq!(&bytes[10..12], &[0, 1]);
		assert_eq!(bytes[12], 1);

		let entry = &bytes[20..36];
		assert_eq!(entry[0], 1);
		assert_eq!(entry[1], 0);
		assert_eq!(&entry[4..8], &560_u32.to_be_bytes());
		assert_eq!(&entry[8..12], &0x0102_u32.to_be_bytes());
		assert_eq!(&entry[12..14], &[2, 5]);
		assert!(bytes[36..].iter().all(|b| *b == 0));
	}

	#[test]
	fn empty_area() {
		let toc =
			AreaToc::from_spans(AreaKind::TwoChannel, 540, &[], OverflowPolicy::Error).unwrap();
		let bytes = toc.as_bytes().unwrap();

		assert_eq!(bytes.len(), SECTOR_SIZE);
		assert_eq!(toc.sector_count(), 1);

		let parsed = AreaToc::parse(&bytes).unwrap();
		assert_eq!(parsed.track_count(), 0);
	}

	#[test]
	fn parse_back() {
		let spans = [span(100, 300), span(50, 10)];
		let toc =
			AreaToc::from_spans(AreaKind::TwoChannel, 540, &spans, OverflowPolicy::Error).unwrap();
		let parsed = AreaToc::parse(&toc.as_bytes().unwrap()).unwrap();

		assert_eq!(parsed, toc);
		assert_eq!(parsed.entries()[0].duration(), Duration::from_secs(300));
	}

	#[test]
	fn dst_flag() {
		let mut dst = span(10, 10);
		dst.dst = true;

		let toc =
			AreaToc::from_spans(AreaKind::TwoChannel, 540, &[dst], OverflowPolicy::Error).unwrap();
		assert!(toc.entries()[0].is_dst());
		assert_eq!(toc.entries()[0].format_flags, TrackEntry::DST_ENCODED);
	}

	#[test]
	fn minute_overflow() {
		let long = span(1, 256 * 60);

		let err = AreaToc::from_spans(AreaKind::TwoChannel, 540, &[long], OverflowPolicy::Error)
			.unwrap_err();
		assert!(matches!(
			err,
			TocError::DurationOverflow {
				track: 1,
				minutes: 256
			}
		));

		let toc = AreaToc::from_spans(AreaKind::TwoChannel, 540, &[long], OverflowPolicy::Saturate)
			.unwrap();
		assert_eq!((toc.entries()[0].minutes, toc.entries()[0].seconds), (255, 59));

		// 255:59 is the longest representable duration
		let limit = span(1, 255 * 60 + 59);
		assert!(
			AreaToc::from_spans(AreaKind::TwoChannel, 540, &[limit], OverflowPolicy::Error).is_ok()
		);
	}

	#[test]
	fn too_many_tracks() {
		let spans = vec![span(1, 1); 21];
		let err = AreaToc::from_spans(AreaKind::TwoChannel, 540, &spans, OverflowPolicy::Error)
			.unwrap_err();
		assert!(matches!(err, TocError::UnsupportedTrackCount(21)));

		let mut bytes = AreaToc::from_spans(AreaKind::TwoChannel, 540, &[], OverflowPolicy::Error)
			.unwrap()
			.as_bytes()
			.unwrap();
		bytes[10..12].copy_from_slice(&21_u16.to_be_bytes());
		assert!(matches!(
			AreaToc::parse(&bytes),
			Err(TocError::UnsupportedTrackCount(21))
		));
	}

	#[test]
	fn truncated() {
		assert!(matches!(
			AreaToc::parse(b"SACDSTOC"),
			Err(TocError::TruncatedToc)
		));

		let toc = AreaToc::from_spans(
			AreaKind::TwoChannel,
			540,
			&[span(1, 1), span(1, 1)],
			OverflowPolicy::Error,
		)
		.unwrap();
		let bytes = toc.as_bytes().unwrap();

		// Header + one of the two declared entries
		assert!(matches!(
			AreaToc::parse(&bytes[..36]),
			Err(TocError::TruncatedToc)
		));
		assert!(AreaToc::parse(&bytes[..52]).is_ok());
	}

	#[test]
	fn bad_signature() {
		let mut bytes = AreaToc::from_spans(AreaKind::TwoChannel, 540, &[], OverflowPolicy::Error)
			.unwrap()
			.as_bytes()
			.unwrap();
		bytes[..8].copy_from_slice(b"SACDMTOC");

		assert!(matches!(
			AreaToc::parse(&bytes),
			Err(TocError::SignatureMismatch { found, .. }) if &found == b"SACDMTOC"
		));
	}

	#[test]
	fn sector_overflow() {
		let err = AreaToc::from_spans(
			AreaKind::TwoChannel,
			u32::MAX - 30,
			&[span(100, 1)],
			OverflowPolicy::Error,
		)
		.unwrap_err();
		assert!(matches!(err, TocError::SectorOverflow));
	}
}
