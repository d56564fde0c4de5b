use crate::{AreaKind, DiscDate, Result, SECTOR_SIZE, TocError, VERSION_MAJOR, VERSION_MINOR};

use std::io::{Cursor, Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

const SIGNATURE: &[u8; 8] = b"SACDMTOC";

const ALBUM_SET_OFFSET: u64 = 0x10;
const ALBUM_CATALOG_OFFSET: u64 = 0x18;
const ALBUM_GENRE_OFFSET: u64 = 0x28;
const AREA_POINTERS_OFFSET: u64 = 0x40;
const AREA_SIZES_OFFSET: u64 = 0x54;
const DISC_DATE_OFFSET: u64 = 0x78;

const CATALOG_LEN: usize = 16;

/// The location of a program area's TOC copies
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct AreaPointer {
	/// The first sector of the primary Area TOC
	pub primary_sector: u32,
	/// The first sector of the backup Area TOC
	pub backup_sector: u32,
	/// The size of a single Area TOC copy, in sectors
	pub size_sectors: u16,
}

impl AreaPointer {
	/// Create an `AreaPointer` for a TOC of `size_sectors` at `primary_sector`
	///
	/// The backup copy immediately follows the primary one.
	///
	/// # Examples
	///
	/// ```rust
	/// use sacd_toc::AreaPointer;
	///
	/// let pointer = AreaPointer::new(540, 1);
	/// assert_eq!(pointer.backup_sector, 541);
	/// ```
	pub fn new(primary_sector: u32, size_sectors: u16) -> Self {
		Self {
			primary_sector,
			backup_sector: primary_sector.saturating_add(u32::from(size_sectors)),
			size_sectors,
		}
	}

	/// Whether the pointer is zeroed, meaning the area is absent
	pub fn is_empty(&self) -> bool {
		*self == Self::default()
	}
}

/// A Master Table of Contents
///
/// Exactly one of the two areas is populated, the other is zeroed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MasterToc {
	/// The major version
	pub version_major: u8,
	/// The minor version
	pub version_minor: u8,
	/// The number of discs in the album
	pub album_set_size: u16,
	/// The position of this disc in the album
	pub album_sequence_number: u16,
	album_catalog_number: [u8; CATALOG_LEN],
	/// Genre flags, currently always zeroed
	pub album_genre: [u8; 4],
	/// The 2-channel area
	pub two_channel: AreaPointer,
	/// The multichannel area
	pub multichannel: AreaPointer,
	/// The disc creation date
	pub disc_date: DiscDate,
}

impl MasterToc {
	/// Create a new `MasterToc` with a single populated area
	///
	/// `album_title` is stored in the 16 byte album catalog field. It is space padded, and any
	/// characters past the 16th byte are dropped. Non-ASCII characters are replaced with `?`.
	///
	/// # Examples
	///
	/// ```rust
	/// use sacd_toc::{AreaKind, AreaPointer, DiscDate, MasterToc};
	///
	/// let toc = MasterToc::new(
	/// 	"My Album",
	/// 	AreaKind::TwoChannel,
	/// 	AreaPointer::new(540, 1),
	/// 	DiscDate::UNSPECIFIED,
	/// );
	///
	/// assert_eq!(toc.album_title(), "My Album");
	/// assert!(!toc.is_multichannel());
	/// assert!(toc.multichannel.is_empty());
	/// ```
	pub fn new(album_title: &str, kind: AreaKind, area: AreaPointer, disc_date: DiscDate) -> Self {
		let (two_channel, multichannel) = match kind {
			AreaKind::TwoChannel => (area, AreaPointer::default()),
			AreaKind::Multichannel => (AreaPointer::default(), area),
		};

		Self {
			version_major: VERSION_MAJOR,
			version_minor: VERSION_MINOR,
			album_set_size: 1,
			album_sequence_number: 1,
			album_catalog_number: encode_catalog(album_title),
			album_genre: [0; 4],
			two_channel,
			multichannel,
			disc_date,
		}
	}

	/// The album title, with the space padding removed
	pub fn album_title(&self) -> String {
		String::from_utf8_lossy(&self.album_catalog_number)
			.trim_end_matches(' ')
			.to_string()
	}

	/// The raw, space padded album catalog field
	pub fn album_catalog_number(&self) -> &[u8; CATALOG_LEN] {
		&self.album_catalog_number
	}

	/// Whether the disc carries a multichannel area rather than a 2-channel one
	pub fn is_multichannel(&self) -> bool {
		!self.multichannel.is_empty()
	}

	/// The populated area, if any
	pub fn area(&self) -> Option<(AreaKind, AreaPointer)> {
		if !self.multichannel.is_empty() {
			return Some((AreaKind::Multichannel, self.multichannel));
		}

		if !self.two_channel.is_empty() {
			return Some((AreaKind::TwoChannel, self.two_channel));
		}

		None
	}

	/// Convert the `MasterToc` to a single sector for writing
	///
	/// # Errors
	///
	/// This only fails if writing to the in-memory sector fails, which it will not in practice.
	pub fn as_bytes(&self) -> Result<[u8; SECTOR_SIZE]> {
		let mut sector = [0; SECTOR_SIZE];
		let mut writer = Cursor::new(&mut sector[..]);

		writer.write_all(SIGNATURE)?;
		writer.write_u8(self.version_major)?;
		writer.write_u8(self.version_minor)?;

		writer.set_position(ALBUM_SET_OFFSET);
		writer.write_u16::<BigEndian>(self.album_set_size)?;
		writer.write_u16::<BigEndian>(self.album_sequence_number)?;

		writer.set_position(ALBUM_CATALOG_OFFSET);
		writer.write_all(&self.album_catalog_number)?;

		writer.set_position(ALBUM_GENRE_OFFSET);
		writer.write_all(&self.album_genre)?;

		writer.set_position(AREA_POINTERS_OFFSET);
		writer.write_u32::<BigEndian>(self.two_channel.primary_sector)?;
		writer.write_u32::<BigEndian>(self.two_channel.backup_sector)?;
		writer.write_u32::<BigEndian>(self.multichannel.primary_sector)?;
		writer.write_u32::<BigEndian>(self.multichannel.backup_sector)?;

		writer.set_position(AREA_SIZES_OFFSET);
		writer.write_u16::<BigEndian>(self.two_channel.size_sectors)?;
		writer.write_u16::<BigEndian>(self.multichannel.size_sectors)?;

		writer.set_position(DISC_DATE_OFFSET);
		writer.write_all(&self.disc_date.to_bytes())?;

		Ok(sector)
	}

	/// Attempts to parse a `MasterToc` from a sector
	///
	/// # Errors
	///
	/// * [`TocError::BadSectorSize`] if `data` is shorter than a sector
	/// * [`TocError::SignatureMismatch`] if the sector does not start with `SACDMTOC`
	pub fn parse(data: &[u8]) -> Result<Self> {
		if data.len() < SECTOR_SIZE {
			return Err(TocError::BadSectorSize(data.len()));
		}

		let mut reader = Cursor::new(&data[..SECTOR_SIZE]);

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

		reader.set_position(ALBUM_SET_OFFSET);
		let album_set_size = reader.read_u16::<BigEndian>()?;
		let album_sequence_number = reader.read_u16::<BigEndian>()?;

		reader.set_position(ALBUM_CATALOG_OFFSET);
		let mut album_catalog_number = [0; CATALOG_LEN];
		reader.read_exact(&mut album_catalog_number)?;

		reader.set_position(ALBUM_GENRE_OFFSET);
		let mut album_genre = [0; 4];
		reader.read_exact(&mut album_genre)?;

		reader.set_position(AREA_POINTERS_OFFSET);
		let two_channel_primary = reader.read_u32::<BigEndian>()?;
		let two_channel_backup = reader.read_u32::<BigEndian>()?;
		let multichannel_primary = reader.read_u32::<BigEndian>()?;
		let multichannel_backup = reader.read_u32::<BigEndian>()?;

		reader.set_position(AREA_SIZES_OFFSET);
		let two_channel_size = reader.read_u16::<BigEndian>()?;
		let multichannel_size = reader.read_u16::<BigEndian>()?;

		reader.set_position(DISC_DATE_OFFSET);
		let mut date = [0; 4];
		reader.read_exact(&mut date)?;

		Ok(Self {
			version_major,
			version_minor,
			album_set_size,
			album_sequence_number,
			album_catalog_number,
			album_genre,
			two_channel: AreaPointer {
				primary_sector: two_channel_primary,
				backup_sector: two_channel_backup,
				size_sectors: two_channel_size,
			},
			multichannel: AreaPointer {
				primary_sector: multichannel_primary,
				backup_sector: multichannel_backup,
				size_sectors: multichannel_size,
			},
			disc_date: DiscDate::from_bytes(date),
		})
	}
}

fn encode_catalog(title: &str) -> [u8; CATALOG_LEN] {
	let mut field = [b' '; CATALOG_LEN];

	let ascii = title
		.chars()
		.map(|c| if c.is_ascii() { c as u8 } else { b'?' })
		.take(CATALOG_LEN);

	for (dst, src) in field.iter_mut().zip(ascii) {
		*dst = src;
	}

	field
}
