use crate::{Result, TocError};

/// The disc creation date stored in the Master TOC
///
/// A zeroed date is valid on disc and means "unspecified", see [`DiscDate::UNSPECIFIED`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DiscDate {
	/// The year (ex. 2024)
	pub year: u16,
	/// The month, 1-12
	pub month: u8,
	/// The day of the month, 1-31
	pub day: u8,
}

impl DiscDate {
	/// A date with all components set to zero
	pub const UNSPECIFIED: Self = Self {
		year: 0,
		month: 0,
		day: 0,
	};

	/// Create a new `DiscDate`
	///
	/// # Errors
	///
	/// * `month` is not within `1..=12`
	/// * `day` is not a valid day of `month`
	///
	/// # Examples
	///
	/// ```rust
	/// use sacd_toc::DiscDate;
	///
	/// let date = DiscDate::new(2024, 2, 29)?;
	/// assert_eq!(date.year, 2024);
	///
	/// assert!(DiscDate::new(2023, 2, 29).is_err());
	/// # Ok::<(), sacd_toc::TocError>(())
	/// ```
	pub fn new(year: u16, month: u8, day: u8) -> Result<Self> {
		if !(1..=12).contains(&month) {
			return Err(TocError::BadDate("month must be within 1..=12"));
		}

		if day == 0 || day > days_in_month(year, month) {
			return Err(TocError::BadDate("day is out of range for the month"));
		}

		Ok(Self { year, month, day })
	}

	/// Whether all components are zero
	pub fn is_unspecified(self) -> bool {
		self == Self::UNSPECIFIED
	}

	pub(crate) fn to_bytes(self) -> [u8; 4] {
		let [y1, y2] = self.year.to_be_bytes();
		[y1, y2, self.month, self.day]
	}

	pub(crate) fn from_bytes(bytes: [u8; 4]) -> Self {
		Self {
			year: u16::from_be_bytes([bytes[0], bytes[1]]),
			month: bytes[2],
			day: bytes[3],
		}
	}
}

fn days_in_month(year: u16, month: u8) -> u8 {
	match month {
		4 | 6 | 9 | 11 => 30,
		2 if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) => 29,
		2 => 28,
		_ => 31,
	}
}
