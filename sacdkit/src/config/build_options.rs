use sacd_toc::{DiscDate, OverflowPolicy};

use time::OffsetDateTime;

/// Options to control how an image is built
///
/// Nothing in an image depends on the environment it was built in. In particular, the disc date
/// defaults to [`DiscDate::UNSPECIFIED`], so building the same tracks twice produces identical
/// bytes. Use [`disc_date_today`] to stamp the current date explicitly.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct BuildOptions {
	pub(crate) album_title: String,
	pub(crate) multichannel: bool,
	pub(crate) disc_date: DiscDate,
	pub(crate) duration_overflow: OverflowPolicy,
}

impl Default for BuildOptions {
	/// The default implementation for `BuildOptions`
	///
	/// The defaults are as follows:
	///
	/// ```rust,ignore
	/// BuildOptions {
	/// 	album_title: String::new(),
	/// 	multichannel: false,
	/// 	disc_date: DiscDate::UNSPECIFIED,
	/// 	duration_overflow: OverflowPolicy::Error,
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}

impl BuildOptions {
	/// Creates a new `BuildOptions`, alias for `Default` implementation
	///
	/// See also: [`BuildOptions::default`]
	///
	/// # Examples
	///
	/// ```rust
	/// use sacdkit::config::BuildOptions;
	///
	/// let build_options = BuildOptions::new();
	/// ```
	#[must_use]
	pub const fn new() -> Self {
		Self {
			album_title: String::new(),
			multichannel: false,
			disc_date: DiscDate::UNSPECIFIED,
			duration_overflow: OverflowPolicy::Error,
		}
	}

	/// The album title to store in the Master TOC
	///
	/// Only the first 16 ASCII characters are kept.
	///
	/// # Examples
	///
	/// ```rust
	/// use sacdkit::config::BuildOptions;
	///
	/// let build_options = BuildOptions::new().album_title("Kind of Blue");
	/// ```
	#[must_use]
	pub fn album_title(mut self, album_title: impl Into<String>) -> Self {
		self.album_title = album_title.into();
		self
	}

	/// Whether the tracks make up a multichannel area rather than a 2-channel one
	///
	/// # Examples
	///
	/// ```rust
	/// use sacdkit::config::BuildOptions;
	///
	/// // These are 5.1 masters
	/// let build_options = BuildOptions::new().multichannel(true);
	/// ```
	#[must_use]
	pub fn multichannel(mut self, multichannel: bool) -> Self {
		self.multichannel = multichannel;
		self
	}

	/// The disc date to store in the Master TOC
	///
	/// # Examples
	///
	/// ```rust
	/// use sacdkit::config::{BuildOptions, disc_date_today};
	///
	/// let build_options = BuildOptions::new().disc_date(disc_date_today());
	/// ```
	#[must_use]
	pub fn disc_date(mut self, disc_date: DiscDate) -> Self {
		self.disc_date = disc_date;
		self
	}

	/// What to do with tracks of 256 minutes or more
	///
	/// # Examples
	///
	/// ```rust
	/// use sacdkit::config::{BuildOptions, OverflowPolicy};
	///
	/// // Clamp overly long tracks to 255:59 instead of failing
	/// let build_options = BuildOptions::new().duration_overflow(OverflowPolicy::Saturate);
	/// ```
	#[must_use]
	pub fn duration_overflow(mut self, duration_overflow: OverflowPolicy) -> Self {
		self.duration_overflow = duration_overflow;
		self
	}
}

/// The current UTC date, for use with [`BuildOptions::disc_date`]
///
/// # Examples
///
/// ```rust
/// use sacdkit::config::disc_date_today;
///
/// let today = disc_date_today();
/// assert!(today.year >= 2024);
/// ```
pub fn disc_date_today() -> DiscDate {
	let now = OffsetDateTime::now_utc();

	DiscDate {
		year: u16::try_from(now.year()).unwrap_or(0),
		month: u8::from(now.month()),
		day: now.day(),
	}
}
