//! Authoring and inspection of SACD disc images
//!
//! sacdkit turns DSD audio files (DSF or DFF) into a sector-accurate SACD image:
//!
//! * [`dsd`] decodes the containers, giving the sample rate, duration, and raw audio of each file
//! * [`toc`] lays the tracks out in an Area TOC and points a Master TOC at it
//! * [`image`] assembles the TOC copies and padded audio into the final image
//! * [`inspect`] reads an image back and reports anything that looks wrong
//!
//! The TOC sector codecs themselves live in the [`sacd_toc`] crate.
//!
//! # Examples
//!
//! ## Building an image
//!
//! ```rust,no_run
//! use sacdkit::config::{BuildOptions, ParseOptions, disc_date_today};
//! use sacdkit::image;
//!
//! # fn main() -> sacdkit::error::Result<()> {
//! let build_options = BuildOptions::new()
//! 	.album_title("Kind of Blue")
//! 	.disc_date(disc_date_today());
//!
//! image::build_image_to_path(
//! 	&["01.dsf", "02.dsf", "03.dsf"],
//! 	"album.iso",
//! 	ParseOptions::new(),
//! 	&build_options,
//! )?;
//! # Ok(()) }
//! ```
//!
//! ## Checking an image
//!
//! ```rust,no_run
//! use sacdkit::inspect;
//!
//! # fn main() -> sacdkit::error::Result<()> {
//! let image = std::fs::read("album.iso")?;
//! let report = inspect::inspect_image(&image)?;
//!
//! println!("Album: {}", report.master_toc.album_title());
//! for anomaly in &report.anomalies {
//! 	println!("{anomaly}");
//! }
//! # Ok(()) }
//! ```
//!
//! # Layout
//!
//! | Sectors           | Content                                 |
//! |-------------------|-----------------------------------------|
//! | `[0, 510)`        | Zeroed, reserved for a filesystem       |
//! | `[510, 513)`      | Master TOC, 3 identical copies          |
//! | `[513, 540)`      | Zeroed                                  |
//! | `[540, 540 + 2n)` | Area TOC and its backup, `n` sectors each |
//! | `[.., 560)`       | Zeroed                                  |
//! | `[560, ..)`       | Tracks, each padded to a whole sector   |
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod config;
pub mod dsd;
pub mod error;
pub mod image;
pub mod inspect;
pub(crate) mod macros;
pub mod toc;
mod util;

pub use sacd_toc;
