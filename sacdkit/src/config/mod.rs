//! Various configuration options to control sacdkit

mod build_options;
mod global_options;
mod parse_options;

pub use build_options::{BuildOptions, disc_date_today};
pub use global_options::{GlobalOptions, apply_global_options};
pub use parse_options::{DffSampleCount, DsfAudioStart, ParseOptions, ParsingMode};

pub(crate) use global_options::global_options;

pub use sacd_toc::OverflowPolicy;
