#![allow(missing_docs)]

use sacdkit::config::{
	BuildOptions, DffSampleCount, OverflowPolicy, ParseOptions, ParsingMode, disc_date_today,
};
use sacdkit::image;
use sacdkit::sacd_toc::DiscDate;

use structopt::StructOpt;

use std::path::PathBuf;

#[derive(Debug, StructOpt)]
#[structopt(name = "sacd_build", about = "Build an SACD image from DSF/DFF files")]
struct Opt {
	/// Album title, only the first 16 characters are kept
	#[structopt(short, long, default_value = "")]
	title: String,

	/// Build a multichannel area instead of a 2-channel one
	#[structopt(short, long)]
	multichannel: bool,

	/// Stamp the image with today's date instead of leaving it unspecified
	#[structopt(long)]
	today: bool,

	/// Disc date as YYYY-MM-DD
	#[structopt(long, conflicts_with = "today")]
	date: Option<String>,

	/// Reject anything that is not a standard DSD file
	#[structopt(long)]
	strict: bool,

	/// Estimate DFF durations from the file size
	#[structopt(long)]
	estimate_dff: bool,

	/// Clamp tracks of 256 minutes or more to 255:59
	#[structopt(long)]
	saturate: bool,

	#[structopt(short, long, parse(from_os_str))]
	output: PathBuf,

	#[structopt(parse(from_os_str), required = true)]
	tracks: Vec<PathBuf>,
}

fn parse_date(date: &str) -> Option<DiscDate> {
	let mut parts = date.splitn(3, '-');
	let year = parts.next()?.parse().ok()?;
	let month = parts.next()?.parse().ok()?;
	let day = parts.next()?.parse().ok()?;

	DiscDate::new(year, month, day).ok()
}

fn main() {
	env_logger::init();

	let opt = Opt::from_args();

	let disc_date = match (&opt.date, opt.today) {
		(Some(date), _) => match parse_date(date) {
			Some(date) => date,
			None => {
				eprintln!("ERROR: Invalid date `{date}`, expected YYYY-MM-DD");
				std::process::exit(1);
			},
		},
		(None, true) => disc_date_today(),
		(None, false) => DiscDate::UNSPECIFIED,
	};

	let mut parse_options = ParseOptions::new();
	if opt.strict {
		parse_options.parsing_mode(ParsingMode::Strict);
	}
	if opt.estimate_dff {
		parse_options.dff_sample_count(DffSampleCount::FileSizeEstimate);
	}

	let build_options = BuildOptions::new()
		.album_title(opt.title)
		.multichannel(opt.multichannel)
		.disc_date(disc_date)
		.duration_overflow(if opt.saturate {
			OverflowPolicy::Saturate
		} else {
			OverflowPolicy::Error
		});

	if let Err(e) =
		image::build_image_to_path(&opt.tracks, &opt.output, parse_options, &build_options)
	{
		eprintln!("ERROR: Failed to build image: {e}");
		std::process::exit(1);
	}

	println!(
		"Wrote {} track(s) to {}",
		opt.tracks.len(),
		opt.output.display()
	);
}
