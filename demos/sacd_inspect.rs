#![allow(missing_docs)]

use sacdkit::inspect;

use structopt::StructOpt;

use std::path::PathBuf;

#[derive(Debug, StructOpt)]
#[structopt(name = "sacd_inspect", about = "Check the TOCs of an SACD image")]
struct Opt {
	/// Hex dump these sectors
	#[structopt(short, long)]
	dump: Vec<u64>,

	#[structopt(parse(from_os_str))]
	path: PathBuf,
}

fn main() {
	env_logger::init();

	let opt = Opt::from_args();

	let image = std::fs::read(&opt.path).expect("ERROR: Failed to read image!");
	let report = inspect::inspect_image(&image).expect("ERROR: Not an SACD image!");

	let master_toc = &report.master_toc;
	println!("--- Master TOC ---");
	println!(
		"Version: {}.{}",
		master_toc.version_major, master_toc.version_minor
	);
	println!("Album: {}", master_toc.album_title());
	let date = master_toc.disc_date;
	if date.is_unspecified() {
		println!("Date: unspecified");
	} else {
		println!("Date: {:04}-{:02}-{:02}", date.year, date.month, date.day);
	}

	if let Some((kind, pointer)) = master_toc.area() {
		println!(
			"Area: {kind:?} at sector {} (backup {}), {} sector(s)",
			pointer.primary_sector, pointer.backup_sector, pointer.size_sectors
		);
	}

	if let Some(area_toc) = &report.area_toc {
		println!("--- Area TOC ---");
		println!("Tracks: {}", area_toc.track_count());
		println!("Audio sectors: {}", area_toc.total_sectors());

		for entry in area_toc.entries() {
			println!(
				"{:>2}: sectors {:>8}..{:<8} {:>3}:{:02}{}",
				entry.track_number,
				entry.start_sector,
				entry.end_sector(),
				entry.minutes,
				entry.seconds,
				if entry.is_dst() { " (DST)" } else { "" }
			);
		}
	}

	println!("Image: {} sectors", report.image_sectors);

	if report.is_clean() {
		println!("No problems found");
	} else {
		println!("--- Problems ---");
		for anomaly in &report.anomalies {
			println!("{anomaly}");
		}
	}

	for sector in opt.dump {
		let region = report
			.layout
			.as_ref()
			.map(|layout| layout.region_of(sector).to_string())
			.unwrap_or_else(|| String::from("unknown"));

		println!("--- Sector {sector} ({region}) ---");
		match inspect::dump_sector(&image, sector) {
			Ok(dump) => print!("{dump}"),
			Err(e) => eprintln!("ERROR: {e}"),
		}
	}
}
