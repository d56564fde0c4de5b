use crate::fixtures;

use sacdkit::config::{BuildOptions, ParseOptions};
use sacdkit::image::{self, Region};
use sacdkit::inspect::{self, Anomaly};
use sacdkit::sacd_toc::SECTOR_SIZE;

fn built_image() -> Vec<u8> {
	let dir = tempfile::tempdir().unwrap();
	let paths = [
		fixtures::write(dir.path(), "01.dsf", &fixtures::dsf_seconds(2)),
		fixtures::write(dir.path(), "02.dff", &fixtures::dff_seconds(1)),
	];

	let options = BuildOptions::new().album_title("Inspected");
	image::build_image_from_paths(&paths, ParseOptions::new(), &options).unwrap()
}

#[test_log::test]
fn built_images_are_clean() {
	let image = built_image();
	let report = inspect::inspect_image(&image).unwrap();

	assert!(report.is_clean(), "{:?}", report.anomalies);
	assert_eq!(report.master_toc.album_title(), "Inspected");
	assert_eq!(report.image_sectors, (image.len() / SECTOR_SIZE) as u64);

	let area_toc = report.area_toc.as_ref().unwrap();
	let durations = area_toc
		.entries()
		.iter()
		.map(|entry| (entry.minutes, entry.seconds))
		.collect::<Vec<_>>();
	assert_eq!(durations, [(0, 2), (0, 1)]);

	let layout = report.layout.as_ref().unwrap();
	assert_eq!(layout.total_sectors(), report.image_sectors);
	assert_eq!(layout.region_of(0), Region::Reserved);
	assert_eq!(layout.region_of(560), Region::Track(1));
}

#[test_log::test]
fn zeroed_entries_are_reported() {
	let mut image = built_image();

	// Track 1's start sector, in both Area TOC copies
	for sector in [540, 541] {
		let entry = sector * SECTOR_SIZE + 20;
		image[entry + 4..entry + 8].fill(0);
	}

	let report = inspect::inspect_image(&image).unwrap();
	assert!(
		report
			.anomalies
			.iter()
			.any(|a| matches!(a, Anomaly::ZeroStartSector(1)))
	);

	for anomaly in &report.anomalies {
		log::info!("{anomaly}");
	}
}

#[test_log::test]
fn dump() {
	let image = built_image();

	let master = inspect::dump_sector(&image, 510).unwrap();
	assert!(master.starts_with("000FF000  53 41 43 44 4D 54 4F 43"));
	assert!(master.contains("|SACDMTOC"));

	let area = inspect::dump_sector(&image, 540).unwrap();
	assert!(area.contains("|SACDSTOC"));

	let last = (image.len() / SECTOR_SIZE) as u64;
	assert!(inspect::dump_sector(&image, last).is_err());
}
