use crate::fixtures::{self, DSD64};

use sacdkit::config::{BuildOptions, OverflowPolicy, ParseOptions};
use sacdkit::dsd::{self, DsdFormat, DsdTrack};
use sacdkit::error::ErrorKind;
use sacdkit::image;
use sacdkit::sacd_toc::{AreaToc, DiscDate, MasterToc, SECTOR_SIZE};

fn sector(image: &[u8], n: usize) -> &[u8] {
	&image[n * SECTOR_SIZE..(n + 1) * SECTOR_SIZE]
}

#[test_log::test]
fn mixed_containers() {
	let dir = tempfile::tempdir().unwrap();
	let paths = [
		fixtures::write(dir.path(), "01.dsf", &fixtures::dsf_seconds(1)),
		fixtures::write(dir.path(), "02.dff", &fixtures::dff_seconds(2)),
		fixtures::write(dir.path(), "03.dsf", &fixtures::dsf_seconds(1)),
	];

	let date = DiscDate::new(2024, 6, 1).unwrap();
	let options = BuildOptions::new().album_title("Mixed").disc_date(date);
	let image = image::build_image_from_paths(&paths, ParseOptions::new(), &options).unwrap();

	assert_eq!(image.len() % SECTOR_SIZE, 0);

	let master_toc = MasterToc::parse(sector(&image, 510)).unwrap();
	assert_eq!(master_toc.album_title(), "Mixed");
	assert_eq!(master_toc.disc_date, date);
	assert!(!master_toc.is_multichannel());

	let area_toc = AreaToc::parse(sector(&image, 540)).unwrap();
	assert_eq!(area_toc.track_count(), 3);

	let mut expected_start = 560;
	for (entry, path) in area_toc.entries().iter().zip(&paths) {
		let data = std::fs::read(path).unwrap();
		let format = DsdFormat::from_path(path).unwrap();
		let track = dsd::parse(&data, Some(format), ParseOptions::new()).unwrap();
		let payload = dsd::extract_raw_audio(&data, format, ParseOptions::new()).unwrap();

		assert_eq!(entry.start_sector, expected_start);
		assert_eq!(u64::from(entry.length_sectors), track.sector_length());

		let start = entry.start_sector as usize * SECTOR_SIZE;
		assert_eq!(&image[start..start + payload.len()], payload);

		let end = entry.end_sector() as usize * SECTOR_SIZE;
		assert!(image[start + payload.len()..end].iter().all(|b| *b == 0));

		expected_start += entry.length_sectors;
	}

	assert_eq!(image.len(), expected_start as usize * SECTOR_SIZE);
}

#[test_log::test]
fn multichannel() {
	let data = fixtures::dsf(DSD64, 6, u64::from(DSD64), 100_000);
	let track = dsd::parse(&data, None, ParseOptions::new()).unwrap();
	let payload = dsd::extract_raw_audio(&data, DsdFormat::Dsf, ParseOptions::new()).unwrap();

	let options = BuildOptions::new().multichannel(true);
	let image = image::build(&[track], &[payload], &options).unwrap();

	let master_toc = MasterToc::parse(sector(&image, 510)).unwrap();
	assert!(master_toc.is_multichannel());
	assert!(master_toc.two_channel.is_empty());
	assert_eq!(master_toc.multichannel.primary_sector, 540);
	assert_eq!(master_toc.multichannel.backup_sector, 541);
	assert_eq!(master_toc.multichannel.size_sectors, 1);
}

#[test_log::test]
fn deterministic() {
	let dir = tempfile::tempdir().unwrap();
	let paths = [
		fixtures::write(dir.path(), "a.dff", &fixtures::dff_seconds(1)),
		fixtures::write(dir.path(), "b.dsf", &fixtures::dsf_seconds(1)),
	];

	let options = BuildOptions::new().album_title("Twice");
	let first = image::build_image_from_paths(&paths, ParseOptions::new(), &options).unwrap();
	let second = image::build_image_from_paths(&paths, ParseOptions::new(), &options).unwrap();

	assert_eq!(first, second);

	// An unspecified date is stored as zeroes
	assert_eq!(&first[510 * SECTOR_SIZE + 0x78..510 * SECTOR_SIZE + 0x7C], &[0; 4]);
}

#[test_log::test]
fn empty_track_list() {
	let paths: [&str; 0] = [];
	let err = image::build_image_from_paths(&paths, ParseOptions::new(), &BuildOptions::new())
		.unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::EmptyTrackList));
}

#[test_log::test]
fn one_bad_track_fails_the_build() {
	let dir = tempfile::tempdir().unwrap();

	// Rename the audio chunk, the last "DSD " in the file
	let mut broken = fixtures::dff_seconds(1);
	let audio = broken.windows(4).rposition(|w| w == b"DSD ").unwrap();
	assert!(audio > 16);
	broken[audio..audio + 4].copy_from_slice(b"XXXX");

	let paths = [
		fixtures::write(dir.path(), "good.dsf", &fixtures::dsf_seconds(1)),
		fixtures::write(dir.path(), "bad.dff", &broken),
	];

	let err = image::build_image_from_paths(&paths, ParseOptions::new(), &BuildOptions::new())
		.unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::ChunkNotFound(_)));
}

#[test_log::test]
fn too_many_tracks() {
	let tracks = vec![DsdTrack::new(DsdFormat::Dsf, DSD64, 2, u64::from(DSD64), 2048); 21];
	let payloads = vec![vec![0; 2048]; 21];

	let err = image::build(&tracks, &payloads, &BuildOptions::new()).unwrap_err();
	assert!(matches!(
		err.kind(),
		ErrorKind::Toc(sacdkit::sacd_toc::TocError::UnsupportedTrackCount(21))
	));

	// The maximum is fine
	assert!(image::build(&tracks[..20], &payloads[..20], &BuildOptions::new()).is_ok());
}

#[test_log::test]
fn long_tracks() {
	let minutes_256 = u64::from(DSD64) * 60 * 256;
	let tracks = [DsdTrack::new(DsdFormat::Dff, DSD64, 2, minutes_256, 2048)];
	let payloads = [vec![0; 2048]];

	let err = image::build(&tracks, &payloads, &BuildOptions::new()).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::Toc(_)));

	let saturate = BuildOptions::new().duration_overflow(OverflowPolicy::Saturate);
	let image = image::build(&tracks, &payloads, &saturate).unwrap();

	let area_toc = AreaToc::parse(sector(&image, 540)).unwrap();
	assert_eq!(area_toc.entries()[0].minutes, 255);
	assert_eq!(area_toc.entries()[0].seconds, 59);
}

#[test_log::test]
fn degenerate_track() {
	let dir = tempfile::tempdir().unwrap();

	// Zero samples
	let path = fixtures::write(dir.path(), "empty.dsf", &fixtures::dsf(DSD64, 2, 0, 100));

	let err = image::build_image_from_paths(&[path], ParseOptions::new(), &BuildOptions::new())
		.unwrap_err();
	assert!(matches!(
		err.kind(),
		ErrorKind::DegenerateTrack(1, "duration is shorter than one second")
	));
}

#[test_log::test]
fn sub_second_track() {
	// 0.5 seconds, which an Area TOC entry would store as 0:00
	let tracks = [DsdTrack::new(DsdFormat::Dsf, DSD64, 2, u64::from(DSD64) / 2, 4096)];
	let payloads = [vec![0; 4096]];

	let err = image::build(&tracks, &payloads, &BuildOptions::new()).unwrap_err();
	assert!(matches!(
		err.kind(),
		ErrorKind::DegenerateTrack(1, "duration is shorter than one second")
	));
}
