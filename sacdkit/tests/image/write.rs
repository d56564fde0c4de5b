use crate::fixtures;

use sacdkit::config::{BuildOptions, ParseOptions};
use sacdkit::image;

#[test_log::test]
fn write_then_read() {
	let dir = tempfile::tempdir().unwrap();
	let track = fixtures::write(dir.path(), "01.dsf", &fixtures::dsf_seconds(1));
	let output = dir.path().join("album.iso");

	image::build_image_to_path(&[&track], &output, ParseOptions::new(), &BuildOptions::new())
		.unwrap();

	let written = std::fs::read(&output).unwrap();
	let built =
		image::build_image_from_paths(&[&track], ParseOptions::new(), &BuildOptions::new())
			.unwrap();
	assert_eq!(written, built);
}

#[test_log::test]
fn failed_build_leaves_output_untouched() {
	let dir = tempfile::tempdir().unwrap();
	let output = dir.path().join("album.iso");
	std::fs::write(&output, b"previous image").unwrap();

	let bad = fixtures::write(dir.path(), "bad.dsf", b"DSD not really");
	let result =
		image::build_image_to_path(&[&bad], &output, ParseOptions::new(), &BuildOptions::new());
	assert!(result.is_err());

	assert_eq!(std::fs::read(&output).unwrap(), b"previous image");

	// No temporary files are left behind
	let entries = std::fs::read_dir(dir.path()).unwrap().count();
	assert_eq!(entries, 2);
}

#[test_log::test]
fn overwrite() {
	let dir = tempfile::tempdir().unwrap();
	let output = dir.path().join("album.iso");
	std::fs::write(&output, vec![0xFF; 10]).unwrap();

	image::write_image_to_path(&[1, 2, 3], &output).unwrap();
	assert_eq!(std::fs::read(&output).unwrap(), [1, 2, 3]);
}
