#![no_main]

use libfuzzer_sys::fuzz_target;
use sacd_toc::AreaToc;

fuzz_target!(|data: Vec<u8>| {
	if let Ok(toc) = AreaToc::parse(&data) {
		let _ = toc.as_bytes();
	}
});
