mod logger;

use quadtree_mosaic::error::CompressError;
use quadtree_mosaic::THRESHOLD;

use std::error::Error;

/// Helper function for `main`.
fn error_exit(msg: &str, code: i32) -> ! {
	eprintln!("{}", msg);
	std::process::exit(code)
}

/// `clap`-based CLI that turns an image into a quadtree mosaic PNG.
///
/// Exits with status code 1 on any failure: bad arguments, an unreadable
/// input, an allocation failure or an unwritable output.
fn main() {
	let clap_matches = match clap::App::new("quadtree_mosaic")
		.version(env!("CARGO_PKG_VERSION"))
		.author("vkcz")
		.about("Approximates an image with a mosaic of flat-color squares.")
		.arg_from_usage("-t, --threshold=[N] 'Largest per-channel range kept as one block; defaults to 30'")
		.arg_from_usage("-v, --verbose... 'Log more detail (repeat for debug and trace)'")
		.arg_from_usage("-q, --quiet 'Only log errors'")
		.arg_from_usage("<INPUT> 'Path to input image'")
		.arg_from_usage("<OUTPUT> 'Path to output PNG'")
		.get_matches_safe() {
		Ok(m) => m,
		Err(e) => match e.kind {
			clap::ErrorKind::HelpDisplayed | clap::ErrorKind::VersionDisplayed => e.exit(),
			_ => error_exit(&CompressError::Usage(e.message).to_string(), 1),
		}
	};

	logger::init(logger::level_for(
		clap_matches.occurrences_of("verbose"),
		clap_matches.is_present("quiet"),
	));

	let threshold = match clap_matches.value_of("threshold").map(str::parse::<u8>) {
		None => THRESHOLD,
		Some(Ok(n)) => n,
		Some(Err(_)) => error_exit(
			&CompressError::Usage("Threshold must be a number from 0 to 255".to_string()).to_string(),
			1
		),
	};
	// Both are required, so clap has already rejected a missing one.
	let input_path = clap_matches.value_of("INPUT").unwrap_or_default();
	let output_path = clap_matches.value_of("OUTPUT").unwrap_or_default();
	log::info!("compressing {} into {} (threshold {})", input_path, output_path, threshold);

	match quadtree_mosaic::compress_file(input_path, output_path, threshold) {
		Ok(summary) => {
			log::debug!(
				"{} blocks, depth {}, padded to {}",
				summary.leaves,
				summary.depth,
				summary.root_size
			);
			println!("Compressed image saved as: {}", output_path);
		},
		Err(e) => {
			if let Some(source) = e.source() {
				log::debug!("caused by: {}", source);
			}
			error_exit(&e.to_string(), 1)
		}
	}
}
