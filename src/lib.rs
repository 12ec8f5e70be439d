pub mod node;

pub use node::*;

use node::buffer::PixelBuffer;
use node::error::{BufferError, CompressError};

use std::path::Path;

/// What a decomposition produced, for reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Summary {
	pub width: u32,
	pub height: u32,
	/// Side of the padding square the tree is rooted on.
	pub root_size: u32,
	/// Number of flat-color blocks in the mosaic.
	pub leaves: usize,
	pub depth: u32,
}

/// Builds the quadtree over `input` and paints it into a buffer of the same
/// dimensions. The tree is dropped only once painting has finished.
fn decompose(input: &PixelBuffer, threshold: u8) -> Result<(PixelBuffer, Summary), BufferError> {
	let tree = QuadtreeNode::from_buffer(input, threshold);
	let output = tree.to_buffer(input.width(), input.height())?;
	let summary = Summary {
		width: input.width(),
		height: input.height(),
		root_size: tree.size,
		leaves: tree.leaf_count(),
		depth: tree.depth(),
	};
	Ok((output, summary))
}

/// Approximates an RGBA image with a mosaic of flat-color squares.
///
/// Fully transparent pixels are treated as white. The result has the same
/// dimensions as `source` and no alpha channel.
pub fn compress(source: &image::RgbaImage, threshold: u8) -> Result<image::RgbImage, CompressError> {
	let input = PixelBuffer::from_rgba(source)?;
	let (output, _) = decompose(&input, threshold)?;
	Ok(output.to_rgb_image())
}

/// Reads any image the `image` crate can decode from `input`, compresses it
/// and writes the mosaic to `output` as an RGB PNG.
///
/// The output is always PNG, whatever extension `output` carries.
pub fn compress_file<P: AsRef<Path>, Q: AsRef<Path>>(
	input: P,
	output: Q,
	threshold: u8
) -> Result<Summary, CompressError> {
	let (input, output) = (input.as_ref(), output.as_ref());
	let source = image::open(input)
		.map_err(|source| CompressError::Decode { path: input.to_owned(), source })?
		.into_rgba8();
	log::info!("loaded {} ({}x{})", input.display(), source.width(), source.height());

	let pixels = PixelBuffer::from_rgba(&source)?;
	drop(source);
	let (mosaic, summary) = decompose(&pixels, threshold)?;
	drop(pixels);

	let (width, height) = (mosaic.width(), mosaic.height());
	image::save_buffer_with_format(
		output,
		&mosaic.into_raw(),
		width,
		height,
		image::ColorType::Rgb8,
		image::ImageFormat::Png,
	)
	.map_err(|source| CompressError::Encode { path: output.to_owned(), source })?;
	log::info!("wrote {} blocks to {}", summary.leaves, output.display());
	Ok(summary)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn transparent_regions_merge_with_white() {
		let mut source = image::RgbaImage::from_pixel(4, 4, image::Rgba([255, 255, 255, 255]));
		source.put_pixel(2, 1, image::Rgba([0, 0, 0, 0]));
		let out = compress(&source, THRESHOLD).unwrap();
		assert!(out.pixels().all(|p| *p == image::Rgb([255, 255, 255])));
	}

	#[test]
	fn summary_reports_padding() {
		let input = PixelBuffer::new(3, 5).unwrap();
		let (output, summary) = decompose(&input, THRESHOLD).unwrap();
		assert_eq!(output, input);
		assert_eq!(summary, Summary { width: 3, height: 5, root_size: 8, leaves: 1, depth: 0 });
	}
}
