use super::error::BufferError;

/// A single RGB sample.
pub type Color = image::Rgb<u8>;

/// Color written in place of fully transparent pixels.
pub const WHITE: Color = image::Rgb([255; 3]);

/// Fixed-size grid of RGB samples, stored row-major in one allocation.
///
/// Every access is checked against `[0, height) x [0, width)`.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer {
	width: u32,
	height: u32,
	pixels: Vec<Color>,
}

impl PixelBuffer {
	/// Allocates a black buffer of the given dimensions.
	///
	/// Storage is reserved fallibly so that running out of memory surfaces as
	/// `BufferError::Allocation` instead of an abort inside the allocator.
	pub fn new(width: u32, height: u32) -> Result<Self, BufferError> {
		if width == 0 || height == 0 {
			return Err(BufferError::EmptyDimensions { width, height });
		}
		let len = (width as usize)
			.checked_mul(height as usize)
			.ok_or(BufferError::Allocation { width, height })?;
		let mut pixels = Vec::new();
		pixels
			.try_reserve_exact(len)
			.map_err(|_| BufferError::Allocation { width, height })?;
		pixels.resize(len, image::Rgb([0; 3]));
		Ok(Self { width, height, pixels })
	}

	/// Builds a buffer from interleaved 8-bit samples.
	///
	/// `channels` must be 3 (RGB) or 4 (RGBA). With an alpha channel, any
	/// pixel whose alpha is exactly zero becomes white, whatever its stored
	/// color; alpha is otherwise ignored.
	pub fn from_samples(
		width: u32,
		height: u32,
		channels: u8,
		samples: &[u8]
	) -> Result<Self, BufferError> {
		if channels != 3 && channels != 4 {
			return Err(BufferError::UnsupportedChannels(channels));
		}
		let mut buffer = Self::new(width, height)?;
		let expected = buffer.pixels.len() * channels as usize;
		if samples.len() != expected {
			return Err(BufferError::SampleCount { expected, actual: samples.len() });
		}
		for (pixel, chunk) in buffer.pixels.iter_mut().zip(samples.chunks_exact(channels as usize)) {
			*pixel = if channels == 4 && chunk[3] == 0 {
				WHITE
			} else {
				image::Rgb([chunk[0], chunk[1], chunk[2]])
			};
		}
		Ok(buffer)
	}

	/// Copies a decoded RGBA image, applying the transparency rule.
	pub fn from_rgba(img: &image::RgbaImage) -> Result<Self, BufferError> {
		Self::from_samples(img.width(), img.height(), 4, img.as_raw())
	}

	pub fn width(&self) -> u32 {
		self.width
	}

	pub fn height(&self) -> u32 {
		self.height
	}

	fn index(&self, row: u32, column: u32) -> Option<usize> {
		if row < self.height && column < self.width {
			Some(row as usize * self.width as usize + column as usize)
		} else {
			None
		}
	}

	/// Reads the pixel at `(row, column)`, or `None` if it is out of bounds.
	pub fn get(&self, row: u32, column: u32) -> Option<Color> {
		self.index(row, column).map(|i| self.pixels[i])
	}

	/// Writes the pixel at `(row, column)`.
	pub fn put(&mut self, row: u32, column: u32, color: Color) -> Result<(), BufferError> {
		match self.index(row, column) {
			Some(i) => {
				self.pixels[i] = color;
				Ok(())
			},
			None => Err(BufferError::OutOfBounds {
				row,
				column,
				width: self.width,
				height: self.height,
			}),
		}
	}

	/// Paints the square of side `size` at `(row, column)` with `color`,
	/// clipped to the buffer. Returns how many pixels were written.
	pub fn fill(&mut self, row: u32, column: u32, size: u32, color: Color) -> usize {
		let row_end = row.saturating_add(size).min(self.height);
		let col_end = column.saturating_add(size).min(self.width);
		if row >= row_end || column >= col_end {
			return 0;
		}
		let width = self.width as usize;
		for r in row..row_end {
			let start = r as usize * width;
			self.pixels[start + column as usize..start + col_end as usize]
				.iter_mut()
				.for_each(|p| *p = color);
		}
		(row_end - row) as usize * (col_end - column) as usize
	}

	/// Row-major RGB bytes with a stride of `width * 3`.
	pub fn into_raw(self) -> Vec<u8> {
		self.pixels.iter().flat_map(|p| p.0.iter().copied()).collect()
	}

	/// Copies the buffer into an `image` crate RGB image for encoding.
	pub fn to_rgb_image(&self) -> image::RgbImage {
		let width = self.width as usize;
		image::RgbImage::from_fn(self.width, self.height, |x, y| self.pixels[y as usize * width + x as usize])
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rejects_empty_dimensions() {
		assert!(matches!(
			PixelBuffer::new(0, 4),
			Err(BufferError::EmptyDimensions { width: 0, height: 4 })
		));
	}

	#[test]
	fn access_is_bounds_checked() {
		let mut buf = PixelBuffer::new(3, 2).unwrap();
		assert!(buf.put(1, 2, image::Rgb([1, 2, 3])).is_ok());
		assert_eq!(buf.get(1, 2), Some(image::Rgb([1, 2, 3])));
		assert_eq!(buf.get(2, 0), None);
		assert_eq!(buf.get(0, 3), None);
		assert!(matches!(
			buf.put(0, 3, WHITE),
			Err(BufferError::OutOfBounds { row: 0, column: 3, .. })
		));
	}

	#[test]
	fn transparent_pixels_become_white() {
		let samples = [
			10, 20, 30, 0,
			10, 20, 30, 255,
			40, 50, 60, 1,
		];
		let buf = PixelBuffer::from_samples(3, 1, 4, &samples).unwrap();
		assert_eq!(buf.get(0, 0), Some(WHITE));
		assert_eq!(buf.get(0, 1), Some(image::Rgb([10, 20, 30])));
		assert_eq!(buf.get(0, 2), Some(image::Rgb([40, 50, 60])));
	}

	#[test]
	fn rgb_samples_have_no_transparency() {
		let buf = PixelBuffer::from_samples(1, 1, 3, &[0, 0, 0]).unwrap();
		assert_eq!(buf.get(0, 0), Some(image::Rgb([0, 0, 0])));
	}

	#[test]
	fn sample_shape_is_validated() {
		assert!(matches!(
			PixelBuffer::from_samples(2, 2, 4, &[0; 15]),
			Err(BufferError::SampleCount { expected: 16, actual: 15 })
		));
		assert!(matches!(
			PixelBuffer::from_samples(2, 2, 2, &[0; 8]),
			Err(BufferError::UnsupportedChannels(2))
		));
	}

	#[test]
	fn fill_is_clipped() {
		let mut buf = PixelBuffer::new(3, 5).unwrap();
		assert_eq!(buf.fill(4, 2, 4, WHITE), 1);
		assert_eq!(buf.get(4, 2), Some(WHITE));
		assert_eq!(buf.fill(5, 0, 4, WHITE), 0);
		assert_eq!(buf.fill(0, 0, 2, WHITE), 4);
	}

	#[test]
	fn raw_output_is_row_major() {
		let mut buf = PixelBuffer::new(2, 2).unwrap();
		buf.put(0, 1, image::Rgb([1, 1, 1])).unwrap();
		buf.put(1, 0, image::Rgb([2, 2, 2])).unwrap();
		let img = buf.to_rgb_image();
		assert_eq!(img.get_pixel(1, 0), &image::Rgb([1, 1, 1]));
		assert_eq!(img.get_pixel(0, 1), &image::Rgb([2, 2, 2]));
		assert_eq!(buf.into_raw(), vec![0, 0, 0, 1, 1, 1, 2, 2, 2, 0, 0, 0]);
	}
}
