use super::buffer::PixelBuffer;

impl super::QuadtreeNode {
	/// Paints every leaf's color over its square in `output`, descending
	/// depth-first in child order.
	///
	/// Parts of a square past the buffer's right or bottom edge are skipped,
	/// so the padding never reaches the output. Returns the number of pixels
	/// written; for a tree built over a buffer of the same dimensions this is
	/// exactly `width * height`, each pixel written once.
	pub fn paint(&self, output: &mut PixelBuffer) -> usize {
		match &self.sections {
			None => output.fill(self.row, self.column, self.size, self.color),
			Some(sects) => sects.iter().map(|section| section.paint(output)).sum(),
		}
	}

	/// Rasterizes the tree into a fresh buffer of the given dimensions.
	pub fn to_buffer(
		&self,
		width: u32,
		height: u32
	) -> Result<PixelBuffer, super::error::BufferError> {
		let mut output = PixelBuffer::new(width, height)?;
		let written = self.paint(&mut output);
		log::trace!("painted {} pixels", written);
		Ok(output)
	}
}
