pub mod buffer;
pub mod error;

use buffer::{Color, PixelBuffer};

/// Default per-channel range below which a region is kept as one block.
pub const THRESHOLD: u8 = 30;

/// Side of the padding square: the smallest power of two covering both
/// dimensions.
pub fn root_size(width: u32, height: u32) -> u32 {
	width.max(height).next_power_of_two()
}

/// Per-channel statistics over the in-bounds pixels of a square region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegionStats {
	pub min: [u8; 3],
	pub max: [u8; 3],
	pub sum: [u64; 3],
	/// Number of pixels sampled; zero for squares lying wholly in the padding.
	pub count: u64,
}

impl RegionStats {
	/// Scans the square of side `size` whose top-left corner is
	/// `start_pos` (row, column), skipping anything past the buffer's edges.
	pub fn sample(buffer: &PixelBuffer, start_pos: (u32, u32), size: u32) -> Self {
		let mut stats = RegionStats { min: [255; 3], max: [0; 3], sum: [0; 3], count: 0 };
		let row_end = start_pos.0.saturating_add(size).min(buffer.height());
		let col_end = start_pos.1.saturating_add(size).min(buffer.width());
		for row in start_pos.0..row_end {
			for column in start_pos.1..col_end {
				if let Some(pixel) = buffer.get(row, column) {
					for (ch, &value) in pixel.0.iter().enumerate() {
						stats.min[ch] = stats.min[ch].min(value);
						stats.max[ch] = stats.max[ch].max(value);
						stats.sum[ch] += value as u64;
					}
					stats.count += 1;
				}
			}
		}
		stats
	}

	/// Whether every channel's range stays within `threshold`.
	///
	/// Vacuously true for an empty region.
	pub fn is_homogeneous(&self, threshold: u8) -> bool {
		(0..3).all(|ch| self.max[ch].saturating_sub(self.min[ch]) <= threshold)
	}

	/// Truncated per-channel average, or black if nothing was sampled.
	pub fn mean(&self) -> Color {
		if self.count == 0 {
			return image::Rgb([0; 3]);
		}
		let mut color = [0u8; 3];
		for (ch, c) in color.iter_mut().enumerate() {
			*c = (self.sum[ch] / self.count) as u8;
		}
		image::Rgb(color)
	}
}

/// Node in a quadtree approximating an image.
///
/// A leaf (no `sections`) stands for a square painted in `color`. A branch
/// holds four half-size squares in the order top-left, bottom-left,
/// top-right, bottom-right; its own `color` is meaningless and left black.
///
/// Coordinates live in the padded space, so a node may extend past the
/// image's right and bottom edges.
#[derive(Clone, Debug, PartialEq)]
pub struct QuadtreeNode {
	pub row: u32,
	pub column: u32,
	pub size: u32,
	pub color: Color,
	pub sections: Option<Box<[QuadtreeNode; 4]>>,
}

impl QuadtreeNode {
	/// Decomposes a whole buffer, rooting the tree on the padding square.
	pub fn from_buffer(buffer: &PixelBuffer, threshold: u8) -> Self {
		let size = root_size(buffer.width(), buffer.height());
		let tree = Self::build(buffer, (0, 0), size, threshold);
		log::debug!(
			"decomposed {}x{} image (padded to {}) into {} blocks, depth {}",
			buffer.width(),
			buffer.height(),
			size,
			tree.leaf_count(),
			tree.depth()
		);
		tree
	}

	/// Builds the subtree covering the square of side `size` at `start_pos`
	/// (row, column).
	///
	/// The square becomes a leaf when its channels all vary by at most
	/// `threshold`, when it is a single pixel, or when it lies entirely in the
	/// padding; otherwise it is split into four.
	pub fn build(buffer: &PixelBuffer, start_pos: (u32, u32), size: u32, threshold: u8) -> Self {
		let (row, column) = start_pos;
		let stats = RegionStats::sample(buffer, start_pos, size);
		if size <= 1 || stats.count == 0 || stats.is_homogeneous(threshold) {
			return Self { row, column, size, color: stats.mean(), sections: None };
		}
		log::trace!("splitting {}px square at ({}, {})", size, row, column);
		let half = size / 2;
		let positions = [
			(row, column),
			(row + half, column),
			(row, column + half),
			(row + half, column + half),
		];
		let sections = positions.map(|pos| Self::build(buffer, pos, half, threshold));
		Self {
			row,
			column,
			size,
			color: image::Rgb([0; 3]),
			sections: Some(Box::new(sections)),
		}
	}

	pub fn is_leaf(&self) -> bool {
		self.sections.is_none()
	}

	pub fn leaf_count(&self) -> usize {
		self.leaves().count()
	}

	pub fn node_count(&self) -> usize {
		match &self.sections {
			Some(sects) => 1 + sects.iter().map(QuadtreeNode::node_count).sum::<usize>(),
			None => 1,
		}
	}

	/// Number of levels below this node; zero for a leaf.
	pub fn depth(&self) -> u32 {
		match &self.sections {
			Some(sects) => 1 + sects.iter().map(QuadtreeNode::depth).max().unwrap_or(0),
			None => 0,
		}
	}

	/// Iterates over the leaves depth-first, in child order.
	pub fn leaves(&self) -> Leaves<'_> {
		Leaves { stack: vec![self] }
	}
}

/// Iterator returned by `QuadtreeNode::leaves`.
pub struct Leaves<'a> {
	stack: Vec<&'a QuadtreeNode>,
}

impl<'a> Iterator for Leaves<'a> {
	type Item = &'a QuadtreeNode;

	fn next(&mut self) -> Option<Self::Item> {
		while let Some(node) = self.stack.pop() {
			match &node.sections {
				Some(sects) => self.stack.extend(sects.iter().rev()),
				None => return Some(node),
			}
		}
		None
	}
}

pub mod raster;
