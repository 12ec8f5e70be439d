use std::path::PathBuf;

use thiserror::Error;

/// Reason why a pixel buffer couldn't be created or accessed.
#[derive(Debug, Error)]
pub enum BufferError {
	/// Either dimension is zero.
	#[error("buffer dimensions must be positive, got {width}x{height}")]
	EmptyDimensions { width: u32, height: u32 },
	/// The backing storage couldn't be reserved.
	#[error("could not allocate a {width}x{height} pixel buffer")]
	Allocation { width: u32, height: u32 },
	/// A read or write fell outside `[0, height) x [0, width)`.
	#[error("pixel ({row}, {column}) lies outside a {width}x{height} buffer")]
	OutOfBounds { row: u32, column: u32, width: u32, height: u32 },
	/// The sample slice doesn't match `width * height * channels`.
	#[error("expected {expected} samples, got {actual}")]
	SampleCount { expected: usize, actual: usize },
	/// Only RGB and RGBA samples are understood.
	#[error("unsupported channel count {0}")]
	UnsupportedChannels(u8),
}

/// Reason why an image couldn't be turned into a mosaic.
#[derive(Debug, Error)]
pub enum CompressError {
	/// The command line was malformed.
	#[error("{0}")]
	Usage(String),
	/// The input file is missing, unreadable or in an unsupported format.
	#[error("Failed to load image: {}", path.display())]
	Decode {
		path: PathBuf,
		#[source]
		source: image::ImageError,
	},
	/// A pixel buffer couldn't be allocated. Not recoverable.
	#[error("Error allocating memory for a {width}x{height} image")]
	Allocation { width: u32, height: u32 },
	/// Any other buffer failure; indicates a bug in the caller.
	#[error(transparent)]
	Buffer(BufferError),
	/// The output file couldn't be written.
	#[error("Failed to save image: {}", path.display())]
	Encode {
		path: PathBuf,
		#[source]
		source: image::ImageError,
	},
}

impl From<BufferError> for CompressError {
	fn from(e: BufferError) -> Self {
		match e {
			BufferError::Allocation { width, height } => CompressError::Allocation { width, height },
			other => CompressError::Buffer(other),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn allocation_failure_is_distinguished() {
		let err: CompressError = BufferError::Allocation { width: 3, height: 5 }.into();
		assert!(matches!(err, CompressError::Allocation { width: 3, height: 5 }));

		let err: CompressError = BufferError::UnsupportedChannels(2).into();
		assert!(matches!(err, CompressError::Buffer(BufferError::UnsupportedChannels(2))));
	}

	#[test]
	fn messages_name_the_path() {
		let err = CompressError::Decode {
			path: PathBuf::from("missing.png"),
			source: image::ImageError::IoError(std::io::Error::from(std::io::ErrorKind::NotFound)),
		};
		assert_eq!(err.to_string(), "Failed to load image: missing.png");
	}
}
