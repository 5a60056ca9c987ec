/// Errors raised while laying out the grid or reading the image.
///
/// All of them are configuration errors: they depend only on the grid size,
/// the bin count and the image dimensions, never on pixel values.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("grid size {0} is not a non-zero perfect square")]
    GridNotSquare(usize),

    #[error("{got} bins requested, the uniform pattern table has {expected}")]
    BinCount { got: usize, expected: usize },

    #[error("image {width}x{height} cannot be split into a {side}x{side} grid")]
    GridTooFine { width: usize, height: usize, side: usize },

    #[error("image {width}x{height} is smaller than one 3x3 neighbourhood")]
    ImageTooSmall { width: usize, height: usize },

    #[error("pixel buffer holds {got} bytes, {width}x{height} needs {expected}")]
    BufferSize {
        width: usize,
        height: usize,
        got: usize,
        expected: usize,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
