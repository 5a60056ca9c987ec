use crate::error::{Error, Result};

/// Row-major 8-bit grayscale pixel buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImage {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl GrayImage {
    pub fn new(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self> {
        let expected: usize = width * height;
        if pixels.len() != expected {
            return Err(Error::BufferSize {
                width,
                height,
                got: pixels.len(),
                expected,
            });
        }
        Ok(Self { width, height, pixels })
    }

    /// Image of constant intensity.
    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self {
            width,
            height,
            pixels: vec![value; width * height],
        }
    }

    /// Builds an image by evaluating `f(row, col)` at every pixel.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> u8) -> Self {
        let mut pixels: Vec<u8> = Vec::with_capacity(width * height);
        (0..height).for_each(|row| (0..width).for_each(|col| pixels.push(f(row, col))));
        Self { width, height, pixels }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline(always)]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        debug_assert!(row < self.height && col < self.width);
        self.pixels[row * self.width + col]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }
}
