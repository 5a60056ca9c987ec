//! Local Binary Pattern descriptors of grayscale face crops.
//!
//! A [`GrayImage`] is split into a square grid of cells; every pixel of a cell
//! is thresholded against its 8 neighbours and the resulting code is binned
//! through the [`UniformPatterns`] table into a per-cell [`Histogram`] row.

pub mod error;
pub mod histogram;
pub mod image;
pub mod uniform;

pub use error::{Error, Result};
pub use histogram::{GridLayout, Histogram, build_histogram, neighborhood_code};
pub use image::GrayImage;
pub use uniform::{BINS, NON_UNIFORM_BIN, UniformPatterns};
