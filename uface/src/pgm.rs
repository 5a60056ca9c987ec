//! Binary greyscale PGM (`P5`) images with at most 8 bits per sample.

use std::path::Path;

use lbp::GrayImage;

use crate::error::{Error, Result};

/// Parses a `P5` image. Samples are taken as they are, without rescaling a
/// `maxval` below 255.
pub fn decode(data: &[u8]) -> Result<GrayImage> {
    if !data.starts_with(b"P5") {
        return Err(Error::malformed("pgm", "missing P5 magic"));
    }
    let mut pos: usize = 2;
    let width: usize = header_value(data, &mut pos, "width")?;
    let height: usize = header_value(data, &mut pos, "height")?;
    let maxval: usize = header_value(data, &mut pos, "maxval")?;
    if maxval == 0 || maxval > 255 {
        return Err(Error::malformed("pgm", format!("maxval {maxval} is not in 1..=255")));
    }

    // exactly one whitespace byte between the header and the raster
    match data.get(pos) {
        Some(b) if b.is_ascii_whitespace() => pos += 1,
        _ => return Err(Error::malformed("pgm", "no whitespace after the header")),
    }

    let len: usize = width
        .checked_mul(height)
        .ok_or_else(|| Error::malformed("pgm", "image dimensions overflow"))?;
    let raster: &[u8] = pos
        .checked_add(len)
        .and_then(|end| data.get(pos..end))
        .ok_or_else(|| Error::malformed("pgm", format!("raster holds {} of {len} bytes", data.len() - pos)))?;
    Ok(GrayImage::new(width, height, raster.to_vec())?)
}

/// Reads the next decimal header field, skipping whitespace and comments.
fn header_value(data: &[u8], pos: &mut usize, what: &'static str) -> Result<usize> {
    loop {
        match data.get(*pos) {
            Some(b'#') => {
                while data.get(*pos).is_some_and(|&b| b != b'\n') {
                    *pos += 1;
                }
            }
            Some(b) if b.is_ascii_whitespace() => *pos += 1,
            _ => break,
        }
    }
    let start: usize = *pos;
    while data.get(*pos).is_some_and(u8::is_ascii_digit) {
        *pos += 1;
    }
    std::str::from_utf8(&data[start..*pos])
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| Error::malformed("pgm", format!("bad {what} field")))
}

pub fn encode(image: &GrayImage) -> Vec<u8> {
    let mut out: Vec<u8> = format!("P5\n{} {}\n255\n", image.width(), image.height()).into_bytes();
    out.extend_from_slice(image.as_bytes());
    out
}

pub fn load(path: &Path) -> Result<GrayImage> {
    let image: GrayImage = decode(&std::fs::read(path)?)?;
    tracing::debug!(path = %path.display(), width = image.width(), height = image.height(), "loaded pgm");
    Ok(image)
}

pub fn save(path: &Path, image: &GrayImage) -> Result<()> {
    std::fs::write(path, encode(image))?;
    Ok(())
}
