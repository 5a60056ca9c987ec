use std::ops::Range;

use itertools::izip;

use crate::error::{Error, Result};
use crate::image::GrayImage;
use crate::uniform::{BINS, UniformPatterns};

/// Split of an image into `side x side` cells.
///
/// Cell `(r, c)` spans rows `[r * H / side, (r + 1) * H / side)` and columns
/// `[c * W / side, (c + 1) * W / side)`; cells are numbered row-major.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridLayout {
    width: usize,
    height: usize,
    side: usize,
}

impl GridLayout {
    pub fn new(width: usize, height: usize, grid_size: usize) -> Result<Self> {
        let side: usize = grid_size.isqrt();
        if grid_size == 0 || side * side != grid_size {
            return Err(Error::GridNotSquare(grid_size));
        }
        if width < 3 || height < 3 {
            return Err(Error::ImageTooSmall { width, height });
        }
        if side > width || side > height {
            return Err(Error::GridTooFine { width, height, side });
        }
        Ok(Self { width, height, side })
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn cells(&self) -> usize {
        self.side * self.side
    }

    pub fn rows(&self, cell: usize) -> Range<usize> {
        let r: usize = cell / self.side;
        r * self.height / self.side..(r + 1) * self.height / self.side
    }

    pub fn cols(&self, cell: usize) -> Range<usize> {
        let c: usize = cell % self.side;
        c * self.width / self.side..(c + 1) * self.width / self.side
    }

    /// Centre pixels of a cell: its rows and columns, minus the outermost
    /// ring of the image whose neighbourhoods would fall outside it.
    pub fn centres(&self, cell: usize) -> (Range<usize>, Range<usize>) {
        let rows: Range<usize> = self.rows(cell);
        let cols: Range<usize> = self.cols(cell);
        (
            rows.start.max(1)..rows.end.min(self.height - 1),
            cols.start.max(1)..cols.end.min(self.width - 1),
        )
    }

    /// Pixel count of the largest cell, an upper bound on any bin count.
    pub fn max_cell_pixels(&self) -> usize {
        self.width.div_ceil(self.side) * self.height.div_ceil(self.side)
    }
}

/// Per-cell LBP counts: one row of [`BINS`] counts per grid cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Histogram {
    cells: usize,
    counts: Vec<u32>,
}

impl Histogram {
    pub fn zero(cells: usize) -> Self {
        Self {
            cells,
            counts: vec![0; cells * BINS],
        }
    }

    /// Rebuilds a histogram from its row-major flattening.
    pub fn from_flat(cells: usize, counts: Vec<u32>) -> Option<Self> {
        (counts.len() == cells * BINS).then_some(Self { cells, counts })
    }

    pub fn cells(&self) -> usize {
        self.cells
    }

    pub fn row(&self, cell: usize) -> &[u32] {
        &self.counts[cell * BINS..(cell + 1) * BINS]
    }

    fn row_mut(&mut self, cell: usize) -> &mut [u32] {
        &mut self.counts[cell * BINS..(cell + 1) * BINS]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.counts.chunks_exact(BINS)
    }

    /// Row-major concatenation of all rows.
    pub fn flat(&self) -> &[u32] {
        &self.counts
    }

    pub fn into_flat(self) -> Vec<u32> {
        self.counts
    }
}

/// LBP code of the pixel at `(row, col)`, which must not lie on the image border.
#[inline(always)]
pub fn neighborhood_code(image: &GrayImage, row: usize, col: usize) -> u8 {
    let centre: u8 = image.get(row, col);
    let neighbours: [u8; 8] = [
        image.get(row - 1, col - 1),
        image.get(row - 1, col),
        image.get(row - 1, col + 1),
        image.get(row, col + 1),
        image.get(row + 1, col + 1),
        image.get(row + 1, col),
        image.get(row + 1, col - 1),
        image.get(row, col - 1),
    ];
    let weights: [u8; 8] = [1 << 7, 1 << 6, 1 << 5, 1 << 4, 1 << 3, 1 << 2, 1 << 1, 1];
    let mut code: u8 = 0;
    izip!(neighbours.iter(), weights.iter()).for_each(|(&n, &w)| {
        if n >= centre {
            code |= w;
        }
    });
    code
}

/// Builds the grid histogram of `image` with `grid_size` cells of `bins` bins.
pub fn build_histogram(image: &GrayImage, grid_size: usize, bins: usize, patterns: &UniformPatterns) -> Result<Histogram> {
    if bins != BINS {
        return Err(Error::BinCount { got: bins, expected: BINS });
    }
    let layout: GridLayout = GridLayout::new(image.width(), image.height(), grid_size)?;
    let mut histogram: Histogram = Histogram::zero(layout.cells());

    (0..layout.cells()).for_each(|cell| {
        let (rows, cols) = layout.centres(cell);
        let counts: &mut [u32] = histogram.row_mut(cell);
        rows.for_each(|row| {
            cols.clone().for_each(|col| {
                counts[patterns.bin(neighborhood_code(image, row, col)) as usize] += 1;
            })
        });
    });

    tracing::debug!(
        width = image.width(),
        height = image.height(),
        cells = layout.cells(),
        "built lbp histogram"
    );
    Ok(histogram)
}

#[cfg(test)]
mod tests {
    use super::{GridLayout, Histogram, build_histogram, neighborhood_code};
    use crate::error::Error;
    use crate::image::GrayImage;
    use crate::uniform::{BINS, NON_UNIFORM_BIN, UniformPatterns};

    #[test]
    fn grid_size_must_be_square() {
        [0usize, 2, 3, 15, 17].iter().for_each(|&g| {
            assert_eq!(GridLayout::new(256, 256, g), Err(Error::GridNotSquare(g)));
        });
        assert!(GridLayout::new(256, 256, 16).is_ok());
        assert!(GridLayout::new(256, 256, 1).is_ok());
    }

    #[test]
    fn rejects_wrong_bin_count() {
        let img: GrayImage = GrayImage::filled(16, 16, 0);
        assert_eq!(
            build_histogram(&img, 4, 58, UniformPatterns::shared()),
            Err(Error::BinCount { got: 58, expected: BINS })
        );
    }

    #[test]
    fn rejects_degenerate_images() {
        assert_eq!(GridLayout::new(2, 8, 1), Err(Error::ImageTooSmall { width: 2, height: 8 }));
        assert_eq!(
            GridLayout::new(8, 8, 81),
            Err(Error::GridTooFine {
                width: 8,
                height: 8,
                side: 9
            })
        );
    }

    #[test]
    fn cells_tile_the_image() {
        let layout: GridLayout = GridLayout::new(256, 256, 16).unwrap();
        assert_eq!(layout.side(), 4);
        assert_eq!(layout.rows(0), 0..64);
        assert_eq!(layout.cols(7), 192..256);
        assert_eq!(layout.rows(7), 64..128);
        assert_eq!(layout.max_cell_pixels(), 4096);
        assert_eq!(layout.centres(0), (1..64, 1..64));
        assert_eq!(layout.centres(5), (64..128, 64..128));
        assert_eq!(layout.centres(15), (192..255, 192..255));
    }

    #[test]
    fn constant_image_fills_one_bin() {
        // Every neighbour equals the centre and counts as >= it: code 0xFF.
        let img: GrayImage = GrayImage::filled(256, 256, 128);
        let hist: Histogram = build_histogram(&img, 16, BINS, UniformPatterns::shared()).unwrap();
        assert_eq!(hist.cells(), 16);
        assert_eq!(hist.flat().len(), 16 * BINS);
        let bin: usize = UniformPatterns::shared().bin(0xFF) as usize;
        let layout: GridLayout = GridLayout::new(256, 256, 16).unwrap();
        hist.rows().enumerate().for_each(|(cell, row)| {
            let (rows, cols) = layout.centres(cell);
            assert_eq!(row[bin] as usize, rows.len() * cols.len());
            assert_eq!(row.iter().sum::<u32>(), row[bin]);
        });
        // corner, edge, interior
        assert_eq!(hist.row(0)[bin], 63 * 63);
        assert_eq!(hist.row(1)[bin], 63 * 64);
        assert_eq!(hist.row(5)[bin], 64 * 64);
    }

    #[test]
    fn neighbour_bits() {
        // Centre 100 with only the top-left and left neighbours brighter.
        let img: GrayImage = GrayImage::from_fn(3, 3, |r, c| match (r, c) {
            (1, 1) => 100,
            (0, 0) | (1, 0) => 200,
            _ => 50,
        });
        assert_eq!(neighborhood_code(&img, 1, 1), 0b1000_0001);

        // A bright centre sees no neighbour at or above it.
        let img: GrayImage = GrayImage::from_fn(3, 3, |r, c| if (r, c) == (1, 1) { 255 } else { 0 });
        assert_eq!(neighborhood_code(&img, 1, 1), 0);
    }

    #[test]
    fn checkerboard_is_non_uniform() {
        let img: GrayImage = GrayImage::from_fn(32, 32, |r, c| if (r + c) % 2 == 0 { 200 } else { 10 });
        let hist: Histogram = build_histogram(&img, 4, BINS, UniformPatterns::shared()).unwrap();
        // Bright centres only see their bright diagonals: 0b1010_1010 is not
        // uniform. Dark centres see every neighbour at or above them: 0xFF.
        let total: u32 = hist.flat().iter().sum();
        assert_eq!(total, 30 * 30);
        assert_eq!(hist.row(0)[NON_UNIFORM_BIN as usize], 113);
        assert_eq!(hist.row(0)[NON_UNIFORM_BIN as usize - 1], 112);
        assert_eq!(hist.row(0)[..57].iter().sum::<u32>(), 0);
    }

    #[test]
    fn from_flat_round_trips() {
        let img: GrayImage = GrayImage::from_fn(64, 64, |r, c| ((r * 7 + c * 13) % 251) as u8);
        let hist: Histogram = build_histogram(&img, 4, BINS, UniformPatterns::shared()).unwrap();
        let again: Histogram = Histogram::from_flat(4, hist.flat().to_vec()).unwrap();
        assert_eq!(hist, again);
        assert!(Histogram::from_flat(4, vec![0; 10]).is_none());
    }
}
