//! Scan conversion: fills a flattened outline into a binary coverage
//! grid by horizontal-scanline intersection, the first pass of the
//! oversample-then-downsample antialiasing pipeline in [`crate::gray`]
//! and [`crate::lcd`].

use fontcore_geom::Vector;

/// Which pixels count as "inside" when a scanline crosses the outline
/// an odd vs. a signed number of times.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FillRule {
    NonZero,
    EvenOdd,
}

struct Edge {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
}

/// A rectangular grid of booleans, one per oversampled subpixel.
pub struct ScanConverter {
    width: usize,
    height: usize,
    covered: Vec<bool>,
}

impl ScanConverter {
    pub fn new(width: usize, height: usize) -> ScanConverter {
        ScanConverter {
            width,
            height,
            covered: vec![false; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_covered(&self, x: usize, y: usize) -> bool {
        self.covered[y * self.width + x]
    }

    /// Rasterize already-flattened, closed polylines given in this
    /// converter's local pixel-center coordinate space.
    pub fn fill(&mut self, contours: &[Vec<Vector>], rule: FillRule) {
        let edges: Vec<Edge> = contours
            .iter()
            .flat_map(|c| c.windows(2))
            .filter(|w| w[0].y.raw() != w[1].y.raw())
            .map(|w| Edge {
                x0: w[0].x.to_f64(),
                y0: w[0].y.to_f64(),
                x1: w[1].x.to_f64(),
                y1: w[1].y.to_f64(),
            })
            .collect();
        if edges.is_empty() {
            return;
        }
        for row in 0..self.height {
            let y = row as f64 + 0.5;
            let mut crossings: Vec<(f64, i32)> = edges
                .iter()
                .filter_map(|e| {
                    let (y0, y1) = (e.y0, e.y1);
                    let crosses = (y0 <= y && y < y1) || (y1 <= y && y < y0);
                    if !crosses {
                        return None;
                    }
                    let t = (y - y0) / (y1 - y0);
                    let x = e.x0 + t * (e.x1 - e.x0);
                    let dir = if y1 > y0 { 1 } else { -1 };
                    Some((x, dir))
                })
                .collect();
            crossings.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut winding = 0i32;
            let mut span_start = 0.0f64;
            for (x, dir) in crossings {
                let inside = match rule {
                    FillRule::NonZero => winding != 0,
                    FillRule::EvenOdd => winding.rem_euclid(2) != 0,
                };
                if inside {
                    self.fill_span(row, span_start, x);
                }
                winding += dir;
                span_start = x;
            }
        }
    }

    fn fill_span(&mut self, row: usize, x0: f64, x1: f64) {
        if x1 <= x0 {
            return;
        }
        let start = x0.floor().max(0.0) as usize;
        let end = (x1.ceil().min(self.width as f64)) as usize;
        for col in start..end.min(self.width) {
            let center = col as f64 + 0.5;
            if center >= x0 && center < x1 {
                self.covered[row * self.width + col] = true;
            }
        }
    }
}
