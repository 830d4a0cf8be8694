//! Deterministic row-by-row placement.

use log::debug;
use rand::RngCore;

use umlgen_core::geometry::{BoxSize, ClassBox, Point};

use crate::layout::{
    Canvas, Error,
    engines::{PlacementEngine, check_space},
};

/// Places boxes on a grid of `ceil(sqrt(n))` columns.
///
/// Rows start at `(1, 1)`; each row is as tall as its tallest box and each
/// box is followed by `spacing` free cells.
pub struct Engine {
    spacing: u32,
}

impl Engine {
    pub fn new() -> Self {
        Self { spacing: 2 }
    }

    /// Set the gap between neighbouring boxes, at least one cell
    pub fn set_spacing(&mut self, spacing: u32) -> &mut Self {
        self.spacing = spacing.max(1);
        self
    }

    fn columns(count: usize) -> usize {
        let mut columns = 1;
        while columns * columns < count {
            columns += 1;
        }
        columns
    }
}

impl PlacementEngine for Engine {
    fn place(
        &self,
        canvas: Canvas,
        sizes: &[BoxSize],
        _rng: &mut dyn RngCore,
    ) -> Result<Vec<Point>, Error> {
        check_space(canvas, sizes)?;

        let columns = Self::columns(sizes.len());
        let mut origins = Vec::with_capacity(sizes.len());
        let mut y = 1u64;

        for row in sizes.chunks(columns) {
            let mut x = 1u64;
            let mut row_height = 0u64;
            for &size in row {
                origins.push(Point::new(x as f64, y as f64));
                x += u64::from(size.width()) + u64::from(self.spacing);
                row_height = row_height.max(u64::from(size.height()));
            }
            y += row_height + u64::from(self.spacing);
        }

        // The area check does not guarantee that this arrangement fits.
        if let Some(index) = origins
            .iter()
            .zip(sizes)
            .position(|(&origin, &size)| !canvas.encloses(&ClassBox::new(origin, size)))
        {
            return Err(Error::BoxTooLarge {
                index,
                size: sizes[index],
                canvas,
            });
        }

        debug!(columns, boxes_len = origins.len(); "Grid placement succeeded");
        Ok(origins)
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn test_columns() {
        assert_eq!(Engine::columns(0), 1);
        assert_eq!(Engine::columns(1), 1);
        assert_eq!(Engine::columns(2), 2);
        assert_eq!(Engine::columns(4), 2);
        assert_eq!(Engine::columns(5), 3);
        assert_eq!(Engine::columns(9), 3);
        assert_eq!(Engine::columns(10), 4);
    }

    #[test]
    fn test_row_major_origins() {
        let sizes = [
            BoxSize::new(3, 2),
            BoxSize::new(5, 4),
            BoxSize::new(4, 3),
        ];
        let canvas = Canvas::for_boxes(&sizes, 5);
        let mut rng = StdRng::seed_from_u64(0);

        let origins = Engine::new().place(canvas, &sizes, &mut rng).unwrap();
        assert_eq!(
            origins,
            vec![
                Point::new(1.0, 1.0),
                Point::new(6.0, 1.0),
                Point::new(1.0, 7.0),
            ]
        );
    }

    #[test]
    fn test_ignores_rng() {
        let sizes = [BoxSize::new(3, 2); 5];
        let canvas = Canvas::for_boxes(&sizes, 5);
        let engine = Engine::new();

        let first = engine
            .place(canvas, &sizes, &mut StdRng::seed_from_u64(1))
            .unwrap();
        let second = engine
            .place(canvas, &sizes, &mut StdRng::seed_from_u64(2))
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_arrangement_that_does_not_fit() {
        // Two boxes share one row and fit.
        let sizes = [BoxSize::new(10, 2), BoxSize::new(3, 2)];
        let canvas = Canvas::new(30, 6);
        let mut engine = Engine::new();
        engine.set_spacing(1);
        let mut rng = StdRng::seed_from_u64(0);

        let origins = engine.place(canvas, &sizes, &mut rng).unwrap();
        assert_eq!(origins, vec![Point::new(1.0, 1.0), Point::new(12.0, 1.0)]);

        // Five boxes need a second row, which runs past the bottom edge.
        let tall = [BoxSize::new(3, 2); 5];
        let canvas = Canvas::new(40, 6);
        let err = engine.place(canvas, &tall, &mut rng).unwrap_err();
        assert!(matches!(err, Error::BoxTooLarge { index: 3, .. }));
    }
}
