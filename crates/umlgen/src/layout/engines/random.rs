//! Randomized rejection-sampling placement.

use log::{debug, trace};
use rand::{Rng, RngCore};

use umlgen_core::geometry::{BoxSize, ClassBox, Point};

use crate::layout::{
    Canvas, Error,
    engines::{PlacementEngine, check_space, max_origin},
};

/// Places boxes one after another at uniformly drawn origins.
///
/// A box that conflicts with an already placed box discards the whole
/// attempt and placement starts over from the first box.
pub struct Engine {
    /// Upper bound on full attempts, unbounded when `None`
    max_attempts: Option<usize>,
}

impl Engine {
    /// Create a new random placement engine without an attempt cap
    pub fn new() -> Self {
        Self { max_attempts: None }
    }

    /// Set the maximum number of full attempts
    pub fn set_max_attempts(&mut self, max_attempts: Option<usize>) -> &mut Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Runs one attempt, returning `None` at the first conflict.
    fn try_place(
        &self,
        canvas: Canvas,
        sizes: &[BoxSize],
        rng: &mut dyn RngCore,
    ) -> Option<Vec<ClassBox>> {
        let mut placed: Vec<ClassBox> = Vec::with_capacity(sizes.len());

        for (index, &size) in sizes.iter().enumerate() {
            // Ranges are non-empty once `check_space` passed.
            let max_x = max_origin(canvas.width(), size.width())?;
            let max_y = max_origin(canvas.height(), size.height())?;
            let x = rng.random_range(1..=max_x);
            let y = rng.random_range(1..=max_y);
            let candidate = ClassBox::new(Point::new(f64::from(x), f64::from(y)), size);

            if let Some(other) = placed.iter().position(|b| b.conflicts_with(&candidate)) {
                trace!(index, other, x, y; "Placement conflict");
                return None;
            }
            placed.push(candidate);
        }

        Some(placed)
    }
}

impl PlacementEngine for Engine {
    fn place(
        &self,
        canvas: Canvas,
        sizes: &[BoxSize],
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Point>, Error> {
        check_space(canvas, sizes)?;

        let mut attempts = 0usize;
        loop {
            if self.max_attempts.is_some_and(|max| attempts >= max) {
                return Err(Error::AttemptsExhausted { attempts });
            }
            attempts += 1;

            if let Some(boxes) = self.try_place(canvas, sizes, rng) {
                debug!(attempts, boxes_len = boxes.len(); "Random placement succeeded");
                return Ok(boxes.iter().map(ClassBox::origin).collect());
            }
        }
    }
}
