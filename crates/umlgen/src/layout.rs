//! Class box placement.
//!
//! A layout pass sizes every class box, derives a canvas large enough to
//! hold them, and asks a [`PlacementEngine`] for a non-overlapping origin
//! per box. The pass owns its boxes; nothing is kept between passes.

mod engines;

pub use engines::{EngineBuilder, PlacementEngine};

use std::{fmt, str::FromStr};

use log::{debug, info};
use rand::RngCore;
use serde::Deserialize;
use thiserror::Error;

use umlgen_core::{
    geometry::{BoxSize, ClassBox},
    semantic::Class,
};

use crate::sizing;

/// Default gap added per box when deriving the canvas size.
pub const DEFAULT_CANVAS_PADDING: u32 = 5;

/// Selects the placement strategy.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutEngine {
    /// Randomized rejection sampling with full restart (default)
    #[default]
    Random,
    /// Deterministic row-by-row placement
    Grid,
}

impl FromStr for LayoutEngine {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(Self::Random),
            "grid" => Ok(Self::Grid),
            _ => Err("Unsupported layout engine"),
        }
    }
}

impl From<LayoutEngine> for &'static str {
    fn from(val: LayoutEngine) -> Self {
        match val {
            LayoutEngine::Random => "random",
            LayoutEngine::Grid => "grid",
        }
    }
}

impl fmt::Display for LayoutEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name: &'static str = (*self).into();
        f.write_str(name)
    }
}

/// Errors raised while placing class boxes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(
        "class {index} needs {}x{} cells but the canvas is only {}x{}",
        .size.width(),
        .size.height(),
        .canvas.width(),
        .canvas.height()
    )]
    BoxTooLarge {
        index: usize,
        size: BoxSize,
        canvas: Canvas,
    },

    #[error("class boxes need {required} cells including margins but the canvas offers {available}")]
    InsufficientArea { required: u64, available: u64 },

    #[error("no overlap-free placement found after {attempts} attempts")]
    AttemptsExhausted { attempts: usize },
}

impl Error {
    /// Returns true for errors caused by a canvas that cannot hold the boxes.
    pub fn is_invalid_space(&self) -> bool {
        matches!(self, Self::BoxTooLarge { .. } | Self::InsufficientArea { .. })
    }
}

/// Drawing area in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Canvas {
    width: u32,
    height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Derives a canvas from the box sizes: the sum of all widths and the
    /// sum of all heights, each box adding `padding` to both sums.
    ///
    /// # Examples
    ///
    /// ```
    /// use umlgen::layout::Canvas;
    /// use umlgen_core::geometry::BoxSize;
    ///
    /// let canvas = Canvas::for_boxes(&[BoxSize::new(3, 2), BoxSize::new(8, 3)], 5);
    /// assert_eq!((canvas.width(), canvas.height()), (21, 15));
    /// ```
    pub fn for_boxes(sizes: &[BoxSize], padding: u32) -> Self {
        let (width, height) = sizes.iter().fold((0u32, 0u32), |(w, h), size| {
            (
                w.saturating_add(size.width().saturating_add(padding)),
                h.saturating_add(size.height().saturating_add(padding)),
            )
        });
        Self { width, height }
    }

    pub fn width(self) -> u32 {
        self.width
    }

    pub fn height(self) -> u32 {
        self.height
    }

    /// Returns true if the box lies within `[1, width - 1] x [1, height - 1]`.
    pub fn encloses(self, class_box: &ClassBox) -> bool {
        class_box.min_x() >= 1.0
            && class_box.min_y() >= 1.0
            && class_box.max_x() <= f64::from(self.width) - 1.0
            && class_box.max_y() <= f64::from(self.height) - 1.0
    }
}

/// The placed boxes of one generation pass, in class order.
#[derive(Debug, Clone)]
pub struct Layout {
    canvas: Canvas,
    boxes: Vec<ClassBox>,
}

impl Layout {
    /// Sizes and places every class.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] when the derived canvas cannot hold the boxes or
    /// the engine gives up.
    pub fn calculate(
        classes: &[Class],
        engine: &dyn PlacementEngine,
        padding: u32,
        rng: &mut dyn RngCore,
    ) -> Result<Self, Error> {
        let sizes: Vec<BoxSize> = classes.iter().map(sizing::box_size).collect();
        let canvas = Canvas::for_boxes(&sizes, padding);
        debug!(
            canvas_width = canvas.width(),
            canvas_height = canvas.height();
            "Canvas derived"
        );

        let origins = engine.place(canvas, &sizes, rng)?;
        let boxes = origins
            .into_iter()
            .zip(sizes)
            .map(|(origin, size)| ClassBox::new(origin, size))
            .collect::<Vec<_>>();

        info!(boxes_len = boxes.len(); "Layout calculated");
        Ok(Self { canvas, boxes })
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn boxes(&self) -> &[ClassBox] {
        &self.boxes
    }

    /// The box of the class at `index` in the diagram's class list.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range; interaction indices are validated
    /// before layout.
    pub fn class_box(&self, index: usize) -> &ClassBox {
        &self.boxes[index]
    }
}
