//! Drawing primitives in grid units.
//!
//! This module turns placed boxes into what the renderer emits: connector
//! segments between interacting classes, and for every class its border,
//! divider lines and positioned glyphs. Nothing here knows about SVG; the
//! exporter maps grid units to output coordinates.

mod arrow;
mod glyph;

pub use arrow::{Connector, Heading};
pub use glyph::Glyph;

use umlgen_core::{
    geometry::{ClassBox, Point},
    semantic::Class,
};

/// A straight line between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    start: Point,
    end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn start(self) -> Point {
        self.start
    }

    pub fn end(self) -> Point {
        self.end
    }
}

/// The drawable parts of one class box.
#[derive(Debug, Clone)]
pub struct ClassFigure {
    border: ClassBox,
    dividers: [Segment; 2],
    text: glyph::ClassText,
}

impl ClassFigure {
    /// Lays out the text of `class` inside its placed box.
    ///
    /// The header divider runs along the name row and the attribute
    /// divider along the last attribute row.
    pub fn new(class: &Class, class_box: &ClassBox) -> Self {
        let origin = class_box.origin();
        let width = f64::from(class_box.size().width());
        let attributes_len = class.attributes().len() as f64;

        let divider_at = |row: f64| {
            Segment::new(
                Point::new(origin.x(), row),
                Point::new(origin.x() + width, row),
            )
        };

        Self {
            border: *class_box,
            dividers: [
                divider_at(origin.y() + 1.0),
                divider_at(origin.y() + 1.0 + attributes_len),
            ],
            text: glyph::ClassText::new(class, origin),
        }
    }

    pub fn border(&self) -> &ClassBox {
        &self.border
    }

    /// Divider below the name row
    pub fn header_divider(&self) -> Segment {
        self.dividers[0]
    }

    /// Divider below the last attribute row
    pub fn attribute_divider(&self) -> Segment {
        self.dividers[1]
    }

    pub fn name_glyphs(&self) -> &[Glyph] {
        &self.text.name
    }

    pub fn attribute_glyphs(&self) -> &[Glyph] {
        &self.text.attributes
    }

    pub fn method_glyphs(&self) -> &[Glyph] {
        &self.text.methods
    }

    /// Every glyph of the class, top row first.
    pub fn glyphs(&self) -> impl Iterator<Item = &Glyph> {
        self.text
            .name
            .iter()
            .chain(&self.text.attributes)
            .chain(&self.text.methods)
    }
}
