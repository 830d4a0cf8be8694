//! Streaming SVG renderer.
//!
//! Elements are written to the sink one per line as soon as they are
//! built, in a fixed order: header and background, then every connector,
//! then every class box with its text. Boxes are filled, so they cover the
//! connector shafts running between box centers.

use std::{fmt::Display, io::Write};

use log::{debug, error, info, warn};
use svg::node::element as svg_element;

use crate::{
    color::Color,
    config::StyleConfig,
    draw::{ClassFigure, Connector, Glyph, Segment},
    export::{self, Exporter},
    layout::{Canvas, Layout},
    semantic::Diagram,
};

/// Maps grid units to SVG coordinates.
fn em(value: f64) -> String {
    format!("{value}em")
}

/// Builder for an [`Svg`] exporter writing to `sink`.
pub struct SvgBuilder<W> {
    sink: W,
    style: StyleConfig,
}

impl<W: Write> SvgBuilder<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            style: StyleConfig::default(),
        }
    }

    pub fn with_style(mut self, style: &StyleConfig) -> Self {
        self.style = style.clone();
        self
    }

    /// Resolves the style and creates the exporter.
    ///
    /// # Errors
    ///
    /// Returns [`export::Error::Render`] if a configured color is invalid.
    pub fn build(self) -> Result<Svg<W>, export::Error> {
        let style = &self.style;
        Ok(Svg {
            sink: self.sink,
            background: style.background_color().map_err(export::Error::Render)?,
            stroke: style.stroke_color().map_err(export::Error::Render)?,
            fill: style.fill_color().map_err(export::Error::Render)?,
            stroke_width: style.stroke_width(),
            font_size: style.font_size(),
        })
    }
}

/// SVG exporter streaming to a byte sink.
pub struct Svg<W> {
    sink: W,
    background: Color,
    stroke: Color,
    fill: Color,
    stroke_width: f64,
    font_size: u32,
}

impl<W: Write> Svg<W> {
    /// Returns the sink, e.g. to take the rendered bytes out of a `Vec<u8>`.
    pub fn into_inner(self) -> W {
        self.sink
    }

    fn emit(&mut self, element: impl Display) -> Result<(), export::Error> {
        writeln!(self.sink, "\t{element}").map_err(|err| {
            error!(err:err; "Failed to write SVG element");
            export::Error::Io(err)
        })
    }

    fn write_header(&mut self, canvas: Canvas) -> Result<(), export::Error> {
        let width = em(f64::from(canvas.width()));
        let height = em(f64::from(canvas.height()));
        write!(
            self.sink,
            "<?xml version=\"1.0\"?>\n<svg width=\"{width}\" height=\"{height}\" \
             xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\">\n"
        )
        .map_err(|err| {
            error!(err:err; "Failed to write SVG header");
            export::Error::Io(err)
        })?;

        let background = svg_element::Rectangle::new()
            .set("class", "background")
            .set("x", em(0.0))
            .set("y", em(0.0))
            .set("width", width)
            .set("height", height)
            .set("fill", self.background.to_string());
        self.emit(background)
    }

    fn line(&self, class: &str, segment: Segment) -> svg_element::Line {
        let (start, end) = (segment.start(), segment.end());
        svg_element::Line::new()
            .set("class", class)
            .set("x1", em(start.x()))
            .set("y1", em(start.y()))
            .set("x2", em(end.x()))
            .set("y2", em(end.y()))
            .set("stroke", self.stroke.to_string())
            .set("stroke-width", self.stroke_width)
    }

    fn write_connectors(&mut self, diagram: &Diagram, layout: &Layout) -> Result<(), export::Error> {
        let mut drawn = 0usize;
        for (index, interaction) in diagram.interactions().iter().enumerate() {
            let source = layout.class_box(interaction.source());
            let target = layout.class_box(interaction.target());
            let Some(connector) = Connector::between(source, target) else {
                warn!(
                    interaction = index,
                    source = interaction.source(),
                    target = interaction.target();
                    "Skipping connector without a drawable direction"
                );
                continue;
            };

            for segment in connector.segments() {
                let line = self.line("connector", segment);
                self.emit(line)?;
            }
            drawn += 1;
        }
        debug!(connectors_len = drawn; "Connectors written");
        Ok(())
    }

    fn write_glyphs(&mut self, glyphs: &[Glyph]) -> Result<(), export::Error> {
        for glyph in glyphs {
            let text = svg_element::Text::new(glyph.ch().to_string())
                .set("x", em(glyph.column()))
                .set("y", em(glyph.row()))
                .set("font-size", self.font_size)
                .set("fill", self.stroke.to_string());
            self.emit(text)?;
        }
        Ok(())
    }

    fn write_class(&mut self, figure: &ClassFigure) -> Result<(), export::Error> {
        let border = figure.border();
        let size = border.size();
        let rect = svg_element::Rectangle::new()
            .set("class", "class-box")
            .set("x", em(border.min_x()))
            .set("y", em(border.min_y()))
            .set("width", em(f64::from(size.width())))
            .set("height", em(f64::from(size.height())))
            .set("fill", self.fill.to_string())
            .set("stroke", self.stroke.to_string())
            .set("stroke-width", self.stroke_width);
        self.emit(rect)?;

        self.write_glyphs(figure.name_glyphs())?;
        let header = self.line("divider", figure.header_divider());
        self.emit(header)?;
        self.write_glyphs(figure.attribute_glyphs())?;
        let divider = self.line("divider", figure.attribute_divider());
        self.emit(divider)?;
        self.write_glyphs(figure.method_glyphs())
    }
}

impl<W: Write> Exporter for Svg<W> {
    fn export_diagram(&mut self, diagram: &Diagram, layout: &Layout) -> Result<(), export::Error> {
        info!(
            canvas_width = layout.canvas().width(),
            canvas_height = layout.canvas().height();
            "Rendering SVG"
        );
        self.write_header(layout.canvas())?;
        self.write_connectors(diagram, layout)?;

        for (class, class_box) in diagram.classes().iter().zip(layout.boxes()) {
            self.write_class(&ClassFigure::new(class, class_box))?;
        }

        writeln!(self.sink, "</svg>")?;
        self.sink.flush()?;
        debug!(boxes_len = layout.boxes().len(); "SVG document written");
        Ok(())
    }
}
