//! umlgen - Layout and SVG rendering for UML class diagrams
//!
//! This library turns a [`semantic::Diagram`] (classes with attributes and
//! methods, plus directed interactions between them) into an SVG document.
//! A generation pass sizes every class box from its text, places the boxes
//! on a canvas without overlap, draws an arrow per interaction and streams
//! the result to a byte sink.
//!
//! Placement is randomized by default. The random source is seeded from
//! the diagram's seed (or a caller override), so the same input and seed
//! always produce the same bytes.

pub mod config;
pub mod draw;
pub mod layout;
pub mod sizing;

mod error;
mod export;

pub use umlgen_core::{color, geometry, semantic};

pub use error::UmlgenError;

use std::io::Write;

use log::{debug, info, trace};
use rand::{SeedableRng, rngs::StdRng};

use config::AppConfig;
use export::Exporter;
use layout::{EngineBuilder, Layout};

/// Builder for laying out and rendering class diagrams.
///
/// # Examples
///
/// ```rust
/// use umlgen::{DiagramBuilder, config::AppConfig, semantic::{Class, Diagram}};
///
/// let diagram = Diagram::new(vec![Class::new("A")]).with_seed(7);
/// let builder = DiagramBuilder::new(AppConfig::default());
///
/// let svg = builder.render_svg(&diagram).expect("Failed to render");
/// assert!(svg.contains("width=\"3em\""));
/// ```
#[derive(Debug, Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Decode a diagram from its JSON document and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`UmlgenError::Decode`] for malformed JSON or a document
    /// that does not describe a diagram, and [`UmlgenError::Model`] for
    /// interactions referencing missing classes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use umlgen::DiagramBuilder;
    ///
    /// let source = r#"{"seed": 1, "classes": [{"name": "A"}, {"name": "B"}],
    ///                  "interactions": [{"class_a_index": 0, "class_b_index": 1}]}"#;
    /// let diagram = DiagramBuilder::default().parse(source).expect("Failed to parse");
    /// assert_eq!(diagram.classes().len(), 2);
    /// ```
    pub fn parse(&self, source: &str) -> Result<semantic::Diagram, UmlgenError> {
        info!(source_len = source.len(); "Decoding diagram");
        let diagram: semantic::Diagram = serde_json::from_str(source)?;
        diagram.validate()?;
        debug!(
            classes_len = diagram.classes().len(),
            seed:? = diagram.seed();
            "Diagram decoded"
        );
        trace!(diagram:?; "Decoded diagram");
        Ok(diagram)
    }

    /// Picks the seed for a pass: the override if given, else the
    /// diagram's own seed, else a fresh random one.
    ///
    /// Negative diagram seeds keep their bit pattern.
    pub fn resolve_seed(diagram: &semantic::Diagram, seed_override: Option<u64>) -> u64 {
        seed_override
            .or_else(|| diagram.seed().map(|seed| seed as u64))
            .unwrap_or_else(rand::random)
    }

    /// Validates the diagram and places its class boxes.
    ///
    /// # Errors
    ///
    /// Returns [`UmlgenError::Model`] for interactions referencing missing
    /// classes and [`UmlgenError::Layout`] when the boxes cannot be placed.
    pub fn layout(&self, diagram: &semantic::Diagram, seed: u64) -> Result<Layout, UmlgenError> {
        diagram.validate()?;

        let layout_config = &self.config.layout;
        let engine = EngineBuilder::new()
            .with_max_attempts(layout_config.max_attempts)
            .with_grid_spacing(layout_config.canvas_padding)
            .build(layout_config.engine);

        info!(
            classes_len = diagram.classes().len(),
            interactions_len = diagram.interactions().len(),
            engine:% = layout_config.engine,
            seed;
            "Laying out diagram"
        );
        let mut rng = StdRng::seed_from_u64(seed);
        let layout = Layout::calculate(
            diagram.classes(),
            engine.as_ref(),
            layout_config.canvas_padding,
            &mut rng,
        )?;
        trace!(layout:?; "Calculated layout");
        Ok(layout)
    }

    /// Renders the diagram as SVG into `sink` and hands the sink back.
    ///
    /// `seed_override` replaces the diagram's seed; see
    /// [`DiagramBuilder::resolve_seed`].
    ///
    /// # Errors
    ///
    /// Returns [`UmlgenError::Config`] for invalid style colors, the errors
    /// of [`DiagramBuilder::layout`], and [`UmlgenError::Io`] when writing
    /// to the sink fails.
    pub fn render_to<W: Write>(
        &self,
        diagram: &semantic::Diagram,
        seed_override: Option<u64>,
        sink: W,
    ) -> Result<W, UmlgenError> {
        let style = self.config.style();
        style.validate().map_err(UmlgenError::Config)?;

        let seed = Self::resolve_seed(diagram, seed_override);
        let layout = self.layout(diagram, seed)?;

        let mut svg_exporter = export::svg::SvgBuilder::new(sink)
            .with_style(style)
            .build()?;
        svg_exporter.export_diagram(diagram, &layout)?;
        debug!("SVG streamed to sink");

        Ok(svg_exporter.into_inner())
    }

    /// Render a diagram to an SVG string, using the diagram's seed.
    ///
    /// # Errors
    ///
    /// See [`DiagramBuilder::render_to`].
    pub fn render_svg(&self, diagram: &semantic::Diagram) -> Result<String, UmlgenError> {
        let bytes = self.render_to(diagram, None, Vec::new())?;
        let svg = String::from_utf8(bytes).map_err(|err| UmlgenError::Export(Box::new(err)))?;
        info!(svg_len = svg.len(); "SVG rendered successfully");
        Ok(svg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::{Class, Diagram, Interaction};

    #[test]
    fn test_resolve_seed_precedence() {
        let diagram = Diagram::new(vec![]).with_seed(-1);
        assert_eq!(DiagramBuilder::resolve_seed(&diagram, Some(3)), 3);
        assert_eq!(DiagramBuilder::resolve_seed(&diagram, None), u64::MAX);
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        let builder = DiagramBuilder::default();
        assert!(matches!(builder.parse("{"), Err(UmlgenError::Decode(_))));
        assert!(matches!(
            builder.parse(r#"{"classes": [{"attributes": []}]}"#),
            Err(UmlgenError::Decode(_))
        ));
    }

    #[test]
    fn test_parse_validates_indices() {
        let source = r#"{"classes": [{"name": "A"}],
                         "interactions": [{"class_a_index": 0, "class_b_index": 1}]}"#;
        let err = DiagramBuilder::default().parse(source).unwrap_err();
        assert!(matches!(err, UmlgenError::Model(_)));
    }

    #[test]
    fn test_invalid_interaction_is_rejected_before_layout() {
        let diagram = Diagram::new(vec![Class::new("A")]).with_interaction(Interaction::new(0, 3));
        let err = DiagramBuilder::default().render_svg(&diagram).unwrap_err();
        assert!(matches!(err, UmlgenError::Model(_)));
    }

    #[test]
    fn test_invalid_style_is_config_error() {
        let config: AppConfig = toml::from_str(
            r#"
            [style]
            background_color = "nope"
            "#,
        )
        .unwrap();
        let diagram = Diagram::new(vec![Class::new("A")]);
        let err = DiagramBuilder::new(config).render_svg(&diagram).unwrap_err();
        assert!(matches!(err, UmlgenError::Config(_)));
    }

    #[test]
    fn test_layout_is_seeded() {
        let diagram = Diagram::new(vec![Class::new("A"), Class::new("B"), Class::new("C")]);
        let builder = DiagramBuilder::default();

        let first = builder.layout(&diagram, 42).unwrap();
        let second = builder.layout(&diagram, 42).unwrap();
        assert_eq!(first.boxes(), second.boxes());
    }
}
