//! Integration tests for the DiagramBuilder API
//!
//! These tests render complete diagrams through the public API and check
//! the emitted SVG.

use umlgen::{
    DiagramBuilder, UmlgenError,
    config::AppConfig,
    draw::Connector,
    semantic::{Attribute, Class, Diagram, Interaction, Method, Visibility},
};

fn config_from(toml_source: &str) -> AppConfig {
    toml::from_str(toml_source).expect("valid test config")
}

fn sample_diagram() -> Diagram {
    Diagram::new(vec![
        Class::new("Customer")
            .with_attribute(Attribute::new(Visibility::Private, "name", "String"))
            .with_method(Method::new(Visibility::Public, "orders").with_return("Vec")),
        Class::new("Order")
            .with_attribute(Attribute::new(Visibility::Protected, "total", "Money"))
            .with_method(
                Method::new(Visibility::Public, "add")
                    .with_arg("item", "Item")
                    .with_arg("count", "u32"),
            ),
        Class::new("Item"),
    ])
    .with_seed(2024)
    .with_interaction(Interaction::new(0, 1).with_texts("1", "*"))
    .with_interaction(Interaction::new(1, 2))
}

#[test]
fn test_single_class_without_connectors() {
    let diagram = Diagram::new(vec![Class::new("A")]).with_seed(1);
    let svg = DiagramBuilder::default().render_svg(&diagram).unwrap();

    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");
    assert_eq!(svg.matches("class=\"class-box\"").count(), 1);
    assert!(svg.contains("width=\"3em\""));
    assert!(svg.contains("height=\"2em\""));
    assert_eq!(svg.matches("class=\"connector\"").count(), 0);
}

#[test]
fn test_interaction_draws_three_lines_before_boxes() {
    let diagram = Diagram::new(vec![Class::new("A"), Class::new("B")])
        .with_seed(9)
        .with_interaction(Interaction::new(0, 1));
    let svg = DiagramBuilder::default().render_svg(&diagram).unwrap();

    assert_eq!(svg.matches("class=\"connector\"").count(), 3);
    assert_eq!(svg.matches("class=\"class-box\"").count(), 2);
    let last_connector = svg.rfind("class=\"connector\"").unwrap();
    let first_box = svg.find("class=\"class-box\"").unwrap();
    assert!(last_connector < first_box);
}

#[test]
fn test_visibility_glyph_counts_toward_width() {
    let diagram = Diagram::new(vec![
        Class::new("A").with_attribute(Attribute::new(Visibility::Public, "x", "int")),
    ])
    .with_seed(3);
    let svg = DiagramBuilder::default().render_svg(&diagram).unwrap();

    // "+x int" plus borders.
    assert!(svg.contains("width=\"8em\""));
    assert!(svg.contains("height=\"3em\""));
    // Name, "+", "x" and "int".
    assert_eq!(svg.matches("<text").count(), 6);
}

#[test]
fn test_same_seed_same_bytes() {
    let builder = DiagramBuilder::default();
    let diagram = sample_diagram();

    let first = builder.render_svg(&diagram).unwrap();
    let second = builder.render_svg(&diagram).unwrap();
    assert_eq!(first, second);

    let overridden = builder.render_to(&diagram, Some(2024), Vec::new()).unwrap();
    assert_eq!(overridden, first.into_bytes());
}

#[test]
fn test_connector_tips_land_outside_targets() {
    let builder = DiagramBuilder::default();
    let diagram = sample_diagram();

    for seed in 0..20 {
        let layout = builder.layout(&diagram, seed).unwrap();
        for interaction in diagram.interactions() {
            let source = layout.class_box(interaction.source());
            let target = layout.class_box(interaction.target());
            let connector = Connector::between(source, target).unwrap();

            assert!(!target.contains(connector.tip()), "seed {seed}");
            let canvas = layout.canvas();
            assert!(connector.tip().x() > 0.0 && connector.tip().x() < f64::from(canvas.width()));
            assert!(connector.tip().y() > 0.0 && connector.tip().y() < f64::from(canvas.height()));
        }
    }
}

#[test]
fn test_grid_engine_from_config() {
    let builder = DiagramBuilder::new(config_from(
        r#"
        [layout]
        engine = "grid"
        "#,
    ));
    let diagram = sample_diagram();

    let first = builder.render_to(&diagram, Some(1), Vec::new()).unwrap();
    let second = builder.render_to(&diagram, Some(2), Vec::new()).unwrap();
    assert_eq!(first, second, "grid layout ignores the seed");
}

#[test]
fn test_canvas_too_small_is_an_error() {
    let builder = DiagramBuilder::new(config_from(
        r#"
        [layout]
        canvas_padding = 0
        "#,
    ));
    let diagram = Diagram::new(vec![Class::new("A")]).with_seed(1);

    let err = builder.render_svg(&diagram).unwrap_err();
    assert!(matches!(err, UmlgenError::Layout(_)), "{err}");
    assert!(err.is_invalid_input());
}

#[test]
fn test_attempt_cap_from_config() {
    let builder = DiagramBuilder::new(config_from(
        r#"
        [layout]
        max_attempts = 100000
        "#,
    ));
    let svg = builder.render_svg(&sample_diagram()).unwrap();
    assert_eq!(svg.matches("class=\"class-box\"").count(), 3);
}

#[test]
fn test_bad_interaction_index() {
    let diagram = Diagram::new(vec![Class::new("A"), Class::new("B")])
        .with_interaction(Interaction::new(2, 0));
    let err = DiagramBuilder::default().render_svg(&diagram).unwrap_err();
    assert!(matches!(err, UmlgenError::Model(_)));
    assert!(err.to_string().contains("references class 2"));
}
