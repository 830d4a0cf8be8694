//! Semantic model of a class diagram.
//!
//! These types are the read-only input of one generation pass. They are
//! deserialized from JSON by the front ends and can also be built in code:
//!
//! ```
//! use umlgen_core::semantic::{Attribute, Class, Diagram, Interaction, Method, Visibility};
//!
//! let diagram = Diagram::new(vec![
//!     Class::new("Account")
//!         .with_attribute(Attribute::new(Visibility::Private, "balance", "int"))
//!         .with_method(Method::new(Visibility::Public, "deposit").with_arg("amount", "int")),
//!     Class::new("Bank"),
//! ])
//! .with_seed(7)
//! .with_interaction(Interaction::new(1, 0));
//!
//! assert!(diagram.validate().is_ok());
//! ```

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Member visibility, rendered as a one-character prefix glyph.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum Visibility {
    Public,
    Protected,
    Private,
    #[default]
    Unspecified,
}

impl Visibility {
    /// The prefix glyph, or `None` when no visibility was given.
    pub fn glyph(self) -> Option<char> {
        match self {
            Self::Public => Some('+'),
            Self::Private => Some('-'),
            Self::Protected => Some('*'),
            Self::Unspecified => None,
        }
    }

    /// Number of columns the glyph occupies.
    pub fn width(self) -> usize {
        usize::from(self.glyph().is_some())
    }
}

impl From<&str> for Visibility {
    fn from(value: &str) -> Self {
        match value {
            "public" => Self::Public,
            "protected" => Self::Protected,
            "private" => Self::Private,
            _ => Self::Unspecified,
        }
    }
}

impl From<String> for Visibility {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
            Self::Unspecified => "unspecified",
        };
        f.write_str(name)
    }
}

/// A typed field of a class.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Attribute {
    #[serde(default)]
    visibility: Visibility,
    name: String,
    #[serde(rename = "type")]
    type_name: String,
}

impl Attribute {
    pub fn new(
        visibility: Visibility,
        name: impl Into<String>,
        type_name: impl Into<String>,
    ) -> Self {
        Self {
            visibility,
            name: name.into(),
            type_name: type_name.into(),
        }
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }
}

/// A named, typed parameter in a method signature.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Argument {
    name: String,
    #[serde(rename = "type")]
    type_name: String,
}

impl Argument {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }
}

/// A method signature of a class.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Method {
    // Older documents spell the key "visibilty".
    #[serde(default, alias = "visibilty")]
    visibility: Visibility,
    name: String,
    #[serde(default)]
    args: Vec<Argument>,
    #[serde(default, rename = "return")]
    return_type: Option<String>,
}

impl Method {
    pub fn new(visibility: Visibility, name: impl Into<String>) -> Self {
        Self {
            visibility,
            name: name.into(),
            args: Vec::new(),
            return_type: None,
        }
    }

    /// Appends an argument to the signature.
    pub fn with_arg(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.args.push(Argument::new(name, type_name));
        self
    }

    /// Sets the return type.
    pub fn with_return(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = Some(return_type.into());
        self
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &[Argument] {
        &self.args
    }

    /// The return type, treating an empty string as absent.
    pub fn return_type(&self) -> Option<&str> {
        self.return_type.as_deref().filter(|ty| !ty.is_empty())
    }
}

/// One class of the diagram.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Class {
    name: String,
    #[serde(default)]
    attributes: Vec<Attribute>,
    #[serde(default)]
    methods: Vec<Method>,
}

impl Class {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }
}

/// A directed relationship from class A to class B, by position in the
/// diagram's class list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Interaction {
    #[serde(rename = "class_a_index")]
    source: usize,
    #[serde(rename = "class_b_index")]
    target: usize,
    #[serde(default, rename = "class_a_text")]
    source_text: Option<String>,
    #[serde(default, rename = "class_b_text")]
    target_text: Option<String>,
}

impl Interaction {
    pub fn new(source: usize, target: usize) -> Self {
        Self {
            source,
            target,
            source_text: None,
            target_text: None,
        }
    }

    /// Attaches annotation text to both ends.
    pub fn with_texts(mut self, source_text: impl Into<String>, target_text: impl Into<String>) -> Self {
        self.source_text = Some(source_text.into());
        self.target_text = Some(target_text.into());
        self
    }

    /// Index of class A, where the shaft starts.
    pub fn source(&self) -> usize {
        self.source
    }

    /// Index of class B, where the arrowhead points.
    pub fn target(&self) -> usize {
        self.target
    }

    pub fn source_text(&self) -> Option<&str> {
        self.source_text.as_deref()
    }

    pub fn target_text(&self) -> Option<&str> {
        self.target_text.as_deref()
    }
}

/// A complete class diagram.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Diagram {
    #[serde(default)]
    seed: Option<i64>,
    classes: Vec<Class>,
    #[serde(default)]
    interactions: Vec<Interaction>,
}

impl Diagram {
    pub fn new(classes: Vec<Class>) -> Self {
        Self {
            seed: None,
            classes,
            interactions: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_interaction(mut self, interaction: Interaction) -> Self {
        self.interactions.push(interaction);
        self
    }

    /// Seed for the layout random source, if the document pins one.
    pub fn seed(&self) -> Option<i64> {
        self.seed
    }

    pub fn classes(&self) -> &[Class] {
        &self.classes
    }

    pub fn interactions(&self) -> &[Interaction] {
        &self.interactions
    }

    /// Checks that every interaction references an existing class.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidInteraction`] for the first interaction
    /// with an out-of-range index.
    pub fn validate(&self) -> Result<(), ModelError> {
        let class_count = self.classes.len();
        for (position, interaction) in self.interactions.iter().enumerate() {
            for index in [interaction.source, interaction.target] {
                if index >= class_count {
                    return Err(ModelError::InvalidInteraction {
                        interaction: position,
                        index,
                        class_count,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Structural problems in a diagram model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error(
        "interaction {interaction} references class {index}, but the diagram has {class_count} classes"
    )]
    InvalidInteraction {
        interaction: usize,
        index: usize,
        class_count: usize,
    },
}
