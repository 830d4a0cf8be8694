//! Class box sizing.
//!
//! A class box is as wide as its longest text line plus a one-cell border
//! on each side, and one row taller than its name, attribute and method
//! rows combined.

use umlgen_core::{
    geometry::BoxSize,
    semantic::{Attribute, Class, Method},
};

/// Computes the box size for a class from its text content.
///
/// The result is a pure function of the class: calling it twice on the
/// same class always yields the same size.
///
/// # Examples
///
/// ```
/// use umlgen::sizing::box_size;
/// use umlgen_core::semantic::Class;
///
/// let size = box_size(&Class::new("A"));
/// assert_eq!((size.width(), size.height()), (3, 2));
/// ```
pub fn box_size(class: &Class) -> BoxSize {
    let mut longest = text_len(class.name());
    let mut rows = 1;

    for attribute in class.attributes() {
        rows += 1;
        longest = longest.max(attribute_len(attribute));
    }

    for method in class.methods() {
        rows += 1;
        longest = longest.max(method_len(method));
    }

    BoxSize::new(to_cells(longest + 2), to_cells(rows + 1))
}

/// Columns taken by `[glyph]name type`.
pub fn attribute_len(attribute: &Attribute) -> usize {
    attribute.visibility().width()
        + text_len(attribute.name())
        + 1
        + text_len(attribute.type_name())
}

/// Columns taken by `name(type name, type name) return`.
///
/// The visibility glyph is not counted; a method row prefixed with one may
/// run into the right border.
pub fn method_len(method: &Method) -> usize {
    let mut len = text_len(method.name()) + 2;

    let args = method.args();
    for arg in args {
        len += text_len(arg.type_name()) + 3 + text_len(arg.name());
    }
    // The last argument is not followed by ", ".
    if !args.is_empty() {
        len -= 2;
    }

    if let Some(return_type) = method.return_type() {
        len += text_len(return_type) + 1;
    }

    len
}

/// Text length in glyphs, one per `char`.
fn text_len(text: &str) -> usize {
    text.chars().count()
}

fn to_cells(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}
