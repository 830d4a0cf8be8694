//! Per-character text placement.

use umlgen_core::{
    geometry::Point,
    semantic::{Attribute, Class, Method},
};

/// One character positioned on the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    ch: char,
    column: f64,
    row: f64,
}

impl Glyph {
    pub fn new(ch: char, column: f64, row: f64) -> Self {
        Self { ch, column, row }
    }

    pub fn ch(self) -> char {
        self.ch
    }

    pub fn column(self) -> f64 {
        self.column
    }

    pub fn row(self) -> f64 {
        self.row
    }
}

/// Writes glyphs left to right along one row.
struct Cursor<'a> {
    glyphs: &'a mut Vec<Glyph>,
    column: f64,
    row: f64,
}

impl<'a> Cursor<'a> {
    fn new(glyphs: &'a mut Vec<Glyph>, column: f64, row: f64) -> Self {
        Self {
            glyphs,
            column,
            row,
        }
    }

    fn push(&mut self, ch: char) {
        self.glyphs.push(Glyph::new(ch, self.column, self.row));
        self.column += 1.0;
    }

    fn push_str(&mut self, text: &str) {
        for ch in text.chars() {
            self.push(ch);
        }
    }

    /// Leaves `cells` columns empty.
    fn skip(&mut self, cells: usize) {
        self.column += cells as f64;
    }
}

/// Glyph rows of a class whose box starts at `origin`.
///
/// The name sits on row `y + 1`, attributes follow one per row and methods
/// after them. Every row starts one column inside the border.
#[derive(Debug, Clone, Default)]
pub(super) struct ClassText {
    pub(super) name: Vec<Glyph>,
    pub(super) attributes: Vec<Glyph>,
    pub(super) methods: Vec<Glyph>,
}

impl ClassText {
    pub(super) fn new(class: &Class, origin: Point) -> Self {
        let mut text = Self::default();
        let column = origin.x() + 1.0;
        let mut row = origin.y() + 1.0;

        Cursor::new(&mut text.name, column, row).push_str(class.name());

        for attribute in class.attributes() {
            row += 1.0;
            attribute_glyphs(&mut Cursor::new(&mut text.attributes, column, row), attribute);
        }

        for method in class.methods() {
            row += 1.0;
            method_glyphs(&mut Cursor::new(&mut text.methods, column, row), method);
        }

        text
    }
}

/// `[glyph]name type`
fn attribute_glyphs(cursor: &mut Cursor<'_>, attribute: &Attribute) {
    if let Some(glyph) = attribute.visibility().glyph() {
        cursor.push(glyph);
    }
    cursor.push_str(attribute.name());
    cursor.skip(1);
    cursor.push_str(attribute.type_name());
}

/// `[glyph]name(type name, type name) return`
fn method_glyphs(cursor: &mut Cursor<'_>, method: &Method) {
    if let Some(glyph) = method.visibility().glyph() {
        cursor.push(glyph);
    }
    cursor.push_str(method.name());
    cursor.push('(');

    let args = method.args();
    for (i, arg) in args.iter().enumerate() {
        cursor.push_str(arg.type_name());
        cursor.skip(1);
        cursor.push_str(arg.name());
        if i + 1 < args.len() {
            cursor.push(',');
            cursor.skip(1);
        }
    }
    cursor.push(')');

    if let Some(return_type) = method.return_type() {
        cursor.skip(1);
        cursor.push_str(return_type);
    }
}
