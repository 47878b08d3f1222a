//! Defines a compiled [`Template`], the element tree classified once at
//! construction so the renderer never has to re-inspect its shape.

use crate::render::Variables;
use crate::Value;

#[derive(Debug)]
pub struct Template {
    /// The root element tag name.
    pub root: String,

    /// Variables declared by the template as raw expressions, in declaration
    /// order.
    pub variables: Vec<(String, Value)>,

    /// The variable table evaluated at construction.
    pub globals: Variables,

    pub elements: Elements,
}

/// An ordered list of tag names and their element specifications.
pub type Elements = Vec<(String, Element)>;

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// Repeat every sub-template for each item of the data list with the same
    /// key.
    Sequence(Vec<Elements>),

    /// A leaf with text content and attributes.
    Attributed {
        value: Value,
        attributes: Vec<Attribute>,
    },

    /// A wrapping tag around nested elements.
    Group(Elements),

    /// A leaf with text content only.
    Leaf(Value),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value: Value,
}
