//! A declarative template engine that converts structured data into XML.
//!
//! Templates are YAML documents describing the root tag, optional variables,
//! and the element tree. Leaf values are expressions that can refer to the
//! data being converted, to variables, and to a handful of builtin functions.
//!
//! # Getting started
//!
//! Your entry point is the [`Engine`] struct. The engine stores the settings
//! and optionally named templates. Generally, you only need to construct one
//! engine during the lifetime of a program.
//!
//! ```
//! let engine = xmlate::Engine::new();
//!
//! let template = engine.compile(
//!     r#"
//! root: greeting
//! elements:
//!   to: ${user.name}
//!   message: Hello!
//! "#,
//! )?;
//!
//! let data = serde_json::json!({ "user": { "name": "Ada" } });
//! let xml = template.convert(&data)?;
//! assert_eq!(xml, "<greeting><to>Ada</to><message>Hello!</message></greeting>");
//! # Ok::<(), xmlate::Error>(())
//! ```
//!
//! # Templates
//!
//! A template has three top level keys:
//!
//! - `root`: the tag name of the root element (required).
//! - `variables`: a mapping of variable names to expressions (optional).
//! - `elements`: a mapping of tag names to element specifications
//!   (required).
//!
//! Each element specification takes one of four shapes:
//!
//! ```yaml
//! root: order
//! elements:
//!   # A leaf: an expression rendered as the element text.
//!   id: ${order.id}
//!
//!   # A leaf with attributes, recognized by its `value` key.
//!   total:
//!     value: =SUM(${order.net}, ${order.tax})
//!     attributes:
//!       - name: currency
//!         value: EUR
//!
//!   # A group of nested elements.
//!   customer:
//!     name: ${order.customer}
//!
//!   # A sequence: repeats its entries for each item of the `lines` list,
//!   # placeholders inside refer to the item.
//!   lines:
//!     - line:
//!         sku: ${sku}
//!         qty: ${qty}
//! ```
//!
//! Placeholders inside nested groups are always resolved against the data
//! passed to the renderer (or the current sequence item), never against a
//! sub-object named after the group.
//!
//! # Expressions
//!
//! - `${path.to.value}` is replaced by the value at the dotted path in the
//!   data, or nothing if there is no such value.
//! - `$${NAME}` is replaced by the value of a variable and left as is if the
//!   variable does not exist.
//! - An expression starting with `=` is a function call such as
//!   `=IF(=GT(${qty}, 10), bulk, single)`. The functions are `SUM`, `DIFF`,
//!   `PROD`, `QUOT`, `EQ`, `LT`, `LTE`, `GT`, `GTE`, `IF` and `NOT`. Note
//!   that `GTE` compares strictly, exactly like `GT`.
//!
//! Element text and attribute values are always XML escaped, tag and
//! attribute names are used verbatim.
//!
//! # Lenient and strict modes
//!
//! By default conversion never fails because of the data: unresolved paths
//! become empty, unknown variables are kept verbatim, malformed or unknown
//! function calls evaluate to nothing, and sequences without a list are
//! omitted. [`Engine::set_strict`] turns each of these into an [`Error`]
//! pointing at the offending element.

mod compile;
mod error;
mod fmt;
mod render;
mod types;
mod value;

use std::collections::BTreeMap;
use std::fmt as std_fmt;
use std::fs;
use std::path::Path;

pub use crate::error::Error;
pub use crate::render::{Renderer, Variables};
pub use crate::value::{to_value, List, Map, Value};

use crate::types::program;

/// A type alias for results in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// The compilation and rendering engine.
///
/// Compiled templates are immutable and every render builds its own variable
/// table, so an engine and its templates can be shared between threads.
pub struct Engine {
    strict: bool,
    max_depth: Option<usize>,
    templates: BTreeMap<String, program::Template>,
}

/// A compiled template.
pub struct Template<'engine> {
    engine: &'engine Engine,
    template: program::Template,
}

/// A reference to a compiled template in an [`Engine`].
#[derive(Clone, Copy)]
pub struct TemplateRef<'engine> {
    engine: &'engine Engine,
    template: &'engine program::Template,
}

impl Default for Engine {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Construct a new lenient engine without a depth limit.
    #[inline]
    pub fn new() -> Self {
        Self {
            strict: false,
            max_depth: None,
            templates: BTreeMap::new(),
        }
    }

    /// Enable or disable strict mode.
    ///
    /// In strict mode the following are errors instead of being silently
    /// degraded:
    /// - a `${path}` placeholder that does not resolve, or resolves to a list
    ///   or map;
    /// - a `$${NAME}` placeholder naming an unknown variable;
    /// - an `=` expression that is not a function call, names an unknown
    ///   function, or passes the wrong number of arguments;
    /// - a sequence whose data is not a list;
    /// - a tag or attribute name that is not a valid XML name, checked when
    ///   the template is compiled.
    #[inline]
    pub fn set_strict(&mut self, strict: bool) {
        self.strict = strict;
    }

    /// Set the maximum number of nested element levels.
    ///
    /// Groups and sequences each add a level. Rendering deeper than this
    /// returns an error. There is no limit by default.
    #[inline]
    pub fn set_max_depth(&mut self, depth: usize) {
        self.max_depth = Some(depth);
    }

    /// Add a template to the engine.
    ///
    /// The template will be compiled and stored under the given name.
    #[inline]
    pub fn add_template(&mut self, name: impl Into<String>, source: &str) -> Result<()> {
        let template = compile::template(self, source)?;
        self.templates.insert(name.into(), template);
        Ok(())
    }

    /// Lookup a template by name.
    #[inline]
    pub fn get_template(&self, name: &str) -> Option<TemplateRef<'_>> {
        self.templates.get(name).map(|template| TemplateRef {
            engine: self,
            template,
        })
    }

    /// Remove a template from the engine, returns whether it existed.
    #[inline]
    pub fn remove_template(&mut self, name: &str) -> bool {
        self.templates.remove(name).is_some()
    }

    /// Compile a template.
    ///
    /// The template will not be stored in the engine.
    #[inline]
    pub fn compile(&self, source: &str) -> Result<Template<'_>> {
        let template = compile::template(self, source)?;
        Ok(Template {
            engine: self,
            template,
        })
    }

    /// Read and compile a template file.
    pub fn compile_file(&self, path: impl AsRef<Path>) -> Result<Template<'_>> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|err| {
            Error::with_source(format!("failed to read `{}`", path.display()), err)
        })?;
        self.compile(&source)
    }
}

impl std_fmt::Debug for Engine {
    fn fmt(&self, f: &mut std_fmt::Formatter<'_>) -> std_fmt::Result {
        f.debug_struct("Engine")
            .field("strict", &self.strict)
            .field("max_depth", &self.max_depth)
            .field("templates", &self.templates.keys())
            .finish()
    }
}

impl<'engine> Template<'engine> {
    /// Start rendering the template with the provided data.
    ///
    /// The data can be any [`serde::Serialize`] value.
    #[inline]
    pub fn render<S>(&self, data: S) -> Renderer<'_>
    where
        S: serde::Serialize,
    {
        Renderer::with_serde(self.engine, &self.template, data)
    }

    /// Convert the data to an XML string.
    #[inline]
    pub fn convert<S>(&self, data: S) -> Result<String>
    where
        S: serde::Serialize,
    {
        self.render(data).to_string()
    }

    /// Convert the data to an XML string with additional runtime variables.
    #[inline]
    pub fn convert_with<S, I, K, V>(&self, data: S, vars: I) -> Result<String>
    where
        S: serde::Serialize,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.render(data).with_variables(vars).to_string()
    }

    /// Returns the root tag name.
    #[inline]
    pub fn root(&self) -> &str {
        &self.template.root
    }

    /// Returns the variables declared by the template, as evaluated when it
    /// was compiled.
    #[inline]
    pub fn variables(&self) -> &Variables {
        &self.template.globals
    }
}

impl std_fmt::Debug for Template<'_> {
    fn fmt(&self, f: &mut std_fmt::Formatter<'_>) -> std_fmt::Result {
        f.debug_struct("Template")
            .field("root", &self.template.root)
            .finish_non_exhaustive()
    }
}

impl<'engine> TemplateRef<'engine> {
    /// Start rendering the template with the provided data.
    #[inline]
    pub fn render<S>(&self, data: S) -> Renderer<'engine>
    where
        S: serde::Serialize,
    {
        Renderer::with_serde(self.engine, self.template, data)
    }

    /// Convert the data to an XML string.
    #[inline]
    pub fn convert<S>(&self, data: S) -> Result<String>
    where
        S: serde::Serialize,
    {
        self.render(data).to_string()
    }

    /// Convert the data to an XML string with additional runtime variables.
    #[inline]
    pub fn convert_with<S, I, K, V>(&self, data: S, vars: I) -> Result<String>
    where
        S: serde::Serialize,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.render(data).with_variables(vars).to_string()
    }

    /// Returns the root tag name.
    #[inline]
    pub fn root(&self) -> &'engine str {
        &self.template.root
    }

    /// Returns the variables declared by the template, as evaluated when it
    /// was compiled.
    #[inline]
    pub fn variables(&self) -> &'engine Variables {
        &self.template.globals
    }
}

impl std_fmt::Debug for TemplateRef<'_> {
    fn fmt(&self, f: &mut std_fmt::Formatter<'_>) -> std_fmt::Result {
        f.debug_struct("TemplateRef")
            .field("root", &self.template.root)
            .finish_non_exhaustive()
    }
}
