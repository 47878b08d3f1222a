#![allow(clippy::wrong_self_convention)]

mod core;
mod expr;
mod func;
mod value;
mod vars;

use std::io;

use crate::fmt::{Formatter, Writer};
use crate::render::core::RendererImpl;
pub(crate) use crate::render::expr::Evaluator;
pub use crate::render::vars::Variables;
use crate::types::program::Template;
use crate::{to_value, Engine, Error, Result, Value};

/// A renderer that converts data into XML using a compiled
/// [`Template`][crate::Template].
///
/// This struct is created by [`Template::render`][crate::Template::render]
/// or [`TemplateRef::render`][crate::TemplateRef::render].
#[must_use = "must call `.to_string()` or `.to_writer(..)` on the renderer"]
pub struct Renderer<'render> {
    engine: &'render Engine,
    template: &'render Template,
    data: Result<Value>,
    variables: Vec<(String, Value)>,
    max_depth: Option<usize>,
}

impl<'render> Renderer<'render> {
    pub(crate) fn with_serde<S>(
        engine: &'render Engine,
        template: &'render Template,
        data: S,
    ) -> Self
    where
        S: serde::Serialize,
    {
        Self {
            engine,
            template,
            data: to_value(data),
            variables: Vec::new(),
            max_depth: None,
        }
    }

    /// Add runtime variables, as raw expressions.
    ///
    /// They are evaluated before rendering, together with the variables
    /// declared by the template. A template variable with the same name
    /// always takes precedence.
    pub fn with_variables<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.variables
            .extend(vars.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Set the maximum number of nested element levels.
    ///
    /// Defaults to the engine setting.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Render the template to a string.
    pub fn to_string(self) -> Result<String> {
        let mut s = String::new();
        let mut f = Formatter::with_string(&mut s);
        self.render(&mut f)?;
        Ok(s)
    }

    /// Render the template to the given writer.
    pub fn to_writer<W>(self, w: W) -> Result<()>
    where
        W: io::Write,
    {
        let mut w = Writer::new(w);
        let mut f = Formatter::with_writer(&mut w);
        self.render(&mut f)
            .map_err(|err| w.take_err().map(Error::from).unwrap_or(err))
    }

    fn render(self, f: &mut Formatter<'_>) -> Result<()> {
        let data = self.data?;
        let strict = self.engine.strict;
        let merged = vars::merge(self.variables, &self.template.variables);
        let vars = self.template.globals.clone().extend(strict, &merged)?;

        log::debug!(
            "rendering template `{}` with {} variables",
            self.template.root,
            vars.len()
        );

        RendererImpl {
            evaluator: Evaluator::new(&vars, strict),
            max_depth: self.max_depth.or(self.engine.max_depth),
        }
        .render(f, self.template, &data)
    }
}
