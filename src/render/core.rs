use std::fmt::Write;

use crate::compile::join;
use crate::fmt::{escape, Formatter};
use crate::render::value::lookup_path;
use crate::render::Evaluator;
use crate::types::program::{Element, Elements, Template};
use crate::{Error, Result, Value};

/// Walks the element tree of a compiled [`Template`] and writes XML.
pub struct RendererImpl<'render> {
    pub(crate) evaluator: Evaluator<'render>,
    pub(crate) max_depth: Option<usize>,
}

impl RendererImpl<'_> {
    pub(crate) fn render(&self, f: &mut Formatter<'_>, t: &Template, data: &Value) -> Result<()> {
        f.open(&t.root, "")?;
        self.render_elements(f, &t.elements, data, "", 0)?;
        f.close(&t.root)?;
        Ok(())
    }

    /// Render each element in declaration order.
    ///
    /// Nested groups are rendered against the same data, only sequences
    /// descend into the data. The path is only used for error messages.
    fn render_elements(
        &self,
        f: &mut Formatter<'_>,
        elements: &Elements,
        data: &Value,
        path: &str,
        depth: usize,
    ) -> Result<()> {
        if let Some(max) = self.max_depth {
            if depth > max {
                return Err(Error::max_depth(max).with_path(path));
            }
        }

        for (key, element) in elements {
            let path = join(path, key);
            match element {
                Element::Sequence(templates) => match lookup_path(data, key) {
                    Some(Value::List(items)) => {
                        f.open(key, "")?;
                        for item in items {
                            for t in templates {
                                self.render_elements(f, t, item, &path, depth + 1)?;
                            }
                        }
                        f.close(key)?;
                    }
                    value if self.evaluator.strict => {
                        return Err(Error::at(
                            format!(
                                "expected list for sequence, found {}",
                                value.map_or("nothing", Value::human)
                            ),
                            path,
                        ));
                    }
                    _ => log::trace!("skipping sequence `{path}`, data is not a list"),
                },

                Element::Attributed { value, attributes } => {
                    let content = self.evaluate(value, data, &path)?;
                    let mut attrs = String::new();
                    for attr in attributes {
                        let value = self.evaluate(&attr.value, data, &path)?;
                        write!(attrs, " {}=\"{}\"", attr.name, escape(&value))?;
                    }
                    f.open(key, &attrs)?;
                    f.write_str(&escape(&content))?;
                    f.close(key)?;
                }

                Element::Group(inner) => {
                    f.open(key, "")?;
                    self.render_elements(f, inner, data, &path, depth + 1)?;
                    f.close(key)?;
                }

                Element::Leaf(expr) => {
                    let value = self.evaluate(expr, data, &path)?;
                    f.open(key, "")?;
                    f.write_str(&escape(&value))?;
                    f.close(key)?;
                }
            }
        }
        Ok(())
    }

    fn evaluate(&self, expr: &Value, data: &Value, path: &str) -> Result<Value> {
        self.evaluator
            .evaluate(expr, data)
            .map_err(|err| err.with_path(path))
    }
}
