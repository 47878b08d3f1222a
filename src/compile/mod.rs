//! Compile the template source into a program that can be executed by the
//! renderer.
//!
//! This process has two stages:
//! - The YAML document is decoded into a generic [`serde_yaml::Value`].
//! - The compiler classifies every element into an [`Element`] and evaluates
//!   the template declared variables.

mod name;

use serde_yaml::{Mapping, Value as Yaml};

use crate::render::Variables;
use crate::types::program::{Attribute, Element, Elements, Template};
use crate::value::key_string;
use crate::{Engine, Error, Result, Value};

/// Compile a template into a program.
pub fn template(engine: &Engine, source: &str) -> Result<Template> {
    let mut doc: Yaml = serde_yaml::from_str(source)?;
    doc.apply_merge()?;
    Compiler::new(engine).compile_template(doc)
}

/// A compiler that classifies a decoded YAML document.
struct Compiler {
    strict: bool,
}

impl Compiler {
    fn new(engine: &Engine) -> Self {
        Self {
            strict: engine.strict,
        }
    }

    fn compile_template(self, doc: Yaml) -> Result<Template> {
        let doc = match untag(doc) {
            Yaml::Mapping(doc) => doc,
            doc => {
                return Err(Error::new(format!(
                    "expected template to be a mapping, found {}",
                    Value::from(doc).human()
                )))
            }
        };

        let mut root = None;
        let mut variables = None;
        let mut elements = None;
        for (key, value) in doc {
            match key.as_str() {
                Some("root") => root = Some(value),
                Some("variables") => variables = Some(value),
                Some("elements") => elements = Some(value),
                _ => {}
            }
        }

        let root = match root.map(untag) {
            Some(Yaml::String(root)) => root,
            Some(root @ (Yaml::Number(_) | Yaml::Bool(_))) => Value::from(root).to_string(),
            Some(root) => {
                return Err(Error::new(format!(
                    "expected `root` to be a string, found {}",
                    Value::from(root).human()
                )))
            }
            None => return Err(Error::new("template is missing `root`")),
        };
        self.check_name(&root, &root)?;

        let variables = match variables.map(untag) {
            None | Some(Yaml::Null) => Vec::new(),
            Some(Yaml::Mapping(vars)) => vars
                .into_iter()
                .map(|(k, v)| (key_string(k), Value::from(v)))
                .collect(),
            Some(vars) => {
                return Err(Error::new(format!(
                    "expected `variables` to be a mapping, found {}",
                    Value::from(vars).human()
                )))
            }
        };

        let elements = match elements.map(untag) {
            Some(Yaml::Null) => Vec::new(),
            Some(Yaml::Mapping(elements)) => self.compile_elements(elements, "")?,
            Some(elements) => {
                return Err(Error::new(format!(
                    "expected `elements` to be a mapping, found {}",
                    Value::from(elements).human()
                )))
            }
            None => return Err(Error::new("template is missing `elements`")),
        };

        let globals = Variables::default().extend(self.strict, &variables)?;

        log::debug!(
            "compiled template `{root}` with {} elements and {} variables",
            elements.len(),
            variables.len()
        );

        Ok(Template {
            root,
            variables,
            globals,
            elements,
        })
    }

    fn compile_elements(&self, mapping: Mapping, path: &str) -> Result<Elements> {
        mapping
            .into_iter()
            .map(|(key, value)| {
                let key = key_string(key);
                let path = join(path, &key);
                self.check_name(&key, &path)?;
                let element = self.compile_element(value, &path)?;
                Ok((key, element))
            })
            .collect()
    }

    fn compile_element(&self, value: Yaml, path: &str) -> Result<Element> {
        match untag(value) {
            Yaml::Sequence(seq) => seq
                .into_iter()
                .map(|item| match untag(item) {
                    Yaml::Mapping(mapping) => self.compile_elements(mapping, path),
                    item => Err(Error::at(
                        format!(
                            "expected sequence entry to be a mapping, found {}",
                            Value::from(item).human()
                        ),
                        path,
                    )),
                })
                .collect::<Result<_>>()
                .map(Element::Sequence),

            Yaml::Mapping(mapping) if mapping.contains_key("value") => {
                self.compile_attributed(mapping, path)
            }

            Yaml::Mapping(mapping) => self.compile_elements(mapping, path).map(Element::Group),

            scalar => Ok(Element::Leaf(Value::from(scalar))),
        }
    }

    fn compile_attributed(&self, mapping: Mapping, path: &str) -> Result<Element> {
        let mut value = Value::None;
        let mut attributes = Vec::new();
        for (key, v) in mapping {
            match key.as_str() {
                Some("value") => value = Value::from(v),
                // Anything other than a sequence is ignored.
                Some("attributes") => {
                    if let Yaml::Sequence(attrs) = untag(v) {
                        for attr in attrs {
                            if let Some(attr) = self.compile_attribute(attr, path)? {
                                attributes.push(attr);
                            }
                        }
                    }
                }
                _ => {}
            }
        }
        Ok(Element::Attributed { value, attributes })
    }

    fn compile_attribute(&self, attr: Yaml, path: &str) -> Result<Option<Attribute>> {
        let Yaml::Mapping(attr) = untag(attr) else {
            log::warn!("skipping attribute that is not a mapping at `{path}`");
            return Ok(None);
        };
        let mut name = None;
        let mut value = Value::None;
        for (k, v) in attr {
            match k.as_str() {
                Some("name") => name = Some(v),
                Some("value") => value = Value::from(v),
                _ => {}
            }
        }
        let name = match name.map(untag) {
            Some(Yaml::Null) | None => {
                log::warn!("skipping attribute without a name at `{path}`");
                return Ok(None);
            }
            Some(name) => key_string(name),
        };
        self.check_name(&name, path)?;
        Ok(Some(Attribute { name, value }))
    }

    /// In strict mode, check that the name is usable as a tag or attribute.
    fn check_name(&self, name: &str, path: &str) -> Result<()> {
        if self.strict && !name::is_valid(name) {
            return Err(Error::at(format!("invalid XML name `{name}`"), path));
        }
        Ok(())
    }
}

fn untag(value: Yaml) -> Yaml {
    match value {
        Yaml::Tagged(tagged) => untag(tagged.value),
        value => value,
    }
}

pub(crate) fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_owned()
    } else {
        format!("{path}.{key}")
    }
}
