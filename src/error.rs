use std::error::Error as StdError;
use std::fmt;
use std::io;

/// An error that can occur during template compilation or rendering.
///
/// In the default lenient mode rendering only fails on I/O errors, data
/// serialization errors, or when an explicit depth limit is exceeded. Strict
/// mode turns every silent degradation into an error as well, see
/// [`Engine::set_strict`][crate::Engine::set_strict].
pub struct Error {
    msg: String,
    /// The dotted element path where the error occurred.
    path: Option<String>,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl Error {
    pub(crate) fn new(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            path: None,
            source: None,
        }
    }

    pub(crate) fn with_source(
        msg: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self {
            msg: msg.into(),
            path: None,
            source: Some(Box::new(source)),
        }
    }

    /// Construct a new error at the given element path.
    pub(crate) fn at(msg: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(msg).with_path(path)
    }

    pub(crate) fn max_depth(max: usize) -> Self {
        Self::new(format!("reached maximum element depth ({max})"))
    }

    /// Attach the element path, unless a more specific one is already set.
    pub(crate) fn with_path(mut self, path: impl Into<String>) -> Self {
        if self.path.is_none() {
            let path = path.into();
            if !path.is_empty() {
                self.path = Some(path);
            }
        }
        self
    }

    /// Returns the dotted element path where the error occurred, if known.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }
}

impl serde::ser::Error for Error {
    fn custom<T>(msg: T) -> Self
    where
        T: fmt::Display,
    {
        Self::new(msg.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Self::with_source("failed to parse template", err)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::with_source("io error", err)
    }
}

impl From<fmt::Error> for Error {
    fn from(err: fmt::Error) -> Self {
        Self::with_source("format error", err)
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|err| &**err as &(dyn StdError + 'static))
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:#}")
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.msg)?;
        if let Some(path) = &self.path {
            write!(f, " at `{path}`")?;
        }
        if f.alternate() {
            if let Some(source) = &self.source {
                write!(f, ": {source}")?;
            }
        }
        Ok(())
    }
}
