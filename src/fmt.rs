//! Output sinks and XML escaping.

use std::fmt;
use std::fmt::Write;
use std::io;

use crate::Value;

/// A [`std::fmt::Write`] façade over a [`String`] or an [`io::Write`] buffer.
pub(crate) struct Formatter<'a> {
    buf: &'a mut (dyn fmt::Write + 'a),
}

pub(crate) struct Writer<W> {
    writer: W,
    err: Option<io::Error>,
}

impl<'a> Formatter<'a> {
    pub fn with_string(buf: &'a mut String) -> Self {
        Self { buf }
    }

    pub fn with_writer<W>(buf: &'a mut Writer<W>) -> Self
    where
        W: io::Write,
    {
        Self { buf }
    }

    /// Writes an opening tag with already escaped attributes.
    pub fn open(&mut self, tag: &str, attrs: &str) -> fmt::Result {
        write!(self, "<{tag}{attrs}>")
    }

    pub fn close(&mut self, tag: &str) -> fmt::Result {
        write!(self, "</{tag}>")
    }
}

impl fmt::Write for Formatter<'_> {
    #[inline]
    fn write_str(&mut self, s: &str) -> fmt::Result {
        fmt::Write::write_str(self.buf, s)
    }

    #[inline]
    fn write_char(&mut self, c: char) -> fmt::Result {
        fmt::Write::write_char(self.buf, c)
    }

    #[inline]
    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> fmt::Result {
        fmt::Write::write_fmt(self.buf, args)
    }
}

impl<W> Writer<W>
where
    W: io::Write,
{
    pub fn new(writer: W) -> Self {
        Self { writer, err: None }
    }

    pub fn take_err(&mut self) -> Option<io::Error> {
        self.err.take()
    }
}

impl<W> fmt::Write for Writer<W>
where
    W: io::Write,
{
    #[inline]
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.writer.write_all(s.as_bytes()).map_err(|e| {
            self.err = Some(e);
            fmt::Error
        })
    }
}

/// Escapes a value for use as element text or an attribute value.
///
/// The value is formatted using its [`Display`][std::fmt::Display]
/// implementation, `None` becomes the empty string.
pub(crate) fn escape(value: &Value) -> String {
    match value {
        Value::String(s) => escape_str(s),
        value => escape_str(&value.to_string()),
    }
}

pub(crate) fn escape_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut last = 0;
    for (i, byte) in s.bytes().enumerate() {
        let entity = match byte {
            b'&' => "&amp;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            b'"' => "&quot;",
            b'\'' => "&apos;",
            _ => continue,
        };
        out.push_str(&s[last..i]);
        out.push_str(entity);
        last = i + 1;
    }
    out.push_str(&s[last..]);
    out
}
