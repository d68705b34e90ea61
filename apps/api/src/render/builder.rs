//! Markup builder — the one place user text crosses the escaping boundary.
//!
//! `raw` appends trusted markup, `text` trims and escapes user content, `href`
//! builds a hyperlink with an escaped display label and a sanitised target.

use std::fmt::Write as _;

use crate::render::escape::{escape_latex, escape_url};

#[derive(Debug, Default)]
pub struct MarkupBuilder {
    buf: String,
}

impl MarkupBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: String::with_capacity(capacity),
        }
    }

    /// Appends trusted markup verbatim.
    pub fn raw(&mut self, markup: &str) -> &mut Self {
        self.buf.push_str(markup);
        self
    }

    /// Appends user text, trimmed and escaped.
    pub fn text(&mut self, text: &str) -> &mut Self {
        self.buf.push_str(&escape_latex(text.trim()));
        self
    }

    /// Appends `{escaped text}`.
    pub fn group(&mut self, text: &str) -> &mut Self {
        self.buf.push('{');
        self.text(text);
        self.buf.push('}');
        self
    }

    /// Appends `\href{target}{escaped label}`.
    pub fn href(&mut self, target: &str, label: &str) -> &mut Self {
        let _ = write!(self.buf, r"\href{{{}}}", escape_url(target));
        self.group(label)
    }

    /// Appends trusted markup followed by a newline.
    pub fn line(&mut self, markup: &str) -> &mut Self {
        self.buf.push_str(markup);
        self.buf.push('\n');
        self
    }

    pub fn newline(&mut self) -> &mut Self {
        self.buf.push('\n');
        self
    }

    /// Appends an already-built fragment.
    pub fn append(&mut self, other: MarkupBuilder) -> &mut Self {
        self.buf.push_str(&other.buf);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn finish(self) -> String {
        self.buf
    }
}
