//! HTML fragments with their visible length.

use std::fmt;
use std::ops::Add;

/// An HTML fragment plus the number of characters a reader sees.
///
/// Fragments are values: combine them with `+`, [`Rendered::concat`] or
/// [`Rendered::join`]. The visible length is what signature wrapping uses,
/// so markup and entities never count beyond the character they display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
    html: String,
    len: usize,
}

impl Rendered {
    pub fn empty() -> Rendered {
        Rendered::default()
    }

    /// Plain text, escaped.
    pub fn text(text: &str) -> Rendered {
        Rendered {
            html: html_escape(text),
            len: text.chars().count(),
        }
    }

    /// Markup taken as-is.
    pub fn raw(html: impl Into<String>) -> Rendered {
        let html = html.into();
        let len = visible_len(&html);
        Rendered { html, len }
    }

    pub fn as_str(&self) -> &str {
        &self.html
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.html.is_empty()
    }

    /// Surround with markup that adds nothing visible.
    pub fn wrap(self, open: &str, close: &str) -> Rendered {
        Rendered {
            html: format!("{}{}{}", open, self.html, close),
            len: self.len,
        }
    }

    pub fn code(self) -> Rendered {
        self.wrap("<code>", "</code>")
    }

    pub fn strong(self) -> Rendered {
        self.wrap("<strong>", "</strong>")
    }

    /// `<a href="..." title="...">label</a>`; an empty title is omitted.
    pub fn hyperlink(href: &str, label: Rendered, title: &str) -> Rendered {
        let open = if title.is_empty() {
            format!("<a href=\"{}\">", html_escape(href))
        } else {
            format!(
                "<a href=\"{}\" title=\"{}\">",
                html_escape(href),
                html_escape(title)
            )
        };
        label.wrap(&open, "</a>")
    }

    pub fn concat(parts: impl IntoIterator<Item = Rendered>) -> Rendered {
        parts.into_iter().fold(Rendered::empty(), |acc, r| acc + r)
    }

    /// Join with a plain-text separator.
    pub fn join(parts: impl IntoIterator<Item = Rendered>, sep: &str) -> Rendered {
        let sep = Rendered::text(sep);
        let mut out = Rendered::empty();
        for (i, part) in parts.into_iter().enumerate() {
            if i > 0 {
                out = out + sep.clone();
            }
            out = out + part;
        }
        out
    }
}

impl Add for Rendered {
    type Output = Rendered;

    fn add(mut self, rhs: Rendered) -> Rendered {
        self.html.push_str(&rhs.html);
        self.len += rhs.len;
        self
    }
}

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.html)
    }
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Characters outside tags, with each entity counted once.
fn visible_len(html: &str) -> usize {
    let mut len = 0;
    let mut in_tag = false;
    let mut in_entity = false;
    let mut chars = html.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '<' if !in_tag
                && !in_entity
                && chars
                    .peek()
                    .is_some_and(|&n| n.is_ascii_alphabetic() || n == '/' || n == '!') =>
            {
                in_tag = true
            }
            '>' if in_tag => in_tag = false,
            _ if in_tag => {}
            '&' => {
                in_entity = true;
                len += 1;
            }
            ';' if in_entity => in_entity = false,
            c if in_entity && !c.is_ascii_alphanumeric() && c != '#' => {
                // bare ampersand
                in_entity = false;
                len += 1;
            }
            _ if in_entity => {}
            _ => len += 1,
        }
    }
    len
}
