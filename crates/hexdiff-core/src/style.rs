//! Change highlighting for rendered fragments

use crate::change::ChangeKind;
use crate::render::RenderError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const SGR_RESET: &str = "\x1b[0m";
const SGR_INSERT: &str = "\x1b[32m";
const SGR_DELETE: &str = "\x1b[31m";
const SGR_REPLACE: &str = "\x1b[33m";

/// How changed fragments are marked up
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Highlight {
    /// ANSI terminal colors
    #[default]
    #[serde(alias = "terminal")]
    Ansi,
    /// `<span class='kind'>` markup with escaped text
    #[serde(alias = "markup")]
    Html,
}

impl Highlight {
    /// Wrap `text` in the marker for `kind`. Unchanged text passes through.
    pub fn paint(self, text: &str, kind: ChangeKind) -> String {
        if !kind.is_change() {
            return text.to_string();
        }
        match self {
            Highlight::Ansi => {
                let color = match kind {
                    ChangeKind::Insert => SGR_INSERT,
                    ChangeKind::Delete => SGR_DELETE,
                    _ => SGR_REPLACE,
                };
                format!("{color}{text}{SGR_RESET}")
            }
            Highlight::Html => format!(
                "<span class='{}'>{}</span>",
                kind.as_str(),
                escape_html(text)
            ),
        }
    }
}

impl FromStr for Highlight {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ansi" | "terminal" => Ok(Highlight::Ansi),
            "html" | "markup" => Ok(Highlight::Html),
            _ => Err(RenderError::UnknownStyle(s.to_string())),
        }
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_is_untouched() {
        assert_eq!(Highlight::Ansi.paint("41 42", ChangeKind::Equal), "41 42");
        assert_eq!(Highlight::Html.paint("<a>", ChangeKind::Equal), "<a>");
    }

    #[test]
    fn test_ansi_colors() {
        assert_eq!(
            Highlight::Ansi.paint("58", ChangeKind::Replace),
            "\x1b[33m58\x1b[0m"
        );
        assert_eq!(
            Highlight::Ansi.paint("58", ChangeKind::Insert),
            "\x1b[32m58\x1b[0m"
        );
        assert_eq!(
            Highlight::Ansi.paint("58", ChangeKind::Delete),
            "\x1b[31m58\x1b[0m"
        );
    }

    #[test]
    fn test_html_escapes_text() {
        assert_eq!(
            Highlight::Html.paint("<&'\">", ChangeKind::Insert),
            "<span class='insert'>&lt;&amp;&#x27;&quot;&gt;</span>"
        );
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("ansi".parse::<Highlight>().unwrap(), Highlight::Ansi);
        assert_eq!("Markup".parse::<Highlight>().unwrap(), Highlight::Html);
        assert!(matches!(
            "sepia".parse::<Highlight>(),
            Err(RenderError::UnknownStyle(name)) if name == "sepia"
        ));
    }
}
