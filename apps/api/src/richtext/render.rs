use serde::Serialize;

use crate::richtext::codec::{parse, ParsedContent};
use crate::richtext::node::{Align, BlockKind, Document, Element, Node, Text};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockTag {
    P,
    H1,
    H2,
    Ul,
    Ol,
    Li,
}

impl BlockTag {
    fn for_kind(kind: BlockKind) -> Self {
        match kind {
            BlockKind::Paragraph => BlockTag::P,
            BlockKind::HeadingOne => BlockTag::H1,
            BlockKind::HeadingTwo => BlockTag::H2,
            BlockKind::BulletedList => BlockTag::Ul,
            BlockKind::NumberedList => BlockTag::Ol,
            BlockKind::ListItem => BlockTag::Li,
        }
    }

    fn name(self) -> &'static str {
        match self {
            BlockTag::P => "p",
            BlockTag::H1 => "h1",
            BlockTag::H2 => "h2",
            BlockTag::Ul => "ul",
            BlockTag::Ol => "ol",
            BlockTag::Li => "li",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Emphasis {
    Strong,
    Em,
    U,
}

impl Emphasis {
    fn name(self) -> &'static str {
        match self {
            Emphasis::Strong => "strong",
            Emphasis::Em => "em",
            Emphasis::U => "u",
        }
    }
}

/// Display tree shared by the editor preview and the public page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "node", rename_all = "camelCase")]
pub enum Markup {
    Block {
        tag: BlockTag,
        #[serde(skip_serializing_if = "Option::is_none")]
        align: Option<Align>,
        children: Vec<Markup>,
    },
    Emphasis {
        style: Emphasis,
        child: Box<Markup>,
    },
    Text {
        value: String,
    },
    LineBreak,
}

fn wrap(style: Emphasis, child: Markup) -> Markup {
    Markup::Emphasis {
        style,
        child: Box::new(child),
    }
}

// Nesting is always u(em(strong(text))).
fn render_text(text: &Text) -> Markup {
    let mut markup = Markup::Text {
        value: text.text.clone(),
    };
    if text.bold {
        markup = wrap(Emphasis::Strong, markup);
    }
    if text.italic {
        markup = wrap(Emphasis::Em, markup);
    }
    if text.underline {
        markup = wrap(Emphasis::U, markup);
    }
    markup
}

fn render_element(element: &Element) -> Markup {
    Markup::Block {
        tag: BlockTag::for_kind(element.kind),
        align: element.align,
        children: element
            .children
            .iter()
            .map(|child| match child {
                Node::Element(e) => render_element(e),
                Node::Text(t) => render_text(t),
            })
            .collect(),
    }
}

pub fn render(doc: &Document) -> Vec<Markup> {
    doc.blocks.iter().map(render_element).collect()
}

/// Legacy text as a single paragraph with its line breaks kept.
pub fn render_literal(text: &str) -> Vec<Markup> {
    let mut children = Vec::new();
    // Trailing newlines are kept as breaks.
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            children.push(Markup::LineBreak);
        }
        let line = line.strip_suffix('\r').unwrap_or(line);
        if !line.is_empty() {
            children.push(Markup::Text {
                value: line.to_string(),
            });
        }
    }
    vec![Markup::Block {
        tag: BlockTag::P,
        align: None,
        children,
    }]
}

/// Renders a stored rich-text value. Absent or blank values render nothing.
pub fn render_content(raw: Option<&str>) -> Vec<Markup> {
    match raw {
        Some(r) if !r.trim().is_empty() => match parse(Some(r)) {
            ParsedContent::Tree(doc) => render(&doc),
            ParsedContent::Literal(text) => render_literal(&text),
        },
        _ => Vec::new(),
    }
}

fn escape_into(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

fn write_html(out: &mut String, markup: &Markup) {
    match markup {
        Markup::Block {
            tag,
            align,
            children,
        } => {
            out.push('<');
            out.push_str(tag.name());
            if let Some(align) = align {
                out.push_str(" style=\"text-align: ");
                out.push_str(align.as_str());
                out.push('"');
            }
            out.push('>');
            for child in children {
                write_html(out, child);
            }
            out.push_str("</");
            out.push_str(tag.name());
            out.push('>');
        }
        Markup::Emphasis { style, child } => {
            out.push('<');
            out.push_str(style.name());
            out.push('>');
            write_html(out, child);
            out.push_str("</");
            out.push_str(style.name());
            out.push('>');
        }
        Markup::Text { value } => escape_into(out, value),
        Markup::LineBreak => out.push_str("<br>"),
    }
}

pub fn to_html(markup: &[Markup]) -> String {
    let mut out = String::new();
    for node in markup {
        write_html(&mut out, node);
    }
    out
}

/// `render_content` followed by `to_html`; `None` when there is nothing to show.
pub fn content_html(raw: Option<&str>) -> Option<String> {
    let markup = render_content(raw);
    (!markup.is_empty()).then(|| to_html(&markup))
}
