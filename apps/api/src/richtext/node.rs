use serde::{Deserialize, Serialize};

/// Block-level element kinds. List containers hold only `list-item` children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockKind {
    Paragraph,
    HeadingOne,
    HeadingTwo,
    BulletedList,
    NumberedList,
    ListItem,
}

impl BlockKind {
    pub fn is_list(self) -> bool {
        matches!(self, BlockKind::BulletedList | BlockKind::NumberedList)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
    Justify,
}

impl Align {
    pub fn as_str(self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
            Align::Justify => "justify",
        }
    }
}

/// Boolean formatting flags carried by text leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    Bold,
    Italic,
    Underline,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A formatted run of text. Unset flags are omitted from the encoded form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Text {
    pub text: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub underline: bool,
}

impl Text {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn has(&self, mark: Mark) -> bool {
        match mark {
            Mark::Bold => self.bold,
            Mark::Italic => self.italic,
            Mark::Underline => self.underline,
        }
    }

    pub fn set(&mut self, mark: Mark, value: bool) {
        match mark {
            Mark::Bold => self.bold = value,
            Mark::Italic => self.italic = value,
            Mark::Underline => self.underline = value,
        }
    }

    pub fn same_marks(&self, other: &Text) -> bool {
        self.bold == other.bold && self.italic == other.italic && self.underline == other.underline
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    #[serde(rename = "type")]
    pub kind: BlockKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(kind: BlockKind, children: Vec<Node>) -> Self {
        Self {
            kind,
            align: None,
            children,
        }
    }

    /// An element of `kind` holding a single unformatted text run.
    pub fn with_text(kind: BlockKind, text: impl Into<String>) -> Self {
        Self::new(kind, vec![Node::Text(Text::plain(text))])
    }

    /// True for an empty child list too; rendering and editing treat a
    /// childless block as holding one empty run.
    fn holds_only_text(&self) -> bool {
        self.children.iter().all(|c| matches!(c, Node::Text(_)))
    }

    fn is_well_formed_block(&self) -> bool {
        match self.kind {
            BlockKind::ListItem => false,
            kind if kind.is_list() => self.children.iter().all(|child| match child {
                Node::Element(item) => item.kind == BlockKind::ListItem && item.holds_only_text(),
                Node::Text(_) => false,
            }),
            _ => self.holds_only_text(),
        }
    }

    fn plain_text(&self) -> String {
        self.children
            .iter()
            .map(|child| match child {
                Node::Text(t) => t.text.clone(),
                Node::Element(e) => e.plain_text(),
            })
            .collect::<Vec<_>>()
            .join(if self.kind.is_list() { "\n" } else { "" })
    }

    /// Merges adjacent runs with identical marks and drops empty runs, keeping
    /// at least one (possibly empty) text child.
    pub(crate) fn normalize_text_children(&mut self) {
        if self.kind.is_list() {
            for child in &mut self.children {
                if let Node::Element(item) = child {
                    item.normalize_text_children();
                }
            }
            return;
        }

        let mut merged: Vec<Node> = Vec::with_capacity(self.children.len());
        for child in self.children.drain(..) {
            match child {
                Node::Text(t) if t.text.is_empty() => {}
                Node::Text(t) => match merged.last_mut() {
                    Some(Node::Text(prev)) if prev.same_marks(&t) => prev.text.push_str(&t.text),
                    _ => merged.push(Node::Text(t)),
                },
                other => merged.push(other),
            }
        }
        if merged.is_empty() {
            merged.push(Node::Text(Text::default()));
        }
        self.children = merged;
    }
}

/// A node is either an element with children or a text leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Element(Element),
    Text(Text),
}

/// Root of a rich-text tree: an ordered sequence of block elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    pub blocks: Vec<Element>,
}

impl Default for Document {
    fn default() -> Self {
        Self::empty()
    }
}

impl Document {
    pub fn new(blocks: Vec<Element>) -> Self {
        Self { blocks }
    }

    /// The canonical empty document: a single empty paragraph.
    pub fn empty() -> Self {
        Self::new(vec![Element::with_text(BlockKind::Paragraph, "")])
    }

    /// One paragraph per line of `text`. Used when legacy plain text is
    /// opened for editing.
    pub fn from_literal(text: &str) -> Self {
        let blocks: Vec<Element> = text
            .lines()
            .map(|line| Element::with_text(BlockKind::Paragraph, line))
            .collect();
        if blocks.is_empty() {
            Self::empty()
        } else {
            Self::new(blocks)
        }
    }

    /// Top-level list containers hold only list items, list items and other
    /// blocks hold only text (possibly none), and the root is non-empty.
    pub fn is_well_formed(&self) -> bool {
        !self.blocks.is_empty() && self.blocks.iter().all(Element::is_well_formed_block)
    }

    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(Element::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn has_visible_text(&self) -> bool {
        !self.plain_text().trim().is_empty()
    }

    /// Paths of every text leaf in document order: `[block, text]` for plain
    /// blocks and `[block, item, text]` inside lists.
    pub fn leaf_paths(&self) -> Vec<Vec<usize>> {
        let mut paths = Vec::new();
        for (b, block) in self.blocks.iter().enumerate() {
            for (c, child) in block.children.iter().enumerate() {
                match child {
                    Node::Text(_) => paths.push(vec![b, c]),
                    Node::Element(item) => {
                        for (t, leaf) in item.children.iter().enumerate() {
                            if matches!(leaf, Node::Text(_)) {
                                paths.push(vec![b, c, t]);
                            }
                        }
                    }
                }
            }
        }
        paths
    }

    pub fn text_at(&self, path: &[usize]) -> Option<&Text> {
        let (last, parent) = path.split_last()?;
        match self.children_at(parent)?.get(*last)? {
            Node::Text(t) => Some(t),
            Node::Element(_) => None,
        }
    }

    fn children_at(&self, parent: &[usize]) -> Option<&Vec<Node>> {
        match parent {
            [b] => Some(&self.blocks.get(*b)?.children),
            [b, i] => match self.blocks.get(*b)?.children.get(*i)? {
                Node::Element(item) => Some(&item.children),
                Node::Text(_) => None,
            },
            _ => None,
        }
    }

    pub(crate) fn children_at_mut(&mut self, parent: &[usize]) -> Option<&mut Vec<Node>> {
        match parent {
            [b] => Some(&mut self.blocks.get_mut(*b)?.children),
            [b, i] => match self.blocks.get_mut(*b)?.children.get_mut(*i)? {
                Node::Element(item) => Some(&mut item.children),
                Node::Text(_) => None,
            },
            _ => None,
        }
    }

    pub(crate) fn normalize(&mut self) {
        for block in &mut self.blocks {
            block.normalize_text_children();
        }
    }
}
