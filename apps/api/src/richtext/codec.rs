use crate::richtext::node::Document;

/// Outcome of reading a stored rich-text value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedContent {
    /// A well-formed encoded tree.
    Tree(Document),
    /// Anything that does not decode to a well-formed tree: legacy plain text,
    /// shown verbatim.
    Literal(String),
}

impl ParsedContent {
    pub fn has_visible_text(&self) -> bool {
        match self {
            ParsedContent::Tree(doc) => doc.has_visible_text(),
            ParsedContent::Literal(text) => !text.trim().is_empty(),
        }
    }
}

/// Reads a stored value. Never fails: blank input yields the canonical empty
/// document, and input that is not an encoded block sequence falls back to
/// [`ParsedContent::Literal`].
pub fn parse(raw: Option<&str>) -> ParsedContent {
    let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
        return ParsedContent::Tree(Document::empty());
    };

    match serde_json::from_str::<Document>(raw) {
        Ok(doc) if doc.blocks.is_empty() => ParsedContent::Tree(Document::empty()),
        Ok(doc) if doc.is_well_formed() => ParsedContent::Tree(doc),
        _ => ParsedContent::Literal(raw.to_string()),
    }
}

/// Deterministic encoding; `parse(Some(&serialize(&doc)))` yields `doc` again
/// for any well-formed document.
pub fn serialize(doc: &Document) -> String {
    serde_json::to_string(doc).unwrap_or_default()
}

/// Opens a stored value in the editor. Legacy text becomes one paragraph per
/// line; the stored value itself is only replaced when the editor saves.
pub fn load_for_editing(raw: Option<&str>) -> Document {
    match parse(raw) {
        ParsedContent::Tree(doc) => doc,
        ParsedContent::Literal(text) => Document::from_literal(&text),
    }
}
