//! Selection-based editing commands.
//!
//! Every command validates the selection against the input document first and
//! returns a fresh document; the input is never mutated, so a rejected command
//! leaves nothing half-applied.

use thiserror::Error;

use crate::richtext::node::{Align, BlockKind, Document, Element, Mark, Node, Text};
use crate::richtext::selection::{Point, Range};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error("selection path {0:?} does not address a text node")]
    InvalidPath(Vec<usize>),

    #[error("offset {offset} is past the end of the text at {path:?} (length {len})")]
    OffsetOutOfRange {
        path: Vec<usize>,
        offset: usize,
        len: usize,
    },

    #[error("list items are created by toggling a list kind, not set directly")]
    ListItemKind,

    #[error("document is not well-formed")]
    Malformed,
}

fn checked_edges<'a>(
    doc: &Document,
    range: &'a Range,
) -> Result<(&'a Point, &'a Point), TransformError> {
    if !doc.is_well_formed() {
        return Err(TransformError::Malformed);
    }
    let (start, end) = range.edges();
    for point in [start, end] {
        let text = doc
            .text_at(&point.path)
            .ok_or_else(|| TransformError::InvalidPath(point.path.clone()))?;
        let len = text.char_len();
        if point.offset > len {
            return Err(TransformError::OffsetOutOfRange {
                path: point.path.clone(),
                offset: point.offset,
                len,
            });
        }
    }
    Ok((start, end))
}

/// Inclusive range of list items in block `b` covered by the selection.
fn item_span(b: usize, start: &Point, end: &Point, item_count: usize) -> (usize, usize) {
    let lo = if b == start.path[0] { start.path[1] } else { 0 };
    let hi = if b == end.path[0] {
        end.path[1]
    } else {
        item_count.saturating_sub(1)
    };
    (lo, hi)
}

fn byte_index(s: &str, char_index: usize) -> usize {
    s.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// Splits `text` at the char offsets `from..to` and sets `mark` on the middle piece.
fn split_run(text: &Text, from: usize, to: usize, mark: Mark, value: bool) -> Vec<Text> {
    let a = byte_index(&text.text, from);
    let b = byte_index(&text.text, to);
    let piece = |s: &str| Text {
        text: s.to_string(),
        ..text.clone()
    };

    let mut pieces = Vec::with_capacity(3);
    if a > 0 {
        pieces.push(piece(&text.text[..a]));
    }
    let mut middle = piece(&text.text[a..b]);
    middle.set(mark, value);
    pieces.push(middle);
    if b < text.text.len() {
        pieces.push(piece(&text.text[b..]));
    }
    pieces
}

/// Toggles `mark` over exactly the selected characters.
///
/// The mark is removed when every selected run already carries it, and added
/// everywhere otherwise. Runs are split at the selection edges and adjacent
/// runs with identical marks are merged afterwards. A collapsed selection is a
/// no-op.
pub fn toggle_mark(doc: &Document, range: &Range, mark: Mark) -> Result<Document, TransformError> {
    let (start, end) = checked_edges(doc, range)?;
    if range.is_collapsed() {
        return Ok(doc.clone());
    }

    let spans: Vec<(Vec<usize>, usize, usize)> = doc
        .leaf_paths()
        .into_iter()
        .filter(|path| *path >= start.path && *path <= end.path)
        .filter_map(|path| {
            let len = doc.text_at(&path)?.char_len();
            let from = if path == start.path { start.offset } else { 0 };
            let to = if path == end.path { end.offset } else { len };
            (from < to).then_some((path, from, to))
        })
        .collect();

    if spans.is_empty() {
        return Ok(doc.clone());
    }

    let active = spans
        .iter()
        .all(|(path, _, _)| doc.text_at(path).is_some_and(|t| t.has(mark)));

    let mut out = doc.clone();
    // Back to front so earlier sibling indices stay valid while splicing.
    for (path, from, to) in spans.iter().rev() {
        let Some((index, parent)) = path.split_last() else {
            continue;
        };
        let Some(children) = out.children_at_mut(parent) else {
            continue;
        };
        let Some(Node::Text(text)) = children.get(*index) else {
            continue;
        };
        let pieces = split_run(text, *from, *to, mark, !active);
        children.splice(*index..=*index, pieces.into_iter().map(Node::Text));
    }
    out.normalize();
    Ok(out)
}

/// Changes the kind of every top-level block touched by the selection.
///
/// Selected list items are first lifted out of their lists (splitting a list
/// around them when only part of it is selected). Then:
/// - list kind, all touched blocks already that list kind: the lifted items
///   stay as plain paragraphs (toggle off);
/// - list kind otherwise: the touched blocks are wrapped in one new list and
///   each becomes a `list-item`;
/// - paragraph or heading kind: `kind` is replaced in place, children untouched.
pub fn set_block_kind(
    doc: &Document,
    range: &Range,
    kind: BlockKind,
) -> Result<Document, TransformError> {
    if kind == BlockKind::ListItem {
        return Err(TransformError::ListItemKind);
    }
    let (start, end) = checked_edges(doc, range)?;
    let (first, last) = (start.path[0], end.path[0]);

    let toggling_off = kind.is_list() && doc.blocks[first..=last].iter().all(|b| b.kind == kind);

    let mut blocks: Vec<Element> = doc.blocks[..first].to_vec();
    let mut units: Vec<Element> = Vec::new();
    let mut trailing: Option<Element> = None;

    for (b, block) in doc.blocks.iter().enumerate().take(last + 1).skip(first) {
        if !block.kind.is_list() {
            units.push(block.clone());
            continue;
        }
        let items = &block.children;
        if items.is_empty() {
            // An empty list inside the selection carries on as an empty block.
            units.push(Element {
                kind: BlockKind::Paragraph,
                align: block.align,
                children: Vec::new(),
            });
            continue;
        }
        let (lo, hi) = item_span(b, start, end, items.len());
        if lo > 0 {
            blocks.push(Element {
                children: items[..lo].to_vec(),
                ..block.clone()
            });
        }
        units.extend(items[lo..=hi].iter().filter_map(|node| match node {
            Node::Element(item) => Some(Element {
                kind: BlockKind::Paragraph,
                align: item.align,
                children: item.children.clone(),
            }),
            Node::Text(_) => None,
        }));
        if hi + 1 < items.len() {
            trailing = Some(Element {
                children: items[hi + 1..].to_vec(),
                ..block.clone()
            });
        }
    }

    if kind.is_list() {
        if toggling_off {
            blocks.extend(units);
        } else {
            let items = units
                .into_iter()
                .map(|unit| {
                    Node::Element(Element {
                        kind: BlockKind::ListItem,
                        align: unit.align,
                        children: unit.children,
                    })
                })
                .collect();
            blocks.push(Element::new(kind, items));
        }
    } else {
        blocks.extend(units.into_iter().map(|unit| Element { kind, ..unit }));
    }

    blocks.extend(trailing);
    blocks.extend_from_slice(&doc.blocks[last + 1..]);
    Ok(Document::new(blocks))
}

/// Sets or clears `align` on the selected blocks. Inside lists the selected
/// items are aligned; list containers themselves are left alone.
pub fn set_align(
    doc: &Document,
    range: &Range,
    align: Option<Align>,
) -> Result<Document, TransformError> {
    let (start, end) = checked_edges(doc, range)?;
    let (first, last) = (start.path[0], end.path[0]);

    let mut out = doc.clone();
    for (b, block) in out
        .blocks
        .iter_mut()
        .enumerate()
        .take(last + 1)
        .skip(first)
    {
        if !block.kind.is_list() {
            block.align = align;
            continue;
        }
        if block.children.is_empty() {
            continue;
        }
        let (lo, hi) = item_span(b, start, end, block.children.len());
        for child in &mut block.children[lo..=hi] {
            if let Node::Element(item) = child {
                item.align = align;
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn para(text: &str) -> Element {
        Element::with_text(BlockKind::Paragraph, text)
    }

    fn list(kind: BlockKind, items: &[&str]) -> Element {
        Element::new(
            kind,
            items
                .iter()
                .map(|t| Node::Element(Element::with_text(BlockKind::ListItem, *t)))
                .collect(),
        )
    }

    fn runs(el: &Element) -> Vec<(String, bool)> {
        el.children
            .iter()
            .filter_map(|n| match n {
                Node::Text(t) => Some((t.text.clone(), t.bold)),
                Node::Element(_) => None,
            })
            .collect()
    }

    fn span(from: (Vec<usize>, usize), to: (Vec<usize>, usize)) -> Range {
        Range::new(Point::new(from.0, from.1), Point::new(to.0, to.1))
    }

    #[test]
    fn test_bold_middle_word_splits_into_three_runs() {
        let doc = Document::new(vec![para("one two three")]);
        let out = toggle_mark(&doc, &Range::within(vec![0, 0], 4, 7), Mark::Bold).unwrap();
        assert_eq!(
            runs(&out.blocks[0]),
            vec![
                ("one ".to_string(), false),
                ("two".to_string(), true),
                (" three".to_string(), false),
            ]
        );
    }

    #[test]
    fn test_toggling_bold_twice_restores_single_run() {
        let doc = Document::new(vec![para("one two three")]);
        let bolded = toggle_mark(&doc, &Range::within(vec![0, 0], 4, 7), Mark::Bold).unwrap();
        let restored =
            toggle_mark(&bolded, &Range::within(vec![0, 1], 0, 3), Mark::Bold).unwrap();
        assert_eq!(restored, doc);
    }

    #[test]
    fn test_mark_across_blocks_covers_only_selected_span() {
        let doc = Document::new(vec![para("alpha"), para("beta")]);
        let out = toggle_mark(
            &doc,
            &span((vec![0, 0], 3), (vec![1, 0], 2)),
            Mark::Italic,
        )
        .unwrap();
        let italics: Vec<(String, bool)> = out
            .leaf_paths()
            .iter()
            .filter_map(|p| out.text_at(p))
            .map(|t| (t.text.clone(), t.italic))
            .collect();
        assert_eq!(
            italics,
            vec![
                ("alp".to_string(), false),
                ("ha".to_string(), true),
                ("be".to_string(), true),
                ("ta".to_string(), false),
            ]
        );
    }

    #[test]
    fn test_mixed_selection_adds_mark_everywhere() {
        let doc = Document::new(vec![para("one two three")]);
        let partly = toggle_mark(&doc, &Range::within(vec![0, 0], 0, 3), Mark::Bold).unwrap();
        let all = toggle_mark(
            &partly,
            &span((vec![0, 0], 0), (vec![0, 1], 10)),
            Mark::Bold,
        )
        .unwrap();
        assert_eq!(runs(&all.blocks[0]), vec![("one two three".to_string(), true)]);
    }

    #[test]
    fn test_multibyte_offsets_are_characters() {
        let doc = Document::new(vec![para("héllo wörld")]);
        let out = toggle_mark(&doc, &Range::within(vec![0, 0], 6, 11), Mark::Underline).unwrap();
        assert_eq!(out.text_at(&[0, 1]).map(|t| t.text.as_str()), Some("wörld"));
        assert!(out.text_at(&[0, 1]).unwrap().underline);
    }

    #[test]
    fn test_collapsed_selection_is_noop() {
        let doc = Document::new(vec![para("text")]);
        let out = toggle_mark(&doc, &Range::within(vec![0, 0], 2, 2), Mark::Bold).unwrap();
        assert_eq!(out, doc);
    }

    #[test]
    fn test_wrap_and_unwrap_bulleted_list() {
        let doc = Document::new(vec![para("first"), para("second")]);
        let wrapped = set_block_kind(
            &doc,
            &span((vec![0, 0], 0), (vec![1, 0], 6)),
            BlockKind::BulletedList,
        )
        .unwrap();

        assert_eq!(
            wrapped,
            Document::new(vec![list(BlockKind::BulletedList, &["first", "second"])])
        );

        let unwrapped = set_block_kind(
            &wrapped,
            &span((vec![0, 0, 0], 0), (vec![0, 1, 0], 6)),
            BlockKind::BulletedList,
        )
        .unwrap();
        assert_eq!(unwrapped, doc);
    }

    #[test]
    fn test_unwrapping_middle_item_splits_list() {
        let doc = Document::new(vec![list(BlockKind::BulletedList, &["a", "b", "c"])]);
        let out = set_block_kind(
            &doc,
            &Range::within(vec![0, 1, 0], 0, 1),
            BlockKind::BulletedList,
        )
        .unwrap();
        assert_eq!(
            out,
            Document::new(vec![
                list(BlockKind::BulletedList, &["a"]),
                para("b"),
                list(BlockKind::BulletedList, &["c"]),
            ])
        );
    }

    #[test]
    fn test_switching_list_kind_rewraps_items() {
        let doc = Document::new(vec![list(BlockKind::NumberedList, &["a", "b"])]);
        let out = set_block_kind(
            &doc,
            &span((vec![0, 0, 0], 0), (vec![0, 1, 0], 1)),
            BlockKind::BulletedList,
        )
        .unwrap();
        assert_eq!(
            out,
            Document::new(vec![list(BlockKind::BulletedList, &["a", "b"])])
        );
    }

    #[test]
    fn test_heading_replaces_kind_and_keeps_children() {
        let doc = Document::new(vec![para("plain"), para("title")]);
        let marked = toggle_mark(&doc, &Range::within(vec![1, 0], 0, 2), Mark::Bold).unwrap();
        let out = set_block_kind(
            &marked,
            &Range::within(vec![1, 1], 0, 1),
            BlockKind::HeadingOne,
        )
        .unwrap();
        assert_eq!(out.blocks[0], marked.blocks[0]);
        assert_eq!(out.blocks[1].kind, BlockKind::HeadingOne);
        assert_eq!(out.blocks[1].children, marked.blocks[1].children);
    }

    #[test]
    fn test_list_item_kind_is_rejected() {
        let doc = Document::new(vec![para("x")]);
        let err = set_block_kind(&doc, &Range::within(vec![0, 0], 0, 1), BlockKind::ListItem)
            .unwrap_err();
        assert_eq!(err, TransformError::ListItemKind);
    }

    #[test]
    fn test_align_touches_only_selected_elements() {
        let doc = Document::new(vec![
            para("intro"),
            list(BlockKind::BulletedList, &["a", "b"]),
            para("outro"),
        ]);
        let out = set_align(
            &doc,
            &span((vec![0, 0], 1), (vec![1, 0, 0], 1)),
            Some(Align::Center),
        )
        .unwrap();
        assert_eq!(out.blocks[0].align, Some(Align::Center));
        assert_eq!(out.blocks[1].align, None);
        let aligned: Vec<Option<Align>> = out.blocks[1]
            .children
            .iter()
            .map(|n| match n {
                Node::Element(item) => item.align,
                Node::Text(_) => None,
            })
            .collect();
        assert_eq!(aligned, vec![Some(Align::Center), None]);
        assert_eq!(out.blocks[2].align, None);
        assert_eq!(out.blocks[1].kind, BlockKind::BulletedList);
    }

    #[test]
    fn test_selection_across_empty_list() {
        let doc = Document::new(vec![
            para("a"),
            Element::new(BlockKind::BulletedList, vec![]),
            para("b"),
        ]);
        let range = span((vec![0, 0], 0), (vec![2, 0], 1));

        let wrapped = set_block_kind(&doc, &range, BlockKind::NumberedList).unwrap();
        assert_eq!(wrapped.blocks.len(), 1);
        assert_eq!(wrapped.blocks[0].children.len(), 3);
        assert!(wrapped.is_well_formed());

        let aligned = set_align(&doc, &range, Some(Align::Center)).unwrap();
        assert_eq!(aligned.blocks[0].align, Some(Align::Center));
        assert_eq!(aligned.blocks[1], doc.blocks[1]);
        assert_eq!(aligned.blocks[2].align, Some(Align::Center));
    }

    #[test]
    fn test_clearing_align() {
        let doc = Document::new(vec![para("x")]);
        let centered =
            set_align(&doc, &Range::within(vec![0, 0], 0, 1), Some(Align::Right)).unwrap();
        let cleared = set_align(&centered, &Range::within(vec![0, 0], 0, 1), None).unwrap();
        assert_eq!(cleared, doc);
    }

    #[test]
    fn test_invalid_path_is_rejected() {
        let doc = Document::new(vec![para("x")]);
        let err = toggle_mark(&doc, &Range::within(vec![3, 0], 0, 1), Mark::Bold).unwrap_err();
        assert_eq!(err, TransformError::InvalidPath(vec![3, 0]));
    }

    #[test]
    fn test_offset_past_end_is_rejected() {
        let doc = Document::new(vec![para("abc")]);
        let err = set_align(&doc, &Range::within(vec![0, 0], 0, 9), Some(Align::Left)).unwrap_err();
        assert!(matches!(err, TransformError::OffsetOutOfRange { len: 3, .. }));
    }
}
