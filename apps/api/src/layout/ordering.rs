//! Pure list operations behind the dashboard's layout editor.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/// Swaps the item at `index` with its neighbour (`Up` = index - 1,
/// `Down` = index + 1). Returns the list unchanged when either position is
/// out of bounds.
pub fn move_item<T: Clone>(list: &[T], index: usize, direction: Direction) -> Vec<T> {
    let mut out = list.to_vec();
    let neighbor = match direction {
        Direction::Up => index.checked_sub(1),
        Direction::Down => index.checked_add(1),
    };
    if let Some(neighbor) = neighbor {
        if index < out.len() && neighbor < out.len() {
            out.swap(index, neighbor);
        }
    }
    out
}

/// Hides `name` if it is visible, otherwise shows it.
///
/// Hiding removes it and keeps everything else in place. Showing inserts it
/// before the first visible section that ranks after it in `canonical`, so it
/// returns to its canonical slot while the user's manual order of the other
/// sections is untouched. Names missing from `canonical` are appended.
pub fn toggle_section_visibility(
    sections: &[String],
    canonical: &[String],
    name: &str,
) -> Vec<String> {
    if sections.iter().any(|s| s == name) {
        return sections.iter().filter(|s| *s != name).cloned().collect();
    }

    let rank = |section: &str| canonical.iter().position(|c| c == section);
    let mut out = sections.to_vec();
    let insert_at = rank(name)
        .and_then(|own| {
            out.iter()
                .position(|s| rank(s).is_some_and(|other| other > own))
        })
        .unwrap_or(out.len());
    out.insert(insert_at, name.to_string());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::layout::canonical_section_names;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_move_up_at_start_is_noop() {
        assert_eq!(move_item(&["A", "B", "C"], 0, Direction::Up), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_move_down_swaps_with_next() {
        assert_eq!(move_item(&["A", "B", "C"], 0, Direction::Down), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_move_down_at_end_is_noop() {
        assert_eq!(move_item(&["A", "B", "C"], 2, Direction::Down), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_move_out_of_range_index_is_noop() {
        assert_eq!(move_item(&["A", "B"], 7, Direction::Up), vec!["A", "B"]);
        assert_eq!(move_item(&["A", "B"], usize::MAX, Direction::Down), vec!["A", "B"]);
        assert!(move_item::<&str>(&[], 0, Direction::Down).is_empty());
    }

    #[test]
    fn test_reshown_section_returns_to_canonical_slot() {
        let canonical = canonical_section_names();
        let visible = names(&["About", "Skills", "Contact"]);
        let hidden = toggle_section_visibility(&visible, &canonical, "About");
        assert_eq!(hidden, names(&["Skills", "Contact"]));
        let shown = toggle_section_visibility(&hidden, &canonical, "About");
        assert_eq!(shown, names(&["About", "Skills", "Contact"]));
    }

    #[test]
    fn test_reshow_ignores_previous_manual_position() {
        let canonical = canonical_section_names();
        // About had been moved to the end before being hidden.
        let visible = names(&["Skills", "Projects", "About"]);
        let hidden = toggle_section_visibility(&visible, &canonical, "About");
        let shown = toggle_section_visibility(&hidden, &canonical, "About");
        assert_eq!(shown, names(&["About", "Skills", "Projects"]));
    }

    #[test]
    fn test_reshow_keeps_manual_order_of_others() {
        let canonical = canonical_section_names();
        let visible = names(&["Contact", "Projects", "About"]);
        let shown = toggle_section_visibility(&visible, &canonical, "Skills");
        // Contact is the first visible section ranked after Skills.
        assert_eq!(shown, names(&["Skills", "Contact", "Projects", "About"]));
    }

    #[test]
    fn test_show_into_empty_list() {
        let canonical = canonical_section_names();
        assert_eq!(
            toggle_section_visibility(&[], &canonical, "Education"),
            names(&["Education"])
        );
    }

    #[test]
    fn test_unknown_section_is_appended_and_removable() {
        let canonical = canonical_section_names();
        let shown = toggle_section_visibility(&names(&["About"]), &canonical, "Blog");
        assert_eq!(shown, names(&["About", "Blog"]));
        assert_eq!(
            toggle_section_visibility(&shown, &canonical, "Blog"),
            names(&["About"])
        );
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;
        use proptest::sample::{subsequence, Index};

        fn visible_sections() -> impl Strategy<Value = Vec<String>> {
            subsequence(canonical_section_names(), 0..=7).prop_shuffle()
        }

        proptest! {
            #[test]
            fn move_item_swaps_at_most_two_positions(
                list in prop::collection::vec(0u8..50, 0..12),
                index in 0usize..14,
                up in any::<bool>(),
            ) {
                let direction = if up { Direction::Up } else { Direction::Down };
                let moved = move_item(&list, index, direction);

                prop_assert_eq!(moved.len(), list.len());
                let changed = list.iter().zip(&moved).filter(|(a, b)| a != b).count();
                prop_assert!(changed <= 2);

                let (mut before, mut after) = (list.clone(), moved.clone());
                before.sort_unstable();
                after.sort_unstable();
                prop_assert_eq!(before, after);
            }

            #[test]
            fn hide_then_show_keeps_order_of_others(
                sections in visible_sections(),
                pick in any::<Index>(),
            ) {
                prop_assume!(!sections.is_empty());
                let canonical = canonical_section_names();
                let name = sections[pick.index(sections.len())].clone();

                let hidden = toggle_section_visibility(&sections, &canonical, &name);
                prop_assert!(!hidden.contains(&name));
                let shown = toggle_section_visibility(&hidden, &canonical, &name);
                prop_assert_eq!(shown.iter().filter(|s| **s == name).count(), 1);

                let others: Vec<&String> = sections.iter().filter(|s| **s != name).collect();
                let others_after: Vec<&String> = shown.iter().filter(|s| **s != name).collect();
                prop_assert_eq!(others, others_after);
            }

            #[test]
            fn show_then_hide_restores_sections(
                sections in visible_sections(),
                pick in any::<Index>(),
            ) {
                let canonical = canonical_section_names();
                let hidden: Vec<&String> =
                    canonical.iter().filter(|c| !sections.contains(c)).collect();
                prop_assume!(!hidden.is_empty());
                let name = hidden[pick.index(hidden.len())].clone();

                let shown = toggle_section_visibility(&sections, &canonical, &name);
                prop_assert_eq!(toggle_section_visibility(&shown, &canonical, &name), sections);
            }
        }
    }
}
