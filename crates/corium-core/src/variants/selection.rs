//! Selection mutation protocol.
//!
//! Keeps the two axes mutually consistent as the user interacts: picking one
//! axis clears the other only when the pair stops being jointly satisfiable,
//! so the view never sits on an impossible combination but also never throws
//! away a choice that still works. Every mutation leaves the state ready for
//! an immediate, synchronous re-resolution — there is no deferred step.

use crate::products::Variant;
use crate::variants::resolve::{jointly_satisfiable, Selection};

/// Ephemeral per-view selection state.
///
/// Created empty when a product view mounts, mutated only by user
/// interaction, and discarded when the view unmounts or switches product.
/// Not persisted anywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    selection: Selection,
}

impl SelectionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The user picked a color swatch.
    ///
    /// Sets the color, then drops the current size if no purchasable variant
    /// carries the new pair — a stale, now-impossible size must not linger.
    pub fn pick_color(&mut self, variants: &[Variant], color: &str) {
        self.selection.set_color(Some(color));
        if self.selection.size().is_some() && !jointly_satisfiable(variants, &self.selection) {
            self.selection.set_size(None);
        }
    }

    /// The user chose a size. Symmetric to [`Self::pick_color`].
    pub fn pick_size(&mut self, variants: &[Variant], size: &str) {
        self.selection.set_size(Some(size));
        if self.selection.color().is_some() && !jointly_satisfiable(variants, &self.selection) {
            self.selection.set_color(None);
        }
    }

    /// The user paginated through product images on a card.
    ///
    /// Browsing images is independent of making a purchase selection, so the
    /// card drops the resolved variant entirely.
    pub fn clear(&mut self) {
        self.selection = Selection::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variants::resolve::{resolve, Resolution};
    use crate::variants::{colors_for, sizes_for};

    fn variant(id: &str, color: &str, size: &str, available: bool) -> Variant {
        Variant {
            id: id.to_string(),
            sku: format!("SKU-{id}"),
            color: Some(color.to_string()),
            size: Some(size.to_string()),
            price: 150_000,
            stock: u32::from(available),
            image_url: None,
            available,
        }
    }

    #[test]
    fn picking_color_keeps_a_still_valid_size() {
        let variants = vec![
            variant("1", "Negro", "15\"", true),
            variant("2", "Roble", "15\"", true),
        ];
        let mut state = SelectionState::new();
        state.pick_size(&variants, "15\"");
        state.pick_color(&variants, "Roble");
        assert_eq!(state.selection().size(), Some("15\""));
        assert_eq!(state.selection().color(), Some("Roble"));
    }

    #[test]
    fn switching_to_a_color_without_the_size_clears_the_size() {
        // Color A, size S, then color B with no variant at size S: the
        // size must come back empty.
        let variants = vec![
            variant("1", "Negro", "15\"", true),
            variant("2", "Negro", "16\"", true),
            variant("3", "Roble", "15\"", true),
        ];
        let mut state = SelectionState::new();
        state.pick_color(&variants, "Negro");
        state.pick_size(&variants, "16\"");
        state.pick_color(&variants, "Roble");
        assert_eq!(state.selection().color(), Some("Roble"));
        assert_eq!(state.selection().size(), None);
    }

    #[test]
    fn picking_an_unavailable_size_clears_the_color() {
        // Negro is chosen, then the dead 16" size. The pair is
        // unsatisfiable, so the color is dropped and resolution lands on
        // the sold-out 16" row.
        let variants = vec![
            variant("1", "Negro", "15\"", true),
            variant("2", "Negro", "16\"", false),
        ];
        let mut state = SelectionState::new();
        state.pick_color(&variants, "Negro");
        state.pick_size(&variants, "16\"");

        assert_eq!(state.selection().size(), Some("16\""));
        assert_eq!(state.selection().color(), None);

        let resolution = resolve(&variants, state.selection());
        assert!(matches!(resolution, Resolution::Unavailable(v) if v.id == "2"));

        let sizes = sizes_for(&variants, state.selection().color());
        let dead = sizes.iter().find(|o| o.name == "16\"").expect("16\" listed");
        assert!(!dead.available, "the dead size stays visible but disabled");
    }

    #[test]
    fn axes_stay_mutually_consistent_through_arbitrary_picks() {
        // After any pick sequence, no size flagged available under the
        // current color may lack a purchasable variant for that pair, and
        // vice versa.
        let variants = vec![
            variant("1", "Negro", "14\"", true),
            variant("2", "Negro", "15\"", false),
            variant("3", "Roble", "15\"", true),
            variant("4", "Suela", "16\"", true),
        ];
        let picks: &[(&str, &str)] = &[
            ("color", "Negro"),
            ("size", "14\""),
            ("color", "Roble"),
            ("size", "16\""),
            ("color", "Negro"),
        ];

        let mut state = SelectionState::new();
        for (axis, value) in picks {
            match *axis {
                "color" => state.pick_color(&variants, value),
                _ => state.pick_size(&variants, value),
            }

            for size in sizes_for(&variants, state.selection().color()) {
                if size.available {
                    let pair_ok = variants.iter().any(|v| {
                        v.available
                            && v.size.as_deref() == Some(size.name.as_str())
                            && state
                                .selection()
                                .color()
                                .is_none_or(|c| v.color.as_deref() == Some(c))
                    });
                    assert!(pair_ok, "size {} flagged available without backing variant", size.name);
                }
            }
            for color in colors_for(&variants, state.selection().size()) {
                if color.available {
                    let pair_ok = variants.iter().any(|v| {
                        v.available
                            && v.color.as_deref() == Some(color.name.as_str())
                            && state
                                .selection()
                                .size()
                                .is_none_or(|s| v.size.as_deref() == Some(s))
                    });
                    assert!(pair_ok, "color {} flagged available without backing variant", color.name);
                }
            }
        }
    }

    #[test]
    fn image_browsing_clears_the_whole_selection() {
        let variants = vec![variant("1", "Negro", "15\"", true)];
        let mut state = SelectionState::new();
        state.pick_color(&variants, "Negro");
        state.pick_size(&variants, "15\"");
        state.clear();
        assert!(state.selection().is_empty());
        assert_eq!(resolve(&variants, state.selection()), Resolution::NoSelection);
    }
}
