//! Selection resolution: mapping a partial color/size choice to one variant.

use crate::products::Variant;

/// The user's current partial selection on a product view.
///
/// Empty strings normalize to `None` at construction, so "no choice yet" has
/// exactly one representation. Values are expected to come from the axis
/// sets the index exposes; the resolver itself never validates membership.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    color: Option<String>,
    size: Option<String>,
}

impl Selection {
    #[must_use]
    pub fn new(color: Option<&str>, size: Option<&str>) -> Self {
        Self {
            color: normalize(color),
            size: normalize(size),
        }
    }

    #[must_use]
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    #[must_use]
    pub fn size(&self) -> Option<&str> {
        self.size.as_deref()
    }

    /// `true` when neither axis has been chosen.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.color.is_none() && self.size.is_none()
    }

    pub(crate) fn set_color(&mut self, color: Option<&str>) {
        self.color = normalize(color);
    }

    pub(crate) fn set_size(&mut self, size: Option<&str>) {
        self.size = normalize(size);
    }
}

fn normalize(value: Option<&str>) -> Option<String> {
    value.filter(|s| !s.is_empty()).map(ToOwned::to_owned)
}

/// Outcome of resolving a [`Selection`] against a variant list.
///
/// `NoSelection` and `NoMatch` both carry no variant but mean different
/// things to the UI: the former shows product-level defaults, the latter is
/// the sold-out state for a combination the user actually asked for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution<'a> {
    /// Neither axis selected; show product-level defaults.
    NoSelection,
    /// A purchasable variant satisfies the selection.
    Available(&'a Variant),
    /// The selection names a variant structurally, but it is not
    /// purchasable — show its details with a sold-out indicator.
    Unavailable(&'a Variant),
    /// Nothing matches the selection at all.
    NoMatch,
}

impl<'a> Resolution<'a> {
    /// The resolved variant, purchasable or not.
    #[must_use]
    pub fn variant(&self) -> Option<&'a Variant> {
        match self {
            Resolution::Available(v) | Resolution::Unavailable(v) => Some(v),
            Resolution::NoSelection | Resolution::NoMatch => None,
        }
    }

    /// `true` only when the resolved variant can actually be purchased.
    #[must_use]
    pub fn is_purchasable(&self) -> bool {
        matches!(self, Resolution::Available(_))
    }

    /// `true` when the user asked for a combination nothing satisfies.
    #[must_use]
    pub fn is_sold_out(&self) -> bool {
        matches!(self, Resolution::Unavailable(_) | Resolution::NoMatch)
    }
}

/// Resolves a selection to a single variant, in fixed precedence order:
///
/// 1. Empty selection → [`Resolution::NoSelection`].
/// 2. First purchasable variant matching every selected axis (unselected
///    axes are wildcards, as is an absent label on the variant side).
/// 3. First purchasable variant matching at least one selected axis — the
///    transitional "closest still-available" fallback for when the user just
///    changed one axis and the other no longer jointly fits.
/// 4. First variant matching every selected axis regardless of
///    purchasability → [`Resolution::Unavailable`], so the UI can show that
///    exact combination as sold out.
/// 5. [`Resolution::NoMatch`].
///
/// Pure and idempotent: same inputs, same result, no hidden state. When
/// duplicate rows match, list order wins; callers guarantee uniqueness of
/// purchasable (color, size) pairs upstream.
#[must_use]
pub fn resolve<'a>(variants: &'a [Variant], selection: &Selection) -> Resolution<'a> {
    if selection.is_empty() {
        return Resolution::NoSelection;
    }

    if let Some(v) = variants.iter().find(|v| v.available && exact_match(v, selection)) {
        return Resolution::Available(v);
    }

    if let Some(v) = variants.iter().find(|v| v.available && partial_match(v, selection)) {
        return Resolution::Available(v);
    }

    if let Some(v) = variants.iter().find(|v| exact_match(v, selection)) {
        return Resolution::Unavailable(v);
    }

    Resolution::NoMatch
}

/// `true` when there is some purchasable variant consistent with both axes.
///
/// Used by the mutation protocol to decide whether a previously chosen axis
/// survives a change on the other one.
#[must_use]
pub fn jointly_satisfiable(variants: &[Variant], selection: &Selection) -> bool {
    variants.iter().any(|v| v.available && exact_match(v, selection))
}

/// Every selected axis matches. An unselected axis matches anything, and a
/// variant with no label on an axis matches any selection on it.
fn exact_match(variant: &Variant, selection: &Selection) -> bool {
    axis_matches(variant.color.as_deref(), selection.color())
        && axis_matches(variant.size.as_deref(), selection.size())
}

/// At least one selected axis matches the variant's label exactly.
fn partial_match(variant: &Variant, selection: &Selection) -> bool {
    let color_hit = matches!((variant.color.as_deref(), selection.color()),
        (Some(v), Some(s)) if v == s);
    let size_hit = matches!((variant.size.as_deref(), selection.size()),
        (Some(v), Some(s)) if v == s);
    color_hit || size_hit
}

fn axis_matches(variant_value: Option<&str>, selected: Option<&str>) -> bool {
    match (variant_value, selected) {
        (_, None) | (None, _) => true,
        (Some(v), Some(s)) => v == s,
    }
}
