//! Axis enumeration over a flat variant list.
//!
//! [`colors_for`] and [`sizes_for`] answer "which values can the user still
//! pick on this axis, given what is selected on the other one". Options are
//! never hidden when unavailable — they come back with `available = false`
//! so the UI can render them disabled.

use crate::products::Variant;

/// One selectable value on a variant axis.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct AxisOption {
    pub name: String,
    /// `true` when at least one variant carrying this value (and matching
    /// the opposite-axis filter) is purchasable.
    pub available: bool,
}

/// Colors the user may choose, optionally restricted to variants of one size.
///
/// Order is first occurrence in the variant list. Returns an empty vector
/// when no variant carries a color label, in which case the caller omits the
/// color control entirely.
#[must_use]
pub fn colors_for(variants: &[Variant], size_filter: Option<&str>) -> Vec<AxisOption> {
    axis_options(variants, |v| v.color.as_deref(), |v| v.size.as_deref(), size_filter)
}

/// Sizes the user may choose, optionally restricted to variants of one color.
///
/// Sizes sort ascending by the leading numeric portion of the label (`9"`
/// before `15"`), because labels are not zero-padded and would otherwise
/// order lexicographically. Labels with no numeric portion sort after the
/// numeric ones, keeping first-occurrence order among themselves.
#[must_use]
pub fn sizes_for(variants: &[Variant], color_filter: Option<&str>) -> Vec<AxisOption> {
    let mut options =
        axis_options(variants, |v| v.size.as_deref(), |v| v.color.as_deref(), color_filter);
    options.sort_by(|a, b| match (leading_number(&a.name), leading_number(&b.name)) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    options
}

/// Accumulates distinct values of one axis, filtered by the opposite axis.
///
/// A variant contributes only when it carries a value on the requested axis
/// and, if `filter` is set, its opposite-axis value equals the filter. Each
/// value appears once; its availability is the OR of every contributing
/// variant's `available` flag.
fn axis_options<'a>(
    variants: &'a [Variant],
    axis: impl Fn(&'a Variant) -> Option<&'a str>,
    opposite: impl Fn(&'a Variant) -> Option<&'a str>,
    filter: Option<&str>,
) -> Vec<AxisOption> {
    let mut options: Vec<AxisOption> = Vec::new();
    for variant in variants {
        let Some(value) = axis(variant) else {
            continue;
        };
        if let Some(wanted) = filter {
            if opposite(variant) != Some(wanted) {
                continue;
            }
        }
        match options.iter_mut().find(|o| o.name == value) {
            Some(existing) => existing.available |= variant.available,
            None => options.push(AxisOption {
                name: value.to_string(),
                available: variant.available,
            }),
        }
    }
    options
}

/// Extracts the leading numeric portion of a size label, e.g. `15"` → `15.0`
/// or `14.5"` → `14.5`.
///
/// Scans past any non-digit prefix, then takes digits with at most one
/// decimal point. Returns `None` for labels with no digits at all.
fn leading_number(label: &str) -> Option<f64> {
    let bytes = label.as_bytes();
    let mut i = 0;
    while i < bytes.len() && !bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i == bytes.len() {
        return None;
    }
    let start = i;
    let mut has_dot = false;
    while i < bytes.len() && (bytes[i].is_ascii_digit() || (bytes[i] == b'.' && !has_dot)) {
        if bytes[i] == b'.' {
            has_dot = true;
        }
        i += 1;
    }
    // A trailing dot ("15.") parses fine as f64; anything sliced here is
    // ASCII so the byte range is a valid char boundary.
    label[start..i].trim_end_matches('.').parse().ok()
}
