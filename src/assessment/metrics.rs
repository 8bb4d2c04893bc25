//! Pure reducers shared by every scenario view.
//!
//! All reducers are total: an empty input yields zero instead of dividing by
//! zero. Rounding is half-up (`37.5 -> 38`, `-2.5 -> -2`), matching how the
//! dashboard has always presented its figures.

#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

/// Round to the nearest integer, ties toward positive infinity.
#[must_use]
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Count items matching `predicate`.
#[must_use]
pub fn count_where<T>(items: &[T], predicate: impl Fn(&T) -> bool) -> usize {
    items.iter().filter(|item| predicate(item)).count()
}

/// Count items per categorical key, in first-seen order.
#[must_use]
pub fn count_by<T, K: PartialEq>(items: &[T], key: impl Fn(&T) -> K) -> Vec<(K, usize)> {
    let mut counts: Vec<(K, usize)> = Vec::new();
    for item in items {
        let k = key(item);
        if let Some((_, n)) = counts.iter_mut().find(|(existing, _)| *existing == k) {
            *n += 1;
        } else {
            counts.push((k, 1));
        }
    }
    counts
}

/// Sum a numeric field.
#[must_use]
pub fn sum_by<T>(items: &[T], field: impl Fn(&T) -> u32) -> u64 {
    items.iter().map(|item| u64::from(field(item))).sum()
}

/// Arithmetic mean of a numeric field, rounded half-up. Empty input yields 0.
#[must_use]
pub fn mean_rounded<T>(items: &[T], field: impl Fn(&T) -> u32) -> u32 {
    if items.is_empty() {
        return 0;
    }
    let mean = sum_by(items, field) as f64 / items.len() as f64;
    round_half_up(mean).max(0) as u32
}

/// `part / total * 100`, rounded half-up. A zero total yields 0.
#[must_use]
pub fn percent_rounded(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    round_half_up(part as f64 / total as f64 * 100.0).max(0) as u32
}

/// Unrounded `part / total * 100`, for proportional bar widths.
#[must_use]
pub fn share_pct(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 / total as f64 * 100.0
}
