//! Point-to-point change magnitude

/// Relative and absolute change from the previous sample of a series
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Change {
    pub pct: Option<f64>,
    pub abs: Option<f64>,
}

/// Change of every position relative to its predecessor
///
/// The first position has no predecessor and gets an undefined change.
/// Division follows IEEE rules, so a zero predecessor yields an infinite or
/// NaN relative change.
pub fn quantify(values: &[f64]) -> Vec<Change> {
    let mut out = Vec::with_capacity(values.len());
    if !values.is_empty() {
        out.push(Change::default());
    }
    out.extend(values.windows(2).map(|pair| Change {
        pct: Some(pair[1] / pair[0] - 1.0),
        abs: Some(pair[1] - pair[0]),
    }));
    out
}
