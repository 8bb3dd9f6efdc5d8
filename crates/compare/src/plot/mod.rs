//! Figures rendering.
//!
//! One dimensional results are displayed as mean curves with shaded standard deviation
//! bands, two dimensional results as triangulated surfaces.
mod curves;
mod surfaces;

pub use curves::*;
pub use surfaces::*;

use crate::camera::Limits;
use crate::errors::{CompareError, Result};
use ndarray::ArrayView1;
use ndarray_stats::QuantileExt;
use plotters::style::RGBColor;
use std::path::PathBuf;

/// Default line and band color
pub const C0: RGBColor = RGBColor(31, 119, 180);
/// Reference (true function) color
pub const C1: RGBColor = RGBColor(255, 127, 14);

/// Font family used for titles
pub(crate) const FONT: &str = "sans-serif";
/// Title font size
pub(crate) const TITLE_SIZE: u32 = 24;

/// A rendered figure
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Figure {
    /// Figure title
    pub title: String,
    /// Rendered file
    pub path: PathBuf,
}

// matplotlib "Blues" anchors, from light to dark
const BLUES: [(u8, u8, u8); 9] = [
    (247, 251, 255),
    (222, 235, 247),
    (198, 219, 239),
    (158, 202, 225),
    (107, 174, 214),
    (66, 146, 198),
    (33, 113, 181),
    (8, 81, 156),
    (8, 48, 107),
];

/// Sequential blue colormap, `t` is clamped to [0, 1]
pub fn blues(t: f64) -> RGBColor {
    let t = if t.is_nan() { 0. } else { t.clamp(0., 1.) };
    let pos = t * (BLUES.len() - 1) as f64;
    let i = (pos.floor() as usize).min(BLUES.len() - 2);
    let w = pos - i as f64;
    let lerp = |a: u8, b: u8| (a as f64 + w * (b as f64 - a as f64)).round() as u8;
    let (r0, g0, b0) = BLUES[i];
    let (r1, g1, b1) = BLUES[i + 1];
    RGBColor(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
}

/// Range covering every given array, enlarged by 5% on each side
pub(crate) fn bounds<'a>(arrays: impl IntoIterator<Item = ArrayView1<'a, f64>>) -> Result<Limits> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for arr in arrays.into_iter().filter(|a| !a.is_empty()) {
        let range_err = |e| CompareError::InvalidValue(format!("cannot compute plot range: {e}"));
        lo = lo.min(*arr.min().map_err(range_err)?);
        hi = hi.max(*arr.max().map_err(range_err)?);
    }
    if !lo.is_finite() || !hi.is_finite() {
        return Err(CompareError::InvalidValue(
            "cannot compute plot range of empty data".to_string(),
        ));
    }
    let margin = if hi > lo { 0.05 * (hi - lo) } else { 0.5 };
    Ok((lo - margin, hi + margin))
}
