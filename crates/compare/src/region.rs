//! Restriction of planar query points to a zoomed-in region used to display
//! predictive uncertainty growth away from training data.
use crate::types::{Observations, Predictions};
use ndarray::{Array1, Array2, ArrayBase, Axis, Data, Ix2};

/// Tolerance applied to prediction points so that surfaces stay continuous at the boundary
pub const SURFACE_DELTA: f64 = 0.025;

/// Region made of a disk centered at the origin cut by a rectangular bound.
///
/// Boundaries are inclusive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomRegion {
    /// Disk radius
    pub radius: f64,
    /// Lower bound on x
    pub x_min: f64,
    /// Upper bound on x
    pub x_max: f64,
    /// Lower bound on y
    pub y_min: f64,
}

impl Default for ZoomRegion {
    fn default() -> Self {
        ZoomRegion {
            radius: 0.5,
            x_min: -0.125,
            x_max: 0.25,
            y_min: -0.125,
        }
    }
}

impl ZoomRegion {
    /// Whether (x, y) lies within the region enlarged by `delta`
    pub fn includes(&self, x: f64, y: f64, delta: f64) -> bool {
        let rad = x.hypot(y);
        x - delta <= self.x_max
            && x + delta >= self.x_min
            && y + delta >= self.y_min
            && rad - delta <= self.radius
    }

    /// Indices of the rows of `points` (n, 2) within the region enlarged by `delta`
    pub fn select(&self, points: &ArrayBase<impl Data<Elem = f64>, Ix2>, delta: f64) -> Vec<usize> {
        points
            .rows()
            .into_iter()
            .enumerate()
            .filter(|(_, p)| self.includes(p[0], p[1], delta))
            .map(|(i, _)| i)
            .collect()
    }

    /// Prediction points within the region, using [SURFACE_DELTA] tolerance
    pub fn zoom_predictions(&self, pred: &Predictions) -> ZoomedPredictions {
        let idx = self.select(&pred.x, SURFACE_DELTA);
        ZoomedPredictions {
            x: pred.x.select(Axis(0), &idx),
            mean: pred.mean.select(Axis(0), &idx),
            std: pred.std.select(Axis(0), &idx),
            y_true: pred.y_true.select(Axis(0), &idx),
        }
    }

    /// Training points strictly within the region
    pub fn zoom_observations(&self, obs: &Observations) -> Observations {
        let idx = self.select(&obs.x, 0.);
        Observations {
            x: obs.x.select(Axis(0), &idx),
            y: obs.y.select(Axis(0), &idx),
        }
    }
}

/// Predictions restricted to a [ZoomRegion]
#[derive(Clone, Debug)]
pub struct ZoomedPredictions {
    /// Query points (n, 2)
    pub x: Array2<f64>,
    /// Predicted mean
    pub mean: Array1<f64>,
    /// Predicted standard deviation
    pub std: Array1<f64>,
    /// Ground-truth values
    pub y_true: Array1<f64>,
}

impl ZoomedPredictions {
    /// Surface mean + k * std (k may be negative)
    pub fn band(&self, k: f64) -> Array1<f64> {
        &self.mean + &(&self.std * k)
    }
}
