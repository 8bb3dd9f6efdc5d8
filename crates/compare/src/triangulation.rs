//! Delaunay triangulation of scattered planar points (Bowyer-Watson algorithm)
//! used to render surfaces over unstructured query points.
use crate::errors::{CompareError, Result};
use log::debug;
use ndarray::{ArrayBase, Data, Ix2};
use std::collections::{HashMap, HashSet};

/// Relative area under which a triangle is considered flat
const FLAT_TOL: f64 = 1e-12;

#[derive(Clone, Copy, Debug)]
struct Circumcircle {
    center: [f64; 2],
    r2: f64,
}

impl Circumcircle {
    fn of(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> Option<Self> {
        let d = 2. * (a[0] * (b[1] - c[1]) + b[0] * (c[1] - a[1]) + c[0] * (a[1] - b[1]));
        if d.abs() < FLAT_TOL {
            return None;
        }
        let (a2, b2, c2) = (norm2(a), norm2(b), norm2(c));
        let ux = (a2 * (b[1] - c[1]) + b2 * (c[1] - a[1]) + c2 * (a[1] - b[1])) / d;
        let uy = (a2 * (c[0] - b[0]) + b2 * (a[0] - c[0]) + c2 * (b[0] - a[0])) / d;
        let center = [ux, uy];
        Some(Circumcircle {
            center,
            r2: dist2(a, center),
        })
    }

    fn contains(&self, p: [f64; 2]) -> bool {
        dist2(p, self.center) < self.r2
    }
}

fn norm2(p: [f64; 2]) -> f64 {
    p[0] * p[0] + p[1] * p[1]
}

fn dist2(p: [f64; 2], q: [f64; 2]) -> f64 {
    (p[0] - q[0]).powi(2) + (p[1] - q[1]).powi(2)
}

/// Twice the signed area of triangle (a, b, c), positive when counter-clockwise
fn signed_area2(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> f64 {
    (b[0] - a[0]) * (c[1] - a[1]) - (c[0] - a[0]) * (b[1] - a[1])
}

#[derive(Clone, Copy, Debug)]
struct Triangle {
    v: [usize; 3],
    // None for flat triangles which are never removed
    circle: Option<Circumcircle>,
}

impl Triangle {
    fn new(v: [usize; 3], pts: &[[f64; 2]]) -> Self {
        Triangle {
            v,
            circle: Circumcircle::of(pts[v[0]], pts[v[1]], pts[v[2]]),
        }
    }

    fn edges(&self) -> [(usize, usize); 3] {
        let [a, b, c] = self.v;
        [(a, b), (b, c), (c, a)]
    }
}

fn edge_key(e: (usize, usize)) -> (usize, usize) {
    if e.0 < e.1 {
        e
    } else {
        (e.1, e.0)
    }
}

/// Triangles of a planar point set, as triplets of row indices, counter-clockwise oriented
#[derive(Clone, Debug, Default)]
pub struct Triangulation {
    triangles: Vec<[usize; 3]>,
}

impl Triangulation {
    /// Delaunay triangulation of `points` (n, 2).
    ///
    /// Duplicated points are triangulated once. Fails when there are less than 3 distinct
    /// points, when a coordinate is not finite or when all points are aligned.
    pub fn delaunay(points: &ArrayBase<impl Data<Elem = f64>, Ix2>) -> Result<Self> {
        if points.ncols() != 2 {
            return Err(CompareError::TriangulationError(format!(
                "expected planar points, got {} columns",
                points.ncols()
            )));
        }
        if points.iter().any(|v| !v.is_finite()) {
            return Err(CompareError::TriangulationError(
                "points coordinates should be finite".to_string(),
            ));
        }
        let n = points.nrows();
        if n < 3 {
            return Err(CompareError::TriangulationError(format!(
                "at least 3 points required, got {n}"
            )));
        }

        // Work in the unit box to keep circumcircle computations well scaled
        let col0 = points.column(0);
        let col1 = points.column(1);
        let (xmin, xmax) = col0
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        let (ymin, ymax) = col1
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        let scale = (xmax - xmin).max(ymax - ymin);
        if scale <= 0. {
            return Err(CompareError::TriangulationError(
                "all points are identical".to_string(),
            ));
        }
        let mut pts: Vec<[f64; 2]> = points
            .rows()
            .into_iter()
            .map(|p| [(p[0] - xmin) / scale, (p[1] - ymin) / scale])
            .collect();

        // Super triangle enclosing the unit box
        let (mx, my) = (0.5, 0.5);
        pts.push([mx - 20., my - 1.]);
        pts.push([mx, my + 20.]);
        pts.push([mx + 20., my - 1.]);
        let mut triangles = vec![Triangle::new([n, n + 1, n + 2], &pts)];

        let mut seen = HashSet::with_capacity(n);
        for i in 0..n {
            let p = pts[i];
            if !seen.insert((p[0].to_bits(), p[1].to_bits())) {
                debug!("Skip duplicated point #{i}");
                continue;
            }

            let (bad, good): (Vec<Triangle>, Vec<Triangle>) = triangles
                .into_iter()
                .partition(|t| t.circle.is_some_and(|c| c.contains(p)));
            triangles = good;

            // Cavity boundary: edges belonging to exactly one removed triangle
            let mut counts: HashMap<(usize, usize), usize> = HashMap::new();
            for t in bad.iter() {
                for e in t.edges() {
                    *counts.entry(edge_key(e)).or_insert(0) += 1;
                }
            }
            for t in bad.iter() {
                for e in t.edges() {
                    if counts[&edge_key(e)] == 1 {
                        triangles.push(Triangle::new([e.0, e.1, i], &pts));
                    }
                }
            }
        }

        let triangles: Vec<[usize; 3]> = triangles
            .into_iter()
            .filter(|t| t.v.iter().all(|&v| v < n))
            .filter_map(|t| {
                let [a, b, c] = t.v;
                let area2 = signed_area2(pts[a], pts[b], pts[c]);
                if area2.abs() < FLAT_TOL {
                    None
                } else if area2 > 0. {
                    Some([a, b, c])
                } else {
                    Some([a, c, b])
                }
            })
            .collect();

        if triangles.is_empty() {
            return Err(CompareError::TriangulationError(
                "points are aligned, no triangle can be built".to_string(),
            ));
        }
        debug!("Triangulation of {} points: {} triangles", n, triangles.len());
        Ok(Triangulation { triangles })
    }

    /// Triangles as row indices of the triangulated points
    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    /// Number of triangles
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// Whether there is no triangle
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}
