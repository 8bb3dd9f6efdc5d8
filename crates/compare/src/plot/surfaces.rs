use super::{blues, bounds, Figure, FONT, TITLE_SIZE};
use crate::camera::{Limits, LinkedViews, Panel, ViewState};
use crate::errors::{CompareError, Result};
use crate::region::ZoomedPredictions;
use crate::triangulation::Triangulation;
use crate::types::Observations;

use log::debug;
use ndarray::{ArrayBase, ArrayView1, Data, Ix2};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

/// Opacity of the mean surface, then of 1, 2 and 3 standard deviations surfaces
pub const SURFACE_ALPHAS: [f64; 4] = [0.85, 0.2, 0.1, 0.01];
/// Opacity of training points over surfaces
pub const OBS_ALPHA: f64 = 0.4;

/// Values over triangulated planar points
pub struct Surface<'a> {
    /// First input component
    pub x: ArrayView1<'a, f64>,
    /// Second input component
    pub y: ArrayView1<'a, f64>,
    /// Values at points
    pub z: ArrayView1<'a, f64>,
    /// Opacity
    pub alpha: f64,
}

/// Panel options shared by surfaces figures
#[derive(Clone, Copy, Debug)]
pub struct PanelStyle {
    /// Draw panes, grid and axes when false
    pub hide_axes: bool,
}

/// Axes limits (x, y, z) covering points and values
pub fn surface_limits<'a>(
    points: &ArrayBase<impl Data<Elem = f64>, Ix2>,
    values: impl IntoIterator<Item = ArrayView1<'a, f64>>,
) -> Result<(Limits, Limits, Limits)> {
    Ok((
        bounds([points.column(0)])?,
        bounds([points.column(1)])?,
        bounds(values)?,
    ))
}

fn draw_panel(
    area: &DrawingArea<SVGBackend, Shift>,
    title: Option<&str>,
    view: &ViewState,
    style: PanelStyle,
    tri: &Triangulation,
    surfaces: &[Surface],
    scatter: Option<&Observations>,
) -> Result<()> {
    let mut builder = ChartBuilder::on(area);
    builder.margin(10);
    if let Some(title) = title {
        builder.caption(title, (FONT, TITLE_SIZE));
    }
    // plotters 3D charts use y as the vertical axis
    let mut chart = builder.build_cartesian_3d(
        view.xlim.0..view.xlim.1,
        view.zlim.0..view.zlim.1,
        view.ylim.0..view.ylim.1,
    )?;
    let (pitch, yaw) = (view.pitch(), view.yaw());
    chart.with_projection(|mut pb| {
        pb.pitch = pitch;
        pb.yaw = yaw;
        pb.scale = 0.9;
        pb.into_matrix()
    });
    if !style.hide_axes {
        chart.configure_axes().draw()?;
    }

    for surface in surfaces {
        let (zmin, zmax) = bounds([surface.z])?;
        let span = zmax - zmin;
        chart.draw_series(tri.triangles().iter().map(|t| {
            let vertices: Vec<(f64, f64, f64)> = t
                .iter()
                .map(|&i| (surface.x[i], surface.z[i], surface.y[i]))
                .collect();
            let zmean = t.iter().map(|&i| surface.z[i]).sum::<f64>() / 3.;
            let color = blues((zmean - zmin) / span);
            Polygon::new(vertices, color.mix(surface.alpha).filled())
        }))?;
    }

    if let Some(obs) = scatter {
        chart.draw_series(obs.x.rows().into_iter().zip(obs.y.iter()).map(|(x, &y)| {
            Circle::new((x[0], y, x[1]), 3, BLACK.mix(OBS_ALPHA).filled())
        }))?;
    }
    Ok(())
}

/// Renders two mean surfaces side by side with synchronized cameras.
///
/// `points` (n, 2) are the query points, `left` and `right` the (label, values) pairs.
pub fn plot_linked_surfaces<'a>(
    path: &Path,
    size: (u32, u32),
    points: &'a ArrayBase<impl Data<Elem = f64>, Ix2>,
    left: (&'a str, ArrayView1<'a, f64>),
    right: (&'a str, ArrayView1<'a, f64>),
    views: &LinkedViews,
    style: PanelStyle,
) -> Result<Figure> {
    check_surface_len(points.nrows(), left.1.len())?;
    check_surface_len(points.nrows(), right.1.len())?;
    debug!("Render {} vs {} surfaces to {}", left.0, right.0, path.display());
    let tri = Triangulation::delaunay(points)?;

    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;
    let areas = root.split_evenly((1, 2));
    for (area, (panel, (label, z))) in areas
        .iter()
        .zip([(Panel::Left, left), (Panel::Right, right)])
    {
        let surfaces = [Surface {
            x: points.column(0),
            y: points.column(1),
            z,
            alpha: 1.,
        }];
        draw_panel(
            area,
            Some(label),
            views.view(panel),
            style,
            &tri,
            &surfaces,
            None,
        )?;
    }
    root.present()?;
    Ok(Figure {
        title: format!("{} vs {}", left.0, right.0),
        path: path.to_path_buf(),
    })
}

/// Renders the mean surface enclosed by 1, 2 and 3 standard deviations surfaces
/// with training points over the zoomed-in region
pub fn plot_uncertainty_surfaces(
    path: &Path,
    title: &str,
    size: (u32, u32),
    zoomed: &ZoomedPredictions,
    observations: &Observations,
    view: &ViewState,
    style: PanelStyle,
) -> Result<Figure> {
    debug!("Render {:?} to {}", title, path.display());
    let tri = Triangulation::delaunay(&zoomed.x)?;

    let bands: Vec<_> = [1., 2., 3.]
        .iter()
        .map(|&k| (zoomed.band(k), zoomed.band(-k)))
        .collect();
    let mut surfaces = vec![Surface {
        x: zoomed.x.column(0),
        y: zoomed.x.column(1),
        z: zoomed.mean.view(),
        alpha: SURFACE_ALPHAS[0],
    }];
    for ((upper, lower), &alpha) in bands.iter().zip(SURFACE_ALPHAS[1..].iter()) {
        for z in [upper, lower] {
            surfaces.push(Surface {
                x: zoomed.x.column(0),
                y: zoomed.x.column(1),
                z: z.view(),
                alpha,
            });
        }
    }

    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;
    let area = root.titled(title, (FONT, TITLE_SIZE))?;
    draw_panel(
        &area,
        None,
        view,
        style,
        &tri,
        &surfaces,
        Some(observations),
    )?;
    root.present()?;
    Ok(Figure {
        title: title.to_string(),
        path: path.to_path_buf(),
    })
}

fn check_surface_len(npoints: usize, nvalues: usize) -> Result<()> {
    if npoints != nvalues {
        return Err(CompareError::ShapeMismatch(format!(
            "surface has {nvalues} values for {npoints} points"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewAngles;
    use crate::region::ZoomRegion;
    use crate::types::Predictions;
    use ndarray::{Array1, Array2};

    fn grid(n: usize, lo: f64, hi: f64) -> Array2<f64> {
        let t = Array1::<f64>::linspace(lo, hi, n);
        let mut x = Array2::zeros((n * n, 2));
        for i in 0..n {
            for j in 0..n {
                x[[i * n + j, 0]] = t[i];
                x[[i * n + j, 1]] = t[j];
            }
        }
        x
    }

    #[test]
    fn test_plot_linked_surfaces() {
        let test_dir = Path::new("target/tests/plot");
        std::fs::create_dir_all(test_dir).ok();
        let path = test_dir.join("linked_surfaces.svg");

        let x = grid(8, -1., 1.);
        let z1 = x.column(0).mapv(|v| v * v) + x.column(1);
        let z2 = &z1 * 1.1;
        let (xlim, ylim, zlim) = surface_limits(&x, [z1.view(), z2.view()]).unwrap();
        let left = ViewState::new(ViewAngles::default(), xlim, ylim, zlim);
        let right = ViewState::new(ViewAngles { elev: 0., azim: 0. }, xlim, ylim, zlim);
        let views = LinkedViews::new(left, right);

        let figure = plot_linked_surfaces(
            &path,
            (800, 400),
            &x,
            ("CppGPs", z1.view()),
            ("SciKit Learn", z2.view()),
            &views,
            PanelStyle { hide_axes: false },
        )
        .unwrap();
        assert_eq!(figure.title, "CppGPs vs SciKit Learn");
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<polygon") || svg.contains("<path"));
    }

    #[test]
    fn test_plot_uncertainty_surfaces() {
        let test_dir = Path::new("target/tests/plot");
        std::fs::create_dir_all(test_dir).ok();
        let path = test_dir.join("uncertainty_surfaces.svg");

        let x = grid(15, -0.6, 0.6);
        let n = x.nrows();
        let pred = Predictions {
            y_true: x.column(0).to_owned(),
            mean: x.column(0).mapv(|v| v + 0.01),
            std: x.column(1).mapv(|v| 0.05 + v.abs()),
            x,
        };
        assert_eq!(pred.len(), n);
        let observations = Observations {
            x: ndarray::array![[0., 0.], [0.1, 0.1], [0.9, 0.9]],
            y: ndarray::array![0., 0.1, 0.9],
        };
        let region = ZoomRegion::default();
        let zoomed = region.zoom_predictions(&pred);
        let obs = region.zoom_observations(&observations);
        assert_eq!(obs.y.len(), 2);

        let (xlim, ylim, zlim) =
            surface_limits(&zoomed.x, [zoomed.band(3.).view(), zoomed.band(-3.).view()])
                .unwrap();
        let view = ViewState::new(ViewAngles::default(), xlim, ylim, zlim);
        plot_uncertainty_surfaces(
            &path,
            "CppGPs Predictive Uncertainty",
            (640, 480),
            &zoomed,
            &obs,
            &view,
            PanelStyle { hide_axes: true },
        )
        .unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("CppGPs Predictive Uncertainty"));
    }
}
