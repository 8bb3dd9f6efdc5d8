use super::{bounds, Figure, C0, C1, FONT, TITLE_SIZE};
use crate::errors::Result;
use crate::types::{Observations, PosteriorSamples};

use log::debug;
use ndarray::ArrayView1;
use plotters::prelude::*;
use std::path::Path;

/// Standard deviation multiples of the shaded bands
pub const BAND_STDS: [f64; 3] = [1., 2., 3.];
/// Opacity of each shaded band, overlapping bands get darker towards the mean
pub const BAND_ALPHA: f64 = 0.075;
/// Opacity of training points
pub const SCATTER_ALPHA: f64 = 0.5;
/// Opacity of posterior draws
pub const SAMPLE_ALPHA: f64 = 0.2;

/// Data displayed on a one dimensional figure
#[derive(Clone, Debug)]
pub struct CurvesData<'a> {
    /// Query points
    pub x: ArrayView1<'a, f64>,
    /// Predicted mean
    pub mean: ArrayView1<'a, f64>,
    /// Predicted standard deviation
    pub std: ArrayView1<'a, f64>,
    /// Ground-truth values
    pub y_true: ArrayView1<'a, f64>,
    /// Training data
    pub observations: &'a Observations,
    /// Posterior draws if any
    pub samples: Option<&'a PosteriorSamples>,
}

fn points(x: ArrayView1<f64>, y: impl IntoIterator<Item = f64>) -> Vec<(f64, f64)> {
    x.iter().copied().zip(y).collect()
}

/// Renders mean curve, 1, 2 and 3 standard deviations bands, true function,
/// training points and posterior draws as an SVG file
pub fn plot_curves(path: &Path, title: &str, size: (u32, u32), data: &CurvesData) -> Result<Figure> {
    debug!("Render {:?} to {}", title, path.display());
    let upper3 = &data.mean + &(&data.std * 3.);
    let lower3 = &data.mean - &(&data.std * 3.);
    let obs_x = data.observations.x.column(0);

    let xlim = bounds([data.x, obs_x])?;
    let mut yviews: Vec<ArrayView1<f64>> = vec![
        upper3.view(),
        lower3.view(),
        data.y_true.view(),
        data.observations.y.view(),
    ];
    if let Some(samples) = data.samples {
        yviews.extend(samples.draws().map(|d| d.reborrow()));
    }
    let ylim = bounds(yviews)?;

    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, (FONT, TITLE_SIZE))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(xlim.0..xlim.1, ylim.0..ylim.1)?;
    chart.configure_mesh().draw()?;

    chart.draw_series(LineSeries::new(
        points(data.x, data.mean.iter().copied()),
        C0.stroke_width(2),
    ))?;

    for k in BAND_STDS {
        let upper = points(
            data.x,
            data.mean.iter().zip(data.std.iter()).map(|(m, s)| m + k * s),
        );
        let lower = points(
            data.x,
            data.mean.iter().zip(data.std.iter()).map(|(m, s)| m - k * s),
        );
        let band: Vec<(f64, f64)> = upper.into_iter().chain(lower.into_iter().rev()).collect();
        chart.draw_series(std::iter::once(Polygon::new(
            band,
            C0.mix(BAND_ALPHA).filled(),
        )))?;
    }

    chart.draw_series(DashedLineSeries::new(
        points(data.x, data.y_true.iter().copied()),
        6,
        4,
        C1.stroke_width(1),
    ))?;

    chart.draw_series(
        obs_x
            .iter()
            .zip(data.observations.y.iter())
            .map(|(&x, &y)| Circle::new((x, y), 4, C0.mix(SCATTER_ALPHA).filled())),
    )?;

    if let Some(samples) = data.samples {
        for draw in samples.draws() {
            chart.draw_series(DashedLineSeries::new(
                points(data.x, draw.iter().copied()),
                6,
                4,
                C0.mix(SAMPLE_ALPHA).stroke_width(1),
            ))?;
        }
    }

    root.present()?;
    Ok(Figure {
        title: title.to_string(),
        path: path.to_path_buf(),
    })
}
