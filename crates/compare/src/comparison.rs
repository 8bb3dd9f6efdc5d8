//! Comparison runner: loads results, reports likelihoods and renders figures.
use crate::camera::{LinkedViews, ViewState};
use crate::config::{ComparisonConfig, ViewAngles, CONFIG_FILE};
use crate::errors::Result;
use crate::loader::load_comparison_data;
use crate::plot::*;
use crate::region::ZoomRegion;
use crate::report::Report;
use crate::types::{ComparisonData, InputDim, Source};
use crate::utils::format_elapsed;

use log::{info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Title of the zoomed-in predictive uncertainty figure
pub const UNCERTAINTY_TITLE: &str = "CppGPs Predictive Uncertainty";
/// File name of the 2D side by side mean surfaces figure
pub const COMPARISON_2D_FILE: &str = "comparison_2d.svg";
/// File name of the 2D predictive uncertainty figure
pub const UNCERTAINTY_2D_FILE: &str = "uncertainty_2d.svg";

/// Outcome of a comparison run
#[derive(Clone, Debug)]
pub struct ComparisonResult {
    /// Input dimension of the compared results
    pub dim: InputDim,
    /// Likelihood report as printed
    pub report: Report,
    /// Rendered figures in rendering order
    pub figures: Vec<Figure>,
}

/// Builder of a [Comparison]
#[derive(Clone, Debug, Default)]
pub struct ComparisonBuilder {
    config: ComparisonConfig,
}

impl ComparisonBuilder {
    /// Compare results found in `workdir`
    pub fn new<P: AsRef<Path>>(workdir: P) -> Self {
        ComparisonBuilder {
            config: ComparisonConfig::default().workdir(workdir),
        }
    }

    /// Allows to specify comparison configuration
    pub fn configure<F: FnOnce(ComparisonConfig) -> ComparisonConfig>(mut self, init: F) -> Self {
        self.config = init(self.config);
        self
    }

    /// Build the comparison runner
    pub fn build(self) -> Comparison {
        Comparison {
            config: self.config,
        }
    }
}

/// Comparison of GP implementations results
#[derive(Clone, Debug)]
pub struct Comparison {
    config: ComparisonConfig,
}

impl Comparison {
    /// Comparison configuration
    pub fn config(&self) -> &ComparisonConfig {
        &self.config
    }

    /// Loads results, prints the likelihood report and renders figures in the output directory
    pub fn run(&self) -> Result<ComparisonResult> {
        info!("{:?}", self.config);
        let start = Instant::now();

        let data = load_comparison_data(&self.config)?;
        let report = Report::new(&data);
        report.print();

        let outdir = self.config.get_outdir();
        std::fs::create_dir_all(outdir)?;
        let json = serde_json::to_string_pretty(&self.config)?;
        std::fs::write(outdir.join(CONFIG_FILE), json)?;

        let figures = self.render(&data)?;
        info!(
            "{} figure(s) rendered in {} ({})",
            figures.len(),
            outdir.display(),
            format_elapsed(start.elapsed())
        );
        Ok(ComparisonResult {
            dim: data.dim,
            report,
            figures,
        })
    }

    /// Renders figures of loaded data
    pub fn render(&self, data: &ComparisonData) -> Result<Vec<Figure>> {
        match data.dim {
            InputDim::One => self.render_curves(data),
            InputDim::Two => self.render_surfaces(data),
        }
    }

    fn figure_path(&self, file: &str) -> PathBuf {
        self.config.get_outdir().join(file)
    }

    /// One figure per enabled comparison library then the custom engine figure
    fn render_curves(&self, data: &ComparisonData) -> Result<Vec<Figure>> {
        let pred = &data.predictions;
        let size = self.config.get_size();
        let mut figures = vec![];

        for reference in data.references.iter() {
            let curves = CurvesData {
                x: pred.x1(),
                mean: reference.mean.view(),
                std: reference.std.view(),
                y_true: pred.y_true.view(),
                observations: &data.observations,
                samples: reference.samples.as_ref(),
            };
            let path = self.figure_path(&format!("{}_1d.svg", reference.source.file_stem()));
            let title = format!("{} Implementation", reference.source.label());
            figures.push(plot_curves(&path, &title, size, &curves)?);
        }

        let curves = CurvesData {
            x: pred.x1(),
            mean: pred.mean.view(),
            std: pred.std.view(),
            y_true: pred.y_true.view(),
            observations: &data.observations,
            samples: data.samples.as_ref(),
        };
        let path = self.figure_path(&format!("{}_1d.svg", Source::CppGPs.file_stem()));
        let title = format!("{} Implementation", Source::CppGPs.label());
        figures.push(plot_curves(&path, &title, size, &curves)?);

        Ok(figures)
    }

    /// Side by side mean surfaces of the custom engine and the first enabled comparison
    /// library, then the zoomed-in predictive uncertainty of the custom engine
    fn render_surfaces(&self, data: &ComparisonData) -> Result<Vec<Figure>> {
        let pred = &data.predictions;
        let size = self.config.get_size();
        let style = PanelStyle {
            hide_axes: self.config.get_hide_axes(),
        };
        let mut figures = vec![];

        match data.references.first() {
            Some(reference) => {
                let (xlim, ylim, zlim) =
                    surface_limits(&pred.x, [pred.mean.view(), reference.mean.view()])?;
                let left = ViewState::new(self.config.get_view(), xlim, ylim, zlim);
                let right = ViewState::new(ViewAngles::default(), xlim, ylim, zlim);
                let views = LinkedViews::new(left, right);
                figures.push(plot_linked_surfaces(
                    &self.figure_path(COMPARISON_2D_FILE),
                    (size.0 * 2, size.1),
                    &pred.x,
                    (Source::CppGPs.label(), pred.mean.view()),
                    (reference.source.label(), reference.mean.view()),
                    &views,
                    style,
                )?);
            }
            None => warn!("No comparison library enabled, side by side surfaces skipped"),
        }

        let region = ZoomRegion::default();
        let zoomed = region.zoom_predictions(pred);
        let observations = region.zoom_observations(&data.observations);
        info!(
            "Zoomed-in region: {} of {} query points, {} of {} observations",
            zoomed.x.nrows(),
            pred.len(),
            observations.x.nrows(),
            data.observations.x.nrows()
        );
        let upper = zoomed.band(3.);
        let lower = zoomed.band(-3.);
        let (xlim, ylim, zlim) = surface_limits(
            &zoomed.x,
            [upper.view(), lower.view(), observations.y.view()],
        )?;
        let view = ViewState::new(self.config.get_view(), xlim, ylim, zlim);
        figures.push(plot_uncertainty_surfaces(
            &self.figure_path(UNCERTAINTY_2D_FILE),
            UNCERTAINTY_TITLE,
            size,
            &zoomed,
            &observations,
            &view,
            style,
        )?);

        Ok(figures)
    }
}
