//! Comparison run configuration.
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the configuration dump written in the output directory
pub const CONFIG_FILE: &str = "comparison_config.json";

/// Camera orientation used for 3D surface plots, angles in degrees
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewAngles {
    /// Elevation above the (x, y) plane
    pub elev: f64,
    /// Azimuth around the z axis
    pub azim: f64,
}

impl Default for ViewAngles {
    fn default() -> Self {
        ViewAngles {
            elev: 30.,
            azim: -60.,
        }
    }
}

/// Comparison configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ComparisonConfig {
    /// Directory holding `predictions.csv`, `observations.csv`, `samples.csv`, `NLML.csv`
    /// and the comparison libraries results directories
    pub(crate) workdir: PathBuf,
    /// Directory where figures are rendered
    pub(crate) outdir: PathBuf,
    /// Whether SciKit Learn results are loaded, reported and plotted
    pub(crate) use_sklearn: bool,
    /// Whether GPyTorch results are loaded, reported and plotted
    pub(crate) use_gpytorch: bool,
    /// Initial camera of the 3D plots, mirrored on linked subplots
    pub(crate) view: ViewAngles,
    /// Figure size in pixels (width, height)
    pub(crate) size: (u32, u32),
    /// When true 3D plots are drawn without panes, grid and axes
    pub(crate) hide_axes: bool,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        ComparisonConfig {
            workdir: PathBuf::from("."),
            outdir: PathBuf::from("gp_plots"),
            use_sklearn: true,
            use_gpytorch: false,
            view: ViewAngles::default(),
            size: (1024, 768),
            hide_axes: true,
        }
    }
}

impl ComparisonConfig {
    /// Sets the directory input files are read from
    pub fn workdir<P: AsRef<Path>>(mut self, workdir: P) -> Self {
        self.workdir = workdir.as_ref().to_path_buf();
        self
    }

    /// Sets the directory figures are rendered to
    pub fn outdir<P: AsRef<Path>>(mut self, outdir: P) -> Self {
        self.outdir = outdir.as_ref().to_path_buf();
        self
    }

    /// Enables or disables the comparison with SciKit Learn results
    pub fn use_sklearn(mut self, enabled: bool) -> Self {
        self.use_sklearn = enabled;
        self
    }

    /// Enables or disables the comparison with GPyTorch results
    pub fn use_gpytorch(mut self, enabled: bool) -> Self {
        self.use_gpytorch = enabled;
        self
    }

    /// Sets camera elevation and azimuth (degrees) of 3D plots
    pub fn view(mut self, elev: f64, azim: f64) -> Self {
        self.view = ViewAngles { elev, azim };
        self
    }

    /// Sets figure size in pixels
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    /// Whether 3D plots axes are hidden
    pub fn hide_axes(mut self, hide: bool) -> Self {
        self.hide_axes = hide;
        self
    }

    /// Input files directory
    pub fn get_workdir(&self) -> &Path {
        &self.workdir
    }

    /// Figures directory
    pub fn get_outdir(&self) -> &Path {
        &self.outdir
    }

    /// Figure size in pixels
    pub fn get_size(&self) -> (u32, u32) {
        self.size
    }

    /// 3D plots initial camera
    pub fn get_view(&self) -> ViewAngles {
        self.view
    }

    /// Whether 3D plots axes are hidden
    pub fn get_hide_axes(&self) -> bool {
        self.hide_axes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_toggles() {
        let config = ComparisonConfig::default();
        assert!(config.use_sklearn);
        assert!(!config.use_gpytorch);
        assert!(config.hide_axes);
    }

    #[test]
    fn test_config_json() {
        let config = ComparisonConfig::default()
            .use_sklearn(false)
            .use_gpytorch(true)
            .view(10., 45.)
            .outdir("target/tests/plots");
        let json = serde_json::to_string(&config).unwrap();
        let config: ComparisonConfig = serde_json::from_str(&json).unwrap();
        assert!(!config.use_sklearn);
        assert!(config.use_gpytorch);
        assert_eq!(config.view, ViewAngles { elev: 10., azim: 45. });
        assert_eq!(config.get_outdir(), Path::new("target/tests/plots"));
    }
}
