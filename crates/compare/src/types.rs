use crate::errors::{CompareError, Result};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

/// Number of trailing non-input columns of the predictions file
/// (true value, predicted mean, predicted standard deviation)
pub const NON_INPUT_LENGTH: usize = 3;

/// Dimension of the input points the GP models were evaluated at
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputDim {
    /// Scalar inputs, results are displayed as curves
    One,
    /// Planar inputs, results are displayed as triangulated surfaces
    Two,
}

impl InputDim {
    /// Number of input columns
    pub fn ncols(&self) -> usize {
        match self {
            InputDim::One => 1,
            InputDim::Two => 2,
        }
    }
}

impl TryFrom<usize> for InputDim {
    type Error = CompareError;

    fn try_from(dim: usize) -> Result<Self> {
        match dim {
            1 => Ok(InputDim::One),
            2 => Ok(InputDim::Two),
            _ => Err(CompareError::UnsupportedDimension(dim)),
        }
    }
}

/// GP implementation whose results are compared
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    /// The custom GP engine, reference of the comparison
    CppGPs,
    /// SciKit Learn `GaussianProcessRegressor`
    SciKitLearn,
    /// GPyTorch exact GP
    GPyTorch,
}

impl Source {
    /// Name used in report and figure titles
    pub fn label(&self) -> &'static str {
        match self {
            Source::CppGPs => "CppGPs",
            Source::SciKitLearn => "SciKit Learn",
            Source::GPyTorch => "GPyTorch",
        }
    }

    /// Directory holding the `.npy` results of a comparison library
    pub fn results_dir(&self) -> Option<&'static str> {
        match self {
            Source::CppGPs => None,
            Source::SciKitLearn => Some("SciKit_Learn_Results"),
            Source::GPyTorch => Some("GPyTorch_Results"),
        }
    }

    /// Stem of the figure files rendered for this source
    pub fn file_stem(&self) -> &'static str {
        match self {
            Source::CppGPs => "cppgps",
            Source::SciKitLearn => "sklearn",
            Source::GPyTorch => "gpytorch",
        }
    }
}

/// Predictions of the custom engine at the query points
#[derive(Clone, Debug)]
pub struct Predictions {
    /// Query points (R, dim)
    pub x: Array2<f64>,
    /// Ground-truth function values (R,)
    pub y_true: Array1<f64>,
    /// Predicted mean (R,)
    pub mean: Array1<f64>,
    /// Predicted standard deviation (R,)
    pub std: Array1<f64>,
}

impl Predictions {
    /// Number of query points
    pub fn len(&self) -> usize {
        self.x.nrows()
    }

    /// Whether there is no query point
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First input component of the query points
    pub fn x1(&self) -> ArrayView1<f64> {
        self.x.column(0)
    }
}

/// Training data used to fit the GP models
#[derive(Clone, Debug)]
pub struct Observations {
    /// Training inputs (M, dim)
    pub x: Array2<f64>,
    /// Training outputs (M,)
    pub y: Array1<f64>,
}

/// Draws from a posterior distribution stored as (R, S):
/// one column per draw, one row per query point
#[derive(Clone, Debug)]
pub struct PosteriorSamples(Array2<f64>);

impl PosteriorSamples {
    /// Samples given as one draw per column
    pub fn from_columns(draws: Array2<f64>) -> Self {
        PosteriorSamples(draws)
    }

    /// Samples given as one draw per row
    pub fn from_rows(draws: Array2<f64>) -> Self {
        PosteriorSamples(draws.reversed_axes())
    }

    /// Number of query points each draw is evaluated at
    pub fn n_points(&self) -> usize {
        self.0.nrows()
    }

    /// Number of draws
    pub fn n_draws(&self) -> usize {
        self.0.ncols()
    }

    /// Iterate over draws
    pub fn draws(&self) -> impl Iterator<Item = ArrayView1<f64>> {
        self.0.axis_iter(Axis(1))
    }

    /// Underlying (R, S) matrix
    pub fn view(&self) -> ArrayView2<f64> {
        self.0.view()
    }
}

/// Results produced by one comparison library
#[derive(Clone, Debug)]
pub struct ReferenceResults {
    /// Library which produced the results
    pub source: Source,
    /// Predicted mean (R,)
    pub mean: Array1<f64>,
    /// Predicted standard deviation (R,)
    pub std: Array1<f64>,
    /// Posterior draws, only available for 1D inputs
    pub samples: Option<PosteriorSamples>,
    /// Negative log marginal likelihood
    pub nlml: f64,
}

/// Everything read from disk for one comparison run
#[derive(Clone, Debug)]
pub struct ComparisonData {
    /// Input dimension sniffed from the predictions file
    pub dim: InputDim,
    /// Custom engine predictions
    pub predictions: Predictions,
    /// Training data
    pub observations: Observations,
    /// Custom engine posterior draws, only available for 1D inputs
    pub samples: Option<PosteriorSamples>,
    /// Custom engine negative log marginal likelihood
    pub nlml: f64,
    /// Enabled comparison libraries results in loading order
    pub references: Vec<ReferenceResults>,
}

impl ComparisonData {
    /// Results of the given comparison library if loaded
    pub fn reference(&self, source: Source) -> Option<&ReferenceResults> {
        self.references.iter().find(|r| r.source == source)
    }
}
