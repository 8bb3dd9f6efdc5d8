use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

/// A result type for GP results comparison
pub type Result<T> = std::result::Result<T, CompareError>;

/// An error when loading, reporting or plotting GP results
#[derive(Error, Debug)]
pub enum CompareError {
    /// When IO fails
    #[error("IO error")]
    IoError(#[from] std::io::Error),
    /// When a csv record cannot be read
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    /// When a csv file cannot be read as a numeric array
    #[error("CSV array error: {0}")]
    ReadCsvError(#[from] ndarray_csv::ReadError),
    /// When numpy array read fails
    #[error("Npy read error: {0}")]
    ReadNpyError(#[from] ndarray_npy::ReadNpyError),
    /// When an array cannot be reshaped
    #[error(transparent)]
    ShapeError(#[from] ndarray::ShapeError),
    /// When configuration cannot be saved
    #[error("Save error: {0}")]
    JsonError(#[from] serde_json::Error),
    /// When input points are neither 1D nor 2D
    #[error("Unsupported input dimension: {0} (expected 1 or 2)")]
    UnsupportedDimension(usize),
    /// When arrays which should share a row count do not
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),
    /// When a value is invalid
    #[error("InvalidValue error: {0}")]
    InvalidValue(String),
    /// When scattered points cannot be triangulated
    #[error("Triangulation error: {0}")]
    TriangulationError(String),
    /// When drawing fails
    #[error("Plot error: {0}")]
    PlotError(String),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for CompareError {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        CompareError::PlotError(err.to_string())
    }
}
