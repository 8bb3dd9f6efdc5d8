//! This library compares Gaussian process regression results produced by the CppGPs
//! engine with those of reference libraries (SciKit Learn, GPyTorch).
//!
//! Results are read from a working directory:
//! * `predictions.csv`: query points, true values, predicted mean and standard deviation,
//! * `observations.csv`: training inputs and outputs,
//! * `samples.csv`: posterior draws, one per row (1D inputs only),
//! * `NLML.csv`: negative log marginal likelihood of the fitted model,
//! * `SciKit_Learn_Results/` and `GPyTorch_Results/`: the same quantities as numpy files
//!   (`predMean.npy`, `predStd.npy`, `samples.npy`, `NLML.npy`).
//!
//! The input dimension is inferred from the width of `predictions.csv`, only 1D and 2D
//! inputs are supported.
//!
//! A run prints the likelihood of each implementation then renders SVG figures:
//! * in 1D, one figure per implementation with the mean curve, 1, 2 and 3 standard
//!   deviations bands, the true function, training points and posterior draws,
//! * in 2D, the engine and reference mean surfaces side by side with linked cameras,
//!   then the engine predictive uncertainty over a zoomed-in region.
//!
//! # Example
//!
//! ```no_run
//! use gpcompare::ComparisonBuilder;
//!
//! let result = ComparisonBuilder::new("results")
//!     .configure(|cfg| cfg.use_gpytorch(true).outdir("results/plots"))
//!     .build()
//!     .run()
//!     .expect("comparison");
//!
//! for figure in result.figures {
//!     println!("{} -> {}", figure.title, figure.path.display());
//! }
//! ```
//!
#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod camera;
pub mod loader;
pub mod plot;
pub mod region;
pub mod triangulation;

mod comparison;
mod config;
mod errors;
mod report;
mod types;
mod utils;

pub use crate::comparison::*;
pub use crate::config::*;
pub use crate::errors::*;
pub use crate::report::*;
pub use crate::types::*;
pub use crate::utils::{format_elapsed, GPCOMPARE_LOG};
