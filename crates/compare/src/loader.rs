//! Readers for the prediction artifacts written by the GP implementations.
//!
//! The custom engine writes comma separated files with `|` as quote character and no header:
//! * `predictions.csv`: `x1, [x2,] true value, predicted mean, predicted std` per query point
//! * `observations.csv`: `x1, [x2,] y` per training point
//! * `samples.csv`: one posterior draw per row (1D inputs only)
//! * `NLML.csv`: the negative log marginal likelihood
//!
//! Comparison libraries results are numpy arrays stored in their own directory
//! (`predMean.npy`, `predStd.npy`, `samples.npy`, `NLML.npy`).
use crate::config::ComparisonConfig;
use crate::errors::{CompareError, Result};
use crate::types::*;

use csv::{Reader, ReaderBuilder, Trim};
use log::{debug, info};
use ndarray::{s, Array1, Array2, ArrayD, Ix2};
use ndarray_csv::Array2Reader;
use ndarray_npy::{read_npy, ReadNpyError};
use std::fs::File;
use std::path::Path;

/// Custom engine predictions file
pub const PREDICTIONS_FILE: &str = "predictions.csv";
/// Training data file
pub const OBSERVATIONS_FILE: &str = "observations.csv";
/// Custom engine posterior draws file
pub const SAMPLES_FILE: &str = "samples.csv";
/// Custom engine likelihood file
pub const NLML_FILE: &str = "NLML.csv";

/// Comparison library predicted mean file
pub const REF_MEAN_FILE: &str = "predMean.npy";
/// Comparison library predicted standard deviation file
pub const REF_STD_FILE: &str = "predStd.npy";
/// Comparison library posterior draws file
pub const REF_SAMPLES_FILE: &str = "samples.npy";
/// Comparison library likelihood file
pub const REF_NLML_FILE: &str = "NLML.npy";

fn csv_reader<P: AsRef<Path>>(path: P) -> Result<Reader<File>> {
    let file = File::open(path.as_ref())?;
    Ok(ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b',')
        .quote(b'|')
        .trim(Trim::All)
        .from_reader(file))
}

fn read_csv_array<P: AsRef<Path>>(path: P) -> Result<Array2<f64>> {
    let mut reader = csv_reader(path.as_ref())?;
    let data: Array2<f64> = reader.deserialize_array2_dynamic()?;
    debug!("Read {:?} from {}", data.shape(), path.as_ref().display());
    Ok(data)
}

fn check_ncols(data: &Array2<f64>, expected: usize, path: &Path) -> Result<()> {
    if data.ncols() != expected {
        return Err(CompareError::ShapeMismatch(format!(
            "{} has {} columns, expected {}",
            path.display(),
            data.ncols(),
            expected
        )));
    }
    Ok(())
}

fn check_len(name: &str, len: usize, expected: usize) -> Result<()> {
    if len != expected {
        return Err(CompareError::ShapeMismatch(format!(
            "{name} has {len} values, expected {expected}"
        )));
    }
    Ok(())
}

/// Infers the input dimension from the width of the first record of the predictions file.
///
/// Only the first record is read.
pub fn sniff_input_dim<P: AsRef<Path>>(path: P) -> Result<InputDim> {
    let mut reader = csv_reader(path.as_ref())?;
    let record = reader.records().next().ok_or_else(|| {
        CompareError::InvalidValue(format!("{} is empty", path.as_ref().display()))
    })??;
    InputDim::try_from(record.len().saturating_sub(NON_INPUT_LENGTH))
}

/// Reads query points, true values, predicted mean and std of the custom engine
pub fn load_predictions<P: AsRef<Path>>(path: P, dim: InputDim) -> Result<Predictions> {
    let data = read_csv_array(path.as_ref())?;
    let d = dim.ncols();
    check_ncols(&data, d + NON_INPUT_LENGTH, path.as_ref())?;
    Ok(Predictions {
        x: data.slice(s![.., ..d]).to_owned(),
        y_true: data.column(d).to_owned(),
        mean: data.column(d + 1).to_owned(),
        std: data.column(d + 2).to_owned(),
    })
}

/// Reads training inputs and outputs
pub fn load_observations<P: AsRef<Path>>(path: P, dim: InputDim) -> Result<Observations> {
    let data = read_csv_array(path.as_ref())?;
    let d = dim.ncols();
    check_ncols(&data, d + 1, path.as_ref())?;
    Ok(Observations {
        x: data.slice(s![.., ..d]).to_owned(),
        y: data.column(d).to_owned(),
    })
}

/// Reads posterior draws written one draw per row
pub fn load_samples_csv<P: AsRef<Path>>(path: P) -> Result<PosteriorSamples> {
    let data = read_csv_array(path)?;
    Ok(PosteriorSamples::from_rows(data))
}

/// Reads the negative log marginal likelihood, the first field of the first record.
///
/// The engine writes a single precision value, it is parsed as `f32` then widened
/// so that the four decimals rounding matches the written value.
pub fn load_nlml_csv<P: AsRef<Path>>(path: P) -> Result<f64> {
    let mut reader = csv_reader(path.as_ref())?;
    let record = reader.records().next().ok_or_else(|| {
        CompareError::InvalidValue(format!("no NLML value in {}", path.as_ref().display()))
    })??;
    let field = record.get(0).unwrap_or_default();
    let nlml: f32 = field.parse().map_err(|_| {
        CompareError::InvalidValue(format!(
            "bad NLML value {:?} in {}",
            field,
            path.as_ref().display()
        ))
    })?;
    Ok(f64::from(nlml))
}

/// Reads a numpy array stored either as float64 or float32
pub fn read_npy_f64<P: AsRef<Path>>(path: P) -> Result<ArrayD<f64>> {
    match read_npy::<_, ArrayD<f64>>(path.as_ref()) {
        Ok(arr) => Ok(arr),
        Err(ReadNpyError::WrongDescriptor(_)) => {
            let arr: ArrayD<f32> = read_npy(path.as_ref())?;
            Ok(arr.mapv(f64::from))
        }
        Err(err) => Err(err.into()),
    }
}

/// Flattens (n,), (n, 1) or (1, n) arrays
fn to_vector(arr: ArrayD<f64>, path: &Path) -> Result<Array1<f64>> {
    let non_trivial = arr.shape().iter().filter(|&&n| n > 1).count();
    if arr.ndim() > 2 || non_trivial > 1 {
        return Err(CompareError::ShapeMismatch(format!(
            "{} has shape {:?}, expected a vector",
            path.display(),
            arr.shape()
        )));
    }
    Ok(arr.iter().copied().collect())
}

fn to_scalar(arr: ArrayD<f64>, path: &Path) -> Result<f64> {
    match arr.len() {
        1 => Ok(arr.iter().copied().next().unwrap_or(f64::NAN)),
        n => Err(CompareError::InvalidValue(format!(
            "{} holds {} values, expected a scalar",
            path.display(),
            n
        ))),
    }
}

/// Reads results of a comparison library from `workdir/<results dir>/`.
///
/// Posterior draws are read only for 1D inputs. SciKit Learn stores one draw per column,
/// GPyTorch one draw per row.
pub fn load_reference<P: AsRef<Path>>(
    workdir: P,
    source: Source,
    dim: InputDim,
) -> Result<ReferenceResults> {
    let dir = match source.results_dir() {
        Some(dir) => workdir.as_ref().join(dir),
        None => {
            return Err(CompareError::InvalidValue(format!(
                "{} has no numpy results directory",
                source.label()
            )))
        }
    };
    info!("Load {} results from {}", source.label(), dir.display());

    let path = dir.join(REF_MEAN_FILE);
    let mean = to_vector(read_npy_f64(&path)?, &path)?;
    let path = dir.join(REF_STD_FILE);
    let std = to_vector(read_npy_f64(&path)?, &path)?;

    let samples = if dim == InputDim::One {
        let path = dir.join(REF_SAMPLES_FILE);
        let draws = read_npy_f64(&path)?.into_dimensionality::<Ix2>()?;
        let samples = match source {
            Source::GPyTorch => PosteriorSamples::from_rows(draws),
            _ => PosteriorSamples::from_columns(draws),
        };
        Some(samples)
    } else {
        None
    };

    let path = dir.join(REF_NLML_FILE);
    let nlml = to_scalar(read_npy_f64(&path)?, &path)?;

    Ok(ReferenceResults {
        source,
        mean,
        std,
        samples,
        nlml,
    })
}

/// Reads every file needed by a comparison run and checks row counts consistency.
///
/// Comparison libraries are loaded in the order SciKit Learn then GPyTorch,
/// each one only when enabled in the configuration.
pub fn load_comparison_data(config: &ComparisonConfig) -> Result<ComparisonData> {
    let workdir = config.get_workdir();

    let dim = sniff_input_dim(workdir.join(PREDICTIONS_FILE))?;
    info!("Input dimension: {:?}", dim);

    let predictions = load_predictions(workdir.join(PREDICTIONS_FILE), dim)?;
    let observations = load_observations(workdir.join(OBSERVATIONS_FILE), dim)?;
    let samples = match dim {
        InputDim::One => Some(load_samples_csv(workdir.join(SAMPLES_FILE))?),
        InputDim::Two => None,
    };
    let nlml = load_nlml_csv(workdir.join(NLML_FILE))?;

    let nq = predictions.len();
    debug!(
        "{} query points, {} observations",
        nq,
        observations.x.nrows()
    );
    check_len("observed outputs", observations.y.len(), observations.x.nrows())?;
    if let Some(samples) = samples.as_ref() {
        check_len("CppGPs samples", samples.n_points(), nq)?;
    }

    let mut references = vec![];
    for (enabled, source) in [
        (config.use_sklearn, Source::SciKitLearn),
        (config.use_gpytorch, Source::GPyTorch),
    ] {
        if enabled {
            let reference = load_reference(workdir, source, dim)?;
            check_len(&format!("{} mean", source.label()), reference.mean.len(), nq)?;
            check_len(&format!("{} std", source.label()), reference.std.len(), nq)?;
            if let Some(samples) = reference.samples.as_ref() {
                check_len(
                    &format!("{} samples", source.label()),
                    samples.n_points(),
                    nq,
                )?;
            }
            references.push(reference);
        }
    }

    Ok(ComparisonData {
        dim,
        predictions,
        observations,
        samples,
        nlml,
        references,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array0};
    use ndarray_npy::write_npy;

    fn test_dir(name: &str) -> std::path::PathBuf {
        let dir = Path::new("target/tests/loader").join(name);
        std::fs::create_dir_all(&dir).ok();
        dir
    }

    #[test]
    fn test_sniff_1d_and_2d() {
        let dir = test_dir("sniff");
        let path = dir.join("pred_1d.csv");
        std::fs::write(&path, "0.0,1.0,1.1,0.1\n0.5,2.0,2.1,0.2\n").unwrap();
        assert_eq!(sniff_input_dim(&path).unwrap(), InputDim::One);

        let path = dir.join("pred_2d.csv");
        std::fs::write(&path, "0.0,0.0,1.0,1.1,0.1\n").unwrap();
        assert_eq!(sniff_input_dim(&path).unwrap(), InputDim::Two);
    }

    #[test]
    fn test_sniff_unsupported() {
        let dir = test_dir("sniff_unsupported");
        let path = dir.join("pred_3d.csv");
        std::fs::write(&path, "0.0,0.0,0.0,1.0,1.1,0.1\n").unwrap();
        assert!(matches!(
            sniff_input_dim(&path),
            Err(CompareError::UnsupportedDimension(3))
        ));

        let path = dir.join("empty.csv");
        std::fs::write(&path, "").unwrap();
        assert!(matches!(
            sniff_input_dim(&path),
            Err(CompareError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_load_predictions_keeps_order() {
        let dir = test_dir("predictions");
        let path = dir.join(PREDICTIONS_FILE);
        std::fs::write(
            &path,
            "3.0,9.0,9.1,0.3\n1.0,1.0,1.1,0.1\n2.0,4.0,4.1,0.2\n",
        )
        .unwrap();
        let pred = load_predictions(&path, InputDim::One).unwrap();
        assert_eq!(pred.len(), 3);
        assert_abs_diff_eq!(pred.x, array![[3.0], [1.0], [2.0]]);
        assert_abs_diff_eq!(pred.y_true, array![9.0, 1.0, 4.0]);
        assert_abs_diff_eq!(pred.mean, array![9.1, 1.1, 4.1]);
        assert_abs_diff_eq!(pred.std, array![0.3, 0.1, 0.2]);
    }

    #[test]
    fn test_load_predictions_2d() {
        let dir = test_dir("predictions_2d");
        let path = dir.join(PREDICTIONS_FILE);
        std::fs::write(&path, "0.1,0.2,1.0,1.5,0.5\n|0.3|,0.4,2.0,2.5,0.6\n").unwrap();
        let pred = load_predictions(&path, InputDim::Two).unwrap();
        assert_abs_diff_eq!(pred.x, array![[0.1, 0.2], [0.3, 0.4]]);
        assert_abs_diff_eq!(pred.std, array![0.5, 0.6]);
    }

    #[test]
    fn test_load_predictions_non_numeric() {
        let dir = test_dir("predictions_nan");
        let path = dir.join(PREDICTIONS_FILE);
        std::fs::write(&path, "0.0,1.0,1.1,0.1\n0.5,two,2.1,0.2\n").unwrap();
        assert!(load_predictions(&path, InputDim::One).is_err());
    }

    #[test]
    fn test_load_observations_wrong_width() {
        let dir = test_dir("observations");
        let path = dir.join(OBSERVATIONS_FILE);
        std::fs::write(&path, "0.0,1.0\n0.5,2.0\n").unwrap();
        let obs = load_observations(&path, InputDim::One).unwrap();
        assert_abs_diff_eq!(obs.y, array![1.0, 2.0]);
        assert!(matches!(
            load_observations(&path, InputDim::Two),
            Err(CompareError::ShapeMismatch(_))
        ));
    }

    #[test]
    fn test_load_samples_and_nlml() {
        let dir = test_dir("samples");
        let path = dir.join(SAMPLES_FILE);
        std::fs::write(&path, "1.0,2.0,3.0\n4.0,5.0,6.0\n").unwrap();
        let samples = load_samples_csv(&path).unwrap();
        assert_eq!(samples.n_draws(), 2);
        assert_eq!(samples.n_points(), 3);

        let path = dir.join(NLML_FILE);
        std::fs::write(&path, "3.1415\n").unwrap();
        assert_abs_diff_eq!(load_nlml_csv(&path).unwrap(), 3.1415, epsilon = 1e-6);
    }

    #[test]
    fn test_nlml_single_precision() {
        let dir = test_dir("nlml");
        let path = dir.join(NLML_FILE);
        // 2.00005 is stored as 2.0000500679 in single precision
        std::fs::write(&path, "2.00005\n").unwrap();
        let nlml = load_nlml_csv(&path).unwrap();
        assert_eq!(nlml, f64::from(2.00005f32));
        assert_eq!(format!("{nlml:.4}"), "2.0001");

        std::fs::write(&path, "1.23445\n").unwrap();
        assert_eq!(format!("{:.4}", load_nlml_csv(&path).unwrap()), "1.2344");

        // only the first field of the first record is read
        std::fs::write(&path, "-4.5,1.0\n7.0\n").unwrap();
        assert_abs_diff_eq!(load_nlml_csv(&path).unwrap(), -4.5);

        std::fs::write(&path, "abc\n").unwrap();
        assert!(matches!(
            load_nlml_csv(&path),
            Err(CompareError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_read_npy_f32_and_shapes() {
        let dir = test_dir("npy");
        let path = dir.join("mean_f32.npy");
        write_npy(&path, &array![[1.0f32], [2.0], [3.0]]).unwrap();
        let arr = read_npy_f64(&path).unwrap();
        assert_abs_diff_eq!(to_vector(arr, &path).unwrap(), array![1.0, 2.0, 3.0]);

        let path = dir.join("matrix.npy");
        write_npy(&path, &array![[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let arr = read_npy_f64(&path).unwrap();
        assert!(matches!(
            to_vector(arr, &path),
            Err(CompareError::ShapeMismatch(_))
        ));

        let path = dir.join("nlml.npy");
        write_npy(&path, &Array0::from_elem((), 12.5)).unwrap();
        let arr = read_npy_f64(&path).unwrap();
        assert_abs_diff_eq!(to_scalar(arr, &path).unwrap(), 12.5);
    }

    #[test]
    fn test_load_reference_orientation() {
        let dir = test_dir("reference");
        for (source, draws) in [
            // SciKit Learn: one draw per column
            (Source::SciKitLearn, array![[1.0, 4.0], [2.0, 5.0], [3.0, 6.0]]),
            // GPyTorch: one draw per row
            (Source::GPyTorch, array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]),
        ] {
            let res_dir = dir.join(source.results_dir().unwrap());
            std::fs::create_dir_all(&res_dir).unwrap();
            write_npy(res_dir.join(REF_MEAN_FILE), &array![0.1, 0.2, 0.3]).unwrap();
            write_npy(res_dir.join(REF_STD_FILE), &array![0.01, 0.02, 0.03]).unwrap();
            write_npy(res_dir.join(REF_SAMPLES_FILE), &draws).unwrap();
            write_npy(res_dir.join(REF_NLML_FILE), &Array0::from_elem((), -1.5)).unwrap();

            let reference = load_reference(&dir, source, InputDim::One).unwrap();
            let samples = reference.samples.expect("1D samples");
            assert_eq!(samples.n_points(), 3);
            assert_eq!(samples.n_draws(), 2);
            assert_abs_diff_eq!(
                samples.view().to_owned(),
                array![[1.0, 4.0], [2.0, 5.0], [3.0, 6.0]]
            );
            assert_abs_diff_eq!(reference.nlml, -1.5);

            let reference = load_reference(&dir, source, InputDim::Two).unwrap();
            assert!(reference.samples.is_none());
        }
    }
}
