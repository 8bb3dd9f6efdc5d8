use approx::assert_abs_diff_eq;
use gpcompare::loader::{
    NLML_FILE, OBSERVATIONS_FILE, PREDICTIONS_FILE, REF_MEAN_FILE, REF_NLML_FILE,
    REF_SAMPLES_FILE, REF_STD_FILE, SAMPLES_FILE,
};
use gpcompare::{ComparisonBuilder, ComparisonConfig, Source, CONFIG_FILE};
use ndarray::{Array0, Array1, Array2};
use ndarray_npy::write_npy;
use std::path::Path;

const N: usize = 30;

fn write_engine_results(dir: &Path) -> Array1<f64> {
    std::fs::create_dir_all(dir).unwrap();
    let x = Array1::<f64>::linspace(0., 5., N);
    let mut pred = String::new();
    for &v in x.iter() {
        let y = v.sin();
        pred.push_str(&format!("{v},{y},{},{}\n", y + 0.02, 0.1 + 0.02 * v));
    }
    std::fs::write(dir.join(PREDICTIONS_FILE), pred).unwrap();
    std::fs::write(
        dir.join(OBSERVATIONS_FILE),
        "0.5,0.479\n1.5,0.997\n2.5,0.598\n3.5,-0.351\n4.5,-0.978\n",
    )
    .unwrap();
    let mut samples = String::new();
    for shift in [-0.05, 0.05, 0.1] {
        let row: Vec<String> = x.iter().map(|v| (v.sin() + shift).to_string()).collect();
        samples.push_str(&row.join(","));
        samples.push('\n');
    }
    std::fs::write(dir.join(SAMPLES_FILE), samples).unwrap();
    std::fs::write(dir.join(NLML_FILE), "7.25\n").unwrap();
    x
}

#[test]
fn test_gpytorch_float32_results() {
    let dir = Path::new("target/tests/integration_gpytorch");
    let x = write_engine_results(dir);

    let res_dir = dir.join(Source::GPyTorch.results_dir().unwrap());
    std::fs::create_dir_all(&res_dir).unwrap();
    let mean = x.mapv(|v| v.sin() as f32);
    write_npy(res_dir.join(REF_MEAN_FILE), &mean).unwrap();
    write_npy(res_dir.join(REF_STD_FILE), &Array1::<f32>::from_elem(N, 0.1)).unwrap();
    // GPyTorch stores one draw per row
    let draws = Array2::from_shape_fn((4, N), |(i, j)| mean[j] + 0.01 * i as f32);
    write_npy(res_dir.join(REF_SAMPLES_FILE), &draws).unwrap();
    write_npy(res_dir.join(REF_NLML_FILE), &Array0::<f32>::from_elem((), 6.5)).unwrap();

    let outdir = dir.join("plots");
    let result = ComparisonBuilder::new(dir)
        .configure(|cfg| {
            cfg.use_sklearn(false)
                .use_gpytorch(true)
                .size(800, 600)
                .outdir(&outdir)
        })
        .build()
        .run()
        .expect("comparison run");

    assert_eq!(result.report.lines.len(), 2);
    assert_eq!(result.report.lines[1].source, Source::GPyTorch);
    assert_abs_diff_eq!(result.report.lines[0].nlml, 7.25);
    assert_abs_diff_eq!(result.report.lines[1].nlml, 6.5);
    assert_eq!(
        result.report.to_string(),
        "CppGPs NLML:        7.2500\n\nGPyTorch NLML:      6.5000"
    );

    let files: Vec<_> = result
        .figures
        .iter()
        .map(|f| f.path.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(files, vec!["gpytorch_1d.svg", "cppgps_1d.svg"]);
    for figure in result.figures.iter() {
        let svg = std::fs::read_to_string(&figure.path).unwrap();
        assert!(svg.contains(&figure.title));
    }

    let json = std::fs::read_to_string(outdir.join(CONFIG_FILE)).unwrap();
    let config: ComparisonConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(config.get_size(), (800, 600));
    assert_eq!(config.get_workdir(), dir);
}

#[test]
fn test_missing_reference_results() {
    let dir = Path::new("target/tests/integration_missing");
    write_engine_results(dir);
    let _ = std::fs::remove_dir_all(dir.join(Source::SciKitLearn.results_dir().unwrap()));

    // SciKit Learn comparison is enabled by default
    let res = ComparisonBuilder::new(dir)
        .configure(|cfg| cfg.outdir(dir.join("plots")))
        .build()
        .run();
    assert!(res.is_err());
}
