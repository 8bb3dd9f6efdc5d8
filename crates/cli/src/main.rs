use anyhow::Result;
use clap::Parser;
use gpcompare::{ComparisonBuilder, GPCOMPARE_LOG};
use log::info;
use std::path::PathBuf;

/// Compare CppGPs gaussian process results against SciKit Learn and GPyTorch ones
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding predictions.csv, observations.csv, samples.csv, NLML.csv
    /// and the comparison libraries results directories
    #[arg(short, long, default_value = ".")]
    workdir: PathBuf,
    /// Directory where figures are rendered
    #[arg(short, long, default_value = "./gp_plots")]
    outdir: PathBuf,
    /// Skip SciKit Learn results
    #[arg(long)]
    no_sklearn: bool,
    /// Compare with GPyTorch results
    #[arg(long)]
    gpytorch: bool,
    /// Camera elevation of 3D plots (degrees)
    #[arg(long, default_value_t = 30., allow_negative_numbers = true)]
    elev: f64,
    /// Camera azimuth of 3D plots (degrees)
    #[arg(long, default_value_t = -60., allow_negative_numbers = true)]
    azim: f64,
    /// Figure width in pixels
    #[arg(long, default_value_t = 1024)]
    width: u32,
    /// Figure height in pixels
    #[arg(long, default_value_t = 768)]
    height: u32,
    /// Draw panes, grid and axes of 3D plots
    #[arg(long)]
    show_axes: bool,
}

fn main() -> Result<()> {
    let env = env_logger::Env::new().filter_or(GPCOMPARE_LOG, "info");
    let mut builder = env_logger::Builder::from_env(env);
    let builder = builder.target(env_logger::Target::Stdout);
    builder.try_init().ok();

    let args = Args::parse();
    let result = ComparisonBuilder::new(&args.workdir)
        .configure(|cfg| {
            cfg.outdir(&args.outdir)
                .use_sklearn(!args.no_sklearn)
                .use_gpytorch(args.gpytorch)
                .view(args.elev, args.azim)
                .size(args.width, args.height)
                .hide_axes(!args.show_axes)
        })
        .build()
        .run()?;

    for figure in result.figures.iter() {
        info!("{}: {}", figure.title, figure.path.display());
    }
    Ok(())
}
