use argh::FromArgs;
use std::path::{Path, PathBuf};

use edgekit::{
    image::{Image, ImageError},
    imgproc::{
        edges::{CannyParams, EdgeDetector, SobelParams},
        normalize::normalize_min_max,
    },
    io::pgm,
};

#[derive(FromArgs)]
/// Detect edges in a binary greymap (PGM P5) image.
struct Args {
    #[argh(subcommand)]
    command: Command,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Command {
    Sobel(SobelArgs),
    Canny(CannyArgs),
}

#[derive(FromArgs)]
/// Sobel gradients thresholded with a liberal and a restrictive cutoff.
#[argh(subcommand, name = "sobel")]
struct SobelArgs {
    /// path to the input image
    #[argh(positional)]
    input: PathBuf,

    /// cutoff of the liberal edge map, relative to 255
    #[argh(option, default = "0.3")]
    low: f64,

    /// cutoff of the restrictive edge map, relative to 255
    #[argh(option, default = "0.5")]
    high: f64,

    /// directory the maps are written to
    #[argh(option, default = "PathBuf::from(\".\")")]
    output_dir: PathBuf,
}

#[derive(FromArgs)]
/// Derivative of gaussian gradients followed by peak extraction.
#[argh(subcommand, name = "canny")]
struct CannyArgs {
    /// path to the input image
    #[argh(positional)]
    input: PathBuf,

    /// spread of the gaussian kernels
    #[argh(positional)]
    sigma: f64,

    /// directory the maps are written to
    #[argh(option, default = "PathBuf::from(\".\")")]
    output_dir: PathBuf,
}

fn run(
    input: &Path,
    output_dir: &Path,
    detector: EdgeDetector,
) -> Result<(), Box<dyn std::error::Error>> {
    log::info!("Reading image data from {}", input.display());
    let image: Image<i32> = pgm::read_image_pgm(input)?.cast()?;

    log::info!("Running {:?} on {}", detector, image.size());
    let maps = detector.detect(&image)?;

    log::info!("Saving images to {}", output_dir.display());
    let normalized = maps
        .iter()
        .map(|(kind, map)| {
            let file_path = output_dir.join(format!("{}.pgm", kind.file_stem()));
            Ok((file_path, normalize_min_max(map)?))
        })
        .collect::<Result<Vec<_>, ImageError>>()?;

    std::fs::create_dir_all(output_dir)?;
    let outputs = normalized
        .iter()
        .map(|(file_path, image)| (file_path.as_path(), image))
        .collect::<Vec<_>>();
    for file_path in pgm::write_images_pgm(&outputs)? {
        log::info!("Wrote {}", file_path.display());
    }

    Ok(())
}

impl Command {
    /// Validate the parameters and split the command into input, output and detector.
    fn into_job(self) -> Result<(PathBuf, PathBuf, EdgeDetector), ImageError> {
        match self {
            Command::Sobel(args) => {
                let params = SobelParams::new(args.low, args.high)?;
                Ok((args.input, args.output_dir, EdgeDetector::Sobel(params)))
            }
            Command::Canny(args) => {
                let params = CannyParams::new(args.sigma)?;
                Ok((args.input, args.output_dir, EdgeDetector::Canny(params)))
            }
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();

    let (input, output_dir, detector) = args.command.into_job()?;
    run(&input, &output_dir, detector)
}
