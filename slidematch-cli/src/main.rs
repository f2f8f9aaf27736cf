use clap::Parser;
use image::ImageReader;
use serde::{Deserialize, Serialize};
use slidematch::{solve_bytes, ImageInput, MatchConfig, SlideRequest, SlideSolution};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "Slider captcha solver (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for the pipeline stages.
    #[arg(long)]
    trace: bool,
}

#[derive(Clone, Copy, Debug, Deserialize)]
struct SizeJson {
    width: usize,
    height: usize,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Config {
    background_path: String,
    block_path: String,
    /// Working size for the background; native size when omitted.
    background_size: Option<SizeJson>,
    /// Working size for the block; native size when omitted.
    block_size: Option<SizeJson>,
    parallel: bool,
    output_path: Option<String>,
}

#[derive(Debug, Serialize)]
struct Output {
    distance: usize,
    x: usize,
    y: usize,
}

impl From<SlideSolution> for Output {
    fn from(value: SlideSolution) -> Self {
        Self {
            distance: value.distance(),
            x: value.coordinate.x,
            y: value.coordinate.y,
        }
    }
}

fn load_input(
    path: &str,
    size: Option<SizeJson>,
) -> Result<ImageInput<Vec<u8>>, Box<dyn std::error::Error>> {
    let encoded = fs::read(path)?;
    let (width, height) = match size {
        Some(size) => (size.width, size.height),
        None => native_size(Path::new(path), &encoded)?,
    };
    Ok(ImageInput {
        encoded,
        width,
        height,
    })
}

/// Reads the image dimensions from the header without decoding pixels.
fn native_size(path: &Path, bytes: &[u8]) -> Result<(usize, usize), Box<dyn std::error::Error>> {
    let (width, height) = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .into_dimensions()
        .map_err(|err| format!("{}: {err}", path.display()))?;
    Ok((width as usize, height as usize))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive("slidematch=debug".parse()?),
            )
            .with_target(false)
            .init();
    }

    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.background_path.is_empty() || config.block_path.is_empty() {
        return Err("background_path and block_path must be set in the config".into());
    }

    let request = SlideRequest {
        background: load_input(&config.background_path, config.background_size)?,
        block: load_input(&config.block_path, config.block_size)?,
    };
    let solution = solve_bytes(
        &request,
        MatchConfig {
            parallel: config.parallel,
        },
    )?;
    tracing::info!(distance = solution.distance(), "solved");

    let json = serde_json::to_string_pretty(&Output::from(solution))?;
    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::native_size;
    use image::{DynamicImage, ImageFormat, RgbaImage};
    use std::io::Cursor;
    use std::path::Path;

    #[test]
    fn native_size_reads_png_header() {
        let mut png = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(RgbaImage::new(37, 11))
            .write_to(&mut png, ImageFormat::Png)
            .unwrap();
        let size = native_size(Path::new("piece.png"), png.get_ref()).unwrap();
        assert_eq!(size, (37, 11));
    }

    #[test]
    fn native_size_names_the_unreadable_file() {
        let err = native_size(Path::new("bad.bin"), b"not an image").unwrap_err();
        assert!(err.to_string().starts_with("bad.bin: "));
    }
}
