//! Helpers shared by the integration tests.

#![allow(dead_code)]

use image::{ImageReader, Rgb, RgbImage, Rgba, RgbaImage};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temp workspace with an `input/` directory; `output/` is left for the tool to create.
pub struct Workspace {
    pub tmp: TempDir,
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Workspace {
    pub fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("input");
        let output = tmp.path().join("output");
        std::fs::create_dir_all(&input).unwrap();
        Self { tmp, input, output }
    }

    pub fn png(&self, name: &str, width: u32, height: u32) -> &Self {
        RgbImage::from_fn(width, height, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 64]))
            .save_with_format(self.input.join(name), image::ImageFormat::Png)
            .unwrap();
        self
    }

    pub fn png_with_alpha(&self, name: &str, width: u32, height: u32) -> &Self {
        RgbaImage::from_fn(width, height, |x, _| Rgba([200, 100, 50, (x % 256) as u8]))
            .save_with_format(self.input.join(name), image::ImageFormat::Png)
            .unwrap();
        self
    }

    pub fn jpeg(&self, name: &str, width: u32, height: u32) -> &Self {
        RgbImage::from_fn(width, height, |x, y| Rgb([(x % 256) as u8, 32, (y % 256) as u8]))
            .save_with_format(self.input.join(name), image::ImageFormat::Jpeg)
            .unwrap();
        self
    }

    pub fn file(&self, name: &str, content: &[u8]) -> &Self {
        std::fs::write(self.input.join(name), content).unwrap();
        self
    }

    pub fn output_names(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(&self.output)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

/// Dimensions of an image on disk, sniffing the format from content.
pub fn image_size(path: &Path) -> (u32, u32) {
    ImageReader::open(path)
        .unwrap()
        .with_guessed_format()
        .unwrap()
        .into_dimensions()
        .unwrap()
}
