/*
    Copyright (C) 2025 bugo07
    Released under EUPL 1.2 License
*/

use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageError, ImageReader};
use tracing::debug;

use crate::config::TranscodeOptions;
use crate::error::{Result, TranscodeError};
use crate::mono::{self, Bitmap};

/// One input image reduced to a named monochrome bitmap.
#[derive(Clone, Debug)]
pub struct ImageResource {
    /// File name without its last extension.
    pub base_name: String,
    /// Identifier stem the emitted symbols are built from.
    pub symbol_stem: String,
    pub source_path: PathBuf,
    pub bitmap: Bitmap,
}

impl ImageResource {
    pub fn load(path: &Path, opts: &TranscodeOptions) -> Result<Self> {
        let img = decode(path)?;
        let (orig_width, orig_height) = (img.width(), img.height());

        let mono = mono::to_monochrome(&img, &opts.mono);
        let mono = mono::align_to_byte_grid(mono);
        let bitmap = Bitmap::pack(&mono, opts.bit_order, opts.mono.invert);

        let base_name = base_name(path);
        let res = ImageResource {
            symbol_stem: symbol_stem(&base_name),
            base_name,
            source_path: path.to_path_buf(),
            bitmap,
        };

        debug!(
            path = %res.source_path.display(),
            name = %res.base_name,
            symbol = %res.symbol_stem,
            "{orig_width}x{orig_height} -> {}x{}",
            res.width(),
            res.height()
        );
        Ok(res)
    }

    pub fn width(&self) -> u32 {
        self.bitmap.width()
    }

    pub fn height(&self) -> u32 {
        self.bitmap.height()
    }

    pub fn image_symbol(&self) -> String {
        format!("{}_XBM_IMAGE", self.symbol_stem)
    }

    pub fn width_symbol(&self) -> String {
        format!("{}_XBM_WIDTH", self.symbol_stem)
    }

    pub fn height_symbol(&self) -> String {
        format!("{}_XBM_HEIGHT", self.symbol_stem)
    }
}

fn decode(path: &Path) -> Result<DynamicImage> {
    let load_error = |source: ImageError| TranscodeError::ImageLoad {
        path: path.to_path_buf(),
        source,
    };

    ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| load_error(ImageError::IoError(e)))?
        .decode()
        .map_err(load_error)
}

pub fn base_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Uppercases `base_name` and turns it into a valid C identifier.
pub fn symbol_stem(base_name: &str) -> String {
    let mut stem: String = base_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();

    if stem.is_empty() || stem.starts_with(|c: char| c.is_ascii_digit()) {
        stem.insert(0, '_');
    }
    stem
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_name_strips_last_extension() {
        assert_eq!(base_name(Path::new("images/icon.png")), "icon");
        assert_eq!(base_name(Path::new("flash_small.off.bmp")), "flash_small.off");
        assert_eq!(base_name(Path::new("noext")), "noext");
    }

    #[test]
    fn symbol_stem_is_identifier() {
        assert_eq!(symbol_stem("flash_small"), "FLASH_SMALL");
        assert_eq!(symbol_stem("my-icon 2"), "MY_ICON_2");
        assert_eq!(symbol_stem("8x8"), "_8X8");
        assert_eq!(symbol_stem(""), "_");
    }
}
