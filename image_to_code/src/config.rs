/*
    Copyright (C) 2025 bugo07
    Released under EUPL 1.2 License
*/

use std::num::NonZeroUsize;

pub const DEFAULT_BYTES_PER_LINE: NonZeroUsize = match NonZeroUsize::new(12) {
    Some(n) => n,
    None => unreachable!(),
};

/// How grey levels are reduced to one bit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Dither {
    /// Fixed threshold on luma, see [`MonoOptions::threshold`].
    #[default]
    None,
    /// Floyd-Steinberg error diffusion against a black/white palette.
    FloydSteinberg,
}

/// Order of pixels inside one packed byte.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BitOrder {
    /// Leftmost pixel in bit 7.
    #[default]
    MsbFirst,
    /// Leftmost pixel in bit 0, as in X11 XBM files.
    LsbFirst,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonoOptions {
    /// Luma at or above this value is a lit pixel. Ignored when dithering.
    pub threshold: u8,
    pub dither: Dither,
    /// Set bits for dark pixels instead of lit ones.
    pub invert: bool,
}

impl Default for MonoOptions {
    fn default() -> Self {
        MonoOptions {
            threshold: 128,
            dither: Dither::None,
            invert: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranscodeOptions {
    pub mono: MonoOptions,
    pub bit_order: BitOrder,
    /// Byte values per line in emitted array literals.
    pub bytes_per_line: NonZeroUsize,
    /// Extension of the definitions file, without the dot.
    pub source_extension: String,
    /// Ignore entries whose name starts with a dot.
    pub skip_hidden: bool,
}

impl Default for TranscodeOptions {
    fn default() -> Self {
        TranscodeOptions {
            mono: MonoOptions::default(),
            bit_order: BitOrder::default(),
            bytes_per_line: DEFAULT_BYTES_PER_LINE,
            source_extension: String::from("c"),
            skip_hidden: false,
        }
    }
}
