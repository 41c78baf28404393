/*
    Copyright (C) 2025 bugo07
    Released under EUPL 1.2 License
*/

use image::imageops::{self, BiLevel, FilterType};
use image::{DynamicImage, GrayImage, Luma};

use crate::config::{BitOrder, Dither, MonoOptions};

pub const LIT: u8 = 0xFF;
pub const DARK: u8 = 0x00;

/// ITU-R 601-2 luma in 16.16 fixed point, rounded. Alpha is dropped.
pub fn luma_601(img: &DynamicImage) -> GrayImage {
    let rgb = img.to_rgb8();
    GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        let l = (r as u32 * 19595 + g as u32 * 38470 + b as u32 * 7471 + 0x8000) >> 16;
        Luma([l as u8])
    })
}

/// Reduces an image to pure black/white, stored one pixel per byte as [`LIT`] or [`DARK`].
pub fn to_monochrome(img: &DynamicImage, opts: &MonoOptions) -> GrayImage {
    let mut gray = luma_601(img);
    match opts.dither {
        Dither::None => {
            for px in gray.pixels_mut() {
                px.0[0] = level(px.0[0] >= opts.threshold);
            }
        }
        Dither::FloydSteinberg => imageops::dither(&mut gray, &BiLevel),
    }
    gray
}

fn level(lit: bool) -> u8 {
    if lit { LIT } else { DARK }
}

/// Smallest multiple of 8 at or above `n`.
pub fn align_up(n: u32) -> u32 {
    n.div_ceil(8) * 8
}

/// Stretches the image so both sides are multiples of 8. Already aligned images pass through.
pub fn align_to_byte_grid(mono: GrayImage) -> GrayImage {
    let (width, height) = mono.dimensions();
    if width % 8 == 0 && height % 8 == 0 {
        return mono;
    }
    // nearest keeps the pixels binary
    imageops::resize(&mono, align_up(width), align_up(height), FilterType::Nearest)
}

/// A packed 1-bit image, row-major, `width / 8` bytes per row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    bit_order: BitOrder,
    invert: bool,
    data: Vec<u8>,
}

impl Bitmap {
    pub fn pack(mono: &GrayImage, bit_order: BitOrder, invert: bool) -> Self {
        let (width, height) = mono.dimensions();
        debug_assert!(width % 8 == 0 && height % 8 == 0);

        let stride = Self::stride_for(width);
        let mut data = vec![0u8; stride * height as usize];

        for (x, y, px) in mono.enumerate_pixels() {
            if (px.0[0] == LIT) != invert {
                data[y as usize * stride + x as usize / 8] |= Self::mask(bit_order, x);
            }
        }

        Bitmap {
            width,
            height,
            bit_order,
            invert,
            data,
        }
    }

    /// Renders the packed bits back into a [`LIT`]/[`DARK`] grey image.
    pub fn to_image(&self) -> GrayImage {
        let stride = Self::stride_for(self.width);
        GrayImage::from_fn(self.width, self.height, |x, y| {
            let byte = self.data[y as usize * stride + x as usize / 8];
            let set = byte & Self::mask(self.bit_order, x) != 0;
            Luma([level(set != self.invert)])
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn stride_for(width: u32) -> usize {
        width.div_ceil(8) as usize
    }

    fn mask(bit_order: BitOrder, x: u32) -> u8 {
        match bit_order {
            BitOrder::MsbFirst => 0x80 >> (x % 8),
            BitOrder::LsbFirst => 0x01 << (x % 8),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    fn gray(width: u32, height: u32, f: impl Fn(u32, u32) -> u8) -> GrayImage {
        GrayImage::from_fn(width, height, |x, y| Luma([f(x, y)]))
    }

    #[test]
    fn align_up_rounds_to_next_multiple() {
        assert_eq!(align_up(0), 0);
        assert_eq!(align_up(1), 8);
        assert_eq!(align_up(8), 8);
        assert_eq!(align_up(10), 16);
        assert_eq!(align_up(57), 64);
    }

    #[test]
    fn threshold_is_inclusive() {
        let img = DynamicImage::ImageLuma8(gray(3, 1, |x, _| [127, 128, 200][x as usize]));
        let mono = to_monochrome(&img, &MonoOptions::default());
        assert_eq!(mono.as_raw(), &vec![DARK, LIT, LIT]);

        let opts = MonoOptions {
            threshold: 201,
            ..MonoOptions::default()
        };
        let mono = to_monochrome(&img, &opts);
        assert_eq!(mono.as_raw(), &vec![DARK, DARK, DARK]);
    }

    #[test]
    fn colour_and_alpha_reduce_by_luma() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                Rgb([255, 255, 255])
            } else {
                Rgb([0, 0, 255])
            }
        }));
        let mono = to_monochrome(&img, &MonoOptions::default());
        assert_eq!(mono.as_raw(), &vec![LIT, DARK]);

        // alpha does not take part in the luma
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 0])));
        let mono = to_monochrome(&img, &MonoOptions::default());
        assert_eq!(mono.as_raw(), &vec![LIT]);
    }

    #[test]
    fn luma_uses_601_weights() {
        // 709 weights put this pixel at 121, below the threshold
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(1, 1, Rgb([200, 100, 100])));
        assert_eq!(luma_601(&img).get_pixel(0, 0).0[0], 130);
        let mono = to_monochrome(&img, &MonoOptions::default());
        assert_eq!(mono.as_raw(), &vec![LIT]);

        let img = DynamicImage::ImageLuma8(gray(2, 1, |x, _| [0, 173][x as usize]));
        assert_eq!(luma_601(&img).as_raw(), &vec![0, 173]);
    }

    #[test]
    fn dithering_stays_binary() {
        let img = DynamicImage::ImageLuma8(gray(16, 16, |x, y| ((x + y) * 8) as u8));
        let opts = MonoOptions {
            dither: Dither::FloydSteinberg,
            ..MonoOptions::default()
        };
        let mono = to_monochrome(&img, &opts);
        assert!(mono.pixels().all(|px| px.0[0] == LIT || px.0[0] == DARK));
        // a gradient must not collapse to a single colour
        assert!(mono.pixels().any(|px| px.0[0] == LIT));
        assert!(mono.pixels().any(|px| px.0[0] == DARK));
    }

    #[test]
    fn aligned_images_are_untouched() {
        let mono = gray(16, 8, |x, _| level(x < 3));
        let aligned = align_to_byte_grid(mono.clone());
        assert_eq!(aligned, mono);
    }

    #[test]
    fn unaligned_images_are_stretched() {
        let mono = gray(10, 10, |_, _| LIT);
        let aligned = align_to_byte_grid(mono);
        assert_eq!(aligned.dimensions(), (16, 16));
        assert!(aligned.pixels().all(|px| px.0[0] == LIT));

        let mono = gray(8, 3, |_, y| level(y == 0));
        let aligned = align_to_byte_grid(mono);
        assert_eq!(aligned.dimensions(), (8, 8));
        assert_eq!(aligned.get_pixel(0, 0).0[0], LIT);
        assert_eq!(aligned.get_pixel(0, 7).0[0], DARK);
    }

    #[test]
    fn pack_msb_first() {
        let mono = gray(8, 2, |x, y| {
            if y == 0 && (x == 0 || x == 7) {
                LIT
            } else {
                DARK
            }
        });
        let bitmap = Bitmap::pack(&mono, BitOrder::MsbFirst, false);
        assert_eq!(bitmap.data(), &[0x81, 0x00]);

        let mono = gray(16, 1, |x, _| level(x < 3));
        let bitmap = Bitmap::pack(&mono, BitOrder::MsbFirst, false);
        assert_eq!(bitmap.data(), &[0xE0, 0x00]);
    }

    #[test]
    fn pack_lsb_first() {
        let mono = gray(16, 1, |x, _| level(x < 3 || x == 15));
        let bitmap = Bitmap::pack(&mono, BitOrder::LsbFirst, false);
        assert_eq!(bitmap.data(), &[0x07, 0x80]);
    }

    #[test]
    fn pack_inverted() {
        let mono = gray(8, 1, |x, _| level(x == 0));
        let bitmap = Bitmap::pack(&mono, BitOrder::MsbFirst, true);
        assert_eq!(bitmap.data(), &[0x7F]);
    }

    #[test]
    fn packed_length_matches_dimensions() {
        let mono = gray(24, 16, |_, _| DARK);
        let bitmap = Bitmap::pack(&mono, BitOrder::MsbFirst, false);
        assert_eq!(bitmap.data().len(), 24 / 8 * 16);
    }

    #[test]
    fn unpack_restores_pixels() {
        let mono = gray(16, 8, |x, y| level((x + y) % 3 == 0));
        for order in [BitOrder::MsbFirst, BitOrder::LsbFirst] {
            for invert in [false, true] {
                let bitmap = Bitmap::pack(&mono, order, invert);
                assert_eq!(bitmap.to_image(), mono, "{order:?} invert={invert}");
            }
        }
    }
}
