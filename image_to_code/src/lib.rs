/*
    Copyright (C) 2025 bugo07
    Released under EUPL 1.2 License
*/

//! Turns a folder of raster images into a C header/source pair of monochrome
//! XBM-style bitmaps for firmware builds.
//!
//! Each image `name.ext` becomes `NAME_XBM_IMAGE`, `NAME_XBM_WIDTH` and
//! `NAME_XBM_HEIGHT`, with both dimensions rounded up to a multiple of 8.

pub mod config;
pub mod emit;
pub mod error;
pub mod mono;
pub mod resource;
pub mod transcode;

pub use config::{BitOrder, Dither, MonoOptions, TranscodeOptions};
pub use emit::GeneratedModule;
pub use error::{Result, TranscodeError};
pub use mono::Bitmap;
pub use resource::ImageResource;
pub use transcode::{OutputPaths, Transcoder, transcode};
