//! Image acquisition: turning picked bytes into a raster.
//!
//! The host owns the picker surface and hands over whatever bytes the user
//! chose. This module only decodes them. Any format enabled on the `image`
//! dependency is accepted (PNG, JPEG, GIF, BMP, TIFF, WebP), with EXIF
//! orientation applied so the raster is upright.
//!
//! # Examples
//!
//! ```ignore
//! use finalpic_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.jpg")?;
//! let image = decode_image(&bytes)?;
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod reader;
mod types;

pub use reader::decode_image;
pub use types::{DecodeError, DecodedImage, Orientation, BYTES_PER_PIXEL};
