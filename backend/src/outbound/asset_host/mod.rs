//! Image host adapter implementing the `AssetHost` port.

mod cloudinary;
mod dto;

pub use cloudinary::{AssetHostCredentials, CloudinaryAssetHost, DEFAULT_ASSET_HOST_ORIGIN};
