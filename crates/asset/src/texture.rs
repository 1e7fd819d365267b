//! Texture loading and data structures.
//! Decoded images are RGBA8; the mip pyramid is built on the CPU before upload.

use std::path::{Path, PathBuf};

use image::{RgbaImage, imageops::FilterType};

use crate::error::{AssetError, AssetResult};

/// Texture data in CPU-friendly format before GPU upload.
#[derive(Clone, Debug, PartialEq)]
pub struct TextureData {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
}

/// Supported texture formats.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TextureFormat {
    Rgba8,
}

impl TextureData {
    /// Create a new texture with given dimensions and RGBA8 format.
    pub fn new_rgba8(width: u32, height: u32, data: Vec<u8>) -> Self {
        assert_eq!(
            data.len(),
            (width * height * 4) as usize,
            "Data size doesn't match RGBA8 format"
        );
        Self {
            data,
            width,
            height,
            format: TextureFormat::Rgba8,
        }
    }

    /// Load and decode an image file (any format the `image` features allow).
    pub fn load<P: AsRef<Path>>(path: P) -> AssetResult<Self> {
        let path = path.as_ref();
        log::info!("Loading texture from {:?}", path);

        let bytes = std::fs::read(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let texture = Self::decode_labeled(&bytes, path.to_path_buf())?;

        log::info!(
            "Loaded texture {}x{} with {} bytes",
            texture.width,
            texture.height,
            texture.data.len()
        );
        Ok(texture)
    }

    /// Decode an in-memory encoded image.
    pub fn decode(bytes: &[u8]) -> AssetResult<Self> {
        Self::decode_labeled(bytes, PathBuf::from("<memory>"))
    }

    fn decode_labeled(bytes: &[u8], path: PathBuf) -> AssetResult<Self> {
        let img = image::load_from_memory(bytes).map_err(|source| AssetError::Image { path, source })?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self::new_rgba8(width, height, rgba.into_raw()))
    }

    /// Create a simple test texture (checkerboard pattern).
    pub fn create_test_texture(size: u32) -> Self {
        let mut data = Vec::with_capacity((size * size * 4) as usize);

        for y in 0..size {
            for x in 0..size {
                let checker = ((x / 8) + (y / 8)) % 2;
                if checker == 0 {
                    data.extend_from_slice(&[255, 255, 255, 255]);
                } else {
                    data.extend_from_slice(&[128, 128, 128, 255]);
                }
            }
        }

        Self::new_rgba8(size, size, data)
    }

    /// Get the number of bytes per pixel for the format.
    pub fn bytes_per_pixel(&self) -> u32 {
        match self.format {
            TextureFormat::Rgba8 => 4,
        }
    }

    /// Check if the texture data is valid.
    pub fn is_valid(&self) -> bool {
        let expected_size = (self.width * self.height * self.bytes_per_pixel()) as usize;
        self.data.len() == expected_size && self.width > 0 && self.height > 0
    }

    /// Number of levels in a full mip pyramid down to 1x1.
    pub fn mip_level_count(&self) -> u32 {
        32 - self.width.max(self.height).max(1).leading_zeros()
    }

    /// Consume the base image and produce every mip level, base first.
    ///
    /// Each level halves the previous one (clamped to 1) with a triangle filter.
    pub fn into_mip_chain(self) -> Vec<TextureData> {
        let count = self.mip_level_count();
        let mut levels = Vec::with_capacity(count as usize);
        let mut current = self;
        for _ in 1..count {
            let Some(next) = current.downsample() else {
                log::warn!(
                    "Mip generation stopped at {}x{}: invalid pixel buffer",
                    current.width,
                    current.height
                );
                break;
            };
            levels.push(std::mem::replace(&mut current, next));
        }
        levels.push(current);
        levels
    }

    fn downsample(&self) -> Option<TextureData> {
        let src = RgbaImage::from_raw(self.width, self.height, self.data.clone())?;
        let width = (self.width / 2).max(1);
        let height = (self.height / 2).max(1);
        let dst = image::imageops::resize(&src, width, height, FilterType::Triangle);
        Some(Self::new_rgba8(width, height, dst.into_raw()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkerboard_is_valid() {
        let tex = TextureData::create_test_texture(16);
        assert!(tex.is_valid());
        assert_eq!(&tex.data[..4], &[255, 255, 255, 255]);
        // pixel (8, 0) is in the second checker cell
        assert_eq!(&tex.data[8 * 4..8 * 4 + 4], &[128, 128, 128, 255]);
    }

    #[test]
    fn mip_chain_halves_down_to_one_pixel() {
        let tex = TextureData::new_rgba8(8, 2, vec![200; 8 * 2 * 4]);
        assert_eq!(tex.mip_level_count(), 4);
        let levels = tex.into_mip_chain();
        let sizes: Vec<_> = levels.iter().map(|l| (l.width, l.height)).collect();
        assert_eq!(sizes, vec![(8, 2), (4, 1), (2, 1), (1, 1)]);
        assert!(levels.iter().all(TextureData::is_valid));
    }

    #[test]
    fn uniform_color_survives_downsampling() {
        let levels = TextureData::new_rgba8(4, 4, [10, 20, 30, 255].repeat(16)).into_mip_chain();
        let last = levels.last().unwrap();
        assert_eq!((last.width, last.height), (1, 1));
        for (got, want) in last.data.iter().zip([10u8, 20, 30, 255]) {
            assert!(got.abs_diff(want) <= 1, "{got} vs {want}");
        }
    }

    #[test]
    fn decode_png_from_memory() {
        let img = RgbaImage::from_pixel(3, 2, image::Rgba([1, 2, 3, 4]));
        let mut bytes = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        let tex = TextureData::decode(&bytes).unwrap();
        assert_eq!((tex.width, tex.height), (3, 2));
        assert_eq!(&tex.data[..4], &[1, 2, 3, 4]);
    }

    #[test]
    fn garbage_bytes_are_an_image_error() {
        assert!(matches!(
            TextureData::decode(b"not a png"),
            Err(AssetError::Image { .. })
        ));
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = TextureData::load("no/such/texture.png").unwrap_err();
        assert!(err.is_not_found());
    }
}
