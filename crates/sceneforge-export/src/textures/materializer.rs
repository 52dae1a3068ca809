//! Filesystem asset materializer

use std::path::Path;

use tracing::{debug, warn};

use crate::traits::AssetMaterializer;

use super::{MaterializeError, MaterializeResult};

/// Formats the target runtime loads directly; everything else is
/// re-encoded to PNG
const DIRECT_COPY_FORMATS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "dds"];

/// Subdirectory of the output directory receiving texture files
const TEXTURES_DIR: &str = "textures";

/// Copies or converts texture assets into the output directory.
///
/// Output files keep their full source file name (conversion appends
/// `.png` rather than replacing the extension, so same-stem assets in
/// different formats cannot collide). A file already present at the
/// target path is left untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileMaterializer;

impl FileMaterializer {
    /// Create a materializer
    pub fn new() -> Self {
        Self
    }

    /// Whether the asset format can be copied without re-encoding
    fn is_direct_copy(path: &Path) -> bool {
        path.extension()
            .and_then(|extension| extension.to_str())
            .map(|extension| {
                DIRECT_COPY_FORMATS
                    .iter()
                    .any(|supported| extension.eq_ignore_ascii_case(supported))
            })
            .unwrap_or(false)
    }

    fn try_materialize(&self, asset_path: &Path, out_dir: &Path) -> MaterializeResult<String> {
        let filename = asset_path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| MaterializeError::BadAssetPath(asset_path.to_path_buf()))?;

        std::fs::create_dir_all(out_dir.join(TEXTURES_DIR))?;

        if Self::is_direct_copy(asset_path) {
            let url = format!("{TEXTURES_DIR}/{filename}");
            let target = out_dir.join(&url);
            if !target.exists() {
                std::fs::copy(asset_path, &target)?;
            }
            Ok(url)
        } else {
            let url = format!("{TEXTURES_DIR}/{filename}.png");
            let target = out_dir.join(&url);
            if !target.exists() {
                let decoded = image::open(asset_path)?;
                decoded.save_with_format(&target, image::ImageFormat::Png)?;
            }
            Ok(url)
        }
    }
}

impl AssetMaterializer for FileMaterializer {
    fn copy_or_convert(&mut self, asset_path: &Path, out_dir: &Path) -> Option<String> {
        match self.try_materialize(asset_path, out_dir) {
            Ok(url) => {
                debug!(asset = %asset_path.display(), url = %url, "texture materialized");
                Some(url)
            }
            Err(error) => {
                warn!(
                    asset = %asset_path.display(),
                    %error,
                    "texture materialization failed"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    fn write_test_image(path: &Path, format: image::ImageFormat) {
        let image = RgbaImage::from_pixel(2, 2, image::Rgba([200, 100, 50, 255]));
        image::DynamicImage::ImageRgba8(image)
            .save_with_format(path, format)
            .unwrap();
    }

    #[test]
    fn test_supported_format_is_copied() {
        let source_dir = tempfile::tempdir().unwrap();
        let out_dir = tempfile::tempdir().unwrap();
        let asset = source_dir.path().join("bricks.png");
        write_test_image(&asset, image::ImageFormat::Png);

        let url = FileMaterializer::new()
            .copy_or_convert(&asset, out_dir.path())
            .unwrap();
        assert_eq!(url, "textures/bricks.png");
        assert!(out_dir.path().join("textures/bricks.png").exists());
    }

    #[test]
    fn test_unsupported_format_is_converted_to_png() {
        let source_dir = tempfile::tempdir().unwrap();
        let out_dir = tempfile::tempdir().unwrap();
        let asset = source_dir.path().join("bricks.bmp");
        write_test_image(&asset, image::ImageFormat::Bmp);

        let url = FileMaterializer::new()
            .copy_or_convert(&asset, out_dir.path())
            .unwrap();
        // the source extension stays in the name
        assert_eq!(url, "textures/bricks.bmp.png");

        let converted = image::open(out_dir.path().join("textures/bricks.bmp.png")).unwrap();
        assert_eq!(converted.to_rgba8().get_pixel(0, 0).0, [200, 100, 50, 255]);
    }

    #[test]
    fn test_missing_asset_degrades_to_none() {
        let out_dir = tempfile::tempdir().unwrap();
        let url = FileMaterializer::new()
            .copy_or_convert(Path::new("does/not/exist.png"), out_dir.path());
        assert!(url.is_none());
    }

    #[test]
    fn test_existing_target_is_not_rewritten() {
        let source_dir = tempfile::tempdir().unwrap();
        let out_dir = tempfile::tempdir().unwrap();
        let asset = source_dir.path().join("bricks.png");
        write_test_image(&asset, image::ImageFormat::Png);

        let target = out_dir.path().join("textures/bricks.png");
        std::fs::create_dir_all(target.parent().unwrap()).unwrap();
        std::fs::write(&target, b"sentinel").unwrap();

        let url = FileMaterializer::new()
            .copy_or_convert(&asset, out_dir.path())
            .unwrap();
        assert_eq!(url, "textures/bricks.png");
        assert_eq!(std::fs::read(&target).unwrap(), b"sentinel");
    }

    #[test]
    fn test_extension_matching_is_case_insensitive() {
        assert!(FileMaterializer::is_direct_copy(Path::new("a/tex.PNG")));
        assert!(FileMaterializer::is_direct_copy(Path::new("tex.dds")));
        assert!(!FileMaterializer::is_direct_copy(Path::new("tex.tga")));
        assert!(!FileMaterializer::is_direct_copy(Path::new("noext")));
    }
}
