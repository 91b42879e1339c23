use eframe::egui::{self, ColorImage, Vec2};
use image::imageops::FilterType;
use image::DynamicImage;
use std::path::Path;
use tracing::{debug, error};

use crate::core::decode_image;
use crate::state::DisplayImage;

/// Image preparation and layout helpers for the two image boxes
pub struct ImageRenderer;

impl ImageRenderer {
    /// Calculate the scaling factor to fit an image within the available space
    /// while maintaining aspect ratio and not exceeding 1.0 (no upscaling)
    pub fn calculate_image_scale(img_size: Vec2, available_size: Vec2) -> f32 {
        (available_size.x / img_size.x)
            .min(available_size.y / img_size.y)
            .min(1.0)
    }

    /// Shrink `img` to fit a `max_side` square, keeping aspect ratio.
    /// Smaller images are returned unchanged.
    pub fn thumbnail(img: DynamicImage, max_side: u32) -> DynamicImage {
        if img.width() <= max_side && img.height() <= max_side {
            return img;
        }
        img.resize(max_side, max_side, FilterType::Lanczos3)
    }

    pub fn to_color_image(img: &DynamicImage) -> ColorImage {
        let rgba = img.to_rgba8();
        let size = [rgba.width() as usize, rgba.height() as usize];
        ColorImage::from_rgba_unmultiplied(size, rgba.as_flat_samples().as_slice())
    }

    /// Decode `path` and upload it as a texture named `name`.
    /// Load failures are kept on the returned image instead of propagated.
    pub fn load(ctx: &egui::Context, path: &Path, name: &str, max_side: u32) -> DisplayImage {
        debug!("Loading {:?} for display", path);
        match decode_image(path) {
            Ok(img) => {
                let color_image = Self::to_color_image(&Self::thumbnail(img, max_side));
                let texture = ctx.load_texture(name, color_image, egui::TextureOptions::LINEAR);
                DisplayImage {
                    path: path.to_path_buf(),
                    texture: Some(texture),
                    load_error: None,
                }
            }
            Err(e) => {
                error!("Error displaying image {:?}: {}", path, e);
                DisplayImage {
                    path: path.to_path_buf(),
                    texture: None,
                    load_error: Some(e.to_string()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_never_upscales() {
        let scale = ImageRenderer::calculate_image_scale(Vec2::new(100.0, 50.0), Vec2::new(900.0, 900.0));
        assert_eq!(scale, 1.0);
    }

    #[test]
    fn test_scale_fits_limiting_side() {
        let scale = ImageRenderer::calculate_image_scale(Vec2::new(1800.0, 900.0), Vec2::new(900.0, 900.0));
        assert_eq!(scale, 0.5);
    }

    #[test]
    fn test_thumbnail_keeps_aspect_ratio() {
        let img = DynamicImage::new_rgb8(2000, 1000);
        let thumb = ImageRenderer::thumbnail(img, 900);
        assert_eq!((thumb.width(), thumb.height()), (900, 450));
    }

    #[test]
    fn test_thumbnail_leaves_small_images_alone() {
        let img = DynamicImage::new_rgb8(300, 200);
        let thumb = ImageRenderer::thumbnail(img, 900);
        assert_eq!((thumb.width(), thumb.height()), (300, 200));
    }

    #[test]
    fn test_load_uses_content_not_extension() {
        let dir = tempfile::tempdir().unwrap();
        let mislabelled = dir.path().join("photo.jpg");
        image::RgbImage::from_pixel(1200, 600, image::Rgb([200, 10, 10]))
            .save_with_format(&mislabelled, image::ImageFormat::Png)
            .unwrap();
        let ctx = egui::Context::default();

        let loaded = ImageRenderer::load(&ctx, &mislabelled, "left_image", 900);

        assert!(loaded.load_error.is_none());
        let texture = loaded.texture.expect("texture for mislabelled png");
        assert_eq!(texture.size(), [900, 450]);
    }

    #[test]
    fn test_load_keeps_error_for_undecodable_file() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.png");
        std::fs::write(&broken, "not an image").unwrap();
        let ctx = egui::Context::default();

        let loaded = ImageRenderer::load(&ctx, &broken, "right_image", 900);

        assert!(loaded.texture.is_none());
        assert!(loaded.load_error.is_some());
        assert_eq!(loaded.path, broken);
    }

    #[test]
    fn test_color_image_size() {
        let img = DynamicImage::new_rgba8(7, 3);
        let color = ImageRenderer::to_color_image(&img);
        assert_eq!(color.size, [7, 3]);
    }
}
