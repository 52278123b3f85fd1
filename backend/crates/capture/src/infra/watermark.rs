//! Caption watermark rendering.
//!
//! Darkens a band across the bottom of the photo and draws the caption in
//! white on top of it, then re-encodes as JPEG.
//!
//! Blending is done in integer arithmetic, so the same input bytes, caption
//! and font always produce the same output bytes.

use std::path::{Path, PathBuf};

use ab_glyph::{Font, FontArc, PxScale, ScaleFont, point};
use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, ImageEncoder, RgbImage};

use crate::domain::repository::WatermarkRenderer;
use crate::error::RenderError;

/// Minimum band height in pixels
pub const MIN_BAND_HEIGHT: u32 = 40;
/// Band height as a percentage of the image height
pub const BAND_HEIGHT_PERCENT: u32 = 6;
/// Alpha of the black band overlay
pub const BAND_ALPHA: u32 = 110;
/// Alpha of the caption text at full glyph coverage
pub const TEXT_ALPHA: f32 = 230.0;
/// Caption font size in pixels
pub const FONT_PX: u32 = 24;
/// Left margin of the caption
pub const TEXT_MARGIN: u32 = 10;
/// Output JPEG quality
pub const JPEG_QUALITY: u8 = 90;

/// Searched in order when no font path is configured
pub const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/local/share/fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
];

/// Load the caption font.
///
/// An explicit path wins when it loads; otherwise the first readable
/// system candidate is used. `None` means watermarking will always fall
/// back to the original image.
pub fn discover_font(explicit: Option<&Path>) -> Option<(PathBuf, FontArc)> {
    if let Some(path) = explicit {
        match load_font(path) {
            Ok(font) => return Some((path.to_path_buf(), font)),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Configured watermark font unusable, trying system fonts"
                );
            }
        }
    }

    SYSTEM_FONT_CANDIDATES.iter().find_map(|candidate| {
        let path = Path::new(candidate);
        load_font(path).ok().map(|font| (path.to_path_buf(), font))
    })
}

fn load_font(path: &Path) -> Result<FontArc, String> {
    let data = std::fs::read(path).map_err(|e| e.to_string())?;
    FontArc::try_from_vec(data).map_err(|e| e.to_string())
}

/// Height of the caption band for an image `height` pixels tall
pub fn band_height(height: u32) -> u32 {
    (height * BAND_HEIGHT_PERCENT / 100)
        .max(MIN_BAND_HEIGHT)
        .min(height)
}

/// `fg` over `bg` at `alpha` (0..=255), rounded
#[inline]
fn blend(bg: u8, fg: u8, alpha: u32) -> u8 {
    ((fg as u32 * alpha + bg as u32 * (255 - alpha) + 127) / 255) as u8
}

/// Darken the bottom band in place. Returns `(band_y, band_h)`.
pub fn darken_band(image: &mut RgbImage) -> (u32, u32) {
    let (width, height) = image.dimensions();
    let band_h = band_height(height);
    let band_y = height - band_h;

    for y in band_y..height {
        for x in 0..width {
            let pixel = image.get_pixel_mut(x, y);
            for channel in pixel.0.iter_mut() {
                *channel = blend(*channel, 0, BAND_ALPHA);
            }
        }
    }

    (band_y, band_h)
}

fn draw_caption(image: &mut RgbImage, font: &FontArc, caption: &str, band_y: u32, band_h: u32) {
    let (width, height) = image.dimensions();
    let scale = PxScale::from(FONT_PX as f32);
    let scaled_font = font.as_scaled(scale);

    // Text box top, centered in the band; may sit above the band on short images
    let top = band_y as i64 + (band_h as i64 - FONT_PX as i64).div_euclid(2);
    let baseline_y = top as f32 + scaled_font.ascent();

    let mut cursor_x = TEXT_MARGIN as f32;
    let mut prev_glyph: Option<ab_glyph::GlyphId> = None;

    for c in caption.chars() {
        let glyph_id = scaled_font.glyph_id(c);

        if let Some(prev) = prev_glyph {
            cursor_x += scaled_font.kern(prev, glyph_id);
        }

        let glyph = glyph_id.with_scale_and_position(scale, point(cursor_x, baseline_y));

        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();

            outlined.draw(|px, py, coverage| {
                let x = px as i64 + bounds.min.x as i64;
                let y = py as i64 + bounds.min.y as i64;

                if x >= 0 && y >= 0 && x < width as i64 && y < height as i64 {
                    let alpha = (coverage.clamp(0.0, 1.0) * TEXT_ALPHA).round() as u32;
                    let pixel = image.get_pixel_mut(x as u32, y as u32);
                    for channel in pixel.0.iter_mut() {
                        *channel = blend(*channel, 255, alpha);
                    }
                }
            });
        }

        cursor_x += scaled_font.h_advance(glyph_id);
        prev_glyph = Some(glyph_id);

        if cursor_x >= width as f32 {
            break;
        }
    }
}

/// Encode RGB pixels as a baseline JPEG
pub fn encode_jpeg(image: &RgbImage) -> Result<Vec<u8>, RenderError> {
    let (width, height) = image.dimensions();
    let mut output = Vec::new();

    JpegEncoder::new_with_quality(&mut output, JPEG_QUALITY)
        .write_image(image.as_raw(), width, height, ColorType::Rgb8)
        .map_err(|e| RenderError::Encode(e.to_string()))?;

    Ok(output)
}

/// Watermark renderer drawing the caption with a TrueType font
#[derive(Clone)]
pub struct TextWatermarkRenderer {
    font: Option<FontArc>,
}

impl TextWatermarkRenderer {
    pub fn new(font: Option<FontArc>) -> Self {
        Self { font }
    }

    /// Renderer that always fails, so uploads keep the original
    pub fn without_font() -> Self {
        Self { font: None }
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }
}

impl WatermarkRenderer for TextWatermarkRenderer {
    fn render(&self, original: &[u8], caption: &str) -> Result<Vec<u8>, RenderError> {
        let font = self.font.as_ref().ok_or(RenderError::FontUnavailable)?;

        let mut image = image::load_from_memory(original)
            .map_err(|e| RenderError::Decode(e.to_string()))?
            .to_rgb8();
        if image.width() == 0 || image.height() == 0 {
            return Err(RenderError::Decode("empty image".to_string()));
        }

        let (band_y, band_h) = darken_band(&mut image);
        draw_caption(&mut image, font, caption, band_y, band_h);

        encode_jpeg(&image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_band_height() {
        assert_eq!(band_height(480), 40);
        assert_eq!(band_height(1000), 60);
        assert_eq!(band_height(1080), 64);
        assert_eq!(band_height(30), 30);
        assert_eq!(band_height(40), 40);
    }

    #[test]
    fn test_blend_rounding() {
        assert_eq!(blend(200, 0, 0), 200);
        assert_eq!(blend(200, 0, 255), 0);
        assert_eq!(blend(255, 0, BAND_ALPHA), 145);
        assert_eq!(blend(0, 255, 230), 230);
    }

    #[test]
    fn test_darken_band_only_touches_bottom_rows() {
        let mut image = RgbImage::from_pixel(20, 100, Rgb([200, 200, 200]));

        let (band_y, band_h) = darken_band(&mut image);

        assert_eq!((band_y, band_h), (60, 40));
        assert_eq!(image.get_pixel(5, 59), &Rgb([200, 200, 200]));
        let darkened = blend(200, 0, BAND_ALPHA);
        assert_eq!(image.get_pixel(5, 60), &Rgb([darkened; 3]));
        assert_eq!(image.get_pixel(19, 99), &Rgb([darkened; 3]));
    }

    #[test]
    fn test_render_without_font_fails() {
        let renderer = TextWatermarkRenderer::without_font();
        assert!(!renderer.has_font());
        assert!(matches!(
            renderer.render(b"whatever", "caption"),
            Err(RenderError::FontUnavailable)
        ));
    }

    #[test]
    fn test_discover_font_with_missing_explicit_path() {
        // Falls through to system fonts; either outcome is fine, it must not panic
        let _ = discover_font(Some(Path::new("/nonexistent/font.ttf")));
    }
}
