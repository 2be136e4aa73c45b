//! Mask rendering and the final image commit

use std::io::Cursor;
use std::ops::AddAssign;
use std::path::Path;

use image::{ColorType, DynamicImage, ImageFormat, ImageReader, Rgba, RgbaImage, imageops};
use imageproc::drawing::draw_line_segment_mut;
use maskit_core::{DetectionLine, MaskError, MaskRegion, RenderStyle, Result};
use tracing::{debug, info};

use crate::geometry::project;
use crate::locator::locate;

/// Side length in pixels of one asterisk in the overlay pattern
const GLYPH_CELL: u32 = 10;

/// Counters for what a render call painted or skipped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub regions: usize,
    pub excluded: usize,
}

impl AddAssign for RenderStats {
    fn add_assign(&mut self, other: Self) {
        self.regions += other.regions;
        self.excluded += other.excluded;
    }
}

/// Paints opaque overlays over keyword occurrences
pub struct MaskRenderer {
    style: RenderStyle,
    /// Lowercased exclude words
    exclude_words: Vec<String>,
}

impl MaskRenderer {
    pub fn new(style: RenderStyle, exclude_words: &[String]) -> Self {
        Self {
            style,
            exclude_words: exclude_words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// Whether `keyword` matches an exclude word, ignoring case
    pub fn is_excluded(&self, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();
        self.exclude_words.iter().any(|word| *word == keyword)
    }

    /// Regions to paint for `line` on a canvas of the given size
    pub fn regions(
        &self,
        line: &DetectionLine,
        image_width: u32,
        image_height: u32,
    ) -> Vec<MaskRegion> {
        let text_len = line.char_len();
        let mut regions = Vec::new();

        for keyword in &line.keywords {
            if self.is_excluded(keyword) {
                debug!(keyword = %keyword, "Keyword is in the exclude list, not masking it");
                continue;
            }

            debug!(keyword = %keyword, text = %line.text, "Masking keyword");
            let keyword_len = keyword.chars().count();
            regions.extend(locate(keyword, &line.text).into_iter().filter_map(|index| {
                project(
                    &line.bounding_box,
                    text_len,
                    keyword_len,
                    index,
                    image_width,
                    image_height,
                )
            }));
        }

        regions
    }

    /// Mask every non-excluded keyword occurrence of one line
    pub fn render_line(&self, image: &mut RgbaImage, line: &DetectionLine) -> RenderStats {
        let (width, height) = image.dimensions();
        let regions = self.regions(line, width, height);
        for region in &regions {
            self.paint(image, region);
        }

        RenderStats {
            regions: regions.len(),
            excluded: line.keywords.iter().filter(|k| self.is_excluded(k)).count(),
        }
    }

    /// Mask every line that carries keywords, in order
    pub fn render<'a, I>(&self, image: &mut RgbaImage, lines: I) -> RenderStats
    where
        I: IntoIterator<Item = &'a DetectionLine>,
    {
        let mut stats = RenderStats::default();
        for line in lines.into_iter().filter(|line| line.has_keywords()) {
            stats += self.render_line(image, line);
        }
        stats
    }

    /// Cover one region: crop it, lay the overlay on the crop, paste it back
    pub fn paint(&self, image: &mut RgbaImage, region: &MaskRegion) {
        if region.is_empty() {
            return;
        }

        let mut area = imageops::crop_imm(
            &*image,
            region.left,
            region.top,
            region.width(),
            region.height(),
        )
        .to_image();
        let patch = overlay(self.style, area.width(), area.height());
        imageops::replace(&mut area, &patch, 0, 0);
        imageops::replace(image, &area, i64::from(region.left), i64::from(region.top));
    }
}

/// Opaque patch filled per `style` and covered with an asterisk pattern
pub fn overlay(style: RenderStyle, width: u32, height: u32) -> RgbaImage {
    let [r, g, b] = style.fill();
    let mut patch = RgbaImage::from_pixel(width, height, Rgba([r, g, b, 255]));

    let [r, g, b] = style.pattern();
    let stroke = Rgba([r, g, b, 255]);
    for y in (0..height).step_by(GLYPH_CELL as usize) {
        for x in (0..width).step_by(GLYPH_CELL as usize) {
            draw_asterisk(&mut patch, x, y, stroke);
        }
    }

    patch
}

fn draw_asterisk(canvas: &mut RgbaImage, x: u32, y: u32, color: Rgba<u8>) {
    let (x0, y0) = (x as f32 + 2.0, y as f32 + 2.0);
    let (x1, y1) = (
        (x + GLYPH_CELL) as f32 - 3.0,
        (y + GLYPH_CELL) as f32 - 3.0,
    );
    let cx = (x0 + x1) / 2.0;

    draw_line_segment_mut(canvas, (cx, y0), (cx, y1), color);
    draw_line_segment_mut(canvas, (x0, y0), (x1, y1), color);
    draw_line_segment_mut(canvas, (x0, y1), (x1, y0), color);
}

/// Decode image bytes, detecting the raster format from their content
pub fn decode(bytes: &[u8]) -> Result<(DynamicImage, ImageFormat)> {
    let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    let format = reader
        .format()
        .ok_or_else(|| MaskError::Other(anyhow::anyhow!("Unrecognized image format")))?;
    let image = reader.decode()?;
    Ok((image, format))
}

/// Encode the painted canvas and write it to `path` in a single write.
///
/// The canvas is converted back to `color` first so the output keeps the
/// source image's pixel layout.
pub fn commit(canvas: RgbaImage, color: ColorType, format: ImageFormat, path: &Path) -> Result<()> {
    let image = restore_color(canvas, color);

    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), format)?;

    info!("Saving masked image to {}", path.display());
    std::fs::write(path, bytes)?;
    Ok(())
}

fn restore_color(canvas: RgbaImage, color: ColorType) -> DynamicImage {
    let image = DynamicImage::ImageRgba8(canvas);
    match color {
        ColorType::L8 => DynamicImage::ImageLuma8(image.to_luma8()),
        ColorType::La8 => DynamicImage::ImageLumaA8(image.to_luma_alpha8()),
        ColorType::Rgb8 => DynamicImage::ImageRgb8(image.to_rgb8()),
        ColorType::L16 => DynamicImage::ImageLuma16(image.to_luma16()),
        ColorType::La16 => DynamicImage::ImageLumaA16(image.to_luma_alpha16()),
        ColorType::Rgb16 => DynamicImage::ImageRgb16(image.to_rgb16()),
        ColorType::Rgba16 => DynamicImage::ImageRgba16(image.to_rgba16()),
        _ => image,
    }
}
