//! Glyphs as normalized SVG icons.

use core::fmt::Write;

use crate::geom::Transform;
use crate::{Font, Glyph, Result};

/// The icon viewport side length.
const VIEW_BOX: f32 = 100.0;

/// Breathing room around glyphs wider or taller than the em square.
const OVERFLOW_SCALE: f32 = 1.1;

/// SVG path precision in decimal digits; enough for a 100×100 box.
const PRECISION: usize = 2;

/// A named glyph, renderable as a standalone SVG document.
#[derive(Clone, Copy, Debug)]
pub struct Icon<'a> {
    font: &'a Font<'a>,
    name: &'a str,
    codepoint: u32,
    glyph: Glyph<'a>,
}

impl<'a> Icon<'a> {
    /// Resolves `codepoint` through the font's character mapping.
    ///
    /// Returns `Ok(None)` when the codepoint has no glyph.
    pub fn new(font: &'a Font<'a>, name: &'a str, codepoint: u32) -> Result<Option<Self>> {
        Ok(font.glyph_by_codepoint(codepoint)?.map(|glyph| Icon {
            font,
            name,
            codepoint,
            glyph,
        }))
    }

    #[inline]
    pub fn name(&self) -> &'a str {
        self.name
    }

    #[inline]
    pub fn codepoint(&self) -> u32 {
        self.codepoint
    }

    #[inline]
    pub fn glyph(&self) -> &Glyph<'a> {
        &self.glyph
    }

    /// Renders the glyph as an SVG document with a 100×100 viewBox.
    ///
    /// The glyph's bounding box is centered in an em-sized square, the
    /// y-axis is flipped (fonts point up, SVG points down) and the
    /// result is scaled to the viewport. Glyphs without contours render
    /// as an empty string.
    pub fn to_svg_string(&self) -> String {
        let bbox = match self.glyph.bbox() {
            Some(bbox) => bbox,
            None => return String::new(),
        };

        // Oversized glyphs get a proportionally larger box instead of
        // being clipped.
        let units_per_em = f32::from(self.font.head().units_per_em).max(1.0);
        let em = units_per_em
            .max(OVERFLOW_SCALE * bbox.width())
            .max(OVERFLOW_SCALE * bbox.height());
        let scale = VIEW_BOX / em;
        let center_x = (bbox.min.x + bbox.max.x) / 2.0;
        let center_y = (bbox.min.y + bbox.max.y) / 2.0;

        let transform = Transform::identity()
            .translate(VIEW_BOX / 2.0, VIEW_BOX / 2.0)
            .scale(scale, -scale)
            .translate(-center_x, -center_y);

        let path = match self.glyph.to_svg_path(Some(transform), false, PRECISION) {
            Ok((path, _)) => path,
            Err(e) => {
                log::warn!("icon {:?} failed to render: {}", self.name, e);
                return String::new();
            }
        };
        if path.is_empty() {
            return String::new();
        }

        let mut svg = String::new();
        svg.push_str("<?xml version=\"1.0\"?>\n");
        svg.push_str("<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 100 100\">\n");
        writeln!(svg, "  <path d=\"{}\"/>", path).unwrap();
        svg.push_str("</svg>\n");
        svg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer;
    use crate::GlyphId;

    #[test]
    fn icon_svg_document() {
        let data = writer::sample_font();
        let font = Font::open(&data).unwrap();
        let icon = Icon::new(&font, "box", 0xE001).unwrap().unwrap();

        assert_eq!(icon.name(), "box");
        assert_eq!(icon.codepoint(), 0xE001);
        assert_eq!(icon.glyph().id(), GlyphId(1));

        // The glyph is a 500-unit square in a 1000-unit em: it maps to
        // the middle half of the viewport, with y flipped.
        assert_eq!(
            icon.to_svg_string(),
            concat!(
                "<?xml version=\"1.0\"?>\n",
                "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 100 100\">\n",
                "  <path d=\"M25.00,75.00L75.00,75.00L75.00,25.00L25.00,25.00Z\"/>\n",
                "</svg>\n"
            )
        );
    }

    #[test]
    fn unmapped_codepoint() {
        let data = writer::sample_font();
        let font = Font::open(&data).unwrap();
        assert!(Icon::new(&font, "nope", 0x41).unwrap().is_none());
    }

    #[test]
    fn blank_glyph_renders_empty() {
        let data = writer::sample_font();
        let font = Font::open(&data).unwrap();
        // Codepoint 0xE003 maps to the blank glyph 0.
        let icon = Icon::new(&font, "blank", 0xE003).unwrap().unwrap();
        assert_eq!(icon.to_svg_string(), "");
    }
}
