// https://docs.microsoft.com/en-us/typography/opentype/spec/hmtx

use crate::parser::Stream;
use crate::{GlyphId, Result};

#[derive(Clone, Copy, Debug)]
struct Metric {
    advance: u16,
    side_bearing: i16,
}

/// Decoded horizontal metrics.
///
/// The font stores one full record per glyph up to `hhea.numberOfHMetrics`;
/// remaining glyphs share the last advance and carry only a side bearing.
#[derive(Clone, Debug)]
pub struct Table {
    metrics: Vec<Metric>,
    trailing: Vec<i16>,
}

impl Table {
    pub fn parse(data: &[u8], number_of_metrics: u16, glyph_count: u16) -> Result<Self> {
        let mut s = Stream::new(data);

        let mut metrics = Vec::with_capacity(usize::from(number_of_metrics));
        for _ in 0..number_of_metrics {
            metrics.push(Metric {
                advance: s.read()?,
                side_bearing: s.read()?,
            });
        }

        let trailing_count = glyph_count.saturating_sub(number_of_metrics);
        let mut trailing = Vec::with_capacity(usize::from(trailing_count));
        for _ in 0..trailing_count {
            trailing.push(s.read()?);
        }

        Ok(Table { metrics, trailing })
    }

    pub fn advance(&self, glyph_id: GlyphId) -> Option<u16> {
        match self.metrics.get(usize::from(glyph_id.0)) {
            Some(metric) => Some(metric.advance),
            None if usize::from(glyph_id.0) < self.metrics.len() + self.trailing.len() => {
                self.metrics.last().map(|metric| metric.advance)
            }
            None => None,
        }
    }

    pub fn side_bearing(&self, glyph_id: GlyphId) -> Option<i16> {
        match self.metrics.get(usize::from(glyph_id.0)) {
            Some(metric) => Some(metric.side_bearing),
            None => self
                .trailing
                .get(usize::from(glyph_id.0) - self.metrics.len())
                .copied(),
        }
    }
}
