// https://docs.microsoft.com/en-us/typography/opentype/spec/loca

use crate::head::IndexToLocationFormat;
use crate::parser::Stream;
use crate::{Error, GlyphId, Result};

/// Decoded glyph locations: `glyph_count + 1` byte offsets into `glyf`.
#[derive(Clone, Debug)]
pub struct Table {
    offsets: Vec<u32>,
}

impl Table {
    pub fn parse(data: &[u8], glyph_count: u16, format: IndexToLocationFormat) -> Result<Self> {
        let total = u32::from(glyph_count) + 1;

        let mut s = Stream::new(data);
        let mut offsets = Vec::with_capacity(total as usize);
        for _ in 0..total {
            let offset = match format {
                // 'The actual local offset divided by 2 is stored.'
                IndexToLocationFormat::Short => u32::from(s.read::<u16>()?) * 2,
                IndexToLocationFormat::Long => s.read::<u32>()?,
            };

            if let Some(prev) = offsets.last() {
                if *prev > offset {
                    return Err(Error::Malformed("loca offsets are not ascending"));
                }
            }

            offsets.push(offset);
        }

        Ok(Table { offsets })
    }

    /// The `glyf` byte range of a glyph. Empty for blank glyphs.
    pub fn glyph_range(&self, glyph_id: GlyphId) -> Option<core::ops::Range<usize>> {
        let start = *self.offsets.get(usize::from(glyph_id.0))? as usize;
        let end = *self.offsets.get(usize::from(glyph_id.0) + 1)? as usize;
        Some(start..end)
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::{self, TtfType::*};

    #[test]
    fn short_offsets_are_scaled() {
        let data = writer::convert(&[
            UInt16(0), // offset [0]
            UInt16(10), // offset [1]
            UInt16(10), // offset [2]
            UInt16(24), // offset [3]
        ]);

        let table = Table::parse(&data, 3, IndexToLocationFormat::Short).unwrap();
        assert_eq!(table.glyph_range(GlyphId(0)), Some(0..20));
        // An empty slot marks a blank glyph.
        assert_eq!(table.glyph_range(GlyphId(1)), Some(20..20));
        assert_eq!(table.glyph_range(GlyphId(2)), Some(20..48));
        assert_eq!(table.glyph_range(GlyphId(3)), None);
    }

    #[test]
    fn long_offsets() {
        let data = writer::convert(&[
            UInt32(0), // offset [0]
            UInt32(100), // offset [1]
        ]);

        let table = Table::parse(&data, 1, IndexToLocationFormat::Long).unwrap();
        assert_eq!(table.glyph_range(GlyphId(0)), Some(0..100));
    }

    #[test]
    fn descending_offsets() {
        let data = writer::convert(&[
            UInt16(10), // offset [0]
            UInt16(0), // offset [1]
        ]);

        assert!(matches!(
            Table::parse(&data, 1, IndexToLocationFormat::Short),
            Err(Error::Malformed(_))
        ));
    }

    #[test]
    fn truncated() {
        let data = writer::convert(&[UInt16(0)]);
        assert_eq!(
            Table::parse(&data, 1, IndexToLocationFormat::Short).unwrap_err(),
            Error::Truncated
        );
    }
}
