// https://docs.microsoft.com/en-us/typography/opentype/spec/cmap

use rustc_hash::FxHashMap;

use crate::parser::{Stream, TrySlice};
use crate::{Error, GlyphId, Result};

/// Decoded character mappings, both directions.
///
/// The forward map answers codepoint lookups; the reverse map lets the
/// icon browser find the codepoint behind a named glyph. When several
/// codepoints share a glyph the last one wins on the reverse side.
#[derive(Clone, Default, Debug)]
pub struct Table {
    to_glyph: FxHashMap<u32, u16>,
    to_codepoint: FxHashMap<u16, u32>,
}

impl Table {
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut s = Stream::new(data);
        s.skip::<u16>(); // version
        let count: u16 = s.read()?;

        // A Unicode-platform subtable, by preference: the full-repertoire
        // encoding wins over BMP-only.
        let mut best: Option<(u8, u32)> = None;
        for _ in 0..count {
            let platform_id: u16 = s.read()?;
            let encoding_id: u16 = s.read()?;
            let offset: u32 = s.read()?;

            let rank = match (platform_id, encoding_id) {
                (0, 4) => 0,
                (0, 3) => 1,
                _ => continue,
            };

            if best.map_or(true, |(best_rank, _)| rank < best_rank) {
                best = Some((rank, offset));
            }
        }

        let (_, offset) = best.ok_or(Error::UnsupportedFormat)?;
        let subtable = data.try_slice(offset as usize..data.len())?;

        let mut table = Table::default();
        let format: u16 = Stream::read_at(subtable, 0)?;
        match format {
            4 => table.parse_format4(subtable)?,
            12 => table.parse_format12(subtable)?,
            _ => return Err(Error::UnsupportedFormat),
        }

        Ok(table)
    }

    // Format 4: segment mapping to delta values.
    fn parse_format4(&mut self, data: &[u8]) -> Result<()> {
        let mut s = Stream::new(data);
        s.skip::<u16>(); // format
        let length = usize::from(s.read::<u16>()?);
        // The subtable body is bounded by its own length field.
        let mut s = s.view(0, length);
        s.advance(4); // format + length
        s.skip::<u16>(); // language
        let seg_count = s.read::<u16>()? / 2;
        s.advance(6); // searchRange + entrySelector + rangeShift

        let end_codes = s.read_array::<u16>(seg_count)?;
        s.skip::<u16>(); // reservedPad
        let start_codes = s.read_array::<u16>(seg_count)?;
        let id_deltas = s.read_array::<i16>(seg_count)?;
        let id_range_offsets = s.read_array::<u16>(seg_count)?;

        for i in 0..seg_count {
            let start = start_codes.get(i).ok_or(Error::Truncated)?;
            let end = end_codes.get(i).ok_or(Error::Truncated)?;
            if start == 0xFFFF && end == 0xFFFF {
                continue;
            }

            let id_range_offset = id_range_offsets.get(i).ok_or(Error::Truncated)?;
            if id_range_offset != 0 {
                // Glyph-index-array segments are not used by the icon
                // fonts this crate targets.
                log::warn!(
                    "cmap format 4 segment {}..{} with idRangeOffset {} skipped",
                    start,
                    end,
                    id_range_offset
                );
                continue;
            }

            let id_delta = id_deltas.get(i).ok_or(Error::Truncated)?;
            for code_point in start..=end {
                let glyph_id = code_point.wrapping_add(id_delta as u16);
                self.insert(u32::from(code_point), glyph_id);
            }
        }

        Ok(())
    }

    // Format 12: segmented coverage.
    fn parse_format12(&mut self, data: &[u8]) -> Result<()> {
        let mut s = Stream::new(data);
        s.skip::<u16>(); // format
        s.skip::<u16>(); // reserved
        s.skip::<u32>(); // length
        s.skip::<u32>(); // language
        let count: u32 = s.read()?;

        for _ in 0..count {
            let start_char_code: u32 = s.read()?;
            let end_char_code: u32 = s.read()?;
            let start_glyph_id: u32 = s.read()?;

            for code_point in start_char_code..=end_char_code {
                let glyph_id = start_glyph_id + (code_point - start_char_code);
                self.insert(code_point, glyph_id as u16);
            }
        }

        Ok(())
    }

    fn insert(&mut self, code_point: u32, glyph_id: u16) {
        self.to_glyph.insert(code_point, glyph_id);
        self.to_codepoint.insert(glyph_id, code_point);
    }

    pub fn glyph_index(&self, code_point: u32) -> Option<GlyphId> {
        self.to_glyph.get(&code_point).map(|id| GlyphId(*id))
    }

    pub fn codepoint(&self, glyph_id: GlyphId) -> Option<u32> {
        self.to_codepoint.get(&glyph_id.0).copied()
    }

    pub fn len(&self) -> usize {
        self.to_glyph.len()
    }
}
