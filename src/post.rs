// https://docs.microsoft.com/en-us/typography/opentype/spec/post

use rustc_hash::FxHashMap;

use crate::parser::Stream;
use crate::{GlyphId, Result};

/// The number of standard Macintosh glyph names.
///
/// Only fonts carrying their own (non-standard) names are interesting
/// here: icon fonts name every glyph after the icon it draws.
const STANDARD_NAMES: u16 = 258;

/// Decoded PostScript glyph names, version 2.0 only.
///
/// Any other `post` version decodes to an empty table.
#[derive(Clone, Default, Debug)]
pub struct Table {
    names: FxHashMap<u16, String>,
}

impl Table {
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut s = Stream::new(data);
        let version = s.read_fixed()?;
        if version != 2.0 {
            return Ok(Table::default());
        }

        // italicAngle .. maxMemType1
        s.advance(28);

        let count: u16 = s.read()?;
        let mut mapping = Vec::new();
        let mut max_index = 0u16;
        for id in 0..count {
            let name_index: u16 = s.read()?;
            if name_index > STANDARD_NAMES {
                let index = name_index - STANDARD_NAMES;
                max_index = max_index.max(index);
                mapping.push((id, index));
            }
        }

        if mapping.is_empty() {
            return Ok(Table::default());
        }

        let mut strings = Vec::with_capacity(usize::from(max_index) + 1);
        for _ in 0..=max_index {
            let length = usize::from(s.read::<u8>()?);
            strings.push(s.read_string(length)?);
        }

        let mut names = FxHashMap::default();
        for (id, index) in mapping {
            if let Some(name) = strings.get(usize::from(index)) {
                names.insert(id, (*name).to_string());
            }
        }

        Ok(Table { names })
    }

    pub fn name(&self, glyph_id: GlyphId) -> Option<&str> {
        self.names.get(&glyph_id.0).map(String::as_str)
    }

    /// All named glyphs, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = (GlyphId, &str)> {
        self.names
            .iter()
            .map(|(id, name)| (GlyphId(*id), name.as_str()))
    }
}
