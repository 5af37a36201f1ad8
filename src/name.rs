// https://docs.microsoft.com/en-us/typography/opentype/spec/name

use crate::parser::{LazyArray16, Stream, TrySlice};
use crate::Result;

const WINDOWS_PLATFORM_ID: u16 = 3;
const ENGLISH_US_LANGUAGE_ID: u16 = 1033;

/// Decoded naming table, reduced to the Windows/English records used for
/// display.
///
/// Fields missing from the font stay empty.
#[derive(Clone, Default, Debug)]
pub struct Table {
    pub copyright: String,
    pub family: String,
    pub subfamily: String,
    pub font_id: String,
    pub full_name: String,
    pub version: String,
}

impl Table {
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut s = Stream::new(data);
        s.skip::<u16>(); // version
        let count: u16 = s.read()?;
        let storage_offset = usize::from(s.read::<u16>()?);

        let mut table = Table::default();
        for _ in 0..count {
            let platform_id: u16 = s.read()?;
            s.skip::<u16>(); // encodingId
            let language_id: u16 = s.read()?;
            let name_id: u16 = s.read()?;
            let length = usize::from(s.read::<u16>()?);
            let offset = usize::from(s.read::<u16>()?);

            if platform_id != WINDOWS_PLATFORM_ID || language_id != ENGLISH_US_LANGUAGE_ID {
                continue;
            }

            let field = match name_id {
                0 => &mut table.copyright,
                1 => &mut table.family,
                2 => &mut table.subfamily,
                3 => &mut table.font_id,
                4 => &mut table.full_name,
                5 => &mut table.version,
                _ => continue,
            };

            let start = storage_offset + offset;
            let name = data.try_slice(start..start + length)?;
            if let Some(name) = from_utf16_be(name) {
                *field = name;
            }
        }

        Ok(table)
    }
}

// Name strings are stored as UTF-16BE and have to be re-encoded.
fn from_utf16_be(data: &[u8]) -> Option<String> {
    let mut name: Vec<u16> = Vec::with_capacity(data.len() / 2);
    for unit in LazyArray16::<u16>::new(data) {
        name.push(unit);
    }

    String::from_utf16(&name).ok()
}
