// https://docs.microsoft.com/en-us/typography/opentype/spec/head

use crate::parser::Stream;
use crate::{Error, Rect, Result};

const MAGIC_NUMBER: u32 = 0x5F0F3CF5;

/// The `loca` table offset encoding, from `head.indexToLocFormat`.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum IndexToLocationFormat {
    Short,
    Long,
}

/// A decoded font header.
#[derive(Clone, Copy, Debug)]
pub struct Table {
    pub revision: f32,
    pub flags: u16,
    pub units_per_em: u16,
    /// Unix timestamps.
    pub created: i64,
    pub modified: i64,
    pub bbox: Rect,
    pub mac_style: u16,
    pub lowest_rec_ppem: u16,
    pub font_direction_hint: i16,
    pub index_to_loc_format: IndexToLocationFormat,
    pub glyph_data_format: i16,
}

impl Table {
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut s = Stream::new(data);
        s.skip::<u16>(); // majorVersion
        s.skip::<u16>(); // minorVersion
        let revision = s.read_fixed()?;
        s.skip::<u32>(); // checksumAdjustment

        if s.read::<u32>()? != MAGIC_NUMBER {
            return Err(Error::Malformed("invalid head.magicNumber"));
        }

        let flags = s.read()?;
        let units_per_em = s.read()?;
        let created = s.read_long_date()?;
        let modified = s.read_long_date()?;
        let bbox = Rect {
            x_min: s.read()?,
            y_min: s.read()?,
            x_max: s.read()?,
            y_max: s.read()?,
        };
        let mac_style = s.read()?;
        let lowest_rec_ppem = s.read()?;
        let font_direction_hint = s.read()?;
        let index_to_loc_format = match s.read::<i16>()? {
            0 => IndexToLocationFormat::Short,
            1 => IndexToLocationFormat::Long,
            _ => return Err(Error::Malformed("invalid head.indexToLocFormat")),
        };
        let glyph_data_format = s.read()?;

        Ok(Table {
            revision,
            flags,
            units_per_em,
            created,
            modified,
            bbox,
            mac_style,
            lowest_rec_ppem,
            font_direction_hint,
            index_to_loc_format,
            glyph_data_format,
        })
    }
}
