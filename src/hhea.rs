// https://docs.microsoft.com/en-us/typography/opentype/spec/hhea

use crate::parser::Stream;
use crate::Result;

/// A decoded horizontal header.
#[derive(Clone, Copy, Debug)]
pub struct Table {
    pub ascender: i16,
    pub descender: i16,
    pub line_gap: i16,
    pub advance_width_max: u16,
    pub min_left_side_bearing: i16,
    pub min_right_side_bearing: i16,
    pub x_max_extent: i16,
    pub caret_slope_rise: i16,
    pub caret_slope_run: i16,
    pub caret_offset: i16,
    pub number_of_metrics: u16,
}

impl Table {
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut s = Stream::new(data);
        s.skip::<u32>(); // version
        let ascender = s.read()?;
        let descender = s.read()?;
        let line_gap = s.read()?;
        let advance_width_max = s.read()?;
        let min_left_side_bearing = s.read()?;
        let min_right_side_bearing = s.read()?;
        let x_max_extent = s.read()?;
        let caret_slope_rise = s.read()?;
        let caret_slope_run = s.read()?;
        let caret_offset = s.read()?;
        s.advance(10); // 4 reserved values + metricDataFormat (always 0)
        let number_of_metrics = s.read()?;

        Ok(Table {
            ascender,
            descender,
            line_gap,
            advance_width_max,
            min_left_side_bearing,
            min_right_side_bearing,
            x_max_extent,
            caret_slope_rise,
            caret_slope_run,
            caret_offset,
            number_of_metrics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::{self, TtfType::*};

    #[test]
    fn parse() {
        let data = writer::convert(&[
            UInt32(0x00010000), // version
            Int16(800), // ascender
            Int16(-200), // descender
            Int16(90), // lineGap
            UInt16(1000), // advanceWidthMax
            Int16(10), // minLeftSideBearing
            Int16(10), // minRightSideBearing
            Int16(900), // xMaxExtent
            Int16(1), // caretSlopeRise
            Int16(0), // caretSlopeRun
            Int16(0), // caretOffset
            Int16(0), // reserved
            Int16(0), // reserved
            Int16(0), // reserved
            Int16(0), // reserved
            Int16(0), // metricDataFormat
            UInt16(3), // numberOfHMetrics
        ]);

        let table = Table::parse(&data).unwrap();
        assert_eq!(table.ascender, 800);
        assert_eq!(table.descender, -200);
        assert_eq!(table.number_of_metrics, 3);
    }
}
