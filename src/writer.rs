//! A TrueType font building helper for tests.

#[derive(Clone, Copy, Debug)]
#[allow(dead_code)]
pub enum TtfType {
    Raw(&'static [u8]),
    TrueTypeMagic,
    OpenTypeMagic,
    Int8(i8),
    UInt8(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    Fixed(f32),
    F2Dot14(f32),
    PascalString(&'static str),
}

pub fn convert(values: &[TtfType]) -> Vec<u8> {
    let mut data = Vec::with_capacity(256);
    for value in values {
        convert_type(*value, &mut data);
    }

    data
}

fn convert_type(value: TtfType, data: &mut Vec<u8>) {
    match value {
        TtfType::Raw(bytes) => data.extend_from_slice(bytes),
        TtfType::TrueTypeMagic => data.extend_from_slice(&[0x00, 0x01, 0x00, 0x00]),
        TtfType::OpenTypeMagic => data.extend_from_slice(&[0x4F, 0x54, 0x54, 0x4F]),
        TtfType::Int8(n) => data.extend_from_slice(&n.to_be_bytes()),
        TtfType::UInt8(n) => data.extend_from_slice(&n.to_be_bytes()),
        TtfType::Int16(n) => data.extend_from_slice(&n.to_be_bytes()),
        TtfType::UInt16(n) => data.extend_from_slice(&n.to_be_bytes()),
        TtfType::Int32(n) => data.extend_from_slice(&n.to_be_bytes()),
        TtfType::UInt32(n) => data.extend_from_slice(&n.to_be_bytes()),
        TtfType::Int64(n) => data.extend_from_slice(&n.to_be_bytes()),
        TtfType::Fixed(n) => data.extend_from_slice(&((n * 65536.0) as i32).to_be_bytes()),
        TtfType::F2Dot14(n) => data.extend_from_slice(&((n * 16384.0) as i16).to_be_bytes()),
        TtfType::PascalString(s) => {
            data.push(s.len() as u8);
            data.extend_from_slice(s.as_bytes());
        }
    }
}

/// A complete three-glyph icon font: glyph 0 is blank, glyph 1 a
/// 500-unit square named "box" at U+E001, glyph 2 a composite named
/// "boxes" at U+E002 that places the square at x = 100. U+E003 maps to
/// the blank glyph.
pub fn sample_font() -> Vec<u8> {
    font(TtfType::TrueTypeMagic, &sample_tables(true))
}

/// The same font without outlines, wearing the OpenType magic.
pub fn sample_otf() -> Vec<u8> {
    font(TtfType::OpenTypeMagic, &sample_tables(false))
}

pub fn sample_font_without(tag: &[u8; 4]) -> Vec<u8> {
    let tables: Vec<_> = sample_tables(true)
        .into_iter()
        .filter(|(table_tag, _)| *table_tag != tag)
        .collect();
    font(TtfType::TrueTypeMagic, &tables)
}

fn sample_tables(with_outlines: bool) -> Vec<(&'static [u8; 4], Vec<u8>)> {
    use TtfType::*;

    let cmap = convert(&[
        UInt16(0), // version
        UInt16(1), // numTables
        UInt16(0), // platformId: Unicode
        UInt16(3), // encodingId: BMP
        UInt32(12), // offset
        UInt16(4), // format
        UInt16(40), // length
        UInt16(0), // language
        UInt16(6), // 2 x segCount
        UInt16(4), // searchRange
        UInt16(1), // entrySelector
        UInt16(2), // rangeShift
        UInt16(0xE002), // endCode [0]
        UInt16(0xE003), // endCode [1]
        UInt16(0xFFFF), // endCode [2]
        UInt16(0), // reservedPad
        UInt16(0xE001), // startCode [0]
        UInt16(0xE003), // startCode [1]
        UInt16(0xFFFF), // startCode [2]
        Int16(8192), // idDelta [0]: 0xE001 -> glyph 1
        Int16(8189), // idDelta [1]: 0xE003 -> glyph 0
        Int16(1), // idDelta [2]
        UInt16(0), // idRangeOffset [0]
        UInt16(0), // idRangeOffset [1]
        UInt16(0), // idRangeOffset [2]
    ]);

    let glyf = convert(&[
        // Glyph 1: a square with a single contour.
        Int16(1), // numberOfContours
        Int16(0), // xMin
        Int16(0), // yMin
        Int16(500), // xMax
        Int16(500), // yMax
        UInt16(3), // endPtsOfContours [0]
        UInt16(0), // instructionLength
        UInt8(0x01), // flags [0]: on curve
        UInt8(0x01), // flags [1]
        UInt8(0x01), // flags [2]
        UInt8(0x01), // flags [3]
        Int16(0), // x delta [0]
        Int16(500), // x delta [1]
        Int16(0), // x delta [2]
        Int16(-500), // x delta [3]
        Int16(0), // y delta [0]
        Int16(0), // y delta [1]
        Int16(500), // y delta [2]
        Int16(0), // y delta [3]
        // Glyph 2: glyph 1 shifted right by 100 units.
        Int16(-1), // numberOfContours
        Int16(100), // xMin
        Int16(0), // yMin
        Int16(600), // xMax
        Int16(500), // yMax
        UInt16(0x0003), // flags: words, xy values
        UInt16(1), // glyphIndex
        Int16(100), // arg1: dx
        Int16(0), // arg2: dy
    ]);

    let head = convert(&[
        UInt16(1), // majorVersion
        UInt16(0), // minorVersion
        Fixed(1.0), // fontRevision
        UInt32(0), // checksumAdjustment
        UInt32(0x5F0F3CF5), // magicNumber
        UInt16(0), // flags
        UInt16(1000), // unitsPerEm
        Int64(2082844800), // created: 1970-01-01
        Int64(2082844800), // modified
        Int16(0), // xMin
        Int16(0), // yMin
        Int16(600), // xMax
        Int16(500), // yMax
        UInt16(0), // macStyle
        UInt16(8), // lowestRecPPEM
        Int16(2), // fontDirectionHint
        Int16(0), // indexToLocFormat: short
        Int16(0), // glyphDataFormat
    ]);

    let hhea = convert(&[
        UInt32(0x00010000), // version
        Int16(800), // ascender
        Int16(-200), // descender
        Int16(90), // lineGap
        UInt16(600), // advanceWidthMax
        Int16(0), // minLeftSideBearing
        Int16(0), // minRightSideBearing
        Int16(600), // xMaxExtent
        Int16(1), // caretSlopeRise
        Int16(0), // caretSlopeRun
        Int16(0), // caretOffset
        Int16(0), // reserved
        Int16(0), // reserved
        Int16(0), // reserved
        Int16(0), // reserved
        Int16(0), // metricDataFormat
        UInt16(2), // numberOfHMetrics
    ]);

    let hmtx = convert(&[
        UInt16(500), // advanceWidth [0]
        Int16(0), // leftSideBearing [0]
        UInt16(600), // advanceWidth [1]
        Int16(10), // leftSideBearing [1]
        Int16(10), // leftSideBearing [2]
    ]);

    let loca = convert(&[
        UInt16(0), // offset [0] / 2
        UInt16(0), // offset [1] / 2: glyph 0 is blank
        UInt16(17), // offset [2] / 2
        UInt16(26), // offset [3] / 2
    ]);

    let maxp = convert(&[
        UInt32(0x00010000), // version
        UInt16(3), // numGlyphs
    ]);

    let name = convert(&[
        UInt16(0), // version
        UInt16(1), // count
        UInt16(18), // storageOffset
        UInt16(3), // platformId: Windows
        UInt16(1), // encodingId
        UInt16(1033), // languageId: English
        UInt16(1), // nameId: family
        UInt16(12), // length
        UInt16(0), // offset
        // "Sample" in UTF-16BE.
        Raw(&[0x00, 0x53, 0x00, 0x61, 0x00, 0x6D, 0x00, 0x70, 0x00, 0x6C, 0x00, 0x65]),
    ]);

    let post = convert(&[
        Fixed(2.0), // version
        Fixed(0.0), // italicAngle
        Int16(-100), // underlinePosition
        Int16(50), // underlineThickness
        UInt32(0), // isFixedPitch
        UInt32(0), // minMemType42
        UInt32(0), // maxMemType42
        UInt32(0), // minMemType1
        UInt32(0), // maxMemType1
        UInt16(3), // numGlyphs
        UInt16(0), // glyph 0: standard name
        UInt16(259), // glyph 1: custom name 1
        UInt16(260), // glyph 2: custom name 2
        PascalString("pad"),
        PascalString("box"),
        PascalString("boxes"),
    ]);

    let mut tables: Vec<(&'static [u8; 4], Vec<u8>)> = vec![
        (b"cmap", cmap),
        (b"head", head),
        (b"hhea", hhea),
        (b"hmtx", hmtx),
        (b"maxp", maxp),
        (b"name", name),
        (b"post", post),
    ];
    if with_outlines {
        tables.push((b"glyf", glyf));
        tables.push((b"loca", loca));
    }

    tables
}

/// Assembles a complete font: magic, table directory, table data.
pub fn font(magic: TtfType, tables: &[(&[u8; 4], Vec<u8>)]) -> Vec<u8> {
    let mut data = convert(&[
        magic,
        TtfType::UInt16(tables.len() as u16), // numTables
        TtfType::UInt16(0), // searchRange
        TtfType::UInt16(0), // entrySelector
        TtfType::UInt16(0), // rangeShift
    ]);

    let mut offset = data.len() + tables.len() * 16;
    for (tag, table) in tables {
        data.extend_from_slice(*tag);
        data.extend_from_slice(&0u32.to_be_bytes()); // checksum
        data.extend_from_slice(&(offset as u32).to_be_bytes());
        data.extend_from_slice(&(table.len() as u32).to_be_bytes());
        offset += table.len();
    }

    for (_, table) in tables {
        data.extend_from_slice(table);
    }

    data
}
