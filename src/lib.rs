/*!
A safe TrueType font parser for icon browsing.

The crate decodes the handful of SFNT tables needed to resolve a Unicode
codepoint to a glyph, reconstructs the glyph's `glyf` outline as a stream
of move/line/quad/cubic/close commands, and renders it as a normalized
100×100 SVG document.

- Zero unsafe.
- Parses a well-formed font once, at [`Font::open`]; per-glyph problems
  in a damaged font are logged and skipped so one bad glyph does not
  disable the rest.
- OpenType CFF outlines (`.otf`) are detected but not decoded.

## Example

```no_run
use fonticon::{Font, Icon};

let data = std::fs::read("icons.ttf").unwrap();
let font = Font::open(&data).unwrap();
for (name, codepoint) in font.codepoint_by_name() {
    if let Some(icon) = Icon::new(&font, &name, codepoint).unwrap() {
        println!("{}", icon.to_svg_string());
    }
}
```
*/

#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]

use core::fmt;

use rustc_hash::FxHashMap;

pub mod cmap;
mod geom;
pub mod glyf;
pub mod head;
pub mod hhea;
pub mod hmtx;
mod icon;
pub mod loca;
pub mod maxp;
pub mod name;
mod outline;
pub mod parser;
pub mod post;

#[cfg(test)]
pub(crate) mod writer;

use parser::{FromData, Stream, TrySlice};

pub use geom::{Point, Transform};
pub use icon::Icon;
pub use outline::{BBox, BBoxBuilder, OutlineSink, SvgPathBuilder};

/// A type-safe wrapper for glyph ID.
#[derive(Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Default, Debug)]
pub struct GlyphId(pub u16);

/// A rectangle in font units.
#[derive(Clone, Copy, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct Rect {
    pub x_min: i16,
    pub y_min: i16,
    pub x_max: i16,
    pub y_max: i16,
}

/// A table name.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[allow(missing_docs)]
pub enum TableName {
    CharacterToGlyphIndexMapping,
    GlyphData,
    Header,
    HorizontalHeader,
    HorizontalMetrics,
    IndexToLocation,
    MaximumProfile,
    Naming,
    PostScript,
}

/// A font parsing error.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Error {
    /// A read reached past the end of the font or one of its tables.
    Truncated,

    /// The SFNT magic, a cmap subtable or an outline format is not
    /// supported.
    UnsupportedFormat,

    /// A required table is absent.
    TableMissing(TableName),

    /// A table breaks one of the format's invariants, e.g. a bad
    /// `head` magic or unordered `loca` offsets.
    Malformed(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Truncated => write!(f, "unexpected end of data"),
            Error::UnsupportedFormat => write!(f, "unsupported format"),
            Error::TableMissing(name) => write!(f, "table {:?} is missing", name),
            Error::Malformed(reason) => write!(f, "malformed font: {}", reason),
        }
    }
}

impl std::error::Error for Error {}

/// A `Result` with this crate's [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// A 4-byte table tag.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag(pub [u8; 4]);

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Tag({})", String::from_utf8_lossy(&self.0))
    }
}

/// A table directory record.
#[derive(Clone, Copy, Debug)]
struct TableRecord {
    tag: Tag,
    #[allow(dead_code)]
    checksum: u32,
    offset: u32,
    length: u32,
}

impl FromData for TableRecord {
    const SIZE: usize = 16;

    fn parse(data: &[u8]) -> Self {
        TableRecord {
            tag: Tag([data[0], data[1], data[2], data[3]]),
            checksum: u32::parse(&data[4..8]),
            offset: u32::parse(&data[8..12]),
            length: u32::parse(&data[12..16]),
        }
    }
}

/// The outline flavor of an SFNT container.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FontKind {
    /// TrueType outlines (`glyf`/`loca`).
    TrueType,
    /// OpenType CFF outlines. Detected, not decoded.
    OpenType,
}

const SFNT_VERSION_TRUE_TYPE: u32 = 0x00010000;
const SFNT_VERSION_OPEN_TYPE: u32 = 0x4F54544F; // 'OTTO'

/// A parsed font.
///
/// Borrows the byte buffer for its whole life; all decoded tables are
/// built once at [`Font::open`] and immutable afterwards.
#[derive(Debug)]
pub struct Font<'a> {
    data: &'a [u8],
    kind: FontKind,
    tables: FxHashMap<Tag, TableRecord>,
    number_of_glyphs: u16,
    head: head::Table,
    name: name::Table,
    cmap: cmap::Table,
    post: post::Table,
    hhea: hhea::Table,
    hmtx: hmtx::Table,
    loca: Option<loca::Table>,
    glyf: Option<glyf::Table<'a>>,
}

impl<'a> Font<'a> {
    /// Parses a font out of an SFNT byte buffer.
    ///
    /// Required tables: `head`, `maxp`, `name`, `cmap`, `post`, `hhea`
    /// and `hmtx`. `loca`/`glyf` are kept optional so OpenType fonts
    /// still open for metadata queries.
    pub fn open(data: &'a [u8]) -> Result<Self> {
        let mut s = Stream::new(data);
        let kind = match s.read::<u32>()? {
            SFNT_VERSION_TRUE_TYPE => FontKind::TrueType,
            SFNT_VERSION_OPEN_TYPE => FontKind::OpenType,
            _ => return Err(Error::UnsupportedFormat),
        };

        let num_tables: u16 = s.read()?;
        s.advance(6); // searchRange + entrySelector + rangeShift

        let mut tables = FxHashMap::default();
        for _ in 0..num_tables {
            let record: TableRecord = s.read()?;
            tables.insert(record.tag, record);
        }

        let number_of_glyphs = maxp::parse(table_data(
            data,
            &tables,
            b"maxp",
            TableName::MaximumProfile,
        )?)?;

        let head = head::Table::parse(table_data(data, &tables, b"head", TableName::Header)?)?;
        let name = name::Table::parse(table_data(data, &tables, b"name", TableName::Naming)?)?;
        let cmap = cmap::Table::parse(table_data(
            data,
            &tables,
            b"cmap",
            TableName::CharacterToGlyphIndexMapping,
        )?)?;
        let post = post::Table::parse(table_data(data, &tables, b"post", TableName::PostScript)?)?;
        let hhea = hhea::Table::parse(table_data(
            data,
            &tables,
            b"hhea",
            TableName::HorizontalHeader,
        )?)?;
        let hmtx = hmtx::Table::parse(
            table_data(data, &tables, b"hmtx", TableName::HorizontalMetrics)?,
            hhea.number_of_metrics,
            number_of_glyphs,
        )?;

        // Absent on OpenType fonts.
        let loca = match table_data(data, &tables, b"loca", TableName::IndexToLocation) {
            Ok(loca_data) => Some(loca::Table::parse(
                loca_data,
                number_of_glyphs,
                head.index_to_loc_format,
            )?),
            Err(Error::TableMissing(_)) => None,
            Err(e) => return Err(e),
        };
        let glyf = match (&loca, table_data(data, &tables, b"glyf", TableName::GlyphData)) {
            (Some(loca), Ok(glyf_data)) => Some(glyf::Table::parse(glyf_data, loca)?),
            (_, Err(Error::TableMissing(_))) | (None, Ok(_)) => None,
            (_, Err(e)) => return Err(e),
        };

        Ok(Font {
            data,
            kind,
            tables,
            number_of_glyphs,
            head,
            name,
            cmap,
            post,
            hhea,
            hmtx,
            loca,
            glyf,
        })
    }

    #[inline]
    pub fn kind(&self) -> FontKind {
        self.kind
    }

    /// Checks that the font directory carries a table.
    pub fn has_table(&self, name: TableName) -> bool {
        let tag: &[u8; 4] = match name {
            TableName::CharacterToGlyphIndexMapping => b"cmap",
            TableName::GlyphData => b"glyf",
            TableName::Header => b"head",
            TableName::HorizontalHeader => b"hhea",
            TableName::HorizontalMetrics => b"hmtx",
            TableName::IndexToLocation => b"loca",
            TableName::MaximumProfile => b"maxp",
            TableName::Naming => b"name",
            TableName::PostScript => b"post",
        };
        self.tables.contains_key(&Tag(*tag))
    }

    /// Returns a total number of glyphs in the font, from `maxp`.
    #[inline]
    pub fn number_of_glyphs(&self) -> u16 {
        self.number_of_glyphs
    }

    #[inline]
    pub fn head(&self) -> &head::Table {
        &self.head
    }

    #[inline]
    pub fn names(&self) -> &name::Table {
        &self.name
    }

    /// Font family, e.g. `"Material Icons"`. Empty when the font does
    /// not carry a Windows/English family record.
    #[inline]
    pub fn family_name(&self) -> &str {
        &self.name.family
    }

    #[inline]
    pub fn hhea(&self) -> &hhea::Table {
        &self.hhea
    }

    /// Glyph advance width in font units.
    #[inline]
    pub fn glyph_hor_advance(&self, glyph_id: GlyphId) -> Option<u16> {
        self.hmtx.advance(glyph_id)
    }

    /// Glyph left side bearing in font units.
    #[inline]
    pub fn glyph_hor_side_bearing(&self, glyph_id: GlyphId) -> Option<i16> {
        self.hmtx.side_bearing(glyph_id)
    }

    /// PostScript name of a glyph, when the font carries one.
    #[inline]
    pub fn glyph_name(&self, glyph_id: GlyphId) -> Option<&str> {
        self.post.name(glyph_id)
    }

    /// Resolves a codepoint through `cmap`.
    ///
    /// Outlines require TrueType: an OpenType font fails with
    /// [`Error::UnsupportedFormat`].
    pub fn glyph_by_codepoint(&self, code_point: u32) -> Result<Option<Glyph>> {
        if self.kind != FontKind::TrueType {
            return Err(Error::UnsupportedFormat);
        }

        Ok(self
            .cmap
            .glyph_index(code_point)
            .and_then(|id| self.glyph(id)))
    }

    /// A glyph handle by id.
    pub fn glyph(&self, glyph_id: GlyphId) -> Option<Glyph> {
        if glyph_id.0 < self.number_of_glyphs {
            Some(Glyph {
                font: self,
                id: glyph_id,
            })
        } else {
            None
        }
    }

    /// All named glyphs that are reachable from `cmap`, as
    /// name → codepoint.
    ///
    /// This is the icon browser's listing: `post` names the glyphs and
    /// the reverse character mapping recovers their codepoints.
    pub fn codepoint_by_name(&self) -> FxHashMap<String, u32> {
        let mut mapping = FxHashMap::default();
        for (glyph_id, name) in self.post.names() {
            if let Some(code_point) = self.cmap.codepoint(glyph_id) {
                mapping.insert(name.to_string(), code_point);
            }
        }

        mapping
    }

    /// The raw bytes of the whole font.
    #[inline]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }
}

fn table_data<'a>(
    data: &'a [u8],
    tables: &FxHashMap<Tag, TableRecord>,
    tag: &[u8; 4],
    name: TableName,
) -> Result<&'a [u8]> {
    let record = tables.get(&Tag(*tag)).ok_or(Error::TableMissing(name))?;
    let start = record.offset as usize;
    let end = start + record.length as usize;
    data.try_slice(start..end)
}

/// A single glyph of a TrueType font.
#[derive(Clone, Copy, Debug)]
pub struct Glyph<'a> {
    font: &'a Font<'a>,
    id: GlyphId,
}

impl<'a> Glyph<'a> {
    #[inline]
    pub fn id(&self) -> GlyphId {
        self.id
    }

    fn glyf(&self) -> Result<&'a glyf::Table<'a>> {
        self.font.glyf.as_ref().ok_or(Error::UnsupportedFormat)
    }

    /// An approximate bounding box, computed from the actual points.
    ///
    /// `None` for blank glyphs and for glyphs whose data cannot be
    /// decoded; decode problems are logged, not raised.
    pub fn bbox(&self) -> Option<BBox> {
        let table = self.glyf().ok()?;
        let header = table.get(self.id)?;
        if header.is_blank() {
            return None;
        }

        let mut builder = BBoxBuilder::new();
        if header.is_composite() {
            if let Err(e) = glyf::outline(table, self.id, Transform::identity(), &mut builder) {
                log::warn!("glyph {} bounding box failed: {}", self.id.0, e);
            }
        } else {
            match glyf::points(header) {
                Ok(points) => {
                    for point in points {
                        builder.extend(Point::new(f32::from(point.x), f32::from(point.y)));
                    }
                }
                Err(e) => log::warn!("glyph {} bounding box failed: {}", self.id.0, e),
            }
        }

        builder.finish()
    }

    /// Streams the outline into `sink`, passing every point through
    /// `transform` first.
    pub fn build_outline<T: OutlineSink>(
        &self,
        sink: &mut T,
        transform: Option<Transform>,
    ) -> Result<()> {
        let table = self.glyf()?;
        glyf::outline(
            table,
            self.id,
            transform.unwrap_or_else(Transform::identity),
            sink,
        )
    }

    /// Renders the outline as an SVG path string.
    ///
    /// Returns the path together with the glyph's bounding box in font
    /// units; a blank glyph yields an empty path and no box.
    pub fn to_svg_path(
        &self,
        transform: Option<Transform>,
        relative: bool,
        precision: usize,
    ) -> Result<(String, Option<BBox>)> {
        let mut builder = SvgPathBuilder::new(
            relative,
            precision,
            transform.unwrap_or_else(Transform::identity),
        );
        self.build_outline(&mut builder, None)?;
        Ok((builder.finish(), self.bbox()))
    }
}
