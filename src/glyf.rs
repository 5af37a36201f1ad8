// https://docs.microsoft.com/en-us/typography/opentype/spec/glyf

use bitflags::bitflags;

use crate::geom::{Point, Transform};
use crate::outline::OutlineSink;
use crate::parser::{LazyArray16, Stream, TrySlice};
use crate::{loca, GlyphId, Rect, Result};

// OpenType does not bound component nesting; cap it.
const MAX_COMPONENT_DEPTH: u8 = 32;

bitflags! {
    // https://docs.microsoft.com/en-us/typography/opentype/spec/glyf#simple-glyph-description
    struct SimpleGlyphFlags: u8 {
        const ON_CURVE_POINT = 0x01;
        const X_SHORT_VECTOR = 0x02;
        const Y_SHORT_VECTOR = 0x04;
        const REPEAT_FLAG = 0x08;
        const X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR = 0x10;
        const Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR = 0x20;
    }
}

bitflags! {
    // https://docs.microsoft.com/en-us/typography/opentype/spec/glyf#composite-glyph-description
    struct CompositeGlyphFlags: u16 {
        const ARG_1_AND_2_ARE_WORDS = 0x0001;
        const ARGS_ARE_XY_VALUES = 0x0002;
        const WE_HAVE_A_SCALE = 0x0008;
        const MORE_COMPONENTS = 0x0020;
        const WE_HAVE_AN_X_AND_Y_SCALE = 0x0040;
        const WE_HAVE_A_TWO_BY_TWO = 0x0080;
    }
}

/// A single glyph's header and its deferred body bytes.
///
/// `number_of_contours >= 0` marks a simple glyph, `< 0` a composite one.
/// A blank glyph has an empty body.
#[derive(Clone, Copy, Debug)]
pub struct GlyphHeader<'a> {
    pub number_of_contours: i16,
    pub bbox: Rect,
    pub(crate) data: &'a [u8],
}

impl<'a> GlyphHeader<'a> {
    const BLANK: GlyphHeader<'static> = GlyphHeader {
        number_of_contours: 0,
        bbox: Rect {
            x_min: 0,
            y_min: 0,
            x_max: 0,
            y_max: 0,
        },
        data: &[],
    };

    fn parse(data: &'a [u8]) -> Result<Self> {
        let mut s = Stream::new(data);
        let number_of_contours = s.read()?;
        let bbox = Rect {
            x_min: s.read()?,
            y_min: s.read()?,
            x_max: s.read()?,
            y_max: s.read()?,
        };

        Ok(GlyphHeader {
            number_of_contours,
            bbox,
            data: s.tail(),
        })
    }

    pub fn is_blank(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_composite(&self) -> bool {
        self.number_of_contours < 0
    }
}

/// Decoded glyph data: one header per glyph id.
#[derive(Clone, Debug)]
pub struct Table<'a> {
    glyphs: Vec<GlyphHeader<'a>>,
}

impl<'a> Table<'a> {
    pub fn parse(data: &'a [u8], loca: &loca::Table) -> Result<Self> {
        let glyph_count = loca.len().saturating_sub(1);

        let mut glyphs = Vec::with_capacity(glyph_count);
        for id in 0..glyph_count {
            // The range is present for every id below `loca.len() - 1`.
            let range = loca.glyph_range(GlyphId(id as u16)).unwrap_or(0..0);
            let glyph_data = data.try_slice(range)?;
            if glyph_data.is_empty() {
                glyphs.push(GlyphHeader::BLANK);
            } else {
                glyphs.push(GlyphHeader::parse(glyph_data)?);
            }
        }

        Ok(Table { glyphs })
    }

    pub fn get(&self, glyph_id: GlyphId) -> Option<&GlyphHeader<'a>> {
        self.glyphs.get(usize::from(glyph_id.0))
    }

    pub fn len(&self) -> u16 {
        self.glyphs.len() as u16
    }
}

/// A point of a simple glyph, in absolute font units.
#[derive(Clone, Copy, Debug)]
pub(crate) struct GlyphPoint {
    pub x: i16,
    pub y: i16,
    pub on_curve: bool,
    /// Set on the final point of each contour.
    pub last: bool,
}

/// A cursor-driven decoder of the packed flag/coordinate streams.
///
/// Yields absolute points; deltas are accumulated while iterating.
pub(crate) struct GlyphPoints<'a> {
    flags: Stream<'a>,
    x_coords: Stream<'a>,
    y_coords: Stream<'a>,
    pub(crate) endpoints: LazyArray16<'a, u16>,
    points_left: u16,
    flag_repeats: u8,
    last_flags: SimpleGlyphFlags,
    x: i16,
    y: i16,
    index: u16,
    endpoint_index: u16,
}

impl<'a> Iterator for GlyphPoints<'a> {
    type Item = GlyphPoint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.points_left == 0 {
            return None;
        }

        if self.flag_repeats == 0 {
            self.last_flags = SimpleGlyphFlags::from_bits_truncate(self.flags.read().ok()?);
            if self.last_flags.contains(SimpleGlyphFlags::REPEAT_FLAG) {
                self.flag_repeats = self.flags.read().ok()?;
            }
        } else {
            self.flag_repeats -= 1;
        }

        let dx = read_coord(
            self.last_flags,
            SimpleGlyphFlags::X_SHORT_VECTOR,
            SimpleGlyphFlags::X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR,
            &mut self.x_coords,
        )?;
        self.x = self.x.wrapping_add(dx);

        let dy = read_coord(
            self.last_flags,
            SimpleGlyphFlags::Y_SHORT_VECTOR,
            SimpleGlyphFlags::Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR,
            &mut self.y_coords,
        )?;
        self.y = self.y.wrapping_add(dy);

        let last = self.endpoints.get(self.endpoint_index) == Some(self.index);
        if last {
            self.endpoint_index += 1;
        }

        self.index += 1;
        self.points_left -= 1;

        Some(GlyphPoint {
            x: self.x,
            y: self.y,
            on_curve: self.last_flags.contains(SimpleGlyphFlags::ON_CURVE_POINT),
            last,
        })
    }
}

fn read_coord(
    flags: SimpleGlyphFlags,
    short_vector: SimpleGlyphFlags,
    same_or_positive: SimpleGlyphFlags,
    coords: &mut Stream,
) -> Option<i16> {
    let short = flags.contains(short_vector);
    let same_or_positive = flags.contains(same_or_positive);
    Some(match (short, same_or_positive) {
        (true, true) => i16::from(coords.read::<u8>().ok()?),
        (true, false) => -i16::from(coords.read::<u8>().ok()?),
        // Keep the previous coordinate.
        (false, true) => 0,
        (false, false) => coords.read::<i16>().ok()?,
    })
}

/// Prepares the point iterator of a simple glyph.
pub(crate) fn points<'a>(header: &GlyphHeader<'a>) -> Result<GlyphPoints<'a>> {
    debug_assert!(header.number_of_contours > 0);

    let mut s = Stream::new(header.data);
    let endpoints: LazyArray16<u16> = s.read_array(header.number_of_contours as u16)?;

    let mut points_total = 0u16;
    for endpoint in endpoints {
        // 0xFFFF would overflow the point count.
        if endpoint == core::u16::MAX {
            log::warn!("glyph endpoint index overflow");
            return Ok(empty_points());
        }
        points_total = points_total.max(endpoint + 1);
    }

    // Hinting bytecode is ignored.
    let instructions_len: u16 = s.read()?;
    s.advance(instructions_len as isize);

    let flags_offset = s.offset();
    let x_coords_len = resolve_x_coords_len(&mut s, points_total)?;
    let x_coords_offset = s.offset();
    let y_coords_offset = x_coords_offset + x_coords_len;

    let data = header.data;
    Ok(GlyphPoints {
        flags: Stream::new(data.try_slice(flags_offset..x_coords_offset)?),
        x_coords: Stream::new(data.try_slice(x_coords_offset..y_coords_offset)?),
        y_coords: Stream::new(data.try_slice(y_coords_offset.min(data.len())..data.len())?),
        endpoints,
        points_left: points_total,
        flag_repeats: 0,
        last_flags: SimpleGlyphFlags::empty(),
        x: 0,
        y: 0,
        index: 0,
        endpoint_index: 0,
    })
}

fn empty_points() -> GlyphPoints<'static> {
    GlyphPoints {
        flags: Stream::new(&[]),
        x_coords: Stream::new(&[]),
        y_coords: Stream::new(&[]),
        endpoints: LazyArray16::default(),
        points_left: 0,
        flag_repeats: 0,
        last_flags: SimpleGlyphFlags::empty(),
        x: 0,
        y: 0,
        index: 0,
        endpoint_index: 0,
    }
}

/// Resolves the x-coordinate stream length.
///
/// It depends on the per-point flags, so the whole flag stream has to be
/// scanned first. Leaves the stream right after the flags.
fn resolve_x_coords_len(s: &mut Stream, points_total: u16) -> Result<usize> {
    let mut flags_left = u32::from(points_total);
    let mut x_coords_len = 0usize;
    while flags_left > 0 {
        let flags = SimpleGlyphFlags::from_bits_truncate(s.read()?);

        let repeats = if flags.contains(SimpleGlyphFlags::REPEAT_FLAG) {
            u32::from(s.read::<u8>()?) + 1
        } else {
            1
        };

        if flags.contains(SimpleGlyphFlags::X_SHORT_VECTOR) {
            x_coords_len += repeats as usize;
        } else if !flags.contains(SimpleGlyphFlags::X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR) {
            x_coords_len += repeats as usize * 2;
        }

        flags_left = flags_left.saturating_sub(repeats);
    }

    Ok(x_coords_len)
}

/// A sink wrapper that runs every point through the active transform.
struct Builder<'a, T: OutlineSink> {
    sink: &'a mut T,
    transform: Transform,
    is_identity: bool,
}

impl<'a, T: OutlineSink> Builder<'a, T> {
    fn new(sink: &'a mut T, transform: Transform) -> Self {
        Builder {
            is_identity: transform.is_identity(),
            transform,
            sink,
        }
    }

    fn map(&self, p: Point) -> Point {
        if self.is_identity {
            p
        } else {
            self.transform.apply(p)
        }
    }

    fn move_to(&mut self, p: Point) {
        let p = self.map(p);
        self.sink.move_to(p.x, p.y);
    }

    fn line_to(&mut self, p: Point) {
        let p = self.map(p);
        self.sink.line_to(p.x, p.y);
    }

    fn quad_to(&mut self, control: Point, p: Point) {
        let control = self.map(control);
        let p = self.map(p);
        self.sink.quad_to(control.x, control.y, p.x, p.y);
    }

    fn close(&mut self) {
        self.sink.close();
    }
}

/// Reconstructs a glyph outline into `sink`, all points passed through
/// `transform`.
pub(crate) fn outline<T: OutlineSink>(
    table: &Table,
    glyph_id: GlyphId,
    transform: Transform,
    sink: &mut T,
) -> Result<()> {
    let mut visited = Vec::new();
    outline_impl(table, glyph_id, transform, 0, &mut visited, sink)
}

fn outline_impl<T: OutlineSink>(
    table: &Table,
    glyph_id: GlyphId,
    transform: Transform,
    depth: u8,
    visited: &mut Vec<u16>,
    sink: &mut T,
) -> Result<()> {
    if depth >= MAX_COMPONENT_DEPTH {
        log::warn!("glyph {} nested too deeply", glyph_id.0);
        return Ok(());
    }

    let header = match table.get(glyph_id) {
        Some(header) => header,
        None => {
            log::warn!("reference to missing glyph {}", glyph_id.0);
            return Ok(());
        }
    };

    if header.is_blank() {
        return Ok(());
    }

    if header.number_of_contours > 0 {
        let mut builder = Builder::new(sink, transform);
        outline_simple(header, &mut builder)
    } else if header.number_of_contours < 0 {
        visited.push(glyph_id.0);
        let result = outline_composite(table, header.data, transform, depth, visited, sink);
        visited.pop();
        result
    } else {
        Ok(())
    }
}

fn outline_simple<T: OutlineSink>(header: &GlyphHeader, builder: &mut Builder<T>) -> Result<()> {
    let mut points = points(header)?;
    let endpoints = points.endpoints;

    let mut prev_end: i32 = -1;
    for endpoint in endpoints {
        let endpoint = i32::from(endpoint);
        if endpoint <= prev_end {
            log::warn!("glyph contour endpoints are not ascending");
            break;
        }

        let count = (endpoint - prev_end) as usize;
        if count >= 2 {
            emit_contour(points.by_ref().take(count), builder);
        } else {
            // A single-point contour draws nothing.
            points.by_ref().take(count).for_each(drop);
        }

        prev_end = endpoint;
    }

    Ok(())
}

/// Walks one contour's points and emits outline segments.
///
/// Between on-curve points an off-curve one is a quadratic control;
/// two consecutive off-curve points imply an on-curve point at their
/// midpoint. A contour is closed by `close` alone: the implicit closing
/// line is not emitted.
fn emit_contour<T: OutlineSink>(
    points: impl Iterator<Item = GlyphPoint>,
    builder: &mut Builder<T>,
) {
    let mut first_on_curve: Option<Point> = None;
    let mut first_off_curve: Option<Point> = None;
    let mut last_off_curve: Option<Point> = None;

    for point in points {
        let p = Point::new(f32::from(point.x), f32::from(point.y));
        if first_on_curve.is_none() {
            if point.on_curve {
                first_on_curve = Some(p);
                builder.move_to(p);
            } else {
                match first_off_curve {
                    Some(off_curve) => {
                        // An all-off-curve start: open at the midpoint.
                        let mid = off_curve.lerp(p, 0.5);
                        first_on_curve = Some(mid);
                        last_off_curve = Some(p);
                        builder.move_to(mid);
                    }
                    None => first_off_curve = Some(p),
                }
            }
        } else {
            match (last_off_curve, point.on_curve) {
                (Some(off_curve), true) => {
                    last_off_curve = None;
                    builder.quad_to(off_curve, p);
                }
                (Some(off_curve), false) => {
                    let mid = off_curve.lerp(p, 0.5);
                    builder.quad_to(off_curve, mid);
                    last_off_curve = Some(p);
                }
                (None, true) => builder.line_to(p),
                (None, false) => last_off_curve = Some(p),
            }
        }
    }

    if let Some(first_on_curve) = first_on_curve {
        match (first_off_curve, last_off_curve) {
            (Some(first_off), Some(last_off)) => {
                let mid = last_off.lerp(first_off, 0.5);
                builder.quad_to(last_off, mid);
                builder.quad_to(first_off, first_on_curve);
            }
            (Some(first_off), None) => builder.quad_to(first_off, first_on_curve),
            (None, Some(last_off)) => builder.quad_to(last_off, first_on_curve),
            (None, None) => {}
        }

        builder.close();
    }
}

fn outline_composite<T: OutlineSink>(
    table: &Table,
    data: &[u8],
    parent: Transform,
    depth: u8,
    visited: &mut Vec<u16>,
    sink: &mut T,
) -> Result<()> {
    let mut s = Stream::new(data);
    loop {
        let flags = CompositeGlyphFlags::from_bits_truncate(s.read()?);
        let glyph_id = GlyphId(s.read()?);

        let mut ts = Transform::identity();
        if flags.contains(CompositeGlyphFlags::ARGS_ARE_XY_VALUES) {
            if flags.contains(CompositeGlyphFlags::ARG_1_AND_2_ARE_WORDS) {
                ts.e = f32::from(s.read::<i16>()?);
                ts.f = f32::from(s.read::<i16>()?);
            } else {
                ts.e = f32::from(s.read::<i8>()?);
                ts.f = f32::from(s.read::<i8>()?);
            }
        } else {
            // Point-number anchoring; the arguments still occupy the
            // stream.
            log::warn!("glyph {} component anchored by point numbers", glyph_id.0);
            if flags.contains(CompositeGlyphFlags::ARG_1_AND_2_ARE_WORDS) {
                s.advance(4);
            } else {
                s.advance(2);
            }
        }

        if flags.contains(CompositeGlyphFlags::WE_HAVE_A_TWO_BY_TWO) {
            ts.a = s.read_f2dot14()?;
            ts.b = s.read_f2dot14()?;
            ts.c = s.read_f2dot14()?;
            ts.d = s.read_f2dot14()?;
        } else if flags.contains(CompositeGlyphFlags::WE_HAVE_AN_X_AND_Y_SCALE) {
            ts.a = s.read_f2dot14()?;
            ts.d = s.read_f2dot14()?;
        } else if flags.contains(CompositeGlyphFlags::WE_HAVE_A_SCALE) {
            ts.a = s.read_f2dot14()?.max(-2.0).min(2.0);
            ts.d = ts.a;
        }

        if visited.contains(&glyph_id.0) {
            log::error!("glyph {} references itself", glyph_id.0);
        } else {
            outline_impl(
                table,
                glyph_id,
                parent.compose(&ts),
                depth + 1,
                visited,
                sink,
            )?;
        }

        if !flags.contains(CompositeGlyphFlags::MORE_COMPONENTS) {
            break;
        }
    }

    Ok(())
}
