// https://docs.microsoft.com/en-us/typography/opentype/spec/maxp

use crate::parser::Stream;
use crate::Result;

// Only `numGlyphs` matters here; the rest of the table describes
// rasterizer limits.
pub fn parse(data: &[u8]) -> Result<u16> {
    let mut s = Stream::new(data);
    s.skip::<u32>(); // version
    s.read()
}
