//! TrueType / OpenType table parsing.
//!
//! Only what text measurement needs: the sfnt table directory, `head` for
//! the em size, `hhea` for vertical metrics, `cmap` format 4 for character
//! lookup and `hmtx` for advance widths.

use common::{Cursor, ParseError};

// ─────────────────────────────────────────────────────────────────────────────
// TableTag
// ─────────────────────────────────────────────────────────────────────────────

/// A 4-byte table tag identifying a TrueType/OpenType table.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableTag(pub [u8; 4]);

impl TableTag {
    pub const HEAD: Self = Self(*b"head");
    pub const HHEA: Self = Self(*b"hhea");
    pub const CMAP: Self = Self(*b"cmap");
    pub const HMTX: Self = Self(*b"hmtx");
}

impl core::fmt::Debug for TableTag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = core::str::from_utf8(&self.0).unwrap_or("????");
        write!(f, "TableTag('{s}')")
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// FontFile
// ─────────────────────────────────────────────────────────────────────────────

/// A single entry in the sfnt table directory.
#[derive(Clone, Copy, Debug)]
pub struct TableRecord {
    pub tag: TableTag,
    pub offset: u32,
    pub length: u32,
}

/// A parsed table directory with access to raw table data.
pub struct FontFile<'a> {
    pub data: &'a [u8],
    pub tables: Vec<TableRecord>,
}

impl<'a> FontFile<'a> {
    /// Parse the sfnt table directory.
    pub fn parse(data: &'a [u8]) -> Result<Self, ParseError> {
        let mut c = Cursor::new(data);

        let sfnt_version = c.u32()?;
        // TrueType (0x00010000) or OpenType ('OTTO')
        if sfnt_version != 0x0001_0000 && sfnt_version != 0x4F54_544F {
            return Err(ParseError::InvalidValue("not a TrueType/OpenType font"));
        }

        let num_tables = c.u16()?;
        c.skip(6)?; // searchRange, entrySelector, rangeShift

        let mut tables = Vec::with_capacity(num_tables as usize);
        for _ in 0..num_tables {
            let tag = TableTag(c.tag()?);
            let _checksum = c.u32()?;
            let offset = c.u32()?;
            let length = c.u32()?;
            tables.push(TableRecord {
                tag,
                offset,
                length,
            });
        }

        Ok(FontFile { data, tables })
    }

    /// Raw bytes of the table tagged `tag`, if present and in bounds.
    pub fn table_data(&self, tag: TableTag) -> Option<&'a [u8]> {
        let record = self.tables.iter().find(|t| t.tag == tag)?;
        let start = record.offset as usize;
        let end = start.checked_add(record.length as usize)?;
        self.data.get(start..end)
    }

    /// Like [`table_data`](Self::table_data) but a missing table is an error.
    pub fn require(&self, tag: TableTag, name: &'static str) -> Result<&'a [u8], ParseError> {
        self.table_data(tag).ok_or(ParseError::Missing(name))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// head / hhea
// ─────────────────────────────────────────────────────────────────────────────

/// The fields of `head` used for scaling.
#[derive(Clone, Debug)]
pub struct HeadTable {
    pub units_per_em: u16,
    pub mac_style: u16,
}

impl HeadTable {
    pub fn parse(data: &[u8]) -> Result<Self, ParseError> {
        // version, fontRevision, checkSumAdjustment, magicNumber, flags
        let mut c = Cursor::at(data, 18)?;
        let units_per_em = c.u16()?;
        if units_per_em == 0 {
            return Err(ParseError::InvalidValue("unitsPerEm is zero"));
        }
        c.skip(16 + 8)?; // created, modified, bounding box
        let mac_style = c.u16()?;
        Ok(HeadTable {
            units_per_em,
            mac_style,
        })
    }
}

/// Parsed `hhea` (horizontal header) table, in font units.
#[derive(Clone, Debug)]
pub struct HheaTable {
    pub ascender: i16,
    pub descender: i16,
    pub line_gap: i16,
    pub num_h_metrics: u16,
}

impl HheaTable {
    pub fn parse(data: &[u8]) -> Result<Self, ParseError> {
        let mut c = Cursor::at(data, 4)?;
        let ascender = c.i16()?;
        let descender = c.i16()?;
        let line_gap = c.i16()?;
        c.skip(2 + 22)?; // advanceWidthMax, extents, caret, reserved, format
        let num_h_metrics = c.u16()?;
        if num_h_metrics == 0 {
            return Err(ParseError::InvalidValue("numberOfHMetrics is zero"));
        }
        Ok(HheaTable {
            ascender,
            descender,
            line_gap,
            num_h_metrics,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// cmap
// ─────────────────────────────────────────────────────────────────────────────

/// Parsed `cmap` format 4 subtable (BMP character-to-glyph mapping).
#[derive(Clone, Debug)]
pub struct CmapFormat4 {
    end_code: Vec<u16>,
    start_code: Vec<u16>,
    id_delta: Vec<i16>,
    id_range_offset: Vec<u16>,
    glyph_id_array: Vec<u16>,
}

impl CmapFormat4 {
    /// Parse a format 4 subtable starting at its format field.
    pub fn parse(data: &[u8]) -> Result<Self, ParseError> {
        let mut c = Cursor::new(data);
        let format = c.u16()?;
        if format != 4 {
            return Err(ParseError::InvalidValue("only cmap format 4 is supported"));
        }
        let length = c.u16()? as usize;
        let _language = c.u16()?;
        let seg_count = (c.u16()? / 2) as usize;
        c.skip(6)?; // searchRange, entrySelector, rangeShift

        let read_u16s = |c: &mut Cursor<'_>| -> Result<Vec<u16>, ParseError> {
            (0..seg_count).map(|_| c.u16()).collect()
        };

        let end_code = read_u16s(&mut c)?;
        c.skip(2)?; // reservedPad
        let start_code = read_u16s(&mut c)?;
        let id_delta = (0..seg_count)
            .map(|_| c.i16())
            .collect::<Result<Vec<_>, _>>()?;
        let id_range_offset = read_u16s(&mut c)?;

        let glyph_count = length.saturating_sub(c.position()) / 2;
        let glyph_id_array = (0..glyph_count)
            .map_while(|_| c.u16().ok())
            .collect();

        Ok(CmapFormat4 {
            end_code,
            start_code,
            id_delta,
            id_range_offset,
            glyph_id_array,
        })
    }

    /// Glyph id for `ch`, or 0 (`.notdef`) when unmapped.
    pub fn lookup(&self, ch: char) -> u16 {
        let Ok(code) = u16::try_from(u32::from(ch)) else {
            return 0;
        };

        // First segment whose end code is >= code.
        let seg = self.end_code.partition_point(|&end| end < code);
        if seg >= self.end_code.len() || self.start_code[seg] > code {
            return 0;
        }

        let delta = self.id_delta[seg];
        let range_offset = self.id_range_offset[seg] as usize;
        if range_offset == 0 {
            return code.wrapping_add_signed(delta);
        }

        // idRangeOffset is relative to its own slot; rebase it onto the
        // glyph id array that follows the idRangeOffset array.
        let index = (range_offset / 2 + (code - self.start_code[seg]) as usize)
            .checked_sub(self.end_code.len() - seg);
        match index.and_then(|i| self.glyph_id_array.get(i)) {
            Some(&0) | None => 0,
            Some(&gid) => gid.wrapping_add_signed(delta),
        }
    }
}

/// Find and parse the Unicode BMP cmap subtable.
///
/// Prefers Windows Unicode BMP (3, 1), then any Unicode-platform subtable.
pub fn parse_cmap(data: &[u8]) -> Result<CmapFormat4, ParseError> {
    let mut c = Cursor::new(data);
    let _version = c.u16()?;
    let num_tables = c.u16()?;

    let mut best_offset: Option<u32> = None;
    for _ in 0..num_tables {
        let platform_id = c.u16()?;
        let encoding_id = c.u16()?;
        let offset = c.u32()?;

        if platform_id == 3 && encoding_id == 1 {
            best_offset = Some(offset);
            break;
        }
        if platform_id == 0 && best_offset.is_none() {
            best_offset = Some(offset);
        }
    }

    let offset = best_offset.ok_or(ParseError::Missing("unicode cmap subtable"))? as usize;
    let subtable = data.get(offset..).ok_or(ParseError::UnexpectedEof)?;
    CmapFormat4::parse(subtable)
}

// ─────────────────────────────────────────────────────────────────────────────
// hmtx
// ─────────────────────────────────────────────────────────────────────────────

/// Advance width of `glyph_id` in font units.
///
/// Glyphs past `num_h_metrics` share the last listed advance.
pub fn advance_width(hmtx_data: &[u8], glyph_id: u16, num_h_metrics: u16) -> Result<u16, ParseError> {
    let index = glyph_id.min(num_h_metrics.saturating_sub(1)) as usize;
    Cursor::at(hmtx_data, index * 4)?.u16()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Big-endian byte writer for building synthetic tables.
    #[derive(Default)]
    pub(crate) struct Writer(pub Vec<u8>);

    impl Writer {
        pub fn u16(&mut self, v: u16) -> &mut Self {
            self.0.extend_from_slice(&v.to_be_bytes());
            self
        }
        pub fn i16(&mut self, v: i16) -> &mut Self {
            self.0.extend_from_slice(&v.to_be_bytes());
            self
        }
        pub fn u32(&mut self, v: u32) -> &mut Self {
            self.0.extend_from_slice(&v.to_be_bytes());
            self
        }
        pub fn zeros(&mut self, n: usize) -> &mut Self {
            self.0.resize(self.0.len() + n, 0);
            self
        }
    }

    /// Wrap tables into an sfnt file with a valid directory.
    pub(crate) fn build_font(tables: &[(TableTag, Vec<u8>)]) -> Vec<u8> {
        let mut w = Writer::default();
        w.u32(0x0001_0000).u16(tables.len() as u16).zeros(6);
        let mut offset = 12 + 16 * tables.len();
        for (tag, data) in tables {
            w.0.extend_from_slice(&tag.0);
            w.u32(0).u32(offset as u32).u32(data.len() as u32);
            offset += data.len();
        }
        for (_, data) in tables {
            w.0.extend_from_slice(data);
        }
        w.0
    }

    pub(crate) fn head(units_per_em: u16) -> Vec<u8> {
        let mut w = Writer::default();
        w.u32(0x0001_0000).u32(0).u32(0).u32(0x5F0F_3CF5).u16(0);
        w.u16(units_per_em).zeros(16 + 8).u16(0).zeros(8);
        w.0
    }

    pub(crate) fn hhea(ascender: i16, descender: i16, line_gap: i16, num_h_metrics: u16) -> Vec<u8> {
        let mut w = Writer::default();
        w.u32(0x0001_0000).i16(ascender).i16(descender).i16(line_gap);
        w.u16(0).zeros(22).u16(num_h_metrics);
        w.0
    }

    /// Maps ' ' to glyph 27 and 'a'..='z' to glyphs 1..=26.
    pub(crate) fn cmap() -> Vec<u8> {
        let segments: [(u16, u16, i16); 3] = [(32, 32, -5), (97, 122, -96), (0xFFFF, 0xFFFF, 1)];
        let mut w = Writer::default();
        w.u16(0).u16(1).u16(3).u16(1).u32(12);
        let seg_count = segments.len() as u16;
        w.u16(4).u16(16 + 8 * seg_count).u16(0).u16(seg_count * 2).zeros(6);
        for (_, end, _) in segments {
            w.u16(end);
        }
        w.u16(0);
        for (start, _, _) in segments {
            w.u16(start);
        }
        for (_, _, delta) in segments {
            w.i16(delta);
        }
        for _ in segments {
            w.u16(0);
        }
        w.0
    }

    /// Glyph 0 advances 500, glyph 1 ('a') 550, everything after 600.
    pub(crate) fn hmtx() -> Vec<u8> {
        let mut w = Writer::default();
        w.u16(500).i16(0).u16(550).i16(0).u16(600).i16(0);
        w.0
    }

    #[test]
    fn table_tag_debug() {
        assert_eq!(format!("{:?}", TableTag::HEAD), "TableTag('head')");
    }

    #[test]
    fn bad_magic_is_rejected() {
        let data = [0u8; 12];
        assert!(matches!(
            FontFile::parse(&data),
            Err(ParseError::InvalidValue(_))
        ));
    }

    #[test]
    fn directory_lookup() {
        let data = build_font(&[(TableTag::HEAD, head(1000)), (TableTag::HHEA, hhea(800, -200, 0, 3))]);
        let file = FontFile::parse(&data).unwrap();
        assert_eq!(file.tables.len(), 2);
        assert_eq!(file.table_data(TableTag::HEAD).map(<[u8]>::len), Some(54));
        assert!(file.table_data(TableTag::CMAP).is_none());
        assert_eq!(
            file.require(TableTag::HMTX, "hmtx").err(),
            Some(ParseError::Missing("hmtx"))
        );
    }

    #[test]
    fn head_and_hhea_fields() {
        assert_eq!(HeadTable::parse(&head(2048)).unwrap().units_per_em, 2048);
        assert!(HeadTable::parse(&head(0)).is_err());

        let h = HheaTable::parse(&hhea(800, -200, 90, 3)).unwrap();
        assert_eq!((h.ascender, h.descender, h.line_gap, h.num_h_metrics), (800, -200, 90, 3));
    }

    #[test]
    fn cmap_lookup() {
        let cmap = parse_cmap(&cmap()).unwrap();
        assert_eq!(cmap.lookup('a'), 1);
        assert_eq!(cmap.lookup('z'), 26);
        assert_eq!(cmap.lookup(' '), 27);
        assert_eq!(cmap.lookup('A'), 0);
        assert_eq!(cmap.lookup('\u{1F600}'), 0);
    }

    #[test]
    fn hmtx_advances() {
        let data = hmtx();
        assert_eq!(advance_width(&data, 0, 3).unwrap(), 500);
        assert_eq!(advance_width(&data, 1, 3).unwrap(), 550);
        assert_eq!(advance_width(&data, 2, 3).unwrap(), 600);
        assert_eq!(advance_width(&data, 40, 3).unwrap(), 600);
        assert!(advance_width(&data, 9, 10).is_err());
    }
}
