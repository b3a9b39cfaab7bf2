
use image::RgbaImage;



pub mod blocks;
pub mod cursor;
pub mod decoder;
pub mod encoder;
pub mod errors;
pub mod header;
pub mod raster;
pub mod sniff;
pub mod validators;



pub const SIGNATURE_87A: &[u8;6] = b"GIF87a";
pub const SIGNATURE_89A: &[u8;6] = b"GIF89a";


#[derive(Clone, Copy, Debug, Eq, PartialEq, enum_iterator_derive::IntoEnumIterator)]
pub enum DisposalMethod {
    Unspecified = 0,
    /// Leave the frame in place
    Keep = 1,
    /// Restore to background
    Background = 2,
    /// Restore to previous
    Previous = 3,
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

/// RGB triples in index order. Equality is positional.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ColorTable {
    bytes: Vec<u8>,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ScreenDescriptor {
    pub width: u16,
    pub height: u16,
    pub global_color_table: bool,
    pub color_resolution: u8,
    pub sorted: bool,
    /// Table holds `2^(n+1)` entries
    pub table_size_exponent: u8,
    pub background_color_index: u8,
    pub pixel_aspect_ratio: u8,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Header {
    pub screen: ScreenDescriptor,
    pub global_color_table: Option<ColorTable>,
    /// Signature, screen descriptor and global color table, verbatim
    pub bytes: Vec<u8>,
}

#[derive(Clone, Debug, Default)]
pub struct Frame {
    /// 0-based position in file order
    pub index: usize,
    /// Centiseconds
    pub delay: u16,
    /// Raw 3-bit field; see `disposal_method`
    pub disposal: u8,
    pub user_input: bool,
    pub transparent: bool,
    pub transparent_index: u8,
    pub left: u16,
    pub top: u16,
    pub width: u16,
    pub height: u16,
    pub local_color_table: bool,
    pub interlaced: bool,
    pub sorted: bool,
    /// Byte length a color table of this frame's size exponent occupies
    pub color_table_size: usize,
    pub color_table: Option<ColorTable>,
    pub lzw_code_size: u8,
    /// Graphic control extension, verbatim (empty if the frame had none)
    pub graphic_control: Vec<u8>,
    /// From the image separator through the end of the data sub-blocks
    pub image_data: Vec<u8>,
    pub raster: Option<RgbaImage>,
}

#[derive(Clone, Debug)]
pub struct Animation {
    pub header: Header,
    /// From the NETSCAPE extension, if any. 0 = infinite
    pub loop_count: Option<u16>,
    pub application_data: Option<Vec<u8>>,
    pub comment_data: Option<Vec<u8>>,
    pub frames: Vec<Frame>,
    pub canvas_width: u16,
    pub canvas_height: u16,
}

/// Which palette the encoder searches for `EncodeOptions::transparent_color`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PaletteLookup {
    /// Always the first frame's global table
    FirstFrame,
    /// The frame's own table, or the first frame's if it has none
    CurrentFrame,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EncodeOptions {
    /// 0 = infinite
    pub loop_count: u16,
    pub disposal: DisposalMethod,
    pub transparent_color: Option<Rgb>,
    pub palette_lookup: PaletteLookup,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RasterMode {
    Skip,
    /// Each frame decoded by itself
    Original,
    /// Each frame drawn onto a canvas-sized image
    Composite,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DecodeOptions {
    pub raster: RasterMode,
    /// Reject unknown bytes between blocks instead of skipping them
    pub strict: bool,
}


/// Byte length of a color table with the given size exponent.
pub fn color_table_bytes(exponent: u8) -> usize {
    3 * (2 << (exponent & 0x07))
}


impl DisposalMethod {
    /// Values above 3 are clamped to `Previous`.
    pub fn from_u8(value: u8) -> Self {
        use enum_iterator::IntoEnumIterator;

        DisposalMethod::into_enum_iter()
            .find(|it| *it as u8 == value)
            .unwrap_or(DisposalMethod::Previous)
    }

    pub fn to_u8(self) -> u8 {
        self as u8
    }
}

impl Default for DisposalMethod {
    fn default() -> Self {
        DisposalMethod::Background
    }
}


impl Rgb {
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Rgb { red, green, blue }
    }
}


impl ColorTable {
    /// Trailing bytes that do not form a whole triple are dropped.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let whole = bytes.len() - bytes.len() % 3;
        ColorTable { bytes: bytes[.. whole].to_vec() }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.bytes.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Rgb> {
        self.bytes.get(index * 3 .. index * 3 + 3).map(|it| Rgb::new(it[0], it[1], it[2]))
    }

    pub fn iter<'a>(&'a self) -> impl Iterator<Item = Rgb> + 'a {
        self.bytes.chunks(3).map(|it| Rgb::new(it[0], it[1], it[2]))
    }

    /// First index holding exactly `color`.
    pub fn position(&self, color: Rgb) -> Option<usize> {
        self.iter().position(|it| it == color)
    }

    /// `n` such that the table holds `2^(n+1)` entries.
    pub fn size_exponent(&self) -> u8 {
        let len = self.len().max(2).next_power_of_two().min(256);
        (len.trailing_zeros() - 1) as u8
    }
}


impl Frame {
    pub fn disposal_method(&self) -> DisposalMethod {
        DisposalMethod::from_u8(self.disposal)
    }

    /// Single-frame GIF made of `header`, this frame's graphic control
    /// extension, its image data and a trailer.
    pub fn standalone_gif(&self, header: &Header) -> Vec<u8> {
        let mut result = Vec::with_capacity(
            header.bytes.len() + self.graphic_control.len() + self.image_data.len() + 1);
        result.extend_from_slice(&header.bytes);
        result.extend_from_slice(&self.graphic_control);
        result.extend_from_slice(&self.image_data);
        result.push(blocks::TRAILER);
        result
    }
}


impl Animation {
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Sum of all frame delays, in centiseconds.
    pub fn total_duration(&self) -> u32 {
        self.frames.iter().map(|it| u32::from(it.delay)).sum()
    }

    pub fn delays(&self) -> Vec<u16> {
        self.frames.iter().map(|it| it.delay).collect()
    }

    pub fn positions(&self) -> Vec<(u16, u16)> {
        self.frames.iter().map(|it| (it.left, it.top)).collect()
    }

    pub fn dimensions(&self) -> Vec<(u16, u16)> {
        self.frames.iter().map(|it| (it.width, it.height)).collect()
    }

    pub fn frame_gif(&self, index: usize) -> Option<Vec<u8>> {
        self.frames.get(index).map(|it| it.standalone_gif(&self.header))
    }
}


impl Default for PaletteLookup {
    fn default() -> Self {
        PaletteLookup::FirstFrame
    }
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions {
            loop_count: 0,
            disposal: DisposalMethod::default(),
            transparent_color: None,
            palette_lookup: PaletteLookup::default(),
        }
    }
}

impl Default for RasterMode {
    fn default() -> Self {
        RasterMode::Skip
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            raster: RasterMode::default(),
            strict: false,
        }
    }
}
