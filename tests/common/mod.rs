#![allow(dead_code)]


pub const BLACK_WHITE: [[u8;3];2] = [[0x00, 0x00, 0x00], [0xFF, 0xFF, 0xFF]];
pub const RGBK: [[u8;3];4] = [[0xFF, 0x00, 0x00], [0x00, 0xFF, 0x00], [0x00, 0x00, 0xFF], [0x00, 0x00, 0x00]];
pub const KBGR: [[u8;3];4] = [[0x00, 0x00, 0x00], [0x00, 0x00, 0xFF], [0x00, 0xFF, 0x00], [0xFF, 0x00, 0x00]];


/// Recipe for a single-frame GIF.
#[derive(Clone, Debug)]
pub struct Source {
    pub signature: &'static [u8;6],
    pub width: u16,
    pub height: u16,
    pub left: u16,
    pub top: u16,
    pub palette: Vec<[u8;3]>,
    pub fill: u8,
    pub graphic_control: bool,
}


impl Default for Source {
    fn default() -> Self {
        Source {
            signature: b"GIF89a",
            width: 5,
            height: 5,
            left: 0,
            top: 0,
            palette: RGBK.to_vec(),
            fill: 1,
            graphic_control: true,
        }
    }
}

impl Source {
    pub fn build(&self) -> Vec<u8> {
        let mut gif = self.signature.to_vec();
        gif.extend(&le(self.width));
        gif.extend(&le(self.height));
        if self.palette.is_empty() {
            gif.extend(&[0x00, 0x00, 0x00]);
        } else {
            gif.extend(&[0x80 | exponent(&self.palette), 0x00, 0x00]);
            gif.extend(palette_bytes(&self.palette));
        }
        if self.graphic_control {
            gif.extend(graphic_control(0, 0, None));
        }
        gif.extend(image_block(self.left, self.top, self.width, self.height, None, self.fill, min_code_size(&self.palette)));
        gif.push(0x3B);
        gif
    }
}


pub fn single_frame() -> Vec<u8> {
    Source::default().build()
}

pub fn le(value: u16) -> [u8;2] {
    [(value & 0xFF) as u8, (value >> 8) as u8]
}

/// `n` such that the palette holds `2^(n+1)` entries.
pub fn exponent(palette: &[[u8;3]]) -> u8 {
    (palette.len().max(2).trailing_zeros() - 1) as u8
}

pub fn min_code_size(palette: &[[u8;3]]) -> u8 {
    (exponent(palette) + 1).max(2)
}

pub fn palette_bytes(palette: &[[u8;3]]) -> Vec<u8> {
    palette.iter().flat_map(|it| it.iter().cloned()).collect()
}

pub fn graphic_control(disposal: u8, delay: u16, transparent: Option<u8>) -> Vec<u8> {
    let packed = (disposal << 2) | transparent.is_some() as u8;
    let mut result = vec![0x21, 0xF9, 0x04, packed];
    result.extend(&le(delay));
    result.extend(&[transparent.unwrap_or(0), 0x00]);
    result
}

pub fn netscape(loop_count: u16) -> Vec<u8> {
    let mut result = vec![0x21, 0xFF, 0x0B];
    result.extend(b"NETSCAPE2.0");
    result.extend(&[0x03, 0x01]);
    result.extend(&le(loop_count));
    result.push(0x00);
    result
}

pub fn comment(text: &str) -> Vec<u8> {
    let mut result = vec![0x21, 0xFE, text.len() as u8];
    result.extend(text.as_bytes());
    result.push(0x00);
    result
}

pub fn image_block(left: u16, top: u16, width: u16, height: u16, local: Option<&[[u8;3]]>, fill: u8, min_code_size: u8) -> Vec<u8> {
    let mut result = vec![0x2C];
    for it in &[left, top, width, height] {
        result.extend(&le(*it));
    }
    match local {
        Some(palette) => {
            result.push(0x80 | exponent(palette));
            result.extend(palette_bytes(palette));
        },
        None => result.push(0x00),
    }
    result.extend(lzw_stream(usize::from(width) * usize::from(height), fill, min_code_size));
    result
}

/// Every pixel is preceded by a clear code, so the code width never grows.
pub fn lzw_stream(pixels: usize, index: u8, min_code_size: u8) -> Vec<u8> {
    let clear = 1u32 << min_code_size;
    let width = u32::from(min_code_size) + 1;

    let mut codes = vec![];
    for _ in 0 .. pixels {
        codes.push(clear);
        codes.push(u32::from(index));
    }
    codes.push(clear + 1);

    let mut packed = vec![];
    let (mut accumulator, mut bits) = (0u32, 0u32);
    for code in codes {
        accumulator |= code << bits;
        bits += width;
        while bits >= 8 {
            packed.push((accumulator & 0xFF) as u8);
            accumulator >>= 8;
            bits -= 8;
        }
    }
    if bits > 0 {
        packed.push((accumulator & 0xFF) as u8);
    }

    let mut result = vec![min_code_size];
    for chunk in packed.chunks(255) {
        result.push(chunk.len() as u8);
        result.extend(chunk);
    }
    result.push(0x00);
    result
}

/// Header of a GIF with a global palette.
pub fn header(width: u16, height: u16, palette: &[[u8;3]]) -> Vec<u8> {
    let mut result = b"GIF89a".to_vec();
    result.extend(&le(width));
    result.extend(&le(height));
    result.extend(&[0x80 | exponent(palette), 0x00, 0x00]);
    result.extend(palette_bytes(palette));
    result
}

/// Positions of every graphic control extension introducer in `gif`.
pub fn graphic_control_positions(gif: &[u8]) -> Vec<usize> {
    gif.windows(3)
        .enumerate()
        .filter(|(_, it)| it.starts_with(&[0x21, 0xF9, 0x04]))
        .map(|(position, _)| position)
        .collect()
}
