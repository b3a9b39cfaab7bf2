
use byteorder::{ByteOrder, LittleEndian};

use super::cursor::Cursor;
use super::errors::{GifError, GifResult};
use super::DisposalMethod;



pub const EXTENSION_INTRODUCER: u8 = 0x21;
pub const IMAGE_SEPARATOR: u8 = 0x2C;
pub const TRAILER: u8 = 0x3B;

pub const APPLICATION_LABEL: u8 = 0xFF;
pub const COMMENT_LABEL: u8 = 0xFE;
pub const GRAPHIC_CONTROL_LABEL: u8 = 0xF9;

pub const NETSCAPE_IDENTIFIER: &[u8;8] = b"NETSCAPE";
const NETSCAPE_AUTHENTICATION: &[u8;3] = b"2.0";

/// Introducer, label, block size, packed, delay (2), transparent index, terminator
pub const GRAPHIC_CONTROL_LENGTH: usize = 8;
/// Separator, left, top, width, height, packed
pub const IMAGE_DESCRIPTOR_LENGTH: usize = 10;


/// One top-level item of a GIF block stream, borrowed from the buffer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Block<'a> {
    Extension { label: u8, bytes: &'a [u8] },
    Image(&'a [u8]),
    Trailer,
    Unknown(u8),
}


/// Reads the block at the cursor. `Unknown` does not consume its byte.
pub fn read_block<'a>(cursor: &mut Cursor<'a>) -> GifResult<Block<'a>> {
    match cursor.peek() {
        Some(EXTENSION_INTRODUCER) => {
            let bytes = read_extension(cursor)?;
            Ok(Block::Extension { label: bytes[1], bytes })
        },
        Some(IMAGE_SEPARATOR) => Ok(Block::Image(read_image(cursor)?)),
        Some(TRAILER) => {
            cursor.skip(1)?;
            Ok(Block::Trailer)
        },
        Some(byte) => Ok(Block::Unknown(byte)),
        None => Err(GifError::TruncatedInput { offset: cursor.position(), wanted: 1 }),
    }
}

/// Introducer, label and the sub-block stream that follows.
pub fn read_extension<'a>(cursor: &mut Cursor<'a>) -> GifResult<&'a [u8]> {
    let start = cursor.position();
    cursor.skip(2)?;
    cursor.skip_sub_blocks()?;
    Ok(cursor.since(start))
}

/// From the image separator through the image data terminator.
pub fn read_image<'a>(cursor: &mut Cursor<'a>) -> GifResult<&'a [u8]> {
    let start = cursor.position();
    cursor.skip(IMAGE_DESCRIPTOR_LENGTH - 1)?;
    let packed = cursor.read_u8()?;
    if packed & 0x80 != 0 {
        cursor.skip(super::color_table_bytes(packed))?;
    }
    // LZW minimum code size
    cursor.skip(1)?;
    cursor.skip_sub_blocks()?;
    Ok(cursor.since(start))
}

/// Whether an application extension carries the NETSCAPE identifier.
pub fn is_netscape(extension: &[u8]) -> bool {
    extension.len() >= 11
        && extension[1] == APPLICATION_LABEL
        && &extension[3 .. 11] == NETSCAPE_IDENTIFIER
}

/// Loop count of a NETSCAPE looping extension.
pub fn netscape_loop_count(extension: &[u8]) -> Option<u16> {
    if is_netscape(extension) && extension.len() >= 18 && extension[14] == 3 && extension[15] == 1 {
        Some(LittleEndian::read_u16(&extension[16 .. 18]))
    } else {
        None
    }
}

pub fn graphic_control_packed(disposal: DisposalMethod, transparent: bool) -> u8 {
    (disposal.to_u8() << 2) | (transparent as u8)
}

pub fn write_graphic_control(out: &mut Vec<u8>, packed: u8, delay: u16, transparent_index: u8) {
    out.extend_from_slice(&[EXTENSION_INTRODUCER, GRAPHIC_CONTROL_LABEL, 0x04, packed]);
    write_u16(out, delay);
    out.extend_from_slice(&[transparent_index, 0x00]);
}

pub fn write_netscape_loop(out: &mut Vec<u8>, loop_count: u16) {
    out.extend_from_slice(&[EXTENSION_INTRODUCER, APPLICATION_LABEL, 0x0B]);
    out.extend_from_slice(NETSCAPE_IDENTIFIER);
    out.extend_from_slice(NETSCAPE_AUTHENTICATION);
    out.extend_from_slice(&[0x03, 0x01]);
    write_u16(out, loop_count);
    out.push(0x00);
}

fn write_u16(out: &mut Vec<u8>, value: u16) {
    let mut word = [0;2];
    LittleEndian::write_u16(&mut word, value);
    out.extend_from_slice(&word);
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_graphic_control() {
        let mut out = vec![];
        write_graphic_control(&mut out, graphic_control_packed(DisposalMethod::Background, true), 300, 7);
        assert_eq!(out, [0x21, 0xF9, 0x04, 0x09, 0x2C, 0x01, 0x07, 0x00]);
        assert_eq!(out.len(), GRAPHIC_CONTROL_LENGTH);
    }

    #[test]
    fn test_netscape_loop() {
        let mut out = vec![];
        write_netscape_loop(&mut out, 0x0102);
        assert_eq!(&out[.. 3], &[0x21, 0xFF, 0x0B]);
        assert_eq!(&out[3 .. 14], b"NETSCAPE2.0");
        assert_eq!(&out[14 ..], &[0x03, 0x01, 0x02, 0x01, 0x00]);
        assert!(is_netscape(&out));
        assert_eq!(netscape_loop_count(&out), Some(0x0102));

        let mut cursor = Cursor::new(&out);
        assert_eq!(read_extension(&mut cursor).unwrap(), &out[..]);
    }

    #[test]
    fn test_read_image_with_local_table() {
        let image = [
            0x2C, 0x01, 0x00, 0x02, 0x00, 0x01, 0x00, 0x01, 0x00, 0x80,
            0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF,
            0x02, 0x02, 0x44, 0x01, 0x00,
            0x3B,
        ];
        let mut cursor = Cursor::new(&image);
        match read_block(&mut cursor).unwrap() {
            Block::Image(bytes) => assert_eq!(bytes, &image[.. 21]),
            other => panic!("unexpected: {:?}", other),
        }
        assert_eq!(read_block(&mut cursor).unwrap(), Block::Trailer);
    }

    #[test]
    fn test_read_unknown_does_not_consume() {
        let mut cursor = Cursor::new(&[0x42, 0x3B]);
        assert_eq!(read_block(&mut cursor).unwrap(), Block::Unknown(0x42));
        assert_eq!(cursor.position(), 0);
    }
}
