
use super::cursor::Cursor;
use super::errors::{GifError, GifResult};
use super::{color_table_bytes, ColorTable, Header, ScreenDescriptor, SIGNATURE_87A, SIGNATURE_89A};



/// Signature plus logical screen descriptor
pub const SCREEN_DESCRIPTOR_END: usize = 13;


/// Parses the signature, logical screen descriptor and global color table.
///
/// Packed fields are taken as they are; only the signature is validated.
pub fn parse_header(buffer: &[u8]) -> GifResult<Header> {
    let mut cursor = Cursor::new(buffer);

    let signature = cursor.take(6)?;
    if signature != SIGNATURE_87A && signature != SIGNATURE_89A {
        return Err(GifError::InvalidSignature);
    }

    let screen = parse_screen_descriptor(&mut cursor)?;

    let global_color_table = if screen.global_color_table {
        let table = cursor.take(color_table_bytes(screen.table_size_exponent))?;
        Some(ColorTable::from_bytes(table))
    } else {
        None
    };

    Ok(Header {
        screen,
        global_color_table,
        bytes: cursor.since(0).to_vec(),
    })
}

fn parse_screen_descriptor(cursor: &mut Cursor) -> GifResult<ScreenDescriptor> {
    let width = cursor.read_u16()?;
    let height = cursor.read_u16()?;
    let packed = cursor.read_u8()?;
    let background_color_index = cursor.read_u8()?;
    let pixel_aspect_ratio = cursor.read_u8()?;

    Ok(ScreenDescriptor {
        width,
        height,
        global_color_table: packed & 0x80 != 0,
        color_resolution: (packed >> 4) & 0x07,
        sorted: packed & 0x08 != 0,
        table_size_exponent: packed & 0x07,
        background_color_index,
        pixel_aspect_ratio,
    })
}


impl Header {
    /// Signature, screen descriptor and global color table
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Width, height, packed fields, background index and aspect ratio.
    pub fn screen_descriptor_bytes(&self) -> &[u8] {
        &self.bytes[6 .. SCREEN_DESCRIPTOR_END]
    }
}
