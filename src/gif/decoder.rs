
use byteorder::{ByteOrder, LittleEndian};
use log::{debug, warn};

use super::blocks::{self, APPLICATION_LABEL, COMMENT_LABEL, EXTENSION_INTRODUCER, GRAPHIC_CONTROL_LABEL, IMAGE_SEPARATOR, TRAILER};
use super::cursor::Cursor;
use super::errors::{GifError, GifResult};
use super::header::parse_header;
use super::raster;
use super::sniff::is_animated;
use super::{color_table_bytes, Animation, ColorTable, DecodeOptions, Frame, Header, RasterMode};



/// Splits an animated GIF into its frames.
///
/// Frame metadata and image bytes are taken verbatim from the buffer;
/// rasters are only produced when `options.raster` asks for them.
pub fn decode(buffer: &[u8], options: &DecodeOptions) -> GifResult<Animation> {
    if !is_animated(buffer) {
        return Err(GifError::NotAnimated);
    }

    let mut decoder = Decoder::new(buffer, options.strict)?;
    decoder.read_leading_frames()?;
    decoder.read_remaining_frames()?;
    let mut animation = decoder.finish();

    if options.raster != RasterMode::Skip {
        raster::materialize(&mut animation, options.raster)?;
    }

    Ok(animation)
}


struct Decoder<'a> {
    cursor: Cursor<'a>,
    header: Header,
    strict: bool,
    graphic_control: Option<&'a [u8]>,
    application_data: Option<&'a [u8]>,
    comment_data: Option<&'a [u8]>,
    loop_count: Option<u16>,
    frames: Vec<Frame>,
    canvas_width: u16,
    canvas_height: u16,
}


impl<'a> Decoder<'a> {
    fn new(buffer: &'a [u8], strict: bool) -> GifResult<Self> {
        let header = parse_header(buffer)?;
        let cursor = Cursor::at(buffer, header.len());
        Ok(Decoder {
            cursor,
            canvas_width: header.screen.width,
            canvas_height: header.screen.height,
            header,
            strict,
            graphic_control: None,
            application_data: None,
            comment_data: None,
            loop_count: None,
            frames: vec![],
        })
    }

    /// Most encoders put the loop extension and the first graphic control
    /// extension in a fixed order in front of the first two images.
    fn read_leading_frames(&mut self) -> GifResult<()> {
        self.read_graphic_control()?;
        self.read_application()?;
        self.read_application()?;
        self.read_image()?;
        self.read_graphic_control()?;
        self.read_comment()?;
        self.read_application()?;
        self.read_image()?;
        Ok(())
    }

    fn read_remaining_frames(&mut self) -> GifResult<()> {
        while let Some(byte) = self.cursor.peek() {
            if byte == TRAILER {
                break;
            }
            let consumed = self.read_comment()?
                || self.read_graphic_control()?
                || self.read_image()?
                || self.read_application()?
                || self.read_other_extension()?;
            if !consumed {
                self.skip_unknown(byte)?;
            }
        }
        Ok(())
    }

    fn skip_unknown(&mut self, byte: u8) -> GifResult<()> {
        let offset = self.cursor.position();
        if self.strict {
            return Err(GifError::UnexpectedByte { offset, byte });
        }
        warn!("Skipping unexpected byte 0x{:02X} at {}", byte, offset);
        self.cursor.skip(1)
    }

    fn at_extension(&self, label: u8) -> bool {
        self.cursor.peek_pair() == Some((EXTENSION_INTRODUCER, label))
    }

    fn read_graphic_control(&mut self) -> GifResult<bool> {
        if !self.at_extension(GRAPHIC_CONTROL_LABEL) {
            return Ok(false);
        }
        self.graphic_control = Some(blocks::read_extension(&mut self.cursor)?);
        Ok(true)
    }

    fn read_application(&mut self) -> GifResult<bool> {
        if !self.at_extension(APPLICATION_LABEL) {
            return Ok(false);
        }
        let extension = blocks::read_extension(&mut self.cursor)?;
        if let Some(loop_count) = blocks::netscape_loop_count(extension) {
            debug!("Loop count: {}", loop_count);
            self.loop_count = Some(loop_count);
        }
        self.application_data = Some(extension);
        Ok(true)
    }

    fn read_comment(&mut self) -> GifResult<bool> {
        if !self.at_extension(COMMENT_LABEL) {
            return Ok(false);
        }
        self.comment_data = Some(blocks::read_extension(&mut self.cursor)?);
        Ok(true)
    }

    /// Plain text and unregistered extensions carry nothing we keep.
    fn read_other_extension(&mut self) -> GifResult<bool> {
        match self.cursor.peek_pair() {
            Some((EXTENSION_INTRODUCER, label)) => {
                debug!("Skipping extension 0x{:02X} at {}", label, self.cursor.position());
                blocks::read_extension(&mut self.cursor)?;
                Ok(true)
            },
            _ => Ok(false),
        }
    }

    fn read_image(&mut self) -> GifResult<bool> {
        if self.cursor.peek() != Some(IMAGE_SEPARATOR) {
            return Ok(false);
        }
        let image_data = blocks::read_image(&mut self.cursor)?;
        let graphic_control = self.graphic_control.take().unwrap_or(&[]);
        let frame = parse_frame(self.frames.len(), graphic_control, image_data);

        self.canvas_width = self.canvas_width.max(frame.width);
        self.canvas_height = self.canvas_height.max(frame.height);
        self.frames.push(frame);
        Ok(true)
    }

    fn finish(self) -> Animation {
        Animation {
            header: self.header,
            loop_count: self.loop_count,
            application_data: self.application_data.map(<[u8]>::to_vec),
            comment_data: self.comment_data.map(<[u8]>::to_vec),
            frames: self.frames,
            canvas_width: self.canvas_width,
            canvas_height: self.canvas_height,
        }
    }
}


/// Frame fields from an already-read graphic control extension (empty if
/// the image had none) and image block.
fn parse_frame(index: usize, graphic_control: &[u8], image_data: &[u8]) -> Frame {
    let control = |offset: usize| graphic_control.get(offset).cloned().unwrap_or(0);
    let control_packed = control(3);
    let image_packed = image_data[9];
    let word = |offset: usize| LittleEndian::read_u16(&image_data[offset .. offset + 2]);

    let local_color_table = image_packed & 0x80 != 0;
    let color_table_size = color_table_bytes(image_packed);
    let (color_table, lzw_at) = if local_color_table {
        let table = &image_data[blocks::IMAGE_DESCRIPTOR_LENGTH .. blocks::IMAGE_DESCRIPTOR_LENGTH + color_table_size];
        (Some(ColorTable::from_bytes(table)), blocks::IMAGE_DESCRIPTOR_LENGTH + color_table_size)
    } else {
        (None, blocks::IMAGE_DESCRIPTOR_LENGTH)
    };

    Frame {
        index,
        delay: u16::from(control(4)) | u16::from(control(5)) << 8,
        disposal: (control_packed >> 2) & 0x07,
        user_input: (control_packed >> 1) & 0x01 == 1,
        transparent: control_packed & 0x01 == 1,
        transparent_index: control(6),
        left: word(1),
        top: word(3),
        width: word(5),
        height: word(7),
        local_color_table,
        interlaced: image_packed & 0x40 != 0,
        sorted: image_packed & 0x20 != 0,
        color_table_size,
        color_table,
        lzw_code_size: image_data[lzw_at],
        graphic_control: graphic_control.to_vec(),
        image_data: image_data.to_vec(),
        raster: None,
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frame() {
        let graphic_control = [0x21, 0xF9, 0x04, 0x07, 0x2C, 0x01, 0x05, 0x00];
        let image = [
            0x2C, 0x01, 0x00, 0x02, 0x00, 0x03, 0x00, 0x04, 0x00, 0xE0,
            0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF,
            0x02, 0x02, 0x44, 0x01, 0x00,
        ];
        let frame = parse_frame(4, &graphic_control, &image);
        assert_eq!(frame.index, 4);
        assert_eq!(frame.delay, 300);
        assert_eq!(frame.disposal, 1);
        assert!(frame.user_input);
        assert!(frame.transparent);
        assert_eq!(frame.transparent_index, 5);
        assert_eq!((frame.left, frame.top, frame.width, frame.height), (1, 2, 3, 4));
        assert!(frame.local_color_table);
        assert!(frame.interlaced);
        assert!(frame.sorted);
        assert_eq!(frame.color_table_size, 6);
        assert_eq!(frame.color_table.unwrap().len(), 2);
        assert_eq!(frame.lzw_code_size, 2);
    }

    #[test]
    fn test_parse_frame_without_graphic_control() {
        let image = [
            0x2C, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00,
            0x02, 0x02, 0x44, 0x01, 0x00,
        ];
        let frame = parse_frame(0, &[], &image);
        assert_eq!(frame.delay, 0);
        assert_eq!(frame.disposal, 0);
        assert!(!frame.transparent);
        assert!(!frame.local_color_table);
        assert!(frame.color_table.is_none());
        assert_eq!(frame.lzw_code_size, 2);
        assert!(frame.graphic_control.is_empty());
    }
}
