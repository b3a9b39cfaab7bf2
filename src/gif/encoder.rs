
use log::debug;

use super::blocks::{self, TRAILER};
use super::errors::{GifError, GifResult};
use super::validators::{validate_source, Source};
use super::{ColorTable, EncodeOptions, PaletteLookup, SIGNATURE_89A};



/// Assembles single-frame GIFs into one animated GIF.
///
/// `delays` are in centiseconds, one per frame.
pub fn encode<T: AsRef<[u8]>>(frames: &[T], delays: &[u16], options: &EncodeOptions) -> GifResult<Vec<u8>> {
    if frames.is_empty() || delays.is_empty() {
        return Err(GifError::EmptyInput);
    }
    if frames.len() != delays.len() {
        return Err(GifError::LengthMismatch(frames.len(), delays.len()));
    }

    let sources = frames
        .iter()
        .enumerate()
        .map(|(index, frame)| validate_source(index, frame.as_ref()))
        .collect::<GifResult<Vec<_>>>()?;

    let mut encoder = Encoder::new(options, &sources[0]);
    encoder.write_header();
    for (index, (source, delay)) in sources.iter().zip(delays).enumerate() {
        encoder.write_frame(index, source, *delay);
    }
    Ok(encoder.finish())
}


struct Encoder<'a> {
    buffer: Vec<u8>,
    first: &'a Source<'a>,
    options: &'a EncodeOptions,
}


impl<'a> Encoder<'a> {
    fn new(options: &'a EncodeOptions, first: &'a Source<'a>) -> Self {
        Encoder { buffer: vec![], first, options }
    }

    fn global_color_table(&self) -> Option<&'a ColorTable> {
        self.first.header.global_color_table.as_ref()
    }

    /// Without a global color table only the signature is written, and the
    /// animation does not loop.
    fn write_header(&mut self) {
        self.buffer.extend_from_slice(SIGNATURE_89A);

        if let Some(table) = self.global_color_table() {
            self.buffer.extend_from_slice(self.first.header.screen_descriptor_bytes());
            self.buffer.extend_from_slice(table.as_bytes());
            blocks::write_netscape_loop(&mut self.buffer, self.options.loop_count);
        }
    }

    fn write_frame(&mut self, index: usize, source: &Source, delay: u16) {
        let own_table = source.header.global_color_table.as_ref();

        self.write_graphic_control(index, own_table, delay);

        let descriptor_packed = source.descriptor_packed();
        match own_table {
            Some(table) if index > 0 && descriptor_packed & 0x80 == 0 => {
                if self.global_color_table() == Some(table) {
                    debug!("frame {}: palette matches the global color table", index);
                    self.buffer.extend_from_slice(source.descriptor);
                } else {
                    debug!("frame {}: embedding {} colors as a local color table", index, table.len());
                    let mut descriptor = source.descriptor.to_vec();
                    let last = descriptor.len() - 1;
                    descriptor[last] = (descriptor[last] | 0x80) & 0xF8 | table.size_exponent();
                    self.buffer.extend_from_slice(&descriptor);
                    self.buffer.extend_from_slice(table.as_bytes());
                }
            },
            _ => self.buffer.extend_from_slice(source.descriptor),
        }

        self.buffer.extend_from_slice(source.image_data);
    }

    fn write_graphic_control(&mut self, index: usize, own_table: Option<&ColorTable>, delay: u16) {
        let transparent_index = self.options.transparent_color.and_then(|color| {
            let table = match self.options.palette_lookup {
                PaletteLookup::FirstFrame => self.global_color_table(),
                PaletteLookup::CurrentFrame => own_table.or_else(|| self.global_color_table()),
            };
            table.and_then(|table| table.position(color))
        });

        if let Some(transparent_index) = transparent_index {
            debug!("frame {}: transparent color at index {}", index, transparent_index);
        }

        let packed = blocks::graphic_control_packed(self.options.disposal, transparent_index.is_some());
        blocks::write_graphic_control(
            &mut self.buffer,
            packed,
            delay,
            transparent_index.unwrap_or(0) as u8);
    }

    fn finish(mut self) -> Vec<u8> {
        self.buffer.push(TRAILER);
        self.buffer
    }
}
