
use log::trace;

use super::blocks::{self, Block, APPLICATION_LABEL};
use super::cursor::Cursor;
use super::errors::{GifError, GifResult};
use super::header::parse_header;
use super::Header;



/// A single-frame GIF accepted as encoder input.
#[derive(Debug)]
pub struct Source<'a> {
    pub header: Header,
    /// Image separator and descriptor
    pub descriptor: &'a [u8],
    /// Everything after the descriptor up to the trailer
    pub image_data: &'a [u8],
}


/// Checks that `buffer` is a GIF that is not already animated and splits
/// it at its first image descriptor. Extensions in front of the image
/// (the source's own graphic control, comments) are dropped.
pub fn validate_source(index: usize, buffer: &[u8]) -> GifResult<Source> {
    let header = parse_header(buffer).map_err(|_| GifError::NotAGif(index))?;

    let mut cursor = Cursor::at(buffer, header.len());
    let mut descriptor_at = None;
    let mut body_end = buffer.len();

    loop {
        let position = cursor.position();
        if cursor.is_eof() {
            break;
        }
        match blocks::read_block(&mut cursor).map_err(|_| GifError::NotAGif(index))? {
            Block::Extension { label: APPLICATION_LABEL, bytes } if blocks::is_netscape(bytes) =>
                return Err(GifError::AlreadyAnimated(index)),
            Block::Extension { label, .. } =>
                trace!("source {}: extension 0x{:02X} at {}", index, label, position),
            Block::Image(_) => {
                if descriptor_at.is_none() {
                    descriptor_at = Some(position);
                }
            },
            Block::Trailer => {
                body_end = position;
                break;
            },
            Block::Unknown(_) => return Err(GifError::NotAGif(index)),
        }
    }

    let descriptor_at = descriptor_at.ok_or(GifError::NotAGif(index))?;
    let data_at = descriptor_at + blocks::IMAGE_DESCRIPTOR_LENGTH;

    Ok(Source {
        header,
        descriptor: &buffer[descriptor_at .. data_at],
        image_data: &buffer[data_at .. body_end],
    })
}


impl<'a> Source<'a> {
    /// Packed fields of the image descriptor
    pub fn descriptor_packed(&self) -> u8 {
        self.descriptor[blocks::IMAGE_DESCRIPTOR_LENGTH - 1]
    }
}
