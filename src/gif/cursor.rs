
use byteorder::{ByteOrder, LittleEndian};

use super::errors::{GifError, GifResult};



/// Read position over a borrowed GIF buffer.
///
/// The position only ever moves forward and never past the end of the
/// buffer, so every walk over the buffer terminates.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    buffer: &'a [u8],
    position: usize,
}


impl<'a> Cursor<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Cursor { buffer, position: 0 }
    }

    pub fn at(buffer: &'a [u8], position: usize) -> Self {
        Cursor { buffer, position }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.position)
    }

    pub fn is_eof(&self) -> bool {
        self.remaining() == 0
    }

    pub fn peek(&self) -> Option<u8> {
        self.buffer.get(self.position).cloned()
    }

    /// Two bytes ahead, without consuming them.
    pub fn peek_pair(&self) -> Option<(u8, u8)> {
        match self.buffer.get(self.position .. self.position + 2) {
            Some(pair) => Some((pair[0], pair[1])),
            None => None,
        }
    }

    pub fn read_u8(&mut self) -> GifResult<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u16(&mut self) -> GifResult<u16> {
        Ok(LittleEndian::read_u16(self.take(2)?))
    }

    pub fn take(&mut self, length: usize) -> GifResult<&'a [u8]> {
        let end = self.position.checked_add(length).filter(|end| *end <= self.buffer.len());
        match end {
            Some(end) => {
                let result = &self.buffer[self.position .. end];
                self.position = end;
                Ok(result)
            },
            None => Err(GifError::TruncatedInput { offset: self.position, wanted: length }),
        }
    }

    pub fn skip(&mut self, length: usize) -> GifResult<()> {
        self.take(length).map(|_| ())
    }

    /// Consumes a sub-block stream: length-prefixed chunks up to and
    /// including the zero-length terminator.
    pub fn skip_sub_blocks(&mut self) -> GifResult<()> {
        loop {
            let length = self.read_u8()?;
            if length == 0 {
                return Ok(());
            }
            self.skip(length as usize)?;
        }
    }

    /// Bytes between `start` and the current position.
    pub fn since(&self, start: usize) -> &'a [u8] {
        &self.buffer[start.min(self.position) .. self.position]
    }
}
