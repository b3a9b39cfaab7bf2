
use failure::Fail;
use image::ImageError;


pub type GifResult<T> = Result<T, GifError>;



#[derive(Fail, Debug)]
pub enum GifError {
    #[fail(display = "Animating an already animated source: frame={}", _0)]
    AlreadyAnimated(usize),
    #[fail(display = "No frames given")]
    EmptyInput,
    #[fail(display = "Invalid GIF signature")]
    InvalidSignature,
    #[fail(display = "Frame and delay counts differ: frames={}, delays={}", _0, _1)]
    LengthMismatch(usize, usize),
    #[fail(display = "Source is not a GIF image: frame={}", _0)]
    NotAGif(usize),
    #[fail(display = "Not an animated GIF")]
    NotAnimated,
    #[fail(display = "Raster error: {}", _0)]
    Raster(#[cause] ImageError),
    #[fail(display = "Truncated input: wanted {} bytes at offset {}", wanted, offset)]
    TruncatedInput { offset: usize, wanted: usize },
    #[fail(display = "Unexpected byte 0x{:02X} at offset {}", byte, offset)]
    UnexpectedByte { offset: usize, byte: u8 },
}

macro_rules! define_error {
    ($source:ty, $kind:tt) => {
        impl From<$source> for GifError {
            fn from(error: $source) -> GifError {
                GifError::$kind(error)
            }
        }
    }
}

define_error!(ImageError, Raster);
