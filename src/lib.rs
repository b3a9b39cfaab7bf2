
pub mod gif;

pub use crate::gif::decoder::decode;
pub use crate::gif::encoder::encode;
pub use crate::gif::errors::{GifError, GifResult};
pub use crate::gif::header::parse_header;
pub use crate::gif::sniff::{count_frames, is_animated};
pub use crate::gif::{
    Animation,
    ColorTable,
    DecodeOptions,
    DisposalMethod,
    EncodeOptions,
    Frame,
    Header,
    PaletteLookup,
    RasterMode,
    Rgb,
    ScreenDescriptor,
};
