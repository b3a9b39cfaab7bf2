
use byteorder::{ByteOrder, LittleEndian};
use image::{imageops, ImageFormat, RgbaImage};
use log::debug;

use super::errors::GifResult;
use super::{Animation, DisposalMethod, Frame, Header, RasterMode};



/// Decodes every frame of `animation` into `Frame::raster`.
///
/// In `Composite` mode each raster has the canvas size and the frame is drawn
/// at its offset; frames that keep their predecessor (disposal 1) are drawn
/// over the previous composite.
pub fn materialize(animation: &mut Animation, mode: RasterMode) -> GifResult<()> {
    if mode == RasterMode::Skip {
        return Ok(());
    }

    let (canvas_width, canvas_height) = (u32::from(animation.canvas_width), u32::from(animation.canvas_height));
    let mut previous: Option<RgbaImage> = None;

    for frame in animation.frames.iter_mut() {
        let decoded = decode_frame(&animation.header, frame)?;

        let raster = match mode {
            RasterMode::Composite => {
                let mut canvas = RgbaImage::new(canvas_width, canvas_height);
                if let (DisposalMethod::Keep, Some(previous)) = (frame.disposal_method(), previous.as_ref()) {
                    imageops::overlay(&mut canvas, previous, 0, 0);
                }
                let (left, top) = (u32::from(frame.left), u32::from(frame.top));
                if left < canvas_width && top < canvas_height {
                    imageops::overlay(&mut canvas, &decoded, left, top);
                } else {
                    debug!("frame {}: offset ({}, {}) outside the canvas", frame.index, left, top);
                }
                canvas
            },
            _ => decoded,
        };

        previous = Some(raster.clone());
        frame.raster = Some(raster);
    }

    Ok(())
}

/// The frame as its own GIF, with the screen resized to the frame and the
/// image moved to the origin.
fn frame_blob(header: &Header, frame: &Frame) -> Vec<u8> {
    let mut blob = frame.standalone_gif(header);

    LittleEndian::write_u16(&mut blob[6 .. 8], frame.width);
    LittleEndian::write_u16(&mut blob[8 .. 10], frame.height);

    let descriptor = header.len() + frame.graphic_control.len();
    for it in &mut blob[descriptor + 1 .. descriptor + 5] {
        *it = 0;
    }

    blob
}

fn decode_frame(header: &Header, frame: &Frame) -> GifResult<RgbaImage> {
    let blob = frame_blob(header, frame);
    let image = image::load_from_memory_with_format(&blob, ImageFormat::GIF)?;
    Ok(image.to_rgba())
}
