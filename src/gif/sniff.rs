
use super::blocks::{EXTENSION_INTRODUCER, IMAGE_SEPARATOR};



/// Bytes examined per step of the animation sniff
pub const CHUNK_SIZE: usize = 100 * 1024;

/// Block terminator followed by a graphic control extension introducer
const GRAPHIC_CONTROL_MARK: [u8;4] = [0x00, 0x21, 0xF9, 0x04];
/// Mark, packed/delay/index, terminator, next block introducer
const FRAME_PATTERN_LENGTH: usize = 10;


/// Whether `buffer` holds at least two graphic control extensions that are
/// each followed by an image or another extension.
///
/// The buffer is walked in `CHUNK_SIZE` steps and the walk stops as soon as
/// two frames have been seen. A match may straddle a chunk boundary.
pub fn is_animated(buffer: &[u8]) -> bool {
    let mut count = 0;
    let mut next = 0;
    let mut chunk_start = 0;

    while chunk_start < buffer.len() && count < 2 {
        let chunk_end = (chunk_start + CHUNK_SIZE).min(buffer.len());
        let mut position = next.max(chunk_start);
        while position < chunk_end {
            if is_frame_pattern(&buffer[position ..]) {
                count += 1;
                position += FRAME_PATTERN_LENGTH;
            } else {
                position += 1;
            }
        }
        next = position;
        chunk_start = chunk_end;
    }

    count > 1
}

/// Number of graphic control extensions in `buffer`, without parsing it.
pub fn count_frames(buffer: &[u8]) -> usize {
    let mut count = 0;
    let mut position = 0;
    while position + GRAPHIC_CONTROL_MARK.len() <= buffer.len() {
        if buffer[position ..].starts_with(&GRAPHIC_CONTROL_MARK) {
            count += 1;
            position += GRAPHIC_CONTROL_MARK.len();
        } else {
            position += 1;
        }
    }
    count
}

fn is_frame_pattern(window: &[u8]) -> bool {
    window.len() >= FRAME_PATTERN_LENGTH
        && window.starts_with(&GRAPHIC_CONTROL_MARK)
        && window[8] == 0x00
        && (window[9] == IMAGE_SEPARATOR || window[9] == EXTENSION_INTRODUCER)
}


#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: [u8;10] = [0x00, 0x21, 0xF9, 0x04, 0x08, 0x0A, 0x00, 0x00, 0x00, 0x2C];

    #[test]
    fn test_static() {
        let mut buffer = vec![0xAA; 32];
        buffer.extend_from_slice(&FRAME);
        assert!(!is_animated(&buffer));
        assert_eq!(count_frames(&buffer), 1);
    }

    #[test]
    fn test_animated() {
        let mut buffer = FRAME.to_vec();
        buffer.extend_from_slice(&[0x01, 0x02, 0x03]);
        buffer.extend_from_slice(&FRAME);
        assert!(is_animated(&buffer));
        assert_eq!(count_frames(&buffer), 2);
    }

    #[test]
    fn test_mark_without_following_block() {
        let mut buffer = FRAME.to_vec();
        let mut other = FRAME.to_vec();
        other[9] = 0x3B;
        buffer.extend_from_slice(&other);
        assert!(!is_animated(&buffer));
        assert_eq!(count_frames(&buffer), 2);
    }

    #[test]
    fn test_match_across_chunk_boundary() {
        let mut buffer = FRAME.to_vec();
        buffer.resize(CHUNK_SIZE - 4, 0xAA);
        buffer.extend_from_slice(&FRAME);
        assert!(is_animated(&buffer));
    }
}
