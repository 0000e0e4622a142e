//! Raw frame data

use image::{ImageBuffer, RgbaImage};

/// Pixels copied from the screen, 32-bit BGRA, top-down
#[derive(Debug, Clone)]
pub struct FrameData {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl FrameData {
    /// Convert BGRA data to an RGBA image.
    ///
    /// GDI leaves the alpha byte at zero, so it is forced opaque.
    pub fn into_rgba_image(self) -> Option<RgbaImage> {
        let mut rgba_data = self.data;

        for chunk in rgba_data.chunks_exact_mut(4) {
            chunk.swap(0, 2);
            chunk[3] = 255;
        }

        ImageBuffer::from_raw(self.width, self.height, rgba_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bgra_to_rgba() {
        let frame = FrameData {
            data: vec![10, 20, 30, 0, 1, 2, 3, 0],
            width: 2,
            height: 1,
        };

        let img = frame.into_rgba_image().unwrap();
        assert_eq!(img.get_pixel(0, 0).0, [30, 20, 10, 255]);
        assert_eq!(img.get_pixel(1, 0).0, [3, 2, 1, 255]);
    }

    #[test]
    fn test_short_buffer_rejected() {
        let frame = FrameData {
            data: vec![0; 4],
            width: 2,
            height: 2,
        };
        assert!(frame.into_rgba_image().is_none());
    }
}
