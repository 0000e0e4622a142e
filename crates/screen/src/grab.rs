//! Region screenshots using GDI

use crate::{ScreenRegion, ScreenResult};
use image::RgbaImage;

/// Something that can copy a region of the virtual desktop
pub trait ScreenSource: Send {
    /// Capture exactly `region`, which is given in virtual desktop coordinates
    fn grab(&self, region: &ScreenRegion) -> ScreenResult<RgbaImage>;
}

/// Screen source backed by a GDI BitBlt from the desktop DC.
///
/// The desktop DC spans every monitor, so regions may cross monitor
/// boundaries and start at negative coordinates.
#[derive(Debug, Default, Clone, Copy)]
pub struct GdiScreen;

impl GdiScreen {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(windows)]
impl ScreenSource for GdiScreen {
    fn grab(&self, region: &ScreenRegion) -> ScreenResult<RgbaImage> {
        use crate::{FrameData, ScreenError};
        use windows::Win32::Graphics::Gdi::{
            BitBlt, CreateCompatibleBitmap, CreateCompatibleDC, DeleteDC, DeleteObject, GetDC,
            GetDIBits, ReleaseDC, SelectObject, BITMAPINFO, BITMAPINFOHEADER, BI_RGB,
            CAPTUREBLT, DIB_RGB_COLORS, ROP_CODE, SRCCOPY,
        };

        let width = region.width() as i32;
        let height = region.height() as i32;

        log::debug!("Grabbing region {} ({}x{})", region, width, height);

        unsafe {
            let screen_dc = GetDC(None);
            if screen_dc.is_invalid() {
                return Err(ScreenError::Gdi("Failed to get screen DC".into()));
            }

            let mem_dc = CreateCompatibleDC(screen_dc);
            let bitmap = CreateCompatibleBitmap(screen_dc, width, height);
            let old_bitmap = SelectObject(mem_dc, bitmap);

            let blit = BitBlt(
                mem_dc,
                0,
                0,
                width,
                height,
                screen_dc,
                region.left(),
                region.top(),
                ROP_CODE(SRCCOPY.0 | CAPTUREBLT.0),
            );

            let mut bmi = BITMAPINFO {
                bmiHeader: BITMAPINFOHEADER {
                    biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
                    biWidth: width,
                    biHeight: -height, // Top-down DIB
                    biPlanes: 1,
                    biBitCount: 32,
                    biCompression: BI_RGB.0,
                    biSizeImage: 0,
                    biXPelsPerMeter: 0,
                    biYPelsPerMeter: 0,
                    biClrUsed: 0,
                    biClrImportant: 0,
                },
                bmiColors: [Default::default()],
            };

            let mut data = vec![0u8; width as usize * height as usize * 4];

            // Deselect before GetDIBits, the bitmap must not be selected into a DC
            SelectObject(mem_dc, old_bitmap);

            let lines = if blit.is_ok() {
                GetDIBits(
                    mem_dc,
                    bitmap,
                    0,
                    height as u32,
                    Some(data.as_mut_ptr() as *mut _),
                    &mut bmi,
                    DIB_RGB_COLORS,
                )
            } else {
                0
            };

            let _ = DeleteObject(bitmap);
            let _ = DeleteDC(mem_dc);
            ReleaseDC(None, screen_dc);

            blit?;
            if lines != height {
                return Err(ScreenError::Gdi(format!(
                    "GetDIBits copied {} of {} lines",
                    lines, height
                )));
            }

            FrameData {
                data,
                width: width as u32,
                height: height as u32,
            }
            .into_rgba_image()
            .ok_or(ScreenError::InvalidRegion)
        }
    }
}

#[cfg(not(windows))]
impl ScreenSource for GdiScreen {
    fn grab(&self, _region: &ScreenRegion) -> ScreenResult<RgbaImage> {
        Err(crate::ScreenError::NotSupported)
    }
}
