//! Virtual desktop bounds

use crate::ScreenResult;

/// Bounding box of every connected monitor.
///
/// The origin is negative when a monitor sits left of or above the primary one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualDesktop {
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
}

impl VirtualDesktop {
    pub fn new(left: i32, top: i32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Query the current virtual desktop bounds
    #[cfg(windows)]
    pub fn current() -> ScreenResult<Self> {
        use windows::Win32::UI::WindowsAndMessaging::{
            GetSystemMetrics, SM_CXVIRTUALSCREEN, SM_CYVIRTUALSCREEN, SM_XVIRTUALSCREEN,
            SM_YVIRTUALSCREEN,
        };

        let (left, top, width, height) = unsafe {
            (
                GetSystemMetrics(SM_XVIRTUALSCREEN),
                GetSystemMetrics(SM_YVIRTUALSCREEN),
                GetSystemMetrics(SM_CXVIRTUALSCREEN),
                GetSystemMetrics(SM_CYVIRTUALSCREEN),
            )
        };

        if width <= 0 || height <= 0 {
            return Err(crate::ScreenError::Gdi(
                "Virtual desktop has no size".into(),
            ));
        }

        let desktop = Self::new(left, top, width as u32, height as u32);
        log::debug!("Virtual desktop: {:?}", desktop);
        Ok(desktop)
    }

    #[cfg(not(windows))]
    pub fn current() -> ScreenResult<Self> {
        Err(crate::ScreenError::NotSupported)
    }

    /// Convert overlay-local coordinates to virtual desktop coordinates
    pub fn to_absolute(&self, x: i32, y: i32) -> (i32, i32) {
        (x + self.left, y + self.top)
    }

    /// Check whether an overlay-local point lies on the desktop
    pub fn contains_local(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as i64) < self.width as i64 && (y as i64) < self.height as i64
    }
}
