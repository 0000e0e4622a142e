//! Overlay window implementation

use crate::{OverlayResult, RegionSelector, SelectionOutcome};

/// Full-screen, semi-transparent, topmost window covering the virtual desktop.
///
/// Each call to [`OverlayWindow::show`] is one capture session. The window is
/// destroyed before `show` returns.
#[derive(Debug, Default, Clone, Copy)]
pub struct OverlayWindow;

impl RegionSelector for OverlayWindow {
    fn select(&mut self) -> OverlayResult<SelectionOutcome> {
        Self::show()
    }
}

#[cfg(not(windows))]
impl OverlayWindow {
    pub fn show() -> OverlayResult<SelectionOutcome> {
        Err(crate::OverlayError::NotSupported)
    }
}

#[cfg(windows)]
mod win32 {
    use super::OverlayWindow;
    use crate::{
        render::OverlayRenderer, selection::DragSelection, CancelReason, OverlayResult,
        SelectionOutcome,
    };
    use screen::VirtualDesktop;
    use std::cell::RefCell;
    use windows::core::{w, PCWSTR};
    use windows::Win32::Foundation::{COLORREF, HINSTANCE, HWND, LPARAM, LRESULT, WPARAM};
    use windows::Win32::Graphics::Gdi::{InvalidateRect, UpdateWindow};
    use windows::Win32::System::LibraryLoader::GetModuleHandleW;
    use windows::Win32::UI::Input::KeyboardAndMouse::{ReleaseCapture, SetCapture};
    use windows::Win32::UI::WindowsAndMessaging::{
        CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW, GetMessageW,
        LoadCursorW, RegisterClassExW, SetForegroundWindow, SetLayeredWindowAttributes,
        ShowWindow, TranslateMessage, CS_HREDRAW, CS_VREDRAW, IDC_CROSS, LWA_ALPHA, MSG, SW_SHOW,
        WM_CLOSE, WM_DESTROY, WM_ERASEBKGND, WM_KEYDOWN, WM_LBUTTONDOWN, WM_LBUTTONUP,
        WM_MOUSEMOVE, WM_PAINT, WNDCLASSEXW, WS_EX_LAYERED, WS_EX_TOOLWINDOW, WS_EX_TOPMOST,
        WS_POPUP,
    };

    thread_local! {
        static OVERLAY_STATE: RefCell<Option<DragSelection>> = const { RefCell::new(None) };
    }

    /// Roughly 30% opaque
    const OVERLAY_ALPHA: u8 = 77;

    impl OverlayWindow {
        const CLASS_NAME: PCWSTR = w!("ChoppingOverlay");

        /// Create and show overlay window, block until the session ends
        pub fn show() -> OverlayResult<SelectionOutcome> {
            let desktop = VirtualDesktop::current()?;

            OVERLAY_STATE.with(|s| {
                *s.borrow_mut() = Some(DragSelection::new(desktop));
            });

            let run = unsafe { Self::run(&desktop) };

            let selection = OVERLAY_STATE.with(|s| s.borrow_mut().take());
            run?;

            Ok(selection
                .and_then(DragSelection::into_outcome)
                .unwrap_or(SelectionOutcome::Cancelled(CancelReason::Closed)))
        }

        unsafe fn run(desktop: &VirtualDesktop) -> OverlayResult<()> {
            let hmodule = GetModuleHandleW(None)?;
            let hinstance = HINSTANCE(hmodule.0);

            let wc = WNDCLASSEXW {
                cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
                style: CS_HREDRAW | CS_VREDRAW,
                lpfnWndProc: Some(Self::wnd_proc),
                hInstance: hinstance,
                hCursor: LoadCursorW(None, IDC_CROSS)?,
                lpszClassName: Self::CLASS_NAME,
                ..Default::default()
            };

            // Fails harmlessly when the class survives from an earlier session
            RegisterClassExW(&wc);

            let hwnd = CreateWindowExW(
                WS_EX_TOPMOST | WS_EX_LAYERED | WS_EX_TOOLWINDOW,
                Self::CLASS_NAME,
                w!("Chopping Selection"),
                WS_POPUP,
                desktop.left,
                desktop.top,
                desktop.width as i32,
                desktop.height as i32,
                None,
                None,
                hinstance,
                None,
            )?;

            if let Err(e) = SetLayeredWindowAttributes(hwnd, COLORREF(0), OVERLAY_ALPHA, LWA_ALPHA)
            {
                let _ = DestroyWindow(hwnd);
                return Err(e.into());
            }

            let _ = ShowWindow(hwnd, SW_SHOW);
            let _ = SetForegroundWindow(hwnd);
            let _ = UpdateWindow(hwnd);

            log::debug!("Overlay shown over {:?}", desktop);

            // Message loop
            let mut msg = MSG::default();
            loop {
                let ret = GetMessageW(&mut msg, None, 0, 0);
                if !ret.as_bool() {
                    break;
                }
                let _ = TranslateMessage(&msg);
                DispatchMessageW(&msg);

                if Self::is_finished() {
                    break;
                }
            }

            OVERLAY_STATE.with(|s| {
                if let Some(outcome) = s.borrow().as_ref().and_then(DragSelection::outcome) {
                    log::debug!("Overlay closed: {:?}", outcome);
                }
            });

            let _ = DestroyWindow(hwnd);
            Ok(())
        }

        fn is_finished() -> bool {
            OVERLAY_STATE.with(|s| {
                s.borrow()
                    .as_ref()
                    .map(DragSelection::is_finished)
                    .unwrap_or(true)
            })
        }

        fn with_selection(f: impl FnOnce(&mut DragSelection)) {
            OVERLAY_STATE.with(|s| {
                if let Some(ref mut selection) = *s.borrow_mut() {
                    f(selection);
                }
            });
        }

        unsafe extern "system" fn wnd_proc(
            hwnd: HWND,
            msg: u32,
            wparam: WPARAM,
            lparam: LPARAM,
        ) -> LRESULT {
            match msg {
                WM_PAINT => {
                    let outline = OVERLAY_STATE.with(|s| {
                        s.borrow().as_ref().and_then(DragSelection::outline)
                    });
                    OverlayRenderer::render(hwnd, outline);
                    LRESULT(0)
                }

                WM_ERASEBKGND => LRESULT(1),

                WM_LBUTTONDOWN => {
                    let (x, y) = point_from_lparam(lparam);
                    Self::with_selection(|s| s.press(x, y));
                    // Keep receiving mouse input when the pointer leaves the overlay
                    SetCapture(hwnd);
                    let _ = InvalidateRect(hwnd, None, false);
                    LRESULT(0)
                }

                WM_MOUSEMOVE => {
                    let (x, y) = point_from_lparam(lparam);
                    Self::with_selection(|s| s.drag(x, y));
                    let _ = InvalidateRect(hwnd, None, false);
                    LRESULT(0)
                }

                WM_LBUTTONUP => {
                    let (x, y) = point_from_lparam(lparam);
                    let _ = ReleaseCapture();
                    Self::with_selection(|s| {
                        s.release(x, y);
                    });
                    LRESULT(0)
                }

                WM_KEYDOWN => {
                    const VK_ESCAPE: usize = 0x1B;

                    if wparam.0 == VK_ESCAPE {
                        Self::with_selection(|s| s.cancel(CancelReason::Escape));
                    }
                    LRESULT(0)
                }

                WM_CLOSE => {
                    Self::with_selection(|s| s.cancel(CancelReason::Closed));
                    LRESULT(0)
                }

                WM_DESTROY => LRESULT(0),

                _ => DefWindowProcW(hwnd, msg, wparam, lparam),
            }
        }
    }

    /// Client coordinates are signed; they go negative while the mouse is captured
    fn point_from_lparam(lparam: LPARAM) -> (i32, i32) {
        let x = (lparam.0 & 0xFFFF) as i16 as i32;
        let y = ((lparam.0 >> 16) & 0xFFFF) as i16 as i32;
        (x, y)
    }
}
