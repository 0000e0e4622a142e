//! GDI rendering for overlay
#![cfg(windows)]

use windows::Win32::Foundation::{COLORREF, HWND, RECT};
use windows::Win32::Graphics::Gdi::{
    BeginPaint, BitBlt, CreateCompatibleBitmap, CreateCompatibleDC, CreatePen, CreateSolidBrush,
    DeleteDC, DeleteObject, EndPaint, FillRect, GetStockObject, Rectangle, SelectObject, HDC,
    NULL_BRUSH, PAINTSTRUCT, PS_SOLID, SRCCOPY,
};
use windows::Win32::UI::WindowsAndMessaging::GetClientRect;

const BACKGROUND: COLORREF = COLORREF(0x00000000); // Black
const OUTLINE: COLORREF = COLORREF(0x000000FF); // Red
const OUTLINE_WIDTH: i32 = 2;

/// Overlay renderer
pub struct OverlayRenderer;

impl OverlayRenderer {
    /// Paint the dimmed background and the live selection outline
    pub fn render(hwnd: HWND, outline: Option<(i32, i32, i32, i32)>) {
        unsafe {
            let mut ps = PAINTSTRUCT::default();
            let hdc = BeginPaint(hwnd, &mut ps);

            let mut client = RECT::default();
            let _ = GetClientRect(hwnd, &mut client);
            let width = client.right - client.left;
            let height = client.bottom - client.top;

            // Double buffered
            let mem_dc = CreateCompatibleDC(hdc);
            let bitmap = CreateCompatibleBitmap(hdc, width, height);
            let old_bitmap = SelectObject(mem_dc, bitmap);

            Self::draw_background(mem_dc, &client);
            if let Some(rect) = outline {
                Self::draw_outline(mem_dc, rect);
            }

            let _ = BitBlt(hdc, 0, 0, width, height, mem_dc, 0, 0, SRCCOPY);

            SelectObject(mem_dc, old_bitmap);
            let _ = DeleteObject(bitmap);
            let _ = DeleteDC(mem_dc);

            let _ = EndPaint(hwnd, &ps);
        }
    }

    unsafe fn draw_background(hdc: HDC, client: &RECT) {
        let brush = CreateSolidBrush(BACKGROUND);
        FillRect(hdc, client, brush);
        let _ = DeleteObject(brush);
    }

    unsafe fn draw_outline(hdc: HDC, (left, top, right, bottom): (i32, i32, i32, i32)) {
        let pen = CreatePen(PS_SOLID, OUTLINE_WIDTH, OUTLINE);
        let old_pen = SelectObject(hdc, pen);

        // Hollow rectangle
        let brush = GetStockObject(NULL_BRUSH);
        let old_brush = SelectObject(hdc, brush);

        let _ = Rectangle(hdc, left, top, right, bottom);

        SelectObject(hdc, old_brush);
        SelectObject(hdc, old_pen);
        let _ = DeleteObject(pen);
    }
}
