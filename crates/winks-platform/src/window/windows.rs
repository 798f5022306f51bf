//! Windows implementation of the overlay window API using Win32.

use crate::{PlatformError, PlatformResult};
use std::ffi::OsString;
use std::os::windows::ffi::OsStringExt;
use std::ptr;
use windows_sys::Win32::Foundation::{BOOL, HWND, LPARAM, RECT, TRUE};
use windows_sys::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GetWindowRect as WinGetWindowRect, GetWindowTextLengthW, GetWindowTextW,
    IsWindow, IsWindowVisible, SetWindowPos, SystemParametersInfoW, SPI_GETWORKAREA,
    SWP_NOACTIVATE, SWP_NOSIZE, SWP_NOZORDER,
};
use winks_core::{Rect, ScreenPoint};

/// Visible, titled top-level windows as `(handle, title)`.
pub fn list_windows() -> Vec<(usize, String)> {
    let mut windows: Vec<(usize, String)> = Vec::new();

    unsafe {
        EnumWindows(
            Some(enum_window_callback),
            &mut windows as *mut Vec<(usize, String)> as LPARAM,
        );
    }

    windows
}

unsafe extern "system" fn enum_window_callback(hwnd: HWND, lparam: LPARAM) -> BOOL {
    let windows = &mut *(lparam as *mut Vec<(usize, String)>);

    if IsWindowVisible(hwnd) == 0 {
        return TRUE;
    }

    if let Some(title) = window_title(hwnd) {
        windows.push((hwnd as usize, title));
    }

    TRUE
}

unsafe fn window_title(hwnd: HWND) -> Option<String> {
    let title_len = GetWindowTextLengthW(hwnd);
    if title_len == 0 {
        return None;
    }

    let mut title_buf: Vec<u16> = vec![0; (title_len + 1) as usize];
    let copied = GetWindowTextW(hwnd, title_buf.as_mut_ptr(), title_buf.len() as i32);
    if copied == 0 {
        return None;
    }
    title_buf.truncate(copied as usize);
    Some(OsString::from_wide(&title_buf).to_string_lossy().into_owned())
}

pub fn is_window(handle: usize) -> bool {
    unsafe { IsWindow(handle as HWND) != 0 }
}

pub fn get_window_rect(handle: usize) -> Option<Rect> {
    unsafe {
        let hwnd = handle as HWND;
        let mut rect: RECT = std::mem::zeroed();

        if WinGetWindowRect(hwnd, &mut rect) == 0 {
            return None;
        }

        Some(rect_from_win32(&rect))
    }
}

pub fn move_window(handle: usize, origin: ScreenPoint) -> PlatformResult<()> {
    let ok = unsafe {
        SetWindowPos(
            handle as HWND,
            ptr::null_mut(),
            origin.x,
            origin.y,
            0,
            0,
            SWP_NOSIZE | SWP_NOZORDER | SWP_NOACTIVATE,
        )
    };
    if ok == 0 {
        return Err(PlatformError::InjectionFailed(format!(
            "SetWindowPos failed: {}",
            std::io::Error::last_os_error()
        )));
    }
    Ok(())
}

pub fn primary_work_area() -> Option<Rect> {
    unsafe {
        let mut rect: RECT = std::mem::zeroed();
        let ok = SystemParametersInfoW(
            SPI_GETWORKAREA,
            0,
            &mut rect as *mut RECT as *mut _,
            0,
        );
        if ok == 0 {
            return None;
        }
        Some(rect_from_win32(&rect))
    }
}

fn rect_from_win32(rect: &RECT) -> Rect {
    Rect::new(
        rect.left,
        rect.top,
        rect.right - rect.left,
        rect.bottom - rect.top,
    )
}
