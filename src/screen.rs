//! Primary screen size lookup
//!
//! Sizes are in logical pixels, the unit the window commands take.

use crate::geometry::Dimensions;

/// Used when the platform can't report a size
pub const FALLBACK_SCREEN: Dimensions = Dimensions {
    width: 1920,
    height: 1080,
};

/// DPI of an unscaled (100%) display
pub const BASE_DPI: u32 = 96;

/// Convert a physical pixel size to logical pixels at `dpi`
pub fn to_logical(physical: Dimensions, dpi: u32) -> Dimensions {
    if dpi == 0 {
        return physical;
    }
    let scale = |value: u32| ((u64::from(value) * u64::from(BASE_DPI)) / u64::from(dpi)) as u32;
    Dimensions::new(scale(physical.width), scale(physical.height))
}

/// Size of the primary screen in logical pixels
#[cfg(windows)]
pub fn primary_screen_size() -> Dimensions {
    use windows::Win32::UI::HiDpi::GetDpiForSystem;
    use windows::Win32::UI::WindowsAndMessaging::{GetSystemMetrics, SM_CXSCREEN, SM_CYSCREEN};

    let (width, height) = unsafe { (GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN)) };

    if width <= 0 || height <= 0 {
        tracing::warn!("GetSystemMetrics returned {}x{}, using fallback", width, height);
        return FALLBACK_SCREEN;
    }

    let dpi = unsafe { GetDpiForSystem() };
    let size = to_logical(Dimensions::new(width as u32, height as u32), dpi);
    tracing::debug!("Primary screen {}x{} at {} dpi", size.width, size.height, dpi);
    size
}

/// Size of the primary screen in logical pixels
#[cfg(not(windows))]
pub fn primary_screen_size() -> Dimensions {
    tracing::warn!(
        "Screen size query not supported on this platform, assuming {}x{}",
        FALLBACK_SCREEN.width,
        FALLBACK_SCREEN.height
    );
    FALLBACK_SCREEN
}
