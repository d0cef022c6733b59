pub const DEFAULT_THRESHOLD: f64 = 500.0;

/// Whether the scroll-to-top control should show at this vertical offset.
pub fn is_visible(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}
