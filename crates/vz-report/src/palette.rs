//! Color palettes for report charts

/// Fixed 5-color palettes, selected by index
pub static COLOR_SCHEMES: [[&str; 5]; 10] = [
    ["#3b82f6", "#8b5cf6", "#10b981", "#f59e0b", "#ef4444"],
    ["#8b5cf6", "#ec4899", "#3b82f6", "#10b981", "#f59e0b"],
    ["#10b981", "#3b82f6", "#8b5cf6", "#f59e0b", "#ef4444"],
    ["#f59e0b", "#ef4444", "#ec4899", "#8b5cf6", "#3b82f6"],
    ["#ec4899", "#8b5cf6", "#3b82f6", "#10b981", "#f59e0b"],
    ["#6366f1", "#8b5cf6", "#3b82f6", "#10b981", "#f59e0b"],
    ["#ef4444", "#f59e0b", "#ec4899", "#8b5cf6", "#3b82f6"],
    ["#14b8a6", "#10b981", "#3b82f6", "#8b5cf6", "#f59e0b"],
    ["#eab308", "#f59e0b", "#10b981", "#3b82f6", "#8b5cf6"],
    ["#06b6d4", "#3b82f6", "#10b981", "#8b5cf6", "#f59e0b"],
];

/// Get a palette by index
pub fn palette(index: usize) -> Option<&'static [&'static str; 5]> {
    COLOR_SCHEMES.get(index)
}

/// Color of series `series` within a palette, cycling past the fifth
pub fn series_color(scheme: usize, series: usize) -> Option<&'static str> {
    palette(scheme).map(|colors| colors[series % colors.len()])
}
