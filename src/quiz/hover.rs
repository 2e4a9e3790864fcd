//! Hover-index resolution for the answer box.
//!
//! Placed thumbnails are treated as one left-to-right row: wrapping inside the
//! box is ignored for index purposes, so a pointer on a second visual row maps
//! to the same index as one far to the right on the first row.

/// Horizontal geometry of one answer slot.
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlotLayout {
    pub item_width: f64,
    pub item_spacing: f64, // left + right margin of a thumbnail
}

impl SlotLayout {
    pub fn slot_extent(&self) -> f64 {
        self.item_width + self.item_spacing
    }
}

impl Default for SlotLayout {
    fn default() -> Self {
        Self { item_width: 100.0, item_spacing: 10.0 }
    }
}

/// Pointer position relative to the answer box's bounding rect.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerSample {
    pub x: f64,
    pub y: f64,
}

impl PointerSample {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Index at which a dragged item would be inserted if dropped now.
///
/// Scans slots in order and returns the first one whose right boundary lies
/// strictly past `pointer_x`; a pointer exactly on a boundary lands after the
/// item. Past the last slot (or with no slots) the result is `len`.
pub fn resolve_insertion_index(pointer_x: f64, item_width: f64, item_spacing: f64, len: usize) -> usize {
    let extent = item_width + item_spacing;
    (0..len).find(|&i| extent * (i + 1) as f64 > pointer_x).unwrap_or(len)
}

/// Convenience wrapper taking the configured layout and a full pointer sample.
pub fn resolve_for(layout: &SlotLayout, sample: PointerSample, len: usize) -> usize {
    resolve_insertion_index(sample.x, layout.item_width, layout.item_spacing, len)
}
