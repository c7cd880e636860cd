/// Columns can not be dragged narrower than this, in pixels.
pub const MIN_COLUMN_WIDTH: u32 = 60;

/// A single drag of a column's resize handle.
///
/// It only lives from the press of the handle until its release,
/// the [`ListState`](crate::ListState) holds at most one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeGesture {
    column: String,
    start_x: i32,
    start_width: u32,
}

impl ResizeGesture {
    pub fn begin(column: impl Into<String>, pointer_x: i32, start_width: u32) -> Self {
        Self {
            column: column.into(),
            start_x: pointer_x,
            start_width,
        }
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    /// `max(MIN_COLUMN_WIDTH, start_width + (pointer_x - start_x))`
    pub fn width_at(&self, pointer_x: i32) -> u32 {
        let delta = i64::from(pointer_x) - i64::from(self.start_x);
        let width = i64::from(self.start_width) + delta;

        u32::try_from(width.max(i64::from(MIN_COLUMN_WIDTH))).unwrap_or(u32::MAX)
    }
}
