use quadbrot_core::IterationResult;

/// Stores per-pixel `IterationResult` data for a square grid.
///
/// This is the raw output of the renderer before coloring. Rows are indexed
/// by `j` (the imaginary axis), columns by `i`.
#[derive(Debug, Clone)]
pub struct IterationBuffer {
    pub grid_size: u32,
    pub data: Vec<IterationResult>,
}

impl IterationBuffer {
    pub fn new(grid_size: u32) -> Self {
        let size = grid_size as usize * grid_size as usize;
        Self {
            grid_size,
            data: vec![IterationResult::Interior; size],
        }
    }

    #[inline]
    pub fn get(&self, i: u32, j: u32) -> IterationResult {
        self.data[j as usize * self.grid_size as usize + i as usize]
    }

    /// Copy one computed row into place.
    pub fn put_row(&mut self, j: u32, row: &[IterationResult]) {
        debug_assert_eq!(row.len(), self.grid_size as usize);
        let start = j as usize * self.grid_size as usize;
        self.data[start..start + row.len()].copy_from_slice(row);
    }

    /// Number of interior (non-escaping) pixels.
    pub fn interior_count(&self) -> usize {
        self.data.iter().filter(|r| r.is_interior()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_interior() {
        let buf = IterationBuffer::new(3);
        assert_eq!(buf.data.len(), 9);
        assert_eq!(buf.interior_count(), 9);
    }

    #[test]
    fn put_row_fills_one_row() {
        let mut buf = IterationBuffer::new(3);
        let row = [IterationResult::Escaped { iterations: 4 }; 3];
        buf.put_row(1, &row);

        assert_eq!(buf.get(0, 1), IterationResult::Escaped { iterations: 4 });
        assert_eq!(buf.get(2, 1), IterationResult::Escaped { iterations: 4 });
        assert_eq!(buf.get(1, 0), IterationResult::Interior);
        assert_eq!(buf.get(1, 2), IterationResult::Interior);
        assert_eq!(buf.interior_count(), 6);
    }
}
