use serde::{Deserialize, Serialize};

/// Dense N-dimensional grid stored row-major (last dimension fastest).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepGrid<T> {
    shape: Vec<usize>,
    cells: Vec<T>,
}

impl<T: Clone> SweepGrid<T> {
    /// Grid of `shape` with every cell set to `fill`
    pub fn new(shape: Vec<usize>, fill: T) -> Self {
        let len = shape.iter().product();
        Self {
            cells: vec![fill; len],
            shape,
        }
    }
}

impl<T> SweepGrid<T> {
    /// Wrap row-major `cells`; `None` if the length does not match `shape`
    pub fn from_cells(shape: Vec<usize>, cells: Vec<T>) -> Option<Self> {
        if cells.len() != shape.iter().product::<usize>() {
            return None;
        }
        Some(Self { cells, shape })
    }

    /// Grid of `shape` whose cells are `f(indices)`, called in row-major order
    pub fn from_fn(shape: Vec<usize>, mut f: impl FnMut(&[usize]) -> T) -> Self {
        let cells = GridIndices::new(&shape).map(|idx| f(&idx)).collect();
        Self { shape, cells }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Row-major offset of `indices`, or `None` when out of bounds
    pub fn flat_index(&self, indices: &[usize]) -> Option<usize> {
        if indices.len() != self.shape.len() {
            return None;
        }
        indices
            .iter()
            .zip(&self.shape)
            .try_fold(0, |acc, (&i, &n)| (i < n).then_some(acc * n + i))
    }

    pub fn get(&self, indices: &[usize]) -> Option<&T> {
        self.flat_index(indices).and_then(|i| self.cells.get(i))
    }

    /// Overwrite one cell; false when `indices` is out of bounds
    pub fn set(&mut self, indices: &[usize], value: T) -> bool {
        match self.flat_index(indices).and_then(|i| self.cells.get_mut(i)) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    /// Cells in row-major order
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    /// All index tuples in row-major order
    pub fn indices(&self) -> GridIndices {
        GridIndices::new(&self.shape)
    }

    /// (indices, cell) pairs in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Vec<usize>, &T)> {
        self.indices().zip(self.cells.iter())
    }

    /// Row `i` of a 2-D grid
    pub fn row(&self, i: usize) -> Option<&[T]> {
        if self.ndim() != 2 || i >= self.shape[0] {
            return None;
        }
        let cols = self.shape[1];
        self.cells.get(i * cols..(i + 1) * cols)
    }

    /// Column `j` of a 2-D grid
    pub fn column(&self, j: usize) -> Option<Vec<&T>> {
        if self.ndim() != 2 || j >= self.shape[1] {
            return None;
        }
        let cols = self.shape[1];
        (0..self.shape[0])
            .map(|i| self.cells.get(i * cols + j))
            .collect()
    }

    /// Same shape, cells transformed by `f`
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> SweepGrid<U> {
        SweepGrid {
            shape: self.shape.clone(),
            cells: self.cells.iter().map(f).collect(),
        }
    }
}

/// Row-major iterator over the index tuples of a grid
pub struct GridIndices {
    shape: Vec<usize>,
    current: Vec<usize>,
    done: bool,
}

impl GridIndices {
    fn new(shape: &[usize]) -> Self {
        Self {
            shape: shape.to_vec(),
            current: vec![0; shape.len()],
            done: shape.iter().product::<usize>() == 0,
        }
    }
}

impl Iterator for GridIndices {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self.current.clone();

        // Odometer increment, last dimension first
        self.done = true;
        for dim in (0..self.shape.len()).rev() {
            self.current[dim] += 1;
            if self.current[dim] < self.shape[dim] {
                self.done = false;
                break;
            }
            self.current[dim] = 0;
        }

        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_layout() {
        let grid = SweepGrid::from_cells(vec![2, 3], vec![0, 1, 2, 3, 4, 5]).unwrap();
        assert_eq!(grid.get(&[0, 2]), Some(&2));
        assert_eq!(grid.get(&[1, 0]), Some(&3));
        assert_eq!(grid.get(&[2, 0]), None);
        assert_eq!(grid.row(1), Some(&[3, 4, 5][..]));
        assert_eq!(grid.column(1), Some(vec![&1, &4]));
    }

    #[test]
    fn test_indices_first_axis_slowest() {
        let grid = SweepGrid::new(vec![2, 2], 0u8);
        let order: Vec<Vec<usize>> = grid.indices().collect();
        assert_eq!(order, vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]]);
    }

    #[test]
    fn test_indices_match_flat_offsets() {
        let grid = SweepGrid::new(vec![3, 4, 2], ());
        for (flat, indices) in grid.indices().enumerate() {
            assert_eq!(grid.flat_index(&indices), Some(flat));
        }
    }

    #[test]
    fn test_from_fn_fills_in_row_major_order() {
        let mut calls = 0;
        let grid = SweepGrid::from_fn(vec![2, 3], |idx| {
            calls += 1;
            idx[0] * 10 + idx[1]
        });
        assert_eq!(calls, 6);
        assert_eq!(grid.cells(), &[0, 1, 2, 10, 11, 12]);

        let empty = SweepGrid::from_fn(vec![0, 3], |_| 1u8);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_from_cells_checks_length() {
        assert!(SweepGrid::from_cells(vec![2, 2], vec![1, 2, 3]).is_none());
    }

    #[test]
    fn test_one_dimensional_grid() {
        let mut grid = SweepGrid::new(vec![4], 0.0);
        assert!(grid.set(&[3], 1.5));
        assert!(!grid.set(&[4], 1.5));
        assert_eq!(grid.cells(), &[0.0, 0.0, 0.0, 1.5]);
        assert!(grid.row(0).is_none());
    }

    #[test]
    fn test_deserialized_grid_indexes() {
        let grid = SweepGrid::from_cells(vec![2, 3], vec![0, 1, 2, 3, 4, 5]).unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        let back: SweepGrid<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.get(&[1, 2]), Some(&5));
    }
}
