use std::ops::{Index, IndexMut};

/// Dense row-major 2D storage.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Grid<T> {
    width:  usize,
    height: usize,
    cells:  Vec<T>,
}

impl<T> Grid<T> {
    pub fn new() -> Self {
        Self { width: 0, height: 0, cells: Vec::new() }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        (x < self.width && y < self.height).then(|| &self.cells[y * self.width + x])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.width.max(1))
    }

    /// Cells with their `(x, y)` coordinates, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &T)> {
        let width = self.width.max(1);
        self.cells.iter().enumerate().map(move |(i, cell)| ((i % width, i / width), cell))
    }
}

impl<T: Clone + Default> Grid<T> {
    pub fn with_size(width: usize, height: usize) -> Self {
        let mut grid = Self::new();
        grid.resize_clear(width, height);
        grid
    }

    /// Changes the dimensions and resets every cell to its default value.
    pub fn resize_clear(&mut self, width: usize, height: usize) {
        self.cells.clear();
        self.cells.resize(width * height, T::default());
        self.width = width;
        self.height = height;
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (x, y): (usize, usize)) -> &Self::Output {
        assert!(x < self.width && y < self.height, "cell ({x}, {y}) out of {}x{} grid", self.width, self.height);
        &self.cells[y * self.width + x]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut Self::Output {
        assert!(x < self.width && y < self.height, "cell ({x}, {y}) out of {}x{} grid", self.width, self.height);
        &mut self.cells[y * self.width + x]
    }
}
