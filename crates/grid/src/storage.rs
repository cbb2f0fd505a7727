use std::ops::{Index, IndexMut};

use bevy::prelude::*;

use crate::cell::CellData;

/// Dense 3D array of cell records, indexed `[x][y][z]`.
///
/// Stored flat with z varying fastest, so `iter()` visits cells in the same
/// x-outer, y-middle, z-inner order they were built in.
pub struct CellArray<C> {
    cells: Vec<C>,
    dimensions: UVec3,
}

impl<C: CellData> CellArray<C> {
    /// Allocate `dimensions.x * dimensions.y * dimensions.z` records and
    /// initialize each with its own index.
    pub fn build(dimensions: UVec3) -> Self {
        let count = (dimensions.x as usize) * (dimensions.y as usize) * (dimensions.z as usize);
        let mut cells = Vec::with_capacity(count);
        for x in 0..dimensions.x {
            for y in 0..dimensions.y {
                for z in 0..dimensions.z {
                    let mut cell = C::default();
                    cell.initialize(Vec3::new(x as f32, y as f32, z as f32));
                    cells.push(cell);
                }
            }
        }
        Self { cells, dimensions }
    }
}

impl<C> CellArray<C> {
    #[inline]
    pub fn dimensions(&self) -> UVec3 {
        self.dimensions
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn in_bounds(&self, cell: IVec3) -> bool {
        cell.cmpge(IVec3::ZERO).all() && cell.as_uvec3().cmplt(self.dimensions).all()
    }

    /// Flat index of `cell`, or `None` when out of range.
    #[inline]
    pub fn index_of(&self, cell: IVec3) -> Option<usize> {
        if !self.in_bounds(cell) {
            return None;
        }
        let (x, y, z) = (cell.x as usize, cell.y as usize, cell.z as usize);
        let (dy, dz) = (self.dimensions.y as usize, self.dimensions.z as usize);
        Some((x * dy + y) * dz + z)
    }

    #[inline]
    pub fn get(&self, cell: IVec3) -> Option<&C> {
        self.index_of(cell).map(|i| &self.cells[i])
    }

    #[inline]
    pub fn get_mut(&mut self, cell: IVec3) -> Option<&mut C> {
        self.index_of(cell).map(move |i| &mut self.cells[i])
    }

    /// Iterate `(index, record)` pairs in x-outer, y-middle, z-inner order.
    pub fn iter(&self) -> impl Iterator<Item = (IVec3, &C)> + '_ {
        let (dy, dz) = (self.dimensions.y as usize, self.dimensions.z as usize);
        self.cells.iter().enumerate().map(move |(i, cell)| {
            let z = i % dz;
            let y = (i / dz) % dy;
            let x = i / (dy * dz);
            (IVec3::new(x as i32, y as i32, z as i32), cell)
        })
    }
}

impl<C> Index<IVec3> for CellArray<C> {
    type Output = C;

    /// Panics when `cell` is outside the grid.
    fn index(&self, cell: IVec3) -> &C {
        match self.index_of(cell) {
            Some(i) => &self.cells[i],
            None => panic!(
                "cell {cell} out of range for grid of size {}",
                self.dimensions
            ),
        }
    }
}

impl<C> IndexMut<IVec3> for CellArray<C> {
    fn index_mut(&mut self, cell: IVec3) -> &mut C {
        match self.index_of(cell) {
            Some(i) => &mut self.cells[i],
            None => panic!(
                "cell {cell} out of range for grid of size {}",
                self.dimensions
            ),
        }
    }
}
