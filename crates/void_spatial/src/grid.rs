//! Uniform grid index

use serde::{Deserialize, Serialize};
use void_math::Vec2;
use void_structures::{SlotKey, SlotMap};

/// Bounds and resolution of a grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Minimum corner (x, z)
    pub min: Vec2,
    /// Maximum corner (x, z)
    pub max: Vec2,
    /// Number of cells along each axis
    pub dimensions: [u32; 2],
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            min: Vec2::new(-1000.0, -1000.0),
            max: Vec2::new(1000.0, 1000.0),
            dimensions: [100, 100],
        }
    }
}

impl GridConfig {
    pub fn cell_size(&self) -> Vec2 {
        Vec2::new(
            (self.max.x - self.min.x) / self.dimensions[0].max(1) as f32,
            (self.max.y - self.min.y) / self.dimensions[1].max(1) as f32,
        )
    }
}

/// Stored item with the position and cell it was last indexed at
#[derive(Debug, Clone)]
pub struct GridEntry<T> {
    item: T,
    position: Vec2,
    cell: usize,
}

/// Handle to an inserted item
pub type SpatialToken<T> = SlotKey<GridEntry<T>>;

/// A query hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor<T> {
    pub item: T,
    pub distance_squared: f32,
}

pub struct SpatialIndex<T> {
    config: GridConfig,
    cell_size: Vec2,
    cells: Vec<Vec<SpatialToken<T>>>,
    entries: SlotMap<GridEntry<T>>,
}

impl<T: Copy> SpatialIndex<T> {
    pub fn new(config: GridConfig) -> Self {
        let dims = [config.dimensions[0].max(1), config.dimensions[1].max(1)];
        let config = GridConfig { dimensions: dims, ..config };
        let cell_count = dims[0] as usize * dims[1] as usize;
        Self {
            cell_size: config.cell_size(),
            config,
            cells: vec![Vec::new(); cell_count],
            entries: SlotMap::new(),
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn insert(&mut self, item: T, position: Vec2) -> SpatialToken<T> {
        let cell = self.cell_index(position);
        let token = self.entries.insert(GridEntry { item, position, cell });
        self.cells[cell].push(token);
        token
    }

    /// Re-index an item after it moved.
    ///
    /// # Panics
    /// If the token was never issued or has been removed.
    pub fn update_position(&mut self, token: SpatialToken<T>, position: Vec2) {
        let cell = self.cell_index(position);
        let entry = &mut self.entries[token];
        entry.position = position;
        if entry.cell == cell {
            return;
        }
        let old = entry.cell;
        entry.cell = cell;
        Self::unlink(&mut self.cells[old], token);
        self.cells[cell].push(token);
    }

    /// # Panics
    /// If the token was never issued or has already been removed.
    pub fn remove(&mut self, token: SpatialToken<T>) -> T {
        let Some(entry) = self.entries.remove(token) else {
            panic!("spatial token {:?} was never inserted or already removed", token);
        };
        Self::unlink(&mut self.cells[entry.cell], token);
        entry.item
    }

    pub fn contains(&self, token: SpatialToken<T>) -> bool {
        self.entries.contains_key(token)
    }

    /// Last indexed position of an item
    pub fn position(&self, token: SpatialToken<T>) -> Option<Vec2> {
        self.entries.get(token).map(|e| e.position)
    }

    /// Items within `radius` of `position` (inclusive), unordered.
    ///
    /// Visits the cell containing the point and its ring of neighbours;
    /// the ring widens when the radius exceeds a cell. A negative or NaN
    /// radius matches nothing.
    pub fn find_near(&self, position: Vec2, radius: f32) -> Vec<Neighbor<T>> {
        if !(radius >= 0.0) {
            log::debug!("find_near with invalid radius {}", radius);
            return Vec::new();
        }
        let radius_sq = radius * radius;
        let (cx, cz) = self.cell_coords(position);
        let smallest_cell = self.cell_size.x.min(self.cell_size.y);
        let rings = ((radius / smallest_cell).ceil() as i64).max(1);
        let [width, depth] = self.config.dimensions;

        let mut hits = Vec::new();
        for dz in -rings..=rings {
            let z = cz as i64 + dz;
            if z < 0 || z >= depth as i64 {
                continue;
            }
            for dx in -rings..=rings {
                let x = cx as i64 + dx;
                if x < 0 || x >= width as i64 {
                    continue;
                }
                let cell = z as usize * width as usize + x as usize;
                for token in &self.cells[cell] {
                    let entry = &self.entries[*token];
                    let distance_squared = entry.position.distance_squared(position);
                    if distance_squared <= radius_sq {
                        hits.push(Neighbor { item: entry.item, distance_squared });
                    }
                }
            }
        }
        hits
    }

    /// Grid coordinates of a position, clamped to the edge cells
    pub fn cell_coords(&self, position: Vec2) -> (u32, u32) {
        let [width, depth] = self.config.dimensions;
        let fx = ((position.x - self.config.min.x) / self.cell_size.x).floor();
        let fz = ((position.y - self.config.min.y) / self.cell_size.y).floor();
        let x = fx.max(0.0).min((width - 1) as f32) as u32;
        let z = fz.max(0.0).min((depth - 1) as f32) as u32;
        (x, z)
    }

    fn cell_index(&self, position: Vec2) -> usize {
        let (x, z) = self.cell_coords(position);
        z as usize * self.config.dimensions[0] as usize + x as usize
    }

    fn unlink(cell: &mut Vec<SpatialToken<T>>, token: SpatialToken<T>) {
        if let Some(at) = cell.iter().position(|t| *t == token) {
            cell.swap_remove(at);
        }
    }
}
