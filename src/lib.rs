//! A depth-bounded region quadtree.
//!
//! The tree partitions a fixed world rectangle into cells and files caller
//! owned object handles into every leaf cell their bounding box touches.
//! Handles are never inspected: a [`BoundsProvider`] supplies each object's
//! box whenever the tree needs it.
//!
//! ```
//! use region_quadtree::{BoundingBox2D, Quadtree};
//!
//! let boxes = [
//!     BoundingBox2D::from_coords(10.0, 10.0, 20.0, 20.0),
//!     BoundingBox2D::from_coords(60.0, 60.0, 70.0, 70.0),
//! ];
//! let world = BoundingBox2D::from_coords(0.0, 0.0, 100.0, 100.0);
//! let mut tree = Quadtree::new(world, 1, 1, move |id: &usize| boxes[*id]).unwrap();
//!
//! tree.insert(0usize);
//! tree.insert(1);
//!
//! assert_eq!(tree.collect_all(), vec![1, 0]);
//! assert_eq!(tree.query_area(&BoundingBox2D::from_coords(0.0, 0.0, 50.0, 50.0)), vec![0]);
//! ```

mod bounds;
mod config;
mod error;
mod list;
mod node;
mod quadtree;

pub use bounds::*;
pub use config::*;
pub use error::*;
pub use node::*;
pub use quadtree::*;

/// Supplies the current bounding box of an object handle.
///
/// Called during insertion routing and for every stored object a query
/// inspects, so it should be cheap and must not touch the tree.
pub trait BoundsProvider<T> {
    fn bounds(&self, object: &T) -> BoundingBox2D;
}

impl<T, F> BoundsProvider<T> for F
where
    F: Fn(&T) -> BoundingBox2D,
{
    fn bounds(&self, object: &T) -> BoundingBox2D {
        self(object)
    }
}

/// Debug sink fed with node bounds while the tree subdivides.
pub trait DebugRenderer {
    fn draw_bounds(&mut self, bounds: &BoundingBox2D);
}

impl<F> DebugRenderer for F
where
    F: FnMut(&BoundingBox2D),
{
    fn draw_bounds(&mut self, bounds: &BoundingBox2D) {
        self(bounds)
    }
}

/// Pre-order walk over the tree in quadrant order.
pub trait QuadtreeVisitor<T> {
    fn branch(&mut self, depth: u8, bounds: &BoundingBox2D);
    fn leaf(&mut self, depth: u8, bounds: &BoundingBox2D, objects: &[T]);
}
