use crate::BoundingBox2D;

/// Index of a node in the tree's node list.
pub type NodeId = usize;

/// A cell of the subdivision.
///
/// Leaves hold object references. Internal nodes hold none and own four
/// children stored consecutively from `first_child`, in quadrant order.
#[derive(Clone, Debug)]
pub struct Node<T> {
    pub(crate) bounds: BoundingBox2D,
    pub(crate) objects: Vec<T>,
    pub(crate) first_child: Option<NodeId>,
}

impl<T> Node<T> {
    pub(crate) fn new(bounds: BoundingBox2D) -> Self {
        Self {
            bounds,
            objects: Vec::new(),
            first_child: None,
        }
    }

    pub fn bounds(&self) -> &BoundingBox2D {
        &self.bounds
    }

    /// Objects stored here. Always empty for internal nodes.
    pub fn objects(&self) -> &[T] {
        &self.objects
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.first_child.is_none()
    }

    /// Ids of the four children, or `None` for a leaf.
    pub fn children(&self) -> Option<[NodeId; 4]> {
        self.first_child.map(|fc| [fc, fc + 1, fc + 2, fc + 3])
    }
}
