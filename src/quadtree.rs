use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use tracing::{debug, trace, warn};

use crate::error::{QuadtreeError, Result};
use crate::list::List;
use crate::{
    BoundingBox2D, BoundsProvider, DebugRenderer, MaxDepthPolicy, Node, NodeId, QuadtreeConfig,
    QuadtreeVisitor,
};

/// Shape summary gathered by [`Quadtree::stats`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct QuadtreeStats {
    pub nodes: usize,
    pub leaves: usize,
    /// Stored references, counting straddling objects once per leaf.
    pub stored: usize,
    pub max_depth_reached: u8,
    /// Leaves holding more than `max_objects_per_leaf`.
    pub overfull_leaves: usize,
}

/// Region quadtree over caller-owned object handles.
///
/// `T` is a cheap handle (id, key, pointer-like value) cloned into every leaf
/// it lands in. `P` maps a handle to its current bounding box.
pub struct Quadtree<T, P> {
    root: NodeId,
    world: BoundingBox2D,
    config: QuadtreeConfig,
    provider: P,
    nodes: List<Node<T>>,
    visualize: bool,
    renderer: Option<Box<dyn DebugRenderer>>,
}

impl<T, P> Quadtree<T, P>
where
    T: Clone,
    P: BoundsProvider<T>,
{
    pub fn new(
        world: BoundingBox2D,
        max_objects_per_leaf: usize,
        max_depth: u8,
        provider: P,
    ) -> Result<Self> {
        Self::with_config(
            world,
            QuadtreeConfig::new(max_objects_per_leaf, max_depth),
            provider,
        )
    }

    pub fn with_config(world: BoundingBox2D, config: QuadtreeConfig, provider: P) -> Result<Self> {
        config.validate()?;
        if !world.is_valid() {
            return Err(QuadtreeError::InvalidWorldBounds(world));
        }

        let mut nodes = List::new();
        let root = nodes.push(Node::new(world));
        debug!(
            ?world,
            max_objects_per_leaf = config.max_objects_per_leaf,
            max_depth = config.max_depth,
            "created quadtree"
        );
        Ok(Self {
            root,
            world,
            config,
            provider,
            nodes,
            visualize: false,
            renderer: None,
        })
    }

    /// Files `object` into every leaf its bounding box reaches.
    ///
    /// Returns the number of leaves now holding it. Zero means it was dropped:
    /// its box missed every child it was routed to, or a full leaf at maximum
    /// depth refused it under [`MaxDepthPolicy::Reject`].
    pub fn insert(&mut self, object: T) -> usize {
        let bounds = self.provider.bounds(&object);
        self.node_insert(self.root, object, &bounds, 0)
    }

    fn node_insert(&mut self, idx: NodeId, object: T, bounds: &BoundingBox2D, depth: u8) -> usize {
        let max_objects = self.config.max_objects_per_leaf;
        let max_depth = self.config.max_depth;
        let policy = self.config.max_depth_policy;

        let Some(node) = self.nodes.get_mut(idx) else {
            return 0;
        };

        if node.is_leaf() {
            if node.objects.len() < max_objects {
                node.objects.push(object);
                return 1;
            }
            if depth < max_depth {
                self.subdivide(idx, depth);
            } else {
                match policy {
                    MaxDepthPolicy::Grow => {
                        node.objects.push(object);
                        return 1;
                    }
                    MaxDepthPolicy::Reject => {
                        warn!(node = idx, depth, "leaf at max depth is full, object not stored");
                        return 0;
                    }
                }
            }
        }

        self.route(idx, object, bounds, depth)
    }

    /// Sends `object` down to every child of internal node `idx` it touches.
    fn route(&mut self, idx: NodeId, object: T, bounds: &BoundingBox2D, depth: u8) -> usize {
        let Some(children) = self.nodes.get(idx).and_then(Node::children) else {
            return 0;
        };

        let mut stored = 0;
        let mut matched = false;
        for child in children {
            let hit = self
                .nodes
                .get(child)
                .is_some_and(|c| c.bounds.intersects(bounds));
            if hit {
                matched = true;
                stored += self.node_insert(child, object.clone(), bounds, depth + 1);
            }
        }
        if !matched {
            trace!(node = idx, ?bounds, "object misses every child");
        }
        stored
    }

    /// Turns leaf `idx` into an internal node and redistributes its objects.
    fn subdivide(&mut self, idx: NodeId, depth: u8) {
        let Some(node) = self.nodes.get_mut(idx) else {
            return;
        };
        let quadrants = node.bounds.quadrants();
        let objects = std::mem::take(&mut node.objects);

        let first_child = self.nodes.push_run(quadrants.into_iter().map(Node::new));
        if let Some(node) = self.nodes.get_mut(idx) {
            node.first_child = Some(first_child);
        }
        debug!(node = idx, depth, redistributed = objects.len(), "subdivided leaf");

        for object in objects {
            let bounds = self.provider.bounds(&object);
            self.route(idx, object, &bounds, depth);

            if self.visualize {
                if let Some(renderer) = self.renderer.as_mut() {
                    for quadrant in &quadrants {
                        renderer.draw_bounds(quadrant);
                    }
                }
            }
        }
    }

    /// Objects whose current bounding box intersects `area`.
    ///
    /// Straddling objects show up once per matching leaf.
    pub fn query_area(&self, area: &BoundingBox2D) -> Vec<T> {
        let mut out = Vec::new();
        self.query_area_into(area, &mut out);
        out
    }

    /// Like [`query_area`](Self::query_area), appending to `out`.
    pub fn query_area_into(&self, area: &BoundingBox2D, out: &mut Vec<T>) {
        self.query_node(self.root, area, out);
    }

    /// Like [`query_area`](Self::query_area) with repeats removed, keeping
    /// first-seen order.
    pub fn query_area_unique(&self, area: &BoundingBox2D) -> Vec<T>
    where
        T: Eq + Hash,
    {
        let mut seen = HashSet::new();
        let mut out = self.query_area(area);
        out.retain(|object| seen.insert(object.clone()));
        out
    }

    fn query_node(&self, idx: NodeId, area: &BoundingBox2D, out: &mut Vec<T>) {
        let Some(node) = self.nodes.get(idx) else {
            return;
        };
        if !node.bounds.intersects(area) {
            return;
        }

        match node.children() {
            None => {
                for object in &node.objects {
                    if self.provider.bounds(object).intersects(area) {
                        out.push(object.clone());
                    }
                }
            }
            Some(children) => {
                for child in children {
                    self.query_node(child, area, out);
                }
            }
        }
    }

    /// Every stored reference, straddling objects once per leaf.
    pub fn collect_all(&self) -> Vec<T> {
        let mut out = Vec::new();
        self.collect_all_into(&mut out);
        out
    }

    pub fn collect_all_into(&self, out: &mut Vec<T>) {
        self.collect_node(self.root, out);
    }

    fn collect_node(&self, idx: NodeId, out: &mut Vec<T>) {
        let Some(node) = self.nodes.get(idx) else {
            return;
        };
        match node.children() {
            None => out.extend(node.objects.iter().cloned()),
            Some(children) => {
                for child in children {
                    self.collect_node(child, out);
                }
            }
        }
    }
}

impl<T, P> Quadtree<T, P> {
    /// Drops every node and object reference, leaving an empty root leaf over
    /// the original world bounds.
    pub fn clear(&mut self) {
        let released = self.nodes.size();
        self.nodes.clear();
        self.root = self.nodes.push(Node::new(self.world));
        debug!(released, "cleared quadtree");
    }

    pub fn set_visualize(&mut self, enabled: bool) {
        self.visualize = enabled;
    }

    pub fn is_visualizing(&self) -> bool {
        self.visualize
    }

    /// Installs the sink that receives child bounds during subdivision while
    /// visualization is on.
    pub fn set_renderer<R>(&mut self, renderer: R)
    where
        R: DebugRenderer + 'static,
    {
        self.renderer = Some(Box::new(renderer));
    }

    pub fn take_renderer(&mut self) -> Option<Box<dyn DebugRenderer>> {
        self.renderer.take()
    }

    /// Walks nodes pre-order, children in quadrant order.
    pub fn traverse<V>(&self, visitor: &mut V)
    where
        V: QuadtreeVisitor<T>,
    {
        let mut to_process = vec![(self.root, 0u8)];

        while let Some((idx, depth)) = to_process.pop() {
            let Some(node) = self.nodes.get(idx) else {
                continue;
            };
            match node.children() {
                Some(children) => {
                    visitor.branch(depth, &node.bounds);
                    // Reversed so the first quadrant is popped first.
                    for child in children.into_iter().rev() {
                        to_process.push((child, depth + 1));
                    }
                }
                None => visitor.leaf(depth, &node.bounds, &node.objects),
            }
        }
    }

    pub fn stats(&self) -> QuadtreeStats {
        let mut collector = StatsCollector {
            max_objects: self.config.max_objects_per_leaf,
            stats: QuadtreeStats::default(),
        };
        self.traverse(&mut collector);
        collector.stats
    }

    pub fn world_bounds(&self) -> &BoundingBox2D {
        &self.world
    }

    pub fn config(&self) -> &QuadtreeConfig {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Id of the root node. The root is reallocated by [`clear`](Self::clear).
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.size()
    }

    /// True when nothing is stored anywhere.
    pub fn is_empty(&self) -> bool {
        self.nodes.iter().all(|node| node.objects.is_empty())
    }
}

struct StatsCollector {
    max_objects: usize,
    stats: QuadtreeStats,
}

impl<T> QuadtreeVisitor<T> for StatsCollector {
    fn branch(&mut self, depth: u8, _bounds: &BoundingBox2D) {
        self.stats.nodes += 1;
        self.stats.max_depth_reached = self.stats.max_depth_reached.max(depth);
    }

    fn leaf(&mut self, depth: u8, _bounds: &BoundingBox2D, objects: &[T]) {
        self.stats.nodes += 1;
        self.stats.leaves += 1;
        self.stats.stored += objects.len();
        self.stats.max_depth_reached = self.stats.max_depth_reached.max(depth);
        if objects.len() > self.max_objects {
            self.stats.overfull_leaves += 1;
        }
    }
}

impl<T, P> fmt::Debug for Quadtree<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Quadtree")
            .field("world", &self.world)
            .field("config", &self.config)
            .field("nodes", &self.nodes.size())
            .field("visualize", &self.visualize)
            .finish()
    }
}
