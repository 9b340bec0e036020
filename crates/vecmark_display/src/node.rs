//! Retained display tree.
//!
//! Nodes live in an arena owned by `DisplayList`; handles are plain ids so
//! the engine's domain objects can reference nodes without ownership
//! cycles. Child order is z-order (later draws on top).
//!
//! Flag semantics follow the usual retained-tree contract: an invisible
//! node is skipped entirely (drawing, bounds, hit-testing); a
//! non-renderable node is not drawn but still measured.

use crate::graphics::Graphics;
use crate::hit::HitArea;
use crate::math::{Point, Rect};

/// Handle to a node in a [`DisplayList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// One node: flags, recorded graphics and an optional hit area.
#[derive(Debug, Default)]
pub struct DisplayNode {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    visible: bool,
    renderable: bool,
    interactive: bool,
    graphics: Graphics,
    hit_area: Option<HitArea>,
}

impl DisplayNode {
    fn new() -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            visible: true,
            renderable: true,
            interactive: false,
            graphics: Graphics::new(),
            hit_area: None,
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn renderable(&self) -> bool {
        self.renderable
    }

    pub fn set_renderable(&mut self, renderable: bool) {
        self.renderable = renderable;
    }

    pub fn interactive(&self) -> bool {
        self.interactive
    }

    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    pub fn graphics(&self) -> &Graphics {
        &self.graphics
    }

    pub fn graphics_mut(&mut self) -> &mut Graphics {
        &mut self.graphics
    }

    pub fn hit_area(&self) -> Option<&HitArea> {
        self.hit_area.as_ref()
    }

    pub fn set_hit_area(&mut self, hit_area: Option<HitArea>) {
        self.hit_area = hit_area;
    }

    /// Whether the node is interactive, visible and its hit area contains
    /// the point.
    pub fn hit_test(&self, point: Point) -> bool {
        self.visible
            && self.interactive
            && self
                .hit_area
                .as_ref()
                .is_some_and(|area| area.contains(point))
    }
}

/// Arena of display nodes.
#[derive(Debug, Default)]
pub struct DisplayList {
    nodes: Vec<Option<DisplayNode>>,
    free: Vec<usize>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a detached node.
    pub fn create_node(&mut self) -> NodeId {
        match self.free.pop() {
            Some(index) => {
                self.nodes[index] = Some(DisplayNode::new());
                NodeId(index)
            }
            None => {
                self.nodes.push(Some(DisplayNode::new()));
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&DisplayNode> {
        self.nodes.get(id.0).and_then(|slot| slot.as_ref())
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut DisplayNode> {
        self.nodes.get_mut(id.0).and_then(|slot| slot.as_mut())
    }

    /// Append `child` as the last (topmost) child of `parent`, detaching it
    /// from any previous parent first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.add_child_at(parent, child, usize::MAX);
    }

    /// Insert `child` at `index` in `parent`'s child list (clamped to the
    /// current length), detaching it from any previous parent first.
    pub fn add_child_at(&mut self, parent: NodeId, child: NodeId, index: usize) {
        if parent == child || self.node(parent).is_none() || self.node(child).is_none() {
            log::warn!("add_child_at: invalid parent/child pair");
            return;
        }
        self.detach(child);
        if let Some(node) = self.node_mut(parent) {
            let index = index.min(node.children.len());
            node.children.insert(index, child);
        }
        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
    }

    /// Remove `child` from `parent`'s child list. No-op when it is not a
    /// child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        let is_child = self.node(child).and_then(DisplayNode::parent) == Some(parent);
        if is_child {
            self.detach(child);
        }
    }

    /// Position of `child` within `parent`'s child list.
    pub fn child_index(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self.node(parent)?
            .children
            .iter()
            .position(|&id| id == child)
    }

    /// Detach the node from its parent and free its whole subtree.
    pub fn dispose(&mut self, id: NodeId) {
        self.detach(id);
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(slot) = self.nodes.get_mut(next.0) {
                if let Some(node) = slot.take() {
                    stack.extend(node.children);
                    self.free.push(next.0);
                }
            }
        }
    }

    fn detach(&mut self, child: NodeId) {
        let Some(parent) = self.node(child).and_then(DisplayNode::parent) else {
            return;
        };
        if let Some(node) = self.node_mut(parent) {
            node.children.retain(|&id| id != child);
        }
        if let Some(node) = self.node_mut(child) {
            node.parent = None;
        }
    }

    /// Bounds of the node's own graphics unioned with every visible
    /// descendant's bounds. `None` when nothing measurable is drawn.
    pub fn local_bounds(&self, id: NodeId) -> Option<Rect> {
        let node = self.node(id)?;
        if !node.visible {
            return None;
        }
        let mut acc = node.graphics.local_bounds();
        for &child in &node.children {
            if let Some(bounds) = self.local_bounds(child) {
                acc = Some(match acc {
                    Some(current) => current.union(bounds),
                    None => bounds,
                });
            }
        }
        acc
    }

    /// Pre-order walk over the visible subtree, in z-order.
    pub fn visit(&self, id: NodeId, f: &mut impl FnMut(NodeId, &DisplayNode)) {
        let Some(node) = self.node(id) else {
            return;
        };
        if !node.visible {
            return;
        }
        f(id, node);
        for &child in &node.children {
            self.visit(child, f);
        }
    }
}

impl std::ops::Index<NodeId> for DisplayList {
    type Output = DisplayNode;

    /// Panics on a stale id; ids are only invalidated by `dispose`.
    fn index(&self, id: NodeId) -> &DisplayNode {
        match self.node(id) {
            Some(node) => node,
            None => panic!("stale NodeId({})", id.0),
        }
    }
}

impl std::ops::IndexMut<NodeId> for DisplayList {
    fn index_mut(&mut self, id: NodeId) -> &mut DisplayNode {
        match self.node_mut(id) {
            Some(node) => node,
            None => panic!("stale NodeId({})", id.0),
        }
    }
}
