//! Layer records and the layer store.
//!
//! Layers form a tree rooted at a group named `RootLayer`. A layer is
//! either a shape (one [`Container`]) or a group (ordered child ids plus a
//! [`ContainerGroup`] whose frame order mirrors the child order). All
//! layers live in one [`LayerStore`] keyed by UUID; tree edges are ids,
//! never references, so structural edits stay borrow-friendly.
//!
//! Field writes on non-root layers notify the host's per-layer update
//! hook; structural changes on the root notify the root hooks.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vecmark_display::{DisplayList, NodeId};

use crate::container::{Container, ContainerGroup};
use crate::event::Hooks;
use crate::geometry::{Geometry, GeometryProjection};
use crate::viewport::Viewport;

/// Unique layer identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerId(Uuid);

impl LayerId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Compositing mask applied when layers are grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaskType {
    Union,
    Subtract,
    Intersect,
    Difference,
}

/// Ordered children of a group layer plus their frame mirror.
#[derive(Debug)]
pub struct LayerGroup {
    children: Vec<LayerId>,
    containers: ContainerGroup,
}

impl LayerGroup {
    pub(crate) fn new(display: &mut DisplayList) -> Self {
        Self {
            children: Vec::new(),
            containers: ContainerGroup::new(display),
        }
    }

    pub fn children(&self) -> &[LayerId] {
        &self.children
    }

    pub fn containers(&self) -> &ContainerGroup {
        &self.containers
    }
}

/// What a layer holds.
#[derive(Debug)]
pub enum LayerKind {
    Shape(Container),
    Group(LayerGroup),
}

/// One node of the layer tree.
#[derive(Debug)]
pub struct Layer {
    id: LayerId,
    name: String,
    hidden: bool,
    locked: bool,
    selected: bool,
    mask: Option<MaskType>,
    parent: Option<LayerId>,
    kind: LayerKind,
}

impl Layer {
    pub(crate) fn shape(name: impl Into<String>, container: Container) -> Self {
        Self::with_kind(name, LayerKind::Shape(container))
    }

    pub(crate) fn group(name: impl Into<String>, group: LayerGroup) -> Self {
        Self::with_kind(name, LayerKind::Group(group))
    }

    fn with_kind(name: impl Into<String>, kind: LayerKind) -> Self {
        Self {
            id: LayerId::new(),
            name: name.into(),
            hidden: false,
            locked: false,
            selected: false,
            mask: None,
            parent: None,
            kind,
        }
    }

    pub fn id(&self) -> LayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hidden(&self) -> bool {
        self.hidden
    }

    pub fn locked(&self) -> bool {
        self.locked
    }

    pub fn selected(&self) -> bool {
        self.selected
    }

    pub fn mask(&self) -> Option<MaskType> {
        self.mask
    }

    pub fn parent(&self) -> Option<LayerId> {
        self.parent
    }

    pub fn kind(&self) -> &LayerKind {
        &self.kind
    }

    /// The display frame owned by this layer.
    pub fn frame(&self) -> NodeId {
        match &self.kind {
            LayerKind::Shape(container) => container.frame(),
            LayerKind::Group(group) => group.containers.frame(),
        }
    }

    pub fn as_shape(&self) -> Option<&Container> {
        match &self.kind {
            LayerKind::Shape(container) => Some(container),
            LayerKind::Group(_) => None,
        }
    }

    pub(crate) fn as_shape_mut(&mut self) -> Option<&mut Container> {
        match &mut self.kind {
            LayerKind::Shape(container) => Some(container),
            LayerKind::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&LayerGroup> {
        match &self.kind {
            LayerKind::Group(group) => Some(group),
            LayerKind::Shape(_) => None,
        }
    }

    fn as_group_mut(&mut self) -> Option<&mut LayerGroup> {
        match &mut self.kind {
            LayerKind::Group(group) => Some(group),
            LayerKind::Shape(_) => None,
        }
    }

    pub fn geometry(&self) -> Option<&Geometry> {
        self.as_shape().map(Container::geometry)
    }
}

/// Serialization projection of a layer subtree.
#[derive(Debug, Clone, Serialize)]
pub struct LayerProjection {
    pub id: LayerId,
    pub name: String,
    pub hidden: bool,
    pub locked: bool,
    pub selected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask: Option<MaskType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry: Option<GeometryProjection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layers: Option<Vec<LayerProjection>>,
}

/// Flat owner of every layer, with the root group id.
#[derive(Debug)]
pub struct LayerStore {
    layers: HashMap<LayerId, Layer>,
    root: LayerId,
    root_frame: NodeId,
}

impl LayerStore {
    /// Create the store with its root group attached under `screen`.
    pub(crate) fn new(display: &mut DisplayList, screen: NodeId) -> Self {
        let group = LayerGroup::new(display);
        let root_frame = group.containers.frame();
        display.append_child(screen, root_frame);

        let root_layer = Layer::group("RootLayer", group);
        let root = root_layer.id;

        let mut layers = HashMap::new();
        layers.insert(root, root_layer);
        Self {
            layers,
            root,
            root_frame,
        }
    }

    pub fn root(&self) -> LayerId {
        self.root
    }

    pub fn root_frame(&self) -> NodeId {
        self.root_frame
    }

    pub fn is_root(&self, id: LayerId) -> bool {
        id == self.root
    }

    pub fn get(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.get_mut(&id)
    }

    /// Top-level layer ids in z-order (bottom first).
    pub fn root_children(&self) -> &[LayerId] {
        self.get(self.root)
            .and_then(Layer::as_group)
            .map_or(&[], LayerGroup::children)
    }

    /// Top-level layers currently carrying the selected flag, in order.
    pub fn selected_root_layers(&self) -> Vec<LayerId> {
        self.root_children()
            .iter()
            .copied()
            .filter(|id| self.get(*id).is_some_and(Layer::selected))
            .collect()
    }

    pub fn geometry(&self, id: LayerId) -> Option<&Geometry> {
        self.get(id)?.geometry()
    }

    pub(crate) fn geometry_mut(&mut self, id: LayerId) -> Option<&mut Geometry> {
        self.get_mut(id)?.as_shape_mut().map(Container::geometry_mut)
    }

    pub(crate) fn insert(&mut self, layer: Layer) -> LayerId {
        let id = layer.id;
        self.layers.insert(id, layer);
        id
    }

    pub(crate) fn remove_record(&mut self, id: LayerId) -> Option<Layer> {
        if id == self.root {
            log::warn!("refusing to drop the root layer record");
            return None;
        }
        self.layers.remove(&id)
    }

    /// Attach `child` under `parent`, keeping the layer list and the frame
    /// mirror in step. Appending an already-present child is a no-op at
    /// both levels.
    pub(crate) fn append_child(
        &mut self,
        parent: LayerId,
        child: LayerId,
        display: &mut DisplayList,
        hooks: &mut Hooks,
    ) {
        let Some(child_frame) = self.get(child).map(Layer::frame) else {
            log::warn!("append of unknown layer {child} ignored");
            return;
        };
        {
            let Some(group) = self.get_mut(parent).and_then(Layer::as_group_mut) else {
                log::warn!("append target {parent} is not a group");
                return;
            };
            if !group.children.contains(&child) {
                group.children.push(child);
            }
            group.containers.append_child(display, child_frame);
        }
        if let Some(layer) = self.layers.get_mut(&child) {
            layer.parent = Some(parent);
        }

        if parent == self.root {
            if let Some(layer) = self.get(child) {
                hooks.root.on_add_layer(layer);
            }
        } else {
            self.notify_update(parent, hooks);
        }
    }

    /// Move `child` under `new_parent`. A no-op when that already is the
    /// parent; otherwise the child detaches from its old parent first.
    pub(crate) fn set_parent(
        &mut self,
        child: LayerId,
        new_parent: LayerId,
        display: &mut DisplayList,
        hooks: &mut Hooks,
    ) {
        let Some(current) = self.get(child).map(Layer::parent) else {
            return;
        };
        if current == Some(new_parent) {
            return;
        }
        self.detach(child, display, hooks);
        self.append_child(new_parent, child, display, hooks);
    }

    /// Detach `child` from its parent, if any.
    pub(crate) fn detach(&mut self, child: LayerId, display: &mut DisplayList, hooks: &mut Hooks) {
        let Some(layer) = self.get(child) else {
            return;
        };
        let child_frame = layer.frame();
        let Some(parent) = layer.parent else {
            return;
        };

        if let Some(group) = self.get_mut(parent).and_then(Layer::as_group_mut) {
            group.children.retain(|c| *c != child);
            group.containers.remove_child(display, child_frame);
        }
        if let Some(layer) = self.layers.get_mut(&child) {
            layer.parent = None;
        }

        if parent == self.root {
            if let Some(layer) = self.get(child) {
                hooks.root.on_remove_layer(layer);
            }
        } else {
            self.notify_update(parent, hooks);
        }
    }

    // ------------------------------------------------------------------
    // Field writes
    // ------------------------------------------------------------------

    pub(crate) fn set_name(&mut self, id: LayerId, name: impl Into<String>, hooks: &mut Hooks) {
        let Some(layer) = self.layers.get_mut(&id) else {
            return;
        };
        layer.name = name.into();
        self.notify_update(id, hooks);
    }

    pub(crate) fn set_hidden(
        &mut self,
        id: LayerId,
        hidden: bool,
        display: &mut DisplayList,
        hooks: &mut Hooks,
    ) {
        let Some(layer) = self.layers.get_mut(&id) else {
            return;
        };
        layer.hidden = hidden;
        match &layer.kind {
            LayerKind::Shape(container) => {
                if hidden {
                    container.hide(display);
                } else {
                    container.show(display);
                }
            }
            LayerKind::Group(group) => {
                if hidden {
                    group.containers.hide(display);
                } else {
                    group.containers.show(display);
                }
            }
        }
        self.notify_update(id, hooks);
    }

    pub(crate) fn set_locked(&mut self, id: LayerId, locked: bool, hooks: &mut Hooks) {
        let Some(layer) = self.layers.get_mut(&id) else {
            return;
        };
        layer.locked = locked;
        self.notify_update(id, hooks);
    }

    pub(crate) fn set_mask(&mut self, id: LayerId, mask: Option<MaskType>, hooks: &mut Hooks) {
        let Some(layer) = self.layers.get_mut(&id) else {
            return;
        };
        layer.mask = mask;
        self.notify_update(id, hooks);
    }

    /// Write the selected flag and cascade it into the shape palette.
    pub(crate) fn set_selected(
        &mut self,
        id: LayerId,
        selected: bool,
        display: &mut DisplayList,
        viewport: &Viewport,
        hooks: &mut Hooks,
    ) {
        let Some(layer) = self.layers.get_mut(&id) else {
            return;
        };
        layer.selected = selected;
        if let LayerKind::Shape(container) = &mut layer.kind {
            container.set_selected(selected, display, viewport);
        }
        self.notify_update(id, hooks);
    }

    fn notify_update(&self, id: LayerId, hooks: &mut Hooks) {
        if id == self.root {
            return;
        }
        if let Some(layer) = self.get(id) {
            hooks.layer.on_update_layer(layer);
        }
    }

    // ------------------------------------------------------------------
    // Traversal and serialization
    // ------------------------------------------------------------------

    /// The subtree rooted at `id`, parents before children.
    pub(crate) fn collect_subtree(&self, id: LayerId) -> Vec<LayerId> {
        let mut result = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            result.push(current);
            if let Some(group) = self.get(current).and_then(Layer::as_group) {
                stack.extend(group.children.iter().copied());
            }
        }
        result
    }

    /// Project the subtree rooted at `id` for serialization.
    pub fn project(&self, id: LayerId) -> Option<LayerProjection> {
        let layer = self.get(id)?;
        let mut projection = LayerProjection {
            id: layer.id,
            name: layer.name.clone(),
            hidden: layer.hidden,
            locked: layer.locked,
            selected: layer.selected,
            mask: layer.mask,
            geometry: None,
            layers: None,
        };
        match &layer.kind {
            LayerKind::Shape(container) => projection.geometry = Some(container.serialize()),
            LayerKind::Group(group) => {
                projection.layers = Some(
                    group
                        .children
                        .iter()
                        .filter_map(|child| self.project(*child))
                        .collect(),
                );
            }
        }
        Some(projection)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use super::*;
    use crate::event::{LayerHooks, RootHooks};
    use crate::geometry::{GeometryPalette, ShapeKind};

    struct RecordingHooks {
        log: Rc<RefCell<Vec<String>>>,
    }

    impl RootHooks for RecordingHooks {
        fn on_add_layer(&mut self, layer: &Layer) {
            self.log.borrow_mut().push(format!("add {}", layer.name()));
        }

        fn on_remove_layer(&mut self, layer: &Layer) {
            self.log.borrow_mut().push(format!("remove {}", layer.name()));
        }
    }

    impl LayerHooks for RecordingHooks {
        fn on_update_layer(&mut self, layer: &Layer) {
            self.log.borrow_mut().push(format!("update {}", layer.name()));
        }
    }

    fn create_store() -> (DisplayList, LayerStore, Hooks, Rc<RefCell<Vec<String>>>) {
        let mut display = DisplayList::new();
        let screen = display.create_node();
        let store = LayerStore::new(&mut display, screen);

        let log = Rc::new(RefCell::new(Vec::new()));
        let hooks = Hooks::new(
            Box::new(RecordingHooks { log: log.clone() }),
            Box::new(RecordingHooks { log: log.clone() }),
        );
        (display, store, hooks, log)
    }

    fn create_shape_layer(display: &mut DisplayList, name: &str) -> Layer {
        let viewport = Viewport::new(800.0, 600.0);
        let container = Container::new(
            ShapeKind::Rectangle,
            GeometryPalette::default(),
            Duration::ZERO,
            display,
            &viewport,
            None,
        );
        Layer::shape(name, container)
    }

    #[test]
    fn test_append_to_root_fires_root_hook() {
        let (mut display, mut store, mut hooks, log) = create_store();
        let layer = create_shape_layer(&mut display, "Layer 0");
        let id = store.insert(layer);

        store.append_child(store.root(), id, &mut display, &mut hooks);

        assert_eq!(log.borrow().as_slice(), &["add Layer 0".to_string()]);
        assert_eq!(store.root_children(), &[id]);
        assert_eq!(store.get(id).and_then(Layer::parent), Some(store.root()));
    }

    #[test]
    fn test_set_parent_detaches_first() {
        let (mut display, mut store, mut hooks, log) = create_store();
        let shape = create_shape_layer(&mut display, "Layer 0");
        let id = store.insert(shape);
        store.append_child(store.root(), id, &mut display, &mut hooks);

        let group = Layer::group("Group 1", LayerGroup::new(&mut display));
        let gid = store.insert(group);
        store.append_child(store.root(), gid, &mut display, &mut hooks);
        log.borrow_mut().clear();

        store.set_parent(id, gid, &mut display, &mut hooks);

        assert_eq!(store.root_children(), &[gid]);
        let children = store.get(gid).and_then(Layer::as_group).map(|g| g.children().to_vec());
        assert_eq!(children, Some(vec![id]));
        assert_eq!(store.get(id).and_then(Layer::parent), Some(gid));
        // Detach from root, then a non-root structural update on the group.
        assert_eq!(
            log.borrow().as_slice(),
            &["remove Layer 0".to_string(), "update Group 1".to_string()]
        );
    }

    #[test]
    fn test_set_parent_to_current_parent_is_noop() {
        let (mut display, mut store, mut hooks, log) = create_store();
        let shape = create_shape_layer(&mut display, "Layer 0");
        let id = store.insert(shape);
        store.append_child(store.root(), id, &mut display, &mut hooks);
        log.borrow_mut().clear();

        store.set_parent(id, store.root(), &mut display, &mut hooks);

        assert!(log.borrow().is_empty());
        assert_eq!(store.root_children(), &[id]);
    }

    #[test]
    fn test_field_write_fires_update_hook() {
        let (mut display, mut store, mut hooks, log) = create_store();
        let shape = create_shape_layer(&mut display, "Layer 0");
        let id = store.insert(shape);
        store.append_child(store.root(), id, &mut display, &mut hooks);
        log.borrow_mut().clear();

        store.set_name(id, "Road", &mut hooks);
        store.set_locked(id, true, &mut hooks);

        assert_eq!(
            log.borrow().as_slice(),
            &["update Road".to_string(), "update Road".to_string()]
        );
        assert!(store.get(id).is_some_and(Layer::locked));
    }

    #[test]
    fn test_root_field_write_is_silent() {
        let (_display, mut store, mut hooks, log) = create_store();

        store.set_name(store.root(), "renamed", &mut hooks);

        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_projection_shape_of_group() {
        let (mut display, mut store, mut hooks, _log) = create_store();
        let shape = create_shape_layer(&mut display, "Layer 0");
        let id = store.insert(shape);
        store.append_child(store.root(), id, &mut display, &mut hooks);
        store.set_mask(id, Some(MaskType::Union), &mut hooks);

        let projection = store.project(store.root()).unwrap();
        let value = serde_json::to_value(&projection).unwrap();

        assert_eq!(value["name"], "RootLayer");
        let children = value["layers"].as_array().unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0]["mask"], "union");
        assert_eq!(children[0]["geometry"]["type"], "rectangle");
        // Groups carry no geometry key at all.
        assert!(value.get("geometry").is_none());
    }

    #[test]
    fn test_hidden_cascades_to_frame() {
        let (mut display, mut store, mut hooks, _log) = create_store();
        let shape = create_shape_layer(&mut display, "Layer 0");
        let id = store.insert(shape);
        store.append_child(store.root(), id, &mut display, &mut hooks);
        let frame = store.get(id).map(Layer::frame).unwrap();

        store.set_hidden(id, true, &mut display, &mut hooks);
        assert!(!display[frame].visible());

        store.set_hidden(id, false, &mut display, &mut hooks);
        assert!(display[frame].visible());
    }
}
