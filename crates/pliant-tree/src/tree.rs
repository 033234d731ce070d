//! Arena of nodes and configs.
//!
//! # Design
//!
//! Nodes are stored in a vector and addressed by [`NodeId`]. A child knows
//! its owner only by index, so there are no reference cycles and a subtree
//! can be shared between owners: a node may appear in several children
//! lists while only one of them is its owner. The layout engine clones
//! shared children before mutating them.

use std::any::Any;
use std::ops::{Index, IndexMut};
use std::rc::Rc;

use pliant_common::LogLevel;
use pliant_common::float::UNDEFINED;
use pliant_style::{NodeType, Style};

use crate::config::{CloneNodeFunc, Config, ConfigId, ConfigSettings};
use crate::error::{Result, TreeError};
use crate::events::LayoutEvents;
use crate::layout_result::LayoutResult;
use crate::node::{BaselineFunc, DirtiedFunc, MeasureFunc, Node, NodeId};

/// Owner of every node and config, plus the layout generation counter.
pub struct Tree {
    nodes: Vec<Option<Node>>,
    configs: Vec<Option<Config>>,
    events: Option<Rc<dyn LayoutEvents>>,
    generation: u32,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// An empty tree with one default config.
    #[must_use]
    pub fn new() -> Self {
        Self::with_settings(ConfigSettings::default())
    }

    /// An empty tree whose default config uses `settings`.
    #[must_use]
    pub fn with_settings(settings: ConfigSettings) -> Self {
        Self {
            nodes: Vec::new(),
            configs: vec![Some(Config::new(settings))],
            events: None,
            generation: 0,
        }
    }

    // ========== Configs ==========

    /// Add a config and return its id.
    pub fn new_config(&mut self, settings: ConfigSettings) -> ConfigId {
        self.push_config(Config::new(settings))
    }

    /// Copy a config, callbacks included.
    ///
    /// # Panics
    ///
    /// Panics if `id` was freed.
    pub fn clone_config(&mut self, id: ConfigId) -> ConfigId {
        let copy = self[id].clone();
        self.push_config(copy)
    }

    fn push_config(&mut self, config: Config) -> ConfigId {
        let id = ConfigId(self.configs.len());
        self.configs.push(Some(config));
        id
    }

    /// Drop a config. The default config is never dropped.
    pub fn free_config(&mut self, id: ConfigId) {
        if id != ConfigId::DEFAULT
            && let Some(slot) = self.configs.get_mut(id.0)
        {
            *slot = None;
        }
    }

    /// The config with `id`, if it exists.
    #[must_use]
    pub fn config(&self, id: ConfigId) -> Option<&Config> {
        self.configs.get(id.0).and_then(Option::as_ref)
    }

    /// The config with `id`, mutably.
    pub fn config_mut(&mut self, id: ConfigId) -> Option<&mut Config> {
        self.configs.get_mut(id.0).and_then(Option::as_mut)
    }

    /// The config a node reads its settings from.
    ///
    /// # Panics
    ///
    /// Panics if `node` or its config was freed.
    #[must_use]
    pub fn config_of(&self, node: NodeId) -> &Config {
        &self[self[node].config]
    }

    /// Set the points-to-pixels factor; zero disables rounding.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::NegativeScaleFactor`] for a negative factor.
    pub fn set_point_scale_factor(&mut self, id: ConfigId, factor: f32) -> Result<()> {
        if factor < 0.0 {
            return self.fail(None, TreeError::NegativeScaleFactor);
        }
        if let Some(config) = self.config_mut(id) {
            config.settings.point_scale_factor = factor;
        }
        Ok(())
    }

    // ========== Events and generation ==========

    /// Install or remove the layout observer.
    pub fn set_events(&mut self, events: Option<Rc<dyn LayoutEvents>>) {
        self.events = events;
    }

    /// The installed layout observer.
    #[must_use]
    pub fn events(&self) -> Option<Rc<dyn LayoutEvents>> {
        self.events.clone()
    }

    /// Run `f` against the observer, if any.
    pub fn publish(&self, f: impl FnOnce(&dyn LayoutEvents)) {
        if let Some(events) = &self.events {
            f(events.as_ref());
        }
    }

    /// The current layout generation.
    #[must_use]
    pub const fn generation(&self) -> u32 {
        self.generation
    }

    /// Start a new layout generation and return it.
    pub const fn next_generation(&mut self) -> u32 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    // ========== Logging ==========

    /// Log through the node's config, or the default config for `None`.
    pub fn log(&self, node: Option<NodeId>, level: LogLevel, message: &str) {
        let config = node
            .and_then(|id| self.get(id))
            .map_or(ConfigId::DEFAULT, |n| n.config);
        if let Some(config) = self.config(config).or_else(|| self.config(ConfigId::DEFAULT)) {
            config.log(node, level, message);
        }
    }

    fn fail<T>(&self, node: Option<NodeId>, error: TreeError) -> Result<T> {
        self.log(node, LogLevel::Fatal, &error.to_string());
        Err(error)
    }

    // ========== Node access ==========

    /// Get a node by its id.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    /// Get a mutable reference to a node by its id.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Whether `id` refers to a live node.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// Whether the tree holds no live nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check(&self, id: NodeId) -> Result<()> {
        if self.contains(id) {
            Ok(())
        } else {
            self.fail(None, TreeError::UnknownNode(id))
        }
    }

    /// Ordered children; empty for unknown ids.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// The child at `index`.
    #[must_use]
    pub fn child(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.children(id).get(index).copied()
    }

    /// Number of children.
    #[must_use]
    pub fn child_count(&self, id: NodeId) -> usize {
        self.children(id).len()
    }

    /// The node's owner.
    #[must_use]
    pub fn owner(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.owner)
    }

    /// Iterate over the owners of a node, nearest first.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            current: self.owner(id),
        }
    }

    // ========== Allocation ==========

    /// Create a node with the default config.
    ///
    /// Ids are never recycled: a freed slot stays empty, so a stale id
    /// reports [`TreeError::UnknownNode`] instead of reaching a new node.
    pub fn new_node(&mut self) -> NodeId {
        self.new_node_with_config(ConfigId::DEFAULT)
    }

    /// Create a node that reads its settings from `config`.
    pub fn new_node_with_config(&mut self, config: ConfigId) -> NodeId {
        let web = self
            .config(config)
            .is_some_and(|c| c.settings.use_web_defaults);
        self.alloc(Node::new(config, web))
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        let config = node.config;
        self.nodes.push(Some(node));
        self.publish(|e| e.node_allocated(id, config));
        id
    }

    /// Shallow copy: style, callbacks and layout are copied and the
    /// children list is shared with the original, which stays their owner.
    /// The copy has no owner.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::UnknownNode`] if `id` is not live.
    pub fn clone_node(&mut self, id: NodeId) -> Result<NodeId> {
        let Some(original) = self.get(id) else {
            return self.fail(None, TreeError::UnknownNode(id));
        };
        let mut copy = original.clone();
        copy.owner = None;
        Ok(self.alloc(copy))
    }

    /// Recursive copy: every descendant is copied and owned by its copied
    /// owner, and every copy gets its own copy of the config.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::UnknownNode`] if `id` is not live.
    pub fn deep_clone(&mut self, id: NodeId) -> Result<NodeId> {
        self.check(id)?;
        Ok(self.deep_clone_inner(id, None))
    }

    /// Recursive copy where every copy uses `config`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::UnknownNode`] if `id` is not live.
    pub fn deep_clone_with_config(&mut self, id: NodeId, config: ConfigId) -> Result<NodeId> {
        self.check(id)?;
        Ok(self.deep_clone_inner(id, Some(config)))
    }

    fn deep_clone_inner(&mut self, id: NodeId, shared_config: Option<ConfigId>) -> NodeId {
        let mut copy = self[id].clone();
        copy.owner = None;
        let config = copy.config;
        copy.config = shared_config.unwrap_or_else(|| self.clone_config(config));
        let children = std::mem::take(&mut copy.children);
        let copy_id = self.alloc(copy);
        let copied: Vec<NodeId> = children
            .into_iter()
            .map(|child| {
                let child_copy = self.deep_clone_inner(child, shared_config);
                self[child_copy].owner = Some(copy_id);
                child_copy
            })
            .collect();
        self[copy_id].children = copied;
        copy_id
    }

    /// Free one node. It is detached from its owner, and its children are
    /// detached from it.
    ///
    /// Nodes sharing `id` through [`Tree::clone_node`] keep it in their
    /// children lists and must not be laid out again until they clone their
    /// shared children. Each such list is reported at [`LogLevel::Error`].
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::UnknownNode`] if `id` is not live.
    pub fn free(&mut self, id: NodeId) -> Result<()> {
        self.check(id)?;
        if let Some(owner) = self.owner(id) {
            let _ = self.detach(owner, id);
            self[id].owner = None;
        }
        let children = std::mem::take(&mut self[id].children);
        for child in children {
            if let Some(node) = self.get_mut(child)
                && node.owner == Some(id)
            {
                node.owner = None;
            }
        }
        for sharer in self.listed_by(id) {
            self.log(
                Some(sharer),
                LogLevel::Error,
                &format!("freed node {id:?} is still a child of {sharer:?}, which shares it"),
            );
        }
        let config = self[id].config;
        self.nodes[id.0] = None;
        self.publish(|e| e.node_deallocated(id, config));
        Ok(())
    }

    /// Live nodes whose children lists contain `id`.
    fn listed_by(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.as_ref().is_some_and(|n| n.children.contains(&id)))
            .map(|(index, _)| NodeId(index))
            .collect()
    }

    /// Free a node and every descendant it owns. Children owned by another
    /// node are left alone.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::UnknownNode`] if `id` is not live.
    pub fn free_recursive(&mut self, id: NodeId) -> Result<()> {
        self.check(id)?;
        let mut skipped = 0;
        while let Some(child) = self.child(id, skipped) {
            if self.owner(child) == Some(id) {
                self.remove_child(id, child)?;
                self.free_recursive(child)?;
            } else {
                skipped += 1;
            }
        }
        self.free(id)
    }

    /// Restore a detached, childless node to its initial state, keeping
    /// its config and web-defaults flag.
    ///
    /// # Errors
    ///
    /// Fails if the node still has children or an owner.
    pub fn reset(&mut self, id: NodeId) -> Result<()> {
        self.check(id)?;
        let node = &self[id];
        if !node.children.is_empty() {
            return self.fail(Some(id), TreeError::ResetWithChildren { node: id });
        }
        if node.owner.is_some() {
            return self.fail(Some(id), TreeError::ResetWithOwner { node: id });
        }
        let fresh = Node::new(node.config, node.use_web_defaults);
        self[id] = fresh;
        Ok(())
    }

    // ========== Children ==========

    /// Insert `child` at `index` and take ownership of it.
    ///
    /// # Errors
    ///
    /// Fails if `child` already has an owner, `owner` has a measure
    /// callback, or `index` is past the end.
    pub fn insert_child(&mut self, owner: NodeId, child: NodeId, index: usize) -> Result<()> {
        self.check(owner)?;
        self.check(child)?;
        if self[child].owner.is_some() {
            return self.fail(Some(owner), TreeError::ChildHasOwner { child });
        }
        if self[owner].has_measure_func() {
            return self.fail(Some(owner), TreeError::MeasuredNodeCannotHaveChildren { owner });
        }
        let len = self[owner].children.len();
        if index > len {
            return self.fail(Some(owner), TreeError::IndexOutOfBounds { owner, index, len });
        }
        self[owner].children.insert(index, child);
        self[child].owner = Some(owner);
        self.mark_dirty_and_propagate(owner);
        Ok(())
    }

    /// Append `child` and take ownership of it.
    ///
    /// # Errors
    ///
    /// See [`insert_child`](Self::insert_child).
    pub fn add_child(&mut self, owner: NodeId, child: NodeId) -> Result<()> {
        let len = self.child_count(owner);
        self.insert_child(owner, child, len)
    }

    fn detach(&mut self, owner: NodeId, child: NodeId) -> bool {
        let Some(node) = self.get_mut(owner) else {
            return false;
        };
        match node.children.iter().position(|&c| c == child) {
            Some(index) => {
                let _ = node.children.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove `child` from `owner`'s children. If `owner` owned it, the
    /// child's layout is reset and it becomes detached. Not being a child
    /// is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::UnknownNode`] for unknown ids.
    pub fn remove_child(&mut self, owner: NodeId, child: NodeId) -> Result<()> {
        self.check(owner)?;
        self.check(child)?;
        if self[owner].children.is_empty() {
            return Ok(());
        }
        let child_owner = self[child].owner;
        if self.detach(owner, child) {
            if child_owner == Some(owner) {
                let node = &mut self[child];
                node.layout = LayoutResult::default();
                node.owner = None;
            }
            self.mark_dirty_and_propagate(owner);
        }
        Ok(())
    }

    /// Remove every child. Owned children are reset and detached; a shared
    /// children list is simply dropped.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::UnknownNode`] for unknown ids.
    pub fn remove_all_children(&mut self, owner: NodeId) -> Result<()> {
        self.check(owner)?;
        let children = std::mem::take(&mut self[owner].children);
        let Some(&first) = children.first() else {
            return Ok(());
        };
        if self.owner(first) == Some(owner) {
            for child in children {
                if let Some(node) = self.get_mut(child) {
                    node.layout = LayoutResult::default();
                    node.owner = None;
                }
            }
        }
        self.mark_dirty_and_propagate(owner);
        Ok(())
    }

    /// Put `child` at `index` in place of the current child and make
    /// `owner` its owner.
    ///
    /// # Errors
    ///
    /// Fails for unknown ids or an index past the last child.
    pub fn replace_child(&mut self, owner: NodeId, child: NodeId, index: usize) -> Result<()> {
        self.check(owner)?;
        self.check(child)?;
        let len = self[owner].children.len();
        if index >= len {
            return self.fail(Some(owner), TreeError::IndexOutOfBounds { owner, index, len });
        }
        self[owner].children[index] = child;
        self[child].owner = Some(owner);
        Ok(())
    }

    /// Replace the whole children list. Old children that are not in the
    /// new list are reset and detached; every new child is owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::UnknownNode`] for unknown ids.
    pub fn set_children(&mut self, owner: NodeId, children: &[NodeId]) -> Result<()> {
        self.check(owner)?;
        for &child in children {
            self.check(child)?;
        }
        if children.is_empty() && self[owner].children.is_empty() {
            return Ok(());
        }
        let old = std::mem::replace(&mut self[owner].children, children.to_vec());
        for child in old {
            if children.contains(&child) {
                continue;
            }
            if let Some(node) = self.get_mut(child) {
                node.layout = LayoutResult::default();
                node.owner = None;
            }
        }
        for &child in children {
            self[child].owner = Some(owner);
        }
        self.mark_dirty_and_propagate(owner);
        Ok(())
    }

    /// Replace every child not owned by `owner` with a copy it owns.
    ///
    /// The config's clone callback provides the copy; without one, or if
    /// it returns `None`, a shallow clone is made.
    pub fn clone_children_if_needed(&mut self, owner: NodeId) {
        let count = self.child_count(owner);
        for index in 0..count {
            let child = self[owner].children[index];
            if self.owner(child) == Some(owner) {
                continue;
            }
            let func: Option<CloneNodeFunc> = self.config_of(owner).clone_node_func();
            let clone = func
                .and_then(|f| f(self, child, owner, index))
                .filter(|&c| self.contains(c))
                .or_else(|| self.clone_node(child).ok());
            if let Some(clone) = clone {
                self[owner].children[index] = clone;
                self[clone].owner = Some(owner);
            }
        }
    }

    // ========== Style ==========

    /// Edit the style in place. The node and its owners are marked dirty
    /// only if the style actually changed.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::UnknownNode`] for unknown ids.
    pub fn update_style(&mut self, id: NodeId, f: impl FnOnce(&mut Style)) -> Result<()> {
        self.check(id)?;
        let mut style = self[id].style;
        f(&mut style);
        if style != self[id].style {
            self[id].style = style;
            self.mark_dirty_and_propagate(id);
        }
        Ok(())
    }

    /// Replace the style. Marks dirty only on change.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::UnknownNode`] for unknown ids.
    pub fn set_style(&mut self, id: NodeId, style: Style) -> Result<()> {
        self.update_style(id, |s| *s = style)
    }

    /// Copy `src`'s style onto `dst`. Marks dirty only on change.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::UnknownNode`] for unknown ids.
    pub fn copy_style(&mut self, dst: NodeId, src: NodeId) -> Result<()> {
        self.check(src)?;
        let style = self[src].style;
        self.set_style(dst, style)
    }

    // ========== Callbacks and flags ==========

    /// Install or clear the measure callback. Installing one makes the
    /// node a text node; clearing it makes it a default node.
    ///
    /// # Errors
    ///
    /// Fails when installing on a node that has children.
    pub fn set_measure_func(&mut self, id: NodeId, func: Option<MeasureFunc>) -> Result<()> {
        self.check(id)?;
        let node = &self[id];
        if func.is_some() && !node.children.is_empty() {
            return self.fail(Some(id), TreeError::CannotSetMeasureWithChildren { node: id });
        }
        let node = &mut self[id];
        node.node_type = if func.is_some() {
            NodeType::Text
        } else {
            NodeType::Default
        };
        node.measure = func;
        Ok(())
    }

    /// Install or clear the baseline callback.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::UnknownNode`] for unknown ids.
    pub fn set_baseline_func(&mut self, id: NodeId, func: Option<BaselineFunc>) -> Result<()> {
        self.check(id)?;
        self[id].baseline = func;
        Ok(())
    }

    /// Install or clear the dirtied callback.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::UnknownNode`] for unknown ids.
    pub fn set_dirtied_func(&mut self, id: NodeId, func: Option<DirtiedFunc>) -> Result<()> {
        self.check(id)?;
        self[id].dirtied = func;
        Ok(())
    }

    /// Attach or clear caller data.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::UnknownNode`] for unknown ids.
    pub fn set_context(&mut self, id: NodeId, context: Option<Rc<dyn Any>>) -> Result<()> {
        self.check(id)?;
        self[id].context = context;
        Ok(())
    }

    /// Make this child define its owner's baseline. Marks dirty on change.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::UnknownNode`] for unknown ids.
    pub fn set_is_reference_baseline(&mut self, id: NodeId, value: bool) -> Result<()> {
        self.check(id)?;
        if self[id].is_reference_baseline != value {
            self[id].is_reference_baseline = value;
            self.mark_dirty_and_propagate(id);
        }
        Ok(())
    }

    /// Set or acknowledge the new-layout flag.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::UnknownNode`] for unknown ids.
    pub fn set_has_new_layout(&mut self, id: NodeId, value: bool) -> Result<()> {
        self.check(id)?;
        self[id].set_has_new_layout(value);
        Ok(())
    }

    /// Override the node type.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::UnknownNode`] for unknown ids.
    pub fn set_node_type(&mut self, id: NodeId, node_type: NodeType) -> Result<()> {
        self.check(id)?;
        self[id].node_type = node_type;
        Ok(())
    }

    // ========== Dirty state ==========

    /// Set the dirty flag. The dirtied callback fires only on a
    /// transition into the dirty state.
    pub fn set_dirty(&mut self, id: NodeId, dirty: bool) {
        let Some(node) = self.get_mut(id) else {
            return;
        };
        if node.dirty == dirty {
            return;
        }
        node.dirty = dirty;
        if dirty && let Some(callback) = node.dirtied.clone() {
            callback(id);
        }
    }

    /// Mark the node dirty and walk up through its owners until one is
    /// already dirty. Each newly dirty node forgets its computed flex basis.
    pub fn mark_dirty_and_propagate(&mut self, id: NodeId) {
        let mut current = Some(id);
        while let Some(id) = current {
            match self.get(id) {
                Some(node) if !node.dirty => {}
                _ => break,
            }
            self.set_dirty(id, true);
            self[id].layout.computed_flex_basis = UNDEFINED;
            current = self[id].owner;
        }
    }

    /// Mark a measured leaf dirty so it is measured again.
    ///
    /// # Errors
    ///
    /// Fails if the node has no measure callback.
    pub fn mark_dirty(&mut self, id: NodeId) -> Result<()> {
        self.check(id)?;
        if !self[id].has_measure_func() {
            return self.fail(Some(id), TreeError::MarkDirtyWithoutMeasure { node: id });
        }
        self.mark_dirty_and_propagate(id);
        Ok(())
    }

    /// Set the dirty flag on the node and every descendant, without
    /// callbacks.
    pub fn mark_dirty_downwards(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.get_mut(id) {
                node.dirty = true;
                stack.extend_from_slice(&node.children);
            }
        }
    }

    /// Whether the node or one of its children took the legacy stretch path.
    #[must_use]
    pub fn did_use_legacy_flag(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(|n| {
            n.layout.did_use_legacy_flag
                || n.children
                    .iter()
                    .any(|&c| self.get(c).is_some_and(|c| c.layout.did_use_legacy_flag))
        })
    }

    /// Compare the computed geometry of two subtrees.
    #[must_use]
    pub fn layout_trees_equal(&self, a: NodeId, b: NodeId) -> bool {
        let (Some(x), Some(y)) = (self.get(a), self.get(b)) else {
            return false;
        };
        x.children.len() == y.children.len()
            && x.layout.geometry_eq(&y.layout)
            && x
                .children
                .iter()
                .zip(&y.children)
                .all(|(&ca, &cb)| self.layout_trees_equal(ca, cb))
    }
}

impl Index<NodeId> for Tree {
    type Output = Node;

    /// # Panics
    ///
    /// Panics if `id` was never allocated or has been freed.
    fn index(&self, id: NodeId) -> &Node {
        match self.nodes.get(id.0) {
            Some(Some(node)) => node,
            _ => panic!("unknown or freed node {id:?}"),
        }
    }
}

impl IndexMut<NodeId> for Tree {
    /// # Panics
    ///
    /// Panics if `id` was never allocated or has been freed.
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        match self.nodes.get_mut(id.0) {
            Some(Some(node)) => node,
            _ => panic!("unknown or freed node {id:?}"),
        }
    }
}

impl Index<ConfigId> for Tree {
    type Output = Config;

    /// # Panics
    ///
    /// Panics if `id` was never created or has been freed.
    fn index(&self, id: ConfigId) -> &Config {
        match self.configs.get(id.0) {
            Some(Some(config)) => config,
            _ => panic!("unknown or freed config {id:?}"),
        }
    }
}

impl IndexMut<ConfigId> for Tree {
    /// # Panics
    ///
    /// Panics if `id` was never created or has been freed.
    fn index_mut(&mut self, id: ConfigId) -> &mut Config {
        match self.configs.get_mut(id.0) {
            Some(Some(config)) => config,
            _ => panic!("unknown or freed config {id:?}"),
        }
    }
}

/// Iterator over the owners of a node.
pub struct Ancestors<'a> {
    tree: &'a Tree,
    current: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.owner(id);
        Some(id)
    }
}
