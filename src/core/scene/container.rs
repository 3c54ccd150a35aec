//=========================================================================
// Display Object Container
//=========================================================================
//
// Child management and depth ordering for container nodes.
//
// Each container owns a `ChildList`:
//   - members:   HashSet<NodeId>   (O(1) membership)
//   - draw_list: Vec<NodeId>       (render order, later = on top)
//
// Both structures are only ever modified together, so they always hold
// exactly the same ids.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

use log::debug;

//=== Internal Dependencies ===============================================

use super::{NodeId, Scene};
use crate::core::event::{Event, EventKind};
use crate::error::{SceneError, SceneResult};

//=== ChildList ===========================================================

/// Ordered, duplicate-free set of child ids.
#[derive(Debug, Default, Clone)]
pub(crate) struct ChildList {
    members: HashSet<NodeId>,
    draw_list: Vec<NodeId>,
}

impl ChildList {
    pub(crate) fn contains(&self, id: NodeId) -> bool {
        self.members.contains(&id)
    }

    pub(crate) fn len(&self) -> usize {
        self.draw_list.len()
    }

    pub(crate) fn get(&self, index: usize) -> Option<NodeId> {
        self.draw_list.get(index).copied()
    }

    pub(crate) fn index_of(&self, id: NodeId) -> Option<usize> {
        if !self.contains(id) {
            return None;
        }
        self.draw_list.iter().position(|&c| c == id)
    }

    pub(crate) fn as_slice(&self) -> &[NodeId] {
        &self.draw_list
    }

    /// Inserts at `index` (clamped to the length). Returns `false` for members.
    pub(crate) fn insert(&mut self, index: usize, id: NodeId) -> bool {
        if !self.members.insert(id) {
            return false;
        }
        let index = index.min(self.draw_list.len());
        self.draw_list.insert(index, id);
        true
    }

    pub(crate) fn remove_at(&mut self, index: usize) -> Option<NodeId> {
        if index >= self.draw_list.len() {
            return None;
        }
        let id = self.draw_list.remove(index);
        self.members.remove(&id);
        Some(id)
    }

    pub(crate) fn swap(&mut self, a: usize, b: usize) -> bool {
        if a >= self.draw_list.len() || b >= self.draw_list.len() {
            return false;
        }
        self.draw_list.swap(a, b);
        true
    }

    /// Replaces the draw order with a permutation of the current members.
    pub(crate) fn reorder(&mut self, order: Vec<NodeId>) {
        debug_assert_eq!(order.len(), self.draw_list.len());
        debug_assert!(order.iter().all(|id| self.members.contains(id)));
        self.draw_list = order;
    }
}

//=== Container Operations ================================================

impl Scene {
    pub(crate) fn child_list(&self, id: NodeId) -> SceneResult<&ChildList> {
        self.node(id)?
            .children
            .as_ref()
            .ok_or(SceneError::NotAContainer(id))
    }

    fn child_list_mut(&mut self, id: NodeId) -> SceneResult<&mut ChildList> {
        self.node_mut(id)?
            .children
            .as_mut()
            .ok_or(SceneError::NotAContainer(id))
    }

    /// Returns `true` if `ancestor` appears on the parent chain of `id`.
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut cursor = self.get(id).and_then(|n| n.parent);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.get(current).and_then(|n| n.parent);
        }
        false
    }

    //--- Attach -----------------------------------------------------------

    /// Appends `child` to the end of `parent`'s draw list.
    ///
    /// Returns `Ok(false)` if `child` is already a member. A child owned by
    /// another container is detached from it first.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> SceneResult<bool> {
        let end = self.child_list(parent)?.len();
        self.add_child_at(parent, child, end)
    }

    /// Inserts `child` at `index` in `parent`'s draw list, shifting later
    /// entries back. Indices past the end append.
    pub fn add_child_at(
        &mut self,
        parent: NodeId,
        child: NodeId,
        index: usize,
    ) -> SceneResult<bool> {
        let previous_parent = self.node(child)?.parent;
        if self.child_list(parent)?.contains(child) {
            return Ok(false);
        }
        if parent == child || self.is_ancestor(child, parent) {
            return Err(SceneError::CyclicAttach { parent, child });
        }

        if let Some(previous) = previous_parent {
            debug!("Reparenting {} from {} to {}", child, previous, parent);
            self.remove_child(previous, child)?;
        }

        self.child_list_mut(parent)?.insert(index, child);
        self.node_mut(child)?.parent = Some(parent);
        debug!("Attached {} to {} at {}", child, parent, index);

        self.emit_on(parent, Event::with_related(EventKind::ChildAdded, child));
        self.emit_on(child, Event::with_related(EventKind::AddedToStage, parent));
        Ok(true)
    }

    /// Attaches every id in order. Returns how many were newly attached.
    pub fn add_children(&mut self, parent: NodeId, children: &[NodeId]) -> SceneResult<usize> {
        let mut added = 0;
        for &child in children {
            if self.add_child(parent, child)? {
                added += 1;
            }
        }
        Ok(added)
    }

    //--- Detach -----------------------------------------------------------

    /// Detaches `child` from `parent`. Returns `Ok(None)` for non-members.
    pub fn remove_child(
        &mut self,
        parent: NodeId,
        child: NodeId,
    ) -> SceneResult<Option<NodeId>> {
        match self.find_child_index(parent, child)? {
            Some(index) => self.remove_child_at(parent, index),
            None => Ok(None),
        }
    }

    /// Detaches the child at `index`. Returns `Ok(None)` if out of range.
    pub fn remove_child_at(
        &mut self,
        parent: NodeId,
        index: usize,
    ) -> SceneResult<Option<NodeId>> {
        let Some(child) = self.child_list_mut(parent)?.remove_at(index) else {
            return Ok(None);
        };

        if let Ok(node) = self.node_mut(child) {
            node.parent = None;
        }
        debug!("Detached {} from {}", child, parent);

        self.emit_on(parent, Event::with_related(EventKind::ChildRemoved, child));
        if self.contains(child) {
            self.emit_on(child, Event::with_related(EventKind::RemovedFromStage, parent));
        }
        Ok(Some(child))
    }

    /// Detaches every listed member. Returns how many were removed.
    pub fn remove_children(&mut self, parent: NodeId, children: &[NodeId]) -> SceneResult<usize> {
        let mut removed = 0;
        for &child in children {
            if self.remove_child(parent, child)?.is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }

    //--- Queries ----------------------------------------------------------

    pub fn contains_child(&self, parent: NodeId, child: NodeId) -> SceneResult<bool> {
        self.node(child)?;
        Ok(self.child_list(parent)?.contains(child))
    }

    pub fn find_child_index(&self, parent: NodeId, child: NodeId) -> SceneResult<Option<usize>> {
        Ok(self.child_list(parent)?.index_of(child))
    }

    pub fn child_at(&self, parent: NodeId, index: usize) -> SceneResult<Option<NodeId>> {
        Ok(self.child_list(parent)?.get(index))
    }

    pub fn num_children(&self, parent: NodeId) -> SceneResult<usize> {
        Ok(self.child_list(parent)?.len())
    }

    /// Children in draw order.
    pub fn children(&self, parent: NodeId) -> SceneResult<&[NodeId]> {
        Ok(self.child_list(parent)?.as_slice())
    }

    //--- Ordering ---------------------------------------------------------

    /// Reorders children so smaller `bottom` values draw first.
    ///
    /// Painter's-algorithm depth for top-down views: things lower on screen
    /// are drawn over things above them. O(n²) swap sort; equal bottoms
    /// keep their order only if no swap passes over them.
    pub fn depth_sort(&mut self, parent: NodeId) -> SceneResult<()> {
        let list = self.child_list(parent)?;
        let mut order: Vec<(NodeId, f64)> = list
            .as_slice()
            .iter()
            .map(|&id| (id, self.get(id).map_or(0.0, |n| n.transform.bottom())))
            .collect();

        for i in 0..order.len() {
            let mut a = order[i].1;
            for j in (i + 1)..order.len() {
                let b = order[j].1;
                if a > b {
                    order.swap(i, j);
                    a = b;
                }
            }
        }

        self.child_list_mut(parent)?
            .reorder(order.into_iter().map(|(id, _)| id).collect());
        Ok(())
    }

    /// Exchanges the draw positions of two members.
    pub fn swap_children(&mut self, parent: NodeId, a: NodeId, b: NodeId) -> SceneResult<bool> {
        let list = self.child_list(parent)?;
        match (list.index_of(a), list.index_of(b)) {
            (Some(i), Some(j)) => self.swap_children_at(parent, i, j),
            _ => Ok(false),
        }
    }

    pub fn swap_children_at(&mut self, parent: NodeId, a: usize, b: usize) -> SceneResult<bool> {
        Ok(self.child_list_mut(parent)?.swap(a, b))
    }

    //--- Traversal --------------------------------------------------------

    /// Calls `f(scene, child, index)` for each direct child.
    ///
    /// Iterates a snapshot of the draw list; children detached by `f`
    /// earlier in the pass are still visited if they are alive.
    pub fn for_each_child<F>(&mut self, parent: NodeId, mut f: F) -> SceneResult<()>
    where
        F: FnMut(&mut Scene, NodeId, usize),
    {
        let snapshot = self.child_list(parent)?.as_slice().to_vec();
        for (index, child) in snapshot.into_iter().enumerate() {
            if self.contains(child) {
                f(self, child, index);
            }
        }
        Ok(())
    }

    /// Pre-order traversal: visits each child, then that child's subtree.
    pub fn for_each_child_recursive<F>(&mut self, parent: NodeId, mut f: F) -> SceneResult<()>
    where
        F: FnMut(&mut Scene, NodeId, usize),
    {
        self.child_list(parent)?;
        self.visit_recursive(parent, &mut f);
        Ok(())
    }

    fn visit_recursive(&mut self, parent: NodeId, f: &mut dyn FnMut(&mut Scene, NodeId, usize)) {
        let snapshot = match self.get(parent).and_then(|n| n.children.as_ref()) {
            Some(list) => list.as_slice().to_vec(),
            None => return,
        };

        for (index, child) in snapshot.into_iter().enumerate() {
            if !self.contains(child) {
                continue;
            }
            f(self, child, index);
            self.visit_recursive(child, f);
        }
    }

    /// All descendants of `id` in pre-order. Empty for non-containers.
    pub fn descendants(&self, id: NodeId) -> SceneResult<Vec<NodeId>> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = match &self.node(id)?.children {
            Some(list) => list.as_slice().iter().rev().copied().collect(),
            None => return Ok(out),
        };

        while let Some(current) = stack.pop() {
            out.push(current);
            if let Some(list) = self.get(current).and_then(|n| n.children.as_ref()) {
                stack.extend(list.as_slice().iter().rev().copied());
            }
        }
        Ok(out)
    }
}

//=========================================================================
// Tests
//=========================================================================
