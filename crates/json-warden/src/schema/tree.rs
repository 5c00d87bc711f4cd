use crate::error::SchemaError;
use crate::schema::{ReferenceSchema, Schema, SchemaNode, SchemaRef};

/// Builder for a [`Schema`] arena.
///
/// Nodes are inserted bottom-up. A `$ref` whose target is not built yet is
/// first [reserved](SchemaTree::reserve_reference), so nodes below it can
/// already point at its handle, and is
/// [resolved](SchemaTree::resolve_reference) once the target exists.
#[derive(Debug, Default)]
pub struct SchemaTree {
    slots: Vec<Option<SchemaNode>>,
}

impl SchemaTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node: impl Into<SchemaNode>) -> SchemaRef {
        self.slots.push(Some(node.into()));
        SchemaRef(self.slots.len() - 1)
    }

    /// Allocates a reference node whose target is not known yet.
    pub fn reserve_reference(&mut self) -> SchemaRef {
        self.slots.push(None);
        SchemaRef(self.slots.len() - 1)
    }

    /// Fills a slot allocated by [`reserve_reference`](Self::reserve_reference).
    ///
    /// Returns `SchemaError::ReferenceAlreadyResolved` for a slot that already
    /// holds a node; a reference resolves exactly once.
    pub fn resolve_reference(
        &mut self,
        reference: SchemaRef,
        target: SchemaRef,
    ) -> Result<(), SchemaError> {
        match self.slots.get_mut(reference.0) {
            Some(slot @ None) => {
                *slot = Some(ReferenceSchema::new(target).into());
                Ok(())
            }
            Some(Some(_)) => Err(SchemaError::ReferenceAlreadyResolved(reference.0)),
            None => Err(SchemaError::DanglingHandle(reference.0, reference.0)),
        }
    }

    /// Returns the node behind `node`, if it is built.
    pub fn get(&self, node: SchemaRef) -> Option<&SchemaNode> {
        self.slots.get(node.0).and_then(Option::as_ref)
    }

    /// Mutable access to a built node, used to attach annotations.
    pub fn get_mut(&mut self, node: SchemaRef) -> Option<&mut SchemaNode> {
        self.slots.get_mut(node.0).and_then(Option::as_mut)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Freezes the arena into a [`Schema`] rooted at `root`.
    ///
    /// Fails if a reserved reference was never resolved, if any handle points
    /// outside the arena, or if a node can be reached from itself without
    /// descending into an array item or object property. Cycles that pass
    /// through `items` or `properties` are fine.
    pub fn build(self, root: SchemaRef) -> Result<Schema, SchemaError> {
        let mut nodes = Vec::with_capacity(self.slots.len());
        for (index, slot) in self.slots.into_iter().enumerate() {
            match slot {
                Some(node) => nodes.push(node),
                None => return Err(SchemaError::UnresolvedReference(index)),
            }
        }
        if root.0 >= nodes.len() {
            return Err(SchemaError::DanglingHandle(root.0, root.0));
        }
        for (index, node) in nodes.iter().enumerate() {
            if let Some(missing) = node.children().into_iter().find(|c| c.0 >= nodes.len()) {
                return Err(SchemaError::DanglingHandle(index, missing.0));
            }
        }
        check_same_value_cycles(&nodes)?;
        Ok(Schema::from_parts(nodes, root))
    }
}

/// Rejects cycles in which every edge validates the same value again
/// (references, combinators, `not`, schema dependencies). Validating such a
/// cycle never reaches a smaller value and would not terminate.
fn check_same_value_cycles(nodes: &[SchemaNode]) -> Result<(), SchemaError> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        Unvisited,
        OnPath,
        Done,
    }

    let edges: Vec<Vec<SchemaRef>> = nodes.iter().map(SchemaNode::same_value_children).collect();
    let mut marks = vec![Mark::Unvisited; nodes.len()];
    for start in 0..nodes.len() {
        if marks[start] != Mark::Unvisited {
            continue;
        }
        marks[start] = Mark::OnPath;
        // (node, index of the next edge to follow)
        let mut path = vec![(start, 0usize)];
        while let Some((node, next)) = path.last_mut() {
            let node = *node;
            match edges[node].get(*next) {
                Some(child) => {
                    *next += 1;
                    match marks[child.0] {
                        Mark::OnPath => return Err(SchemaError::CircularReference(child.0)),
                        Mark::Unvisited => {
                            marks[child.0] = Mark::OnPath;
                            path.push((child.0, 0));
                        }
                        Mark::Done => {}
                    }
                }
                None => {
                    marks[node] = Mark::Done;
                    path.pop();
                }
            }
        }
    }
    Ok(())
}
