use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use tracing::debug;

/// Bound for vertex payloads: equality defines identity, `Hash` backs the
/// value index, `Debug` renders values in error messages.
pub trait VertexValue: Clone + Eq + Hash + fmt::Debug {}

impl<T: Clone + Eq + Hash + fmt::Debug> VertexValue for T {}

/// Stable handle to a vertex.
///
/// Unlike a vertex's position in the insertion sequence, a handle survives
/// the removal of other vertices. The slot generation is bumped when its
/// vertex is removed, so a handle to a removed vertex never resolves again,
/// even after the slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexId {
    index: u32,
    generation: u32,
}

impl VertexId {
    /// Dense slot index, usable for per-vertex scratch arrays sized by
    /// `Graph::slot_count`.
    pub(crate) fn slot(self) -> usize {
        self.index as usize
    }
}

struct VertexEntry<T> {
    value: T,
    /// Successors in arc insertion order. No duplicates.
    outgoing: Vec<VertexId>,
    /// Predecessor handles, kept so removal can cascade and indegree is O(1).
    incoming: Vec<VertexId>,
}

struct Slot<T> {
    generation: u32,
    entry: Option<VertexEntry<T>>,
}

/// In-memory directed graph: vertex sequence + adjacency lists.
///
/// Vertices are kept in insertion order (`vertices()`, `outdegrees()`,
/// `indegrees()` and TGF numbering are all aligned with it). Every arc
/// endpoint is a live vertex: arcs are only added between existing vertices
/// and removing a vertex scrubs it from all other adjacency lists.
pub struct Graph<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    order: Vec<VertexId>,
    index: HashMap<T, VertexId>,
}

impl<T: VertexValue> Graph<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            order: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Pre-allocate for a known vertex count.
    pub fn with_capacity(vertex_count: usize) -> Self {
        Self {
            slots: Vec::with_capacity(vertex_count),
            free: Vec::new(),
            order: Vec::with_capacity(vertex_count),
            index: HashMap::with_capacity(vertex_count),
        }
    }

    fn entry(&self, id: VertexId) -> Option<&VertexEntry<T>> {
        self.slots
            .get(id.slot())
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.entry.as_ref())
    }

    fn entry_mut(&mut self, id: VertexId) -> Option<&mut VertexEntry<T>> {
        self.slots
            .get_mut(id.slot())
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.entry.as_mut())
    }

    /// Live entries in vertex-sequence order.
    fn entries(&self) -> impl Iterator<Item = (VertexId, &VertexEntry<T>)> + '_ {
        self.order
            .iter()
            .filter_map(move |&id| self.entry(id).map(|e| (id, e)))
    }

    // --- Mutation ---

    /// Add a vertex. Adding a value that is already present is a no-op;
    /// either way the vertex's handle is returned.
    pub fn add_vertex(&mut self, value: T) -> VertexId {
        if let Some(&id) = self.index.get(&value) {
            return id;
        }

        let entry = VertexEntry {
            value: value.clone(),
            outgoing: Vec::new(),
            incoming: Vec::new(),
        };

        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.entry = Some(entry);
                VertexId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    entry: Some(entry),
                });
                VertexId {
                    index,
                    generation: 0,
                }
            }
        };

        self.order.push(id);
        self.index.insert(value, id);
        id
    }

    /// Remove a vertex and every arc touching it.
    ///
    /// Vertices after it in the sequence shift down one position; their
    /// handles stay valid. Returns false if the value was not a vertex.
    pub fn remove_vertex(&mut self, value: &T) -> bool {
        let Some(id) = self.index.remove(value) else {
            return false;
        };

        let Some(entry) = self.slots.get_mut(id.slot()).and_then(|slot| {
            slot.generation = slot.generation.wrapping_add(1);
            slot.entry.take()
        }) else {
            return false;
        };

        // The removed slot's generation no longer matches `id`, so a self-loop
        // is skipped here.
        for &pred in &entry.incoming {
            if let Some(p) = self.entry_mut(pred) {
                p.outgoing.retain(|&s| s != id);
            }
        }
        for &succ in &entry.outgoing {
            if let Some(s) = self.entry_mut(succ) {
                s.incoming.retain(|&p| p != id);
            }
        }

        if let Some(pos) = self.order.iter().position(|&v| v == id) {
            self.order.remove(pos);
        }
        self.free.push(id.index);

        debug!(
            vertex = ?value,
            arcs_out = entry.outgoing.len(),
            arcs_in = entry.incoming.len(),
            "removed vertex"
        );
        true
    }

    fn link(&mut self, from: VertexId, to: VertexId) -> bool {
        let Some(source) = self.entry_mut(from) else {
            return false;
        };
        if source.outgoing.contains(&to) {
            return false;
        }
        source.outgoing.push(to);
        if let Some(target) = self.entry_mut(to) {
            target.incoming.push(from);
        }
        true
    }

    fn unlink(&mut self, from: VertexId, to: VertexId) -> bool {
        let Some(source) = self.entry_mut(from) else {
            return false;
        };
        let Some(pos) = source.outgoing.iter().position(|&s| s == to) else {
            return false;
        };
        source.outgoing.remove(pos);
        if let Some(target) = self.entry_mut(to) {
            target.incoming.retain(|&p| p != from);
        }
        true
    }

    /// Add the arc `from → to` if both vertices exist and the arc is new.
    /// Returns true only when an arc was created.
    pub fn add_arc(&mut self, from: &T, to: &T) -> bool {
        match (self.vertex_id(from), self.vertex_id(to)) {
            (Some(f), Some(t)) => self.link(f, t),
            _ => false,
        }
    }

    /// Remove the arc `from → to`. Returns true only when an arc was removed.
    pub fn remove_arc(&mut self, from: &T, to: &T) -> bool {
        match (self.vertex_id(from), self.vertex_id(to)) {
            (Some(f), Some(t)) => self.unlink(f, t),
            _ => false,
        }
    }

    /// Add arcs in both directions.
    pub fn add_edge(&mut self, v1: &T, v2: &T) -> bool {
        let forward = self.add_arc(v1, v2);
        let backward = self.add_arc(v2, v1);
        forward || backward
    }

    /// Remove arcs in both directions.
    pub fn remove_edge(&mut self, v1: &T, v2: &T) -> bool {
        let forward = self.remove_arc(v1, v2);
        let backward = self.remove_arc(v2, v1);
        forward || backward
    }

    /// Bulk load from an iterator of `(from, to)` pairs, adding both
    /// endpoints as vertices first. This is the edge-list ingestion path.
    /// Returns the number of arcs created (repeated pairs are not counted).
    pub fn load_arcs<I>(&mut self, arcs: I) -> usize
    where
        I: IntoIterator<Item = (T, T)>,
    {
        let mut added = 0;
        let mut rows = 0;
        for (from, to) in arcs {
            rows += 1;
            let f = self.add_vertex(from);
            let t = self.add_vertex(to);
            if self.link(f, t) {
                added += 1;
            }
        }
        debug!(
            rows,
            arcs_added = added,
            vertices = self.vertex_count(),
            "loaded arcs"
        );
        added
    }

    // --- Query ---

    pub fn contains(&self, value: &T) -> bool {
        self.index.contains_key(value)
    }

    pub fn vertex_id(&self, value: &T) -> Option<VertexId> {
        self.index.get(value).copied()
    }

    /// Resolve a handle. None if the vertex has been removed.
    pub fn value(&self, id: VertexId) -> Option<&T> {
        self.entry(id).map(|e| &e.value)
    }

    /// Current 0-based position of a vertex in the insertion sequence.
    pub fn position(&self, value: &T) -> Option<usize> {
        let id = self.vertex_id(value)?;
        self.order.iter().position(|&v| v == id)
    }

    /// True if `v1` exists and `v2` is one of its successors.
    pub fn is_arc(&self, v1: &T, v2: &T) -> bool {
        match (self.vertex_id(v1), self.vertex_id(v2)) {
            (Some(f), Some(t)) => self
                .entry(f)
                .map(|e| e.outgoing.contains(&t))
                .unwrap_or(false),
            _ => false,
        }
    }

    pub fn is_edge(&self, v1: &T, v2: &T) -> bool {
        self.is_arc(v1, v2) && self.is_arc(v2, v1)
    }

    /// True if every arc has its reverse. Vacuously true without arcs.
    pub fn is_undirected(&self) -> bool {
        self.entries().all(|(id, e)| {
            e.outgoing.iter().all(|&s| {
                self.entry(s)
                    .map(|succ| succ.outgoing.contains(&id))
                    .unwrap_or(false)
            })
        })
    }

    /// Read-only view of a vertex's successors, in arc insertion order.
    /// Empty for an unknown vertex.
    pub fn successors(&self, value: &T) -> Successors<'_, T> {
        let ids = self
            .vertex_id(value)
            .map(|id| self.successor_ids(id))
            .unwrap_or(&[]);
        Successors {
            graph: self,
            ids: ids.iter(),
        }
    }

    /// Vertices with an arc into `value`, in vertex-sequence order.
    pub fn predecessors(&self, value: &T) -> Vec<&T> {
        let Some(id) = self.vertex_id(value) else {
            return Vec::new();
        };
        self.entries()
            .filter(|(_, e)| e.outgoing.contains(&id))
            .map(|(_, e)| &e.value)
            .collect()
    }

    /// Vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &T> + '_ {
        self.entries().map(|(_, e)| &e.value)
    }

    /// Every arc as `(from, to)`, grouped by source in vertex-sequence order
    /// and by arc insertion order within a source.
    pub fn arcs(&self) -> impl Iterator<Item = (&T, &T)> + '_ {
        self.entries().flat_map(move |(_, e)| {
            e.outgoing
                .iter()
                .filter_map(move |&s| self.value(s).map(|to| (&e.value, to)))
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.order.len()
    }

    pub fn arc_count(&self) -> usize {
        self.entries().map(|(_, e)| e.outgoing.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn out_degree(&self, value: &T) -> Option<usize> {
        let id = self.vertex_id(value)?;
        self.entry(id).map(|e| e.outgoing.len())
    }

    pub fn in_degree(&self, value: &T) -> Option<usize> {
        let id = self.vertex_id(value)?;
        self.entry(id).map(|e| e.incoming.len())
    }

    /// Outdegree of every vertex, index-aligned with `vertices()`.
    pub fn outdegrees(&self) -> Vec<usize> {
        self.entries().map(|(_, e)| e.outgoing.len()).collect()
    }

    /// Indegree of every vertex, index-aligned with `vertices()`.
    pub fn indegrees(&self) -> Vec<usize> {
        self.entries().map(|(_, e)| e.incoming.len()).collect()
    }

    /// Approximate memory usage in bytes, excluding heap data owned by `T`.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let slots_mem = self.slots.capacity() * size_of::<Slot<T>>();
        let adjacency: usize = self
            .slots
            .iter()
            .filter_map(|s| s.entry.as_ref())
            .map(|e| (e.outgoing.capacity() + e.incoming.capacity()) * size_of::<VertexId>())
            .sum();
        let order_mem = self.order.capacity() * size_of::<VertexId>();
        let index_mem = self.index.len() * (size_of::<T>() + size_of::<VertexId>() + 8);

        slots_mem + adjacency + order_mem + index_mem
    }

    // --- Crate-internal access for traversal ---

    pub(crate) fn successor_ids(&self, id: VertexId) -> &[VertexId] {
        self.entry(id).map(|e| e.outgoing.as_slice()).unwrap_or(&[])
    }

    /// Upper bound of `VertexId::slot` values, for sizing visited arrays.
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Live handles in vertex-sequence order.
    pub(crate) fn vertex_ids(&self) -> &[VertexId] {
        &self.order
    }
}

impl<T: VertexValue> Default for Graph<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: VertexValue + fmt::Display> fmt::Display for Graph<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Vertices:")?;
        let names: Vec<String> = self.vertices().map(|v| v.to_string()).collect();
        writeln!(f, "[{}]", names.join(", "))?;
        writeln!(f, "Arcs:")?;
        for (_, e) in self.entries() {
            let succ: Vec<String> = e
                .outgoing
                .iter()
                .filter_map(|&s| self.value(s))
                .map(|v| v.to_string())
                .collect();
            writeln!(f, "from {}: [{}]", e.value, succ.join(", "))?;
        }
        Ok(())
    }
}

impl<T: VertexValue> fmt::Debug for Graph<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("vertices", &self.vertices().collect::<Vec<_>>())
            .field("arcs", &self.arcs().collect::<Vec<_>>())
            .finish()
    }
}

/// Borrowed, read-only view of a successor list.
///
/// Holding one borrows the graph, so the list cannot change underneath it.
/// Collect it if the values must outlive the borrow.
#[derive(Clone)]
pub struct Successors<'a, T> {
    graph: &'a Graph<T>,
    ids: std::slice::Iter<'a, VertexId>,
}

impl<'a, T: VertexValue> Iterator for Successors<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let id = *self.ids.next()?;
        self.graph.value(id)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl<T: VertexValue> ExactSizeIterator for Successors<'_, T> {}
