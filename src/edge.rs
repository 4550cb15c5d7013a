use std::hash::{Hash, Hasher};

use crate::error::{GraphError, Result};

/// An undirected co-purchase relation between two vertices.
///
/// Endpoints are vertex ids into the owning graph's live slot map; `first`
/// and `second` are just names and carry no direction. Weight is 0.0 in
/// unweighted graphs. Equality and hashing are order-independent over the
/// endpoint pair and ignore the weight, so (a, b) and (b, a) are the same
/// edge.
#[derive(Debug, Clone)]
pub struct Edge {
    first: usize,
    second: usize,
    weight: f64,
}

impl Edge {
    /// Creates an edge between two distinct vertices.
    pub fn new(first: usize, second: usize, weight: f64) -> Result<Self> {
        if first == second {
            return Err(GraphError::invalid_input(format!(
                "an edge needs two distinct endpoints, got {first} twice"
            )));
        }
        Ok(Edge {
            first,
            second,
            weight,
        })
    }

    pub fn first(&self) -> usize {
        self.first
    }

    pub fn second(&self) -> usize {
        self.second
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn endpoints(&self) -> (usize, usize) {
        (self.first, self.second)
    }

    /// The endpoint opposite `vertex`.
    pub fn opposite_end(&self, vertex: usize) -> Result<usize> {
        if self.first == vertex {
            Ok(self.second)
        } else if self.second == vertex {
            Ok(self.first)
        } else {
            Err(GraphError::VertexNotOnEdge {
                edge: (self.first, self.second),
                vertex,
            })
        }
    }

    /// Rewrites the endpoint equal to `old` to `new`, keeping the weight.
    /// This is the one place an edge is mutated; contraction uses it to
    /// redirect a merged vertex's edges to the surviving vertex. The result
    /// may be a self-loop, which the caller must detect and discard.
    pub(crate) fn replace_end(&mut self, old: usize, new: usize) -> Result<()> {
        if self.first == old {
            self.first = new;
        } else if self.second == old {
            self.second = new;
        } else {
            return Err(GraphError::VertexNotOnEdge {
                edge: (self.first, self.second),
                vertex: old,
            });
        }
        Ok(())
    }

    /// True when both endpoints have collapsed onto the same vertex.
    pub fn is_self_loop(&self) -> bool {
        self.first == self.second
    }

    /// True when the endpoint pair equals {u, v} in either order.
    pub fn joins(&self, u: usize, v: usize) -> bool {
        (self.first == u && self.second == v) || (self.first == v && self.second == u)
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.joins(other.first, other.second)
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.first.min(self.second).hash(state);
        self.first.max(self.second).hash(state);
    }
}
