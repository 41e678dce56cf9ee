//! Dependency graph over expression identifiers.
//!
//! Vertices are fixed at construction; an edge `a -> b` records that `a`
//! references `b`, so `b` must be computed first. Both traversals use an
//! explicit work stack, so long dependency chains cannot exhaust the call
//! stack.

use std::fmt;

use rustc_hash::FxHashMap;

/// Traversal state of a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Unvisited,
    /// On the current traversal path.
    Active,
    Done,
}

/// A directed graph whose vertices are expression identifiers.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    vertices:  Vec<String>,
    positions: FxHashMap<String, usize>,
    adjacency: Vec<Vec<usize>>,
}

impl DependencyGraph {
    /// Creates a graph without edges. Each vertex's index is its position in
    /// `vertices`.
    pub fn new(vertices: Vec<String>) -> Self {
        let positions = vertices.iter()
                                .enumerate()
                                .map(|(index, id)| (id.clone(), index))
                                .collect();
        let adjacency = vec![Vec::new(); vertices.len()];
        Self { vertices,
               positions,
               adjacency }
    }

    /// Returns the index of `id`, if it is a vertex.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Returns the identifier at `index`.
    pub fn vertex(&self, index: usize) -> Option<&str> {
        self.vertices.get(index).map(String::as_str)
    }

    /// Iterates over the identifiers in index order.
    pub fn vertices(&self) -> impl Iterator<Item = &str> {
        self.vertices.iter().map(String::as_str)
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns `true` if the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Adds the edge `from -> to` between vertex indices. Repeated edges are
    /// stored once; indices outside the graph are ignored.
    ///
    /// Returns `true` if a new edge was stored.
    pub fn add_edge(&mut self, from: usize, to: usize) -> bool {
        if to >= self.vertices.len() {
            return false;
        }
        match self.adjacency.get_mut(from) {
            Some(successors) if !successors.contains(&to) => {
                successors.push(to);
                true
            },
            _ => false,
        }
    }

    /// Records that `dependent` references `dependency`.
    ///
    /// Returns `false` if either identifier is not a vertex or the edge already
    /// exists.
    pub fn add_dependency(&mut self, dependent: &str, dependency: &str) -> bool {
        match (self.position(dependent), self.position(dependency)) {
            (Some(from), Some(to)) => self.add_edge(from, to),
            _ => false,
        }
    }

    /// Returns the identifiers `id` depends on directly, in insertion order.
    pub fn dependencies(&self, id: &str) -> Vec<&str> {
        self.position(id)
            .map(|index| {
                self.adjacency[index].iter()
                                     .map(|&to| self.vertices[to].as_str())
                                     .collect()
            })
            .unwrap_or_default()
    }

    /// Returns every vertex in dependency-first order.
    ///
    /// Vertices are visited depth-first in index order, and each one is
    /// emitted only after all of its successors. For every edge `a -> b`, `b`
    /// precedes `a`. The order is only meaningful when [`Self::cycles`] is
    /// empty.
    pub fn topological_order(&self) -> Vec<&str> {
        let mut visited = vec![false; self.vertices.len()];
        let mut order = Vec::with_capacity(self.vertices.len());
        // (vertex, index of the next successor to explore)
        let mut stack: Vec<(usize, usize)> = Vec::new();

        for root in 0..self.vertices.len() {
            if visited[root] {
                continue;
            }
            visited[root] = true;
            stack.push((root, 0));

            while let Some(frame) = stack.last_mut() {
                let (vertex, next) = *frame;
                if let Some(&successor) = self.adjacency[vertex].get(next) {
                    frame.1 += 1;
                    if !visited[successor] {
                        visited[successor] = true;
                        stack.push((successor, 0));
                    }
                } else {
                    order.push(self.vertices[vertex].as_str());
                    stack.pop();
                }
            }
        }

        order
    }

    /// Returns every dependency cycle, each as the identifiers along it.
    ///
    /// A depth-first traversal marks vertices unvisited, active on the current
    /// path, or done. Reaching an active vertex closes a cycle, reported as the
    /// slice of the path from that vertex to the traversal head; the head
    /// depends on the first element. Every root is explored, so all cycles
    /// reachable in one pass are collected.
    pub fn cycles(&self) -> Vec<Vec<&str>> {
        let mut state = vec![State::Unvisited; self.vertices.len()];
        let mut cycles = Vec::new();
        let mut path: Vec<usize> = Vec::new();
        let mut stack: Vec<(usize, usize)> = Vec::new();

        for root in 0..self.vertices.len() {
            if state[root] != State::Unvisited {
                continue;
            }
            state[root] = State::Active;
            path.push(root);
            stack.push((root, 0));

            while let Some(frame) = stack.last_mut() {
                let (vertex, next) = *frame;
                let Some(&successor) = self.adjacency[vertex].get(next) else {
                    state[vertex] = State::Done;
                    path.pop();
                    stack.pop();
                    continue;
                };
                frame.1 += 1;

                match state[successor] {
                    State::Active => {
                        if let Some(start) = path.iter().rposition(|&v| v == successor) {
                            cycles.push(path[start..].iter()
                                                     .map(|&v| self.vertices[v].as_str())
                                                     .collect());
                        }
                    },
                    State::Unvisited => {
                        state[successor] = State::Active;
                        path.push(successor);
                        stack.push((successor, 0));
                    },
                    State::Done => {},
                }
            }
        }

        cycles
    }
}

impl fmt::Display for DependencyGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (vertex, successors) in self.vertices.iter().zip(&self.adjacency) {
            write!(f, "{vertex} ->")?;
            for &to in successors {
                write!(f, " {}", self.vertices[to])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
