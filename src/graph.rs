use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::{debug, trace};
use rand::Rng;

use crate::edge::Edge;
use crate::error::{GraphError, Result};
use crate::product::Product;

/// Minimum ratio of `2|E| / (N(N-1))` a generated graph must reach.
const MIN_DENSITY: f64 = 0.7;

/// A mutable multigraph of products connected by co-purchase relations.
///
/// Vertices are identified by integer ids `0..N`. Contraction merges a
/// vertex into another, so at any point only a subset of ids are *live*
/// slots; the rest have been absorbed into one of the survivors. Parallel
/// edges are kept as distinct entries and self-loops are never stored.
///
/// Edges live in an arena and are referenced by stable handles everywhere
/// else (the global multiset and the per-vertex incident sets), so
/// contraction rewrites a single endpoint field per affected edge instead of
/// rebuilding edge objects.
#[derive(Debug, Clone)]
pub struct Graph {
    num_products: usize,
    weighted: bool,
    /// Original id -> attributes; immutable after construction.
    products: Vec<Product>,
    /// N x N co-purchase adjacency, used during generation only.
    bought_together: Vec<Vec<bool>>,
    /// Surviving id -> ordered list of original ids merged into it.
    /// The key set is exactly the live vertex slots.
    groups: BTreeMap<usize, Vec<usize>>,
    /// Original id -> the surviving slot it currently belongs to.
    owner: Vec<usize>,
    /// Edge arena; dead slots are simply no longer referenced.
    arena: Vec<Edge>,
    /// The live edge multiset as arena handles. Parallel edges are distinct
    /// handles, so multiplicity is structural.
    multiset: Vec<usize>,
    /// Surviving id -> handles of its incident edges.
    incident: BTreeMap<usize, BTreeSet<usize>>,
}

impl Graph {
    /// Creates an empty graph over the given products. Every product starts
    /// as its own live vertex with no edges.
    pub fn new(products: Vec<Product>, weighted: bool) -> Self {
        let n = products.len();
        let mut bought_together = vec![vec![false; n]; n];
        for (i, row) in bought_together.iter_mut().enumerate() {
            // A product is always bought with itself.
            row[i] = true;
        }
        Graph {
            num_products: n,
            weighted,
            products,
            bought_together,
            groups: (0..n).map(|i| (i, Vec::new())).collect(),
            owner: (0..n).collect(),
            arena: Vec::new(),
            multiset: Vec::new(),
            incident: (0..n).map(|i| (i, BTreeSet::new())).collect(),
        }
    }

    /// Builds a graph of `n` random products and fills it with random
    /// co-purchase edges until the density bound holds. Weighted graphs get
    /// uniform edge weights in [0, 1) rounded to 3 decimal places.
    pub fn generate<R: Rng>(n: usize, weighted: bool, rng: &mut R) -> Result<Graph> {
        if n < 2 {
            return Err(GraphError::invalid_input(format!(
                "a co-purchase graph needs at least 2 products, got {n}"
            )));
        }
        debug!("generating {n} random products (weighted: {weighted})");
        let products = (0..n).map(|_| Product::random(rng)).collect();
        let mut graph = Graph::new(products, weighted);
        graph.fill(rng)?;
        Ok(graph)
    }

    /// Populates the adjacency matrix and edge multiset. Each off-diagonal
    /// pair is connected with the probability of at least one of two fair
    /// coins landing true (0.75). If the resulting density falls below the
    /// bound, all edges are discarded and the attempt repeats from scratch.
    pub fn fill<R: Rng>(&mut self, rng: &mut R) -> Result<()> {
        if self.num_products < 2 {
            return Err(GraphError::invalid_input(
                "cannot fill a graph with fewer than 2 products",
            ));
        }
        loop {
            for i in 0..self.num_products {
                for j in (i + 1)..self.num_products {
                    let related = rng.gen_bool(0.5) | rng.gen_bool(0.5);
                    self.bought_together[i][j] = related;
                    self.bought_together[j][i] = related;
                    if related {
                        let weight = if self.weighted {
                            round3(rng.gen::<f64>())
                        } else {
                            0.0
                        };
                        self.add_edge(i, j, weight)?;
                    }
                }
            }
            if self.dense_enough() {
                break;
            }
            debug!(
                "density below {MIN_DENSITY} with {} edges, regenerating",
                self.multiset.len()
            );
            self.clear_edges();
        }
        debug!("generated {} edges", self.multiset.len());
        Ok(())
    }

    /// Registers one edge between two live vertices in the arena, the
    /// global multiset and both incident sets.
    pub fn add_edge(&mut self, i: usize, j: usize, weight: f64) -> Result<()> {
        if !self.groups.contains_key(&i) || !self.groups.contains_key(&j) {
            return Err(GraphError::invalid_input(format!(
                "cannot add edge ({i}, {j}): both endpoints must be live vertices"
            )));
        }
        let handle = self.arena.len();
        self.arena.push(Edge::new(i, j, weight)?);
        self.multiset.push(handle);
        self.incident.entry(i).or_default().insert(handle);
        self.incident.entry(j).or_default().insert(handle);
        Ok(())
    }

    fn dense_enough(&self) -> bool {
        let n = self.num_products as f64;
        (self.multiset.len() as f64) * 2.0 / (n * (n - 1.0)) >= MIN_DENSITY
    }

    fn clear_edges(&mut self) {
        self.arena.clear();
        self.multiset.clear();
        for set in self.incident.values_mut() {
            set.clear();
        }
    }

    /// Runs one full trial of Karger's contraction algorithm, mutating the
    /// graph in place, and returns the number of edges left between the two
    /// surviving super-vertices.
    ///
    /// Graphs with fewer than 3 live vertices are already terminal: the
    /// current edge count is returned without contracting anything. A cut of
    /// 0 is a valid result and means the input was disconnected. Running out
    /// of edges while more than 2 vertices remain is a precondition
    /// violation and fails with [`GraphError::EmptyEdgeSet`].
    pub fn min_cut<R: Rng>(&mut self, rng: &mut R) -> Result<usize> {
        debug!(
            "starting contraction with {} live vertices and {} edges",
            self.groups.len(),
            self.multiset.len()
        );
        while self.groups.len() > 2 {
            let handle = if self.weighted {
                self.pick_weighted(rng)?
            } else {
                self.pick_uniform(rng)?
            };
            let (p1, p2) = self.arena[handle].endpoints();
            trace!("contracting edge {handle} ({p1} - {p2})");
            self.contract(handle, p1, p2)?;
        }
        debug!("contraction finished, cut size {}", self.multiset.len());
        Ok(self.multiset.len())
    }

    /// Uniform selection: an index drawn uniformly over the multiset.
    fn pick_uniform<R: Rng>(&self, rng: &mut R) -> Result<usize> {
        if self.multiset.is_empty() {
            return Err(GraphError::EmptyEdgeSet);
        }
        Ok(self.multiset[rng.gen_range(0..self.multiset.len())])
    }

    /// Weight-proportional selection: draw r in [0, W) and subtract weights
    /// in multiset order until the running value drops to 0 or below.
    fn pick_weighted<R: Rng>(&self, rng: &mut R) -> Result<usize> {
        let total: f64 = self
            .multiset
            .iter()
            .map(|&h| self.arena[h].weight())
            .sum();
        if self.multiset.is_empty() || total <= 0.0 {
            return Err(GraphError::EmptyEdgeSet);
        }
        let mut r = rng.gen::<f64>() * total;
        for &h in &self.multiset {
            r -= self.arena[h].weight();
            if r <= 0.0 {
                return Ok(h);
            }
        }
        // Float rounding can leave a sliver; the last edge absorbs it.
        Ok(self.multiset[self.multiset.len() - 1])
    }

    /// Contracts the selected edge: destroys it, merges `p2` (and its merge
    /// history) into `p1`, and redirects `p2`'s remaining edges to `p1`.
    /// Edges whose endpoints collapse onto `p1` are dropped here, so
    /// self-loops never survive; all other parallel groups keep their
    /// multiplicity because every parallel edge is its own arena slot.
    fn contract(&mut self, selected: usize, p1: usize, p2: usize) -> Result<()> {
        let mut dropped = vec![selected];
        if let Some(set) = self.incident.get_mut(&p1) {
            set.remove(&selected);
        }
        if let Some(set) = self.incident.get_mut(&p2) {
            set.remove(&selected);
        }

        let absorbed = self
            .groups
            .remove(&p2)
            .ok_or_else(|| GraphError::invalid_input(format!("vertex {p2} is not a live slot")))?;
        self.owner[p2] = p1;
        for &m in &absorbed {
            self.owner[m] = p1;
        }
        if let Some(group) = self.groups.get_mut(&p1) {
            group.push(p2);
            group.extend(absorbed);
        }

        let moved = self.incident.remove(&p2).unwrap_or_default();
        for h in moved {
            self.arena[h].replace_end(p2, p1)?;
            if self.arena[h].is_self_loop() {
                dropped.push(h);
                if let Some(set) = self.incident.get_mut(&p1) {
                    set.remove(&h);
                }
            } else {
                self.incident.entry(p1).or_default().insert(h);
            }
        }

        let dropped: HashSet<usize> = dropped.into_iter().collect();
        self.multiset.retain(|h| !dropped.contains(h));
        Ok(())
    }

    /// Writes the graph as one line per surviving vertex id, listing every
    /// incident edge's opposite endpoint id, with a `-<weight>` suffix (3
    /// decimal places) in weighted mode:
    ///
    /// ```text
    /// <vertex_id>:<other_id>[-<weight>](,<other_id>[-<weight>])*
    /// ```
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        debug!("saving graph to {}", path.as_ref().display());
        let mut out = BufWriter::new(File::create(path)?);
        for &id in self.groups.keys() {
            write!(out, "{id}:")?;
            if let Some(set) = self.incident.get(&id) {
                let mut sep = "";
                for &h in set {
                    let edge = &self.arena[h];
                    write!(out, "{sep}{}", edge.opposite_end(id)?)?;
                    if self.weighted {
                        write!(out, "-{:.3}", edge.weight())?;
                    }
                    sep = ",";
                }
            }
            writeln!(out)?;
        }
        out.flush()?;
        Ok(())
    }

    /// Reconstructs an independent graph from a file written by [`save`],
    /// copying vertex attributes by value from `template`. Each undirected
    /// edge appears in both endpoints' lines; only the `other > vertex`
    /// occurrence creates an edge, so every pair is recorded exactly once.
    ///
    /// [`save`]: Graph::save
    pub fn load<P: AsRef<Path>>(path: P, template: &Graph) -> Result<Graph> {
        debug!("loading graph copy from {}", path.as_ref().display());
        let mut graph = Graph::new(template.products.clone(), template.weighted);
        let reader = BufReader::new(File::open(path)?);
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            graph.apply_line(&line)?;
        }
        Ok(graph)
    }

    /// Replays one serialized adjacency line into this graph.
    fn apply_line(&mut self, line: &str) -> Result<()> {
        let (id_text, rest) = line
            .split_once(':')
            .ok_or_else(|| parse_error(line, "missing ':' separator"))?;
        let i: usize = id_text
            .trim()
            .parse()
            .map_err(|_| parse_error(line, format!("bad vertex id {id_text:?}")))?;
        if i >= self.num_products {
            return Err(parse_error(
                line,
                format!("vertex id {i} out of range for {} products", self.num_products),
            ));
        }
        self.bought_together[i][i] = true;
        if rest.is_empty() {
            return Ok(());
        }
        for token in rest.split(',') {
            let (j, weight) = self.parse_connection(line, i, token)?;
            if j >= self.num_products {
                return Err(parse_error(
                    line,
                    format!("vertex {i}: neighbor id {j} out of range"),
                ));
            }
            self.bought_together[i][j] = true;
            if j > i {
                self.add_edge(i, j, weight)?;
            }
        }
        Ok(())
    }

    /// Parses one `<other_id>[-<weight>]` token from vertex `i`'s line.
    fn parse_connection(&self, line: &str, i: usize, token: &str) -> Result<(usize, f64)> {
        if self.weighted {
            let (j_text, w_text) = token.split_once('-').ok_or_else(|| {
                parse_error(line, format!("vertex {i}: missing weight in token {token:?}"))
            })?;
            let j = j_text.trim().parse().map_err(|_| {
                parse_error(line, format!("vertex {i}: bad neighbor id {j_text:?}"))
            })?;
            let weight = w_text.trim().parse().map_err(|_| {
                parse_error(line, format!("vertex {i}: bad weight token {w_text:?}"))
            })?;
            Ok((j, weight))
        } else {
            let j = token.trim().parse().map_err(|_| {
                parse_error(line, format!("vertex {i}: bad neighbor id {token:?}"))
            })?;
            Ok((j, 0.0))
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.num_products
    }

    /// Number of live (un-merged) vertex slots.
    pub fn live_vertices(&self) -> usize {
        self.groups.len()
    }

    pub fn edge_count(&self) -> usize {
        self.multiset.len()
    }

    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    /// Sum of all live edge weights.
    pub fn total_weight(&self) -> f64 {
        self.multiset.iter().map(|&h| self.arena[h].weight()).sum()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// The live slot a given original vertex id currently belongs to.
    pub fn owner_of(&self, original: usize) -> Option<usize> {
        self.owner.get(original).copied()
    }

    /// Ids of the live vertex slots, in ascending order.
    pub fn live_ids(&self) -> impl Iterator<Item = usize> + '_ {
        self.groups.keys().copied()
    }

    /// Original ids merged into the given live slot, in merge order.
    pub fn merged_into(&self, id: usize) -> Option<&[usize]> {
        self.groups.get(&id).map(|g| g.as_slice())
    }

    /// The live edge multiset.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.multiset.iter().map(|&h| &self.arena[h])
    }

    /// Snapshot of the contracted graph: one line per live slot listing the
    /// ids merged into it and its neighbors.
    pub fn dump_graph(&self) -> String {
        let mut out = String::from("GRAPH\n=====\n\n");
        for (&id, merged) in &self.groups {
            let _ = write!(out, "Node({id}");
            for m in merged {
                let _ = write!(out, ",{m}");
            }
            out.push_str(") : [");
            if let Some(set) = self.incident.get(&id) {
                let mut sep = "";
                for &h in set {
                    if let Ok(other) = self.arena[h].opposite_end(id) {
                        let _ = write!(out, "{sep}{other}");
                        sep = ",";
                    }
                }
            }
            out.push_str("]\n");
        }
        out
    }

    /// Snapshot of the co-purchase adjacency matrix as 0/1 rows.
    pub fn dump_adjacency(&self) -> String {
        let mut out = String::from("BOUGHT TOGETHER TABLE\n=====================\n\n");
        for row in &self.bought_together {
            let mut sep = "";
            for &cell in row {
                let _ = write!(out, "{sep}{}", u8::from(cell));
                sep = "  ";
            }
            out.push('\n');
        }
        out
    }

    /// Snapshot of the product list.
    pub fn dump_products(&self) -> String {
        let mut out = String::from("PRODUCT LIST\n============\n\n");
        for (i, p) in self.products.iter().enumerate() {
            let _ = writeln!(out, "Product_{i}: {p}");
        }
        out
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

fn parse_error(line: &str, reason: impl Into<String>) -> GraphError {
    GraphError::Parse {
        line: line.to_string(),
        reason: reason.into(),
    }
}
