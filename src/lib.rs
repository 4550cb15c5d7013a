//! Randomized minimum-cut estimation for co-purchase graphs.
//!
//! Vertices are products, edges are "frequently bought together" relations,
//! optionally weighted by a random affinity score. One call to
//! [`Graph::min_cut`] runs a single trial of Karger's contraction algorithm:
//! it repeatedly picks a random edge (uniformly, or proportionally to weight
//! in weighted mode), merges its endpoints, and stops when two super-vertices
//! remain; the edges left between them are one cut-size sample.
//!
//! A single trial is a Monte-Carlo estimate, not a guaranteed minimum.
//! Callers save the base graph once with [`Graph::save`], then run many
//! independent trials over fresh [`Graph::load`] copies and keep the minimum
//! observed cut.
//!
//! ```no_run
//! use karger_mincut::Graph;
//!
//! let mut rng = rand::thread_rng();
//! let base = Graph::generate(20, false, &mut rng)?;
//! base.save("graph.txt")?;
//!
//! let mut best = usize::MAX;
//! for _ in 0..100 {
//!     let mut trial = Graph::load("graph.txt", &base)?;
//!     best = best.min(trial.min_cut(&mut rng)?);
//! }
//! println!("estimated min cut: {best}");
//! # Ok::<(), karger_mincut::GraphError>(())
//! ```

pub mod edge;
pub mod error;
pub mod graph;
pub mod product;

pub use edge::Edge;
pub use error::{GraphError, Result};
pub use graph::Graph;
pub use product::Product;
