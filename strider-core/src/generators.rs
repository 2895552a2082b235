//! Structural graph generators.
//!
//! Every generator produces an undirected, unweighted graph whose vertices are
//! named `"0"`, `"1"`, ... in creation order. Randomised generators draw from
//! a caller-supplied [`Rng`] so tests can fix the seed.

use std::{collections::BTreeSet, fmt, str::FromStr};

use rand::Rng;

use crate::{
    Result,
    error::StriderError,
    graph::{Graph, GraphBuilder},
};

/// Complete graph `K_n`.
///
/// # Errors
/// Never fails for unweighted graphs; the signature matches the other
/// generators.
///
/// # Examples
/// ```
/// let graph = strider_core::generators::complete(5)?;
/// assert_eq!(graph.vertex_count(), 5);
/// assert_eq!(graph.edge_count(), 10);
/// # Ok::<(), strider_core::StriderError>(())
/// ```
pub fn complete(vertices: usize) -> Result<Graph> {
    let mut builder = numbered_builder(vertices);
    for a in 0..vertices {
        for b in (a + 1)..vertices {
            builder.add_edge(&a.to_string(), &b.to_string())?;
        }
    }
    Ok(builder.build())
}

/// Full `arity`-ary tree of the given depth, numbered level by level.
///
/// Depth zero yields the root alone.
///
/// # Errors
/// Returns [`StriderError::InvalidParameter`] when `arity` is zero.
pub fn tree(depth: usize, arity: usize) -> Result<Graph> {
    if arity == 0 {
        return Err(StriderError::invalid_parameter("arity", "must be at least 1"));
    }
    let mut builder = GraphBuilder::new(false, false);
    builder.add_vertex("0");
    let mut level = vec![0_usize];
    let mut counter = 1_usize;
    for _ in 0..depth {
        let mut next_level = Vec::with_capacity(level.len() * arity);
        for &parent in &level {
            for _ in 0..arity {
                builder.add_edge(&parent.to_string(), &counter.to_string())?;
                next_level.push(counter);
                counter += 1;
            }
        }
        level = next_level;
    }
    Ok(builder.build())
}

/// Uniform random simple graph with `edges` distinct edges.
///
/// The edge count is capped at `vertices * (vertices - 1) / 2`.
///
/// # Errors
/// Never fails for unweighted graphs; the signature matches the other
/// generators.
pub fn random<R: Rng + ?Sized>(vertices: usize, edges: usize, rng: &mut R) -> Result<Graph> {
    let mut builder = numbered_builder(vertices);
    if vertices > 1 {
        let wanted = edges.min(vertices * (vertices - 1) / 2);
        let mut chosen = BTreeSet::new();
        while chosen.len() < wanted {
            let a = rng.gen_range(0..vertices);
            let b = rng.gen_range(0..vertices);
            if a != b {
                chosen.insert((a.min(b), a.max(b)));
            }
        }
        for (a, b) in chosen {
            builder.add_edge(&a.to_string(), &b.to_string())?;
        }
    }
    Ok(builder.build())
}

/// Preferential-attachment graph.
///
/// Each new vertex links to `min(connect, existing)` distinct earlier
/// vertices, each picked with probability proportional to its degree. While
/// only one earlier vertex exists it is picked directly.
///
/// # Errors
/// Never fails for unweighted graphs; the signature matches the other
/// generators.
pub fn scale_free<R: Rng + ?Sized>(vertices: usize, connect: usize, rng: &mut R) -> Result<Graph> {
    let mut builder = numbered_builder(vertices);
    let mut degrees: Vec<usize> = Vec::with_capacity(vertices);
    for newcomer in 0..vertices {
        let wanted = connect.min(degrees.len());
        let mut targets: Vec<usize> = Vec::with_capacity(wanted);
        while targets.len() < wanted {
            let candidate = preferential_pick(&degrees, rng);
            if !targets.contains(&candidate) {
                targets.push(candidate);
            }
        }
        degrees.push(0);
        for target in targets {
            builder.add_edge(&newcomer.to_string(), &target.to_string())?;
            degrees[target] += 1;
            degrees[newcomer] += 1;
        }
    }
    Ok(builder.build())
}

/// Picks an index with probability proportional to its degree.
///
/// Falls back to a uniform pick while every degree is zero.
fn preferential_pick<R: Rng + ?Sized>(degrees: &[usize], rng: &mut R) -> usize {
    let total: usize = degrees.iter().sum();
    if total == 0 {
        return rng.gen_range(0..degrees.len());
    }
    let draw = rng.gen_range(0..total);
    let mut upper = 0;
    for (index, &degree) in degrees.iter().enumerate() {
        upper += degree;
        if draw < upper {
            return index;
        }
    }
    degrees.len() - 1
}

fn numbered_builder(vertices: usize) -> GraphBuilder {
    let mut builder = GraphBuilder::new(false, false);
    for index in 0..vertices {
        builder.add_vertex(&index.to_string());
    }
    builder
}

/// Compact generator descriptor.
///
/// | Form | Graph |
/// |---|---|
/// | `K<n>` | complete graph on `n` vertices |
/// | `T<arity>-<depth>` | full tree |
/// | `R<vertices>-<edges>` | random graph |
/// | `SF<connect>-<vertices>` | scale-free graph |
///
/// # Examples
/// ```
/// use strider_core::GeneratorSpec;
///
/// let spec: GeneratorSpec = "SF2-100".parse()?;
/// assert_eq!(spec, GeneratorSpec::ScaleFree { connect: 2, vertices: 100 });
/// assert_eq!(spec.to_string(), "SF2-100");
/// # Ok::<(), strider_core::StriderError>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GeneratorSpec {
    /// Complete graph.
    Complete {
        /// Number of vertices.
        vertices: usize,
    },
    /// Full tree.
    Tree {
        /// Children per inner vertex.
        arity: usize,
        /// Number of levels below the root.
        depth: usize,
    },
    /// Random graph.
    Random {
        /// Number of vertices.
        vertices: usize,
        /// Requested number of edges.
        edges: usize,
    },
    /// Scale-free graph.
    ScaleFree {
        /// Edges added per new vertex.
        connect: usize,
        /// Number of vertices.
        vertices: usize,
    },
}

impl GeneratorSpec {
    /// Builds the described graph.
    ///
    /// # Errors
    /// Propagates generator parameter errors.
    pub fn generate<R: Rng + ?Sized>(self, rng: &mut R) -> Result<Graph> {
        match self {
            Self::Complete { vertices } => complete(vertices),
            Self::Tree { arity, depth } => tree(depth, arity),
            Self::Random { vertices, edges } => random(vertices, edges, rng),
            Self::ScaleFree { connect, vertices } => scale_free(vertices, connect, rng),
        }
    }
}

impl fmt::Display for GeneratorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Complete { vertices } => write!(f, "K{vertices}"),
            Self::Tree { arity, depth } => write!(f, "T{arity}-{depth}"),
            Self::Random { vertices, edges } => write!(f, "R{vertices}-{edges}"),
            Self::ScaleFree { connect, vertices } => write!(f, "SF{connect}-{vertices}"),
        }
    }
}

impl FromStr for GeneratorSpec {
    type Err = StriderError;

    fn from_str(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let malformed = || {
            StriderError::invalid_parameter(
                "generator",
                format!("`{raw}` is not one of K<n>, T<arity>-<depth>, R<n>-<m>, SF<c>-<n>"),
            )
        };
        let pair = |body: &str| -> Result<(usize, usize)> {
            let (left, right) = body.split_once('-').ok_or_else(malformed)?;
            let left = left.parse().map_err(|_| malformed())?;
            let right = right.parse().map_err(|_| malformed())?;
            Ok((left, right))
        };

        if let Some(body) = raw.strip_prefix("SF") {
            let (connect, vertices) = pair(body)?;
            Ok(Self::ScaleFree { connect, vertices })
        } else if let Some(body) = raw.strip_prefix('K') {
            let vertices = body.parse().map_err(|_| malformed())?;
            Ok(Self::Complete { vertices })
        } else if let Some(body) = raw.strip_prefix('T') {
            let (arity, depth) = pair(body)?;
            if arity == 0 {
                return Err(StriderError::invalid_parameter("arity", "must be at least 1"));
            }
            Ok(Self::Tree { arity, depth })
        } else if let Some(body) = raw.strip_prefix('R') {
            let (vertices, edges) = pair(body)?;
            Ok(Self::Random { vertices, edges })
        } else {
            Err(malformed())
        }
    }
}
