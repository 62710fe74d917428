//! Point-to-point routing with a travel-time A* and a bidirectional variant.
//!
//! # Heuristic
//!
//! `h(n, goal) = haversine(n, goal) / MAX_SPEED_MPS`.  Edge weights on the
//! OSM path are travel times at per-road speeds that never exceed the
//! motorway default, so `h` is an admissible lower bound on remaining time
//! and A* returns the optimal path.  On the synthetic grid the weights are
//! metres, which only makes `h` more conservative.
//!
//! # Routers
//!
//! [`PathRouter`] is the seam: callers pick [`AStarRouter`] (the default) or
//! [`BidirectionalAStar`] at compile time.  The bidirectional variant
//! alternates forward and backward expansions, tracks the cheapest node
//! settled from both sides (the meeting point), and stitches
//! `start → meeting → goal`.  Both enforce the same total expansion cap.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use ea_core::geo::MAX_SPEED_MPS;
use ea_core::{GeoPoint, NodeId};
use ea_spatial::RoadGraph;

use crate::dijkstra::QueueEntry;
use crate::error::{RoutingError, RoutingResult};

/// Hard cap on heap pops per query, shared by both router variants.
pub const EXPANSION_LIMIT: usize = 100_000;

/// A reconstructed route: node sequence from start to goal, and its cost in
/// graph weight units.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    pub nodes: Vec<NodeId>,
    pub cost: f64,
}

/// Point-to-point routing seam.  Implementations must return the same cost
/// for the same `(start, goal)` pair as a plain Dijkstra would.
pub trait PathRouter {
    fn find_path(&self, graph: &RoadGraph, start: NodeId, goal: NodeId) -> RoutingResult<Path>;
}

/// Lower bound in weight units on the remaining cost from `node` to `target`.
fn heuristic(graph: &RoadGraph, node: NodeId, target: Option<GeoPoint>) -> f64 {
    match (graph.position(node), target) {
        (Some(a), Some(b)) => a.distance_m(b) / MAX_SPEED_MPS,
        _ => 0.0,
    }
}

// ── Unidirectional A* ─────────────────────────────────────────────────────────

/// Standard A* with `f = g + h`, a closed set, and back-pointer
/// reconstruction.
pub struct AStarRouter;

impl PathRouter for AStarRouter {
    fn find_path(&self, graph: &RoadGraph, start: NodeId, goal: NodeId) -> RoutingResult<Path> {
        if start == goal {
            return Ok(Path { nodes: vec![start], cost: 0.0 });
        }

        let goal_pos = graph.position(goal);
        let mut g_score: HashMap<NodeId, f64> = HashMap::new();
        let mut came_from: HashMap<NodeId, NodeId> = HashMap::new();
        let mut closed: HashSet<NodeId> = HashSet::new();
        let mut open: BinaryHeap<Reverse<QueueEntry>> = BinaryHeap::new();

        g_score.insert(start, 0.0);
        open.push(Reverse(QueueEntry {
            cost: heuristic(graph, start, goal_pos),
            node: start,
        }));

        let mut expansions = 0usize;
        while let Some(Reverse(QueueEntry { node, .. })) = open.pop() {
            if !closed.insert(node) {
                continue;
            }
            expansions += 1;
            if expansions > EXPANSION_LIMIT {
                return Err(RoutingError::ExpansionLimit { from: start, to: goal });
            }

            if node == goal {
                return Ok(reconstruct(&came_from, start, goal, g_score[&goal]));
            }

            let g_here = g_score[&node];
            for &(next, weight) in graph.neighbours(node) {
                if closed.contains(&next) {
                    continue;
                }
                let tentative = g_here + weight;
                let improved = g_score
                    .get(&next)
                    .map_or(true, |&current| tentative < current);
                if improved {
                    g_score.insert(next, tentative);
                    came_from.insert(next, node);
                    open.push(Reverse(QueueEntry {
                        cost: tentative + heuristic(graph, next, goal_pos),
                        node: next,
                    }));
                }
            }
        }

        Err(RoutingError::NoPath { from: start, to: goal })
    }
}

fn reconstruct(came_from: &HashMap<NodeId, NodeId>, start: NodeId, goal: NodeId, cost: f64) -> Path {
    let mut nodes = vec![goal];
    let mut node = goal;
    while node != start {
        node = came_from[&node];
        nodes.push(node);
    }
    nodes.reverse();
    Path { nodes, cost }
}

// ── Bidirectional A* ──────────────────────────────────────────────────────────

/// Bidirectional A*: forward search from the start, backward search over
/// reversed edges from the goal, alternating one expansion per side.
///
/// The search keeps the cheapest meeting point found so far and stops once a
/// frontier's best `f` can no longer beat it, so the stitched path costs the
/// same as the unidirectional result.
pub struct BidirectionalAStar;

struct Frontier {
    g: HashMap<NodeId, f64>,
    came_from: HashMap<NodeId, NodeId>,
    closed: HashSet<NodeId>,
    open: BinaryHeap<Reverse<QueueEntry>>,
    target: Option<GeoPoint>,
}

impl Frontier {
    fn new(graph: &RoadGraph, origin: NodeId, target: NodeId) -> Self {
        let target_pos = graph.position(target);
        let mut frontier = Frontier {
            g: HashMap::new(),
            came_from: HashMap::new(),
            closed: HashSet::new(),
            open: BinaryHeap::new(),
            target: target_pos,
        };
        frontier.g.insert(origin, 0.0);
        frontier.open.push(Reverse(QueueEntry {
            cost: heuristic(graph, origin, target_pos),
            node: origin,
        }));
        frontier
    }

    fn min_f(&self) -> f64 {
        self.open
            .peek()
            .map(|Reverse(entry)| entry.cost)
            .unwrap_or(f64::INFINITY)
    }
}

impl PathRouter for BidirectionalAStar {
    fn find_path(&self, graph: &RoadGraph, start: NodeId, goal: NodeId) -> RoutingResult<Path> {
        if start == goal {
            return Ok(Path { nodes: vec![start], cost: 0.0 });
        }

        // Backward search walks original edges against their direction.
        let mut reverse: HashMap<NodeId, Vec<(NodeId, f64)>> = HashMap::new();
        for (node, _) in graph.nodes() {
            for &(next, weight) in graph.neighbours(node) {
                reverse.entry(next).or_default().push((node, weight));
            }
        }

        let mut forward = Frontier::new(graph, start, goal);
        let mut backward = Frontier::new(graph, goal, start);
        let mut meeting: Option<(NodeId, f64)> = None;
        let mut expansions = 0usize;
        let mut expand_forward = true;

        loop {
            // A settled meeting point bounds every path still in either open
            // set once the frontier's best f reaches it.
            if let Some((_, best)) = meeting {
                if forward.min_f() >= best || backward.min_f() >= best {
                    break;
                }
            }
            if forward.open.is_empty() && backward.open.is_empty() {
                break;
            }

            let is_forward = expand_forward;
            expand_forward = !expand_forward;
            let (this, other): (&mut Frontier, &Frontier) = if is_forward {
                (&mut forward, &backward)
            } else {
                (&mut backward, &forward)
            };

            let Reverse(QueueEntry { node, .. }) = match this.open.pop() {
                Some(entry) => entry,
                None => continue,
            };
            if !this.closed.insert(node) {
                continue;
            }
            expansions += 1;
            if expansions > EXPANSION_LIMIT {
                return Err(RoutingError::ExpansionLimit { from: start, to: goal });
            }

            // Meeting-point check against the opposite search.
            if let Some(&other_g) = other.g.get(&node) {
                let total = this.g[&node] + other_g;
                if meeting.map_or(true, |(_, best)| total < best) {
                    meeting = Some((node, total));
                }
            }

            let g_here = this.g[&node];
            let edges: &[(NodeId, f64)] = if is_forward {
                graph.neighbours(node)
            } else {
                reverse.get(&node).map(Vec::as_slice).unwrap_or(&[])
            };
            for &(next, weight) in edges {
                if this.closed.contains(&next) {
                    continue;
                }
                let tentative = g_here + weight;
                let improved = this
                    .g
                    .get(&next)
                    .map_or(true, |&current| tentative < current);
                if improved {
                    this.g.insert(next, tentative);
                    this.came_from.insert(next, node);
                    let h = heuristic(graph, next, this.target);
                    this.open.push(Reverse(QueueEntry { cost: tentative + h, node: next }));
                }
            }
        }

        match meeting {
            Some((node, cost)) => Ok(stitch(&forward, &backward, start, goal, node, cost)),
            None => Err(RoutingError::NoPath { from: start, to: goal }),
        }
    }
}

/// Join `start → meeting` (forward back-pointers) with `meeting → goal`
/// (backward back-pointers point toward the goal).
fn stitch(
    forward: &Frontier,
    backward: &Frontier,
    start: NodeId,
    goal: NodeId,
    meeting: NodeId,
    cost: f64,
) -> Path {
    let mut nodes = vec![meeting];
    let mut node = meeting;
    while node != start {
        node = forward.came_from[&node];
        nodes.push(node);
    }
    nodes.reverse();

    let mut node = meeting;
    while node != goal {
        node = backward.came_from[&node];
        nodes.push(node);
    }

    Path { nodes, cost }
}

// ── K×K candidate retry ───────────────────────────────────────────────────────

/// Try every `(start, goal)` candidate combination in order — start-outer,
/// goal-inner — and return the first path found.
///
/// Snapping can land either endpoint in a fragment that survived
/// main-component filtering; nearby candidates usually rescue the query.
pub fn route_candidates<R: PathRouter>(
    router: &R,
    graph: &RoadGraph,
    starts: &[NodeId],
    goals: &[NodeId],
) -> Option<Path> {
    for &start in starts {
        for &goal in goals {
            if let Ok(path) = router.find_path(graph, start, goal) {
                return Some(path);
            }
        }
    }
    log::warn!(
        target: "ea.route",
        "no path after trying {}x{} snap candidates",
        starts.len(),
        goals.len()
    );
    None
}
