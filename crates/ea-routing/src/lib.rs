//! `ea-routing` — shortest-path engines over the session road graph.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`dijkstra`] | Single-source shortest-time maps (with/without parents)  |
//! | [`astar`]    | `PathRouter` trait, unidirectional and bidirectional A*  |
//! | [`sssp`]     | One-Dijkstra-per-centre coordinator and aggregation      |
//! | [`error`]    | `RoutingError`, `RoutingResult<T>`                       |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                     |
//! |------------|------------------------------------------------------------|
//! | `parallel` | Runs the per-centre SSSP phase on Rayon's thread pool.     |
//!
//! All engines read the graph immutably; nothing here mutates shared state.

pub mod astar;
pub mod dijkstra;
pub mod error;
pub mod sssp;


pub use astar::{route_candidates, AStarRouter, BidirectionalAStar, Path, PathRouter};
pub use dijkstra::{shortest_times, shortest_times_with_parents};
pub use error::{RoutingError, RoutingResult};
pub use sssp::{compute_centre_tables, CentreSsspResult, SsspRun};
