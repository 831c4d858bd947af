//! Data model for the walkable road network
//!
//! Contains the coordinate type, node identity and the graph itself.

pub mod components;
pub mod graph;
pub mod key;
pub mod point;

pub use components::GraphStats;
pub use graph::RoadGraph;
pub use key::NodeKey;
pub use point::{GeoPoint, LatLngAccessor};
