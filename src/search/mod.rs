pub mod astar;
pub mod dijkstra;
pub mod path;
pub mod queue;
