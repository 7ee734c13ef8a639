mod component;
mod config;
mod error;
mod graph;
mod prompt;
mod render;
mod run;
mod state;
mod traversal;
mod types;


pub use component::GraphVisualizer;
pub use config::VisualizerConfig;
