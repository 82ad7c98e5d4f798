pub mod algos;
pub mod allocation;
pub mod checks;
pub mod config;
pub mod display;
pub mod loaders;
pub mod logging;
pub mod model;
pub mod stats;
