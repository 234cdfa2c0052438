pub mod cli;
pub mod config;
pub mod ctx;
pub mod dataset;
pub mod io;
pub mod math;
pub mod pipeline;
pub mod postprocess;
pub mod schema;
pub mod views;
