pub mod camera;
pub mod cli;
pub mod config;
pub mod consts;
pub mod error;
pub mod gui;
pub mod logging;
pub mod model;
pub mod planetarium;
pub mod scene;
pub mod texture;
