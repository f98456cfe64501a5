pub mod analysis;
pub mod backend;
pub mod candidate;
pub mod config;
pub mod consts;
pub mod controller;
pub mod display;
pub mod error;
pub mod notify;
pub mod preview;
pub mod progress;
pub mod session;
