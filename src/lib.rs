pub mod adapters;
pub mod config;
pub mod demo;
pub mod lifecycle;
pub mod logging;
pub mod protocol;
pub mod server;
pub mod session;
pub mod widget;
