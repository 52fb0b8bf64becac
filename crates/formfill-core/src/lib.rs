pub mod config;
pub mod logging;

pub mod background;
pub mod catalog;
pub mod filler;
pub mod message;
pub mod page;
pub mod profile;
pub mod resolver;
pub mod scheduler;
pub mod session;
pub mod snapshot;
pub mod store;
pub mod view;
