//! Domain types for webhook relaying

pub mod event;
pub mod mapping;
pub mod transition;
