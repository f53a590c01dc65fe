//! Domain event contract shared by the sharetab aggregates.

pub mod event;

pub use event::Event;
