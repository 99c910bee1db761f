//! Spindle Core
//!
//! Foundational primitives for the Spindle carousel widgets:
//!
//! - **Input Events**: a platform-agnostic pointer event model
//! - **State Machines**: enum statecharts for gesture/interaction states
//!
//! The widget layer consumes these through an input adapter, so the carousel
//! math has zero dependency on any specific windowing or touch technology.

pub mod events;
pub mod fsm;

pub use events::{Event, EventData, EventType};
pub use fsm::StateTransitions;
