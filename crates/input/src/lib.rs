//! Input: device key state mapped onto a small set of game actions.
//!
//! # Invariants
//! - State is sampled, not queued. Host key events only flip entries in a
//!   held-state map; the simulation reads one `FrameInput` snapshot per frame.
//!   A press and release that both land between two frames is never seen.
//! - Everything here is confined to the frame-loop thread; no locking.

pub mod action;
pub mod state;

pub use action::{Action, KeyBindings};
pub use state::{FrameInput, InputState, RisingEdge};
