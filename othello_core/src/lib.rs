//! Rules engine and turn controller for two-player Reversi/Othello.
//!
//! The crate is split into two strictly layered parts:
//!
//! * the pure board engine ([`board`], [`moves`], [`piece`], [`position`]) —
//!   value-typed, copy-on-write move application with no I/O; and
//! * the stateful [`controller`], which owns a [`game::GameState`], drives the
//!   turn/pass state machine, keeps a single-level undo snapshot, and
//!   broadcasts value snapshots to registered subscribers.

pub mod board;
pub mod controller;
pub mod game;
pub mod moves;
pub mod piece;
pub mod position;
pub mod settings;
