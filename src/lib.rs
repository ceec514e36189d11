//! Deterministic Quidditch match and tournament simulator.
//!
//! The [sim] module runs single matches from a seeded [sim::Rng], [roster]
//! holds the team data model and persistence, and [tournament] drives group
//! stages and knockout brackets on top of the match engine. The [cli] module
//! backs the `quidditch` binary.

pub mod cli;
pub mod roster;
pub mod sim;
pub mod tournament;
