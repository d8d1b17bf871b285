//! Policies for the phases of the search
//!
//! This module contains the pluggable parts of a search round:
//! - Selection policies: how promising a child looks to the descent
//! - Simulation policies: how a leaf state is played out to the end
//! - Backpropagation policies: how a finished game is credited to each node on the path

pub mod backpropagation;
pub mod selection;
pub mod simulation;

pub use backpropagation::{BackpropagationPolicy, OwnerCreditPolicy};
pub use selection::{SelectionPolicy, UCB1Policy};
pub use simulation::{RandomPolicy, SimulationPolicy};
