//! Events emitted by the simulation for the rendering collaborator.

use serde::{Deserialize, Serialize};

use crate::types::Position;

/// Transient visual effects. Each is reported in exactly one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VisualEffect {
    /// Short particle burst at a point (hits, kills, wall impacts).
    ImpactBurst { position: Position },
}
