pub mod audit;
pub mod volume;

pub use audit::{TopologyAudit, TopologyError, audit_solid};
pub use volume::{solid_volume, surface_area};

use serde::Serialize;
use tracing::{info, instrument};

use crate::topology::brep::*;

/// Combined topology and measure check of one solid.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub topology: TopologyAudit,
    pub volume: f64,
}

impl ValidationReport {
    /// Closed, consistently oriented and enclosing positive volume.
    pub fn is_valid(&self) -> bool {
        self.topology.is_valid() && self.volume > crate::default_tolerance().coincidence
    }
}

#[instrument(skip(store))]
pub fn validate_solid(store: &EntityStore, solid_id: SolidId) -> ValidationReport {
    let report = ValidationReport {
        topology: audit_solid(store, solid_id),
        volume: solid_volume(store, solid_id),
    };
    info!(
        valid = report.is_valid(),
        volume = report.volume,
        error_count = report.topology.errors.len(),
        "solid validation complete"
    );
    report
}
