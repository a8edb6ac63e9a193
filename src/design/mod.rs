//! Design generation: the catalog of PQC accelerator templates and the
//! random generator that fabricates designs from it.

pub mod catalog;

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::config::MetricRanges;
use crate::types::{Design, MinerError};
use catalog::DesignTemplate;

/// Produces random designs from a template catalog.
///
/// Generic over the RNG so sessions can be seeded for reproducibility.
pub struct DesignGenerator<R: Rng> {
    catalog: Vec<DesignTemplate>,
    ranges: MetricRanges,
    rng: R,
}

impl<R: Rng> DesignGenerator<R> {
    pub fn new(ranges: MetricRanges, rng: R) -> Self {
        Self::with_catalog(catalog::standard(), ranges, rng)
    }

    pub fn with_catalog(catalog: Vec<DesignTemplate>, ranges: MetricRanges, rng: R) -> Self {
        Self { catalog, ranges, rng }
    }

    pub fn catalog(&self) -> &[DesignTemplate] {
        &self.catalog
    }

    /// Fabricate a design stamped with the current time.
    pub fn generate(&mut self) -> Result<Design, MinerError> {
        self.generate_at(Utc::now())
    }

    /// Fabricate a design stamped with `created_at`.
    pub fn generate_at(&mut self, created_at: DateTime<Utc>) -> Result<Design, MinerError> {
        self.ranges.validate()?;
        let template = self
            .catalog
            .choose(&mut self.rng)
            .cloned()
            .ok_or(MinerError::EmptyCatalog)?;

        let (area_lo, area_hi) = self.ranges.area_mm2;
        let (power_lo, power_hi) = self.ranges.power_mw;
        let (tp_lo, tp_hi) = self.ranges.throughput_ops;

        let design = Design {
            id: Design::id_for(created_at),
            name: template.name,
            family: template.family,
            security: template.security,
            area_mm2: self.rng.gen_range(area_lo..=area_hi),
            power_mw: self.rng.gen_range(power_lo..=power_hi),
            throughput_ops: self.rng.gen_range(tp_lo..=tp_hi),
            created_at,
        };

        debug!(
            id = %design.id,
            name = %design.name,
            security = design.security.bits(),
            area = design.area_mm2,
            power = design.power_mw,
            throughput = design.throughput_ops,
            "Design generated"
        );

        Ok(design)
    }
}
