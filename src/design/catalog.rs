//! The nine PQC accelerator templates the miner draws from.

use serde::{Deserialize, Serialize};

use crate::types::{DesignFamily, SecurityLevel};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignTemplate {
    pub name: String,
    pub family: DesignFamily,
    pub security: SecurityLevel,
}

impl DesignTemplate {
    pub fn new(name: &str, family: DesignFamily, security: SecurityLevel) -> Self {
        Self {
            name: name.to_string(),
            family,
            security,
        }
    }
}

/// Kyber and Dilithium (lattice) plus SPHINCS+ (hash), one per security level.
pub fn standard() -> Vec<DesignTemplate> {
    use DesignFamily::{Hash, Lattice};
    use SecurityLevel::{Bits128, Bits192, Bits256};

    vec![
        DesignTemplate::new("Kyber-512 accelerator", Lattice, Bits128),
        DesignTemplate::new("Kyber-768 accelerator", Lattice, Bits192),
        DesignTemplate::new("Kyber-1024 accelerator", Lattice, Bits256),
        DesignTemplate::new("Dilithium-2 coprocessor", Lattice, Bits128),
        DesignTemplate::new("Dilithium-3 coprocessor", Lattice, Bits192),
        DesignTemplate::new("Dilithium-5 coprocessor", Lattice, Bits256),
        DesignTemplate::new("SPHINCS+-128 hash engine", Hash, Bits128),
        DesignTemplate::new("SPHINCS+-192 hash engine", Hash, Bits192),
        DesignTemplate::new("SPHINCS+-256 hash engine", Hash, Bits256),
    ]
}
