//! Selections: the encoder's input and the decoder's output.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::value::{
    Cpu, DnsProvider, Field, Gpu, MonitorSoftware, OptimizationKey, PeripheralBrand, Persona,
};
use crate::safety::Tier;

/// A user's configuration choices at share time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Selection {
    pub cpu: Option<Cpu>,
    pub gpu: Option<Gpu>,
    pub dns_provider: Option<DnsProvider>,
    pub peripherals: Vec<PeripheralBrand>,
    pub monitor_software: Vec<MonitorSoftware>,
    pub optimizations: Vec<OptimizationKey>,
    /// Opaque catalog keys, e.g. `Steam.Steam`.
    pub packages: Vec<String>,
    pub persona: Option<Persona>,
}

/// A selection reconstructed from a share code, with diagnostics.
///
/// Produced only by a successful decode. `skipped` counts every entry that
/// was present on the wire but could not be restored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedSelection {
    pub selection: Selection,
    pub skipped: usize,
    pub warnings: Vec<DecodeWarning>,
}

impl ResolvedSelection {
    /// Returns true if every entry on the wire was restored.
    pub fn is_complete(&self) -> bool {
        self.skipped == 0 && self.warnings.is_empty()
    }
}

/// A non-terminal issue found while resolving a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeWarning {
    /// An integer that the registry does not know, typically a setting that
    /// was removed after the link was created.
    UnknownId { field: Field, id: u64 },
    /// An entry that is not of the expected JSON type.
    InvalidEntry { field: Field, raw: String },
    /// A field that should hold an array holds something else.
    NotAnArray { field: Field },
    /// An array longer than the limit; the excess was dropped.
    Truncated { field: Field, len: usize, max: usize },
    /// An optimization that may not travel in a shared link.
    Blocked {
        key: OptimizationKey,
        tier: Option<Tier>,
    },
}

impl fmt::Display for DecodeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeWarning::UnknownId { field, id } => {
                write!(f, "unknown {field} id {id} was skipped")
            }
            DecodeWarning::InvalidEntry { field, raw } => {
                write!(f, "invalid {field} entry {raw} was skipped")
            }
            DecodeWarning::NotAnArray { field } => {
                write!(f, "{field} list is malformed and was skipped")
            }
            DecodeWarning::Truncated { field, len, max } => {
                write!(f, "{field} list had {len} entries; only the first {max} were kept")
            }
            DecodeWarning::Blocked { key, tier: Some(tier) } => {
                write!(f, "{tier} optimization {key} cannot be shared and was removed")
            }
            DecodeWarning::Blocked { key, tier: None } => {
                write!(f, "unclassified optimization {key} cannot be shared and was removed")
            }
        }
    }
}
