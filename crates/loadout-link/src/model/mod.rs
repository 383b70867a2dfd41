//! Data model types for share links.
//!
//! This module contains:
//! - Domain values (CPU, GPU, DNS, peripherals, optimizations, personas)
//! - ID registries mapping those values to wire integers
//! - Selections (encoder input) and resolved selections (decoder output)

pub mod registry;
pub mod selection;
pub mod value;

pub use registry::{IdRegistry, Registries};
pub use selection::{DecodeWarning, ResolvedSelection, Selection};
pub use value::{
    Cpu, DnsProvider, Field, Gpu, MonitorSoftware, OptimizationKey, PeripheralBrand, Persona,
    RegistryValue,
};
