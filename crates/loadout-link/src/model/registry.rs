//! Bidirectional value <-> integer registries.
//!
//! Each enumerable selection field owns one [`IdRegistry`]. Integers are
//! append-only: once minted for a value they are never reassigned, and a
//! retired value's integer is never reused. [`Registries::check_extends`]
//! verifies that rule between two releases.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::error::RegistryError;
use crate::model::value::{
    Cpu, DnsProvider, Field, Gpu, MonitorSoftware, OptimizationKey, PeripheralBrand, Persona,
    RegistryValue,
};

/// A bijection between the known values of one field and small integers.
#[derive(Debug, Clone)]
pub struct IdRegistry<V> {
    ids: FxHashMap<V, u32>,
    values: FxHashMap<u32, V>,
}

impl<V: RegistryValue> IdRegistry<V> {
    /// Builds a registry, rejecting duplicate values and duplicate ids.
    pub fn new(entries: &[(V, u32)]) -> Result<Self, RegistryError> {
        let mut registry = Self::with_capacity(entries.len());
        for &(value, id) in entries {
            if registry.ids.contains_key(&value) {
                return Err(RegistryError::DuplicateValue {
                    field: V::FIELD,
                    value: value.name(),
                });
            }
            if let Some(first) = registry.values.get(&id) {
                return Err(RegistryError::DuplicateId {
                    field: V::FIELD,
                    id,
                    first: first.name(),
                    second: value.name(),
                });
            }
            registry.ids.insert(value, id);
            registry.values.insert(id, value);
        }
        Ok(registry)
    }

    /// Builds a registry from a table whose ids are known to be distinct.
    ///
    /// Used for the built-in tables; a duplicate keeps the last entry.
    pub(crate) fn from_table(entries: &[(V, u32)]) -> Self {
        let mut registry = Self::with_capacity(entries.len());
        for &(value, id) in entries {
            registry.ids.insert(value, id);
            registry.values.insert(id, value);
        }
        registry
    }

    fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            values: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Looks up the integer for a value.
    #[inline]
    pub fn to_id(&self, value: V) -> Option<u32> {
        self.ids.get(&value).copied()
    }

    /// Looks up the value for an integer.
    #[inline]
    pub fn to_value(&self, id: u32) -> Option<V> {
        self.values.get(&id).copied()
    }

    /// Number of registered values.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if no values are registered.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Entries sorted by id.
    pub fn entries(&self) -> Vec<(V, u32)> {
        let mut entries: Vec<_> = self.ids.iter().map(|(v, id)| (*v, *id)).collect();
        entries.sort_by_key(|&(_, id)| id);
        entries
    }

    /// Checks that `self` is an append-only extension of `older`.
    ///
    /// Values may disappear, but a surviving value must keep its id and an
    /// id may not come back bound to a different value.
    pub fn check_extends(&self, older: &IdRegistry<V>) -> Result<(), RegistryError> {
        for (value, old) in older.entries() {
            if let Some(new) = self.to_id(value) {
                if new != old {
                    return Err(RegistryError::Reassigned {
                        field: V::FIELD,
                        value: value.name(),
                        old,
                        new,
                    });
                }
            }
            if let Some(current) = self.to_value(old) {
                if current != value {
                    return Err(RegistryError::Reused {
                        field: V::FIELD,
                        id: old,
                        old: value.name(),
                        new: current.name(),
                    });
                }
            }
        }
        Ok(())
    }

    fn from_snapshot(table: &BTreeMap<String, u32>) -> Result<Self, RegistryError> {
        let entries = table
            .iter()
            .map(|(name, id)| -> Result<(V, u32), RegistryError> {
                Ok((V::parse_name(name)?, *id))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(&entries)
    }
}

/// One registry per enumerable selection field.
///
/// Package keys have no registry; they travel as raw strings.
#[derive(Debug, Clone)]
pub struct Registries {
    pub cpu: IdRegistry<Cpu>,
    pub gpu: IdRegistry<Gpu>,
    pub dns_provider: IdRegistry<DnsProvider>,
    pub peripherals: IdRegistry<PeripheralBrand>,
    pub monitor_software: IdRegistry<MonitorSoftware>,
    pub optimizations: IdRegistry<OptimizationKey>,
    pub persona: IdRegistry<Persona>,
}

/// JSON shape of a registry snapshot: field name -> value name -> id.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RegistrySnapshot {
    cpu: BTreeMap<String, u32>,
    gpu: BTreeMap<String, u32>,
    dns_provider: BTreeMap<String, u32>,
    peripherals: BTreeMap<String, u32>,
    monitor_software: BTreeMap<String, u32>,
    optimizations: BTreeMap<String, u32>,
    persona: BTreeMap<String, u32>,
}

impl Registries {
    /// Loads registries from a JSON snapshot.
    ///
    /// ```text
    /// { "cpu": { "intel": 1, "amd": 2 }, "gpu": { "nvidia": 1 }, ... }
    /// ```
    ///
    /// Missing fields produce empty registries.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let snapshot: RegistrySnapshot =
            serde_json::from_str(json).map_err(|e| RegistryError::Snapshot(e.to_string()))?;
        Ok(Self {
            cpu: IdRegistry::from_snapshot(&snapshot.cpu)?,
            gpu: IdRegistry::from_snapshot(&snapshot.gpu)?,
            dns_provider: IdRegistry::from_snapshot(&snapshot.dns_provider)?,
            peripherals: IdRegistry::from_snapshot(&snapshot.peripherals)?,
            monitor_software: IdRegistry::from_snapshot(&snapshot.monitor_software)?,
            optimizations: IdRegistry::from_snapshot(&snapshot.optimizations)?,
            persona: IdRegistry::from_snapshot(&snapshot.persona)?,
        })
    }

    /// Looks up the integer for a value given by field and string name.
    ///
    /// Returns `None` for unknown names, unregistered values and the
    /// package field.
    pub fn to_id(&self, field: Field, raw: &str) -> Option<u32> {
        fn lookup<V: RegistryValue>(registry: &IdRegistry<V>, raw: &str) -> Option<u32> {
            V::parse_name(raw).ok().and_then(|v| registry.to_id(v))
        }
        match field {
            Field::Cpu => lookup(&self.cpu, raw),
            Field::Gpu => lookup(&self.gpu, raw),
            Field::DnsProvider => lookup(&self.dns_provider, raw),
            Field::Peripherals => lookup(&self.peripherals, raw),
            Field::MonitorSoftware => lookup(&self.monitor_software, raw),
            Field::Optimizations => lookup(&self.optimizations, raw),
            Field::Persona => lookup(&self.persona, raw),
            Field::Packages => None,
        }
    }

    /// Looks up the string name for an integer in the given field.
    pub fn to_value(&self, field: Field, id: u32) -> Option<&'static str> {
        match field {
            Field::Cpu => self.cpu.to_value(id).map(|v| v.as_str()),
            Field::Gpu => self.gpu.to_value(id).map(|v| v.as_str()),
            Field::DnsProvider => self.dns_provider.to_value(id).map(|v| v.as_str()),
            Field::Peripherals => self.peripherals.to_value(id).map(|v| v.as_str()),
            Field::MonitorSoftware => self.monitor_software.to_value(id).map(|v| v.as_str()),
            Field::Optimizations => self.optimizations.to_value(id).map(|v| v.as_str()),
            Field::Persona => self.persona.to_value(id).map(|v| v.as_str()),
            Field::Packages => None,
        }
    }

    /// Checks that every table is an append-only extension of `older`.
    pub fn check_extends(&self, older: &Registries) -> Result<(), RegistryError> {
        self.cpu.check_extends(&older.cpu)?;
        self.gpu.check_extends(&older.gpu)?;
        self.dns_provider.check_extends(&older.dns_provider)?;
        self.peripherals.check_extends(&older.peripherals)?;
        self.monitor_software.check_extends(&older.monitor_software)?;
        self.optimizations.check_extends(&older.optimizations)?;
        self.persona.check_extends(&older.persona)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_v1() -> Registries {
        Registries::from_json(
            r#"{
                "cpu": { "intel": 1, "amd": 2, "amd_x3d": 3 },
                "gpu": { "nvidia": 1, "amd": 2 },
                "dns_provider": { "cloudflare": 1, "quad9": 2 }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_lookup_both_directions() {
        let registry = IdRegistry::new(&[(Cpu::Intel, 1), (Cpu::Amd, 2)]).unwrap();
        assert_eq!(registry.to_id(Cpu::Amd), Some(2));
        assert_eq!(registry.to_value(1), Some(Cpu::Intel));
        assert_eq!(registry.to_id(Cpu::AmdX3d), None);
        assert_eq!(registry.to_value(9), None);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_rejects_duplicates() {
        let dup_id = IdRegistry::new(&[(Gpu::Nvidia, 1), (Gpu::Amd, 1)]);
        assert!(matches!(
            dup_id,
            Err(RegistryError::DuplicateId { id: 1, first: "nvidia", second: "amd", .. })
        ));

        let dup_value = IdRegistry::new(&[(Gpu::Nvidia, 1), (Gpu::Nvidia, 2)]);
        assert!(matches!(dup_value, Err(RegistryError::DuplicateValue { value: "nvidia", .. })));
    }

    #[test]
    fn test_field_dynamic_lookup() {
        let registries = snapshot_v1();
        assert_eq!(registries.to_id(Field::Cpu, "amd_x3d"), Some(3));
        assert_eq!(registries.to_id(Field::Cpu, "sparc"), None);
        assert_eq!(registries.to_id(Field::Packages, "Steam.Steam"), None);
        assert_eq!(registries.to_value(Field::DnsProvider, 2), Some("quad9"));
        assert_eq!(registries.to_value(Field::Persona, 1), None);
    }

    #[test]
    fn test_snapshot_rejects_unknown_names() {
        let err = Registries::from_json(r#"{ "cpu": { "sparc": 1 } }"#).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidValue(_)));

        let err = Registries::from_json(r#"{ "gpus": {} }"#).unwrap_err();
        assert!(matches!(err, RegistryError::Snapshot(_)));
    }

    #[test]
    fn test_additive_growth_is_accepted() {
        let older = snapshot_v1();
        let newer = Registries::from_json(
            r#"{
                "cpu": { "intel": 1, "amd": 2, "amd_x3d": 3 },
                "gpu": { "nvidia": 1, "amd": 2, "intel": 3 },
                "dns_provider": { "cloudflare": 1, "quad9": 2, "adguard": 3 },
                "persona": { "gamer": 1 }
            }"#,
        )
        .unwrap();
        assert_eq!(newer.check_extends(&older), Ok(()));
    }

    #[test]
    fn test_removal_keeps_id_retired() {
        let older = IdRegistry::new(&[(Gpu::Nvidia, 1), (Gpu::Amd, 2)]).unwrap();

        let removed = IdRegistry::new(&[(Gpu::Nvidia, 1)]).unwrap();
        assert_eq!(removed.check_extends(&older), Ok(()));

        let reused = IdRegistry::new(&[(Gpu::Nvidia, 1), (Gpu::Intel, 2)]).unwrap();
        assert!(matches!(
            reused.check_extends(&older),
            Err(RegistryError::Reused { id: 2, old: "amd", new: "intel", .. })
        ));
    }

    #[test]
    fn test_reassignment_is_rejected() {
        let older = IdRegistry::new(&[(Cpu::Intel, 1), (Cpu::Amd, 2)]).unwrap();
        let newer = IdRegistry::new(&[(Cpu::Intel, 1), (Cpu::Amd, 4)]).unwrap();
        assert!(matches!(
            newer.check_extends(&older),
            Err(RegistryError::Reassigned { value: "amd", old: 2, new: 4, .. })
        ));
    }
}
