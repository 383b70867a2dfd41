//! Selection encoding.
//!
//! A share code is `{version}.{payload}` where the payload is the compressed
//! JSON wire record.

use tracing::debug;

use crate::codec::ShareCodec;
use crate::codec::compress::compress;
use crate::codec::wire::WireRecord;
use crate::error::EncodeError;
use crate::limits::{VERSION_SEPARATOR, WIRE_VERSION};
use crate::model::{IdRegistry, RegistryValue, Selection};

/// Result of encoding a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOutput {
    /// The share code, `{version}.{payload}`.
    pub fragment: String,
    /// Optimizations dropped by the safety filter.
    pub blocked: usize,
    /// Array entries dropped because a list exceeded the length limit.
    pub truncated: usize,
    /// Values with no id in the codec's registry.
    pub unregistered: usize,
}

#[derive(Debug, Default)]
struct Drops {
    truncated: usize,
    unregistered: usize,
}

impl Drops {
    fn scalar<V: RegistryValue>(&mut self, registry: &IdRegistry<V>, value: Option<V>) -> Option<u32> {
        let value = value?;
        let id = registry.to_id(value);
        if id.is_none() {
            self.unregistered += 1;
        }
        id
    }

    fn list<V: RegistryValue>(&mut self, registry: &IdRegistry<V>, values: &[V], max: usize) -> Vec<u32> {
        let mut ids: Vec<u32> = values.iter().filter_map(|v| registry.to_id(*v)).collect();
        self.unregistered += values.len() - ids.len();
        if ids.len() > max {
            self.truncated += ids.len() - max;
            ids.truncate(max);
        }
        ids
    }
}

impl ShareCodec<'_> {
    /// Encodes a selection into a share code.
    ///
    /// Empty lists and absent scalars are omitted from the record; present
    /// scalars are always written. Unshareable optimizations are dropped and
    /// counted, package keys are written verbatim, and every list is cut to
    /// the configured maximum length.
    pub fn encode(&self, selection: &Selection) -> Result<EncodeOutput, EncodeError> {
        let registries = self.registries;
        let max = self.limits.max_array_len;
        let mut drops = Drops::default();

        let (shareable, blocked) = self
            .tiers
            .retain_shareable(selection.optimizations.iter().copied());

        let packages = &selection.packages[..selection.packages.len().min(max)];
        drops.truncated += selection.packages.len() - packages.len();

        let record = WireRecord {
            v: WIRE_VERSION,
            c: drops.scalar(&registries.cpu, selection.cpu),
            g: drops.scalar(&registries.gpu, selection.gpu),
            d: drops.scalar(&registries.dns_provider, selection.dns_provider),
            p: drops.list(&registries.peripherals, &selection.peripherals, max),
            m: drops.list(&registries.monitor_software, &selection.monitor_software, max),
            o: drops.list(&registries.optimizations, &shareable, max),
            k: packages,
            r: drops.scalar(&registries.persona, selection.persona),
        };

        let json =
            serde_json::to_vec(&record).map_err(|e| EncodeError::SerializationFailed(e.to_string()))?;
        let payload = compress(&json, self.limits.compression_level)?;
        let fragment = format!("{WIRE_VERSION}{VERSION_SEPARATOR}{payload}");

        debug!(
            len = fragment.len(),
            blocked = blocked.len(),
            truncated = drops.truncated,
            unregistered = drops.unregistered,
            "encoded selection"
        );

        Ok(EncodeOutput {
            fragment,
            blocked: blocked.len(),
            truncated: drops.truncated,
            unregistered: drops.unregistered,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::compress::decompress;
    use crate::limits::{CodecLimits, MAX_DECOMPRESSED_BYTES};
    use crate::model::{Cpu, DnsProvider, Gpu, OptimizationKey, PeripheralBrand, Persona, Registries};
    use crate::safety::{Tier, TierMap};

    fn record_json(fragment: &str) -> String {
        let (version, payload) = fragment.split_once('.').unwrap();
        assert_eq!(version, "1");
        String::from_utf8(decompress(payload, MAX_DECOMPRESSED_BYTES).unwrap()).unwrap()
    }

    #[test]
    fn test_empty_selection() {
        let output = ShareCodec::builtin().encode(&Selection::default()).unwrap();
        assert_eq!(record_json(&output.fragment), r#"{"v":1}"#);
        assert_eq!(output.blocked, 0);
    }

    #[test]
    fn test_scalars_written_collections_omitted() {
        let selection = Selection {
            cpu: Some(Cpu::Intel),
            gpu: Some(Gpu::Amd),
            dns_provider: Some(DnsProvider::Auto),
            persona: Some(Persona::Gamer),
            ..Selection::default()
        };
        let output = ShareCodec::builtin().encode(&selection).unwrap();
        assert_eq!(record_json(&output.fragment), r#"{"v":1,"c":1,"g":2,"d":1,"r":1}"#);
    }

    #[test]
    fn test_ludicrous_optimizations_blocked() {
        let selection = Selection {
            optimizations: vec![
                OptimizationKey::Pagefile,
                OptimizationKey::Defender,
                OptimizationKey::Hpet,
                OptimizationKey::Firewall,
            ],
            ..Selection::default()
        };
        let output = ShareCodec::builtin().encode(&selection).unwrap();
        assert_eq!(output.blocked, 2);
        assert_eq!(record_json(&output.fragment), r#"{"v":1,"o":[1,15]}"#);
    }

    #[test]
    fn test_packages_are_verbatim_and_truncated() {
        let packages: Vec<String> = (0..150).map(|i| format!("Vendor.App{i}")).collect();
        let selection = Selection {
            packages,
            ..Selection::default()
        };
        let output = ShareCodec::builtin().encode(&selection).unwrap();
        assert_eq!(output.truncated, 50);

        let json: serde_json::Value = serde_json::from_str(&record_json(&output.fragment)).unwrap();
        let keys = json["k"].as_array().unwrap();
        assert_eq!(keys.len(), 100);
        assert_eq!(keys[0], "Vendor.App0");
        assert_eq!(keys[99], "Vendor.App99");
    }

    #[test]
    fn test_peripheral_list_truncated() {
        let selection = Selection {
            peripherals: vec![PeripheralBrand::Logitech; 150],
            ..Selection::default()
        };
        let output = ShareCodec::builtin().encode(&selection).unwrap();
        assert_eq!(output.truncated, 50);
        assert_eq!(output.unregistered, 0);

        let json: serde_json::Value = serde_json::from_str(&record_json(&output.fragment)).unwrap();
        assert_eq!(json["p"].as_array().unwrap().len(), 100);
    }

    #[test]
    fn test_unregistered_values_are_omitted() {
        let registries = Registries::from_json(
            r#"{ "cpu": { "intel": 1 }, "peripherals": { "logitech": 1 } }"#,
        )
        .unwrap();
        let tiers = TierMap::new(&[]);
        let codec = ShareCodec::new(&registries, &tiers, CodecLimits::default());

        let selection = Selection {
            cpu: Some(Cpu::Amd),
            peripherals: vec![PeripheralBrand::Logitech, PeripheralBrand::Razer],
            ..Selection::default()
        };
        let output = codec.encode(&selection).unwrap();
        assert_eq!(output.unregistered, 2);
        assert_eq!(record_json(&output.fragment), r#"{"v":1,"p":[1]}"#);
    }

    #[test]
    fn test_unclassified_optimization_blocked() {
        let tiers = TierMap::new(&[(OptimizationKey::Pagefile, Tier::Safe)]);
        let codec = ShareCodec::new(&crate::builtin::REGISTRIES, &tiers, CodecLimits::default());
        let selection = Selection {
            optimizations: vec![OptimizationKey::Pagefile, OptimizationKey::Fastboot],
            ..Selection::default()
        };
        let output = codec.encode(&selection).unwrap();
        assert_eq!(output.blocked, 1);
        assert_eq!(record_json(&output.fragment), r#"{"v":1,"o":[1]}"#);
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let selection = Selection {
            cpu: Some(Cpu::AmdX3d),
            optimizations: vec![OptimizationKey::GameMode, OptimizationKey::Pagefile],
            packages: vec!["Valve.Steam".to_string()],
            ..Selection::default()
        };
        let codec = ShareCodec::builtin();
        assert_eq!(codec.encode(&selection).unwrap(), codec.encode(&selection).unwrap());
    }
}
