//! Built-in registry and tier tables shipped with the application.
//!
//! Ids are append-only. When a value is added, give it the next unused id in
//! its table; when one is retired, delete its row and never hand its id to
//! another value.

use lazy_static::lazy_static;

use crate::model::{
    Cpu, DnsProvider, Gpu, IdRegistry, MonitorSoftware, OptimizationKey, PeripheralBrand, Persona,
    Registries,
};
use crate::safety::{Tier, TierMap};

const CPU: &[(Cpu, u32)] = &[(Cpu::Intel, 1), (Cpu::Amd, 2), (Cpu::AmdX3d, 3)];

const GPU: &[(Gpu, u32)] = &[(Gpu::Nvidia, 1), (Gpu::Amd, 2), (Gpu::Intel, 3)];

const DNS_PROVIDER: &[(DnsProvider, u32)] = &[
    (DnsProvider::Auto, 1),
    (DnsProvider::Cloudflare, 2),
    (DnsProvider::Google, 3),
    (DnsProvider::Quad9, 4),
    (DnsProvider::OpenDns, 5),
    (DnsProvider::AdGuard, 6),
];

const PERIPHERALS: &[(PeripheralBrand, u32)] = &[
    (PeripheralBrand::Logitech, 1),
    (PeripheralBrand::Razer, 2),
    (PeripheralBrand::Corsair, 3),
    (PeripheralBrand::SteelSeries, 4),
    (PeripheralBrand::Asus, 5),
    (PeripheralBrand::HyperX, 6),
    (PeripheralBrand::Wooting, 7),
    (PeripheralBrand::Glorious, 8),
];

const MONITOR_SOFTWARE: &[(MonitorSoftware, u32)] = &[
    (MonitorSoftware::Dell, 1),
    (MonitorSoftware::Lg, 2),
    (MonitorSoftware::Samsung, 3),
    (MonitorSoftware::Asus, 4),
    (MonitorSoftware::BenQ, 5),
    (MonitorSoftware::Msi, 6),
    (MonitorSoftware::Aoc, 7),
];

/// Optimization ids and tiers share one table so they cannot drift apart.
const OPTIMIZATIONS: &[(OptimizationKey, u32, Tier)] = &[
    (OptimizationKey::Pagefile, 1, Tier::Safe),
    (OptimizationKey::Fastboot, 2, Tier::Safe),
    (OptimizationKey::GameMode, 3, Tier::Safe),
    (OptimizationKey::HardwareGpuScheduling, 4, Tier::Safe),
    (OptimizationKey::PowerPlan, 5, Tier::Safe),
    (OptimizationKey::VisualEffects, 6, Tier::Safe),
    (OptimizationKey::MouseAcceleration, 7, Tier::Safe),
    (OptimizationKey::Telemetry, 8, Tier::Caution),
    (OptimizationKey::BackgroundApps, 9, Tier::Caution),
    (OptimizationKey::Cortana, 10, Tier::Caution),
    (OptimizationKey::NetworkThrottling, 11, Tier::Caution),
    (OptimizationKey::TimerResolution, 12, Tier::Caution),
    (OptimizationKey::Hibernation, 13, Tier::Caution),
    (OptimizationKey::WindowsUpdate, 14, Tier::Risky),
    (OptimizationKey::Hpet, 15, Tier::Risky),
    (OptimizationKey::CoreIsolation, 16, Tier::Risky),
    (OptimizationKey::SmartScreen, 17, Tier::Risky),
    (OptimizationKey::SpectreMeltdown, 18, Tier::Ludicrous),
    (OptimizationKey::Defender, 19, Tier::Ludicrous),
    (OptimizationKey::Uac, 20, Tier::Ludicrous),
    (OptimizationKey::Firewall, 21, Tier::Ludicrous),
];

const PERSONA: &[(Persona, u32)] = &[
    (Persona::Gamer, 1),
    (Persona::Streamer, 2),
    (Persona::Developer, 3),
    (Persona::Creator, 4),
    (Persona::Minimal, 5),
    (Persona::Privacy, 6),
];

fn build_registries() -> Registries {
    let optimizations: Vec<_> = OPTIMIZATIONS.iter().map(|&(key, id, _)| (key, id)).collect();
    Registries {
        cpu: IdRegistry::from_table(CPU),
        gpu: IdRegistry::from_table(GPU),
        dns_provider: IdRegistry::from_table(DNS_PROVIDER),
        peripherals: IdRegistry::from_table(PERIPHERALS),
        monitor_software: IdRegistry::from_table(MONITOR_SOFTWARE),
        optimizations: IdRegistry::from_table(&optimizations),
        persona: IdRegistry::from_table(PERSONA),
    }
}

fn build_tiers() -> TierMap {
    let tiers: Vec<_> = OPTIMIZATIONS.iter().map(|&(key, _, tier)| (key, tier)).collect();
    TierMap::new(&tiers)
}

lazy_static! {
    /// The registry shipped with this release.
    pub static ref REGISTRIES: Registries = build_registries();

    /// The tier map shipped with this release.
    pub static ref TIERS: TierMap = build_tiers();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RegistryValue;

    /// Every built-in table must pass the validating constructor and cover
    /// every known value.
    fn check_table<V: RegistryValue>(table: &[(V, u32)]) {
        let registry = IdRegistry::new(table).unwrap();
        for value in V::all() {
            assert!(registry.to_id(*value).is_some(), "{value:?} has no id");
        }
        assert!(table.iter().all(|&(_, id)| id > 0));
    }

    #[test]
    fn test_tables_are_bijections() {
        check_table(CPU);
        check_table(GPU);
        check_table(DNS_PROVIDER);
        check_table(PERIPHERALS);
        check_table(MONITOR_SOFTWARE);
        check_table(PERSONA);
        let optimizations: Vec<_> = OPTIMIZATIONS.iter().map(|&(key, id, _)| (key, id)).collect();
        check_table(&optimizations);
    }

    #[test]
    fn test_every_optimization_has_a_tier() {
        for key in OptimizationKey::ALL {
            assert!(TIERS.tier(*key).is_some(), "{key} has no tier");
        }
        assert!(!TIERS.is_shareable(OptimizationKey::Defender));
        assert!(TIERS.is_shareable(OptimizationKey::Pagefile));
    }

    #[test]
    fn test_statics_match_tables() {
        assert_eq!(REGISTRIES.cpu.to_id(Cpu::AmdX3d), Some(3));
        assert_eq!(REGISTRIES.dns_provider.to_value(4), Some(DnsProvider::Quad9));
        assert_eq!(REGISTRIES.optimizations.len(), OPTIMIZATIONS.len());
    }
}
