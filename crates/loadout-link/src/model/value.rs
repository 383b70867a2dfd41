//! Domain values carried by a share link.
//!
//! Every enumerable field is a closed enum with exactly one validating
//! constructor, `parse`, which fails closed with [`InvalidValue`] on any
//! string it does not recognise. The string names are the application's
//! stable identifiers and double as the serde representation.

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::InvalidValue;

/// A field of a selection, used to label registries, warnings and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Cpu,
    Gpu,
    DnsProvider,
    Peripherals,
    MonitorSoftware,
    Optimizations,
    Packages,
    Persona,
}

impl Field {
    /// All fields in wire order.
    pub const ALL: &'static [Field] = &[
        Field::Cpu,
        Field::Gpu,
        Field::DnsProvider,
        Field::Peripherals,
        Field::MonitorSoftware,
        Field::Optimizations,
        Field::Packages,
        Field::Persona,
    ];

    /// Short key used for this field in the wire record.
    pub fn wire_key(self) -> &'static str {
        match self {
            Field::Cpu => "c",
            Field::Gpu => "g",
            Field::DnsProvider => "d",
            Field::Peripherals => "p",
            Field::MonitorSoftware => "m",
            Field::Optimizations => "o",
            Field::Packages => "k",
            Field::Persona => "r",
        }
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Field::Cpu => "cpu",
            Field::Gpu => "gpu",
            Field::DnsProvider => "dns provider",
            Field::Peripherals => "peripheral",
            Field::MonitorSoftware => "monitor software",
            Field::Optimizations => "optimization",
            Field::Packages => "package",
            Field::Persona => "persona",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value that can be stored in an [`IdRegistry`](crate::model::IdRegistry).
pub trait RegistryValue: Copy + Eq + Hash + Ord + fmt::Debug + 'static {
    /// The selection field this value type belongs to.
    const FIELD: Field;

    /// Every value currently known to the application.
    fn all() -> &'static [Self];

    /// Stable string name.
    fn name(self) -> &'static str;

    /// Parses a stable string name.
    fn parse_name(raw: &str) -> Result<Self, InvalidValue>;
}

macro_rules! registry_enum {
    (
        $(#[$meta:meta])*
        $name:ident => $field:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every known value, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Returns the stable string name.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }

            /// Parses a stable string name, failing closed on anything unknown.
            pub fn parse(raw: &str) -> Result<Self, InvalidValue> {
                match raw {
                    $($text => Ok($name::$variant),)+
                    _ => Err(InvalidValue {
                        field: Field::$field,
                        raw: raw.to_string(),
                    }),
                }
            }
        }

        impl RegistryValue for $name {
            const FIELD: Field = Field::$field;

            fn all() -> &'static [Self] {
                $name::ALL
            }

            fn name(self) -> &'static str {
                self.as_str()
            }

            fn parse_name(raw: &str) -> Result<Self, InvalidValue> {
                $name::parse(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = InvalidValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $name::parse(s)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                $name::parse(&raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

registry_enum! {
    /// Processor family.
    Cpu => Cpu {
        Intel = "intel",
        Amd = "amd",
        /// AMD parts with stacked L3 cache.
        AmdX3d = "amd_x3d",
    }
}

registry_enum! {
    /// Graphics vendor.
    Gpu => Gpu {
        Nvidia = "nvidia",
        Amd = "amd",
        Intel = "intel",
    }
}

registry_enum! {
    /// DNS resolver applied by the generated script.
    DnsProvider => DnsProvider {
        Auto = "auto",
        Cloudflare = "cloudflare",
        Google = "google",
        Quad9 = "quad9",
        OpenDns = "opendns",
        AdGuard = "adguard",
    }
}

registry_enum! {
    /// Peripheral vendor whose companion software is installed.
    PeripheralBrand => Peripherals {
        Logitech = "logitech",
        Razer = "razer",
        Corsair = "corsair",
        SteelSeries = "steelseries",
        Asus = "asus",
        HyperX = "hyperx",
        Wooting = "wooting",
        Glorious = "glorious",
    }
}

registry_enum! {
    /// Monitor vendor whose control software is installed.
    MonitorSoftware => MonitorSoftware {
        Dell = "dell",
        Lg = "lg",
        Samsung = "samsung",
        Asus = "asus",
        BenQ = "benq",
        Msi = "msi",
        Aoc = "aoc",
    }
}

registry_enum! {
    /// A system tweak the generated script can apply.
    OptimizationKey => Optimizations {
        Pagefile = "pagefile",
        Fastboot = "fastboot",
        GameMode = "game_mode",
        HardwareGpuScheduling = "hags",
        PowerPlan = "power_plan",
        VisualEffects = "visual_effects",
        MouseAcceleration = "mouse_accel",
        Telemetry = "telemetry",
        BackgroundApps = "background_apps",
        Cortana = "cortana",
        NetworkThrottling = "network_throttling",
        TimerResolution = "timer_resolution",
        Hibernation = "hibernation",
        WindowsUpdate = "windows_update",
        Hpet = "hpet",
        CoreIsolation = "core_isolation",
        SmartScreen = "smartscreen",
        SpectreMeltdown = "spectre_meltdown",
        Defender = "defender",
        Uac = "uac",
        Firewall = "firewall",
    }
}

registry_enum! {
    /// A named bundle of recommended choices.
    Persona => Persona {
        Gamer = "gamer",
        Streamer = "streamer",
        Developer = "developer",
        Creator = "creator",
        Minimal = "minimal",
        Privacy = "privacy",
    }
}
