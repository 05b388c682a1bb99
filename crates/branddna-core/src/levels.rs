//! Ordinal category scales used by the chart mappers.
//!
//! Brand documents use Spanish codes (`bajo`, `nula`, `masivo`, ...); English
//! aliases are accepted as well. Unrecognised codes read as `Unknown`.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceSegment {
    Unknown,
    Entry,
    Mass,
    Mid,
    Premium,
    Luxury,
    UltraLuxury,
}

impl PriceSegment {
    /// Segments in ascending order, without `Unknown`.
    pub const LADDER: [PriceSegment; 6] = [
        PriceSegment::Entry,
        PriceSegment::Mass,
        PriceSegment::Mid,
        PriceSegment::Premium,
        PriceSegment::Luxury,
        PriceSegment::UltraLuxury,
    ];

    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "entry" => Some(Self::Entry),
            "masivo" | "mass" => Some(Self::Mass),
            "medio" | "mid" | "medium" => Some(Self::Mid),
            "premium" => Some(Self::Premium),
            "lujo" | "luxury" => Some(Self::Luxury),
            "ultra_lujo" | "ultra_luxury" => Some(Self::UltraLuxury),
            "desconocido" | "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }

    pub fn from_code(code: Option<&str>) -> Self {
        code.and_then(Self::parse).unwrap_or(Self::Unknown)
    }

    /// Canonical data code.
    pub fn code(self) -> &'static str {
        match self {
            Self::Unknown => "desconocido",
            Self::Entry => "entry",
            Self::Mass => "masivo",
            Self::Mid => "medio",
            Self::Premium => "premium",
            Self::Luxury => "lujo",
            Self::UltraLuxury => "ultra_lujo",
        }
    }

    /// 1..=6 along the ladder, 0 when unknown.
    pub fn rank(self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::Entry => 1,
            Self::Mass => 2,
            Self::Mid => 3,
            Self::Premium => 4,
            Self::Luxury => 5,
            Self::UltraLuxury => 6,
        }
    }

    /// Radar scale in (0, 1], 0 when unknown.
    pub fn scale(self) -> f64 {
        match self {
            Self::Unknown => 0.0,
            Self::Entry => 0.1,
            Self::Mass => 0.25,
            Self::Mid => 0.5,
            Self::Premium => 0.75,
            Self::Luxury => 0.9,
            Self::UltraLuxury => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CreativeRisk {
    Unknown,
    Low,
    Medium,
    High,
}

impl CreativeRisk {
    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "bajo" | "low" => Some(Self::Low),
            "medio" | "med" | "medium" => Some(Self::Medium),
            "alto" | "high" => Some(Self::High),
            "desconocido" | "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }

    pub fn from_code(code: Option<&str>) -> Self {
        code.and_then(Self::parse).unwrap_or(Self::Unknown)
    }

    pub fn scale(self) -> f64 {
        match self {
            Self::Unknown => 0.0,
            Self::Low => 0.25,
            Self::Medium => 0.5,
            Self::High => 0.85,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PromoDependency {
    Unknown,
    None,
    Low,
    Medium,
    High,
}

impl PromoDependency {
    /// Known levels in ascending order.
    pub const LADDER: [PromoDependency; 4] = [
        PromoDependency::None,
        PromoDependency::Low,
        PromoDependency::Medium,
        PromoDependency::High,
    ];

    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "nula" | "none" => Some(Self::None),
            "baja" | "low" => Some(Self::Low),
            "media" | "med" | "medium" => Some(Self::Medium),
            "alta" | "high" => Some(Self::High),
            "desconocida" | "desconocido" | "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }

    pub fn from_code(code: Option<&str>) -> Self {
        code.and_then(Self::parse).unwrap_or(Self::Unknown)
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Unknown => "desconocida",
            Self::None => "nula",
            Self::Low => "baja",
            Self::Medium => "media",
            Self::High => "alta",
        }
    }

    /// Unknown sits at the midpoint.
    pub fn scale(self) -> f64 {
        match self {
            Self::None => 0.0,
            Self::Low => 0.25,
            Self::Medium | Self::Unknown => 0.5,
            Self::High => 0.75,
        }
    }
}
