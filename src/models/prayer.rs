#![allow(dead_code)]
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrayerType {
    Fajr,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl PrayerType {
    /// The five daily prayers in chronological order.
    pub fn all() -> [PrayerType; 5] {
        [
            PrayerType::Fajr,
            PrayerType::Dhuhr,
            PrayerType::Asr,
            PrayerType::Maghrib,
            PrayerType::Isha,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PrayerType::Fajr => "fajr",
            PrayerType::Dhuhr => "dhuhr",
            PrayerType::Asr => "asr",
            PrayerType::Maghrib => "maghrib",
            PrayerType::Isha => "isha",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PrayerType::Fajr => "Fajr",
            PrayerType::Dhuhr => "Dhuhr",
            PrayerType::Asr => "Asr",
            PrayerType::Maghrib => "Maghrib",
            PrayerType::Isha => "Isha",
        }
    }
}

impl std::fmt::Display for PrayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for PrayerType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fajr" => Ok(PrayerType::Fajr),
            "dhuhr" | "zuhr" | "dhuhur" => Ok(PrayerType::Dhuhr),
            "asr" => Ok(PrayerType::Asr),
            "maghrib" => Ok(PrayerType::Maghrib),
            "isha" => Ok(PrayerType::Isha),
            _ => Err(anyhow::anyhow!("Unknown prayer type: {}", s)),
        }
    }
}

/// How the congregational time is derived from the stored fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IqamaType {
    #[default]
    Fixed,
    Offset,
}

impl IqamaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IqamaType::Fixed => "fixed",
            IqamaType::Offset => "offset",
        }
    }
}

impl FromStr for IqamaType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fixed" => Ok(IqamaType::Fixed),
            "offset" => Ok(IqamaType::Offset),
            _ => Err(anyhow::anyhow!("Unknown iqama type: {}", s)),
        }
    }
}

/// Stored settings for one prayer. Only one of `iqama_fixed` / `iqama_offset`
/// is authoritative, selected by `iqama_type`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrayerEntry {
    pub adhan: Option<String>,
    #[serde(default)]
    pub iqama_type: IqamaType,
    pub iqama_fixed: Option<String>,
    pub iqama_offset: Option<i32>,
}

impl PrayerEntry {
    pub fn fixed(adhan: &str, iqama: &str) -> Self {
        Self {
            adhan: Some(adhan.to_string()),
            iqama_type: IqamaType::Fixed,
            iqama_fixed: Some(iqama.to_string()),
            iqama_offset: None,
        }
    }

    pub fn offset(adhan: &str, minutes: i32) -> Self {
        Self {
            adhan: Some(adhan.to_string()),
            iqama_type: IqamaType::Offset,
            iqama_fixed: None,
            iqama_offset: Some(minutes),
        }
    }
}

/// One day's (or the `current` singleton's) prayer settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrayerRecord {
    #[serde(default)]
    pub fajr: PrayerEntry,
    #[serde(default)]
    pub dhuhr: PrayerEntry,
    #[serde(default)]
    pub asr: PrayerEntry,
    #[serde(default)]
    pub maghrib: PrayerEntry,
    #[serde(default)]
    pub isha: PrayerEntry,
    /// ISO date of the last automatic Adhan refresh.
    pub last_updated: Option<String>,
}

impl PrayerRecord {
    pub fn entry(&self, prayer: PrayerType) -> &PrayerEntry {
        match prayer {
            PrayerType::Fajr => &self.fajr,
            PrayerType::Dhuhr => &self.dhuhr,
            PrayerType::Asr => &self.asr,
            PrayerType::Maghrib => &self.maghrib,
            PrayerType::Isha => &self.isha,
        }
    }

    pub fn entry_mut(&mut self, prayer: PrayerType) -> &mut PrayerEntry {
        match prayer {
            PrayerType::Fajr => &mut self.fajr,
            PrayerType::Dhuhr => &mut self.dhuhr,
            PrayerType::Asr => &mut self.asr,
            PrayerType::Maghrib => &mut self.maghrib,
            PrayerType::Isha => &mut self.isha,
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = (PrayerType, &PrayerEntry)> {
        PrayerType::all().into_iter().map(move |p| (p, self.entry(p)))
    }
}
