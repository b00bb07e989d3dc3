//! Classification results and the record tags derived from them.

use serde::{Deserialize, Serialize};

/// Systems and sub-regions containing a point, each sorted and distinct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub systems: Vec<String>,
    pub regions: Vec<String>,
}

impl Classification {
    /// No system matched
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty() && self.regions.is_empty()
    }

    /// Record tags: the first system and first region, title-cased.
    pub fn tags(&self) -> EcoTags {
        EcoTags {
            ecosystem: self.systems.first().map(|s| title_case(s)),
            ecoregion: self.regions.first().map(|s| title_case(s)),
        }
    }
}

/// Ecosystem/ecoregion tags attached to an observation record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcoTags {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ecosystem: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ecoregion: Option<String>,
}

/// Geographic point (lat/lon)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// A point with its classification, as reported by the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct ClassifiedPoint {
    pub point: GeoPoint,
    #[serde(flatten)]
    pub classification: Classification,
    pub tags: EcoTags,
}

impl ClassifiedPoint {
    pub fn new(lon: f64, lat: f64, classification: Classification) -> Self {
        let tags = classification.tags();
        Self {
            point: GeoPoint { lat, lon },
            classification,
            tags,
        }
    }
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest.
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_word = false;
    for c in name.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}
