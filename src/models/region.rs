//! Region geometry types held by the catalog.

use geo::{Coord, LineString};

/// One boundary of a region, in (longitude, latitude) degrees.
///
/// A ring does not have to repeat its first vertex. Containment only looks
/// at the explicit consecutive vertex pairs, see [`crate::pip::ring_contains`].
#[derive(Debug, Clone, PartialEq)]
pub struct Ring(LineString<f64>);

impl Ring {
    pub fn new(coords: Vec<Coord<f64>>) -> Self {
        Self(LineString::new(coords))
    }

    /// Build a ring, appending the first vertex if the sequence is open.
    pub fn closed(coords: Vec<Coord<f64>>) -> Self {
        let mut ring = coords;
        if ring.len() >= 2 && ring.first() != ring.last() {
            ring.push(ring[0]);
        }
        Self::new(ring)
    }

    pub fn coords(&self) -> &[Coord<f64>] {
        &self.0 .0
    }

    /// Number of explicit vertices
    pub fn len(&self) -> usize {
        self.0 .0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0 .0.is_empty()
    }

    /// True when the last vertex repeats the first
    pub fn is_closed(&self) -> bool {
        self.len() >= 2 && self.0 .0.first() == self.0 .0.last()
    }
}

/// A named multi-part region. A point inside any part is inside the region.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub name: String,
    pub parts: Vec<Ring>,
}

impl Region {
    pub fn new(name: impl Into<String>, parts: Vec<Ring>) -> Self {
        Self {
            name: name.into(),
            parts,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.parts.iter().map(Ring::len).sum()
    }
}

/// A top-level system and the names of the sub-regions it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemEntry {
    pub name: String,
    pub subregions: Vec<String>,
}
