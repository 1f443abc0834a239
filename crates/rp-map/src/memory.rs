//! In-memory backends.
//!
//! Both keep raw documents / rows and decode on every query, so they exercise
//! the same decode path as a persistent store.  They are used by tests and by
//! small fixtures loaded from JSON.

use std::collections::HashMap;

use rp_core::{LocalBounds, MapReference, SimMetadata};

use crate::{
    AoiDoc, DocumentClass, LaneDoc, LaneQuery, MapDocument, MapError, MapHeader, MapResult,
    MapStore, MetadataSource, RoadDoc,
};

// ── MemoryMapStore ────────────────────────────────────────────────────────────

/// Map collections held in memory, keyed by [`MapReference`].
#[derive(Clone, Debug, Default)]
pub struct MemoryMapStore {
    maps:    HashMap<MapReference, Vec<MapDocument>>,
    offline: Option<String>,
}

impl MemoryMapStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one raw document to `map`.
    pub fn insert(&mut self, map: &MapReference, doc: MapDocument) {
        self.maps.entry(map.clone()).or_default().push(doc);
    }

    /// Make every subsequent query fail with [`MapError::Query`].
    pub fn set_offline(&mut self, reason: impl Into<String>) {
        self.offline = Some(reason.into());
    }

    fn documents(
        &self,
        map: &MapReference,
        class: DocumentClass,
    ) -> MapResult<impl Iterator<Item = &MapDocument>> {
        if let Some(reason) = &self.offline {
            return Err(MapError::Query(reason.clone()));
        }
        Ok(self
            .maps
            .get(map)
            .into_iter()
            .flatten()
            .filter(move |d| d.class == class))
    }
}

impl MapStore for MemoryMapStore {
    fn header(&self, map: &MapReference) -> MapResult<MapHeader> {
        match self.documents(map, DocumentClass::Header)?.next() {
            Some(doc) => MapHeader::from_data(&doc.data)?
                .ok_or_else(|| MapError::HeaderMissing(map.clone())),
            None => Err(MapError::HeaderMissing(map.clone())),
        }
    }

    fn lanes(&self, map: &MapReference, query: &LaneQuery) -> MapResult<Vec<LaneDoc>> {
        let mut lanes = Vec::new();
        for doc in self.documents(map, DocumentClass::Lane)? {
            let lane = LaneDoc::decode(&doc.data)?;
            if query.matches(&lane) {
                lanes.push(lane.validated()?);
            }
        }
        Ok(lanes)
    }

    fn roads(&self, map: &MapReference) -> MapResult<Vec<RoadDoc>> {
        self.documents(map, DocumentClass::Road)?
            .map(|doc| RoadDoc::from_data(&doc.data))
            .collect()
    }

    fn aois(&self, map: &MapReference, touching: Option<&LocalBounds>) -> MapResult<Vec<AoiDoc>> {
        let mut aois = Vec::new();
        for doc in self.documents(map, DocumentClass::Aoi)? {
            if !AoiDoc::is_areal(&doc.data) {
                continue;
            }
            let aoi = AoiDoc::from_data(&doc.data)?;
            if touching.is_none_or(|b| b.touches(&aoi.positions)) {
                aois.push(aoi);
            }
        }
        Ok(aois)
    }
}

// ── MemoryMetadata ────────────────────────────────────────────────────────────

/// Metadata rows held in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryMetadata {
    rows:    Vec<SimMetadata>,
    offline: Option<String>,
}

impl MemoryMetadata {
    pub fn new(rows: Vec<SimMetadata>) -> Self {
        Self { rows, offline: None }
    }

    /// Make every subsequent query fail with [`MapError::Query`].
    pub fn set_offline(&mut self, reason: impl Into<String>) {
        self.offline = Some(reason.into());
    }
}

impl MetadataSource for MemoryMetadata {
    fn query(&self, name: Option<&str>) -> MapResult<Vec<SimMetadata>> {
        if let Some(reason) = &self.offline {
            return Err(MapError::Query(reason.clone()));
        }
        Ok(self
            .rows
            .iter()
            .filter(|m| name.is_none_or(|n| m.name == n))
            .cloned()
            .collect())
    }
}
