//! The replay service and its builder.

use std::sync::Arc;

use geojson::FeatureCollection;
use log::{debug, info};

use rp_core::{LaneKindFilter, MapReference, SimMetadata};
use rp_feature::{aggregate_road_lanes, extract_areas, extract_lanes, feature_collection};
use rp_map::{MapStore, MetadataSource};
use rp_proj::{ProjContext, Projector, resolve_local_bounds};
use rp_status::{
    CongestionStat, IntervalCache, MemoryStepSource, Pedestrian, RoadStatus, StepRecord,
    StepSource, TrafficLight, Vehicle, aggregate_congestion,
};

use crate::{AreaParams, ServiceError, ServiceResult, StepRange};

/// Metadata version whose vehicle table layout is served.
pub const VEHICLE_TABLE_VERSION: i32 = 2;

pub const ROAD_STATUS_TABLE_SUFFIX: &str = "_s_road";
pub const VEHICLE_TABLE_SUFFIX: &str = "_s_cars";
pub const PEDESTRIAN_TABLE_SUFFIX: &str = "_s_people";
pub const TRAFFIC_LIGHT_TABLE_SUFFIX: &str = "_s_traffic_light";

fn table(name: &str, suffix: &str) -> String {
    format!("{name}{suffix}")
}

// ── ReplayService ─────────────────────────────────────────────────────────────

/// Answers replay requests for any simulation in the metadata table.
///
/// All collaborators are injected; the service holds no global state.  The
/// interval cache is the only state mutated by concurrent requests.
pub struct ReplayService {
    metadata:       Arc<dyn MetadataSource>,
    maps:           Arc<dyn MapStore>,
    road_status:    Arc<dyn StepSource<RoadStatus>>,
    vehicles:       Arc<dyn StepSource<Vehicle>>,
    pedestrians:    Arc<dyn StepSource<Pedestrian>>,
    traffic_lights: Arc<dyn StepSource<TrafficLight>>,
    intervals:      Arc<IntervalCache>,
    proj:           ProjContext,
}

impl ReplayService {
    pub fn proj_context(&self) -> &ProjContext {
        &self.proj
    }

    pub fn interval_cache(&self) -> &IntervalCache {
        &self.intervals
    }

    // ── Metadata ──────────────────────────────────────────────────────────

    pub fn list_sims(&self) -> ServiceResult<Vec<SimMetadata>> {
        Ok(self.metadata.query(None)?)
    }

    pub fn sim_by_name(&self, name: &str) -> ServiceResult<SimMetadata> {
        match self.metadata.lookup_one(name)? {
            Some(meta) => Ok(meta),
            None => {
                info!("simulation {name:?} not found");
                Err(ServiceError::NotFound(name.to_owned()))
            }
        }
    }

    // ── Map geometry ──────────────────────────────────────────────────────

    pub fn junction_lanes(&self, name: &str) -> ServiceResult<FeatureCollection> {
        self.lanes(name, LaneKindFilter::JunctionOnly)
    }

    pub fn all_road_lanes(&self, name: &str) -> ServiceResult<FeatureCollection> {
        self.lanes(name, LaneKindFilter::RoadOnly)
    }

    pub fn all_lanes(&self, name: &str) -> ServiceResult<FeatureCollection> {
        self.lanes(name, LaneKindFilter::All)
    }

    /// Lanes of kind `filter` inside the simulation's microscopic area.
    pub fn lanes(&self, name: &str, filter: LaneKindFilter) -> ServiceResult<FeatureCollection> {
        let meta = self.sim_by_name(name)?;
        let map = meta.map_reference()?;
        let projector = self.map_projector(&map)?;
        let bounds = resolve_local_bounds(&meta.bounds()?, &projector)?;
        let features = extract_lanes(self.maps.as_ref(), &map, &projector, &bounds, filter)?;
        Ok(feature_collection(features))
    }

    /// One feature per road, keyed by road id, for road-status rendering.
    pub fn road_lanes(&self, name: &str) -> ServiceResult<FeatureCollection> {
        let meta = self.sim_by_name(name)?;
        let v_min = meta.road_status_v_min.ok_or_else(|| ServiceError::RoadStatusUnavailable {
            name:    name.to_owned(),
            missing: "road_status_v_min",
        })?;
        let map = meta.map_reference()?;
        let projector = self.map_projector(&map)?;
        let features = aggregate_road_lanes(self.maps.as_ref(), &map, &projector, v_min)?;
        Ok(feature_collection(features))
    }

    /// Areas of interest inside the simulation's microscopic area.
    pub fn aois(&self, name: &str) -> ServiceResult<FeatureCollection> {
        let meta = self.sim_by_name(name)?;
        let map = meta.map_reference()?;
        let projector = self.map_projector(&map)?;
        let bounds = resolve_local_bounds(&meta.bounds()?, &projector)?;
        let features = extract_areas(self.maps.as_ref(), &map, &projector, &bounds)?;
        Ok(feature_collection(features))
    }

    fn map_projector(&self, map: &MapReference) -> ServiceResult<Projector> {
        let header = self.maps.header(map)?;
        Ok(self.proj.projector(&header.projection)?)
    }

    // ── Road status ───────────────────────────────────────────────────────

    /// Raw congestion samples, one row per road per requested step.
    pub fn road_status(&self, name: &str, range: &StepRange) -> ServiceResult<Vec<RoadStatus>> {
        let query = range.step_query()?;
        let interval = self.road_status_interval(name)?;
        let rows = self
            .road_status
            .query_with_step(&table(name, ROAD_STATUS_TABLE_SUFFIX), &query.recorded_every(interval))?;
        debug!("{name}: {} road status row(s)", rows.len());
        Ok(rows)
    }

    /// Per-step congestion summary, sorted by step.
    pub fn road_status_stat(&self, name: &str, range: &StepRange) -> ServiceResult<Vec<CongestionStat>> {
        let rows = self.road_status(name, range)?;
        Ok(aggregate_congestion(&rows))
    }

    fn road_status_interval(&self, name: &str) -> ServiceResult<i64> {
        if let Some(interval) = self.intervals.get(name) {
            return Ok(interval);
        }
        let meta = self.sim_by_name(name)?;
        let interval = meta.road_status_interval.ok_or_else(|| ServiceError::RoadStatusUnavailable {
            name:    name.to_owned(),
            missing: "road_status_interval",
        })?;
        self.intervals.put(name, interval);
        Ok(interval)
    }

    // ── Agents and signals ────────────────────────────────────────────────

    pub fn vehicles(&self, name: &str, range: &StepRange, area: &AreaParams) -> ServiceResult<Vec<Vehicle>> {
        let query = range.step_query()?.within(area.filter()?);
        let meta = self.sim_by_name(name)?;
        if meta.version != VEHICLE_TABLE_VERSION {
            return Err(ServiceError::UnsupportedVersion { name: name.to_owned(), version: meta.version });
        }
        let rows = self.vehicles.query_with_step(&table(name, VEHICLE_TABLE_SUFFIX), &query)?;
        Ok(rows.into_iter().map(Vehicle::rounded).collect())
    }

    pub fn pedestrians(&self, name: &str, range: &StepRange, area: &AreaParams) -> ServiceResult<Vec<Pedestrian>> {
        let query = range.step_query()?.within(area.filter()?);
        let rows = self.pedestrians.query_with_step(&table(name, PEDESTRIAN_TABLE_SUFFIX), &query)?;
        Ok(rows.into_iter().map(Pedestrian::rounded).collect())
    }

    pub fn traffic_lights(&self, name: &str, range: &StepRange, area: &AreaParams) -> ServiceResult<Vec<TrafficLight>> {
        let query = range.step_query()?.within(area.filter()?);
        Ok(self.traffic_lights.query_with_step(&table(name, TRAFFIC_LIGHT_TABLE_SUFFIX), &query)?)
    }
}

// ── ReplayServiceBuilder ──────────────────────────────────────────────────────

/// Fluent builder for [`ReplayService`].
///
/// # Optional inputs (have defaults)
///
/// | Method                 | Default                              |
/// |------------------------|--------------------------------------|
/// | `.road_status(s)`      | empty `MemoryStepSource`             |
/// | `.vehicles(s)`         | empty `MemoryStepSource`             |
/// | `.pedestrians(s)`      | empty `MemoryStepSource`             |
/// | `.traffic_lights(s)`   | empty `MemoryStepSource`             |
/// | `.interval_cache(c)`   | `IntervalCache::default()` (60 s)    |
/// | `.proj_context(p)`     | `ProjContext::new()`                 |
pub struct ReplayServiceBuilder {
    metadata:       Arc<dyn MetadataSource>,
    maps:           Arc<dyn MapStore>,
    road_status:    Option<Arc<dyn StepSource<RoadStatus>>>,
    vehicles:       Option<Arc<dyn StepSource<Vehicle>>>,
    pedestrians:    Option<Arc<dyn StepSource<Pedestrian>>>,
    traffic_lights: Option<Arc<dyn StepSource<TrafficLight>>>,
    intervals:      Option<Arc<IntervalCache>>,
    proj:           Option<ProjContext>,
}

impl ReplayServiceBuilder {
    pub fn new(metadata: Arc<dyn MetadataSource>, maps: Arc<dyn MapStore>) -> Self {
        Self {
            metadata,
            maps,
            road_status:    None,
            vehicles:       None,
            pedestrians:    None,
            traffic_lights: None,
            intervals:      None,
            proj:           None,
        }
    }

    pub fn road_status(mut self, source: Arc<dyn StepSource<RoadStatus>>) -> Self {
        self.road_status = Some(source);
        self
    }

    pub fn vehicles(mut self, source: Arc<dyn StepSource<Vehicle>>) -> Self {
        self.vehicles = Some(source);
        self
    }

    pub fn pedestrians(mut self, source: Arc<dyn StepSource<Pedestrian>>) -> Self {
        self.pedestrians = Some(source);
        self
    }

    pub fn traffic_lights(mut self, source: Arc<dyn StepSource<TrafficLight>>) -> Self {
        self.traffic_lights = Some(source);
        self
    }

    /// Share one cache between services; there should be one per process.
    pub fn interval_cache(mut self, cache: Arc<IntervalCache>) -> Self {
        self.intervals = Some(cache);
        self
    }

    pub fn proj_context(mut self, proj: ProjContext) -> Self {
        self.proj = Some(proj);
        self
    }

    pub fn build(self) -> ReplayService {
        ReplayService {
            metadata:       self.metadata,
            maps:           self.maps,
            road_status:    self.road_status.unwrap_or_else(empty_source),
            vehicles:       self.vehicles.unwrap_or_else(empty_source),
            pedestrians:    self.pedestrians.unwrap_or_else(empty_source),
            traffic_lights: self.traffic_lights.unwrap_or_else(empty_source),
            intervals:      self.intervals.unwrap_or_default(),
            proj:           self.proj.unwrap_or_default(),
        }
    }
}

fn empty_source<T: StepRecord + 'static>() -> Arc<dyn StepSource<T>> {
    Arc::new(MemoryStepSource::<T>::new())
}

#[cfg(feature = "sqlite")]
impl ReplayServiceBuilder {
    /// Metadata and map documents from the SQLite database named in `config`.
    pub fn open_sqlite(config: &crate::ServiceConfig) -> ServiceResult<Self> {
        let store = Arc::new(rp_map::SqliteStore::open(&config.database, &config.meta_table)?);
        info!("opened {}", config.database.display());
        Ok(Self::new(store.clone(), store)
            .interval_cache(Arc::new(IntervalCache::new(config.cache_ttl()))))
    }
}
