//! SQLite backend (feature `sqlite`).
//!
//! One database file holds both the map documents and the metadata table:
//!
//! ```text
//! map_documents(db TEXT, col TEXT, class TEXT, data TEXT)   -- data is JSON
//! <meta table>(name, start, steps, time, total_agents, map,
//!              min_lng, min_lat, max_lng, max_lat,
//!              road_status_v_min, road_status_interval, version)
//! ```
//!
//! Lane attribute filters (kind, type, max speed) run inside SQLite through
//! `json_extract`; the vertex-in-box test runs in Rust on the decoded rows.
//! A lane without `max_speed` counts as 0 m/s, as in [`LaneDoc`].

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use log::debug;
use rusqlite::{Connection, OptionalExtension, params};

use rp_core::{JUNCTION_ID_THRESHOLD, LaneKindFilter, LaneType, LocalBounds, MapReference, SimMetadata};

use crate::{
    AoiDoc, DocumentClass, LaneDoc, LaneQuery, MapDocument, MapError, MapHeader, MapResult,
    MapStore, MetadataSource, RoadDoc,
};

/// Default name of the metadata table.
pub const DEFAULT_META_TABLE: &str = "meta_simple";

/// Map documents and simulation metadata in one SQLite database.
pub struct SqliteStore {
    conn:       Mutex<Connection>,
    meta_table: String,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and initialise the schema.
    pub fn open(path: &Path, meta_table: &str) -> MapResult<Self> {
        Self::from_connection(Connection::open(path)?, meta_table)
    }

    /// A private in-memory database, mostly for tests.
    pub fn open_in_memory(meta_table: &str) -> MapResult<Self> {
        Self::from_connection(Connection::open_in_memory()?, meta_table)
    }

    fn from_connection(conn: Connection, meta_table: &str) -> MapResult<Self> {
        if !is_identifier(meta_table) {
            return Err(MapError::Query(format!("invalid metadata table name {meta_table:?}")));
        }
        conn.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS map_documents (
                 db    TEXT NOT NULL,
                 col   TEXT NOT NULL,
                 class TEXT NOT NULL,
                 data  TEXT NOT NULL
             );
             CREATE INDEX IF NOT EXISTS map_documents_class
                 ON map_documents (db, col, class);
             CREATE TABLE IF NOT EXISTS {meta_table} (
                 name                 TEXT    NOT NULL,
                 start                INTEGER NOT NULL,
                 steps                INTEGER NOT NULL,
                 time                 REAL    NOT NULL,
                 total_agents         INTEGER NOT NULL,
                 map                  TEXT    NOT NULL,
                 min_lng              REAL    NOT NULL,
                 min_lat              REAL    NOT NULL,
                 max_lng              REAL    NOT NULL,
                 max_lat              REAL    NOT NULL,
                 road_status_v_min    REAL,
                 road_status_interval INTEGER,
                 version              INTEGER NOT NULL DEFAULT 0
             );"
        ))?;
        Ok(Self { conn: Mutex::new(conn), meta_table: meta_table.to_owned() })
    }

    /// Store a batch of map documents in one transaction.
    pub fn insert_documents(&self, map: &MapReference, docs: &[MapDocument]) -> MapResult<()> {
        if docs.is_empty() {
            return Ok(());
        }
        let conn = self.lock()?;
        let tx = conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO map_documents (db, col, class, data) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for doc in docs {
                let data = serde_json::to_string(&doc.data)?;
                stmt.execute(params![map.database, map.collection, doc.class.as_str(), data])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// Store metadata rows in one transaction; nothing is written if any
    /// row fails.
    pub fn insert_metadata(&self, rows: &[SimMetadata]) -> MapResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let conn = self.lock()?;
        let tx = conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(&format!(
                "INSERT INTO {} (name, start, steps, time, total_agents, map,
                                 min_lng, min_lat, max_lng, max_lat,
                                 road_status_v_min, road_status_interval, version)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
                self.meta_table
            ))?;
            for meta in rows {
                stmt.execute(params![
                    meta.name,
                    meta.start,
                    meta.steps,
                    meta.time,
                    meta.total_agents,
                    meta.map,
                    meta.min_lng,
                    meta.min_lat,
                    meta.max_lng,
                    meta.max_lat,
                    meta.road_status_v_min,
                    meta.road_status_interval,
                    meta.version,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn lock(&self) -> MapResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| MapError::Query("SQLite connection lock poisoned".into()))
    }

    /// Raw `data` payloads of one class, with an optional extra SQL filter.
    fn class_data(
        &self,
        map: &MapReference,
        class: DocumentClass,
        extra_filter: &str,
        extra_params: &[&dyn rusqlite::ToSql],
    ) -> MapResult<Vec<serde_json::Value>> {
        let conn = self.lock()?;
        let sql = format!(
            "SELECT data FROM map_documents WHERE db = ?1 AND col = ?2 AND class = ?3 {extra_filter}"
        );
        let mut stmt = conn.prepare_cached(&sql)?;
        let class_name = class.as_str();
        let mut bound: Vec<&dyn rusqlite::ToSql> = vec![&map.database, &map.collection, &class_name];
        bound.extend_from_slice(extra_params);

        let rows = stmt.query_map(bound.as_slice(), |row| row.get::<_, String>(0))?;
        let mut out = Vec::new();
        for raw in rows {
            out.push(serde_json::from_str(&raw?)?);
        }
        debug!("{map}: fetched {} {} document(s)", out.len(), class.as_str());
        Ok(out)
    }
}

impl MapStore for SqliteStore {
    fn header(&self, map: &MapReference) -> MapResult<MapHeader> {
        let raw: Option<String> = self
            .lock()?
            .query_row(
                "SELECT data FROM map_documents WHERE db = ?1 AND col = ?2 AND class = ?3 LIMIT 1",
                params![map.database, map.collection, DocumentClass::Header.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        let Some(raw) = raw else {
            return Err(MapError::HeaderMissing(map.clone()));
        };
        MapHeader::from_data(&serde_json::from_str(&raw)?)?
            .ok_or_else(|| MapError::HeaderMissing(map.clone()))
    }

    fn lanes(&self, map: &MapReference, query: &LaneQuery) -> MapResult<Vec<LaneDoc>> {
        let (min_parent, max_parent): (Option<i32>, Option<i32>) = match query.kind {
            LaneKindFilter::All => (None, None),
            LaneKindFilter::JunctionOnly => (Some(JUNCTION_ID_THRESHOLD), None),
            LaneKindFilter::RoadOnly => (None, Some(JUNCTION_ID_THRESHOLD)),
        };
        let driving_tag: Option<i32> = query.driving_only.then_some(LaneType::DRIVING_TAG);

        let data = self.class_data(
            map,
            DocumentClass::Lane,
            "AND (?4 IS NULL OR json_extract(data, '$.parent_id') >= ?4)
             AND (?5 IS NULL OR json_extract(data, '$.parent_id') <  ?5)
             AND (?6 IS NULL OR json_extract(data, '$.type') = ?6)
             AND (?7 IS NULL OR COALESCE(json_extract(data, '$.max_speed'), 0) >= ?7)",
            &[&min_parent, &max_parent, &driving_tag, &query.min_max_speed],
        )?;

        let mut lanes = Vec::with_capacity(data.len());
        for value in &data {
            let lane = LaneDoc::decode(value)?;
            if query.matches(&lane) {
                lanes.push(lane.validated()?);
            }
        }
        Ok(lanes)
    }

    fn roads(&self, map: &MapReference) -> MapResult<Vec<RoadDoc>> {
        self.class_data(map, DocumentClass::Road, "", &[])?
            .iter()
            .map(RoadDoc::from_data)
            .collect()
    }

    fn aois(&self, map: &MapReference, touching: Option<&LocalBounds>) -> MapResult<Vec<AoiDoc>> {
        let data = self.class_data(
            map,
            DocumentClass::Aoi,
            "AND json_type(data, '$.area') IS NOT NULL",
            &[],
        )?;
        let mut aois = Vec::with_capacity(data.len());
        for value in &data {
            let aoi = AoiDoc::from_data(value)?;
            if touching.is_none_or(|b| b.touches(&aoi.positions)) {
                aois.push(aoi);
            }
        }
        Ok(aois)
    }
}

impl MetadataSource for SqliteStore {
    fn query(&self, name: Option<&str>) -> MapResult<Vec<SimMetadata>> {
        let conn = self.lock()?;
        let columns = "name, start, steps, time, total_agents, map, min_lng, min_lat, max_lng, \
                       max_lat, road_status_v_min, road_status_interval, version";
        let sql = match name {
            Some(_) => format!("SELECT {columns} FROM {} WHERE name = ?1", self.meta_table),
            None => format!("SELECT {columns} FROM {}", self.meta_table),
        };
        let mut stmt = conn.prepare_cached(&sql)?;
        let map_row = |row: &rusqlite::Row<'_>| {
            Ok(SimMetadata {
                name:                 row.get(0)?,
                start:                row.get(1)?,
                steps:                row.get(2)?,
                time:                 row.get(3)?,
                total_agents:         row.get(4)?,
                map:                  row.get(5)?,
                min_lng:              row.get(6)?,
                min_lat:              row.get(7)?,
                max_lng:              row.get(8)?,
                max_lat:              row.get(9)?,
                road_status_v_min:    row.get(10)?,
                road_status_interval: row.get(11)?,
                version:              row.get(12)?,
            })
        };
        let rows = match name {
            Some(n) => stmt.query_map(params![n], map_row)?.collect::<Result<Vec<_>, _>>()?,
            None => stmt.query_map([], map_row)?.collect::<Result<Vec<_>, _>>()?,
        };
        Ok(rows)
    }
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty()
        && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !s.starts_with(|c: char| c.is_ascii_digit())
}
