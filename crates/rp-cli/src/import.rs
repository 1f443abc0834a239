//! Loading map documents and metadata into the SQLite store.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};

use rp_core::{MapReference, SimMetadata};
use rp_map::{MapDocument, SqliteStore};
use rp_service::ServiceConfig;

/// Parse one `{"class": ..., "data": ...}` document per non-blank line.
pub fn read_documents<R: Read>(reader: R) -> Result<Vec<MapDocument>> {
    let mut docs = Vec::new();
    for (i, line) in BufReader::new(reader).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let doc: MapDocument =
            serde_json::from_str(&line).with_context(|| format!("line {}", i + 1))?;
        docs.push(doc);
    }
    Ok(docs)
}

pub fn import_map(config: &ServiceConfig, map: &MapReference, input: &Path) -> Result<usize> {
    let file = File::open(input).with_context(|| format!("opening {}", input.display()))?;
    let docs = read_documents(file)?;
    let store = SqliteStore::open(&config.database, &config.meta_table)?;
    store.insert_documents(map, &docs)?;
    Ok(docs.len())
}

pub fn import_metadata(config: &ServiceConfig, input: &Path) -> Result<usize> {
    let raw = std::fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))?;
    let rows: Vec<SimMetadata> = serde_json::from_str(&raw)?;
    for row in &rows {
        row.bounds().with_context(|| format!("simulation {:?}", row.name))?;
    }
    let store = SqliteStore::open(&config.database, &config.meta_table)?;
    store.insert_metadata(&rows)?;
    Ok(rows.len())
}
