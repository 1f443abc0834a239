//! The metadata-lookup contract.

use rp_core::SimMetadata;

use crate::{MapError, MapResult};

/// Read-only access to the simulation metadata table.
pub trait MetadataSource: Send + Sync {
    /// All rows when `name` is `None`, otherwise the rows for that name.
    fn query(&self, name: Option<&str>) -> MapResult<Vec<SimMetadata>>;

    /// The single row for `name`.
    ///
    /// Returns `Ok(None)` when there is no such simulation and
    /// [`MapError::DuplicateRecords`] when there is more than one row.
    fn lookup_one(&self, name: &str) -> MapResult<Option<SimMetadata>> {
        let mut rows = self.query(Some(name))?;
        match rows.len() {
            0 => Ok(None),
            1 => Ok(rows.pop()),
            _ => Err(MapError::DuplicateRecords(name.to_owned())),
        }
    }
}
