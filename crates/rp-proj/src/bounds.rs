//! WGS84 bounding box → local-CRS bounding box.

use log::debug;

use rp_core::{LocalBounds, LonLatBounds};

use crate::{ProjResult, Projector};

/// Project the two corners of `bbox` independently and take the
/// componentwise min/max of the results.
///
/// Projection is not assumed to preserve axis order, so the corner pairing is
/// never trusted after projection.
pub fn resolve_local_bounds(bbox: &LonLatBounds, projector: &Projector) -> ProjResult<LocalBounds> {
    let a = projector.to_local(bbox.min_corner())?;
    let b = projector.to_local(bbox.max_corner())?;
    let local = LocalBounds::from_corners(a, b);
    debug!(
        "resolved {:?} in {} to [{}, {}]",
        bbox,
        projector.local_crs(),
        local.min,
        local.max
    );
    Ok(local)
}
