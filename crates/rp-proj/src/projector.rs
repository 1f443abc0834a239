//! Scoped coordinate transforms.
//!
//! # CRS identifiers
//!
//! Two spellings are accepted:
//!
//! | Form          | Example                                          |
//! |---------------|--------------------------------------------------|
//! | `EPSG:<code>` | `EPSG:4326`, `EPSG:32650`                        |
//! | proj string   | `+proj=tmerc +lat_0=39.9 +lon_0=116.4 +ellps=WGS84` |
//!
//! Anything else fails with [`ProjError::Setup`].
//!
//! # Axis order
//!
//! Every transform works in (x, y) = (easting, northing) for projected
//! systems and (x, y) = (longitude, latitude) in degrees for geographic ones.
//! Nothing in this crate ever hands out `[lat, lon]`.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::trace;
use proj4rs::proj::Proj;

use rp_core::{LonLat, XY};

use crate::{ProjError, ProjResult};

/// Identifier of the WGS84 geographic CRS.
pub const WGS84_CRS: &str = "EPSG:4326";

const WGS84_PROJ_STRING: &str = "+proj=longlat +datum=WGS84 +no_defs";

// ── ProjContext ───────────────────────────────────────────────────────────────

/// Factory for transforms.  Cheap to clone; clones share the live count.
///
/// One context per process, passed to whoever needs to project.
#[derive(Clone, Debug, Default)]
pub struct ProjContext {
    live: Arc<AtomicUsize>,
}

impl ProjContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of transforms acquired from this context and not yet dropped.
    pub fn live_transforms(&self) -> usize {
        self.live.load(Ordering::Acquire)
    }

    /// Acquire a one-way transform from `from` to `to`.
    pub fn transform(&self, from: &str, to: &str) -> ProjResult<Transform> {
        let src = parse_crs(from)?;
        let dst = parse_crs(to)?;
        self.live.fetch_add(1, Ordering::AcqRel);
        trace!("acquired transform {from} -> {to}");
        Ok(Transform {
            src,
            dst,
            from: from.to_owned(),
            to: to.to_owned(),
            live: Arc::clone(&self.live),
        })
    }

    /// Acquire both directions between `local_crs` and WGS84.
    ///
    /// If the second direction fails, the first is dropped before returning,
    /// so a failed acquisition leaves nothing live.
    pub fn projector(&self, local_crs: &str) -> ProjResult<Projector> {
        let to_wgs84 = self.transform(local_crs, WGS84_CRS)?;
        let to_local = self.transform(WGS84_CRS, local_crs)?;
        Ok(Projector { to_wgs84, to_local })
    }
}

// ── Transform ─────────────────────────────────────────────────────────────────

/// Parsed CRS plus whether it is geographic (degrees in, degrees out).
struct Crs {
    proj:       Proj,
    geographic: bool,
}

impl Crs {
    fn new(proj: Proj) -> Self {
        Self { geographic: proj.is_latlong(), proj }
    }
}

/// A one-way coordinate transform.  Released on drop.
pub struct Transform {
    src:  Crs,
    dst:  Crs,
    from: String,
    to:   String,
    live: Arc<AtomicUsize>,
}

impl Transform {
    /// Transform one point.  Geographic input and output are in degrees.
    pub fn transform(&self, x: f64, y: f64) -> ProjResult<(f64, f64)> {
        let (ix, iy) = if self.src.geographic {
            (x.to_radians(), y.to_radians())
        } else {
            (x, y)
        };
        let mut point = (ix, iy, 0.0);
        proj4rs::transform::transform(&self.src.proj, &self.dst.proj, &mut point)
            .map_err(|e| self.evaluation_error(x, y, e.to_string()))?;

        let (ox, oy) = if self.dst.geographic {
            (point.0.to_degrees(), point.1.to_degrees())
        } else {
            (point.0, point.1)
        };
        if !ox.is_finite() || !oy.is_finite() {
            return Err(self.evaluation_error(x, y, "non-finite result".into()));
        }
        Ok((ox, oy))
    }

    pub fn source_crs(&self) -> &str {
        &self.from
    }

    pub fn target_crs(&self) -> &str {
        &self.to
    }

    fn evaluation_error(&self, x: f64, y: f64, reason: String) -> ProjError {
        ProjError::Evaluation { from: self.from.clone(), to: self.to.clone(), x, y, reason }
    }
}

impl Drop for Transform {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::AcqRel);
        trace!("released transform {} -> {}", self.from, self.to);
    }
}

impl std::fmt::Debug for Transform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transform").field("from", &self.from).field("to", &self.to).finish()
    }
}

// ── Projector ─────────────────────────────────────────────────────────────────

/// Both directions between one local CRS and WGS84.
#[derive(Debug)]
pub struct Projector {
    to_wgs84: Transform,
    to_local: Transform,
}

impl Projector {
    /// Local plane → WGS84 degrees.
    pub fn to_wgs84(&self, p: XY) -> ProjResult<LonLat> {
        let (lng, lat) = self.to_wgs84.transform(p.x, p.y)?;
        Ok(LonLat::new(lng, lat))
    }

    /// WGS84 degrees → local plane.
    pub fn to_local(&self, p: LonLat) -> ProjResult<XY> {
        let (x, y) = self.to_local.transform(p.lng, p.lat)?;
        Ok(XY::new(x, y))
    }

    /// Reproject a polyline to GeoJSON positions (`[lng, lat]` each).
    pub fn positions(&self, points: &[XY]) -> ProjResult<Vec<Vec<f64>>> {
        points.iter().map(|&p| self.to_wgs84(p).map(LonLat::to_position)).collect()
    }

    pub fn local_crs(&self) -> &str {
        self.to_wgs84.source_crs()
    }
}

// ── CRS parsing ───────────────────────────────────────────────────────────────

fn parse_crs(crs: &str) -> ProjResult<Crs> {
    let trimmed = crs.trim();
    let setup_error = |reason: String| ProjError::Setup { crs: crs.to_owned(), reason };

    if let Some(code) = strip_epsg_prefix(trimmed) {
        let code: u16 = code
            .parse()
            .map_err(|_| setup_error(format!("invalid EPSG code {code:?}")))?;
        // WGS84 is parsed from a fixed string so the common path never depends
        // on the bundled definitions table.
        let proj = if code == 4326 {
            Proj::from_proj_string(WGS84_PROJ_STRING)
        } else {
            Proj::from_epsg_code(code)
        }
        .map_err(|e| setup_error(e.to_string()))?;
        return Ok(Crs::new(proj));
    }

    if trimmed.starts_with('+') {
        let proj = Proj::from_proj_string(trimmed).map_err(|e| setup_error(e.to_string()))?;
        return Ok(Crs::new(proj));
    }

    Err(setup_error("expected \"EPSG:<code>\" or a \"+proj=...\" string".into()))
}

fn strip_epsg_prefix(s: &str) -> Option<&str> {
    let (prefix, rest) = s.split_once(':')?;
    prefix.eq_ignore_ascii_case("epsg").then_some(rest.trim())
}
