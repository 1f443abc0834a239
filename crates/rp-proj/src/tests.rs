//! Unit tests for rp-proj.
//!
//! All projections are built from proj strings or the WGS84 code, so no test
//! depends on a particular EPSG table entry.

#[cfg(test)]
mod helpers {
    /// Transverse Mercator centred on Beijing.
    pub const BEIJING_TMERC: &str =
        "+proj=tmerc +lat_0=39.90611 +lon_0=116.3911 +k=1 +x_0=0 +y_0=0 +ellps=WGS84 +units=m +no_defs";

    /// UTM zone 50N spelled out as a tmerc string (central meridian 117°E).
    pub const UTM_50N: &str =
        "+proj=tmerc +lat_0=0 +lon_0=117 +k=0.9996 +x_0=500000 +y_0=0 +ellps=WGS84 +units=m +no_defs";
}

// ── Setup ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod setup {
    use crate::{ProjContext, ProjError, WGS84_CRS};

    use super::helpers::BEIJING_TMERC;

    #[test]
    fn unknown_identifiers_fail_setup() {
        let ctx = ProjContext::new();
        for bad in ["not a crs", "EPSG:abc", "EPSG:99999999", "", "+proj=nosuchprojection"] {
            let result = ctx.transform(bad, WGS84_CRS);
            assert!(
                matches!(result, Err(ProjError::Setup { .. })),
                "{bad:?} should fail setup",
            );
        }
        assert_eq!(ctx.live_transforms(), 0);
    }

    #[test]
    fn epsg_prefix_is_case_insensitive() {
        let ctx = ProjContext::new();
        let t = ctx.transform("epsg:4326", BEIJING_TMERC).unwrap();
        assert_eq!(t.source_crs(), "epsg:4326");
    }

    #[test]
    fn drop_releases_every_transform() {
        let ctx = ProjContext::new();
        {
            let _p = ctx.projector(BEIJING_TMERC).unwrap();
            assert_eq!(ctx.live_transforms(), 2);
            let _extra = ctx.clone().transform(WGS84_CRS, BEIJING_TMERC).unwrap();
            assert_eq!(ctx.live_transforms(), 3);
        }
        assert_eq!(ctx.live_transforms(), 0);
    }

    #[test]
    fn failed_projector_leaves_nothing_live() {
        let ctx = ProjContext::new();
        assert!(ctx.projector("+proj=nosuchprojection").is_err());
        assert_eq!(ctx.live_transforms(), 0);
    }
}

// ── Transform ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod transform {
    use rp_core::{LonLat, XY};

    use crate::ProjContext;

    use super::helpers::{BEIJING_TMERC, UTM_50N};

    #[test]
    fn origin_maps_to_projection_centre() {
        let ctx = ProjContext::new();
        let p = ctx.projector(BEIJING_TMERC).unwrap();
        let ll = p.to_wgs84(XY::new(0.0, 0.0)).unwrap();
        assert!((ll.lng - 116.3911).abs() < 1e-9, "got {ll}");
        assert!((ll.lat - 39.90611).abs() < 1e-9, "got {ll}");
    }

    #[test]
    fn local_roundtrip_within_tolerance() {
        let ctx = ProjContext::new();
        let p = ctx.projector(BEIJING_TMERC).unwrap();
        for &(x, y) in &[(0.0, 0.0), (1_234.5, -987.25), (-4_800.0, 4_999.0), (3.0, 7.0)] {
            let back = p.to_local(p.to_wgs84(XY::new(x, y)).unwrap()).unwrap();
            assert!((back.x - x).abs() < 1e-6, "x {x} -> {}", back.x);
            assert!((back.y - y).abs() < 1e-6, "y {y} -> {}", back.y);
        }
    }

    #[test]
    fn geographic_roundtrip_within_tolerance() {
        let ctx = ProjContext::new();
        let p = ctx.projector(BEIJING_TMERC).unwrap();
        let ll = LonLat::new(116.40, 39.95);
        let back = p.to_wgs84(p.to_local(ll).unwrap()).unwrap();
        assert!((back.lng - ll.lng).abs() < 1e-8);
        assert!((back.lat - ll.lat).abs() < 1e-8);
    }

    #[test]
    fn positions_are_lon_then_lat() {
        let ctx = ProjContext::new();
        let p = ctx.projector(UTM_50N).unwrap();
        let positions = p.positions(&[XY::new(500_000.0, 4_000_000.0)]).unwrap();
        let &[lng, lat] = positions[0].as_slice() else { panic!("expected 2 ordinates") };
        assert!((lng - 117.0).abs() < 1e-6, "longitude first, got {lng}");
        assert!(lat > 35.5 && lat < 36.5, "latitude second, got {lat}");
    }

    #[test]
    fn latlong_proj_string_is_identity_in_degrees() {
        let ctx = ProjContext::new();
        for local in ["+proj=longlat +datum=WGS84 +no_defs", "+proj=latlong +ellps=WGS84"] {
            let p = ctx.projector(local).unwrap();
            let ll = p.to_wgs84(XY::new(116.4, 39.9)).unwrap();
            assert!((ll.lng - 116.4).abs() < 1e-8, "{local}: got {ll}");
            assert!((ll.lat - 39.9).abs() < 1e-8, "{local}: got {ll}");
        }
    }

    #[test]
    fn deterministic() {
        let ctx = ProjContext::new();
        let p = ctx.projector(BEIJING_TMERC).unwrap();
        let a = p.to_wgs84(XY::new(321.0, 654.0)).unwrap();
        let b = p.to_wgs84(XY::new(321.0, 654.0)).unwrap();
        assert_eq!(a, b);
    }
}

// ── Bounding box ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod bounds {
    use rp_core::{LonLat, LonLatBounds};

    use crate::{ProjContext, resolve_local_bounds};

    use super::helpers::BEIJING_TMERC;

    #[test]
    fn local_box_is_ordered_and_contains_centre() {
        let ctx = ProjContext::new();
        let p = ctx.projector(BEIJING_TMERC).unwrap();
        let bbox = LonLatBounds::new(116.35, 39.88, 116.43, 39.93).unwrap();
        let local = resolve_local_bounds(&bbox, &p).unwrap();

        assert!(local.min.x < local.max.x);
        assert!(local.min.y < local.max.y);
        let centre = p.to_local(LonLat::new(116.39, 39.905)).unwrap();
        assert!(local.contains(centre));
    }

    #[test]
    fn wider_box_contains_narrower() {
        let ctx = ProjContext::new();
        let p = ctx.projector(BEIJING_TMERC).unwrap();
        let narrow = resolve_local_bounds(&LonLatBounds::new(116.38, 39.90, 116.40, 39.91).unwrap(), &p).unwrap();
        let wide = resolve_local_bounds(&LonLatBounds::new(116.30, 39.85, 116.50, 39.95).unwrap(), &p).unwrap();
        assert!(wide.contains(narrow.min));
        assert!(wide.contains(narrow.max));
    }
}
