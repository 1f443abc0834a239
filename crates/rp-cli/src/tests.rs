//! Tests for the `replay` binary.

#[cfg(test)]
mod args {
    use std::path::PathBuf;

    use structopt::StructOpt;

    use rp_core::LaneKindFilter;

    use crate::{Command, Opt};

    #[test]
    fn lanes_kind_parsed() {
        let opt = Opt::from_iter_safe(["replay", "--config", "x.json", "lanes", "sim1", "--kind", "junction"]).unwrap();
        assert_eq!(opt.config, Some(PathBuf::from("x.json")));
        match opt.cmd {
            Command::Lanes { name, kind } => {
                assert_eq!(name, "sim1");
                assert_eq!(kind, LaneKindFilter::JunctionOnly);
            }
            _ => panic!("expected lanes"),
        }
    }

    #[test]
    fn lanes_kind_defaults_to_all() {
        let opt = Opt::from_iter_safe(["replay", "lanes", "sim1"]).unwrap();
        assert!(matches!(opt.cmd, Command::Lanes { kind: LaneKindFilter::All, .. }));
    }

    #[test]
    fn bad_kind_rejected() {
        assert!(Opt::from_iter_safe(["replay", "lanes", "sim1", "--kind", "sidewalk"]).is_err());
    }

    #[test]
    fn road_status_stat_interval_default() {
        let opt = Opt::from_iter_safe([
            "replay", "road-status-stat", "sim1", "--samples", "s.csv", "--begin", "0", "--end", "10",
        ])
        .unwrap();
        assert!(matches!(opt.cmd, Command::RoadStatusStat { interval: 1, begin: 0, end: 10, .. }));
    }
}

#[cfg(test)]
mod import {
    use std::io::Cursor;

    use rp_map::{DocumentClass, MapStore, MetadataSource, SqliteStore};
    use rp_service::{ReplayServiceBuilder, ServiceConfig};

    use crate::import::{import_map, import_metadata, read_documents};

    const DOCUMENTS: &str = r#"
{"class":"header","data":{"projection":"+proj=tmerc +lat_0=39.90611 +lon_0=116.3911 +k=1 +x_0=0 +y_0=0 +ellps=WGS84 +units=m +no_defs"}}
{"class":"lane","data":{"id":1,"center_line":{"nodes":[{"x":0.0,"y":0.0},{"x":40.0,"y":0.0}]},"type":1,"parent_id":1,"max_speed":16.0}}

{"class":"road","data":{"id":100,"lane_ids":[1]}}
"#;

    const METADATA: &str = r#"[{
        "name": "sim1", "start": 0, "steps": 100, "time": 1.0, "total_agents": 10,
        "map": "simulation.map_a",
        "min_lng": 116.3901, "min_lat": 39.90521, "max_lng": 116.3921, "max_lat": 39.90701,
        "road_status_v_min": 10.0, "road_status_interval": 5, "version": 2
    }]"#;

    #[test]
    fn blank_lines_skipped() {
        let docs = read_documents(Cursor::new(DOCUMENTS)).unwrap();
        let classes: Vec<DocumentClass> = docs.iter().map(|d| d.class).collect();
        assert_eq!(classes, vec![DocumentClass::Header, DocumentClass::Lane, DocumentClass::Road]);
    }

    #[test]
    fn malformed_line_reports_position() {
        let err = read_documents(Cursor::new("{\"class\":\"lane\",\"data\":{}}\nnot json\n")).unwrap_err();
        assert!(format!("{err:#}").contains("line 2"));
    }

    #[test]
    fn imported_data_is_served() {
        let dir = tempfile::tempdir().unwrap();
        let docs = dir.path().join("map.jsonl");
        let meta = dir.path().join("meta.json");
        std::fs::write(&docs, DOCUMENTS).unwrap();
        std::fs::write(&meta, METADATA).unwrap();
        let config = ServiceConfig { database: dir.path().join("replay.sqlite"), ..Default::default() };

        assert_eq!(import_map(&config, &"simulation.map_a".parse().unwrap(), &docs).unwrap(), 3);
        assert_eq!(import_metadata(&config, &meta).unwrap(), 1);

        let store = SqliteStore::open(&config.database, &config.meta_table).unwrap();
        assert_eq!(store.roads(&"simulation.map_a".parse().unwrap()).unwrap().len(), 1);

        let svc = ReplayServiceBuilder::open_sqlite(&config).unwrap().build();
        assert_eq!(svc.road_lanes("sim1").unwrap().features.len(), 1);
    }

    #[test]
    fn bad_metadata_row_imports_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let meta = dir.path().join("meta.json");
        let mut rows: Vec<serde_json::Value> = serde_json::from_str(METADATA).unwrap();
        let mut inverted = rows[0].clone();
        inverted["name"] = "sim2".into();
        inverted["min_lng"] = 117.0.into();
        rows.push(inverted);
        std::fs::write(&meta, serde_json::to_string(&rows).unwrap()).unwrap();
        let config = ServiceConfig { database: dir.path().join("replay.sqlite"), ..Default::default() };

        let err = import_metadata(&config, &meta).unwrap_err();
        assert!(format!("{err:#}").contains("sim2"), "{err:#}");

        let store = SqliteStore::open(&config.database, &config.meta_table).unwrap();
        assert!(store.query(None).unwrap().is_empty());
    }
}
