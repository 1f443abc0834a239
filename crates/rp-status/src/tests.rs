//! Unit tests for rp-status.

// ── Congestion ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod congestion {
    use crate::{RoadStatus, aggregate_congestion};

    fn s(step: i64, level: i32) -> RoadStatus {
        RoadStatus { step, id: 1, level }
    }

    #[test]
    fn mean_and_histogram_per_step() {
        let stats = aggregate_congestion(&[s(1, 2), s(1, 2), s(1, 4), s(2, 6)]);
        assert_eq!(stats.len(), 2);

        assert_eq!(stats[0].step, 1);
        assert!((stats[0].mean_congestion_level - 8.0 / 3.0).abs() < 1e-12);
        assert_eq!(stats[0].congestion_level_counts, [2, 0, 1, 0]);

        assert_eq!(stats[1].step, 2);
        assert_eq!(stats[1].mean_congestion_level, 6.0);
        assert_eq!(stats[1].congestion_level_counts, [0, 0, 0, 0]);
    }

    #[test]
    fn unsorted_input_gives_sorted_output() {
        let samples = [s(9, 3), s(3, 5), s(9, 5), s(0, 0), s(3, 1)];
        let stats = aggregate_congestion(&samples);
        let steps: Vec<i64> = stats.iter().map(|x| x.step).collect();
        assert_eq!(steps, vec![0, 3, 9]);
        assert_eq!(stats[1].congestion_level_counts, [0, 0, 0, 1]);
        assert_eq!(stats[1].mean_congestion_level, 3.0);
        assert_eq!(stats[2].congestion_level_counts, [0, 1, 0, 1]);
    }

    #[test]
    fn negative_steps_sort_as_signed() {
        let stats = aggregate_congestion(&[s(2, 2), s(-5, 3), s(-1, 4)]);
        let steps: Vec<i64> = stats.iter().map(|x| x.step).collect();
        assert_eq!(steps, vec![-5, -1, 2]);
    }

    #[test]
    fn out_of_range_levels_only_affect_mean() {
        let stats = aggregate_congestion(&[s(0, 0), s(0, 1), s(0, 6), s(0, 7), s(0, -1)]);
        assert_eq!(stats[0].congestion_level_counts, [0; 4]);
        assert!((stats[0].mean_congestion_level - 13.0 / 5.0).abs() < 1e-12);
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert!(aggregate_congestion(&Vec::<RoadStatus>::new()).is_empty());
    }

    #[test]
    fn serialises_camel_case() {
        let stats = aggregate_congestion(&[s(1, 2)]);
        let v = serde_json::to_value(&stats[0]).unwrap();
        assert_eq!(v["step"], 1);
        assert_eq!(v["meanCongestionLevel"], 2.0);
        assert_eq!(v["congestionLevelCounts"], serde_json::json!([1, 0, 0, 0]));
    }
}

// ── Interval cache ────────────────────────────────────────────────────────────

#[cfg(test)]
mod cache {
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use crate::IntervalCache;

    #[test]
    fn hit_before_expiry_miss_after() {
        let cache = IntervalCache::new(Duration::from_secs(60));
        let t0 = Instant::now();
        cache.put_at("sim1", 5, t0);
        assert_eq!(cache.get_at("sim1", t0 + Duration::from_secs(59)), Some(5));
        assert_eq!(cache.get_at("sim1", t0 + Duration::from_secs(60)), None);
        // The expired entry was dropped, not kept around.
        assert_eq!(cache.get_at("sim1", t0), None);
    }

    #[test]
    fn entries_are_per_name() {
        let cache = IntervalCache::default();
        cache.put("sim1", 5);
        cache.put("sim2", 10);
        assert_eq!(cache.get("sim1"), Some(5));
        assert_eq!(cache.get("sim2"), Some(10));
        assert_eq!(cache.get("sim3"), None);
    }

    #[test]
    fn put_replaces_and_sweeps() {
        let cache = IntervalCache::new(Duration::from_secs(10));
        let t0 = Instant::now();
        cache.put_at("old", 1, t0);
        cache.put_at("sim1", 2, t0);
        cache.put_at("sim1", 3, t0 + Duration::from_secs(5));
        assert_eq!(cache.len(), 2);
        cache.put_at("new", 4, t0 + Duration::from_secs(11));
        // "old" expired at t0+10 and is swept; "sim1" lives until t0+15.
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get_at("sim1", t0 + Duration::from_secs(11)), Some(3));
    }

    #[test]
    fn concurrent_use() {
        let cache = Arc::new(IntervalCache::default());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    let name = format!("sim{i}");
                    for _ in 0..100 {
                        cache.put(&name, i);
                        assert_eq!(cache.get(&name), Some(i));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(cache.len(), 8);
    }
}

// ── Records ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod records {
    use serde_json::json;

    use crate::{StepRecord, TrafficLight, Vehicle};

    fn vehicle() -> Vehicle {
        Vehicle {
            step:           3,
            id:             42,
            lane_id:        7,
            direction:      1.23456,
            lng:            116.123456789,
            lat:            39.987654321,
            model:          "car".into(),
            z:              0.0,
            pitch:          0.0,
            v:              12.5,
            num_passengers: 1,
        }
    }

    #[test]
    fn vehicle_rounding() {
        let v = vehicle().rounded();
        assert_eq!(v.direction, 1.23);
        assert_eq!(v.lng, 116.12345679);
        assert_eq!(v.lat, 39.98765432);
        assert_eq!(v.v, 12.5);
    }

    #[test]
    fn vehicle_wire_names() {
        let v = serde_json::to_value(vehicle()).unwrap();
        assert_eq!(v["laneId"], 7);
        assert_eq!(v["numPassengers"], 1);
        assert!(v.get("lane_id").is_none());
    }

    #[test]
    fn relabel_keeps_payload() {
        let v = vehicle();
        let moved = v.with_step(10);
        assert_eq!(moved.step, 10);
        assert_eq!(Vehicle { step: 3, ..moved }, v);
    }

    #[test]
    fn traffic_light_hides_position() {
        let t = TrafficLight { step: 0, id: 5, state: 2, lng: 116.0, lat: 39.0 };
        assert_eq!(serde_json::to_value(&t).unwrap(), json!({ "step": 0, "id": 5, "state": 2 }));
        assert_eq!(t.position().unwrap().lng, 116.0);
    }
}

// ── Stepped queries ───────────────────────────────────────────────────────────

#[cfg(test)]
mod step {
    use std::io::Cursor;

    use crate::{
        LonLatFilter, MemoryStepSource, Pedestrian, RoadStatus, StatusError, StepQuery,
        StepSource,
    };

    fn road_table() -> MemoryStepSource<RoadStatus> {
        let mut src = MemoryStepSource::new();
        let csv = "step,id,level\n0,7,2\n0,8,4\n5,7,3\n10,7,5\n";
        assert_eq!(src.load_csv_reader("sim_s_road", Cursor::new(csv)).unwrap(), 4);
        src
    }

    #[test]
    fn requested_steps_are_strided() {
        let q = StepQuery::new(3, 12, 4);
        assert_eq!(q.requested_steps().collect::<Vec<_>>(), vec![3, 7, 11]);
    }

    #[test]
    fn recorded_step_floors_towards_offset() {
        let q = StepQuery { offset: 2, ..StepQuery::new(0, 10, 1).recorded_every(5) };
        assert_eq!(q.recorded_step(2), 2);
        assert_eq!(q.recorded_step(6), 2);
        assert_eq!(q.recorded_step(7), 7);
        assert_eq!(q.recorded_step(1), -3);
    }

    #[test]
    fn rows_relabelled_to_requested_step() {
        let src = road_table();
        let q = StepQuery::new(0, 12, 2).recorded_every(5);
        let rows = src.query_with_step("sim_s_road", &q).unwrap();
        let got: Vec<(i64, i32, i32)> = rows.iter().map(|r| (r.step, r.id, r.level)).collect();
        assert_eq!(
            got,
            vec![
                (0, 7, 2), (0, 8, 4),
                (2, 7, 2), (2, 8, 4),
                (4, 7, 2), (4, 8, 4),
                (6, 7, 3),
                (8, 7, 3),
                (10, 7, 5),
            ]
        );
    }

    #[test]
    fn missing_table_is_empty() {
        let src = road_table();
        let rows = src.query_with_step("other_s_road", &StepQuery::new(0, 10, 1)).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn invalid_range_rejected() {
        let src = road_table();
        for q in [StepQuery::new(5, 5, 1), StepQuery::new(0, 10, 0), StepQuery::new(0, 10, 1).recorded_every(0)] {
            assert!(matches!(src.query_with_step("sim_s_road", &q), Err(StatusError::InvalidRange(_))));
        }
    }

    #[test]
    fn offline_source_fails() {
        let mut src = road_table();
        src.set_offline("down");
        assert!(matches!(
            src.query_with_step("sim_s_road", &StepQuery::new(0, 10, 1)),
            Err(StatusError::Query(_))
        ));
    }

    #[test]
    fn area_filter_is_half_open() {
        let person = |id: i32, lng: f64, lat: f64| Pedestrian {
            step: 0, id, parent_id: 1, direction: 0.0, lng, lat, z: 0.0, v: 1.0, model: "p".into(),
        };
        let mut src = MemoryStepSource::new();
        src.extend("sim_s_people", [
            person(1, 116.0, 39.0),
            person(2, 116.5, 39.5),
            person(3, 117.0, 39.5),
            person(4, 116.5, 40.0),
        ]);
        let q = StepQuery::new(0, 1, 1).within(LonLatFilter::new(116.0, 39.0, 117.0, 40.0));
        let ids: Vec<i32> = src.query_with_step("sim_s_people", &q).unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn malformed_csv_is_parse_error() {
        let mut src: MemoryStepSource<RoadStatus> = MemoryStepSource::new();
        let err = src.load_csv_reader("t", Cursor::new("step,id,level\nx,1,2\n")).unwrap_err();
        assert!(matches!(err, StatusError::Parse(_)));
        assert_eq!(src.table_len("t"), 0);
    }
}
