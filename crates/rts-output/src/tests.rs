//! Integration tests for rts-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::{CsvWriter, SNAPSHOT_HEADER, SUMMARY_HEADER};
    use crate::row::{AgentSnapshotRow, TickSummaryRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn snap_row(agent_id: u32, tick: u64) -> AgentSnapshotRow {
        AgentSnapshotRow {
            agent_id,
            unit_id:        agent_id + 100,
            owner:          0,
            tick,
            x:              1.5,
            z:              -2.0,
            health:         0.75,
            current_action: "attack".into(),
            queued_actions: 2,
        }
    }

    fn summary_row(tick: u64) -> TickSummaryRow {
        TickSummaryRow {
            tick,
            elapsed_ms:  tick * 100,
            updated:     4,
            completed:   1,
            evaluated:   2,
            switched:    1,
            reaped:      0,
            live_agents: 4,
        }
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("agent_snapshots.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, SNAPSHOT_HEADER);

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, SUMMARY_HEADER);
    }

    #[test]
    fn csv_snapshot_fields() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_agent_rows(&[snap_row(0, 5), snap_row(1, 5)]).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("agent_snapshots.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[1][0], "1");      // agent_id
        assert_eq!(&rows[1][1], "101");    // unit_id
        assert_eq!(&rows[0][4], "1.500");  // x
        assert_eq!(&rows[0][6], "0.750");  // health
        assert_eq!(&rows[0][7], "attack");
        assert_eq!(&rows[0][8], "2");
    }

    #[test]
    fn csv_tick_summary_fields() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_row(&summary_row(3)).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "3");
        assert_eq!(&rows[0][1], "300");
        assert_eq!(&rows[0][7], "4");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tmp();
        assert!(CsvWriter::new(&dir.path().join("nope")).is_err());
    }
}

#[cfg(test)]
mod observer_tests {
    use rts_agent::ActionRequest;
    use rts_core::{PlayerId, Point, SimConfig, Tick};
    use rts_sim::{AiConfig, Cadence, SceneBuilder};
    use rts_world::Prefab;

    use crate::{CsvWriter, SimOutputObserver, snapshot_rows};

    fn config() -> SimConfig {
        SimConfig {
            tick_duration_ms:      100,
            total_ticks:           6,
            seed:                  1,
            output_interval_ticks: 2,
        }
    }

    #[test]
    fn snapshot_rows_reflect_agents() {
        let mut scene = SceneBuilder::new(config())
            .ai(AiConfig { cadence: Cadence::Manual, ..AiConfig::default() })
            .prefab(Prefab::unit("soldier", 100, 4.0))
            .build()
            .unwrap();
        let a = scene.spawn_unit("soldier", Point::ground(1.0, 2.0), PlayerId(3)).unwrap();
        scene.spawn_unit("soldier", Point::ORIGIN, PlayerId(0)).unwrap();
        scene.add_action(a, &ActionRequest::new("move").at(Point::ground(9.0, 2.0))).unwrap();
        scene
            .add_action(a, &ActionRequest::new("move").at(Point::ground(9.0, 9.0)).queued(true))
            .unwrap();

        let rows = snapshot_rows(Tick(0), &scene.agents, &scene.world);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].owner, 3);
        assert_eq!((rows[0].x, rows[0].z), (1.0, 2.0));
        assert_eq!(rows[0].health, 1.0);
        assert_eq!(rows[0].current_action, "move");
        assert_eq!(rows[0].queued_actions, 1);
        assert_eq!(rows[1].current_action, "");
    }

    #[test]
    fn integration_csv() {
        let config = config();
        let mut scene = SceneBuilder::new(config.clone())
            .prefab(Prefab::unit("soldier", 100, 4.0))
            .build()
            .unwrap();
        for i in 0..3 {
            scene.spawn_unit("soldier", Point::ground(i as f32 * 20.0, 0.0), PlayerId(0)).unwrap();
        }

        let dir = tempfile::tempdir().unwrap();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer, &config);
        scene.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");

        // output_interval = 2 → snapshots at ticks 0, 2, 4 (3 ticks × 3 agents).
        let mut rdr = csv::Reader::from_path(dir.path().join("agent_snapshots.csv")).unwrap();
        assert_eq!(rdr.records().count(), 9);

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 6);
        assert_eq!(&rows[5][1], "500");
        assert_eq!(&rows[5][7], "3");
    }
}

// ── SQLite tests ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;

    use crate::row::{AgentSnapshotRow, TickSummaryRow};
    use crate::sqlite::SqliteWriter;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn row(agent_id: u32, current_action: &str) -> AgentSnapshotRow {
        AgentSnapshotRow {
            agent_id,
            unit_id:        agent_id,
            owner:          1,
            tick:           4,
            x:              0.5,
            z:              0.25,
            health:         -1.0,
            current_action: current_action.into(),
            queued_actions: 0,
        }
    }

    #[test]
    fn sqlite_snapshot_rows() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_agent_rows(&[row(0, "collect"), row(1, "")]).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM agent_snapshots", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 2);
        let action: String = conn
            .query_row("SELECT current_action FROM agent_snapshots WHERE agent_id = 0", [], |r| r.get(0))
            .unwrap();
        assert_eq!(action, "collect");
    }

    #[test]
    fn sqlite_tick_summary_primary_key() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        let summary = TickSummaryRow {
            tick: 7, elapsed_ms: 700, updated: 1, completed: 0, evaluated: 1, switched: 0, reaped: 0, live_agents: 1,
        };
        w.write_tick_row(&summary).unwrap();
        assert!(w.write_tick_row(&summary).is_err(), "duplicate tick must be rejected");
        w.finish().unwrap();
        w.finish().unwrap();
    }
}
