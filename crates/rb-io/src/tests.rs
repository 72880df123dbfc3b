//! Unit tests for rb-io.

#[cfg(test)]
mod layout {
    use std::io::Cursor;

    use rb_network::{DistanceMatrix, NetworkError};
    use crate::{DataError, load_network_csv, load_network_reader};

    const POINTS: &str = "name,x,y\nA,0,0\nB,3,4\nC,3,0\n";

    #[test]
    fn points_and_edges_build_network() {
        let edges = "from,to\nA,B\nB,C\n";
        let net = load_network_reader(Cursor::new(POINTS), Cursor::new(edges)).unwrap();
        assert_eq!(net.node_count(), 3);

        let m = DistanceMatrix::all_pairs_shortest(&net);
        assert_eq!(m.distance_between("A", "B"), Some(5.0));
        // No direct A-C link: via B.
        assert_eq!(m.distance_between("A", "C"), Some(9.0));
    }

    #[test]
    fn whitespace_is_trimmed() {
        let points = "name, x, y\n A , 0, 0\nB ,3,4\n";
        let edges = "from,to\n A , B \n";
        let net = load_network_reader(Cursor::new(points), Cursor::new(edges)).unwrap();
        assert!(net.node("A").is_some());
        assert_eq!(net.out_degree(net.node("B").unwrap()), 1);
    }

    #[test]
    fn edge_to_unknown_station() {
        let edges = "from,to\nA,Z\n";
        let err = load_network_reader(Cursor::new(POINTS), Cursor::new(edges)).unwrap_err();
        assert!(matches!(err, DataError::Network(NetworkError::UnknownStation(ref s)) if s == "Z"));
    }

    #[test]
    fn duplicate_point() {
        let points = "name,x,y\nA,0,0\nA,1,1\n";
        let err = load_network_reader(Cursor::new(points), Cursor::new("from,to\n")).unwrap_err();
        assert!(matches!(err, DataError::Network(NetworkError::DuplicateStation(_))));
    }

    #[test]
    fn bad_coordinate() {
        let points = "name,x,y\nA,zero,0\n";
        let err = load_network_reader(Cursor::new(points), Cursor::new("from,to\n")).unwrap_err();
        assert!(matches!(err, DataError::Csv(_)));
    }

    #[test]
    fn from_files() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let (p, e) = (dir.path().join("points.csv"), dir.path().join("edges.csv"));
        std::fs::write(&p, POINTS).unwrap();
        std::fs::write(&e, "from,to\nA,C\n").unwrap();
        let net = load_network_csv(&p, &e).unwrap();
        assert_eq!(net.node_count(), 3);

        let missing = dir.path().join("nope.csv");
        assert!(matches!(load_network_csv(&missing, &e), Err(DataError::Io(_))));
    }
}

#[cfg(test)]
mod inventory {
    use std::io::Cursor;

    use rb_core::CoreError;
    use rb_dispatch::DispatchError;
    use crate::{DataError, load_inventory_reader};

    #[test]
    fn invalid_and_zero_counts_are_skipped() {
        let csv = "location,count\nA,7\nB,-3\nC,4.0\nD,0\nE,abc\nF,3.5\nG,\nH,-2.0\n";
        let inv = load_inventory_reader(Cursor::new(csv)).unwrap();
        let rows: Vec<_> = inv.iter().map(|(_, n, c)| (n.to_owned(), c)).collect();
        assert_eq!(
            rows,
            [("A".to_owned(), 7), ("B".to_owned(), -3), ("C".to_owned(), 4), ("H".to_owned(), -2)]
        );
        assert_eq!(inv.total(), 6);
    }

    #[test]
    fn duplicate_location() {
        let csv = "location,count\nA,1\nA,2\n";
        let err = load_inventory_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(
            err,
            DataError::Dispatch(DispatchError::Core(CoreError::DuplicateStation(_)))
        ));
    }

    #[test]
    fn header_only_gives_empty_inventory() {
        let inv = load_inventory_reader(Cursor::new("location,count\n")).unwrap();
        assert!(inv.is_empty());
    }
}

#[cfg(test)]
mod matrix {
    use std::io::Cursor;

    use rb_network::{DistanceMatrix, NetworkError};
    use crate::{DataError, read_matrix_csv, read_matrix_reader, write_matrix_csv, write_matrix_writer};

    fn sample() -> DistanceMatrix {
        let inf = f64::INFINITY;
        DistanceMatrix::from_rows(
            vec!["A".into(), "B".into(), "C".into()],
            vec![vec![0.0, 10.0, inf], vec![10.0, 0.0, 15.5], vec![inf, 15.5, 0.0]],
        )
        .unwrap()
    }

    #[test]
    fn written_layout() {
        let mut out = Vec::new();
        write_matrix_writer(&sample(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, ",A,B,C\nA,0.00,10.00,inf\nB,10.00,0.00,15.50\nC,inf,15.50,0.00\n");
    }

    #[test]
    fn read_back_from_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("matrix.csv");
        write_matrix_csv(&sample(), &path).unwrap();

        let m = read_matrix_csv(&path).unwrap();
        assert_eq!(m.names(), ["A", "B", "C"]);
        assert_eq!(m.distance_between("B", "C"), Some(15.5));
        assert_eq!(m.distance_between("A", "C"), None);
        assert!(m.is_symmetric(0.0));
    }

    #[test]
    fn rounding_to_two_decimals() {
        let m = DistanceMatrix::from_rows(
            vec!["A".into(), "B".into()],
            vec![vec![0.0, 1.0 / 3.0], vec![2.0 / 3.0, 0.0]],
        )
        .unwrap();
        let mut out = Vec::new();
        write_matrix_writer(&m, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("A,0.00,0.33\n"));
        assert!(text.contains("B,0.67,0.00\n"));
    }

    #[test]
    fn empty_cell_and_inf_are_unreachable() {
        let csv = ",A,B\nA,0,\nB,INF,0\n";
        let m = read_matrix_reader(Cursor::new(csv)).unwrap();
        assert_eq!(m.distance_between("A", "B"), None);
        assert_eq!(m.distance_between("B", "A"), None);
        assert_eq!(m.distance_between("A", "A"), Some(0.0));
    }

    #[test]
    fn mislabelled_row() {
        let csv = ",A,B\nB,0,1\nA,1,0\n";
        assert!(matches!(read_matrix_reader(Cursor::new(csv)), Err(DataError::Parse(_))));
    }

    #[test]
    fn bad_value() {
        let csv = ",A,B\nA,0,x\nB,1,0\n";
        assert!(matches!(read_matrix_reader(Cursor::new(csv)), Err(DataError::Parse(_))));
    }

    #[test]
    fn negative_value() {
        let csv = ",A,B\nA,0,-1\nB,1,0\n";
        assert!(matches!(
            read_matrix_reader(Cursor::new(csv)),
            Err(DataError::Network(NetworkError::InvalidDistance { .. }))
        ));
    }

    #[test]
    fn missing_row() {
        let csv = ",A,B\nA,0,1\n";
        assert!(matches!(
            read_matrix_reader(Cursor::new(csv)),
            Err(DataError::Network(NetworkError::RowCount { stations: 2, rows: 1 }))
        ));
    }
}

#[cfg(test)]
mod records {
    use std::cell::{Cell, RefCell};
    use std::io::{self, Write};
    use std::rc::Rc;

    use rb_core::DispatchConfig;
    use rb_dispatch::{DispatchBuilder, DispatchEngine, Dispatcher, Inventory, NoopObserver};
    use rb_network::DistanceMatrix;
    use crate::{CsvDispatchObserver, RecordWriter, write_records_csv};

    fn triangle() -> (DistanceMatrix, Inventory) {
        let m = DistanceMatrix::from_rows(
            vec!["A".into(), "B".into(), "C".into()],
            vec![vec![0.0, 10.0, 20.0], vec![10.0, 0.0, 15.0], vec![20.0, 15.0, 0.0]],
        )
        .unwrap();
        let inv = Inventory::from_counts([("A", 10), ("B", -4), ("C", -6)]).unwrap();
        (m, inv)
    }

    #[test]
    fn observer_streams_rows() {
        let (m, mut inv) = triangle();
        let mut config = DispatchConfig::single_vehicle().with_max_steps(1);
        config.scoring.speed = 1.0;
        let engine = DispatchEngine::new(&m, config).unwrap().with_start("A");

        let mut obs = CsvDispatchObserver::new(RecordWriter::new(Vec::new()).unwrap());
        engine.run(&mut inv, &mut obs).unwrap();
        assert!(obs.take_error().is_none());
        assert_eq!(obs.rows_written(), 1);

        let bytes = obs.into_writer().into_inner().unwrap();
        let mut rdr = csv::Reader::from_reader(bytes.as_slice());
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(
            headers,
            [
                "vehicle_id", "step", "from", "to", "picked_up", "dropped_off", "load_after",
                "score", "travel_time", "from_inventory", "to_inventory",
            ]
        );
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        let r = &rows[0];
        assert_eq!(&r[0], "0");
        assert_eq!(&r[1], "1");
        assert_eq!(&r[2], "A");
        assert_eq!(&r[3], "B");
        assert_eq!(&r[4], "10"); // picked up at A
        assert_eq!(&r[5], "4");  // dropped at B
        assert_eq!(&r[6], "6");
        let score: f64 = r[7].parse().unwrap();
        assert!((score - (0.02 + 0.112 - 64.0)).abs() < 1e-9);
        assert_eq!(&r[8], "10");
        assert_eq!(&r[9], "0");
        assert_eq!(&r[10], "0");
    }

    #[test]
    fn finished_run_to_file() {
        let (m, mut inv) = triangle();
        let engine = DispatchBuilder::new(&m).vehicles(2).build().unwrap();
        let run = engine.run(&mut inv, &mut NoopObserver).unwrap();

        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("records.csv");
        write_records_csv(&run, &inv, &path).unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), run.records.len());
        for (row, rec) in rows.iter().zip(&run.records) {
            assert_eq!(row[0].parse::<u32>().unwrap(), rec.vehicle.0);
            assert_eq!(row[1].parse::<u32>().unwrap(), rec.step);
        }
    }

    struct BrokenSink;

    impl Write for BrokenSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::other("disk full"))
        }
    }

    #[test]
    fn write_error_is_stored() {
        let (m, mut inv) = triangle();
        let engine = DispatchEngine::new(&m, DispatchConfig::single_vehicle()).unwrap();
        let mut obs = CsvDispatchObserver::new(RecordWriter::new(BrokenSink).unwrap());
        // The run itself succeeds; the failure surfaces afterwards.
        engine.run(&mut inv, &mut obs).unwrap();
        assert!(obs.take_error().is_some());
        assert!(obs.take_error().is_none());
    }

    /// Rejects every write while `down` is set.
    struct FlakySink {
        down: Rc<Cell<bool>>,
        out:  Rc<RefCell<Vec<u8>>>,
    }

    impl Write for FlakySink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.down.get() {
                return Err(io::Error::other("device busy"));
            }
            self.out.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn finish_retries_after_failed_flush() {
        let down = Rc::new(Cell::new(true));
        let out = Rc::new(RefCell::new(Vec::new()));
        let sink = FlakySink { down: Rc::clone(&down), out: Rc::clone(&out) };
        let mut writer = RecordWriter::new(sink).unwrap();

        assert!(writer.finish().is_err());
        assert!(out.borrow().is_empty());

        down.set(false);
        writer.finish().unwrap();
        assert!(out.borrow().starts_with(b"vehicle_id,step,from,to,"));

        // Already flushed: nothing more to write.
        let len = out.borrow().len();
        writer.finish().unwrap();
        assert_eq!(out.borrow().len(), len);
    }
}

#[cfg(test)]
mod config {
    use rb_core::{CoreError, DispatchConfig, ImbalanceBasis, ScoreWeights};
    use rb_dispatch::{DispatchError, Dispatcher};
    use rb_network::DistanceMatrix;
    use crate::{DataError, RunConfig};

    fn matrix() -> DistanceMatrix {
        DistanceMatrix::from_rows(vec!["A".into(), "B".into()], vec![vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap()
    }

    #[test]
    fn empty_file_is_single_vehicle_preset() {
        let rc = RunConfig::from_toml_str("").unwrap();
        assert_eq!(rc, RunConfig::default());
        assert_eq!(rc.vehicle_count(), 1);
        assert_eq!(rc.dispatch_config().unwrap(), DispatchConfig::single_vehicle());
    }

    #[test]
    fn fleet_overrides() {
        let rc = RunConfig::from_toml_str(
            "vehicles = 3\ncapacity = 15\nbasis = \"station_difference\"\n\n[weights]\na = 0.5\n",
        )
        .unwrap();
        let c = rc.dispatch_config().unwrap();
        assert_eq!(c.capacity, 15);
        assert_eq!(c.max_steps, 100);
        assert_eq!(c.scoring.basis, ImbalanceBasis::StationDifference);
        assert_eq!(c.scoring.weights, ScoreWeights::new(0.5, 0.2, 0.2));

        let m = matrix();
        let engine = rc.builder(&m).unwrap().build().unwrap();
        assert_eq!(engine.vehicle_count(), 3);
        assert_eq!(engine.config().capacity, 15);
    }

    #[test]
    fn unknown_key_rejected() {
        assert!(matches!(RunConfig::from_toml_str("vehicels = 2\n"), Err(DataError::Toml(_))));
    }

    #[test]
    fn invalid_value_rejected() {
        let rc = RunConfig::from_toml_str("speed = 0.0\n").unwrap();
        assert!(matches!(rc.dispatch_config(), Err(DataError::Core(CoreError::Config(_)))));

        let rc = RunConfig::from_toml_str("capacity = 5\ninitial_load = 6\n").unwrap();
        assert!(matches!(rc.dispatch_config(), Err(DataError::Core(CoreError::Config(_)))));
    }

    #[test]
    fn start_station_with_fleet() {
        let rc = RunConfig::from_toml_str("vehicles = 2\nstart_station = \"A\"\n").unwrap();
        let m = matrix();
        let result = rc.builder(&m).unwrap().build();
        assert!(matches!(result, Err(DispatchError::StartStationForFleet)));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("run.toml");
        std::fs::write(&path, "max_steps = 4\nstart_station = \"B\"\n").unwrap();
        let rc = RunConfig::load(&path).unwrap();
        assert_eq!(rc.max_steps, Some(4));
        assert_eq!(rc.start_station.as_deref(), Some("B"));
        assert_eq!(rc.dispatch_config().unwrap().max_steps, 4);
    }
}
