use approx::assert_relative_eq;
use qst_core::{DensityMatrix, Measurement, MeasurementRecord, PauliBasis};
use qst_data::{
    Dataset, DatasetBuilder, DatasetConfig, DatasetError, Evaluator, LinearInversionPredictor,
    Predictor,
};
use qst_state::{DensityMatrixReconstructor, ReconstructionParameters};

fn build(config: DatasetConfig) -> Dataset {
    DatasetBuilder::new(config).unwrap().build().unwrap()
}

#[test]
fn generated_dataset_survives_json_round_trip() {
    let dataset = build(DatasetConfig::test().with_num_records(25).with_seed(2024));

    let mut buf = Vec::new();
    dataset.to_writer(&mut buf).unwrap();
    let loaded = Dataset::from_reader(buf.as_slice()).unwrap();

    assert_eq!(loaded.len(), 25);
    for (a, b) in dataset.iter().zip(loaded.iter()) {
        assert_eq!(a.measurements, b.measurements);
        assert!(qst_core::matrix::approx_eq(a.rho.matrix(), b.rho.matrix(), 1e-15));
    }
}

#[test]
fn dataset_file_round_trip() {
    let dataset = build(DatasetConfig::test().with_num_records(5).with_seed(1));
    let path = std::env::temp_dir().join(format!("qst-data-{}.json", std::process::id()));

    dataset.save(&path).unwrap();
    let loaded = Dataset::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(loaded.len(), dataset.len());
}

#[test]
fn missing_file_is_io_error() {
    let err = Dataset::load("/nonexistent/qst/dataset.json").unwrap_err();
    assert!(matches!(err, DatasetError::Io(_)));
}

#[test]
fn baseline_tracks_states_with_many_shots() {
    let dataset = build(
        DatasetConfig::test()
            .with_num_records(40)
            .with_shots(3000)
            .with_seed(11)
            .with_workers(4),
    );

    let report = Evaluator::new()
        .evaluate(&LinearInversionPredictor::new(), &dataset)
        .unwrap();

    assert_eq!(report.samples, 40);
    assert!(report.mean_fidelity > 0.95, "fidelity {}", report.mean_fidelity);
    assert!(report.mean_trace_distance < 0.2, "distance {}", report.mean_trace_distance);
}

#[test]
fn baseline_beats_maximally_mixed_guess() {
    let dataset = build(DatasetConfig::test().with_num_records(100).with_seed(5));
    let evaluator = Evaluator::new();

    let mixed = |_: &MeasurementRecord| ReconstructionParameters::new(0.0, 0.0, 0.0, 0.0);
    let mixed_report = evaluator.evaluate(&mixed, &dataset).unwrap();
    let baseline_report = evaluator
        .evaluate(&LinearInversionPredictor::new(), &dataset)
        .unwrap();

    // Any pure state against I/2
    assert_relative_eq!(mixed_report.mean_fidelity, 0.5, epsilon = 1e-6);
    assert!(baseline_report.mean_fidelity > mixed_report.mean_fidelity);

    let mixed_loss = evaluator.mean_loss(&mixed, &dataset).unwrap();
    assert_relative_eq!(mixed_loss, 0.5, epsilon = 1e-9);
}

#[test]
fn oracle_predictor_scores_perfectly() {
    // A predictor that reads the Z statistics of a |0> record and answers |0>
    struct ZeroOracle;

    impl Predictor for ZeroOracle {
        fn predict(&self, record: &MeasurementRecord) -> qst_data::Result<ReconstructionParameters> {
            assert_eq!(record.expectation(PauliBasis::Z), Some(1.0));
            Ok(ReconstructionParameters::from_density_matrix(&DensityMatrix::zero()))
        }
    }

    let dataset = build(
        DatasetConfig::test()
            .with_num_records(3)
            .with_seed(8)
            .with_shots(20),
    )
    .into_iter()
    .map(|mut record| {
        record.rho = DensityMatrix::zero();
        record.measurements = qst_state::PauliMeasurementSimulator::new()
            .measure_shots(&record.rho, PauliBasis::Z, 20, &mut rand::thread_rng())
            .unwrap()
            .into_iter()
            .map(|outcome| Measurement::new(PauliBasis::Z, outcome))
            .collect();
        record
    })
    .collect::<Dataset>();

    let report = Evaluator::new().evaluate(&ZeroOracle, &dataset).unwrap();
    assert_relative_eq!(report.mean_fidelity, 1.0, epsilon = 1e-9);
    assert!(report.mean_trace_distance < 1e-6);

    let rho = DensityMatrixReconstructor::new()
        .reconstruct(&ZeroOracle.predict(&dataset.records()[0].measurements).unwrap())
        .unwrap();
    assert_relative_eq!(rho.get(0, 0).re, 1.0, epsilon = 1e-12);
}

#[test]
fn predictor_failure_carries_record_index() {
    struct FailOnThird;

    impl Predictor for FailOnThird {
        fn predict(&self, record: &MeasurementRecord) -> qst_data::Result<ReconstructionParameters> {
            if record.len() == 7 {
                return Err(DatasetError::invalid_config("unsupported record"));
            }
            Ok(ReconstructionParameters::new(0.0, 0.0, 0.0, 0.0))
        }
    }

    let mut dataset = build(DatasetConfig::test().with_num_records(4).with_shots(10).with_seed(3));
    let seven = build(DatasetConfig::test().with_num_records(1).with_shots(7).with_seed(4));
    let mut records: Vec<_> = dataset.records().to_vec();
    records.insert(2, seven.records()[0].clone());
    dataset = records.into();

    let err = Evaluator::new().evaluate(&FailOnThird, &dataset).unwrap_err();
    assert!(matches!(err, DatasetError::Record { index: 2, .. }));
    assert!(err.to_string().starts_with("Record 2"));
}

#[test]
fn trait_objects_are_accepted() {
    let dataset = build(DatasetConfig::test().with_num_records(4).with_seed(12));
    let predictors: Vec<Box<dyn Predictor>> = vec![
        Box::new(LinearInversionPredictor::new()),
        Box::new(|_: &MeasurementRecord| ReconstructionParameters::new(1.0, 0.0, 0.0, -1.0)),
    ];

    let evaluator = Evaluator::new();
    for predictor in &predictors {
        let report = evaluator.evaluate(predictor.as_ref(), &dataset).unwrap();
        assert_eq!(report.samples, 4);
        assert!((0.0..=1.0).contains(&report.mean_fidelity));
    }
}
