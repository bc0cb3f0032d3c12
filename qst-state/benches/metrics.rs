use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use qst_core::hermitian_sqrt_batch;
use qst_core::DensityMatrix;
use qst_state::{
    DensityMatrixReconstructor, PauliMeasurementSimulator, QuantumMetrics, RandomStateSampler,
    ReconstructionParameters,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_pairs(count: usize, seed: u64) -> Vec<(DensityMatrix, DensityMatrix)> {
    let sampler = RandomStateSampler::new();
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| (sampler.sample(&mut rng).unwrap(), sampler.sample(&mut rng).unwrap()))
        .collect()
}

fn bench_fidelity(c: &mut Criterion) {
    let mut group = c.benchmark_group("fidelity");
    let metrics = QuantumMetrics::new();

    for batch in [1usize, 64, 1024].iter() {
        group.throughput(Throughput::Elements(*batch as u64));
        group.bench_with_input(BenchmarkId::from_parameter(batch), batch, |b, &batch| {
            let pairs = random_pairs(batch, 42);
            b.iter(|| metrics.fidelity_batch(black_box(&pairs)).unwrap());
        });
    }

    group.finish();
}

fn bench_trace_distance(c: &mut Criterion) {
    let metrics = QuantumMetrics::new();
    let pairs = random_pairs(1024, 7);

    c.bench_function("trace_distance_1024", |b| {
        b.iter(|| metrics.trace_distance_batch(black_box(&pairs)))
    });
}

fn bench_sqrt(c: &mut Criterion) {
    let pairs = random_pairs(1024, 9);
    let matrices: Vec<_> = pairs.iter().map(|(rho, _)| *rho.matrix()).collect();

    c.bench_function("hermitian_sqrt_batch_1024", |b| {
        b.iter(|| hermitian_sqrt_batch(black_box(&matrices)))
    });
}

fn bench_reconstruction(c: &mut Criterion) {
    let reconstructor = DensityMatrixReconstructor::new();
    let mut rng = StdRng::seed_from_u64(123);
    let batch: Vec<ReconstructionParameters> = (0..1024)
        .map(|_| {
            ReconstructionParameters::new(
                rng.gen_range(-5.0..5.0),
                rng.gen_range(-5.0..5.0),
                rng.gen_range(-5.0..5.0),
                rng.gen_range(-5.0..5.0),
            )
        })
        .collect();

    c.bench_function("reconstruct_batch_1024", |b| {
        b.iter(|| reconstructor.reconstruct_batch(black_box(&batch)).unwrap())
    });
}

fn bench_measurement(c: &mut Criterion) {
    let simulator = PauliMeasurementSimulator::new();
    let rho = RandomStateSampler::new()
        .sample(&mut StdRng::seed_from_u64(5))
        .unwrap();

    let mut group = c.benchmark_group("measure_random_bases");
    for shots in [50usize, 1000].iter() {
        group.throughput(Throughput::Elements(*shots as u64));
        group.bench_with_input(BenchmarkId::from_parameter(shots), shots, |b, &shots| {
            let mut rng = StdRng::seed_from_u64(11);
            b.iter(|| simulator.measure_random_bases(black_box(&rho), shots, &mut rng).unwrap());
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_fidelity,
    bench_trace_distance,
    bench_sqrt,
    bench_reconstruction,
    bench_measurement
);
criterion_main!(benches);
