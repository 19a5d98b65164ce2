//! Criterion benchmarks for knotdrift_core integration and sweeps
//!
//! Run with: cargo bench -p knotdrift_core

use std::f64::consts::PI;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use knotdrift_core::drift::{TailWindow, estimate_drift};
use knotdrift_core::integrator::{IntegratorSettings, integrate};
use knotdrift_core::model::{
    BraidingDrive, ParameterSet, REFERENCE_BASE_FREQUENCY, SweepTarget, TimeSpan,
};
use knotdrift_core::sweep::{AxisSpec, SweepRequest, sweep};

fn slow_params() -> ParameterSet {
    ParameterSet::new(0.85, 2.0, 1.0, PI / 4.0)
}

fn bench_reference_point(c: &mut Criterion) {
    let drive = BraidingDrive::default();
    let params = ParameterSet::default();
    let span = TimeSpan::linspace(0.0, 50.0, 2000).unwrap();
    let settings = IntegratorSettings::default();

    c.bench_function("reference_point_integration", |b| {
        b.iter(|| integrate(black_box(&drive), black_box(&params), &span, &settings))
    });
}

fn bench_slow_rotor_tolerances(c: &mut Criterion) {
    let mut group = c.benchmark_group("slow_rotor_rtol");
    let drive = BraidingDrive::default();
    let params = slow_params();
    let span = TimeSpan::linspace(0.0, 60.0, 3000).unwrap();

    for rtol in [1e-6, 1e-8, 1e-10].iter() {
        let settings = IntegratorSettings::with_tolerances(*rtol, rtol * 1e-2);
        group.bench_with_input(BenchmarkId::new("rtol", rtol), rtol, |b, _| {
            b.iter(|| {
                let trajectory = integrate(&drive, black_box(&params), &span, &settings);
                estimate_drift(&trajectory, TailWindow::Fraction(0.5))
            })
        });
    }

    group.finish();
}

fn bench_small_sweep(c: &mut Criterion) {
    let drive = BraidingDrive::default();
    let request = SweepRequest {
        name: "bench".into(),
        axes: vec![
            AxisSpec::linear(0.2, 1.5, 6)
                .generate(SweepTarget::Coupling)
                .unwrap(),
            AxisSpec::linear(0.85, 1.15, 5)
                .generate(SweepTarget::ModulationScale)
                .unwrap(),
        ],
        fixed: ParameterSet {
            base_frequency: REFERENCE_BASE_FREQUENCY,
            ..ParameterSet::default()
        },
        time_span: TimeSpan::linspace(0.0, 50.0, 2000).unwrap(),
        settings: IntegratorSettings::with_tolerances(1e-8, 1e-6),
        window: TailWindow::Fraction(0.5),
    };

    c.bench_function("coupling_vs_modulation_6x5", |b| {
        b.iter(|| sweep(black_box(&drive), black_box(&request)))
    });
}

criterion_group!(
    benches,
    bench_reference_point,
    bench_slow_rotor_tolerances,
    bench_small_sweep,
);
criterion_main!(benches);
