//! # Robot State Formatting Benchmark
//!
//! States are formatted from inside the control loop so this needs to stay well under the
//! control period.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use robot_if::RobotState;

fn format_benchmark(c: &mut Criterion) {
    // ---- Build a representative state ----

    let mut state = RobotState::default();
    state.message_id = 1_234_567.0;
    state.q = [0.0012, -0.7853, 0.0004, -2.3562, 0.0001, 1.5708, 0.7853];
    state.q_d = state.q;
    state.q_start = state.q;
    state.tau_j = [0.12, -3.41, -0.53, 21.7, 0.84, 2.15, 0.04];
    state.o_t_ee_start = [
        1.0, 0.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.307, 0.0, 0.487, 1.0,
    ];
    state.elbow_start = [0.0, -1.0];
    state.o_f_ext_hat_k = [0.3, -1.2, 4.8, 0.01, -0.02, 0.003];

    // ---- Benchmarks ----

    c.bench_function("format_default_state", |b| {
        b.iter(|| black_box(RobotState::default()).to_string())
    });

    c.bench_function("format_populated_state", |b| {
        b.iter(|| black_box(state).to_string())
    });
}

criterion_group!(benches, format_benchmark);
criterion_main!(benches);
