use criterion::{black_box, criterion_group, criterion_main, Criterion};
use slaterbits::{enforce_spin_completeness, BitDeterminant};

fn reference(size: usize) -> BitDeterminant {
    let alfa: Vec<usize> = (0..size).step_by(2).collect();
    let beta: Vec<usize> = (0..size).step_by(3).collect();
    BitDeterminant::from_occupied(size, &alfa, &beta).unwrap()
}

fn bench_signs(c: &mut Criterion) {
    let mut group = c.benchmark_group("signs");
    let det = reference(100);

    group.bench_function("sign_a", |b| {
        b.iter(|| {
            for n in 0..100 {
                black_box(det.sign_a(n).unwrap());
            }
        })
    });

    group.bench_function("double_excitation_aa", |b| {
        b.iter(|| {
            let mut d = det;
            black_box(d.double_excitation_aa(0, 98, 1, 77).unwrap())
        })
    });

    group.bench_function("spin2", |b| {
        let mut other = det;
        other.set_alfa_bit(2, false).unwrap();
        other.set_beta_bit(2, true).unwrap();
        other.set_beta_bit(3, false).unwrap();
        other.set_alfa_bit(3, true).unwrap();
        b.iter(|| black_box(det.spin2(&other).unwrap()))
    });
}

fn bench_completion(c: &mut Criterion) {
    let mut group = c.benchmark_group("completion");
    // Eight open orbitals, four alpha: C(8, 4) = 70 labelings.
    let seed = BitDeterminant::from_occupied(12, &[0, 1, 2, 3, 8, 9], &[0, 1, 4, 5, 6, 7]).unwrap();

    group.bench_function("enforce_spin_completeness", |b| {
        b.iter(|| {
            let mut space = vec![seed];
            black_box(enforce_spin_completeness(&mut space, 12).unwrap())
        })
    });
}

criterion_group!(benches, bench_signs, bench_completion);
criterion_main!(benches);
