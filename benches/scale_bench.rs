use criterion::{Criterion, black_box, criterion_group, criterion_main};
use modus::{Mode, PitchClass, Scale};

fn bench_build_all_scales(c: &mut Criterion) {
    c.bench_function("build_all_scales", |b| {
        b.iter(|| {
            for root in PitchClass::ALL {
                for mode in Mode::ALL {
                    black_box(Scale::from_root(black_box(root), mode, 4));
                }
            }
        });
    });
}

criterion_group!(benches, bench_build_all_scales);
criterion_main!(benches);
