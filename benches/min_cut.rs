use criterion::{criterion_group, criterion_main, Criterion};
use karger_mincut::Graph;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_min_cut(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let base = Graph::generate(64, false, &mut rng).unwrap();
    let path = std::env::temp_dir().join("karger_mincut_bench_graph.txt");
    base.save(&path).unwrap();

    let mut trial_rng = StdRng::seed_from_u64(11);
    c.bench_function("min_cut_64_unweighted", move |b| {
        b.iter(|| {
            let mut graph = Graph::load(&path, &base).unwrap();
            graph.min_cut(&mut trial_rng).unwrap()
        })
    });
}

fn bench_min_cut_weighted(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(17);
    let base = Graph::generate(64, true, &mut rng).unwrap();
    let path = std::env::temp_dir().join("karger_mincut_bench_graph_weighted.txt");
    base.save(&path).unwrap();

    let mut trial_rng = StdRng::seed_from_u64(19);
    c.bench_function("min_cut_64_weighted", move |b| {
        b.iter(|| {
            let mut graph = Graph::load(&path, &base).unwrap();
            graph.min_cut(&mut trial_rng).unwrap()
        })
    });
}

criterion_group!(benches, bench_min_cut, bench_min_cut_weighted);
criterion_main!(benches);
