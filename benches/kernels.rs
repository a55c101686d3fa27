use criterion::{black_box, criterion_group, criterion_main, Criterion};

use ccbench::afforest::compute_afforest;
use ccbench::bfs::compute_bfs;
use ccbench::generator::Generator;
use ccbench::lp::compute_lp_sequential;
use ccbench::lp_pool::compute_lp_parallel_pool;
use ccbench::lp_rayon::compute_lp_parallel_loop;

fn bench_kernels(c: &mut Criterion) {
    let graph = Generator::new(14, 8).build_graph().expect("generate graph");
    let mut labels = vec![0; graph.num_nodes()];

    let mut group = c.benchmark_group("CC");
    group.sample_size(10);

    group.bench_function("bfs", |b| {
        b.iter(|| compute_bfs(&graph, black_box(&mut labels)))
    });
    group.bench_function("lp_seq", |b| {
        b.iter(|| compute_lp_sequential(&graph, black_box(&mut labels)))
    });
    group.bench_function("lp_rayon_1024", |b| {
        b.iter(|| compute_lp_parallel_loop(&graph, black_box(&mut labels), 1024))
    });
    group.bench_function("lp_pool_4_static", |b| {
        b.iter(|| compute_lp_parallel_pool(&graph, black_box(&mut labels), 4, 1))
    });
    group.bench_function("lp_pool_4_dynamic_1024", |b| {
        b.iter(|| compute_lp_parallel_pool(&graph, black_box(&mut labels), 4, 1024))
    });
    group.bench_function("afforest_4", |b| {
        b.iter(|| compute_afforest(&graph, black_box(&mut labels), 4, None))
    });

    group.finish();
}

criterion_group!(benches, bench_kernels);
criterion_main!(benches);
