use criterion::{black_box, criterion_group, criterion_main, Criterion};
use plinth::{dijkstra, AdjacencyGraph, Bfs};

/// A ring of `n` vertices with chords every seven steps.
fn chordal_ring(n: usize) -> AdjacencyGraph<u32> {
    let mut graph = AdjacencyGraph::undirected_with_capacity(n);
    let ids: Vec<_> = (0..n).map(|_| graph.add_vertex()).collect();
    for i in 0..n {
        graph.add_edge(ids[i], ids[(i + 1) % n], 1).unwrap();
        if i % 7 == 0 {
            graph.add_edge(ids[i], ids[(i + n / 2) % n], 3).unwrap();
        }
    }
    graph
}

fn bench_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph");
    let graph = chordal_ring(1000);
    let start = graph.vertices().next().unwrap();

    group.bench_function("bfs_full_traversal", |b| {
        b.iter(|| {
            let count = Bfs::new(&graph, black_box(start)).unwrap().count();
            black_box(count);
        });
    });

    group.bench_function("dijkstra_all_distances", |b| {
        b.iter(|| {
            let dist = dijkstra(&graph, black_box(start)).unwrap();
            black_box(dist);
        });
    });

    group.bench_function("build_chordal_ring", |b| {
        b.iter(|| black_box(chordal_ring(black_box(1000))));
    });

    group.finish();
}

criterion_group!(benches, bench_graph);
criterion_main!(benches);
