use criterion::{criterion_group, criterion_main, Criterion};
use grid_pursuit::{
    tilemap, Cell, GridGraph, ManhattanAstar, PathFinder, PursuitConfig, PursuitCoordinator,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;

fn random_scenarios(graph: &GridGraph, n: usize, rng: &mut StdRng) -> Vec<(Cell, Cell)> {
    let mut scenarios = Vec::with_capacity(n);
    while scenarios.len() < n {
        let start = Cell::new(
            rng.gen_range(0..graph.width()) as i32,
            rng.gen_range(0..graph.height()) as i32,
        );
        let goal = Cell::new(
            rng.gen_range(0..graph.width()) as i32,
            rng.gen_range(0..graph.height()) as i32,
        );
        if graph.reachable(start, goal) {
            scenarios.push((start, goal));
        }
    }
    scenarios
}

fn astar_bench(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    let setup = tilemap::parse(&tilemap::HERDING_MAP).unwrap();
    let graph = GridGraph::from_rows(&setup.rows).unwrap();
    let scenarios = random_scenarios(&graph, 100, &mut rng);
    let solver = ManhattanAstar::new();
    c.bench_function("herding map, 100 random searches", |b| {
        b.iter(|| {
            for (start, goal) in &scenarios {
                black_box(solver.find_path(&graph, *start, *goal));
            }
        })
    });

    for n in [20, 50] {
        let rows = (0..n)
            .map(|_| (0..n).map(|_| rng.gen_bool(0.25)).collect::<Vec<bool>>())
            .collect::<Vec<_>>();
        let graph = GridGraph::from_rows(&rows).unwrap();
        let scenarios = random_scenarios(&graph, 100, &mut rng);
        c.bench_function(format!("{n}x{n} random grid, 100 searches").as_str(), |b| {
            b.iter(|| {
                for (start, goal) in &scenarios {
                    black_box(solver.find_path(&graph, *start, *goal));
                }
            })
        });
    }
}

fn round_bench(c: &mut Criterion) {
    let setup = tilemap::parse(&tilemap::HERDING_MAP).unwrap();
    let config = PursuitConfig {
        move_interval: 1,
        ..PursuitConfig::default()
    };
    let walk = [Cell::new(1, 1), Cell::new(2, 1), Cell::new(3, 1), Cell::new(2, 1)];
    c.bench_function("herding round, 100 ticks with a moving player", |b| {
        b.iter(|| {
            let mut round = PursuitCoordinator::new(setup.clone(), config).unwrap();
            for t in 0..100 {
                if round.tick(walk[t % walk.len()]).is_over() {
                    break;
                }
            }
            black_box(round.outcome())
        })
    });
}

criterion_group!(benches, astar_bench, round_bench);
criterion_main!(benches);
