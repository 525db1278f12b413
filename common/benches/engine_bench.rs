use criterion::{criterion_group, criterion_main, Criterion, SamplingMode};
use std::hint::black_box;
use std::time::Duration;
use common::games::{RandomSource, SessionRng};
use common::games::snake::{Board, Direction, Engine, FoodPlacement, TickOutcome};

const TURNS: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

fn play_random_ticks(board: Board, placement: FoodPlacement, ticks: usize) -> u32 {
    let mut engine = Engine::start(board, SessionRng::new(7), placement);
    let mut input_rng = SessionRng::new(11);
    let mut best = 0;

    for _ in 0..ticks {
        engine.request(TURNS[input_rng.next_int(4) as usize]);
        if let TickOutcome::Terminated { final_score, .. } = engine.tick() {
            best = best.max(final_score);
            engine.restart();
        }
    }
    best
}

/// Walks a serpentine path that fills most of a small board, so food placement
/// has to reject many occupied cells.
fn play_serpentine(board: Board, placement: FoodPlacement) -> u32 {
    let mut engine = Engine::start(board, SessionRng::new(3), placement);
    let mut ticks = 0;
    while engine.is_running() && ticks < 10_000 {
        let head = engine.snake().head();
        let block = board.block() as i32;
        let at_right = head.x + block >= board.width() as i32;
        let at_left = head.x == 0;
        match engine.direction() {
            Direction::Right if at_right => engine.request(Direction::Down),
            Direction::Left if at_left => engine.request(Direction::Down),
            Direction::Down if at_left => engine.request(Direction::Right),
            Direction::Down => engine.request(Direction::Left),
            _ => false,
        };
        engine.tick();
        ticks += 1;
    }
    engine.score()
}

fn engine_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("snake_engine");

    group
        .sampling_mode(SamplingMode::Flat)
        .sample_size(20)
        .measurement_time(Duration::from_secs(10));

    let board = Board::new(640, 480, 20).unwrap();
    group.bench_function("10k_random_ticks_rejection", |b| {
        b.iter(|| play_random_ticks(black_box(board), FoodPlacement::Rejection, 10_000))
    });

    group.bench_function("10k_random_ticks_single_sample", |b| {
        b.iter(|| play_random_ticks(black_box(board), FoodPlacement::SingleSample, 10_000))
    });

    let small = Board::new(160, 160, 20).unwrap();
    group.bench_function("serpentine_small_board", |b| {
        b.iter(|| play_serpentine(black_box(small), FoodPlacement::Rejection))
    });

    group.finish();
}

criterion_group!(benches, engine_bench);
criterion_main!(benches);
