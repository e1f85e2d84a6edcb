#[macro_use]
extern crate criterion;

use criterion::{BatchSize, Criterion};

use common::game::{rules::Rules, Game, PlayerType};

fn criterion_benchmark(c: &mut Criterion) {
    let rules = Rules {
        max_rounds: Some(1),
        ..Rules::default()
    };
    let mut game = Game::new(20, &[PlayerType::Computer, PlayerType::Computer], rules, 42)
        .expect("two players is enough for a game");
    game.place_starting_units()
        .expect("a fresh board has room for starting units");

    c.bench_function("computer_turn", |b| {
        b.iter_batched(
            || game.clone(),
            |mut game| {
                game.start_game();
                game
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
