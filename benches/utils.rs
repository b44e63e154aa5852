use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tile_chess::{Coordinate, Game, PieceKind, Transition};

const OPENING: [(i32, i32); 12] = [
    (4, 6),
    (4, 4),
    (4, 1),
    (4, 3),
    (6, 7),
    (5, 5),
    (1, 0),
    (2, 2),
    (5, 7),
    (2, 4),
    (6, 0),
    (5, 2),
];

fn legal_destinations(game: &Game) -> usize {
    let mut result = 0;
    for (_, piece) in game.board().iter_pieces() {
        let Some(source) = piece.tile() else {
            continue;
        };
        result += Coordinate::all()
            .filter(|destination| game.is_legal_move(source, *destination))
            .count();
    }
    result
}

fn shape_sweep(game: &Game, kind: PieceKind) -> usize {
    let source = Coordinate::new(3, 4).unwrap();
    Coordinate::all()
        .filter(|destination| kind.is_legal_shape(game.board(), source, *destination))
        .count()
}

fn play_opening() -> Game {
    let mut game = Game::new_game();
    for (x, y) in OPENING {
        if let Ok(Transition::Rejected { .. }) = game.on_tile_activated(x, y) {
            panic!("Opening move to ({x}, {y}) was rejected");
        }
    }
    game
}

fn legality_benchmark(c: &mut Criterion) {
    let initial = Game::new_game();
    let opened = play_opening();
    c.bench_function("legal destinations - initial", |b| {
        b.iter(|| legal_destinations(black_box(&initial)))
    });
    c.bench_function("legal destinations - opened", |b| {
        b.iter(|| legal_destinations(black_box(&opened)))
    });
    for kind in [PieceKind::Rook, PieceKind::Bishop, PieceKind::Queen] {
        c.bench_function(&format!("{kind} sweep"), |b| {
            b.iter(|| shape_sweep(black_box(&opened), kind))
        });
    }
}

fn game_benchmark(c: &mut Criterion) {
    c.bench_function("new game", |b| b.iter(|| black_box(Game::new_game())));
    c.bench_function("scripted opening", |b| b.iter(play_opening));
    c.bench_function("snapshot", |b| {
        let game = play_opening();
        b.iter(|| black_box(&game).snapshot())
    });
}

criterion_group!(benches, legality_benchmark, game_benchmark);
criterion_main!(benches);
