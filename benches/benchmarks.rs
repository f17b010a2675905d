criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        pivoting_lemke_howson_exact,
        pivoting_lemke_howson_float,
        enumerating_supports_random_6x6,
        optimizing_zero_sum_rps,
        pivoting_sequence_form_kuhn,
        optimizing_sequence_form_kuhn,
}

use nashkit::*;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

fn random_bimatrix(k: usize) -> Game {
    let mut rng = SmallRng::seed_from_u64(k as u64);
    let mut draw = || {
        (0..k)
            .map(|_| (0..k).map(|_| integer(rng.random_range(-9..=9))).collect())
            .collect::<Vec<Vec<_>>>()
    };
    let a = draw();
    let b = draw();
    Game::from(NormalForm::bimatrix(a, b).unwrap())
}

fn pivoting_lemke_howson_exact(c: &mut criterion::Criterion) {
    let game = random_bimatrix(8);
    let config = Config::new(Algorithm::LemkeHowson { start: 0 }).all();
    c.bench_function("lemke-howson from every label on an 8x8 game (exact)", |b| {
        b.iter(|| solve(&game, &config).unwrap())
    });
}

fn pivoting_lemke_howson_float(c: &mut criterion::Criterion) {
    let game = random_bimatrix(8);
    let config = Config::new(Algorithm::LemkeHowson { start: 0 }).all().floating();
    c.bench_function("lemke-howson from every label on an 8x8 game (float)", |b| {
        b.iter(|| solve(&game, &config).unwrap())
    });
}

fn enumerating_supports_random_6x6(c: &mut criterion::Criterion) {
    let game = random_bimatrix(6);
    let config = Config::new(Algorithm::support_enumeration()).all().floating();
    c.bench_function("enumerate balanced supports of a 6x6 game", |b| {
        b.iter(|| solve(&game, &config).unwrap())
    });
}

fn optimizing_zero_sum_rps(c: &mut criterion::Criterion) {
    let game = Game::from(rock_paper_scissors());
    let config = Config::new(Algorithm::LpZeroSum);
    c.bench_function("solve rock-paper-scissors by linear program", |b| {
        b.iter(|| solve(&game, &config).unwrap())
    });
}

fn pivoting_sequence_form_kuhn(c: &mut criterion::Criterion) {
    let game = Game::from(kuhn_poker());
    let config = Config::new(Algorithm::LemkeHowson { start: 0 });
    c.bench_function("solve kuhn poker by sequence-form lemke", |b| {
        b.iter(|| solve(&game, &config).unwrap())
    });
}

fn optimizing_sequence_form_kuhn(c: &mut criterion::Criterion) {
    let game = Game::from(kuhn_poker());
    let config = Config::new(Algorithm::LpZeroSum);
    c.bench_function("solve kuhn poker by sequence-form linear program", |b| {
        b.iter(|| solve(&game, &config).unwrap())
    });
}
