use criterion::{criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use shotgun_core::distance::levenshtein;
use shotgun_core::{bounded_distance, EditMatrix, EvolutionConfig, Evolver, Neighborhood, Vocabulary};

const WORDS: &str = "SHOT SHOP STOP STEP SLEEP SHEEP SHIP HIP HOP TOP STOPS SHOTS SPOT SPOTS \
                     POTS POT PIT PITS SPIT SPITE SPINE SHINE SHONE STONE STORE SHORE SHORT SPORT";

fn chars(s: &str) -> Vec<char> {
    s.chars().collect()
}

fn bench_distance(c: &mut Criterion) {
    let (x, y) = (chars("TRANSCRIPTION"), chars("TRANSFORMATION"));
    let mut matrix = EditMatrix::new(16);

    c.bench_function("levenshtein_unbounded_14", |b| b.iter(|| levenshtein(&x, &y)));

    c.bench_function("bounded_distance_14_k2", |b| {
        b.iter(|| bounded_distance(&x, &y, &mut matrix, 2))
    });

    c.bench_function("bounded_distance_14_k8", |b| {
        b.iter(|| bounded_distance(&x, &y, &mut matrix, 8))
    });

    let vocab = Vocabulary::parse(WORDS).unwrap();
    c.bench_function("neighbors_cold_cache_k2", |b| {
        b.iter(|| {
            let mut hood = Neighborhood::new(&vocab);
            vocab.ids().map(|id| hood.neighbors(id, 2).len()).sum::<usize>()
        })
    });

    let seed = vocab.sentence(["SHOT", "STEP", "HIP", "POTS", "SHORE"]).unwrap();
    c.bench_function("evolve_5_words", |b| {
        let mut evolver = Evolver::new(&vocab, EvolutionConfig::default());
        let mut rng = StdRng::seed_from_u64(1);
        b.iter(|| evolver.evolve(&seed, &mut rng).unwrap())
    });
}

criterion_group!(benches, bench_distance);
criterion_main!(benches);
