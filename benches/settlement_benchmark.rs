use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use split_ledger::settlement::engine::SettlementEngine;
use split_ledger::simulation::generator::{generate_random_ledger_with_rng, LedgerGenConfig};

fn bench_settle(c: &mut Criterion, name: &str, user_count: usize, expense_count: usize) {
    let config = LedgerGenConfig {
        user_count,
        expense_count,
        max_participants: user_count.min(10),
        ..Default::default()
    };
    let ledger = generate_random_ledger_with_rng(&config, &mut StdRng::seed_from_u64(1));
    let balances = ledger.net_balances();
    let engine = SettlementEngine::default();

    c.bench_function(&format!("balances_{}", name), |b| {
        b.iter(|| black_box(&ledger).net_balances())
    });
    c.bench_function(&format!("settle_{}", name), |b| {
        b.iter(|| engine.settle(black_box(&balances)))
    });
}

fn bench_small_group(c: &mut Criterion) {
    bench_settle(c, "5_users", 5, 50);
}

fn bench_medium_group(c: &mut Criterion) {
    bench_settle(c, "50_users", 50, 500);
}

fn bench_large_group(c: &mut Criterion) {
    bench_settle(c, "500_users", 500, 5_000);
}

criterion_group!(
    benches,
    bench_small_group,
    bench_medium_group,
    bench_large_group
);
criterion_main!(benches);
