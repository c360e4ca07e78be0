use std::sync::Arc;

use agora_exchange::{get_amount_out, mul_div, Exchange};
use agora_nullables::NullLedger;
use agora_types::{ExchangeParams, Principal};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const ONE_ETHER: u128 = 1_000_000_000_000_000_000;

fn principal(n: u8) -> Principal {
    Principal::from_bytes([n; 20])
}

fn seeded_pool() -> Exchange {
    let exchange_address = principal(0xEE);
    let ledger = Arc::new(NullLedger::new(principal(0x70)));
    ledger.fund(&principal(1), &exchange_address, 10_000_000 * ONE_ETHER).unwrap();
    let mut exchange =
        Exchange::new(exchange_address, ExchangeParams::default(), ledger).unwrap();
    exchange
        .add_liquidity(&principal(1), 100 * ONE_ETHER, 1_000_000 * ONE_ETHER)
        .unwrap();
    exchange
}

fn bench_mul_div_narrow(c: &mut Criterion) {
    c.bench_function("mul_div_narrow", |b| {
        b.iter(|| mul_div(black_box(1_000_000), black_box(3_333), black_box(7)))
    });
}

fn bench_mul_div_wide(c: &mut Criterion) {
    c.bench_function("mul_div_wide", |b| {
        b.iter(|| {
            mul_div(
                black_box(1_000_000 * ONE_ETHER),
                black_box(100 * ONE_ETHER),
                black_box(3 * ONE_ETHER),
            )
        })
    });
}

fn bench_get_amount_out(c: &mut Criterion) {
    c.bench_function("get_amount_out_wei_scale", |b| {
        b.iter(|| {
            get_amount_out(
                black_box(ONE_ETHER),
                black_box(100 * ONE_ETHER),
                black_box(1_000_000 * ONE_ETHER),
                9_900,
            )
        })
    });
}

fn bench_eth_to_token(c: &mut Criterion) {
    c.bench_function("exchange_eth_to_token", |b| {
        b.iter_batched(
            seeded_pool,
            |mut exchange| {
                for _ in 0..10 {
                    exchange
                        .eth_to_token(&principal(2), black_box(ONE_ETHER / 10), 0)
                        .unwrap();
                }
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

fn bench_liquidity_roundtrip(c: &mut Criterion) {
    c.bench_function("exchange_add_remove_liquidity", |b| {
        b.iter_batched(
            seeded_pool,
            |mut exchange| {
                let receipt = exchange
                    .add_liquidity(&principal(1), black_box(ONE_ETHER), u128::MAX)
                    .unwrap();
                exchange
                    .remove_liquidity(&principal(1), receipt.shares_minted)
                    .unwrap();
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_mul_div_narrow,
    bench_mul_div_wide,
    bench_get_amount_out,
    bench_eth_to_token,
    bench_liquidity_roundtrip,
);
criterion_main!(benches);
