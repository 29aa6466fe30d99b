use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use sable_chess::game_state::position::Position;
use sable_chess::move_generation::perft::{perft, PerftCounts};
use sable_chess::utils::fen_parser::parse_fen;

/// Leaf counts per move category, as published for the standard perft positions.
const fn leaves(
    nodes: usize,
    captures: usize,
    en_passant: usize,
    castles: usize,
    promotions: usize,
    checks: usize,
) -> PerftCounts {
    PerftCounts {
        nodes,
        captures,
        en_passant,
        castles,
        promotions,
        checks,
    }
}

struct PerftCase {
    name: &'static str,
    fen: &'static str,
    /// Expected counts for depth 1, 2, ...
    levels: &'static [PerftCounts],
}

const CASES: &[PerftCase] = &[
    PerftCase {
        name: "initial",
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        levels: &[
            leaves(20, 0, 0, 0, 0, 0),
            leaves(400, 0, 0, 0, 0, 0),
            leaves(8902, 34, 0, 0, 0, 12),
            leaves(197_281, 1576, 0, 0, 0, 469),
        ],
    },
    PerftCase {
        name: "kiwipete",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        levels: &[
            leaves(48, 8, 0, 2, 0, 0),
            leaves(2039, 351, 1, 91, 0, 3),
            leaves(97_862, 17_102, 45, 3162, 0, 993),
        ],
    },
    PerftCase {
        name: "rook_endgame",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        levels: &[
            leaves(14, 1, 0, 0, 0, 2),
            leaves(191, 14, 0, 0, 0, 10),
            leaves(2812, 209, 2, 0, 0, 267),
            leaves(43_238, 3348, 123, 0, 0, 1680),
        ],
    },
    PerftCase {
        name: "promotions",
        fen: "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        levels: &[
            leaves(6, 0, 0, 0, 0, 0),
            leaves(264, 87, 0, 6, 48, 10),
            leaves(9467, 1021, 4, 0, 120, 38),
        ],
    },
];

/// Levels with more leaves than this are skipped; raise it with `SABLE_PERFT_NODE_CAP`.
fn node_cap() -> usize {
    std::env::var("SABLE_PERFT_NODE_CAP")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(10_000)
}

fn bench_perft(c: &mut Criterion) {
    let cap = node_cap();
    let mut group = c.benchmark_group("perft");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(3));
    group.sample_size(10);

    for case in CASES {
        let position: Position = parse_fen(case.fen)
            .expect("benchmark FEN should parse")
            .position();

        for (depth, expected) in (1u8..).zip(case.levels) {
            if expected.nodes > cap {
                break;
            }
            // Every category must match before the timing means anything.
            assert_eq!(
                perft(&position, depth),
                *expected,
                "{} depth {depth} leaf counts",
                case.name
            );

            group.throughput(Throughput::Elements(expected.nodes as u64));
            group.bench_with_input(
                BenchmarkId::new(case.name, depth),
                &position,
                |b, position| b.iter(|| black_box(perft(black_box(position), depth)).nodes),
            );
        }
    }

    group.finish();
}

criterion_group!(perft_benches, bench_perft);
criterion_main!(perft_benches);
