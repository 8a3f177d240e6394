//! Throughput benchmarks for pack and unpack.
//!
//! Measures format parsing plus encoding/decoding for a few representative
//! record layouts. Use for relative comparisons between builds.
//!
//! Usage:
//!   cargo run --release --bin bench          # Run with default 100000 iterations
//!   cargo run --release --bin bench -- 5000  # Run with custom iteration count

#![allow(clippy::cast_precision_loss)]

use binpacker::{pack, unpack, Value};
use std::env;
use std::time::Instant;

const DEFAULT_ITERATIONS: usize = 100_000;

struct BenchConfig {
    name: &'static str,
    pack_format: &'static str,
    unpack_format: &'static str,
    values: fn() -> Vec<Value>,
}

fn header_values() -> Vec<Value> {
    vec![1u16.into(), 2u32.into(), "Hello".into(), "!".into()]
}

fn login_values() -> Vec<Value> {
    vec![
        "account-name".into(),
        "one-time".into(),
        7u32.into(),
        1u16.into(),
        2u16.into(),
        3u16.into(),
    ]
}

fn c_string_values() -> Vec<Value> {
    // The extra value keeps the final pad in lockstep.
    vec!["alpha".into(), "beta".into(), "gamma".into(), "".into()]
}

const BENCHMARKS: &[BenchConfig] = &[
    BenchConfig {
        name: "header",
        pack_format: "nNa5xa1",
        unpack_format: "nkind/Nseq/a5tag/a1flag",
        values: header_values,
    },
    BenchConfig {
        name: "login",
        pack_format: "a256a16Nnnn",
        unpack_format: "a256account/a16password/Nrevision/nlocale/narch/nversion",
        values: login_values,
    },
    BenchConfig {
        name: "c-strings",
        pack_format: "a*xa*xa*x",
        unpack_format: "a*xfirst/a*xsecond/a*xthird",
        values: c_string_values,
    },
];

fn report(name: &str, bytes: usize, iterations: usize, start: Instant) {
    let total_us = start.elapsed().as_secs_f64() * 1_000_000.0;
    let per_iter_us = total_us / iterations as f64;
    let throughput_mbps = (bytes as f64 * 8.0) / per_iter_us;

    println!("{name:<20} {per_iter_us:>8.3} µs/iter  {throughput_mbps:>8.1} Mbps  ({bytes} bytes)");
}

fn bench_pack(config: &BenchConfig, iterations: usize) {
    let values = (config.values)();
    let bytes = match pack(config.pack_format, &values) {
        Ok(bytes) => bytes,
        Err(e) => {
            println!("{:<20} SKIP (pack failed: {e})", config.name);
            return;
        }
    };

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = pack(config.pack_format, &values);
    }
    report(config.name, bytes.len(), iterations, start);
}

fn bench_unpack(config: &BenchConfig, iterations: usize) {
    let values = (config.values)();
    let Ok(bytes) = pack(config.pack_format, &values) else {
        println!("{:<20} SKIP (pack failed)", config.name);
        return;
    };

    if let Err(e) = unpack(config.unpack_format, &bytes) {
        println!("{:<20} SKIP (unpack failed: {e})", config.name);
        return;
    }

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = unpack(config.unpack_format, &bytes);
    }
    report(config.name, bytes.len(), iterations, start);
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let iterations = if args.len() >= 2 {
        args[1].parse().unwrap_or(DEFAULT_ITERATIONS)
    } else {
        DEFAULT_ITERATIONS
    };

    println!("binpacker Benchmarks");
    println!("====================");
    println!("Iterations: {iterations}\n");

    println!("Pack:");
    for config in BENCHMARKS {
        bench_pack(config, iterations);
    }

    println!("\nUnpack:");
    for config in BENCHMARKS {
        bench_unpack(config, iterations);
    }
}
