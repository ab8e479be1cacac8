// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Joe Pearson
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use sitelog::{decode, SiteLogParser};

const SITE_LOG: &[u8] = include_bytes!("../tests/data/AAA200USA_20220909.log");

/// Benchmark decoding and parsing a complete site log
fn bench_site_log(c: &mut Criterion) {
    let mut group = c.benchmark_group("site log");
    group.throughput(Throughput::Bytes(SITE_LOG.len() as u64));

    group.bench_function("decode", |b| b.iter(|| decode(black_box(SITE_LOG))));

    let (text, _) = decode(SITE_LOG);
    let parser = SiteLogParser::new().site_name("AAA200USA");
    group.bench_function("parse", |b| b.iter(|| parser.parse(black_box(&text))));

    group.finish();
}

/// Benchmark the section lookup of a parsed log
fn bench_lookup(c: &mut Criterion) {
    let (text, _) = decode(SITE_LOG);
    let log = SiteLogParser::new().parse(&text);

    c.bench_function("parameter lookup", |b| {
        b.iter(|| {
            log.sections()
                .values()
                .filter_map(|section| section.parameter(black_box("Date Installed")))
                .count()
        })
    });
}

criterion_group!(benches, bench_site_log, bench_lookup);
criterion_main!(benches);
