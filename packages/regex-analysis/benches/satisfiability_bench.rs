//! Satisfiability and finder benchmarks
//!
//! Criterion-based benchmarks for the exact checker and the analyzer

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use regex_analysis::config::{AnalysisConfig, Preset};
use regex_analysis::{
    parse_regex, AutomatonSolverContext, MatchType, RegexAnalyzer, RegexSource, SatisfiabilityChecker,
};

const PATTERNS: &[&str] = &[
    "abc(d|e)",
    "(?=a)(?=.b)ab",
    "(?=abc)ab(?=cd)cde",
    "(?:a(?=c)|b(?=d))c",
    "(?<!a)b",
    "[a-z]*+[a-z]",
    "(?=[a-z]{3})\\w+@\\w+\\.com",
];

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Exact checker
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn bench_checker(c: &mut Criterion) {
    let mut group = c.benchmark_group("satisfiability_checker");

    for pattern in PATTERNS {
        let Ok(regex) = parse_regex(RegexSource::java(*pattern)) else {
            continue;
        };
        group.bench_with_input(BenchmarkId::from_parameter(pattern), &regex, |b, regex| {
            b.iter(|| {
                let mut checker = SatisfiabilityChecker::new(AutomatonSolverContext::default());
                black_box(checker.check(regex, MatchType::Partial, true))
            });
        });
    }

    group.finish();
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Parsing
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_corpus", |b| {
        b.iter(|| {
            for pattern in PATTERNS {
                let _ = black_box(parse_regex(RegexSource::java(*pattern)));
            }
        });
    });
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Analyzer (single vs batch)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn bench_analyzer(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyzer");
    let batch: Vec<&str> = PATTERNS.iter().copied().cycle().take(64).collect();

    for preset in [Preset::Fast, Preset::Balanced] {
        let Ok(analyzer) = RegexAnalyzer::new(AnalysisConfig::preset(preset)) else {
            continue;
        };
        group.bench_with_input(
            BenchmarkId::new("sequential", preset),
            &analyzer,
            |b, analyzer| {
                b.iter(|| {
                    for pattern in &batch {
                        let _ = black_box(analyzer.analyze(pattern));
                    }
                });
            },
        );
        group.bench_with_input(BenchmarkId::new("batch", preset), &analyzer, |b, analyzer| {
            b.iter(|| black_box(analyzer.analyze_batch(&batch)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_checker, bench_parse, bench_analyzer);
criterion_main!(benches);
