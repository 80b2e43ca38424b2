// Test helpers are intentionally partially used
#![allow(dead_code)]

use app_metrics::{render, HttpMetricsConfig, MetricsBackend, MetricsConfig, RedisMetricsConfig};
use prometheus::Registry;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::Once;

pub const SERVICE: &str = "test-app";

static TRACING_INIT: Once = Once::new();

// ============================================================================
// Test Setup
// ============================================================================

/// Initialize tracing once for all tests in a binary.
pub fn init_tracing() {
    // ---
    TRACING_INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_ansi(false) // No colorization, makes logs easier to read.
            .with_test_writer()
            .init();
    });
}

/// Prometheus metrics configuration with default buckets.
pub fn metrics_config() -> MetricsConfig {
    // ---
    MetricsConfig {
        service_name: SERVICE.to_string(),
        backend: MetricsBackend::Prometheus,
        http: HttpMetricsConfig::default(),
        redis: RedisMetricsConfig::default(),
    }
}

// ============================================================================
// Exposition parsing
// ============================================================================

/// One `name{labels} value` line of the text exposition.
#[derive(Debug, Clone)]
pub struct Sample {
    pub name: String,
    pub labels: BTreeMap<String, String>,
    pub value: f64,
}

/// Scrape `registry` and parse every sample line.
pub fn scrape(registry: &Registry) -> Vec<Sample> {
    // ---
    parse(&render(registry).expect("render metrics"))
}

pub fn parse(text: &str) -> Vec<Sample> {
    // ---
    let line_re = Regex::new(r"^([a-zA-Z_:][a-zA-Z0-9_:]*)(?:\{(.*)\})? (\S+)$").unwrap();
    let label_re = Regex::new(r#"([a-zA-Z_][a-zA-Z0-9_]*)="([^"]*)""#).unwrap();

    text.lines()
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let caps = line_re.captures(line)?;
            let labels = caps
                .get(2)
                .map(|l| {
                    label_re
                        .captures_iter(l.as_str())
                        .map(|c| (c[1].to_string(), c[2].to_string()))
                        .collect()
                })
                .unwrap_or_default();
            Some(Sample {
                name: caps[1].to_string(),
                labels,
                value: parse_float(&caps[3]),
            })
        })
        .collect()
}

fn parse_float(raw: &str) -> f64 {
    // ---
    match raw {
        "+Inf" => f64::INFINITY,
        "-Inf" => f64::NEG_INFINITY,
        other => other.parse().expect("numeric sample value"),
    }
}

fn label_map(labels: &[(&str, &str)]) -> BTreeMap<String, String> {
    // ---
    labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Value of the sample with exactly this name and label set.
pub fn value(samples: &[Sample], name: &str, labels: &[(&str, &str)]) -> Option<f64> {
    // ---
    let wanted = label_map(labels);
    samples
        .iter()
        .find(|s| s.name == name && s.labels == wanted)
        .map(|s| s.value)
}

/// `(upper bound, cumulative count)` pairs of a histogram series, `+Inf` last.
pub fn buckets(samples: &[Sample], histogram: &str, labels: &[(&str, &str)]) -> Vec<(f64, f64)> {
    // ---
    let name = format!("{histogram}_bucket");
    let wanted = label_map(labels);
    let mut found: Vec<(f64, f64)> = samples
        .iter()
        .filter(|s| s.name == name)
        .filter_map(|s| {
            let mut rest = s.labels.clone();
            let le = rest.remove("le")?;
            (rest == wanted).then(|| (parse_float(&le), s.value))
        })
        .collect();
    found.sort_by(|a, b| a.0.total_cmp(&b.0));
    found
}

/// Pair expected bucket counts with boundaries and append the `+Inf` bucket.
pub fn expected(bounds: &[f64], counts: &[u64], total: u64) -> Vec<(f64, f64)> {
    // ---
    assert_eq!(bounds.len(), counts.len(), "one count per boundary");
    bounds
        .iter()
        .zip(counts)
        .map(|(b, c)| (*b, *c as f64))
        .chain(std::iter::once((f64::INFINITY, total as f64)))
        .collect()
}

/// Asserts two floats are equal to within rounding error.
pub fn assert_close(actual: f64, expected: f64) {
    // ---
    assert!(
        (actual - expected).abs() <= 1e-9 * expected.abs().max(1.0),
        "expected {expected}, got {actual}"
    );
}
