//! HTTP request metrics registry.
//!
//! One `DashMap` entry per `(method, route, status_code)` label set holds both
//! the request counter and the duration histogram, so a recording updates the
//! two under a single shard guard. Rendering follows the Prometheus text
//! exposition format. Histogram buckets are fixed, in seconds.

use dashmap::DashMap;
use std::fmt::Write;

use promdemo_core::route::{normalize_route, status_class};

use super::process::ProcessMetrics;

/// Bucket upper bounds in seconds; `+Inf` is implicit.
pub const DURATION_BUCKETS_SECS: [f64; 10] =
    [0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0];

pub const REQUEST_DURATION_NAME: &str = "http_request_duration_seconds";
pub const REQUESTS_TOTAL_NAME: &str = "http_requests_total";

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

/// One label set: method, normalized route, status class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeriesKey {
    pub method: String,
    pub route: String,
    pub status_class: String,
}

impl SeriesKey {
    /// Build a key from a raw request path and a full status code.
    pub fn from_request(method: &str, path: &str, status_code: u16) -> Self {
        Self {
            method: method.to_string(),
            route: normalize_route(path),
            status_class: status_class(status_code),
        }
    }

    fn label_str(&self) -> String {
        format!(
            "method=\"{}\",route=\"{}\",status_code=\"{}\"",
            escape_label(&self.method),
            escape_label(&self.route),
            escape_label(&self.status_class)
        )
    }
}

fn write_header(out: &mut String, name: &str, help: &str, kind: &str) {
    let _ = writeln!(out, "# HELP {} {}", name, help);
    let _ = writeln!(out, "# TYPE {} {}", name, kind);
}

/// Cumulative histogram state for one series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Histogram {
    pub count: u64,
    pub sum: f64,
    /// Cumulative counts, one per entry of `DURATION_BUCKETS_SECS`.
    pub buckets: [u64; DURATION_BUCKETS_SECS.len()],
}

impl Histogram {
    fn observe(&mut self, secs: f64) {
        self.count += 1;
        self.sum += secs;
        // Cumulative: every bucket whose bound is >= value
        for (i, &le) in DURATION_BUCKETS_SECS.iter().enumerate() {
            if secs <= le {
                self.buckets[i] += 1;
            }
        }
    }
}

/// Counter and histogram for one label set, always updated together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    pub requests_total: u64,
    pub duration: Histogram,
}

impl Series {
    fn record(&mut self, secs: f64) {
        self.requests_total += 1;
        self.duration.observe(secs);
    }
}

/// Process-wide registry for request metrics.
///
/// Built once at startup and shared through `AppState`; tests build their own.
#[derive(Default)]
pub struct HttpMetrics {
    series: DashMap<SeriesKey, Series>,
    process: ProcessMetrics,
}

impl HttpMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Completion hook: called once per finished request.
    ///
    /// Counter and histogram change under the same entry guard. Negative or
    /// NaN durations are clamped to zero.
    pub fn record_request(&self, method: &str, path: &str, status_code: u16, elapsed_millis: f64) {
        let key = SeriesKey::from_request(method, path, status_code);
        let secs = if elapsed_millis.is_nan() { 0.0 } else { elapsed_millis.max(0.0) / 1000.0 };

        if let Some(mut series) = self.series.get_mut(&key) {
            series.record(secs);
            return;
        }
        self.series.entry(key).or_default().record(secs);
    }

    /// Point-in-time copy of one series.
    pub fn snapshot(&self, key: &SeriesKey) -> Option<Series> {
        self.series.get(key).map(|s| s.clone())
    }

    /// Request count for a key, if the series exists.
    pub fn requests_total(&self, key: &SeriesKey) -> Option<u64> {
        self.series.get(key).map(|s| s.requests_total)
    }

    /// Histogram for a key, if the series exists.
    pub fn duration(&self, key: &SeriesKey) -> Option<Histogram> {
        self.series.get(key).map(|s| s.duration.clone())
    }

    /// Number of distinct label sets.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Render every family in Prometheus text exposition format.
    ///
    /// Both request families are written from one sorted snapshot, so a
    /// series' counter always matches its histogram count.
    pub fn render(&self) -> String {
        let mut rows: Vec<(SeriesKey, Series)> = self
            .series
            .iter()
            .map(|r| (r.key().clone(), r.value().clone()))
            .collect();
        rows.sort_by(|a, b| a.0.cmp(&b.0));

        let mut out = String::new();
        render_durations(&rows, &mut out);
        render_totals(&rows, &mut out);
        self.process.render(&mut out);
        out
    }

    /// Seconds since process start.
    pub fn process_uptime_secs(&self) -> f64 {
        self.process.uptime_secs()
    }
}

fn render_durations(rows: &[(SeriesKey, Series)], out: &mut String) {
    let name = REQUEST_DURATION_NAME;
    write_header(out, name, "Duration of HTTP requests in seconds", "histogram");
    for (key, series) in rows {
        let hist = &series.duration;
        let label_str = key.label_str();
        for (i, le) in DURATION_BUCKETS_SECS.iter().enumerate() {
            let _ = writeln!(
                out,
                "{}_bucket{{{},le=\"{}\"}} {}",
                name, label_str, le, hist.buckets[i]
            );
        }
        let _ = writeln!(out, "{}_bucket{{{},le=\"+Inf\"}} {}", name, label_str, hist.count);
        let _ = writeln!(out, "{}_sum{{{}}} {}", name, label_str, hist.sum);
        let _ = writeln!(out, "{}_count{{{}}} {}", name, label_str, hist.count);
    }
}

fn render_totals(rows: &[(SeriesKey, Series)], out: &mut String) {
    let name = REQUESTS_TOTAL_NAME;
    write_header(out, name, "Total number of HTTP requests", "counter");
    for (key, series) in rows {
        let _ = writeln!(out, "{}{{{}}} {}", name, key.label_str(), series.requests_total);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(method: &str, route: &str, class: &str) -> SeriesKey {
        SeriesKey {
            method: method.into(),
            route: route.into(),
            status_class: class.into(),
        }
    }

    #[test]
    fn n_recordings_share_one_series() {
        let m = HttpMetrics::new();
        let elapsed = [0.4, 3.0, 12.5, 80.0, 700.0];
        for ms in elapsed {
            m.record_request("GET", "/api/users", 200, ms);
        }

        let k = key("GET", "/api/users", "2xx");
        assert_eq!(m.requests_total(&k), Some(5));
        let h = m.duration(&k).unwrap();
        assert_eq!(h.count, 5);
        let want: f64 = elapsed.iter().map(|ms| ms / 1000.0).sum();
        assert!((h.sum - want).abs() < 1e-9);
    }

    #[test]
    fn buckets_are_cumulative() {
        let m = HttpMetrics::new();
        for ms in [0.5, 2.0, 7.0, 30.0, 70.0, 300.0, 900.0, 1500.0, 4000.0, 9000.0, 20000.0] {
            m.record_request("GET", "/slow", 200, ms);
        }
        let h = m.duration(&key("GET", "/slow", "2xx")).unwrap();
        assert!(h.buckets.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(h.buckets[0], 1);
        assert_eq!(h.buckets[DURATION_BUCKETS_SECS.len() - 1], 10);
        assert_eq!(h.count, 11);
    }

    #[test]
    fn bucket_bound_is_inclusive() {
        let m = HttpMetrics::new();
        m.record_request("GET", "/", 200, 100.0);
        let h = m.duration(&key("GET", "/", "2xx")).unwrap();
        // 0.1s lands in le="0.1" but not le="0.05"
        assert_eq!(h.buckets[3], 0);
        assert_eq!(h.buckets[4], 1);
    }

    #[test]
    fn bad_elapsed_is_clamped() {
        let m = HttpMetrics::new();
        m.record_request("GET", "/", 200, -5.0);
        m.record_request("GET", "/", 200, f64::NAN);
        let h = m.duration(&key("GET", "/", "2xx")).unwrap();
        assert_eq!(h.count, 2);
        assert_eq!(h.sum, 0.0);
        assert_eq!(h.buckets[0], 2);
    }

    #[test]
    fn status_classes_split_series() {
        let m = HttpMetrics::new();
        m.record_request("GET", "/api/users/1", 200, 12.5);
        m.record_request("GET", "/api/users/2", 404, 3.1);

        assert_eq!(m.len(), 2);
        assert_eq!(m.requests_total(&key("GET", "/api/users/:id", "2xx")), Some(1));
        assert_eq!(m.requests_total(&key("GET", "/api/users/:id", "4xx")), Some(1));
    }

    #[test]
    fn empty_registry_renders_declarations_only() {
        let m = HttpMetrics::new();
        assert!(m.is_empty());
        let out = m.render();
        assert!(out.contains("# TYPE http_request_duration_seconds histogram"));
        assert!(out.contains("# HELP http_requests_total Total number of HTTP requests"));
        assert!(out.contains("# TYPE http_requests_total counter"));
        assert!(!out.contains("http_requests_total{"));
        assert!(!out.contains("http_request_duration_seconds_bucket{"));

        m.record_request("GET", "/", 200, 1.0);
        assert!(!m.is_empty());
    }

    #[test]
    fn render_histogram_lines() {
        let m = HttpMetrics::new();
        m.record_request("GET", "/api/users", 200, 50.0);
        let out = m.render();
        let labels = r#"method="GET",route="/api/users",status_code="2xx""#;
        assert!(out.contains(&format!("http_request_duration_seconds_bucket{{{labels},le=\"0.01\"}} 0")));
        assert!(out.contains(&format!("http_request_duration_seconds_bucket{{{labels},le=\"0.05\"}} 1")));
        assert!(out.contains(&format!("http_request_duration_seconds_bucket{{{labels},le=\"10\"}} 1")));
        assert!(out.contains(&format!("http_request_duration_seconds_bucket{{{labels},le=\"+Inf\"}} 1")));
        assert!(out.contains(&format!("http_request_duration_seconds_sum{{{labels}}} 0.05")));
        assert!(out.contains(&format!("http_request_duration_seconds_count{{{labels}}} 1")));
        assert!(out.contains(&format!("http_requests_total{{{labels}}} 1")));
    }

    #[test]
    fn label_values_are_escaped() {
        let m = HttpMetrics::new();
        m.record_request("GET", "/a\"b\\c", 200, 1.0);
        let out = m.render();
        assert!(out.contains(r#"route="/a\"b\\c""#));
    }
}
