//! Default process gauges rendered next to the request metrics.

use std::fmt::Write;
use std::sync::OnceLock;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Monotonic and wall-clock reading taken once per process.
#[derive(Debug, Clone, Copy)]
struct ProcessStart {
    at: Instant,
    unix_secs: f64,
}

static PROCESS_START: OnceLock<ProcessStart> = OnceLock::new();

fn process_start() -> ProcessStart {
    *PROCESS_START.get_or_init(|| ProcessStart {
        at: Instant::now(),
        unix_secs: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or_default(),
    })
}

/// Pin the process start clock. `main` calls this before anything else;
/// later calls are no-ops.
pub fn mark_process_start() {
    process_start();
}

/// Process gauges. Every instance reads the same process start clock, so
/// uptime does not depend on when a registry was built.
pub struct ProcessMetrics {
    start: ProcessStart,
}

impl Default for ProcessMetrics {
    fn default() -> Self {
        Self { start: process_start() }
    }
}

impl ProcessMetrics {
    pub fn uptime_secs(&self) -> f64 {
        self.start.at.elapsed().as_secs_f64()
    }

    pub fn start_time_secs(&self) -> f64 {
        self.start.unix_secs
    }

    pub(crate) fn render(&self, out: &mut String) {
        let _ = writeln!(
            out,
            "# HELP process_start_time_seconds Start time of the process since unix epoch in seconds.\n\
             # TYPE process_start_time_seconds gauge\n\
             process_start_time_seconds {}",
            self.start_time_secs().floor()
        );
        let _ = writeln!(
            out,
            "# HELP process_uptime_seconds Seconds since the process started.\n\
             # TYPE process_uptime_seconds gauge\n\
             process_uptime_seconds {}",
            self.uptime_secs()
        );
        if let Some(rss) = resident_memory_bytes() {
            let _ = writeln!(
                out,
                "# HELP process_resident_memory_bytes Resident memory size in bytes.\n\
                 # TYPE process_resident_memory_bytes gauge\n\
                 process_resident_memory_bytes {}",
                rss
            );
        }
    }
}

/// `VmRSS` from `/proc/self/status`; `None` off Linux or when unreadable.
fn resident_memory_bytes() -> Option<u64> {
    let status = std::fs::read_to_string("/proc/self/status").ok()?;
    parse_vm_rss(&status)
}

fn parse_vm_rss(status: &str) -> Option<u64> {
    let line = status.lines().find(|l| l.starts_with("VmRSS:"))?;
    // "VmRSS:	   12345 kB"
    let kb: u64 = line.split_whitespace().nth(1)?.parse().ok()?;
    Some(kb * 1024)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_vm_rss_in_kb() {
        let status = "Name:\tpromdemo\nVmPeak:\t  9000 kB\nVmRSS:\t    2048 kB\nThreads:\t4\n";
        assert_eq!(parse_vm_rss(status), Some(2048 * 1024));
        assert_eq!(parse_vm_rss("Name:\tx\n"), None);
    }

    #[test]
    fn uptime_is_measured_from_process_start() {
        mark_process_start();
        let first = ProcessMetrics::default();
        std::thread::sleep(std::time::Duration::from_millis(20));
        let later = ProcessMetrics::default();

        assert_eq!(first.start_time_secs(), later.start_time_secs());
        assert!(later.uptime_secs() >= 0.02);
    }

    #[test]
    fn renders_process_gauges() {
        let mut out = String::new();
        ProcessMetrics::default().render(&mut out);
        assert!(out.contains("# TYPE process_start_time_seconds gauge"));
        assert!(out.contains("\nprocess_uptime_seconds "));
    }
}
