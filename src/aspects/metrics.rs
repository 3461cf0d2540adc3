//! Wall-clock timing around view calls.
//!
//! Durations are logged per call and accumulated per view for the admin
//! dashboard. Recording happens whether or not the wrapped call succeeded.

use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::future::Future;
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, Default)]
struct Accum {
    hits: u64,
    total_micros: u64,
    max_micros: u64,
}

/// One view's timing summary, for display.
#[derive(Clone, Debug)]
pub struct ViewTiming {
    pub view: &'static str,
    pub hits: u64,
    pub mean_micros: u64,
    pub max_micros: u64,
}

static TIMINGS: Lazy<DashMap<&'static str, Accum>> = Lazy::new(DashMap::new);

/// Run `f`, recording how long it took under `view`.
pub async fn timed<F, Fut, T>(view: &'static str, f: F) -> T
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = T>,
{
    let started = Instant::now();
    let out = f().await;
    record(view, started.elapsed());
    out
}

pub fn record(view: &'static str, elapsed: Duration) {
    let micros = elapsed.as_micros().min(u64::MAX as u128) as u64;
    let mut entry = TIMINGS.entry(view).or_default();
    entry.hits += 1;
    entry.total_micros += micros;
    entry.max_micros = entry.max_micros.max(micros);

    log::info!("metrics: '{}' took {}", view, format_duration(elapsed));
}

/// Current per-view summaries, sorted by view name.
pub fn snapshot() -> Vec<ViewTiming> {
    let mut timings: Vec<ViewTiming> = TIMINGS
        .iter()
        .map(|entry| {
            let acc = entry.value();
            ViewTiming {
                view: entry.key(),
                hits: acc.hits,
                mean_micros: acc.total_micros / acc.hits.max(1),
                max_micros: acc.max_micros,
            }
        })
        .collect();
    timings.sort_by_key(|t| t.view);
    timings
}

/// Forget all accumulated timings. Used by tests.
pub fn reset() {
    TIMINGS.clear();
}

fn format_duration(elapsed: Duration) -> String {
    let us = elapsed.as_micros();
    if us > 5000 {
        format!("{}ms", us / 1000)
    } else {
        format!("{}\u{3bc}s", us)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_record_accumulates() {
        reset();
        record("unit_view", Duration::from_micros(100));
        record("unit_view", Duration::from_micros(300));

        let snap = snapshot();
        let timing = snap
            .iter()
            .find(|t| t.view == "unit_view")
            .expect("view missing from snapshot");
        assert_eq!(timing.hits, 2);
        assert_eq!(timing.mean_micros, 200);
        assert_eq!(timing.max_micros, 300);
    }

    #[test]
    #[serial]
    fn test_snapshot_sorted_by_view() {
        reset();
        record("zeta", Duration::from_micros(1));
        record("alpha", Duration::from_micros(1));

        let snap = snapshot();
        let names: Vec<&str> = snap.iter().map(|t| t.view).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_format_duration_units() {
        assert_eq!(format_duration(Duration::from_micros(250)), "250\u{3bc}s");
        assert_eq!(format_duration(Duration::from_micros(7500)), "7ms");
    }
}
