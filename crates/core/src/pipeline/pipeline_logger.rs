use std::collections::BTreeMap;
use std::time::Instant;

/// Sink for per-frame pipeline events.
///
/// Use cases report stage timings and metrics here rather than logging
/// directly, so the binary decides how they surface and tests can ignore
/// them.
pub trait PipelineLogger: Send {
    /// `frames_done` frames have been fully processed. Live capture has no
    /// known total.
    fn progress(&mut self, frames_done: usize);

    /// Milliseconds spent in `stage` for one frame.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// One sample of a per-frame quantity, e.g. faces found.
    fn metric(&mut self, name: &str, value: f64);

    fn info(&mut self, message: &str);

    /// Emits the end-of-run report. Default: nothing.
    fn summary(&self) {}
}

/// Discards every event.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn progress(&mut self, _frames_done: usize) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// Running count, sum and peak of a sampled value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Stat {
    pub count: usize,
    pub total: f64,
    pub max: f64,
}

impl Stat {
    fn record(&mut self, value: f64) {
        self.count += 1;
        self.total += value;
        if self.count == 1 || value > self.max {
            self.max = value;
        }
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total / self.count as f64
        }
    }
}

/// Aggregates timings and metrics through the `log` facade.
///
/// A progress line with the running frame rate goes out every
/// `log_every` frames; `summary` prints per-stage means, peaks and share of
/// wall time.
pub struct StdoutPipelineLogger {
    log_every: usize,
    started: Instant,
    frames_done: usize,
    stages: BTreeMap<String, Stat>,
    metrics: BTreeMap<String, Stat>,
}

impl StdoutPipelineLogger {
    pub fn new(log_every: usize) -> Self {
        Self {
            log_every: log_every.max(1),
            started: Instant::now(),
            frames_done: 0,
            stages: BTreeMap::new(),
            metrics: BTreeMap::new(),
        }
    }

    /// The end-of-run report, or `None` when nothing was recorded.
    pub fn summary_string(&self) -> Option<String> {
        self.render_summary(self.started.elapsed().as_secs_f64() * 1000.0)
    }

    fn render_summary(&self, wall_ms: f64) -> Option<String> {
        if self.stages.is_empty() && self.metrics.is_empty() {
            return None;
        }

        let mut out = format!(
            "Run summary: {} frames in {:.1}s",
            self.frames_done,
            wall_ms / 1000.0
        );
        if self.frames_done > 0 && wall_ms > 0.0 {
            let fps = self.frames_done as f64 * 1000.0 / wall_ms;
            out.push_str(&format!(" ({fps:.1} fps)"));
        }

        for (name, stat) in &self.stages {
            let share = if wall_ms > 0.0 {
                stat.total / wall_ms * 100.0
            } else {
                0.0
            };
            out.push_str(&format!(
                "\n  {name:10} mean {:6.1}ms  max {:6.1}ms  ({share:4.1}% of run)",
                stat.mean(),
                stat.max
            ));
        }
        for (name, stat) in &self.metrics {
            out.push_str(&format!(
                "\n  {name:10} mean {:.1}  max {:.0}",
                stat.mean(),
                stat.max
            ));
        }
        Some(out)
    }
}

impl Default for StdoutPipelineLogger {
    fn default() -> Self {
        Self::new(100)
    }
}

impl PipelineLogger for StdoutPipelineLogger {
    fn progress(&mut self, frames_done: usize) {
        self.frames_done = frames_done;
        if frames_done % self.log_every != 0 {
            return;
        }
        let secs = self.started.elapsed().as_secs_f64();
        if secs > 0.0 {
            log::info!("{frames_done} frames ({:.1} fps)", frames_done as f64 / secs);
        } else {
            log::info!("{frames_done} frames");
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.stages.entry(stage.to_owned()).or_default().record(duration_ms);
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics.entry(name.to_owned()).or_default().record(value);
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("{text}");
        }
    }
}
