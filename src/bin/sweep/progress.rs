// Terminal Progress Bar for the per-depth trial loop
// Renders to stderr so stdout stays clean for results

use brw_engine::ProgressSink;
use std::io::Write;

const BAR_WIDTH: usize = 50;

/// `[#####-----] 50%` for `completed` of `total`.
pub fn render_bar(completed: usize, total: usize, width: usize) -> String {
    let fraction = if total == 0 { 1.0 } else { (completed as f64 / total as f64).min(1.0) };
    let filled = (width as f64 * fraction) as usize;
    let mut bar = String::with_capacity(width + 8);
    bar.push('[');
    bar.push_str(&"#".repeat(filled));
    bar.push_str(&"-".repeat(width - filled));
    bar.push_str("] ");
    bar.push_str(&format!("{}%", (fraction * 100.0) as u32));
    bar
}

pub struct ProgressBar {
    enabled: bool,
    finished: bool,
}

impl ProgressBar {
    pub fn new(enabled: bool) -> Self {
        Self { enabled, finished: false }
    }
}

impl ProgressSink for ProgressBar {
    fn on_depth(&mut self, depth: u32, _trials: usize) {
        self.finished = false;
        if self.enabled {
            eprintln!("\nComputing for n = {}...", depth);
        }
    }

    fn on_trials(&mut self, completed: usize, total: usize) {
        if !self.enabled || self.finished {
            return;
        }
        let mut err = std::io::stderr().lock();
        // Progress output is best-effort.
        let _ = write!(err, "{}\r", render_bar(completed, total, BAR_WIDTH));
        if completed >= total {
            let _ = writeln!(err);
            self.finished = true;
        }
        let _ = err.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_empty_half_full() {
        assert_eq!(render_bar(0, 10, 10), "[----------] 0%");
        assert_eq!(render_bar(5, 10, 10), "[#####-----] 50%");
        assert_eq!(render_bar(10, 10, 10), "[##########] 100%");
    }

    #[test]
    fn test_bar_width_is_bounded() {
        let bar = render_bar(1, 3, BAR_WIDTH);
        assert_eq!(bar.matches('#').count() + bar.matches('-').count(), BAR_WIDTH);
        assert!(bar.ends_with("] 33%"));
        let over = render_bar(7, 3, BAR_WIDTH);
        assert!(over.ends_with("] 100%"));
    }
}
