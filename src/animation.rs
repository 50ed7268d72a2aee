//! Animation frames built from a trace.
//!
//! One `Frame` per trace step. Frames can be drawn as text bar charts for
//! terminal playback or exported as a JSON array.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::algorithms::Algorithm;
use crate::error::{OutputError, SortLabResult};
use crate::trace::{StepKind, Trace};
use crate::value::Value;

/// Width in columns of the longest bar.
pub const BAR_WIDTH: usize = 40;

/// Height of an element when drawn as a bar.
pub trait BarHeight {
    /// `None` for elements with no numeric height.
    fn bar_height(&self) -> Option<f64>;
}

macro_rules! impl_bar_height {
    ($($t:ty),* $(,)?) => {
        $(
            impl BarHeight for $t {
                #[allow(clippy::cast_precision_loss, clippy::cast_lossless)]
                fn bar_height(&self) -> Option<f64> {
                    Some(*self as f64)
                }
            }
        )*
    };
}

impl_bar_height!(i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64);

impl BarHeight for Value {
    fn bar_height(&self) -> Option<f64> {
        self.as_float()
    }
}

/// A single rendered state of the sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame<T> {
    /// Sequence contents after the step.
    pub values: Vec<T>,
    /// Positions touched by the step.
    pub highlights: Vec<usize>,
    /// Kind of the step the frame shows.
    pub kind: StepKind,
    /// "Step k/N", 1-based.
    pub caption: String,
}

impl<T: BarHeight + std::fmt::Display> Frame<T> {
    /// Draws the frame as horizontal bars, one line per element.
    ///
    /// Highlighted positions are marked with `>`. Elements without a numeric
    /// height are drawn as `?`.
    #[must_use]
    pub fn render_text(&self) -> String {
        let heights: Vec<Option<f64>> = self.values.iter().map(BarHeight::bar_height).collect();
        let (lo, hi) = heights
            .iter()
            .flatten()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &h| (lo.min(h), hi.max(h)));
        let span = if hi > lo { hi - lo } else { 0.0 };
        let labels: Vec<String> = self.values.iter().map(ToString::to_string).collect();
        let label_width = labels.iter().map(String::len).max().unwrap_or(0);

        let mut out = String::new();
        let _ = writeln!(out, "{} [{}]", self.caption, self.kind);
        for (idx, (label, height)) in labels.iter().zip(&heights).enumerate() {
            let marker = if self.highlights.contains(&idx) { '>' } else { ' ' };
            let bar = match height {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                Some(h) if span > 0.0 => {
                    let len = ((h - lo) / span * (BAR_WIDTH - 1) as f64).round() as usize + 1;
                    "#".repeat(len)
                }
                Some(_) => "#".repeat(BAR_WIDTH / 2),
                None => "?".to_string(),
            };
            let _ = writeln!(out, "{marker} {label:>label_width$} | {bar}");
        }
        out
    }
}

/// Frames for one traced run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animation<T> {
    /// Algorithm that produced the trace.
    pub algorithm: Algorithm,
    /// One frame per trace step.
    pub frames: Vec<Frame<T>>,
}

impl<T: Clone> Animation<T> {
    /// Builds one frame per step of `trace`.
    #[must_use]
    pub fn from_trace(algorithm: Algorithm, trace: &Trace<T>) -> Self {
        let total = trace.len();
        let frames = trace
            .iter()
            .enumerate()
            .map(|(k, step)| Frame {
                values: step.snapshot.clone(),
                highlights: step.indices.clone(),
                kind: step.kind,
                caption: format!("Step {}/{}", k + 1, total),
            })
            .collect();
        Self { algorithm, frames }
    }
}

impl<T> Animation<T> {
    /// Number of frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns true if the trace had no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// File name used when exporting.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("sorting_animation_{}.json", self.algorithm.name())
    }
}

impl<T: Serialize> Animation<T> {
    /// Frames as a pretty JSON array.
    pub fn to_json(&self) -> SortLabResult<String> {
        Ok(serde_json::to_string_pretty(&self.frames)?)
    }

    /// Writes `sorting_animation_{alg}.json` into `dir` and returns its path.
    pub fn save_json(&self, dir: impl AsRef<Path>) -> SortLabResult<PathBuf> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir).map_err(|e| OutputError::io(dir, e))?;
        let path = dir.join(self.file_name());
        std::fs::write(&path, self.to_json()?).map_err(|e| OutputError::io(&path, e))?;
        Ok(path)
    }
}

/// Delay between frames at `fps` frames per second. Zero is treated as one.
#[must_use]
pub fn frame_interval(fps: u32) -> Duration {
    Duration::from_secs(1) / fps.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SortOptions;
    use crate::engine::SortEngine;

    fn traced(alg: Algorithm, input: &[i64]) -> Animation<i64> {
        let run = SortEngine::new(SortOptions::default())
            .run_traced(alg, input)
            .unwrap();
        Animation::from_trace(alg, &run.trace)
    }

    #[test]
    fn test_one_frame_per_step() {
        let run = SortEngine::default()
            .run_traced(Algorithm::Bubble, &[3_i64, 1, 2])
            .unwrap();
        let anim = Animation::from_trace(Algorithm::Bubble, &run.trace);
        assert_eq!(anim.len(), run.trace.len());
        assert_eq!(anim.frames[0].caption, format!("Step 1/{}", run.trace.len()));
        assert_eq!(anim.frames[0].kind, StepKind::Compare);
        assert_eq!(anim.frames[0].highlights, vec![0, 1]);
        assert_eq!(anim.frames.last().unwrap().values, vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_input_has_no_frames() {
        let anim = traced(Algorithm::Quick, &[]);
        assert!(anim.is_empty());
        assert_eq!(anim.to_json().unwrap().trim(), "[]");
    }

    #[test]
    fn test_render_text_marks_highlights() {
        let frame = Frame {
            values: vec![1_i64, 5, 3],
            highlights: vec![1],
            kind: StepKind::Swap,
            caption: "Step 2/9".to_string(),
        };
        let text = frame.render_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Step 2/9 [swap]");
        assert!(lines[1].starts_with("  1 | #"));
        assert!(lines[2].starts_with("> 5 | "));
        assert!(lines[2].ends_with(&"#".repeat(BAR_WIDTH)));
        assert!(lines[1].ends_with(" #"));
    }

    #[test]
    fn test_render_text_with_text_values() {
        let frame = Frame {
            values: vec![Value::Text("b".into()), Value::Int(2)],
            highlights: vec![],
            kind: StepKind::Compare,
            caption: "Step 1/1".to_string(),
        };
        let text = frame.render_text();
        assert!(text.contains("| ?"));
    }

    #[test]
    fn test_save_json_uses_algorithm_name() {
        let dir = tempfile::tempdir().unwrap();
        let anim = traced(Algorithm::Insertion, &[2, 1]);
        let path = anim.save_json(dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "sorting_animation_insertion.json");
        let text = std::fs::read_to_string(path).unwrap();
        let frames: Vec<Frame<i64>> = serde_json::from_str(&text).unwrap();
        assert_eq!(frames, anim.frames);
    }

    #[test]
    fn test_frame_interval() {
        assert_eq!(frame_interval(20), Duration::from_millis(50));
        assert_eq!(frame_interval(0), Duration::from_secs(1));
    }
}
