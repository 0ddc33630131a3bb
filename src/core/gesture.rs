use serde::{Deserialize, Serialize};

/// Distance and duration thresholds for tap/swipe disambiguation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GestureThresholds {
    /// Maximum press duration for a tap, in milliseconds.
    pub tap_max_duration_ms: i64,
    /// Maximum total movement for a tap, in pixels.
    pub tap_max_movement_px: f64,
    /// Minimum horizontal travel for a swipe, in pixels.
    pub swipe_min_distance_px: f64,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            tap_max_duration_ms: 200,
            tap_max_movement_px: 10.0,
            swipe_min_distance_px: 50.0,
        }
    }
}

/// Outcome of classifying one completed pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Classification {
    /// Short press with negligible movement; toggles expanded detail.
    Tap,
    /// Leftward disposal (pass).
    SwipeLeft,
    /// Rightward disposal (show interest).
    SwipeRight,
    /// A drag below threshold; the card snaps back, no state change.
    Ignored,
}

/// Captured state for one pointer-down-to-up interaction.
#[derive(Debug, Clone, Copy)]
pub struct GestureSample {
    pub start_x: f64,
    pub start_y: f64,
    pub start_time_ms: i64,
    pub last_x: f64,
    pub last_y: f64,
}

/// Converts a raw pointer event stream into a `Classification`.
///
/// One sample lives from `on_start` to `on_end`; a gesture that never
/// receives `on_end` (interrupted) is discarded by the next `on_start`,
/// so it can never misclassify the following gesture.
#[derive(Debug, Clone, Default)]
pub struct GestureClassifier {
    thresholds: GestureThresholds,
    sample: Option<GestureSample>,
}

impl GestureClassifier {
    pub fn new(thresholds: GestureThresholds) -> Self {
        Self { thresholds, sample: None }
    }

    /// Begin a new gesture, unconditionally discarding any prior sample.
    pub fn on_start(&mut self, x: f64, y: f64, time_ms: i64) {
        self.sample = Some(GestureSample {
            start_x: x,
            start_y: y,
            start_time_ms: time_ms,
            last_x: x,
            last_y: y,
        });
    }

    /// Track movement; returns the provisional horizontal offset used
    /// for live card-drag feedback. None if no gesture is in flight.
    pub fn on_move(&mut self, x: f64, y: f64) -> Option<f64> {
        let sample = self.sample.as_mut()?;
        sample.last_x = x;
        sample.last_y = y;
        Some(x - sample.start_x)
    }

    /// Complete the gesture and classify it.
    ///
    /// `expanded` is the presentation state of the current candidate:
    /// while expanded, swipe classification is suppressed so the card
    /// cannot be disposed of accidentally while reading detail.
    ///
    /// Returns None if no gesture was in flight. The sample is consumed
    /// either way.
    pub fn on_end(&mut self, x: f64, y: f64, time_ms: i64, expanded: bool) -> Option<Classification> {
        let sample = self.sample.take()?;

        let duration_ms = time_ms - sample.start_time_ms;
        let dx = x - sample.start_x;
        let dy = y - sample.start_y;
        let total_movement = (dx * dx + dy * dy).sqrt();

        if duration_ms < self.thresholds.tap_max_duration_ms
            && total_movement < self.thresholds.tap_max_movement_px
        {
            return Some(Classification::Tap);
        }

        if expanded {
            // Only a tap (to collapse) is honored while expanded.
            return Some(Classification::Ignored);
        }

        if -dx > self.thresholds.swipe_min_distance_px {
            Some(Classification::SwipeLeft)
        } else if dx > self.thresholds.swipe_min_distance_px {
            Some(Classification::SwipeRight)
        } else {
            Some(Classification::Ignored)
        }
    }

    /// Discard any in-flight sample (navigation away, filter reset).
    pub fn cancel(&mut self) {
        self.sample = None;
    }

    pub fn in_flight(&self) -> bool {
        self.sample.is_some()
    }
}
