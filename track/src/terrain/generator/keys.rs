use std::f64::consts::PI;

use log::{debug, info, warn};
use slope_terrain::coords::KeyPoint;

use crate::terrain::config::TrackConfig;
use crate::terrain::generator::PositionalRng;

/// Farthest the anchor height is walked slope by slope before the walk is
/// reseeded from the anchor position alone.
pub const MAX_WALK_SLOPES: i64 = 1 << 16;

// Keeps grid indices exact in f64 and clear of i64 overflow.
const MAX_KEY_INDEX: i64 = 1 << 52;

/// Most top-surface samples a key window may tessellate into.
pub const MAX_WINDOW_SAMPLES: usize = 1 << 20;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyTrackSettings {
    pub slope_length: f64,
    pub min_height: f64,
    pub max_height: f64,
    pub base_height: f64,
    pub base_depth: f64,
    pub segments_per_slope: u32,
}

impl KeyTrackSettings {
    pub fn from_config(config: &TrackConfig) -> Self {
        Self {
            slope_length: config.slope_length as f64,
            min_height: config.slope_min_height as f64,
            max_height: config.slope_max_height as f64,
            base_height: config.base_height as f64,
            base_depth: config.base_depth as f64,
            segments_per_slope: config.segments_per_slope,
        }
    }

    fn segment_width(&self) -> f64 {
        self.slope_length / self.segments_per_slope as f64
    }

    /// Largest key window whose samples stay within [`MAX_WINDOW_SAMPLES`].
    pub fn max_window_keys(&self) -> usize {
        let segments = self.segments_per_slope.max(1) as usize;
        (MAX_WINDOW_SAMPLES - 1) / segments + 1
    }

    /// Keys needed to cover `width`: one per slope plus both ends. `None` when
    /// that exceeds [`max_window_keys`](Self::max_window_keys).
    pub fn window_keys(&self, width: f64) -> Option<usize> {
        let slopes = (width / self.slope_length).ceil();
        if !slopes.is_finite() {
            return None;
        }
        let count = (slopes.max(0.0) as usize).checked_add(2)?;
        (count <= self.max_window_keys()).then_some(count)
    }

    fn clamped_window_keys(&self, width: f64) -> usize {
        self.window_keys(width).unwrap_or_else(|| {
            let count = self.max_window_keys().max(2);
            warn!("Viewport width {} needs too many keys; clamping to {}", width, count);
            count
        })
    }
}

/// Sliding window of key points covering the visible X range.
///
/// Keys sit on a fixed grid, `x = start_x + index * slope_length`, and their
/// heights form a random walk: each key adds
/// `rng.range_float(x, min_height, max_height)` to the previous one.
#[derive(Clone, Debug)]
pub struct KeyTrack {
    rng: PositionalRng,
    settings: KeyTrackSettings,
    start_x: f64,
    first_index: i64,
    keys: Vec<KeyPoint>,
    previous_width: f64,
    additional_segments: f64,
}

impl KeyTrack {
    /// Builds the first window, centred over `[left, right]`.
    pub fn new(rng: PositionalRng, settings: KeyTrackSettings, left: f64, right: f64) -> Self {
        let width = visible_width(left, right);
        let count = settings.clamped_window_keys(width);
        let span = settings.slope_length * (count - 1) as f64;
        let start_x = left - (span - width) / 2.0;

        let mut track = Self {
            rng,
            settings,
            start_x,
            first_index: 0,
            keys: Vec::with_capacity(count),
            previous_width: width,
            additional_segments: 0.0,
        };
        let first_y = track.seeded_height(0);
        track.fill(0, first_y, count);

        info!("Key track starts at x={} with {} keys", start_x, count);
        track
    }

    /// Re-anchors the window at the slope boundary just left of `left` and
    /// regenerates it to cover the current viewport width.
    pub fn rebuild(&mut self, left: f64, right: f64) {
        let width = visible_width(left, right);
        let count = self.settings.clamped_window_keys(width);
        let anchor = self.anchor_index(left);

        if anchor != self.first_index || count != self.keys.len() {
            debug!(
                "Key window moves from #{} ({} keys) to #{} ({} keys)",
                self.first_index,
                self.keys.len(),
                anchor,
                count
            );
        }

        let anchor_y = self.walk_to(anchor);
        self.fill(anchor, anchor_y, count);

        let delta_width = width - self.previous_width;
        self.additional_segments += (delta_width / 2.0) / self.settings.segment_width();
        self.previous_width = width;
    }

    /// Drops whole segments from the resize drift, keeping it in `(-1, 1)`.
    pub fn settle_drift(&mut self) {
        self.additional_segments = self.additional_segments.fract();
    }

    pub fn keys(&self) -> &[KeyPoint] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn start_x(&self) -> f64 {
        self.start_x
    }

    /// Grid index of the leftmost key.
    pub fn first_index(&self) -> i64 {
        self.first_index
    }

    /// Horizontal drift, in segments, caused by viewport width changes.
    pub fn additional_segments(&self) -> f64 {
        self.additional_segments
    }

    pub fn settings(&self) -> &KeyTrackSettings {
        &self.settings
    }

    pub fn rng(&self) -> PositionalRng {
        self.rng
    }

    /// X of the key with grid index `index`.
    pub fn x_at(&self, index: i64) -> f64 {
        self.start_x + index as f64 * self.settings.slope_length
    }

    /// Height of the interpolated top surface at `x`, if the window covers it.
    pub fn surface_height(&self, x: f64) -> Option<f64> {
        let first = self.keys.first()?;
        let offset = (x - first.x) / self.settings.slope_length;
        if offset.is_nan() || offset < 0.0 {
            return None;
        }
        let interval = (offset.floor() as usize).min(self.keys.len().saturating_sub(2));
        let (a, b) = (self.keys.get(interval)?, self.keys.get(interval + 1)?);
        if x > b.x {
            return None;
        }
        let t = (x - a.x) / (b.x - a.x);
        let y_mid = (a.y + b.y) / 2.0;
        let amplitude = (a.y - b.y) / 2.0;
        Some(y_mid + amplitude * (PI * t).cos())
    }

    fn anchor_index(&self, left: f64) -> i64 {
        let offset = ((left - self.start_x) / self.settings.slope_length).round();
        let mut index = (offset as i64).clamp(-MAX_KEY_INDEX, MAX_KEY_INDEX);
        if self.x_at(index) >= left {
            index -= 1;
        }
        index
    }

    fn delta_at(&self, index: i64) -> f64 {
        self.rng
            .range_float(self.x_at(index), self.settings.min_height, self.settings.max_height)
    }

    fn seeded_height(&self, index: i64) -> f64 {
        self.settings.base_height + self.delta_at(index)
    }

    // Height of `index` continuing the walk of the current window.
    fn walk_to(&self, index: i64) -> f64 {
        let (Some(first), Some(last)) = (self.keys.first(), self.keys.last()) else {
            return self.seeded_height(index);
        };
        let first_index = self.first_index;
        let last_index = first_index + self.keys.len() as i64 - 1;

        if (first_index..=last_index).contains(&index) {
            return self.keys[(index - first_index) as usize].y;
        }

        let distance = if index > last_index {
            index - last_index
        } else {
            first_index - index
        };
        if distance > MAX_WALK_SLOPES {
            warn!(
                "Key window jumped {} slopes; reseeding the walk at #{}",
                distance, index
            );
            return self.seeded_height(index);
        }

        if index > last_index {
            ((last_index + 1)..=index).fold(last.y, |y, i| y + self.delta_at(i))
        } else {
            ((index + 1)..=first_index).rev().fold(first.y, |y, i| y - self.delta_at(i))
        }
    }

    fn fill(&mut self, first_index: i64, first_y: f64, count: usize) {
        let z = self.settings.base_depth;
        let mut keys = Vec::with_capacity(count);
        let mut y = first_y;
        keys.push(KeyPoint::new(self.x_at(first_index), y, z));
        for index in (first_index + 1)..(first_index + count as i64) {
            y += self.delta_at(index);
            keys.push(KeyPoint::new(self.x_at(index), y, z));
        }
        self.keys = keys;
        self.first_index = first_index;
    }
}

fn visible_width(left: f64, right: f64) -> f64 {
    let width = right - left;
    if width.is_finite() {
        width.max(0.0)
    } else {
        0.0
    }
}
