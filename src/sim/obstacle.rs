//! Obstacle pairs and the track that holds them
//!
//! A pair is a top segment hanging from y = 0 and a bottom segment standing on
//! the ground, separated by a vertical gap. The track is a ring buffer: new
//! pairs are pushed at the back (rightmost), old pairs leave from the front.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (origin top-left, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Closest point inside the rectangle to `p`
    #[inline]
    pub fn clamp_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x.clamp(self.x, self.x + self.w),
            p.y.clamp(self.y, self.y + self.h),
        )
    }
}

/// The upper segment; `passed` marks a pair already scored
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TopSegment {
    pub y: f32,
    pub h: f32,
    pub passed: bool,
}

/// The lower segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BottomSegment {
    pub y: f32,
    pub h: f32,
}

/// One obstacle: top and bottom segments sharing an x position and width
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstaclePair {
    pub x: f32,
    pub w: f32,
    /// Opening height; `bottom.y == top.h + gap`
    pub gap: f32,
    pub top: TopSegment,
    pub bottom: BottomSegment,
}

impl ObstaclePair {
    /// Build a pair whose opening is centered on `gap_center`.
    ///
    /// The gap is limited to the playable height and the opening is kept
    /// inside `[0, playable_height]`, so `top.h + gap + bottom.h ==
    /// playable_height` holds for any input.
    pub fn centered(x: f32, w: f32, gap_center: f32, gap: f32, playable_height: f32) -> Self {
        let playable_height = playable_height.max(0.0);
        let gap = gap.clamp(0.0, playable_height);
        let top_h = (gap_center - gap / 2.0).clamp(0.0, playable_height - gap);
        let bottom_y = top_h + gap;
        Self {
            x,
            w,
            gap,
            top: TopSegment {
                y: 0.0,
                h: top_h,
                passed: false,
            },
            bottom: BottomSegment {
                y: bottom_y,
                h: playable_height - bottom_y,
            },
        }
    }

    /// Vertical center of the opening
    #[inline]
    pub fn gap_center(&self) -> f32 {
        self.top.h + self.gap / 2.0
    }

    #[inline]
    pub fn right_edge(&self) -> f32 {
        self.x + self.w
    }

    pub fn top_rect(&self) -> Rect {
        Rect::new(self.x, self.top.y, self.w, self.top.h)
    }

    pub fn bottom_rect(&self) -> Rect {
        Rect::new(self.x, self.bottom.y, self.w, self.bottom.h)
    }

    /// Height of the vertical window open through both `self` and `next`
    pub fn shared_opening(&self, next: &ObstaclePair) -> f32 {
        let upper = self.top.h.max(next.top.h);
        let lower = self.bottom.y.min(next.bottom.y);
        lower - upper
    }
}

/// Live obstacle pairs in left-to-right (= creation) order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ObstacleTrack {
    pairs: VecDeque<ObstaclePair>,
}

impl ObstacleTrack {
    /// Preallocate room for `capacity` simultaneous pairs
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pairs: VecDeque::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Most recently spawned (rightmost) pair
    pub fn newest(&self) -> Option<&ObstaclePair> {
        self.pairs.back()
    }

    /// Oldest (leftmost) pair
    pub fn oldest(&self) -> Option<&ObstaclePair> {
        self.pairs.front()
    }

    /// Append a freshly generated pair on the right
    pub fn push(&mut self, pair: ObstaclePair) {
        self.pairs.push_back(pair);
    }

    /// Move every pair left by `dx`
    pub fn shift(&mut self, dx: f32) {
        for pair in self.pairs.iter_mut() {
            pair.x -= dx;
        }
    }

    /// Drop pairs whose right edge is left of `-margin`; returns how many left.
    ///
    /// Pairs move in lockstep, so only the front can ever be out of range.
    pub fn evict_offscreen(&mut self, margin: f32) -> usize {
        let mut evicted = 0;
        while self
            .pairs
            .front()
            .is_some_and(|p| p.right_edge() <= -margin)
        {
            self.pairs.pop_front();
            evicted += 1;
        }
        evicted
    }

    pub fn clear(&mut self) {
        self.pairs.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &ObstaclePair> {
        self.pairs.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ObstaclePair> {
        self.pairs.iter_mut()
    }
}
