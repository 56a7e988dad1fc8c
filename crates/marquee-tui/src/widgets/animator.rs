//! Eases a drawn offset toward the transform the controllers last set.

use marquee_core::view::{Transform, Transition};

const EASE: f32 = 0.35;
/// Closer than this (in layout units) snaps to the target.
const SNAP: f32 = 2.0;

#[derive(Debug, Default, Clone, Copy)]
pub struct Animator {
    shown: f32,
    target: f32,
    primed: bool,
}

impl Animator {
    pub fn offset(&self) -> f32 {
        self.shown
    }

    pub fn is_moving(&self) -> bool {
        self.shown != self.target
    }

    /// Pick up the latest transform. Untransitioned moves and the very first
    /// placement jump straight to the target.
    pub fn retarget(&mut self, transform: Option<Transform>) {
        let Some(t) = transform else {
            return;
        };
        if !self.primed || t.transition == Transition::None {
            self.shown = t.offset;
            self.primed = true;
        }
        self.target = t.offset;
    }

    pub fn step(&mut self) {
        let delta = self.target - self.shown;
        if delta.abs() < SNAP {
            self.shown = self.target;
        } else {
            self.shown += delta * EASE;
        }
    }
}
