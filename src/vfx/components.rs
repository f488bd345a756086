//! Components for individual state effect handles.

use bevy::prelude::*;
use std::time::Duration;

use crate::data::{AnimationDef, AnimationId};

/// One looping state effect attached under a battler sprite.
///
/// Effects are self-contained: a tinted quad stepping through a fixed number
/// of alpha frames at the definition's frame rate.
#[derive(Component, Debug)]
pub struct StateEffectAnim {
    pub animation_id: AnimationId,
    frame: u32,
    frames: u32,
    timer: Timer,
}

impl StateEffectAnim {
    pub fn new(def: &AnimationDef) -> Self {
        Self {
            animation_id: def.id,
            frame: 0,
            frames: def.frames.max(1),
            timer: Timer::from_seconds(1.0 / def.frame_rate.max(0.01), TimerMode::Repeating),
        }
    }

    /// Advance the effect by one frame tick's worth of time.
    pub fn tick(&mut self, delta: Duration) {
        self.timer.tick(delta);
        // A long frame can step more than once
        let steps = self.timer.times_finished_this_tick();
        self.frame = (self.frame + steps) % self.frames;
    }

    /// Current opacity: fades across the frame cycle, then wraps.
    pub fn alpha(&self) -> f32 {
        let t = self.frame as f32 / self.frames as f32;
        0.85 - 0.6 * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def() -> AnimationDef {
        AnimationDef {
            id: 11,
            name: "Test Haze".to_string(),
            color: (0.3, 0.8, 0.4),
            frames: 4,
            frame_rate: 10.0,
            size: 48.0,
        }
    }

    #[test]
    fn frames_wrap_around() {
        let mut anim = StateEffectAnim::new(&def());
        // 10 fps, 4 frames: half a second is 5 steps, landing on frame 1
        anim.tick(Duration::from_millis(500));
        assert_eq!(anim.frame, 1);
    }

    #[test]
    fn alpha_stays_in_range() {
        let mut anim = StateEffectAnim::new(&def());
        for _ in 0..8 {
            anim.tick(Duration::from_millis(100));
            assert!(anim.alpha() > 0.0 && anim.alpha() <= 0.85);
        }
    }
}
