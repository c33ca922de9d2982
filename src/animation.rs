//! Frame-timed image sequences.
//!
//! An [`AnimationTemplate`] lives in the asset registry and is never mutated.
//! Every entity or particle plays its own [`Animation`], created from a
//! template, which shares the frame list but keeps a private frame counter.

use std::rc::Rc;

use crate::assets::ImageId;
use crate::error::AnimationError;

/// Immutable animation definition stored in the asset registry.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationTemplate {
    frames: Rc<[ImageId]>,
    frame_duration: u32,
    looping: bool,
}

impl AnimationTemplate {
    /// Checked once here so playback never has to.
    pub fn new(
        frames: Vec<ImageId>,
        frame_duration: u32,
        looping: bool,
    ) -> Result<Self, AnimationError> {
        if frames.is_empty() {
            return Err(AnimationError::NoFrames);
        }
        if frame_duration == 0 {
            return Err(AnimationError::ZeroDuration);
        }
        Ok(Self {
            frames: frames.into(),
            frame_duration,
            looping,
        })
    }

    /// Start a fresh playback of this template.
    pub fn instance(&self) -> Animation {
        Animation {
            frames: Rc::clone(&self.frames),
            frame_duration: self.frame_duration,
            looping: self.looping,
            frame: 0,
            done: false,
        }
    }

    /// Number of distinct images.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

/// Per-instance playback state over a shared frame list.
#[derive(Debug, PartialEq)]
pub struct Animation {
    frames: Rc<[ImageId]>,
    frame_duration: u32,
    looping: bool,
    frame: u32,
    done: bool,
}

impl Animation {
    /// Total ticks in one pass over the frames.
    #[inline]
    fn span(&self) -> u32 {
        self.frame_duration * self.frames.len() as u32
    }

    /// Advance one tick.
    pub fn advance(&mut self) {
        if self.looping {
            self.frame = (self.frame + 1) % self.span();
        } else {
            let last = self.span() - 1;
            self.frame = (self.frame + 1).min(last);
            if self.frame >= last {
                self.done = true;
            }
        }
    }

    /// Image shown at the current tick.
    pub fn current_image(&self) -> ImageId {
        self.frames[(self.frame / self.frame_duration) as usize]
    }

    /// A new playback sharing the same frames, rewound to the start.
    pub fn fresh(&self) -> Animation {
        Animation {
            frames: Rc::clone(&self.frames),
            frame_duration: self.frame_duration,
            looping: self.looping,
            frame: 0,
            done: false,
        }
    }

    /// Current tick within the span.
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Jump to an arbitrary tick, clamped into the animation's span.
    pub fn set_frame(&mut self, frame: u32) {
        self.frame = frame.min(self.span() - 1);
    }

    /// True once a one-shot animation reached its last tick.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Whether playback wraps around.
    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// True when both play the same frame list.
    pub fn shares_frames_with(&self, other: &Animation) -> bool {
        Rc::ptr_eq(&self.frames, &other.frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames(n: u32) -> Vec<ImageId> {
        (0..n).map(ImageId).collect()
    }

    #[test]
    fn looping_animation_wraps_after_full_span() {
        let mut anim = AnimationTemplate::new(frames(3), 5, true).unwrap().instance();
        anim.advance();
        assert_eq!(anim.frame(), 1);
        for _ in 1..15 {
            anim.advance();
        }
        assert_eq!(anim.frame(), 0);
        assert!(!anim.is_done());
    }

    #[test]
    fn one_shot_animation_stops_on_last_tick() {
        let mut anim = AnimationTemplate::new(frames(2), 4, false).unwrap().instance();
        for _ in 0..6 {
            anim.advance();
            assert!(!anim.is_done());
        }
        anim.advance();
        assert_eq!(anim.frame(), 7);
        assert!(anim.is_done());

        for _ in 0..20 {
            anim.advance();
            assert_eq!(anim.frame(), 7);
            assert!(anim.is_done());
        }
    }

    #[test]
    fn current_image_follows_frame_duration() {
        let mut anim = AnimationTemplate::new(frames(3), 2, true).unwrap().instance();
        let mut seen = Vec::new();
        for _ in 0..6 {
            seen.push(anim.current_image());
            anim.advance();
        }
        assert_eq!(
            seen,
            vec![ImageId(0), ImageId(0), ImageId(1), ImageId(1), ImageId(2), ImageId(2)]
        );
    }

    #[test]
    fn fresh_copy_rewinds_but_shares_frames() {
        let mut anim = AnimationTemplate::new(frames(1), 3, false).unwrap().instance();
        for _ in 0..5 {
            anim.advance();
        }
        assert!(anim.is_done());

        let copy = anim.fresh();
        assert_eq!(copy.frame(), 0);
        assert!(!copy.is_done());
        assert!(copy.shares_frames_with(&anim));
    }

    #[test]
    fn rejects_empty_or_zero_duration_templates() {
        assert_eq!(AnimationTemplate::new(Vec::new(), 4, true), Err(AnimationError::NoFrames));
        assert_eq!(AnimationTemplate::new(frames(2), 0, false), Err(AnimationError::ZeroDuration));
    }
}
