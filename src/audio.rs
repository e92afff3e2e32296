//! Sound clips and the audio contract
//!
//! Playback itself belongs to the host. The core only names clips, starts
//! one-shots and owns looping handles.

use serde::{Deserialize, Serialize};

/// Sound clip identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Clip {
    /// Blade swoosh while swiping (three variants)
    Swoosh1,
    Swoosh2,
    Swoosh3,
    /// Penguin launched
    Launch,
    /// Penguin sliced
    Whack,
    /// Bomb sliced
    Explosion,
    /// Penguin missed
    Wrong,
    /// Lit fuse (looped while a bomb is airborne)
    BombFuse,
}

impl Clip {
    /// Swoosh variant for a 1-based index (out of range clamps to the ends)
    pub fn swoosh(variant: i32) -> Self {
        match variant {
            i32::MIN..=1 => Clip::Swoosh1,
            2 => Clip::Swoosh2,
            _ => Clip::Swoosh3,
        }
    }

    /// Asset file name the host should load for this clip
    pub fn file_name(&self) -> &'static str {
        match self {
            Clip::Swoosh1 => "swoosh1.caf",
            Clip::Swoosh2 => "swoosh2.caf",
            Clip::Swoosh3 => "swoosh3.caf",
            Clip::Launch => "launch.caf",
            Clip::Whack => "whack.caf",
            Clip::Explosion => "explosion.caf",
            Clip::Wrong => "wrong.caf",
            Clip::BombFuse => "sliceBombFuse.caf",
        }
    }

    /// Nominal clip length in seconds, for hosts that cannot report one
    pub fn nominal_duration(&self) -> f32 {
        match self {
            Clip::Swoosh1 | Clip::Swoosh2 | Clip::Swoosh3 => 0.4,
            Clip::Launch => 0.3,
            Clip::Whack => 0.25,
            Clip::Explosion => 1.2,
            Clip::Wrong => 0.5,
            Clip::BombFuse => 1.0,
        }
    }
}

/// Handle to a looping sound started with [`AudioOut::play_looping`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoopId(pub u32);

/// Audio collaborator
pub trait AudioOut {
    /// Fire-and-forget playback. Returns the clip length in seconds so the
    /// caller can schedule its completion.
    fn play_one_shot(&mut self, clip: Clip) -> f32;
    /// Start a looping clip
    fn play_looping(&mut self, clip: Clip) -> LoopId;
    /// Stop a loop (unknown or already-stopped handles are ignored)
    fn stop(&mut self, id: LoopId);
    /// Whether a loop is still sounding
    fn is_playing(&self, id: LoopId) -> bool;
}

/// Audio backend that plays nothing but keeps track of what was asked of it
#[derive(Debug, Default)]
pub struct SilentAudio {
    /// Every one-shot, in order
    pub one_shots: Vec<Clip>,
    /// Loops currently "playing"
    pub loops: Vec<(LoopId, Clip)>,
    /// Total loops ever started
    pub loops_started: u32,
    next_loop: u32,
}

impl SilentAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of loops of `clip` still running
    pub fn playing_count(&self, clip: Clip) -> usize {
        self.loops.iter().filter(|(_, c)| *c == clip).count()
    }
}

impl AudioOut for SilentAudio {
    fn play_one_shot(&mut self, clip: Clip) -> f32 {
        log::trace!("one-shot {}", clip.file_name());
        self.one_shots.push(clip);
        clip.nominal_duration()
    }

    fn play_looping(&mut self, clip: Clip) -> LoopId {
        let id = LoopId(self.next_loop);
        self.next_loop += 1;
        self.loops_started += 1;
        log::trace!("loop {:?} {}", id, clip.file_name());
        self.loops.push((id, clip));
        id
    }

    fn stop(&mut self, id: LoopId) {
        self.loops.retain(|(loop_id, _)| *loop_id != id);
    }

    fn is_playing(&self, id: LoopId) -> bool {
        self.loops.iter().any(|(loop_id, _)| *loop_id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swoosh_variants() {
        assert_eq!(Clip::swoosh(1), Clip::Swoosh1);
        assert_eq!(Clip::swoosh(2), Clip::Swoosh2);
        assert_eq!(Clip::swoosh(3), Clip::Swoosh3);
        assert_eq!(Clip::swoosh(0), Clip::Swoosh1);
        assert_eq!(Clip::swoosh(9), Clip::Swoosh3);
    }

    #[test]
    fn test_silent_audio_loops() {
        let mut audio = SilentAudio::new();
        let a = audio.play_looping(Clip::BombFuse);
        let b = audio.play_looping(Clip::BombFuse);
        assert_ne!(a, b);
        assert!(audio.is_playing(a));
        audio.stop(a);
        assert!(!audio.is_playing(a));
        assert!(audio.is_playing(b));
        // Stopping twice is harmless
        audio.stop(a);
        assert_eq!(audio.playing_count(Clip::BombFuse), 1);
    }
}
