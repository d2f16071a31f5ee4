//! Audio trigger points
//!
//! The engine never plays sound itself. Each tick it fires at most one of
//! each `SoundEffect` into an `AudioSink`; the host decides what to do with
//! them (including letting replays overlap).

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Ball hits a paddle
    PaddleHit,
    /// Ball hits the top or bottom wall
    WallHit,
    /// A point was scored
    Score,
}

impl SoundEffect {
    /// Asset name the original web build shipped for this effect
    pub fn asset_name(&self) -> &'static str {
        match self {
            SoundEffect::PaddleHit => "hit.mp3",
            SoundEffect::WallHit => "wall.mp3",
            SoundEffect::Score => "score.mp3",
        }
    }
}

/// Consumer of sound triggers
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Discards every trigger
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl AudioSink for Silent {
    fn play(&mut self, _effect: SoundEffect) {}
}

/// Records triggers in order; handy for hosts that batch playback
impl AudioSink for Vec<SoundEffect> {
    fn play(&mut self, effect: SoundEffect) {
        self.push(effect);
    }
}

/// Logs each trigger, with simple volume/mute controls
#[derive(Debug, Clone)]
pub struct LogAudio {
    volume: f32,
    muted: bool,
    played: u64,
}

impl Default for LogAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl LogAudio {
    pub fn new() -> Self {
        Self {
            volume: 0.8,
            muted: false,
            played: 0,
        }
    }

    /// Set volume (0.0 - 1.0)
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Number of triggers that were audible
    pub fn played(&self) -> u64 {
        self.played
    }
}

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect) {
        if self.muted || self.volume <= 0.0 {
            return;
        }
        self.played += 1;
        log::debug!("play {} at volume {:.2}", effect.asset_name(), self.volume);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_sink_records_in_order() {
        let mut sink: Vec<SoundEffect> = Vec::new();
        sink.play(SoundEffect::WallHit);
        sink.play(SoundEffect::Score);
        assert_eq!(sink, vec![SoundEffect::WallHit, SoundEffect::Score]);
    }

    #[test]
    fn test_log_audio_respects_mute_and_volume() {
        let mut audio = LogAudio::new();
        audio.play(SoundEffect::PaddleHit);
        assert_eq!(audio.played(), 1);

        audio.set_muted(true);
        audio.play(SoundEffect::PaddleHit);
        assert_eq!(audio.played(), 1);

        audio.set_muted(false);
        audio.set_volume(-1.0);
        audio.play(SoundEffect::Score);
        assert_eq!(audio.played(), 1);
    }
}
