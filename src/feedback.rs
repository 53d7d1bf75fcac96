//! Feedback for the player: sound cues and particle bursts
//!
//! The simulation only emits `GameEvent`s. Whatever plays sounds or spawns
//! particles plugs in through `CuePlayer` and `ParticlePlayer`.

use crate::sim::{GameEvent, Reaction};

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Customer walks in
    DoorBell,
    /// Customer got the right pizza
    HappyChime,
    /// Coins dropped in the till
    CashRegister,
    /// Wrong pizza or waited too long
    AngryGrumble,
    /// Pizza done baking
    OvenDing,
    /// Pizza burnt
    SmokeAlarm,
    /// Serve pressed with nobody there
    Buzz,
    /// Money goal met
    Fanfare,
}

/// Particle effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleBurst {
    Coins,
    Steam,
    Smoke,
    AngryPuff,
    Confetti,
}

/// Something that can play a sound cue at a volume in [0, 1]
pub trait CuePlayer {
    fn play(&mut self, cue: SoundCue, volume: f32);
}

/// Something that can spawn a particle effect
pub trait ParticlePlayer {
    fn burst(&mut self, burst: ParticleBurst);
}

/// Cues and bursts for a single event
pub fn cues_for(event: &GameEvent) -> (Vec<SoundCue>, Vec<ParticleBurst>) {
    match event {
        GameEvent::CustomerArrived { .. } => (vec![SoundCue::DoorBell], vec![]),
        GameEvent::CustomerReacted { reaction, .. } => match reaction {
            Reaction::Happy => (
                vec![SoundCue::HappyChime, SoundCue::CashRegister],
                vec![ParticleBurst::Coins],
            ),
            Reaction::AngryTimeout | Reaction::AngryWrongOrder => {
                (vec![SoundCue::AngryGrumble], vec![ParticleBurst::AngryPuff])
            }
        },
        GameEvent::CustomerLeft { .. } => (vec![], vec![]),
        GameEvent::ServeIgnored => (vec![SoundCue::Buzz], vec![]),
        GameEvent::PizzaCooked => (vec![SoundCue::OvenDing], vec![ParticleBurst::Steam]),
        GameEvent::PizzaBurnt => (vec![SoundCue::SmokeAlarm], vec![ParticleBurst::Smoke]),
        GameEvent::GoalReached { .. } => (vec![SoundCue::Fanfare], vec![ParticleBurst::Confetti]),
    }
}

/// Routes simulation events to the cue and particle players
pub struct Feedback<A: CuePlayer, P: ParticlePlayer> {
    pub audio: A,
    pub particles: P,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<A: CuePlayer, P: ParticlePlayer> Feedback<A, P> {
    pub fn new(audio: A, particles: P) -> Self {
        Self {
            audio,
            particles,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play everything the events call for. Sounds are skipped when silent,
    /// particles always play.
    pub fn dispatch(&mut self, events: &[GameEvent]) {
        let vol = self.effective_volume();
        for event in events {
            let (sounds, bursts) = cues_for(event);
            if vol > 0.0 {
                for cue in sounds {
                    self.audio.play(cue, vol);
                }
            }
            for burst in bursts {
                self.particles.burst(burst);
            }
        }
    }
}

/// Headless player that writes cues to the log
#[derive(Debug, Default)]
pub struct LogFeedback;

impl CuePlayer for LogFeedback {
    fn play(&mut self, cue: SoundCue, volume: f32) {
        log::debug!("sound {:?} at {:.2}", cue, volume);
    }
}

impl ParticlePlayer for LogFeedback {
    fn burst(&mut self, burst: ParticleBurst) {
        log::debug!("particles {:?}", burst);
    }
}
