//! Registry of live waves.
//!
//! A wavefront, its breaking wave and its collision volume live in one `Wave`
//! record, so removing one can never desynchronize the others.

use log::debug;

use super::{BreakingWave, CollisionVolume, Wavefront};
use crate::params::WaveParams;

/// Stable handle to a wave, never reused within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WaveId(pub u64);

/// One wavefront with its dependents
#[derive(Debug, Clone)]
pub struct Wave {
    pub id: WaveId,
    pub front: Wavefront,
    /// `None` once the breaking wave has finished
    pub breaker: Option<BreakingWave>,
    /// Present exactly while `breaker` is
    pub volume: Option<CollisionVolume>,
}

#[derive(Debug, Default)]
pub struct WaveRegistry {
    waves: Vec<Wave>,
    next_id: u64,
}

impl WaveRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a wavefront with its breaking wave; the volume is derived here
    pub fn insert(&mut self, front: Wavefront, breaker: BreakingWave) -> WaveId {
        let id = WaveId(self.next_id);
        self.next_id += 1;
        let volume = CollisionVolume::new(&front);
        self.waves.push(Wave {
            id,
            front,
            breaker: Some(breaker),
            volume: Some(volume),
        });
        id
    }

    /// Advance breaking waves and volumes to `time_s` and drop finished breakers.
    ///
    /// Volumes on wavefronts that expire this frame get an inert update here,
    /// before `prune_expired` removes the record.
    pub fn advance(&mut self, time_s: f32, params: &WaveParams) {
        for wave in &mut self.waves {
            let front_expired = wave.front.is_expired(time_s);

            if let Some(breaker) = wave.breaker.as_mut() {
                breaker.update(time_s, params);
            }

            if let Some(volume) = wave.volume.as_mut() {
                match wave.breaker.as_ref() {
                    Some(breaker) if !front_expired => {
                        volume.update(time_s, &wave.front, breaker, params)
                    }
                    _ => volume.deactivate(),
                }
            }

            if wave.breaker.as_ref().is_some_and(BreakingWave::is_done) {
                debug!("Breaking wave on {:?} finished", wave.id);
                wave.breaker = None;
                wave.volume = None;
            }
        }
    }

    /// Remove every wave whose wavefront has expired; returns how many went
    pub fn prune_expired(&mut self, time_s: f32) -> usize {
        let before = self.waves.len();
        self.waves.retain(|wave| !wave.front.is_expired(time_s));
        let removed = before - self.waves.len();
        if removed > 0 {
            debug!("Pruned {} expired wavefronts, {} live", removed, self.waves.len());
        }
        removed
    }

    pub fn get(&self, id: WaveId) -> Option<&Wave> {
        self.waves.iter().find(|wave| wave.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Wave> {
        self.waves.iter()
    }

    /// All live wavefronts, for the height field
    pub fn fronts(&self) -> impl Iterator<Item = &Wavefront> {
        self.waves.iter().map(|wave| &wave.front)
    }

    /// Volumes currently able to collide
    pub fn active_volumes(&self) -> impl Iterator<Item = &CollisionVolume> {
        self.waves
            .iter()
            .filter_map(|wave| wave.volume.as_ref())
            .filter(|volume| volume.is_active())
    }

    pub fn len(&self) -> usize {
        self.waves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waves.is_empty()
    }
}
