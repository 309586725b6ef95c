//! Short-lived wake particles dropped behind a moving boat.

use std::collections::VecDeque;

use glam::Vec2;

#[derive(Debug, Clone, Copy)]
pub struct WakeParticle {
    /// World XZ position
    pub position: Vec2,
    pub age_s: f32,
    pub lifetime_s: f32,
}

impl WakeParticle {
    /// Fraction of life used, in [0, 1]
    pub fn life_fraction(&self) -> f32 {
        (self.age_s / self.lifetime_s).clamp(0.0, 1.0)
    }

    /// Fades linearly from 1 to 0
    pub fn opacity(&self) -> f32 {
        1.0 - self.life_fraction()
    }

    /// Grows linearly from 1 to `1 + growth`
    pub fn scale(&self, growth: f32) -> f32 {
        1.0 + growth * self.life_fraction()
    }
}

/// Bounded FIFO of wake particles; the oldest is evicted when full
#[derive(Debug, Clone, Default)]
pub struct Wake {
    particles: VecDeque<WakeParticle>,
}

impl Wake {
    /// Age every particle by `dt_s` and drop the ones past their lifetime
    pub fn age(&mut self, dt_s: f32) {
        for particle in &mut self.particles {
            particle.age_s += dt_s;
        }
        self.particles
            .retain(|particle| particle.age_s < particle.lifetime_s);
    }

    pub fn emit(&mut self, position: Vec2, lifetime_s: f32, max_particles: usize) {
        if max_particles == 0 {
            return;
        }
        while self.particles.len() >= max_particles {
            self.particles.pop_front();
        }
        self.particles.push_back(WakeParticle {
            position,
            age_s: 0.0,
            lifetime_s,
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &WakeParticle> {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_particles_fade_and_grow_then_expire() {
        let mut wake = Wake::default();
        wake.emit(Vec2::ZERO, 1.0, 8);

        let mut last_opacity = f32::MAX;
        let mut last_scale = 0.0;
        for _ in 0..9 {
            let particle = *wake.iter().next().unwrap();
            assert!(particle.opacity() <= last_opacity);
            assert!(particle.scale(2.0) >= last_scale);
            last_opacity = particle.opacity();
            last_scale = particle.scale(2.0);
            wake.age(0.1);
        }

        wake.age(0.2);
        assert!(wake.is_empty());
    }

    #[test]
    fn test_bounded_capacity_evicts_oldest() {
        let mut wake = Wake::default();
        for i in 0..5 {
            wake.emit(Vec2::new(i as f32, 0.0), 1.0, 3);
        }
        assert_eq!(wake.len(), 3);
        assert_eq!(wake.iter().next().unwrap().position.x, 2.0);
    }
}
