//! Seasonal particle simulation.
//!
//! Particles are spawned in batches under a per-season [`SpawnPolicy`] and
//! advanced one fixed step per rendered frame. Anything that falls past the
//! bottom edge is recycled to the top, and horizontal drift wraps between the
//! side edges, so the field runs indefinitely without growing.

use std::f64::consts::TAU;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::season::Season;
use super::theme::{Color, theme_of};

/// Pixel buffer beyond the viewport edges where particles are recycled.
pub const WRAP_MARGIN: f64 = 10.0;

/// Visual family of a particle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleKind {
	/// Soft spring petal or pollen mote.
	Petal,
	/// Glowing summer firefly.
	Firefly,
	/// Tumbling autumn leaf.
	Leaf,
	/// Round winter snowflake with a glow.
	Snowflake,
}

/// Season-specific look, fixed at spawn time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Appearance {
	pub season: Season,
	pub kind: ParticleKind,
	pub color: Color,
	pub opacity: f64,
}

/// A single falling particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	/// Vertical speed in pixels per step (always positive: particles fall).
	pub speed_y: f64,
	/// Horizontal drift in pixels per step.
	pub drift_x: f64,
	pub size: f64,
	/// Rotation in radians, kept within one turn.
	pub rotation: f64,
	pub spin: f64,
	pub phase: f64, // For twinkling
	pub appearance: Appearance,
}

/// Sampling ranges for one season. Each pair is `(min, max)`.
#[derive(Clone, Copy, Debug)]
pub struct SpawnPolicy {
	pub kind: ParticleKind,
	pub fall: (f64, f64),
	pub drift: (f64, f64),
	pub size: (f64, f64),
	pub spin: (f64, f64),
	pub opacity: (f64, f64),
}

impl SpawnPolicy {
	pub fn for_season(season: Season) -> &'static SpawnPolicy {
		match season {
			Season::Spring => &SpawnPolicy {
				kind: ParticleKind::Petal,
				fall: (0.75, 1.15),
				drift: (-0.4, 0.4),
				size: (2.0, 4.0),
				spin: (-0.03, 0.03),
				opacity: (0.6, 0.9),
			},
			// Fireflies barely sink; they hover and wander.
			Season::Summer => &SpawnPolicy {
				kind: ParticleKind::Firefly,
				fall: (0.1, 0.3),
				drift: (-0.3, 0.3),
				size: (1.5, 3.0),
				spin: (0.0, 0.0),
				opacity: (0.5, 1.0),
			},
			Season::Autumn => &SpawnPolicy {
				kind: ParticleKind::Leaf,
				fall: (1.2, 2.2),
				drift: (-0.8, 0.8),
				size: (4.0, 8.0),
				spin: (-0.06, 0.06),
				opacity: (0.75, 0.95),
			},
			Season::Winter => &SpawnPolicy {
				kind: ParticleKind::Snowflake,
				fall: (0.35, 0.7),
				drift: (-0.15, 0.15),
				size: (2.5, 5.0),
				spin: (0.0, 0.0),
				opacity: (0.85, 1.0),
			},
		}
	}
}

/// Uniform sample in `[min, max)`; collapses to `min` for an empty range.
fn sample(rng: &mut impl Rng, (min, max): (f64, f64)) -> f64 {
	min + rng.r#gen::<f64>() * (max - min)
}

/// Create `count` particles for `season`, scattered uniformly over the viewport.
pub fn spawn(
	season: Season,
	count: usize,
	width: f64,
	height: f64,
	rng: &mut impl Rng,
) -> Vec<Particle> {
	let policy = SpawnPolicy::for_season(season);
	let tint = theme_of(season).particle;

	(0..count)
		.map(|_| Particle {
			x: sample(rng, (0.0, width)),
			y: sample(rng, (0.0, height)),
			speed_y: sample(rng, policy.fall),
			drift_x: sample(rng, policy.drift),
			size: sample(rng, policy.size),
			rotation: sample(rng, (0.0, TAU)),
			spin: sample(rng, policy.spin),
			phase: sample(rng, (0.0, TAU)),
			appearance: Appearance {
				season,
				kind: policy.kind,
				color: tint,
				opacity: sample(rng, policy.opacity),
			},
		})
		.collect()
}

/// Advance every particle by one step and apply the wrap policy.
///
/// A particle that sinks past `height + WRAP_MARGIN` re-enters at
/// `-WRAP_MARGIN` with a fresh x. Horizontal exits wrap to the opposite side.
pub fn advance(particles: &mut [Particle], width: f64, height: f64, rng: &mut impl Rng) {
	for p in particles {
		p.y += p.speed_y;
		p.x += p.drift_x;
		p.rotation = (p.rotation + p.spin).rem_euclid(TAU);

		if p.y > height + WRAP_MARGIN {
			p.y = -WRAP_MARGIN;
			p.x = sample(rng, (0.0, width));
		}

		if p.x < -WRAP_MARGIN {
			p.x = width + WRAP_MARGIN;
		} else if p.x > width + WRAP_MARGIN {
			p.x = -WRAP_MARGIN;
		}
	}
}

/// Map a coordinate from an `old` extent onto a `new` one, keeping it inside
/// the wrap margin.
fn rebound(v: f64, old: f64, new: f64) -> f64 {
	let v = if v < 0.0 {
		v
	} else if v > old {
		new + (v - old)
	} else {
		v * new / old
	};
	v.clamp(-WRAP_MARGIN, new + WRAP_MARGIN)
}

/// Owns the live particle collection and the bounds it is simulated in.
pub struct ParticleSystem {
	pub particles: Vec<Particle>,
	width: f64,
	height: f64,
	rng: SmallRng,
}

impl ParticleSystem {
	pub fn new(seed: u64) -> Self {
		Self {
			particles: Vec::new(),
			width: 0.0,
			height: 0.0,
			rng: SmallRng::seed_from_u64(seed),
		}
	}

	/// Replace the whole collection with a fresh batch for `season`.
	pub fn spawn(&mut self, season: Season, count: usize, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.particles = spawn(season, count, width, height, &mut self.rng);
	}

	/// Update particle positions
	pub fn update(&mut self) {
		advance(&mut self.particles, self.width, self.height, &mut self.rng);
	}

	/// Resize the particle system bounds, scaling positions proportionally.
	///
	/// Only the in-viewport part of a coordinate scales; particles waiting in
	/// the wrap margin keep their offset from the edge. Returns `false` when
	/// the previous bounds were degenerate and positions could not be
	/// rescaled; the caller should respawn in that case.
	pub fn resize(&mut self, width: f64, height: f64) -> bool {
		if self.width <= 0.0 || self.height <= 0.0 {
			self.width = width;
			self.height = height;
			return false;
		}

		for p in &mut self.particles {
			p.x = rebound(p.x, self.width, width);
			p.y = rebound(p.y, self.height, height);
		}

		self.width = width;
		self.height = height;
		true
	}

	#[cfg(test)]
	pub fn bounds(&self) -> (f64, f64) {
		(self.width, self.height)
	}

	pub fn len(&self) -> usize {
		self.particles.len()
	}

	/// Get twinkle alpha for a particle. `time` is in seconds.
	pub fn twinkle_alpha(particle: &Particle, time: f64) -> f64 {
		let opacity = particle.appearance.opacity;
		match particle.appearance.kind {
			ParticleKind::Firefly => {
				let twinkle = ((time * 1.5 + particle.phase).sin() * 0.5 + 0.5) * 0.7 + 0.3;
				opacity * twinkle
			}
			_ => opacity,
		}
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;

	fn rng() -> SmallRng {
		SmallRng::seed_from_u64(42)
	}

	fn in_bounds(p: &Particle, w: f64, h: f64) -> bool {
		(-WRAP_MARGIN..=w + WRAP_MARGIN).contains(&p.x)
			&& (-WRAP_MARGIN..=h + WRAP_MARGIN).contains(&p.y)
	}

	#[test]
	fn spawn_fills_viewport_with_requested_count() {
		let particles = spawn(Season::Spring, 25, 320.0, 180.0, &mut rng());
		assert_eq!(particles.len(), 25);
		for p in &particles {
			assert!((0.0..=320.0).contains(&p.x));
			assert!((0.0..=180.0).contains(&p.y));
		}
	}

	#[test]
	fn spawn_into_empty_viewport_stays_at_origin() {
		let particles = spawn(Season::Winter, 5, 0.0, 0.0, &mut rng());
		assert_eq!(particles.len(), 5);
		assert!(particles.iter().all(|p| p.x == 0.0 && p.y == 0.0));
	}

	#[test]
	fn seasons_fall_at_distinct_speeds() {
		let mean_fall = |season| {
			let ps = spawn(season, 200, 100.0, 100.0, &mut rng());
			ps.iter().map(|p| p.speed_y).sum::<f64>() / ps.len() as f64
		};
		let summer = mean_fall(Season::Summer);
		let winter = mean_fall(Season::Winter);
		let spring = mean_fall(Season::Spring);
		let autumn = mean_fall(Season::Autumn);
		assert!(summer < winter && winter < spring && spring < autumn);
	}

	#[test]
	fn appearance_follows_season() {
		let expected = [
			(Season::Spring, ParticleKind::Petal),
			(Season::Summer, ParticleKind::Firefly),
			(Season::Autumn, ParticleKind::Leaf),
			(Season::Winter, ParticleKind::Snowflake),
		];
		for (season, kind) in expected {
			for p in spawn(season, 10, 50.0, 50.0, &mut rng()) {
				assert_eq!(p.appearance.season, season);
				assert_eq!(p.appearance.kind, kind);
				assert_eq!(p.appearance.color, theme_of(season).particle);
			}
		}
	}

	#[test]
	fn falling_past_bottom_recycles_to_top() {
		let mut ps = spawn(Season::Autumn, 1, 100.0, 100.0, &mut rng());
		ps[0].y = 100.0 + WRAP_MARGIN - 0.5;
		ps[0].speed_y = 1.0;
		ps[0].drift_x = 0.0;
		advance(&mut ps, 100.0, 100.0, &mut rng());
		assert_eq!(ps[0].y, -WRAP_MARGIN);
		assert!((0.0..=100.0).contains(&ps[0].x));
	}

	#[test]
	fn drift_wraps_to_opposite_edge() {
		let mut ps = spawn(Season::Spring, 2, 100.0, 100.0, &mut rng());
		ps[0].x = -WRAP_MARGIN + 0.1;
		ps[0].drift_x = -0.5;
		ps[1].x = 100.0 + WRAP_MARGIN - 0.1;
		ps[1].drift_x = 0.5;
		for p in &mut ps {
			p.y = 50.0;
		}
		advance(&mut ps, 100.0, 100.0, &mut rng());
		assert_eq!(ps[0].x, 100.0 + WRAP_MARGIN);
		assert_eq!(ps[1].x, -WRAP_MARGIN);
	}

	#[test]
	fn rotation_stays_normalized() {
		let mut ps = spawn(Season::Autumn, 30, 100.0, 100.0, &mut rng());
		let mut r = rng();
		for _ in 0..500 {
			advance(&mut ps, 100.0, 100.0, &mut r);
		}
		assert!(ps.iter().all(|p| (0.0..=TAU).contains(&p.rotation)));
	}

	#[test]
	fn resize_rescales_positions() {
		let mut system = ParticleSystem::new(1);
		system.spawn(Season::Winter, 8, 200.0, 100.0);
		let before = system.particles.clone();
		assert!(system.resize(400.0, 50.0));
		for (old, new) in before.iter().zip(&system.particles) {
			assert!((new.x - old.x * 2.0).abs() < 1e-9);
			assert!((new.y - old.y * 0.5).abs() < 1e-9);
		}
		assert_eq!(system.bounds(), (400.0, 50.0));
	}

	#[test]
	fn resize_keeps_margin_particles_in_bounds() {
		let mut system = ParticleSystem::new(1);
		system.spawn(Season::Winter, 2, 100.0, 100.0);
		system.particles[0].y = -WRAP_MARGIN;
		system.particles[1].x = 100.0 + WRAP_MARGIN;
		system.particles[1].y = 50.0;

		assert!(system.resize(400.0, 400.0));
		assert_eq!(system.particles[0].y, -WRAP_MARGIN);
		assert_eq!(system.particles[1].x, 400.0 + WRAP_MARGIN);
		assert_eq!(system.particles[1].y, 200.0);

		system.update();
		for p in &system.particles {
			assert!(in_bounds(p, 400.0, 400.0), "{p:?} escaped 400x400");
		}
	}

	#[test]
	fn shrinking_pulls_margin_particles_inside() {
		let mut system = ParticleSystem::new(1);
		system.spawn(Season::Autumn, 1, 300.0, 300.0);
		system.particles[0].x = 300.0 + WRAP_MARGIN;
		system.particles[0].y = 300.0 + WRAP_MARGIN;

		assert!(system.resize(50.0, 20.0));
		assert!(in_bounds(&system.particles[0], 50.0, 20.0));
	}

	#[test]
	fn resize_from_empty_bounds_requests_respawn() {
		let mut system = ParticleSystem::new(1);
		system.spawn(Season::Winter, 8, 0.0, 0.0);
		assert!(!system.resize(300.0, 300.0));
		assert_eq!(system.len(), 8);
	}

	#[test]
	fn only_fireflies_twinkle() {
		let mut ps = spawn(Season::Summer, 1, 10.0, 10.0, &mut rng());
		ps.extend(spawn(Season::Winter, 1, 10.0, 10.0, &mut rng()));
		let firefly = &ps[0];
		let flake = &ps[1];
		let alphas: Vec<f64> = (0..20)
			.map(|t| ParticleSystem::twinkle_alpha(firefly, t as f64 * 0.3))
			.collect();
		assert!(alphas.iter().all(|a| *a <= firefly.appearance.opacity + 1e-9));
		assert!(alphas.windows(2).any(|w| (w[0] - w[1]).abs() > 1e-6));
		assert_eq!(
			ParticleSystem::twinkle_alpha(flake, 3.0),
			flake.appearance.opacity
		);
	}

	proptest! {
		#[test]
		fn wrap_invariant_holds(
			seed in any::<u64>(),
			width in 1.0f64..2000.0,
			height in 1.0f64..2000.0,
			steps in 0usize..400,
			season in prop::sample::select(Season::ALL.to_vec()),
		) {
			let mut system = ParticleSystem::new(seed);
			system.spawn(season, 20, width, height);
			for _ in 0..steps {
				system.update();
			}
			prop_assert_eq!(system.len(), 20);
			for p in &system.particles {
				prop_assert!(in_bounds(p, width, height), "{p:?} escaped {width}x{height}");
			}
		}

		#[test]
		fn wrap_invariant_survives_resizes(
			seed in any::<u64>(),
			width in 1.0f64..2000.0,
			height in 1.0f64..2000.0,
			season in prop::sample::select(Season::ALL.to_vec()),
			resizes in prop::collection::vec(
				(1.0f64..2000.0, 1.0f64..2000.0, 0usize..60),
				1..8,
			),
		) {
			let mut system = ParticleSystem::new(seed);
			system.spawn(season, 20, width, height);
			for (w, h, steps) in resizes {
				prop_assert!(system.resize(w, h));
				for p in &system.particles {
					prop_assert!(in_bounds(p, w, h), "{p:?} escaped {w}x{h} on resize");
				}
				for _ in 0..steps {
					system.update();
					for p in &system.particles {
						prop_assert!(in_bounds(p, w, h), "{p:?} escaped {w}x{h}");
					}
				}
			}
		}

		#[test]
		fn spawn_stays_inside_viewport(
			seed in any::<u64>(),
			count in 0usize..100,
			width in 0.0f64..4000.0,
			height in 0.0f64..4000.0,
		) {
			let mut r = SmallRng::seed_from_u64(seed);
			let ps = spawn(Season::Autumn, count, width, height, &mut r);
			prop_assert_eq!(ps.len(), count);
			for p in &ps {
				prop_assert!(p.x >= 0.0 && p.x <= width);
				prop_assert!(p.y >= 0.0 && p.y <= height);
			}
		}
	}
}
