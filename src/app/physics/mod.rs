mod forces;

use std::collections::HashMap;

use eframe::egui::{Vec2, vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::lexicon::LexicalEntry;

use forces::{accumulate_centering, accumulate_jitter, accumulate_repulsion, resolve_collisions};

const ALPHA_MIN: f32 = 0.001;
const SETTLE_BAND: f32 = 0.05;
const MIN_RESIZE_DELTA: f32 = 0.5;

#[derive(Clone, Copy, Debug)]
pub(in crate::app) struct SimulationConfig {
    pub charge_strength: f32,
    pub centering_strength: f32,
    pub jitter: f32,
    pub collision_padding: f32,
    pub collision_iterations: usize,
    pub velocity_decay: f32,
    pub alpha_decay: f32,
    pub idle_alpha_target: f32,
    pub drag_alpha_target: f32,
    pub reheat_alpha: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            charge_strength: -30.0,
            centering_strength: 0.01,
            jitter: 1.0,
            collision_padding: 4.0,
            collision_iterations: 8,
            velocity_decay: 0.4,
            alpha_decay: 1.0 - ALPHA_MIN.powf(1.0 / 300.0),
            idle_alpha_target: 0.1,
            drag_alpha_target: 0.3,
            reheat_alpha: 0.5,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::app) enum SimulationPhase {
    Idle,
    Running,
    Settling,
}

#[derive(Clone, Debug)]
pub(in crate::app) struct BubbleNode {
    pub key: String,
    pub entry_index: usize,
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub pin: Option<Vec2>,
}

/// Force layout for the visible bubbles. Positions live in viewport-local
/// coordinates, `(0, 0)` to `bounds`.
pub(in crate::app) struct Simulation {
    nodes: Vec<BubbleNode>,
    bounds: Option<Vec2>,
    alpha: f32,
    alpha_target: f32,
    stopped: bool,
    config: SimulationConfig,
    rng: StdRng,
    positions: Vec<Vec2>,
    forces: Vec<Vec2>,
}

/// Keeps a bubble's center within `[radius, dimension - radius]` on both axes.
/// A viewport too small for the bubble centers it instead.
pub(in crate::app) fn clamp_center(position: Vec2, radius: f32, bounds: Vec2) -> Vec2 {
    fn clamp_axis(value: f32, radius: f32, dimension: f32) -> f32 {
        if dimension <= radius * 2.0 {
            dimension * 0.5
        } else {
            value.clamp(radius, dimension - radius)
        }
    }

    vec2(
        clamp_axis(position.x, radius, bounds.x),
        clamp_axis(position.y, radius, bounds.y),
    )
}

fn random_position(rng: &mut StdRng, radius: f32, bounds: Vec2) -> Vec2 {
    fn random_axis(rng: &mut StdRng, radius: f32, dimension: f32) -> f32 {
        if dimension <= radius * 2.0 {
            dimension * 0.5
        } else {
            rng.gen_range(radius..(dimension - radius))
        }
    }

    vec2(
        random_axis(rng, radius, bounds.x),
        random_axis(rng, radius, bounds.y),
    )
}

fn valid_bounds(bounds: Vec2) -> bool {
    bounds.x.is_finite() && bounds.y.is_finite() && bounds.x > 0.0 && bounds.y > 0.0
}

impl Simulation {
    pub(in crate::app) fn new(config: SimulationConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            nodes: Vec::new(),
            bounds: None,
            alpha: 1.0,
            alpha_target: config.idle_alpha_target,
            stopped: false,
            config,
            rng,
            positions: Vec::new(),
            forces: Vec::new(),
        }
    }

    pub(in crate::app) fn nodes(&self) -> &[BubbleNode] {
        &self.nodes
    }

    pub(in crate::app) fn bounds(&self) -> Option<Vec2> {
        self.bounds
    }

    pub(in crate::app) fn alpha(&self) -> f32 {
        self.alpha
    }

    pub(in crate::app) fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub(in crate::app) fn node_index(&self, key: &str) -> Option<usize> {
        self.nodes.iter().position(|node| node.key == key)
    }

    pub(in crate::app) fn phase(&self) -> SimulationPhase {
        if self.stopped || self.bounds.is_none() || self.nodes.is_empty() {
            return SimulationPhase::Idle;
        }

        let excess = self.alpha - self.alpha_target;
        if excess > SETTLE_BAND {
            SimulationPhase::Running
        } else if excess.abs() > ALPHA_MIN {
            SimulationPhase::Settling
        } else {
            SimulationPhase::Idle
        }
    }

    /// Replaces the node list with one node per visible entry. Nodes whose
    /// canonical form survives keep their position and velocity.
    pub(in crate::app) fn set_nodes(&mut self, entries: &[LexicalEntry], visible: &[usize]) {
        let mut prior = std::mem::take(&mut self.nodes)
            .into_iter()
            .map(|node| (node.key.clone(), node))
            .collect::<HashMap<_, _>>();
        let prior_count = prior.len();

        let mut next = Vec::with_capacity(visible.len());
        let mut entered = 0usize;
        for &index in visible {
            let Some(entry) = entries.get(index) else {
                continue;
            };

            if let Some(mut node) = prior.remove(&entry.latin) {
                node.entry_index = index;
                node.radius = entry.radius();
                next.push(node);
                continue;
            }

            let radius = entry.radius();
            let position = self
                .bounds
                .map(|bounds| random_position(&mut self.rng, radius, bounds))
                .unwrap_or(Vec2::ZERO);
            next.push(BubbleNode {
                key: entry.latin.clone(),
                entry_index: index,
                position,
                velocity: Vec2::ZERO,
                radius,
                pin: None,
            });
            entered += 1;
        }

        let exited = prior_count - (next.len() - entered);
        self.nodes = next;

        if self.bounds.is_some() && (entered > 0 || exited > 0) {
            self.alpha = self.alpha.max(self.config.reheat_alpha);
        }
    }

    /// Scatters every node uniformly inside `bounds` and restarts at full
    /// energy.
    pub(in crate::app) fn reseed(&mut self, bounds: Vec2) {
        if !valid_bounds(bounds) {
            return;
        }

        self.bounds = Some(bounds);
        for node in &mut self.nodes {
            node.position = random_position(&mut self.rng, node.radius, bounds);
            node.velocity = Vec2::ZERO;
            node.pin = None;
        }
        self.alpha = 1.0;
        self.alpha_target = self.config.idle_alpha_target;
        self.stopped = false;
        log::debug!(
            "reseeded {} bubbles in {:.0}x{:.0}",
            self.nodes.len(),
            bounds.x,
            bounds.y
        );
    }

    /// Reports the viewport size. A zero size keeps the layout deferred, the
    /// first real size seeds it, and later sizes rescale the current layout.
    pub(in crate::app) fn resize(&mut self, bounds: Vec2) {
        if !valid_bounds(bounds) {
            return;
        }

        let Some(previous) = self.bounds else {
            self.reseed(bounds);
            return;
        };

        if (previous - bounds).abs().max_elem() < MIN_RESIZE_DELTA {
            return;
        }

        let scale = vec2(bounds.x / previous.x, bounds.y / previous.y);
        for node in &mut self.nodes {
            node.position = clamp_center(node.position * scale, node.radius, bounds);
        }
        self.bounds = Some(bounds);
        self.alpha = self.alpha.max(self.config.reheat_alpha);
        log::debug!("resized layout to {:.0}x{:.0}", bounds.x, bounds.y);
    }

    pub(in crate::app) fn pin(&mut self, key: &str, position: Vec2) {
        if let Some(index) = self.node_index(key) {
            self.nodes[index].pin = Some(position);
        }
    }

    pub(in crate::app) fn unpin(&mut self, key: &str) {
        if let Some(index) = self.node_index(key) {
            self.nodes[index].pin = None;
        }
    }

    pub(in crate::app) fn begin_drag(&mut self, key: &str, position: Vec2) {
        self.alpha_target = self.config.drag_alpha_target;
        self.pin(key, position);
    }

    pub(in crate::app) fn end_drag(&mut self, key: &str) {
        self.unpin(key);
        self.alpha_target = self.config.idle_alpha_target;
    }

    pub(in crate::app) fn stop(&mut self) {
        self.stopped = true;
    }

    pub(in crate::app) fn resume(&mut self) {
        self.stopped = false;
    }

    /// Advances the layout by one frame. Returns false when the step was
    /// deferred or nothing moved.
    pub(in crate::app) fn step(&mut self, delta_seconds: f32) -> bool {
        let Some(bounds) = self.bounds else {
            return false;
        };
        if self.nodes.is_empty() {
            return false;
        }
        if self.stopped {
            return self.follow_pins(bounds);
        }

        let node_count = self.nodes.len();
        let time_step_scale = (delta_seconds * 60.0).clamp(0.25, 3.0);
        let alpha_decay = 1.0 - (1.0 - self.config.alpha_decay).powf(time_step_scale);
        self.alpha += (self.alpha_target - self.alpha) * alpha_decay;
        let alpha = self.alpha;

        self.positions.clear();
        self.positions
            .extend(self.nodes.iter().map(|node| node.position));
        self.forces.clear();
        self.forces.resize(node_count, Vec2::ZERO);

        accumulate_repulsion(
            &self.positions,
            -self.config.charge_strength * alpha,
            &mut self.forces,
        );
        accumulate_centering(
            &self.positions,
            bounds * 0.5,
            self.config.centering_strength * alpha,
            &mut self.forces,
        );
        accumulate_jitter(&mut self.rng, self.config.jitter * alpha, &mut self.forces);

        let damping_factor = (1.0 - self.config.velocity_decay).powf(time_step_scale);
        let mut any_motion = false;
        for (node, force) in self.nodes.iter_mut().zip(self.forces.iter()) {
            let previous = node.position;
            if let Some(pin) = node.pin {
                node.position = clamp_center(pin, node.radius, bounds);
                node.velocity = Vec2::ZERO;
            } else {
                node.velocity = (node.velocity + *force * time_step_scale) * damping_factor;
                node.position += node.velocity * time_step_scale;
            }
            any_motion |= (node.position - previous).length_sq() > 0.000_001;
        }

        resolve_collisions(
            &mut self.nodes,
            self.config.collision_padding,
            self.config.collision_iterations,
            bounds,
        );

        any_motion
    }

    /// Moves pinned nodes onto their pins without running any forces, so a
    /// paused layout still follows the pointer.
    fn follow_pins(&mut self, bounds: Vec2) -> bool {
        let mut any_motion = false;
        for node in &mut self.nodes {
            if let Some(pin) = node.pin {
                let previous = node.position;
                node.position = clamp_center(pin, node.radius, bounds);
                node.velocity = Vec2::ZERO;
                any_motion |= (node.position - previous).length_sq() > 0.000_001;
            }
        }
        any_motion
    }
}
