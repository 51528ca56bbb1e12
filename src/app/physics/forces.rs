use eframe::egui::{Vec2, vec2};
use rand::Rng;

use super::{BubbleNode, clamp_center};

fn fallback_direction(from: usize, to: usize) -> Vec2 {
    let angle = ((from as f32) * 0.618_034 + (to as f32) * 0.414_214) * std::f32::consts::TAU;
    vec2(angle.cos(), angle.sin())
}

/// Charge-like pairwise push; magnitude falls off with the inverse of the
/// distance.
pub(super) fn accumulate_repulsion(positions: &[Vec2], strength: f32, forces: &mut [Vec2]) {
    for i in 0..positions.len() {
        for j in (i + 1)..positions.len() {
            let mut delta = positions[i] - positions[j];
            if delta.length_sq() <= 0.0001 {
                delta = fallback_direction(i, j);
            }
            let distance_sq = delta.length_sq().max(1.0);
            let push = delta * (strength / distance_sq);

            forces[i] += push;
            forces[j] -= push;
        }
    }
}

/// Pulls the centroid, not the individual nodes, toward `center`.
pub(super) fn accumulate_centering(
    positions: &[Vec2],
    center: Vec2,
    strength: f32,
    forces: &mut [Vec2],
) {
    if positions.is_empty() {
        return;
    }

    let centroid = positions
        .iter()
        .fold(Vec2::ZERO, |sum, position| sum + *position)
        / positions.len() as f32;
    let pull = (center - centroid) * strength;
    for force in forces.iter_mut() {
        *force += pull;
    }
}

pub(super) fn accumulate_jitter(rng: &mut impl Rng, amount: f32, forces: &mut [Vec2]) {
    if amount <= 0.0 {
        return;
    }

    for force in forces.iter_mut() {
        *force += vec2(rng.gen_range(-0.5..0.5), rng.gen_range(-0.5..0.5)) * amount;
    }
}

/// Projects overlapping bubbles apart until none overlap or the iteration
/// budget runs out. Pinned bubbles never move. Returns whether overlap
/// remained after the last iteration.
pub(super) fn resolve_collisions(
    nodes: &mut [BubbleNode],
    padding: f32,
    iterations: usize,
    bounds: Vec2,
) -> bool {
    for _ in 0..iterations {
        let mut overlapped = false;

        for i in 0..nodes.len() {
            for j in (i + 1)..nodes.len() {
                let min_distance = nodes[i].radius + nodes[j].radius + padding;
                let delta = nodes[i].position - nodes[j].position;
                let distance = delta.length();
                if distance >= min_distance {
                    continue;
                }

                let (weight_i, weight_j) = match (nodes[i].pin.is_some(), nodes[j].pin.is_some()) {
                    (true, true) => continue,
                    (true, false) => (0.0, 1.0),
                    (false, true) => (1.0, 0.0),
                    (false, false) => {
                        let area_i = nodes[i].radius * nodes[i].radius;
                        let area_j = nodes[j].radius * nodes[j].radius;
                        let weight_i = area_j / (area_i + area_j);
                        (weight_i, 1.0 - weight_i)
                    }
                };

                overlapped = true;
                let direction = if distance > 0.0001 {
                    delta / distance
                } else {
                    fallback_direction(i, j)
                };
                let overlap = min_distance - distance;

                nodes[i].position += direction * (overlap * weight_i);
                nodes[j].position -= direction * (overlap * weight_j);
            }
        }

        for node in nodes.iter_mut() {
            if node.pin.is_none() {
                node.position = clamp_center(node.position, node.radius, bounds);
            }
        }

        if !overlapped {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn node(key: &str, position: Vec2, radius: f32) -> BubbleNode {
        BubbleNode {
            key: key.to_owned(),
            entry_index: 0,
            position,
            velocity: Vec2::ZERO,
            radius,
            pin: None,
        }
    }

    #[test]
    fn repulsion_pushes_apart_with_inverse_distance() {
        let positions = [vec2(0.0, 0.0), vec2(10.0, 0.0)];
        let mut near = [Vec2::ZERO; 2];
        accumulate_repulsion(&positions, 30.0, &mut near);
        assert!(near[0].x < 0.0 && near[1].x > 0.0);
        assert!((near[0].x + 3.0).abs() < 1e-4);

        let far_positions = [vec2(0.0, 0.0), vec2(20.0, 0.0)];
        let mut far = [Vec2::ZERO; 2];
        accumulate_repulsion(&far_positions, 30.0, &mut far);
        assert!((far[0].x * 2.0 - near[0].x).abs() < 1e-4);
    }

    #[test]
    fn centering_moves_centroid_toward_center() {
        let positions = [vec2(0.0, 0.0), vec2(20.0, 0.0)];
        let mut forces = [Vec2::ZERO; 2];
        accumulate_centering(&positions, vec2(110.0, 0.0), 0.5, &mut forces);
        assert_eq!(forces[0], vec2(50.0, 0.0));
        assert_eq!(forces[0], forces[1]);
    }

    #[test]
    fn jitter_is_bounded_by_amount() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut forces = [Vec2::ZERO; 16];
        accumulate_jitter(&mut rng, 0.2, &mut forces);
        assert!(forces.iter().all(|force| force.x.abs() <= 0.1 && force.y.abs() <= 0.1));
        assert!(forces.iter().any(|force| *force != Vec2::ZERO));
    }

    #[test]
    fn collisions_separate_overlapping_bubbles() {
        let mut nodes = [
            node("a", vec2(200.0, 200.0), 30.0),
            node("b", vec2(210.0, 200.0), 30.0),
        ];
        let remaining = resolve_collisions(&mut nodes, 4.0, 8, vec2(400.0, 400.0));
        assert!(!remaining);
        assert!((nodes[0].position - nodes[1].position).length() >= 64.0 - 1e-3);
    }

    #[test]
    fn pinned_bubble_holds_still() {
        let mut nodes = [
            node("a", vec2(200.0, 200.0), 30.0),
            node("b", vec2(220.0, 200.0), 30.0),
        ];
        nodes[0].pin = Some(vec2(200.0, 200.0));
        resolve_collisions(&mut nodes, 4.0, 8, vec2(400.0, 400.0));
        assert_eq!(nodes[0].position, vec2(200.0, 200.0));
        assert!((nodes[1].position.x - 264.0).abs() < 1e-3);
    }
}
