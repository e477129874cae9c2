//! Scrolling double-helix field rendered behind the page.
//! Pure simulation state; canvas wiring lives in the components.

use std::f64::consts::{PI, TAU};

/// Segment count is drawn from `[MIN_SEGMENTS, MAX_SEGMENTS)`.
pub const MIN_SEGMENTS: u32 = 2;
pub const MAX_SEGMENTS: u32 = 5;
/// Per-helix size multiplier, drawn from `[MIN_SCALE, MAX_SCALE)`.
pub const MIN_SCALE: f64 = 1.0;
pub const MAX_SCALE: f64 = 3.0;
/// Strand radius in px before scaling.
pub const BASE_RADIUS: f64 = 30.0;
/// Length of one full twist in px before scaling.
pub const BASE_SEGMENT_LENGTH: f64 = 150.0;
/// Nucleotide dot radius in px before depth shading and scaling.
pub const BASE_POINT_SIZE: f64 = 4.0;
/// Dots drawn per strand per twist before scaling.
pub const BASE_POINTS_PER_SEGMENT: f64 = 40.0;
/// Minimum horizontal gap between neighbouring helixes, scaled up with the larger one.
pub const MIN_HELIX_SPACING: f64 = 20.0;

/// Downward drift in px per animation frame.
pub const BASE_SCROLL_SPEED: f64 = 1.0;
/// Speed factor applied while the page is being scrolled.
pub const SCROLL_BOOST_MULTIPLIER: f64 = 2.0;
/// How long the scroll boost lingers after the last scroll event.
pub const SCROLL_BOOST_MS: i32 = 1000;

/// Helixes alive at once.
pub const INITIAL_HELIXES: usize = 3;

/// Extra clearance kept between a spawned helix and the viewport edges.
const SPAWN_EDGE_MARGIN: f64 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strand {
    Primary,
    Secondary,
}

/// One dot of a helix strand, in canvas space. `z` is the out-of-screen
/// component used only for depth shading and paint order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrandPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub strand: Strand,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Helix {
    pub center_x: f64,
    /// Top of the helix; negative while it is still above the viewport.
    pub y: f64,
    pub radius: f64,
    /// Phase offset so twists are not synchronised across helixes.
    pub angle: f64,
    pub segments: u32,
    pub scale: f64,
}

impl Helix {
    /// Total vertical extent in px.
    pub fn span(&self) -> f64 {
        self.segments as f64 * BASE_SEGMENT_LENGTH * self.scale
    }

    pub fn points_per_segment(&self) -> u32 {
        (BASE_POINTS_PER_SEGMENT * self.scale).round() as u32
    }

    /// Sample both strands top to bottom. The second strand trails the first
    /// by half a twist so the two never touch.
    pub fn strand_points(&self) -> Vec<StrandPoint> {
        let pps = self.points_per_segment();
        let segment_length = BASE_SEGMENT_LENGTH * self.scale;
        let wave_number = TAU / segment_length;
        let mut points = Vec::with_capacity((self.segments * pps * 2) as usize);
        for i in 0..self.segments {
            for j in 0..pps {
                let t = i as f64 * segment_length + j as f64 * segment_length / pps as f64;
                let y = self.y + t;
                let phase = wave_number * y + self.angle;
                points.push(StrandPoint {
                    x: self.center_x + phase.cos() * self.radius,
                    y,
                    z: phase.sin() * self.radius,
                    strand: Strand::Primary,
                });
                points.push(StrandPoint {
                    x: self.center_x + (phase + PI).cos() * self.radius,
                    y,
                    z: (phase + PI).sin() * self.radius,
                    strand: Strand::Secondary,
                });
            }
        }
        points
    }

    /// Points ordered far-to-near so near dots paint over far ones.
    pub fn depth_sorted_points(&self) -> Vec<StrandPoint> {
        let mut points = self.strand_points();
        points.sort_by(|a, b| b.z.total_cmp(&a.z));
        points
    }

    /// Normalised depth: 0 at the far side of the strand, 1 at the near side.
    pub fn depth_at(&self, z: f64) -> f64 {
        (z + self.radius) / (self.radius * 2.0)
    }

    pub fn point_size(&self, z: f64) -> f64 {
        (BASE_POINT_SIZE + self.depth_at(z) * 4.0) * self.scale
    }

    /// Kept very low so the backdrop stays behind the text visually.
    pub fn point_alpha(&self, z: f64) -> f64 {
        0.08 + self.depth_at(z) * 0.15
    }
}

// ---------------- Field simulation -----------------

/// The set of helixes drifting down the viewport. `rng` arguments take a
/// uniform sampler over `[0, 1)` so the browser can pass `Math.random` and
/// tests can pass something seeded.
#[derive(Clone, Debug, PartialEq)]
pub struct HelixField {
    pub width: f64,
    pub height: f64,
    pub helixes: Vec<Helix>,
    base_speed: f64,
    speed_multiplier: f64,
}

impl HelixField {
    /// Seed the field with evenly spaced columns at staggered heights.
    pub fn new(width: f64, height: f64, rng: &mut impl FnMut() -> f64) -> Self {
        let mut helixes = Vec::with_capacity(INITIAL_HELIXES);
        let spacing = width / (INITIAL_HELIXES as f64 + 1.0);
        for i in 0..INITIAL_HELIXES {
            let scale = MIN_SCALE + rng() * (MAX_SCALE - MIN_SCALE);
            let segments = (rng() * (MAX_SEGMENTS - MIN_SEGMENTS) as f64).floor() as u32 + MIN_SEGMENTS;
            helixes.push(Helix {
                center_x: spacing * (i as f64 + 1.0),
                y: -(rng() * height),
                radius: BASE_RADIUS * scale,
                angle: rng() * TAU,
                segments,
                scale,
            });
        }
        Self {
            width,
            height,
            helixes,
            base_speed: BASE_SCROLL_SPEED,
            speed_multiplier: 1.0,
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn set_speed_multiplier(&mut self, multiplier: f64) {
        self.speed_multiplier = multiplier;
    }

    /// True when a helix at `center_x` would keep its distance from every
    /// live helix. The required gap grows with the larger of the two scales.
    pub fn has_room(&self, center_x: f64, radius: f64, scale: f64) -> bool {
        self.helixes.iter().all(|other| {
            let min_spacing = (other.radius + radius + MIN_HELIX_SPACING) * scale.max(other.scale);
            (other.center_x - center_x).abs() > min_spacing
        })
    }

    /// Roll a fresh helix just above the viewport, or `None` when the rolled
    /// column would crowd a live helix.
    pub fn spawn_helix(&self, rng: &mut impl FnMut() -> f64) -> Option<Helix> {
        let segments = (rng() * (MAX_SEGMENTS - MIN_SEGMENTS) as f64).floor() as u32 + MIN_SEGMENTS;
        let scale = MIN_SCALE + rng() * (MAX_SCALE - MIN_SCALE);
        let radius = BASE_RADIUS * scale;
        let margin = radius + SPAWN_EDGE_MARGIN;
        let center_x = margin + rng() * (self.width - 2.0 * margin);
        if !self.has_room(center_x, radius, scale) {
            return None;
        }
        Some(Helix {
            center_x,
            y: -(segments as f64 * BASE_SEGMENT_LENGTH * scale),
            radius,
            angle: rng() * TAU,
            segments,
            scale,
        })
    }

    /// Advance one frame: drift every helix down, and replace the ones that
    /// left the bottom. A replacement that finds no room keeps the old column
    /// and restarts above the viewport instead, so the count never drops.
    pub fn step(&mut self, rng: &mut impl FnMut() -> f64) {
        let dy = self.base_speed * self.speed_multiplier;
        for i in 0..self.helixes.len() {
            self.helixes[i].y += dy;
            if self.helixes[i].y > self.height {
                match self.spawn_helix(rng) {
                    Some(fresh) => self.helixes[i] = fresh,
                    None => {
                        let helix = &mut self.helixes[i];
                        helix.y = -helix.span();
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn seeded(seed: u64) -> impl FnMut() -> f64 {
        let mut rng = StdRng::seed_from_u64(seed);
        move || rng.gen_range(0.0..1.0)
    }

    fn zeros() -> impl FnMut() -> f64 {
        || 0.0
    }

    fn assert_spaced(helixes: &[Helix]) {
        for (i, a) in helixes.iter().enumerate() {
            for b in &helixes[i + 1..] {
                let min_spacing = (a.radius + b.radius + MIN_HELIX_SPACING) * a.scale.max(b.scale);
                assert!(
                    (a.center_x - b.center_x).abs() > min_spacing,
                    "helixes at x={} and x={} are closer than {min_spacing}",
                    a.center_x,
                    b.center_x
                );
            }
        }
    }

    #[test]
    fn initial_field_has_three_evenly_spaced_columns() {
        let field = HelixField::new(800.0, 600.0, &mut zeros());
        let centers: Vec<f64> = field.helixes.iter().map(|h| h.center_x).collect();
        assert_eq!(centers, vec![200.0, 400.0, 600.0]);
        for helix in &field.helixes {
            assert_eq!(helix.scale, MIN_SCALE);
            assert_eq!(helix.radius, BASE_RADIUS);
            assert_eq!(helix.segments, MIN_SEGMENTS);
            assert!(helix.y <= 0.0);
        }
        assert_spaced(&field.helixes);
    }

    #[test]
    fn drift_and_recycling_preserve_count_and_spacing() {
        // Wide viewport so replacements are regularly accepted.
        let mut field = HelixField::new(1600.0, 900.0, &mut zeros());
        let mut rng = seeded(7);
        for _ in 0..5000 {
            field.step(&mut rng);
            assert_eq!(field.helixes.len(), INITIAL_HELIXES);
            assert_spaced(&field.helixes);
            for helix in &field.helixes {
                assert!(helix.y <= field.height);
            }
        }
    }

    #[test]
    fn spawned_helixes_satisfy_the_documented_ranges() {
        let field = HelixField::new(4000.0, 900.0, &mut zeros());
        let mut rng = seeded(21);
        let mut accepted = 0;
        for _ in 0..200 {
            if let Some(helix) = field.spawn_helix(&mut rng) {
                accepted += 1;
                assert!(helix.scale >= MIN_SCALE && helix.scale < MAX_SCALE);
                assert!(helix.segments >= MIN_SEGMENTS && helix.segments < MAX_SEGMENTS);
                assert_eq!(helix.radius, BASE_RADIUS * helix.scale);
                assert!(helix.angle >= 0.0 && helix.angle < TAU);
                assert_eq!(helix.y, -helix.span());
                let margin = helix.radius + SPAWN_EDGE_MARGIN;
                assert!(helix.center_x >= margin && helix.center_x <= field.width - margin);
            }
        }
        assert!(accepted > 0, "no spawn ever found room on a 4000px field");
    }

    #[test]
    fn crowded_field_rejects_every_spawn() {
        // 300px wide: three columns 75px apart leave no legal gap even for
        // the smallest newcomer, which needs 80px of clearance.
        let field = HelixField::new(300.0, 600.0, &mut zeros());
        let mut rng = seeded(3);
        for _ in 0..100 {
            assert!(field.spawn_helix(&mut rng).is_none());
        }
    }

    #[test]
    fn rejected_replacement_recycles_the_old_column() {
        let mut field = HelixField::new(300.0, 600.0, &mut zeros());
        field.helixes[0].y = 601.0;
        let kept_x = field.helixes[0].center_x;
        let span = field.helixes[0].span();
        field.step(&mut seeded(3));
        assert_eq!(field.helixes.len(), INITIAL_HELIXES);
        assert_eq!(field.helixes[0].center_x, kept_x);
        assert_eq!(field.helixes[0].y, -span);
    }

    #[test]
    fn scroll_boost_doubles_the_drift_until_reverted() {
        let mut field = HelixField::new(800.0, 600.0, &mut zeros());
        let start: Vec<f64> = field.helixes.iter().map(|h| h.y).collect();

        field.set_speed_multiplier(SCROLL_BOOST_MULTIPLIER);
        field.step(&mut zeros());
        for (helix, y0) in field.helixes.iter().zip(&start) {
            assert_eq!(helix.y, y0 + BASE_SCROLL_SPEED * SCROLL_BOOST_MULTIPLIER);
        }

        field.set_speed_multiplier(1.0);
        let boosted: Vec<f64> = field.helixes.iter().map(|h| h.y).collect();
        field.step(&mut zeros());
        for (helix, y0) in field.helixes.iter().zip(&boosted) {
            assert_eq!(helix.y, y0 + BASE_SCROLL_SPEED);
        }
    }

    #[test]
    fn strand_density_follows_the_scale() {
        let helix = Helix {
            center_x: 400.0,
            y: -100.0,
            radius: BASE_RADIUS * 1.7,
            angle: 0.3,
            segments: 3,
            scale: 1.7,
        };
        assert_eq!(helix.points_per_segment(), 68);
        let points = helix.strand_points();
        assert_eq!(points.len(), 2 * 3 * 68);
        assert_eq!(points.iter().filter(|p| p.strand == Strand::Primary).count(), 3 * 68);
    }

    #[test]
    fn second_strand_mirrors_the_first_through_the_axis() {
        let helix = Helix {
            center_x: 250.0,
            y: 40.0,
            radius: 60.0,
            angle: 1.1,
            segments: 2,
            scale: 2.0,
        };
        for pair in helix.strand_points().chunks(2) {
            let [a, b] = pair else { panic!("points come in strand pairs") };
            assert_eq!(a.strand, Strand::Primary);
            assert_eq!(b.strand, Strand::Secondary);
            assert_eq!(a.y, b.y);
            assert!((a.x - helix.center_x + (b.x - helix.center_x)).abs() < 1e-9);
            assert!((a.z + b.z).abs() < 1e-9);
        }
    }

    #[test]
    fn depth_sort_paints_far_points_first() {
        let helix = Helix {
            center_x: 300.0,
            y: -50.0,
            radius: 45.0,
            angle: 0.0,
            segments: 2,
            scale: 1.5,
        };
        let points = helix.depth_sorted_points();
        for pair in points.windows(2) {
            assert!(pair[0].z >= pair[1].z);
        }
    }

    #[test]
    fn depth_shading_scales_size_and_alpha_linearly() {
        let helix = Helix {
            center_x: 0.0,
            y: 0.0,
            radius: 60.0,
            angle: 0.0,
            segments: 2,
            scale: 2.0,
        };
        assert_eq!(helix.depth_at(-60.0), 0.0);
        assert_eq!(helix.depth_at(0.0), 0.5);
        assert_eq!(helix.depth_at(60.0), 1.0);
        assert_eq!(helix.point_size(-60.0), 8.0);
        assert_eq!(helix.point_size(60.0), 16.0);
        assert!((helix.point_alpha(-60.0) - 0.08).abs() < 1e-12);
        assert!((helix.point_alpha(60.0) - 0.23).abs() < 1e-12);
    }
}
