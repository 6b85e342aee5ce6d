//! Placement math for the evasive control.

use rand::Rng;

use crate::config::EvadeSettings;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Inclusive range the control's top-left corner may land in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EvadeBounds {
    pub min: Point,
    pub max: Point,
}

impl EvadeBounds {
    pub fn contains(&self, p: Point) -> bool {
        (self.min.x..=self.max.x).contains(&p.x) && (self.min.y..=self.max.y).contains(&p.y)
    }
}

/// `[edge, surface - control - far]` per axis. An empty or unmeasurable range
/// collapses onto the edge margin.
pub fn evade_bounds(surface: Size, control: Size, settings: &EvadeSettings) -> EvadeBounds {
    let edge = settings.edge_margin;
    let upper = |surface_len: f64, control_len: f64| {
        let hi = surface_len - control_len - settings.far_margin;
        if hi.is_finite() && hi > edge { hi } else { edge }
    };
    EvadeBounds {
        min: Point { x: edge, y: edge },
        max: Point {
            x: upper(surface.width, control.width),
            y: upper(surface.height, control.height),
        },
    }
}

/// Uniformly sample a new position, each axis independently.
pub fn sample_evade_position<R: Rng + ?Sized>(
    rng: &mut R,
    surface: Size,
    control: Size,
    settings: &EvadeSettings,
) -> Point {
    let bounds = evade_bounds(surface, control, settings);
    Point {
        x: sample_axis(rng, bounds.min.x, bounds.max.x),
        y: sample_axis(rng, bounds.min.y, bounds.max.y),
    }
}

fn sample_axis<R: Rng + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    if hi > lo { rng.gen_range(lo..=hi) } else { lo }
}

/// Starting spot: surface center shifted by the configured offset.
pub fn recentered_position(surface: Size, settings: &EvadeSettings) -> Point {
    Point {
        x: surface.width / 2.0 + settings.recenter_offset.x,
        y: surface.height / 2.0 + settings.recenter_offset.y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn bounds_follow_margins() {
        let b = evade_bounds(
            Size::new(500.0, 700.0),
            Size::new(100.0, 48.0),
            &EvadeSettings::default(),
        );
        assert_eq!(b.min, Point { x: 20.0, y: 20.0 });
        assert_eq!(b.max, Point { x: 360.0, y: 612.0 });
    }

    #[test]
    fn cramped_surface_clamps_to_edge_margin() {
        let settings = EvadeSettings::default();
        let mut rng = StdRng::seed_from_u64(7);
        // 120 - 100 - 40 = -20: nothing usable on x.
        let p = sample_evade_position(
            &mut rng,
            Size::new(120.0, 300.0),
            Size::new(100.0, 40.0),
            &settings,
        );
        assert_eq!(p.x, 20.0);
        assert!((20.0..=220.0).contains(&p.y));
    }

    #[test]
    fn unmeasured_surface_clamps_to_edge_margin() {
        let settings = EvadeSettings::default();
        let mut rng = StdRng::seed_from_u64(1);
        let p = sample_evade_position(
            &mut rng,
            Size::new(f64::NAN, f64::INFINITY),
            Size::new(100.0, 40.0),
            &settings,
        );
        assert_eq!(p, Point { x: 20.0, y: 20.0 });
    }

    #[test]
    fn samples_stay_inside_bounds() {
        let settings = EvadeSettings::default();
        let mut rng = StdRng::seed_from_u64(42);
        for (w, h) in [(320.0, 600.0), (900.0, 800.0), (161.0, 109.0)] {
            let surface = Size::new(w, h);
            let control = Size::new(100.0, 48.0);
            let bounds = evade_bounds(surface, control, &settings);
            for _ in 0..500 {
                let p = sample_evade_position(&mut rng, surface, control, &settings);
                assert!(bounds.contains(p), "{p:?} escaped {bounds:?}");
            }
        }
    }

    #[test]
    fn recenter_uses_offset_from_center() {
        let p = recentered_position(Size::new(800.0, 700.0), &EvadeSettings::default());
        assert_eq!(p, Point { x: 460.0, y: 320.0 });
    }
}
