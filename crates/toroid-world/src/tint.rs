use serde::{Deserialize, Serialize};
use toroid_core::Coord;

/// Per-cell display colour, RGB in `[0, 1]`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Tint {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Tint {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Fully saturated, full brightness colour of the given hue in `[0, 1]`.
    pub fn from_hue(hue: f32) -> Self {
        let h = hue.clamp(0.0, 1.0) * 6.0;
        let sector = h.floor();
        let rise = h - sector;
        let fall = 1.0 - rise;
        match sector as u32 % 6 {
            0 => Self::new(1.0, rise, 0.0),
            1 => Self::new(fall, 1.0, 0.0),
            2 => Self::new(0.0, 1.0, rise),
            3 => Self::new(0.0, fall, 1.0),
            4 => Self::new(rise, 0.0, 1.0),
            _ => Self::new(1.0, 0.0, fall),
        }
    }

    /// Hue in `[0, 1)`; grey has hue 0.
    pub fn hue(self) -> f32 {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let delta = max - min;
        if delta <= 0.0 {
            return 0.0;
        }
        let sector = if max == self.r {
            ((self.g - self.b) / delta).rem_euclid(6.0)
        } else if max == self.g {
            (self.b - self.r) / delta + 2.0
        } else {
            (self.r - self.g) / delta + 4.0
        };
        sector / 6.0
    }

    /// Colour derived from a cell position: the inverse coordinates,
    /// normalised, give a mix whose hue is shown at full saturation.
    /// Cells on a zero plane mix to black and so come out red.
    pub fn for_index(c: Coord) -> Self {
        let inv = |v: i32| 1.0 / v as f32;
        let (x, y, z) = (inv(c.x), inv(c.y), inv(c.z));
        let length = x + y + z;
        let part = |v: f32| {
            let p = v / length;
            if p.is_nan() { 0.0 } else { p }
        };
        Self::from_hue(Self::new(part(x), part(y), part(z)).hue())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Tint, b: Tint) -> bool {
        (a.r - b.r).abs() < 1e-5 && (a.g - b.g).abs() < 1e-5 && (a.b - b.b).abs() < 1e-5
    }

    #[test]
    fn primary_hues() {
        assert!(close(Tint::from_hue(0.0), Tint::new(1.0, 0.0, 0.0)));
        assert!(close(Tint::from_hue(1.0 / 3.0), Tint::new(0.0, 1.0, 0.0)));
        assert!(close(Tint::from_hue(2.0 / 3.0), Tint::new(0.0, 0.0, 1.0)));
        assert!(close(Tint::from_hue(1.0), Tint::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn hue_inverts_from_hue() {
        for i in 0..12 {
            let h = i as f32 / 12.0;
            assert!((Tint::from_hue(h).hue() - h).abs() < 1e-5, "hue {h}");
        }
    }

    #[test]
    fn index_tint_is_saturated() {
        let t = Tint::for_index(Coord::new(1, 2, 4));
        let max = t.r.max(t.g).max(t.b);
        let min = t.r.min(t.g).min(t.b);
        assert!((max - 1.0).abs() < 1e-5);
        assert!(min.abs() < 1e-5);
        // x has the largest inverse, so red dominates.
        assert_eq!(max, t.r);
    }

    #[test]
    fn origin_is_red() {
        assert!(close(Tint::for_index(Coord::ZERO), Tint::new(1.0, 0.0, 0.0)));
    }
}
