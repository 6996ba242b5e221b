use library_catalog::{DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};

/// Render scale, kept on the 0.25 grid inside [0.5, 3.0]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zoom(f32);

impl Default for Zoom {
    fn default() -> Self {
        Self(DEFAULT_ZOOM)
    }
}

impl Zoom {
    /// Clamp and snap an arbitrary scale onto the zoom grid
    pub fn new(scale: f32) -> Self {
        if !scale.is_finite() {
            return Self::default();
        }
        let snapped = (scale / ZOOM_STEP).round() * ZOOM_STEP;
        Self(snapped.clamp(MIN_ZOOM, MAX_ZOOM))
    }

    pub fn scale(self) -> f32 {
        self.0
    }

    pub fn percent(self) -> u32 {
        (self.0 * 100.0).round() as u32
    }

    /// Returns whether the scale changed
    pub fn zoom_in(&mut self) -> bool {
        self.step(ZOOM_STEP)
    }

    /// Returns whether the scale changed
    pub fn zoom_out(&mut self) -> bool {
        self.step(-ZOOM_STEP)
    }

    fn step(&mut self, delta: f32) -> bool {
        let next = (self.0 + delta).clamp(MIN_ZOOM, MAX_ZOOM);
        if next == self.0 {
            return false;
        }
        self.0 = next;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_steps_by_quarter() {
        let mut zoom = Zoom::default();
        assert_eq!(zoom.scale(), 1.5);

        assert!(zoom.zoom_in());
        assert_eq!(zoom.scale(), 1.75);
        assert_eq!(zoom.percent(), 175);

        assert!(zoom.zoom_out());
        assert!(zoom.zoom_out());
        assert_eq!(zoom.scale(), 1.25);
    }

    #[test]
    fn zoom_clamps_at_bounds() {
        let mut zoom = Zoom::new(3.0);
        assert!(!zoom.zoom_in());
        assert_eq!(zoom.scale(), 3.0);

        let mut zoom = Zoom::new(0.5);
        assert!(!zoom.zoom_out());
        assert_eq!(zoom.scale(), 0.5);

        for _ in 0..20 {
            zoom.zoom_in();
        }
        assert_eq!(zoom.scale(), 3.0);
    }

    #[test]
    fn new_snaps_and_clamps() {
        assert_eq!(Zoom::new(1.3).scale(), 1.25);
        assert_eq!(Zoom::new(10.0).scale(), 3.0);
        assert_eq!(Zoom::new(0.0).scale(), 0.5);
        assert_eq!(Zoom::new(f32::NAN), Zoom::default());
    }
}
