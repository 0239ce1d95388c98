/// Angle (math convention, counter-clockwise from 3 o'clock) where the track begins.
pub const START_ANGLE_DEG: f64 = 225.0;
/// Total angular extent of the track. Arcs run clockwise from `START_ANGLE_DEG`.
pub const TRACK_SWEEP_DEG: u16 = 270;

/// Sizes derived from the drawable area, in Braille dot units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeGeometry {
    pub center_x: f64,
    pub center_y: f64,
    pub margin: u32,
    pub size: u32,
    pub thickness: u32,
    pub font_size: u32,
}

impl GaugeGeometry {
    /// `width`/`height` are the drawable extent in dots. Returns `None` when
    /// nothing fits once the margin is removed.
    pub fn for_dimensions(width: u32, height: u32) -> Option<Self> {
        let min_dim = width.min(height);
        let margin = 2.max((min_dim as f64 * 0.08) as u32);
        let size = min_dim.checked_sub(margin * 2).filter(|s| *s > 0)?;
        let thickness = 4.max((size as f64 * 0.13) as u32);
        let font_size = 8.max((size as f64 / 3.5) as u32);

        Some(Self {
            center_x: width as f64 / 2.0,
            center_y: height as f64 / 2.0,
            margin,
            size,
            thickness,
            font_size,
        })
    }

    pub fn radius(&self) -> f64 {
        self.size as f64 / 2.0
    }
}

/// Sweep of the filled arc for an already-clamped percentage.
pub fn sweep_degrees(percent: u8) -> u16 {
    let percent = percent.min(100) as u32;
    ((TRACK_SWEEP_DEG as u32 * percent + 50) / 100) as u16
}

/// A stroked arc: a ring band `thickness` wide centered on `radius`,
/// beginning at `start_deg` and running clockwise for `sweep_deg`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcStroke {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
    pub thickness: f64,
    pub start_deg: f64,
    pub sweep_deg: f64,
}

impl ArcStroke {
    pub fn track(geometry: &GaugeGeometry) -> Self {
        Self::with_sweep(geometry, TRACK_SWEEP_DEG)
    }

    pub fn with_sweep(geometry: &GaugeGeometry, sweep_deg: u16) -> Self {
        Self {
            center_x: geometry.center_x,
            center_y: geometry.center_y,
            radius: geometry.radius(),
            thickness: geometry.thickness as f64,
            start_deg: START_ANGLE_DEG,
            sweep_deg: sweep_deg as f64,
        }
    }

    pub fn end_deg(&self) -> f64 {
        self.start_deg - self.sweep_deg
    }

    /// Sample points covering the band. Flat caps: the band stops exactly at
    /// the start and end angles.
    pub fn points(&self) -> Vec<(f64, f64)> {
        if self.sweep_deg <= 0.0 || self.radius <= 0.0 {
            return Vec::new();
        }

        let half = self.thickness / 2.0;
        let inner = (self.radius - half).max(0.0);
        let outer = self.radius + half;
        let sweep = self.sweep_deg.to_radians();
        let start = self.start_deg.to_radians();

        let mut points = Vec::new();
        let mut rho = inner;
        while rho <= outer {
            // Half a dot of arc length per step keeps the band gap-free.
            let step = if rho > 0.0 {
                (0.5 / rho).min(1f64.to_radians())
            } else {
                sweep
            };
            let steps = (sweep / step).ceil() as usize;
            for i in 0..=steps {
                let theta = start - (i as f64 * step).min(sweep);
                points.push((
                    self.center_x + rho * theta.cos(),
                    self.center_y + rho * theta.sin(),
                ));
            }
            rho += 0.5;
        }
        points
    }
}
