//! Per-frame HUD report: speed, compass sector and live wave count.

use std::f32::consts::{FRAC_PI_4, TAU};
use std::fmt;

/// Eight compass sectors, clockwise from north
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compass {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Compass {
    const SECTORS: [Compass; 8] = [
        Compass::N,
        Compass::NE,
        Compass::E,
        Compass::SE,
        Compass::S,
        Compass::SW,
        Compass::W,
        Compass::NW,
    ];

    /// Bucket a boat heading (radians, any range) into one of eight sectors.
    ///
    /// Heading 0 faces north (-Z) and grows with left turns, while sectors run
    /// clockwise, so the bearing is the negated heading.
    pub fn from_heading(heading: f32) -> Self {
        let bearing = -heading;
        // `%` keeps the sign of the dividend; adding TAU makes it non-negative
        let wrapped = bearing % TAU + TAU;
        let index = (wrapped / FRAC_PI_4).round() as i64;
        Self::SECTORS[index.rem_euclid(8) as usize]
    }

    pub fn label(self) -> &'static str {
        match self {
            Compass::N => "N",
            Compass::NE => "NE",
            Compass::E => "E",
            Compass::SE => "SE",
            Compass::S => "S",
            Compass::SW => "SW",
            Compass::W => "W",
            Compass::NW => "NW",
        }
    }
}

impl fmt::Display for Compass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What the HUD shows for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct HudReport {
    /// Speed in display units
    pub speed: f32,
    pub speed_unit: String,
    pub compass: Compass,
    pub live_wavefronts: usize,
}

impl fmt::Display for HudReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.1} {} | {} | waves: {}",
            self.speed, self.speed_unit, self.compass, self.live_wavefronts
        )
    }
}

/// Receiver of HUD reports, installed by the host
pub trait HudSink {
    fn report(&mut self, report: &HudReport);
}

impl<F: FnMut(&HudReport)> HudSink for F {
    fn report(&mut self, report: &HudReport) {
        self(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_cardinal_headings() {
        assert_eq!(Compass::from_heading(0.0), Compass::N);
        assert_eq!(Compass::from_heading(PI / 2.0), Compass::W);
        assert_eq!(Compass::from_heading(PI), Compass::S);
        assert_eq!(Compass::from_heading(3.0 * PI / 2.0), Compass::E);
    }

    #[test]
    fn test_left_turn_reads_west() {
        // Heading PI/2 points the bow along world -X
        let heading = PI / 2.0;
        let forward = (-heading.sin(), -heading.cos());
        assert!((forward.0 + 1.0).abs() < 1e-6 && forward.1.abs() < 1e-6);
        assert_eq!(Compass::from_heading(heading), Compass::W);
        assert_eq!(Compass::from_heading(-heading), Compass::E);
    }

    #[test]
    fn test_negative_and_wrapped_headings() {
        assert_eq!(Compass::from_heading(-PI / 4.0), Compass::NE);
        assert_eq!(Compass::from_heading(-PI / 2.0), Compass::E);
        assert_eq!(Compass::from_heading(TAU + PI / 4.0), Compass::NW);
        assert_eq!(Compass::from_heading(-TAU - PI), Compass::S);
    }

    #[test]
    fn test_sector_boundaries_round_to_nearest() {
        assert_eq!(Compass::from_heading(0.3), Compass::N);
        assert_eq!(Compass::from_heading(0.5), Compass::NW);
        assert_eq!(Compass::from_heading(TAU - 0.1), Compass::N);
    }

    #[test]
    fn test_closure_sink_receives_report() {
        let mut seen = Vec::new();
        {
            let mut sink = |report: &HudReport| seen.push(report.live_wavefronts);
            let report = HudReport {
                speed: 3.0,
                speed_unit: "kn".to_string(),
                compass: Compass::N,
                live_wavefronts: 4,
            };
            sink.report(&report);
        }
        assert_eq!(seen, vec![4]);
    }

    #[test]
    fn test_report_display() {
        let report = HudReport {
            speed: 12.345,
            speed_unit: "kn".to_string(),
            compass: Compass::SW,
            live_wavefronts: 2,
        };
        assert_eq!(report.to_string(), "12.3 kn | SW | waves: 2");
    }
}
