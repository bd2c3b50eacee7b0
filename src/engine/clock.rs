//! Wall clock for the animated analog-clock prop.
//!
//! The fractional terms (0.1 degree per minute on the hour hand, 0.1
//! degree per second on the minute hand) make the hands sweep instead of
//! jumping on each tick. Angles are negative because clock hands turn
//! clockwise when viewed from the front.

use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Default, Clone, Copy)]
pub struct MuseumClock {
    hour: u32,
    minute: u32,
    second: u32,
}

impl MuseumClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample the system clock. Hour is kept mod 12.
    pub fn update(&mut self) {
        let since_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        let seconds_today = (since_epoch % 86_400) as u32;
        self.hour = (seconds_today / 3600) % 12;
        self.minute = (seconds_today / 60) % 60;
        self.second = seconds_today % 60;
    }

    pub fn set(&mut self, hour: u32, minute: u32, second: u32) {
        self.hour = hour % 12;
        self.minute = minute % 60;
        self.second = second % 60;
    }

    pub fn hour_angle(&self) -> f32 {
        (-30.0 * self.hour as f32 - 0.1 * self.minute as f32).to_radians()
    }

    pub fn minute_angle(&self) -> f32 {
        (-6.0 * self.minute as f32 - 0.1 * self.second as f32).to_radians()
    }

    pub fn second_angle(&self) -> f32 {
        (-6.0 * self.second as f32).to_radians()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_o_clock_points_right() {
        let mut clock = MuseumClock::new();
        clock.set(3, 0, 0);
        assert!((clock.hour_angle() - (-90.0f32).to_radians()).abs() < 1e-6);
    }

    #[test]
    fn half_past_includes_the_sweep_term() {
        let mut clock = MuseumClock::new();
        clock.set(0, 30, 0);
        // -6 * 30 = -180, plus nothing from seconds.
        assert!((clock.minute_angle() - (-180.0f32).to_radians()).abs() < 1e-6);
        // The hour hand has crept -3 degrees past twelve.
        assert!((clock.hour_angle() - (-3.0f32).to_radians()).abs() < 1e-6);
    }

    #[test]
    fn minute_hand_sweeps_with_seconds() {
        let mut clock = MuseumClock::new();
        clock.set(0, 30, 30);
        // -180 - 0.1 * 30 = -183 degrees.
        assert!((clock.minute_angle() - (-183.0f32).to_radians()).abs() < 1e-6);
    }

    #[test]
    fn second_hand_has_no_fractional_term() {
        let mut clock = MuseumClock::new();
        clock.set(0, 0, 15);
        assert!((clock.second_angle() - (-90.0f32).to_radians()).abs() < 1e-6);
    }

    #[test]
    fn hour_wraps_mod_twelve() {
        let mut clock = MuseumClock::new();
        clock.set(15, 0, 0);
        let mut three = MuseumClock::new();
        three.set(3, 0, 0);
        assert_eq!(clock.hour_angle(), three.hour_angle());
    }

    #[test]
    fn update_produces_in_range_fields() {
        let mut clock = MuseumClock::new();
        clock.update();
        assert!(clock.hour < 12);
        assert!(clock.minute < 60);
        assert!(clock.second < 60);
    }
}
