//! Day/night cycle

use void_ecs::prelude::*;

/// Time of day at startup: early morning
pub const START_TIME: f32 = 0.25;

/// Coarse segment of the day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimePhase {
    Night,
    Sunrise,
    Day,
    Sunset,
}

impl TimePhase {
    pub fn at(time_of_day: f32) -> Self {
        if !(0.15..=0.85).contains(&time_of_day) {
            TimePhase::Night
        } else if time_of_day < 0.25 {
            TimePhase::Sunrise
        } else if (0.65..0.85).contains(&time_of_day) {
            TimePhase::Sunset
        } else {
            TimePhase::Day
        }
    }
}

/// Colours for one lighting mood
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub sun: Color,
    pub ambient: Color,
    pub fog: Color,
    pub sky: Color,
}

impl Palette {
    pub const DAY: Palette = Palette {
        sun: Color::rgb(1.0, 1.0, 1.0),
        ambient: Color::rgb(1.0, 1.0, 1.0),
        fog: Color::rgb(0.537255, 0.698039, 0.921569),
        sky: Color::rgb(0.0, 0.466667, 1.0),
    };

    pub const NIGHT: Palette = Palette {
        sun: Color::rgb(0.266667, 0.266667, 1.0),
        ambient: Color::rgb(0.133333, 0.133333, 0.266667),
        fog: Color::rgb(0.0, 0.0, 0.2),
        sky: Color::rgb(0.0, 0.0, 0.066667),
    };

    pub const SUNRISE: Palette = Palette {
        sun: Color::rgb(1.0, 0.666667, 0.4),
        ambient: Color::rgb(1.0, 0.8, 0.533333),
        fog: Color::rgb(1.0, 0.666667, 0.533333),
        sky: Color::rgb(1.0, 0.533333, 0.266667),
    };

    pub fn lerp(self, other: Palette, t: f32) -> Palette {
        Palette {
            sun: self.sun.lerp(other.sun, t),
            ambient: self.ambient.lerp(other.ambient, t),
            fog: self.fog.lerp(other.fog, t),
            sky: self.sky.lerp(other.sky, t),
        }
    }
}

/// Lighting parameters handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    pub phase: TimePhase,
    pub sun_intensity: f32,
    pub ambient_intensity: f32,
    pub palette: Palette,
    pub sun_position: Vec3,
}

impl Lighting {
    pub fn at(time_of_day: f32) -> Self {
        let phase = TimePhase::at(time_of_day);
        let (sun_intensity, ambient_intensity, palette) = match phase {
            TimePhase::Night => (0.3, 0.2, Palette::NIGHT),
            TimePhase::Sunrise => {
                let t = (time_of_day - 0.15) / 0.10;
                (0.3 + t * 0.7, 0.2 + t * 0.4, Palette::NIGHT.lerp(Palette::SUNRISE, t))
            }
            TimePhase::Sunset => {
                let t = (time_of_day - 0.65) / 0.20;
                (1.0 - t * 0.7, 0.6 - t * 0.4, Palette::DAY.lerp(Palette::SUNRISE, t))
            }
            TimePhase::Day => (1.0, 0.6, Palette::DAY),
        };

        let angle = (time_of_day - 0.25) * void_math::consts::TAU;
        let sun_position = Vec3::new(angle.cos() * 500.0, (angle.sin() * 500.0).max(50.0), -200.0);

        Self { phase, sun_intensity, ambient_intensity, palette, sun_position }
    }
}

/// Advances the time of day and recomputes lighting every tick
#[derive(Debug, Clone)]
pub struct DayNightCycle {
    time_of_day: f32,
    day_length: f32,
    lighting: Lighting,
}

impl DayNightCycle {
    pub fn new(day_length: f32) -> Self {
        Self {
            time_of_day: START_TIME,
            day_length,
            lighting: Lighting::at(START_TIME),
        }
    }

    pub fn with_time(mut self, time_of_day: f32) -> Self {
        self.time_of_day = time_of_day.rem_euclid(1.0);
        self.lighting = Lighting::at(self.time_of_day);
        self
    }

    /// Fraction of the day in [0, 1); 0.5 is noon
    pub fn time_of_day(&self) -> f32 {
        self.time_of_day
    }

    pub fn phase(&self) -> TimePhase {
        self.lighting.phase
    }

    pub fn lighting(&self) -> &Lighting {
        &self.lighting
    }

    /// Wall clock as `HH:MM`
    pub fn time_string(&self) -> String {
        let hours = self.time_of_day * 24.0;
        let whole = hours.floor();
        let minutes = ((hours - whole) * 60.0).floor();
        format!("{:02}:{:02}", whole as u32, minutes as u32)
    }

    pub fn advance(&mut self, dt: f32) {
        self.time_of_day += dt / self.day_length;
        if self.time_of_day >= 1.0 {
            self.time_of_day -= 1.0;
        }
        let previous = self.lighting.phase;
        self.lighting = Lighting::at(self.time_of_day);
        if previous != self.lighting.phase {
            log::info!("{:?} begins at {}", self.lighting.phase, self.time_string());
        }
    }
}

impl Default for DayNightCycle {
    fn default() -> Self {
        Self::new(300.0)
    }
}

impl Component for DayNightCycle {
    fn capability(&self) -> Capability {
        Capability::Environment
    }

    fn has_update(&self) -> bool {
        true
    }

    fn update(&mut self, dt: f32, _ctx: &mut Context<'_>) {
        self.advance(dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_phase_boundaries() {
        assert_eq!(TimePhase::at(0.1), TimePhase::Night);
        assert_eq!(TimePhase::at(0.9), TimePhase::Night);
        assert_eq!(TimePhase::at(0.15), TimePhase::Sunrise);
        assert_eq!(TimePhase::at(0.25), TimePhase::Day);
        assert_eq!(TimePhase::at(0.65), TimePhase::Sunset);
        assert_eq!(TimePhase::at(0.86), TimePhase::Night);
    }

    #[test]
    fn test_starts_in_the_morning() {
        let cycle = DayNightCycle::default();
        assert_eq!(cycle.time_string(), "06:00");
        assert_eq!(cycle.phase(), TimePhase::Day);
        assert_eq!(cycle.lighting().sun_intensity, 1.0);
    }

    #[test]
    fn test_sunrise_blends_from_night() {
        let lighting = Lighting::at(0.2);
        assert_relative_eq!(lighting.sun_intensity, 0.65, epsilon = 1e-4);
        assert_relative_eq!(lighting.ambient_intensity, 0.4, epsilon = 1e-4);
        let mid = Palette::NIGHT.lerp(Palette::SUNRISE, 0.5);
        assert_relative_eq!(lighting.palette.sun.g, mid.sun.g, epsilon = 1e-4);
    }

    #[test]
    fn test_sun_stays_above_horizon() {
        let noon = Lighting::at(0.5);
        assert_relative_eq!(noon.sun_position.y, 500.0, epsilon = 1e-2);
        let midnight = Lighting::at(0.0);
        assert_eq!(midnight.sun_position.y, 50.0);
        assert_eq!(midnight.sun_position.z, -200.0);
    }

    #[test]
    fn test_wraps_after_a_day() {
        let mut cycle = DayNightCycle::new(100.0).with_time(0.99);
        cycle.advance(2.0);
        assert_relative_eq!(cycle.time_of_day(), 0.01, epsilon = 1e-4);
        assert_eq!(cycle.phase(), TimePhase::Night);
        assert_eq!(cycle.time_string(), "00:14");
    }
}
