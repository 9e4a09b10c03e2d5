//! Decorative starfield drawn behind the page.
//!
//! Stars are placed in normalized viewport coordinates so a resize keeps the
//! same sky. They are only drawn onto blank cells; page text always wins.

use std::f32::consts::TAU;
use std::time::Duration;

use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier};

use crate::theme::{Glyphs, Palette};

/// How much decoration the current terminal gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarDensity {
    Full,
    Reduced,
    Off,
}

/// Number of each kind of decoration for one density.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkyCounts {
    pub stars: usize,
    pub shooting_stars: usize,
    pub ufos: usize,
    pub asteroids: usize,
}

impl StarDensity {
    #[must_use]
    pub fn counts(self) -> SkyCounts {
        let (stars, shooting_stars, ufos, asteroids) = match self {
            StarDensity::Full => (50, 3, 2, 5),
            StarDensity::Reduced => (20, 1, 1, 2),
            StarDensity::Off => (0, 0, 0, 0),
        };
        SkyCounts {
            stars,
            shooting_stars,
            ufos,
            asteroids,
        }
    }
}

#[derive(Debug, Clone)]
struct Star {
    x: f32,
    y: f32,
    phase: f32,
    /// Twinkle period in seconds.
    period: f32,
}

#[derive(Debug, Clone)]
struct ShootingStar {
    y: f32,
    delay: f32,
    duration: f32,
    pause: f32,
}

impl ShootingStar {
    /// Progress through the current streak, or `None` while waiting.
    fn progress(&self, time: f32) -> Option<f32> {
        let local = time - self.delay;
        if local < 0.0 {
            return None;
        }
        let t = local % (self.duration + self.pause);
        (t < self.duration).then(|| t / self.duration)
    }
}

/// Something crossing the sky left to right at a constant speed.
#[derive(Debug, Clone)]
struct Drifter {
    y: f32,
    delay: f32,
    /// Seconds for one crossing.
    period: f32,
}

impl Drifter {
    /// Horizontal position in `0.0..1.0`, or `None` before the first crossing.
    fn progress(&self, time: f32) -> Option<f32> {
        let local = time - self.delay;
        (local >= 0.0).then(|| (local % self.period) / self.period)
    }
}

#[derive(Debug, Clone)]
pub struct Starfield {
    density: StarDensity,
    stars: Vec<Star>,
    shooting: Vec<ShootingStar>,
    ufos: Vec<Drifter>,
    asteroids: Vec<Drifter>,
    elapsed: Duration,
}

impl Starfield {
    #[must_use]
    pub fn new(density: StarDensity) -> Self {
        let counts = density.counts();
        Self {
            density,
            stars: (0..counts.stars).map(|_| random_star()).collect(),
            shooting: (0..counts.shooting_stars)
                .map(random_shooting_star)
                .collect(),
            ufos: (0..counts.ufos).map(ufo).collect(),
            asteroids: (0..counts.asteroids).map(random_asteroid).collect(),
            elapsed: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn density(&self) -> StarDensity {
        self.density
    }

    #[must_use]
    pub fn counts(&self) -> SkyCounts {
        SkyCounts {
            stars: self.stars.len(),
            shooting_stars: self.shooting.len(),
            ufos: self.ufos.len(),
            asteroids: self.asteroids.len(),
        }
    }

    /// Regenerate the sky if the density changed.
    pub fn set_density(&mut self, density: StarDensity) {
        if density != self.density {
            tracing::debug!(?density, "Starfield density changed");
            *self = Self::new(density);
        }
    }

    pub fn advance(&mut self, delta: Duration) {
        self.elapsed = self.elapsed.saturating_add(delta);
    }

    pub fn render(&self, buf: &mut Buffer, area: Rect, palette: &Palette, glyphs: &Glyphs) {
        if area.is_empty() {
            return;
        }
        let time = self.elapsed.as_secs_f32();

        for star in &self.stars {
            let brightness = (time * TAU / star.period + star.phase).sin();
            if brightness < -0.3 {
                continue;
            }
            let (glyph, bold) = if brightness > 0.8 {
                (glyphs.star_bright, true)
            } else {
                (glyphs.star, false)
            };
            let x = area.x + scale(star.x, area.width);
            let y = area.y + scale(star.y, area.height);
            paint(buf, x, y, glyph, palette.star, bold);
        }

        for streak in &self.shooting {
            let Some(p) = streak.progress(time) else {
                continue;
            };
            // Right to left, dropping a few rows on the way.
            let travel = f32::from(area.width) * (1.0 - p);
            let head_x = area.x + (travel.round() as u16).min(area.width.saturating_sub(1));
            let drop = (p * 4.0) as u16;
            let head_y = area.y + (scale(streak.y, area.height) + drop).min(area.height - 1);
            paint(buf, head_x, head_y, glyphs.shooting_star, palette.star, true);
            for dx in 1..=3 {
                let x = head_x.saturating_add(dx);
                if x < area.right() {
                    paint(buf, x, head_y, glyphs.shooting_tail, palette.primary_dim, false);
                }
            }
        }

        for ufo in &self.ufos {
            let Some(p) = ufo.progress(time) else {
                continue;
            };
            // Gentle bob of one row over four seconds.
            let bob = (time * TAU / 4.0).sin().round() as i32;
            let base = i32::from(scale(ufo.y, area.height));
            let row = (base + bob).clamp(0, i32::from(area.height) - 1) as u16;
            let x = area.x + scale(p, area.width);
            for (dx, ch) in glyphs.ufo.chars().enumerate() {
                let cx = x.saturating_add(dx as u16);
                if cx < area.right() {
                    let mut tmp = [0u8; 4];
                    paint(buf, cx, area.y + row, ch.encode_utf8(&mut tmp), palette.blue, true);
                }
            }
        }

        for asteroid in &self.asteroids {
            let Some(p) = asteroid.progress(time) else {
                continue;
            };
            let x = area.x + scale(p, area.width);
            let y = area.y + scale(asteroid.y, area.height);
            paint(buf, x, y, glyphs.asteroid, palette.text_muted, false);
        }
    }
}

fn scale(unit: f32, extent: u16) -> u16 {
    let max = extent.saturating_sub(1);
    ((unit * f32::from(extent)) as u16).min(max)
}

fn paint(buf: &mut Buffer, x: u16, y: u16, glyph: &str, color: Color, bold: bool) {
    let Some(cell) = buf.cell_mut(Position::new(x, y)) else {
        return;
    };
    if cell.symbol() != " " {
        return;
    }
    cell.set_symbol(glyph).set_fg(color);
    if bold {
        cell.modifier.insert(Modifier::BOLD);
    }
}

fn random_star() -> Star {
    Star {
        x: rand::random::<f32>(),
        y: rand::random::<f32>(),
        phase: rand::random::<f32>() * TAU,
        period: 2.0 + rand::random::<f32>() * 3.0,
    }
}

fn random_shooting_star(index: usize) -> ShootingStar {
    ShootingStar {
        y: rand::random::<f32>() * 0.5,
        delay: index as f32 * 4.0 + rand::random::<f32>() * 2.0,
        duration: 1.5 + rand::random::<f32>(),
        pause: 6.0 + rand::random::<f32>() * 6.0,
    }
}

/// UFOs fly fixed lanes at 30% and 70% of the height.
fn ufo(index: usize) -> Drifter {
    Drifter {
        y: (0.3 + index as f32 * 0.4).min(0.95),
        delay: index as f32 * 10.0,
        period: 20.0 + index as f32 * 5.0,
    }
}

fn random_asteroid(index: usize) -> Drifter {
    Drifter {
        y: rand::random::<f32>(),
        delay: index as f32 * 3.0,
        period: 25.0 + index as f32 * 5.0,
    }
}
