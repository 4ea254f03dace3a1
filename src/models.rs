//! Domain models passed between the song store, the analytics reducer and the
//! TUI. They stay plain data holders; presentation and bookkeeping live in the
//! other layers.

use std::fmt;

use thiserror::Error;

/// Reasons a raw number cannot become a [`Rating`].
#[derive(Debug, Error, PartialEq)]
pub enum RatingError {
    #[error("rating must be a finite number")]
    NotFinite,
    #[error("rating {0} is outside {min}..={max}", min = Rating::MIN, max = Rating::MAX)]
    OutOfRange(f32),
    #[error("rating {0} is not a multiple of {step}", step = Rating::STEP)]
    OffGrid(f32),
}

/// Star rating between one and five stars. Values entered through the form
/// always land on the half-star grid; the seed library carries a few
/// finer-grained scores which is why [`Rating::seeded`] exists.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Rating(f32);

impl Rating {
    pub const MIN: f32 = 1.0;
    pub const MAX: f32 = 5.0;
    pub const STEP: f32 = 0.5;
    /// Starting value of the slider on the add form.
    pub const DEFAULT: Rating = Rating(3.0);

    /// Validate a half-star rating.
    pub fn new(value: f32) -> Result<Self, RatingError> {
        let rating = Self::seeded(value)?;
        let steps = value / Self::STEP;
        if (steps - steps.round()).abs() > f32::EPSILON * 8.0 {
            return Err(RatingError::OffGrid(value));
        }
        Ok(rating)
    }

    /// Accept any in-range value, on the half-star grid or not.
    pub fn seeded(value: f32) -> Result<Self, RatingError> {
        if !value.is_finite() {
            return Err(RatingError::NotFinite);
        }
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(RatingError::OutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Snap to the nearest half star and pin into range, the way a slider
    /// control would. Non-finite input falls back to the default.
    pub fn clamped(value: f32) -> Self {
        if !value.is_finite() {
            return Self::DEFAULT;
        }
        let snapped = (value / Self::STEP).round() * Self::STEP;
        Self(snapped.clamp(Self::MIN, Self::MAX))
    }

    pub fn step_up(self) -> Self {
        Self::clamped(self.0 + Self::STEP)
    }

    pub fn step_down(self) -> Self {
        Self::clamped(self.0 - Self::STEP)
    }

    pub fn value(self) -> f32 {
        self.0
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Rating {
    /// One decimal place, matching how ratings are shown everywhere in the UI.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
/// A rated entry in the playlist.
pub struct Song {
    /// Caller-assigned or randomly drawn identifier. Nothing guarantees
    /// uniqueness; the UI never looks songs up by id.
    pub id: u32,
    pub title: String,
    pub artist: String,
    pub rating: Rating,
    /// Free-form notes. Songs created through the add form carry exactly one
    /// entry, possibly empty.
    pub comments: Vec<String>,
}

impl Song {
    pub fn new(
        id: u32,
        title: impl Into<String>,
        artist: impl Into<String>,
        rating: Rating,
        comments: Vec<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            artist: artist.into(),
            rating,
            comments,
        }
    }

    /// `Title - Artist`, omitting the hyphen when the artist is blank.
    pub fn display_title(&self) -> String {
        if self.artist.trim().is_empty() {
            self.title.clone()
        } else {
            format!("{} - {}", self.title, self.artist)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_rejects_values_outside_range() {
        assert_eq!(Rating::new(0.5), Err(RatingError::OutOfRange(0.5)));
        assert_eq!(Rating::new(5.5), Err(RatingError::OutOfRange(5.5)));
        assert_eq!(Rating::new(f32::NAN), Err(RatingError::NotFinite));
    }

    #[test]
    fn rating_requires_half_star_grid() {
        assert!(Rating::new(4.5).is_ok());
        assert_eq!(Rating::new(4.8), Err(RatingError::OffGrid(4.8)));
        assert!(Rating::seeded(4.8).is_ok());
    }

    #[test]
    fn clamped_snaps_and_pins() {
        assert_eq!(Rating::clamped(0.0).value(), 1.0);
        assert_eq!(Rating::clamped(9.0).value(), 5.0);
        assert_eq!(Rating::clamped(3.3).value(), 3.5);
        assert_eq!(Rating::clamped(f32::INFINITY), Rating::DEFAULT);
    }

    #[test]
    fn stepping_saturates_at_bounds() {
        let mut rating = Rating::DEFAULT;
        for _ in 0..10 {
            rating = rating.step_up();
        }
        assert_eq!(rating.value(), 5.0);
        for _ in 0..20 {
            rating = rating.step_down();
        }
        assert_eq!(rating.value(), 1.0);
        assert_eq!(rating.step_up().value(), 1.5);
    }

    #[test]
    fn rating_displays_one_decimal() {
        assert_eq!(Rating::DEFAULT.to_string(), "3.0");
        assert_eq!(Rating::seeded(4.8).unwrap().to_string(), "4.8");
    }

    #[test]
    fn display_title_skips_blank_artist() {
        let song = Song::new(1, "Imagine", "  ", Rating::DEFAULT, vec![]);
        assert_eq!(song.display_title(), "Imagine");
        let song = Song::new(1, "Imagine", "John Lennon", Rating::DEFAULT, vec![]);
        assert_eq!(song.display_title(), "Imagine - John Lennon");
    }
}
