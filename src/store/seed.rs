use crate::models::{Rating, Song};

/// Title, artist, rating and comments for the songs every fresh session
/// starts with. Ids follow list position starting at 1.
const SEED: &[(&str, &str, f32, &[&str])] = &[
    (
        "Bohemian Rhapsody",
        "Queen",
        4.8,
        &["Masterpiece!", "Best song ever"],
    ),
    ("Imagine", "John Lennon", 4.6, &["Timeless classic"]),
    ("Hotel California", "Eagles", 4.7, &["Iconic guitar solo"]),
];

/// Build the starter playlist in display order.
pub fn seed_songs() -> Vec<Song> {
    SEED.iter()
        .zip(1u32..)
        .map(|(&(title, artist, rating, comments), id)| {
            // Seed values are compile-time constants inside the valid range.
            let rating = Rating::seeded(rating).unwrap_or_default();
            Song::new(
                id,
                title,
                artist,
                rating,
                comments.iter().map(|c| c.to_string()).collect(),
            )
        })
        .collect()
}
