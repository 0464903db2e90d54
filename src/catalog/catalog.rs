use super::{ContentItem, ContentKind, Mood};
use std::collections::HashMap;

/// A violated catalog invariant, reported by [`Catalog::check`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    MissingMood(Mood),
    WrongEntryCount { mood: Mood, count: usize },
    MissingKind { mood: Mood, kind: ContentKind },
    DuplicateKind { mood: Mood, kind: ContentKind },
    VideoWithoutThumbnail(Mood),
    EmptyField { mood: Mood, field: &'static str },
}

/// The static recommendation table, keyed by mood. Built once at startup
/// and never mutated afterwards.
#[derive(Debug)]
pub struct Catalog {
    entries: HashMap<Mood, Vec<ContentItem>>,
}

impl Catalog {
    pub fn new(entries: HashMap<Mood, Vec<ContentItem>>) -> Catalog {
        Catalog { entries }
    }

    /// The hand-coded table the server ships with.
    pub fn builtin() -> Catalog {
        let mut entries = HashMap::new();
        entries.insert(
            Mood::Happy,
            vec![
                ContentItem::video(
                    "Positive Vibes Meditation",
                    "https://www.youtube.com/watch?v=positive-vibes",
                    "https://images.unsplash.com/photo-1518241353330-0f7941c2d9b5?w=400",
                ),
                ContentItem::podcast("Joy and Gratitude", "https://open.spotify.com/episode/joy-gratitude"),
            ],
        );
        entries.insert(
            Mood::Neutral,
            vec![
                ContentItem::video(
                    "Mindfulness Practice",
                    "https://www.youtube.com/watch?v=mindfulness",
                    "https://images.unsplash.com/photo-1506126613408-eca07ce68773?w=400",
                ),
                ContentItem::podcast("Daily Wellness", "https://open.spotify.com/episode/wellness"),
            ],
        );
        entries.insert(
            Mood::Sad,
            vec![
                ContentItem::video(
                    "Calming Nature Sounds",
                    "https://www.youtube.com/watch?v=nature-sounds",
                    "https://images.unsplash.com/photo-1441974231531-c6227db76b6e?w=400",
                ),
                ContentItem::podcast("Overcoming Challenges", "https://open.spotify.com/episode/challenges"),
            ],
        );
        Catalog::new(entries)
    }

    /// Integrity checks: every mood has an entry of exactly one video
    /// (carrying a thumbnail) and one podcast, with no empty fields.
    pub fn check(&self) -> Vec<Problem> {
        let mut problems = Vec::new();
        for mood in Mood::ALL {
            let items = match self.entries.get(&mood) {
                None => {
                    problems.push(Problem::MissingMood(mood));
                    continue;
                }
                Some(items) => items,
            };

            if items.len() != 2 {
                problems.push(Problem::WrongEntryCount { mood, count: items.len() });
            }

            for kind in [ContentKind::Video, ContentKind::Podcast] {
                match items.iter().filter(|item| item.kind == kind).count() {
                    0 => problems.push(Problem::MissingKind { mood, kind }),
                    1 => {}
                    _ => problems.push(Problem::DuplicateKind { mood, kind }),
                }
            }

            for item in items {
                if item.title.is_empty() {
                    problems.push(Problem::EmptyField { mood, field: "title" });
                }
                if item.url.is_empty() {
                    problems.push(Problem::EmptyField { mood, field: "url" });
                }
                if item.kind == ContentKind::Video && item.thumbnail.is_none() {
                    problems.push(Problem::VideoWithoutThumbnail(mood));
                }
            }
        }
        problems
    }

    /// Total lookup: a mood with no entry resolves to the neutral one.
    pub fn recommendations(&self, mood: Mood) -> &[ContentItem] {
        self.entries
            .get(&mood)
            .or_else(|| self.entries.get(&Mood::Neutral))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Lookup from a raw string, resolving unknown values to neutral.
    pub fn recommendations_lossy(&self, raw_mood: &str) -> &[ContentItem] {
        self.recommendations(Mood::from_lossy(raw_mood))
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}
