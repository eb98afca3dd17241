use std::collections::HashMap;

/// Level assigned to any label missing from the table.
pub const DEFAULT_STRESS_LEVEL: i32 = 3;

/// Emotion label to stress level (1 low, 7 high). Keys are matched exactly.
const STANDARD_LEVELS: [(&str, i32); 11] = [
    ("joy", 1),
    ("surprise", 1),
    ("Excited", 2),
    ("Inspired", 2),
    ("calm", 2),
    ("neutral", 3),
    ("confused", 3),
    ("sadness", 4),
    ("anger", 7),
    ("disgust", 6),
    ("fear", 5),
];

/// Immutable emotion → stress lookup. Total over all strings.
#[derive(Debug, Clone)]
pub struct StressMap {
    levels: HashMap<String, i32>,
    fallback: i32,
}

impl StressMap {
    pub fn new<I, S>(levels: I, fallback: i32) -> Self
    where
        I: IntoIterator<Item = (S, i32)>,
        S: Into<String>,
    {
        Self {
            levels: levels.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            fallback,
        }
    }

    /// Case-sensitive lookup.
    pub fn level_for(&self, label: &str) -> i32 {
        self.levels.get(label).copied().unwrap_or(self.fallback)
    }

    /// Lookup used when logging an emotion: the label is lowercased first,
    /// so table keys with capitals never match on this path.
    pub fn level_for_logged(&self, label: &str) -> i32 {
        self.level_for(&label.to_lowercase())
    }
}

impl Default for StressMap {
    fn default() -> Self {
        Self::new(STANDARD_LEVELS, DEFAULT_STRESS_LEVEL)
    }
}
