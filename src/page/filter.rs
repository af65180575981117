use super::projects::Card;

/// Case-insensitive substring match over card title and description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    needle: String,
}

impl ProjectFilter {
    pub fn new(query: &str) -> Self {
        Self {
            needle: query.trim().to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn matches(&self, card: &Card) -> bool {
        self.is_empty()
            || card.title.to_lowercase().contains(&self.needle)
            || card.description.to_lowercase().contains(&self.needle)
    }

    pub fn apply(&self, cards: &[Card]) -> Vec<Card> {
        cards.iter().filter(|card| self.matches(card)).cloned().collect()
    }
}
