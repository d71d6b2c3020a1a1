//! Galactic news feed and history archive.

use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NewsItem {
    pub turn: u32,
    pub headline: String,
    pub body: String,
}

impl NewsItem {
    pub fn new(turn: u32, headline: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            turn,
            headline: headline.into(),
            body: body.into(),
        }
    }
}

/// Pending news for the current turn plus everything already published.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NewsFeed {
    pending: Vec<NewsItem>,
    history: BTreeMap<u32, Vec<NewsItem>>,
}

impl NewsFeed {
    pub fn append(&mut self, item: NewsItem) {
        self.pending.push(item);
    }

    pub fn pending(&self) -> &[NewsItem] {
        &self.pending
    }

    /// Publishes the pending feed into the history under `turn` and clears it.
    pub fn consume(&mut self, turn: u32) -> Vec<NewsItem> {
        let published = std::mem::take(&mut self.pending);
        if !published.is_empty() {
            self.history
                .entry(turn)
                .or_default()
                .extend(published.iter().cloned());
        }
        published
    }

    pub fn history(&self, turn: u32) -> &[NewsItem] {
        self.history.get(&turn).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn all_history(&self) -> impl Iterator<Item = &NewsItem> {
        self.history.values().flatten()
    }
}
