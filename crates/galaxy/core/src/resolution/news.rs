//! Periodic galactic news digest.

use strum::IntoEnumIterator;

use crate::env::ConfigOracle;
use crate::state::{GalaxyState, NewsItem, RealmId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Ranking {
    Credits,
    Culture,
    Military,
    Research,
    Planets,
    Population,
}

impl Ranking {
    /// Score of `realm` in this ranking.
    pub fn score(self, state: &GalaxyState, realm: RealmId) -> u64 {
        let Some(info) = state.realm(realm) else {
            return 0;
        };
        match self {
            Self::Credits => info.credits.max(0) as u64,
            Self::Culture => state.planets_of(realm).map(|p| u64::from(p.culture)).sum(),
            Self::Military => state.fleets_of(realm).map(|f| u64::from(f.firepower())).sum(),
            Self::Research => u64::from(info.tech.total_levels()),
            Self::Planets => state.planets_of(realm).count() as u64,
            Self::Population => state.planets_of(realm).map(|p| u64::from(p.population)).sum(),
        }
    }

    /// Realm with the highest score; the lower id wins ties.
    pub fn leader(self, state: &GalaxyState) -> Option<(RealmId, u64)> {
        state
            .realms
            .iter()
            .map(|realm| (realm.id, self.score(state, realm.id)))
            .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))
    }
}

/// Whether the digest is due at `turn`.
pub fn digest_due<C>(turn: u32, config: &C) -> bool
where
    C: ConfigOracle + ?Sized,
{
    let interval = config.news_interval();
    interval > 0 && turn % interval == 0
}

/// Appends one headline per ranking naming its leader.
pub fn publish_digest(state: &mut GalaxyState) {
    let headlines: Vec<(String, String)> = Ranking::iter()
        .filter_map(|ranking| {
            let (leader, score) = ranking.leader(state)?;
            let name = state.realm(leader)?.name.clone();
            let label: &'static str = ranking.into();
            Some((
                format!("{label}: {name} leads the galaxy"),
                format!("{name} tops the {label} ranking with {score}."),
            ))
        })
        .collect();

    for (headline, body) in headlines {
        state.publish(headline, body);
    }
}

/// Publishes the digest when due and archives the pending feed.
///
/// Returns the items published this turn.
pub fn close_news<C>(state: &mut GalaxyState, config: &C) -> Vec<NewsItem>
where
    C: ConfigOracle + ?Sized,
{
    if digest_due(state.turn, config) {
        publish_digest(state);
    }
    let turn = state.turn;
    state.news.consume(turn)
}
