//! Research income applied to tech lists.

use crate::env::ConfigOracle;
use crate::state::{GalaxyState, Message, MessageKind, RealmId, TechCategory};

/// Applies and resets every realm's research income.
///
/// Returns the categories that gained a level, per realm.
pub fn apply_research<C>(state: &mut GalaxyState, config: &C) -> Vec<(RealmId, TechCategory)>
where
    C: ConfigOracle + ?Sized,
{
    let cost = config.research_cost_per_level();
    let mut advances = Vec::new();

    for realm in &mut state.realms {
        let income = std::mem::take(&mut realm.research_income);
        for category in realm.tech.add_research(income, cost) {
            let label: &'static str = category.into();
            let level = realm.tech.level(category);
            realm.notify(Message::new(
                MessageKind::Research,
                format!("{label} research reached level {level}"),
            ));
            advances.push((realm.id, category));
        }
    }
    advances
}
