//! Negotiation seam for AI-to-AI first contact.

use crate::state::{Attitude, GalaxyState, RealmId, Relation};

/// Decides the relation two AI realms settle on when they meet.
///
/// Negotiation content (offers, speeches, trade) lives outside the engine;
/// the engine only needs the resulting relation.
pub trait DiplomacyOracle: Send + Sync {
    fn negotiate(&self, state: &GalaxyState, realm: RealmId, other: RealmId) -> Relation;
}

/// Attitude-driven negotiator used when no richer diplomacy module is wired in.
#[derive(Clone, Copy, Debug, Default)]
pub struct AttitudeNegotiator;

impl AttitudeNegotiator {
    const fn is_hostile(attitude: Attitude) -> bool {
        matches!(attitude, Attitude::Aggressive | Attitude::Backstabbing)
    }
}

impl DiplomacyOracle for AttitudeNegotiator {
    fn negotiate(&self, state: &GalaxyState, realm: RealmId, other: RealmId) -> Relation {
        let (Some(a), Some(b)) = (state.realm(realm), state.realm(other)) else {
            return Relation::Neutral;
        };

        if Self::is_hostile(a.attitude) || Self::is_hostile(b.attitude) {
            Relation::War
        } else if matches!(a.attitude, Attitude::Merchantile)
            && matches!(b.attitude, Attitude::Merchantile)
        {
            Relation::TradeAlliance
        } else {
            Relation::Peace
        }
    }
}
