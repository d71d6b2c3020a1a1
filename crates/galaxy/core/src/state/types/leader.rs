use super::common::{LeaderId, RealmId};

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct LeaderPerks: u8 {
        /// Can buy an escape from a conquered planet.
        const WEALTHY = 1 << 0;
        const MILITARISTIC = 1 << 1;
        const SCIENTIST = 1 << 2;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LeaderStatus {
    Alive,
    Dead,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Leader {
    pub id: LeaderId,
    pub name: String,
    pub realm: RealmId,
    pub perks: LeaderPerks,
    pub status: LeaderStatus,
}

impl Leader {
    pub fn new(id: LeaderId, name: impl Into<String>, realm: RealmId) -> Self {
        Self {
            id,
            name: name.into(),
            realm,
            perks: LeaderPerks::empty(),
            status: LeaderStatus::Alive,
        }
    }

    pub fn with_perks(mut self, perks: LeaderPerks) -> Self {
        self.perks = perks;
        self
    }

    pub fn is_alive(&self) -> bool {
        self.status == LeaderStatus::Alive
    }
}
