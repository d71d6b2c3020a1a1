//! Attack staging: rendezvous point, staging sector and gather orders.

use galaxy_core::{
    Attitude, ConfigOracle, EngineError, GalaxyEnv, GalaxyState, MissionId, MissionKind,
    MissionPhase, PlanetId, RealmId, RngOracle, Sector, ShipRole,
};

use super::MissionPlanner;

/// Ships an attack waits for, by realm attitude.
pub const fn gather_mix(attitude: Attitude) -> &'static [ShipRole] {
    use ShipRole::*;
    match attitude {
        Attitude::Aggressive => &[Assault, Assault, Trooper, Trooper],
        Attitude::Militaristic => &[Assault, Assault, Bomber, Trooper],
        Attitude::Expansionist => &[Assault, Trooper],
        Attitude::Backstabbing => &[Assault, Bomber, Trooper],
        Attitude::Logical => &[Assault, Bomber],
        Attitude::Diplomatic
        | Attitude::Peaceful
        | Attitude::Merchantile
        | Attitude::Scientific => &[Assault, Assault],
    }
}

impl MissionPlanner {
    /// Stages an attack on `planet` for `realm`.
    ///
    /// Creates one ATTACK mission at PLANNING, waiting at the staging sector,
    /// and one GATHER mission per ship of the realm's gather mix, in mix
    /// order. Returns `None` when the realm already attacks that planet.
    pub fn create_attack_mission(
        state: &mut GalaxyState,
        env: &GalaxyEnv<'_>,
        realm: RealmId,
        planet: PlanetId,
    ) -> Result<Option<MissionId>, EngineError> {
        let attitude = state
            .realm(realm)
            .ok_or(EngineError::invalid_realm(realm))?
            .attitude;
        let target = state
            .planet(planet)
            .ok_or(EngineError::invalid_planet(planet))?
            .sector;

        let already_attacking = state
            .missions_of(realm)
            .any(|m| m.kind == MissionKind::Attack { planet });
        if already_attacking {
            return Ok(None);
        }

        let rendezvous = rendezvous(state, env, realm, target)?;
        let staging = state
            .nearest_planet(rendezvous, |p| p.is_owned_by(realm))
            .map(|p| p.sector)
            .unwrap_or(rendezvous);

        let attack = state.add_mission(
            realm,
            MissionKind::Attack { planet },
            MissionPhase::Planning,
            staging,
        );
        for &role in gather_mix(attitude) {
            state.add_mission(
                realm,
                MissionKind::Gather { role, attack },
                MissionPhase::Planning,
                staging,
            );
        }

        tracing::info!(
            "{} stages attack {} on {} at {} ({} gather orders)",
            realm,
            attack,
            planet,
            staging,
            gather_mix(attitude).len()
        );
        Ok(Some(attack))
    }
}

/// Rendezvous sector for a realm's forces.
///
/// The population-weighted centroid of the realm's planets, home worlds
/// counting double. A blocked centroid is perturbed with random probes; the
/// first open probe wins, otherwise the centroid is kept.
fn rendezvous(
    state: &mut GalaxyState,
    env: &GalaxyEnv<'_>,
    realm: RealmId,
    fallback: Sector,
) -> Result<Sector, EngineError> {
    let map = env.map()?;
    let config = env.config()?;
    let rng = env.rng()?;

    let base = centroid(state, realm).unwrap_or(fallback);
    if !state.is_blocked(map, base, realm) {
        return Ok(base);
    }

    let radius = config.rendezvous_probe_radius();
    for probe in 0..config.rendezvous_probes() {
        let dx = rng.range(state.next_seed(realm.0, probe * 2), -radius, radius);
        let dy = rng.range(state.next_seed(realm.0, probe * 2 + 1), -radius, radius);
        let candidate = base.offset(dx, dy);
        if !state.is_blocked(map, candidate, realm) {
            return Ok(candidate);
        }
    }
    tracing::debug!("{} found no open rendezvous near {}", realm, base);
    Ok(base)
}

fn centroid(state: &GalaxyState, realm: RealmId) -> Option<Sector> {
    let mut weights = (0i64, 0i64, 0i64);
    let mut plain = (0i64, 0i64, 0i64);
    for planet in state.planets_of(realm) {
        let weight = i64::from(planet.population) * if planet.home_world { 2 } else { 1 };
        weights.0 += i64::from(planet.sector.x) * weight;
        weights.1 += i64::from(planet.sector.y) * weight;
        weights.2 += weight;
        plain.0 += i64::from(planet.sector.x);
        plain.1 += i64::from(planet.sector.y);
        plain.2 += 1;
    }

    let (x, y, total) = if weights.2 > 0 { weights } else { plain };
    if total == 0 {
        return None;
    }
    Some(Sector::new((x / total) as i32, (y / total) as i32))
}
