//! Headless galaxy simulation: AI realms only, no presentation layer.
mod config;
mod logging;
mod scenario;

use anyhow::Result;
use config::SimConfig;
use galaxy_ai::{HumanPrompt, TurnProgress, TurnScheduler};
use galaxy_core::{AttitudeNegotiator, Env, GalaxyState, PcgRng};
use scenario::Scenario;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = SimConfig::from_env();
    let _guard = logging::init(&config.log_dir, config.seed)?;
    tracing::info!("{:?}", config);

    let Scenario {
        mut state,
        map,
        rules,
    } = scenario::build(&config);
    let rng = PcgRng;
    let diplomacy = AttitudeNegotiator;
    let env = Env::with_all(&map, &rules, &rng, &diplomacy).as_galaxy_env();

    let mut scheduler = TurnScheduler::new();
    let last_turn = state.turn.saturating_add(config.turns);
    while state.turn < last_turn {
        match scheduler.run_ai_turn(&mut state, &env)? {
            TurnProgress::TurnFinished(report) => {
                for item in &report.news {
                    tracing::info!("[turn {}] {}: {}", item.turn, item.headline, item.body);
                }
                for (realm, category) in &report.advances {
                    tracing::debug!("{} advanced {:?}", realm, category);
                }
            }
            TurnProgress::AwaitingHuman(prompt) => skip_prompt(&prompt),
            // run_ai_turn only returns yielding progress
            TurnProgress::FleetProcessed { .. } | TurnProgress::RealmFinished { .. } => {}
        }
    }

    summarize(&state);
    Ok(())
}

/// Every realm is AI controlled, so a prompt means a scenario bug.
fn skip_prompt(prompt: &HumanPrompt) {
    match prompt {
        HumanPrompt::Diplomacy { realm, human } => {
            tracing::warn!("{} asked {} for an audience; nobody answers", realm, human);
        }
        HumanPrompt::Combat(session) => {
            tracing::warn!("unattended combat left at round {}", session.round());
        }
        HumanPrompt::Siege(session) => {
            tracing::warn!("unattended siege of {} left", session.planet());
        }
    }
}

fn summarize(state: &GalaxyState) {
    tracing::info!("simulation ended before turn {}", state.turn);
    for realm in &state.realms {
        let (planets, population) = state
            .planets_of(realm.id)
            .fold((0, 0), |(count, total), planet| {
                (count + 1, total + planet.population)
            });
        tracing::info!(
            "{:<10} planets {:>2}  population {:>3}  fleets {:>2}  lost {:>3}  destroyed {:>3}  conquered {:>2}  colonized {:>2}",
            realm.name,
            planets,
            population,
            realm.fleets.len(),
            realm.stats.ships_lost,
            realm.stats.ships_destroyed,
            realm.stats.planets_conquered,
            realm.stats.planets_colonized
        );
    }
}
