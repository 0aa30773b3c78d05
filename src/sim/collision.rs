//! Collision resolution
//!
//! Player against fireballs (both stages) and against treasure (stage two).
//! Overlap is plain AABB; see `Rect::intersects`.

use glam::IVec2;

use super::entity::Entity;
use super::hud::ScoreDisplay;
use super::state::{GameEvent, StageCommon};
use super::treasure::Treasure;

/// Apply fireball hits against the visible player
///
/// Every overlapping fireball dies, costs a life and sends the player back
/// to `respawn`. Overlaps are measured against where the player stood before
/// the first respawn. Hits stop counting once no lives remain.
/// Returns the number of lives lost.
pub fn resolve_fireball_hits(common: &mut StageCommon, respawn: IVec2) -> u32 {
    if common.player_hidden {
        return 0;
    }

    let body = common.player.bounds();
    let mut lost = 0;
    for fireball in common.fireballs.iter_mut() {
        if common.lives.lives() == 0 {
            break;
        }
        if !fireball.is_alive() || !fireball.bounds().intersects(&body) {
            continue;
        }
        fireball.kill();
        common.player.reset(respawn);
        let lives_remaining = common.lives.lose_one();
        common.events.push(GameEvent::PlayerKilled { lives_remaining });
        log::debug!("Player hit by fireball {}, {} lives left", fireball.id, lives_remaining);
        lost += 1;
    }

    if lost > 0 {
        common.prune_fireballs();
    }
    lost
}

/// Collect every uncollected treasure the player overlaps
///
/// Returns the number collected this tick.
pub fn collect_treasures(
    body: &super::rect::Rect,
    treasures: &mut [Treasure],
    score: &mut ScoreDisplay,
    events: &mut Vec<GameEvent>,
) -> usize {
    let mut collected = 0;
    for treasure in treasures.iter_mut() {
        if treasure.collected || !treasure.rect.intersects(body) {
            continue;
        }
        let value = treasure.collect();
        score.add(u64::from(value));
        events.push(GameEvent::TreasureCollected { value });
        log::debug!("Collected treasure worth {} (score {})", value, score.score());
        collected += 1;
    }
    collected
}
