//! Defensive strategy.

// Priorities are products of small counts and probabilities.
#![allow(clippy::cast_precision_loss)]

use std::collections::HashMap;
use std::time::Duration;

use log::{debug, warn};

use crate::combat::elimination_chance;
use crate::map::{GroupId, TerritoryId, Working};
use crate::moves::{Movements, Placements};
use crate::sorter::{Order, sort_by_weight};
use crate::strategy::{Context, STARTING_PICKS, Strategy, distinct};

/// Damping applied to attacks on a territory that borders another group.
const GROUP_BORDER_DAMPING: f64 = 0.5;

/// Priority factor of staying put instead of attacking.
const HOLD_FACTOR: f64 = 0.5;

/// Danger assumed for a territory with no enemy neighbours.
const SAFE_DANGER: f64 = 10.0;

/// Transfer factor toward a territory whose group is fully owned.
const COMPLETE_GROUP_FACTOR: f64 = 10.0;

/// Transfer factor toward a territory whose group is still contested.
const OPEN_GROUP_FACTOR: f64 = 2.0;

#[derive(Debug, Clone, Copy)]
struct Candidate {
    from: TerritoryId,
    to: TerritoryId,
    troops: u32,
    priority: f64,
}

/// Finishes groups it already holds a foot in before reaching further.
///
/// Prefers low-connectivity starts, reinforces the members bordering the
/// unowned remainder of its most complete groups, and commits the moves with
/// the lowest priority first.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefensiveBot;

impl DefensiveBot {
    /// Groups holding an owned territory, fewest unowned members first.
    fn group_ranking(ctx: &Context<'_>) -> Vec<(GroupId, usize)> {
        let owned = ctx.map.owned_by(ctx.player);
        let mut ranked: Vec<(GroupId, usize)> = ctx
            .map
            .groups()
            .filter(|g| owned.iter().any(|t| t.group == g.id))
            .map(|g| (g.id, ctx.map.unowned_in_group(g.id, ctx.player)))
            .collect();
        ranked.sort_by_key(|&(_, unowned)| unowned);
        ranked
    }

    /// One army on each owned neighbour of every unowned member, group by
    /// group, until `remaining` runs out.
    fn reinforce_pass(
        ctx: &Context<'_>,
        ranked: &[(GroupId, usize)],
        remaining: &mut u32,
        placements: &mut Placements,
        working: &mut Working,
    ) {
        for &(group_id, unowned) in ranked {
            if unowned == 0 {
                continue;
            }
            let Some(group) = ctx.map.group(group_id) else {
                continue;
            };
            for &member in group.members() {
                let Some(territory) = ctx.map.territory(member) else {
                    continue;
                };
                if territory.is_owned_by(ctx.player) {
                    continue;
                }
                for id in ctx.map.owned_in(territory.neighbors(), ctx.player) {
                    if *remaining == 0 {
                        return;
                    }
                    placements.add(id, 1);
                    working.add(id, 1);
                    *remaining -= 1;
                }
            }
        }
    }
}

impl Strategy for DefensiveBot {
    fn pick_starting(
        &mut self,
        ctx: &Context<'_>,
        candidates: &[TerritoryId],
        _budget: Duration,
    ) -> Vec<TerritoryId> {
        let mut picks = sort_by_weight(&distinct(candidates), ctx.weights, Order::Ascending);
        picks.truncate(STARTING_PICKS);
        picks
    }

    fn place_armies(
        &mut self,
        ctx: &Context<'_>,
        working: &mut Working,
        _budget: Duration,
    ) -> Placements {
        let mut placements = Placements::new();
        if ctx.armies == 0 {
            return placements;
        }
        let owned: Vec<TerritoryId> = ctx.map.owned_by(ctx.player).iter().map(|t| t.id).collect();
        let Some(&best) = sort_by_weight(&owned, ctx.weights, Order::Ascending).first() else {
            warn!("no owned territory to place {} armies on", ctx.armies);
            return placements;
        };

        if ctx.turn == 1 {
            placements.add(best, ctx.armies);
            working.add(best, ctx.armies);
            return placements;
        }

        let ranked = Self::group_ranking(ctx);
        let mut remaining = ctx.armies;
        while remaining > 0 {
            let before = remaining;
            Self::reinforce_pass(ctx, &ranked, &mut remaining, &mut placements, working);
            if remaining == before {
                debug!("nothing left to reinforce, {remaining} armies go to {best}");
                placements.add(best, remaining);
                working.add(best, remaining);
                break;
            }
        }
        placements
    }

    fn attack_transfer(
        &mut self,
        ctx: &Context<'_>,
        working: &mut Working,
        _budget: Duration,
    ) -> Movements {
        let unowned: HashMap<GroupId, usize> = ctx
            .map
            .groups()
            .map(|g| (g.id, ctx.map.unowned_in_group(g.id, ctx.player)))
            .collect();
        let unowned_in = |group: GroupId| unowned.get(&group).copied().unwrap_or(0);

        let owned = ctx.map.owned_by(ctx.player);
        let mut danger: HashMap<TerritoryId, f64> = HashMap::new();
        let mut candidates = Vec::new();

        // Attacks, and the option of holding instead.
        for source in &owned {
            let troops = working.troops(source.id);
            let edges = source.degree() as f64;
            for &target_id in source.neighbors() {
                let Some(target) = ctx.map.territory(target_id) else {
                    continue;
                };
                if target.is_owned_by(ctx.player) {
                    continue;
                }
                let defenders = working.troops(target_id);

                // The neighbour is the attacker here.
                let threat = unowned_in(source.group) as f64
                    * edges
                    * elimination_chance(defenders, troops);
                *danger.entry(source.id).or_insert(1.0) *= threat;

                let target_edges = target.degree() as f64;
                let open = unowned_in(target.group) as f64;
                let mut priority = open * target_edges * elimination_chance(troops, defenders);
                if target.is_on_group_border() {
                    priority *= GROUP_BORDER_DAMPING;
                }
                candidates.push(Candidate {
                    from: source.id,
                    to: target_id,
                    troops: troops.saturating_sub(1),
                    priority,
                });
                candidates.push(Candidate {
                    from: source.id,
                    to: target_id,
                    troops: 0,
                    priority: open * target_edges * HOLD_FACTOR,
                });
            }
        }

        // Transfers toward territories in danger.
        for source in &owned {
            let troops = working.troops(source.id);
            for &target_id in source.neighbors() {
                let Some(target) = ctx.map.territory(target_id) else {
                    continue;
                };
                if !target.is_owned_by(ctx.player) {
                    continue;
                }
                let edges = target.degree() as f64;
                let open = unowned_in(target.group);
                let at_risk = danger.get(&target_id).copied().unwrap_or(SAFE_DANGER);
                let priority = if open == 0 {
                    COMPLETE_GROUP_FACTOR * edges * at_risk
                } else {
                    OPEN_GROUP_FACTOR * open as f64 * edges * at_risk
                };
                candidates.push(Candidate {
                    from: source.id,
                    to: target_id,
                    troops: troops.saturating_sub(1),
                    priority,
                });
            }
        }

        candidates.sort_by(|a, b| a.priority.total_cmp(&b.priority));

        let mut movements = Movements::new();
        for candidate in candidates {
            if working.troops(candidate.from) > 1 {
                if candidate.troops > 1 {
                    movements.add(candidate.from, candidate.to, candidate.troops);
                }
                working.set(candidate.from, 1);
            }
        }
        movements
    }
}
