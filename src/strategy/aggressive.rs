//! Aggressive strategy.
//!
//! Stacks armies where the enemy presses hardest and then commits attacks in
//! order of a greedy priority, each source emptying itself at most once.

// Priorities are ratios of small troop and border counts.
#![allow(clippy::cast_precision_loss)]

use std::collections::HashMap;
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::map::{TerritoryId, Working};
use crate::moves::{Movements, Placements};
use crate::sorter::{Order, sort_by_weight};
use crate::strategy::{Context, STARTING_PICKS, Strategy, distinct};

/// Soft limit on the attack/transfer search.
pub const DEFAULT_DEADLINE: Duration = Duration::from_millis(1800);

/// Multiplier for reinforcing a front from a territory with no enemies.
const INTERIOR_MULTIPLIER: f64 = 10.0;

/// A move waiting to be committed.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    from: TerritoryId,
    to: TerritoryId,
    priority: f64,
}

/// Goes after the most contested front first.
#[derive(Debug, Clone, Copy)]
pub struct AggressiveBot {
    deadline: Duration,
}

impl AggressiveBot {
    /// Create a bot that stops committing moves after `deadline`.
    #[must_use]
    pub const fn new(deadline: Duration) -> Self {
        Self { deadline }
    }

    /// Owned territories ranked by how many frontier territories touch them.
    ///
    /// Ties keep the order in which territories were first reached.
    fn vulnerability_ranking(ctx: &Context<'_>) -> Vec<TerritoryId> {
        let partition = ctx.map.partition(ctx.player);
        let mut order: Vec<TerritoryId> = Vec::new();
        let mut score: HashMap<TerritoryId, u32> = HashMap::new();

        for id in &partition.frontier {
            let Some(frontier) = ctx.map.territory(*id) else {
                continue;
            };
            for owned in ctx.map.owned_in(frontier.neighbors(), ctx.player) {
                let count = score.entry(owned).or_insert(0);
                if *count == 0 {
                    order.push(owned);
                }
                *count += 1;
            }
        }

        order.sort_by(|a, b| score[b].cmp(&score[a]));
        order
    }

    /// Score every (owned, neighbour) pair as a prospective move.
    fn candidates(
        ctx: &Context<'_>,
        working: &Working,
        started: Instant,
        limit: Duration,
    ) -> Vec<Candidate> {
        let mut candidates = Vec::new();

        for source in ctx.map.owned_by(ctx.player) {
            if started.elapsed() > limit {
                break;
            }
            let source_enemies = ctx.map.enemy_neighbor_count(source.id, ctx.player);

            for &target_id in source.neighbors() {
                let Some(target) = ctx.map.territory(target_id) else {
                    continue;
                };
                let degree = target.degree() as f64;

                let priority = if target.is_owned_by(ctx.player) {
                    let target_enemies =
                        ctx.map.enemy_neighbor_count(target_id, ctx.player) as f64;
                    if source_enemies == 0 {
                        degree * target_enemies * INTERIOR_MULTIPLIER
                    } else {
                        degree * target_enemies / source_enemies as f64
                    }
                } else {
                    let attackers = f64::from(working.troops(source.id).saturating_sub(1));
                    let defenders = f64::from(working.troops(target_id).max(1));
                    degree * attackers / defenders
                };

                if priority > 0.0 {
                    candidates.push(Candidate {
                        from: source.id,
                        to: target_id,
                        priority,
                    });
                }
            }
        }

        candidates
    }
}

impl Default for AggressiveBot {
    fn default() -> Self {
        Self::new(DEFAULT_DEADLINE)
    }
}

impl Strategy for AggressiveBot {
    fn pick_starting(
        &mut self,
        ctx: &Context<'_>,
        candidates: &[TerritoryId],
        _budget: Duration,
    ) -> Vec<TerritoryId> {
        let mut picks = sort_by_weight(&distinct(candidates), ctx.weights, Order::Descending);
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
        let by_weight = sort_by_weight(&owned, ctx.weights, Order::Descending);
        let Some(&heaviest) = by_weight.first() else {
            warn!("no owned territory to place {} armies on", ctx.armies);
            return placements;
        };

        if ctx.turn == 1 {
            placements.add(heaviest, ctx.armies);
            working.add(heaviest, ctx.armies);
            return placements;
        }

        let mut ranked = Self::vulnerability_ranking(ctx);
        if ranked.is_empty() {
            debug!("no contested territory, falling back to weight order");
            ranked = by_weight;
        }
        place_in_pairs(&ranked, ctx.armies, &mut placements, working);
        placements
    }

    fn attack_transfer(
        &mut self,
        ctx: &Context<'_>,
        working: &mut Working,
        budget: Duration,
    ) -> Movements {
        let started = Instant::now();
        let limit = if budget.is_zero() {
            self.deadline
        } else {
            self.deadline.min(budget)
        };

        let mut candidates = Self::candidates(ctx, working, started, limit);
        candidates.sort_by(|a, b| b.priority.total_cmp(&a.priority));

        let mut movements = Movements::new();
        for candidate in &candidates {
            if started.elapsed() > limit {
                debug!(
                    "deadline reached after {} of {} candidates",
                    movements.len(),
                    candidates.len()
                );
                break;
            }
            let troops = working.troops(candidate.from);
            if troops > 1 {
                movements.add(candidate.from, candidate.to, troops - 1);
                working.set(candidate.from, 1);
            }
        }

        movements
    }
}

/// Place `armies` two at a time down `ranked`, the last odd army alone.
///
/// Anything left once the list is exhausted goes to the first entry.
fn place_in_pairs(
    ranked: &[TerritoryId],
    armies: u32,
    placements: &mut Placements,
    working: &mut Working,
) {
    let Some(&first) = ranked.first() else {
        return;
    };
    let mut remaining = armies;
    for &id in ranked {
        if remaining == 0 {
            break;
        }
        let qty = remaining.min(2);
        placements.add(id, qty);
        working.add(id, qty);
        remaining -= qty;
    }
    if remaining > 0 {
        placements.add(first, remaining);
        working.add(first, remaining);
    }
}
