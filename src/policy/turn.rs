//! Turn policy: the per-pawn state machine and city production.
//!
//! Worker states are evaluated in strict priority order: scripted scouting
//! override (lead pawn only), expand, gather, deliver. Every transition
//! that resolves to movement goes through the move broker; a pawn whose
//! every fallback is rejected simply takes no action this turn, which is a
//! logged non-event, never an error.

use tracing::debug;

use crate::action::{Action, Annotation, TurnOutput};
use crate::board::{Board, Direction, Pawn, Position, ResourceKind, Snapshot};
use crate::error::SnapshotError;
use crate::policy::broker::MoveBroker;
use crate::policy::clock::is_night;
use crate::policy::config::PolicyConfig;
use crate::policy::fuel::{catchment_supply, cities_have_enough_fuel, fuel_levels};
use crate::policy::search::{
    SearchHit, closest_city, closest_empty_tile, closest_resource, distant_resource,
};

/// Cross-turn policy state, owned by the caller.
///
/// This is the only state that survives a turn: the turn counter and the
/// scouting targets of the designated lead pawn. Create a fresh session
/// (or [`Session::reset`] an existing one) at match start; everything else
/// is rebuilt from the snapshot every turn.
#[derive(Debug, Clone)]
pub struct Session {
    config: PolicyConfig,
    turn: u32,
    scout_targets: [Option<Position>; 3],
}

impl Default for Session {
    fn default() -> Self {
        Self::new(PolicyConfig::default())
    }
}

impl Session {
    /// Create a session for a new match.
    #[must_use]
    pub fn new(config: PolicyConfig) -> Self {
        Self {
            config,
            turn: 0,
            scout_targets: [None; 3],
        }
    }

    /// Forget all cross-turn state, keeping the configuration.
    pub fn reset(&mut self) {
        self.turn = 0;
        self.scout_targets = [None; 3];
    }

    /// The turn index the session expects to process next.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// The pending scouting target for `kind`, if any.
    #[must_use]
    pub const fn scout_target(&self, kind: ResourceKind) -> Option<Position> {
        self.scout_targets[kind_index(kind)]
    }

    /// Decide one full turn: one action per acting unit and structure.
    ///
    /// The host's step index is authoritative for all day/night math; the
    /// session counter follows it.
    ///
    /// # Errors
    ///
    /// Returns a [`SnapshotError`] when the snapshot fails structural
    /// validation.
    pub fn play_turn(&mut self, snapshot: &Snapshot) -> Result<TurnOutput, SnapshotError> {
        let board = Board::from_snapshot(snapshot)?;
        let turn = snapshot.step;
        if turn != self.turn {
            debug!(expected = self.turn, step = turn, "turn counter resynced to host step");
        }

        let mut output = TurnOutput::default();
        let mut broker = MoveBroker::new(&board);

        for (index, pawn) in board.own_pawns().enumerate() {
            if !pawn.is_worker() || !pawn.can_act {
                continue;
            }
            self.act_worker(&board, &mut broker, index, pawn, turn, &mut output);
        }
        self.act_cities(&board, &mut output);

        self.turn = turn + 1;
        Ok(output)
    }

    fn act_worker(
        &mut self,
        board: &Board,
        broker: &mut MoveBroker,
        index: usize,
        pawn: &Pawn,
        turn: u32,
        output: &mut TurnOutput,
    ) {
        if index == 0 {
            self.schedule_scouting(board, pawn, turn, output);
            if let Some((kind_idx, target)) = self.active_scout_target() {
                self.scout_move(board, broker, pawn, kind_idx, target, output);
                return;
            }
        }

        if self.should_expand(board, pawn, turn) {
            self.expand(board, broker, pawn, output);
        } else if pawn.cargo_space_left > 0
            && (cities_have_enough_fuel(board, pawn, turn, &self.config) || pawn.cargo_empty())
        {
            match closest_resource(board, pawn, broker) {
                Some(hit) => commit_move(board, broker, pawn, hit, output),
                None => skip(pawn, "no reachable resource tile", output),
            }
        } else if board.has_own_cities() {
            match closest_city(board, pawn, turn, &self.config, broker) {
                Some(hit) => commit_move(board, broker, pawn, hit, output),
                None => skip(pawn, "no city in need of delivery", output),
            }
        } else {
            skip(pawn, "cargo full and no cities to deliver to", output);
        }
    }

    /// The expansion gates, all of which must pass before a cargo-full
    /// worker founds or heads for a new city site.
    fn should_expand(&self, board: &Board, pawn: &Pawn, turn: u32) -> bool {
        pawn.cargo_full()
            && !is_night(turn)
            && board.own_city_tile_count() < self.config.hard_city_limit
            && fuel_levels(board, pawn, &self.config).covered()
            && catchment_supply(board, pawn, turn, &self.config)
                .covers(self.config.supply_cover_factor)
    }

    fn expand(&self, board: &Board, broker: &mut MoveBroker, pawn: &Pawn, output: &mut TurnOutput) {
        if board.can_found_city(pawn) {
            output.actions.push(Action::BuildCity { unit: pawn.id });
            return;
        }
        match closest_empty_tile(board, pawn, &self.config, broker) {
            Some(hit) => commit_move(board, broker, pawn, hit, output),
            None => skip(pawn, "no reachable building site", output),
        }
    }

    /// Run the scheduled scouting missions that trigger this turn.
    fn schedule_scouting(&mut self, board: &Board, pawn: &Pawn, turn: u32, output: &mut TurnOutput) {
        if board.own_pawns().count() < self.config.scout_min_pawns {
            return;
        }
        let research = board.research(board.me());
        for mission in &self.config.scout_missions {
            if mission.at_turn != turn || !research.grants_access(mission.kind) {
                continue;
            }
            let idx = kind_index(mission.kind);
            if mission.refresh_only && self.scout_targets[idx].is_none() {
                continue;
            }
            let radius = (board.width() / mission.radius_divisor.max(1)).unsigned_abs();
            self.scout_targets[idx] = distant_resource(board, pawn, mission.kind, radius);
            if let Some(target) = self.scout_targets[idx] {
                debug!(unit = pawn.id, turn, kind = ?mission.kind, %target, "scouting target set");
                output.annotations.push(Annotation::Mark { pos: target });
            }
        }
    }

    /// The first pending scouting target in kind order, if any.
    fn active_scout_target(&self) -> Option<(usize, Position)> {
        self.scout_targets
            .iter()
            .enumerate()
            .find_map(|(idx, target)| target.map(|pos| (idx, pos)))
    }

    /// One step of a long-range scouting mission: first choice direction,
    /// then the clockwise sidestep, then give up for this turn. The target
    /// is cleared once the pawn moves while within one tile of it.
    fn scout_move(
        &mut self,
        board: &Board,
        broker: &mut MoveBroker,
        pawn: &Pawn,
        kind_idx: usize,
        target: Position,
        output: &mut TurnOutput,
    ) {
        let first = pawn.pos.direction_to(target);
        let step = if broker.try_move(board, pawn, first) {
            Some(first)
        } else {
            let sidestep = first.rotate_cw();
            broker.try_move(board, pawn, sidestep).then_some(sidestep)
        };
        match step {
            Some(direction) => {
                push_move(pawn, direction, output);
                if target.distance_to(pawn.pos) <= 1 {
                    self.scout_targets[kind_idx] = None;
                }
            }
            None => skip(pawn, "scouting step blocked", output),
        }
    }

    /// City production: eligible city tiles build workers while structures
    /// outnumber units and the worker cap (waived after uranium research)
    /// permits, then research until uranium is done.
    fn act_cities(&self, board: &Board, output: &mut TurnOutput) {
        let research = board.research(board.me());
        let mut worker_count = board.own_pawns().filter(|p| p.is_worker()).count();
        let cart_count = board.own_pawns().filter(|p| !p.is_worker()).count();
        let city_tile_count = board.own_city_tile_count();

        for city in board.own_cities() {
            for site in &city.tiles {
                if !site.can_act {
                    continue;
                }
                if city_tile_count > worker_count + cart_count
                    && (worker_count < self.config.hard_unit_limit || research.uranium)
                {
                    output.actions.push(Action::BuildWorker {
                        city_tile: site.pos,
                    });
                    worker_count += 1;
                } else if !research.uranium {
                    output.actions.push(Action::Research {
                        city_tile: site.pos,
                    });
                }
            }
        }
    }
}

/// Commit a broker-validated step and emit the move token.
fn commit_move(
    board: &Board,
    broker: &mut MoveBroker,
    pawn: &Pawn,
    hit: SearchHit,
    output: &mut TurnOutput,
) {
    if broker.try_move(board, pawn, hit.direction) {
        push_move(pawn, hit.direction, output);
    } else {
        skip(pawn, "validated step no longer legal", output);
    }
}

fn push_move(pawn: &Pawn, direction: Direction, output: &mut TurnOutput) {
    if direction != Direction::Center {
        output.annotations.push(Annotation::Line {
            from: pawn.pos,
            to: pawn.pos.translate(direction),
        });
    }
    output.actions.push(Action::Move {
        unit: pawn.id,
        direction,
    });
}

fn skip(pawn: &Pawn, reason: &str, output: &mut TurnOutput) {
    debug!(unit = pawn.id, reason, "pawn takes no action");
    output.skipped_pawns += 1;
}

const fn kind_index(kind: ResourceKind) -> usize {
    match kind {
        ResourceKind::Wood => 0,
        ResourceKind::Coal => 1,
        ResourceKind::Uranium => 2,
    }
}
