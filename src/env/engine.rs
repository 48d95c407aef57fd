use rand::{rngs::StdRng, Rng, SeedableRng};

use super::{
    action::Direction,
    config::EnvConfig,
    error::EnvError,
    observation::Observation,
    state::{Actor, CollisionKind, EnvState, Phase, Position},
};

/// Reward for a fatal step (wall exit or self-collision). Fixed, not part of
/// the configurable shaping.
const TERMINAL_REWARD: f32 = -1.0;

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the actor consumed the prize this step
    pub consumed_prize: bool,
    /// What the actor ran into, if the step was fatal
    pub collision: Option<CollisionKind>,
}

/// Result of a simulator step
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    /// Post-step grid snapshot; `None` when the step terminated the episode
    pub observation: Option<Observation>,
    /// Reward for this step
    pub reward: f32,
    /// Whether the episode has terminated
    pub done: bool,
    /// Additional detail about the step
    pub info: StepInfo,
}

/// The grid-world simulator
///
/// Owns a rectangular grid, a single actor (head-first cell sequence) and a
/// single prize cell. Each instance owns its state exclusively; all
/// operations are synchronous in-memory computations. Prize placement uses
/// rejection sampling over an explicit seeded RNG so runs are reproducible.
pub struct GridWorld {
    config: EnvConfig,
    state: EnvState,
    rng: StdRng,
    // Construction-time snapshot, restored by reset()
    initial_body: Vec<Position>,
    initial_prize: Position,
    initial_rng: StdRng,
}

impl GridWorld {
    /// Build a simulator with the actor at `initial_body` and the prize at a
    /// random cell avoiding the body
    ///
    /// Fails with `InvalidConfiguration` on non-positive grid dimensions, an
    /// empty body, duplicate body cells, out-of-bounds body cells, or a body
    /// that leaves no free cell for the prize.
    pub fn new(
        config: EnvConfig,
        initial_body: Vec<Position>,
        rng_seed: u64,
    ) -> Result<Self, EnvError> {
        config.validate()?;
        validate_body(&config, &initial_body)?;

        let mut rng = StdRng::seed_from_u64(rng_seed);
        let actor = Actor::from_body(initial_body.clone());
        let prize = place_prize(&mut rng, &config, &actor).ok_or_else(|| {
            EnvError::InvalidConfiguration(
                "initial body leaves no free cell for the prize".to_string(),
            )
        })?;

        let initial_rng = rng.clone();
        let state = EnvState::new(actor, prize, config.width, config.height);

        Ok(Self {
            config,
            state,
            rng,
            initial_body,
            initial_prize: prize,
            initial_rng,
        })
    }

    /// Snapshot the current grid. No side effects.
    pub fn observe(&self) -> Observation {
        Observation::from_state(&self.state)
    }

    /// Current simulator state
    pub fn state(&self) -> &EnvState {
        &self.state
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    /// Step with a discrete action index (0 = Up, 1 = Down, 2 = Left,
    /// 3 = Right); anything else fails with `InvalidAction`
    pub fn step_index(&mut self, idx: usize) -> Result<StepOutcome, EnvError> {
        let action = Direction::from_index(idx)?;
        self.step(action)
    }

    /// Advance the simulation by one action
    ///
    /// The head moves one cell in the chosen direction. Consuming the prize
    /// grows the body by one cell and relocates the prize; otherwise the body
    /// shifts forward. Leaving the grid or landing on another body cell
    /// terminates the episode with reward -1 and no observation.
    ///
    /// Fails with `InvalidState` when called after termination without an
    /// intervening `reset`.
    pub fn step(&mut self, action: Direction) -> Result<StepOutcome, EnvError> {
        if !self.state.is_running() {
            return Err(EnvError::InvalidState);
        }

        let new_head = self.state.actor.head().moved_in_direction(action);
        let consumed = new_head == self.state.prize;

        self.state.actor.advance(new_head, consumed);
        self.state.actor.orientation = Some(action);
        self.state.steps += 1;

        if consumed {
            self.state.score += 1;

            match place_prize(&mut self.rng, &self.config, &self.state.actor) {
                Some(pos) => self.state.prize = pos,
                None => {
                    // The grown body covers every cell; nothing left to chase.
                    self.state.phase = Phase::Terminated;
                    return Ok(StepOutcome {
                        observation: None,
                        reward: self.config.prize_reward,
                        done: true,
                        info: StepInfo {
                            consumed_prize: true,
                            collision: None,
                        },
                    });
                }
            }
        }

        // Terminal checks, wall first. The prize never overlaps the body and
        // always lies in bounds, so a consuming step cannot also be fatal.
        if !self.state.in_bounds(new_head) {
            return Ok(self.terminate(CollisionKind::Wall));
        }

        if self.state.actor.trailing_segments().contains(&new_head) {
            return Ok(self.terminate(CollisionKind::SelfCollision));
        }

        let reward = if consumed {
            self.config.prize_reward
        } else {
            self.config.step_reward
        };

        Ok(StepOutcome {
            observation: Some(self.observe()),
            reward,
            done: false,
            info: StepInfo {
                consumed_prize: consumed,
                collision: None,
            },
        })
    }

    /// Restore the construction-time body, prize and RNG state
    ///
    /// After a reset, `observe` returns the same grid the simulator started
    /// with, and a repeated action sequence replays identically.
    pub fn reset(&mut self) -> Observation {
        self.rng = self.initial_rng.clone();
        self.state = EnvState::new(
            Actor::from_body(self.initial_body.clone()),
            self.initial_prize,
            self.config.width,
            self.config.height,
        );

        self.observe()
    }

    fn terminate(&mut self, collision: CollisionKind) -> StepOutcome {
        self.state.phase = Phase::Terminated;

        StepOutcome {
            observation: None,
            reward: TERMINAL_REWARD,
            done: true,
            info: StepInfo {
                consumed_prize: false,
                collision: Some(collision),
            },
        }
    }
}

fn validate_body(config: &EnvConfig, body: &[Position]) -> Result<(), EnvError> {
    if body.is_empty() {
        return Err(EnvError::InvalidConfiguration(
            "initial body must contain at least one cell".to_string(),
        ));
    }

    for (i, &pos) in body.iter().enumerate() {
        let in_bounds = pos.x >= 0
            && pos.x < config.width as i32
            && pos.y >= 0
            && pos.y < config.height as i32;

        if !in_bounds {
            return Err(EnvError::InvalidConfiguration(format!(
                "initial body cell ({}, {}) is out of bounds",
                pos.x, pos.y
            )));
        }

        if body[..i].contains(&pos) {
            return Err(EnvError::InvalidConfiguration(format!(
                "initial body repeats cell ({}, {})",
                pos.x, pos.y
            )));
        }
    }

    Ok(())
}

/// Pick a uniformly random cell not occupied by the actor
///
/// Rejection sampling; the grid is finite and typically sparse. Returns
/// `None` when the body covers every cell.
fn place_prize(rng: &mut StdRng, config: &EnvConfig, actor: &Actor) -> Option<Position> {
    if actor.len() >= config.width * config.height {
        return None;
    }

    loop {
        let x = rng.gen_range(0..config.width) as i32;
        let y = rng.gen_range(0..config.height) as i32;
        let pos = Position::new(x, y);

        if !actor.occupies(pos) {
            return Some(pos);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::observation::{ACTOR_MARKER, PRIZE_MARKER};

    fn single_cell_world(width: usize, height: usize, head: Position, seed: u64) -> GridWorld {
        GridWorld::new(EnvConfig::new(width, height), vec![head], seed).unwrap()
    }

    #[test]
    fn test_construction_places_prize_off_body() {
        let world = GridWorld::new(
            EnvConfig::small(),
            vec![Position::new(5, 5), Position::new(4, 5), Position::new(3, 5)],
            42,
        )
        .unwrap();

        let state = world.state();
        assert!(!state.actor.occupies(state.prize));
        assert!(state.in_bounds(state.prize));
        assert_eq!(state.actor.orientation, None);
        assert!(state.is_running());
    }

    #[test]
    fn test_construction_is_deterministic_per_seed() {
        let body = vec![Position::new(2, 2)];
        let a = GridWorld::new(EnvConfig::small(), body.clone(), 7).unwrap();
        let b = GridWorld::new(EnvConfig::small(), body, 7).unwrap();

        assert_eq!(a.state().prize, b.state().prize);
        assert_eq!(a.observe(), b.observe());
    }

    #[test]
    fn test_invalid_configurations_are_rejected() {
        let body = vec![Position::new(0, 0)];

        assert!(matches!(
            GridWorld::new(EnvConfig::new(0, 5), body.clone(), 0),
            Err(EnvError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            GridWorld::new(EnvConfig::small(), vec![], 0),
            Err(EnvError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            GridWorld::new(
                EnvConfig::small(),
                vec![Position::new(1, 1), Position::new(1, 1)],
                0
            ),
            Err(EnvError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            GridWorld::new(EnvConfig::small(), vec![Position::new(10, 3)], 0),
            Err(EnvError::InvalidConfiguration(_))
        ));
        // Body fills the whole grid: nowhere to put the prize
        assert!(matches!(
            GridWorld::new(EnvConfig::new(1, 1), vec![Position::new(0, 0)], 0),
            Err(EnvError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_safe_step_conserves_length() {
        let mut world = single_cell_world(5, 5, Position::new(2, 2), 3);
        // Keep the prize out of the way
        world.state.prize = Position::new(4, 4);

        let outcome = world.step(Direction::Up).unwrap();

        assert!(!outcome.done);
        assert_eq!(outcome.reward, 0.0);
        assert!(!outcome.info.consumed_prize);
        assert_eq!(world.state().actor.body, vec![Position::new(2, 1)]);
        assert_eq!(world.state().actor.orientation, Some(Direction::Up));
        assert_eq!(world.state().steps, 1);
        assert!(outcome.observation.is_some());
    }

    #[test]
    fn test_prize_consumption_grows_body_and_relocates_prize() {
        // 5x5 grid, body [(2,2)], prize forced to (2,1), action Up
        let mut world = single_cell_world(5, 5, Position::new(2, 2), 11);
        world.state.prize = Position::new(2, 1);

        let outcome = world.step(Direction::Up).unwrap();

        assert!(!outcome.done);
        assert_eq!(outcome.reward, 1.0);
        assert!(outcome.info.consumed_prize);
        assert_eq!(
            world.state().actor.body,
            vec![Position::new(2, 1), Position::new(2, 2)]
        );
        assert_eq!(world.state().score, 1);

        // Relocated prize never lands on the body
        let prize = world.state().prize;
        assert_ne!(prize, Position::new(2, 1));
        assert!(!world.state().actor.occupies(prize));

        let obs = outcome.observation.unwrap();
        assert_eq!(obs.value_at(prize.x as usize, prize.y as usize), PRIZE_MARKER);
    }

    #[test]
    fn test_wall_exit_terminates() {
        // 3x3 grid, body [(0,0)], Left moves to x = -1
        let mut world = single_cell_world(3, 3, Position::new(0, 0), 5);

        let outcome = world.step(Direction::Left).unwrap();

        assert!(outcome.done);
        assert_eq!(outcome.reward, -1.0);
        assert!(outcome.observation.is_none());
        assert_eq!(outcome.info.collision, Some(CollisionKind::Wall));
        assert!(!world.state().is_running());
    }

    #[test]
    fn test_wall_exit_on_every_edge() {
        for (head, action) in [
            (Position::new(0, 1), Direction::Left),
            (Position::new(2, 1), Direction::Right),
            (Position::new(1, 0), Direction::Up),
            (Position::new(1, 2), Direction::Down),
        ] {
            let mut world = single_cell_world(3, 3, head, 9);
            let outcome = world.step(action).unwrap();

            assert!(outcome.done);
            assert_eq!(outcome.reward, -1.0);
            assert!(outcome.observation.is_none());
        }
    }

    #[test]
    fn test_self_collision_terminates() {
        // Body [(1,1),(2,1),(2,2)]; Right moves the head onto (2,1)
        let body = vec![Position::new(1, 1), Position::new(2, 1), Position::new(2, 2)];
        let mut world = GridWorld::new(EnvConfig::new(5, 5), body, 13).unwrap();

        let outcome = world.step(Direction::Right).unwrap();

        assert!(outcome.done);
        assert_eq!(outcome.reward, -1.0);
        assert!(outcome.observation.is_none());
        assert_eq!(outcome.info.collision, Some(CollisionKind::SelfCollision));
    }

    #[test]
    fn test_observe_after_wall_exit() {
        // 3x3 grid, body [(0,0)], Left commits the head to x = -1; observe()
        // has no precondition and must still return a well-formed grid
        let mut world = single_cell_world(3, 3, Position::new(0, 0), 5);
        let outcome = world.step(Direction::Left).unwrap();
        assert!(outcome.done);

        let obs = world.observe();

        // The only body cell sits outside the grid, so nothing is marked
        let actor_cells = obs
            .as_slice()
            .iter()
            .filter(|&&v| v == ACTOR_MARKER)
            .count();
        assert_eq!(actor_cells, 0);

        let prize = world.state().prize;
        assert_eq!(obs.value_at(prize.x as usize, prize.y as usize), PRIZE_MARKER);
    }

    #[test]
    fn test_observe_after_self_collision() {
        let body = vec![Position::new(1, 1), Position::new(2, 1), Position::new(2, 2)];
        let mut world = GridWorld::new(EnvConfig::new(5, 5), body, 13).unwrap();
        let outcome = world.step(Direction::Right).unwrap();
        assert!(outcome.done);

        let obs = world.observe();

        // Post-collision body is [(2,1),(1,1),(2,1)]: two distinct cells
        let actor_cells = obs
            .as_slice()
            .iter()
            .filter(|&&v| v == ACTOR_MARKER)
            .count();
        assert_eq!(actor_cells, 2);
        assert_eq!(obs.value_at(2, 1), ACTOR_MARKER);
        assert_eq!(obs.value_at(1, 1), ACTOR_MARKER);
    }

    #[test]
    fn test_moving_onto_vacated_tail_is_safe() {
        // Length 2: the tail cell is vacated the same step the head arrives
        let body = vec![Position::new(1, 1), Position::new(2, 1)];
        let mut world = GridWorld::new(EnvConfig::new(5, 5), body, 17).unwrap();
        world.state.prize = Position::new(4, 4);

        let outcome = world.step(Direction::Right).unwrap();

        assert!(!outcome.done);
        assert_eq!(
            world.state().actor.body,
            vec![Position::new(2, 1), Position::new(1, 1)]
        );
    }

    #[test]
    fn test_step_after_termination_is_rejected() {
        let mut world = single_cell_world(3, 3, Position::new(0, 0), 5);
        world.step(Direction::Left).unwrap();

        assert!(matches!(world.step(Direction::Up), Err(EnvError::InvalidState)));
        assert!(matches!(world.step_index(0), Err(EnvError::InvalidState)));
    }

    #[test]
    fn test_step_index_decoding() {
        let mut world = single_cell_world(5, 5, Position::new(2, 2), 23);
        world.state.prize = Position::new(4, 4);

        assert!(matches!(world.step_index(7), Err(EnvError::InvalidAction(7))));

        let outcome = world.step_index(3).unwrap();
        assert!(!outcome.done);
        assert_eq!(world.state().actor.head(), Position::new(3, 2));
    }

    #[test]
    fn test_reset_restores_initial_grid() {
        let mut world = single_cell_world(4, 4, Position::new(1, 1), 29);
        let initial_obs = world.observe();
        let initial_prize = world.state().prize;

        // Walk left until the wall kills the episode
        loop {
            match world.step(Direction::Left) {
                Ok(outcome) if outcome.done => break,
                Ok(_) => {}
                Err(e) => panic!("unexpected error: {e}"),
            }
        }

        let obs = world.reset();

        assert_eq!(obs, initial_obs);
        assert_eq!(world.observe(), initial_obs);
        assert_eq!(world.state().prize, initial_prize);
        assert_eq!(world.state().score, 0);
        assert_eq!(world.state().steps, 0);
        assert_eq!(world.state().actor.orientation, None);
        assert!(world.state().is_running());
    }

    #[test]
    fn test_reset_replays_identically() {
        let mut world = single_cell_world(5, 5, Position::new(0, 0), 31);
        let path = [
            Direction::Right,
            Direction::Right,
            Direction::Down,
            Direction::Left,
            Direction::Down,
            Direction::Right,
        ];

        let first: Vec<_> = path.iter().map(|&a| world.step(a).unwrap()).collect();
        world.reset();
        let second: Vec<_> = path.iter().map(|&a| world.step(a).unwrap()).collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_prize_invariant_holds_over_random_walk() {
        let mut world = GridWorld::new(
            EnvConfig::small(),
            vec![Position::new(5, 5), Position::new(4, 5), Position::new(3, 5)],
            37,
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(99);

        for _ in 0..500 {
            let before_len = world.state().actor.len();
            let outcome = world.step_index(rng.gen_range(0..4)).unwrap();

            if outcome.done {
                world.reset();
                continue;
            }

            // Length conserved unless the prize was consumed
            let expected = if outcome.info.consumed_prize {
                before_len + 1
            } else {
                before_len
            };
            assert_eq!(world.state().actor.len(), expected);

            // Prize never overlaps the body
            let state = world.state();
            assert!(!state.actor.occupies(state.prize));
            assert!(state.in_bounds(state.prize));
        }
    }

    #[test]
    fn test_filling_the_grid_ends_the_episode() {
        // 2x1 grid: one body cell, the prize forced into the only free cell
        let mut world = single_cell_world(2, 1, Position::new(0, 0), 41);
        assert_eq!(world.state().prize, Position::new(1, 0));

        let outcome = world.step(Direction::Right).unwrap();

        assert!(outcome.done);
        assert!(outcome.info.consumed_prize);
        assert_eq!(outcome.reward, 1.0);
        assert!(outcome.observation.is_none());
        assert_eq!(world.state().actor.len(), 2);
    }
}
