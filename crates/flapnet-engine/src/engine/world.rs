use std::collections::VecDeque;

use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::{
    SimulationConfig,
    core::{Obstacle, Rect},
};

use super::{Actor, Controller, Sensors};

/// A headless game world stepped at a fixed timestep.
///
/// The world owns its actors, its obstacles and its own random generator, so
/// two worlds built from the same seed spawn identical obstacle layouts and
/// diverge only through the actors' decisions.
///
/// # Step Order
///
/// 1. Living actors fall, policy actors decide, pending jumps are applied
/// 2. Actors outside the play field die; the world ends here if none is left
/// 3. Obstacles move left, spawn at the right edge and retire at the left edge
///    (every retirement scores a pass and speeds up the game)
/// 4. Actors overlapping an obstacle die
///
/// # Example
///
/// ```
/// use flapnet_engine::{Controller, SimulationConfig, World};
///
/// let mut world = World::new(SimulationConfig::default(), 42, [Controller::Manual]);
/// while !world.is_terminated() {
///     world.step();
/// }
/// assert!(!world.actors()[0].is_alive());
/// ```
#[derive(Debug, Clone)]
pub struct World {
    config: SimulationConfig,
    rng: Pcg32,
    actors: Vec<Actor>,
    obstacles: VecDeque<Obstacle>,
    score: usize,
    game_speed: f64,
    gap_height: f64,
    steps: u64,
    terminated: bool,
}

impl World {
    /// Creates a world with one actor per controller, all at the start height.
    pub fn new<I>(config: SimulationConfig, seed: u64, controllers: I) -> Self
    where
        I: IntoIterator<Item = Controller>,
    {
        let start_y = config.actor_start_y();
        let actors = controllers
            .into_iter()
            .map(|c| Actor::new(c, start_y))
            .collect::<Vec<_>>();
        let terminated = actors.is_empty();
        Self {
            rng: Pcg32::seed_from_u64(seed),
            actors,
            obstacles: VecDeque::new(),
            score: 0,
            game_speed: config.initial_speed,
            gap_height: config.initial_gap_height,
            steps: 0,
            terminated,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    #[must_use]
    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    #[must_use]
    pub fn actor_mut(&mut self, index: usize) -> Option<&mut Actor> {
        self.actors.get_mut(index)
    }

    /// Obstacles ordered left to right (which is also spawn order).
    pub fn obstacles(&self) -> impl Iterator<Item = &Obstacle> + '_ {
        self.obstacles.iter()
    }

    /// Number of obstacles that have left the screen.
    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn game_speed(&self) -> f64 {
        self.game_speed
    }

    #[must_use]
    pub fn gap_height(&self) -> f64 {
        self.gap_height
    }

    /// Number of steps taken since creation or the last reset.
    #[must_use]
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Returns `true` once every actor is dead.
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Bounding box of an actor at height `y`.
    #[must_use]
    pub fn actor_rect(&self, y: f64) -> Rect {
        actor_rect(&self.config, y)
    }

    /// Returns the first obstacle the actors have not yet fully passed and the
    /// horizontal distance from the actors' left edge to it.
    #[must_use]
    pub fn nearest_obstacle(&self) -> Option<(&Obstacle, f64)> {
        nearest_obstacle(&self.config, &self.obstacles)
    }

    /// Returns what `actor` currently perceives.
    #[must_use]
    pub fn sensors(&self, actor: &Actor) -> Sensors {
        sense(
            &self.config,
            &self.obstacles,
            self.game_speed,
            self.gap_height,
            actor,
        )
    }

    /// Pass count plus a bonus that grows as the nearest obstacle gets closer.
    ///
    /// The bonus is `1 / (|distance| + epsilon)` and breaks ties between
    /// candidates that passed the same number of obstacles.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn fitness(&self) -> f64 {
        let distance = self.nearest_obstacle().map_or(0.0, |(_, d)| d);
        self.score as f64 + 1.0 / (distance.abs() + self.config.proximity_epsilon)
    }

    /// Restores the initial state: every actor alive at the start height, no
    /// obstacles, zero score and initial drift parameters.
    ///
    /// Controllers, godmode flags and the random generator are kept.
    pub fn reset(&mut self) {
        let start_y = self.config.actor_start_y();
        for actor in &mut self.actors {
            actor.reset(start_y);
        }
        self.obstacles.clear();
        self.score = 0;
        self.game_speed = self.config.initial_speed;
        self.gap_height = self.config.initial_gap_height;
        self.steps = 0;
        self.terminated = self.actors.is_empty();
    }

    /// Advances the world by one step. Does nothing once terminated.
    pub fn step(&mut self) {
        if self.terminated {
            return;
        }
        self.steps += 1;

        let Self {
            config,
            actors,
            obstacles,
            game_speed,
            gap_height,
            ..
        } = self;
        for actor in actors.iter_mut() {
            actor.update(config.gravity, config.godmode_floor, |a| {
                sense(config, obstacles, *game_speed, *gap_height, a)
            });
            actor.take_jump(config.jump_threshold, config.jump_velocity);
            if actor.is_alive() && (actor.y() < 0.0 || actor.y() > config.screen_height) {
                actor.kill();
            }
        }
        if self.all_dead() {
            self.terminated = true;
            return;
        }

        self.advance_obstacles();
        self.collide();
        self.terminated = self.all_dead();
    }

    fn all_dead(&self) -> bool {
        self.actors.iter().all(|a| !a.is_alive())
    }

    fn advance_obstacles(&mut self) {
        for obstacle in &mut self.obstacles {
            obstacle.advance(self.game_speed);
        }

        let spawn_line = self.config.screen_width - self.config.obstacle_spacing;
        if self.obstacles.back().is_none_or(|o| o.x() < spawn_line) {
            let free_height =
                self.config.screen_height - 2.0 * self.config.actor_size - self.gap_height;
            let gap_top = self.rng.random::<f64>() * free_height + self.config.actor_size;
            self.obstacles
                .push_back(Obstacle::new(self.config.screen_width, gap_top));
        }

        while self
            .obstacles
            .front()
            .is_some_and(|o| o.x() < -self.config.obstacle_width)
        {
            self.obstacles.pop_front();
            self.score += 1;
            if self.game_speed < self.config.max_speed {
                self.game_speed += self.config.speed_step;
            }
            if self.gap_height > self.config.min_gap_height {
                self.gap_height -= self.config.gap_height_step;
            }
            for actor in &mut self.actors {
                actor.award_pass();
            }
        }
    }

    fn collide(&mut self) {
        for obstacle in &self.obstacles {
            let solids = obstacle.solids(
                self.config.obstacle_width,
                self.gap_height,
                self.config.screen_height,
            );
            for actor in &mut self.actors {
                if !actor.is_alive() {
                    continue;
                }
                let rect = actor_rect(&self.config, actor.y());
                if solids.iter().any(|s| s.overlaps(&rect)) {
                    actor.kill();
                }
            }
        }
    }
}

fn actor_rect(config: &SimulationConfig, y: f64) -> Rect {
    let left = config.actor_left();
    Rect::new(left, left + config.actor_size, y, y + config.actor_size)
}

fn nearest_obstacle<'a>(
    config: &SimulationConfig,
    obstacles: &'a VecDeque<Obstacle>,
) -> Option<(&'a Obstacle, f64)> {
    let left = config.actor_left();
    obstacles
        .iter()
        .find(|o| o.x() + config.obstacle_width >= left)
        .map(|o| (o, o.x() - left))
}

fn sense(
    config: &SimulationConfig,
    obstacles: &VecDeque<Obstacle>,
    game_speed: f64,
    gap_height: f64,
    actor: &Actor,
) -> Sensors {
    let (obstacle_distance, gap_top, gap_bottom) = nearest_obstacle(config, obstacles)
        .map_or((0.0, 0.0, 0.0), |(o, d)| {
            (d, o.gap_top(), o.gap_bottom(gap_height))
        });
    Sensors {
        game_speed,
        actor_y: actor.y(),
        actor_velocity: actor.velocity(),
        obstacle_distance,
        gap_top,
        gap_bottom,
    }
}
