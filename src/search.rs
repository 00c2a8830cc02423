// Random restart search for balanced teams.
// Every iteration shuffles the role pools, deals players into the teams in a fixed order and scores the result.
// There is no local refinement, a candidate is either a new best (or tie) and gets reported, or it is dropped.

use crate::fitness::{total_score, Score, INCOMPLETE};
use crate::player::{RcPlayer, Role};
use crate::pool::RolePools;
use crate::team::Team;
use fnv::FnvHashSet;
use indicatif::ProgressBar;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::{debug, info};

/// Order in which each team draws from the pools.
const FILL_ORDER: [Role; 6] = [Role::Mid, Role::Mid, Role::Out, Role::Out, Role::Dia, Role::Set];

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("cannot start search workers: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

#[derive(Debug, Clone)]
pub struct SearchSettings {
    /// Independent workers racing for the best score
    pub workers: usize,
    /// Worker `i` is seeded with `seed + i`
    pub seed: u64,
    /// Iterations per worker, None runs until stopped
    pub max_iterations: Option<u64>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        SearchSettings {
            workers: num_cpus::get(),
            seed: rand::random(),
            max_iterations: None,
        }
    }
}

/// One candidate: the teams of a single iteration and their total score.
#[derive(Debug, Clone)]
pub struct Partition {
    pub teams: Vec<Team>,
    pub score: Score,
}

impl Partition {
    /// True if no player sits in two slots.
    pub fn has_distinct_players(&self) -> bool {
        let mut seen = FnvHashSet::default();
        self.teams
            .iter()
            .flat_map(Team::players)
            .all(|p| seen.insert(Arc::as_ptr(p)))
    }
}

pub trait Reporter {
    fn report(&mut self, partition: &Partition);
}

// draw cursors into the shuffled pools, one per role
struct Draw<'a> {
    middles: std::slice::Iter<'a, RcPlayer>,
    setters: std::slice::Iter<'a, RcPlayer>,
    outs: std::slice::Iter<'a, RcPlayer>,
    dias: std::slice::Iter<'a, RcPlayer>,
}

impl<'a> Draw<'a> {
    fn next(&mut self, role: Role) -> Option<&'a RcPlayer> {
        match role {
            Role::Mid => self.middles.next(),
            Role::Set => self.setters.next(),
            Role::Out => self.outs.next(),
            Role::Dia => self.dias.next(),
        }
    }
}

/// Owns a private copy of the pools and its own random source.
pub struct Worker {
    pools: RolePools,
    teams_count: usize,
    rng: ChaCha8Rng,
}

impl Worker {
    pub fn new(pools: &RolePools, teams_count: usize, seed: u64) -> Worker {
        Worker {
            pools: pools.clone(),
            teams_count,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn build_candidate(&mut self) -> Partition {
        self.pools.middles.shuffle(&mut self.rng);
        self.pools.outs.shuffle(&mut self.rng);
        self.pools.dias.shuffle(&mut self.rng);
        self.pools.setters.shuffle(&mut self.rng);

        let mut draw = Draw {
            middles: self.pools.middles.iter(),
            setters: self.pools.setters.iter(),
            outs: self.pools.outs.iter(),
            dias: self.pools.dias.iter(),
        };
        let mut teams = vec![Team::new(); self.teams_count];
        // a failed placement leaves this team and every later one incomplete
        'teams: for team in teams.iter_mut() {
            for role in FILL_ORDER {
                let placed = match draw.next(role) {
                    Some(player) => team.try_place(player),
                    None => false,
                };
                if !placed {
                    break 'teams;
                }
            }
        }

        let score = total_score(&teams);
        Partition { teams, score }
    }
}

// best score plus whoever gets told about it, updated together under one lock
struct Best<'r, R> {
    score: Score,
    reporter: &'r mut R,
}

pub struct Search<'p> {
    pools: &'p RolePools,
    teams_count: usize,
    settings: SearchSettings,
    best: AtomicI64,
    stop: Arc<AtomicBool>,
}

impl<'p> Search<'p> {
    pub fn new(pools: &'p RolePools, teams_count: usize, settings: SearchSettings) -> Search<'p> {
        Search {
            pools,
            teams_count,
            settings,
            best: AtomicI64::new(INCOMPLETE),
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag that ends the search once any worker sees it set.
    #[cfg(test)]
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    pub fn best_score(&self) -> Score {
        self.best.load(Ordering::Acquire)
    }

    /// Run all workers until the stop flag is raised or every worker used up its iterations.
    /// Returns the best score seen.
    pub fn run<R: Reporter + Send>(&self, reporter: &mut R, progress: &ProgressBar) -> Result<Score, SearchError> {
        let workers = self.settings.workers.max(1);
        info!("Starting search with {} workers, seed {}", workers, self.settings.seed);

        let thread_pool = rayon::ThreadPoolBuilder::new().num_threads(workers).build()?;
        let shared = Mutex::new(Best {
            score: INCOMPLETE,
            reporter,
        });
        thread_pool.install(|| {
            (0..workers)
                .into_par_iter()
                .for_each(|index| self.run_worker(index, &shared, progress));
        });

        let best = self.best_score();
        debug!("Search finished with best score {}", best);
        Ok(best)
    }

    fn run_worker<R: Reporter + Send>(&self, index: usize, shared: &Mutex<Best<'_, R>>, progress: &ProgressBar) {
        let seed = self.settings.seed.wrapping_add(index as u64);
        let mut worker = Worker::new(self.pools, self.teams_count, seed);
        let mut done: u64 = 0;

        while !self.stop.load(Ordering::Relaxed) {
            if self.settings.max_iterations.map_or(false, |max| done >= max) {
                break;
            }
            let candidate = worker.build_candidate();
            debug_assert!(candidate.has_distinct_players());
            done += 1;
            progress.inc(1);

            // cheap reject before taking the lock
            if candidate.score > self.best.load(Ordering::Acquire) {
                continue;
            }
            let mut best = match shared.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            // ties are reported too
            if candidate.score <= best.score {
                best.score = candidate.score;
                self.best.store(candidate.score, Ordering::Release);
                best.reporter.report(&candidate);
                progress.set_message(format!("best score {}", candidate.score));
            }
        }
    }
}
