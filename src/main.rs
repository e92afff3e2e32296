//! Penguin Slice headless runner
//!
//! Plays a full session against the ballistic reference world with a simple
//! autopilot doing the swiping, then prints the final snapshot as JSON.

use clap::Parser;
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use penguin_slice::consts::*;
use penguin_slice::platform::HeadlessWorld;
use penguin_slice::renderer::slice_trail;
use penguin_slice::sim::{EnemyKind, GameEvent, GameSession};
use penguin_slice::{SilentAudio, Tuning};

#[derive(Parser, Debug)]
#[command(name = "penguin-slice", about = "Run a headless Penguin Slice session")]
struct Args {
    /// Session seed (enemy sequence and launches)
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Stop after this many seconds of game time
    #[arg(long, default_value_t = 120.0)]
    seconds: f32,
    /// Chance the autopilot fumbles a penguin (0.0 - 1.0)
    #[arg(long, default_value_t = 0.15)]
    fumble: f64,
    /// Tuning JSON file
    #[arg(long)]
    tuning: Option<std::path::PathBuf>,
    /// Print the default tuning as JSON and exit
    #[arg(long)]
    dump_tuning: bool,
}

/// Swipes through penguins near the top of their arc and leaves bombs alone
struct Autopilot {
    rng: Pcg32,
    fumble: f64,
    /// Penguins already decided on (sliced or let go)
    decided: Vec<u32>,
}

impl Autopilot {
    fn new(seed: u64, fumble: f64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed.wrapping_add(1)),
            fumble: fumble.clamp(0.0, 1.0),
            decided: Vec::new(),
        }
    }

    /// Pick a penguin to swipe this frame
    fn target(&mut self, world: &HeadlessWorld) -> Option<Vec2> {
        let bombs: Vec<Vec2> = world
            .bodies()
            .filter(|(_, b)| b.kind == EnemyKind::Bomb && b.is_target())
            .map(|(_, b)| b.pos)
            .collect();

        let candidate = world.bodies().find(|(id, b)| {
            b.kind == EnemyKind::Penguin
                && b.is_target()
                && b.vel.y <= 0.0
                && b.pos.y > SCENE_HEIGHT * 0.3
                && !self.decided.contains(id)
        });
        let (id, body) = candidate?;
        self.decided.push(id);

        if self.rng.random_bool(self.fumble) {
            log::debug!("autopilot fumbles penguin {}", id);
            return None;
        }
        // Never swipe where a bomb overlaps the cut
        if bombs.iter().any(|b| b.distance(body.pos) < ENEMY_RADIUS * 2.5) {
            log::debug!("autopilot skips penguin {} next to a bomb", id);
            return None;
        }
        Some(body.pos)
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if args.dump_tuning {
        println!("{}", Tuning::default().to_json());
        return;
    }

    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path),
        None => Tuning::default(),
    };

    log::info!("Penguin Slice (headless) starting, seed {}", args.seed);
    let mut session = GameSession::new(args.seed, tuning, HeadlessWorld::new(), SilentAudio::new());
    let mut pilot = Autopilot::new(args.seed, args.fumble);
    session.start();

    let frames = (args.seconds / FRAME_DT).ceil() as u64;
    for _ in 0..frames {
        session.advance(FRAME_DT);
        session.world_mut().step(FRAME_DT);

        if let Some(at) = pilot.target(session.world()) {
            session.touch_began(at + Vec2::new(-48.0, 24.0));
            session.touch_moved(at + Vec2::new(-16.0, 8.0));
            session.touch_moved(at);
            session.touch_moved(at + Vec2::new(16.0, -8.0));
            session.touch_ended();
        }

        // Mesh the host would upload for the blade trail
        let trail = &session.world().slice;
        if trail.alpha > 0.0 {
            let verts = slice_trail(&trail.points, trail.alpha);
            if !verts.is_empty() {
                let bytes: &[u8] = bytemuck::cast_slice(&verts);
                log::trace!("slice trail: {} vertices, {} bytes", verts.len(), bytes.len());
            }
        }

        for event in session.drain_events() {
            match event {
                GameEvent::BatchIssued { index, step } => log::info!("batch {} {:?}", index, step),
                GameEvent::LifeLost { lives } => log::info!("missed a penguin, {} lives left", lives),
                GameEvent::Ended { cause, score } => {
                    log::info!("{} ({:?}, score {})", cause.message(), cause, score)
                }
                other => log::debug!("{:?}", other),
            }
        }

        if session.is_ended() {
            break;
        }
    }

    let snapshot = session.snapshot();
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}
