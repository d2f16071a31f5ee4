//! Duel Pong entry point
//!
//! Headless native host: runs one scripted round on a simulated 60 Hz clock,
//! logging render and audio output. Pass a JSON settings file as the first
//! argument to override the defaults.

use std::cell::RefCell;
use std::process::ExitCode;
use std::rc::Rc;
use std::time::Duration;

use duel_pong::audio::LogAudio;
use duel_pong::render::{RenderSink, attach_renderer};
use duel_pong::sim::{BallState, CanvasBounds, GameState, PaddleState, Scheduler, Side};
use duel_pong::{InputBinding, InputEvent, Key, Settings};

/// Host frame interval
const FRAME: Duration = Duration::from_micros(16_667);
/// Give up after this much simulated time
const MAX_FRAMES: u32 = 60 * 60 * 10;

/// Logs score and status changes; positions are too chatty for `info`
#[derive(Default)]
struct ConsoleRenderer;

impl RenderSink for ConsoleRenderer {
    fn canvas(&mut self, canvas: &CanvasBounds) {
        log::info!("Canvas {}x{}", canvas.width, canvas.height);
    }

    fn paddle(&mut self, side: Side, paddle: &PaddleState) {
        log::trace!("{:?} paddle at ({}, {})", side, paddle.x, paddle.y);
    }

    fn ball(&mut self, ball: &BallState) {
        log::trace!("Ball at ({}, {})", ball.cx, ball.cy);
    }

    fn score(&mut self, side: Side, score: u32) {
        log::info!("{:?}: {}", side, score);
    }

    fn status(&mut self, message: &str) {
        if !message.is_empty() {
            log::info!("Status: {}", message);
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Duel Pong (native) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => Settings::default(),
    };

    let state = GameState::new(CanvasBounds::default(), &settings);
    let _renderer = attach_renderer(&state, Rc::new(RefCell::new(ConsoleRenderer)));
    let mut scheduler = Scheduler::new(state);
    let binding = InputBinding::default();
    let mut audio = LogAudio::new();

    binding.handle(&mut scheduler, InputEvent::KeyDown(Key::Space));

    let mut now = Duration::ZERO;
    let mut finished = false;
    for frame in 0..MAX_FRAMES {
        now += FRAME;

        // Player two sweeps the pointer up and down
        let sweep = (frame % 240) as f32 / 240.0;
        let canvas_height = scheduler.state().canvas.with(|c| c.height);
        let pointer_y = canvas_height * (1.0 - (2.0 * sweep - 1.0).abs());
        binding.handle(&mut scheduler, InputEvent::PointerMove { y: pointer_y });

        if let Some(report) = scheduler.frame(now, &mut audio) {
            if let Some(side) = report.winner {
                log::info!("{:?} took the round after {} ticks", side, scheduler.ticks());
            }
        }

        if !scheduler.is_running() && scheduler.next_deadline().is_none() && scheduler.ticks() > 0 {
            finished = true;
            break;
        }
    }

    let (one, two) = scheduler.state().scores();
    log::info!(
        "Done at {:.1}s: scores {}-{}, {} sounds played",
        now.as_secs_f32(),
        one,
        two,
        audio.played()
    );

    if finished {
        ExitCode::SUCCESS
    } else {
        log::warn!("Round did not finish within {} frames", MAX_FRAMES);
        ExitCode::FAILURE
    }
}
