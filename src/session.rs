//! Frame loop
//!
//! Each frame runs, in order: gather intent, tick the simulation, build and
//! present the frame, then wait out the frame budget. The loop ends when the
//! player dies, on an explicit quit, or at an optional frame limit.

use std::time::{Duration, Instant};

use crate::renderer::{Compositor, Frame, FrameBuilder};
use crate::sim::{GameEvent, GameState, TickInput, tick};

/// Supplies the player's intent once per frame
pub trait IntentSource {
    fn next_intent(&mut self, state: &GameState) -> TickInput;
}

/// Receives each finished frame
pub trait FrameSink {
    fn present(&mut self, frame: &Frame);
}

/// Blocks until the next frame is due
pub trait Pacer {
    fn wait_frame(&mut self);
}

impl FrameSink for Compositor {
    fn present(&mut self, frame: &Frame) {
        Compositor::present(self, frame);
    }
}

/// Discards frames (headless runs and tests)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn present(&mut self, _frame: &Frame) {}
}

/// Replays a fixed list of intents, then idles
impl IntentSource for std::vec::IntoIter<TickInput> {
    fn next_intent(&mut self, _state: &GameState) -> TickInput {
        self.next().unwrap_or_default()
    }
}

/// Fixed target frame rate
#[derive(Debug, Clone)]
pub struct FixedRate {
    budget: Duration,
    deadline: Option<Instant>,
}

impl FixedRate {
    pub fn new(fps: u32) -> Self {
        Self {
            budget: Duration::from_secs(1) / fps.max(1),
            deadline: None,
        }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }
}

impl Pacer for FixedRate {
    fn wait_frame(&mut self) {
        let now = Instant::now();
        let deadline = self.deadline.unwrap_or(now + self.budget);
        if deadline > now {
            std::thread::sleep(deadline - now);
        }
        // Don't try to catch up after a long stall
        self.deadline = Some(deadline.max(now) + self.budget);
    }
}

/// Runs frames back to back
#[derive(Debug, Default, Clone, Copy)]
pub struct Unpaced;

impl Pacer for Unpaced {
    fn wait_frame(&mut self) {}
}

/// Why a session stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Player died; the host should linger briefly before shutting down
    PlayerDied { frames: u64 },
    /// Explicit quit request; exit immediately
    Quit { frames: u64 },
    /// Configured frame limit reached
    FrameLimit { frames: u64 },
}

/// Instrumentation hook: every tick's events pass through here
fn log_event(frame: u64, event: &GameEvent) {
    match event {
        GameEvent::Died { id } => log::info!("[frame {frame}] {id:?} died"),
        GameEvent::TargetLost { enemy, target } => {
            log::info!("[frame {frame}] {enemy:?} lost target {target:?}")
        }
        other => log::debug!("[frame {frame}] {other:?}"),
    }
}

pub struct Session<I, S, P> {
    state: GameState,
    intents: I,
    sink: S,
    pacer: P,
    frames: FrameBuilder,
    frame_count: u64,
    max_frames: Option<u64>,
}

impl<I: IntentSource, S: FrameSink, P: Pacer> Session<I, S, P> {
    pub fn new(state: GameState, intents: I, sink: S, pacer: P) -> Self {
        Self {
            state,
            intents,
            sink,
            pacer,
            frames: FrameBuilder::new(),
            frame_count: 0,
            max_frames: None,
        }
    }

    pub fn with_frame_limit(mut self, max_frames: Option<u64>) -> Self {
        self.max_frames = max_frames;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Run a single frame; returns the outcome if the session ended
    pub fn step(&mut self) -> Option<SessionOutcome> {
        let frames = self.frame_count;
        if self.state.is_over() {
            return Some(SessionOutcome::PlayerDied { frames });
        }
        if self.max_frames.is_some_and(|max| frames >= max) {
            return Some(SessionOutcome::FrameLimit { frames });
        }

        let input = self.intents.next_intent(&self.state);
        if input.quit {
            log::info!("Quit requested at frame {frames}");
            return Some(SessionOutcome::Quit { frames });
        }

        tick(&mut self.state, &input);
        for event in &self.state.events {
            log_event(frames, event);
        }

        let frame = self.frames.build(&self.state.registry);
        self.sink.present(&frame);
        self.pacer.wait_frame();
        self.frame_count += 1;

        if self.state.is_over() {
            return Some(SessionOutcome::PlayerDied {
                frames: self.frame_count,
            });
        }
        None
    }

    /// Run until the session ends
    pub fn run(&mut self) -> SessionOutcome {
        log::info!("Session started");
        loop {
            if let Some(outcome) = self.step() {
                log::info!("Session ended: {outcome:?}");
                return outcome;
            }
        }
    }
}
