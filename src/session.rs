//! Driver session
//!
//! A `Session` is the single mutable context shared between whatever produces
//! input (a window, a script, the CLI) and the simulation. It owns the model
//! and the pacing state so the model itself stays free of callback state.

use tracing::debug;

use crate::model::GraphModel;

/// Default number of simulation steps per displayed frame
pub const DEFAULT_STEPS_PER_FRAME: usize = 10;

/// Commands a driver can send between frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    TogglePause,
    NextLevel,
    PreviousLevel,
}

pub struct Session {
    model: GraphModel,
    paused: bool,
    steps_per_frame: usize,
    frames: u64,
}

impl Session {
    pub fn new(model: GraphModel, steps_per_frame: usize) -> Self {
        Self {
            model,
            paused: false,
            steps_per_frame,
            frames: 0,
        }
    }

    pub fn model(&self) -> &GraphModel {
        &self.model
    }

    pub fn into_model(self) -> GraphModel {
        self.model
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn steps_per_frame(&self) -> usize {
        self.steps_per_frame
    }

    pub fn set_steps_per_frame(&mut self, steps: usize) {
        self.steps_per_frame = steps;
    }

    /// Frames advanced so far, paused ones included
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Advance one frame; returns the number of simulation steps run
    pub fn frame(&mut self) -> usize {
        self.frames += 1;
        if self.paused {
            return 0;
        }
        for _ in 0..self.steps_per_frame {
            self.model.step();
        }
        self.steps_per_frame
    }

    /// Advance `frames` frames; returns the total number of steps run
    pub fn run(&mut self, frames: usize) -> usize {
        (0..frames).map(|_| self.frame()).sum()
    }

    /// Flip the pause flag; returns the new state
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        debug!(paused = self.paused, "toggled pause");
        self.paused
    }

    pub fn set_level(&mut self, level: usize) -> usize {
        self.model.set_hierarchy_level(level)
    }

    pub fn next_level(&mut self) -> usize {
        self.model.shift_hierarchy_level(1)
    }

    pub fn previous_level(&mut self) -> usize {
        self.model.shift_hierarchy_level(-1)
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::TogglePause => {
                self.toggle_pause();
            }
            Command::NextLevel => {
                let level = self.next_level();
                debug!(level, "hierarchy level");
            }
            Command::PreviousLevel => {
                let level = self.previous_level();
                debug!(level, "hierarchy level");
            }
        }
    }
}
