//! Frame driver
//!
//! Owns the scenes and runs the current one: input frame, update, draw, then
//! any scene switch or close request recorded through [`DriverControl`].

use crate::{
    config::{ConfigError, EngineConfig},
    foundation::time::{FramePacer, Timer},
    input::FrameInput,
    render::RenderSink,
    scene::{Scene, TickContext},
};
use thiserror::Error;

/// Requests behaviors make of the driver during a tick
#[derive(Debug, Default)]
pub struct DriverControl {
    close_requested: bool,
    next_scene: Option<usize>,
}

impl DriverControl {
    /// Stop the driver after the current frame
    pub fn request_close(&mut self) {
        if !self.close_requested {
            log::info!("Close requested");
        }
        self.close_requested = true;
    }

    /// Whether a behavior asked the driver to stop
    pub fn is_close_requested(&self) -> bool {
        self.close_requested
    }

    /// Switch to scene `index` after the current frame
    pub fn request_scene(&mut self, index: usize) {
        self.next_scene = Some(index);
    }

    /// Pending scene switch, if any
    pub fn pending_scene(&self) -> Option<usize> {
        self.next_scene
    }

    fn take_scene_request(&mut self) -> Option<usize> {
        self.next_scene.take()
    }
}

/// Main engine struct
///
/// Scenes are addressed by the index `add_scene` returned.
pub struct Engine {
    scenes: Vec<Scene>,
    current: usize,
    config: EngineConfig,
    timer: Timer,
    pacer: FramePacer,
    control: DriverControl,
    frames: u64,
}

impl Engine {
    /// Create an engine with no scenes
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        log::info!("Initializing engine...");

        let timer = match config.fixed_delta {
            Some(delta) => Timer::fixed(delta),
            None => Timer::new(),
        };
        let pacer = FramePacer::new(config.target_fps);

        Ok(Self {
            scenes: Vec::new(),
            current: 0,
            config,
            timer,
            pacer,
            control: DriverControl::default(),
            frames: 0,
        })
    }

    /// Install the `env_logger` backend with the configured default filter
    ///
    /// Call before [`Engine::new`] so the driver's startup lines are kept.
    pub fn init_logging(config: &EngineConfig) -> Result<(), EngineError> {
        crate::foundation::logging::init_with_filter(&config.log_filter)?;
        Ok(())
    }

    /// Append a scene and return its index
    pub fn add_scene(&mut self, scene: Scene) -> usize {
        log::debug!("Registered scene '{}' at index {}", scene.name(), self.scenes.len());
        self.scenes.push(scene);
        self.scenes.len() - 1
    }

    /// Make `index` the current scene
    ///
    /// Between frames this swaps immediately, ending the old scene if it was
    /// running and starting the new one. From inside a tick, use
    /// [`TickContext::request_scene`] instead.
    pub fn set_current_scene(&mut self, index: usize) -> Result<(), EngineError> {
        self.check_index(index)?;
        if index == self.current {
            return Ok(());
        }

        let was_running = self.scenes[self.current].state() == crate::scene::SceneState::Running;
        if was_running {
            self.scenes[self.current].end();
        }
        log::info!("Switching to scene {} ('{}')", index, self.scenes[index].name());
        self.current = index;
        if was_running {
            self.scenes[index].start();
        }
        Ok(())
    }

    /// Index of the scene the driver ticks
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Scene the driver ticks
    pub fn current_scene(&self) -> Option<&Scene> {
        self.scenes.get(self.current)
    }

    /// Mutable access to the scene the driver ticks
    pub fn current_scene_mut(&mut self) -> Option<&mut Scene> {
        self.scenes.get_mut(self.current)
    }

    /// Scene at `index`
    pub fn scene(&self, index: usize) -> Option<&Scene> {
        self.scenes.get(index)
    }

    /// Number of registered scenes
    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    /// Driver configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Close and scene-switch requests recorded so far
    pub fn control(&self) -> &DriverControl {
        &self.control
    }

    /// Mutable access to the driver requests
    pub fn control_mut(&mut self) -> &mut DriverControl {
        &mut self.control
    }

    /// Frames stepped so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Whether the driver loop should stop
    pub fn should_stop(&self) -> bool {
        self.control.is_close_requested()
            || self.config.max_frames.is_some_and(|max| self.frames >= max)
    }

    /// Start the current scene
    pub fn start(&mut self) -> Result<(), EngineError> {
        let scene = self.scenes.get_mut(self.current).ok_or(EngineError::NoScenes)?;
        scene.start();
        Ok(())
    }

    /// Run exactly one frame; returns whether the loop should continue
    pub fn step<I, R>(&mut self, input: &mut I, sink: &mut R) -> Result<bool, EngineError>
    where
        I: FrameInput,
        R: RenderSink,
    {
        self.pacer.begin_frame();
        input.begin_frame();
        let dt = self.timer.tick();

        let scene = self.scenes.get_mut(self.current).ok_or(EngineError::NoScenes)?;
        {
            let mut ctx = TickContext::new(dt, &*input, &mut self.control);
            scene.update(&mut ctx);
        }
        sink.begin_frame();
        scene.draw(sink);
        self.frames += 1;

        if let Some(index) = self.control.take_scene_request() {
            self.set_current_scene(index)?;
        }

        self.pacer.end_frame();
        Ok(!self.should_stop())
    }

    /// Run frames until close is requested or `max_frames` is reached
    pub fn run<I, R>(&mut self, input: &mut I, sink: &mut R) -> Result<(), EngineError>
    where
        I: FrameInput,
        R: RenderSink,
    {
        self.start()?;
        log::info!("Starting main loop...");

        while self.step(input, sink)? {}

        self.end();
        log::info!("Engine shutdown complete after {} frames", self.frames);
        Ok(())
    }

    /// End the current scene
    pub fn end(&mut self) {
        if let Some(scene) = self.scenes.get_mut(self.current) {
            scene.end();
        }
    }

    fn check_index(&self, index: usize) -> Result<(), EngineError> {
        if self.scenes.is_empty() {
            return Err(EngineError::NoScenes);
        }
        if index >= self.scenes.len() {
            return Err(EngineError::SceneIndexOutOfRange {
                index,
                count: self.scenes.len(),
            });
        }
        Ok(())
    }
}

/// Engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// The driver has no scene to tick
    #[error("No scenes registered")]
    NoScenes,

    /// A scene index past the registered scenes
    #[error("Scene index {index} out of range ({count} scenes)")]
    SceneIndexOutOfRange {
        /// Requested index
        index: usize,
        /// Registered scenes
        count: usize,
    },

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A logger was already installed
    #[error("Logger initialization failed: {0}")]
    Logger(#[from] log::SetLoggerError),
}
