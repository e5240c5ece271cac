//! The running scene
//!
//! [`Simulation`] owns every component and advances them in a fixed order
//! each frame: clock, grass, trail, shading time, camera. Rendering is a
//! separate step that hands the results to a [`RenderBackend`].

pub mod config;
pub mod loader;
pub mod model;

pub use config::{SceneConfig, DEFAULT_ACCENT};
pub use loader::{spawn_load, JsonModelLoader, ModelLoader, PendingModel};
pub use model::{ActiveModel, LoadedModel};

use std::path::PathBuf;
use std::sync::Arc;

use tokio::runtime::Handle;

use crate::core::camera::Camera;
use crate::core::camera_bounds::CameraBounds;
use crate::core::camera_controller::OrbitCameraController;
use crate::core::input::OrbitInput;
use crate::core::time::FrameClock;
use crate::core::types::Vec3;
use crate::core::Result;
use crate::grass::{GrassField, InstancedBladeField, RippleField};
use crate::render::{upload_if_dirty, BufferTarget, CameraUniform, MaterialSlot, RenderBackend};
use crate::shading::{HologramUniform, ShadingConfig};
use crate::trail::{EmitterState, TrailEmitter};

/// Where the tracked model is in its lifecycle.
enum ModelSlot {
    Absent,
    Loading(PendingModel),
    Ready(ActiveModel),
    Failed,
}

/// Summary of one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
    pub frame: u64,
    pub delta: f32,
    pub time: f32,
    pub visible_blades: usize,
    pub live_particles: usize,
    pub bursts: usize,
    pub has_model: bool,
}

/// All simulation state of a scene.
pub struct Simulation {
    config: SceneConfig,
    clock: FrameClock,
    grass: GrassField,
    ripples: RippleField,
    blades: Option<InstancedBladeField>,
    trail: TrailEmitter,
    shading: ShadingConfig,
    camera: Camera,
    orbit: OrbitCameraController,
    input: OrbitInput,
    bounds: CameraBounds,
    model: ModelSlot,
    stats: FrameStats,
}

impl Simulation {
    /// Build every component from `config`.
    pub fn new(config: SceneConfig) -> Result<Self> {
        config.validate()?;

        let grass = GrassField::new(config.grass.clone(), config.seed)?;
        let radius = grass.radius();
        let ripples = RippleField::from_config(&config.ripples, config.run_speed, radius);
        let blades = if config.instanced_blades {
            Some(InstancedBladeField::new(config.instanced.clone(), radius, config.seed ^ 0x5EED)?)
        } else {
            None
        };
        let trail = TrailEmitter::new(config.trail.clone(), config.seed.wrapping_add(1))?;

        let mut camera = Camera::default();
        let mut orbit = OrbitCameraController::new(config.orbit);
        let mut input = OrbitInput::new();
        orbit.update(&mut camera, &mut input);

        log::info!(
            "Simulation ready: {} blades, {} trail slots, run speed {} m/s",
            grass.blades().len(),
            trail.capacity(),
            config.run_speed
        );

        Ok(Self {
            clock: FrameClock::new(config.max_delta),
            shading: config.shading(),
            bounds: config.camera_bounds,
            grass,
            ripples,
            blades,
            trail,
            camera,
            orbit,
            input,
            model: ModelSlot::Absent,
            stats: FrameStats::default(),
            config,
        })
    }

    /// Place an already loaded model, replacing any current one.
    pub fn attach_model(&mut self, model: LoadedModel) {
        log::info!("Attached model '{}'", model.name);
        self.model = ModelSlot::Ready(ActiveModel::new(model, &self.config.run_clip, self.config.clip_trim));
    }

    /// Start loading a model in the background; it is attached when ready.
    pub fn begin_load<L: ModelLoader>(&mut self, handle: &Handle, loader: Arc<L>, path: PathBuf) {
        self.model = ModelSlot::Loading(spawn_load(handle, loader, path));
    }

    fn poll_model(&mut self) {
        let ModelSlot::Loading(pending) = &mut self.model else {
            return;
        };
        match pending.poll() {
            None => {}
            Some(Ok(model)) => self.attach_model(model),
            Some(Err(e)) => {
                log::warn!("Model load failed, continuing without it: {}", e);
                self.model = ModelSlot::Failed;
            }
        }
    }

    /// Run one frame with the wall-clock delta since the previous one.
    pub fn frame(&mut self, raw_delta: f32) -> FrameStats {
        let delta = self.clock.advance(raw_delta);
        let time = self.clock.elapsed();

        self.poll_model();

        self.grass.advance(delta, time, &self.ripples, self.config.run_speed);
        if let Some(blades) = &mut self.blades {
            blades.advance(delta, self.config.run_speed);
        }

        let emitter = self.emitter_state(time);
        let trail = self.trail.tick(delta, time, emitter.as_ref());

        self.update_camera();

        self.stats = FrameStats {
            frame: self.clock.frame_count(),
            delta,
            time,
            visible_blades: self.grass.visible_count(),
            live_particles: self.trail.live_count(),
            bursts: trail.bursts,
            has_model: emitter.is_some(),
        };
        log::debug!(
            "frame {} dt={:.4} visible={} particles={}",
            self.stats.frame,
            delta,
            self.stats.visible_blades,
            self.stats.live_particles
        );
        self.stats
    }

    fn emitter_state(&self, time: f32) -> Option<EmitterState> {
        match &self.model {
            ModelSlot::Ready(active) => Some(EmitterState::from_transform(&active.world_transform(time))),
            _ => None,
        }
    }

    fn update_camera(&mut self) {
        self.orbit.update(&mut self.camera, &mut self.input);

        let clamped = self.bounds.clamp(self.camera.position, self.camera.forward(), self.grass.radius());
        if clamped != self.camera.position {
            self.camera.position = clamped;
            self.camera.face(Vec3::from(self.orbit.config().target), Vec3::Y);
            self.orbit.sync_from(&self.camera);
        }
    }

    /// Hand this frame to the engine: dirty buffers, materials, camera, draw.
    pub fn submit<B: RenderBackend + ?Sized>(&mut self, backend: &mut B) {
        let time = self.clock.elapsed();

        upload_if_dirty(backend, BufferTarget::GrassPositions, self.grass.positions_mut());
        upload_if_dirty(backend, BufferTarget::GrassAttributes, self.grass.attributes_mut());
        if let Some(blades) = &mut self.blades {
            upload_if_dirty(backend, BufferTarget::BladeInstances, blades.buffer_mut());
        }
        upload_if_dirty(backend, BufferTarget::TrailVertices, self.trail.vertices_mut());

        backend.set_material(MaterialSlot::Deer, &HologramUniform::new(&self.shading.deer, time));
        backend.set_material(MaterialSlot::Grass, &HologramUniform::new(&self.shading.grass, time));
        backend.set_material(MaterialSlot::Trail, &HologramUniform::new(&self.shading.trail, time));
        backend.set_camera(&CameraUniform::from_camera(&self.camera, time));
        backend.draw();
    }

    /// Viewport resize.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.camera.set_aspect(width, height);
    }

    pub fn input_mut(&mut self) -> &mut OrbitInput {
        &mut self.input
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn grass(&self) -> &GrassField {
        &self.grass
    }

    pub fn ripples(&self) -> &RippleField {
        &self.ripples
    }

    pub fn blades(&self) -> Option<&InstancedBladeField> {
        self.blades.as_ref()
    }

    pub fn trail(&self) -> &TrailEmitter {
        &self.trail
    }

    pub fn shading(&self) -> &ShadingConfig {
        &self.shading
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn orbit(&self) -> &OrbitCameraController {
        &self.orbit
    }

    pub fn model(&self) -> Option<&ActiveModel> {
        match &self.model {
            ModelSlot::Ready(active) => Some(active),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.model, ModelSlot::Loading(_))
    }

    pub fn load_failed(&self) -> bool {
        matches!(self.model, ModelSlot::Failed)
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }
}
