//! Camera rigs and the manager that switches between them

use serde::{Deserialize, Serialize};
use void_ecs::prelude::*;
use void_math::consts::{FRAC_PI_2, FRAC_PI_3};

/// Where the camera is and what it looks at
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CameraMode {
    #[default]
    ThirdPerson,
    FirstPerson,
}

/// A camera behaviour following one target
pub trait CameraRig {
    fn mode(&self) -> CameraMode;

    /// Mouse movement in pixels
    fn look(&mut self, delta: LookDelta);

    /// Wheel movement; ignored by rigs without zoom
    fn zoom(&mut self, _delta: f32) {}

    /// Heading the target should face
    fn yaw(&self) -> f32;

    fn update(&mut self, target: Vec3, dt: f32) -> CameraPose;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThirdPersonParams {
    pub distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Radians per pixel
    pub sensitivity: f32,
    /// Look-at and orbit height above the target
    pub height: f32,
    /// Fraction of the gap left after one second
    pub smoothing: f32,
    pub zoom_speed: f32,
}

impl Default for ThirdPersonParams {
    fn default() -> Self {
        Self {
            distance: 10.0,
            min_distance: 5.0,
            max_distance: 20.0,
            sensitivity: 0.002,
            height: 6.0,
            smoothing: 0.001,
            zoom_speed: 0.01,
        }
    }
}

/// Orbits behind the target with smoothed motion
#[derive(Debug, Clone)]
pub struct ThirdPersonRig {
    params: ThirdPersonParams,
    yaw: f32,
    pitch: f32,
    distance: f32,
    current_offset: Vec3,
    current_look_at: Vec3,
}

impl ThirdPersonRig {
    pub const PITCH_LIMIT: f32 = FRAC_PI_3;

    pub fn new(params: ThirdPersonParams) -> Self {
        Self {
            params,
            yaw: 0.0,
            pitch: 0.3,
            distance: params.distance,
            current_offset: Vec3::ZERO,
            current_look_at: Vec3::ZERO,
        }
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Offset from the target the rig is easing towards
    pub fn ideal_offset(&self) -> Vec3 {
        let (d, h) = (self.distance, self.params.height);
        Vec3::new(
            -self.yaw.sin() * d * self.pitch.cos(),
            d * self.pitch.sin() + h,
            -self.yaw.cos() * d * self.pitch.cos(),
        )
    }
}

impl CameraRig for ThirdPersonRig {
    fn mode(&self) -> CameraMode {
        CameraMode::ThirdPerson
    }

    fn look(&mut self, delta: LookDelta) {
        self.yaw -= delta.dx * self.params.sensitivity;
        self.pitch = clamp(self.pitch + delta.dy * self.params.sensitivity, -Self::PITCH_LIMIT, Self::PITCH_LIMIT);
    }

    fn zoom(&mut self, delta: f32) {
        let (min, max) = (self.params.min_distance, self.params.max_distance);
        self.distance = clamp(self.distance + delta * self.params.zoom_speed, min, max);
    }

    fn yaw(&self) -> f32 {
        self.yaw
    }

    fn update(&mut self, target: Vec3, dt: f32) -> CameraPose {
        let t = damp_factor(self.params.smoothing, dt);
        self.current_offset = self.current_offset.lerp(self.ideal_offset(), t);
        self.current_look_at = self.current_look_at.lerp(Vec3::new(0.0, self.params.height, 0.0), t);
        CameraPose {
            position: target + self.current_offset,
            look_at: target + self.current_look_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FirstPersonParams {
    /// Eye position relative to the target
    pub eye_offset: Vec3,
    pub sensitivity: f32,
}

impl Default for FirstPersonParams {
    fn default() -> Self {
        Self {
            eye_offset: Vec3::new(0.0, 6.0, 0.0),
            sensitivity: 0.002,
        }
    }
}

/// Looks out from the target's head
#[derive(Debug, Clone)]
pub struct FirstPersonRig {
    params: FirstPersonParams,
    yaw: f32,
    pitch: f32,
}

impl FirstPersonRig {
    pub const PITCH_LIMIT: f32 = FRAC_PI_2;

    pub fn new(params: FirstPersonParams) -> Self {
        Self { params, yaw: 0.0, pitch: 0.0 }
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn look_direction(&self) -> Vec3 {
        Vec3::new(
            self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.cos() * self.pitch.cos(),
        )
    }
}

impl CameraRig for FirstPersonRig {
    fn mode(&self) -> CameraMode {
        CameraMode::FirstPerson
    }

    fn look(&mut self, delta: LookDelta) {
        self.yaw -= delta.dx * self.params.sensitivity;
        self.pitch = clamp(self.pitch - delta.dy * self.params.sensitivity, -Self::PITCH_LIMIT, Self::PITCH_LIMIT);
    }

    fn yaw(&self) -> f32 {
        self.yaw
    }

    fn update(&mut self, target: Vec3, _dt: f32) -> CameraPose {
        let position = target + self.params.eye_offset;
        CameraPose { position, look_at: position + self.look_direction() }
    }
}

/// Owns both rigs and runs the active one each frame.
///
/// Lives on its own entity and follows `target`. Look deltas reach both
/// rigs so switching keeps the heading; only the active rig moves the
/// camera. The target turns to face the active rig's yaw, and its model is
/// hidden in first person.
pub struct CameraManager {
    target: EntityId,
    mode: CameraMode,
    third_person: ThirdPersonRig,
    first_person: FirstPersonRig,
    pose: CameraPose,
    applied_yaw: Option<f32>,
}

impl CameraManager {
    pub fn new(target: EntityId) -> Self {
        Self::with_rigs(
            target,
            ThirdPersonRig::new(ThirdPersonParams::default()),
            FirstPersonRig::new(FirstPersonParams::default()),
        )
    }

    pub fn with_rigs(target: EntityId, third_person: ThirdPersonRig, first_person: FirstPersonRig) -> Self {
        Self {
            target,
            mode: CameraMode::ThirdPerson,
            third_person,
            first_person,
            pose: CameraPose::default(),
            applied_yaw: None,
        }
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    pub fn third_person(&self) -> &ThirdPersonRig {
        &self.third_person
    }

    pub fn first_person(&self) -> &FirstPersonRig {
        &self.first_person
    }

    fn active(&mut self) -> &mut dyn CameraRig {
        match self.mode {
            CameraMode::ThirdPerson => &mut self.third_person,
            CameraMode::FirstPerson => &mut self.first_person,
        }
    }

    pub fn toggle(&mut self, ctx: &mut Context<'_>) {
        self.mode = match self.mode {
            CameraMode::ThirdPerson => CameraMode::FirstPerson,
            CameraMode::FirstPerson => CameraMode::ThirdPerson,
        };
        self.applied_yaw = None;
        log::info!("switched to {:?} camera", self.mode);
        let visible = self.mode == CameraMode::ThirdPerson;
        ctx.send(self.target, Message::new(topics::MODEL_VISIBILITY, visible));
    }
}

impl Component for CameraManager {
    fn capability(&self) -> Capability {
        Capability::Camera
    }

    fn init(&mut self, ctx: &mut Context<'_>) {
        ctx.subscribe(topics::CAMERA_TOGGLE);
        ctx.subscribe(topics::CAMERA_LOOK);
        ctx.subscribe(topics::CAMERA_ZOOM);
    }

    fn on_message(&mut self, message: &Message, ctx: &mut Context<'_>) {
        if message.is(topics::CAMERA_TOGGLE) {
            self.toggle(ctx);
        } else if let Some(delta) = message.payload::<LookDelta>() {
            self.third_person.look(*delta);
            self.first_person.look(*delta);
        } else if let Some(delta) = message.payload::<f32>() {
            self.third_person.zoom(*delta);
        }
    }

    fn has_update(&self) -> bool {
        true
    }

    fn update(&mut self, dt: f32, ctx: &mut Context<'_>) {
        let Some(target) = ctx.position_of(self.target) else {
            return;
        };
        let rig = self.active();
        let pose = rig.update(target, dt);
        let yaw = rig.yaw();
        self.pose = pose;
        ctx.set_position(pose.position);

        if self.applied_yaw != Some(yaw) {
            self.applied_yaw = Some(yaw);
            ctx.manager_mut().set_rotation(self.target, Quat::from_rotation_y(yaw));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::CharacterController;
    use approx::assert_relative_eq;

    #[test]
    fn test_third_person_offset_and_limits() {
        let mut rig = ThirdPersonRig::new(ThirdPersonParams::default());
        let ideal = rig.ideal_offset();
        assert_relative_eq!(ideal.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(ideal.y, 10.0 * 0.3_f32.sin() + 6.0, epsilon = 1e-5);
        assert_relative_eq!(ideal.z, -10.0 * 0.3_f32.cos(), epsilon = 1e-5);

        rig.look(LookDelta { dx: 0.0, dy: 10_000.0 });
        assert_relative_eq!(rig.pitch(), FRAC_PI_3);
        rig.zoom(5_000.0);
        assert_eq!(rig.distance(), 20.0);
        rig.zoom(-5_000.0);
        assert_eq!(rig.distance(), 5.0);
    }

    #[test]
    fn test_third_person_eases_toward_ideal() {
        let mut rig = ThirdPersonRig::new(ThirdPersonParams::default());
        let first = rig.update(Vec3::ZERO, 1.0 / 30.0);
        let ideal = rig.ideal_offset();
        assert!(first.position.distance(ideal) > 0.1);
        for _ in 0..300 {
            rig.update(Vec3::ZERO, 1.0 / 30.0);
        }
        let settled = rig.update(Vec3::ZERO, 1.0 / 30.0);
        assert_relative_eq!(settled.position.distance(ideal), 0.0, epsilon = 1e-3);
        assert_relative_eq!(settled.look_at.y, 6.0, epsilon = 1e-3);
    }

    #[test]
    fn test_first_person_look() {
        let mut rig = FirstPersonRig::new(FirstPersonParams::default());
        rig.look(LookDelta { dx: 0.0, dy: -10_000.0 });
        assert_relative_eq!(rig.pitch(), FRAC_PI_2);
        let pose = rig.update(Vec3::new(1.0, 0.0, 2.0), 0.016);
        assert_eq!(pose.position, Vec3::new(1.0, 6.0, 2.0));
        assert_relative_eq!(pose.look_at.y, 7.0, epsilon = 1e-5);
    }

    #[test]
    fn test_manager_toggles_and_hides_model() {
        let mut manager = EntityManager::new();
        let player = manager
            .add(Entity::at(Vec3::new(4.0, 0.0, 4.0)).with_component(CharacterController::default()).unwrap(), Some("player"))
            .unwrap();
        let camera = manager.add(Entity::new().with_component(CameraManager::new(player)).unwrap(), Some("player-camera")).unwrap();

        manager.update(1.0 / 30.0);
        assert_eq!(manager.component::<CameraManager>(camera).unwrap().mode(), CameraMode::ThirdPerson);

        manager.send(camera, Message::signal(topics::CAMERA_TOGGLE));
        manager.update(1.0 / 30.0);
        let cam = manager.component::<CameraManager>(camera).unwrap();
        assert_eq!(cam.mode(), CameraMode::FirstPerson);
        assert_eq!(cam.pose().position, Vec3::new(4.0, 6.0, 4.0));
        assert!(!manager.component::<CharacterController>(player).unwrap().is_visible());

        manager.send(camera, Message::signal(topics::CAMERA_TOGGLE));
        assert!(manager.component::<CharacterController>(player).unwrap().is_visible());
    }

    #[test]
    fn test_target_faces_camera_yaw() {
        let mut manager = EntityManager::new();
        let player = manager.add(Entity::new(), Some("player")).unwrap();
        let camera = manager.add(Entity::new().with_component(CameraManager::new(player)).unwrap(), None).unwrap();

        manager.send(camera, Message::new(topics::CAMERA_LOOK, LookDelta { dx: -500.0, dy: 0.0 }));
        manager.update(1.0 / 30.0);
        let forward = manager.rotation(player).unwrap().forward();
        assert_relative_eq!(forward.x, 1.0_f32.sin(), epsilon = 1e-5);
        assert_relative_eq!(forward.z, 1.0_f32.cos(), epsilon = 1e-5);
    }
}
