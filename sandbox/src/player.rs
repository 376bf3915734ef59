use bevy::{audio::AudioSinkPlayback, prelude::*};
use locomotion::{
    AudioCue, CameraRig, CharacterBody, LocomotionController, TickReport,
    constants::DEFAULT_BODY_RADIUS_M,
};

use crate::{
    config::LocomotionSettings,
    convert::{quat, to_na_vec3, vec3},
    input::InputQueue,
    level::LevelPhysics,
};

const SPAWN_POINT: Vec3 = Vec3::new(0.0, 0.0, 4.0);

#[derive(Component)]
pub struct Player;

#[derive(Component)]
pub struct PlayerController {
    pub controller: LocomotionController,
    pub last_report: Option<TickReport>,
}

/// Looping footstep sound driven by the controller.
#[derive(Component)]
pub struct FootstepAudio;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_player);
    app.add_systems(FixedUpdate, tick_controller);
    app.add_systems(PostUpdate, sync_player_transform);
}

fn spawn_player(
    mut commands: Commands,
    settings: Res<LocomotionSettings>,
    mut queue: ResMut<InputQueue>,
    asset_server: Res<AssetServer>,
    mut exit: MessageWriter<AppExit>,
) {
    let config = settings.0.clone();
    let body = CharacterBody::new(
        to_na_vec3(SPAWN_POINT),
        config.standing_height,
        DEFAULT_BODY_RADIUS_M,
    );
    let camera = CameraRig::new(
        locomotion::Quat::identity(),
        locomotion::Vec3::new(0.0, config.camera_height_for(config.standing_height), 0.0),
    );

    let mut controller = match LocomotionController::builder(config).body(body).camera(camera).build() {
        Ok(controller) => controller,
        Err(err) => {
            error!("cannot build locomotion controller: {err}");
            exit.write(AppExit::error());
            return;
        }
    };
    controller.enable(&mut queue.0);

    commands.spawn((
        Name::new("Player"),
        Player,
        PlayerController {
            controller,
            last_report: None,
        },
        Transform::from_translation(SPAWN_POINT),
        Visibility::default(),
    ));

    // Starts paused: the controller only unpauses it while walking on ground.
    commands.spawn((
        Name::new("Footsteps"),
        FootstepAudio,
        AudioPlayer::new(asset_server.load("audio/footsteps.ogg")),
        PlaybackSettings::LOOP.paused(),
    ));
}

/// Adapts a Bevy audio sink to the controller's cue interface.
struct SinkCue<'a>(Mut<'a, AudioSink>);

impl AudioCue for SinkCue<'_> {
    fn is_playing(&self) -> bool {
        !self.0.is_paused()
    }

    fn play(&mut self) {
        self.0.play();
    }

    fn stop(&mut self) {
        self.0.pause();
    }
}

fn tick_controller(
    time: Res<Time>,
    mut queue: ResMut<InputQueue>,
    mut physics: ResMut<LevelPhysics>,
    mut players: Query<&mut PlayerController, With<Player>>,
    mut sinks: Query<&mut AudioSink, With<FootstepAudio>>,
) {
    let dt = time.delta_secs();
    physics.0.set_step_seconds(dt);

    // The sink only exists once the clip has loaded.
    let mut footsteps = sinks.single_mut().ok().map(SinkCue);

    for mut player in players.iter_mut() {
        player.controller.pump(&mut queue.0);
        let report = player.controller.tick(dt, &mut physics.0, &mut footsteps);
        player.last_report = Some(report);
    }
}

fn sync_player_transform(
    mut players: Query<(&PlayerController, &mut Transform), With<Player>>,
) {
    for (player, mut transform) in players.iter_mut() {
        let body = player.controller.body();
        transform.translation = vec3(body.position());
        transform.rotation = quat(body.rotation());
    }
}

#[cfg(test)]
mod tests {
    use locomotion::LocomotionConfig;

    use super::*;

    #[test]
    fn invalid_config_exits_instead_of_running_without_a_player() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(bevy::asset::AssetPlugin::default());
        app.insert_resource(LocomotionSettings(LocomotionConfig {
            gravity: 3.0,
            ..LocomotionConfig::default()
        }));
        app.init_resource::<InputQueue>();
        app.add_systems(Startup, spawn_player);

        app.update();

        assert!(matches!(app.should_exit(), Some(AppExit::Error(_))));
        let mut players = app.world_mut().query_filtered::<(), With<Player>>();
        assert_eq!(players.iter(app.world()).count(), 0);
    }
}
