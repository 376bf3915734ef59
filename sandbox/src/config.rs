use std::path::PathBuf;

use bevy::prelude::*;
use locomotion::{ConfigError, LocomotionConfig};

/// Where the locomotion tuning is read from (set from the command line).
#[derive(Resource, Debug, Clone)]
pub struct ConfigPath(pub PathBuf);

/// Validated tuning shared by every controller in the session.
#[derive(Resource, Debug, Clone, Default)]
pub struct LocomotionSettings(pub LocomotionConfig);

pub(super) fn plugin(app: &mut App) {
    app.add_systems(PreStartup, load_settings);
}

fn load_settings(mut commands: Commands, path: Option<Res<ConfigPath>>) {
    let Some(path) = path else {
        commands.insert_resource(LocomotionSettings::default());
        return;
    };

    let config = match LocomotionConfig::load(&path.0) {
        Ok(config) => {
            info!("loaded locomotion config from {}", path.0.display());
            config
        }
        Err(ConfigError::Io(err)) => {
            warn!(
                "no locomotion config at {} ({err}); using defaults",
                path.0.display()
            );
            LocomotionConfig::default()
        }
        Err(err) => {
            warn!("invalid locomotion config {}: {err}; using defaults", path.0.display());
            LocomotionConfig::default()
        }
    };

    commands.insert_resource(LocomotionSettings(config));
}
