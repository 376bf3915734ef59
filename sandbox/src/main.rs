// Support configuring Bevy lints within code.
#![cfg_attr(bevy_lint, feature(register_tool), register_tool(bevy))]
// Disable console on Windows for non-dev builds.
#![cfg_attr(not(feature = "dev"), windows_subsystem = "windows")]

#[cfg(feature = "dev_native")]
mod debug_tools;

mod camera;
mod config;
mod convert;
mod input;
mod interaction;
mod keypad_ui;
mod level;
mod player;

use std::path::PathBuf;

use bevy::prelude::*;
use clap::Parser;

/// First-person locomotion sandbox.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Locomotion tuning file (TOML). Missing files fall back to defaults.
    #[arg(long, default_value = "assets/locomotion.toml")]
    config: PathBuf,
}

fn main() -> AppExit {
    let args = Args::parse();

    App::new()
        .insert_resource(config::ConfigPath(args.config))
        .add_plugins(AppPlugin)
        .run()
}

pub struct AppPlugin;
impl Plugin for AppPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Window {
                title: "Locomotion Sandbox".to_string(),
                fit_canvas_to_parent: true,
                ..default()
            }
            .into(),
            ..default()
        }));

        app.insert_resource(Time::<Fixed>::from_hz(60.0));

        app.add_plugins((
            config::plugin,
            level::plugin,
            input::plugin,
            player::plugin,
            camera::plugin,
            interaction::plugin,
            keypad_ui::plugin,
        ));

        #[cfg(feature = "dev_native")]
        app.add_plugins(debug_tools::plugin);
    }
}
