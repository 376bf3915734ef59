use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use bevy::{platform::collections::HashMap, prelude::*};
use leafwing_input_manager::prelude::ActionState;
use locomotion::{
    Interactable, InteractionDetector, Keypad, KeypadActivator,
    constants::DEFAULT_KEYPAD_CODE,
};

use crate::{
    input::PlayerAction,
    level::{DOOR_ID, LevelPhysics, LevelStatic, LevelStatics, TERMINAL_ID, remove_static},
    player::{Player, PlayerController},
};

const DIGIT_KEYS: [(KeyCode, KeyCode, u8); 10] = [
    (KeyCode::Digit0, KeyCode::Numpad0, 0),
    (KeyCode::Digit1, KeyCode::Numpad1, 1),
    (KeyCode::Digit2, KeyCode::Numpad2, 2),
    (KeyCode::Digit3, KeyCode::Numpad3, 3),
    (KeyCode::Digit4, KeyCode::Numpad4, 4),
    (KeyCode::Digit5, KeyCode::Numpad5, 5),
    (KeyCode::Digit6, KeyCode::Numpad6, 6),
    (KeyCode::Digit7, KeyCode::Numpad7, 7),
    (KeyCode::Digit8, KeyCode::Numpad8, 8),
    (KeyCode::Digit9, KeyCode::Numpad9, 9),
];

/// The single on-screen keypad.
#[derive(Resource, Default)]
pub struct KeypadPanel {
    pub keypad: Keypad,
}

/// What the view is pointing at (level static id).
#[derive(Resource, Default)]
pub struct Target(pub InteractionDetector<u32>);

/// Interactable level statics by id.
#[derive(Resource, Default)]
struct Interactables(HashMap<u32, KeypadActivator>);

/// Set by the terminal's success callback, consumed by [`open_door`].
#[derive(Resource, Clone, Default)]
struct DoorUnlocked(Arc<AtomicBool>);

pub(super) fn plugin(app: &mut App) {
    let unlocked = DoorUnlocked::default();
    let flag = Arc::clone(&unlocked.0);

    let mut interactables = Interactables::default();
    interactables.0.insert(
        TERMINAL_ID,
        KeypadActivator::new(
            DEFAULT_KEYPAD_CODE,
            Arc::new(move || flag.store(true, Ordering::Release)),
        ),
    );

    app.init_resource::<KeypadPanel>();
    app.init_resource::<Target>();
    app.insert_resource(interactables);
    app.insert_resource(unlocked);

    app.add_systems(
        Update,
        (detect_target, handle_interact, handle_keypad_keys, open_door).chain(),
    );
}

fn detect_target(
    mut target: ResMut<Target>,
    physics: Res<LevelPhysics>,
    interactables: Res<Interactables>,
    player: Single<&PlayerController, With<Player>>,
) {
    let controller = &player.controller;
    let rig = controller.camera();
    let origin = controller.body().position() + rig.local_offset;

    target.0.update(&physics.0, origin, rig.forward(), |id| {
        interactables.0.contains_key(&id).then_some(id)
    });
}

fn handle_interact(
    actions: Res<ActionState<PlayerAction>>,
    target: Res<Target>,
    mut panel: ResMut<KeypadPanel>,
    mut interactables: ResMut<Interactables>,
) {
    if panel.keypad.is_visible() || !actions.just_pressed(&PlayerAction::Interact) {
        return;
    }
    let Some(id) = target.0.interact() else {
        return;
    };
    if let Some(activator) = interactables.0.get_mut(&id) {
        info!("interacting with static {id}");
        activator.interact(&mut panel.keypad);
    }
}

fn handle_keypad_keys(
    keys: Res<ButtonInput<KeyCode>>,
    actions: Res<ActionState<PlayerAction>>,
    mut panel: ResMut<KeypadPanel>,
) {
    if !panel.keypad.is_visible() {
        return;
    }

    for (key, numpad, digit) in DIGIT_KEYS {
        if keys.just_pressed(key) || keys.just_pressed(numpad) {
            panel.keypad.add_digit(digit);
        }
    }

    if actions.just_pressed(&PlayerAction::Submit) {
        let outcome = panel.keypad.submit();
        info!("keypad submit: {outcome:?}");
    } else if actions.just_pressed(&PlayerAction::Cancel) {
        panel.keypad.cancel();
    }
}

fn open_door(
    mut commands: Commands,
    unlocked: Res<DoorUnlocked>,
    entities: Query<(Entity, &LevelStatic)>,
    mut statics: ResMut<LevelStatics>,
    mut physics: ResMut<LevelPhysics>,
) {
    if !unlocked.0.swap(false, Ordering::AcqRel) {
        return;
    }
    info!("door unlocked");
    remove_static(&mut commands, DOOR_ID, &entities, &mut statics, &mut physics);
}
