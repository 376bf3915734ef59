use bevy::prelude::*;
use leafwing_input_manager::prelude::*;
use locomotion::{InputDispatcher, InputEvent};

use crate::{convert::to_na_vec2, interaction::KeypadPanel};

#[derive(Reflect, Actionlike, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayerAction {
    #[actionlike(DualAxis)]
    Move,
    #[actionlike(DualAxis)]
    Look,
    Jump,
    Sprint,
    Crouch,
    Interact,
    Submit,
    Cancel,
}

/// Shared dispatcher the controller subscribes to.
#[derive(Resource, Default)]
pub struct InputQueue(pub InputDispatcher);

pub(super) fn plugin(app: &mut App) {
    app.add_plugins(InputManagerPlugin::<PlayerAction>::default());

    app.register_type::<PlayerAction>();

    let mut input_map = InputMap::<PlayerAction>::default();
    input_map.insert_dual_axis(PlayerAction::Move, VirtualDPad::wasd());
    input_map.insert_dual_axis(PlayerAction::Look, MouseMove::default());
    input_map.insert(PlayerAction::Jump, KeyCode::Space);
    input_map.insert(PlayerAction::Sprint, KeyCode::ShiftLeft);
    input_map.insert(PlayerAction::Crouch, KeyCode::KeyC);
    input_map.insert(PlayerAction::Crouch, KeyCode::ControlLeft);
    input_map.insert(PlayerAction::Interact, KeyCode::KeyE);
    input_map.insert(PlayerAction::Submit, KeyCode::Enter);
    input_map.insert(PlayerAction::Cancel, KeyCode::Escape);
    app.insert_resource(input_map);
    app.insert_resource(ActionState::<PlayerAction>::default());

    app.init_resource::<InputQueue>();
    app.add_systems(Update, forward_movement_actions);
}

/// Translate action state into controller input events.
///
/// While the keypad is open, movement is released so the player stands still.
fn forward_movement_actions(
    actions: Res<ActionState<PlayerAction>>,
    panel: Res<KeypadPanel>,
    mut queue: ResMut<InputQueue>,
    mut last_move: Local<Vec2>,
    mut suspended: Local<bool>,
) {
    let dispatcher = &mut queue.0;

    if panel.keypad.is_visible() {
        if !*suspended {
            *suspended = true;
            *last_move = Vec2::ZERO;
            dispatcher.dispatch(InputEvent::Move(to_na_vec2(Vec2::ZERO)));
            dispatcher.dispatch(InputEvent::SprintStop);
        }
        return;
    }
    *suspended = false;

    let movement = actions.clamped_axis_pair(&PlayerAction::Move);
    if movement != *last_move {
        *last_move = movement;
        dispatcher.dispatch(InputEvent::Move(to_na_vec2(movement)));
    }

    if actions.just_pressed(&PlayerAction::Jump) {
        dispatcher.dispatch(InputEvent::Jump);
    }
    if actions.just_pressed(&PlayerAction::Sprint) {
        dispatcher.dispatch(InputEvent::SprintStart);
    }
    if actions.just_released(&PlayerAction::Sprint) {
        dispatcher.dispatch(InputEvent::SprintStop);
    }
    if actions.just_pressed(&PlayerAction::Crouch) {
        dispatcher.dispatch(InputEvent::CrouchToggle);
    }
}
