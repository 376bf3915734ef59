use bevy::prelude::*;

use crate::interaction::{KeypadPanel, Target};

#[derive(Component)]
struct KeypadText;

#[derive(Component)]
struct InteractPrompt;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_ui);
    app.add_systems(
        Update,
        (
            update_keypad_text.run_if(resource_changed::<KeypadPanel>),
            update_prompt,
        ),
    );
}

fn spawn_ui(mut commands: Commands) {
    commands.spawn((
        Name::new("KeypadPanel"),
        KeypadText,
        Text::new(""),
        TextFont {
            font_size: 42.0,
            ..default()
        },
        Node {
            position_type: PositionType::Absolute,
            top: Val::Percent(40.0),
            left: Val::Percent(42.0),
            padding: UiRect::all(Val::Px(16.0)),
            ..default()
        },
        BackgroundColor(Color::srgba(0.05, 0.05, 0.08, 0.85)),
        Visibility::Hidden,
    ));

    commands.spawn((
        Name::new("InteractPrompt"),
        InteractPrompt,
        Text::new("[E] Use terminal"),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Percent(30.0),
            left: Val::Percent(45.0),
            ..default()
        },
        Visibility::Hidden,
    ));
}

fn update_keypad_text(
    panel: Res<KeypadPanel>,
    text: Single<(&mut Text, &mut Visibility), With<KeypadText>>,
) {
    let (mut content, mut visibility) = text.into_inner();
    let keypad = &panel.keypad;

    *visibility = if keypad.is_visible() {
        Visibility::Visible
    } else {
        Visibility::Hidden
    };
    content.0 = format!("CODE  {}\n[Enter] submit  [Esc] cancel", keypad.display());
}

fn update_prompt(
    target: Res<Target>,
    panel: Res<KeypadPanel>,
    mut prompt: Single<&mut Visibility, With<InteractPrompt>>,
) {
    let visible = target.0.current().is_some() && !panel.keypad.is_visible();
    **prompt = if visible {
        Visibility::Visible
    } else {
        Visibility::Hidden
    };
}
