use super::keypad::{Keypad, SuccessCallback};

/// Something the player can use by looking at it and pressing interact.
pub trait Interactable<Ctx: ?Sized> {
    fn interact(&mut self, ctx: &mut Ctx);
}

/// Opens a keypad with its own code and success callback.
pub struct KeypadActivator {
    code: String,
    on_success: SuccessCallback,
}

impl KeypadActivator {
    pub fn new(code: impl Into<String>, on_success: SuccessCallback) -> Self {
        Self {
            code: code.into(),
            on_success,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }
}

impl Interactable<Keypad> for KeypadActivator {
    fn interact(&mut self, keypad: &mut Keypad) {
        keypad.set_code(self.code.clone(), self.on_success.clone());
        keypad.show();
    }
}
