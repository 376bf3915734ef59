/*!
Input bridging: discrete events in, plain controller fields out.

Nothing here touches the physical world. Jump requests and crouch toggles that may need
a clearance probe are latched and resolved by the next tick so the tick order stays fixed.
*/

use crate::collision::Vec2;

/// One discrete input event from the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// Replaces the stored move vector (zero on release).
    Move(Vec2),
    Jump,
    SprintStart,
    SprintStop,
    CrouchToggle,
}

/// Controller-side state written by input events between ticks.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputBridge {
    move_input: Vec2,
    running: bool,
    jump_requested: bool,
    // Toggles waiting on a clearance probe, applied in order by the next tick.
    pending_crouch_toggles: u32,
}

impl InputBridge {
    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::Move(v) => self.move_input = v,
            InputEvent::Jump => self.jump_requested = true,
            InputEvent::SprintStart => self.running = true,
            InputEvent::SprintStop => self.running = false,
            InputEvent::CrouchToggle => {
                self.pending_crouch_toggles = self.pending_crouch_toggles.saturating_add(1)
            }
        }
    }

    #[inline]
    pub fn move_input(&self) -> Vec2 {
        self.move_input
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Consume the jump latch. A request is never carried past one tick.
    #[inline]
    pub fn take_jump(&mut self) -> bool {
        std::mem::take(&mut self.jump_requested)
    }

    #[inline]
    pub fn has_pending_crouch_toggles(&self) -> bool {
        self.pending_crouch_toggles > 0
    }

    /// Consume the queued crouch toggles; returns how many there were.
    #[inline]
    pub fn take_crouch_toggles(&mut self) -> u32 {
        std::mem::take(&mut self.pending_crouch_toggles)
    }

    /// Forget held input (used when the controller is disabled).
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u32);

/// Shared input dispatcher with one mailbox per subscriber.
///
/// Hosts `dispatch` events whenever they arrive; subscribers `drain` their own mailbox.
/// Events dispatched while nobody is subscribed are dropped.
#[derive(Debug, Default)]
pub struct InputDispatcher {
    next_id: u32,
    mailboxes: Vec<(SubscriptionId, Vec<InputEvent>)>,
}

impl InputDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.mailboxes.push((id, Vec::new()));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.mailboxes.len();
        self.mailboxes.retain(|(sub, _)| *sub != id);
        self.mailboxes.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.mailboxes.len()
    }

    /// Deliver `event` to every subscriber; returns how many received it.
    pub fn dispatch(&mut self, event: InputEvent) -> usize {
        for (_, mailbox) in self.mailboxes.iter_mut() {
            mailbox.push(event);
        }
        self.mailboxes.len()
    }

    /// Take all pending events for `id`, oldest first.
    pub fn drain(&mut self, id: SubscriptionId) -> Vec<InputEvent> {
        self.mailboxes
            .iter_mut()
            .find(|(sub, _)| *sub == id)
            .map(|(_, mailbox)| std::mem::take(mailbox))
            .unwrap_or_default()
    }
}
