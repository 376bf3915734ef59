/// A looping sound the controller can start and stop.
///
/// Implementations must tolerate redundant calls; the controller itself only calls
/// `play`/`stop` when [`AudioCue::is_playing`] disagrees with the wanted state.
pub trait AudioCue {
    fn is_playing(&self) -> bool;
    fn play(&mut self);
    fn stop(&mut self);
}

/// No cue attached: every call is a no-op.
impl<A: AudioCue> AudioCue for Option<A> {
    fn is_playing(&self) -> bool {
        self.as_ref().is_some_and(AudioCue::is_playing)
    }

    fn play(&mut self) {
        if let Some(cue) = self {
            cue.play();
        }
    }

    fn stop(&mut self) {
        if let Some(cue) = self {
            cue.stop();
        }
    }
}

/// Grounded and moving beyond the deadzone.
#[inline]
pub fn wants_footsteps(grounded: bool, move_magnitude: f32, deadzone: f32) -> bool {
    grounded && move_magnitude > deadzone
}

/// Bring `cue` in line with `wanted`. Returns true if a call was issued.
pub fn sync_cue(cue: &mut impl AudioCue, wanted: bool) -> bool {
    match (wanted, cue.is_playing()) {
        (true, false) => {
            cue.play();
            true
        }
        (false, true) => {
            cue.stop();
            true
        }
        _ => false,
    }
}
