use crate::{
    trigger::condition::{ReplayPolicy, ToggleAction},
    trigger::observer::IntersectionChange,
};

/// Lifecycle of one entrance binding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EntranceState {
    /// Bound, waiting for the region to come into view.
    #[default]
    Unarmed,
    /// Timeline playing forward.
    Entering,
    /// Timeline finished forward.
    Shown,
    /// Timeline playing backward after the region left the viewport.
    Exiting,
    /// Timeline back at its start.
    Hidden,
}

/// Input to the entrance state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Signal {
    Crossed(IntersectionChange),
    Completed,
    Reversed,
}

/// Playback change requested by a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    PlayForward,
    PlayReverse,
    Restart,
    Rewind,
}

/// Pure transition function for entrance bindings.
///
/// A crossing is first mapped to the policy's [`ToggleAction`]. Actions that make no sense
/// in the current state (a second `Play` while entering, `Reverse` before anything played)
/// leave the state untouched and request nothing. Only replaying policies may play again
/// once the entrance has started reversing.
pub(crate) fn step(
    state: EntranceState,
    policy: ReplayPolicy,
    signal: Signal,
) -> (EntranceState, Option<Command>) {
    use EntranceState::*;

    let action = match signal {
        Signal::Completed if state == Entering => return (Shown, None),
        Signal::Reversed if state == Exiting => return (Hidden, None),
        Signal::Completed | Signal::Reversed => return (state, None),
        Signal::Crossed(change) => policy.action(change),
    };
    match (state, action) {
        (Unarmed, ToggleAction::Play | ToggleAction::Restart) => {
            (Entering, Some(Command::PlayForward))
        }
        (Exiting | Hidden, ToggleAction::Play) if policy.replays() => {
            (Entering, Some(Command::PlayForward))
        }
        (Entering | Shown, ToggleAction::Reverse) => (Exiting, Some(Command::PlayReverse)),
        (Entering | Shown | Exiting | Hidden, ToggleAction::Restart) if policy.replays() => {
            (Entering, Some(Command::Restart))
        }
        (Entering | Shown | Exiting, ToggleAction::Reset) => (Hidden, Some(Command::Rewind)),
        (s, _) => (s, None),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/controller/state.rs"]
mod tests;
