//! Connection lifecycle state machine.
//!
//! The transition function is pure: it maps (state, event) to the next
//! state plus the side effects the caller must perform. The bot event
//! loop owns the single `LifecycleState` instance and is the only place
//! relay tasks are started or cancelled.

/// Where the bot is in its connection lifecycle. Exactly one instance per
/// running account; `Disconnected` is terminal (a fresh bot starts over
/// in `Connecting`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Connect request issued, awaiting the welcome event.
    Connecting,
    /// Join command sent, awaiting our own join acknowledgment.
    Joining,
    /// Relay loop active.
    Relaying,
    /// Connection gone; no relay may run.
    Disconnected,
}

/// Lifecycle-relevant happenings distilled from wire events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// Registration completed and the configured target is a channel.
    WelcomeChannelTarget,
    /// Registration completed and the configured target is a plain nick;
    /// some networks send no join acknowledgment for those, so relaying
    /// starts immediately.
    WelcomeDirectTarget,
    /// The server acknowledged our own join.
    SelfJoined,
    /// The connection is gone.
    ConnectionLost,
}

/// Side effects the caller must perform after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideEffect {
    /// Send a join command for the configured channel.
    JoinChannel,
    /// Start the relay loop. Emitted at most once per entry into
    /// `Relaying`: re-delivered join events while already relaying do not
    /// produce it again.
    StartRelay,
    /// Cancel the active relay loop, if any.
    StopRelay,
}

/// Pure lifecycle transition.
pub fn transition(
    state: LifecycleState,
    event: LifecycleEvent,
) -> (LifecycleState, Option<SideEffect>) {
    use self::{LifecycleEvent as E, LifecycleState as S, SideEffect as FX};

    match (state, event) {
        (_, E::ConnectionLost) => (S::Disconnected, Some(FX::StopRelay)),
        (S::Disconnected, _) => (S::Disconnected, None),

        (S::Connecting, E::WelcomeChannelTarget) => (S::Joining, Some(FX::JoinChannel)),
        (S::Connecting, E::WelcomeDirectTarget) => (S::Relaying, Some(FX::StartRelay)),
        // A join can precede the welcome on lenient servers; start
        // relaying either way.
        (S::Connecting | S::Joining, E::SelfJoined) => (S::Relaying, Some(FX::StartRelay)),

        // Re-delivered join while already relaying: guarded, no second
        // relay loop.
        (S::Relaying, E::SelfJoined) => (S::Relaying, None),

        // Stale welcome after we already progressed.
        (S::Joining | S::Relaying, E::WelcomeChannelTarget | E::WelcomeDirectTarget) => {
            (state, None)
        },
    }
}
