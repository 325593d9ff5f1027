//! Panel power state machine
//!
//! A panel is either powered down or has completed its power-on sequence.
//! Failed power-on attempts leave it powered down.

/// Panel power states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelState {
    /// Initial state; also reached after power-off
    #[default]
    Unprepared,
    /// Power-on sequence completed
    Prepared,
}

/// Events that move a panel between power states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelEvent {
    /// Power-on sequence finished without error
    PoweredOn,
    /// Power-on sequence aborted
    PowerOnFailed,
    /// Power-off sequence finished
    PoweredOff,
}

impl PanelState {
    pub fn is_prepared(&self) -> bool {
        matches!(self, PanelState::Prepared)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: PanelEvent) -> Self {
        use PanelEvent::*;
        use PanelState::*;

        match (self, event) {
            (Unprepared, PoweredOn) => Prepared,
            (Unprepared, PowerOnFailed) => Unprepared,
            (Prepared, PoweredOff) => Unprepared,

            // No other transitions are valid; stay in current state
            (state, _) => state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        assert_eq!(PanelState::default(), PanelState::Unprepared);
        assert!(!PanelState::default().is_prepared());
    }

    #[test]
    fn test_power_cycle() {
        let state = PanelState::Unprepared.transition(PanelEvent::PoweredOn);
        assert!(state.is_prepared());

        let state = state.transition(PanelEvent::PoweredOff);
        assert_eq!(state, PanelState::Unprepared);
    }

    #[test]
    fn test_failed_power_on_stays_unprepared() {
        let state = PanelState::Unprepared.transition(PanelEvent::PowerOnFailed);
        assert_eq!(state, PanelState::Unprepared);
    }

    #[test]
    fn test_invalid_transitions_ignored() {
        assert_eq!(
            PanelState::Prepared.transition(PanelEvent::PoweredOn),
            PanelState::Prepared
        );
        assert_eq!(
            PanelState::Unprepared.transition(PanelEvent::PoweredOff),
            PanelState::Unprepared
        );
    }
}
