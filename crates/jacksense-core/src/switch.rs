//! Tracked insertion switches and their combined state.

/// The insertion switches this subsystem tracks.
///
/// These correspond to the kernel's `SW_HEADPHONE_INSERT`,
/// `SW_MICROPHONE_INSERT` and `SW_LINEOUT_INSERT` switch codes; any other
/// switch a device reports is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwitchCode {
    /// A headphone plug is inserted
    HeadphoneInsert,
    /// A plug with a microphone contact is inserted
    MicrophoneInsert,
    /// A line-out plug is inserted
    LineoutInsert,
}

impl SwitchCode {
    /// All tracked switches, in initialization order.
    pub const ALL: [Self; 3] = [Self::HeadphoneInsert, Self::MicrophoneInsert, Self::LineoutInsert];
}

/// Last known value of each tracked switch.
///
/// Mutated only by the switch tracker as it decodes the event stream; read
/// by the availability notifier at every report boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwitchState {
    /// `SW_HEADPHONE_INSERT` is active
    pub headphone_inserted: bool,
    /// `SW_MICROPHONE_INSERT` is active
    pub microphone_inserted: bool,
    /// `SW_LINEOUT_INSERT` is active
    pub lineout_inserted: bool,
}

impl SwitchState {
    /// Overwrite the value of one tracked switch.
    pub fn apply(&mut self, code: SwitchCode, engaged: bool) {
        match code {
            SwitchCode::HeadphoneInsert => self.headphone_inserted = engaged,
            SwitchCode::MicrophoneInsert => self.microphone_inserted = engaged,
            SwitchCode::LineoutInsert => self.lineout_inserted = engaged,
        }
    }

    /// Current value of one tracked switch.
    #[must_use]
    pub fn get(&self, code: SwitchCode) -> bool {
        match code {
            SwitchCode::HeadphoneInsert => self.headphone_inserted,
            SwitchCode::MicrophoneInsert => self.microphone_inserted,
            SwitchCode::LineoutInsert => self.lineout_inserted,
        }
    }

    /// Whether any output plug is inserted, regardless of microphone contact.
    #[must_use]
    pub fn any_output_inserted(&self) -> bool {
        self.headphone_inserted || self.lineout_inserted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_all_released() {
        let state = SwitchState::default();
        for code in SwitchCode::ALL {
            assert!(!state.get(code));
        }
        assert!(!state.any_output_inserted());
    }

    #[test]
    fn test_apply_overwrites_single_switch() {
        let mut state = SwitchState::default();

        state.apply(SwitchCode::MicrophoneInsert, true);
        assert!(state.microphone_inserted);
        assert!(!state.headphone_inserted);
        assert!(!state.lineout_inserted);

        state.apply(SwitchCode::MicrophoneInsert, false);
        assert_eq!(state, SwitchState::default());
    }

    #[test]
    fn test_any_output_inserted() {
        let mut state = SwitchState::default();
        state.apply(SwitchCode::LineoutInsert, true);
        assert!(state.any_output_inserted());

        let mut state = SwitchState::default();
        state.apply(SwitchCode::HeadphoneInsert, true);
        assert!(state.any_output_inserted());

        // A bare microphone contact is not an output plug
        let mut state = SwitchState::default();
        state.apply(SwitchCode::MicrophoneInsert, true);
        assert!(!state.any_output_inserted());
    }
}
