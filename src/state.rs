//! Assistant-orb presentation state.

/// Where the orb sits on screen.
///
/// Centered while the desktop is empty; docked to the chrome strip as soon
/// as any window is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrbPlacement {
    #[default]
    Centered,
    Docked,
}

#[derive(Debug, Default, Clone)]
pub struct OrbState {
    placement: OrbPlacement,
    listening: bool,
    status_text: String,
}

impl OrbState {
    pub fn new() -> Self {
        Self {
            placement: OrbPlacement::Centered,
            listening: false,
            status_text: "STATUS: IDLE".to_string(),
        }
    }

    pub fn placement(&self) -> OrbPlacement {
        self.placement
    }

    pub fn dock(&mut self) {
        self.placement = OrbPlacement::Docked;
    }

    pub fn undock(&mut self) {
        self.placement = OrbPlacement::Centered;
    }

    pub fn listening(&self) -> bool {
        self.listening
    }

    pub fn set_listening(&mut self, listening: bool) {
        if self.listening == listening {
            return;
        }
        self.listening = listening;
        self.set_status(if listening {
            "LISTENING..."
        } else {
            "STATUS: IDLE"
        });
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    pub fn set_status(&mut self, text: &str) {
        self.status_text = text.to_uppercase();
    }
}
