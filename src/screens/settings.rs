//! Account settings.

use crate::app::AuthGate;

/// Settings screen controller. Stateless; reads the profile from the gate.
#[derive(Debug, Clone, Copy, Default)]
pub struct SettingsScreen;

impl SettingsScreen {
    /// Name shown under the avatar.
    #[must_use]
    pub fn display_name(gate: &AuthGate) -> String {
        gate.user()
            .map_or_else(|| "User".to_string(), |u| u.username)
    }

    /// Single-letter avatar, also used by the navbar user button.
    #[must_use]
    pub fn avatar_initial(gate: &AuthGate) -> char {
        gate.user()
            .and_then(|u| u.username.chars().next())
            .unwrap_or('U')
    }

    /// Signs out; the gate redirects to login.
    pub fn sign_out(gate: &mut AuthGate) {
        gate.sign_out();
    }
}
