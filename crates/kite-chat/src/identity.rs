//! Session and user identifiers, generated once per process

use chrono::Utc;
use kite_agent::AgentContext;
use rand::Rng;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 7;

/// Identifiers sent with every agent call.
///
/// Created once when the chat starts and never regenerated; clearing the
/// conversation keeps the same identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    session_id: String,
    user_id: String,
}

impl SessionIdentity {
    /// Generate a fresh identity from the current clock
    pub fn generate() -> Self {
        let now = Utc::now().timestamp_millis();
        let mut rng = rand::thread_rng();
        Self {
            session_id: make_id("session", now, &mut rng),
            user_id: make_id("user", now, &mut rng),
        }
    }

    /// Use known identifiers (resumed or test sessions)
    pub fn from_parts(session_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            user_id: user_id.into(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Per-request context for the agent call
    pub fn context(&self) -> AgentContext {
        AgentContext {
            user_id: self.user_id.clone(),
            session_id: self.session_id.clone(),
        }
    }
}

/// `<prefix>_<millis>_<7 base36 chars>`
fn make_id<R: Rng>(prefix: &str, millis: i64, rng: &mut R) -> String {
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("{}_{}_{}", prefix, millis, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_id_shape(id: &str, prefix: &str) {
        let parts: Vec<&str> = id.split('_').collect();
        assert_eq!(parts.len(), 3, "unexpected id: {}", id);
        assert_eq!(parts[0], prefix);
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), SUFFIX_LEN);
        assert!(parts[2]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_generated_shape() {
        let identity = SessionIdentity::generate();
        assert_id_shape(identity.session_id(), "session");
        assert_id_shape(identity.user_id(), "user");
    }

    #[test]
    fn test_context_carries_ids() {
        let identity = SessionIdentity::from_parts("session_1_aaaaaaa", "user_1_bbbbbbb");
        let context = identity.context();
        assert_eq!(context.session_id, "session_1_aaaaaaa");
        assert_eq!(context.user_id, "user_1_bbbbbbb");
    }

    #[test]
    fn test_generated_identities_differ() {
        let a = SessionIdentity::generate();
        let b = SessionIdentity::generate();
        // Same millisecond is possible, so only the random suffix guarantees this
        assert_ne!(a.session_id(), b.session_id());
    }
}
