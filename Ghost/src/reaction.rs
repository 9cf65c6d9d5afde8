//! Reaction prompts
//!
//! A prompt offers up to nine numbered options and waits for one reaction:
//!
//! ```text
//! Idle --start--> Awaiting { options, deadline } --on_reaction--> Terminal(Chosen)
//!                                                --on_tick------> Terminal(TimedOut)
//!                                                --cancel-------> Terminal(Cancelled)
//! ```
//!
//! Time is passed in, never read, so the machine itself does not block.

use std::time::Duration;

use tokio::time::Instant;

/// Most options one prompt can offer (keycaps 1-9)
pub const MAX_OPTIONS: usize = 9;
/// Default time a prompt stays open
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const VARIATION_SELECTOR: char = '\u{FE0F}';
const COMBINING_KEYCAP: char = '\u{20E3}';

/// How a prompt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Zero-based index of the chosen option
    Chosen(usize),
    TimedOut,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReactionState<T> {
    Idle,
    Awaiting { options: Vec<T>, deadline: Instant },
    Terminal(Outcome),
}

/// Single-prompt state machine
#[derive(Debug, Clone)]
pub struct ReactionFlow<T> {
    state: ReactionState<T>,
    timeout: Duration,
}

impl<T: Clone> ReactionFlow<T> {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            state: ReactionState::Idle,
            timeout,
        }
    }

    #[must_use]
    pub fn state(&self) -> &ReactionState<T> {
        &self.state
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    #[must_use]
    pub fn is_awaiting(&self) -> bool {
        matches!(self.state, ReactionState::Awaiting { .. })
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        match &self.state {
            ReactionState::Awaiting { deadline, .. } => Some(*deadline),
            _ => None,
        }
    }

    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        match &self.state {
            ReactionState::Terminal(outcome) => Some(*outcome),
            _ => None,
        }
    }

    /// Open a prompt. Options past [`MAX_OPTIONS`] are not offered. A prompt
    /// still open is cancelled first; returns whether that happened.
    pub fn start(&mut self, mut options: Vec<T>, now: Instant) -> bool {
        let replaced = self.cancel();
        options.truncate(MAX_OPTIONS);
        self.state = ReactionState::Awaiting {
            options,
            deadline: now + self.timeout,
        };
        replaced
    }

    /// Feed a reaction. Returns the chosen option; anything that does not
    /// name an offered option leaves the prompt open.
    pub fn on_reaction(&mut self, reaction: &str, now: Instant) -> Option<(usize, T)> {
        let ReactionState::Awaiting { options, deadline } = &self.state else {
            return None;
        };
        if now >= *deadline {
            self.state = ReactionState::Terminal(Outcome::TimedOut);
            return None;
        }

        let index = parse_reaction(reaction)?;
        let chosen = options.get(index)?.clone();
        self.state = ReactionState::Terminal(Outcome::Chosen(index));
        Some((index, chosen))
    }

    /// Apply the timeout. Returns true on the transition to `TimedOut`.
    pub fn on_tick(&mut self, now: Instant) -> bool {
        match &self.state {
            ReactionState::Awaiting { deadline, .. } if now >= *deadline => {
                self.state = ReactionState::Terminal(Outcome::TimedOut);
                true
            }
            _ => false,
        }
    }

    /// Cancel an open prompt. Returns true if one was open.
    pub fn cancel(&mut self) -> bool {
        if self.is_awaiting() {
            self.state = ReactionState::Terminal(Outcome::Cancelled);
            true
        } else {
            false
        }
    }
}

/// Keycap emoji for a zero-based option index (`0` -> 1️⃣)
#[must_use]
pub fn keycap(index: usize) -> String {
    format!("{}{VARIATION_SELECTOR}{COMBINING_KEYCAP}", index + 1)
}

/// Zero-based option index of a reaction: a keycap emoji or a plain digit
#[must_use]
pub fn parse_reaction(reaction: &str) -> Option<usize> {
    let digits = reaction
        .trim()
        .trim_end_matches(COMBINING_KEYCAP)
        .trim_end_matches(VARIATION_SELECTOR);
    match digits.parse::<usize>() {
        Ok(n @ 1..=MAX_OPTIONS) => Some(n - 1),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flow() -> ReactionFlow<&'static str> {
        ReactionFlow::new(DEFAULT_TIMEOUT)
    }

    #[test]
    fn test_parse_reaction() {
        assert_eq!(parse_reaction("1️⃣"), Some(0));
        assert_eq!(parse_reaction(&keycap(4)), Some(4));
        assert_eq!(parse_reaction(" 3 "), Some(2));
        assert_eq!(parse_reaction("0"), None);
        assert_eq!(parse_reaction("10"), None);
        assert_eq!(parse_reaction("👍"), None);
    }

    #[test]
    fn test_choose_option() {
        let now = Instant::now();
        let mut flow = flow();
        assert_eq!(flow.state(), &ReactionState::Idle);
        assert!(!flow.start(vec!["Sunshot", "Sunshot (Adept)"], now));
        assert_eq!(flow.deadline(), Some(now + DEFAULT_TIMEOUT));

        // not an offered option: still waiting
        assert_eq!(flow.on_reaction("3️⃣", now), None);
        assert!(flow.is_awaiting());

        assert_eq!(flow.on_reaction("2️⃣", now), Some((1, "Sunshot (Adept)")));
        assert_eq!(flow.outcome(), Some(Outcome::Chosen(1)));
        // terminal: later reactions are ignored
        assert_eq!(flow.on_reaction("1️⃣", now), None);
    }

    #[test]
    fn test_timeout() {
        let now = Instant::now();
        let mut flow = flow();
        flow.start(vec!["Sunshot"], now);

        assert!(!flow.on_tick(now + Duration::from_secs(59)));
        assert!(flow.on_tick(now + DEFAULT_TIMEOUT));
        assert_eq!(flow.outcome(), Some(Outcome::TimedOut));
        assert!(!flow.on_tick(now + Duration::from_secs(120)));
    }

    #[test]
    fn test_late_reaction_times_out() {
        let now = Instant::now();
        let mut flow = flow();
        flow.start(vec!["Sunshot"], now);
        assert_eq!(flow.on_reaction("1", now + Duration::from_secs(61)), None);
        assert_eq!(flow.outcome(), Some(Outcome::TimedOut));
    }

    #[test]
    fn test_restart_cancels() {
        let now = Instant::now();
        let mut flow = flow();
        flow.start(vec!["a"], now);
        assert!(flow.start(vec!["b"], now));
        assert!(flow.cancel());
        assert_eq!(flow.outcome(), Some(Outcome::Cancelled));
        assert!(!flow.cancel());
    }

    #[test]
    fn test_options_capped() {
        let now = Instant::now();
        let mut flow: ReactionFlow<usize> = ReactionFlow::new(DEFAULT_TIMEOUT);
        flow.start((0..12).collect(), now);
        match flow.state() {
            ReactionState::Awaiting { options, .. } => assert_eq!(options.len(), MAX_OPTIONS),
            other => panic!("expected awaiting, got {other:?}"),
        }
    }
}
