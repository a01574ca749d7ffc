use std::fmt;

use super::eagerness::Eagerness;
use super::rule::Action;

/// What the host would do with one link: the strongest eagerness among the
/// matching rules of each action, or `None` when no rule of that action
/// matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[must_use]
pub struct Verdict {
    prefetch: Option<Eagerness>,
    prerender: Option<Eagerness>,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |e: Option<Eagerness>| e.map_or("none", Eagerness::as_str);
        write!(
            f,
            "prefetch = {}, prerender = {}",
            show(self.prefetch),
            show(self.prerender)
        )
    }
}

impl Verdict {
    pub fn new(prefetch: Option<Eagerness>, prerender: Option<Eagerness>) -> Self {
        Self {
            prefetch,
            prerender,
        }
    }

    #[must_use]
    pub fn prefetch(&self) -> Option<Eagerness> {
        self.prefetch
    }

    #[must_use]
    pub fn prerender(&self) -> Option<Eagerness> {
        self.prerender
    }

    #[must_use]
    pub fn get(&self, action: Action) -> Option<Eagerness> {
        match action {
            Action::Prefetch => self.prefetch,
            Action::Prerender => self.prerender,
        }
    }

    /// True when no rule matched.
    #[must_use]
    pub fn is_none(&self) -> bool {
        self.prefetch.is_none() && self.prerender.is_none()
    }
}
