//! Runtime hinter configuration, with a `const fn` builder so every
//! toggle can be composed at compile time.

/// Toggles for the grid-fitting pass. Every field defaults to its
/// always-on behavior; setting one disables that step.
#[derive(Copy, Clone, Debug)]
pub struct HintConfig {
    disable_weak_interpolation: bool,
    disable_strong_interpolation: bool,
    disable_metric_hinting: bool,
    disable_extremum_edges: bool,
}

impl Default for HintConfig {
    fn default() -> Self {
        HintConfig {
            disable_weak_interpolation: false,
            disable_strong_interpolation: false,
            disable_metric_hinting: false,
            disable_extremum_edges: false,
        }
    }
}

impl HintConfig {
    pub const fn new() -> HintConfig {
        HintConfig {
            disable_weak_interpolation: false,
            disable_strong_interpolation: false,
            disable_metric_hinting: false,
            disable_extremum_edges: false,
        }
    }

    pub const fn with_weak_interpolation_disabled(mut self, disabled: bool) -> HintConfig {
        self.disable_weak_interpolation = disabled;
        self
    }

    pub const fn with_strong_interpolation_disabled(mut self, disabled: bool) -> HintConfig {
        self.disable_strong_interpolation = disabled;
        self
    }

    pub const fn with_metric_hinting_disabled(mut self, disabled: bool) -> HintConfig {
        self.disable_metric_hinting = disabled;
        self
    }

    pub const fn with_extremum_edges_disabled(mut self, disabled: bool) -> HintConfig {
        self.disable_extremum_edges = disabled;
        self
    }

    pub const fn weak_interpolation_enabled(&self) -> bool {
        !self.disable_weak_interpolation
    }

    pub const fn strong_interpolation_enabled(&self) -> bool {
        !self.disable_strong_interpolation
    }

    pub const fn metric_hinting_enabled(&self) -> bool {
        !self.disable_metric_hinting
    }

    pub const fn extremum_edges_enabled(&self) -> bool {
        !self.disable_extremum_edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_every_pass() {
        let c = HintConfig::default();
        assert!(c.weak_interpolation_enabled());
        assert!(c.strong_interpolation_enabled());
        assert!(c.metric_hinting_enabled());
        assert!(c.extremum_edges_enabled());
    }

    #[test]
    fn builder_disables_one_pass_at_a_time() {
        let c = HintConfig::new().with_weak_interpolation_disabled(true);
        assert!(!c.weak_interpolation_enabled());
        assert!(c.strong_interpolation_enabled());
    }
}
