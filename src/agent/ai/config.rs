//! Search configuration.
//!
//! Every switch is independent. [`SearchConfig::default`] matches the setup
//! that solves the preset puzzles fastest: pruning, exact caching and zero
//! evaluation on, ordering and warm-up off.

/// How leaf positions are scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalMode {
    /// Material plus mobility for unfinished games
    Full,
    /// Unfinished games score 0, only results count
    Zero,
}

/// Switches threaded through every recursive search call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Stop exploring a node once its bound proves the rest irrelevant
    pub alpha_beta: bool,
    /// Reuse authoritative results from the exact table
    pub hashing: bool,
    /// Score unfinished leaves as 0
    pub zero_eval: bool,
    /// Order moves by cheap one-ply estimates before exploring them
    pub sorting: bool,
    /// Run non-authoritative shallower searches before each real one
    pub deepening: bool,
    /// Only reuse exact entries computed at least as deep as requested.
    /// Off reuses an entry whatever depth it was computed at.
    pub depth_aware_cache: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            alpha_beta: true,
            hashing: true,
            zero_eval: true,
            sorting: false,
            deepening: false,
            depth_aware_cache: false,
        }
    }
}

impl SearchConfig {
    /// Plain minimax: every switch off.
    pub fn plain() -> Self {
        Self {
            alpha_beta: false,
            hashing: false,
            zero_eval: false,
            sorting: false,
            deepening: false,
            depth_aware_cache: false,
        }
    }

    pub fn with_alpha_beta(mut self, on: bool) -> Self {
        self.alpha_beta = on;
        self
    }

    pub fn with_hashing(mut self, on: bool) -> Self {
        self.hashing = on;
        self
    }

    pub fn with_zero_eval(mut self, on: bool) -> Self {
        self.zero_eval = on;
        self
    }

    pub fn with_sorting(mut self, on: bool) -> Self {
        self.sorting = on;
        self
    }

    pub fn with_deepening(mut self, on: bool) -> Self {
        self.deepening = on;
        self
    }

    pub fn with_depth_aware_cache(mut self, on: bool) -> Self {
        self.depth_aware_cache = on;
        self
    }

    pub fn eval_mode(&self) -> EvalMode {
        if self.zero_eval {
            EvalMode::Zero
        } else {
            EvalMode::Full
        }
    }
}
