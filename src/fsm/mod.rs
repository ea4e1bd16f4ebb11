//! Operating-state model and the function-pointer transition table.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  TransitionTable (evaluated top to bottom, first match wins) │
//! │  ┌────────────┬─────────────────────────┬──────────┬───────┐ │
//! │  │ name       │ guard                   │ command  │ next  │ │
//! │  ├────────────┼─────────────────────────┼──────────┼───────┤ │
//! │  │ turn-on    │ target > Off, cur < On  │ TurnOn   │ On    │ │
//! │  │ high-power │ target > On, cur < HP   │ HighPower│ HP    │ │
//! │  │ turn-off   │ target = Off, cur ≠ Off │ TurnOff  │ Off   │ │
//! │  └────────────┴─────────────────────────┴──────────┴───────┘ │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The table only *selects* a step. The caller transmits the rule's command
//! and commits `next` to the context afterwards, so the current state never
//! moves ahead of what the unit was actually sent. Every step moves one
//! level, so the worst case (Off → HighPower) takes two polls.

pub mod context;
pub mod rules;

use context::ControlContext;

use crate::config::SystemConfig;
use crate::error::ConfigError;
use crate::ir::AcCommand;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Ordered AC operating level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum OperatingState {
    Off = 0,
    On = 1,
    HighPower = 2,
    /// Manual override target. Never a current state.
    Requested = 3,
}

impl OperatingState {
    pub const COUNT: usize = 4;

    /// Convert a raw level back to a state.
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            0 => Some(Self::Off),
            1 => Some(Self::On),
            2 => Some(Self::HighPower),
            3 => Some(Self::Requested),
            _ => None,
        }
    }

    pub const fn level(self) -> u8 {
        self as u8
    }

    /// Highest level the unit can actually be in for this target.
    /// `Requested` has no transmit step of its own and rests at `HighPower`.
    pub const fn resting(self) -> Self {
        match self {
            Self::Requested => Self::HighPower,
            other => other,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Off => "Off",
            Self::On => "On",
            Self::HighPower => "HighPower",
            Self::Requested => "Requested",
        }
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Returns `true` when the rule applies to the context's current/target pair.
pub type GuardFn = fn(&ControlContext) -> bool;

/// Builds the command to transmit. Fails only on configuration errors.
pub type CommandFn = fn(&SystemConfig) -> Result<AcCommand, ConfigError>;

// ---------------------------------------------------------------------------
// Rule descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for one convergence step.
pub struct TransitionRule {
    pub name: &'static str,
    pub guard: GuardFn,
    pub command: CommandFn,
    /// State committed after the command was sent.
    pub next: OperatingState,
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

pub const RULE_COUNT: usize = 3;

/// Ordered convergence rules.
pub struct TransitionTable {
    rules: [TransitionRule; RULE_COUNT],
}

impl TransitionTable {
    pub fn new(rules: [TransitionRule; RULE_COUNT]) -> Self {
        Self { rules }
    }

    /// The turn-on / high-power / turn-off table.
    pub fn standard() -> Self {
        Self::new(rules::build_rule_table())
    }

    /// First rule whose guard accepts the context, or `None` when the
    /// controller has already converged.
    pub fn select(&self, ctx: &ControlContext) -> Option<&TransitionRule> {
        if ctx.is_converged() {
            return None;
        }
        self.rules.iter().find(|rule| (rule.guard)(ctx))
    }
}
