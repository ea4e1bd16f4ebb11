//! Concrete convergence rules and table builder.
//!
//! Three plain `fn` guards, no closures or heap. Order matters: turn-on is
//! checked before high-power so an `Off` unit is always switched on first.

use super::context::ControlContext;
use super::{OperatingState, TransitionRule, RULE_COUNT};
use crate::ir::AcCommand;

/// Build the rule table. Called once when the service is constructed.
pub fn build_rule_table() -> [TransitionRule; RULE_COUNT] {
    [
        TransitionRule {
            name: "turn-on",
            guard: needs_turn_on,
            command: AcCommand::turn_on,
            next: OperatingState::On,
        },
        TransitionRule {
            name: "high-power",
            guard: needs_high_power,
            command: AcCommand::high_power,
            next: OperatingState::HighPower,
        },
        TransitionRule {
            name: "turn-off",
            guard: needs_turn_off,
            command: AcCommand::turn_off,
            next: OperatingState::Off,
        },
    ]
}

fn needs_turn_on(ctx: &ControlContext) -> bool {
    ctx.target > OperatingState::Off && ctx.current < OperatingState::On
}

fn needs_high_power(ctx: &ControlContext) -> bool {
    ctx.target > OperatingState::On && ctx.current < OperatingState::HighPower
}

fn needs_turn_off(ctx: &ControlContext) -> bool {
    ctx.target == OperatingState::Off && ctx.current != OperatingState::Off
}
