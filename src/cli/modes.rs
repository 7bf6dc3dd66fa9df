//! Modes command implementation

use std::process::ExitCode;

use crate::blend::BlendMode;
use crate::composite::CompositeOperator;

use super::EXIT_SUCCESS;

/// Execute the modes command
pub fn run_modes(json: bool) -> ExitCode {
    if json {
        let modes: Vec<_> = BlendMode::ALL
            .iter()
            .map(|m| serde_json::json!({ "name": m.name(), "separable": m.is_separable() }))
            .collect();
        let operators: Vec<_> = CompositeOperator::ALL.iter().map(|op| op.name()).collect();
        println!("{}", serde_json::json!({ "modes": modes, "operators": operators }));
        return ExitCode::from(EXIT_SUCCESS);
    }

    println!("Blend modes:");
    for mode in BlendMode::ALL {
        let kind = if mode.is_separable() { "separable" } else { "non-separable" };
        println!("  {:<12} {}", mode.name(), kind);
    }
    println!();
    println!("Compositing operators:");
    for op in CompositeOperator::ALL {
        println!("  {}", op.name());
    }

    ExitCode::from(EXIT_SUCCESS)
}
