//! Turn simulator composition for decision making and turn advancement.
//! This file wires focused engine submodules together.

use super::*;

mod advance;
mod decision;
