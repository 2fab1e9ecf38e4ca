//! Progress reporting while the opponent replies and the judge evaluates

pub mod reporter;
