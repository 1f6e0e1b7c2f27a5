mod clause;
mod common;
mod strength;
