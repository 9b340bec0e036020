//! Unit tests for the shape interaction machine.
//!
//! These tests drive geometries through pointer sequences and verify the
//! resulting stages, control points, hit areas and recorded draw commands.

mod ellipse_tests;
mod machine_tests;
