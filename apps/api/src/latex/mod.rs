// LaTeX serialization: escaping plus the pure document renderer.
// Everything here is a function of its input — no state, no I/O.

pub mod escape;
pub mod renderer;

pub use renderer::render;
