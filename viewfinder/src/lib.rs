//! Viewfinder overlay for a barcode-scanning camera preview.
//!
//! The overlay dims everything outside a centered scan frame and sweeps a
//! pulsing laser line down the frame. It never touches pixels itself: each
//! tick produces a reusable list of [`render::DrawCommand`]s that the host
//! surface replays onto its own canvas. Camera capture and decoding live
//! elsewhere; the decoder only talks to the overlay through
//! [`render::ResultPointSink`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`overlay`] | Top-level [`overlay::ViewfinderOverlay`] with attach/detach lifecycle |
//! | [`geometry`] | Viewport, scan frame sizing and rectangle types |
//! | [`clock`] | Eased sawtooth animation clock and alpha cycle |
//! | [`render`] | Draw commands, the reusable draw list and the renderer |
//! | [`scheduler`] | Display-refresh subscription registry |
//! | [`color`] | ARGB colors and the overlay style |
//! | [`consts`] | Shared numeric constants (frame bounds, alpha table, etc.) |

pub mod clock;
pub mod color;
pub mod consts;
pub mod geometry;
pub mod overlay;
pub mod render;
pub mod scheduler;
