//! Shared numeric constants for the viewfinder crate.

// ── Scan frame ──────────────────────────────────────────────────

/// Smallest scan frame width in pixels.
pub const MIN_FRAME_WIDTH: u32 = 240;

/// Smallest scan frame height in pixels.
pub const MIN_FRAME_HEIGHT: u32 = 240;

/// Largest scan frame width in pixels (5/8 of 1920).
pub const MAX_FRAME_WIDTH: u32 = 1200;

/// Largest scan frame height in pixels (5/8 of 1080).
pub const MAX_FRAME_HEIGHT: u32 = 675;

/// Numerator of the viewport fraction targeted by the scan frame.
pub const FRAME_RATIO_NUM: u64 = 5;

/// Denominator of the viewport fraction targeted by the scan frame.
pub const FRAME_RATIO_DEN: u64 = 8;

// ── Laser ───────────────────────────────────────────────────────

/// Alpha values the laser pulses through, one step per rendered frame.
pub const SCANNER_ALPHA: [u8; SCANNER_ALPHA_LEN] = [0, 64, 128, 192, 255, 192, 128, 64];

/// Number of entries in [`SCANNER_ALPHA`].
pub const SCANNER_ALPHA_LEN: usize = 8;

/// Duration of one laser sweep from the top to the bottom of the frame.
pub const DEFAULT_CYCLE_MS: u64 = 2000;

/// Half the laser oval height in pixels.
pub const LASER_HALF_HEIGHT: f32 = 2.0;

/// Inset of the laser from the left frame edge.
pub const LASER_LEFT_INSET: f32 = 2.0;

/// Inset of the laser from the right frame edge.
pub const LASER_RIGHT_INSET: f32 = 1.0;

// ── Result points ───────────────────────────────────────────────

/// Maximum number of result points kept per generation.
pub const MAX_RESULT_POINTS: usize = 20;

/// Alpha of points reported since the previous frame.
pub const CURRENT_POINT_OPACITY: u8 = 0xA0;

/// Diameter of a result point dot in pixels.
pub const POINT_SIZE: f32 = 6.0;

// ── Theme ───────────────────────────────────────────────────────

/// Default mask color (`#60000000`): translucent black.
pub const DEFAULT_MASK_ARGB: u32 = 0x6000_0000;

/// Default laser color (`#ffcc0000`): opaque red.
pub const DEFAULT_LASER_ARGB: u32 = 0xFFCC_0000;
