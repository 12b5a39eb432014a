//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped wiring and delegates rendering details to
//! `components`.

pub mod architecture;
