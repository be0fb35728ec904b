//! # zcalc
//!
//! Core of a scientific calculator widget:
//!
//! * [`calculator`] evaluates finished expression strings such as
//!   `2*(3+4)^2` or `sin(30)+ln(e)` through a closed arithmetic AST.
//! * [`session`] is the keystroke-driven state machine a UI feeds with
//!   digit, operator, function and memory keys and renders from.
//! * [`keymap`] maps keyboard keys and named tokens onto session inputs.
//!
//! ```
//! use zcalc::keymap::parse_token;
//! use zcalc::session::CalculatorSession;
//!
//! let mut session = CalculatorSession::new();
//! for key in "7 + 3 * 2 =".split_whitespace() {
//!     session.apply(parse_token(key).unwrap());
//! }
//! assert_eq!(session.display_text(), "13");
//! ```

pub mod calculator;
pub mod config;
pub mod keymap;
pub mod session;

pub use calculator::{AngleMode, CalcError, evaluate};
pub use config::CalculatorConfig;
pub use session::{CalculatorSession, Input, Projection};
