//! Application module: the view state wrapped around a playback session and
//! the mapping from terminal input to actions.

mod input;
mod model;

pub use input::{Action, action_for_key, action_for_mouse};
pub use model::*;
