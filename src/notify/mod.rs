// Gateway module for notifications - follows the Train Station Pattern

mod term;

pub use term::{TermNavigator, TermNotifier};
