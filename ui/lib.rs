//! Markup for the collection form controls. Each component renders a plain server side control, with no client script attached.

mod form;

pub use self::form::*;
