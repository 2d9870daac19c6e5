/*!
Collection inputs render a select, a group of radio buttons or a group of check boxes from a collection of items.

The input decides which accessor produces the visible label of each item and which produces the submitted value, then hands everything to a [`FormBuilder`]. Pairs use their first and last components, basic values are stringified, and domain objects are probed with the candidate method names from [`Config`].
*/

mod accessor;
mod builder;
mod cache;
mod collection_input;
mod config;
mod detect;
mod error;
mod i18n;
mod options;
mod value;

pub use self::accessor::*;
pub use self::builder::*;
pub use self::cache::*;
pub use self::collection_input::*;
pub use self::config::*;
pub use self::detect::*;
pub use self::error::*;
pub use self::i18n::*;
pub use self::options::*;
pub use self::value::*;
