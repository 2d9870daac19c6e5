mod choice;
mod collection_check_boxes;
mod collection_radio_buttons;
mod collection_select;
mod field_label;

pub use self::choice::*;
pub use self::collection_check_boxes::*;
pub use self::collection_radio_buttons::*;
pub use self::collection_select::*;
pub use self::field_label::*;
