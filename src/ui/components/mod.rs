mod detail_card;
mod input;
mod list;
mod media_row;
mod spinner;

pub use detail_card::{truncate_str, DetailCard};
pub use input::Input;
pub use list::SelectableList;
pub use media_row::media_spans;
pub use spinner::Spinner;
