pub mod delimiter;
pub mod error;
pub mod grid;
pub mod names;
pub mod reader;

pub use delimiter::sniff_delimiter;
pub use error::IngestError;
pub use grid::Grid;
pub use names::load_name_lists;
pub use reader::{HeaderMode, IngestOptions, read_grid, read_grid_with_options};
