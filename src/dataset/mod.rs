pub mod artifact;
pub mod data_loader;
pub mod layout;
pub mod numeric;

pub use artifact::{read_artifact, write_artifact};
pub use data_loader::{build_records, build_records_from_path, BuildOutput, BuildReport};
pub use layout::ColumnLayout;
pub use numeric::parse_num;
