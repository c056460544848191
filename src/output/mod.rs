pub mod terminal;

pub use terminal::{print_package_summary, ContainerSummary};
