mod error;
mod generator;
mod parser;
mod spec;
pub mod traits;

pub use error::{ParseError, ParseErrorKind};
pub use generator::{generate_run_args, render_run_command};
pub use parser::parse_inspect_json;
pub use spec::{ContainerSpecification, RunOverrides};
pub use traits::ContainerRuntime;
