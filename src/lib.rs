pub mod cli;
pub mod domain;
pub mod infra;
pub mod logging;
pub mod services;

// Make test_support available for integration tests
pub mod test_support;

pub use domain::{
    ContainerRuntime, ContainerSpecification, ParseError, ParseErrorKind, RunOverrides,
    generate_run_args, parse_inspect_json, render_run_command,
};
pub use infra::{CliRuntime, Settings};
pub use services::{ContainerService, DevContainerOrchestrator, DevContainerRequest};
