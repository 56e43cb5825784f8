#[path = "integration/cli.rs"]
mod cli;
#[path = "integration/pipeline.rs"]
mod pipeline;
#[path = "integration/properties.rs"]
mod properties;
#[path = "integration/scenarios.rs"]
mod scenarios;
