use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    research_agent::infra::logging::init();
    research_agent::cli::run().await
}
