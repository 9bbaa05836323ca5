use clap::Parser;
use fixtures::{run_server, EndpointScript, FixtureArgs, SubmitEndpoint, TerminalReply};

/// Mock submission endpoint for the input form
#[derive(Parser, Debug)]
#[clap(name = "submit-endpoint")]
struct Cli {
    #[clap(flatten)]
    common: FixtureArgs,

    /// Number of `progress` replies before the final one
    #[arg(long, default_value = "2")]
    progress_replies: u32,

    /// Retry delay sent with each `progress` reply, in milliseconds
    #[arg(long, default_value = "1000")]
    progress_timeout_ms: u64,

    /// Leave `timeout` out of `progress` replies
    #[arg(long)]
    omit_timeout: bool,

    /// Finish with an `error` reply carrying this reason instead of `success`
    #[arg(long)]
    error_reason: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let terminal = match args.error_reason {
        Some(reason) => TerminalReply::Error { reason },
        None => TerminalReply::Success,
    };

    let endpoint = SubmitEndpoint::new(EndpointScript {
        progress_replies: args.progress_replies,
        progress_timeout_ms: (!args.omit_timeout).then_some(args.progress_timeout_ms),
        terminal,
    });

    run_server(args.common, endpoint.router()).await
}
