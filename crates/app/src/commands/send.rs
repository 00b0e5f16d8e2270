use std::process::ExitCode;

use courier_domain::RequestState;

use crate::cli::SendArgs;
use crate::commands::output::{print_request_error, print_response};
use crate::context::CliContext;

pub async fn run(ctx: &mut CliContext, args: SendArgs) -> anyhow::Result<ExitCode> {
    args.request.apply(ctx.session_mut().composer_mut());
    Ok(send_current(ctx, args.include).await)
}

/// Sends whatever the composer holds and prints the outcome.
///
/// Any HTTP status is a success; only a request that produced no response
/// exits non-zero.
pub async fn send_current(ctx: &mut CliContext, include_headers: bool) -> ExitCode {
    let session = ctx.session_mut();
    let state = session.send().await.clone();

    if let Some(warning) = session.storage_warning() {
        eprintln!("warning: history was not saved: {warning}");
    }

    match state {
        RequestState::Success { response } => {
            print_response(&response, include_headers);
            ExitCode::SUCCESS
        }
        RequestState::Error { kind, message } => {
            print_request_error(kind, &message);
            ExitCode::FAILURE
        }
        RequestState::Idle | RequestState::Loading => ExitCode::FAILURE,
    }
}
