use crate::args::{CommentSubcommand, PostCommentArgs};
use miette::IntoDiagnostic;
use rednote_api::{
    consts::DEFAULT_HOST, ApiResponse, CommentParams, Dispatcher, ErrorKind, HeaderTemplate,
};
use rednote_config::Configuration;
use rednote_http_client::Client;
use rednote_signer::CommandSigner;

fn diagnose(error: rednote_api::Error) -> miette::Report {
    let help = match error.kind() {
        ErrorKind::MissingCredentials => {
            "copy the `Cookie` header of a logged-in browser session into REDNOTE_COOKIE"
        }
        ErrorKind::SignerUnavailable => {
            "check the `[signer]` section of the configuration and that the signing script runs on its own"
        }
        ErrorKind::NetworkFailure => "check your connection or raise `request-timeout-secs`",
        ErrorKind::UnexpectedResponse => {
            "the session cookie might be expired or the request got flagged. Try logging in again"
        }
        ErrorKind::InvalidRequest => return miette::Report::from_err(error),
    };

    miette::miette!(help = help, "{error}")
}

fn api_host(config: &Configuration) -> &str {
    config.api.host.as_deref().unwrap_or(DEFAULT_HOST)
}

fn build_dispatcher(config: &Configuration) -> miette::Result<Dispatcher<CommandSigner>> {
    let http_client = Client::builder()
        .content_length_limit(config.http_client.content_length_limit)
        .timeout(config.http_client.request_timeout())
        .build()
        .into_diagnostic()?;

    let signer = CommandSigner::builder()
        .program(config.signer.program.to_string())
        .args(
            config
                .signer
                .args
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>(),
        )
        .timeout(config.signer.timeout())
        .build();

    let mut header_template = HeaderTemplate::default();
    if let Some(ref user_agent) = config.api.user_agent {
        header_template = header_template
            .with_user_agent(user_agent)
            .into_diagnostic()?;
    }

    Ok(Dispatcher::builder()
        .header_template(header_template)
        .host(api_host(config))
        .http_client(http_client)
        .signer(signer)
        .build())
}

async fn post(args: PostCommentArgs, config: &Configuration, cookie: &str) -> miette::Result<()> {
    let dispatcher = build_dispatcher(config)?;
    let params = CommentParams::builder()
        .note_id(args.note_id)
        .content(args.content)
        .at_users(args.at_users)
        .build();

    let response: ApiResponse = dispatcher
        .post_comment(&params, cookie)
        .await
        .map_err(diagnose)?;

    println!("{}", sonic_rs::to_string_pretty(&response).into_diagnostic()?);

    if !response.success {
        miette::bail!(
            "API rejected the comment (code {}): {}",
            response.code,
            response.msg.as_deref().unwrap_or("no message")
        );
    }

    info!(note_id = %params.note_id, "comment posted");

    Ok(())
}

pub async fn handle(
    cmd: CommentSubcommand,
    config: &Configuration,
    cookie: &str,
) -> miette::Result<()> {
    match cmd {
        CommentSubcommand::Post(args) => post(args, config, cookie).await,
    }
}
