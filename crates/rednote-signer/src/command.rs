use crate::{
    error::{Error, Result},
    SignRequest, SignedHeaders, Signer,
};
use std::{io, process::Stdio, time::Duration};
use tokio::{io::AsyncWriteExt, process::Command};
use typed_builder::TypedBuilder;

/// Default time the signer process gets to answer
pub const DEFAULT_SIGNER_TIMEOUT: Duration = Duration::from_secs(10);

/// Signer delegating to an external program
///
/// The program receives the [`SignRequest`] as a JSON document on stdin and has to write
/// `{"X-s": "...", "X-t": <integer>}` to stdout before exiting successfully.
/// A fresh process is spawned for every request.
#[derive(Clone, Debug, TypedBuilder)]
pub struct CommandSigner {
    /// Program to execute (for example `node`)
    #[builder(setter(into))]
    program: String,

    /// Arguments passed to the program (for example the path to the signing script)
    #[builder(default, setter(into))]
    args: Vec<String>,

    /// Time the program gets to produce the tokens
    #[builder(default = DEFAULT_SIGNER_TIMEOUT)]
    timeout: Duration,
}

impl CommandSigner {
    #[instrument(skip_all, fields(program = %self.program, path = %request.path))]
    async fn run(&self, request: &SignRequest<'_>) -> Result<SignedHeaders> {
        let input = sonic_rs::to_vec(request).map_err(Error::Encode)?;

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(Error::Spawn)?;

        let stdin = child.stdin.take();
        let exchange = async move {
            if let Some(mut stdin) = stdin {
                // The program might not care about its input at all and exit early.
                // The exit status decides in that case.
                match stdin.write_all(&input).await {
                    Ok(()) => {}
                    Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {}
                    Err(err) => return Err(Error::Io(err)),
                }
            }

            child.wait_with_output().await.map_err(Error::Io)
        };

        let output = tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| Error::Timeout(self.timeout))??;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_owned();
            return Err(Error::Exit {
                status: output.status,
                stderr,
            });
        }

        let signed_headers: SignedHeaders =
            sonic_rs::from_slice(&output.stdout).map_err(Error::InvalidOutput)?;
        debug!(x_t = signed_headers.x_t, "signer produced tokens");

        Ok(signed_headers)
    }
}

impl Signer for CommandSigner {
    async fn sign(&self, request: &SignRequest<'_>) -> Result<SignedHeaders> {
        self.run(request).await
    }
}
