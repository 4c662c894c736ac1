//! Command line front end: load a photo, ask Cloud Vision about it, and
//! print what it saw.

mod cli;
mod logging;

pub use cli::{AnnotateArgs, Cli, Command, PrepareArgs};
pub use logging::init_logging;

use anyhow::{Context, Result};
use client::{ClientConfig, ClientIdentity, VisionClient};
use image::DynamicImage;
use std::io::{self, Read};
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{debug, info, warn};
use vision::{AnnotateRequest, PrepareOptions, Summary};

/// Execute the parsed command.
pub async fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Command::Annotate(args) => annotate(args).await,
        Command::Request { image, prepare } => {
            println!("{}", request_body(&image, prepare.into())?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Interpret { response } => {
            let raw = read_input(&response)?;
            let summary = vision::interpret(&raw)
                .with_context(|| format!("could not interpret {}", response.display()))?;
            Ok(report(&summary))
        }
    }
}

async fn annotate(args: AnnotateArgs) -> Result<ExitCode> {
    let image = load_image(&args.image)?;
    let client = VisionClient::new(client_config(&args))?;
    info!(image = %args.image.display(), "annotating");
    let summary = client
        .annotate_until(image, cancel_on(tokio::signal::ctrl_c()))
        .await?;
    Ok(report(&summary))
}

/// Resolve once `signal` fires. If the handler could not be installed the
/// returned future never resolves, so the request runs without cancellation.
pub async fn cancel_on<F>(signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    if let Err(e) = signal.await {
        warn!(error = %e, "ctrl-c handler unavailable, cancellation disabled");
        std::future::pending::<()>().await;
    }
}

/// Build the client configuration described by the command line.
pub fn client_config(args: &AnnotateArgs) -> ClientConfig {
    let mut config = ClientConfig::new(args.api_key.clone())
        .with_endpoint(args.endpoint.clone())
        .with_timeout(Duration::from_secs(args.timeout_secs));
    config.prepare = args.prepare.into();
    if let Some(bundle) = &args.bundle_id {
        config = config.with_identity(ClientIdentity::IosBundle(bundle.clone()));
    } else if let Some(package) = &args.android_package {
        config = config.with_identity(ClientIdentity::Android {
            package: package.clone(),
            cert: args.android_cert.clone(),
        });
    }
    config
}

/// Pretty-printed request body for the image at `path`.
pub fn request_body(path: &Path, opts: PrepareOptions) -> Result<String> {
    let image = load_image(path)?;
    let payload = vision::prepare_with(&image, &opts)?;
    debug!(downscaled = payload.downscaled, png_len = payload.png_len, "prepared payload");
    Ok(serde_json::to_string_pretty(&AnnotateRequest::from(payload))?)
}

fn load_image(path: &Path) -> Result<DynamicImage> {
    image::open(path).with_context(|| format!("failed to read image {}", path.display()))
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    if path == Path::new("-") {
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf)?;
        return Ok(buf);
    }
    std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Print the summary; API errors exit non-zero.
fn report(summary: &Summary) -> ExitCode {
    println!("{summary}");
    if summary.is_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
