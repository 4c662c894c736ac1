use clap::{Args, Parser, Subcommand};
use client::DEFAULT_ENDPOINT;
use std::path::PathBuf;
use vision::{LineBreaks, MAX_PAYLOAD_BYTES, PrepareOptions, TARGET_WIDTH};

#[derive(Parser, Debug)]
#[command(author, version, about = "Describe faces or objects in a photo with Cloud Vision")]
pub struct Cli {
    /// Log pipeline steps at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Send an image to Cloud Vision and print the summary
    Annotate(AnnotateArgs),
    /// Print the request body for an image without sending it
    Request {
        image: PathBuf,
        #[command(flatten)]
        prepare: PrepareArgs,
    },
    /// Summarize a saved annotate response (`-` reads stdin)
    Interpret { response: PathBuf },
}

#[derive(Args, Debug)]
pub struct AnnotateArgs {
    pub image: PathBuf,
    #[arg(long, env = "GOOGLE_VISION_API_KEY", hide_env_values = true)]
    pub api_key: String,
    #[arg(long, env = "VISION_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,
    /// iOS bundle identifier the key is restricted to
    #[arg(long, env = "VISION_BUNDLE_ID", conflicts_with = "android_package")]
    pub bundle_id: Option<String>,
    /// Android package name the key is restricted to
    #[arg(long, env = "VISION_ANDROID_PACKAGE")]
    pub android_package: Option<String>,
    /// SHA-1 fingerprint of the Android signing certificate
    #[arg(long, env = "VISION_ANDROID_CERT", requires = "android_package")]
    pub android_cert: Option<String>,
    #[arg(long, env = "VISION_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
    #[command(flatten)]
    pub prepare: PrepareArgs,
}

#[derive(Args, Debug, Clone, Copy)]
pub struct PrepareArgs {
    /// PNG size above which the image is downscaled once
    #[arg(long, default_value_t = MAX_PAYLOAD_BYTES)]
    pub max_bytes: usize,
    #[arg(long, default_value_t = TARGET_WIDTH)]
    pub target_width: u32,
    /// Break the base64 text with a carriage return every N characters
    #[arg(long, value_name = "N")]
    pub cr_lines: Option<usize>,
}

impl From<PrepareArgs> for PrepareOptions {
    fn from(args: PrepareArgs) -> Self {
        PrepareOptions {
            max_bytes: args.max_bytes,
            target_width: args.target_width,
            line_breaks: args
                .cr_lines
                .map_or(LineBreaks::None, |width| LineBreaks::CarriageReturn { width }),
        }
    }
}
