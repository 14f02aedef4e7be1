use crate::prelude::{eprintln, println, *};

use super::{request_url_data, ServiceOptions};

#[derive(Debug, clap::Args, Clone)]
pub struct UrlOptions {
    /// Article URL to sign
    #[clap(env = "READABILITY_URL")]
    pub url: String,

    #[clap(flatten)]
    pub service: ServiceOptions,
}

pub fn run(options: UrlOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("Building parser URL for: {}", options.url);
    }

    println!("{}", request_url_data(options.url, options.service)?);

    Ok(())
}
