use super::load_config;
use anyhow::Result;
use std::path::PathBuf;

#[derive(clap::Args, Debug)]
#[command(disable_version_flag = true)]
pub struct Subcommand {
	/// Path to a configuration file (YAML format) with `server` and `cors` sections.
	/// CORS_* environment variables override the file.
	#[arg(short = 'c', long, value_name = "FILE")]
	pub config: Option<PathBuf>,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	let config = load_config(arguments.config.as_deref())?;
	println!("{}", config.cors);
	Ok(())
}
