use super::load_config;
use anyhow::Result;
use corsgate::server::ApiServer;
use std::path::PathBuf;
use tokio::time::{Duration, sleep};

#[derive(clap::Args, Debug)]
#[command(disable_version_flag = true, verbatim_doc_comment)]
pub struct Subcommand {
	/// Path to a configuration file (YAML format) to configure the server and CORS.
	/// CORS_* environment variables override the file; command line arguments override both.
	#[arg(short = 'c', long, value_name = "FILE", display_order = 0)]
	pub config: Option<PathBuf>,

	/// Serve via socket ip. Default: 0.0.0.0
	#[arg(short = 'i', long, display_order = 0)]
	pub ip: Option<String>,

	/// Serve via port. Default: 5050
	#[arg(short, long, display_order = 0)]
	pub port: Option<u16>,

	/// Shutdown server automatically after x milliseconds.
	#[arg(long, display_order = 4)]
	pub auto_shutdown: Option<u64>,
}

#[tokio::main]
pub async fn run(arguments: &Subcommand) -> Result<()> {
	let mut config = load_config(arguments.config.as_deref())?;
	config.server.override_optional_ip(&arguments.ip);
	config.server.override_optional_port(&arguments.port);

	let mut server = ApiServer::from_config(config);
	server.start().await?;

	if let Some(addr) = server.local_addr() {
		eprintln!("corsgate listening on http://{addr}");
	}

	if let Some(milliseconds) = arguments.auto_shutdown {
		sleep(Duration::from_millis(milliseconds)).await;
	} else {
		tokio::signal::ctrl_c().await?;
	}

	server.stop().await;

	Ok(())
}
