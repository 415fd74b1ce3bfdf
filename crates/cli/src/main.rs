use clap::Parser;
use resume_pdf::cli::Cli;
use resume_pdf::{ChromiumEngine, ExportConfig, export, logging};
use tracing::error;

#[tokio::main]
async fn main() {
	let _ = Cli::parse();
	logging::init_logging();

	let result = match ExportConfig::from_env() {
		Ok(config) => {
			let engine = ChromiumEngine::new(config.executable.clone());
			export(&engine, &config).await
		}
		Err(err) => Err(err),
	};

	match result {
		Ok(report) => {
			let name = report
				.output
				.file_name()
				.map(|name| name.to_string_lossy().into_owned())
				.unwrap_or_else(|| report.output.display().to_string());
			println!("Generated {name}");
		}
		Err(err) => {
			error!(target: "resume_pdf", code = err.code(), error = %err, "export failed");
			eprintln!("Error generating PDF: {err}");
			std::process::exit(1);
		}
	}
}
