use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Default filter: progress from this tool, warnings from everything else.
pub const DEFAULT_FILTER: &str = "warn,resume_pdf=info";

pub fn init_logging() {
	let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

	// stdout carries only the confirmation line.
	let stderr = std::io::stderr.with_max_level(tracing::Level::TRACE);

	tracing_subscriber::fmt()
		.with_env_filter(env_filter)
		.with_writer(stderr)
		.with_target(true)
		.with_level(true)
		.compact()
		.init();
}

/// Records the level and target of every event that reaches it.
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct RecordedEvents(std::sync::Arc<std::sync::Mutex<Vec<(tracing::Level, String)>>>);

#[cfg(test)]
impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for RecordedEvents {
	fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
		let meta = event.metadata();
		self.0.lock().unwrap().push((*meta.level(), meta.target().to_string()));
	}
}

#[cfg(test)]
impl RecordedEvents {
	/// Installs the recorder behind `filter` for the current thread.
	pub(crate) fn install(&self, filter: EnvFilter) -> tracing::subscriber::DefaultGuard {
		use tracing_subscriber::layer::SubscriberExt;

		tracing::subscriber::set_default(tracing_subscriber::registry().with(filter).with(self.clone()))
	}

	pub(crate) fn targets(&self) -> Vec<String> {
		self.0.lock().unwrap().iter().map(|(_, t)| t.clone()).collect()
	}

	pub(crate) fn has(&self, level: tracing::Level, target: &str) -> bool {
		self.0.lock().unwrap().iter().any(|(l, t)| *l == level && t == target)
	}
}
