use std::{
	env, fs,
	path::{Path, PathBuf},
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use clap::Parser;

use brief::{Args, BatchReport, collection, resolve_config, run_batch};
use brief_config::Config;
use brief_service::{DIGEST_SIZE, DigestOutput};

const INPUT_JSON: &str = r#"{
	"documents": [
		{ "filename": "South of France - Cities.pdf", "title": "Cities" },
		{ "filename": "South of France - Tips and Tricks.pdf", "title": "Tips" }
	],
	"persona": { "role": "Travel Planner" },
	"job_to_be_done": { "task": "Plan a trip of 4 days for a group of 10 college friends." }
}"#;

struct TempBase {
	path: PathBuf,
}
impl TempBase {
	fn new() -> Self {
		static COUNTER: AtomicU64 = AtomicU64::new(0);

		let nanos = SystemTime::now()
			.duration_since(UNIX_EPOCH)
			.expect("System time must be valid.")
			.as_nanos();
		let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
		let path = env::temp_dir()
			.join(format!("brief_batch_test_{nanos}_{}_{ordinal}", std::process::id()));

		fs::create_dir_all(&path).expect("Failed to create temp base directory.");

		Self { path }
	}

	fn collection(&self, name: &str, with_input: bool, with_documents: bool) -> PathBuf {
		let dir = self.path.join(name);

		fs::create_dir_all(&dir).expect("Failed to create collection directory.");

		if with_input {
			fs::write(dir.join("challenge1b_input.json"), INPUT_JSON)
				.expect("Failed to write input file.");
		}
		if with_documents {
			fs::create_dir_all(dir.join("PDFs")).expect("Failed to create documents directory.");
		}

		dir
	}
}
impl Drop for TempBase {
	fn drop(&mut self) {
		let _ = fs::remove_dir_all(&self.path);
	}
}

fn offline_config() -> Config {
	let mut config = Config::default();

	config.source.kind = "fixture".to_string();
	config.embedding.provider = "off".to_string();

	config
}

fn read_output(dir: &Path) -> DigestOutput {
	let raw = fs::read_to_string(dir.join("challenge1b_output.json"))
		.expect("Output file must exist.");

	serde_json::from_str(&raw).expect("Output must parse.")
}

#[tokio::test]
async fn batch_counts_successes_and_skips_broken_collections() {
	let base = TempBase::new();
	let good = base.collection("Collection 1", true, true);
	let missing_documents = base.collection("Collection 2", true, false);

	base.collection("notes", false, true);

	let report = run_batch(offline_config(), &base.path, None).await.expect("Batch must run.");

	assert_eq!(report, BatchReport { succeeded: 1, total: 2 });
	assert!(!missing_documents.join("challenge1b_output.json").exists());

	let output = read_output(&good);

	assert_eq!(output.extracted_sections.len(), DIGEST_SIZE);
	assert_eq!(output.subsection_analysis.len(), DIGEST_SIZE);
	assert_eq!(output.metadata.persona, "Travel Planner");
	assert_eq!(output.metadata.input_documents.len(), 2);
	assert!(output.error.is_none());
}

#[tokio::test]
async fn named_collection_is_processed_alone() {
	let base = TempBase::new();
	let first = base.collection("alpha", true, true);
	let second = base.collection("beta", true, true);
	let report =
		run_batch(offline_config(), &base.path, Some("beta")).await.expect("Batch must run.");

	assert_eq!(report, BatchReport { succeeded: 1, total: 1 });
	assert!(second.join("challenge1b_output.json").is_file());
	assert!(!first.join("challenge1b_output.json").exists());
}

#[tokio::test]
async fn missing_named_collection_reports_nothing() {
	let base = TempBase::new();
	let report =
		run_batch(offline_config(), &base.path, Some("absent")).await.expect("Batch must run.");

	assert_eq!(report, BatchReport::default());
}

#[test]
fn discovery_is_sorted_and_requires_input_file() {
	let base = TempBase::new();

	base.collection("zeta", true, true);
	base.collection("alpha", true, false);
	base.collection("empty", false, false);

	let found = collection::discover(&base.path, None).expect("Discovery must succeed.");
	let names: Vec<String> = found
		.iter()
		.filter_map(|path| path.file_name().map(|name| name.to_string_lossy().into_owned()))
		.collect();

	assert_eq!(names, vec!["alpha".to_string(), "zeta".to_string()]);
}

#[test]
fn missing_base_directory_is_an_error() {
	let missing = env::temp_dir().join("brief_batch_test_missing_base_dir");

	assert!(collection::discover(&missing, None).is_err());
}

#[test]
fn malformed_input_fails_the_collection() {
	let base = TempBase::new();
	let dir = base.collection("broken", false, true);

	fs::write(dir.join("challenge1b_input.json"), "{ not json").expect("Failed to write input.");

	assert!(collection::read_input(&dir).is_err());
}

#[test]
fn flags_override_config_values() {
	let args = Args::try_parse_from([
		"brief",
		"--base-dir",
		"collections",
		"--collection",
		"Collection 1",
		"--model-dir",
		"/opt/models",
		"--log-level",
		"debug",
	])
	.expect("Arguments must parse.");
	let config = resolve_config(&args).expect("Config must resolve.");

	assert_eq!(args.base_dir, PathBuf::from("collections"));
	assert_eq!(args.collection.as_deref(), Some("Collection 1"));
	assert_eq!(config.embedding.static_model.model_dir, PathBuf::from("/opt/models"));
	assert_eq!(config.service.log_level, "debug");
}

#[test]
fn base_dir_flag_is_required() {
	assert!(Args::try_parse_from(["brief"]).is_err());
}
