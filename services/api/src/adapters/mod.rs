pub mod export_fs;
pub mod settings_store;
pub mod template_llm;

pub use export_fs::FsExporter;
pub use settings_store::{InMemorySettingsStore, JsonFileSettingsStore};
pub use template_llm::TemplateGenerationAdapter;
