pub mod domain;
pub mod error;
pub mod export;
pub mod keywords;
pub mod ports;
pub mod query;
pub mod repository;
pub mod seo;
pub mod session;
pub mod settings;
pub mod synthesizer;
pub mod text;

pub use domain::{
    Article, ArticlePatch, ArticleStatus, AttemptId, GenerationRequest, GenerationSession,
    HeadingLevel, Language, NewArticle, RubricItem, RubricRule, RubricStatus, ScoreGrade,
    Section, SeoAssessment, SessionPhase, StatusFilter, SynthesizedDocument, TargetWordCount,
    Tone,
};
pub use error::{CoreError, CoreResult};
pub use export::{ExportPayload, ExportReceipt};
pub use ports::{DocumentExporter, GenerationProvider, PortError, PortResult, SettingsStore};
pub use query::{ArticleStats, StatsPeriod};
pub use repository::ArticleRepository;
pub use session::{CommitSource, SessionMachine, Transition};
pub use settings::{Settings, Theme};
