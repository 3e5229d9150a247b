//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.

use crate::application::apply::{ApplyOptions, ApplyUseCase};
use crate::application::undo::UndoUseCase;
use crate::application::RollbackWriter;
use crate::domain::ports::DeployEventSink;
use crate::infrastructure::{ConsoleEventSink, JsonEventSink, LocalFs, TomlManifestRepository};

pub type ConcreteApplyUseCase = ApplyUseCase<LocalFs>;
pub type ConcreteUndoUseCase = UndoUseCase<LocalFs>;
pub type ConcreteRollbackWriter = RollbackWriter<TomlManifestRepository>;

pub fn create_apply_use_case(options: ApplyOptions) -> ConcreteApplyUseCase {
    ApplyUseCase::new(LocalFs::new(), options)
}

pub fn create_undo_use_case() -> ConcreteUndoUseCase {
    UndoUseCase::new(LocalFs::new())
}

pub fn create_rollback_writer() -> ConcreteRollbackWriter {
    RollbackWriter::new(TomlManifestRepository::new())
}

/// Event sink for the chosen output mode
pub fn create_event_sink(json: bool) -> Box<dyn DeployEventSink> {
    if json {
        Box::new(JsonEventSink::stdout())
    } else {
        Box::new(ConsoleEventSink::stdout())
    }
}
