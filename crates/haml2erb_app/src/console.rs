use haml2erb_engine::{PipelineEvent, ProgressSink, Step};

/// Prints one status line per step outcome:
/// `<verb> file <path> [OK]` or `<verb> file <path>: <message> [ERROR]`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl ProgressSink for ConsoleSink {
    fn emit(&self, event: PipelineEvent) {
        println!("{}", render(&event));
    }
}

fn render(event: &PipelineEvent) -> String {
    match event {
        PipelineEvent::StepOk { step, path } => {
            format!("{} file {} [OK]", verb(*step), path.display())
        }
        PipelineEvent::StepFailed {
            step,
            path,
            message,
        } => format!("{} file {}: {} [ERROR]", verb(*step), path.display(), message),
    }
}

fn verb(step: Step) -> &'static str {
    match step {
        Step::Read => "reading",
        Step::Convert => "converting",
        Step::Write => "writing",
        Step::Remove => "removing",
    }
}
