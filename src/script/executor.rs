use crate::script::commands::{Outcome, Status};
use crate::script::parser::{ParsedLine, ParsedScript};
use crate::trace::TraceSink;

#[derive(Debug)]
pub struct RunResult {
    /// One entry per executed prefix line, in execution order.
    pub outcomes: Vec<Outcome>,
    /// True iff every executed command passed. Unreachable lines never
    /// affect it.
    pub all_passed: bool,
}

/// Runs the executable prefix strictly in file order, then reports the
/// unreachable remainder. Trace numbering starts at 1 and is continuous
/// across executed and unreachable entries.
pub fn execute_script(script: &ParsedScript, trace: &mut TraceSink) -> RunResult {
    let mut outcomes: Vec<Outcome> = Vec::with_capacity(script.prefix.len());
    let mut all_passed = true;
    let mut number = 1usize;

    for line in &script.prefix {
        trace.info(&format!("Executing Command Number: {number}"));
        let (message, status) = match line {
            ParsedLine::Run(cmd) => cmd.execute(),
            ParsedLine::Malformed { reason } => (reason.clone(), Status::Failed),
        };
        if status == Status::Failed {
            all_passed = false;
        }
        trace.debug(&format!("{message}: {status}"));
        trace.separator();
        outcomes.push((message, status));
        number += 1;
    }

    for raw in &script.unreachable {
        trace.info(&format!("Executing Command Number: {number}"));
        trace.debug(&format!(
            "{raw}, Couldn't Execute Command, Exceeds Max Commands"
        ));
        trace.separator();
        number += 1;
    }

    RunResult {
        outcomes,
        all_passed,
    }
}
