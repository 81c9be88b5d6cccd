use std::io::{self, Write};

use crate::{SolutionReport, Status, VarType};

/// Writes a human-readable summary of a solution report.
///
/// The status line is always emitted. For optimal reports the objective value,
/// runtime, iteration count (when present), and every selected or active
/// variable follow: binary variables are listed when their value exceeds 0.5,
/// all others when their value is non-zero. For any other status the report
/// carries nothing else, so nothing else is printed.
pub fn render(report: &SolutionReport, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "Status: {}", report.status())?;
    if report.status() != Status::Optimal {
        return Ok(());
    }

    if let Some(objective) = report.objective_value() {
        writeln!(out, "Objective: {}", objective)?;
    }
    if let Some(runtime) = report.runtime() {
        writeln!(out, "Runtime: {:.3}s", runtime.as_secs_f64())?;
    }
    if let Some(iterations) = report.iteration_count() {
        writeln!(out, "Iterations: {}", iterations)?;
    }

    for assignment in report.assignments() {
        let shown = match assignment.var_type {
            VarType::Binary => assignment.value > 0.5,
            VarType::Integer | VarType::Continuous => assignment.value != 0.0,
        };
        if shown {
            writeln!(out, "  {}={}", assignment.symbol, assignment.value)?;
        }
    }
    Ok(())
}

/// Renders a solution report into a `String`.
pub fn render_to_string(report: &SolutionReport) -> String {
    let mut buf = Vec::new();
    render(report, &mut buf).expect("writing to a Vec cannot fail");
    String::from_utf8(buf).expect("rendered report is valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{RawSolution, SolveOptions, Solver};
    use crate::builder::var;
    use crate::Model;
    use std::time::Duration;

    /// Backend stub replaying a fixed outcome, for exercising the reporting path.
    struct Scripted(RawSolution);

    impl Solver for Scripted {
        fn solve(&self, _model: &Model, _options: &SolveOptions) -> RawSolution {
            self.0.clone()
        }
    }

    #[test]
    fn non_optimal_renders_status_only() {
        let mut model = Model::default();
        model.add(var().binary().name("x")).unwrap();

        for status in [
            Status::Infeasible,
            Status::InfeasibleOrUnbounded,
            Status::Unbounded,
            Status::TimeLimit,
            Status::Error,
        ] {
            let solver = Scripted(RawSolution::status_only(status));
            let report = model.solve(&solver, &SolveOptions::default());
            let text = render_to_string(&report);
            assert_eq!(text, format!("Status: {}\n", status));
        }
    }

    #[test]
    fn optimal_lists_selected_and_active_variables() {
        let mut model = Model::default();
        model.add(var().binary().name("picked")).unwrap();
        model.add(var().binary().name("skipped")).unwrap();
        model.add(var().name("flow")).unwrap();
        model.add(var().name("idle")).unwrap();

        let solver = Scripted(RawSolution {
            status: Status::Optimal,
            values: vec![1.0, 0.0, 2.5, 0.0],
            objective_value: Some(7.0),
            runtime: Some(Duration::from_millis(250)),
            iteration_count: Some(42),
        });
        let report = model.solve(&solver, &SolveOptions::default());
        let text = render_to_string(&report);

        assert!(text.starts_with("Status: Optimal\n"));
        assert!(text.contains("Objective: 7\n"));
        assert!(text.contains("Runtime: 0.250s\n"));
        assert!(text.contains("Iterations: 42\n"));
        assert!(text.contains("  picked=1\n"));
        assert!(text.contains("  flow=2.5\n"));
        assert!(!text.contains("skipped"));
        assert!(!text.contains("idle"));
    }

    #[test]
    fn missing_iteration_count_is_omitted() {
        let mut model = Model::default();
        model.add(var().binary().name("x")).unwrap();

        let solver = Scripted(RawSolution {
            status: Status::Optimal,
            values: vec![1.0],
            objective_value: Some(1.0),
            runtime: Some(Duration::from_millis(1)),
            iteration_count: None,
        });
        let report = model.solve(&solver, &SolveOptions::default());
        let text = render_to_string(&report);
        assert!(!text.contains("Iterations"));
    }
}
