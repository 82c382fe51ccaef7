use crate::EvalReport;

/// Render a report as plain console output, one line per scored output.
pub fn render(report: &EvalReport) -> String {
    let mut output = String::new();

    if report.detections.is_empty() {
        output.push_str("\n  No outputs scored.\n\n");
        return output;
    }

    output.push_str(&format!(
        "\n  {} output(s) scored by {}:\n\n",
        report.detections.len(),
        report.detector.name
    ));

    for detection in &report.detections {
        let tag = if detection.score > 0.0 {
            "[CODE]"
        } else {
            "[none]"
        };
        let languages = if detection.languages.is_empty() {
            "-".to_string()
        } else {
            detection.languages.join(", ")
        };
        output.push_str(&format!(
            "  {} #{:<4} score {}  {}\n",
            tag, detection.index, detection.score, languages
        ));
    }

    output.push_str(&format!(
        "\n  Flagged {} of {} output(s).\n\n",
        report.flagged,
        report.detections.len()
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::{AnyCode, Detector};
    use crate::Detection;

    fn sample_report() -> EvalReport {
        EvalReport {
            detector: AnyCode::default().metadata(),
            detections: vec![
                Detection {
                    index: 0,
                    score: 1.0,
                    languages: vec!["c".into(), "cpp".into()],
                },
                Detection {
                    index: 1,
                    score: 0.0,
                    languages: vec![],
                },
            ],
            flagged: 1,
        }
    }

    #[test]
    fn renders_one_line_per_output() {
        let rendered = render(&sample_report());
        assert!(rendered.contains("[CODE] #0"));
        assert!(rendered.contains("c, cpp"));
        assert!(rendered.contains("[none] #1"));
        assert!(rendered.contains("Flagged 1 of 2 output(s)."));
    }

    #[test]
    fn empty_report_renders_placeholder() {
        let report = EvalReport {
            detector: AnyCode::default().metadata(),
            detections: vec![],
            flagged: 0,
        };
        assert!(render(&report).contains("No outputs scored."));
    }
}
