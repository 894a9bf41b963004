use crate::stress_tests::StressTestResults;
use anyhow::Result;
use std::fs::File;
use std::io::Write;

/// Write a Markdown summary of a stress run.
pub fn generate_report(results: &StressTestResults, path: &str) -> Result<()> {
    let mut content = String::new();

    content.push_str("# Traffic Accounting Stress Report\n\n");
    content.push_str("## Summary\n\n");
    content.push_str(&format!("- **Writer tasks:** {}\n", results.tasks));
    content.push_str(&format!(
        "- **Increments per task:** {}\n",
        results.increments_per_task
    ));
    content.push_str(&format!("- **Duration:** {} ms\n", results.duration_ms));
    content.push_str(&format!(
        "- **Throughput:** {:.0} increments/s\n",
        results.increments_per_second
    ));
    content.push_str(&format!("- **Lost updates:** {}\n\n", results.lost_updates));

    content.push_str("## Drained bytes per namespace\n\n");
    content.push_str("| Namespace | Drained (up+down) | Expected |\n");
    content.push_str("|-----------|-------------------|----------|\n");
    for namespace in ["inbound", "outbound", "user"] {
        let drained = results
            .drained_per_namespace
            .get(namespace)
            .copied()
            .unwrap_or(0);
        content.push_str(&format!(
            "| {} | {} | {} |\n",
            namespace,
            drained,
            results.expected_per_direction * 2
        ));
    }

    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn report_contains_all_namespaces() -> Result<()> {
        let results = StressTestResults {
            tasks: 4,
            increments_per_task: 1_000,
            expected_per_direction: 4_000,
            drained_per_namespace: HashMap::from([
                ("inbound", 8_000),
                ("outbound", 8_000),
                ("user", 8_000),
            ]),
            lost_updates: 0,
            duration_ms: 12,
            increments_per_second: 666_666.0,
        };

        let dir = tempfile::tempdir()?;
        let path = dir.path().join("stress.md");
        generate_report(&results, path.to_str().unwrap())?;

        let content = std::fs::read_to_string(&path)?;
        assert!(content.contains("| inbound | 8000 | 8000 |"));
        assert!(content.contains("| outbound | 8000 | 8000 |"));
        assert!(content.contains("| user | 8000 | 8000 |"));
        assert!(content.contains("**Lost updates:** 0"));
        Ok(())
    }
}
