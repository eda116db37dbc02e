use crate::error::Result;
use drnkit::core::metrics::Metric;

fn describe(metric: Metric) -> String {
    let kind = if metric.is_iterative() {
        "iterative"
    } else {
        "exact"
    };
    format!(
        "{:<5} --calc-{:<5} {} ({})",
        metric.label(),
        metric.label().to_ascii_lowercase(),
        metric.description(),
        kind
    )
}

pub fn run() -> Result<()> {
    println!("Available centrality metrics:");
    for metric in Metric::ALL {
        println!("  {}", describe(metric));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptions_name_the_matching_flag() {
        let line = describe(Metric::AveragePathLength);
        assert!(line.starts_with("L "));
        assert!(line.contains("--calc-l"));
        assert!(line.ends_with("(exact)"));
        assert!(describe(Metric::PageRank).ends_with("(iterative)"));
    }
}
