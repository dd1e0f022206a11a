use anyhow::{ensure, Result};

use scrollfx_core::{AppConfig, PinnedStack};

pub fn run(config: &AppConfig, items: usize, steps: usize) -> Result<()> {
    ensure!(items > 0, "the stack needs at least one item");
    ensure!(steps > 0, "at least one progress step is required");

    let stack = PinnedStack::new(items, config.stack.clone());
    println!("{}", table(&stack, steps).join("\n"));
    Ok(())
}

fn table(stack: &PinnedStack, steps: usize) -> Vec<String> {
    let mut lines = Vec::with_capacity(steps + 4);

    let header: String = (0..stack.len()).map(|i| format!("  item {:<3}", i)).collect();
    lines.push(format!("progress{}", header));

    let sticky: String = (0..stack.len())
        .map(|i| format!("  {:>6.0}px ", stack.sticky_offset(i)))
        .collect();
    lines.push(format!("sticky  {}", sticky));

    for step in 0..=steps {
        let progress = step as f64 / steps as f64;
        let scales: String = stack
            .items(progress)
            .map(|item| format!("  {:>8.3} ", item.scale))
            .collect();
        lines.push(format!("{:>7.0}%{}", progress * 100.0, scales));
    }

    let floors: String = (0..stack.len())
        .map(|i| format!("  {:>8.3} ", stack.target_floor(i)))
        .collect();
    lines.push(format!("floor   {}", floors));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrollfx_core::config::StackConfig;

    #[test]
    fn test_table_ends_at_floors() {
        let stack = PinnedStack::new(3, StackConfig::default());
        let lines = table(&stack, 4);
        // header, sticky, five progress rows, floor
        assert_eq!(lines.len(), 8);
        assert!(lines[1].contains("250px"));
        assert!(lines[1].contains("290px"));
        let last: Vec<&str> = lines[6].split_whitespace().skip(1).collect();
        assert_eq!(last, ["0.800", "0.900", "1.000"]);
        assert!(lines[7].starts_with("floor"));
    }
}
